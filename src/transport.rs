// src/transport.rs
use async_trait::async_trait;
use reqwest::{Client, Proxy};
use serde_json::Value;
use std::time::Duration;

use crate::error::{Error, Result};

/// Status and raw body of an HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Posts a JSON body and returns whatever came back.
///
/// Only a failure to complete the exchange is an error here; HTTP error
/// statuses are left to the provider modules.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, url: &str, headers: &[(&str, String)], body: &Value) -> Result<HttpResponse>;
}

pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// `proxy` and `timeout` are both optional; without a timeout a hung
    /// provider blocks until the connection drops.
    pub fn new(proxy: Option<&str>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();

        if let Some(proxy_url) = proxy.map(str::trim).filter(|p| !p.is_empty()) {
            let proxy = Proxy::all(proxy_url)
                .map_err(|e| Error::Config(format!("Invalid proxy URL {}: {}", proxy_url, e)))?;
            builder = builder.proxy(proxy);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| Error::Network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(&self, url: &str, headers: &[(&str, String)], body: &Value) -> Result<HttpResponse> {
        let mut req_builder = self
            .http
            .post(url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");

        for (name, value) in headers {
            req_builder = req_builder.header(*name, value);
        }

        let response = req_builder
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(format!("Failed to read response body: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}
