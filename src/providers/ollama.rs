// src/providers/ollama.rs
use serde_json::Value;

use super::{decode, Provider};
use crate::error::{Error, Result};
use crate::transport::Transport;
use crate::types::*;

pub fn chat_url(base_url: &str) -> String {
    format!("{}/api/chat", base_url.trim_end_matches('/'))
}

/// Local models need no credential; the request reuses the OpenAI body.
pub async fn chat(transport: &dyn Transport, base_url: &str, model: &str, system: &str, user: &str) -> Result<String> {
    let request = super::openai::build_request(model, system, user);
    let body: Value = serde_json::to_value(&request)
        .map_err(|e| Error::Response(format!("Failed to encode request: {}", e)))?;

    let response = transport.post_json(&chat_url(base_url), &[], &body).await?;
    let resp: OllamaChatResponse = decode(Provider::Ollama, &response)?;

    resp.message
        .and_then(|m| m.content)
        .ok_or_else(|| Error::Response("no response from Ollama".to_string()))
}
