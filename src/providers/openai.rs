// src/providers/openai.rs
//! OpenAI-style chat completions. DeepSeek and Qwen speak the same shape.
use serde_json::Value;

use super::{decode, Provider};
use crate::error::{Error, Result};
use crate::transport::Transport;
use crate::types::*;

pub fn build_request(model: &str, system: &str, user: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
        stream: false,
    }
}

#[allow(clippy::too_many_arguments)]
pub async fn chat(
    transport: &dyn Transport,
    provider: Provider,
    url: &str,
    api_key: &str,
    model: &str,
    system: &str,
    user: &str,
) -> Result<String> {
    let request = build_request(model, system, user);
    let body: Value = serde_json::to_value(&request)
        .map_err(|e| Error::Response(format!("Failed to encode request: {}", e)))?;
    let headers = [("Authorization", format!("Bearer {}", api_key))];

    let response = transport.post_json(url, &headers, &body).await?;
    let resp: ChatCompletionResponse = decode(provider, &response)?;

    let choice = resp
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| Error::Response(format!("no response from {}", provider.display_name())))?;

    choice
        .message
        .content
        .ok_or_else(|| Error::Response(format!("{} returned an empty message", provider.display_name())))
}
