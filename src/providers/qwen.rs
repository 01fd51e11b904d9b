// src/providers/qwen.rs
use super::{openai, Provider};
use crate::error::Result;
use crate::transport::Transport;

/// Some Qwen models prefix their answer with a reasoning block.
pub const THINK_MARKER: &str = "</think>\n\n";

/// Keep only what follows the first reasoning marker, if there is one.
pub fn strip_reasoning(content: &str) -> &str {
    match content.split_once(THINK_MARKER) {
        Some((_, answer)) => answer,
        None => content,
    }
}

pub async fn chat(
    transport: &dyn Transport,
    url: &str,
    api_key: &str,
    model: &str,
    system: &str,
    user: &str,
) -> Result<String> {
    let content = openai::chat(transport, Provider::Qwen, url, api_key, model, system, user).await?;
    Ok(strip_reasoning(&content).to_string())
}
