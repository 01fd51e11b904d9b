// src/providers/anthropic.rs
use serde_json::Value;

use super::{decode, Provider};
use crate::error::{Error, Result};
use crate::transport::Transport;
use crate::types::*;

pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const MAX_TOKENS: u32 = 1000;

/// The Messages API takes the system prompt as a top-level field.
pub fn build_request(model: &str, system: &str, user: &str) -> AnthropicRequest {
    AnthropicRequest {
        model: model.to_string(),
        max_tokens: MAX_TOKENS,
        system: system.to_string(),
        messages: vec![ChatMessage::user(user)],
        stream: false,
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
    let request = build_request(model, system, user);
    let body: Value = serde_json::to_value(&request)
        .map_err(|e| Error::Response(format!("Failed to encode request: {}", e)))?;
    let headers = [
        ("x-api-key", api_key.to_string()),
        ("anthropic-version", ANTHROPIC_VERSION.to_string()),
    ];

    let response = transport.post_json(url, &headers, &body).await?;
    let resp: AnthropicResponse = decode(Provider::Anthropic, &response)?;

    resp.content
        .into_iter()
        .find(|block| block.kind == "text")
        .and_then(|block| block.text)
        .ok_or_else(|| Error::Response("no response from Anthropic".to_string()))
}

// =============================================================================
// MODULE TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::RecordingTransport;

    #[tokio::test]
    async fn uses_api_key_header_pair() {
        let transport = RecordingTransport::replying(200, r#"{"content":[{"type":"text","text":"Refactor config loader"}]}"#);
        let text = chat(&transport, "https://api.anthropic.com/v1/messages", "sk-ant", "claude-3-opus-20240229", "sys", "diff")
            .await
            .unwrap();
        assert_eq!(text, "Refactor config loader");

        let req = transport.last();
        assert_eq!(req.header("x-api-key"), Some("sk-ant"));
        assert_eq!(req.header("anthropic-version"), Some(ANTHROPIC_VERSION));
        assert_eq!(req.header("Authorization"), None);
        assert_eq!(req.body["max_tokens"], MAX_TOKENS);
        assert_eq!(req.body["system"], "sys");
        assert_eq!(req.body["stream"], false);
        assert_eq!(req.body["messages"][0]["role"], "user");
        assert_eq!(req.body["messages"][0]["content"], "diff");
    }

    #[tokio::test]
    async fn skips_non_text_blocks() {
        let transport = RecordingTransport::replying(
            200,
            r#"{"content":[{"type":"thinking","thinking":"hmm"},{"type":"text","text":"Fix race"}]}"#,
        );
        let text = chat(&transport, "u", "k", "m", "s", "p").await.unwrap();
        assert_eq!(text, "Fix race");
    }

    #[tokio::test]
    async fn empty_content_is_response_error() {
        let transport = RecordingTransport::replying(200, r#"{"content":[]}"#);
        let err = chat(&transport, "u", "k", "m", "s", "p").await.unwrap_err();
        assert!(matches!(err, Error::Response(_)));
    }

    #[tokio::test]
    async fn api_error_is_reported() {
        let transport = RecordingTransport::replying(
            401,
            r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#,
        );
        let err = chat(&transport, "u", "k", "m", "s", "p").await.unwrap_err();
        assert_eq!(err.to_string(), "Anthropic API error (401): invalid x-api-key");
    }
}
