// src/types.rs
use serde::{Deserialize, Serialize};

// =============================================================================
// OPENAI-COMPATIBLE API TYPES (openai, deepseek, qwen; ollama reuses the request)
// =============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self { role: "system".to_string(), content: content.to_string() }
    }

    pub fn user(content: &str) -> Self {
        Self { role: "user".to_string(), content: content.to_string() }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
pub struct ChatMessageResponse {
    pub content: Option<String>,
}

// =============================================================================
// OLLAMA API TYPES
// =============================================================================
#[derive(Debug, Deserialize)]
pub struct OllamaChatResponse {
    pub message: Option<ChatMessageResponse>,
}

// =============================================================================
// COMMON ERROR TYPE
// =============================================================================
#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApiErrorDetail {
    Object { message: Option<String> },
    // Ollama answers {"error": "model 'x' not found"}
    Text(String),
}

impl ApiErrorDetail {
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiErrorDetail::Object { message } => message.as_deref(),
            ApiErrorDetail::Text(text) => Some(text),
        }
    }
}

// =============================================================================
// ANTHROPIC API TYPES
// =============================================================================
#[derive(Debug, Serialize)]
pub struct AnthropicRequest {
    pub model: String,
    pub max_tokens: u32,
    pub system: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
pub struct AnthropicResponse {
    #[serde(default)]
    pub content: Vec<AnthropicContent>,
}

#[derive(Debug, Deserialize)]
pub struct AnthropicContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: Option<String>,
}
