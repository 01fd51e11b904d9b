// src/providers/mod.rs
pub mod anthropic;
pub mod ollama;
pub mod openai;
pub mod qwen;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::transport::HttpResponse;
use crate::types::ApiError;

// =============================================================================
// PROVIDER CONSTANTS
// =============================================================================
pub const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const OLLAMA_URL: &str = "http://localhost:11434";
pub const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEEPSEEK_URL: &str = "https://api.deepseek.com/v1/chat/completions";
pub const QWEN_URL: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1/chat/completions";

/// The supported chat backends. Chosen once from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    OpenAi,
    Ollama,
    Anthropic,
    DeepSeek,
    Qwen,
}

impl Provider {
    pub const ALL: [Provider; 5] = [
        Provider::OpenAi,
        Provider::Ollama,
        Provider::Anthropic,
        Provider::DeepSeek,
        Provider::Qwen,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Ollama => "ollama",
            Provider::Anthropic => "anthropic",
            Provider::DeepSeek => "deepseek",
            Provider::Qwen => "qwen",
        }
    }

    /// Name used in user-facing messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Ollama => "Ollama",
            Provider::Anthropic => "Anthropic",
            Provider::DeepSeek => "DeepSeek",
            Provider::Qwen => "Qwen",
        }
    }

    pub fn default_url(self) -> &'static str {
        match self {
            Provider::OpenAi => OPENAI_URL,
            Provider::Ollama => OLLAMA_URL,
            Provider::Anthropic => ANTHROPIC_URL,
            Provider::DeepSeek => DEEPSEEK_URL,
            Provider::Qwen => QWEN_URL,
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-3.5-turbo",
            Provider::Ollama => "llama2",
            Provider::Anthropic => "claude-3-opus-20240229",
            Provider::DeepSeek => "deepseek-chat",
            Provider::Qwen => "qwen-plus",
        }
    }

    /// Environment variable holding the credential. `None` for local backends.
    pub fn api_key_env(self) -> Option<&'static str> {
        match self {
            Provider::OpenAi => Some("OPENAI_API_KEY"),
            Provider::Ollama => None,
            Provider::Anthropic => Some("ANTHROPIC_API_KEY"),
            Provider::DeepSeek => Some("DEEPSEEK_API_KEY"),
            Provider::Qwen => Some("QWEN_API_KEY"),
        }
    }

    pub fn base_url_env(self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI_BASE_URL",
            Provider::Ollama => "OLLAMA_BASE_URL",
            Provider::Anthropic => "ANTHROPIC_BASE_URL",
            Provider::DeepSeek => "DEEPSEEK_BASE_URL",
            Provider::Qwen => "QWEN_BASE_URL",
        }
    }

    pub fn requires_api_key(self) -> bool {
        self.api_key_env().is_some()
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "ollama" => Ok(Provider::Ollama),
            "anthropic" => Ok(Provider::Anthropic),
            "deepseek" => Ok(Provider::DeepSeek),
            "qwen" => Ok(Provider::Qwen),
            other => {
                let known: Vec<&str> = Provider::ALL.iter().map(|p| p.as_str()).collect();
                Err(Error::Config(format!(
                    "unsupported model type: {} (expected one of: {})",
                    other,
                    known.join(", ")
                )))
            }
        }
    }
}

// =============================================================================
// RESPONSE HANDLING
// =============================================================================

/// Turn a non-2xx answer into an error, preferring the provider's own message.
pub(crate) fn check_status(provider: Provider, response: &HttpResponse) -> Result<(), Error> {
    if response.is_success() {
        return Ok(());
    }
    let body = &response.body;
    if let Some(msg) = serde_json::from_str::<ApiError>(body)
        .ok()
        .and_then(|e| e.error)
        .and_then(|d| d.message().map(str::to_string))
    {
        return Err(Error::Response(format!(
            "{} API error ({}): {}",
            provider.display_name(),
            response.status,
            msg
        )));
    }
    let end = body.char_indices().nth(500).map(|(i, _)| i).unwrap_or(body.len());
    Err(Error::Response(format!(
        "{} API error ({}): {}",
        provider.display_name(),
        response.status,
        &body[..end]
    )))
}

pub(crate) fn decode<T: DeserializeOwned>(provider: Provider, response: &HttpResponse) -> Result<T, Error> {
    check_status(provider, response)?;
    serde_json::from_str(&response.body).map_err(|e| {
        Error::Response(format!("Failed to parse {} response: {}", provider.display_name(), e))
    })
}
