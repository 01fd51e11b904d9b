// src/client.rs
use tracing::{debug, info};

use crate::config::ResolvedConfig;
use crate::error::{Error, Result};
use crate::prompts::Prompt;
use crate::providers::{anthropic, ollama, openai, qwen, Provider};
use crate::transport::{ReqwestTransport, Transport};

pub struct LlmClient {
    transport: Box<dyn Transport>,
    provider: Provider,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl LlmClient {
    pub fn new(config: &ResolvedConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.proxy.as_deref(), config.timeout)?;
        Ok(Self::with_transport(config, Box::new(transport)))
    }

    pub fn with_transport(config: &ResolvedConfig, transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            provider: config.provider,
            base_url: config.base_url.trim().to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                let var = self.provider.api_key_env().unwrap_or_default();
                Error::Config(format!(
                    "{} API key is not set (configure api_key or export {})",
                    self.provider.display_name(),
                    var
                ))
            })
    }

    /// Send the prompt to the configured provider and return the generated text, trimmed.
    pub async fn generate(&self, prompt: &Prompt) -> Result<String> {
        let system = prompt.task().system_prompt();
        let user = prompt.as_str();
        let transport = self.transport.as_ref();

        info!(provider = %self.provider, model = %self.model, "requesting completion");
        debug!(url = %self.base_url, prompt_len = user.len(), "prompt ready");

        let text = match self.provider {
            Provider::OpenAi | Provider::DeepSeek => {
                let key = self.require_api_key()?;
                openai::chat(transport, self.provider, &self.base_url, key, &self.model, system, user).await?
            }
            Provider::Qwen => {
                let key = self.require_api_key()?;
                qwen::chat(transport, &self.base_url, key, &self.model, system, user).await?
            }
            Provider::Anthropic => {
                let key = self.require_api_key()?;
                anthropic::chat(transport, &self.base_url, key, &self.model, system, user).await?
            }
            Provider::Ollama => ollama::chat(transport, &self.base_url, &self.model, system, user).await?,
        };

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(Error::Response(format!(
                "{} returned an empty message",
                self.provider.display_name()
            )));
        }
        Ok(text)
    }
}
