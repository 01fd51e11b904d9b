// src/config.rs
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};
use crate::prompts::PromptStyle;
use crate::providers::Provider;

pub const PROXY_ENV: &str = "AI_GIT_PROXY";
pub const PROVIDER_ENV: &str = "AI_GIT_PROVIDER";

// =============================================================================
// CONFIG FILE
// =============================================================================
pub const CONFIG_DIR: &str = ".ai-git";

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(alias = "type")]
    pub provider: Option<String>,
    pub prompt_style: Option<PromptStyle>,
    pub editor: Option<String>,
    pub timeout_secs: Option<u64>,
    pub openai: Option<ProviderConfig>,
    pub ollama: Option<ProviderConfig>,
    pub anthropic: Option<ProviderConfig>,
    pub deepseek: Option<ProviderConfig>,
    pub qwen: Option<ProviderConfig>,
}

impl Config {
    /// Places searched when no `--config` is given, in order.
    pub fn candidates() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.yaml")];
        if let Some(home) = dirs::home_dir() {
            let dir = home.join(CONFIG_DIR);
            paths.push(dir.join("config.toml"));
            paths.push(dir.join("config.yaml"));
        }
        paths
    }

    /// Load the explicit file, or the first candidate that exists.
    ///
    /// Returns the defaults (and no path) when nothing is found.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!("config file not found at {}", path.display())));
            }
            return Ok((Self::from_file(path)?, Some(path.to_path_buf())));
        }

        match Self::candidates().into_iter().find(|p| p.is_file()) {
            Some(path) => Ok((Self::from_file(&path)?, Some(path))),
            None => {
                debug!("no config file found, using defaults");
                Ok((Self::default(), None))
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("error reading config file {}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "loading config");
        Self::parse(&content, path)
    }

    /// Parse by extension: YAML for `.yaml`/`.yml`, TOML otherwise.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let parsed = if is_yaml {
            // An empty YAML document is `null`, not an empty map.
            if content.trim().is_empty() {
                return Ok(Self::default());
            }
            serde_yaml::from_str(content).map_err(|e| e.to_string())
        } else {
            toml::from_str(content).map_err(|e| e.to_string())
        };
        parsed.map_err(|e| Error::Config(format!("error parsing config file {}: {}", path.display(), e)))
    }

    pub fn get_provider(&self, provider: Provider) -> Option<&ProviderConfig> {
        match provider {
            Provider::OpenAi => self.openai.as_ref(),
            Provider::Ollama => self.ollama.as_ref(),
            Provider::Anthropic => self.anthropic.as_ref(),
            Provider::DeepSeek => self.deepseek.as_ref(),
            Provider::Qwen => self.qwen.as_ref(),
        }
    }
}

// =============================================================================
// RESOLVED CONFIG
// =============================================================================

/// Values given on the command line. They win over everything else.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub prompt_style: Option<PromptStyle>,
}

/// Settings for one run. Built once at start-up and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub provider: Provider,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub prompt_style: PromptStyle,
    pub editor: Option<String>,
    pub timeout: Option<Duration>,
    pub proxy: Option<String>,
}

impl ResolvedConfig {
    /// Precedence for every field: CLI > config file > environment > default.
    ///
    /// `env_lookup` reads the environment, passed in so the process environment
    /// is read in exactly one place.
    pub fn new(cli: &Overrides, file: &Config, env_lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env = |name: &str| env_lookup(name).filter(|v| !v.trim().is_empty());

        let provider: Provider = cli
            .provider
            .clone()
            .or_else(|| file.provider.clone())
            .filter(|p| !p.trim().is_empty())
            .or_else(|| env(PROVIDER_ENV))
            .unwrap_or_else(|| Provider::OpenAi.as_str().to_string())
            .parse()?;

        let provider_config = file.get_provider(provider);

        let api_key = match provider.api_key_env() {
            Some(var) => cli
                .api_key
                .clone()
                .or_else(|| provider_config.and_then(|p| p.api_key.clone()))
                .filter(|k| !k.trim().is_empty())
                .or_else(|| env(var)),
            None => None,
        };

        let base_url = cli
            .base_url
            .clone()
            .or_else(|| provider_config.and_then(|p| p.base_url.clone()))
            .filter(|u| !u.trim().is_empty())
            .or_else(|| env(provider.base_url_env()))
            .unwrap_or_else(|| provider.default_url().to_string());

        let model = cli
            .model
            .clone()
            .or_else(|| provider_config.and_then(|p| p.model.clone()))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| provider.default_model().to_string());

        let prompt_style = cli.prompt_style.or(file.prompt_style).unwrap_or_default();

        Ok(Self {
            provider,
            api_key,
            model,
            base_url,
            prompt_style,
            editor: file.editor.clone(),
            timeout: file.timeout_secs.map(Duration::from_secs),
            proxy: env(PROXY_ENV),
        })
    }

    /// Key with everything but the last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        match &self.api_key {
            None => "(not set)".to_string(),
            Some(key) if key.chars().count() <= 8 => "****".to_string(),
            Some(key) => {
                let tail: String = key.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
                format!("****{}", tail)
            }
        }
    }
}
