// src/commands/config.rs
use std::path::Path;

use anyhow::Result;

use crate::config::ResolvedConfig;

pub fn cmd_config(config: &ResolvedConfig, source: Option<&Path>, editor: &str) -> Result<()> {
    print!("{}", render(config, source, editor));
    Ok(())
}

fn render(config: &ResolvedConfig, source: Option<&Path>, editor: &str) -> String {
    let source = source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none, using defaults)".into());

    let mut out = format!("Config file: {}\n\n", source);
    out.push_str(&format!("  provider:     {}\n", config.provider));
    out.push_str(&format!("  model:        {}\n", config.model));
    out.push_str(&format!("  base_url:     {}\n", config.base_url));
    if config.provider.requires_api_key() {
        out.push_str(&format!("  api_key:      {}\n", config.masked_api_key()));
    }
    out.push_str(&format!("  prompt_style: {}\n", config.prompt_style.as_str()));
    out.push_str(&format!("  editor:       {}\n", editor));
    if let Some(timeout) = config.timeout {
        out.push_str(&format!("  timeout:      {}s\n", timeout.as_secs()));
    }
    if let Some(proxy) = &config.proxy {
        out.push_str(&format!("  proxy:        {}\n", proxy));
    }
    out
}
