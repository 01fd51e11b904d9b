// src/main.rs
mod changes;
mod cli;
mod client;
mod commands;
mod config;
mod editor;
mod error;
mod git;
mod prompts;
mod providers;
mod transport;
mod types;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use client::LlmClient;
use commands::{cmd_branch, cmd_commit, cmd_config, AppContext};
use config::{Config, ResolvedConfig};
use editor::resolve_editor;
use git::GitCli;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let git = GitCli::new(cli.dir.clone());

    // Plain git needs neither config nor a provider.
    if let Some(args) = cli.command.git_args() {
        let code = git.passthrough(&args).context("Error executing git")?;
        std::process::exit(code);
    }

    let (file_config, source) = Config::load(cli.config.as_deref()).context("Error loading config")?;
    let config = ResolvedConfig::new(&cli.overrides(), &file_config, |k| std::env::var(k).ok())?;
    let editor = resolve_editor(config.editor.as_deref(), |k| std::env::var(k).ok());

    if let Commands::Config = cli.command {
        return cmd_config(&config, source.as_deref(), &editor);
    }

    let client = LlmClient::new(&config)?;
    debug!(
        provider = %client.provider(),
        model = client.model(),
        dir = ?git.dir(),
        "ready"
    );

    let ctx = AppContext {
        config,
        git,
        client,
        editor,
    };

    match cli.command {
        Commands::Commit { all, no_edit, .. } => cmd_commit(&ctx, all, no_edit).await,
        Commands::Checkout { no_edit, .. } => cmd_branch(&ctx, no_edit).await,
        Commands::Config | Commands::Git(_) => Ok(()),
    }
}
