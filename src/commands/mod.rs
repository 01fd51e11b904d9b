// src/commands/mod.rs
mod branch;
mod commit;
mod config;

pub use branch::cmd_branch;
pub use commit::cmd_commit;
pub use config::cmd_config;

use anyhow::{Context, Result};

use crate::changes::{collect, ChangeSet};
use crate::client::LlmClient;
use crate::config::ResolvedConfig;
use crate::editor::edit_text;
use crate::git::GitCli;
use crate::prompts::{Prompt, Task};

/// Everything a command needs, built once in `main`.
pub struct AppContext {
    pub config: ResolvedConfig,
    pub git: GitCli,
    pub client: LlmClient,
    pub editor: String,
}

/// Shared helper: collect changes, or `None` when the tree is clean.
pub(crate) fn collect_changes(git: &GitCli) -> Result<Option<ChangeSet>> {
    let changes = collect(git).context("Error getting git changes")?;
    Ok((!changes.is_empty()).then_some(changes))
}

/// Shared helper: format the prompt and ask the provider.
pub(crate) async fn generate(ctx: &AppContext, changes: &ChangeSet, task: Task) -> Result<String> {
    let prompt = Prompt::build(changes, task, ctx.config.prompt_style);
    let what = match task {
        Task::Commit => "commit message",
        Task::Branch => "branch name",
    };
    ctx.client
        .generate(&prompt)
        .await
        .with_context(|| format!("Error generating {}", what))
}

/// Shared helper: open the editor unless `skip` is set. `None` means cancelled.
pub(crate) fn review(ctx: &AppContext, skip: bool, prefix: &str, text: String, help: &str) -> Result<Option<String>> {
    if skip {
        return Ok(Some(text));
    }
    edit_text(&ctx.editor, prefix, &text, help).context("Error editing generated text")
}
