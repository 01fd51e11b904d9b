// src/commands/branch.rs
use anyhow::{Context, Result};

use super::{collect_changes, generate, review, AppContext};
use crate::prompts::Task;

pub const BRANCH_HELP: &str = "# AI-generated branch name. Save and close the editor to confirm.
# Or clear the file to cancel.
# Lines starting with # will be ignored.";

/// Trim, lowercase and hyphenate what the model returned.
pub fn clean_branch_name(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "-")
}

pub async fn cmd_branch(ctx: &AppContext, no_edit: bool) -> Result<()> {
    let Some(changes) = collect_changes(&ctx.git)? else {
        println!("No changes detected");
        return Ok(());
    };

    let name = clean_branch_name(&generate(ctx, &changes, Task::Branch).await?);

    let Some(name) = review(ctx, no_edit, "ai-git-branch-name-", name, BRANCH_HELP)? else {
        println!("Branch name is empty. Operation cancelled.");
        return Ok(());
    };

    ctx.git
        .checkout_new_branch(&name)
        .context("Error executing git checkout -b")?;
    Ok(())
}
