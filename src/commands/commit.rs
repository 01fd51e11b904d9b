// src/commands/commit.rs
use anyhow::{Context, Result};
use tracing::info;

use super::{collect_changes, generate, review, AppContext};
use crate::prompts::Task;

pub const COMMIT_HELP: &str = "# AI-generated commit message. Save and close the editor to confirm the commit.
# Or clear the file to cancel the commit.
# Lines starting with # will be ignored.";

pub async fn cmd_commit(ctx: &AppContext, all: bool, no_edit: bool) -> Result<()> {
    let Some(changes) = collect_changes(&ctx.git)? else {
        println!("No changes to commit");
        return Ok(());
    };

    let message = generate(ctx, &changes, Task::Commit).await?;

    let Some(message) = review(ctx, no_edit, "ai-git-commit-msg-", message, COMMIT_HELP)? else {
        println!("Commit message is empty. Commit cancelled.");
        return Ok(());
    };

    if all {
        info!("staging all changes");
        ctx.git.add_all().context("Error executing git add")?;
    }

    ctx.git.commit(&message).context("Error executing git commit")?;
    Ok(())
}

// =============================================================================
// MODULE TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::strip_comments;

    #[test]
    fn help_lines_are_all_comments() {
        assert_eq!(strip_comments(COMMIT_HELP), "");
        let staged = format!("✨ Add parser\n\n{}", COMMIT_HELP);
        assert_eq!(strip_comments(&staged), "✨ Add parser");
    }
}
