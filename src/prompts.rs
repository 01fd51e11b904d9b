// src/prompts.rs
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::changes::ChangeSet;

// =============================================================================
// SYSTEM PROMPTS
// =============================================================================
pub const COMMIT_SYSTEM_PROMPT: &str = "You are a helpful assistant that generates concise and descriptive git commit messages based on the changes provided. Please keep it short.";

pub const BRANCH_SYSTEM_PROMPT: &str = "You are a helpful assistant that generates concise and descriptive git branch names based on the changes provided. Please keep it short.";

// =============================================================================
// TASK INSTRUCTIONS
// =============================================================================
pub const COMMIT_CONCISE_INSTRUCTION: &str = "Generate a concise git commit message based on these changes. Just give me the short commit message, you can add emojis.";

pub const COMMIT_SUMMARY_INSTRUCTION: &str = "Generate a concise git commit message based on these changes. Just give me the overall summary and a short result.";

pub const BRANCH_INSTRUCTION: &str = "Generate a concise git branch name based on these changes. Please generate a branch name that follows git branch naming conventions (lowercase, hyphen-separated, descriptive). Just give me the branch name, no explanation needed.";

/// What the model is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Commit,
    Branch,
}

impl Task {
    pub fn system_prompt(self) -> &'static str {
        match self {
            Task::Commit => COMMIT_SYSTEM_PROMPT,
            Task::Branch => BRANCH_SYSTEM_PROMPT,
        }
    }

    pub fn instruction(self, style: PromptStyle) -> &'static str {
        match (self, style) {
            (Task::Commit, PromptStyle::Concise) => COMMIT_CONCISE_INSTRUCTION,
            (Task::Commit, PromptStyle::Summary) => COMMIT_SUMMARY_INSTRUCTION,
            (Task::Branch, _) => BRANCH_INSTRUCTION,
        }
    }
}

/// Wording of the commit instruction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptStyle {
    /// Short message, emojis allowed.
    #[default]
    Concise,
    /// Overall summary plus a short result.
    Summary,
}

impl PromptStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            PromptStyle::Concise => "concise",
            PromptStyle::Summary => "summary",
        }
    }
}

impl FromStr for PromptStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "concise" => Ok(PromptStyle::Concise),
            "summary" => Ok(PromptStyle::Summary),
            other => Err(format!("unknown prompt style: {} (expected concise or summary)", other)),
        }
    }
}

// =============================================================================
// PROMPT
// =============================================================================

/// The user message sent to the provider. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    task: Task,
    text: String,
}

impl Prompt {
    pub fn build(changes: &ChangeSet, task: Task, style: PromptStyle) -> Self {
        Self {
            task,
            text: format_changes(changes, task.instruction(style)),
        }
    }

    pub fn task(&self) -> Task {
        self.task
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Render a change set as plain text and append `instruction`.
///
/// Sections with nothing in them are left out entirely.
pub fn format_changes(changes: &ChangeSet, instruction: &str) -> String {
    let mut out = String::from("Git Changes Summary:\n\n");

    let sections = [
        ("Modified files:", &changes.modified),
        ("Added files:", &changes.added),
        ("Deleted files:", &changes.deleted),
        ("Untracked files:", &changes.untracked),
    ];
    for (title, paths) in sections {
        if paths.is_empty() {
            continue;
        }
        out.push_str(title);
        out.push('\n');
        for path in paths {
            out.push_str(&format!("- {}\n", path));
        }
        out.push('\n');
    }

    let mut detailed = changes.hunk_lines.iter().filter(|(_, lines)| !lines.is_empty()).peekable();
    if detailed.peek().is_some() {
        out.push_str("Detailed Changes:\n\n");
        for (file, lines) in detailed {
            out.push_str(&format!("File: {}\n", file));
            for line in lines {
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
        }
    }

    out.push_str(instruction);
    out
}
