// src/editor.rs
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::TempPath;
use tracing::debug;

use crate::error::{Error, Result};

pub const EDITOR_ENV: &str = "AI_GIT_EDITOR";
pub const DEFAULT_EDITOR: &str = "vim";

/// `$AI_GIT_EDITOR`, then the configured editor, then `$EDITOR`, then vim.
pub fn resolve_editor(configured: Option<&str>, env: impl Fn(&str) -> Option<String>) -> String {
    env(EDITOR_ENV)
        .or_else(|| configured.map(str::to_string))
        .or_else(|| env("EDITOR"))
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
}

/// Drop lines starting with `#` and trim the rest.
pub fn strip_comments(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// A temp file staged for the editor. The file is removed when the session drops.
pub struct EditSession {
    path: TempPath,
}

impl EditSession {
    pub fn new(prefix: &str, content: &str) -> Result<Self> {
        let mut file = tempfile::Builder::new().prefix(prefix).suffix(".txt").tempfile()?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        Ok(Self { path: file.into_temp_path() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the file in `editor`, attached to the terminal.
    ///
    /// `editor` may carry arguments, e.g. `code --wait`.
    pub fn run(&self, editor: &str) -> Result<()> {
        let mut parts = editor.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| Error::Execution("no editor configured".to_string()))?;

        debug!(editor, path = %self.path.display(), "opening editor");
        let status = Command::new(program)
            .args(parts)
            .arg(&*self.path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::Execution(format!("Error opening editor {}: {}", program, e)))?;

        if !status.success() {
            return Err(Error::Execution(format!("Editor {} exited with {}", program, status)));
        }
        Ok(())
    }

    pub fn read_back(&self) -> Result<String> {
        let text = std::fs::read_to_string(&self.path)?;
        Ok(strip_comments(&text))
    }
}

/// Let the user edit `text`. `None` means the file was emptied, i.e. cancelled.
pub fn edit_text(editor: &str, prefix: &str, text: &str, help: &str) -> Result<Option<String>> {
    let session = EditSession::new(prefix, &format!("{}\n\n{}", text, help))?;
    debug!(path = %session.path().display(), "staged text for editing");
    session.run(editor)?;
    let edited = session.read_back()?;
    Ok(Some(edited).filter(|s| !s.is_empty()))
}

// =============================================================================
// MODULE TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_comments_removes_hash_lines() {
        let text = "✨ Add parser\n\nBody line\n# comment\n   # indented comment\n";
        assert_eq!(strip_comments(text), "✨ Add parser\n\nBody line");
    }

    #[test]
    fn strip_comments_of_only_comments_is_empty() {
        assert_eq!(strip_comments("# a\n#b\n\n"), "");
    }

    #[test]
    fn resolve_editor_precedence() {
        let env = |name: &str| match name {
            "AI_GIT_EDITOR" => Some("hx".to_string()),
            "EDITOR" => Some("nano".to_string()),
            _ => None,
        };
        assert_eq!(resolve_editor(Some("code --wait"), env), "hx");
        assert_eq!(resolve_editor(Some("code --wait"), |n: &str| (n == "EDITOR").then(|| "nano".to_string())), "code --wait");
        assert_eq!(resolve_editor(None, |n: &str| (n == "EDITOR").then(|| "nano".to_string())), "nano");
        assert_eq!(resolve_editor(None, |_: &str| None), DEFAULT_EDITOR);
        assert_eq!(resolve_editor(Some("  "), |_: &str| None), DEFAULT_EDITOR);
    }

    #[test]
    fn session_writes_content_and_cleans_up() {
        let session = EditSession::new("ai-git-test-", "hello\n# note").unwrap();
        let path = session.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(session.read_back().unwrap(), "hello");
        drop(session);
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn failing_editor_still_removes_file() {
        let session = EditSession::new("ai-git-test-", "msg").unwrap();
        let path = session.path().to_path_buf();
        let err = session.run("false").unwrap_err();
        assert!(matches!(err, Error::Execution(_)));
        drop(session);
        assert!(!path.exists());
    }

    #[test]
    fn missing_editor_binary_is_execution_error() {
        let session = EditSession::new("ai-git-test-", "msg").unwrap();
        let err = session.run("definitely-not-an-editor-xyz").unwrap_err();
        assert!(matches!(err, Error::Execution(_)));
    }

    #[cfg(unix)]
    #[test]
    fn edit_text_with_noop_editor_keeps_message() {
        let edited = edit_text("true", "ai-git-test-", "Fix bug", "# help").unwrap();
        assert_eq!(edited.as_deref(), Some("Fix bug"));
    }

    #[cfg(unix)]
    #[test]
    fn edit_text_with_emptied_file_cancels() {
        // `truncate -s 0 <file>` empties the file like a user clearing it
        let edited = edit_text("truncate -s 0", "ai-git-test-", "Fix bug", "# help").unwrap();
        assert_eq!(edited, None);
    }
}
