// src/git.rs
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use tracing::debug;

use crate::error::{Error, Result};

// =============================================================================
// GIT SOURCE
// =============================================================================

/// The two read-only queries the change collector needs.
pub trait GitSource {
    /// `git status --porcelain`
    fn status(&self) -> Result<String>;
    /// `git diff HEAD`
    fn diff(&self) -> Result<String>;
}

/// Runs the system `git` binary, optionally inside an explicit working directory.
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    dir: Option<PathBuf>,
}

impl GitCli {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new("git");
        if let Some(dir) = &self.dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Run git, capture its output, and fail on a non-zero exit.
    pub fn run(&self, args: &[&str]) -> Result<String> {
        debug!(?args, dir = ?self.dir, "running git");
        let output = self
            .command()
            .args(args)
            .output()
            .map_err(|e| Error::Execution(format!("Failed to execute git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Execution(format!(
                "git {} failed: {}",
                args.first().copied().unwrap_or_default(),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Run git attached to the terminal so the user sees its own output.
    pub fn run_inherited(&self, args: &[&str]) -> Result<()> {
        let status = self.spawn_inherited(args)?;
        if !status.success() {
            return Err(Error::Execution(format!(
                "git {} exited with {}",
                args.first().copied().unwrap_or_default(),
                status
            )));
        }
        Ok(())
    }

    fn spawn_inherited(&self, args: &[&str]) -> Result<ExitStatus> {
        debug!(?args, dir = ?self.dir, "running git (inherited stdio)");
        self.command()
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::Execution(format!("Failed to execute git: {}", e)))
    }

    pub fn add_all(&self) -> Result<()> {
        self.run(&["add", "-A"]).map(|_| ())
    }

    pub fn commit(&self, message: &str) -> Result<()> {
        self.run_inherited(&["commit", "-m", message])
    }

    pub fn checkout_new_branch(&self, name: &str) -> Result<()> {
        self.run_inherited(&["checkout", "-b", name])
    }

    /// False in a repository with no commits yet.
    pub fn has_head(&self) -> bool {
        self.run(&["rev-parse", "--verify", "--quiet", "HEAD"]).is_ok()
    }

    /// Object id of the empty tree, in the repository's hash format.
    fn empty_tree(&self) -> Result<String> {
        Ok(self.run(&["hash-object", "-t", "tree", "--stdin"])?.trim().to_string())
    }

    /// Hand arbitrary arguments to git and report its exit code.
    pub fn passthrough(&self, args: &[String]) -> Result<i32> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let status = self.spawn_inherited(&args)?;
        Ok(status.code().unwrap_or(1))
    }
}

impl GitSource for GitCli {
    fn status(&self) -> Result<String> {
        self.run(&["status", "--porcelain"])
    }

    fn diff(&self) -> Result<String> {
        if self.has_head() {
            return self.run(&["diff", "HEAD"]);
        }
        // Unborn branch: everything in the index is new.
        let base = self.empty_tree()?;
        debug!(%base, "no HEAD yet, diffing against the empty tree");
        self.run(&["diff", &base])
    }
}
