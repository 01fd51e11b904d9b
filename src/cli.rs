// src/cli.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Overrides;
use crate::prompts::PromptStyle;

#[derive(Parser)]
#[command(
    name = "ai-git",
    version,
    arg_required_else_help = true,
    about = "git with AI-written commit messages and branch names\n\nAny command other than the ones below is passed straight to git.",
    after_help = "EXAMPLES:
    ai-git commit                   # Generate a message, edit it, commit
    ai-git commit -a --no-edit      # Stage everything and commit without the editor
    ai-git checkout                 # Generate a branch name and check it out
    ai-git --provider ollama commit # Use a local model for this run
    ai-git config                   # Show the resolved settings
    ai-git commit -m 'wip'          # Plain git: any extra argument skips the AI
    ai-git branch -d old            # Plain git

PROVIDERS:
    openai | ollama | anthropic | deepseek | qwen"
)]
pub struct Cli {
    /// Repository directory (default: current directory)
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// Config file (default: ./config.yaml, then ~/.ai-git/config.{toml,yaml})
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Provider to use; falls back to the config file, then $AI_GIT_PROVIDER
    #[arg(long, global = true)]
    pub provider: Option<String>,
    #[arg(long, global = true)]
    pub api_key: Option<String>,
    #[arg(long, global = true)]
    pub model: Option<String>,
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Commit instruction wording: concise (emojis allowed) or summary
    #[arg(long, global = true)]
    pub style: Option<PromptStyle>,

    /// Log debug output to stderr (before the command: `ai-git -v commit`)
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            provider: self.provider.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            prompt_style: self.style,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Commit with an AI-generated message
    ///
    /// The message is opened in your editor first. Clear the file to cancel.
    /// Any other git commit argument (`-m`, `--amend`, paths, ...) runs plain git instead.
    Commit {
        /// Stage all changes before committing (`git add -A`)
        #[arg(short = 'a', long)]
        all: bool,

        /// Commit the generated message without opening the editor
        #[arg(long)]
        no_edit: bool,

        #[arg(short = 'm', long, hide = true)]
        message: Option<String>,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
        rest: Vec<String>,
    },

    /// Create and check out a branch with an AI-generated name
    ///
    /// Only without arguments. `checkout main`, `checkout -b name` and so on run plain git.
    Checkout {
        /// Use the generated name without opening the editor
        #[arg(long)]
        no_edit: bool,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
        rest: Vec<String>,
    },

    /// Show the resolved configuration (API key masked)
    Config,

    #[command(external_subcommand)]
    Git(Vec<String>),
}

impl Commands {
    /// The git command line to run instead, when this is not an AI invocation.
    pub fn git_args(&self) -> Option<Vec<String>> {
        match self {
            Commands::Git(args) => Some(args.clone()),
            Commands::Commit { all, no_edit, message, rest } => {
                if message.is_none() && rest.is_empty() {
                    return None;
                }
                let mut args = vec!["commit".to_string()];
                if *all {
                    args.push("-a".into());
                }
                if *no_edit {
                    args.push("--no-edit".into());
                }
                if let Some(message) = message {
                    args.push("-m".into());
                    args.push(message.clone());
                }
                args.extend(rest.iter().cloned());
                Some(args)
            }
            Commands::Checkout { no_edit, rest } => {
                if rest.is_empty() {
                    return None;
                }
                let mut args = vec!["checkout".to_string()];
                if *no_edit {
                    args.push("--no-edit".into());
                }
                args.extend(rest.iter().cloned());
                Some(args)
            }
            Commands::Config => None,
        }
    }
}

// =============================================================================
// MODULE TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    fn git_args(argv: &[&str]) -> Option<Vec<String>> {
        let mut full = vec!["ai-git"];
        full.extend_from_slice(argv);
        Cli::parse_from(full).command.git_args()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_commit_flags() {
        let cli = Cli::parse_from(["ai-git", "--provider", "qwen", "commit", "-a", "--no-edit"]);
        assert_eq!(cli.provider.as_deref(), Some("qwen"));
        assert!(matches!(cli.command, Commands::Commit { all: true, no_edit: true, message: None, .. }));
        assert_eq!(cli.command.git_args(), None);
    }

    #[test]
    fn commit_with_message_runs_plain_git() {
        assert_eq!(git_args(&["commit", "-m", "wip"]), Some(strings(&["commit", "-m", "wip"])));
        assert_eq!(
            git_args(&["commit", "-a", "-m", "wip"]),
            Some(strings(&["commit", "-a", "-m", "wip"]))
        );
    }

    #[test]
    fn commit_with_unknown_flags_runs_plain_git() {
        assert_eq!(git_args(&["commit", "--amend"]), Some(strings(&["commit", "--amend"])));
        assert_eq!(
            git_args(&["commit", "--amend", "--no-verify"]),
            Some(strings(&["commit", "--amend", "--no-verify"]))
        );
        assert_eq!(git_args(&["commit", "src/lib.rs"]), Some(strings(&["commit", "src/lib.rs"])));
    }

    #[test]
    fn commit_verbose_belongs_to_git() {
        let cli = Cli::parse_from(["ai-git", "commit", "-v"]);
        assert!(!cli.verbose);
        assert_eq!(cli.command.git_args(), Some(strings(&["commit", "-v"])));

        let cli = Cli::parse_from(["ai-git", "-v", "commit"]);
        assert!(cli.verbose);
        assert_eq!(cli.command.git_args(), None);
    }

    #[test]
    fn bare_checkout_is_the_ai_branch_flow() {
        assert_eq!(git_args(&["checkout"]), None);
        let cli = Cli::parse_from(["ai-git", "checkout", "--no-edit"]);
        assert!(matches!(cli.command, Commands::Checkout { no_edit: true, .. }));
        assert_eq!(cli.command.git_args(), None);
    }

    #[test]
    fn checkout_with_arguments_runs_plain_git() {
        assert_eq!(git_args(&["checkout", "main"]), Some(strings(&["checkout", "main"])));
        assert_eq!(git_args(&["checkout", "-b", "feat"]), Some(strings(&["checkout", "-b", "feat"])));
    }

    #[test]
    fn branch_is_always_git() {
        assert_eq!(git_args(&["branch"]), Some(strings(&["branch"])));
        assert_eq!(git_args(&["branch", "-d", "old"]), Some(strings(&["branch", "-d", "old"])));
    }

    #[test]
    fn config_is_handled_locally() {
        assert_eq!(git_args(&["config"]), None);
    }

    #[test]
    fn unknown_subcommands_pass_through() {
        let cli = Cli::parse_from(["ai-git", "log", "--oneline", "-n", "3"]);
        match cli.command {
            Commands::Git(args) => assert_eq!(args, vec!["log", "--oneline", "-n", "3"]),
            _ => panic!("expected passthrough"),
        }
    }

    #[test]
    fn style_and_dir_feed_overrides() {
        let cli = Cli::parse_from(["ai-git", "--style", "summary", "--dir", "/repo", "--model", "m", "commit"]);
        let overrides = cli.overrides();
        assert_eq!(overrides.prompt_style, Some(PromptStyle::Summary));
        assert_eq!(overrides.model.as_deref(), Some("m"));
        assert_eq!(cli.dir, Some(PathBuf::from("/repo")));
    }

    #[test]
    fn rejects_unknown_style() {
        assert!(Cli::try_parse_from(["ai-git", "--style", "loud", "commit"]).is_err());
    }
}
