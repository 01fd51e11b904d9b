// src/changes.rs
use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::error::Result;
use crate::git::GitSource;

// =============================================================================
// CHANGE SET
// =============================================================================

/// Working-tree changes relative to HEAD, as reported by git.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeSet {
    pub modified: BTreeSet<String>,
    pub added: BTreeSet<String>,
    pub deleted: BTreeSet<String>,
    pub untracked: BTreeSet<String>,
    /// Added/removed lines per file, in diff order. Headers (`+++`/`---`) excluded.
    pub hunk_lines: BTreeMap<String, Vec<String>>,
}

impl ChangeSet {
    /// Build a change set from raw `git status --porcelain` and `git diff HEAD` text.
    pub fn parse(status: &str, diff: &str) -> Self {
        let mut changes = Self::default();
        changes.apply_status(status);
        changes.hunk_lines = parse_diff(diff);
        changes
    }

    /// True when there is nothing to describe.
    pub fn is_empty(&self) -> bool {
        self.modified.is_empty()
            && self.added.is_empty()
            && self.deleted.is_empty()
            && self.untracked.is_empty()
    }

    fn apply_status(&mut self, status: &str) {
        for line in status.lines() {
            // XY + space + at least one path byte
            let (Some(code), Some(path)) = (line.get(..2), line.get(3..)) else {
                continue;
            };
            if path.is_empty() {
                continue;
            }
            let code = code.trim();

            if code == "??" {
                self.untracked.insert(path.to_string());
                continue;
            }
            if code.contains('M') {
                self.modified.insert(path.to_string());
            }
            if code.contains('A') {
                self.added.insert(path.to_string());
            }
            if code.contains('D') {
                self.deleted.insert(path.to_string());
            }
        }
    }
}

/// Group the `+`/`-` lines of a unified diff by the file they belong to.
pub fn parse_diff(diff: &str) -> BTreeMap<String, Vec<String>> {
    let mut files: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut current: Option<String> = None;

    for line in diff.lines() {
        if line.starts_with("diff --git") {
            if let Some((_, path)) = line.split_once(" b/") {
                files.insert(path.to_string(), Vec::new());
                current = Some(path.to_string());
            }
            continue;
        }

        let is_change = line.starts_with('+') || line.starts_with('-');
        let is_header = line.starts_with("+++") || line.starts_with("---");
        if !is_change || is_header {
            continue;
        }

        if let Some(lines) = current.as_ref().and_then(|file| files.get_mut(file)) {
            lines.push(line.to_string());
        }
    }

    files
}

/// Query git and parse the result.
pub fn collect(source: &impl GitSource) -> Result<ChangeSet> {
    let diff = source.diff()?;
    let status = source.status()?;
    let changes = ChangeSet::parse(&status, &diff);
    debug!(
        modified = changes.modified.len(),
        added = changes.added.len(),
        deleted = changes.deleted.len(),
        untracked = changes.untracked.len(),
        files_with_hunks = changes.hunk_lines.len(),
        "collected changes"
    );
    Ok(changes)
}

// =============================================================================
// MODULE TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::Cell;

    struct FakeGit {
        status: &'static str,
        diff: &'static str,
        fail_diff: bool,
        status_calls: Cell<usize>,
    }

    impl FakeGit {
        fn new(status: &'static str, diff: &'static str) -> Self {
            Self { status, diff, fail_diff: false, status_calls: Cell::new(0) }
        }
    }

    impl GitSource for FakeGit {
        fn status(&self) -> Result<String> {
            self.status_calls.set(self.status_calls.get() + 1);
            Ok(self.status.to_string())
        }

        fn diff(&self) -> Result<String> {
            if self.fail_diff {
                return Err(Error::Execution("git diff failed: not a git repository".into()));
            }
            Ok(self.diff.to_string())
        }
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn status_classifies_each_code() {
        let changes = ChangeSet::parse(" M src/lib.rs\nA  new.rs\n D old.rs\n?? scratch.txt\n", "");
        assert_eq!(changes.modified, set(&["src/lib.rs"]));
        assert_eq!(changes.added, set(&["new.rs"]));
        assert_eq!(changes.deleted, set(&["old.rs"]));
        assert_eq!(changes.untracked, set(&["scratch.txt"]));
    }

    #[test]
    fn composite_code_lands_in_every_matching_category() {
        let changes = ChangeSet::parse("AM both.rs\nMD gone.rs\n", "");
        assert!(changes.added.contains("both.rs"));
        assert!(changes.modified.contains("both.rs"));
        assert!(changes.modified.contains("gone.rs"));
        assert!(changes.deleted.contains("gone.rs"));
        assert!(changes.untracked.is_empty());
    }

    #[test]
    fn untracked_is_exclusive() {
        let changes = ChangeSet::parse("?? notes.txt", "");
        assert_eq!(changes.untracked, set(&["notes.txt"]));
        assert!(changes.modified.is_empty());
        assert!(changes.added.is_empty());
        assert!(changes.deleted.is_empty());
    }

    #[test]
    fn leading_space_of_first_status_line_is_significant() {
        let changes = ChangeSet::parse(" M src/a.go", "");
        assert_eq!(changes.modified, set(&["src/a.go"]));
    }

    #[test]
    fn short_and_blank_status_lines_are_skipped() {
        let changes = ChangeSet::parse("\n\nM\n M \n", "");
        assert!(changes.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_change_set() {
        let changes = ChangeSet::parse("", "");
        assert!(changes.is_empty());
        assert!(changes.hunk_lines.is_empty());
        assert_eq!(changes, ChangeSet::default());
    }

    #[test]
    fn diff_excludes_file_headers() {
        let diff = "diff --git a/foo.txt b/foo.txt\n+hello\n-world\n+++ b/foo.txt\n";
        let hunks = parse_diff(diff);
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks["foo.txt"], vec!["+hello", "-world"]);
    }

    #[test]
    fn diff_tracks_multiple_files() {
        let diff = "\
diff --git a/src/a.rs b/src/a.rs
index 1111111..2222222 100644
--- a/src/a.rs
+++ b/src/a.rs
@@ -1,2 +1,2 @@
 fn a() {}
-fn b() {}
+fn c() {}
diff --git a/README.md b/README.md
index 3333333..4444444 100644
--- a/README.md
+++ b/README.md
@@ -1 +1,2 @@
 # Title
+More text
";
        let hunks = parse_diff(diff);
        assert_eq!(hunks["src/a.rs"], vec!["-fn b() {}", "+fn c() {}"]);
        assert_eq!(hunks["README.md"], vec!["+More text"]);
    }

    #[test]
    fn diff_lines_before_first_header_are_ignored() {
        let hunks = parse_diff("+stray\n-line\ndiff --git a/x b/x\n+kept\n");
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks["x"], vec!["+kept"]);
    }

    #[test]
    fn mode_only_change_maps_to_empty_lines() {
        let diff = "diff --git a/run.sh b/run.sh\nold mode 100644\nnew mode 100755\n";
        let changes = ChangeSet::parse(" M run.sh", diff);
        assert!(changes.modified.contains("run.sh"));
        assert_eq!(changes.hunk_lines["run.sh"], Vec::<String>::new());
    }

    #[test]
    fn collect_matches_end_to_end_scenario() {
        let git = FakeGit::new(
            " M src/a.go\n?? notes.txt",
            "diff --git a/src/a.go b/src/a.go\nindex 1..2 100644\n--- a/src/a.go\n+++ b/src/a.go\n@@ -1 +1,2 @@\n package a\n+new line\n",
        );
        let changes = collect(&git).unwrap();
        assert_eq!(changes.modified, set(&["src/a.go"]));
        assert_eq!(changes.untracked, set(&["notes.txt"]));
        assert_eq!(changes.hunk_lines["src/a.go"], vec!["+new line"]);
        assert_eq!(git.status_calls.get(), 1);
    }

    #[test]
    fn collect_propagates_git_failure() {
        let mut git = FakeGit::new("", "");
        git.fail_diff = true;
        let err = collect(&git).unwrap_err();
        assert!(matches!(err, Error::Execution(_)));
        assert_eq!(git.status_calls.get(), 0);
    }
}
