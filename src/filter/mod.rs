//! Exclusion decisions for walked entries
//!
//! Rules are checked cheapest first and the first hit wins. Nothing can
//! re-include an entry once a rule has excluded it:
//!
//! 1. built-in directory names (prunes the whole subtree)
//! 2. built-in file name suffixes
//! 3. environment files
//! 4. the ignore file itself
//! 5. user-supplied globs
//! 6. `.gitignore` / `info/exclude` rules

pub mod patterns;
pub mod rules;

use std::fmt;

use crate::git::GitignoreMatcher;

pub use patterns::CustomPatterns;

/// Which rule excluded an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionReason {
    Directory(&'static str),
    Suffix(&'static str),
    EnvFile,
    IgnoreFile,
    Pattern(String),
    Gitignore,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::Directory(dir) => write!(f, "excluded directory '{}'", dir),
            ExclusionReason::Suffix(suffix) => write!(f, "excluded suffix '{}'", suffix),
            ExclusionReason::EnvFile => write!(f, "environment file"),
            ExclusionReason::IgnoreFile => write!(f, "ignore file"),
            ExclusionReason::Pattern(p) => write!(f, "exclude pattern '{}'", p),
            ExclusionReason::Gitignore => write!(f, "gitignore rule"),
        }
    }
}

/// Immutable rule set shared by every walker and worker thread.
#[derive(Debug)]
pub struct ExclusionRules {
    patterns: CustomPatterns,
    gitignore: GitignoreMatcher,
}

impl ExclusionRules {
    pub fn new(patterns: CustomPatterns, gitignore: GitignoreMatcher) -> Self {
        Self {
            patterns,
            gitignore,
        }
    }

    /// Decide whether an entry is excluded and why.
    ///
    /// `rel_path` is relative to the scan root and uses `/` separators.
    pub fn evaluate(&self, name: &str, rel_path: &str, is_dir: bool) -> Option<ExclusionReason> {
        if let Some(dir) = rules::excluded_dir(name, rel_path) {
            return Some(ExclusionReason::Directory(dir));
        }
        if let Some(suffix) = rules::excluded_suffix(name) {
            return Some(ExclusionReason::Suffix(suffix));
        }
        if rules::is_env_file(name) {
            return Some(ExclusionReason::EnvFile);
        }
        if name == rules::IGNORE_FILE_NAME {
            return Some(ExclusionReason::IgnoreFile);
        }
        if let Some(pattern) = self.patterns.find_match(name, rel_path) {
            return Some(ExclusionReason::Pattern(pattern.to_string()));
        }
        if self.gitignore.is_ignored(rel_path, is_dir) {
            return Some(ExclusionReason::Gitignore);
        }
        None
    }

    pub fn should_exclude(&self, name: &str, rel_path: &str, is_dir: bool) -> bool {
        self.evaluate(name, rel_path, is_dir).is_some()
    }
}
