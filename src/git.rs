//! Git ignore-rule loading
//!
//! Collects every `.gitignore` under the scan root plus the repository's
//! `info/exclude` into a read-only matcher. Each file keeps its own base
//! directory, so anchored patterns in nested files resolve the way git
//! resolves them, and deeper files override shallower ones (including `!`
//! re-includes within the ignore rules themselves).

use std::fs;
use std::path::{Path, PathBuf};

use git2::Repository;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::{Match, WalkBuilder};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::filter::rules::{IGNORE_FILE_NAME, is_excluded_dir_name};

/// Directory-aware matcher over all ignore files of a tree.
#[derive(Debug)]
pub struct GitignoreMatcher {
    root: PathBuf,
    /// Shallowest base directory first; later layers win.
    layers: Vec<Gitignore>,
}

impl GitignoreMatcher {
    /// A matcher that ignores nothing.
    pub fn empty(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            layers: Vec::new(),
        }
    }

    /// Load ignore rules for the tree rooted at `root`.
    ///
    /// Fails if `root` has a `.git` entry that git cannot open, or if an
    /// ignore file exists but cannot be read. Individual malformed patterns
    /// are logged and skipped.
    pub fn load(root: &Path) -> Result<Self> {
        let mut layers = Vec::new();

        if let Some(exclude) = Self::repo_exclude_file(root)? {
            layers.push(Self::parse_file(root, &exclude)?);
        }

        for path in Self::find_ignore_files(root) {
            let base = path.parent().unwrap_or(root);
            layers.push(Self::parse_file(base, &path)?);
        }

        // Stable: info/exclude stays ahead of the root .gitignore.
        layers.sort_by_key(|layer| layer.path().components().count());
        layers.retain(|layer| !layer.is_empty());

        debug!(
            root = %root.display(),
            layers = layers.len(),
            "loaded ignore rules"
        );

        Ok(Self {
            root: root.to_path_buf(),
            layers,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Check a `/`-separated path relative to the root.
    pub fn is_ignored(&self, rel_path: &str, is_dir: bool) -> bool {
        if self.layers.is_empty() {
            return false;
        }

        let path = self.root.join(rel_path);
        let mut ignored = false;
        for layer in &self.layers {
            if !path.starts_with(layer.path()) {
                continue;
            }
            match layer.matched_path_or_any_parents(&path, is_dir) {
                Match::Ignore(_) => ignored = true,
                Match::Whitelist(_) => ignored = false,
                Match::None => {}
            }
        }
        ignored
    }

    /// Locate `info/exclude` when `root` is itself a git working tree.
    fn repo_exclude_file(root: &Path) -> Result<Option<PathBuf>> {
        if !root.join(".git").exists() {
            return Ok(None);
        }

        let repo = Repository::open(root).map_err(|source| Error::Repository {
            path: root.to_path_buf(),
            source,
        })?;
        let exclude = repo.path().join("info").join("exclude");
        Ok(exclude.is_file().then_some(exclude))
    }

    /// Find every ignore file that the main walk could reach.
    ///
    /// Built-in excluded directories and directories ignored by an
    /// ancestor's rules are pruned, so their ignore files are never read.
    fn find_ignore_files(root: &Path) -> Vec<PathBuf> {
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .git_ignore(true)
            .git_exclude(true)
            .require_git(false)
            .parents(false)
            .follow_links(false)
            .filter_entry(|entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir && is_excluded_dir_name(&entry.file_name().to_string_lossy()))
            })
            .build();

        let mut found = Vec::new();
        for entry in walker {
            match entry {
                Ok(entry) => {
                    let is_file = entry.file_type().is_some_and(|t| t.is_file());
                    if is_file && entry.file_name() == IGNORE_FILE_NAME {
                        found.push(entry.into_path());
                    }
                }
                // The main walk reports unreadable directories itself.
                Err(err) => debug!("ignore file search: {}", err),
            }
        }
        found
    }

    fn parse_file(base: &Path, path: &Path) -> Result<Gitignore> {
        let bytes = fs::read(path).map_err(|err| Error::IgnoreFile {
            path: path.to_path_buf(),
            source: err.into(),
        })?;
        let decoded = String::from_utf8_lossy(&bytes);
        let text = decoded.strip_prefix('\u{feff}').unwrap_or(&decoded);

        let mut builder = GitignoreBuilder::new(base);
        for line in text.lines() {
            if let Err(err) = builder.add_line(Some(path.to_path_buf()), line) {
                warn!("{}: skipping pattern '{}': {}", path.display(), line, err);
            }
        }
        builder.build().map_err(|source| Error::IgnoreFile {
            path: path.to_path_buf(),
            source,
        })
    }
}
