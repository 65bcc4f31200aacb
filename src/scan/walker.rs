//! Depth-first traversal that prunes excluded entries and dispatches files

use std::fs;
use std::io;
use std::path::Path;

use rayon::Scope;
use tracing::debug;

use crate::error::{Error, Result};
use crate::filter::ExclusionRules;

use super::processor::FileProcessor;

/// Counters kept by the walking thread.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct WalkCounts {
    pub dispatched: usize,
    pub excluded: usize,
}

pub(crate) struct Walker<'a> {
    root: &'a Path,
    rules: &'a ExclusionRules,
}

impl<'a> Walker<'a> {
    pub fn new(root: &'a Path, rules: &'a ExclusionRules) -> Self {
        Self { root, rules }
    }

    /// Walk the whole tree, spawning one task per eligible file on `scope`.
    ///
    /// Returns once every file has been dispatched; the caller's scope is
    /// what waits for the tasks. Any directory read error aborts the walk.
    pub fn walk<'scope>(
        &self,
        scope: &Scope<'scope>,
        processor: &'scope FileProcessor<'_>,
        counts: &mut WalkCounts,
    ) -> Result<()> {
        self.walk_dir(scope, processor, self.root, "", counts)
    }

    fn walk_dir<'scope>(
        &self,
        scope: &Scope<'scope>,
        processor: &'scope FileProcessor<'_>,
        dir: &Path,
        rel_dir: &str,
        counts: &mut WalkCounts,
    ) -> Result<()> {
        let mut entries = fs::read_dir(dir)
            .and_then(|entries| entries.collect::<io::Result<Vec<_>>>())
            .map_err(|err| Error::walk(dir, err))?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            let rel_path = if rel_dir.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", rel_dir, name)
            };

            // Not followed: a symlink to a directory is dispatched like a
            // file and rejected by the processor.
            let is_dir = entry
                .file_type()
                .map_err(|err| Error::walk(&path, err))?
                .is_dir();

            if let Some(reason) = self.rules.evaluate(&name, &rel_path, is_dir) {
                debug!("excluding {}: {}", rel_path, reason);
                counts.excluded += 1;
                continue;
            }

            if is_dir {
                self.walk_dir(scope, processor, &path, &rel_path, counts)?;
            } else {
                counts.dispatched += 1;
                scope.spawn(move |_| processor.process(&path, &rel_path));
            }
        }

        Ok(())
    }
}
