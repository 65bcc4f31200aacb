//! Directory scanning
//!
//! [`Scanner`] wires the pieces together:
//!
//! - the walker runs on one pool thread, pruning excluded directories and
//!   spawning a task per eligible file into a `rayon` scope,
//! - the pool bounds how many files are read at once (`jobs`),
//! - tasks append to a shared [`ResultSet`] and notify the progress thread,
//! - the scope is the barrier: results are only handed back once every task
//!   has finished.
//!
//! Records come back in completion order, which differs between runs.

mod config;
mod processor;
mod results;
mod walker;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::filter::{CustomPatterns, ExclusionRules};
use crate::git::GitignoreMatcher;
use crate::progress::ProgressReporter;

pub use config::ScanConfig;
pub use processor::{FileProcessor, Outcome, SkipReason, process_file};
pub use results::{FileRecord, ResultSet};

use walker::{WalkCounts, Walker};

/// Counters describing what a scan did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    /// Files handed to the processor.
    pub dispatched: usize,
    /// Dispatched files that produced no record.
    pub skipped: usize,
    /// Entries rejected by the exclusion rules; a pruned directory counts once.
    pub excluded: usize,
}

#[derive(Debug)]
pub struct ScanOutcome {
    pub records: Vec<FileRecord>,
    pub stats: ScanStats,
}

/// A validated scan: root checked, patterns compiled, ignore rules loaded.
#[derive(Debug)]
pub struct Scanner {
    config: ScanConfig,
    /// Canonical form of `config.root`.
    root: PathBuf,
    rules: ExclusionRules,
}

impl Scanner {
    /// Validate the configuration and build the exclusion rules.
    ///
    /// Everything that can fail before traversal fails here.
    pub fn new(config: ScanConfig) -> Result<Self> {
        check_root(&config.root)?;
        let root = config
            .root
            .canonicalize()
            .map_err(|err| Error::walk(&config.root, err))?;
        let patterns = CustomPatterns::compile(&config.exclude_patterns)?;
        let gitignore = GitignoreMatcher::load(&root)?;

        debug!(
            root = %root.display(),
            patterns = config.exclude_patterns.len(),
            gitignore = !gitignore.is_empty(),
            "scanner ready"
        );

        Ok(Self {
            rules: ExclusionRules::new(patterns, gitignore),
            root,
            config,
        })
    }

    /// Scan, writing progress to stderr unless disabled in the config.
    pub fn scan(&self) -> Result<ScanOutcome> {
        if self.config.show_progress {
            self.scan_with_status(io::stderr())
        } else {
            self.scan_with_status(io::sink())
        }
    }

    /// Scan, writing progress lines to `status`.
    pub fn scan_with_status<W: Write + Send + 'static>(&self, status: W) -> Result<ScanOutcome> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.jobs)
            .thread_name(|i| format!("srccat-worker-{}", i))
            .build()?;

        let results = ResultSet::new();
        let reporter = ProgressReporter::spawn(status).map_err(Error::Progress)?;
        let processor = FileProcessor::new(self.config.read_content, &results, reporter.sender());
        let walker = Walker::new(&self.root, &self.rules);

        let mut counts = WalkCounts::default();
        let walked = pool.scope(|scope| walker.walk(scope, &processor, &mut counts));

        let skipped = processor.skipped();
        drop(processor);
        let processed = reporter.finish();
        walked?;

        let stats = ScanStats {
            dispatched: counts.dispatched,
            skipped,
            excluded: counts.excluded,
        };
        info!(
            processed,
            dispatched = stats.dispatched,
            skipped = stats.skipped,
            excluded = stats.excluded,
            "scan complete"
        );

        Ok(ScanOutcome {
            records: results.into_records(),
            stats,
        })
    }
}

fn check_root(root: &Path) -> Result<()> {
    match root.metadata() {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(Error::RootNotDirectory(root.to_path_buf())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(Error::RootNotFound(root.to_path_buf()))
        }
        Err(err) => Err(Error::walk(root, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::safety::MAX_FILE_SIZE;
    use crate::test_utils::TestRepo;
    use std::collections::HashSet;

    fn scan(repo: &TestRepo, configure: impl FnOnce(&mut ScanConfig)) -> ScanOutcome {
        let mut config = ScanConfig::new(repo.path());
        config.show_progress = false;
        configure(&mut config);
        Scanner::new(config).unwrap().scan().unwrap()
    }

    fn paths(outcome: &ScanOutcome) -> HashSet<String> {
        outcome.records.iter().map(|r| r.path.clone()).collect()
    }

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_scenario_list_mode() {
        let repo = TestRepo::new();
        repo.add_file("a.txt", "hello");
        repo.add_file("secrets.env", "TOKEN=abc");
        repo.add_bytes("build/out.o", &[0x7f, b'E', b'L', b'F', 0, 0]);
        repo.add_file(".gitignore", "*.log\n");
        repo.add_file("trace.log", "noise");

        let outcome = scan(&repo, |c| c.read_content = false);

        assert_eq!(paths(&outcome), set(&["a.txt"]));
        assert_eq!(outcome.records[0].content, None);
        assert_eq!(outcome.stats.dispatched, 1);
    }

    #[test]
    fn test_excluded_directory_is_never_dispatched() {
        let repo = TestRepo::new();
        repo.add_file("src/main.rs", "fn main() {}");
        for i in 0..20 {
            repo.add_file(&format!("node_modules/pkg{}/index.js", i), "x");
        }
        repo.add_file("dist/bundle.js", "x");

        let outcome = scan(&repo, |_| {});

        assert_eq!(paths(&outcome), set(&["src/main.rs"]));
        assert_eq!(outcome.stats.dispatched, 1);
        assert_eq!(outcome.stats.excluded, 2, "each pruned directory counts once");
    }

    #[test]
    fn test_gitignored_directory_is_pruned() {
        let repo = TestRepo::new();
        repo.add_file(".gitignore", "generated/\n");
        repo.add_file("generated/a.rs", "x");
        repo.add_file("generated/b.rs", "x");
        repo.add_file("lib.rs", "pub fn f() {}");

        let outcome = scan(&repo, |_| {});

        assert_eq!(paths(&outcome), set(&["lib.rs"]));
        assert_eq!(outcome.stats.dispatched, 1);
    }

    #[test]
    fn test_custom_patterns() {
        let repo = TestRepo::new();
        repo.add_file("style.css", "body {}");
        repo.add_file("web/site.css", "p {}");
        repo.add_file("docs/guide.md", "# Guide");
        repo.add_file("main.rs", "fn main() {}");

        let outcome = scan(&repo, |c| {
            c.exclude_patterns = vec!["*.css".to_string(), "docs".to_string()];
        });

        assert_eq!(paths(&outcome), set(&["main.rs"]));
    }

    #[test]
    fn test_invalid_pattern_fails_before_scanning() {
        let repo = TestRepo::new();
        let mut config = ScanConfig::new(repo.path());
        config.exclude_patterns = vec!["[oops".to_string()];

        assert!(matches!(
            Scanner::new(config),
            Err(Error::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_missing_root() {
        let repo = TestRepo::new();
        let config = ScanConfig::new(repo.path().join("nope"));

        assert!(matches!(Scanner::new(config), Err(Error::RootNotFound(_))));
    }

    #[test]
    fn test_root_is_a_file() {
        let repo = TestRepo::new();
        let file = repo.add_file("file.rs", "x");

        assert!(matches!(
            Scanner::new(ScanConfig::new(file)),
            Err(Error::RootNotDirectory(_))
        ));
    }

    #[test]
    fn test_size_and_binary_checks() {
        let repo = TestRepo::new();
        repo.add_sized("exact.txt", MAX_FILE_SIZE as usize);
        repo.add_sized("over.txt", MAX_FILE_SIZE as usize + 1);
        repo.add_bytes("image.png", &[0x89, b'P', b'N', b'G', 0, 0, 0, 13]);

        let outcome = scan(&repo, |_| {});

        assert_eq!(paths(&outcome), set(&["exact.txt", "image.png"]));
        assert_eq!(outcome.stats.dispatched, 3);
        assert_eq!(outcome.stats.skipped, 1);

        let image = outcome
            .records
            .iter()
            .find(|r| r.path == "image.png")
            .unwrap();
        assert_eq!(image.content, None);
    }

    #[test]
    fn test_nested_paths_use_forward_slashes() {
        let repo = TestRepo::new();
        repo.add_file("a/b/c/deep.rs", "fn deep() {}");

        let outcome = scan(&repo, |_| {});

        assert_eq!(paths(&outcome), set(&["a/b/c/deep.rs"]));
        assert_eq!(outcome.records[0].content.as_deref(), Some("fn deep() {}"));
    }

    #[test]
    fn test_repeated_scans_yield_same_set() {
        let repo = TestRepo::new();
        for i in 0..200 {
            repo.add_file(&format!("dir{}/file{}.rs", i % 7, i), &format!("// {}", i));
        }

        let first: HashSet<FileRecord> = scan(&repo, |_| {}).records.into_iter().collect();
        let second: HashSet<FileRecord> = scan(&repo, |c| c.jobs = 1).records.into_iter().collect();

        assert_eq!(first.len(), 200);
        assert_eq!(first, second);
    }

    #[test]
    fn test_progress_counts_every_dispatched_file() {
        let repo = TestRepo::new();
        repo.add_file("a.rs", "a");
        repo.add_sized("big.rs", MAX_FILE_SIZE as usize + 1);

        let mut config = ScanConfig::new(repo.path());
        config.jobs = 2;
        let scanner = Scanner::new(config).unwrap();
        let outcome = scanner.scan_with_status(io::sink()).unwrap();

        assert_eq!(outcome.stats.dispatched, 2);
        assert_eq!(outcome.records.len(), 1);
    }

    #[test]
    fn test_relative_root() {
        let repo = TestRepo::new();
        repo.add_file("proj/.gitignore", "*.tmp\n");
        repo.add_file("proj/sub/.gitignore", "/local.rs\n");
        repo.add_file("proj/sub/local.rs", "x");
        repo.add_file("proj/sub/kept.rs", "x");
        repo.add_file("proj/a.tmp", "x");

        // Relative to the process working directory, with a `./` prefix.
        let cwd = std::env::current_dir().unwrap();
        let relative = pathdiff(&repo.path().join("proj"), &cwd);
        let mut config = ScanConfig::new(Path::new(".").join(relative));
        config.show_progress = false;
        let outcome = Scanner::new(config).unwrap().scan().unwrap();

        assert_eq!(paths(&outcome), set(&["sub/kept.rs"]));
    }

    /// `target` expressed relative to `base` via `..` components.
    fn pathdiff(target: &Path, base: &Path) -> PathBuf {
        let target = target.canonicalize().unwrap();
        let base = base.canonicalize().unwrap();
        let common = target
            .components()
            .zip(base.components())
            .take_while(|(a, b)| a == b)
            .count();
        let mut rel = PathBuf::new();
        for _ in base.components().skip(common) {
            rel.push("..");
        }
        for part in target.components().skip(common) {
            rel.push(part);
        }
        rel
    }

    #[test]
    fn test_empty_directory() {
        let repo = TestRepo::new();

        let outcome = scan(&repo, |_| {});

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.stats, ScanStats::default());
    }

    #[test]
    fn test_git_metadata_is_never_scanned() {
        let repo = TestRepo::with_git();
        repo.add_file("main.rs", "fn main() {}");

        let outcome = scan(&repo, |_| {});

        assert_eq!(paths(&outcome), set(&["main.rs"]));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_aborts_scan() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let repo = TestRepo::new();
        repo.add_file("ok.rs", "x");
        let locked = repo.add_dir("locked");
        repo.add_file("locked/inner.rs", "x");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            eprintln!("skipping: running with privileges that bypass permission bits");
            return;
        }

        let mut config = ScanConfig::new(repo.path());
        config.show_progress = false;
        let result = Scanner::new(config).unwrap().scan();

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        assert!(matches!(result, Err(Error::Walk { .. })));
    }

    #[test]
    fn test_root_vanishing_before_walk_aborts_scan() {
        let repo = TestRepo::new();
        repo.add_file("proj/a.rs", "x");
        let root = repo.path().join("proj");

        let mut config = ScanConfig::new(&root);
        config.show_progress = false;
        let scanner = Scanner::new(config).unwrap();
        std::fs::remove_dir_all(&root).unwrap();

        let result = scanner.scan();
        assert!(
            matches!(result, Err(Error::Walk { .. })),
            "expected walk error, got {:?}",
            result
        );
    }
}
