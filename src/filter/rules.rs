//! Built-in exclusion lists
//!
//! These are fixed constants. Changing what is excluded by default is a
//! source change, not a runtime option.

/// Directory names whose whole subtree is skipped.
pub const EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "build",
    "dist",
    "out",
    ".cache",
    ".tmp",
    ".vscode",
    ".idea",
    ".next",
    "public",
    ".terraform",
];

/// File name endings that mark generated, lock, backup or office files.
pub const EXCLUDED_SUFFIXES: &[&str] = &[
    ".json",
    ".log",
    ".bak",
    "~",
    ".DS_Store",
    "package-lock.json",
    "yarn.lock",
    ".d.ts",
    "config.mjs",
    ".lock.hcl",
    ".ico",
    ".tfstate",
    ".backup",
    ".pptx",
    ".ppt",
    ".doc",
    ".docx",
    ".xls",
    ".xlsx",
    ".mod",
    ".sum",
];

/// Reserved prefix (and extension) of environment files.
pub const ENV_FILE_PREFIX: &str = ".env";

pub const IGNORE_FILE_NAME: &str = ".gitignore";

/// Check a bare name against the excluded directory list.
pub fn is_excluded_dir_name(name: &str) -> bool {
    EXCLUDED_DIRS.contains(&name)
}

/// Find the excluded directory `name` is, or that `rel_path` lives under.
pub fn excluded_dir(name: &str, rel_path: &str) -> Option<&'static str> {
    EXCLUDED_DIRS.iter().copied().find(|dir| {
        name == *dir
            || rel_path
                .strip_prefix(dir)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

pub fn excluded_suffix(name: &str) -> Option<&'static str> {
    EXCLUDED_SUFFIXES
        .iter()
        .copied()
        .find(|suffix| name.ends_with(suffix))
}

/// `.env`, `.env.local`, `production.env` and friends.
pub fn is_env_file(name: &str) -> bool {
    name.starts_with(ENV_FILE_PREFIX) || name.ends_with(ENV_FILE_PREFIX)
}
