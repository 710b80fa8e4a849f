//! `.env` file discovery and parsing.
//!
//! The file is found by checking the working directory and then each
//! ancestor; the first `.env` encountered wins. Parsed pairs never
//! shadow the process environment: a key that is already set stays set.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Immutable view over the process environment plus a discovered `.env`
/// file.
///
/// Built once at process start and passed down to every component that
/// needs configuration. Lookups always consult the process environment
/// first, so file values only fill gaps.
#[derive(Debug, Clone, Default)]
pub struct EnvContext {
    file_vars: HashMap<String, String>,
    source: Option<PathBuf>,
}

impl EnvContext {
    /// Build a context with no `.env` backing (process env only).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Discover a `.env` file starting from the current directory.
    pub fn discover() -> Self {
        match env::current_dir() {
            Ok(cwd) => Self::from_dir(&cwd),
            Err(_) => Self::empty(),
        }
    }

    /// Discover a `.env` file starting from `dir`, walking upward.
    ///
    /// A missing file is not an error; the context is simply empty.
    pub fn from_dir(dir: &Path) -> Self {
        let Some(env_file) = find_env_file(dir) else {
            return Self::empty();
        };
        let Ok(content) = fs::read_to_string(&env_file) else {
            return Self::empty();
        };

        let mut file_vars = HashMap::new();
        for line in content.lines() {
            if let Some((key, value)) = parse_env_line(line) {
                file_vars.entry(key).or_insert(value);
            }
        }
        debug!("loaded {} variables from {:?}", file_vars.len(), env_file);

        Self {
            file_vars,
            source: Some(env_file),
        }
    }

    /// Look up a key: process environment first, then the `.env` file.
    pub fn get(&self, key: &str) -> Option<String> {
        match env::var(key) {
            Ok(v) => Some(v),
            Err(_) => self.file_vars.get(key).cloned(),
        }
    }

    /// Look up a key with a default.
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// True when the key resolves to a non-empty value.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_empty())
    }

    /// Path of the `.env` file that was loaded, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Walk from `start` to the filesystem root looking for `.env`.
fn find_env_file(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        let candidate = dir.join(".env");
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Parse one `KEY=VALUE` line.
///
/// Blank lines, comments, lines without `=`, and pairs with an empty key
/// or value are all skipped. One layer of matching single or double
/// quotes is stripped from the value.
fn parse_env_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let mut value = value.trim();

    if value.len() >= 2 {
        let stripped = if value.starts_with('"') && value.ends_with('"') {
            Some(&value[1..value.len() - 1])
        } else if value.starts_with('\'') && value.ends_with('\'') {
            Some(&value[1..value.len() - 1])
        } else {
            None
        };
        if let Some(s) = stripped {
            value = s;
        }
    }

    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key.to_string(), value.to_string()))
}
