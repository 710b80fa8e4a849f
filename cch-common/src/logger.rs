//! Append-only JSON event logs, one file per hook.
//!
//! Each hook owns one file under the log directory (e.g.
//! `pre_tool_use.json`) holding a single pretty-printed JSON array of
//! records. Reads tolerate absent, empty, and corrupt files by treating
//! them all as an empty history; writes rewrite the whole array through
//! a temp-file rename so a crash mid-write cannot destroy prior records.
//!
//! There is no locking. Invocations are serialized by the host, which is
//! the only writer coordination this system assumes.

use crate::errors::HookError;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

/// Default log directory relative to the hook working directory.
pub const LOG_DIR: &str = ".claude/logs";

/// Handle to the per-hook log directory.
#[derive(Debug, Clone)]
pub struct EventLog {
    dir: PathBuf,
}

impl EventLog {
    /// Use an explicit log directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Standard location under a hook working directory.
    pub fn at_base(base_dir: &Path) -> Self {
        Self::new(base_dir.join(LOG_DIR))
    }

    /// Full path of one hook's log file.
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Load the record array for one hook.
    ///
    /// Absent, empty, and unparsable files all yield an empty history.
    /// Corruption is reported to the operator but never to the host.
    pub fn load(&self, file_name: &str) -> Vec<Value> {
        let path = self.path_for(file_name);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str::<Vec<Value>>(&content) {
            Ok(records) => records,
            Err(e) => {
                warn!("log file {:?} is corrupt ({}), resetting to empty", path, e);
                Vec::new()
            }
        }
    }

    /// Append one record and rewrite the file.
    pub fn append(&self, file_name: &str, entry: Value) -> Result<(), HookError> {
        fs::create_dir_all(&self.dir)?;

        let mut records = self.load(file_name);
        records.push(entry);

        let path = self.path_for(file_name);
        let content = serde_json::to_string_pretty(&records)?;
        atomic_write(&path, content.as_bytes()).map_err(|source| HookError::LogWrite {
            path: path.clone(),
            source,
        })
    }
}

/// Write content to a file atomically using a temporary sibling.
fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| std::io::Error::other("path has no parent directory"))?;
    let temp_path = parent.join(format!(".{}.tmp", Uuid::new_v4()));

    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content)?;
    file.sync_all()?;

    fs::rename(&temp_path, path)
}
