//! Conversation transcript side tasks.
//!
//! The host keeps per-session transcripts as line-delimited JSON under
//! `~/.claude/projects/`. Two hooks operate on the most recently modified
//! one: post-tool-use can convert it into a single pretty JSON array, and
//! pre-compact can copy it into a timestamped backup before the context
//! is compacted.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// Backup directory relative to the hook working directory.
pub const BACKUP_DIR: &str = ".claude/backups";

/// Result of one transcript side task, shaped for direct inclusion in a
/// log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideTaskOutcome {
    pub success: bool,
    pub message: String,
}

impl SideTaskOutcome {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn skipped(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// The host's transcript root (`~/.claude/projects`).
pub fn default_projects_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".claude").join("projects"))
}

/// Most recently modified `*.jsonl` file anywhere under `dir`.
pub fn find_latest_transcript(dir: &Path) -> Option<PathBuf> {
    let mut latest: Option<(SystemTime, PathBuf)> = None;
    collect_latest_jsonl(dir, &mut latest);
    latest.map(|(_, path)| path)
}

fn collect_latest_jsonl(dir: &Path, latest: &mut Option<(SystemTime, PathBuf)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_latest_jsonl(&path, latest);
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("jsonl") {
            continue;
        }
        let Ok(modified) = entry.metadata().and_then(|m| m.modified()) else {
            continue;
        };
        if latest.as_ref().is_none_or(|(ts, _)| modified > *ts) {
            *latest = Some((modified, path));
        }
    }
}

/// Convert the newest transcript under `projects_dir` into a single
/// pretty-printed JSON array at `out_file`.
///
/// Unparsable lines are skipped rather than failing the conversion.
pub fn convert_latest(projects_dir: &Path, out_file: &Path) -> SideTaskOutcome {
    if !projects_dir.exists() {
        return SideTaskOutcome::skipped("No projects directory found");
    }
    let Some(latest) = find_latest_transcript(projects_dir) else {
        return SideTaskOutcome::skipped("No JSONL files found");
    };

    let content = match fs::read_to_string(&latest) {
        Ok(c) => c,
        Err(e) => return SideTaskOutcome::skipped(format!("Chat conversion error: {e}")),
    };

    let entries: Vec<Value> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect();

    if let Some(parent) = out_file.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            return SideTaskOutcome::skipped(format!("Chat conversion error: {e}"));
        }
    }

    let pretty = match serde_json::to_string_pretty(&entries) {
        Ok(p) => p,
        Err(e) => return SideTaskOutcome::skipped(format!("Chat conversion error: {e}")),
    };
    if let Err(e) = fs::write(out_file, pretty) {
        return SideTaskOutcome::skipped(format!("Chat conversion error: {e}"));
    }

    debug!("converted {:?} ({} entries) to {:?}", latest, entries.len(), out_file);
    SideTaskOutcome::ok(format!(
        "Converted {} entries to {}",
        entries.len(),
        out_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| out_file.display().to_string())
    ))
}

/// Copy the newest transcript under `projects_dir` into `backup_dir` with
/// a timestamped name.
pub fn backup_latest(projects_dir: &Path, backup_dir: &Path) -> SideTaskOutcome {
    if !projects_dir.exists() {
        return SideTaskOutcome::skipped("No projects directory found");
    }
    let Some(latest) = find_latest_transcript(projects_dir) else {
        return SideTaskOutcome::skipped("No JSONL files found");
    };

    if let Err(e) = fs::create_dir_all(backup_dir) {
        return SideTaskOutcome::skipped(format!("Backup error: {e}"));
    }

    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let backup_name = format!("transcript_backup_{stamp}.jsonl");
    let backup_path = backup_dir.join(&backup_name);

    match fs::copy(&latest, &backup_path) {
        Ok(_) => SideTaskOutcome::ok(format!("Backed up to {backup_name}")),
        Err(e) => SideTaskOutcome::skipped(format!("Backup error: {e}")),
    }
}
