//! Development context gathered for injection into the session.
//!
//! Git lookups are best-effort subprocess calls under a short timeout; a
//! missing git binary or a non-repository directory just means fewer
//! context lines.

use cch_common::EnvContext;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

const GIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Snapshot of the git state, recorded in the session-start log entry.
#[derive(Debug, Default, Clone, Serialize)]
pub struct GitContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// "clean" or "modified".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_files: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recent_commits: Vec<String>,
}

/// Run one git command, returning trimmed stdout on success.
pub async fn run_git(args: &[&str]) -> Option<String> {
    let result = timeout(GIT_TIMEOUT, Command::new("git").args(args).output()).await;
    match result {
        Ok(Ok(output)) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
        }
        Ok(Ok(output)) => {
            debug!("git {:?} exited with {}", args, output.status);
            None
        }
        Ok(Err(e)) => {
            debug!("git {:?} failed to spawn: {}", args, e);
            None
        }
        Err(_) => {
            debug!("git {:?} timed out", args);
            None
        }
    }
}

/// Collect branch, working-tree status, and recent commits.
pub async fn collect_git_context() -> GitContext {
    let mut context = GitContext::default();

    if let Some(branch) = run_git(&["branch", "--show-current"]).await {
        context.branch = Some(branch);
    }

    if let Some(porcelain) = run_git(&["status", "--porcelain"]).await {
        let modified = if porcelain.is_empty() {
            0
        } else {
            porcelain.lines().count()
        };
        context.modified_files = Some(modified);
        context.status = Some(if modified == 0 { "clean" } else { "modified" }.to_string());
    }

    if let Some(log) = run_git(&["log", "--oneline", "-5"]).await {
        context.recent_commits = log.lines().take(3).map(String::from).collect();
    }

    context
}

/// Context block printed by `session-start --context`.
pub fn development_context_lines(
    git: &GitContext,
    engineer: Option<&str>,
    cwd: &Path,
) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("=== Development Session Context ===".to_string());
    lines.push(format!(
        "Session Started: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));

    if let Some(branch) = &git.branch {
        lines.push(format!("Git Branch: {branch}"));
    }
    if let Some(status) = &git.status {
        lines.push(format!("Git Status: {status}"));
        if status == "modified" {
            if let Some(count) = git.modified_files {
                lines.push(format!("Modified Files: {count}"));
            }
        }
    }
    if !git.recent_commits.is_empty() {
        lines.push("Recent Commits:".to_string());
        for commit in &git.recent_commits {
            lines.push(format!("  - {commit}"));
        }
    }
    if let Some(name) = engineer {
        lines.push(format!("Engineer: {name}"));
    }
    lines.push(format!("Working Directory: {}", cwd.display()));
    lines.push("=== End Context ===\n".to_string());
    lines
}

/// Shorter context block printed by `user-prompt-submit --context`.
pub async fn session_context_lines(env: &EnvContext) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "Session Time: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));

    if let Some(porcelain) = run_git(&["status", "--porcelain"]).await {
        if porcelain.is_empty() {
            lines.push("Git Status: Clean working directory".to_string());
        } else {
            lines.push("Git Status: Modified files detected".to_string());
        }
    }
    if let Some(branch) = run_git(&["branch", "--show-current"]).await {
        lines.push(format!("Git Branch: {branch}"));
    }

    if let Some(name) = env.get("ENGINEER_NAME").filter(|n| !n.is_empty()) {
        lines.push(format!("Engineer: {name}"));
    }
    lines
}
