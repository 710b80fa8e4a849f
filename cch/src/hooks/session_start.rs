//! SessionStart hook: record how the session began and optionally inject
//! development context.

use super::{EXIT_SUCCESS, HookRuntime, read_stdin_payload};
use crate::context;
use anyhow::Result;
use cch_common::types::{SessionStartPayload, now_timestamp};
use serde_json::json;
use std::fs;
use std::path::Path;

const LOG_FILE: &str = "session_start.json";

/// Context files worth noting in the log entry, when small enough to be
/// injectable.
const CONTEXT_FILES: &[&str] = &[
    "README.md",
    "package.json",
    "requirements.txt",
    "Cargo.toml",
    "go.mod",
    ".claude/context.md",
];

const MAX_CONTEXT_FILE_BYTES: u64 = 10_000;

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Print a development-context block to stdout.
    #[arg(long)]
    pub context: bool,

    /// Print the content of CLAUDE.md to stdout.
    #[arg(long)]
    pub claude_md: bool,

    /// Report progress on stderr.
    #[arg(long)]
    pub verbose: bool,
}

fn load_claude_md(base_dir: &Path) -> Option<String> {
    let path = base_dir.join("CLAUDE.md");
    if path.exists() {
        fs::read_to_string(path).ok()
    } else {
        None
    }
}

/// Names of the common context files present (and small enough to read).
fn available_context_files(base_dir: &Path) -> Vec<String> {
    CONTEXT_FILES
        .iter()
        .filter(|name| {
            let path = base_dir.join(name);
            path.metadata()
                .map(|m| m.is_file() && m.len() < MAX_CONTEXT_FILE_BYTES)
                .unwrap_or(false)
        })
        .map(|name| name.to_string())
        .collect()
}

pub async fn run(args: &Args, rt: &HookRuntime) -> Result<i32> {
    let payload: SessionStartPayload = read_stdin_payload().await?;

    let git_context = context::collect_git_context().await;
    let claude_md = load_claude_md(&rt.base_dir);
    let context_files = available_context_files(&rt.base_dir);

    let mut entry = json!({
        "timestamp": now_timestamp(),
        "session_id": &payload.session_id,
        "source": &payload.source,
        "git_context": &git_context,
        "claude_md_found": claude_md.is_some(),
        "context_files": context_files,
    });

    if args.context {
        let engineer = rt.env.get("ENGINEER_NAME");
        let lines = context::development_context_lines(
            &git_context,
            engineer.as_deref().filter(|n| !n.is_empty()),
            &rt.base_dir,
        );
        for line in &lines {
            println!("{line}");
        }
        entry["context_injected"] = json!(true);
    }

    if args.claude_md {
        if let Some(content) = &claude_md {
            println!("=== CLAUDE.md Content ===");
            println!("{content}");
            println!("=== End CLAUDE.md ===\n");
            entry["claude_md_loaded"] = json!(true);
        }
    }

    rt.log.append(LOG_FILE, entry)?;

    if args.verbose {
        eprintln!("Session started: {}", payload.source);
    }
    Ok(EXIT_SUCCESS)
}
