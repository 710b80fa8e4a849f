//! PreCompact hook: record an imminent context compaction and optionally
//! back up the transcript first.

use super::{EXIT_SUCCESS, HookRuntime, read_stdin_payload};
use anyhow::Result;
use cch_common::transcript::{self, BACKUP_DIR};
use cch_common::types::{PreCompactPayload, now_timestamp};
use serde_json::json;

const LOG_FILE: &str = "pre_compact.json";

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Copy the newest session transcript into a timestamped backup.
    #[arg(long)]
    pub backup: bool,

    /// Report progress on stderr.
    #[arg(long)]
    pub verbose: bool,
}

pub async fn run(args: &Args, rt: &HookRuntime) -> Result<i32> {
    let payload: PreCompactPayload = read_stdin_payload().await?;

    let mut entry = json!({
        "timestamp": now_timestamp(),
        "session_id": &payload.session_id,
        "trigger": &payload.trigger,
        "custom_instructions": &payload.custom_instructions,
    });

    if args.backup {
        let outcome = match transcript::default_projects_dir() {
            Some(projects_dir) => {
                transcript::backup_latest(&projects_dir, &rt.base_dir.join(BACKUP_DIR))
            }
            None => transcript::SideTaskOutcome {
                success: false,
                message: "No projects directory found".to_string(),
            },
        };
        if outcome.success && args.verbose {
            eprintln!("Backup: {}", outcome.message);
        }
        entry["backup"] = json!({
            "enabled": true,
            "success": outcome.success,
            "message": outcome.message,
        });
    } else {
        entry["backup"] = json!({ "enabled": false });
    }

    rt.log.append(LOG_FILE, entry)?;

    if payload.trigger == "manual" && args.verbose {
        eprintln!("Manual compaction triggered");
        if !payload.custom_instructions.is_empty() {
            let preview: String = payload.custom_instructions.chars().take(100).collect();
            eprintln!("Instructions: {preview}...");
        }
    }
    if args.verbose {
        eprintln!("Pre-compact logged: {}", payload.trigger);
    }
    Ok(EXIT_SUCCESS)
}
