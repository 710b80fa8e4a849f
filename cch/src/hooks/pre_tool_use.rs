//! PreToolUse hook: gate a tool call against the guard rules.
//!
//! Dangerous commands block with exit 2 unless the pre-approval sentinel
//! exists; sensitive-path access always blocks. Every decision, including
//! blocks, is recorded in the log before the exit code is returned.

use super::{EXIT_BLOCKED, EXIT_SUCCESS, HookRuntime, read_stdin_payload};
use anyhow::Result;
use cch_common::guard::{self, PREAUTH_SENTINEL};
use cch_common::types::{GuardVerdict, PreToolUsePayload, now_timestamp};
use serde_json::json;

const LOG_FILE: &str = "pre_tool_use.json";

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Report decisions on stderr.
    #[arg(long)]
    pub verbose: bool,
}

pub async fn run(args: &Args, rt: &HookRuntime) -> Result<i32> {
    let payload: PreToolUsePayload = read_stdin_payload().await?;

    let command_verdict = guard::check_command(&payload.tool_name, &payload.tool_input);
    let path_verdict = guard::check_sensitive_path(&payload.tool_name, &payload.tool_input);

    let mut entry = json!({
        "timestamp": now_timestamp(),
        "session_id": &payload.session_id,
        "tool_name": &payload.tool_name,
        "tool_input": &payload.tool_input,
    });

    if let GuardVerdict::BlockedDangerous(reason) = command_verdict {
        if guard::preauth_sentinel_exists(&rt.base_dir) {
            eprintln!("SECURITY WARNING: {reason} (pre-approved)");
            entry["status"] = json!("approved_dangerous_preauth");
            entry["warning_reason"] = json!(reason);
        } else {
            let command = payload
                .tool_input
                .get("command")
                .and_then(|v| v.as_str())
                .unwrap_or("");
            eprintln!("\nSECURITY WARNING: {reason}");
            eprintln!("Command: {command}");
            eprintln!("To allow dangerous commands, run: touch {PREAUTH_SENTINEL}");
            entry["status"] = json!("blocked");
            entry["block_reason"] = json!(reason);
            rt.log.append(LOG_FILE, entry)?;
            return Ok(EXIT_BLOCKED);
        }
    }

    if let GuardVerdict::BlockedSensitive(reason) = path_verdict {
        eprintln!("BLOCKED: {reason}");
        entry["status"] = json!("blocked");
        entry["block_reason"] = json!(reason);
        rt.log.append(LOG_FILE, entry)?;
        return Ok(EXIT_BLOCKED);
    }

    if entry.get("status").is_none() {
        entry["status"] = json!("approved");
    }
    rt.log.append(LOG_FILE, entry)?;

    if args.verbose {
        eprintln!("Tool approved: {}", payload.tool_name);
    }
    Ok(EXIT_SUCCESS)
}
