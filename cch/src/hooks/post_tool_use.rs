//! PostToolUse hook: record a completed tool call.

use super::{EXIT_SUCCESS, HookRuntime, read_stdin_payload};
use anyhow::Result;
use cch_common::transcript;
use cch_common::types::{PostToolUsePayload, now_timestamp};
use serde_json::json;

const LOG_FILE: &str = "post_tool_use.json";

/// Converted-transcript file, kept next to the hook logs.
const CHAT_FILE: &str = "chat.json";

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Convert the newest session transcript to a readable JSON array.
    #[arg(long)]
    pub chat: bool,

    /// Report progress on stderr.
    #[arg(long)]
    pub verbose: bool,
}

pub async fn run(args: &Args, rt: &HookRuntime) -> Result<i32> {
    let payload: PostToolUsePayload = read_stdin_payload().await?;

    let mut entry = json!({
        "timestamp": now_timestamp(),
        "session_id": &payload.session_id,
        "tool_name": &payload.tool_name,
        "tool_input": &payload.tool_input,
        "tool_response": &payload.tool_response,
        "success": payload.success(),
    });

    if args.chat {
        let outcome = match transcript::default_projects_dir() {
            Some(projects_dir) => {
                transcript::convert_latest(&projects_dir, &rt.log.path_for(CHAT_FILE))
            }
            None => transcript::SideTaskOutcome {
                success: false,
                message: "No projects directory found".to_string(),
            },
        };
        if outcome.success && args.verbose {
            eprintln!("{}", outcome.message);
        }
        entry["chat_conversion"] = json!({
            "success": outcome.success,
            "message": outcome.message,
        });
    }

    rt.log.append(LOG_FILE, entry)?;

    if args.verbose {
        eprintln!("Tool completed: {}", payload.tool_name);
    }
    Ok(EXIT_SUCCESS)
}
