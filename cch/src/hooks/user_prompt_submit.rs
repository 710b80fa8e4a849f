//! UserPromptSubmit hook: record, optionally validate, and optionally
//! contextualize a submitted prompt.

use super::{EXIT_BLOCKED, EXIT_SUCCESS, HookRuntime, read_stdin_payload};
use crate::context;
use anyhow::Result;
use cch_common::guard;
use cch_common::types::{UserPromptSubmitPayload, now_timestamp};
use serde_json::json;

const LOG_FILE: &str = "user_prompt_submit.json";

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Run the prompt guard; a match blocks the prompt.
    #[arg(long)]
    pub validate: bool,

    /// Print a session-context block to stdout.
    #[arg(long)]
    pub context: bool,

    /// Report progress on stderr.
    #[arg(long)]
    pub verbose: bool,
}

pub async fn run(args: &Args, rt: &HookRuntime) -> Result<i32> {
    let payload: UserPromptSubmitPayload = read_stdin_payload().await?;

    let mut entry = json!({
        "timestamp": now_timestamp(),
        "session_id": &payload.session_id,
        "prompt": &payload.prompt,
        "prompt_length": payload.prompt.len(),
    });

    if args.validate {
        let verdict = guard::check_prompt(&payload.prompt);
        entry["validation"] = json!({
            "valid": verdict.is_allowed(),
            "reason": verdict.reason(),
        });

        if let Some(reason) = verdict.reason() {
            eprintln!("BLOCKED: {reason}");
            entry["status"] = json!("blocked");
            rt.log.append(LOG_FILE, entry)?;
            return Ok(EXIT_BLOCKED);
        }
    }

    if args.context {
        let lines = context::session_context_lines(&rt.env).await;
        if !lines.is_empty() {
            println!("=== Session Context ===");
            for line in &lines {
                println!("{line}");
            }
            println!("=== End Context ===\n");
            entry["context_injected"] = json!(true);
        }
    }

    entry["status"] = json!("processed");
    rt.log.append(LOG_FILE, entry)?;

    if args.verbose {
        eprintln!("Prompt logged: {} characters", payload.prompt.len());
    }
    Ok(EXIT_SUCCESS)
}
