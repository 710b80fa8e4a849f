//! Stop hook: record the agent stopping, with an optional spoken or
//! printed completion message.

use super::{EXIT_SUCCESS, HookRuntime, read_stdin_payload};
use anyhow::Result;
use cch_common::llm::CompletionGenerator;
use cch_common::tts::TtsDispatcher;
use cch_common::types::{StopPayload, now_timestamp};
use serde_json::json;

const LOG_FILE: &str = "stop.json";

/// Message used when AI generation is not requested.
const DEFAULT_MESSAGE: &str = "Task completed!";

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Generate the completion message with the LLM cascade.
    #[arg(long)]
    pub ai: bool,

    /// Speak the completion message through the TTS cascade.
    #[arg(long)]
    pub tts: bool,

    /// Print the completion message to stdout.
    #[arg(long)]
    pub show_message: bool,

    /// Report progress on stderr.
    #[arg(long)]
    pub verbose: bool,
}

pub async fn run(args: &Args, rt: &HookRuntime) -> Result<i32> {
    let payload: StopPayload = read_stdin_payload().await?;

    let completion_message = if args.ai {
        CompletionGenerator::from_env(&rt.env).generate(None).await
    } else {
        DEFAULT_MESSAGE.to_string()
    };

    let mut entry = json!({
        "timestamp": now_timestamp(),
        "session_id": &payload.session_id,
        "stop_hook_active": payload.stop_hook_active,
        "completion_message": &completion_message,
    });

    if args.tts {
        let dispatcher = TtsDispatcher::from_env(&rt.env);
        let outcome = dispatcher.dispatch(&completion_message).await;
        if outcome.success && args.verbose {
            eprintln!("Completion: {}", outcome.message);
        }
        entry["tts"] = json!({
            "enabled": true,
            "success": outcome.success,
            "provider": outcome.provider,
            "message": outcome.message,
        });
    } else {
        entry["tts"] = json!({ "enabled": false });
    }

    rt.log.append(LOG_FILE, entry)?;

    if args.verbose {
        eprintln!("Stop logged: {completion_message}");
    }
    if args.show_message {
        println!("{completion_message}");
    }
    Ok(EXIT_SUCCESS)
}
