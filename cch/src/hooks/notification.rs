//! Notification hook: record a host notification and optionally speak it.

use super::{EXIT_SUCCESS, HookRuntime, read_stdin_payload};
use anyhow::Result;
use cch_common::tts::TtsDispatcher;
use cch_common::types::{NotificationPayload, now_timestamp};
use serde_json::json;

const LOG_FILE: &str = "notification.json";

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Speak the notification through the TTS cascade.
    #[arg(long)]
    pub notify: bool,

    /// Report progress on stderr.
    #[arg(long)]
    pub verbose: bool,
}

/// Reduce a host notification to a short spoken phrase.
fn spoken_phrase(message: &str) -> &'static str {
    let lower = message.to_lowercase();
    if lower.contains("input") || lower.contains("waiting") {
        "Your agent needs your input"
    } else if lower.contains("error") {
        "Agent encountered an error"
    } else if lower.contains("complete") {
        "Agent task completed"
    } else {
        "Agent notification"
    }
}

pub async fn run(args: &Args, rt: &HookRuntime) -> Result<i32> {
    let payload: NotificationPayload = read_stdin_payload().await?;

    let mut entry = json!({
        "timestamp": now_timestamp(),
        "session_id": &payload.session_id,
        "message": &payload.message,
    });

    if args.notify {
        let dispatcher = TtsDispatcher::from_env(&rt.env);
        let outcome = dispatcher.dispatch(spoken_phrase(&payload.message)).await;
        if outcome.success && args.verbose {
            eprintln!("Notification: {}", outcome.message);
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
        let preview: String = payload.message.chars().take(50).collect();
        eprintln!("Notification logged: {preview}...");
    }
    Ok(EXIT_SUCCESS)
}
