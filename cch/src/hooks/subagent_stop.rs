//! SubagentStop hook: record a subagent finishing, with an optional
//! spoken announcement gated by the user's settings toggle.

use super::{EXIT_SUCCESS, HookRuntime, read_stdin_payload};
use anyhow::Result;
use cch_common::LocalSettings;
use cch_common::tts::TtsDispatcher;
use cch_common::types::{StopPayload, now_timestamp};
use serde_json::json;

const LOG_FILE: &str = "subagent_stop.json";

const ANNOUNCEMENT: &str = "Subagent Complete";

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Announce the completion through the TTS cascade.
    #[arg(long)]
    pub tts: bool,

    /// Report progress on stderr.
    #[arg(long)]
    pub verbose: bool,
}

pub async fn run(args: &Args, rt: &HookRuntime) -> Result<i32> {
    let payload: StopPayload = read_stdin_payload().await?;

    let mut entry = json!({
        "timestamp": now_timestamp(),
        "session_id": payload.session_id,
        "stop_hook_active": payload.stop_hook_active,
    });

    let settings = LocalSettings::load(&rt.base_dir);
    if args.tts && settings.tts_enabled() {
        let dispatcher = TtsDispatcher::from_env(&rt.env);
        let outcome = dispatcher.dispatch(ANNOUNCEMENT).await;
        if outcome.success && args.verbose {
            eprintln!("{ANNOUNCEMENT}");
        }
        entry["tts"] = json!({
            "enabled": true,
            "success": outcome.success,
            "provider": outcome.provider,
            "message": outcome.message,
        });
    } else {
        let reason = if settings.tts_enabled() {
            "flag_not_set"
        } else {
            "disabled_by_user"
        };
        entry["tts"] = json!({ "enabled": false, "reason": reason });
    }

    rt.log.append(LOG_FILE, entry)?;

    if args.verbose {
        eprintln!("Subagent stop logged");
    }
    Ok(EXIT_SUCCESS)
}
