//! Hook entry points.
//!
//! Every hook shares the same driver shape: read one JSON object from
//! stdin into a typed payload, append exactly one record to the hook's
//! log file, run the flag-driven side effects, and communicate the
//! outcome to the host through the exit code.

pub mod notification;
pub mod post_tool_use;
pub mod pre_compact;
pub mod pre_tool_use;
pub mod session_start;
pub mod stop;
pub mod subagent_stop;
pub mod user_prompt_submit;

use anyhow::Result;
use cch_common::{EnvContext, EventLog};
use serde::de::DeserializeOwned;
use std::path::PathBuf;

// ============================================================================
// Exit Code Constants
// ============================================================================
//
// The host distinguishes three outcomes:
//
// - 0: hook ran, action approved (or nothing to decide)
// - 1: the hook itself failed (malformed stdin, unwritable log, ...)
// - 2: policy denial - the guarded action must not proceed
//
// Provider failures (TTS, completion) never surface here; they are
// recorded in the log entry and the hook still exits 0.

/// Hook ran and the action is approved.
pub const EXIT_SUCCESS: i32 = 0;

/// The hook itself failed.
pub const EXIT_FAILURE: i32 = 1;

/// Policy denial: the host must not execute the guarded action.
pub const EXIT_BLOCKED: i32 = 2;

/// Stdin size cap, to keep a hostile payload from exhausting memory.
const MAX_STDIN_BYTES: u64 = 10 * 1024 * 1024;

/// Per-process state threaded into every hook.
///
/// Built once in `main`: the resolved environment, the working directory
/// the host invoked us in, and the event log rooted there.
pub struct HookRuntime {
    pub env: EnvContext,
    pub base_dir: PathBuf,
    pub log: EventLog,
}

impl HookRuntime {
    pub fn new(base_dir: PathBuf, env: EnvContext) -> Self {
        let log = EventLog::at_base(&base_dir);
        Self { env, base_dir, log }
    }
}

/// Read stdin to completion (bounded) and parse the hook payload.
///
/// Any failure here aborts the hook with the generic failure code; the
/// host never sees a stack trace.
pub async fn read_stdin_payload<T: DeserializeOwned>() -> Result<T> {
    use tokio::io::{AsyncReadExt, stdin};

    let mut input = String::new();
    stdin()
        .take(MAX_STDIN_BYTES)
        .read_to_string(&mut input)
        .await?;

    let payload = serde_json::from_str(input.trim())?;
    Ok(payload)
}
