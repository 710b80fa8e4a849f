//! Shared components for the cch lifecycle hooks.
//!
//! Everything a hook entry point needs lives here: the typed stdin
//! payloads, the per-hook JSON event logs, the guard rules, the TTS and
//! completion cascades, the `.env`/settings configuration, and the
//! transcript side tasks. The `cch` binary wires these together per hook
//! and owns nothing but the drivers.

pub mod config;
pub mod errors;
pub mod guard;
pub mod llm;
pub mod logger;
pub mod transcript;
pub mod tts;
pub mod types;

pub use config::{EnvContext, LocalSettings};
pub use errors::HookError;
pub use logger::EventLog;
pub use types::{
    GuardVerdict, NotificationPayload, PostToolUsePayload, PreCompactPayload, PreToolUsePayload,
    SessionStartPayload, StopPayload, TtsOutcome, UserPromptSubmitPayload, now_timestamp,
};
