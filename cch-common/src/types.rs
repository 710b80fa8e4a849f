//! Common types used across cch components.
//!
//! Each hook receives one JSON object on stdin. The payloads below are the
//! typed boundary for that input: unknown fields are tolerated, missing
//! fields fall back to the same defaults the host applies, and a payload
//! that is not a JSON object at all is a hard parse error.

use serde::{Deserialize, Serialize};

fn default_session_id() -> String {
    "unknown".to_string()
}

fn default_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Payload delivered before a tool call executes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreToolUsePayload {
    #[serde(default = "default_session_id")]
    pub session_id: String,
    /// Name of the tool about to run (e.g. "Bash", "Read").
    #[serde(default)]
    pub tool_name: String,
    /// Tool parameters, kept as raw JSON since shape varies per tool.
    #[serde(default = "default_object")]
    pub tool_input: serde_json::Value,
}

/// Payload delivered after a tool call completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostToolUsePayload {
    #[serde(default = "default_session_id")]
    pub session_id: String,
    #[serde(default)]
    pub tool_name: String,
    #[serde(default = "default_object")]
    pub tool_input: serde_json::Value,
    /// Tool result as reported by the host.
    #[serde(default = "default_object")]
    pub tool_response: serde_json::Value,
}

impl PostToolUsePayload {
    /// Whether the tool reported success. Absent means success.
    pub fn success(&self) -> bool {
        self.tool_response
            .get("success")
            .and_then(|v| v.as_bool())
            .unwrap_or(true)
    }
}

/// Payload delivered when the user submits a prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPromptSubmitPayload {
    #[serde(default = "default_session_id")]
    pub session_id: String,
    #[serde(default)]
    pub prompt: String,
}

/// Payload delivered with a host notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPayload {
    #[serde(default = "default_session_id")]
    pub session_id: String,
    #[serde(default)]
    pub message: String,
}

/// Payload delivered when the main agent or a subagent stops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopPayload {
    #[serde(default = "default_session_id")]
    pub session_id: String,
    #[serde(default)]
    pub stop_hook_active: bool,
}

/// Payload delivered when a session starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStartPayload {
    #[serde(default = "default_session_id")]
    pub session_id: String,
    /// How the session began ("startup", "resume", "clear", ...).
    #[serde(default = "default_session_id")]
    pub source: String,
}

/// Payload delivered before context compaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreCompactPayload {
    #[serde(default = "default_session_id")]
    pub session_id: String,
    /// What triggered compaction ("manual" or "auto").
    #[serde(default = "default_session_id")]
    pub trigger: String,
    #[serde(default)]
    pub custom_instructions: String,
}

/// Verdict from a guard rule.
///
/// Computed once per invocation and recorded in the log entry; never
/// persisted anywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "verdict", content = "reason")]
pub enum GuardVerdict {
    /// Action may proceed.
    Allowed,
    /// Matched a dangerous-command pattern. Overridable by the
    /// pre-approval sentinel file.
    BlockedDangerous(String),
    /// Touched a sensitive path. Never overridable.
    BlockedSensitive(String),
}

impl GuardVerdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardVerdict::Allowed)
    }

    /// Reason text for a blocking verdict.
    pub fn reason(&self) -> Option<&str> {
        match self {
            GuardVerdict::Allowed => None,
            GuardVerdict::BlockedDangerous(r) | GuardVerdict::BlockedSensitive(r) => Some(r),
        }
    }
}

/// Result of one TTS dispatch through the provider cascade.
///
/// Logging-only: a failed dispatch never affects the invoking hook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsOutcome {
    /// Provider that succeeded, if any ("elevenlabs", "openai", "system").
    pub provider: Option<String>,
    pub success: bool,
    /// The text that was (or would have been) spoken, after any
    /// personalization prefix.
    pub message: String,
}

impl TtsOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            provider: None,
            success: false,
            message: message.into(),
        }
    }
}

/// ISO-8601 timestamp in local time, the format every log record uses.
pub fn now_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
