//! Pattern-based guard rules for tool calls and prompts.
//!
//! Three classifiers, all pure functions of their inputs:
//! - the command guard flags dangerous shell commands (`Bash` tool only),
//! - the sensitive-path guard flags credential-bearing file paths for
//!   `Read`/`Write`/`Edit`,
//! - the prompt guard applies the same approach to free-form user text,
//!   adding inline credential-assignment patterns.
//!
//! Matching is ordered and case-insensitive; the first hit wins and its
//! label becomes the verdict reason. A dangerous-command block can be
//! overridden by the pre-approval sentinel file; a sensitive-path block
//! cannot.

use crate::types::GuardVerdict;
use regex::Regex;
use serde_json::Value;
use std::path::Path;
use std::sync::LazyLock;

/// Marker file whose presence pre-authorizes dangerous commands.
pub const PREAUTH_SENTINEL: &str = ".claude/allow_dangerous";

/// Ordered dangerous-command patterns with their block reasons.
static COMMAND_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"rm\s+.*-[rf].*/", "Dangerous rm -rf command with path"),
        (r"sudo\s+rm", "Dangerous sudo rm command"),
        (r"chmod\s+777", "Dangerous permission change"),
        (r">\s*/etc/", "Writing to system directories"),
        (r"curl.*\|\s*sh", "Dangerous pipe to shell"),
        (r"wget.*\|\s*sh", "Dangerous pipe to shell"),
        (r"dd\s+if=", "Potentially dangerous dd command"),
        (r"mkfs\.", "Filesystem creation command"),
        (r"fdisk", "Disk partitioning command"),
    ]
    .into_iter()
    .map(|(pattern, reason)| (case_insensitive(pattern), reason))
    .collect()
});

/// Path substrings associated with credentials and secrets.
const SENSITIVE_PATHS: &[&str] = &[
    ".env",
    ".env.local",
    ".env.production",
    "secrets.json",
    "config/secrets",
    "id_rsa",
    "id_ecdsa",
];

/// Prompt patterns: command-shaped dangers plus credential assignments.
static PROMPT_PATTERNS: LazyLock<Vec<(Regex, &'static str, bool)>> = LazyLock::new(|| {
    // Third field: whether the match is a credential exposure (sensitive)
    // rather than a dangerous instruction.
    [
        (r"rm\s+.*-[rf]", "Dangerous rm command detected", false),
        (r"sudo\s+rm", "Dangerous sudo rm command", false),
        (r">\s*/etc/", "System directory write attempt", false),
        (r"curl.*\|\s*sh", "Dangerous pipe to shell", false),
        (
            r#"api[_-]?key\s*[=:]\s*["']?[a-zA-Z0-9]+"#,
            "Potential API key exposure",
            true,
        ),
        (
            r#"password\s*[=:]\s*["']?[a-zA-Z0-9]+"#,
            "Potential password exposure",
            true,
        ),
    ]
    .into_iter()
    .map(|(pattern, reason, sensitive)| (case_insensitive(pattern), reason, sensitive))
    .collect()
});

fn case_insensitive(pattern: &str) -> Regex {
    // Patterns are compile-time constants; a failure here is a programming
    // error caught by the tests below.
    Regex::new(&format!("(?i){pattern}")).unwrap_or_else(|e| panic!("bad guard pattern: {e}"))
}

/// Classify a tool call against the dangerous-command patterns.
///
/// Only `Bash` calls are examined; everything else is allowed.
pub fn check_command(tool_name: &str, tool_input: &Value) -> GuardVerdict {
    if tool_name != "Bash" {
        return GuardVerdict::Allowed;
    }
    let command = tool_input.get("command").and_then(|v| v.as_str()).unwrap_or("");

    for (pattern, reason) in COMMAND_PATTERNS.iter() {
        if pattern.is_match(command) {
            return GuardVerdict::BlockedDangerous((*reason).to_string());
        }
    }
    GuardVerdict::Allowed
}

/// Classify a tool call against the sensitive-path substrings.
///
/// Applies to `Read`, `Write`, and `Edit`; the match is a
/// case-insensitive substring check on the `file_path` argument.
pub fn check_sensitive_path(tool_name: &str, tool_input: &Value) -> GuardVerdict {
    if !matches!(tool_name, "Read" | "Write" | "Edit") {
        return GuardVerdict::Allowed;
    }
    let file_path = tool_input
        .get("file_path")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_lowercase();

    for sensitive in SENSITIVE_PATHS {
        if file_path.contains(sensitive) {
            return GuardVerdict::BlockedSensitive(format!("Access to sensitive file: {sensitive}"));
        }
    }
    GuardVerdict::Allowed
}

/// Classify free-form prompt text.
pub fn check_prompt(prompt: &str) -> GuardVerdict {
    for (pattern, reason, sensitive) in PROMPT_PATTERNS.iter() {
        if pattern.is_match(prompt) {
            return if *sensitive {
                GuardVerdict::BlockedSensitive((*reason).to_string())
            } else {
                GuardVerdict::BlockedDangerous((*reason).to_string())
            };
        }
    }
    GuardVerdict::Allowed
}

/// Whether the pre-approval sentinel exists under `base_dir`.
pub fn preauth_sentinel_exists(base_dir: &Path) -> bool {
    base_dir.join(PREAUTH_SENTINEL).exists()
}
