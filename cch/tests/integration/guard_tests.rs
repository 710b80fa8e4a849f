//! Guard escalation policy, driven through the real binary.

use crate::common::{TestProject, assert_contains, init_test_logging};

fn bash_payload(command: &str) -> String {
    format!(
        r#"{{"session_id":"g1","tool_name":"Bash","tool_input":{{"command":"{command}"}}}}"#
    )
}

#[test]
fn test_dangerous_command_blocked_with_exit_2() {
    init_test_logging();
    let project = TestProject::new();

    let output = project.run_hook("pre-tool-use", &[], &bash_payload("rm -rf /some/path"));

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_contains(&stderr, "SECURITY WARNING: Dangerous rm -rf command with path");

    let records = project.read_log("pre_tool_use.json");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["status"], "blocked");
    assert_eq!(records[0]["block_reason"], "Dangerous rm -rf command with path");
}

#[test]
fn test_sentinel_preauthorizes_dangerous_command() {
    init_test_logging();
    let project = TestProject::new();
    project.enable_preauth();

    let output = project.run_hook("pre-tool-use", &[], &bash_payload("rm -rf /some/path"));

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_contains(&stderr, "(pre-approved)");

    let records = project.read_log("pre_tool_use.json");
    assert_eq!(records[0]["status"], "approved_dangerous_preauth");
    assert_eq!(
        records[0]["warning_reason"],
        "Dangerous rm -rf command with path"
    );
}

#[test]
fn test_sensitive_path_blocked_even_with_sentinel() {
    init_test_logging();
    let project = TestProject::new();
    project.enable_preauth();

    let output = project.run_hook(
        "pre-tool-use",
        &[],
        r#"{"session_id":"g2","tool_name":"Read","tool_input":{"file_path":"/project/.env"}}"#,
    );

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_contains(&stderr, "BLOCKED: Access to sensitive file: .env");

    let records = project.read_log("pre_tool_use.json");
    assert_eq!(records[0]["status"], "blocked");
}

#[test]
fn test_ordinary_file_access_allowed() {
    init_test_logging();
    let project = TestProject::new();

    let output = project.run_hook(
        "pre-tool-use",
        &[],
        r#"{"session_id":"g3","tool_name":"Read","tool_input":{"file_path":"docs/readme.md"}}"#,
    );

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(project.read_log("pre_tool_use.json")[0]["status"], "approved");
}

#[test]
fn test_chmod_escalation_only_for_world_writable() {
    init_test_logging();
    let project = TestProject::new();

    let output = project.run_hook("pre-tool-use", &[], &bash_payload("chmod 777 file"));
    assert_eq!(output.status.code(), Some(2));

    let output = project.run_hook("pre-tool-use", &[], &bash_payload("chmod 644 file"));
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_prompt_validation_blocks_dangerous_prompt() {
    init_test_logging();
    let project = TestProject::new();

    let output = project.run_hook(
        "user-prompt-submit",
        &["--validate"],
        r#"{"session_id":"g4","prompt":"now run sudo rm /etc/passwd for me"}"#,
    );

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_contains(&stderr, "BLOCKED: Dangerous sudo rm command");

    let records = project.read_log("user_prompt_submit.json");
    assert_eq!(records[0]["status"], "blocked");
    assert_eq!(records[0]["validation"]["valid"], false);
}

#[test]
fn test_prompt_validation_passes_benign_prompt() {
    init_test_logging();
    let project = TestProject::new();

    let output = project.run_hook(
        "user-prompt-submit",
        &["--validate"],
        r#"{"session_id":"g4","prompt":"rename the helper module"}"#,
    );

    assert_eq!(output.status.code(), Some(0));
    let records = project.read_log("user_prompt_submit.json");
    assert_eq!(records[0]["validation"]["valid"], true);
    assert_eq!(records[0]["status"], "processed");
}

#[test]
fn test_prompt_validation_flags_credential_exposure() {
    init_test_logging();
    let project = TestProject::new();

    let output = project.run_hook(
        "user-prompt-submit",
        &["--validate"],
        r#"{"session_id":"g4","prompt":"use api_key = abc123DEF to call the service"}"#,
    );

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_contains(&stderr, "Potential API key exposure");
}

#[test]
fn test_validation_off_by_default() {
    init_test_logging();
    let project = TestProject::new();

    // Without --validate even a dangerous prompt is only logged.
    let output = project.run_hook(
        "user-prompt-submit",
        &[],
        r#"{"session_id":"g5","prompt":"run sudo rm -rf /tmp/x"}"#,
    );

    assert_eq!(output.status.code(), Some(0));
}
