//! End-to-end behavior of each hook subcommand.

use crate::common::{TestProject, assert_contains, init_test_logging};

#[test]
fn test_pre_tool_use_approves_benign_command() {
    init_test_logging();
    let project = TestProject::new();

    let output = project.run_hook(
        "pre-tool-use",
        &[],
        r#"{"session_id":"s1","tool_name":"Bash","tool_input":{"command":"ls -la"}}"#,
    );

    assert_eq!(output.status.code(), Some(0));
    let records = project.read_log("pre_tool_use.json");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["status"], "approved");
    assert_eq!(records[0]["session_id"], "s1");
    assert_eq!(records[0]["tool_name"], "Bash");
}

#[test]
fn test_malformed_input_fails_without_logging() {
    init_test_logging();
    let project = TestProject::new();

    let output = project.run_hook("pre-tool-use", &[], "this is not json");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_contains(&stderr, "PreToolUse hook error");
    assert!(project.read_log("pre_tool_use.json").is_empty());
}

#[test]
fn test_empty_input_fails() {
    init_test_logging();
    let project = TestProject::new();

    let output = project.run_hook("stop", &[], "");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_fields_fall_back_to_defaults() {
    init_test_logging();
    let project = TestProject::new();

    let output = project.run_hook("pre-tool-use", &[], "{}");

    assert_eq!(output.status.code(), Some(0));
    let records = project.read_log("pre_tool_use.json");
    assert_eq!(records[0]["session_id"], "unknown");
    assert_eq!(records[0]["tool_name"], "");
}

#[test]
fn test_post_tool_use_records_response_and_success() {
    init_test_logging();
    let project = TestProject::new();

    let output = project.run_hook(
        "post-tool-use",
        &[],
        r#"{"session_id":"s2","tool_name":"Read","tool_input":{"file_path":"src/main.rs"},"tool_response":{"success":false,"error":"not found"}}"#,
    );

    assert_eq!(output.status.code(), Some(0));
    let records = project.read_log("post_tool_use.json");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["success"], false);
    assert_eq!(records[0]["tool_response"]["error"], "not found");
}

#[test]
fn test_post_tool_use_chat_conversion_without_transcripts() {
    init_test_logging();
    let project = TestProject::new();

    // HOME points into the sandbox, so there is no projects directory.
    let output = project.run_hook(
        "post-tool-use",
        &["--chat"],
        r#"{"session_id":"s2","tool_name":"Bash"}"#,
    );

    assert_eq!(output.status.code(), Some(0));
    let records = project.read_log("post_tool_use.json");
    assert_eq!(records[0]["chat_conversion"]["success"], false);
}

#[test]
fn test_post_tool_use_chat_conversion_with_transcript() {
    init_test_logging();
    let project = TestProject::new();

    let projects = project.path().join(".claude/projects/demo");
    std::fs::create_dir_all(&projects).unwrap();
    std::fs::write(
        projects.join("session.jsonl"),
        "{\"turn\":1}\nnot json\n{\"turn\":2}\n",
    )
    .unwrap();

    let output = project.run_hook(
        "post-tool-use",
        &["--chat"],
        r#"{"session_id":"s2","tool_name":"Bash"}"#,
    );

    assert_eq!(output.status.code(), Some(0));
    let records = project.read_log("post_tool_use.json");
    assert_eq!(records[0]["chat_conversion"]["success"], true);

    let chat: Vec<serde_json::Value> = serde_json::from_str(
        &std::fs::read_to_string(project.path().join(".claude/logs/chat.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(chat.len(), 2);
}

#[test]
fn test_user_prompt_submit_records_length_and_status() {
    init_test_logging();
    let project = TestProject::new();

    let output = project.run_hook(
        "user-prompt-submit",
        &[],
        r#"{"session_id":"s3","prompt":"add a test for the parser"}"#,
    );

    assert_eq!(output.status.code(), Some(0));
    let records = project.read_log("user_prompt_submit.json");
    assert_eq!(records[0]["prompt_length"], 25);
    assert_eq!(records[0]["status"], "processed");
}

#[test]
fn test_user_prompt_submit_context_prints_block() {
    init_test_logging();
    let project = TestProject::new();

    let output = project.run_hook(
        "user-prompt-submit",
        &["--context"],
        r#"{"session_id":"s3","prompt":"hello"}"#,
    );

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_contains(&stdout, "=== Session Context ===");
    assert_contains(&stdout, "Session Time:");
    assert_contains(&stdout, "=== End Context ===");
}

#[test]
fn test_notification_without_flag_skips_tts() {
    init_test_logging();
    let project = TestProject::new();

    let output = project.run_hook(
        "notification",
        &[],
        r#"{"session_id":"s4","message":"Claude is waiting for your input"}"#,
    );

    assert_eq!(output.status.code(), Some(0));
    let records = project.read_log("notification.json");
    assert_eq!(records[0]["tts"]["enabled"], false);
    assert_eq!(records[0]["message"], "Claude is waiting for your input");
}

#[test]
fn test_stop_default_message_and_no_tts() {
    init_test_logging();
    let project = TestProject::new();

    let output = project.run_hook(
        "stop",
        &[],
        r#"{"session_id":"s5","stop_hook_active":true}"#,
    );

    assert_eq!(output.status.code(), Some(0));
    let records = project.read_log("stop.json");
    assert_eq!(records[0]["completion_message"], "Task completed!");
    assert_eq!(records[0]["stop_hook_active"], true);
    assert_eq!(records[0]["tts"]["enabled"], false);
}

#[test]
fn test_stop_show_message_prints_to_stdout() {
    init_test_logging();
    let project = TestProject::new();

    let output = project.run_hook(
        "stop",
        &["--show-message"],
        r#"{"session_id":"s5"}"#,
    );

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_contains(&stdout, "Task completed!");
}

#[test]
fn test_stop_tts_with_no_credentials_never_fails_the_hook() {
    init_test_logging();
    let project = TestProject::new();

    // Both cloud tiers are unconfigured; only the system tier can run,
    // and whether it succeeds or not the hook still exits 0.
    let output = project.run_hook("stop", &["--tts"], r#"{"session_id":"s5"}"#);

    assert_eq!(output.status.code(), Some(0));
    let records = project.read_log("stop.json");
    assert_eq!(records[0]["tts"]["enabled"], true);
    let provider = records[0]["tts"]["provider"].as_str();
    assert!(provider.is_none() || provider == Some("system"));
}

#[test]
fn test_subagent_stop_tts_disabled_by_user_settings() {
    init_test_logging();
    let project = TestProject::new();
    project.write_settings(r#"{"tts_enabled": false}"#);

    let output = project.run_hook(
        "subagent-stop",
        &["--tts"],
        r#"{"session_id":"s6","stop_hook_active":false}"#,
    );

    assert_eq!(output.status.code(), Some(0));
    let records = project.read_log("subagent_stop.json");
    assert_eq!(records[0]["tts"]["enabled"], false);
    assert_eq!(records[0]["tts"]["reason"], "disabled_by_user");
}

#[test]
fn test_subagent_stop_without_flag_reports_reason() {
    init_test_logging();
    let project = TestProject::new();

    let output = project.run_hook(
        "subagent-stop",
        &[],
        r#"{"session_id":"s6"}"#,
    );

    assert_eq!(output.status.code(), Some(0));
    let records = project.read_log("subagent_stop.json");
    assert_eq!(records[0]["tts"]["enabled"], false);
    assert_eq!(records[0]["tts"]["reason"], "flag_not_set");
}

#[test]
fn test_session_start_records_source_and_context_files() {
    init_test_logging();
    let project = TestProject::new();
    std::fs::write(project.path().join("README.md"), "# demo").unwrap();

    let output = project.run_hook(
        "session-start",
        &[],
        r#"{"session_id":"s7","source":"startup"}"#,
    );

    assert_eq!(output.status.code(), Some(0));
    let records = project.read_log("session_start.json");
    assert_eq!(records[0]["source"], "startup");
    assert_eq!(records[0]["claude_md_found"], false);
    let files: Vec<String> = records[0]["context_files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert!(files.contains(&"README.md".to_string()));
}

#[test]
fn test_session_start_context_block() {
    init_test_logging();
    let project = TestProject::new();

    let output = project.run_hook(
        "session-start",
        &["--context"],
        r#"{"session_id":"s7","source":"startup"}"#,
    );

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_contains(&stdout, "=== Development Session Context ===");
    assert_contains(&stdout, "Working Directory:");

    let records = project.read_log("session_start.json");
    assert_eq!(records[0]["context_injected"], true);
}

#[test]
fn test_session_start_claude_md_printed_when_present() {
    init_test_logging();
    let project = TestProject::new();
    std::fs::write(project.path().join("CLAUDE.md"), "Always run the tests.").unwrap();

    let output = project.run_hook(
        "session-start",
        &["--claude-md"],
        r#"{"session_id":"s7","source":"startup"}"#,
    );

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_contains(&stdout, "=== CLAUDE.md Content ===");
    assert_contains(&stdout, "Always run the tests.");

    let records = project.read_log("session_start.json");
    assert_eq!(records[0]["claude_md_found"], true);
    assert_eq!(records[0]["claude_md_loaded"], true);
}

#[test]
fn test_pre_compact_records_trigger_and_skips_backup_by_default() {
    init_test_logging();
    let project = TestProject::new();

    let output = project.run_hook(
        "pre-compact",
        &[],
        r#"{"session_id":"s8","trigger":"auto","custom_instructions":""}"#,
    );

    assert_eq!(output.status.code(), Some(0));
    let records = project.read_log("pre_compact.json");
    assert_eq!(records[0]["trigger"], "auto");
    assert_eq!(records[0]["backup"]["enabled"], false);
}

#[test]
fn test_pre_compact_backup_copies_latest_transcript() {
    init_test_logging();
    let project = TestProject::new();

    let projects = project.path().join(".claude/projects/demo");
    std::fs::create_dir_all(&projects).unwrap();
    std::fs::write(projects.join("session.jsonl"), "{\"turn\":1}\n").unwrap();

    let output = project.run_hook(
        "pre-compact",
        &["--backup"],
        r#"{"session_id":"s8","trigger":"manual"}"#,
    );

    assert_eq!(output.status.code(), Some(0));
    let records = project.read_log("pre_compact.json");
    assert_eq!(records[0]["backup"]["enabled"], true);
    assert_eq!(records[0]["backup"]["success"], true);

    let backups: Vec<_> = std::fs::read_dir(project.path().join(".claude/backups"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(backups.len(), 1);
    assert!(backups[0].starts_with("transcript_backup_"));
}

#[test]
fn test_verbose_flag_reports_on_stderr() {
    init_test_logging();
    let project = TestProject::new();

    let output = project.run_hook(
        "pre-tool-use",
        &["--verbose"],
        r#"{"session_id":"s1","tool_name":"Read","tool_input":{"file_path":"src/lib.rs"}}"#,
    );

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_contains(&stderr, "Tool approved: Read");
}
