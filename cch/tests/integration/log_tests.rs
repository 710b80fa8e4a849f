//! Log-file lifecycle: ordering, corruption recovery, idempotence.

use crate::common::{TestProject, init_test_logging};

#[test]
fn test_records_accumulate_in_order() {
    init_test_logging();
    let project = TestProject::new();

    for i in 0..3 {
        let payload = format!(r#"{{"session_id":"run-{i}","prompt":"p{i}"}}"#);
        let output = project.run_hook("user-prompt-submit", &[], &payload);
        assert_eq!(output.status.code(), Some(0));
    }

    let records = project.read_log("user_prompt_submit.json");
    assert_eq!(records.len(), 3);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record["session_id"], format!("run-{i}"));
    }
}

#[test]
fn test_same_input_twice_yields_two_records() {
    init_test_logging();
    let project = TestProject::new();
    let payload = r#"{"session_id":"dup","message":"same message"}"#;

    project.run_hook("notification", &[], payload);
    project.run_hook("notification", &[], payload);

    let records = project.read_log("notification.json");
    assert_eq!(records.len(), 2, "identical inputs must not be deduplicated");
    assert_eq!(records[0]["session_id"], records[1]["session_id"]);
}

#[test]
fn test_corrupt_log_resets_to_single_new_record() {
    init_test_logging();
    let project = TestProject::new();
    project.write_log_raw("stop.json", "{ definitely [ not json");

    let output = project.run_hook("stop", &[], r#"{"session_id":"after-corruption"}"#);
    assert_eq!(output.status.code(), Some(0));

    let records = project.read_log("stop.json");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["session_id"], "after-corruption");
}

#[test]
fn test_empty_log_file_treated_as_empty_history() {
    init_test_logging();
    let project = TestProject::new();
    project.write_log_raw("notification.json", "");

    let output = project.run_hook(
        "notification",
        &[],
        r#"{"session_id":"n1","message":"hi"}"#,
    );
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(project.read_log("notification.json").len(), 1);
}

#[test]
fn test_each_hook_writes_only_its_own_file() {
    init_test_logging();
    let project = TestProject::new();

    project.run_hook("stop", &[], r#"{"session_id":"s"}"#);
    project.run_hook(
        "notification",
        &[],
        r#"{"session_id":"n","message":"m"}"#,
    );

    assert_eq!(project.read_log("stop.json").len(), 1);
    assert_eq!(project.read_log("notification.json").len(), 1);
    assert!(project.read_log("pre_tool_use.json").is_empty());
}

#[test]
fn test_blocked_invocations_are_logged_too() {
    init_test_logging();
    let project = TestProject::new();

    let blocked = project.run_hook(
        "pre-tool-use",
        &[],
        r#"{"session_id":"b1","tool_name":"Bash","tool_input":{"command":"sudo rm /x"}}"#,
    );
    assert_eq!(blocked.status.code(), Some(2));

    let approved = project.run_hook(
        "pre-tool-use",
        &[],
        r#"{"session_id":"b2","tool_name":"Bash","tool_input":{"command":"cargo fmt"}}"#,
    );
    assert_eq!(approved.status.code(), Some(0));

    let records = project.read_log("pre_tool_use.json");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["status"], "blocked");
    assert_eq!(records[1]["status"], "approved");
}

#[test]
fn test_timestamps_are_present_and_ordered() {
    init_test_logging();
    let project = TestProject::new();

    project.run_hook("stop", &[], r#"{"session_id":"t1"}"#);
    project.run_hook("stop", &[], r#"{"session_id":"t2"}"#);

    let records = project.read_log("stop.json");
    let first = records[0]["timestamp"].as_str().unwrap();
    let second = records[1]["timestamp"].as_str().unwrap();
    assert!(!first.is_empty());
    assert!(second >= first, "timestamps should be non-decreasing");
}
