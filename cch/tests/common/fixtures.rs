//! Sandbox fixture for driving the cch binary end-to-end.

use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// A throwaway working directory plus helpers to invoke the hook binary
/// inside it.
///
/// `HOME` is redirected into the sandbox so transcript side tasks never
/// touch the real `~/.claude`, and provider credentials are stripped so
/// no test depends on the machine's environment.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create sandbox"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run one hook subcommand with `input` on stdin.
    pub fn run_hook(&self, subcommand: &str, flags: &[&str], input: &str) -> Output {
        let mut child = Command::new(env!("CARGO_BIN_EXE_cch"))
            .arg(subcommand)
            .args(flags)
            .current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env_remove("ELEVENLABS_API_KEY")
            .env_remove("OPENAI_API_KEY")
            .env_remove("ANTHROPIC_API_KEY")
            .env_remove("ENGINEER_NAME")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to start cch");

        {
            let stdin = child.stdin.as_mut().expect("failed to open stdin");
            stdin
                .write_all(input.as_bytes())
                .expect("failed to write hook input");
        }
        child.wait_with_output().expect("failed to read hook output")
    }

    /// Parse one hook's log file; an absent file reads as empty.
    pub fn read_log(&self, file_name: &str) -> Vec<Value> {
        let path = self.dir.path().join(".claude/logs").join(file_name);
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).expect("log file is not a JSON array"),
            Err(_) => Vec::new(),
        }
    }

    /// Write raw bytes into a log file (for corruption tests).
    pub fn write_log_raw(&self, file_name: &str, content: &str) {
        let dir = self.dir.path().join(".claude/logs");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file_name), content).unwrap();
    }

    /// Create the dangerous-command pre-approval sentinel.
    pub fn enable_preauth(&self) {
        let claude_dir = self.dir.path().join(".claude");
        fs::create_dir_all(&claude_dir).unwrap();
        fs::write(claude_dir.join("allow_dangerous"), "").unwrap();
    }

    /// Write `.claude/settings.local.json`.
    pub fn write_settings(&self, content: &str) {
        let claude_dir = self.dir.path().join(".claude");
        fs::create_dir_all(&claude_dir).unwrap();
        fs::write(claude_dir.join("settings.local.json"), content).unwrap();
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}
