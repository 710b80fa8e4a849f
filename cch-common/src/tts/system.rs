//! Local speech synthesis through the OS synthesizer.
//!
//! The final tier of the cascade: no credentials, no network. Speaks by
//! spawning the platform synthesizer (`say` on macOS, `espeak` or
//! `spd-say` on Linux, PowerShell's `System.Speech` on Windows).

use super::{ProviderError, Speaker};
use tokio::process::Command;

/// Always-configured local fallback.
pub struct SystemTts;

impl SystemTts {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemTts {
    fn default() -> Self {
        Self::new()
    }
}

impl Speaker for SystemTts {
    fn name(&self) -> &'static str {
        "system"
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn speak(&self, text: &str) -> Result<(), ProviderError> {
        let mut command = synthesizer_command(text)?;
        let output = command.output().await?;
        if output.status.success() {
            Ok(())
        } else {
            Err(ProviderError::Playback(format!(
                "synthesizer exited with {}",
                output.status
            )))
        }
    }
}

#[cfg(target_os = "macos")]
fn synthesizer_command(text: &str) -> Result<Command, ProviderError> {
    let mut cmd = Command::new("say");
    cmd.arg(text);
    Ok(cmd)
}

#[cfg(target_os = "windows")]
fn synthesizer_command(text: &str) -> Result<Command, ProviderError> {
    let mut cmd = Command::new("powershell");
    let escaped = text.replace('\'', "''");
    cmd.arg("-c").arg(format!(
        "Add-Type -AssemblyName System.Speech; \
         (New-Object System.Speech.Synthesis.SpeechSynthesizer).Speak('{escaped}')"
    ));
    Ok(cmd)
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn synthesizer_command(text: &str) -> Result<Command, ProviderError> {
    for candidate in ["espeak", "spd-say"] {
        if let Ok(path) = which::which(candidate) {
            let mut cmd = Command::new(path);
            cmd.arg(text);
            return Ok(cmd);
        }
    }
    Err(ProviderError::NoSynthesizer)
}
