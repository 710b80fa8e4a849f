//! Audio playback for synthesized speech.
//!
//! Cloud providers return MP3 bytes; those are written to a scratch file
//! and handed to the platform's audio player. The scratch file is removed
//! when the handle drops, whether playback succeeded or not.

use super::ProviderError;
use std::io::Write;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Write `audio` to a temp file and play it through the OS player.
pub async fn play_audio_bytes(audio: &[u8]) -> Result<(), ProviderError> {
    let mut tmp = tempfile::Builder::new()
        .suffix(".mp3")
        .tempfile()?;
    tmp.write_all(audio)?;
    tmp.flush()?;

    play_audio_file(tmp.path()).await
}

/// Play an audio file with the platform player.
async fn play_audio_file(path: &Path) -> Result<(), ProviderError> {
    let mut command = player_command(path);
    debug!("playing audio via {:?}", command.as_std().get_program());

    let output = command.output().await?;
    if output.status.success() {
        Ok(())
    } else {
        Err(ProviderError::Playback(format!(
            "player exited with {}",
            output.status
        )))
    }
}

#[cfg(target_os = "macos")]
fn player_command(path: &Path) -> Command {
    let mut cmd = Command::new("afplay");
    cmd.arg(path);
    cmd
}

#[cfg(target_os = "windows")]
fn player_command(path: &Path) -> Command {
    let mut cmd = Command::new("powershell");
    cmd.arg("-c").arg(format!(
        "(New-Object Media.SoundPlayer '{}').PlaySync()",
        path.display()
    ));
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn player_command(path: &Path) -> Command {
    let mut cmd = Command::new("mpg123");
    cmd.arg("-q").arg(path);
    cmd
}
