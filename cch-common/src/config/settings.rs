//! User-level settings from `.claude/settings.local.json`.

use std::fs;
use std::path::Path;
use tracing::warn;

/// Toggles read from `.claude/settings.local.json`.
///
/// A missing or malformed settings file means everything stays enabled,
/// matching the read-tolerate-malformed behavior used for the host's own
/// settings files.
#[derive(Debug, Clone)]
pub struct LocalSettings {
    tts_enabled: bool,
}

impl Default for LocalSettings {
    fn default() -> Self {
        Self { tts_enabled: true }
    }
}

impl LocalSettings {
    /// Load settings relative to `base_dir` (the hook working directory).
    pub fn load(base_dir: &Path) -> Self {
        let path = base_dir.join(".claude").join("settings.local.json");
        if !path.exists() {
            return Self::default();
        }

        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                warn!("could not read {:?}: {}", path, e);
                return Self::default();
            }
        };

        match serde_json::from_str::<serde_json::Value>(&content) {
            Ok(settings) => Self {
                tts_enabled: settings
                    .get("tts_enabled")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(true),
            },
            Err(e) => {
                warn!("malformed settings file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Whether the user allows TTS dispatch at all.
    pub fn tts_enabled(&self) -> bool {
        self.tts_enabled
    }
}
