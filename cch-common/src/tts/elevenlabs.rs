//! ElevenLabs speech synthesis adapter.

use super::{playback, ProviderError, Speaker, PROVIDER_TIMEOUT};
use crate::config::EnvContext;
use reqwest::Client;
use serde_json::json;

const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";
const MODEL_ID: &str = "eleven_monolingual_v1";

/// First tier of the cascade. Requires `ELEVENLABS_API_KEY`; voice is
/// selectable via `ELEVENLABS_VOICE_ID`.
pub struct ElevenLabsTts {
    api_key: Option<String>,
    voice_id: String,
    client: Client,
}

impl ElevenLabsTts {
    pub fn from_env(env: &EnvContext) -> Self {
        Self {
            api_key: env.get("ELEVENLABS_API_KEY").filter(|k| !k.is_empty()),
            voice_id: env.get_or("ELEVENLABS_VOICE_ID", DEFAULT_VOICE_ID),
            client: Client::builder()
                .timeout(PROVIDER_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }
}

impl Speaker for ElevenLabsTts {
    fn name(&self) -> &'static str {
        "elevenlabs"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn speak(&self, text: &str) -> Result<(), ProviderError> {
        // is_configured is checked by the dispatcher; an empty key here
        // would just produce an authentication failure status.
        let api_key = self.api_key.as_deref().unwrap_or_default();
        let url = format!(
            "https://api.elevenlabs.io/v1/text-to-speech/{}",
            self.voice_id
        );

        let response = self
            .client
            .post(&url)
            .header("Accept", "audio/mpeg")
            .header("xi-api-key", api_key)
            .json(&json!({
                "text": text,
                "model_id": MODEL_ID,
                "voice_settings": {
                    "stability": 0.5,
                    "similarity_boost": 0.5
                }
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status));
        }

        let audio = response.bytes().await?;
        playback::play_audio_bytes(&audio).await
    }
}
