//! OpenAI speech synthesis adapter.

use super::{playback, ProviderError, Speaker, PROVIDER_TIMEOUT};
use crate::config::EnvContext;
use reqwest::Client;
use serde_json::json;

const DEFAULT_VOICE: &str = "alloy";
const MODEL: &str = "tts-1";

/// Second tier of the cascade. Requires `OPENAI_API_KEY`; voice is
/// selectable via `OPENAI_TTS_VOICE`.
pub struct OpenAiTts {
    api_key: Option<String>,
    voice: String,
    client: Client,
}

impl OpenAiTts {
    pub fn from_env(env: &EnvContext) -> Self {
        Self {
            api_key: env.get("OPENAI_API_KEY").filter(|k| !k.is_empty()),
            voice: env.get_or("OPENAI_TTS_VOICE", DEFAULT_VOICE),
            client: Client::builder()
                .timeout(PROVIDER_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }
}

impl Speaker for OpenAiTts {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn speak(&self, text: &str) -> Result<(), ProviderError> {
        let api_key = self.api_key.as_deref().unwrap_or_default();

        let response = self
            .client
            .post("https://api.openai.com/v1/audio/speech")
            .bearer_auth(api_key)
            .json(&json!({
                "model": MODEL,
                "voice": self.voice,
                "input": text
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
