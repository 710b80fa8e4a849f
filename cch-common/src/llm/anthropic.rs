//! Anthropic messages adapter.

use super::{completion_prompt, CompletionError, CompletionProvider, PROVIDER_TIMEOUT};
use crate::config::EnvContext;
use reqwest::Client;
use serde_json::json;

const MODEL: &str = "claude-3-haiku-20240307";
const MAX_TOKENS: u32 = 50;
const API_VERSION: &str = "2023-06-01";

/// Second completion tier. Requires `ANTHROPIC_API_KEY`.
pub struct AnthropicCompletion {
    api_key: Option<String>,
    client: Client,
}

impl AnthropicCompletion {
    pub fn from_env(env: &EnvContext) -> Self {
        Self {
            api_key: env.get("ANTHROPIC_API_KEY").filter(|k| !k.is_empty()),
            client: Client::builder()
                .timeout(PROVIDER_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }
}

impl CompletionProvider for AnthropicCompletion {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, tool_name: Option<&str>) -> Result<String, CompletionError> {
        let api_key = self.api_key.as_deref().unwrap_or_default();

        let response = self
            .client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&json!({
                "model": MODEL,
                "max_tokens": MAX_TOKENS,
                "messages": [
                    { "role": "user", "content": completion_prompt(tool_name) }
                ]
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompletionError::Status(status));
        }

        let body: serde_json::Value = response.json().await?;
        let message = body["content"][0]["text"]
            .as_str()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(CompletionError::EmptyResponse)?;
        Ok(message)
    }
}
