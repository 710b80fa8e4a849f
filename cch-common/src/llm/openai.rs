//! OpenAI chat-completion adapter.

use super::{completion_prompt, CompletionError, CompletionProvider, PROVIDER_TIMEOUT};
use crate::config::EnvContext;
use reqwest::Client;
use serde_json::json;

const MODEL: &str = "gpt-3.5-turbo";
const MAX_TOKENS: u32 = 50;
const SYSTEM_PROMPT: &str =
    "You are a helpful coding assistant that generates brief completion messages.";

/// First completion tier. Requires `OPENAI_API_KEY`.
pub struct OpenAiCompletion {
    api_key: Option<String>,
    client: Client,
}

impl OpenAiCompletion {
    pub fn from_env(env: &EnvContext) -> Self {
        Self {
            api_key: env.get("OPENAI_API_KEY").filter(|k| !k.is_empty()),
            client: Client::builder()
                .timeout(PROVIDER_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }
}

impl CompletionProvider for OpenAiCompletion {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, tool_name: Option<&str>) -> Result<String, CompletionError> {
        let api_key = self.api_key.as_deref().unwrap_or_default();

        let response = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(api_key)
            .json(&json!({
                "model": MODEL,
                "messages": [
                    { "role": "system", "content": SYSTEM_PROMPT },
                    { "role": "user", "content": completion_prompt(tool_name) }
                ],
                "max_tokens": MAX_TOKENS,
                "temperature": 0.7
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompletionError::Status(status));
        }

        let body: serde_json::Value = response.json().await?;
        let message = body["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(CompletionError::EmptyResponse)?;
        Ok(message)
    }
}
