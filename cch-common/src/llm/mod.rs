//! Short completion-phrase generation with a cascading fallback.
//!
//! Remote providers are asked for a one-line status phrase; when both are
//! unconfigured or fail, a static pool supplies the answer. The result is
//! always a non-empty string and the invoking hook never sees a failure.

pub mod anthropic;
pub mod openai;

pub use anthropic::AnthropicCompletion;
pub use openai::OpenAiCompletion;

use crate::config::EnvContext;
use rand::Rng;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Uniform per-provider timeout.
pub const PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Static phrase pool used when every remote tier is exhausted.
pub const FALLBACK_MESSAGES: &[&str] = &[
    "Task completed successfully!",
    "All done! Ready for next task.",
    "Execution finished. Standing by.",
    "Task wrapped up nicely.",
    "Ready for your next request!",
];

/// Failure modes of one completion attempt.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("provider returned an empty message")]
    EmptyResponse,
}

/// One text-generation provider in the cascade.
pub trait CompletionProvider {
    fn name(&self) -> &'static str;

    /// Whether the provider has the credentials it needs.
    fn is_configured(&self) -> bool;

    /// Produce a short completion phrase.
    fn complete(
        &self,
        tool_name: Option<&str>,
    ) -> impl Future<Output = Result<String, CompletionError>>;
}

/// The production provider chain, in priority order.
pub enum CompletionTier {
    OpenAi(OpenAiCompletion),
    Anthropic(AnthropicCompletion),
}

impl CompletionProvider for CompletionTier {
    fn name(&self) -> &'static str {
        match self {
            CompletionTier::OpenAi(p) => p.name(),
            CompletionTier::Anthropic(p) => p.name(),
        }
    }

    fn is_configured(&self) -> bool {
        match self {
            CompletionTier::OpenAi(p) => p.is_configured(),
            CompletionTier::Anthropic(p) => p.is_configured(),
        }
    }

    async fn complete(&self, tool_name: Option<&str>) -> Result<String, CompletionError> {
        match self {
            CompletionTier::OpenAi(p) => p.complete(tool_name).await,
            CompletionTier::Anthropic(p) => p.complete(tool_name).await,
        }
    }
}

/// Builds the instruction sent to every remote provider.
///
/// The word cap is requested in the prompt, not enforced on the reply.
pub(crate) fn completion_prompt(tool_name: Option<&str>) -> String {
    let mut prompt =
        String::from("Generate a brief, friendly completion message for a coding assistant. ");
    if let Some(tool) = tool_name {
        prompt.push_str(&format!("The last tool used was {tool}. "));
    }
    prompt.push_str("Keep it under 10 words, professional but encouraging.");
    prompt
}

/// Orchestrates the completion cascade.
pub struct CompletionGenerator {
    providers: Vec<CompletionTier>,
}

impl CompletionGenerator {
    /// Standard chain (OpenAI, then Anthropic) from the resolved
    /// environment.
    pub fn from_env(env: &EnvContext) -> Self {
        Self {
            providers: vec![
                CompletionTier::OpenAi(OpenAiCompletion::from_env(env)),
                CompletionTier::Anthropic(AnthropicCompletion::from_env(env)),
            ],
        }
    }

    /// Generate a completion phrase, falling back to the static pool.
    pub async fn generate(&self, tool_name: Option<&str>) -> String {
        self.generate_with_rng(tool_name, &mut rand::rng()).await
    }

    /// As [`generate`](Self::generate), with an explicit randomness source
    /// for the pool pick.
    pub async fn generate_with_rng<R: Rng>(&self, tool_name: Option<&str>, rng: &mut R) -> String {
        if let Some(message) =
            run_cascade(&self.providers, tool_name, PROVIDER_TIMEOUT).await
        {
            return message;
        }
        fallback_message(rng)
    }
}

/// Uniform random pick from the static pool.
pub fn fallback_message<R: Rng>(rng: &mut R) -> String {
    FALLBACK_MESSAGES[rng.random_range(0..FALLBACK_MESSAGES.len())].to_string()
}

async fn run_cascade<P: CompletionProvider>(
    providers: &[P],
    tool_name: Option<&str>,
    limit: Duration,
) -> Option<String> {
    for provider in providers {
        if !provider.is_configured() {
            debug!("completion provider {} unconfigured, skipping", provider.name());
            continue;
        }
        match timeout(limit, provider.complete(tool_name)).await {
            Ok(Ok(message)) => {
                let message = message.trim().to_string();
                if !message.is_empty() {
                    return Some(message);
                }
                warn!("completion provider {} returned empty text", provider.name());
            }
            Ok(Err(e)) => warn!("completion provider {} failed: {}", provider.name(), e),
            Err(_) => warn!(
                "completion provider {} timed out after {:?}",
                provider.name(),
                limit
            ),
        }
    }
    None
}
