//! Text-to-speech dispatch with a cascading provider fallback.
//!
//! Providers are tried strictly in order; the first success wins and
//! there are no retries within a provider. An unconfigured provider is a
//! skip, not a failure. Every attempt runs under the same timeout, and
//! nothing in here can fail the invoking hook: the worst case is a
//! [`TtsOutcome`] with `success: false`.

pub mod elevenlabs;
pub mod openai;
pub mod playback;
pub mod system;

pub use elevenlabs::ElevenLabsTts;
pub use openai::OpenAiTts;
pub use system::SystemTts;

use crate::config::EnvContext;
use crate::types::TtsOutcome;
use rand::Rng;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Uniform per-attempt timeout across the cascade.
pub const PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Chance that a known addressee name is prefixed onto the message.
pub const NAME_PREFIX_PROBABILITY: f64 = 0.3;

/// Failure modes of one provider attempt. Never escalated past the
/// dispatcher; recorded as a diagnostic and the chain advances.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("audio playback failed: {0}")]
    Playback(String),

    #[error("no system synthesizer available")]
    NoSynthesizer,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One speech provider in the cascade.
pub trait Speaker {
    /// Short provider label used in outcomes and diagnostics.
    fn name(&self) -> &'static str;

    /// Whether the provider has the credentials it needs. Unconfigured
    /// providers are skipped without counting as failures.
    fn is_configured(&self) -> bool;

    /// Render `text` as audio and play it to completion.
    fn speak(&self, text: &str) -> impl Future<Output = Result<(), ProviderError>>;
}

/// The production provider chain, in priority order.
pub enum TtsProvider {
    ElevenLabs(ElevenLabsTts),
    OpenAi(OpenAiTts),
    System(SystemTts),
}

impl Speaker for TtsProvider {
    fn name(&self) -> &'static str {
        match self {
            TtsProvider::ElevenLabs(p) => p.name(),
            TtsProvider::OpenAi(p) => p.name(),
            TtsProvider::System(p) => p.name(),
        }
    }

    fn is_configured(&self) -> bool {
        match self {
            TtsProvider::ElevenLabs(p) => p.is_configured(),
            TtsProvider::OpenAi(p) => p.is_configured(),
            TtsProvider::System(p) => p.is_configured(),
        }
    }

    async fn speak(&self, text: &str) -> Result<(), ProviderError> {
        match self {
            TtsProvider::ElevenLabs(p) => p.speak(text).await,
            TtsProvider::OpenAi(p) => p.speak(text).await,
            TtsProvider::System(p) => p.speak(text).await,
        }
    }
}

/// Orchestrates the provider cascade and message personalization.
pub struct TtsDispatcher {
    providers: Vec<TtsProvider>,
    engineer_name: Option<String>,
}

impl TtsDispatcher {
    /// Build the standard chain (ElevenLabs, OpenAI, system synthesis)
    /// from the resolved environment.
    pub fn from_env(env: &EnvContext) -> Self {
        Self {
            providers: vec![
                TtsProvider::ElevenLabs(ElevenLabsTts::from_env(env)),
                TtsProvider::OpenAi(OpenAiTts::from_env(env)),
                TtsProvider::System(SystemTts::new()),
            ],
            engineer_name: env.get("ENGINEER_NAME").filter(|n| !n.is_empty()),
        }
    }

    /// Speak `text`, personalizing with the process-global RNG.
    pub async fn dispatch(&self, text: &str) -> TtsOutcome {
        self.dispatch_with_rng(text, &mut rand::rng()).await
    }

    /// Speak `text` with an explicit randomness source.
    ///
    /// The RNG decides only whether the addressee name is prefixed; it is
    /// injectable so tests can force both branches.
    pub async fn dispatch_with_rng<R: Rng>(&self, text: &str, rng: &mut R) -> TtsOutcome {
        let message = personalize(text, self.engineer_name.as_deref(), rng);
        let (provider, success) = run_cascade(&self.providers, &message, PROVIDER_TIMEOUT).await;
        TtsOutcome {
            provider,
            success,
            message,
        }
    }
}

/// Prefix the addressee name with fixed probability when one is known.
pub fn personalize<R: Rng>(text: &str, name: Option<&str>, rng: &mut R) -> String {
    match name {
        Some(name) if !name.is_empty() && rng.random::<f64>() < NAME_PREFIX_PROBABILITY => {
            format!("{name}, {text}")
        }
        _ => text.to_string(),
    }
}

/// Try each provider in order under a uniform timeout.
///
/// Returns the name of the provider that succeeded, if any.
async fn run_cascade<S: Speaker>(
    providers: &[S],
    text: &str,
    limit: Duration,
) -> (Option<String>, bool) {
    for provider in providers {
        if !provider.is_configured() {
            debug!("tts provider {} unconfigured, skipping", provider.name());
            continue;
        }
        match timeout(limit, provider.speak(text)).await {
            Ok(Ok(())) => return (Some(provider.name().to_string()), true),
            Ok(Err(e)) => warn!("tts provider {} failed: {}", provider.name(), e),
            Err(_) => warn!("tts provider {} timed out after {:?}", provider.name(), limit),
        }
    }
    (None, false)
}
