//! Configuration for cch hooks.
//!
//! Two sources feed hook behavior:
//! - a `.env` file discovered by walking up from the working directory
//!   (provider API keys, voice selectors, the engineer name), and
//! - `.claude/settings.local.json` (user-level toggles such as
//!   `tts_enabled`).
//!
//! Both are loaded once at process start into immutable values that the
//! entry points thread through explicitly. Nothing here mutates the
//! process environment.

pub mod dotenv;
pub mod settings;

pub use dotenv::EnvContext;
pub use settings::LocalSettings;

#[cfg(test)]
pub(crate) fn env_test_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}
