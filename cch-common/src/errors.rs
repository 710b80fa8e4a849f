//! Error definitions shared across cch components.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a hook with the generic failure code.
///
/// Provider failures (TTS, completion) are deliberately *not* here: the
/// cascades swallow them and fall through to the next tier.
#[derive(Debug, Error)]
pub enum HookError {
    /// Log records could not be serialized.
    #[error("failed to serialize log records: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Log file could not be written.
    #[error("failed to write log file {path}: {source}")]
    LogWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic I/O failure in a hook side task.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
