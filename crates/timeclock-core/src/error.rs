//! Core error types for timeclock-core.
//!
//! Every error here is recoverable at tick granularity: the caller logs
//! it, treats the current evaluation as a no-op, and retries on the next
//! scheduled tick.

use std::path::PathBuf;

use chrono::NaiveTime;
use thiserror::Error;

/// Umbrella error type for timeclock-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Decision engine / calculator errors
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// Ledger and jitter store errors
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced by the decision engine and checkout calculator.
///
/// Any of these means the punch history (or a raw clock string) could
/// not be trusted; the engine never guesses around them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Clock string did not parse as `HH:MM` or `HH:MM:SS`
    #[error("unparseable clock time '{raw}'")]
    Parse { raw: String },

    /// Punch times are not strictly increasing
    #[error("punches out of order: {earlier} is not before {later}")]
    Ordering {
        earlier: NaiveTime,
        later: NaiveTime,
    },

    /// Punch count/kind composition does not match any valid day state
    #[error("inconsistent punch history: {0}")]
    StateInconsistency(String),
}

/// Errors from the punch ledger and jitter store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Store file could not be read
    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store file could not be written
    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store file exists but does not deserialize
    #[error("malformed store file {path}: {message}")]
    Malformed { path: PathBuf, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Dot-path key does not exist
    #[error("unknown configuration key: {0}")]
    UnknownKey(String),

    /// Value does not fit the key's type
    #[error("invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
