//! Shared error type across promsynth crates.

use thiserror::Error;

/// Stable error codes (logged at startup, asserted by tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Unknown metric kind string.
    InvalidKind,
    /// Negative instrument count.
    InvalidCount,
    /// Zero or negative refresh interval.
    InvalidInterval,
    /// Metric name or label violates the exposition grammar.
    InvalidName,
    /// Same full name registered twice.
    Duplicate,
    /// Malformed or unreadable configuration.
    Config,
    /// Internal invariant violated.
    Internal,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidKind => "INVALID_KIND",
            ErrorCode::InvalidCount => "INVALID_COUNT",
            ErrorCode::InvalidInterval => "INVALID_INTERVAL",
            ErrorCode::InvalidName => "INVALID_NAME",
            ErrorCode::Duplicate => "DUPLICATE",
            ErrorCode::Config => "CONFIG",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, SynthError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("invalid metric type: {0} (expected counter, gauge, histogram, summary or all)")]
    InvalidKind(String),
    #[error("metric count must be >= 0, got {0}")]
    NegativeCount(i64),
    #[error("refresh interval must be between 1 and 86400 seconds, got {0}")]
    InvalidInterval(i64),
    #[error("invalid metric name: {0}")]
    InvalidName(String),
    #[error("invalid label: {0}")]
    InvalidLabel(String),
    #[error("duplicate instrument: {0}")]
    DuplicateInstrument(String),
    #[error("config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl SynthError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SynthError::InvalidKind(_) => ErrorCode::InvalidKind,
            SynthError::NegativeCount(_) => ErrorCode::InvalidCount,
            SynthError::InvalidInterval(_) => ErrorCode::InvalidInterval,
            SynthError::InvalidName(_) | SynthError::InvalidLabel(_) => ErrorCode::InvalidName,
            SynthError::DuplicateInstrument(_) => ErrorCode::Duplicate,
            SynthError::Config(_) => ErrorCode::Config,
            SynthError::Internal(_) => ErrorCode::Internal,
        }
    }
}
