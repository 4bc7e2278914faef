//! Shared error type across exposit crates.

use thiserror::Error;

/// Stable error codes (used in logs and tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A metric with the same name is already registered.
    DuplicateName,
    /// Negative/NaN amount or malformed metric name.
    InvalidArgument,
    /// The metric handle is already owned by a registry.
    AlreadyRegistered,
    /// Configuration could not be read or failed validation.
    BadConfig,
    /// Internal server error.
    Internal,
}

impl ErrorCode {
    /// String representation used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::DuplicateName => "DUPLICATE_NAME",
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::AlreadyRegistered => "ALREADY_REGISTERED",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ExpositError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum ExpositError {
    #[error("duplicated timeseries in registry: {0}")]
    DuplicateName(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("metric already registered: {0}")]
    AlreadyRegistered(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl ExpositError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            ExpositError::DuplicateName(_) => ErrorCode::DuplicateName,
            ExpositError::InvalidArgument(_) => ErrorCode::InvalidArgument,
            ExpositError::AlreadyRegistered(_) => ErrorCode::AlreadyRegistered,
            ExpositError::BadConfig(_) => ErrorCode::BadConfig,
            ExpositError::Internal(_) => ErrorCode::Internal,
        }
    }
}
