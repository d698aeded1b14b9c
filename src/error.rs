//! Error types for the Ember client
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using EmberError
pub type Result<T> = std::result::Result<T, EmberError>;

/// Unified error type for Ember client operations
#[derive(Debug, Error)]
pub enum EmberError {
    // -------------------------------------------------------------------------
    // Transport Errors (recovered locally by the reconnect protocol)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Could not connect to server")]
    UnreachableServer,

    #[error("Maximum reconnect attempts reached")]
    MaxReconnectAttempts,

    // -------------------------------------------------------------------------
    // Codec Errors (stream desynchronization, treated as transport failures)
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Codec(String),

    // -------------------------------------------------------------------------
    // Session Errors (server-reported, never retried past the reconnect cycle)
    // -------------------------------------------------------------------------
    #[error("Max connections exceeded")]
    MaxConnectionsExceeded,

    #[error("Unauthorized")]
    Unauthorized,

    // -------------------------------------------------------------------------
    // Cache Domain Errors (server-reported, never retried)
    // -------------------------------------------------------------------------
    #[error("Key not found")]
    KeyNotFound,

    #[error("Zero value size")]
    ZeroValueSize,

    #[error("Exceeding value size")]
    ExceedingValueSize,

    #[error("Zero cache size")]
    ZeroCacheSize,

    #[error("Unconfigured policy")]
    UnconfiguredPolicy,

    #[error("Invalid policy")]
    InvalidPolicy,

    #[error("Internal server error")]
    Internal,
}

impl EmberError {
    /// Whether this error indicates a broken or desynchronized connection.
    ///
    /// Transport-class failures are the only ones the reconnect protocol
    /// recovers from; server-reported errors would fail identically on a
    /// fresh connection and are surfaced verbatim.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            EmberError::Io(_) | EmberError::UnreachableServer | EmberError::Codec(_)
        )
    }

    /// Map a session-level wire code (the error category byte when non-zero)
    /// to an error.
    pub fn from_session_code(code: u8) -> Self {
        match code {
            2 => EmberError::MaxConnectionsExceeded,
            3 => EmberError::Unauthorized,
            _ => EmberError::Internal,
        }
    }

    /// Map a cache-domain sub-code (the byte following a zero category byte)
    /// to an error.
    pub fn from_cache_code(code: u8) -> Self {
        match code {
            1 => EmberError::KeyNotFound,
            2 => EmberError::ZeroValueSize,
            3 => EmberError::ExceedingValueSize,
            4 => EmberError::ZeroCacheSize,
            5 => EmberError::UnconfiguredPolicy,
            6 => EmberError::InvalidPolicy,
            _ => EmberError::Internal,
        }
    }
}
