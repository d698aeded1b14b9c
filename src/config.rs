//! Configuration for the Ember client
//!
//! Centralized configuration with sensible defaults.

/// Configuration for a client session
///
/// The defaults enforce no explicit socket timeouts: every operation blocks
/// until the full response is read or the connection fails, relying on
/// OS-level TCP defaults.
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Socket Configuration
    // -------------------------------------------------------------------------
    /// Read timeout in milliseconds (0 = no timeout)
    pub read_timeout_ms: u64,

    /// Write timeout in milliseconds (0 = no timeout)
    pub write_timeout_ms: u64,

    /// Disable Nagle's algorithm for low latency
    pub nodelay: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            read_timeout_ms: 0,
            write_timeout_ms: 0,
            nodelay: true,
        }
    }
}
