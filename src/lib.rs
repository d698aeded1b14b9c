//! # Ember Client
//!
//! A blocking client for the Ember in-memory cache server, with:
//! - A hand-specified little-endian binary wire protocol
//! - Transparent bounded-retry reconnection with auth replay
//! - A round-robin pool of lockable connections for concurrent callers
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Pool                                 │
//! │         (N lockable clients, round-robin dispatch)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Client                                 │
//! │     (opcode methods, envelope decode, reconnect loop)        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ Frame Codec │          │  Transport  │
//!   │ (encode/    │          │ (one TCP    │
//!   │  decode)    │          │  connection)│
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use ember_client::Client;
//!
//! # fn main() -> ember_client::Result<()> {
//! let mut client = Client::connect("ember://127.0.0.1:7690")?;
//!
//! client.set("key", "value", 0)?;
//! assert_eq!(client.get("key")?, "value");
//!
//! client.disconnect()?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;

pub mod client;
pub mod network;
pub mod pool;
pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use client::{Client, ADDR_SCHEME};
pub use config::Config;
pub use error::{EmberError, Result};
pub use pool::{LockableClient, Pool};
pub use protocol::Status;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the Ember client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
