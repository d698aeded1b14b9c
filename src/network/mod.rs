//! Network Module
//!
//! Blocking TCP transport for the client.

mod transport;

pub use transport::Transport;
