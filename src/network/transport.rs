//! Transport
//!
//! Owns a single TCP connection: blocking send of an encoded frame and
//! direct stream access for reads. Any I/O failure is surfaced to the
//! caller as a plain transport failure; the transport does not distinguish
//! error subtypes.

use std::io::Write;
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use crate::config::Config;
use crate::error::{EmberError, Result};

/// A single client connection to the cache server
pub struct Transport {
    stream: TcpStream,
}

impl Transport {
    /// Resolve `host:port` and open exactly one TCP connection
    ///
    /// Applies the socket options from `config`: nodelay and optional
    /// read/write timeouts (0 leaves the OS defaults in place).
    pub fn connect(addr: &str, config: &Config) -> Result<Self> {
        let stream = TcpStream::connect(addr).map_err(|err| {
            tracing::debug!("connect to {} failed: {}", addr, err);
            EmberError::UnreachableServer
        })?;

        stream.set_nodelay(config.nodelay)?;

        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }
        if config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
        }

        tracing::debug!("connected to {}", addr);

        Ok(Self { stream })
    }

    /// Write the full frame to the socket
    pub fn send(&mut self, frame: &[u8]) -> Result<()> {
        self.stream.write_all(frame)?;
        self.stream.flush()?;
        Ok(())
    }

    /// The underlying stream, for blocking reads
    pub fn stream(&mut self) -> &mut TcpStream {
        &mut self.stream
    }

    /// Close the connection
    pub fn disconnect(self) -> Result<()> {
        self.stream.shutdown(Shutdown::Both)?;
        Ok(())
    }
}
