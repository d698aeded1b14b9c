//! Protocol client
//!
//! One method per cache operation. Each call encodes the opcode and its
//! arguments, sends the frame, and decodes the response envelope. On a
//! transport or decode failure the client transparently reconnects (up to a
//! fixed attempt cap), replays the recorded auth token if one exists, and
//! retries the request; the caller only sees an error once the cap is
//! exceeded or the server reports one.
//!
//! The protocol is strictly half-duplex: a second request must not be sent
//! until the prior response has been fully consumed, so a client instance
//! requires exclusive access for the duration of each call.

use std::net::TcpStream;

use crate::config::Config;
use crate::error::{EmberError, Result};
use crate::network::Transport;
use crate::protocol::{read_envelope, read_error, FrameReader, FrameWriter, Opcode, Status};

/// URI scheme prefix accepted in server addresses
pub const ADDR_SCHEME: &str = "ember://";

/// Maximum consecutive reconnect attempts before a call fails terminally
const MAX_RECONNECT_ATTEMPTS: u32 = 3;

/// A single blocking session with the cache server
pub struct Client {
    /// Resolved `host:port` target, kept for reconnection
    addr: String,

    config: Config,

    /// Last-used auth token, replayed transparently after reconnect
    auth_token: Option<String>,

    /// Consecutive failed reconnect attempts; 0 while the session is healthy
    reconnect_attempts: u32,

    /// Current connection, replaced wholesale on reconnect
    transport: Transport,
}

impl Client {
    /// Connect to an `ember://host:port` address with default configuration
    ///
    /// The session is verified with a ping before it is returned; a client
    /// that could not complete a full round trip is never handed out.
    pub fn connect(addr: &str) -> Result<Self> {
        Self::connect_with_config(addr, Config::default())
    }

    /// Connect with explicit configuration
    pub fn connect_with_config(addr: &str, config: Config) -> Result<Self> {
        let addr = parse_addr(addr)?;
        let transport = Transport::connect(&addr, &config)?;

        let mut client = Self {
            addr,
            config,
            auth_token: None,
            reconnect_attempts: 0,
            transport,
        };

        client.ping()?;

        Ok(client)
    }

    /// Close the session
    pub fn disconnect(self) -> Result<()> {
        self.transport.disconnect()
    }

    /// Health check; the server answers `"pong"`
    pub fn ping(&mut self) -> Result<String> {
        let frame = FrameWriter::for_opcode(Opcode::Ping);
        self.call(&frame, |reader| reader.read_string())
    }

    /// Server version string
    pub fn version(&mut self) -> Result<String> {
        let frame = FrameWriter::for_opcode(Opcode::Version);
        self.call(&frame, |reader| reader.read_string())
    }

    /// Authenticate the session
    ///
    /// The token is recorded and replayed automatically if the client has to
    /// reconnect later.
    pub fn auth(&mut self, token: &str) -> Result<String> {
        self.auth_token = Some(token.to_string());

        let mut frame = FrameWriter::for_opcode(Opcode::Auth);
        frame.write_string(token);

        self.call(&frame, |reader| reader.read_string())
    }

    /// Fetch a value; a missing key is a `KeyNotFound` error
    pub fn get(&mut self, key: &str) -> Result<String> {
        let mut frame = FrameWriter::for_opcode(Opcode::Get);
        frame.write_string(key);

        self.call(&frame, |reader| reader.read_string())
    }

    /// Store a value with a TTL in seconds (0 = no expiry)
    pub fn set(&mut self, key: &str, value: &str, ttl: u32) -> Result<String> {
        let mut frame = FrameWriter::for_opcode(Opcode::Set);
        frame.write_string(key);
        frame.write_string(value);
        frame.write_u32(ttl);

        self.call(&frame, |reader| reader.read_string())
    }

    /// Delete a key
    pub fn del(&mut self, key: &str) -> Result<String> {
        let mut frame = FrameWriter::for_opcode(Opcode::Del);
        frame.write_string(key);

        self.call(&frame, |reader| reader.read_string())
    }

    /// Whether a key exists; a missing key is a successful `false`, not an
    /// error
    pub fn has(&mut self, key: &str) -> Result<bool> {
        let mut frame = FrameWriter::for_opcode(Opcode::Has);
        frame.write_string(key);

        self.call(&frame, |reader| reader.read_bool())
    }

    /// Fetch a value without touching its eviction-policy standing
    pub fn peek(&mut self, key: &str) -> Result<String> {
        let mut frame = FrameWriter::for_opcode(Opcode::Peek);
        frame.write_string(key);

        self.call(&frame, |reader| reader.read_string())
    }

    /// Update a key's TTL in seconds (0 = no expiry)
    pub fn ttl(&mut self, key: &str, ttl: u32) -> Result<String> {
        let mut frame = FrameWriter::for_opcode(Opcode::Ttl);
        frame.write_string(key);
        frame.write_u32(ttl);

        self.call(&frame, |reader| reader.read_string())
    }

    /// Byte size of a key's value
    pub fn size(&mut self, key: &str) -> Result<u32> {
        let mut frame = FrameWriter::for_opcode(Opcode::Size);
        frame.write_string(key);

        self.call(&frame, |reader| reader.read_u32())
    }

    /// Remove every object from the cache
    pub fn wipe(&mut self) -> Result<String> {
        let frame = FrameWriter::for_opcode(Opcode::Wipe);
        self.call(&frame, |reader| reader.read_string())
    }

    /// Change the cache's maximum size in bytes
    pub fn resize(&mut self, size: u64) -> Result<String> {
        let mut frame = FrameWriter::for_opcode(Opcode::Resize);
        frame.write_u64(size);

        self.call(&frame, |reader| reader.read_string())
    }

    /// Change the active eviction policy
    pub fn policy(&mut self, policy: &str) -> Result<String> {
        let mut frame = FrameWriter::for_opcode(Opcode::Policy);
        frame.write_string(policy);

        self.call(&frame, |reader| reader.read_string())
    }

    /// Fetch the server status record
    pub fn status(&mut self) -> Result<Status> {
        let frame = FrameWriter::for_opcode(Opcode::Status);
        self.call(&frame, |reader| Status::from_reader(reader))
    }

    /// Send a request and decode its response, reconnecting on transport
    /// failure
    ///
    /// Transport-class failures (send error, short read, desynchronized
    /// stream) drive the reconnect protocol and then retry the same encoded
    /// frame from the top. Server-reported errors are returned verbatim:
    /// retrying them would fail identically. Any completed exchange, ok or
    /// not, marks the session healthy again.
    fn call<T>(
        &mut self,
        frame: &FrameWriter,
        decode: impl Fn(&mut FrameReader<'_, TcpStream>) -> Result<T>,
    ) -> Result<T> {
        loop {
            match self.exchange(frame.as_bytes(), &decode) {
                Ok(value) => {
                    self.reconnect_attempts = 0;
                    return Ok(value);
                }
                Err(err) if err.is_transport() => {
                    tracing::debug!("request failed on {}: {}", self.addr, err);
                    self.reconnect()?;
                }
                Err(err) => {
                    self.reconnect_attempts = 0;
                    return Err(err);
                }
            }
        }
    }

    /// One send/decode cycle on the current transport
    fn exchange<T>(
        &mut self,
        frame: &[u8],
        decode: &impl Fn(&mut FrameReader<'_, TcpStream>) -> Result<T>,
    ) -> Result<T> {
        self.transport.send(frame)?;

        let mut reader = FrameReader::new(self.transport.stream());

        if read_envelope(&mut reader)? {
            decode(&mut reader)
        } else {
            Err(read_error(&mut reader)?)
        }
    }

    /// The reconnect protocol: a bounded loop over fresh connections
    ///
    /// Each iteration opens a new transport to the stored address and, if a
    /// token was recorded, replays auth before the session resumes.
    /// Intermediate failures are not surfaced; the caller sees
    /// `MaxReconnectAttempts` only once the cap is exceeded, after which the
    /// counter resets so a later call starts counting at 1 again. An
    /// `Unauthorized` replay means the token went stale and aborts
    /// immediately rather than looping.
    fn reconnect(&mut self) -> Result<()> {
        loop {
            self.reconnect_attempts += 1;

            if self.reconnect_attempts > MAX_RECONNECT_ATTEMPTS {
                tracing::warn!(
                    "giving up on {} after {} reconnect attempts",
                    self.addr,
                    MAX_RECONNECT_ATTEMPTS
                );
                self.reconnect_attempts = 0;
                return Err(EmberError::MaxReconnectAttempts);
            }

            tracing::debug!(
                "reconnecting to {} (attempt {}/{})",
                self.addr,
                self.reconnect_attempts,
                MAX_RECONNECT_ATTEMPTS
            );

            match Transport::connect(&self.addr, &self.config) {
                Ok(transport) => self.transport = transport,
                Err(err) => {
                    tracing::debug!("reconnect to {} failed: {}", self.addr, err);
                    continue;
                }
            }

            match self.replay_auth() {
                Ok(()) => {
                    self.reconnect_attempts = 0;
                    return Ok(());
                }
                Err(err) if err.is_transport() => {
                    tracing::debug!("auth replay on {} failed: {}", self.addr, err);
                    continue;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Re-authenticate a fresh connection with the recorded token, if any
    fn replay_auth(&mut self) -> Result<()> {
        let Some(token) = self.auth_token.clone() else {
            return Ok(());
        };

        let mut frame = FrameWriter::for_opcode(Opcode::Auth);
        frame.write_string(&token);

        self.exchange(frame.as_bytes(), &|reader: &mut FrameReader<'_, TcpStream>| {
            reader.read_string()
        })?;

        tracing::debug!("replayed auth on {} after reconnect", self.addr);

        Ok(())
    }
}

/// Strip the `ember://` scheme off an address, leaving `host:port`
fn parse_addr(addr: &str) -> Result<String> {
    match addr.strip_prefix(ADDR_SCHEME) {
        Some(host_port) if !host_port.is_empty() => Ok(host_port.to_string()),
        _ => Err(EmberError::InvalidAddress(addr.to_string())),
    }
}
