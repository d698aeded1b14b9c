//! Connection pool
//!
//! Holds N independent client sessions against the same server, each behind
//! its own exclusive lock, and dispatches callers to members in round-robin
//! order. Per-member locking serializes the half-duplex request/response
//! protocol on each connection while allowing full concurrency across
//! members; the dispatch index is the only state touched without a member
//! lock and advances with a single atomic increment.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::{Mutex, MutexGuard};

use crate::client::Client;
use crate::config::Config;
use crate::error::Result;

/// A pooled client behind its own exclusive lock
///
/// The caller must hold the lock for its entire request sequence, including
/// any reconnect retries those requests trigger.
pub struct LockableClient {
    inner: Mutex<Client>,
}

impl LockableClient {
    /// Acquire exclusive access to the underlying client, blocking until it
    /// is free
    pub fn lock(&self) -> MutexGuard<'_, Client> {
        self.inner.lock()
    }
}

/// A round-robin pool of independent client sessions
pub struct Pool {
    members: Vec<LockableClient>,
    index: AtomicUsize,
}

impl Pool {
    /// Establish `size` independent sessions against the same address
    ///
    /// All-or-nothing: if any single connection fails, the pool is not
    /// created and the already-opened sessions are dropped.
    pub fn connect(addr: &str, size: u32) -> Result<Self> {
        Self::connect_with_config(addr, size, Config::default())
    }

    /// Establish a pool with explicit configuration
    pub fn connect_with_config(addr: &str, size: u32, config: Config) -> Result<Self> {
        let mut members = Vec::with_capacity(size as usize);

        for _ in 0..size {
            let client = Client::connect_with_config(addr, config.clone())?;

            members.push(LockableClient {
                inner: Mutex::new(client),
            });
        }

        tracing::debug!("pool of {} clients connected to {}", size, addr);

        Ok(Self {
            members,
            index: AtomicUsize::new(0),
        })
    }

    /// The next pool member in round-robin order
    ///
    /// Does not block and does not acquire the member's lock; the caller is
    /// responsible for locking it before issuing requests.
    pub fn lockable_client(&self) -> &LockableClient {
        let index = self.index.fetch_add(1, Ordering::Relaxed) % self.members.len();
        &self.members[index]
    }

    /// Number of pooled sessions
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Authenticate every pooled member serially
    ///
    /// Each member records the token, so a later reconnect on any of them
    /// replays it automatically.
    pub fn auth(&self, token: &str) -> Result<()> {
        for member in &self.members {
            member.lock().auth(token)?;
        }

        Ok(())
    }

    /// Disconnect every member, consuming the pool
    pub fn disconnect(self) -> Result<()> {
        for member in self.members {
            member.inner.into_inner().disconnect()?;
        }

        Ok(())
    }
}
