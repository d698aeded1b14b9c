//! Server status record
//!
//! The status response carries a fixed sequence of fields; the decode order
//! below is part of the wire contract and must not be reordered.

use std::io::Read;

use crate::error::Result;

use super::FrameReader;

/// A snapshot of the cache server's state
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pid: u32,

    max_size: u64,
    used_size: u64,
    num_objects: u64,

    rss: u64,
    hwm: u64,

    total_gets: u64,
    total_sets: u64,
    total_dels: u64,

    miss_ratio: f64,

    policies: Vec<String>,
    policy: String,
    is_auto_policy: bool,

    uptime: u64,
}

impl Status {
    /// Decode a status record in wire field order
    pub fn from_reader<R: Read>(reader: &mut FrameReader<'_, R>) -> Result<Self> {
        let pid = reader.read_u32()?;

        let max_size = reader.read_u64()?;
        let used_size = reader.read_u64()?;
        let num_objects = reader.read_u64()?;

        let rss = reader.read_u64()?;
        let hwm = reader.read_u64()?;

        let total_gets = reader.read_u64()?;
        let total_sets = reader.read_u64()?;
        let total_dels = reader.read_u64()?;

        let miss_ratio = reader.read_f64()?;

        let num_policies = reader.read_u32()?;
        let mut policies = Vec::with_capacity(num_policies as usize);

        for _ in 0..num_policies {
            policies.push(reader.read_string()?);
        }

        let policy = reader.read_string()?;
        let is_auto_policy = reader.read_bool()?;

        let uptime = reader.read_u64()?;

        Ok(Self {
            pid,

            max_size,
            used_size,
            num_objects,

            rss,
            hwm,

            total_gets,
            total_sets,
            total_dels,

            miss_ratio,

            policies,
            policy,
            is_auto_policy,

            uptime,
        })
    }

    /// Process ID of the cache server
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Maximum cache size in bytes
    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Currently used cache size in bytes
    pub fn used_size(&self) -> u64 {
        self.used_size
    }

    /// Number of objects in the cache
    pub fn num_objects(&self) -> u64 {
        self.num_objects
    }

    /// Resident set size
    pub fn rss(&self) -> u64 {
        self.rss
    }

    /// High water mark
    pub fn hwm(&self) -> u64 {
        self.hwm
    }

    /// Total number of get operations served
    pub fn total_gets(&self) -> u64 {
        self.total_gets
    }

    /// Total number of set operations served
    pub fn total_sets(&self) -> u64 {
        self.total_sets
    }

    /// Total number of del operations served
    pub fn total_dels(&self) -> u64 {
        self.total_dels
    }

    /// Cache miss ratio (0.0 to 1.0)
    pub fn miss_ratio(&self) -> f64 {
        self.miss_ratio
    }

    /// Configured eviction policies
    pub fn policies(&self) -> &[String] {
        &self.policies
    }

    /// Currently active eviction policy
    pub fn policy(&self) -> &str {
        &self.policy
    }

    /// Whether automatic policy selection is enabled
    pub fn is_auto_policy(&self) -> bool {
        self.is_auto_policy
    }

    /// Server uptime in milliseconds
    pub fn uptime(&self) -> u64 {
        self.uptime
    }
}
