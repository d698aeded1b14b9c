//! Opcode definitions
//!
//! One byte per cache operation. The values are part of the wire contract
//! and are stable across sessions; extensions are append-only.

/// Operation codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    Ping = 0,
    Version = 1,

    Auth = 2,

    Get = 3,
    Set = 4,
    Del = 5,

    Has = 6,
    Peek = 7,
    Ttl = 8,
    Size = 9,

    Wipe = 10,

    Resize = 11,
    Policy = 12,

    Status = 13,
}
