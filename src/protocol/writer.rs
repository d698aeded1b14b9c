//! Frame encoder
//!
//! Builds a request frame in a growing byte buffer. Encoding is append-only
//! and never fails; the finished buffer is handed to the transport in one
//! write.

use bytes::{BufMut, BytesMut};

use super::{Opcode, BOOL_FALSE, BOOL_TRUE};

/// Append-only encoder for a single request frame
#[derive(Debug, Default)]
pub struct FrameWriter {
    buf: BytesMut,
}

impl FrameWriter {
    /// Create an empty frame
    pub fn new() -> Self {
        Self {
            buf: BytesMut::new(),
        }
    }

    /// Create a frame starting with the given opcode byte
    pub fn for_opcode(opcode: Opcode) -> Self {
        let mut writer = Self::new();
        writer.write_u8(opcode as u8);
        writer
    }

    /// The encoded bytes so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.put_u32_le(value);
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buf.put_u64_le(value);
    }

    pub fn write_f64(&mut self, value: f64) {
        self.buf.put_f64_le(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.put_u8(if value { BOOL_TRUE } else { BOOL_FALSE });
    }

    /// Write a u32 length prefix followed by the raw string bytes
    pub fn write_string(&mut self, value: &str) {
        self.write_u32(value.len() as u32);
        self.buf.put_slice(value.as_bytes());
    }
}
