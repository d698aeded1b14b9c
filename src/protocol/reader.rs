//! Frame decoder
//!
//! Reads protocol primitives off a byte stream. Every decode consumes
//! exactly the expected byte count via `read_exact`; a short read is the
//! only I/O failure mode.

use std::io::Read;

use crate::error::{EmberError, Result};

use super::{BOOL_FALSE, BOOL_TRUE};

/// Decoder for protocol primitives over any byte stream
pub struct FrameReader<'a, R: Read> {
    inner: &'a mut R,
}

impl<'a, R: Read> FrameReader<'a, R> {
    pub fn new(inner: &'a mut R) -> Self {
        Self { inner }
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let mut data = [0u8; 1];
        self.inner.read_exact(&mut data)?;
        Ok(data[0])
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let mut data = [0u8; 4];
        self.inner.read_exact(&mut data)?;
        Ok(u32::from_le_bytes(data))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let mut data = [0u8; 8];
        self.inner.read_exact(&mut data)?;
        Ok(u64::from_le_bytes(data))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        let mut data = [0u8; 8];
        self.inner.read_exact(&mut data)?;
        Ok(f64::from_le_bytes(data))
    }

    /// Decode a boolean sentinel byte.
    ///
    /// Only `'!'` (true) and `'?'` (false) are valid; any other byte means
    /// the stream is desynchronized and is rejected as a codec error.
    pub fn read_bool(&mut self) -> Result<bool> {
        match self.read_u8()? {
            BOOL_TRUE => Ok(true),
            BOOL_FALSE => Ok(false),
            other => Err(EmberError::Codec(format!(
                "invalid boolean sentinel: 0x{other:02x}"
            ))),
        }
    }

    /// Decode a u32 length prefix followed by that many raw bytes.
    ///
    /// The bytes are assumed to be UTF-8 but are not validated.
    pub fn read_string(&mut self) -> Result<String> {
        let length = self.read_u32()? as usize;

        let mut data = vec![0u8; length];
        self.inner.read_exact(&mut data)?;

        Ok(String::from_utf8_lossy(&data).into_owned())
    }
}
