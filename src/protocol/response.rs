//! Response envelope decoding
//!
//! Every response opens with a boolean sentinel: true means an
//! operation-specific success payload follows, false means an error
//! descriptor follows.
//!
//! ## Error Descriptor
//! ```text
//! ┌──────────────┬───────────────────────────────┐
//! │ category (1) │ sub-code (1, category 0 only) │
//! └──────────────┴───────────────────────────────┘
//! ```
//!
//! Category 0 is a cache-domain error refined by the sub-code; any other
//! category is itself a session-level error code.

use std::io::Read;

use crate::error::{EmberError, Result};

use super::FrameReader;

/// Decode the `is_ok` sentinel that opens every response
pub fn read_envelope<R: Read>(reader: &mut FrameReader<'_, R>) -> Result<bool> {
    reader.read_bool()
}

/// Decode the error descriptor of a failed response
///
/// Must only be called after `read_envelope` returned false; the success
/// payload is never present in this branch.
pub fn read_error<R: Read>(reader: &mut FrameReader<'_, R>) -> Result<EmberError> {
    let category = reader.read_u8()?;

    if category == 0 {
        let sub_code = reader.read_u8()?;
        return Ok(EmberError::from_cache_code(sub_code));
    }

    Ok(EmberError::from_session_code(category))
}
