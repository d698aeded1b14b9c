//! Protocol Module
//!
//! Defines the wire protocol spoken with the Ember cache server.
//!
//! ## Protocol Format (Simple Binary, Little-Endian)
//!
//! ### Request Format
//! ```text
//! ┌──────────┬─────────────────────────────────────────┐
//! │ Op (1)   │        Operation-specific args          │
//! └──────────┴─────────────────────────────────────────┘
//! ```
//!
//! ### Response Format
//! ```text
//! ┌──────────┬─────────────────────────────────────────┐
//! │ Ok (1)   │  on ok:  operation-specific payload     │
//! │          │  on err: category (1) [+ sub-code (1)]  │
//! └──────────┴─────────────────────────────────────────┘
//! ```
//!
//! ### Field Encodings
//! - u8/u32/u64: fixed-width little-endian
//! - f64: IEEE-754 bits, little-endian
//! - bool: one sentinel byte (`'!'` = true, `'?'` = false)
//! - string: u32 byte length + that many raw bytes

mod opcode;
mod reader;
mod response;
mod status;
mod writer;

pub use opcode::Opcode;
pub use reader::FrameReader;
pub use response::{read_envelope, read_error};
pub use status::Status;
pub use writer::FrameWriter;

/// Wire sentinel for a true boolean
pub const BOOL_TRUE: u8 = b'!';

/// Wire sentinel for a false boolean
pub const BOOL_FALSE: u8 = b'?';
