//! # Riscy Decoder
//!
//! Decode Riscy instruction bytes into structured [`Instruction`]s and render
//! them as mnemonic text for traces.
//!
//! ## Example
//!
//! ```rust
//! use riscy_decoder::{decode, format};
//!
//! let inst = decode(0x71).unwrap();
//! assert_eq!(format(&inst), "ADD A, B");
//!
//! assert!(decode(0xB0).is_err());
//! ```
//!
//! [`Instruction`]: riscy_spec::Instruction

pub mod error;
pub mod decoder;
pub mod formatter;

pub use error::{DecodeError, Result};
pub use decoder::decode;
pub use formatter::format;

/// Decode and format in one step; illegal bytes render as `.byte 0xNN`
pub fn describe(byte: u8) -> String {
    match decode(byte) {
        Ok(inst) => format(&inst),
        Err(_) => std::format!(".byte {byte:#04x}"),
    }
}
