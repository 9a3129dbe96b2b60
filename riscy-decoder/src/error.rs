//! Decoder errors

use riscy_spec::RiscyError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Illegal opcode: {0:#04x}")]
    IllegalOpcode(u8),
}

impl DecodeError {
    /// The byte that failed to decode
    pub fn byte(&self) -> u8 {
        match self {
            DecodeError::IllegalOpcode(byte) => *byte,
        }
    }
}

impl From<DecodeError> for RiscyError {
    fn from(err: DecodeError) -> Self {
        RiscyError::IllegalOpcode(err.byte())
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;
