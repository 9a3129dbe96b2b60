//! # Error Types for the Riscy ISA

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RiscyError {
    #[error("Illegal opcode: {0:#04x}")]
    IllegalOpcode(u8),

    #[error("Invalid register index: {0} (valid range: 0-3)")]
    InvalidRegister(u8),

    #[error("Invalid immediate value: {0} (valid range: 0-15)")]
    InvalidImmediate(u8),
}

pub type Result<T> = std::result::Result<T, RiscyError>;
