//! Runtime error types for the Riscy engine

use riscy_spec::RiscyError;
use std::num::ParseIntError;
use thiserror::Error;

/// Which debug macro rejected its input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroKind {
    /// `(page, address, value)` triples
    Write,
    /// `(page, address)` pairs
    Read,
}

impl MacroKind {
    /// Bytes per record
    pub const fn record_size(self) -> usize {
        match self {
            MacroKind::Write => 3,
            MacroKind::Read => 2,
        }
    }
}

impl std::fmt::Display for MacroKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MacroKind::Write => write!(f, "write"),
            MacroKind::Read => write!(f, "read"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Illegal opcode {byte:#04x} at page {page:#04x}, PC {pc:#04x}")]
    IllegalOpcode { byte: u8, page: u8, pc: u8 },

    #[error("Malformed {kind} macro: length {len} is not a multiple of {record}")]
    MalformedMacro {
        kind: MacroKind,
        len: usize,
        record: usize,
    },

    #[error("Invalid input {input:?}: expected a byte value (0-255)")]
    InvalidInput {
        input: String,
        #[source]
        source: ParseIntError,
    },

    #[error("ISA error: {0}")]
    Spec(#[from] RiscyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RuntimeError {
    /// Check if this error aborts a run (as opposed to a rejected debug request)
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RuntimeError::IllegalOpcode { .. }
                | RuntimeError::InvalidInput { .. }
                | RuntimeError::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
