//! # Riscy ISA Specification
//!
//! 8-bit, paged-memory, 4-register instruction set.
//!
//! ## Key Features
//! - 8-bit data width, 8-bit instructions (`[opcode:4][rd:2][rs:2]`)
//! - 4 general-purpose registers (A, B, C, D)
//! - 256 pages × 256 bytes of memory
//! - Independent code, data and stack page selectors
//! - Skip-based conditional control flow
//! - Shift-load-immediate (SLI) for building constants a nibble at a time

pub mod register;
pub mod opcode;
pub mod instruction;
pub mod encoding;
pub mod trace;
pub mod error;

pub use register::{Register, NUM_REGISTERS};
pub use opcode::{Opcode, SubOp};
pub use instruction::Instruction;
pub use trace::TraceRecord;
pub use error::{RiscyError, Result};

/// Number of memory pages
pub const NUM_PAGES: usize = 256;

/// Bytes per page
pub const PAGE_SIZE: usize = 256;

/// Total addressable memory in bytes
pub const MEMORY_SIZE: usize = NUM_PAGES * PAGE_SIZE;

/// Initial code page selector
pub const INITIAL_CODE_PAGE: u8 = 0x00;

/// Initial data page selector
pub const INITIAL_DATA_PAGE: u8 = 0x01;

/// Initial stack page selector
pub const INITIAL_STACK_PAGE: u8 = 0x00;

/// Initial stack pointer (first push lands at 0xFF)
pub const INITIAL_SP: u8 = 0x00;

/// Initial program counter
pub const INITIAL_PC: u8 = 0x00;
