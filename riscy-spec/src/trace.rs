//! # Execution Trace Types
//!
//! Records handed to trace sinks once per executed instruction.

use crate::encoding::{extract_imm, extract_rd, extract_rs};
use crate::instruction::Instruction;
use crate::register::{Register, NUM_REGISTERS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Architectural state visible to a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MachineSnapshot {
    /// Register file (A, B, C, D)
    pub registers: [u8; NUM_REGISTERS],
    /// Program counter
    pub pc: u8,
    /// Stack pointer
    pub sp: u8,
    /// Page instructions are fetched from
    pub code_page: u8,
    /// Page LOAD / STORE address
    pub data_page: u8,
    /// Page PUSH / POP address
    pub stack_page: u8,
}

impl MachineSnapshot {
    #[inline]
    pub fn register(&self, reg: Register) -> u8 {
        self.registers[reg.index()]
    }
}

impl fmt::Display for MachineSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Regs: A: {:02x} B: {:02x} C: {:02x} D: {:02x}",
            self.registers[0], self.registers[1], self.registers[2], self.registers[3]
        )?;
        write!(
            f,
            "     PC: {:02x} SP: {:02x} Page: {:02x} DataPage: {:02x} StackPage: {:02x}",
            self.pc, self.sp, self.code_page, self.data_page, self.stack_page
        )
    }
}

/// A single executed instruction
///
/// `rd`, `rs` and `imm` are the raw bit fields of `raw`, independent of how
/// the instruction interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRecord {
    /// Cycle number (0-based)
    pub cycle: u64,

    /// Code page the instruction was fetched from
    pub page: u8,

    /// Offset the instruction was fetched from
    pub pc: u8,

    /// Encoded instruction byte
    pub raw: u8,

    /// Decoded instruction
    pub instruction: Instruction,

    /// Bits 3-2
    pub rd: u8,

    /// Bits 1-0
    pub rs: u8,

    /// SLI immediate field (bits 5-4 ++ bits 1-0)
    pub imm: u8,

    /// State after write-back
    pub after: MachineSnapshot,
}

impl TraceRecord {
    pub fn new(
        cycle: u64,
        page: u8,
        pc: u8,
        raw: u8,
        instruction: Instruction,
        after: MachineSnapshot,
    ) -> Self {
        Self {
            cycle,
            page,
            pc,
            raw,
            instruction,
            rd: extract_rd(raw),
            rs: extract_rs(raw),
            imm: extract_imm(raw),
            after,
        }
    }
}
