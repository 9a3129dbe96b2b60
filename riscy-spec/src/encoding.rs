//! # Instruction Encoding Constants and Helpers
//!
//! Field layout of the 8-bit instruction word and the canonical encoder.
//!
//! ## Instruction Format (8-bit)
//!
//! ```text
//! RR-type:  [opcode:4][rd:2][rs:2]
//! R-type:   [opcode:4][rd:2][sub:2]
//! SLI-type: [1 1][imm_hi:2][rd:2][imm_lo:2]
//! ```

use crate::error::{Result, RiscyError};
use crate::instruction::Instruction;
use crate::opcode::Opcode;
use crate::register::Register;

// ============================================================================
// Bit Position Constants
// ============================================================================

/// Opcode field: bits 4-7
pub const OPCODE_SHIFT: u8 = 4;

/// Destination register field: bits 2-3
pub const RD_SHIFT: u8 = 2;

/// Source register / sub-opcode field: bits 0-1
pub const RS_SHIFT: u8 = 0;

/// SLI marker: bits 6-7
pub const SLI_MARKER_SHIFT: u8 = 6;

/// SLI immediate high half: bits 4-5
pub const SLI_IMM_HI_SHIFT: u8 = 4;

// ============================================================================
// Field Masks
// ============================================================================

/// Opcode mask (4 bits)
pub const OPCODE_MASK: u8 = 0xF;

/// Register field mask (2 bits)
pub const REGISTER_MASK: u8 = 0x3;

/// SLI marker value (bits 7-6 == 11)
pub const SLI_MARKER: u8 = 0b11;

/// 4-bit immediate mask
pub const IMM_MASK: u8 = 0xF;

/// Encoding of NOP
pub const NOP_BYTE: u8 = 0x00;

// ============================================================================
// Field Extraction Functions
// ============================================================================

/// Extract opcode family nibble (bits 4-7)
#[inline]
pub const fn extract_opcode(inst: u8) -> u8 {
    (inst >> OPCODE_SHIFT) & OPCODE_MASK
}

/// Extract destination register field (bits 2-3)
#[inline]
pub const fn extract_rd(inst: u8) -> u8 {
    (inst >> RD_SHIFT) & REGISTER_MASK
}

/// Extract source register / sub-opcode field (bits 0-1)
#[inline]
pub const fn extract_rs(inst: u8) -> u8 {
    (inst >> RS_SHIFT) & REGISTER_MASK
}

/// Extract the SLI immediate: bits 5-4 become the high half, bits 1-0 the low half
#[inline]
pub const fn extract_imm(inst: u8) -> u8 {
    (((inst >> SLI_IMM_HI_SHIFT) & REGISTER_MASK) << 2) | (inst & REGISTER_MASK)
}

/// Whether bits 7-6 mark a shift-load-immediate
#[inline]
pub const fn is_sli(inst: u8) -> bool {
    (inst >> SLI_MARKER_SHIFT) == SLI_MARKER
}

// ============================================================================
// Encoding Functions
// ============================================================================

/// Encode a register-field instruction
#[inline]
pub const fn encode_rr(opcode: Opcode, rd: u8, rs: u8) -> u8 {
    ((opcode as u8 & OPCODE_MASK) << OPCODE_SHIFT)
        | ((rd & REGISTER_MASK) << RD_SHIFT)
        | ((rs & REGISTER_MASK) << RS_SHIFT)
}

/// Encode a shift-load-immediate
#[inline]
pub const fn encode_sli(rd: u8, imm: u8) -> u8 {
    (SLI_MARKER << SLI_MARKER_SHIFT)
        | (((imm >> 2) & REGISTER_MASK) << SLI_IMM_HI_SHIFT)
        | ((rd & REGISTER_MASK) << RD_SHIFT)
        | (imm & REGISTER_MASK)
}

/// Encode an instruction into its canonical byte.
///
/// HALT is encoded with `rd = A` (`0x01`); any `rd` decodes to HALT.
/// SLI immediates are masked to 4 bits; use [`try_encode`] to reject
/// out-of-range immediates instead.
pub fn encode(inst: &Instruction) -> u8 {
    match *inst {
        Instruction::Nop => NOP_BYTE,
        Instruction::Sli { rd, imm } => encode_sli(rd as u8, imm & IMM_MASK),
        Instruction::Sub { rd, rs }
        | Instruction::Add { rd, rs }
        | Instruction::Nand { rd, rs }
        | Instruction::Load { rd, rs }
        | Instruction::Store { rd, rs }
        | Instruction::Jalr { rd, rs }
        | Instruction::Jmpfar { rd, rs } => encode_rr(inst.opcode(), rd as u8, rs as u8),
        _ => {
            let rd = inst.rd().unwrap_or(Register::A);
            // every remaining variant is sub-dispatched
            let code = inst.sub_op().map_or(0, |sub| sub.code());
            encode_rr(inst.opcode(), rd as u8, code)
        }
    }
}

/// Encode, rejecting SLI immediates that do not fit in 4 bits
pub fn try_encode(inst: &Instruction) -> Result<u8> {
    match inst.imm() {
        Some(imm) if imm > IMM_MASK => Err(RiscyError::InvalidImmediate(imm)),
        _ => Ok(encode(inst)),
    }
}

/// Encode a sequence of instructions into a program image
pub fn encode_program(program: &[Instruction]) -> Vec<u8> {
    program.iter().map(encode).collect()
}
