//! Instruction execution for the Riscy ISA

use crate::error::{Result, RuntimeError};
use crate::io::{ascii_char, Console};
use crate::memory::Memory;
use crate::state::EngineState;
use riscy_spec::{Instruction, Register};

/// How write-back moves the program counter after an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// PC + 1
    Next,
    /// PC + 2, skipping the following instruction
    Skip,
    /// PC = target
    Jump(u8),
}

impl Flow {
    #[inline]
    fn skip_if(condition: bool) -> Self {
        if condition {
            Flow::Skip
        } else {
            Flow::Next
        }
    }
}

/// Sign bit of an 8-bit value
#[inline]
fn is_negative(value: u8) -> bool {
    value & 0x80 != 0
}

/// Execute a single decoded instruction.
///
/// Registers, memory and page selectors are updated in place; the PC is
/// left for the caller to advance according to the returned [`Flow`].
/// Arithmetic wraps modulo 256 and never faults.
pub fn execute(
    instr: &Instruction,
    state: &mut EngineState,
    memory: &mut Memory,
    console: &mut dyn Console,
) -> Result<Flow> {
    let flow = match *instr {
        // ========== System ==========
        Instruction::Nop => Flow::Next,

        Instruction::Halt => {
            state.halt();
            Flow::Next
        }

        Instruction::Page { rd } => {
            state.data_page = state.read_reg(rd);
            Flow::Next
        }

        // ========== Arithmetic / Logic ==========
        Instruction::Sub { rd, rs } => {
            let result = state.read_reg(rd).wrapping_sub(state.read_reg(rs));
            state.write_reg(rd, result);
            Flow::Next
        }

        Instruction::Add { rd, rs } => {
            let result = state.read_reg(rd).wrapping_add(state.read_reg(rs));
            state.write_reg(rd, result);
            Flow::Next
        }

        Instruction::Nand { rd, rs } => {
            let result = !(state.read_reg(rd) & state.read_reg(rs));
            state.write_reg(rd, result);
            Flow::Next
        }

        Instruction::Inc { rd } => {
            state.write_reg(rd, state.read_reg(rd).wrapping_add(1));
            Flow::Next
        }

        Instruction::Dec { rd } => {
            state.write_reg(rd, state.read_reg(rd).wrapping_sub(1));
            Flow::Next
        }

        Instruction::Sli { rd, imm } => {
            let result = (state.read_reg(rd) << 4) | (imm & 0x0F);
            state.write_reg(rd, result);
            Flow::Next
        }

        // ========== Memory ==========
        Instruction::Load { rd, rs } => {
            let value = memory.read(state.data_page, state.read_reg(rs));
            state.write_reg(rd, value);
            Flow::Next
        }

        Instruction::Store { rd, rs } => {
            memory.write(state.data_page, state.read_reg(rs), state.read_reg(rd));
            Flow::Next
        }

        Instruction::Push { rd } => {
            state.sp = state.sp.wrapping_sub(1);
            memory.write(state.stack_page, state.sp, state.read_reg(rd));
            Flow::Next
        }

        Instruction::Pop { rd } => {
            let value = memory.read(state.stack_page, state.sp);
            state.write_reg(rd, value);
            state.sp = state.sp.wrapping_add(1);
            Flow::Next
        }

        Instruction::Stackpage { rd } => {
            state.stack_page = state.read_reg(rd);
            Flow::Next
        }

        // ========== Skips ==========
        Instruction::Skipz { rd } => Flow::skip_if(state.read_reg(rd) == 0),
        Instruction::Skipnz { rd } => Flow::skip_if(state.read_reg(rd) != 0),
        Instruction::Skipl { rd } => Flow::skip_if(is_negative(state.read_reg(rd))),
        Instruction::Skipge { rd } => Flow::skip_if(!is_negative(state.read_reg(rd))),

        // ========== Jumps ==========
        Instruction::Jalr { rd, rs } => {
            // read the target first: rd may alias rs
            let target = state.read_reg(rs);
            state.write_reg(rd, state.pc.wrapping_add(1));
            Flow::Jump(target)
        }

        Instruction::Jmpfar { rd, rs } => {
            // C is the page source regardless of rd / rs
            let target = state.read_reg(rd);
            let page = state.read_reg(Register::FAR_PAGE);
            state.write_reg(rs, state.pc.wrapping_add(1));
            state.code_page = page;
            Flow::Jump(target)
        }

        // ========== Console ==========
        Instruction::Out { rd } => {
            let mut buf = [0u8; 4];
            console.write_str(ascii_char(state.read_reg(rd)).encode_utf8(&mut buf))?;
            Flow::Next
        }

        Instruction::In { rd } => {
            let line = console.read_line()?;
            let input = line.trim();
            let value = input.parse::<u8>().map_err(|source| RuntimeError::InvalidInput {
                input: input.to_string(),
                source,
            })?;
            state.write_reg(rd, value);
            Flow::Next
        }
    };

    Ok(flow)
}
