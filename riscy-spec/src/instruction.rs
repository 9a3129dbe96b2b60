//! Riscy Instruction Set
//!
//! 8-bit instructions with a 4-bit opcode and two 2-bit register fields.
//!
//! ## Instruction Formats
//! - RR-type:  [opcode:4][rd:2][rs:2]
//! - R-type:   [opcode:4][rd:2][sub:2]   (sub-dispatched families)
//! - SLI-type: [11][imm_hi:2][rd:2][imm_lo:2]

use crate::opcode::{Opcode, SubOp};
use crate::register::Register;
use serde::{Deserialize, Serialize};

/// Decoded Riscy instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    // ========== System ==========
    /// NOP: the all-zero byte, no effect
    Nop,

    /// HALT: stop the machine
    Halt,

    /// PAGE: DataPage = rd
    Page { rd: Register },

    // ========== Arithmetic / Logic ==========
    /// SUB: rd = rd - rs (mod 256)
    Sub { rd: Register, rs: Register },

    /// ADD: rd = rd + rs (mod 256)
    Add { rd: Register, rs: Register },

    /// NAND: rd = !(rd & rs)
    Nand { rd: Register, rs: Register },

    /// INC: rd = rd + 1 (mod 256)
    Inc { rd: Register },

    /// DEC: rd = rd - 1 (mod 256)
    Dec { rd: Register },

    /// SLI: rd = (rd << 4) | imm
    Sli { rd: Register, imm: u8 },

    // ========== Memory ==========
    /// LOAD: rd = mem[DataPage][rs]
    Load { rd: Register, rs: Register },

    /// STORE: mem[DataPage][rs] = rd
    Store { rd: Register, rs: Register },

    /// PUSH: SP -= 1; mem[StackPage][SP] = rd
    Push { rd: Register },

    /// POP: rd = mem[StackPage][SP]; SP += 1
    Pop { rd: Register },

    /// STACKPAGE: StackPage = rd
    Stackpage { rd: Register },

    // ========== Control Flow ==========
    /// SKIPZ: skip next if rd == 0
    Skipz { rd: Register },

    /// SKIPNZ: skip next if rd != 0
    Skipnz { rd: Register },

    /// SKIPL: skip next if bit 7 of rd is set
    Skipl { rd: Register },

    /// SKIPGE: skip next if bit 7 of rd is clear
    Skipge { rd: Register },

    /// JALR: rd = PC + 1; PC = rs
    Jalr { rd: Register, rs: Register },

    /// JMPFAR: rs = PC + 1; CodePage = C; PC = rd
    Jmpfar { rd: Register, rs: Register },

    // ========== Console ==========
    /// OUT: print rd as an ASCII character
    Out { rd: Register },

    /// IN: read a byte value from the console into rd
    In { rd: Register },
}

impl Instruction {
    /// Get instruction mnemonic
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::Nop => "NOP",
            Instruction::Halt => "HALT",
            Instruction::Page { .. } => "PAGE",
            Instruction::Sub { .. } => "SUB",
            Instruction::Add { .. } => "ADD",
            Instruction::Nand { .. } => "NAND",
            Instruction::Inc { .. } => "INC",
            Instruction::Dec { .. } => "DEC",
            Instruction::Sli { .. } => "SLI",
            Instruction::Load { .. } => "LOAD",
            Instruction::Store { .. } => "STORE",
            Instruction::Push { .. } => "PUSH",
            Instruction::Pop { .. } => "POP",
            Instruction::Stackpage { .. } => "STACKPAGE",
            Instruction::Skipz { .. } => "SKIPZ",
            Instruction::Skipnz { .. } => "SKIPNZ",
            Instruction::Skipl { .. } => "SKIPL",
            Instruction::Skipge { .. } => "SKIPGE",
            Instruction::Jalr { .. } => "JALR",
            Instruction::Jmpfar { .. } => "JMPFAR",
            Instruction::Out { .. } => "OUT",
            Instruction::In { .. } => "IN",
        }
    }

    /// Opcode family
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Nop | Instruction::Halt | Instruction::Page { .. } => Opcode::System,
            Instruction::Sub { .. } => Opcode::Sub,
            Instruction::Load { .. } => Opcode::Load,
            Instruction::Store { .. } => Opcode::Store,
            Instruction::Skipz { .. }
            | Instruction::Skipnz { .. }
            | Instruction::Skipl { .. }
            | Instruction::Skipge { .. } => Opcode::Skip,
            Instruction::Jalr { .. } => Opcode::Jalr,
            Instruction::Nand { .. } => Opcode::Nand,
            Instruction::Add { .. } => Opcode::Add,
            Instruction::Inc { .. }
            | Instruction::Dec { .. }
            | Instruction::Out { .. }
            | Instruction::In { .. } => Opcode::Unary,
            Instruction::Jmpfar { .. } => Opcode::Jmpfar,
            Instruction::Push { .. } | Instruction::Pop { .. } | Instruction::Stackpage { .. } => {
                Opcode::Stack
            }
            Instruction::Sli { .. } => Opcode::Sli,
        }
    }

    /// Sub-opcode for sub-dispatched families (`None` for NOP and the
    /// register-register families)
    pub fn sub_op(&self) -> Option<SubOp> {
        match self {
            Instruction::Halt => Some(SubOp::Halt),
            Instruction::Page { .. } => Some(SubOp::Page),
            Instruction::Skipz { .. } => Some(SubOp::Skipz),
            Instruction::Skipnz { .. } => Some(SubOp::Skipnz),
            Instruction::Skipl { .. } => Some(SubOp::Skipl),
            Instruction::Skipge { .. } => Some(SubOp::Skipge),
            Instruction::Inc { .. } => Some(SubOp::Inc),
            Instruction::Dec { .. } => Some(SubOp::Dec),
            Instruction::Out { .. } => Some(SubOp::Out),
            Instruction::In { .. } => Some(SubOp::In),
            Instruction::Push { .. } => Some(SubOp::Push),
            Instruction::Pop { .. } => Some(SubOp::Pop),
            Instruction::Stackpage { .. } => Some(SubOp::Stackpage),
            _ => None,
        }
    }

    /// Destination / tested register, if the instruction has one
    pub fn rd(&self) -> Option<Register> {
        match *self {
            Instruction::Nop | Instruction::Halt => None,
            Instruction::Page { rd }
            | Instruction::Sub { rd, .. }
            | Instruction::Add { rd, .. }
            | Instruction::Nand { rd, .. }
            | Instruction::Inc { rd }
            | Instruction::Dec { rd }
            | Instruction::Sli { rd, .. }
            | Instruction::Load { rd, .. }
            | Instruction::Store { rd, .. }
            | Instruction::Push { rd }
            | Instruction::Pop { rd }
            | Instruction::Stackpage { rd }
            | Instruction::Skipz { rd }
            | Instruction::Skipnz { rd }
            | Instruction::Skipl { rd }
            | Instruction::Skipge { rd }
            | Instruction::Jalr { rd, .. }
            | Instruction::Jmpfar { rd, .. }
            | Instruction::Out { rd }
            | Instruction::In { rd } => Some(rd),
        }
    }

    /// Source register for register-register instructions
    pub fn rs(&self) -> Option<Register> {
        match *self {
            Instruction::Sub { rs, .. }
            | Instruction::Add { rs, .. }
            | Instruction::Nand { rs, .. }
            | Instruction::Load { rs, .. }
            | Instruction::Store { rs, .. }
            | Instruction::Jalr { rs, .. }
            | Instruction::Jmpfar { rs, .. } => Some(rs),
            _ => None,
        }
    }

    /// 4-bit immediate (SLI only)
    pub fn imm(&self) -> Option<u8> {
        match *self {
            Instruction::Sli { imm, .. } => Some(imm),
            _ => None,
        }
    }

    /// Whether the instruction may move the PC somewhere other than the
    /// next sequential slot
    pub fn is_control_flow(&self) -> bool {
        matches!(
            self,
            Instruction::Skipz { .. }
                | Instruction::Skipnz { .. }
                | Instruction::Skipl { .. }
                | Instruction::Skipge { .. }
                | Instruction::Jalr { .. }
                | Instruction::Jmpfar { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mnemonic() {
        assert_eq!(Instruction::Halt.mnemonic(), "HALT");
        assert_eq!(
            Instruction::Jmpfar { rd: Register::A, rs: Register::B }.mnemonic(),
            "JMPFAR"
        );
        assert_eq!(Instruction::Sli { rd: Register::D, imm: 3 }.mnemonic(), "SLI");
    }

    #[test]
    fn test_operand_accessors() {
        let add = Instruction::Add { rd: Register::C, rs: Register::D };
        assert_eq!(add.rd(), Some(Register::C));
        assert_eq!(add.rs(), Some(Register::D));
        assert_eq!(add.imm(), None);

        let sli = Instruction::Sli { rd: Register::B, imm: 0xA };
        assert_eq!(sli.rd(), Some(Register::B));
        assert_eq!(sli.rs(), None);
        assert_eq!(sli.imm(), Some(0xA));

        assert_eq!(Instruction::Nop.rd(), None);
        assert_eq!(Instruction::Halt.rs(), None);
    }

    #[test]
    fn test_opcode_and_subop_agree() {
        let inst = Instruction::Pop { rd: Register::A };
        let sub = inst.sub_op().unwrap();
        assert_eq!(sub.family(), inst.opcode());
        assert_eq!(Instruction::Add { rd: Register::A, rs: Register::A }.sub_op(), None);
    }

    #[test]
    fn test_control_flow() {
        assert!(Instruction::Skipz { rd: Register::A }.is_control_flow());
        assert!(Instruction::Jalr { rd: Register::A, rs: Register::B }.is_control_flow());
        assert!(!Instruction::Add { rd: Register::A, rs: Register::B }.is_control_flow());
        assert!(!Instruction::Halt.is_control_flow());
    }
}
