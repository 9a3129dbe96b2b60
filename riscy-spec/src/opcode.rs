//! # Riscy Opcode Definitions
//!
//! The primary opcode is the high nibble of the instruction byte (bits 7-4).
//!
//! ## Opcode Families
//!
//! - 0x0: System (HALT, PAGE) - sub-opcode in `rs`
//! - 0x1-0x3: SUB, LOAD, STORE
//! - 0x4: Skips (SKIPZ, SKIPNZ, SKIPL, SKIPGE) - sub-opcode in `rs`
//! - 0x5-0x7: JALR, NAND, ADD
//! - 0x8: Unary (INC, DEC, OUT, IN) - sub-opcode in `rs`
//! - 0x9: JMPFAR
//! - 0xA: Stack (PUSH, POP, STACKPAGE) - sub-opcode in `rs`
//! - 0xB: reserved
//! - 0xC-0xF: SLI (bits 7-6 set, bits 5-4 belong to the immediate)

use serde::{Deserialize, Serialize};

/// Primary opcode family (4 bits)
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// HALT / PAGE (and NOP as the all-zero byte)
    System = 0x0,
    /// SUB: rd = rd - rs
    Sub = 0x1,
    /// LOAD: rd = mem[DataPage][rs]
    Load = 0x2,
    /// STORE: mem[DataPage][rs] = rd
    Store = 0x3,
    /// SKIPZ / SKIPNZ / SKIPL / SKIPGE
    Skip = 0x4,
    /// JALR: rd = PC + 1; PC = rs
    Jalr = 0x5,
    /// NAND: rd = !(rd & rs)
    Nand = 0x6,
    /// ADD: rd = rd + rs
    Add = 0x7,
    /// INC / DEC / OUT / IN
    Unary = 0x8,
    /// JMPFAR: rs = PC + 1; CodePage = C; PC = rd
    Jmpfar = 0x9,
    /// PUSH / POP / STACKPAGE
    Stack = 0xA,
    /// SLI: rd = (rd << 4) | imm
    Sli = 0xC,
}

impl Opcode {
    /// Convert from the high nibble of an instruction byte.
    ///
    /// Every nibble from 0xC to 0xF maps to [`Opcode::Sli`]; 0xB is reserved.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x0 => Some(Self::System),
            0x1 => Some(Self::Sub),
            0x2 => Some(Self::Load),
            0x3 => Some(Self::Store),
            0x4 => Some(Self::Skip),
            0x5 => Some(Self::Jalr),
            0x6 => Some(Self::Nand),
            0x7 => Some(Self::Add),
            0x8 => Some(Self::Unary),
            0x9 => Some(Self::Jmpfar),
            0xA => Some(Self::Stack),
            0xC..=0xF => Some(Self::Sli),
            _ => None,
        }
    }

    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Whether the `rs` field of this family selects a sub-opcode
    /// instead of naming a register
    pub const fn has_sub_opcode(self) -> bool {
        matches!(self, Self::System | Self::Skip | Self::Unary | Self::Stack)
    }
}

/// Sub-opcode selected by the `rs` field inside a sub-dispatched family
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubOp {
    Halt,
    Page,
    Skipz,
    Skipnz,
    Skipl,
    Skipge,
    Inc,
    Dec,
    Out,
    In,
    Push,
    Pop,
    Stackpage,
}

impl SubOp {
    /// Resolve the sub-opcode for a family and `rs` field.
    ///
    /// Returns `None` for reserved code points (System/0, System/3, Stack/3)
    /// and for families that are not sub-dispatched.
    pub fn from_parts(family: Opcode, code: u8) -> Option<Self> {
        match (family, code & 0b11) {
            (Opcode::System, 1) => Some(Self::Halt),
            (Opcode::System, 2) => Some(Self::Page),
            (Opcode::Skip, 0) => Some(Self::Skipz),
            (Opcode::Skip, 1) => Some(Self::Skipnz),
            (Opcode::Skip, 2) => Some(Self::Skipl),
            (Opcode::Skip, 3) => Some(Self::Skipge),
            (Opcode::Unary, 0) => Some(Self::Inc),
            (Opcode::Unary, 1) => Some(Self::Dec),
            (Opcode::Unary, 2) => Some(Self::Out),
            (Opcode::Unary, 3) => Some(Self::In),
            (Opcode::Stack, 0) => Some(Self::Push),
            (Opcode::Stack, 1) => Some(Self::Pop),
            (Opcode::Stack, 2) => Some(Self::Stackpage),
            _ => None,
        }
    }

    /// Family this sub-opcode belongs to
    pub const fn family(self) -> Opcode {
        match self {
            Self::Halt | Self::Page => Opcode::System,
            Self::Skipz | Self::Skipnz | Self::Skipl | Self::Skipge => Opcode::Skip,
            Self::Inc | Self::Dec | Self::Out | Self::In => Opcode::Unary,
            Self::Push | Self::Pop | Self::Stackpage => Opcode::Stack,
        }
    }

    /// Value placed in the `rs` field
    pub const fn code(self) -> u8 {
        match self {
            Self::Skipz | Self::Inc | Self::Push => 0,
            Self::Halt | Self::Skipnz | Self::Dec | Self::Pop => 1,
            Self::Page | Self::Skipl | Self::Out | Self::Stackpage => 2,
            Self::Skipge | Self::In => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_roundtrip() {
        for nibble in 0u8..=0xA {
            let op = Opcode::from_u8(nibble).unwrap();
            assert_eq!(op.to_u8(), nibble);
        }
    }

    #[test]
    fn test_sli_range() {
        for nibble in 0xCu8..=0xF {
            assert_eq!(Opcode::from_u8(nibble), Some(Opcode::Sli));
        }
    }

    #[test]
    fn test_reserved_opcode() {
        assert_eq!(Opcode::from_u8(0xB), None);
        assert_eq!(Opcode::from_u8(0x10), None);
    }

    #[test]
    fn test_sub_dispatched_families() {
        let families: Vec<Opcode> = (0u8..=0xF)
            .filter_map(Opcode::from_u8)
            .filter(|op| op.has_sub_opcode())
            .collect();
        assert_eq!(
            families,
            vec![Opcode::System, Opcode::Skip, Opcode::Unary, Opcode::Stack]
        );
    }

    #[test]
    fn test_subop_roundtrip() {
        for family in [Opcode::System, Opcode::Skip, Opcode::Unary, Opcode::Stack] {
            for code in 0..4 {
                if let Some(sub) = SubOp::from_parts(family, code) {
                    assert_eq!(sub.family(), family);
                    assert_eq!(sub.code(), code);
                }
            }
        }
    }

    #[test]
    fn test_reserved_subops() {
        assert_eq!(SubOp::from_parts(Opcode::System, 0), None);
        assert_eq!(SubOp::from_parts(Opcode::System, 3), None);
        assert_eq!(SubOp::from_parts(Opcode::Stack, 3), None);
        assert_eq!(SubOp::from_parts(Opcode::Add, 0), None);
    }
}
