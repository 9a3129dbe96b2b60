//! Register definitions for the Riscy ISA

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of registers
pub const NUM_REGISTERS: usize = 4;

/// General-purpose register (2-bit index)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Register {
    A = 0,
    B = 1,
    C = 2, // page source for JMPFAR
    D = 3,
}

impl Register {
    /// All registers in index order
    pub const ALL: [Register; NUM_REGISTERS] = [Self::A, Self::B, Self::C, Self::D];

    /// The register JMPFAR reads its target page from
    pub const FAR_PAGE: Self = Self::C;

    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Build from a 2-bit instruction field (upper bits are ignored)
    #[inline]
    pub fn from_field(field: u8) -> Self {
        Self::ALL[(field & 0b11) as usize]
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<u8> for Register {
    type Error = crate::RiscyError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value as usize).ok_or(crate::RiscyError::InvalidRegister(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for (i, reg) in Register::ALL.iter().enumerate() {
            assert_eq!(reg.index(), i);
            assert_eq!(Register::from_index(i), Some(*reg));
        }
        assert_eq!(Register::from_index(4), None);
    }

    #[test]
    fn test_from_field_masks_upper_bits() {
        assert_eq!(Register::from_field(0b0000_0110), Register::C);
        assert_eq!(Register::from_field(0xFF), Register::D);
    }

    #[test]
    fn test_try_from() {
        assert_eq!(Register::try_from(1).unwrap(), Register::B);
        assert!(matches!(
            Register::try_from(7),
            Err(crate::RiscyError::InvalidRegister(7))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Register::A.to_string(), "A");
        assert_eq!(Register::FAR_PAGE.to_string(), "C");
    }
}
