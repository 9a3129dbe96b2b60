//! Instruction decoder

use crate::error::{DecodeError, Result};
use riscy_spec::encoding::{extract_imm, extract_opcode, extract_rd, extract_rs, is_sli, NOP_BYTE};
use riscy_spec::{Instruction, Opcode, Register, SubOp};

/// Decode an 8-bit instruction word
pub fn decode(byte: u8) -> Result<Instruction> {
    if is_sli(byte) {
        return Ok(Instruction::Sli {
            rd: Register::from_field(extract_rd(byte)),
            imm: extract_imm(byte),
        });
    }

    if byte == NOP_BYTE {
        return Ok(Instruction::Nop);
    }

    let opcode = Opcode::from_u8(extract_opcode(byte)).ok_or(DecodeError::IllegalOpcode(byte))?;

    if opcode.has_sub_opcode() {
        decode_sub_op(byte, opcode)
    } else {
        decode_rr(byte, opcode)
    }
}

fn decode_sub_op(byte: u8, opcode: Opcode) -> Result<Instruction> {
    let rd = Register::from_field(extract_rd(byte));
    let sub = SubOp::from_parts(opcode, extract_rs(byte)).ok_or(DecodeError::IllegalOpcode(byte))?;

    Ok(match sub {
        SubOp::Halt => Instruction::Halt,
        SubOp::Page => Instruction::Page { rd },
        SubOp::Skipz => Instruction::Skipz { rd },
        SubOp::Skipnz => Instruction::Skipnz { rd },
        SubOp::Skipl => Instruction::Skipl { rd },
        SubOp::Skipge => Instruction::Skipge { rd },
        SubOp::Inc => Instruction::Inc { rd },
        SubOp::Dec => Instruction::Dec { rd },
        SubOp::Out => Instruction::Out { rd },
        SubOp::In => Instruction::In { rd },
        SubOp::Push => Instruction::Push { rd },
        SubOp::Pop => Instruction::Pop { rd },
        SubOp::Stackpage => Instruction::Stackpage { rd },
    })
}

fn decode_rr(byte: u8, opcode: Opcode) -> Result<Instruction> {
    let rd = Register::from_field(extract_rd(byte));
    let rs = Register::from_field(extract_rs(byte));

    match opcode {
        Opcode::Sub => Ok(Instruction::Sub { rd, rs }),
        Opcode::Load => Ok(Instruction::Load { rd, rs }),
        Opcode::Store => Ok(Instruction::Store { rd, rs }),
        Opcode::Jalr => Ok(Instruction::Jalr { rd, rs }),
        Opcode::Nand => Ok(Instruction::Nand { rd, rs }),
        Opcode::Add => Ok(Instruction::Add { rd, rs }),
        Opcode::Jmpfar => Ok(Instruction::Jmpfar { rd, rs }),
        _ => Err(DecodeError::IllegalOpcode(byte)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_nop() {
        assert_eq!(decode(0x00).unwrap(), Instruction::Nop);
    }

    #[test]
    fn test_decode_halt_ignores_rd() {
        for byte in [0x01, 0x05, 0x09, 0x0D] {
            assert_eq!(decode(byte).unwrap(), Instruction::Halt);
        }
    }

    #[test]
    fn test_decode_page() {
        assert_eq!(decode(0x0A).unwrap(), Instruction::Page { rd: Register::C });
    }

    #[test]
    fn test_decode_reserved_system_codes() {
        // sub-code 0 with non-zero rd, and sub-code 3
        for byte in [0x04, 0x08, 0x0C, 0x03, 0x07, 0x0B, 0x0F] {
            assert_eq!(decode(byte), Err(DecodeError::IllegalOpcode(byte)));
        }
    }

    #[test]
    fn test_decode_store_is_not_load() {
        assert_eq!(
            decode(0x3E).unwrap(),
            Instruction::Store { rd: Register::D, rs: Register::C }
        );
        assert_eq!(
            decode(0x2E).unwrap(),
            Instruction::Load { rd: Register::D, rs: Register::C }
        );
    }

    #[test]
    fn test_decode_opcode_b_illegal() {
        for byte in 0xB0u8..=0xBF {
            assert_eq!(decode(byte), Err(DecodeError::IllegalOpcode(byte)));
        }
    }

    #[test]
    fn test_decode_stack_family() {
        assert_eq!(decode(0xA4).unwrap(), Instruction::Push { rd: Register::B });
        assert_eq!(decode(0xA5).unwrap(), Instruction::Pop { rd: Register::B });
        assert_eq!(decode(0xA6).unwrap(), Instruction::Stackpage { rd: Register::B });
        assert_eq!(decode(0xA7), Err(DecodeError::IllegalOpcode(0xA7)));
    }

    #[test]
    fn test_decode_sli() {
        assert_eq!(decode(0xE2).unwrap(), Instruction::Sli { rd: Register::A, imm: 0xA });
        assert_eq!(decode(0xC0).unwrap(), Instruction::Sli { rd: Register::A, imm: 0x0 });
        assert_eq!(decode(0xFF).unwrap(), Instruction::Sli { rd: Register::D, imm: 0xF });
    }
}
