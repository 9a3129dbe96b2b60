//! Cross-module interaction tests
//!
//! Checks that the encoder, decoder and engine agree on every byte.

use proptest::prelude::*;
use riscy_decoder::{decode, describe, format};
use riscy_runtime::{BufferedConsole, Engine, EngineConfig, RuntimeError};
use riscy_spec::encoding::encode;
use riscy_spec::Instruction;

fn single_step_engine(byte: u8) -> Engine {
    let config = EngineConfig { dump_pages: vec![], ..EngineConfig::default() };
    let mut engine = Engine::with_config(config);
    engine.set_console(Box::new(BufferedConsole::new(["0"])));
    engine.load_program(&[byte]).unwrap();
    engine
}

// ============================================================================
// Decoder -> Runtime
// ============================================================================

#[test]
fn test_engine_executes_exactly_the_decoded_instruction() {
    for byte in 0..=255u8 {
        let mut engine = single_step_engine(byte);
        match decode(byte) {
            Ok(inst) => {
                let record = engine.step().unwrap().unwrap();
                assert_eq!(record.raw, byte);
                assert_eq!(record.instruction, inst, "byte {byte:#04x}");
                assert_eq!(engine.state().cycles, 1);
            }
            Err(_) => {
                let err = engine.step().unwrap_err();
                let expected = RuntimeError::IllegalOpcode { byte, page: 0, pc: 0 };
                assert_eq!(err.to_string(), expected.to_string());
                assert_eq!(engine.state().cycles, 0);
            }
        }
    }
}

#[test]
fn test_illegal_bytes_are_family_b_or_reserved() {
    for byte in 0..=255u8 {
        if decode(byte).is_ok() {
            continue;
        }
        let family = byte >> 4;
        let sub = byte & 0x03;
        let reserved = match family {
            0xB => true,
            0x0 => sub == 3 || (sub == 0 && byte != 0x00),
            0xA => sub == 3,
            _ => false,
        };
        assert!(reserved, "unexpected illegal byte {byte:#04x}");
    }
}

#[test]
fn test_only_control_flow_moves_pc_off_sequence() {
    for byte in 0..=255u8 {
        let Ok(inst) = decode(byte) else { continue };
        let mut engine = single_step_engine(byte);
        engine.step().unwrap();

        let pc = engine.state().pc;
        if !inst.is_control_flow() {
            assert_eq!(pc, 1, "{} moved PC to {pc:#04x}", format(&inst));
        }
    }
}

proptest! {
    #[test]
    fn step_matches_decode_at_any_offset(byte: u8, offset in 0u8..=254) {
        // NOP sled up to `offset`, then the byte under test
        let mut program = vec![0x00; offset as usize];
        program.push(byte);

        let config = EngineConfig { dump_pages: vec![], ..EngineConfig::default() };
        let mut engine = Engine::with_config(config);
        engine.set_console(Box::new(BufferedConsole::new(["0"])));
        engine.load_program(&program).unwrap();
        for _ in 0..offset {
            engine.step().unwrap();
        }

        match (decode(byte), engine.step()) {
            (Ok(inst), Ok(Some(record))) => {
                prop_assert_eq!(record.instruction, inst);
                prop_assert_eq!(record.pc, offset);
            }
            (Err(_), Err(RuntimeError::IllegalOpcode { byte: b, page, pc })) => {
                prop_assert_eq!((b, page, pc), (byte, 0, offset));
                prop_assert_eq!(engine.state().cycles, offset as u64);
            }
            (decoded, stepped) => {
                prop_assert!(false, "decode {:?} disagrees with step {:?}", decoded, stepped);
            }
        }
    }
}

// ============================================================================
// Encoder -> Decoder
// ============================================================================

#[test]
fn test_encode_decode_agree_on_legal_bytes() {
    for byte in 0..=255u8 {
        if let Ok(inst) = decode(byte) {
            let canonical = encode(&inst);
            assert_eq!(decode(canonical).unwrap(), inst);
            // HALT ignores rd; every other legal byte is already canonical
            assert!(canonical == byte || inst == Instruction::Halt, "byte {byte:#04x}");
        }
    }
}

#[test]
fn test_describe_matches_format() {
    let inst = Instruction::Sli { rd: riscy_spec::Register::C, imm: 0xF };
    assert_eq!(describe(encode(&inst)), format(&inst));
    assert_eq!(describe(0xB0), ".byte 0xb0");
}
