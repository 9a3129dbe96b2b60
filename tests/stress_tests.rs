//! Stress tests for the Riscy simulator
//!
//! Full pages, long loops and wraparound edges.

use riscy_runtime::{BufferedConsole, Engine, EngineConfig, HaltReason};
use riscy_spec::encoding::encode_program;
use riscy_spec::{Instruction, Register};

use Register::{A, B, C, D};

fn quiet(config: EngineConfig) -> Engine {
    let mut engine = Engine::with_config(config);
    engine.set_console(Box::new(BufferedConsole::default()));
    engine
}

// ============================================================================
// Large programs
// ============================================================================

#[test]
fn test_full_page_program() {
    let mut program = vec![Instruction::Inc { rd: A }; 255];
    program.push(Instruction::Halt);

    let mut engine = quiet(EngineConfig::default());
    engine.load_program(&encode_program(&program)).unwrap();
    let result = engine.run().unwrap();

    assert_eq!(result.cycles, 256);
    assert_eq!(engine.state().read_reg(A), 255);
    // HALT at 0xFF wraps the PC without touching the code page
    assert_eq!(engine.state().pc, 0);
    assert_eq!(engine.state().code_page, 0);
}

#[test]
fn test_256_iteration_loop() {
    let program = encode_program(&[
        Instruction::Sli { rd: C, imm: 2 },  // 0: C = loop head
        Instruction::Nop,                    // 1
        Instruction::Inc { rd: A },          // 2: loop head
        Instruction::Inc { rd: B },          // 3
        Instruction::Skipz { rd: B },        // 4
        Instruction::Jalr { rd: D, rs: C },  // 5
        Instruction::Halt,                   // 6
    ]);

    let mut engine = quiet(EngineConfig::default());
    engine.load_program(&program).unwrap();
    let result = engine.run().unwrap();

    assert_eq!(result.cycles, 2 + 256 * 3 + 255 + 1);
    assert_eq!(engine.state().read_reg(A), 0);
    assert_eq!(engine.state().read_reg(D), 6);
}

#[test]
fn test_push_full_stack_page() {
    let program = encode_program(&[
        Instruction::Sli { rd: A, imm: 5 },   // 0
        Instruction::Stackpage { rd: A },     // 1: stack on page 5
        Instruction::Sli { rd: C, imm: 3 },   // 2: C = loop head
        Instruction::Push { rd: B },          // 3: loop head
        Instruction::Inc { rd: B },           // 4
        Instruction::Skipz { rd: B },         // 5
        Instruction::Jalr { rd: D, rs: C },   // 6
        Instruction::Halt,                    // 7
    ]);

    let mut engine = quiet(EngineConfig::default());
    engine.load_program(&program).unwrap();
    engine.run().unwrap();

    assert_eq!(engine.state().sp, 0);
    for value in 0..=255u8 {
        assert_eq!(engine.memory().read(5, 0xFF - value), value);
    }
    // code page untouched by the stack
    assert_eq!(engine.memory().read(0, 0xFF), 0);
}

// ============================================================================
// Page carry
// ============================================================================

#[test]
fn test_page_carry_runs_across_pages() {
    let mut engine = quiet(EngineConfig { page_carry: true, ..EngineConfig::default() });
    engine.execute_write_macro(&[0x03, 0x10, 0x01]).unwrap();

    let result = engine.run().unwrap();
    assert_eq!(result.halt_reason, HaltReason::Halt);
    assert_eq!(result.cycles, 3 * 256 + 0x10 + 1);
    assert_eq!(engine.state().code_page, 3);
}

#[test]
fn test_without_page_carry_code_page_is_fixed() {
    let mut engine = quiet(EngineConfig { max_cycles: Some(100_000), ..EngineConfig::default() });
    engine.execute_write_macro(&[0x01, 0x00, 0x01]).unwrap();

    let result = engine.run().unwrap();
    assert_eq!(result.halt_reason, HaltReason::CycleLimit);
    assert_eq!(result.cycles, 100_000);
    assert_eq!(engine.state().code_page, 0);
}

#[test]
fn test_page_carry_wraps_last_page() {
    let mut engine = quiet(EngineConfig {
        page_carry: true,
        max_cycles: Some(256 * 256 + 1),
        ..EngineConfig::default()
    });

    let result = engine.run().unwrap();
    assert_eq!(result.halt_reason, HaltReason::CycleLimit);
    assert_eq!(engine.state().code_page, 0);
    assert_eq!(engine.state().pc, 1);
}

// ============================================================================
// Macros
// ============================================================================

#[test]
fn test_macro_covers_whole_page() {
    let mut engine = quiet(EngineConfig::default());

    let writes: Vec<u8> = (0..=255u8).flat_map(|offset| [0x07, offset, offset ^ 0x5A]).collect();
    engine.execute_write_macro(&writes).unwrap();

    let reads: Vec<u8> = (0..=255u8).flat_map(|offset| [0x07, offset]).collect();
    let values = engine.execute_read_macro(&reads).unwrap();

    assert_eq!(values.len(), 256);
    for (offset, value) in values.into_iter().enumerate() {
        assert_eq!(value, offset as u8 ^ 0x5A);
    }
}
