//! Instruction formatting to mnemonic text

use riscy_spec::Instruction;

/// Format instruction as assembly-style text
pub fn format(instr: &Instruction) -> String {
    let mnemonic = instr.mnemonic();
    match *instr {
        Instruction::Nop | Instruction::Halt => mnemonic.to_string(),

        // ========== Register-register ==========
        Instruction::Sub { rd, rs }
        | Instruction::Add { rd, rs }
        | Instruction::Nand { rd, rs } => {
            format!("{mnemonic} {rd}, {rs}")
        }

        // ========== Memory-indirect ==========
        Instruction::Load { rd, rs }
        | Instruction::Store { rd, rs }
        | Instruction::Jalr { rd, rs }
        | Instruction::Jmpfar { rd, rs } => format!("{mnemonic} {rd}, [{rs}]"),

        Instruction::Sli { rd, imm } => format!("{mnemonic} {rd}, {imm:#x}"),

        // ========== Single register ==========
        Instruction::Page { rd }
        | Instruction::Inc { rd }
        | Instruction::Dec { rd }
        | Instruction::Push { rd }
        | Instruction::Pop { rd }
        | Instruction::Stackpage { rd }
        | Instruction::Skipz { rd }
        | Instruction::Skipnz { rd }
        | Instruction::Skipl { rd }
        | Instruction::Skipge { rd }
        | Instruction::Out { rd }
        | Instruction::In { rd } => format!("{mnemonic} {rd}"),
    }
}
