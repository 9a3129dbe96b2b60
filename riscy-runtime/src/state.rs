//! Engine state: register file, PC, SP and page selectors

use riscy_spec::trace::MachineSnapshot;
use riscy_spec::{Register, NUM_REGISTERS};

/// Why a run returned normally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// HALT instruction executed
    Halt,
    /// External stop signal observed
    Stopped,
    /// Configured cycle budget exhausted
    CycleLimit,
}

/// Run state of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Halted,
}

/// Architectural state of the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineState {
    /// General-purpose registers (A, B, C, D)
    pub regs: [u8; NUM_REGISTERS],

    /// Program counter (offset within the code page)
    pub pc: u8,

    /// Stack pointer (offset within the stack page)
    pub sp: u8,

    /// Page instructions are fetched from
    pub code_page: u8,

    /// Page LOAD / STORE address
    pub data_page: u8,

    /// Page PUSH / POP address
    pub stack_page: u8,

    /// Set by HALT; terminal
    pub halted: bool,

    /// Completed cycles
    pub cycles: u64,
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineState {
    pub fn new() -> Self {
        Self {
            regs: [0; NUM_REGISTERS],
            pc: riscy_spec::INITIAL_PC,
            sp: riscy_spec::INITIAL_SP,
            code_page: riscy_spec::INITIAL_CODE_PAGE,
            data_page: riscy_spec::INITIAL_DATA_PAGE,
            stack_page: riscy_spec::INITIAL_STACK_PAGE,
            halted: false,
            cycles: 0,
        }
    }

    #[inline]
    pub fn read_reg(&self, reg: Register) -> u8 {
        self.regs[reg.index()]
    }

    #[inline]
    pub fn write_reg(&mut self, reg: Register, value: u8) {
        self.regs[reg.index()] = value;
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn run_state(&self) -> RunState {
        if self.halted {
            RunState::Halted
        } else {
            RunState::Running
        }
    }

    /// Halt execution
    pub fn halt(&mut self) {
        self.halted = true;
    }

    #[inline]
    pub fn inc_cycles(&mut self) {
        self.cycles += 1;
    }

    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            registers: self.regs,
            pc: self.pc,
            sp: self.sp,
            code_page: self.code_page,
            data_page: self.data_page,
            stack_page: self.stack_page,
        }
    }
}
