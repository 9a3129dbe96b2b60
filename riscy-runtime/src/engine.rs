//! Simulation engine for the Riscy ISA

use crate::error::{MacroKind, Result, RuntimeError};
use crate::execute::{execute, Flow};
use crate::io::{Console, StdConsole};
use crate::logger::{Logger, NoneLogger};
use crate::memory::Memory;
use crate::state::{EngineState, HaltReason};
use riscy_spec::{TraceRecord, PAGE_SIZE};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Advance the code page when sequential execution (or program
    /// loading) runs past offset 0xFF. Off: the PC wraps within the page.
    pub page_carry: bool,

    /// Stop with [`HaltReason::CycleLimit`] once this many cycles have
    /// completed. `None` runs until HALT.
    pub max_cycles: Option<u64>,

    /// Pages dumped through the logger after loading and after each run
    pub dump_pages: Vec<u8>,

    /// Emit the register lines after every instruction record
    pub trace_registers: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_carry: false,
            max_cycles: None,
            dump_pages: vec![0, 1, 2],
            trace_registers: true,
        }
    }
}

/// Outcome of a run that did not fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Total cycles executed by the engine
    pub cycles: u64,

    /// Reason for returning
    pub halt_reason: HaltReason,
}

/// Cloneable stop signal, checked once per cycle.
///
/// The engine clears the flag when it observes it, so a later `run`
/// resumes where the stopped one left off.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    fn take(&self) -> bool {
        self.flag.swap(false, Ordering::SeqCst)
    }
}

/// Riscy simulation engine
pub struct Engine {
    /// Registers, PC, SP, page selectors, halt flag
    state: EngineState,

    /// 256 × 256 paged memory
    memory: Memory,

    /// Configuration
    config: EngineConfig,

    /// Trace sink
    logger: Box<dyn Logger>,

    /// Console for OUT / IN and the read macro
    console: Box<dyn Console>,

    stop: StopHandle,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("memory", &self.memory)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Create an engine with the default configuration, no tracing and the
    /// process console
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            state: EngineState::new(),
            memory: Memory::new(),
            config,
            logger: Box::new(NoneLogger),
            console: Box::new(StdConsole),
            stop: StopHandle::default(),
        }
    }

    /// Restore the power-on state: registers, selectors and memory are
    /// cleared. Logger, console and configuration are kept.
    pub fn reset(&mut self) {
        self.state = EngineState::new();
        self.memory.clear();
    }

    /// Replace the trace sink
    pub fn set_logger(&mut self, logger: Box<dyn Logger>) {
        self.logger = logger;
    }

    /// Replace the console used by OUT, IN and the read macro
    pub fn set_console(&mut self, console: Box<dyn Console>) {
        self.console = console;
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get current state (for debugging)
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Get memory (for debugging)
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    // ========================================================================
    // Debug macros
    // ========================================================================

    /// Write one memory cell outside instruction execution
    pub fn poke(&mut self, page: u8, address: u8, value: u8) -> Result<()> {
        self.memory.write(page, address, value);
        self.logger
            .write_line(&format!("Setting [{page:02x}, {address:02x}] to {value:02x}"))?;
        Ok(())
    }

    /// Read one memory cell and report it to the console and the logger
    pub fn peek(&mut self, page: u8, address: u8) -> Result<u8> {
        let value = self.memory.read(page, address);
        let message = format!("Reading {value:02x} from [{page:02x}, {address:02x}]");
        self.console.write_str(&message)?;
        self.console.write_str("\n")?;
        self.logger.write_line(&message)?;
        Ok(value)
    }

    /// Apply flat `(page, address, value)` triples.
    ///
    /// The length is checked before any record is applied.
    pub fn execute_write_macro(&mut self, records: &[u8]) -> Result<()> {
        check_macro(MacroKind::Write, records)?;
        tracing::debug!(records = records.len() / 3, "applying write macro");

        for record in records.chunks_exact(MacroKind::Write.record_size()) {
            self.poke(record[0], record[1], record[2])?;
        }
        Ok(())
    }

    /// Report flat `(page, address)` pairs, returning the values read.
    ///
    /// The length is checked before any record is read.
    pub fn execute_read_macro(&mut self, records: &[u8]) -> Result<Vec<u8>> {
        check_macro(MacroKind::Read, records)?;
        tracing::debug!(records = records.len() / 2, "applying read macro");

        records
            .chunks_exact(MacroKind::Read.record_size())
            .map(|record| self.peek(record[0], record[1]))
            .collect()
    }

    // ========================================================================
    // Program loading
    // ========================================================================

    /// Copy a program image to offset 0 of the current code page.
    ///
    /// The code page selector is never changed. With `page_carry` a program
    /// longer than one page continues on the following pages; without it the
    /// offset wraps and later bytes overwrite earlier ones.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        let start_page = self.state.code_page;
        let mut page = start_page;
        let mut offset: u8 = 0;

        for &byte in program {
            self.memory.write(page, offset, byte);
            let (next, wrapped) = offset.overflowing_add(1);
            offset = next;
            if wrapped && self.config.page_carry {
                page = page.wrapping_add(1);
            }
        }

        if program.len() > PAGE_SIZE && !self.config.page_carry {
            tracing::warn!(
                len = program.len(),
                "program longer than one page wrapped onto itself; enable page carry to span pages"
            );
        }
        tracing::debug!(len = program.len(), page = start_page, "program loaded");

        self.dump_memory()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Run until HALT, the stop signal, or the cycle budget, then dump memory.
    ///
    /// An illegal opcode or invalid console input aborts the run and is
    /// returned as an error; no dump is emitted in that case.
    pub fn run(&mut self) -> Result<ExecutionResult> {
        let halt_reason = loop {
            if self.state.is_halted() {
                break HaltReason::Halt;
            }
            if self.stop.take() {
                break HaltReason::Stopped;
            }
            if self.config.max_cycles.is_some_and(|limit| self.state.cycles >= limit) {
                break HaltReason::CycleLimit;
            }

            if let Err(err) = self.step() {
                tracing::warn!(error = %err, cycles = self.state.cycles, "run aborted");
                if let Err(flush_err) = self.logger.flush() {
                    tracing::warn!(error = %flush_err, "trace flush failed after fault");
                }
                return Err(err);
            }
        };

        tracing::debug!(cycles = self.state.cycles, reason = ?halt_reason, "run finished");
        self.dump_memory()?;
        self.logger.flush()?;

        Ok(ExecutionResult {
            cycles: self.state.cycles,
            halt_reason,
        })
    }

    /// Execute one fetch-decode-execute cycle.
    ///
    /// Returns `None` without doing anything once the engine is halted.
    pub fn step(&mut self) -> Result<Option<TraceRecord>> {
        if self.state.is_halted() {
            return Ok(None);
        }

        // Fetch
        let page = self.state.code_page;
        let pc = self.state.pc;
        let raw = self.memory.read(page, pc);

        // Decode
        let inst = riscy_decoder::decode(raw)
            .map_err(|_| RuntimeError::IllegalOpcode { byte: raw, page, pc })?;

        // Execute
        let flow = execute(&inst, &mut self.state, &mut self.memory, self.console.as_mut())?;

        // Write-back
        self.write_back(flow);

        let after = self.state.snapshot();
        let record = TraceRecord::new(self.state.cycles, page, pc, raw, inst, after);
        self.state.inc_cycles();

        tracing::trace!(
            cycle = record.cycle,
            page,
            pc,
            raw,
            inst = %riscy_decoder::format(&inst),
            "executed"
        );
        self.trace(&record)?;

        Ok(Some(record))
    }

    fn write_back(&mut self, flow: Flow) {
        let (next, wrapped) = match flow {
            Flow::Next => self.state.pc.overflowing_add(1),
            Flow::Skip => self.state.pc.overflowing_add(2),
            Flow::Jump(target) => {
                self.state.pc = target;
                return;
            }
        };

        self.state.pc = next;
        if wrapped && self.config.page_carry {
            self.state.code_page = self.state.code_page.wrapping_add(1);
        }
    }

    fn trace(&mut self, record: &TraceRecord) -> Result<()> {
        self.logger.log_instruction(record)?;
        if self.config.trace_registers {
            for line in record.after.to_string().lines() {
                self.logger.write_line(line)?;
            }
        }
        self.logger.blank_line()?;
        Ok(())
    }

    /// Emit the hex grid of every configured diagnostic page
    pub fn dump_memory(&mut self) -> Result<()> {
        for &page in &self.config.dump_pages {
            self.logger.write_line(&format!("Dumping mem page {page}:"))?;
            self.logger.write_line(&self.memory.dump_page(page))?;
            self.logger.blank_line()?;
        }
        Ok(())
    }
}

fn check_macro(kind: MacroKind, records: &[u8]) -> Result<()> {
    let record = kind.record_size();
    if records.len() % record != 0 {
        return Err(RuntimeError::MalformedMacro {
            kind,
            len: records.len(),
            record,
        });
    }
    Ok(())
}
