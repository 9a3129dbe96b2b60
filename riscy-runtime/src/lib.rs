//! # Riscy Runtime
//!
//! Execute Riscy programs on a simulated 8-bit paged-memory machine.
//!
//! ## Features
//!
//! - **4 registers**: A, B, C, D
//! - **Paged memory**: 256 pages × 256 bytes with independent code, data and
//!   stack page selectors
//! - **Debug macros**: poke/peek memory outside instruction execution
//! - **Trace sinks**: swappable [`Logger`] implementations (none, console,
//!   file, fan-out, in-memory)
//! - **Console I/O**: OUT / IN through a swappable [`Console`]
//!
//! ## Example
//!
//! ```rust
//! use riscy_runtime::{Engine, HaltReason};
//!
//! let mut engine = Engine::new();
//! engine.execute_write_macro(&[0x01, 0xFE, 0x02]).unwrap();
//! // SLI A, 0xA; SLI A, 0xB; HALT
//! engine.load_program(&[0xE2, 0xE3, 0x01]).unwrap();
//!
//! let result = engine.run().unwrap();
//! assert_eq!(result.halt_reason, HaltReason::Halt);
//! assert_eq!(engine.state().regs[0], 0xAB);
//! ```

pub mod error;
pub mod state;
pub mod memory;
pub mod io;
pub mod logger;
pub mod execute;
pub mod engine;

pub use state::{EngineState, HaltReason, RunState};
pub use memory::Memory;
pub use io::{BufferedConsole, Console, StdConsole};
pub use logger::{
    ConsoleLogger, FanoutLogger, FileLogger, Logger, MemoryLogger, NoneLogger, WriterLogger,
};
pub use engine::{Engine, EngineConfig, ExecutionResult, StopHandle};
pub use error::{MacroKind, RuntimeError};

/// Simple execution helper
///
/// Loads `program` into a fresh engine with the given configuration, runs it
/// with scripted console input, and returns the result together with the
/// console output.
pub fn run_program<I, S>(
    program: &[u8],
    config: EngineConfig,
    inputs: I,
) -> Result<(ExecutionResult, String), RuntimeError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let console = BufferedConsole::new(inputs);
    let mut engine = Engine::with_config(config);
    engine.set_console(Box::new(console.clone()));
    engine.load_program(program)?;
    let result = engine.run()?;
    Ok((result, console.take_output()))
}
