//! `riscy` - load a Riscy program image and run it on the simulator
//!
//! ```text
//! riscy program.bin --debug --logfile trace.log --poke 01:fe:02 --peek 01:ff
//! ```

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use riscy_runtime::{
    ConsoleLogger, Engine, EngineConfig, FanoutLogger, FileLogger, HaltReason, Logger, NoneLogger,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "riscy")]
#[command(version, about = "Run a Riscy program image on the simulator", long_about = None)]
struct Args {
    /// Raw program image, loaded at offset 0 of the code page
    program: PathBuf,

    /// Trace every instruction to standard output
    #[arg(short, long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Write the trace to this file (to both with --debug)
    #[arg(short, long, value_name = "PATH")]
    logfile: Option<PathBuf>,

    /// Set a memory cell before loading, as hex PP:AA:VV
    #[arg(long, value_name = "PP:AA:VV", value_parser = parse_poke)]
    poke: Vec<[u8; 3]>,

    /// Report a memory cell after the run, as hex PP:AA
    #[arg(long, value_name = "PP:AA", value_parser = parse_peek)]
    peek: Vec<[u8; 2]>,

    /// Stop after this many cycles
    #[arg(long, value_name = "N")]
    max_cycles: Option<u64>,

    /// Let sequential execution and loading continue on the next code page
    #[arg(long, action = ArgAction::SetTrue)]
    page_carry: bool,

    /// Page dumped after loading and after the run; repeatable (default 0, 1, 2)
    #[arg(long = "dump-page", value_name = "PAGE")]
    dump_pages: Vec<u8>,
}

impl Args {
    fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig {
            page_carry: self.page_carry,
            max_cycles: self.max_cycles,
            ..EngineConfig::default()
        };
        if !self.dump_pages.is_empty() {
            config.dump_pages = self.dump_pages.clone();
        }
        config
    }

    fn write_macro(&self) -> Vec<u8> {
        self.poke.iter().flatten().copied().collect()
    }

    fn read_macro(&self) -> Vec<u8> {
        self.peek.iter().flatten().copied().collect()
    }
}

fn parse_fields<const N: usize>(text: &str) -> std::result::Result<[u8; N], String> {
    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() != N {
        return Err(format!("expected {N} colon-separated hex bytes, got {text:?}"));
    }

    let mut fields = [0u8; N];
    for (field, part) in fields.iter_mut().zip(parts) {
        *field = u8::from_str_radix(part, 16)
            .map_err(|e| format!("invalid hex byte {part:?}: {e}"))?;
    }
    Ok(fields)
}

fn parse_poke(text: &str) -> std::result::Result<[u8; 3], String> {
    parse_fields(text)
}

fn parse_peek(text: &str) -> std::result::Result<[u8; 2], String> {
    parse_fields(text)
}

/// Pick the trace sink from the `--debug` / `--logfile` combination
fn build_logger(debug: bool, logfile: Option<&Path>) -> Result<Box<dyn Logger>> {
    let logger: Box<dyn Logger> = match (debug, logfile) {
        (true, Some(path)) => Box::new(
            FanoutLogger::console_and_file(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?,
        ),
        (false, Some(path)) => Box::new(
            FileLogger::create(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?,
        ),
        (true, None) => Box::new(ConsoleLogger::stdout()),
        (false, None) => Box::new(NoneLogger),
    };
    Ok(logger)
}

fn run(args: &Args) -> Result<HaltReason> {
    let program = fs::read(&args.program)
        .with_context(|| format!("failed to read program {}", args.program.display()))?;

    let mut engine = Engine::with_config(args.engine_config());
    engine.set_logger(build_logger(args.debug, args.logfile.as_deref())?);

    engine
        .execute_write_macro(&args.write_macro())
        .context("write macro failed")?;
    engine.load_program(&program).context("failed to load program")?;

    let result = engine.run().context("execution aborted")?;
    match result.halt_reason {
        HaltReason::Halt => tracing::info!(cycles = result.cycles, "halted"),
        reason => tracing::warn!(cycles = result.cycles, ?reason, "run ended before HALT"),
    }

    engine
        .execute_read_macro(&args.read_macro())
        .context("read macro failed")?;

    Ok(result.halt_reason)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    run(&args)?;
    Ok(())
}
