//! # Trace Sinks
//!
//! The engine reports every executed instruction, register dumps, macro
//! activity and memory dumps to a [`Logger`]. Sinks are swappable at any
//! time; the default is [`NoneLogger`].
//!
//! | sink | destination |
//! |---|---|
//! | [`NoneLogger`] | nowhere |
//! | [`ConsoleLogger`] | standard output |
//! | [`FileLogger`] | a log file (created or truncated on open) |
//! | [`FanoutLogger`] | every wrapped sink, in order |
//! | [`MemoryLogger`] | an in-memory buffer shared between clones |

use riscy_decoder::format;
use riscy_spec::TraceRecord;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Trace sink consumed by the engine
pub trait Logger: Send {
    /// Emit raw text
    fn write(&mut self, content: &str) -> io::Result<()>;

    /// Emit text followed by a newline
    fn write_line(&mut self, content: &str) -> io::Result<()>;

    /// Emit an empty line
    fn blank_line(&mut self) -> io::Result<()>;

    /// Emit one executed-instruction record
    fn log_instruction(&mut self, record: &TraceRecord) -> io::Result<()>;

    /// Flush buffered output
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Text form of an instruction record shared by the text sinks
pub fn instruction_line(record: &TraceRecord) -> String {
    format!(
        "Executed: \"{}\", Literal: {:08b}",
        format(&record.instruction),
        record.raw
    )
}

// ============================================================================
// No-op
// ============================================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct NoneLogger;

impl Logger for NoneLogger {
    fn write(&mut self, _content: &str) -> io::Result<()> {
        Ok(())
    }

    fn write_line(&mut self, _content: &str) -> io::Result<()> {
        Ok(())
    }

    fn blank_line(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn log_instruction(&mut self, _record: &TraceRecord) -> io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// Writer-backed sinks
// ============================================================================

/// Text sink over any writer
#[derive(Debug)]
pub struct WriterLogger<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> WriterLogger<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Logger for WriterLogger<W> {
    fn write(&mut self, content: &str) -> io::Result<()> {
        self.out.write_all(content.as_bytes())
    }

    fn write_line(&mut self, content: &str) -> io::Result<()> {
        writeln!(self.out, "{content}")
    }

    fn blank_line(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    fn log_instruction(&mut self, record: &TraceRecord) -> io::Result<()> {
        writeln!(self.out, "{}", instruction_line(record))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Standard output sink
pub type ConsoleLogger = WriterLogger<io::Stdout>;

impl Default for ConsoleLogger {
    fn default() -> Self {
        WriterLogger::new(io::stdout())
    }
}

impl ConsoleLogger {
    pub fn stdout() -> Self {
        Self::default()
    }
}

/// File sink
pub type FileLogger = WriterLogger<BufWriter<File>>;

impl FileLogger {
    /// Create (or truncate) the log file
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "opened trace log");
        Ok(WriterLogger::new(BufWriter::new(file)))
    }
}

// ============================================================================
// Fan-out
// ============================================================================

/// Forwards every call to each wrapped sink in order; stops at the first
/// failing sink
#[derive(Default)]
pub struct FanoutLogger {
    sinks: Vec<Box<dyn Logger>>,
}

impl FanoutLogger {
    pub fn new(sinks: Vec<Box<dyn Logger>>) -> Self {
        Self { sinks }
    }

    /// Console plus file, the combination the CLI uses for `--debug --logfile`
    pub fn console_and_file(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(vec![
            Box::new(ConsoleLogger::stdout()),
            Box::new(FileLogger::create(path)?),
        ]))
    }

    pub fn push(&mut self, sink: Box<dyn Logger>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    fn each(&mut self, mut f: impl FnMut(&mut dyn Logger) -> io::Result<()>) -> io::Result<()> {
        for sink in &mut self.sinks {
            f(sink.as_mut())?;
        }
        Ok(())
    }
}

impl Logger for FanoutLogger {
    fn write(&mut self, content: &str) -> io::Result<()> {
        self.each(|sink| sink.write(content))
    }

    fn write_line(&mut self, content: &str) -> io::Result<()> {
        self.each(|sink| sink.write_line(content))
    }

    fn blank_line(&mut self) -> io::Result<()> {
        self.each(|sink| sink.blank_line())
    }

    fn log_instruction(&mut self, record: &TraceRecord) -> io::Result<()> {
        self.each(|sink| sink.log_instruction(record))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.each(|sink| sink.flush())
    }
}

// ============================================================================
// In-memory
// ============================================================================

#[derive(Debug, Default)]
struct Captured {
    text: String,
    records: Vec<TraceRecord>,
}

/// Captures text and structured records; clones share the same buffer
#[derive(Debug, Default, Clone)]
pub struct MemoryLogger {
    inner: Arc<Mutex<Captured>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Captured> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Text emitted so far (instruction records included in text form)
    pub fn text(&self) -> String {
        self.lock().text.clone()
    }

    /// Structured instruction records emitted so far
    pub fn records(&self) -> Vec<TraceRecord> {
        self.lock().records.clone()
    }

    pub fn clear(&self) {
        let mut captured = self.lock();
        captured.text.clear();
        captured.records.clear();
    }
}

impl Logger for MemoryLogger {
    fn write(&mut self, content: &str) -> io::Result<()> {
        self.lock().text.push_str(content);
        Ok(())
    }

    fn write_line(&mut self, content: &str) -> io::Result<()> {
        let mut captured = self.lock();
        captured.text.push_str(content);
        captured.text.push('\n');
        Ok(())
    }

    fn blank_line(&mut self) -> io::Result<()> {
        self.lock().text.push('\n');
        Ok(())
    }

    fn log_instruction(&mut self, record: &TraceRecord) -> io::Result<()> {
        let mut captured = self.lock();
        captured.text.push_str(&instruction_line(record));
        captured.text.push('\n');
        captured.records.push(record.clone());
        Ok(())
    }
}
