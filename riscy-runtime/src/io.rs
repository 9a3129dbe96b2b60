//! Character console used by OUT, IN and the read macro

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// Character-oriented console
pub trait Console: Send {
    /// Write text without a trailing newline
    fn write_str(&mut self, text: &str) -> io::Result<()>;

    /// Read one line (without the line terminator). End of input yields an
    /// empty string.
    fn read_line(&mut self) -> io::Result<String>;
}

/// Process standard input / output
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

impl Console for StdConsole {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())?;
        out.flush()
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        let trimmed = line.trim_end_matches(&['\r', '\n'][..]).len();
        line.truncate(trimmed);
        Ok(line)
    }
}

#[derive(Debug, Default)]
struct Buffers {
    inputs: VecDeque<String>,
    output: String,
}

/// In-memory console with scripted input lines.
///
/// Clones share the same buffers, so a test can keep one handle while the
/// engine owns another.
#[derive(Debug, Default, Clone)]
pub struct BufferedConsole {
    inner: Arc<Mutex<Buffers>>,
}

impl BufferedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let buffers = Buffers {
            inputs: inputs.into_iter().map(Into::into).collect(),
            output: String::new(),
        };
        Self {
            inner: Arc::new(Mutex::new(buffers)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Buffers> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queue another input line
    pub fn push_input(&self, line: impl Into<String>) {
        self.lock().inputs.push_back(line.into());
    }

    /// Everything written so far
    pub fn output(&self) -> String {
        self.lock().output.clone()
    }

    pub fn take_output(&self) -> String {
        std::mem::take(&mut self.lock().output)
    }

    /// Input lines not yet consumed
    pub fn pending_inputs(&self) -> usize {
        self.lock().inputs.len()
    }
}

impl Console for BufferedConsole {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.lock().output.push_str(text);
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<String> {
        Ok(self.lock().inputs.pop_front().unwrap_or_default())
    }
}

/// Character printed by OUT; non-ASCII bytes print as `?`
pub fn ascii_char(byte: u8) -> char {
    if byte.is_ascii() {
        byte as char
    } else {
        '?'
    }
}
