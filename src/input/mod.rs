// src/input/mod.rs

//! Line-oriented input shared by every command.
//!
//! [`LineInput`] wraps any async buffered reader (stdin, a file, or an
//! in-memory slice in tests) and hands out lines one at a time. Single values
//! (base duration, worker count) are read with [`LineInput::read_value`]; the
//! rest of the stream is parsed in one go by [`LineInput::parse_remaining`],
//! which fails on the first line that does not parse.

use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::{debug, trace};

use crate::errors::{Result, StepdagError};

/// A value that can be parsed from exactly one input line.
pub trait ParseLine: Sized {
    /// Human-readable name used in parse errors ("requirement", ...).
    const WHAT: &'static str;

    fn parse_line(line: &str) -> Option<Self>;
}

/// Boxed reader so stdin and files share one concrete `LineInput` type.
pub type DynReader = Box<dyn AsyncBufRead + Unpin + Send>;

/// Sequential line reader over an async input stream.
pub struct LineInput<R> {
    lines: Lines<R>,
    /// Number of lines consumed so far (1-based number of the last line).
    line_no: usize,
}

impl<R> LineInput<R>
where
    R: AsyncBufRead + Unpin,
{
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// Next raw line, or `None` at end of stream.
    pub async fn next_line(&mut self) -> Result<Option<String>> {
        let line = self.lines.next_line().await?;
        if line.is_some() {
            self.line_no += 1;
        }
        Ok(line)
    }

    /// Read one line and parse it with `parse`.
    ///
    /// `what` names the value for the error raised when the stream ends first.
    pub async fn read_value<T, F>(&mut self, what: &'static str, parse: F) -> Result<T>
    where
        F: FnOnce(&str) -> Result<T>,
    {
        match self.next_line().await? {
            Some(line) => {
                trace!(line_no = self.line_no, what, "read value line");
                parse(&line)
            }
            None => Err(StepdagError::MissingInput(what)),
        }
    }

    /// Read all remaining lines and parse each one as `T`.
    ///
    /// Blank lines are skipped. The first non-blank line that does not parse
    /// aborts the whole read; no partial result is returned.
    pub async fn parse_remaining<T: ParseLine>(&mut self) -> Result<Vec<T>> {
        let mut parsed = Vec::new();

        while let Some(line) = self.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            match T::parse_line(&line) {
                Some(value) => parsed.push(value),
                None => {
                    return Err(StepdagError::Parse {
                        line_no: self.line_no,
                        line,
                        reason: T::WHAT,
                    });
                }
            }
        }

        debug!(count = parsed.len(), what = T::WHAT, "parsed input lines");
        Ok(parsed)
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.line_no
    }
}

impl LineInput<DynReader> {
    /// Line input over the process's standard input.
    pub fn stdin() -> Self {
        LineInput::new(Box::new(BufReader::new(tokio::io::stdin())) as DynReader)
    }

    /// Line input over a file on disk.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref()).await?;
        Ok(LineInput::new(Box::new(BufReader::new(file)) as DynReader))
    }
}

/// Parse a minimum step duration: a non-negative integer.
pub fn parse_base_duration(line: &str) -> Result<u64> {
    line.trim()
        .parse::<u64>()
        .map_err(|_| StepdagError::InvalidBaseDuration(line.to_string()))
}

/// Parse a worker count: a positive integer.
pub fn parse_worker_count(line: &str) -> Result<usize> {
    match line.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(StepdagError::InvalidWorkerCount(line.to_string())),
    }
}
