//! Read/dispatch/print loop.

use stackkv_core::Session;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// `QUIT` was entered.
    Quit,
    /// The input ran out.
    EndOfInput,
}

/// Drives a [`Session`] from line input.
#[derive(Debug, Clone)]
pub struct Repl {
    session: Session,
}

impl Repl {
    /// Creates a loop over the given session.
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Returns the session being driven.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Reads commands from `input` until `QUIT` or end of input, writing
    /// the prompt and every non-empty reply to `output`.
    ///
    /// Only I/O failures are returned as errors; malformed commands are
    /// reported on `output` and the loop continues. Bytes that are not
    /// valid UTF-8 are replaced with U+FFFD rather than ending the loop.
    pub fn run<R: BufRead, W: Write>(
        &self,
        mut input: R,
        output: &mut W,
    ) -> io::Result<ExitReason> {
        let prompt = self.session.config().prompt.as_str();
        let mut buf = Vec::new();
        let mut lineno = 0usize;

        loop {
            output.write_all(prompt.as_bytes())?;
            output.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                info!(lines = lineno, "end of input");
                return Ok(ExitReason::EndOfInput);
            }
            lineno += 1;
            let line = String::from_utf8_lossy(&buf);

            let Some(reply) = self.session.execute_line(&line) else {
                continue;
            };
            debug!(lineno, depth = self.session.depth(), "executed");

            if !reply.is_silent() {
                writeln!(output, "{reply}")?;
            }
            if reply.is_exit() {
                info!(lines = lineno, "quit");
                return Ok(ExitReason::Quit);
            }
        }
    }
}
