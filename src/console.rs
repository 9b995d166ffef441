//! Line-oriented terminal boundary.
//!
//! The binary builds a [`Console`] over locked stdin/stdout; tests feed it a
//! `Cursor` and collect the transcript in a `Vec<u8>`.

use crate::error::Result;
use std::io::{BufRead, Write};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints `prompt` on its own line and reads one answer.
    ///
    /// The line terminator is stripped; nothing else is trimmed. Returns
    /// `None` once input is exhausted.
    ///
    /// # Errors
    ///
    /// Propagates read and write failures.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        writeln!(self.output, "\n{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line.strip_suffix('\n').unwrap_or(&line);
        let answer = answer.strip_suffix('\r').unwrap_or(answer);
        Ok(Some(answer.to_owned()))
    }

    /// Asks a yes/no question; anything but `yes` or `y` (any case) is no.
    ///
    /// # Errors
    ///
    /// Propagates read and write failures.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.ask(prompt)?;
        Ok(answer.as_deref().is_some_and(is_affirmative))
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "yes" | "y")
}
