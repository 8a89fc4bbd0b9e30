// ABOUTME: Yes/no confirmation used before any destructive change to known_hosts
// ABOUTME: The engines only see the Prompt trait, so tests can answer with canned replies

use crate::error::{FixError, Result};
use std::io::{self, BufRead, Write};

pub trait Prompt {
    /// Ask `question` and return whether the user answered yes.
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Line-based prompt that keeps asking until it gets `y` or `n`.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        loop {
            write!(self.output, "{question}").map_err(FixError::Prompt)?;
            self.output.flush().map_err(FixError::Prompt)?;

            let mut answer = String::new();
            let read = self.input.read_line(&mut answer).map_err(FixError::Prompt)?;
            // Closed input can never say yes
            if read == 0 {
                tracing::debug!("Input closed while waiting for an answer, treating as no");
                return Ok(false);
            }

            match answer.trim().to_lowercase().as_str() {
                "y" => return Ok(true),
                "n" => return Ok(false),
                other => tracing::trace!("Ignoring answer {:?}", other),
            }
        }
    }
}
