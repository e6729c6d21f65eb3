//! Line-based prompts over any reader/writer pair.

use super::InteractiveError;
use owo_colors::{OwoColorize, Stream};
use std::io::{BufRead, Write};

/// Asks questions on `output` and reads answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a line.
    pub fn say(&mut self, text: &str) -> Result<(), InteractiveError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Print a problem with the last answer.
    pub fn complain(&mut self, problem: &str) -> Result<(), InteractiveError> {
        self.say(&format!(
            "  {} {problem}",
            "✗".if_supports_color(Stream::Stdout, |s| s.red())
        ))
    }

    /// Ask a question and return the trimmed answer.
    ///
    /// Fails with [`InteractiveError::Eof`] when input is closed.
    pub fn ask(&mut self, question: &str) -> Result<String, InteractiveError> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InteractiveError::Eof);
        }
        Ok(line.trim().to_string())
    }

    /// Ask for a non-negative integer, re-asking until one is given.
    ///
    /// An empty answer yields `default`.
    pub fn ask_u32(&mut self, question: &str, default: u32) -> Result<u32, InteractiveError> {
        loop {
            let answer = self.ask(&format!("{question} (default {default}): "))?;
            if answer.is_empty() {
                return Ok(default);
            }
            match answer.parse() {
                Ok(value) => return Ok(value),
                Err(_) => self.complain(&format!("`{answer}` is not a whole number"))?,
            }
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
