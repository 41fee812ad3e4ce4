//! Line-based console wrapper over any reader/writer pair.
//!
//! The CLI hands in locked stdin/stdout; tests hand in a `Cursor` and a
//! `Vec<u8>`.

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, BufRead, Write};

/// Default answer semantics for a yes/no question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmPolicy {
    /// Proceeds unless the answer is `n`. Used before saving.
    OptOut,
    /// Proceeds only when the answer is `y`. Used before deleting.
    OptIn,
}

impl ConfirmPolicy {
    /// Decides on a raw answer; `None` means input ended.
    pub fn decide(self, answer: Option<&str>) -> bool {
        let answer = answer.map(|value| value.trim().to_lowercase());
        match self {
            Self::OptOut => answer.as_deref() != Some("n"),
            Self::OptIn => answer.as_deref() == Some("y"),
        }
    }

    /// Prompt suffix showing the default in upper case.
    pub fn hint(self) -> &'static str {
        match self {
            Self::OptOut => "[Yn]",
            Self::OptIn => "[yN]",
        }
    }
}

/// Interactive console.
pub struct Console<R, W> {
    input: R,
    output: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            clear_screen: true,
        }
    }

    /// Disables screen clearing, e.g. when output is not a terminal.
    pub fn without_screen_clearing(mut self) -> Self {
        self.clear_screen = false;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes one line.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Clears the terminal and homes the cursor.
    pub fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    /// Writes `prompt` and reads one line without its terminator.
    ///
    /// Returns `None` once input has ended.
    pub fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Reads every line up to end of input (Ctrl+D on a terminal).
    ///
    /// A terminal keeps delivering input after the end-of-input signal, so
    /// later prompts still work.
    pub fn read_block(&mut self) -> io::Result<String> {
        let mut block = String::new();
        while let Some(line) = self.read_line()? {
            block.push_str(&line);
            block.push('\n');
        }
        Ok(block)
    }

    /// Asks a yes/no question under `policy`.
    pub fn confirm(&mut self, question: &str, policy: ConfirmPolicy) -> io::Result<bool> {
        let answer = self.prompt(&format!("{question} {} ", policy.hint()))?;
        Ok(policy.decide(answer.as_deref()))
    }

    // Bytes that are not UTF-8 are replaced rather than failing the read;
    // the caller then sees an unrecognized line.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        while matches!(bytes.last(), Some(b'\n' | b'\r')) {
            bytes.pop();
        }
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }
}
