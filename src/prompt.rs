//! Line input for interactive commands.

use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

/// Result of asking the user for a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Line(String),
    /// Ctrl-C or end of input.
    Cancelled,
}

/// Source of user input lines.
pub trait Prompt {
    fn ask(&mut self, prompt: &str) -> Result<Answer, ReadlineError>;
}

impl Prompt for Editor<(), DefaultHistory> {
    fn ask(&mut self, prompt: &str) -> Result<Answer, ReadlineError> {
        match self.readline(prompt) {
            Ok(line) => Ok(Answer::Line(line.trim().to_string())),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(Answer::Cancelled),
            Err(e) => Err(e),
        }
    }
}

/// Replays a fixed list of lines, then reports cancellation.
#[cfg(test)]
pub struct Scripted(pub std::collections::VecDeque<String>);

#[cfg(test)]
impl Scripted {
    pub fn new(lines: &[&str]) -> Self {
        Self(lines.iter().map(|l| l.to_string()).collect())
    }
}

#[cfg(test)]
impl Prompt for Scripted {
    fn ask(&mut self, _prompt: &str) -> Result<Answer, ReadlineError> {
        Ok(self
            .0
            .pop_front()
            .map(Answer::Line)
            .unwrap_or(Answer::Cancelled))
    }
}
