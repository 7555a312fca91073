//! Interactive session state.
//!
//! The session owns the currently loaded automaton. It is created by the
//! REPL loop and handed to each command; nothing here is global.

use afdsim_core::{Automaton, CoreError, Run, State, StateSet, Symbol};
use afdsim_loader::{Format, Loaded};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Where the current automaton came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    File { path: PathBuf, format: Format },
    Manual,
    Example(&'static str),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File { path, format } => write!(f, "{} file {}", format, path.display()),
            Source::Manual => f.write_str("manual construction"),
            Source::Example(name) => write!(f, "built-in example '{}'", name),
        }
    }
}

/// The automaton the session is working with.
#[derive(Debug, Clone)]
pub struct Current {
    pub automaton: Arc<Automaton>,
    pub source: Source,
    pub checksum: Option<String>,
}

/// Per-shell state.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<Current>,
    accepting_override: Option<StateSet>,
    separator: Option<String>,
}

impl Session {
    pub fn new(separator: Option<String>) -> Self {
        Self {
            current: None,
            accepting_override: None,
            separator,
        }
    }

    pub fn current(&self) -> Option<&Current> {
        self.current.as_ref()
    }

    /// Replaces the current automaton with one loaded from disk.
    pub fn set_loaded(&mut self, loaded: Loaded) {
        self.replace(Current {
            automaton: Arc::new(loaded.automaton),
            source: Source::File {
                path: loaded.path,
                format: loaded.format,
            },
            checksum: Some(loaded.checksum),
        });
    }

    /// Replaces the current automaton.
    pub fn set_automaton(&mut self, automaton: Automaton, source: Source) {
        self.replace(Current {
            automaton: Arc::new(automaton),
            source,
            checksum: None,
        });
    }

    fn replace(&mut self, current: Current) {
        // An override names states of the previous automaton.
        self.accepting_override = None;
        tracing::debug!("Session automaton set from {}", current.source);
        self.current = Some(current);
    }

    pub fn accepting_override(&self) -> Option<&StateSet> {
        self.accepting_override.as_ref()
    }

    pub fn set_accepting_override(&mut self, states: Option<StateSet>) {
        self.accepting_override = states;
    }

    pub fn separator(&self) -> Option<&str> {
        self.separator.as_deref()
    }

    pub fn set_separator(&mut self, separator: Option<String>) {
        self.separator = separator;
    }

    /// Splits a typed word into symbols.
    pub fn tokenize(&self, word: &str) -> Vec<Symbol> {
        match &self.separator {
            Some(sep) => Symbol::split(word, sep),
            None => Symbol::chars(word),
        }
    }

    /// Evaluates `word` on the current automaton from its initial state,
    /// using the session's accepting override if one is set.
    pub fn evaluate(&self, word: &str) -> Option<(Vec<Symbol>, Result<Run, CoreError>)> {
        let current = self.current.as_ref()?;
        let symbols = self.tokenize(word);
        let outcome = current
            .automaton
            .evaluate_from_initial(&symbols, self.accepting_override.as_ref());
        Some((symbols, outcome))
    }
}

/// Parses a comma-separated state list.
pub fn parse_state_list(input: &str) -> StateSet {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(State::from)
        .collect()
}
