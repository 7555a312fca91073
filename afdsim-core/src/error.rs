//! Core error types.

use thiserror::Error;

/// Errors from evaluating a word against an automaton.
///
/// `position` is the zero-based index of the offending symbol in the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("symbol '{symbol}' is not in the alphabet (position {position})")]
    SymbolNotInAlphabet { symbol: String, position: usize },

    #[error("no transition defined from '{state}' on symbol '{symbol}' (position {position})")]
    UndefinedTransition {
        state: String,
        symbol: String,
        position: usize,
    },

    #[error("initial state '{state}' is not a declared state")]
    UnknownInitialState { state: String },
}

impl CoreError {
    /// Returns a stable error code for display and scripting.
    pub fn error_code(&self) -> &'static str {
        match self {
            CoreError::SymbolNotInAlphabet { .. } => "SYMBOL_NOT_IN_ALPHABET",
            CoreError::UndefinedTransition { .. } => "UNDEFINED_TRANSITION",
            CoreError::UnknownInitialState { .. } => "UNKNOWN_INITIAL_STATE",
        }
    }

    /// Returns the input position that caused the error, if any.
    pub fn position(&self) -> Option<usize> {
        match self {
            CoreError::SymbolNotInAlphabet { position, .. }
            | CoreError::UndefinedTransition { position, .. } => Some(*position),
            CoreError::UnknownInitialState { .. } => None,
        }
    }
}
