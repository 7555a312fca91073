//! State and symbol labels.
//!
//! Both are opaque tokens compared by value. The engine never looks inside a
//! label except to split input words into symbols.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A state label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(pub String);

impl State {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for State {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for State {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for State {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An input symbol label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits a word into one symbol per character.
    ///
    /// The empty word yields no symbols.
    pub fn chars(word: &str) -> Vec<Symbol> {
        word.chars().map(|c| Symbol(c.to_string())).collect()
    }

    /// Splits a word on `separator`, for alphabets with multi-character
    /// symbols. Surrounding whitespace is trimmed and empty pieces are
    /// skipped, so `"a, b,,c"` with `","` gives `[a, b, c]`.
    pub fn split(word: &str, separator: &str) -> Vec<Symbol> {
        word.split(separator)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Symbol::from)
            .collect()
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Self(c.to_string())
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
