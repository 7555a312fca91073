//! # afdsim-core
//!
//! Deterministic finite automaton engine for afdsim.
//!
//! This crate provides:
//! - State and symbol labels
//! - Automaton construction from pair-keyed maps or ordered triples
//! - Single steps, final states, derivation traces and acceptance checks
//! - Definition diagnostics
//! - Built-in example automata

pub mod automaton;
pub mod builtin;
pub mod error;
pub mod label;
pub mod lint;

pub use automaton::{Alphabet, Automaton, AutomatonBuilder, Run, StateSet, Step, TransitionSpec};
pub use error::CoreError;
pub use label::{State, Symbol};
pub use lint::{lint, Lint, Severity};
