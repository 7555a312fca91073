//! # afdsim-loader
//!
//! Definition loader for afdsim.
//!
//! This crate provides:
//! - The on-disk automaton document and its conversion to an [`afdsim_core::Automaton`]
//! - JSON, YAML and XML encodings
//! - File loading with format detection and checksums
//! - Sample file generation

pub mod document;
pub mod error;
pub mod format;
pub mod load;
pub mod samples;
pub mod xml;

pub use document::{AutomatonDocument, Delta, Label, TransitionEntry};
pub use error::LoaderError;
pub use format::Format;
pub use load::{load_path, save_path, Loaded};
pub use samples::{write_samples, SAMPLE_STEM};
