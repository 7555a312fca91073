//! Sample file generation.

use crate::document::AutomatonDocument;
use crate::error::LoaderError;
use crate::format::Format;
use crate::load::save_path;
use afdsim_core::builtin;
use std::fs;
use std::path::{Path, PathBuf};

/// Base name of generated sample files.
pub const SAMPLE_STEM: &str = "afd_ejemplo";

/// Writes the ends-with-`01` automaton in every format into `dir`.
///
/// Returns the written paths in JSON, YAML, XML order.
pub fn write_samples(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, LoaderError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| LoaderError::io(dir, e))?;

    let document = AutomatonDocument::from(&builtin::ends_with_01());
    let mut written = Vec::with_capacity(Format::ALL.len());
    for format in Format::ALL {
        let path = dir.join(format!("{}.{}", SAMPLE_STEM, format.extension()));
        save_path(&path, &document, Some(format))?;
        written.push(path);
    }

    tracing::info!("Wrote {} sample files to {}", written.len(), dir.display());
    Ok(written)
}
