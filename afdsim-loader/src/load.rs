//! Reading and writing automaton files.

use crate::document::AutomatonDocument;
use crate::error::LoaderError;
use crate::format::Format;
use afdsim_core::Automaton;
use std::fs;
use std::path::{Path, PathBuf};

/// An automaton read from disk, with where it came from.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub automaton: Automaton,
    pub format: Format,
    pub path: PathBuf,
    pub checksum: String,
}

/// Loads an automaton file.
///
/// The format is taken from the file extension unless `format` is given.
pub fn load_path(path: impl AsRef<Path>, format: Option<Format>) -> Result<Loaded, LoaderError> {
    let path = path.as_ref();
    let format = match format {
        Some(f) => f,
        None => Format::from_path(path)?,
    };

    let text = fs::read_to_string(path).map_err(|e| LoaderError::io(path, e))?;
    let document = format
        .parse(&text)
        .map_err(|e| LoaderError::in_file(path, e))?;
    let checksum = document.checksum()?;
    let automaton = document.to_automaton();

    tracing::info!(
        "Loaded {} automaton from {} ({} states, {} transitions, checksum {})",
        format,
        path.display(),
        automaton.states().len(),
        automaton.transition_count(),
        checksum
    );

    Ok(Loaded {
        automaton,
        format,
        path: path.to_path_buf(),
        checksum,
    })
}

/// Writes a document to `path`, detecting the format from the extension
/// unless `format` is given.
pub fn save_path(
    path: impl AsRef<Path>,
    document: &AutomatonDocument,
    format: Option<Format>,
) -> Result<(), LoaderError> {
    let path = path.as_ref();
    let format = match format {
        Some(f) => f,
        None => Format::from_path(path)?,
    };

    let text = format.render(document)?;
    fs::write(path, text).map_err(|e| LoaderError::io(path, e))?;

    tracing::debug!("Wrote {} document to {}", format, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use afdsim_core::builtin;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_each_format() {
        let dir = TempDir::new().unwrap();
        let doc = AutomatonDocument::from(&builtin::ends_with_01());

        for format in Format::ALL {
            let path = dir.path().join(format!("afd.{}", format.extension()));
            save_path(&path, &doc, None).unwrap();

            let loaded = load_path(&path, None).unwrap();
            assert_eq!(loaded.format, format);
            assert_eq!(loaded.automaton, builtin::ends_with_01());
            assert_eq!(loaded.checksum, doc.checksum().unwrap());
        }
    }

    #[test]
    fn test_explicit_format_overrides_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("afd.txt");
        let doc = AutomatonDocument::from(&builtin::even_a());
        save_path(&path, &doc, Some(Format::Yaml)).unwrap();

        assert!(load_path(&path, None).is_err());
        let loaded = load_path(&path, Some(Format::Yaml)).unwrap();
        assert_eq!(loaded.automaton, builtin::even_a());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_path(dir.path().join("absent.json"), None).unwrap_err();
        assert!(err.is_not_found());
        assert!(!err.is_parse_error());
    }

    #[test]
    fn test_parse_error_carries_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_path(&path, None).unwrap_err();
        assert!(err.is_parse_error());
        assert!(err.to_string().contains("broken.json"));
    }
}
