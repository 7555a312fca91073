//! Loader error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading, parsing or writing automaton documents.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("XML error: {0}")]
    XmlRead(#[from] quick_xml::de::DeError),

    #[error("XML write error: {0}")]
    XmlWrite(#[from] quick_xml::se::SeError),

    #[error("unknown format '{0}' (expected json, yaml or xml)")]
    UnknownFormat(String),

    #[error("{}: {source}", path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<LoaderError>,
    },
}

impl LoaderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoaderError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn in_file(path: impl Into<PathBuf>, source: LoaderError) -> Self {
        LoaderError::InFile {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Returns true if the error is a missing file.
    pub fn is_not_found(&self) -> bool {
        match self {
            LoaderError::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            LoaderError::InFile { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// Returns true if the document itself could not be parsed.
    pub fn is_parse_error(&self) -> bool {
        match self {
            LoaderError::Json(_) | LoaderError::Yaml(_) | LoaderError::XmlRead(_) => true,
            LoaderError::InFile { source, .. } => source.is_parse_error(),
            _ => false,
        }
    }
}
