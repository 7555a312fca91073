//! Document formats.

use crate::document::AutomatonDocument;
use crate::error::LoaderError;
use crate::xml;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Supported serialization formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Yaml,
    Xml,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Json, Format::Yaml, Format::Xml];

    /// Detects the format from a file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| LoaderError::UnknownFormat(path.display().to_string()))?;
        ext.parse()
    }

    /// Returns the canonical file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Xml => "xml",
        }
    }

    /// Parses `text` in this format.
    pub fn parse(&self, text: &str) -> Result<AutomatonDocument, LoaderError> {
        match self {
            Format::Json => Ok(serde_json::from_str(text)?),
            Format::Yaml => Ok(serde_yaml::from_str(text)?),
            Format::Xml => xml::parse(text),
        }
    }

    /// Renders `doc` in this format.
    pub fn render(&self, doc: &AutomatonDocument) -> Result<String, LoaderError> {
        match self {
            Format::Json => Ok(serde_json::to_string_pretty(doc)?),
            Format::Yaml => Ok(serde_yaml::to_string(doc)?),
            Format::Xml => xml::render(doc),
        }
    }
}

impl FromStr for Format {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            "xml" => Ok(Format::Xml),
            other => Err(LoaderError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => f.write_str("JSON"),
            Format::Yaml => f.write_str("YAML"),
            Format::Xml => f.write_str("XML"),
        }
    }
}
