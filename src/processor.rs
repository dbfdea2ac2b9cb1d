//! File processing API
//!
//! Reads a serialized tree from disk, loads it and renders it with one of the
//! registered formats.
//!
//! ```rust,ignore
//! use kusari::formats::FormatRegistry;
//! use kusari::processor::{process_file, ProcessingSpec};
//!
//! let registry = FormatRegistry::with_defaults();
//! let twig = process_file("page.json", &ProcessingSpec::default(), &registry)?;
//! ```

use crate::formats::{FormatError, FormatRegistry};
use crate::loader::{self, InputFormat, LoadError};
use std::fmt;
use std::fs;
use std::path::Path;

/// How to read and what to produce
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingSpec {
    /// `None` picks the format from the file extension, falling back to JSON
    pub input: Option<InputFormat>,
    pub format: String,
}

impl Default for ProcessingSpec {
    fn default() -> Self {
        ProcessingSpec {
            input: None,
            format: "twig".to_string(),
        }
    }
}

/// Errors that can occur during processing
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingError {
    FileNotFound(String),
    IoError(String),
    Load(LoadError),
    Format(FormatError),
}

impl std::error::Error for ProcessingError {}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::FileNotFound(path) => write!(f, "'{}' does not exist", path),
            ProcessingError::IoError(msg) => write!(f, "IO error: {}", msg),
            ProcessingError::Load(err) => write!(f, "{}", err),
            ProcessingError::Format(err) => write!(f, "{}", err),
        }
    }
}

impl From<LoadError> for ProcessingError {
    fn from(err: LoadError) -> Self {
        ProcessingError::Load(err)
    }
}

impl From<FormatError> for ProcessingError {
    fn from(err: FormatError) -> Self {
        ProcessingError::Format(err)
    }
}

/// Check that every path exists before any of them is processed
pub fn check_paths<P: AsRef<Path>>(paths: &[P]) -> Result<(), ProcessingError> {
    for path in paths {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ProcessingError::FileNotFound(path.display().to_string()));
        }
    }
    Ok(())
}

/// Process a serialized tree according to the given specification
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    registry: &FormatRegistry,
) -> Result<String, ProcessingError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(ProcessingError::FileNotFound(
            file_path.display().to_string(),
        ));
    }

    let content =
        fs::read_to_string(file_path).map_err(|e| ProcessingError::IoError(e.to_string()))?;
    let input = spec
        .input
        .or_else(|| InputFormat::from_path(file_path))
        .unwrap_or(InputFormat::Json);
    tracing::debug!(path = %file_path.display(), ?input, format = spec.format.as_str(), "processing");

    process_str(&content, input, &spec.format, registry)
}

/// Process an in-memory document
pub fn process_str(
    content: &str,
    input: InputFormat,
    format: &str,
    registry: &FormatRegistry,
) -> Result<String, ProcessingError> {
    let tree = loader::load_str(content, input)?;
    Ok(registry.serialize(&tree, format)?)
}
