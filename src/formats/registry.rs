//! Format registry for tree output
//!
//! Each output format implements the `Formatter` trait and can be registered
//! with `FormatRegistry`.

use crate::ast::Node;
use crate::transform::TransformError;
use std::collections::HashMap;
use std::fmt;

/// Error that can occur during formatting
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    FormatNotFound(String),
    /// The tree could not be rewritten
    Transform(TransformError),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::Transform(err) => write!(f, "Transform error: {err}"),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormatError::Transform(err) => Some(err),
            FormatError::FormatNotFound(_) => None,
        }
    }
}

impl From<TransformError> for FormatError {
    fn from(err: TransformError) -> Self {
        FormatError::Transform(err)
    }
}

/// Trait for tree formatters
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "twig", "treeviz")
    fn name(&self) -> &str;

    /// Serialize a tree to this format
    fn serialize(&self, root: &Node) -> Result<String, FormatError>;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }
}

/// Registry of tree formatters
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing any with the same name
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Serialize a tree using the specified format
    pub fn serialize(&self, root: &Node, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(root)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Create a registry with the built-in formatters
    pub fn with_defaults() -> Self {
        Self::with_options(Default::default())
    }

    /// Built-in formatters, with the Twig rewrite configured by `options`
    pub fn with_options(options: crate::transform::TransformOptions) -> Self {
        let mut registry = Self::new();
        registry.register(super::TwigFormatter::new(options));
        registry.register(super::TreevizFormatter);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
