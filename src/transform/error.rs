use std::fmt;

/// Errors that abort a transform
///
/// There is no partial output: any error means the whole template could not
/// be rewritten faithfully.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    /// The tree contains a node kind with no rewrite rule
    UnsupportedNodeKind { kind: String },
    /// A known node kind used in a form that has no Twig equivalent
    UnsupportedConstruct { kind: String, detail: String },
}

impl TransformError {
    pub fn unsupported_kind(kind: impl Into<String>) -> Self {
        TransformError::UnsupportedNodeKind { kind: kind.into() }
    }

    pub fn unsupported_construct(kind: impl Into<String>, detail: impl Into<String>) -> Self {
        TransformError::UnsupportedConstruct {
            kind: kind.into(),
            detail: detail.into(),
        }
    }

    /// Name of the node kind the error is about
    pub fn kind(&self) -> &str {
        match self {
            TransformError::UnsupportedNodeKind { kind }
            | TransformError::UnsupportedConstruct { kind, .. } => kind,
        }
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::UnsupportedNodeKind { kind } => {
                write!(f, "Unhandled node {kind}")
            }
            TransformError::UnsupportedConstruct { kind, detail } => {
                write!(f, "In {kind} block, {detail}")
            }
        }
    }
}

impl std::error::Error for TransformError {}
