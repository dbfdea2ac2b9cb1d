//! Nunjucks → Twig rewriting
//!
//! The driver hands the root node to the [`Dispatcher`], which builds a
//! [`Fragment`] tree bottom-up, and renders it once at the end.
//!
//! ```rust,ignore
//! use kusari::ast::builders::*;
//! use kusari::transform::transform;
//!
//! // hi {{ person.name }}
//! let tree = root(vec![text("hi "), output(vec![attr(sym("person"), "name")])]);
//! assert_eq!(transform(&tree)?, r#"hi {{ person["name"] }}"#);
//! ```

pub mod error;
pub mod fragment;
pub mod handlers;
pub mod options;
pub mod truthy;

pub use error::TransformError;
pub use fragment::{Delimiters, Fragment, Wrap};
pub use handlers::Dispatcher;
pub use options::TransformOptions;

use crate::ast::Node;
use once_cell::sync::Lazy;

static DEFAULT_OPTIONS: Lazy<TransformOptions> = Lazy::new(TransformOptions::default);

/// Rewrite a tree with the default options
pub fn transform(root: &Node) -> Result<String, TransformError> {
    Transformer::new(DEFAULT_OPTIONS.clone()).transform(root)
}

/// Rewrites trees with a fixed set of options
///
/// Holds no per-call state, so one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Transformer {
    options: TransformOptions,
}

impl Transformer {
    pub fn new(options: TransformOptions) -> Self {
        Transformer { options }
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Build the fragment tree without rendering it
    pub fn fragment(&self, root: &Node) -> Result<Fragment, TransformError> {
        Dispatcher::new(&self.options).dispatch(root, false)
    }

    pub fn transform(&self, root: &Node) -> Result<String, TransformError> {
        let _span = tracing::debug_span!("transform", root = root.kind()).entered();
        let output = self.fragment(root)?.render();
        tracing::debug!(bytes = output.len(), "transform finished");
        Ok(output)
    }
}
