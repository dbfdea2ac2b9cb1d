//! # kusari
//!
//! Rewrites parsed Nunjucks templates into Twig source.
//!
//! Parsing happens outside this crate; trees come in either built directly
//! ([`ast::builders`]) or loaded from serialized parser output ([`loader`]).
//! The [`transform`] module walks the tree and produces Twig text, applying
//! the dialect rewrites along the way: explicit truthiness tests, filter
//! renames, strict-equality normalization and subscript property access.

pub mod ast;
pub mod formats;
pub mod loader;
pub mod processor;
pub mod transform;

pub use transform::{transform, TransformError, TransformOptions, Transformer};
