//! Template tree consumed by the transform

pub mod builders;
pub mod node;

pub use node::{BinOp, Node, Scalar};
