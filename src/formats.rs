//! Output formats
//!
//! - `twig`: the rewritten template
//! - `treeviz`: a dump of the input tree, for inspecting parser output

pub mod registry;
pub mod treeviz;
pub mod twig;

pub use registry::{FormatError, FormatRegistry, Formatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
pub use twig::TwigFormatter;
