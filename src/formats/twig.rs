use super::registry::{FormatError, Formatter};
use crate::ast::Node;
use crate::transform::{TransformOptions, Transformer};

/// Twig source, the result of the rewrite
pub struct TwigFormatter {
    transformer: Transformer,
}

impl TwigFormatter {
    pub fn new(options: TransformOptions) -> Self {
        TwigFormatter {
            transformer: Transformer::new(options),
        }
    }
}

impl Default for TwigFormatter {
    fn default() -> Self {
        Self::new(TransformOptions::default())
    }
}

impl Formatter for TwigFormatter {
    fn name(&self) -> &str {
        "twig"
    }

    fn serialize(&self, root: &Node) -> Result<String, FormatError> {
        Ok(self.transformer.transform(root)?)
    }

    fn description(&self) -> &str {
        "Twig template source"
    }
}
