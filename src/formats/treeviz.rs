//! Treeviz formatter for template trees
//!
//! One line per node, nesting shown with box-drawing connectors. Leaf labels
//! (symbol names, literal values, raw text) are truncated to 30 characters.
//!
//! Example:
//!
//! ```text
//! Root
//! ├─ Output
//! │  └─ TemplateData: "hi "
//! └─ Output
//!    └─ LookupVal
//!       ├─ Symbol: person
//!       └─ Literal: "name"
//! ```

use super::registry::{FormatError, Formatter};
use crate::ast::Node;

const MAX_LABEL: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn line(node: &Node) -> String {
    match node.label() {
        Some(label) => format!("{}: {}", node.kind(), truncate(&label, MAX_LABEL)),
        None => node.kind().to_string(),
    }
}

pub fn to_treeviz_str(root: &Node) -> String {
    let mut result = line(root);
    result.push('\n');
    append_children(&mut result, root, "");
    result
}

fn append_children(result: &mut String, node: &Node, prefix: &str) {
    let children = node.children();
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        let connector = if is_last { "└─" } else { "├─" };
        result.push_str(&format!("{}{} {}\n", prefix, connector, line(child)));

        let new_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });
        append_children(result, child, &new_prefix);
    }
}

/// Debug dump of the input tree
pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, root: &Node) -> Result<String, FormatError> {
        Ok(to_treeviz_str(root))
    }

    fn description(&self) -> &str {
        "Tree dump of the parsed template"
    }
}
