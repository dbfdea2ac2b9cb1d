//! Loading serialized parser output
//!
//! The template parser runs outside this crate. Its trees arrive as JSON or
//! YAML documents whose objects mirror the parser's nodes: a `typename` plus
//! the node's fields, e.g.
//!
//! ```text
//! {"typename": "LookupVal",
//!  "target": {"typename": "Symbol", "value": "person"},
//!  "val": {"typename": "Literal", "value": "name"}}
//! ```
//!
//! Unknown typenames are kept as [`Node::Unsupported`] so the transform can
//! report them by name.

use crate::ast::{BinOp, Node, Scalar};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// Guess from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(InputFormat::Json),
            "yaml" | "yml" => Some(InputFormat::Yaml),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Result<Self, LoadError> {
        match name {
            "json" => Ok(InputFormat::Json),
            "yaml" | "yml" => Ok(InputFormat::Yaml),
            other => Err(LoadError::UnknownInputFormat(other.to_string())),
        }
    }
}

/// Errors that can occur while loading a tree
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    Json(String),
    Yaml(String),
    /// The document parsed but does not describe a valid tree
    Malformed { kind: String, reason: String },
    UnknownInputFormat(String),
}

impl LoadError {
    fn malformed(kind: &str, reason: impl Into<String>) -> Self {
        LoadError::Malformed {
            kind: kind.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Json(msg) => write!(f, "Invalid JSON: {msg}"),
            LoadError::Yaml(msg) => write!(f, "Invalid YAML: {msg}"),
            LoadError::Malformed { kind, reason } => write!(f, "Malformed {kind} node: {reason}"),
            LoadError::UnknownInputFormat(name) => write!(f, "Unknown input format '{name}'"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Parse a serialized tree
pub fn load_str(source: &str, format: InputFormat) -> Result<Node, LoadError> {
    let value: Value = match format {
        InputFormat::Json => {
            serde_json::from_str(source).map_err(|e| LoadError::Json(e.to_string()))?
        }
        InputFormat::Yaml => {
            serde_yaml::from_str(source).map_err(|e| LoadError::Yaml(e.to_string()))?
        }
    };
    decode(&value)
}

/// Convert a generic document value into a node
pub fn decode(value: &Value) -> Result<Node, LoadError> {
    let obj = value
        .as_object()
        .ok_or_else(|| LoadError::malformed("<unknown>", "expected an object"))?;
    let kind = obj
        .get("typename")
        .and_then(Value::as_str)
        .ok_or_else(|| LoadError::malformed("<unknown>", "missing `typename`"))?;
    let fields = Fields { kind, obj };

    if let Some(op) = BinOp::from_typename(kind) {
        return Ok(Node::BinOp {
            op,
            left: fields.node("left")?,
            right: fields.node("right")?,
        });
    }

    let node = match kind {
        "Root" => Node::Root {
            children: fields.children()?,
        },
        "Output" => Node::Output {
            children: fields.children()?,
        },
        "NodeList" => Node::NodeList {
            children: fields.children()?,
        },
        "Group" => Node::Group {
            children: fields.children()?,
        },
        "Dict" => Node::Dict {
            children: fields.children()?,
        },
        "TemplateData" => Node::TemplateData {
            value: fields.text("value")?,
        },
        "Symbol" => Node::Symbol {
            value: fields.text("value")?,
        },
        "Literal" => Node::Literal {
            value: fields.scalar("value")?,
        },
        "LookupVal" => Node::LookupVal {
            target: fields.node("target")?,
            val: fields.node("val")?,
        },
        "Not" => Node::Not {
            target: fields.node("target")?,
        },
        "Compare" => Node::Compare {
            expr: fields.node("expr")?,
            ops: fields.list("ops")?,
        },
        "CompareOperand" => Node::CompareOperand {
            expr: fields.node("expr")?,
            op: fields.text("type")?,
        },
        "If" => Node::If {
            cond: fields.node("cond")?,
            body: fields.node("body")?,
            else_: fields.optional("else_")?,
        },
        "InlineIf" => Node::InlineIf {
            cond: fields.node("cond")?,
            body: fields.node("body")?,
            else_: fields.optional("else_")?,
        },
        "For" => Node::For {
            name: fields.node("name")?,
            arr: fields.node("arr")?,
            body: fields.node("body")?,
            else_: fields.optional("else_")?,
        },
        "Filter" => Node::Filter {
            name: fields.node("name")?,
            args: fields.node("args")?,
        },
        "FunCall" => Node::FunCall {
            name: fields.node("name")?,
            args: fields.node("args")?,
        },
        "Include" => Node::Include {
            template: fields.node("template")?,
            ignore_missing: fields.flag("ignoreMissing")?,
        },
        "Set" => Node::Set {
            targets: fields.list("targets")?,
            value: fields.optional("value")?,
            body: fields.optional("body")?,
        },
        "Capture" => Node::Capture {
            body: fields.node("body")?,
        },
        "Pair" => Node::Pair {
            key: fields.node("key")?,
            value: fields.node("value")?,
        },
        other => Node::Unsupported {
            kind: other.to_string(),
        },
    };
    Ok(node)
}

/// Field access for one node object, with errors naming the node kind
struct Fields<'a> {
    kind: &'a str,
    obj: &'a Map<String, Value>,
}

impl Fields<'_> {
    fn get(&self, name: &str) -> Option<&Value> {
        self.obj.get(name).filter(|v| !v.is_null())
    }

    fn required(&self, name: &str) -> Result<&Value, LoadError> {
        self.get(name)
            .ok_or_else(|| LoadError::malformed(self.kind, format!("missing `{name}`")))
    }

    fn node(&self, name: &str) -> Result<Box<Node>, LoadError> {
        decode(self.required(name)?).map(Box::new)
    }

    fn optional(&self, name: &str) -> Result<Option<Box<Node>>, LoadError> {
        self.get(name).map(|v| decode(v).map(Box::new)).transpose()
    }

    fn list(&self, name: &str) -> Result<Vec<Node>, LoadError> {
        match self.get(name) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items.iter().map(decode).collect(),
            Some(_) => Err(LoadError::malformed(
                self.kind,
                format!("`{name}` must be an array"),
            )),
        }
    }

    fn children(&self) -> Result<Vec<Node>, LoadError> {
        self.list("children")
    }

    fn text(&self, name: &str) -> Result<String, LoadError> {
        self.required(name)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| LoadError::malformed(self.kind, format!("`{name}` must be a string")))
    }

    fn flag(&self, name: &str) -> Result<bool, LoadError> {
        match self.get(name) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(LoadError::malformed(
                self.kind,
                format!("`{name}` must be a boolean"),
            )),
        }
    }

    fn scalar(&self, name: &str) -> Result<Scalar, LoadError> {
        match self.obj.get(name) {
            None | Some(Value::Null) => Ok(Scalar::Null),
            Some(Value::String(s)) => Ok(Scalar::String(s.clone())),
            Some(Value::Number(n)) => Ok(Scalar::Number(n.clone())),
            Some(Value::Bool(b)) => Ok(Scalar::Boolean(*b)),
            Some(_) => Err(LoadError::malformed(
                self.kind,
                format!("`{name}` must be a scalar"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builders::*;

    #[test]
    fn test_decode_lookup() {
        let source = r#"{"typename": "LookupVal",
            "target": {"typename": "Symbol", "value": "person"},
            "val": {"typename": "Literal", "value": "name"}}"#;
        let node = load_str(source, InputFormat::Json).unwrap();
        assert_eq!(node, attr(sym("person"), "name"));
    }

    #[test]
    fn test_decode_binop() {
        let source = r#"{"typename": "Add",
            "left": {"typename": "Literal", "value": 0},
            "right": {"typename": "Literal", "value": 4}}"#;
        let node = load_str(source, InputFormat::Json).unwrap();
        assert_eq!(node, binop(BinOp::Add, num_lit(0), num_lit(4)));
    }

    #[test]
    fn test_decode_unknown_kind() {
        let node = load_str(r#"{"typename": "Macro", "name": "m"}"#, InputFormat::Json).unwrap();
        assert_eq!(node, unsupported("Macro"));
    }

    #[test]
    fn test_null_else_is_absent() {
        let source = r#"{"typename": "If",
            "cond": {"typename": "Symbol", "value": "foo"},
            "body": {"typename": "NodeList", "children": []},
            "else_": null}"#;
        let node = load_str(source, InputFormat::Json).unwrap();
        assert_eq!(node, if_(sym("foo"), vec![], None));
    }

    #[test]
    fn test_decode_yaml() {
        let source = "typename: Output\nchildren:\n  - typename: Symbol\n    value: foo\n";
        let node = load_str(source, InputFormat::Yaml).unwrap();
        assert_eq!(node, output(vec![sym("foo")]));
    }

    #[test]
    fn test_whole_floats_print_as_integers() {
        let yaml = "typename: Output\nchildren:\n  - typename: Literal\n    value: 1.5e3\n";
        let node = load_str(yaml, InputFormat::Yaml).unwrap();
        assert_eq!(crate::transform(&node).unwrap(), "{{ 1500 }}");

        let json = r#"{"typename": "Output", "children": [{"typename": "Literal", "value": 4.0}]}"#;
        let node = load_str(json, InputFormat::Json).unwrap();
        assert_eq!(crate::transform(&node).unwrap(), "{{ 4 }}");
    }

    #[test]
    fn test_missing_field() {
        let err = load_str(r#"{"typename": "Not"}"#, InputFormat::Json).unwrap_err();
        assert_eq!(
            err,
            LoadError::Malformed {
                kind: "Not".into(),
                reason: "missing `target`".into()
            }
        );
    }

    #[test]
    fn test_missing_typename() {
        let err = load_str(r#"{"value": 1}"#, InputFormat::Json).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let err = load_str("{", InputFormat::Json).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            InputFormat::from_path(Path::new("a/b.json")),
            Some(InputFormat::Json)
        );
        assert_eq!(
            InputFormat::from_path(Path::new("b.yml")),
            Some(InputFormat::Yaml)
        );
        assert_eq!(InputFormat::from_path(Path::new("b.njk")), None);
    }
}
