//! Node types for parsed Nunjucks templates
//!
//! The tree is produced by an external parser and consumed read-only by the
//! transform. Node kinds are named after the parser's `typename`s so that
//! diagnostics can refer to them the same way the parser does.

use std::fmt;

/// Scalar carried by a `Literal` node
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Number(serde_json::Number),
    Boolean(bool),
    Null,
}

impl Scalar {
    /// The textual form used when the scalar is printed unquoted
    pub fn as_text(&self) -> String {
        match self {
            Scalar::String(s) => s.clone(),
            Scalar::Number(n) => number_text(n),
            Scalar::Boolean(b) => b.to_string(),
            Scalar::Null => "null".to_string(),
        }
    }
}

/// Whole floats print without a fraction (`1.5e3` is `1500`)
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 {
                "0".to_string()
            } else {
                format!("{f:.0}")
            }
        }
        _ => n.to_string(),
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => write!(f, "{s:?}"),
            other => f.write_str(&other.as_text()),
        }
    }
}

/// Binary operators sharing one rewrite rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    In,
    Or,
    And,
}

impl BinOp {
    pub const ALL: [BinOp; 8] = [
        BinOp::Add,
        BinOp::Sub,
        BinOp::Mul,
        BinOp::Div,
        BinOp::Mod,
        BinOp::In,
        BinOp::Or,
        BinOp::And,
    ];

    /// Infix token, including its surrounding spaces
    pub fn token(self) -> &'static str {
        match self {
            BinOp::Add => " + ",
            BinOp::Sub => " - ",
            BinOp::Mul => " * ",
            BinOp::Div => " / ",
            BinOp::Mod => " % ",
            BinOp::In => " in ",
            BinOp::Or => " or ",
            BinOp::And => " and ",
        }
    }

    pub fn typename(self) -> &'static str {
        match self {
            BinOp::Add => "Add",
            BinOp::Sub => "Sub",
            BinOp::Mul => "Mul",
            BinOp::Div => "Div",
            BinOp::Mod => "Mod",
            BinOp::In => "In",
            BinOp::Or => "Or",
            BinOp::And => "And",
        }
    }

    pub fn from_typename(name: &str) -> Option<Self> {
        BinOp::ALL.into_iter().find(|op| op.typename() == name)
    }

    /// `and`/`or` put their operands in boolean position
    pub fn is_logical(self) -> bool {
        matches!(self, BinOp::Or | BinOp::And)
    }
}

/// A node of the parsed template tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Root {
        children: Vec<Node>,
    },
    Output {
        children: Vec<Node>,
    },
    NodeList {
        children: Vec<Node>,
    },
    TemplateData {
        value: String,
    },
    Symbol {
        value: String,
    },
    Literal {
        value: Scalar,
    },
    LookupVal {
        target: Box<Node>,
        val: Box<Node>,
    },
    BinOp {
        op: BinOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Not {
        target: Box<Node>,
    },
    Compare {
        expr: Box<Node>,
        ops: Vec<Node>,
    },
    CompareOperand {
        expr: Box<Node>,
        op: String,
    },
    If {
        cond: Box<Node>,
        body: Box<Node>,
        else_: Option<Box<Node>>,
    },
    InlineIf {
        cond: Box<Node>,
        body: Box<Node>,
        else_: Option<Box<Node>>,
    },
    For {
        name: Box<Node>,
        arr: Box<Node>,
        body: Box<Node>,
        else_: Option<Box<Node>>,
    },
    Filter {
        name: Box<Node>,
        args: Box<Node>,
    },
    FunCall {
        name: Box<Node>,
        args: Box<Node>,
    },
    Include {
        template: Box<Node>,
        ignore_missing: bool,
    },
    Set {
        targets: Vec<Node>,
        value: Option<Box<Node>>,
        body: Option<Box<Node>>,
    },
    /// Body of a block assignment (`{% set x %}...{% endset %}`)
    Capture {
        body: Box<Node>,
    },
    Group {
        children: Vec<Node>,
    },
    Dict {
        children: Vec<Node>,
    },
    Pair {
        key: Box<Node>,
        value: Box<Node>,
    },
    /// A kind the parser knows about but the transform has no rule for
    Unsupported {
        kind: String,
    },
}

impl Node {
    /// The parser's name for this node kind
    pub fn kind(&self) -> &str {
        match self {
            Node::Root { .. } => "Root",
            Node::Output { .. } => "Output",
            Node::NodeList { .. } => "NodeList",
            Node::TemplateData { .. } => "TemplateData",
            Node::Symbol { .. } => "Symbol",
            Node::Literal { .. } => "Literal",
            Node::LookupVal { .. } => "LookupVal",
            Node::BinOp { op, .. } => op.typename(),
            Node::Not { .. } => "Not",
            Node::Compare { .. } => "Compare",
            Node::CompareOperand { .. } => "CompareOperand",
            Node::If { .. } => "If",
            Node::InlineIf { .. } => "InlineIf",
            Node::For { .. } => "For",
            Node::Filter { .. } => "Filter",
            Node::FunCall { .. } => "FunCall",
            Node::Include { .. } => "Include",
            Node::Set { .. } => "Set",
            Node::Capture { .. } => "Capture",
            Node::Group { .. } => "Group",
            Node::Dict { .. } => "Dict",
            Node::Pair { .. } => "Pair",
            Node::Unsupported { kind } => kind,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Node::Literal { .. })
    }

    /// A bare variable reference: `x` or `x.y`
    ///
    /// In boolean position these test for truthiness, which has to be spelled
    /// out in Twig.
    pub fn is_bare_variable(&self) -> bool {
        matches!(self, Node::Symbol { .. } | Node::LookupVal { .. })
    }

    /// Direct children in document order, used by tree dumps
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Root { children }
            | Node::Output { children }
            | Node::NodeList { children }
            | Node::Group { children }
            | Node::Dict { children } => children.iter().collect(),
            Node::TemplateData { .. }
            | Node::Symbol { .. }
            | Node::Literal { .. }
            | Node::Unsupported { .. } => Vec::new(),
            Node::LookupVal { target, val } => vec![target.as_ref(), val.as_ref()],
            Node::BinOp { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            Node::Not { target } => vec![target.as_ref()],
            Node::Compare { expr, ops } => std::iter::once(expr.as_ref()).chain(ops).collect(),
            Node::CompareOperand { expr, .. } => vec![expr.as_ref()],
            Node::If { cond, body, else_ } | Node::InlineIf { cond, body, else_ } => {
                let mut nodes = vec![cond.as_ref(), body.as_ref()];
                nodes.extend(else_.as_deref());
                nodes
            }
            Node::For {
                name,
                arr,
                body,
                else_,
            } => {
                let mut nodes = vec![name.as_ref(), arr.as_ref(), body.as_ref()];
                nodes.extend(else_.as_deref());
                nodes
            }
            Node::Filter { name, args } | Node::FunCall { name, args } => {
                vec![name.as_ref(), args.as_ref()]
            }
            Node::Include { template, .. } => vec![template.as_ref()],
            Node::Set {
                targets,
                value,
                body,
            } => targets
                .iter()
                .chain(value.as_deref())
                .chain(body.as_deref())
                .collect(),
            Node::Capture { body } => vec![body.as_ref()],
            Node::Pair { key, value } => vec![key.as_ref(), value.as_ref()],
        }
    }

    /// Short label shown next to the kind in tree dumps
    pub fn label(&self) -> Option<String> {
        match self {
            Node::TemplateData { value } => Some(format!("{value:?}")),
            Node::Symbol { value } => Some(value.clone()),
            Node::Literal { value } => Some(value.to_string()),
            Node::CompareOperand { op, .. } => Some(op.clone()),
            Node::Include {
                ignore_missing: true,
                ..
            } => Some("ignore missing".to_string()),
            _ => None,
        }
    }
}
