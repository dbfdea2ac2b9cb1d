//! Shorthand constructors for building trees by hand
//!
//! The parser normally produces these trees; the builders keep tests and
//! embedding code readable. Names follow the template syntax they stand for,
//! e.g. `attr(sym("person"), "name")` is `person.name`.

use super::node::{BinOp, Node, Scalar};

pub fn root(children: Vec<Node>) -> Node {
    Node::Root { children }
}

pub fn output(children: Vec<Node>) -> Node {
    Node::Output { children }
}

pub fn list(children: Vec<Node>) -> Node {
    Node::NodeList { children }
}

/// Raw template text, as it appears inside an `Output`
pub fn data(text: &str) -> Node {
    Node::TemplateData {
        value: text.to_string(),
    }
}

/// Raw text wrapped in its own `Output`, the way the parser emits it
pub fn text(text: &str) -> Node {
    output(vec![data(text)])
}

pub fn sym(name: &str) -> Node {
    Node::Symbol {
        value: name.to_string(),
    }
}

pub fn str_lit(value: &str) -> Node {
    Node::Literal {
        value: Scalar::String(value.to_string()),
    }
}

pub fn num_lit(value: i64) -> Node {
    Node::Literal {
        value: Scalar::Number(value.into()),
    }
}

pub fn bool_lit(value: bool) -> Node {
    Node::Literal {
        value: Scalar::Boolean(value),
    }
}

pub fn lookup(target: Node, val: Node) -> Node {
    Node::LookupVal {
        target: Box::new(target),
        val: Box::new(val),
    }
}

/// `target.name`
pub fn attr(target: Node, name: &str) -> Node {
    lookup(target, str_lit(name))
}

pub fn binop(op: BinOp, left: Node, right: Node) -> Node {
    Node::BinOp {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn not(target: Node) -> Node {
    Node::Not {
        target: Box::new(target),
    }
}

pub fn compare(expr: Node, ops: Vec<(&str, Node)>) -> Node {
    Node::Compare {
        expr: Box::new(expr),
        ops: ops
            .into_iter()
            .map(|(op, expr)| Node::CompareOperand {
                expr: Box::new(expr),
                op: op.to_string(),
            })
            .collect(),
    }
}

pub fn if_(cond: Node, body: Vec<Node>, else_: Option<Vec<Node>>) -> Node {
    Node::If {
        cond: Box::new(cond),
        body: Box::new(list(body)),
        else_: else_.map(|nodes| Box::new(list(nodes))),
    }
}

pub fn inline_if(cond: Node, body: Node, else_: Option<Node>) -> Node {
    Node::InlineIf {
        cond: Box::new(cond),
        body: Box::new(body),
        else_: else_.map(Box::new),
    }
}

pub fn for_(name: Node, arr: Node, body: Vec<Node>) -> Node {
    Node::For {
        name: Box::new(name),
        arr: Box::new(arr),
        body: Box::new(list(body)),
        else_: None,
    }
}

/// `value | name(args...)`
pub fn filter(name: &str, value: Node, args: Vec<Node>) -> Node {
    let mut all = vec![value];
    all.extend(args);
    Node::Filter {
        name: Box::new(sym(name)),
        args: Box::new(list(all)),
    }
}

pub fn call(name: Node, args: Vec<Node>) -> Node {
    Node::FunCall {
        name: Box::new(name),
        args: Box::new(list(args)),
    }
}

pub fn include(template: Node) -> Node {
    Node::Include {
        template: Box::new(template),
        ignore_missing: false,
    }
}

pub fn set(targets: Vec<Node>, value: Node) -> Node {
    Node::Set {
        targets,
        value: Some(Box::new(value)),
        body: None,
    }
}

/// `{% set target %}body{% endset %}`
pub fn set_block(target: Node, body: Vec<Node>) -> Node {
    Node::Set {
        targets: vec![target],
        value: None,
        body: Some(Box::new(Node::Capture {
            body: Box::new(list(body)),
        })),
    }
}

pub fn group(children: Vec<Node>) -> Node {
    Node::Group { children }
}

pub fn dict(pairs: Vec<(Node, Node)>) -> Node {
    Node::Dict {
        children: pairs
            .into_iter()
            .map(|(key, value)| Node::Pair {
                key: Box::new(key),
                value: Box::new(value),
            })
            .collect(),
    }
}

pub fn unsupported(kind: &str) -> Node {
    Node::Unsupported {
        kind: kind.to_string(),
    }
}
