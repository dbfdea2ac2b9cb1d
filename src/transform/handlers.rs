//! One rewrite rule per node kind
//!
//! Every handler receives the node and the `wrap` flag: whether the node
//! stands on its own and must print its own delimiters, or is embedded in a
//! parent that already did.

use super::error::TransformError;
use super::fragment::{Fragment, BRACE, QUOTE};
use super::options::TransformOptions;
use super::truthy::{coerce, truthy};
use crate::ast::{BinOp, Node, Scalar};

type Result<T> = std::result::Result<T, TransformError>;

/// Walks a tree and builds its Twig fragment
pub struct Dispatcher<'a> {
    options: &'a TransformOptions,
}

impl<'a> Dispatcher<'a> {
    pub fn new(options: &'a TransformOptions) -> Self {
        Dispatcher { options }
    }

    pub fn dispatch(&self, node: &Node, wrap: bool) -> Result<Fragment> {
        tracing::trace!(kind = node.kind(), wrap, "dispatch");
        match node {
            Node::Root { children } => self.children(children, |_| false),
            Node::Output { children } => self.output(children),
            Node::NodeList { children } => self.children(children, Node::is_literal),
            Node::TemplateData { value } => Ok(Fragment::text(value.as_str())),
            Node::Symbol { value } => Ok(Fragment::expression(value.as_str().into(), wrap)),
            Node::Literal { value } => Ok(literal(value)),
            Node::LookupVal { target, val } => self.lookup(target, val, wrap),
            Node::BinOp { op, left, right } => self.binop(*op, left, right, wrap),
            Node::Not { target } => self.not(target, wrap),
            Node::Compare { expr, ops } => self.compare(expr, ops, wrap),
            Node::CompareOperand { expr, op } => self.compare_operand(expr, op),
            Node::If { cond, body, else_ } => self.if_block(cond, body, else_.as_deref()),
            Node::InlineIf { cond, body, else_ } => {
                self.inline_if(cond, body, else_.as_deref(), wrap)
            }
            Node::For {
                name,
                arr,
                body,
                else_,
            } => self.for_block(name, arr, body, else_.as_deref()),
            Node::Filter { name, args } => self.filter(name, args, wrap),
            Node::FunCall { name, args } => self.fun_call(name, args),
            Node::Include {
                template,
                ignore_missing,
            } => self.include(template, *ignore_missing),
            Node::Set {
                targets,
                value,
                body,
            } => self.set(targets, value.as_deref(), body.as_deref()),
            Node::Capture { body } => self.dispatch(body, true),
            Node::Group { children } => self.group(children, wrap),
            Node::Dict { children } => self.dict(children),
            Node::Pair { key, value } => self.pair(key, value),
            Node::Unsupported { kind } => {
                tracing::warn!(kind = kind.as_str(), "no rewrite rule for node");
                Err(TransformError::unsupported_kind(kind.as_str()))
            }
        }
    }

    /// Dispatch an optional node; absent nodes yield nothing
    pub fn dispatch_opt(&self, node: Option<&Node>, wrap: bool) -> Result<Fragment> {
        match node {
            Some(node) => self.dispatch(node, wrap),
            None => Ok(Fragment::empty()),
        }
    }

    /// Operands are quoted when literal and bare otherwise
    fn operand(&self, node: &Node) -> Result<Fragment> {
        self.dispatch(node, node.is_literal())
    }

    fn children(&self, children: &[Node], wrap: impl Fn(&Node) -> bool) -> Result<Fragment> {
        children
            .iter()
            .map(|child| self.dispatch(child, wrap(child)))
            .collect::<Result<Vec<_>>>()
            .map(Fragment::Seq)
    }

    fn output(&self, children: &[Node]) -> Result<Fragment> {
        children
            .iter()
            .map(|child| -> Result<Fragment> {
                let frag = self.dispatch(child, true)?;
                // these never print expression delimiters themselves
                Ok(match child {
                    Node::Literal { .. } | Node::FunCall { .. } | Node::Dict { .. } => {
                        Fragment::expression(frag, true)
                    }
                    _ => frag,
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Fragment::Seq)
    }

    fn group(&self, children: &[Node], wrap: bool) -> Result<Fragment> {
        let inner = self.children(children, |_| false)?;
        Ok(Fragment::expression(
            Fragment::seq(["(".into(), inner, ")".into()]),
            wrap,
        ))
    }

    fn lookup(&self, target: &Node, val: &Node, wrap: bool) -> Result<Fragment> {
        let target = self.dispatch(target, false)?;
        let val = self.operand(val)?;
        Ok(Fragment::expression(
            Fragment::seq([target, "[".into(), val, "]".into()]),
            wrap,
        ))
    }

    fn binop(&self, op: BinOp, left: &Node, right: &Node, wrap: bool) -> Result<Fragment> {
        let mut lhs = self.operand(left)?;
        let mut rhs = self.operand(right)?;
        if op.is_logical() {
            lhs = coerce(left, lhs);
            rhs = coerce(right, rhs);
        }
        Ok(Fragment::expression(
            Fragment::seq([lhs, op.token().into(), rhs]),
            wrap,
        ))
    }

    fn not(&self, target: &Node, wrap: bool) -> Result<Fragment> {
        let rendered = self.dispatch(target, false)?;
        // `is` binds tighter than the operators a compound target may contain
        let rendered = match target {
            node if node.is_bare_variable() || node.is_literal() => rendered,
            Node::Group { .. } => rendered,
            _ => Fragment::seq(["(".into(), rendered, ")".into()]),
        };
        Ok(Fragment::expression(truthy(rendered, true), wrap))
    }

    fn compare(&self, expr: &Node, ops: &[Node], wrap: bool) -> Result<Fragment> {
        let mut parts = vec![self.operand(expr)?];
        for op in ops {
            parts.push(self.dispatch(op, false)?);
        }
        Ok(Fragment::expression(Fragment::Seq(parts), wrap))
    }

    fn compare_operand(&self, expr: &Node, op: &str) -> Result<Fragment> {
        let expr = self.operand(expr)?;
        Ok(Fragment::seq([
            " ".into(),
            comparison_operator(op).into(),
            " ".into(),
            expr,
        ]))
    }

    fn if_block(&self, cond: &Node, body: &Node, else_: Option<&Node>) -> Result<Fragment> {
        let cond = self.dispatch(cond, false)?;
        let body = self.dispatch(body, true)?;
        let mut parts = vec![Fragment::statement(Fragment::seq(["if ".into(), cond])), body];
        if let Some(else_) = else_ {
            parts.push(Fragment::statement("else".into()));
            parts.push(self.dispatch(else_, true)?);
        }
        parts.push(Fragment::statement("endif".into()));
        Ok(Fragment::Seq(parts))
    }

    fn inline_if(
        &self,
        cond: &Node,
        body: &Node,
        else_: Option<&Node>,
        wrap: bool,
    ) -> Result<Fragment> {
        if self.options.collapse_self_conditional && else_.is_none() {
            if let (Node::Symbol { value: c }, Node::Symbol { value: b }) = (cond, body) {
                if c == b {
                    tracing::debug!(symbol = c.as_str(), "collapsing self conditional");
                    return self.dispatch(body, wrap);
                }
            }
        }

        let cond_frag = coerce(cond, self.dispatch(cond, false)?);
        let body = self.dispatch(body, false)?;
        let else_ = match else_ {
            Some(node) => self.dispatch(node, false)?,
            None => "\"\"".into(),
        };
        Ok(Fragment::expression(
            Fragment::seq([cond_frag, " ? ".into(), body, " : ".into(), else_]),
            wrap,
        ))
    }

    fn for_block(
        &self,
        name: &Node,
        arr: &Node,
        body: &Node,
        else_: Option<&Node>,
    ) -> Result<Fragment> {
        if else_.is_some() {
            tracing::warn!("for loop has an else branch");
            return Err(TransformError::unsupported_construct(
                "For",
                "else_ is not handled",
            ));
        }
        let name = self.dispatch(name, false)?;
        let arr = self.dispatch(arr, false)?;
        let body = self.dispatch(body, true)?;
        Ok(Fragment::seq([
            Fragment::statement(Fragment::seq(["for ".into(), name, " in ".into(), arr])),
            body,
            Fragment::statement("endfor".into()),
        ]))
    }

    fn filter(&self, name: &Node, args: &Node, wrap: bool) -> Result<Fragment> {
        let source_name = identifier(name)?;
        let name = self.options.filter_name(&source_name);
        if name != source_name {
            tracing::debug!(from = source_name.as_str(), to = name, "renaming filter");
        }

        let args = self.arguments(args)?;
        let (value, rest) = match args.split_first() {
            Some((value, rest)) => (value.as_str(), rest),
            None => ("", &[][..]),
        };
        let text = if rest.is_empty() {
            format!("{value} | {name}")
        } else {
            format!("{value} | {name}({})", rest.join(","))
        };
        Ok(Fragment::expression(text.into(), wrap))
    }

    fn fun_call(&self, name: &Node, args: &Node) -> Result<Fragment> {
        let name = self.dispatch(name, false)?;
        let args = self.arguments(args)?;
        Ok(Fragment::seq([
            name,
            "(".into(),
            args.join(", ").into(),
            ")".into(),
        ]))
    }

    /// Render the entries of an argument list one by one
    fn arguments(&self, args: &Node) -> Result<Vec<String>> {
        match args {
            Node::NodeList { children } => children
                .iter()
                .map(|arg| self.operand(arg).map(|frag| frag.render()))
                .collect(),
            other => Ok(vec![self.operand(other)?.render()]),
        }
    }

    fn include(&self, template: &Node, ignore_missing: bool) -> Result<Fragment> {
        let target = match template {
            Node::Literal {
                value: Scalar::String(path),
            } => {
                let stripped = self.options.include_path(path);
                if stripped.len() != path.len() {
                    tracing::debug!(path = path.as_str(), "stripping relative include prefix");
                }
                quoted(stripped)
            }
            other => self.dispatch(other, false)?,
        };
        let mut parts = vec!["include ".into(), target];
        if ignore_missing {
            parts.push(" ignore missing".into());
        }
        Ok(Fragment::statement(Fragment::Seq(parts)))
    }

    fn set(&self, targets: &[Node], value: Option<&Node>, body: Option<&Node>) -> Result<Fragment> {
        let mut names: Vec<Fragment> = Vec::with_capacity(targets.len() * 2);
        for (i, target) in targets.iter().enumerate() {
            if i > 0 {
                names.push(", ".into());
            }
            names.push(self.dispatch(target, false)?);
        }
        let names = Fragment::Seq(names);

        match (value, body) {
            (Some(value), _) => {
                let value = self.dispatch(value, false)?;
                Ok(Fragment::statement(Fragment::seq([
                    "set ".into(),
                    names,
                    " = ".into(),
                    value,
                ])))
            }
            (None, Some(body)) => Ok(Fragment::seq([
                Fragment::statement(Fragment::seq(["set ".into(), names])),
                self.dispatch(body, true)?,
                Fragment::statement("endset".into()),
            ])),
            (None, None) => Err(TransformError::unsupported_construct(
                "Set",
                "neither value nor body is present",
            )),
        }
    }

    fn dict(&self, pairs: &[Node]) -> Result<Fragment> {
        let mut parts: Vec<Fragment> = Vec::with_capacity(pairs.len() * 2);
        for (i, pair) in pairs.iter().enumerate() {
            if i > 0 {
                parts.push(", ".into());
            }
            parts.push(self.dispatch(pair, false)?);
        }
        Ok(Fragment::wrap(Fragment::Seq(parts), BRACE, true))
    }

    fn pair(&self, key: &Node, value: &Node) -> Result<Fragment> {
        let key = match key {
            Node::Symbol { value: name } => name.clone(),
            Node::Literal { value: name } => name.as_text(),
            other => return Err(TransformError::unsupported_kind(other.kind())),
        };
        let value = self.dispatch(value, false)?;
        Ok(Fragment::seq([quoted(&key), ": ".into(), value]))
    }
}

/// Strings are quoted and escaped; numbers, booleans and null are bare
fn literal(value: &Scalar) -> Fragment {
    match value {
        Scalar::String(s) => quoted(s),
        other => Fragment::text(other.as_text()),
    }
}

fn quoted(s: &str) -> Fragment {
    Fragment::wrap(escape(s).into(), QUOTE, true)
}

/// Backslash-escape the characters that would end or corrupt a `"` string
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Twig has no strict equality operators
fn comparison_operator(op: &str) -> &str {
    match op {
        "===" => "==",
        "!==" => "!=",
        other => other,
    }
}

fn identifier(node: &Node) -> Result<String> {
    match node {
        Node::Symbol { value } => Ok(value.clone()),
        Node::Literal {
            value: Scalar::String(value),
        } => Ok(value.clone()),
        other => Err(TransformError::unsupported_kind(other.kind())),
    }
}
