//! Intermediate output of the transform
//!
//! Handlers return [`Fragment`]s instead of strings. A [`Wrap`] records the
//! delimiters a sub-expression would need on its own together with whether
//! they are printed, so the text is only produced once, by [`Fragment::render`].

use std::fmt;

/// A pair of delimiters placed around a wrapped fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub left: &'static str,
    pub right: &'static str,
}

/// `{{ expr }}`
pub const EXPRESSION: Delimiters = Delimiters {
    left: "{{ ",
    right: " }}",
};

/// `{% statement %}`
pub const STATEMENT: Delimiters = Delimiters {
    left: "{% ",
    right: " %}",
};

/// `"string"`
pub const QUOTE: Delimiters = Delimiters {
    left: "\"",
    right: "\"",
};

/// `{key: value}`
pub const BRACE: Delimiters = Delimiters {
    left: "{",
    right: "}",
};

#[derive(Debug, Clone, PartialEq)]
pub struct Wrap {
    pub inner: Fragment,
    pub delimiters: Delimiters,
    pub emit: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Text(String),
    Seq(Vec<Fragment>),
    Wrap(Box<Wrap>),
}

impl Fragment {
    pub fn empty() -> Self {
        Fragment::Seq(Vec::new())
    }

    pub fn text(s: impl Into<String>) -> Self {
        Fragment::Text(s.into())
    }

    pub fn seq(parts: impl IntoIterator<Item = Fragment>) -> Self {
        Fragment::Seq(parts.into_iter().collect())
    }

    pub fn wrap(inner: Fragment, delimiters: Delimiters, emit: bool) -> Self {
        Fragment::Wrap(Box::new(Wrap {
            inner,
            delimiters,
            emit,
        }))
    }

    pub fn expression(inner: Fragment, emit: bool) -> Self {
        Self::wrap(inner, EXPRESSION, emit)
    }

    /// Statements are always delimited
    pub fn statement(inner: Fragment) -> Self {
        Self::wrap(inner, STATEMENT, true)
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Fragment::Text(s) => s.is_empty(),
            Fragment::Seq(parts) => parts.iter().all(Fragment::is_empty),
            Fragment::Wrap(_) => false,
        }
    }

    /// Flatten into the final text
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        match self {
            Fragment::Text(s) => out.push_str(s),
            Fragment::Seq(parts) => {
                for part in parts {
                    part.render_into(out);
                }
            }
            Fragment::Wrap(wrap) => {
                if wrap.emit {
                    out.push_str(wrap.delimiters.left);
                }
                wrap.inner.render_into(out);
                if wrap.emit {
                    out.push_str(wrap.delimiters.right);
                }
            }
        }
    }
}

impl From<&str> for Fragment {
    fn from(s: &str) -> Self {
        Fragment::Text(s.to_string())
    }
}

impl From<String> for Fragment {
    fn from(s: String) -> Self {
        Fragment::Text(s)
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_emit() {
        let frag = Fragment::expression("name".into(), true);
        assert_eq!(frag.render(), "{{ name }}");
    }

    #[test]
    fn test_wrap_suppressed() {
        let frag = Fragment::expression("name".into(), false);
        assert_eq!(frag.render(), "name");
    }

    #[test]
    fn test_nested_wraps_resolve_independently() {
        let inner = Fragment::expression("x".into(), false);
        let outer = Fragment::statement(Fragment::seq(["if ".into(), inner]));
        assert_eq!(outer.render(), "{% if x %}");
    }

    #[test]
    fn test_seq_order() {
        let frag = Fragment::seq(["a".into(), Fragment::seq(["b".into(), "c".into()]), "d".into()]);
        assert_eq!(frag.to_string(), "abcd");
    }

    #[test]
    fn test_empty() {
        assert!(Fragment::empty().is_empty());
        assert!(Fragment::seq([Fragment::text("")]).is_empty());
        assert!(!Fragment::wrap(Fragment::empty(), QUOTE, true).is_empty());
        assert_eq!(Fragment::wrap(Fragment::empty(), QUOTE, true).render(), "\"\"");
    }
}
