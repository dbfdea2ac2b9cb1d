//! Explicit truthiness tests
//!
//! Nunjucks treats a bare variable in boolean position as "true or
//! non-empty". Twig does not coerce mixed types that way, so the test is
//! spelled out with both comparisons.

use super::fragment::Fragment;
use crate::ast::Node;

/// `( x == true or x is not empty )`, or its negation
pub fn truthy(cond: Fragment, negate: bool) -> Fragment {
    let (equals, empty) = if negate {
        (" == false or ", " is empty )")
    } else {
        (" == true or ", " is not empty )")
    };
    Fragment::seq(["( ".into(), cond.clone(), equals.into(), cond, empty.into()])
}

/// Apply [`truthy`] only when `node` is a bare variable
///
/// Comparisons, negations and literals are already unambiguous booleans.
pub fn coerce(node: &Node, cond: Fragment) -> Fragment {
    if node.is_bare_variable() {
        tracing::debug!(kind = node.kind(), "spelling out truthiness test");
        truthy(cond, false)
    } else {
        cond
    }
}
