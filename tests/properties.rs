//! Property-based tests for the rewrite rules

use kusari::ast::builders::*;
use kusari::ast::BinOp;
use kusari::transform;
use proptest::prelude::*;

fn ident() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,10}"
}

/// Inverse of the literal escaping, for round-trip checks
fn unescape(s: &str) -> String {
    let mut out = String::new();
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

proptest! {
    #[test]
    fn symbol_in_output(name in ident()) {
        let tree = root(vec![output(vec![sym(&name)])]);
        prop_assert_eq!(transform(&tree).unwrap(), format!("{{{{ {} }}}}", name));
    }

    #[test]
    fn property_chain_becomes_subscripts(base in ident(), keys in prop::collection::vec(ident(), 1..6)) {
        let mut node = sym(&base);
        for key in &keys {
            node = attr(node, key);
        }
        let expected: String = keys.iter().map(|k| format!("[\"{}\"]", k)).collect();
        let tree = root(vec![output(vec![node])]);
        prop_assert_eq!(
            transform(&tree).unwrap(),
            format!("{{{{ {}{} }}}}", base, expected)
        );
    }

    #[test]
    fn string_literal_round_trips(value in ".*") {
        let tree = root(vec![output(vec![str_lit(&value)])]);
        let out = transform(&tree).unwrap();
        let quoted = out
            .strip_prefix("{{ \"")
            .and_then(|s| s.strip_suffix("\" }}"))
            .expect("quoted literal in expression delimiters");
        // every embedded quote is escaped
        let unescaped_quote = quoted
            .char_indices()
            .filter(|&(_, c)| c == '"')
            .any(|(i, _)| {
                let backslashes = quoted[..i].chars().rev().take_while(|&c| c == '\\').count();
                backslashes % 2 == 0
            });
        prop_assert!(!unescaped_quote);
        prop_assert_eq!(unescape(quoted), value);
    }

    #[test]
    fn binary_operands_keep_order(left in ident(), right in ident(), idx in 0usize..6) {
        // logical operators rewrite their operands, so only arithmetic here
        let op = BinOp::ALL[idx];
        let tree = root(vec![output(vec![binop(op, sym(&left), sym(&right))])]);
        prop_assert_eq!(
            transform(&tree).unwrap(),
            format!("{{{{ {}{}{} }}}}", left, op.token(), right)
        );
    }

    #[test]
    fn filter_argument_layout(value in ident(), name in ident(), args in prop::collection::vec(ident(), 0..5)) {
        prop_assume!(name != "safe");
        let tree = root(vec![output(vec![filter(
            &name,
            sym(&value),
            args.iter().map(|a| sym(a)).collect(),
        )])]);
        let expected = if args.is_empty() {
            format!("{{{{ {} | {} }}}}", value, name)
        } else {
            format!("{{{{ {} | {}({}) }}}}", value, name, args.join(","))
        };
        prop_assert_eq!(transform(&tree).unwrap(), expected);
    }

    #[test]
    fn comparisons_are_not_coerced(left in ident(), n in 0i64..100) {
        // {{ 'y' if left == n }}
        let tree = root(vec![output(vec![inline_if(
            compare(sym(&left), vec![("==", num_lit(n))]),
            str_lit("y"),
            None,
        )])]);
        prop_assert_eq!(
            transform(&tree).unwrap(),
            format!("{{{{ {} == {} ? \"y\" : \"\" }}}}", left, n)
        );
    }
}
