//! The default coercion matrix: a total function from every node variant to
//! each scalar target, implemented once per target as a tagged-union match.
//!
//! These functions never fail; irreconcilable inputs produce the target
//! type's intrinsic default. The `Unknown` sentinel is rejected by the
//! binders before any of these run, so it takes the default arm here.

use json_bind_node::Node;

use crate::strategy::NonFiniteTokens;

/// Bool target: `true`/`1`/`1.0` are truthy, everything else is `false`.
/// Strings parse lexically (`"true"`, `"false"`, numeric text equal to 1).
pub fn to_bool(node: &Node) -> bool {
    match node {
        Node::Bool(b) => *b,
        Node::Integer(i) => *i == 1,
        Node::Double(d) => *d == 1.0,
        Node::String(s) => {
            let t = s.trim();
            if t.eq_ignore_ascii_case("true") {
                true
            } else if t.eq_ignore_ascii_case("false") {
                false
            } else {
                t.parse::<f64>().map(|n| n == 1.0).unwrap_or(false)
            }
        }
        _ => false,
    }
}

/// Signed integer target. Doubles truncate toward zero; out-of-range and
/// unparsable sources substitute 0.
pub fn to_i64(node: &Node) -> i64 {
    match node {
        Node::Bool(b) => i64::from(*b),
        Node::Integer(i) => *i,
        Node::Double(d) => {
            let t = d.trunc();
            if t.is_finite() && t >= i64::MIN as f64 && t <= i64::MAX as f64 {
                t as i64
            } else {
                0
            }
        }
        Node::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Unsigned integer target. Negative sources substitute 0 rather than
/// wrapping.
pub fn to_u64(node: &Node) -> u64 {
    match node {
        Node::Bool(b) => u64::from(*b),
        Node::Integer(i) => u64::try_from(*i).unwrap_or(0),
        Node::Double(d) => {
            let t = d.trunc();
            if t.is_finite() && t >= 0.0 && t <= u64::MAX as f64 {
                t as u64
            } else {
                0
            }
        }
        Node::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Float target. String parsing recognizes the configured non-finite tokens
/// before the numeric grammar.
pub fn to_f64(node: &Node, tokens: &NonFiniteTokens) -> f64 {
    match node {
        Node::Bool(b) => f64::from(u8::from(*b)),
        Node::Integer(i) => *i as f64,
        Node::Double(d) => *d,
        Node::String(s) => parse_non_finite(s, tokens)
            .or_else(|| s.trim().parse().ok())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Text target. Non-scalar sources render their canonical placeholder
/// (`"null"`, `"[]"`, `"[:]"`) so the output never loses that the source
/// was not a scalar.
pub fn to_text(node: &Node) -> String {
    match node {
        Node::String(s) => s.clone(),
        Node::Bool(b) => b.to_string(),
        Node::Integer(i) => i.to_string(),
        Node::Double(d) => d.to_string(),
        _ => node.placeholder_text().unwrap_or_default().to_owned(),
    }
}

/// Recognizes the configured non-finite tokens, case-insensitively, with an
/// optional leading `+`/`-` on the positive and nan tokens.
pub fn parse_non_finite(s: &str, tokens: &NonFiniteTokens) -> Option<f64> {
    let t = s.trim();
    if t.eq_ignore_ascii_case(&tokens.nan) {
        return Some(f64::NAN);
    }
    if t.eq_ignore_ascii_case(&tokens.pos_inf) {
        return Some(f64::INFINITY);
    }
    if t.eq_ignore_ascii_case(&tokens.neg_inf) {
        return Some(f64::NEG_INFINITY);
    }
    let (sign, rest) = if let Some(r) = t.strip_prefix('-') {
        (-1.0, r)
    } else if let Some(r) = t.strip_prefix('+') {
        (1.0, r)
    } else {
        (1.0, t)
    };
    if rest.eq_ignore_ascii_case(&tokens.nan) {
        return Some(f64::NAN);
    }
    if rest.eq_ignore_ascii_case(&tokens.pos_inf) {
        return Some(sign * f64::INFINITY);
    }
    None
}
