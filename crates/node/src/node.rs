//! [`Node`] — the tagged union spanning every JSON-shaped value.

use serde_json::Value as JsonValue;

use crate::NodeKind;

/// A JSON-shaped value.
///
/// Object entries keep insertion order. `Unknown` is a reserved
/// uninitialized sentinel: it participates in equality (equal only to
/// itself) but must never reach the binders — they reject it as a hard
/// error.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    Unknown,
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
    Array(Vec<Node>),
    Object(Vec<(String, Node)>),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Unknown => NodeKind::Unknown,
            Node::Null => NodeKind::Null,
            Node::Bool(_) => NodeKind::Bool,
            Node::Integer(_) => NodeKind::Integer,
            Node::Double(_) => NodeKind::Double,
            Node::String(_) => NodeKind::String,
            Node::Array(_) => NodeKind::Array,
            Node::Object(_) => NodeKind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// First entry with the given key, if this is an object.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Canonical diagnostic placeholder for non-scalar sources.
    ///
    /// Text coercion renders these instead of an empty string so the output
    /// never loses that the source was not a scalar.
    pub fn placeholder_text(&self) -> Option<&'static str> {
        match self {
            Node::Null => Some("null"),
            Node::Array(_) => Some("[]"),
            Node::Object(_) => Some("[:]"),
            _ => None,
        }
    }
}

impl From<bool> for Node {
    fn from(v: bool) -> Self {
        Node::Bool(v)
    }
}

impl From<i64> for Node {
    fn from(v: i64) -> Self {
        Node::Integer(v)
    }
}

impl From<f64> for Node {
    fn from(v: f64) -> Self {
        Node::Double(v)
    }
}

impl From<&str> for Node {
    fn from(v: &str) -> Self {
        Node::String(v.to_owned())
    }
}

impl From<String> for Node {
    fn from(v: String) -> Self {
        Node::String(v)
    }
}

impl From<Vec<Node>> for Node {
    fn from(v: Vec<Node>) -> Self {
        Node::Array(v)
    }
}

impl From<Vec<(String, Node)>> for Node {
    fn from(v: Vec<(String, Node)>) -> Self {
        Node::Object(v)
    }
}

impl From<&JsonValue> for Node {
    fn from(v: &JsonValue) -> Self {
        match v {
            JsonValue::Null => Node::Null,
            JsonValue::Bool(b) => Node::Bool(*b),
            JsonValue::Number(n) => {
                // Parser contract: i64-representable numbers are Integer,
                // everything else Double.
                if let Some(i) = n.as_i64() {
                    Node::Integer(i)
                } else {
                    Node::Double(n.as_f64().unwrap_or(0.0))
                }
            }
            JsonValue::String(s) => Node::String(s.clone()),
            JsonValue::Array(arr) => Node::Array(arr.iter().map(Node::from).collect()),
            JsonValue::Object(obj) => {
                Node::Object(obj.iter().map(|(k, v)| (k.clone(), Node::from(v))).collect())
            }
        }
    }
}

impl From<JsonValue> for Node {
    fn from(v: JsonValue) -> Self {
        Node::from(&v)
    }
}

impl From<&Node> for JsonValue {
    fn from(n: &Node) -> Self {
        match n {
            Node::Unknown | Node::Null => JsonValue::Null,
            Node::Bool(b) => JsonValue::Bool(*b),
            Node::Integer(i) => JsonValue::from(*i),
            // serde_json numbers cannot carry non-finite doubles; the encode
            // policy has already run by the time a tree reaches the writer.
            Node::Double(d) => serde_json::Number::from_f64(*d)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Node::String(s) => JsonValue::String(s.clone()),
            Node::Array(arr) => JsonValue::Array(arr.iter().map(JsonValue::from).collect()),
            Node::Object(entries) => JsonValue::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), JsonValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Node> for JsonValue {
    fn from(n: Node) -> Self {
        JsonValue::from(&n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn equality_is_variant_aware() {
        assert_ne!(Node::Integer(1), Node::Double(1.0));
        assert_ne!(Node::Null, Node::Unknown);
        assert_eq!(Node::Unknown, Node::Unknown);
        assert_ne!(Node::Bool(false), Node::Null);
    }

    #[test]
    fn number_channel_split() {
        assert_eq!(Node::from(json!(42)), Node::Integer(42));
        assert_eq!(Node::from(json!(-7)), Node::Integer(-7));
        assert_eq!(Node::from(json!(4.5)), Node::Double(4.5));
        // u64 above i64::MAX has no integer channel
        assert_eq!(
            Node::from(json!(u64::MAX)),
            Node::Double(u64::MAX as f64)
        );
    }

    #[test]
    fn object_preserves_insertion_order() {
        let node = Node::from(json!({"z": 1, "a": 2, "m": 3}));
        match &node {
            Node::Object(entries) => {
                let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, ["z", "a", "m"]);
            }
            other => panic!("expected object, got {:?}", other),
        }
        assert_eq!(JsonValue::from(&node), json!({"z": 1, "a": 2, "m": 3}));
    }

    #[test]
    fn get_returns_first_match() {
        let node = Node::Object(vec![
            ("a".to_owned(), Node::Integer(1)),
            ("a".to_owned(), Node::Integer(2)),
        ]);
        assert_eq!(node.get("a"), Some(&Node::Integer(1)));
        assert_eq!(node.get("b"), None);
    }

    #[test]
    fn placeholders_for_non_scalars() {
        assert_eq!(Node::Null.placeholder_text(), Some("null"));
        assert_eq!(Node::Array(vec![]).placeholder_text(), Some("[]"));
        assert_eq!(Node::Object(vec![]).placeholder_text(), Some("[:]"));
        assert_eq!(Node::Integer(0).placeholder_text(), None);
    }

    #[test]
    fn non_finite_double_serializes_as_null() {
        assert_eq!(JsonValue::from(Node::Double(f64::NAN)), JsonValue::Null);
        assert_eq!(JsonValue::from(Node::Double(1.5)), json!(1.5));
    }

    #[test]
    fn unknown_serializes_like_null_at_the_writer_seam() {
        assert_eq!(JsonValue::from(Node::Unknown), JsonValue::Null);
    }
}
