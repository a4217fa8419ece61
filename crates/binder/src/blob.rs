//! Binary blob leaf type and its strategy-driven representations.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use json_bind_node::Node;
use json_bind_util::{from_hex, to_hex};

use crate::coerce;
use crate::path::Path;
use crate::strategy::BinaryStrategy;

/// A binary blob. Distinct from `Vec<u8>` so byte payloads take the binary
/// representation strategy instead of the generic array path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(v: Vec<u8>) -> Self {
        Self(v)
    }
}

impl From<&[u8]> for Bytes {
    fn from(v: &[u8]) -> Self {
        Self(v.to_vec())
    }
}

impl std::ops::Deref for Bytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

pub(crate) fn encode_bytes(strategy: &BinaryStrategy, bytes: &[u8]) -> Node {
    match strategy {
        BinaryStrategy::Base64 => Node::String(STANDARD.encode(bytes)),
        BinaryStrategy::HexString => Node::String(to_hex(bytes)),
        BinaryStrategy::RawBytes => {
            Node::Array(bytes.iter().map(|&b| Node::Integer(i64::from(b))).collect())
        }
        BinaryStrategy::Custom(codec) => codec.encode(bytes),
    }
}

/// `None` means the node did not carry bytes in the active representation;
/// the caller substitutes empty bytes. An integer array is accepted under
/// every built-in strategy since its shape is unambiguous.
pub(crate) fn decode_bytes(
    strategy: &BinaryStrategy,
    path: &Path,
    node: &Node,
) -> Option<Vec<u8>> {
    if let BinaryStrategy::Custom(codec) = strategy {
        return codec.decode(path, node);
    }
    match node {
        Node::Array(items) => Some(
            items
                .iter()
                .map(|item| u8::try_from(coerce::to_i64(item)).unwrap_or(0))
                .collect(),
        ),
        Node::String(s) => match strategy {
            BinaryStrategy::Base64 => STANDARD.decode(s.trim()).ok(),
            BinaryStrategy::HexString => from_hex(s.trim()),
            BinaryStrategy::RawBytes | BinaryStrategy::Custom(_) => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_roundtrip() {
        let strategy = BinaryStrategy::Base64;
        let node = encode_bytes(&strategy, b"hello world");
        assert_eq!(node, Node::String("aGVsbG8gd29ybGQ=".to_owned()));
        assert_eq!(
            decode_bytes(&strategy, &Path::new(), &node),
            Some(b"hello world".to_vec())
        );
    }

    #[test]
    fn hex_roundtrip() {
        let strategy = BinaryStrategy::HexString;
        let node = encode_bytes(&strategy, &[0xde, 0xad]);
        assert_eq!(node, Node::String("dead".to_owned()));
        assert_eq!(
            decode_bytes(&strategy, &Path::new(), &node),
            Some(vec![0xde, 0xad])
        );
    }

    #[test]
    fn raw_bytes_roundtrip() {
        let strategy = BinaryStrategy::RawBytes;
        let node = encode_bytes(&strategy, &[1, 255]);
        assert_eq!(
            node,
            Node::Array(vec![Node::Integer(1), Node::Integer(255)])
        );
        assert_eq!(
            decode_bytes(&strategy, &Path::new(), &node),
            Some(vec![1, 255])
        );
    }

    #[test]
    fn integer_array_accepted_under_any_strategy() {
        let node = Node::Array(vec![Node::Integer(7), Node::Integer(300)]);
        // 300 is out of byte range and substitutes 0
        assert_eq!(
            decode_bytes(&BinaryStrategy::Base64, &Path::new(), &node),
            Some(vec![7, 0])
        );
    }

    #[test]
    fn unparsable_input_yields_none() {
        assert_eq!(
            decode_bytes(
                &BinaryStrategy::Base64,
                &Path::new(),
                &Node::String("!!not base64!!".to_owned())
            ),
            None
        );
        assert_eq!(
            decode_bytes(&BinaryStrategy::HexString, &Path::new(), &Node::Integer(5)),
            None
        );
    }
}
