//! Top-level entry points: bytes, text, in-memory trees, and
//! `serde_json::Value` containers in; the same four shapes out.
//!
//! The parser/writer seam is serde_json; the writer only serializes the
//! already-translated tree, it applies no strategies of its own.

use json_bind_node::Node;
use serde_json::Value as JsonValue;

use crate::decode::{DecodeBinder, FromNode};
use crate::encode::{EncodeBinder, ToNode};
use crate::error::BindError;
use crate::strategy::Strategies;

/// Writer options.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    pub pretty: bool,
}

/// Decodes a value from raw JSON bytes.
pub fn from_slice<T: FromNode>(bytes: &[u8], strategies: &Strategies) -> Result<T, BindError> {
    let value: JsonValue = serde_json::from_slice(bytes)?;
    from_value(&value, strategies)
}

/// Decodes a value from JSON text.
pub fn from_str<T: FromNode>(text: &str, strategies: &Strategies) -> Result<T, BindError> {
    let value: JsonValue = serde_json::from_str(text)?;
    from_value(&value, strategies)
}

/// Decodes a value from an opaque native container.
pub fn from_value<T: FromNode>(value: &JsonValue, strategies: &Strategies) -> Result<T, BindError> {
    from_node(&Node::from(value), strategies)
}

/// Decodes a value from an in-memory tree.
pub fn from_node<T: FromNode>(node: &Node, strategies: &Strategies) -> Result<T, BindError> {
    DecodeBinder::new(strategies).decode_root(node)
}

/// Encodes a value to an in-memory tree.
pub fn to_node<T: ToNode + ?Sized>(value: &T, strategies: &Strategies) -> Result<Node, BindError> {
    EncodeBinder::new(strategies).encode_root(value)
}

/// Encodes a value to an opaque native container.
pub fn to_value<T: ToNode + ?Sized>(
    value: &T,
    strategies: &Strategies,
) -> Result<JsonValue, BindError> {
    Ok(JsonValue::from(to_node(value, strategies)?))
}

/// Encodes a value to JSON text.
pub fn to_string<T: ToNode + ?Sized>(
    value: &T,
    strategies: &Strategies,
    options: &WriteOptions,
) -> Result<String, BindError> {
    let json = to_value(value, strategies)?;
    // serializing an already-built Value cannot produce invalid JSON
    Ok(if options.pretty {
        serde_json::to_string_pretty(&json).unwrap_or_default()
    } else {
        serde_json::to_string(&json).unwrap_or_default()
    })
}

/// Encodes a value to raw JSON bytes.
pub fn to_vec<T: ToNode + ?Sized>(
    value: &T,
    strategies: &Strategies,
    options: &WriteOptions,
) -> Result<Vec<u8>, BindError> {
    Ok(to_string(value, strategies, options)?.into_bytes())
}
