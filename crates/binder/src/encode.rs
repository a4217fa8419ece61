//! Encode binder: walks a typed model and produces a [`Node`] tree,
//! preserving field declaration order.
//!
//! Scalar leaves mirror the coercion matrix: exact representation for
//! matching types, strategy-governed representation for dates, binary
//! blobs, and non-finite floats.

use json_bind_node::Node;

use crate::blob::{self, Bytes};
use crate::error::BindError;
use crate::meta::FieldMeta;
use crate::path::Path;
use crate::strategy::{NonFinitePolicy, Strategies};
use crate::timestamp::{self, Timestamp};

/// One in-flight encode traversal.
pub struct EncodeBinder<'a> {
    strategies: &'a Strategies,
    path: Path,
}

impl<'a> EncodeBinder<'a> {
    pub fn new(strategies: &'a Strategies) -> Self {
        Self {
            strategies,
            path: Path::new(),
        }
    }

    pub fn strategies(&self) -> &Strategies {
        self.strategies
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn encode_root<T: ToNode + ?Sized>(&mut self, value: &T) -> Result<Node, BindError> {
        value.to_node(self)
    }

    /// Keyed encoding context building ordered object entries.
    pub fn keyed<'b>(&'b mut self) -> KeyedEnc<'b, 'a> {
        KeyedEnc {
            binder: self,
            entries: Vec::new(),
        }
    }

    /// A double leaf, routed through the non-finite policy when needed.
    pub fn double(&self, value: f64) -> Result<Node, BindError> {
        if value.is_finite() {
            return Ok(Node::Double(value));
        }
        match &self.strategies.non_finite {
            NonFinitePolicy::Throw => Err(BindError::NonFiniteFloat {
                path: self.path.render(),
            }),
            NonFinitePolicy::SubstituteTokens(tokens) => {
                let token = if value.is_nan() {
                    &tokens.nan
                } else if value > 0.0 {
                    &tokens.pos_inf
                } else {
                    &tokens.neg_inf
                };
                Ok(Node::String(token.clone()))
            }
            NonFinitePolicy::SubstituteLiteral(node) => Ok(node.clone()),
        }
    }
}

/// Typed encoding into a tree position.
pub trait ToNode {
    fn to_node(&self, binder: &mut EncodeBinder<'_>) -> Result<Node, BindError>;
}

/// Keyed encoding context: one entry per declared field, visited in
/// declaration order. The key is the metadata rename override when present,
/// else the declared name through the active key strategy.
pub struct KeyedEnc<'b, 'a> {
    binder: &'b mut EncodeBinder<'a>,
    entries: Vec<(String, Node)>,
}

impl<'b, 'a> KeyedEnc<'b, 'a> {
    pub fn field<T: ToNode + ?Sized>(
        &mut self,
        meta: &FieldMeta,
        value: &T,
    ) -> Result<(), BindError> {
        self.binder.path.push_key(meta.name);
        let result = self.entry(meta, value);
        self.binder.path.pop();
        let (key, node) = result?;
        self.entries.push((key, node));
        Ok(())
    }

    fn entry<T: ToNode + ?Sized>(
        &mut self,
        meta: &FieldMeta,
        value: &T,
    ) -> Result<(String, Node), BindError> {
        let key = match meta.rename {
            Some(rename) => rename.to_owned(),
            None => self
                .binder
                .strategies
                .key
                .apply(&self.binder.path, meta.name),
        };
        let node = value.to_node(self.binder)?;
        Ok((key, node))
    }

    pub fn finish(self) -> Node {
        Node::Object(self.entries)
    }
}

impl ToNode for bool {
    fn to_node(&self, _binder: &mut EncodeBinder<'_>) -> Result<Node, BindError> {
        Ok(Node::Bool(*self))
    }
}

macro_rules! impl_to_node_int {
    ($($t:ty),* $(,)?) => {$(
        impl ToNode for $t {
            fn to_node(&self, _binder: &mut EncodeBinder<'_>) -> Result<Node, BindError> {
                Ok(Node::Integer(i64::from(*self)))
            }
        }
    )*};
}

impl_to_node_int!(i8, i16, i32, i64, u8, u16, u32);

impl ToNode for u64 {
    fn to_node(&self, _binder: &mut EncodeBinder<'_>) -> Result<Node, BindError> {
        // the tree's integer channel is i64; larger magnitudes go lossy
        // through the double channel, as at the parser seam
        match i64::try_from(*self) {
            Ok(i) => Ok(Node::Integer(i)),
            Err(_) => Ok(Node::Double(*self as f64)),
        }
    }
}

impl ToNode for f64 {
    fn to_node(&self, binder: &mut EncodeBinder<'_>) -> Result<Node, BindError> {
        binder.double(*self)
    }
}

impl ToNode for f32 {
    fn to_node(&self, binder: &mut EncodeBinder<'_>) -> Result<Node, BindError> {
        binder.double(f64::from(*self))
    }
}

impl ToNode for String {
    fn to_node(&self, _binder: &mut EncodeBinder<'_>) -> Result<Node, BindError> {
        Ok(Node::String(self.clone()))
    }
}

impl ToNode for str {
    fn to_node(&self, _binder: &mut EncodeBinder<'_>) -> Result<Node, BindError> {
        Ok(Node::String(self.to_owned()))
    }
}

impl ToNode for Bytes {
    fn to_node(&self, binder: &mut EncodeBinder<'_>) -> Result<Node, BindError> {
        Ok(blob::encode_bytes(&binder.strategies.binary, &self.0))
    }
}

impl ToNode for Timestamp {
    fn to_node(&self, binder: &mut EncodeBinder<'_>) -> Result<Node, BindError> {
        Ok(timestamp::encode_timestamp(&binder.strategies.date, self))
    }
}

/// Identity: splices an already-built sub-tree.
impl ToNode for Node {
    fn to_node(&self, binder: &mut EncodeBinder<'_>) -> Result<Node, BindError> {
        if matches!(self, Node::Unknown) {
            return Err(BindError::UnknownSentinel {
                path: binder.path.render(),
            });
        }
        Ok(self.clone())
    }
}

impl<T: ToNode> ToNode for Option<T> {
    fn to_node(&self, binder: &mut EncodeBinder<'_>) -> Result<Node, BindError> {
        match self {
            Some(value) => value.to_node(binder),
            None => Ok(Node::Null),
        }
    }
}

impl<T: ToNode> ToNode for Vec<T> {
    fn to_node(&self, binder: &mut EncodeBinder<'_>) -> Result<Node, BindError> {
        let mut items = Vec::with_capacity(self.len());
        for (index, value) in self.iter().enumerate() {
            binder.path.push_index(index);
            let item = value.to_node(binder);
            binder.path.pop();
            items.push(item?);
        }
        Ok(Node::Array(items))
    }
}

impl<T: ToNode + ?Sized> ToNode for &T {
    fn to_node(&self, binder: &mut EncodeBinder<'_>) -> Result<Node, BindError> {
        (**self).to_node(binder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::NonFiniteTokens;

    fn encode<T: ToNode + ?Sized>(value: &T) -> Result<Node, BindError> {
        let strategies = Strategies::new();
        let mut binder = EncodeBinder::new(&strategies);
        binder.encode_root(value)
    }

    #[test]
    fn scalar_leaves_are_exact() {
        assert_eq!(encode(&true).unwrap(), Node::Bool(true));
        assert_eq!(encode(&-7i32).unwrap(), Node::Integer(-7));
        assert_eq!(encode(&4.5f64).unwrap(), Node::Double(4.5));
        assert_eq!(encode("hi").unwrap(), Node::String("hi".to_owned()));
        assert_eq!(encode(&Some(3i64)).unwrap(), Node::Integer(3));
        assert_eq!(encode(&None::<i64>).unwrap(), Node::Null);
    }

    #[test]
    fn large_u64_takes_the_double_channel() {
        assert_eq!(encode(&5u64).unwrap(), Node::Integer(5));
        assert_eq!(
            encode(&u64::MAX).unwrap(),
            Node::Double(u64::MAX as f64)
        );
    }

    #[test]
    fn vec_preserves_element_order() {
        let node = encode(&vec![1i64, 2, 3]).unwrap();
        assert_eq!(
            node,
            Node::Array(vec![Node::Integer(1), Node::Integer(2), Node::Integer(3)])
        );
    }

    #[test]
    fn non_finite_default_policy_substitutes_tokens() {
        assert_eq!(
            encode(&f64::INFINITY).unwrap(),
            Node::String("infinity".to_owned())
        );
        assert_eq!(
            encode(&f64::NEG_INFINITY).unwrap(),
            Node::String("-infinity".to_owned())
        );
        assert_eq!(encode(&f64::NAN).unwrap(), Node::String("nan".to_owned()));
    }

    #[test]
    fn non_finite_throw_policy_errors_with_path() {
        let strategies = Strategies::new().with_non_finite(NonFinitePolicy::Throw);
        let mut binder = EncodeBinder::new(&strategies);
        let err = binder.encode_root(&vec![1.0f64, f64::NAN]).unwrap_err();
        assert!(matches!(err, BindError::NonFiniteFloat { .. }));
        assert_eq!(err.path(), Some("[]1"));
        assert!(binder.path().is_empty());
    }

    #[test]
    fn non_finite_literal_policy_substitutes_the_node() {
        let strategies = Strategies::new()
            .with_non_finite(NonFinitePolicy::SubstituteLiteral(Node::Null));
        let mut binder = EncodeBinder::new(&strategies);
        assert_eq!(binder.encode_root(&f64::NAN).unwrap(), Node::Null);
    }

    #[test]
    fn unknown_node_cannot_be_spliced() {
        let err = encode(&Node::Unknown).unwrap_err();
        assert!(matches!(err, BindError::UnknownSentinel { .. }));
    }

    #[test]
    fn custom_tokens_apply() {
        let strategies = Strategies::new().with_non_finite(NonFinitePolicy::SubstituteTokens(
            NonFiniteTokens {
                pos_inf: "+INF".to_owned(),
                neg_inf: "-INF".to_owned(),
                nan: "NAN".to_owned(),
            },
        ));
        let mut binder = EncodeBinder::new(&strategies);
        assert_eq!(
            binder.encode_root(&f32::NEG_INFINITY).unwrap(),
            Node::String("-INF".to_owned())
        );
    }
}
