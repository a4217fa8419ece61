//! Decode binder: walks a [`Node`] tree guided by per-field metadata and the
//! strategy registry, producing typed values.
//!
//! Missing keys and scalar mismatches substitute the target type's default
//! (with a debug event); only container/variant mismatches and the `Unknown`
//! sentinel are hard errors. Every descent pushes one path segment and pops
//! it on every exit: the child result is captured, the pop runs
//! unconditionally, then the result propagates.

use std::sync::Arc;

use json_bind_node::{Node, NodeKind};

use crate::blob::{self, Bytes};
use crate::coerce;
use crate::error::BindError;
use crate::meta::FieldMeta;
use crate::path::Path;
use crate::pointer;
use crate::strategy::{CoerceDelegate, NonFiniteTokens, Strategies};
use crate::timestamp::{self, Timestamp};

/// One in-flight decode traversal: the registry by shared reference, the
/// path tracker by exclusive ownership.
pub struct DecodeBinder<'a> {
    strategies: &'a Strategies,
    tokens: NonFiniteTokens,
    path: Path,
}

impl<'a> DecodeBinder<'a> {
    pub fn new(strategies: &'a Strategies) -> Self {
        Self {
            strategies,
            tokens: strategies.non_finite_tokens(),
            path: Path::new(),
        }
    }

    pub fn strategies(&self) -> &Strategies {
        self.strategies
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decodes the document root, honoring the start-path strategy.
    ///
    /// An unresolved start path behaves like an absent key: the target
    /// decodes to its defaults.
    pub fn decode_root<T: FromNode>(&mut self, node: &Node) -> Result<T, BindError> {
        match self.strategies.start_path.as_deref() {
            Some(start) => match pointer::resolve(node, start) {
                Some(sub) => T::from_node(self, sub),
                None => {
                    tracing::debug!(start, "start path did not resolve; substituting default");
                    T::from_absent(self)
                }
            },
            None => T::from_node(self, node),
        }
    }

    /// Keyed traversal context over `node`'s entries.
    ///
    /// `Null` counts as an empty object (absent-payload equivalence); any
    /// other non-object variant is a shape mismatch.
    pub fn keyed<'b, 'n>(&'b mut self, node: &'n Node) -> Result<KeyedCx<'b, 'a, 'n>, BindError> {
        self.guard_known(node)?;
        let entries: &'n [(String, Node)] = match node {
            Node::Object(entries) => entries,
            Node::Null => &[],
            other => return Err(self.shape_mismatch(NodeKind::Object, other)),
        };
        Ok(KeyedCx {
            binder: self,
            entries,
        })
    }

    fn guard_known(&self, node: &Node) -> Result<(), BindError> {
        if matches!(node, Node::Unknown) {
            return Err(BindError::UnknownSentinel {
                path: self.path.render(),
            });
        }
        Ok(())
    }

    fn shape_mismatch(&self, expected: NodeKind, found: &Node) -> BindError {
        BindError::ShapeMismatch {
            expected,
            found: found.kind(),
            path: self.path.render(),
        }
    }

    fn delegate(&self) -> Option<&Arc<dyn CoerceDelegate>> {
        self.strategies.delegate()
    }
}

/// Typed decoding from a tree position (the singular context). Containers
/// recurse through the keyed/indexed contexts; scalars dispatch to the
/// coercion matrix.
pub trait FromNode: Sized {
    fn from_node(binder: &mut DecodeBinder<'_>, node: &Node) -> Result<Self, BindError>;

    /// Decodes the value for a position whose source key is absent. The
    /// default routes through the null row of the matrix.
    fn from_absent(binder: &mut DecodeBinder<'_>) -> Result<Self, BindError> {
        Self::from_node(binder, &Node::Null)
    }
}

/// Keyed context over an object's entries; fields resolve by translated
/// name, then aliases in declared order, then default substitution.
pub struct KeyedCx<'b, 'a, 'n> {
    binder: &'b mut DecodeBinder<'a>,
    entries: &'n [(String, Node)],
}

impl std::fmt::Debug for KeyedCx<'_, '_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedCx")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl<'b, 'a, 'n> KeyedCx<'b, 'a, 'n> {
    pub fn field<T: FromNode>(&mut self, meta: &FieldMeta) -> Result<T, BindError> {
        self.binder.path.push_key(meta.name);
        let result = self.field_at(meta);
        self.binder.path.pop();
        result
    }

    fn field_at<T: FromNode>(&mut self, meta: &FieldMeta) -> Result<T, BindError> {
        let translated = self
            .binder
            .strategies
            .key
            .apply(&self.binder.path, meta.name);
        if let Some(child) = lookup(self.entries, &translated) {
            return T::from_node(self.binder, child);
        }
        for alias in meta.aliases {
            if let Some(child) = lookup(self.entries, alias) {
                return T::from_node(self.binder, child);
            }
        }
        tracing::debug!(
            path = %self.binder.path,
            key = %translated,
            "key not found; substituting default"
        );
        T::from_absent(self.binder)
    }

    /// Raw entry lookup, bypassing translation and aliases.
    pub fn raw(&self, key: &str) -> Option<&'n Node> {
        lookup(self.entries, key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn lookup<'n>(entries: &'n [(String, Node)], key: &str) -> Option<&'n Node> {
    entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

impl FromNode for bool {
    fn from_node(binder: &mut DecodeBinder<'_>, node: &Node) -> Result<Self, BindError> {
        binder.guard_known(node)?;
        if let Some(v) = binder.delegate().and_then(|d| d.coerce_bool(&binder.path, node)) {
            return Ok(v);
        }
        Ok(coerce::to_bool(node))
    }
}

macro_rules! impl_from_node_signed {
    ($($t:ty),* $(,)?) => {$(
        impl FromNode for $t {
            fn from_node(binder: &mut DecodeBinder<'_>, node: &Node) -> Result<Self, BindError> {
                binder.guard_known(node)?;
                let wide = match binder.delegate().and_then(|d| d.coerce_i64(&binder.path, node)) {
                    Some(v) => v,
                    None => coerce::to_i64(node),
                };
                // out-of-range narrows substitute the intrinsic default
                Ok(<$t>::try_from(wide).unwrap_or_default())
            }
        }
    )*};
}

macro_rules! impl_from_node_unsigned {
    ($($t:ty),* $(,)?) => {$(
        impl FromNode for $t {
            fn from_node(binder: &mut DecodeBinder<'_>, node: &Node) -> Result<Self, BindError> {
                binder.guard_known(node)?;
                let wide = match binder.delegate().and_then(|d| d.coerce_u64(&binder.path, node)) {
                    Some(v) => v,
                    None => coerce::to_u64(node),
                };
                Ok(<$t>::try_from(wide).unwrap_or_default())
            }
        }
    )*};
}

impl_from_node_signed!(i8, i16, i32, i64);
impl_from_node_unsigned!(u8, u16, u32, u64);

impl FromNode for f64 {
    fn from_node(binder: &mut DecodeBinder<'_>, node: &Node) -> Result<Self, BindError> {
        binder.guard_known(node)?;
        if let Some(v) = binder.delegate().and_then(|d| d.coerce_f64(&binder.path, node)) {
            return Ok(v);
        }
        Ok(coerce::to_f64(node, &binder.tokens))
    }
}

impl FromNode for f32 {
    fn from_node(binder: &mut DecodeBinder<'_>, node: &Node) -> Result<Self, BindError> {
        Ok(f64::from_node(binder, node)? as f32)
    }
}

impl FromNode for String {
    fn from_node(binder: &mut DecodeBinder<'_>, node: &Node) -> Result<Self, BindError> {
        binder.guard_known(node)?;
        if let Some(v) = binder.delegate().and_then(|d| d.coerce_text(&binder.path, node)) {
            return Ok(v);
        }
        Ok(coerce::to_text(node))
    }
}

impl FromNode for Bytes {
    fn from_node(binder: &mut DecodeBinder<'_>, node: &Node) -> Result<Self, BindError> {
        binder.guard_known(node)?;
        if let Some(v) = binder.delegate().and_then(|d| d.coerce_bytes(&binder.path, node)) {
            return Ok(Bytes(v));
        }
        match blob::decode_bytes(&binder.strategies.binary, &binder.path, node) {
            Some(v) => Ok(Bytes(v)),
            None => {
                if !node.is_null() {
                    tracing::debug!(
                        path = %binder.path,
                        kind = %node.kind(),
                        "unrecognized binary payload; substituting empty bytes"
                    );
                }
                Ok(Bytes::default())
            }
        }
    }
}

impl FromNode for Timestamp {
    fn from_node(binder: &mut DecodeBinder<'_>, node: &Node) -> Result<Self, BindError> {
        binder.guard_known(node)?;
        if let Some(v) = binder
            .delegate()
            .and_then(|d| d.coerce_timestamp(&binder.path, node))
        {
            return Ok(v);
        }
        match timestamp::decode_timestamp(&binder.strategies.date, &binder.path, node) {
            Some(v) => Ok(v),
            None => {
                if !node.is_null() {
                    tracing::debug!(
                        path = %binder.path,
                        kind = %node.kind(),
                        "unrecognized timestamp; substituting epoch"
                    );
                }
                Ok(Timestamp::default())
            }
        }
    }
}

/// Identity: captures the sub-tree at the current position.
impl FromNode for Node {
    fn from_node(binder: &mut DecodeBinder<'_>, node: &Node) -> Result<Self, BindError> {
        binder.guard_known(node)?;
        Ok(node.clone())
    }
}

impl<T: FromNode> FromNode for Option<T> {
    fn from_node(binder: &mut DecodeBinder<'_>, node: &Node) -> Result<Self, BindError> {
        binder.guard_known(node)?;
        if node.is_null() {
            let null_is_value = binder
                .delegate()
                .map(|d| d.null_is_value(&binder.path))
                .unwrap_or(false);
            if null_is_value {
                return Ok(Some(T::from_node(binder, node)?));
            }
            return Ok(None);
        }
        Ok(Some(T::from_node(binder, node)?))
    }

    fn from_absent(_binder: &mut DecodeBinder<'_>) -> Result<Self, BindError> {
        Ok(None)
    }
}

impl<T: FromNode> FromNode for Vec<T> {
    fn from_node(binder: &mut DecodeBinder<'_>, node: &Node) -> Result<Self, BindError> {
        binder.guard_known(node)?;
        match node {
            Node::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (index, child) in items.iter().enumerate() {
                    binder.path.push_index(index);
                    let item = T::from_node(binder, child);
                    binder.path.pop();
                    out.push(item?);
                }
                Ok(out)
            }
            Node::Null => {
                tracing::debug!(path = %binder.path, "null for array target; substituting empty");
                Ok(Vec::new())
            }
            other => Err(binder.shape_mismatch(NodeKind::Array, other)),
        }
    }

    fn from_absent(_binder: &mut DecodeBinder<'_>) -> Result<Self, BindError> {
        Ok(Vec::new())
    }
}
