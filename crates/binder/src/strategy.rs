//! The strategy registry: independently swappable policies governing key
//! translation, scalar coercion overrides, date/binary representation,
//! non-finite float handling, and pre-decode sub-tree selection.
//!
//! A registry is configured once on a binder call and is read-only for the
//! duration of a traversal.

use std::fmt;
use std::sync::Arc;

use json_bind_node::Node;
pub use json_bind_util::CaseForm;
use json_bind_util::{to_camel, to_pascal, to_snake};

use crate::path::Path;
use crate::timestamp::Timestamp;

/// How declared field names translate to source/output keys.
#[derive(Clone, Default)]
pub enum KeyStrategy {
    /// Use the declared name verbatim.
    #[default]
    UseAsDeclared,
    Camel(CaseForm),
    Snake(CaseForm),
    Pascal(CaseForm),
    Upper,
    Lower,
    /// Full override: receives the current path (whose last segment is the
    /// declared field name) and the declared name, returns the key.
    Custom(Arc<dyn Fn(&Path, &str) -> String + Send + Sync>),
}

impl KeyStrategy {
    pub fn apply(&self, path: &Path, declared: &str) -> String {
        match self {
            KeyStrategy::UseAsDeclared => declared.to_owned(),
            KeyStrategy::Camel(form) => to_camel(declared, *form),
            KeyStrategy::Snake(form) => to_snake(declared, *form),
            KeyStrategy::Pascal(form) => to_pascal(declared, *form),
            KeyStrategy::Upper => declared.to_uppercase(),
            KeyStrategy::Lower => declared.to_lowercase(),
            KeyStrategy::Custom(f) => f(path, declared),
        }
    }
}

impl fmt::Debug for KeyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyStrategy::UseAsDeclared => f.write_str("UseAsDeclared"),
            KeyStrategy::Camel(form) => write!(f, "Camel({form:?})"),
            KeyStrategy::Snake(form) => write!(f, "Snake({form:?})"),
            KeyStrategy::Pascal(form) => write!(f, "Pascal({form:?})"),
            KeyStrategy::Upper => f.write_str("Upper"),
            KeyStrategy::Lower => f.write_str("Lower"),
            KeyStrategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Per-site coercion override.
///
/// A hook returning `Some` supersedes the default matrix for that site
/// entirely; `None` means the delegate does not claim the site and the
/// defaults run.
#[allow(unused_variables)]
pub trait CoerceDelegate: Send + Sync {
    fn coerce_bool(&self, path: &Path, node: &Node) -> Option<bool> {
        None
    }
    fn coerce_i64(&self, path: &Path, node: &Node) -> Option<i64> {
        None
    }
    fn coerce_u64(&self, path: &Path, node: &Node) -> Option<u64> {
        None
    }
    fn coerce_f64(&self, path: &Path, node: &Node) -> Option<f64> {
        None
    }
    fn coerce_text(&self, path: &Path, node: &Node) -> Option<String> {
        None
    }
    fn coerce_bytes(&self, path: &Path, node: &Node) -> Option<Vec<u8>> {
        None
    }
    fn coerce_timestamp(&self, path: &Path, node: &Node) -> Option<Timestamp> {
        None
    }

    /// Remaps the null test for optional targets: when `true`, a `Null`
    /// node decodes an `Option<T>` as a present default instead of `None`.
    fn null_is_value(&self, path: &Path) -> bool {
        false
    }
}

#[derive(Clone, Default)]
pub enum CoerceStrategy {
    #[default]
    UseDefaults,
    UseDelegate(Arc<dyn CoerceDelegate>),
}

impl fmt::Debug for CoerceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoerceStrategy::UseDefaults => f.write_str("UseDefaults"),
            CoerceStrategy::UseDelegate(_) => f.write_str("UseDelegate(..)"),
        }
    }
}

/// Whether a numeric date representation is carried as a number node or its
/// decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberForm {
    Number,
    Text,
}

/// Custom timestamp representation.
pub trait DateCodec: Send + Sync {
    fn encode(&self, value: &Timestamp) -> Node;
    /// `None` means the node did not carry a timestamp in this
    /// representation; the binder substitutes the epoch default.
    fn decode(&self, path: &Path, node: &Node) -> Option<Timestamp>;
}

#[derive(Clone)]
pub enum DateStrategy {
    SecondsSinceEpoch(NumberForm),
    MillisecondsSinceEpoch(NumberForm),
    /// RFC 2822, e.g. `Sat, 23 Aug 2025 10:00:00 +0000`.
    UtcString,
    /// RFC 3339, e.g. `2025-08-23T10:00:00Z`.
    Iso8601String,
    Custom(Arc<dyn DateCodec>),
}

impl Default for DateStrategy {
    fn default() -> Self {
        DateStrategy::SecondsSinceEpoch(NumberForm::Number)
    }
}

impl fmt::Debug for DateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateStrategy::SecondsSinceEpoch(form) => write!(f, "SecondsSinceEpoch({form:?})"),
            DateStrategy::MillisecondsSinceEpoch(form) => {
                write!(f, "MillisecondsSinceEpoch({form:?})")
            }
            DateStrategy::UtcString => f.write_str("UtcString"),
            DateStrategy::Iso8601String => f.write_str("Iso8601String"),
            DateStrategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Custom binary blob representation.
pub trait BinaryCodec: Send + Sync {
    fn encode(&self, bytes: &[u8]) -> Node;
    fn decode(&self, path: &Path, node: &Node) -> Option<Vec<u8>>;
}

#[derive(Clone, Default)]
pub enum BinaryStrategy {
    #[default]
    Base64,
    /// An array of byte-range integers.
    RawBytes,
    /// Lowercase hex; decode accepts mixed case and an optional `0x` prefix.
    HexString,
    Custom(Arc<dyn BinaryCodec>),
}

impl fmt::Debug for BinaryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryStrategy::Base64 => f.write_str("Base64"),
            BinaryStrategy::RawBytes => f.write_str("RawBytes"),
            BinaryStrategy::HexString => f.write_str("HexString"),
            BinaryStrategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Token strings standing in for non-finite floats.
///
/// Drives both the encode-side substitution and the decode-side text
/// recognition (case-insensitive, optional `+`/`-` prefix on the positive
/// and nan tokens).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonFiniteTokens {
    pub pos_inf: String,
    pub neg_inf: String,
    pub nan: String,
}

impl Default for NonFiniteTokens {
    fn default() -> Self {
        Self {
            pos_inf: "infinity".to_owned(),
            neg_inf: "-infinity".to_owned(),
            nan: "nan".to_owned(),
        }
    }
}

/// What the encode binder does with NaN and ±infinity.
#[derive(Debug, Clone, PartialEq)]
pub enum NonFinitePolicy {
    /// Hard error ([`crate::BindError::NonFiniteFloat`]).
    Throw,
    /// Replace with the matching token string.
    SubstituteTokens(NonFiniteTokens),
    /// Replace with a fixed literal node.
    SubstituteLiteral(Node),
}

impl Default for NonFinitePolicy {
    fn default() -> Self {
        NonFinitePolicy::SubstituteTokens(NonFiniteTokens::default())
    }
}

/// The full registry. Configure before a call; read-only during traversal.
#[derive(Debug, Clone, Default)]
pub struct Strategies {
    pub key: KeyStrategy,
    pub coerce: CoerceStrategy,
    pub date: DateStrategy,
    pub binary: BinaryStrategy,
    pub non_finite: NonFinitePolicy,
    /// Optional RFC 6901-style pointer re-rooting the tree before decode.
    pub start_path: Option<String>,
}

impl Strategies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: KeyStrategy) -> Self {
        self.key = key;
        self
    }

    pub fn with_coerce(mut self, coerce: CoerceStrategy) -> Self {
        self.coerce = coerce;
        self
    }

    pub fn with_date(mut self, date: DateStrategy) -> Self {
        self.date = date;
        self
    }

    pub fn with_binary(mut self, binary: BinaryStrategy) -> Self {
        self.binary = binary;
        self
    }

    pub fn with_non_finite(mut self, policy: NonFinitePolicy) -> Self {
        self.non_finite = policy;
        self
    }

    pub fn with_start_path(mut self, pointer: impl Into<String>) -> Self {
        self.start_path = Some(pointer.into());
        self
    }

    /// The token set driving decode-side non-finite text recognition.
    pub fn non_finite_tokens(&self) -> NonFiniteTokens {
        match &self.non_finite {
            NonFinitePolicy::SubstituteTokens(tokens) => tokens.clone(),
            _ => NonFiniteTokens::default(),
        }
    }

    pub(crate) fn delegate(&self) -> Option<&Arc<dyn CoerceDelegate>> {
        match &self.coerce {
            CoerceStrategy::UseDefaults => None,
            CoerceStrategy::UseDelegate(delegate) => Some(delegate),
        }
    }
}
