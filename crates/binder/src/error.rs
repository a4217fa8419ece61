//! Binder error taxonomy.
//!
//! Only four conditions are fatal; everything else substitutes a default at
//! the local coercion site and continues.

use json_bind_node::NodeKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BindError {
    /// The parser collaborator rejected the input bytes/text.
    #[error("malformed source: {0}")]
    MalformedSource(#[from] serde_json::Error),

    /// Expected container kind does not match the actual node variant.
    /// There is no defined default for e.g. treating a string as an array.
    #[error("expected {expected} at `{path}`, found {found}")]
    ShapeMismatch {
        expected: NodeKind,
        found: NodeKind,
        path: String,
    },

    /// The reserved `Unknown` sentinel reached a coercion site. This is a
    /// caller bug, not bad input.
    #[error("unknown sentinel reached a coercion site at `{path}`")]
    UnknownSentinel { path: String },

    /// A non-finite float was encoded under [`crate::NonFinitePolicy::Throw`].
    #[error("non-finite float rejected at `{path}`")]
    NonFiniteFloat { path: String },
}

impl BindError {
    /// The diagnostic path at the point of failure, where one applies.
    pub fn path(&self) -> Option<&str> {
        match self {
            BindError::MalformedSource(_) => None,
            BindError::ShapeMismatch { path, .. }
            | BindError::UnknownSentinel { path }
            | BindError::NonFiniteFloat { path } => Some(path),
        }
    }
}
