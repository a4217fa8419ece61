//! json-bind — a lenient binder between JSON-shaped value trees and typed
//! models.
//!
//! Decoding walks a [`Node`] tree guided by per-field metadata and produces
//! typed values; shape mismatches that have a sensible default never fail
//! the call, they substitute the target type's default. Encoding mirrors
//! the walk, preserving field declaration order. Key naming, scalar
//! coercion, date, binary, and non-finite float representations are all
//! governed by the [`Strategies`] registry.
//!
//! ```
//! use json_bind::{model, Strategies};
//!
//! model! {
//!     #[derive(Debug, PartialEq)]
//!     pub struct User {
//!         pub id: u64,
//!         pub name: String,
//!     }
//! }
//!
//! let strategies = Strategies::new();
//! let user: User = json_bind::from_str(
//!     r#"{"id": 7, "name": "ada", "extra": true}"#,
//!     &strategies,
//! ).unwrap();
//! assert_eq!(user, User { id: 7, name: "ada".to_owned() });
//! ```

mod blob;
mod coerce;
mod decode;
mod driver;
mod encode;
mod error;
mod meta;
mod path;
mod pointer;
mod strategy;
mod timestamp;

pub use blob::Bytes;
pub use decode::{DecodeBinder, FromNode, KeyedCx};
pub use driver::{
    from_node, from_slice, from_str, from_value, to_node, to_string, to_value, to_vec,
    WriteOptions,
};
pub use encode::{EncodeBinder, KeyedEnc, ToNode};
pub use error::BindError;
pub use json_bind_node::{Node, NodeKind};
pub use meta::{FieldMeta, Model};
pub use path::{Path, PathSegment};
pub use pointer::{escape_component, parse_pointer, resolve, unescape_component};
pub use strategy::{
    BinaryCodec, BinaryStrategy, CaseForm, CoerceDelegate, CoerceStrategy, DateCodec,
    DateStrategy, KeyStrategy, NonFinitePolicy, NonFiniteTokens, NumberForm, Strategies,
};
pub use timestamp::Timestamp;
