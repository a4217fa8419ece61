//! Small self-contained helpers shared by the json-bind crates: word
//! tokenization, case conversion, and hex encoding/decoding.

mod case;
mod hex;
mod words;

pub use case::{to_camel, to_pascal, to_snake, CaseForm};
pub use hex::{from_hex, to_hex};
pub use words::split_words;
