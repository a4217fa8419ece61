//! Timestamp leaf type and its strategy-driven representations.
//!
//! String representations are exact textual inverses of what the matching
//! decode strategy accepts (RFC 2822 for `UtcString`, RFC 3339 for
//! `Iso8601String`, decimal text for the numeric forms).

use json_bind_node::Node;
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::OffsetDateTime;

use crate::path::Path;
use crate::strategy::DateStrategy;

/// A point in time. Decoding failures substitute the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(pub OffsetDateTime);

impl Timestamp {
    pub const UNIX_EPOCH: Timestamp = Timestamp(OffsetDateTime::UNIX_EPOCH);

    pub fn from_unix_seconds(seconds: f64) -> Option<Self> {
        if !seconds.is_finite() {
            return None;
        }
        OffsetDateTime::from_unix_timestamp_nanos((seconds * 1e9) as i128)
            .ok()
            .map(Self)
    }

    pub fn from_unix_millis(millis: f64) -> Option<Self> {
        if !millis.is_finite() {
            return None;
        }
        OffsetDateTime::from_unix_timestamp_nanos((millis * 1e6) as i128)
            .ok()
            .map(Self)
    }

    pub fn unix_seconds(&self) -> f64 {
        self.0.unix_timestamp_nanos() as f64 / 1e9
    }

    pub fn unix_millis(&self) -> i64 {
        (self.0.unix_timestamp_nanos() / 1_000_000) as i64
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::UNIX_EPOCH
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(v: OffsetDateTime) -> Self {
        Self(v)
    }
}

impl From<Timestamp> for OffsetDateTime {
    fn from(v: Timestamp) -> Self {
        v.0
    }
}

pub(crate) fn encode_timestamp(strategy: &DateStrategy, value: &Timestamp) -> Node {
    use crate::strategy::NumberForm::{Number, Text};
    match strategy {
        DateStrategy::SecondsSinceEpoch(Number) => Node::Double(value.unix_seconds()),
        DateStrategy::SecondsSinceEpoch(Text) => Node::String(value.unix_seconds().to_string()),
        DateStrategy::MillisecondsSinceEpoch(Number) => Node::Integer(value.unix_millis()),
        DateStrategy::MillisecondsSinceEpoch(Text) => Node::String(value.unix_millis().to_string()),
        // Formatting only fails outside the representable year range; the
        // lenient posture maps that to null rather than failing the call.
        DateStrategy::UtcString => value
            .0
            .format(&Rfc2822)
            .map(Node::String)
            .unwrap_or(Node::Null),
        DateStrategy::Iso8601String => value
            .0
            .format(&Rfc3339)
            .map(Node::String)
            .unwrap_or(Node::Null),
        DateStrategy::Custom(codec) => codec.encode(value),
    }
}

fn numeric(node: &Node) -> Option<f64> {
    match node {
        Node::Integer(i) => Some(*i as f64),
        Node::Double(d) if d.is_finite() => Some(*d),
        Node::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// `None` means the node carried no recognizable timestamp; the caller
/// substitutes the epoch. The active strategy's representation is tried
/// first, then the other built-in shapes as a lenient fallback.
pub(crate) fn decode_timestamp(
    strategy: &DateStrategy,
    path: &Path,
    node: &Node,
) -> Option<Timestamp> {
    let primary = match strategy {
        DateStrategy::SecondsSinceEpoch(_) => numeric(node).and_then(Timestamp::from_unix_seconds),
        DateStrategy::MillisecondsSinceEpoch(_) => {
            numeric(node).and_then(Timestamp::from_unix_millis)
        }
        DateStrategy::UtcString => parse_text(node, &Rfc2822),
        DateStrategy::Iso8601String => parse_text(node, &Rfc3339),
        DateStrategy::Custom(codec) => return codec.decode(path, node),
    };
    primary.or_else(|| fallback(node))
}

fn parse_text<F: time::parsing::Parsable + ?Sized>(node: &Node, format: &F) -> Option<Timestamp> {
    match node {
        Node::String(s) => OffsetDateTime::parse(s.trim(), format).ok().map(Timestamp),
        _ => None,
    }
}

fn fallback(node: &Node) -> Option<Timestamp> {
    parse_text(node, &Rfc3339)
        .or_else(|| parse_text(node, &Rfc2822))
        .or_else(|| numeric(node).and_then(Timestamp::from_unix_seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::NumberForm;
    use time::macros::datetime;

    fn sample() -> Timestamp {
        Timestamp(datetime!(2025-08-23 10:00:00 UTC))
    }

    #[test]
    fn seconds_number_roundtrip() {
        let strategy = DateStrategy::SecondsSinceEpoch(NumberForm::Number);
        let node = encode_timestamp(&strategy, &sample());
        assert_eq!(node, Node::Double(1755943200.0));
        assert_eq!(
            decode_timestamp(&strategy, &Path::new(), &node),
            Some(sample())
        );
    }

    #[test]
    fn seconds_text_is_the_exact_inverse() {
        let strategy = DateStrategy::SecondsSinceEpoch(NumberForm::Text);
        let node = encode_timestamp(&strategy, &sample());
        assert_eq!(node, Node::String("1755943200".to_owned()));
        assert_eq!(
            decode_timestamp(&strategy, &Path::new(), &node),
            Some(sample())
        );
    }

    #[test]
    fn millis_roundtrip() {
        let strategy = DateStrategy::MillisecondsSinceEpoch(NumberForm::Number);
        let node = encode_timestamp(&strategy, &sample());
        assert_eq!(node, Node::Integer(1755943200000));
        assert_eq!(
            decode_timestamp(&strategy, &Path::new(), &node),
            Some(sample())
        );
    }

    #[test]
    fn rfc3339_roundtrip() {
        let strategy = DateStrategy::Iso8601String;
        let node = encode_timestamp(&strategy, &sample());
        assert_eq!(node, Node::String("2025-08-23T10:00:00Z".to_owned()));
        assert_eq!(
            decode_timestamp(&strategy, &Path::new(), &node),
            Some(sample())
        );
    }

    #[test]
    fn rfc2822_roundtrip() {
        let strategy = DateStrategy::UtcString;
        let node = encode_timestamp(&strategy, &sample());
        assert_eq!(
            node,
            Node::String("Sat, 23 Aug 2025 10:00:00 +0000".to_owned())
        );
        assert_eq!(
            decode_timestamp(&strategy, &Path::new(), &node),
            Some(sample())
        );
    }

    #[test]
    fn lenient_shape_fallback() {
        // numeric seconds accepted under a string strategy and vice versa
        let iso = DateStrategy::Iso8601String;
        assert_eq!(
            decode_timestamp(&iso, &Path::new(), &Node::Integer(1755943200)),
            Some(sample())
        );
        let secs = DateStrategy::SecondsSinceEpoch(NumberForm::Number);
        assert_eq!(
            decode_timestamp(
                &secs,
                &Path::new(),
                &Node::String("2025-08-23T10:00:00Z".to_owned())
            ),
            Some(sample())
        );
    }

    #[test]
    fn unrecognizable_input_yields_none() {
        let strategy = DateStrategy::SecondsSinceEpoch(NumberForm::Number);
        assert_eq!(
            decode_timestamp(&strategy, &Path::new(), &Node::String("soon".to_owned())),
            None
        );
        assert_eq!(decode_timestamp(&strategy, &Path::new(), &Node::Null), None);
    }
}
