//! Property-based tests for protocol components.
//!
//! These tests verify protocol invariants hold for arbitrary inputs:
//!
//! - Classification accepts/rejects consistently with unit counts
//! - Splitting and reassembly preserve text content
//! - Every segment respects the per-segment capacity
//! - Framing round-trips for all text

use proptest::prelude::*;

use crate::charset::{self, ContentState, Encoding};
use crate::framing::{FramingStrategy, SignaturePrefix, SIGNATURE};
use crate::limits::{
    MAX_STANDARD_UNITS, SEPTETS_PER_SEGMENT, SINGLE_SEGMENT_SEPTETS, WIDE_UNITS_PER_SEGMENT,
};
use crate::segment::{rebuild, split};

/// Unit count of one segment under the encoding the whole message forces.
fn segment_units(segment: &str, encoding: Encoding) -> usize {
    match encoding {
        Encoding::Standard => charset::septet_len(segment).unwrap_or(usize::MAX),
        Encoding::Wide => charset::wide_len(segment),
    }
}

proptest! {
    /// Split/rebuild round-trips arbitrary text.
    #[test]
    fn split_rebuild_roundtrip(text in ".{0,400}") {
        let segments = split(&text).unwrap();
        prop_assert_eq!(rebuild(segments.iter().map(String::as_str)), text);
    }

    /// No multi-segment split produces a segment over the per-segment budget.
    #[test]
    fn segments_respect_capacity(text in ".{0,400}") {
        let encoding = charset::encoding_for(&text);
        let segments = split(&text).unwrap();
        if segments.len() > 1 {
            let budget = match encoding {
                Encoding::Standard => SEPTETS_PER_SEGMENT,
                Encoding::Wide => WIDE_UNITS_PER_SEGMENT,
            };
            for segment in &segments {
                prop_assert!(segment_units(segment, encoding) <= budget);
            }
        }
    }

    /// ASCII text within the single-segment budget is never split.
    #[test]
    fn short_ascii_single_shot(text in "[ -~]{0,160}") {
        let segments = split(&text).unwrap();
        prop_assert_eq!(segments.len(), 1);
    }

    /// ASCII classification matches a plain length comparison.
    #[test]
    fn ascii_classification_matches_length(len in 0usize..500) {
        let text = "a".repeat(len);
        prop_assert_eq!(charset::classify(&text), ContentState::Valid);
        prop_assert_eq!(charset::septet_len(&text), Some(len));
    }

    /// Greedy cutting never wastes more than one unit per standard segment:
    /// each non-final segment holds at least budget - 1 units.
    #[test]
    fn standard_segments_are_dense(text in "[a-z{}\\[\\]€|~^]{161,500}") {
        let segments = split(&text).unwrap();
        for segment in &segments[..segments.len() - 1] {
            prop_assert!(
                segment_units(segment, Encoding::Standard) >= SEPTETS_PER_SEGMENT - 1
            );
        }
    }

    /// Framing round-trips arbitrary text.
    #[test]
    fn framing_roundtrip(peer in "\\+[0-9]{3,15}", text in ".{0,300}") {
        let strategy = SignaturePrefix;
        let wire = strategy.encode(&peer, &text);
        prop_assert_eq!(strategy.decode(&peer, &wire), Some(text));
    }

    /// Wire text that does not start with the signature is rejected.
    #[test]
    fn unframed_traffic_rejected(text in "[^\u{2}].{0,100}|") {
        prop_assert_eq!(SignaturePrefix.decode("+15555215554", &text), None);
    }
}

#[test]
fn classification_boundary_is_exact() {
    assert_eq!(
        charset::classify(&"a".repeat(MAX_STANDARD_UNITS)),
        ContentState::Valid
    );
    assert_eq!(
        charset::classify(&"a".repeat(MAX_STANDARD_UNITS + 1)),
        ContentState::TooLong
    );
}

#[test]
fn framed_short_message_stays_single_segment() {
    // A framed single-shot payload must still fit one segment.
    let text = "a".repeat(SINGLE_SEGMENT_SEPTETS - 1);
    let wire = SignaturePrefix.encode("+15555215554", &text);
    assert_eq!(split(&wire).unwrap().len(), 1);
    assert_eq!(wire.chars().next(), Some(SIGNATURE));
}
