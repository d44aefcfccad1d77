//! Splitting oversized text into channel-sized segments, and putting the
//! pieces back together.
//!
//! Splitting is capacity-aware: it uses the same character costs as
//! [`crate::charset`], so a two-septet extension character (or a UTF-16
//! surrogate pair in the wide encoding) never straddles a segment boundary.
//! Concatenating the returned segments in order reconstructs the input
//! exactly.

use crate::charset::{self, Encoding};
use crate::error::Result;
use crate::limits::{
    SEPTETS_PER_SEGMENT, SINGLE_SEGMENT_SEPTETS, SINGLE_SEGMENT_WIDE_UNITS, WIDE_UNITS_PER_SEGMENT,
};

/// Split `text` into ordered segments, each within per-segment capacity.
///
/// Text that fits a single unsegmented message yields exactly one segment,
/// letting callers take a single-shot send path. Longer text is cut at the
/// multi-segment payload capacity of the encoding its content forces.
///
/// # Errors
///
/// Returns [`crate::ProtocolError::MessageTooLong`] when `text` exceeds the
/// whole-message capacity; capacity validation is expected to have run
/// before splitting, so this is a defensive check.
pub fn split(text: &str) -> Result<Vec<String>> {
    charset::check(text)?;

    match charset::encoding_for(text) {
        Encoding::Standard => {
            let units = charset::septet_len(text).unwrap_or(0);
            if units <= SINGLE_SEGMENT_SEPTETS {
                return Ok(vec![text.to_string()]);
            }
            Ok(cut(text, SEPTETS_PER_SEGMENT, |c| {
                charset::septet_cost(c).unwrap_or(1)
            }))
        }
        Encoding::Wide => {
            if charset::wide_len(text) <= SINGLE_SEGMENT_WIDE_UNITS {
                return Ok(vec![text.to_string()]);
            }
            Ok(cut(text, WIDE_UNITS_PER_SEGMENT, |c| c.len_utf16()))
        }
    }
}

/// Greedy cut at character granularity: a character whose cost would
/// overflow the current segment starts the next one.
fn cut(text: &str, budget: usize, cost_of: impl Fn(char) -> usize) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut used = 0usize;

    for c in text.chars() {
        let cost = cost_of(c);
        if used + cost > budget && !current.is_empty() {
            segments.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push(c);
        used += cost;
    }
    segments.push(current);
    segments
}

/// Reconstruct the logical message from its segments in the order
/// established at split time.
///
/// Callers must pass segments in segment order, not arrival order.
pub fn rebuild<'a, I>(segments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    segments.into_iter().collect()
}
