//! Character-set-aware capacity classification.
//!
//! The channel carries text in one of two encodings. The standard 7-bit
//! alphabet covers a fixed repertoire where most characters cost one septet
//! and a small extension repertoire costs two (an escape septet plus the
//! character). Any character outside both repertoires forces the *entire*
//! message into the wide fixed-width encoding, which halves-and-then-some
//! the usable capacity (see [`crate::limits`]).
//!
//! Classification never fails; it returns a [`ContentState`] that callers
//! turn into a hard error when they need one.

use crate::error::{ProtocolError, Result};
use crate::limits::{MAX_STANDARD_UNITS, MAX_WIDE_UNITS};

/// The encoding a text payload forces on the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Standard 7-bit alphabet; one or two septets per character.
    Standard,
    /// Wide fixed-width encoding; one 16-bit unit per UTF-16 code unit.
    Wide,
}

/// Result of a capacity check on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentState {
    /// The text fits the channel in the encoding its content forces.
    Valid,
    /// The text exceeds the channel capacity.
    TooLong,
}

/// Whether `c` belongs to the standard repertoire (costs one septet).
///
/// The framing signature (STX, `\u{0002}`) is part of the repertoire:
/// stamping a frame must not flip an otherwise-standard message into the
/// wide encoding.
fn is_standard(c: char) -> bool {
    matches!(c,
        'A'..='Z' | 'a'..='z' | '0'..='9' | '\u{0002}'
        | ' ' | '!' | '"' | '#' | '%' | '&' | '\'' | '(' | ')' | '*' | '+'
        | ',' | '-' | '.' | '/' | ':' | ';' | '<' | '=' | '>' | '?' | '@' | '_'
        | '\n' | '\r'
        | '$' | '\u{00A3}' | '\u{00A5}' | '\u{00A4}' | '\u{00A7}' | '\u{00A1}' | '\u{00BF}'
        | '\u{00E8}' | '\u{00E9}' | '\u{00F9}' | '\u{00EC}' | '\u{00F2}' | '\u{00E0}'
        | '\u{00C7}' | '\u{00D8}' | '\u{00F8}' | '\u{00C5}' | '\u{00E5}'
        | '\u{00C6}' | '\u{00E6}' | '\u{00DF}' | '\u{00C9}'
        | '\u{00C4}' | '\u{00D6}' | '\u{00D1}' | '\u{00DC}'
        | '\u{00E4}' | '\u{00F6}' | '\u{00F1}' | '\u{00FC}'
        | '\u{0394}' | '\u{03A6}' | '\u{0393}' | '\u{039B}' | '\u{03A9}'
        | '\u{03A0}' | '\u{03A8}' | '\u{03A3}' | '\u{0398}' | '\u{039E}')
}

/// Whether `c` belongs to the extension repertoire (escape + char, two septets).
fn is_extended(c: char) -> bool {
    matches!(
        c,
        '\u{000C}' | '^' | '{' | '}' | '\\' | '[' | ']' | '~' | '|' | '\u{20AC}'
    )
}

/// Septet cost of a single character, or `None` when the character is not
/// representable in the standard encoding.
pub fn septet_cost(c: char) -> Option<usize> {
    if is_standard(c) {
        Some(1)
    } else if is_extended(c) {
        Some(2)
    } else {
        None
    }
}

/// Total septet length of `text`, or `None` when any character forces the
/// wide encoding.
pub fn septet_len(text: &str) -> Option<usize> {
    let mut total = 0usize;
    for c in text.chars() {
        total += septet_cost(c)?;
    }
    Some(total)
}

/// Number of 16-bit units `text` occupies in the wide encoding.
pub fn wide_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// The encoding `text` forces on the channel.
pub fn encoding_for(text: &str) -> Encoding {
    if text.chars().all(|c| septet_cost(c).is_some()) {
        Encoding::Standard
    } else {
        Encoding::Wide
    }
}

/// Check `text` against the whole-message capacity limit of the encoding
/// its content forces.
///
/// # Errors
///
/// Returns [`ProtocolError::MessageTooLong`] with the limit and the actual
/// unit count when the text does not fit.
pub fn check(text: &str) -> Result<()> {
    match septet_len(text) {
        Some(units) => {
            if units > MAX_STANDARD_UNITS {
                return Err(ProtocolError::MessageTooLong {
                    max: MAX_STANDARD_UNITS,
                    actual: units,
                });
            }
        }
        None => {
            let units = wide_len(text);
            if units > MAX_WIDE_UNITS {
                return Err(ProtocolError::MessageTooLong {
                    max: MAX_WIDE_UNITS,
                    actual: units,
                });
            }
        }
    }
    Ok(())
}

/// Classify `text` against the channel capacity.
///
/// Empty text is always valid; a text exactly at the limit is valid.
pub fn classify(text: &str) -> ContentState {
    match check(text) {
        Ok(()) => ContentState::Valid,
        Err(_) => ContentState::TooLong,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_valid() {
        assert_eq!(classify(""), ContentState::Valid);
    }

    #[test]
    fn ascii_counts_one_septet_each() {
        assert_eq!(septet_len("hello, world"), Some(12));
    }

    #[test]
    fn extension_characters_count_two_septets() {
        assert_eq!(septet_len("{}"), Some(4));
        assert_eq!(septet_len("a€b"), Some(4));
    }

    #[test]
    fn standard_repertoire_beyond_ascii() {
        assert_eq!(septet_len("è£¥ΩΣ"), Some(5));
        assert_eq!(encoding_for("è£¥ΩΣ"), Encoding::Standard);
    }

    #[test]
    fn non_repertoire_character_forces_wide_encoding() {
        assert_eq!(septet_len("héllo …"), None);
        assert_eq!(encoding_for("héllo …"), Encoding::Wide);
    }

    #[test]
    fn wide_length_counts_utf16_units() {
        // One astral character is a surrogate pair: two units.
        assert_eq!(wide_len("\u{1F600}"), 2);
        assert_eq!(wide_len("…ab"), 3);
    }

    #[test]
    fn standard_boundary_exact_and_one_over() {
        let at_limit = "a".repeat(MAX_STANDARD_UNITS);
        assert_eq!(classify(&at_limit), ContentState::Valid);

        let over = "a".repeat(MAX_STANDARD_UNITS + 1);
        assert_eq!(classify(&over), ContentState::TooLong);
    }

    #[test]
    fn extension_cost_can_push_over_the_boundary() {
        // MAX_STANDARD_UNITS - 1 septets of 'a' plus one 2-septet char.
        let mut text = "a".repeat(MAX_STANDARD_UNITS - 1);
        text.push('€');
        assert_eq!(classify(&text), ContentState::TooLong);
    }

    #[test]
    fn wide_boundary_exact_and_one_over() {
        // '…' is outside both repertoires, forcing the wide encoding.
        let at_limit = "…".repeat(MAX_WIDE_UNITS);
        assert_eq!(classify(&at_limit), ContentState::Valid);

        let over = "…".repeat(MAX_WIDE_UNITS + 1);
        assert_eq!(classify(&over), ContentState::TooLong);
    }

    #[test]
    fn one_wide_character_reclassifies_the_whole_message() {
        // Valid as standard text, too long once a single character forces
        // the smaller wide limit.
        let mut text = "a".repeat(MAX_WIDE_UNITS);
        assert_eq!(classify(&text), ContentState::Valid);
        text.push('…');
        assert_eq!(classify(&text), ContentState::TooLong);
    }

    #[test]
    fn check_reports_limit_and_actual() {
        let over = "a".repeat(MAX_STANDARD_UNITS + 1);
        assert_eq!(
            check(&over),
            Err(ProtocolError::MessageTooLong {
                max: MAX_STANDARD_UNITS,
                actual: MAX_STANDARD_UNITS + 1,
            })
        );
    }
}
