//! Channel capacity limits and constants.
//!
//! All capacity limits are defined here for consistent enforcement.

// === Segments ===

/// Maximum number of segments one logical message may be split into.
pub const MAX_SEGMENTS: usize = 255;

/// Septets available per segment of a multi-segment message (7-bit encoding).
///
/// Concatenation headers consume part of each segment, leaving 153 of the
/// 160 septets for payload.
pub const SEPTETS_PER_SEGMENT: usize = 153;

/// 16-bit units available per segment of a multi-segment message (wide encoding).
pub const WIDE_UNITS_PER_SEGMENT: usize = 67;

/// Septets available in a single unsegmented message.
pub const SINGLE_SEGMENT_SEPTETS: usize = 160;

/// 16-bit units available in a single unsegmented message.
pub const SINGLE_SEGMENT_WIDE_UNITS: usize = 70;

// === Whole-message capacity ===

/// Bits per unit of the standard 7-bit encoding.
pub const STANDARD_UNIT_BITS: usize = 7;

/// Bits per unit of the wide fixed-width encoding.
pub const WIDE_UNIT_BITS: usize = 16;

/// Maximum 7-bit units across all segments of one message.
pub const MAX_STANDARD_UNITS: usize = SEPTETS_PER_SEGMENT * MAX_SEGMENTS;

/// Maximum 16-bit units across all segments of one message.
///
/// Derived from the standard capacity: the channel carries the same number
/// of bits either way, so the wide limit is the standard limit scaled by
/// the unit-width ratio.
pub const MAX_WIDE_UNITS: usize = MAX_STANDARD_UNITS * STANDARD_UNIT_BITS / WIDE_UNIT_BITS;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_capacity_is_the_documented_boundary() {
        assert_eq!(MAX_STANDARD_UNITS, 39_015);
    }

    #[test]
    fn wide_capacity_scales_by_unit_width() {
        assert_eq!(MAX_WIDE_UNITS, 17_069);
    }

    #[test]
    fn wide_capacity_fits_in_max_segments() {
        // Every message that passes the wide capacity check must be
        // splittable into at most MAX_SEGMENTS segments.
        assert!(MAX_WIDE_UNITS.div_ceil(WIDE_UNITS_PER_SEGMENT) <= MAX_SEGMENTS);
    }
}
