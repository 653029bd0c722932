//! Binary light patterns
//!
//! Digit 0-9 to a 4-light pattern, first element is the most significant bit
//! and maps to value light 0.

/// Lights used by one binary pattern
pub const PATTERN_BITS: usize = 4;

/// Lookup table, index = digit
pub const BINARY_PATTERNS: [[bool; PATTERN_BITS]; 10] = [
    [false, false, false, false],
    [false, false, false, true],
    [false, false, true, false],
    [false, false, true, true],
    [false, true, false, false],
    [false, true, false, true],
    [false, true, true, false],
    [false, true, true, true],
    [true, false, false, false],
    [true, false, false, true],
];

/// Pattern for a digit
///
/// Digits above 9 cannot come out of a [`DigitSequence`](super::DigitSequence);
/// they map to all lights off.
pub fn pattern_for(digit: u8) -> [bool; PATTERN_BITS] {
    BINARY_PATTERNS
        .get(digit as usize)
        .copied()
        .unwrap_or([false; PATTERN_BITS])
}
