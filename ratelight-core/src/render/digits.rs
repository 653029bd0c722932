//! Digit extraction
//!
//! Rounds a rate to the nearest integer and lays its decimal digits out
//! most-significant first, left-padded with zeros to exactly N digits.

/// Largest magnitude that still fits a `u64` exactly enough to split
const U64_LIMIT: f64 = 1.0e19;

/// Errors from digit extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitError {
    /// Rounded rate has more digits than there are lights
    Overflow {
        /// Digits in the rounded rate
        digits: usize,
        /// Available lights
        capacity: usize,
    },
    /// Rate is NaN or infinite
    NotFinite,
}

impl core::fmt::Display for DigitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DigitError::Overflow { digits, capacity } => {
                write!(f, "rate has {} digits but only {} lights", digits, capacity)
            }
            DigitError::NotFinite => f.write_str("rate is not a finite number"),
        }
    }
}

/// Exactly N decimal digits, most significant first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitSequence<const N: usize> {
    digits: [u8; N],
}

impl<const N: usize> DigitSequence<N> {
    /// Extract the digits of a rate
    ///
    /// Sign and fraction are discarded after rounding.
    pub fn from_rate(rate: f64) -> Result<Self, DigitError> {
        if !rate.is_finite() {
            return Err(DigitError::NotFinite);
        }

        let magnitude = libm::fabs(libm::round(rate));
        if magnitude >= U64_LIMIT {
            // Beyond u64 precision; the count is all that matters here
            let digits = libm::floor(libm::log10(magnitude)) as usize + 1;
            return Err(DigitError::Overflow {
                digits,
                capacity: N,
            });
        }

        Self::from_integer(magnitude as u64)
    }

    /// Split an integer into N digits
    pub fn from_integer(value: u64) -> Result<Self, DigitError> {
        let digits = digit_count(value);
        if digits > N {
            return Err(DigitError::Overflow {
                digits,
                capacity: N,
            });
        }

        let mut out = [0u8; N];
        let mut rest = value;
        for slot in out.iter_mut().rev() {
            *slot = (rest % 10) as u8;
            rest /= 10;
        }
        Ok(Self { digits: out })
    }

    /// Build from explicit digits
    ///
    /// Returns `None` if any digit is above 9.
    pub fn from_digits(digits: [u8; N]) -> Option<Self> {
        digits
            .iter()
            .all(|d| *d <= 9)
            .then_some(Self { digits })
    }

    /// The digits, most significant first
    pub const fn as_array(&self) -> &[u8; N] {
        &self.digits
    }

    /// Digit at a position
    pub fn get(&self, index: usize) -> Option<u8> {
        self.digits.get(index).copied()
    }

    /// Number of digits (always N)
    pub const fn len(&self) -> usize {
        N
    }

    /// True only for the degenerate zero-light sequence
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Iterate over the digits
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.digits.iter().copied()
    }

    /// Sum of all digits (total blink count in decimal mode)
    pub fn sum(&self) -> u32 {
        self.digits.iter().map(|d| *d as u32).sum()
    }
}

fn digit_count(mut value: u64) -> usize {
    let mut count = 1;
    while value >= 10 {
        value /= 10;
        count += 1;
    }
    count
}
