//! Rate rendering
//!
//! Converts a rate into a fixed-width digit sequence and drives the lights
//! with it, either as decimal blink counts or as 4-bit binary patterns.
//! Every renderer is built from the same blink waveform.

pub mod binary;
pub mod blink;
pub mod decimal;
pub mod digits;
pub mod pattern;

pub use binary::BinaryRenderer;
pub use blink::{Blinker, Waveform};
pub use decimal::DecimalRenderer;
pub use digits::{DigitError, DigitSequence};
pub use pattern::{pattern_for, BINARY_PATTERNS, PATTERN_BITS};
