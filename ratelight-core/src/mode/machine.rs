//! Mode definition
//!
//! The cycle order is Default -> Binary -> Fast -> Slow -> Default.

use embassy_time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rendering modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Decimal blink counts at the base speed
    #[default]
    Default,
    /// Decimal blink counts at half the base speed value
    Fast,
    /// Decimal blink counts at twice the base speed value
    Slow,
    /// 4-bit patterns, one digit per base-speed interval
    Binary,
}

/// Which renderer a mode dispatches to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderStyle {
    /// One light per digit, blinked `digit` times, lights in sequence
    Decimal,
    /// One 4-bit pattern per digit, digits paced by a fixed interval
    Binary,
}

impl Mode {
    /// All modes in ordinal order
    pub const ALL: [Mode; 4] = [Mode::Default, Mode::Fast, Mode::Slow, Mode::Binary];

    /// Ordinal of the mode; also the value light used to confirm it
    pub const fn ordinal(self) -> usize {
        match self {
            Mode::Default => 0,
            Mode::Fast => 1,
            Mode::Slow => 2,
            Mode::Binary => 3,
        }
    }

    /// Cyclic successor
    pub const fn next(self) -> Self {
        match self {
            Mode::Default => Mode::Binary,
            Mode::Binary => Mode::Fast,
            Mode::Fast => Mode::Slow,
            Mode::Slow => Mode::Default,
        }
    }

    /// Speed in milliseconds for this mode
    ///
    /// For [`Mode::Binary`] this is the interval between digits.
    pub const fn speed_ms(self, base_ms: u32) -> u32 {
        match self {
            Mode::Default | Mode::Binary => base_ms,
            Mode::Fast => base_ms / 2,
            Mode::Slow => base_ms * 2,
        }
    }

    /// Speed as a duration
    pub const fn speed(self, base_ms: u32) -> Duration {
        Duration::from_millis(self.speed_ms(base_ms) as u64)
    }

    /// Renderer this mode uses
    pub const fn render_style(self) -> RenderStyle {
        match self {
            Mode::Binary => RenderStyle::Binary,
            Mode::Default | Mode::Fast | Mode::Slow => RenderStyle::Decimal,
        }
    }

    /// Short name for logs
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Default => "default",
            Mode::Fast => "fast",
            Mode::Slow => "slow",
            Mode::Binary => "binary",
        }
    }
}
