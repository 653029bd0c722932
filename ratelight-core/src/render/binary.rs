//! Binary renderer
//!
//! Each digit is shown as its 4-bit pattern on value lights 0-3, all set
//! bits blinking together. Digits are released by a fixed interval clock
//! that starts with the render: digit i goes out at `(i + 1) * interval`,
//! whether or not the blinks of digit i-1 have finished. With a waveform
//! longer than the interval, consecutive digits overlap.

use embassy_futures::join::join_array;
use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

use super::blink::{Blinker, Waveform};
use super::digits::DigitSequence;
use super::pattern::{pattern_for, PATTERN_BITS};
use crate::lights::LightId;
use crate::traits::LightDriver;

/// Interval-paced 4-bit pattern renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BinaryRenderer {
    interval_ms: u32,
    waveform: Waveform,
}

impl BinaryRenderer {
    /// Create a renderer using `interval` between digits
    ///
    /// The blink waveform is derived from the same value.
    pub const fn new(interval: Duration) -> Self {
        Self::with_waveform(interval, Waveform::from_speed(interval))
    }

    /// Create a renderer with an independent blink waveform
    pub const fn with_waveform(interval: Duration, waveform: Waveform) -> Self {
        Self {
            interval_ms: interval.as_millis() as u32,
            waveform,
        }
    }

    /// Interval between digits
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms as u64)
    }

    /// Time at which digit `position` starts, relative to the render start
    pub const fn start_of(&self, position: usize) -> Duration {
        Duration::from_millis(self.interval_ms as u64 * (position as u64 + 1))
    }

    /// Render a digit sequence
    ///
    /// Needs at least [`PATTERN_BITS`] value lights.
    pub async fn render<L, D, const N: usize>(
        &self,
        blinker: &Blinker<'_, L, D, N>,
        digits: &DigitSequence<N>,
    ) where
        L: LightDriver,
        D: DelayNs + Clone,
    {
        const { assert!(N >= PATTERN_BITS, "binary mode needs at least four value lights") };

        let waveform = self.waveform;
        let steps: [_; N] = core::array::from_fn(|position| {
            let mut step = blinker.fork();
            let digit = digits.as_array()[position];
            let start_ms = self.start_of(position).as_millis() as u32;
            async move {
                step.hold(start_ms).await;
                trace!("digit {}: {}", position, digit);
                let bits = pattern_for(digit);
                let lights: [Option<LightId>; PATTERN_BITS] =
                    core::array::from_fn(|bit| bits[bit].then_some(LightId::Value(bit)));
                step.blink_together(lights, waveform, 1).await;
            }
        });
        join_array(steps).await;
    }
}
