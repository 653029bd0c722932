//! Decimal renderer
//!
//! Light i blinks `digit[i]` times. Lights run strictly one after another:
//! light i+1 starts only once light i has finished all of its blinks, and a
//! zero digit advances immediately.

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

use super::blink::{Blinker, Waveform};
use super::digits::DigitSequence;
use crate::lights::LightId;
use crate::traits::LightDriver;

/// Blink-count renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecimalRenderer {
    waveform: Waveform,
}

impl DecimalRenderer {
    /// Create a renderer blinking at `speed`
    pub const fn new(speed: Duration) -> Self {
        Self {
            waveform: Waveform::from_speed(speed),
        }
    }

    /// Total time to render a sequence
    pub fn duration<const N: usize>(&self, digits: &DigitSequence<N>) -> Duration {
        Duration::from_millis(u64::from(digits.sum()) * u64::from(self.waveform.period_ms()))
    }

    /// Render a digit sequence
    pub async fn render<L, D, const N: usize>(
        &self,
        blinker: &mut Blinker<'_, L, D, N>,
        digits: &DigitSequence<N>,
    ) where
        L: LightDriver,
        D: DelayNs + Clone,
    {
        for (index, digit) in digits.iter().enumerate() {
            trace!("light {}: {} blinks", index, digit);
            blinker
                .repeat(LightId::Value(index), self.waveform, digit)
                .await;
        }
    }
}
