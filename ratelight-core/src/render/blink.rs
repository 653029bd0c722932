//! Blink waveform
//!
//! One blink: light ON for two thirds of the speed, OFF for the remaining
//! third. Repeats run back to back with no gap. This is the only timing
//! primitive the renderers and the error signal use.

use embassy_futures::join::join_array;
use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

use crate::lights::{LightBank, LightId};
use crate::traits::LightDriver;

/// ON/OFF hold times of one blink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Waveform {
    /// ON hold (ms)
    pub on_ms: u32,
    /// OFF hold (ms)
    pub off_ms: u32,
}

impl Waveform {
    /// Split a speed 2:1 into ON and OFF holds, in whole milliseconds
    pub const fn from_speed_ms(speed_ms: u32) -> Self {
        let third = speed_ms / 3;
        Self {
            on_ms: third * 2,
            off_ms: third,
        }
    }

    /// Waveform for a speed duration
    pub const fn from_speed(speed: Duration) -> Self {
        Self::from_speed_ms(speed.as_millis() as u32)
    }

    /// Length of one full blink
    pub const fn period_ms(&self) -> u32 {
        self.on_ms + self.off_ms
    }

    /// Length of one full blink as a duration
    pub const fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms() as u64)
    }
}

/// Drives blink waveforms on a light bank
///
/// Each blinker owns one delay handle. Concurrent blinks [`fork`](Self::fork)
/// a blinker per light so every one of them can suspend independently.
pub struct Blinker<'a, L, D, const N: usize> {
    bank: &'a LightBank<L, N>,
    delay: D,
}

impl<'a, L: LightDriver, D: DelayNs + Clone, const N: usize> Blinker<'a, L, D, N> {
    /// Create a blinker over a light bank
    pub fn new(bank: &'a LightBank<L, N>, delay: D) -> Self {
        Self { bank, delay }
    }

    /// The light bank this blinker drives
    pub fn bank(&self) -> &'a LightBank<L, N> {
        self.bank
    }

    /// A second blinker on the same bank with its own delay handle
    pub fn fork(&self) -> Self {
        Self {
            bank: self.bank,
            delay: self.delay.clone(),
        }
    }

    /// Suspend without touching any light
    pub async fn hold(&mut self, ms: u32) {
        if ms > 0 {
            self.delay.delay_ms(ms).await;
        }
    }

    /// One blink on one light
    pub async fn blink(&mut self, light: LightId, waveform: Waveform) {
        self.bank.set(light, true);
        self.hold(waveform.on_ms).await;
        self.bank.set(light, false);
        self.hold(waveform.off_ms).await;
    }

    /// `times` blinks back to back; zero returns immediately
    pub async fn repeat(&mut self, light: LightId, waveform: Waveform, times: u8) {
        for _ in 0..times {
            self.blink(light, waveform).await;
        }
    }

    /// Blink several lights at the same time
    ///
    /// `None` entries stay dark. Completes when every light has finished
    /// its repeats.
    pub async fn blink_together<const M: usize>(
        &self,
        lights: [Option<LightId>; M],
        waveform: Waveform,
        times: u8,
    ) {
        let blinks: [_; M] = core::array::from_fn(|index| {
            let light = lights[index];
            let mut blinker = self.fork();
            async move {
                if let Some(light) = light {
                    blinker.repeat(light, waveform, times).await;
                }
            }
        });
        join_array(blinks).await;
    }

    /// Blink every value light together (the fetch-error signal)
    pub async fn blink_all_values(&self, waveform: Waveform, times: u8) {
        let lights: [Option<LightId>; N] = core::array::from_fn(|index| Some(LightId::Value(index)));
        self.blink_together(lights, waveform, times).await;
    }
}
