//! Debounced push button
//!
//! Waits for a rising edge, lets the contact settle and then confirms the
//! pin is still high. Bounces and glitches shorter than the debounce time
//! are ignored.

use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;
use ratelight_core::config::DEBOUNCE_MS;
use ratelight_core::traits::InputSource;

/// Active-high push button with software debounce
pub struct DebouncedButton<P, D> {
    pin: P,
    delay: D,
    debounce_ms: u32,
}

impl<P, D> DebouncedButton<P, D>
where
    P: Wait + InputPin,
    D: DelayNs,
{
    /// Create a button with the default debounce time
    pub fn new(pin: P, delay: D) -> Self {
        Self::with_debounce(pin, delay, DEBOUNCE_MS)
    }

    /// Create a button with a custom debounce time in milliseconds
    pub fn with_debounce(pin: P, delay: D, debounce_ms: u32) -> Self {
        Self {
            pin,
            delay,
            debounce_ms,
        }
    }

    /// Give the pin and delay back
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }
}

impl<P, D> InputSource for DebouncedButton<P, D>
where
    P: Wait + InputPin,
    D: DelayNs,
{
    async fn wait_for_press(&mut self) {
        loop {
            if self.pin.wait_for_rising_edge().await.is_err() {
                #[cfg(feature = "defmt")]
                defmt::warn!("button edge wait failed, retrying");
                self.delay.delay_ms(self.debounce_ms).await;
                continue;
            }

            self.delay.delay_ms(self.debounce_ms).await;

            match self.pin.is_high() {
                Ok(true) => return,
                Ok(false) => {
                    #[cfg(feature = "defmt")]
                    defmt::trace!("button bounce ignored");
                }
                Err(_) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("button level read failed");
                }
            }
        }
    }
}
