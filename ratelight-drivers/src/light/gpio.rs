//! GPIO lights
//!
//! One output pin per value light plus one for the busy/status light,
//! driven directly or through a transistor/LED driver.

use embedded_hal::digital::OutputPin;
use ratelight_core::traits::LightDriver;
use ratelight_core::LightId;

/// Bank of GPIO-driven lights
///
/// The pins can be active-high (default) or active-low. Every light starts
/// off.
pub struct GpioLights<P, const N: usize> {
    values: [P; N],
    status: P,
    /// If true, light ON = pin LOW
    inverted: bool,
}

impl<P: OutputPin, const N: usize> GpioLights<P, N> {
    /// Create a new GPIO light bank
    ///
    /// # Arguments
    /// - `values`: Value light pins, most significant digit first
    /// - `status`: Busy/status light pin
    /// - `inverted`: If true, a light is ON when its pin is LOW
    pub fn new(values: [P; N], status: P, inverted: bool) -> Self {
        let mut lights = Self {
            values,
            status,
            inverted,
        };
        lights.all_off();
        lights
    }

    /// Create a light bank with active-high outputs
    pub fn new_active_high(values: [P; N], status: P) -> Self {
        Self::new(values, status, false)
    }

    /// Create a light bank with active-low outputs
    pub fn new_active_low(values: [P; N], status: P) -> Self {
        Self::new(values, status, true)
    }

    /// Give the pins back
    pub fn release(self) -> ([P; N], P) {
        (self.values, self.status)
    }

    fn drive(pin: &mut P, on: bool, inverted: bool) {
        // Fire-and-forget: a failed write leaves the light as it was
        let result = if on != inverted {
            pin.set_high()
        } else {
            pin.set_low()
        };
        if result.is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("light pin write failed");
        }
    }

    fn all_off(&mut self) {
        Self::drive(&mut self.status, false, self.inverted);
        for pin in self.values.iter_mut() {
            Self::drive(pin, false, self.inverted);
        }
    }
}

impl<P: OutputPin, const N: usize> LightDriver for GpioLights<P, N> {
    fn set_state(&mut self, light: LightId, on: bool) {
        let pin = match light {
            LightId::Value(index) => self.values.get_mut(index),
            LightId::Status => Some(&mut self.status),
        };
        if let Some(pin) = pin {
            Self::drive(pin, on, self.inverted);
        }
    }

    fn shutdown(&mut self) {
        self.all_off();
    }
}
