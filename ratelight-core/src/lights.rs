//! Light bank
//!
//! N value lights plus one busy/status light, behind a single driver.
//! Blink futures that run concurrently share the bank by reference; the
//! driver lock is only taken for the duration of one write.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::traits::LightDriver;

/// Address of one light
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightId {
    /// Value light by position, 0 = most significant digit
    Value(usize),
    /// Busy/status light
    Status,
}

/// The indicator lights owned by the rendering engine
pub struct LightBank<L, const N: usize> {
    driver: Mutex<NoopRawMutex, RefCell<L>>,
}

impl<L: LightDriver, const N: usize> LightBank<L, N> {
    /// Wrap a light driver
    pub fn new(driver: L) -> Self {
        Self {
            driver: Mutex::new(RefCell::new(driver)),
        }
    }

    /// Switch one light
    ///
    /// Value indices outside the bank are ignored.
    pub fn set(&self, light: LightId, on: bool) {
        if let LightId::Value(index) = light {
            if index >= N {
                warn!("ignoring write to value light {}", index);
                return;
            }
        }
        self.driver.lock(|driver| driver.borrow_mut().set_state(light, on));
    }

    /// Switch the busy/status light
    pub fn set_status(&self, on: bool) {
        self.set(LightId::Status, on);
    }

    /// Switch every value light off
    pub fn clear_values(&self) {
        for index in 0..N {
            self.set(LightId::Value(index), false);
        }
    }

    /// Switch every light off, status included
    pub fn reset(&self) {
        self.set_status(false);
        self.clear_values();
    }

    /// Reset all lights and release the driver
    pub fn shutdown(&self) {
        self.reset();
        self.driver.lock(|driver| driver.borrow_mut().shutdown());
    }

    /// Run a closure with the driver
    pub fn with_driver<R>(&self, f: impl FnOnce(&mut L) -> R) -> R {
        self.driver.lock(|driver| f(&mut driver.borrow_mut()))
    }

    /// Unwrap the driver
    pub fn into_inner(self) -> L {
        self.driver.into_inner().into_inner()
    }
}
