//! Build-time configuration
//!
//! Constants describe the shipped hardware and timing. [`RenderConfig`]
//! carries the subset the session needs at runtime.

use embassy_time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of value lights (one per displayed digit)
pub const VALUE_LIGHTS: usize = 5;

/// Base blink speed in milliseconds
pub const BASE_SPEED_MS: u32 = 750;

/// Periodic poll interval in seconds (10 minutes)
pub const POLL_INTERVAL_S: u64 = 600;

/// Currency pair looked up in the fetched rate table
pub const RATE_PAIR: &str = "USDBTC";

/// Number of blinks in the fetch-error signal
pub const ERROR_BLINKS: u8 = 3;

/// How long the confirmation light stays on after a mode change
pub const MODE_FLASH_MS: u32 = 1000;

/// Button debounce window in milliseconds
pub const DEBOUNCE_MS: u32 = 20;

/// Maximum number of pairs a rate table can hold
pub const MAX_RATE_PAIRS: usize = 32;

/// Maximum length of a pair symbol (e.g. "USDBTC")
pub const MAX_PAIR_LEN: usize = 12;

/// Runtime view of the build-time constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RenderConfig {
    /// Base blink speed (ms); per-mode speeds derive from it
    pub base_speed_ms: u32,
    /// Repetitions of the error signal
    pub error_blinks: u8,
    /// Mode confirmation hold (ms)
    pub mode_flash_ms: u32,
}

impl RenderConfig {
    /// Create a config from the shipped constants
    pub const fn new() -> Self {
        Self {
            base_speed_ms: BASE_SPEED_MS,
            error_blinks: ERROR_BLINKS,
            mode_flash_ms: MODE_FLASH_MS,
        }
    }

    /// Mode confirmation hold as a duration
    pub const fn mode_flash(&self) -> Duration {
        Duration::from_millis(self.mode_flash_ms as u64)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Periodic poll interval as a duration
pub const fn poll_interval() -> Duration {
    Duration::from_secs(POLL_INTERVAL_S)
}
