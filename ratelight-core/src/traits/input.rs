//! Trigger sources: buttons and the periodic poll timer

/// Failure of the periodic trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerError {
    /// The underlying timer stopped delivering ticks
    Stopped,
}

impl core::fmt::Display for TimerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TimerError::Stopped => f.write_str("poll timer stopped"),
        }
    }
}

/// Edge-triggered input (a push button)
///
/// Implementations complete once per press, on the rising edge, after
/// whatever debouncing the hardware needs.
#[allow(async_fn_in_trait)]
pub trait InputSource {
    /// Wait for the next press
    async fn wait_for_press(&mut self);
}

/// Periodic poll timer
///
/// `next` must be cancellation-safe: dropping a pending call must not move
/// the schedule, because the orchestrator races it against the buttons.
#[allow(async_fn_in_trait)]
pub trait PollTimer {
    /// Wait for the next periodic tick
    async fn next(&mut self) -> Result<(), TimerError>;
}
