//! Poll timer on top of the embassy time driver

use embassy_time::{Duration, Ticker};
use ratelight_core::config::poll_interval;
use ratelight_core::traits::{PollTimer, TimerError};

/// Periodic poll timer
///
/// Ticks are deadline based: a tick that falls due while the caller is busy
/// is delivered on the next call, and the schedule does not drift with
/// render time.
pub struct TickerTimer {
    ticker: Ticker,
}

impl TickerTimer {
    /// Create a timer ticking every `period`
    pub fn new(period: Duration) -> Self {
        Self {
            ticker: Ticker::every(period),
        }
    }

    /// Create a timer at the default poll interval
    pub fn poll_interval() -> Self {
        Self::new(poll_interval())
    }

    /// Restart the schedule from now
    pub fn reset(&mut self) {
        self.ticker.reset();
    }
}

impl PollTimer for TickerTimer {
    async fn next(&mut self) -> Result<(), TimerError> {
        self.ticker.next().await;
        Ok(())
    }
}
