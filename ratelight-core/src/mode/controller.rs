//! Mode controller
//!
//! Owns the current mode for the lifetime of the process. A mode change is
//! refused while a render cycle holds the guard; when admitted it holds the
//! guard itself for the confirmation flash.

use core::cell::Cell;

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

use super::machine::Mode;
use crate::guard::RenderGuard;
use crate::lights::LightId;
use crate::render::Blinker;
use crate::traits::LightDriver;

/// Mode state holder
#[derive(Debug)]
pub struct ModeController {
    mode: Cell<Mode>,
    base_speed_ms: u32,
}

impl ModeController {
    /// Start in [`Mode::Default`]
    pub const fn new(base_speed_ms: u32) -> Self {
        Self {
            mode: Cell::new(Mode::Default),
            base_speed_ms,
        }
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.mode.get()
    }

    /// Base speed all mode speeds derive from
    pub const fn base_speed_ms(&self) -> u32 {
        self.base_speed_ms
    }

    /// Active speed for the current mode
    pub fn speed(&self) -> Duration {
        self.mode().speed(self.base_speed_ms)
    }

    /// Advance to the next mode without any guard check or flash
    fn advance(&self) -> Mode {
        let next = self.mode().next();
        self.mode.set(next);
        next
    }

    /// Switch to the next mode and confirm it on the lights
    ///
    /// Returns `None` without touching state or lights if a render cycle is
    /// in progress. Otherwise all lights go off, the value light at the new
    /// mode's ordinal is held on for `flash`, and all lights go off again.
    pub async fn cycle<L, D, const N: usize>(
        &self,
        guard: &RenderGuard,
        blinker: &mut Blinker<'_, L, D, N>,
        flash: Duration,
    ) -> Option<Mode>
    where
        L: LightDriver,
        D: DelayNs + Clone,
    {
        let Some(_permit) = guard.try_enter() else {
            debug!("mode change dropped: render in progress");
            return None;
        };

        let mode = self.advance();
        info!("mode changed to {} ({} ms)", mode.as_str(), self.speed().as_millis());

        let bank = blinker.bank();
        bank.reset();
        bank.set(LightId::Value(mode.ordinal()), true);
        blinker.hold(flash.as_millis() as u32).await;
        bank.reset();

        Some(mode)
    }
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new(crate::config::BASE_SPEED_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lights::LightBank;
    use crate::sim::{RecordingLights, SimClock};

    const FLASH: Duration = Duration::from_millis(1000);

    #[test]
    fn test_starts_in_default() {
        let controller = ModeController::new(750);
        assert_eq!(controller.mode(), Mode::Default);
        assert_eq!(controller.speed(), Duration::from_millis(750));
    }

    #[test]
    fn test_cycle_flashes_ordinal_light() {
        let clock = SimClock::new();
        let bank: LightBank<_, 5> = LightBank::new(RecordingLights::new(&clock));
        let guard = RenderGuard::new();
        let controller = ModeController::new(750);

        let mut blinker = Blinker::new(&bank, clock.delay());
        let mode = clock.run(controller.cycle(&guard, &mut blinker, FLASH));

        assert_eq!(mode, Some(Mode::Binary));
        assert_eq!(controller.speed(), Duration::from_millis(750));
        assert!(!guard.is_busy());
        assert_eq!(clock.now_ms(), 1000);

        let log = bank.into_inner();
        // Binary has ordinal 3
        assert_eq!(log.on_events(), [(0, LightId::Value(3))]);
        let last = log.events().last().copied();
        assert_eq!(last, Some((1000, LightId::Value(4), false)));
        assert!(log
            .events()
            .iter()
            .any(|event| *event == (1000, LightId::Value(3), false)));
    }

    #[test]
    fn test_four_cycles_return_to_start() {
        let clock = SimClock::new();
        let bank: LightBank<_, 5> = LightBank::new(RecordingLights::new(&clock));
        let guard = RenderGuard::new();
        let controller = ModeController::new(750);
        let mut blinker = Blinker::new(&bank, clock.delay());

        let mut seen = [Mode::Default; 4];
        for slot in seen.iter_mut() {
            *slot = clock
                .run(controller.cycle(&guard, &mut blinker, FLASH))
                .unwrap();
        }

        assert_eq!(seen, [Mode::Binary, Mode::Fast, Mode::Slow, Mode::Default]);
        assert_eq!(controller.mode(), Mode::Default);
    }

    #[test]
    fn test_speed_follows_mode() {
        let clock = SimClock::new();
        let bank: LightBank<_, 5> = LightBank::new(RecordingLights::new(&clock));
        let guard = RenderGuard::new();
        let controller = ModeController::new(750);
        let mut blinker = Blinker::new(&bank, clock.delay());

        clock.run(controller.cycle(&guard, &mut blinker, FLASH));
        clock.run(controller.cycle(&guard, &mut blinker, FLASH));
        assert_eq!(controller.mode(), Mode::Fast);
        assert_eq!(controller.speed(), Duration::from_millis(375));

        clock.run(controller.cycle(&guard, &mut blinker, FLASH));
        assert_eq!(controller.speed(), Duration::from_millis(1500));
    }

    #[test]
    fn test_refused_while_busy() {
        let clock = SimClock::new();
        let bank: LightBank<_, 5> = LightBank::new(RecordingLights::new(&clock));
        let guard = RenderGuard::new();
        let controller = ModeController::new(750);
        let mut blinker = Blinker::new(&bank, clock.delay());

        let permit = guard.try_enter().unwrap();
        let result = clock.run(controller.cycle(&guard, &mut blinker, FLASH));
        assert_eq!(result, None);
        assert_eq!(controller.mode(), Mode::Default);
        assert_eq!(clock.now_ms(), 0);
        drop(permit);

        assert!(bank.into_inner().events().is_empty());
    }
}
