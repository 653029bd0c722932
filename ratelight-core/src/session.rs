//! Render session
//!
//! Everything that lives for the whole process: the light bank, the render
//! guard, the mode controller and the timing configuration. The orchestrator
//! owns one session and hands it to every component by reference.

use embedded_hal_async::delay::DelayNs;

use crate::config::{RenderConfig, RATE_PAIR};
use crate::guard::RenderGuard;
use crate::lights::LightBank;
use crate::mode::{Mode, ModeController, RenderStyle};
use crate::render::{BinaryRenderer, Blinker, DecimalRenderer, DigitError, DigitSequence, Waveform};
use crate::traits::{FetchError, LightDriver, RateProvider};

/// How a render request ended
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    /// Another cycle held the guard; the request was dropped
    Dropped,
    /// The rate was fetched and rendered
    Rendered {
        /// Rate as fetched, before rounding
        rate: f64,
        /// Mode the rate was rendered in
        mode: Mode,
    },
    /// The fetch succeeded but did not contain the configured pair
    NoRate,
}

/// Errors that end a render cycle early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleError {
    /// The rate source failed; the error signal has been shown
    Fetch(FetchError),
    /// The rate could not be laid out on the lights
    Digits(DigitError),
}

impl From<FetchError> for CycleError {
    fn from(err: FetchError) -> Self {
        CycleError::Fetch(err)
    }
}

impl From<DigitError> for CycleError {
    fn from(err: DigitError) -> Self {
        CycleError::Digits(err)
    }
}

impl core::fmt::Display for CycleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CycleError::Fetch(err) => write!(f, "fetch failed: {}", err),
            CycleError::Digits(err) => write!(f, "cannot display rate: {}", err),
        }
    }
}

/// Process-lifetime render state
pub struct Session<L, D, const N: usize> {
    lights: LightBank<L, N>,
    guard: RenderGuard,
    modes: ModeController,
    config: RenderConfig,
    delay: D,
    pair: &'static str,
}

impl<L, D, const N: usize> Session<L, D, N>
where
    L: LightDriver,
    D: DelayNs + Clone,
{
    /// Create a session in [`Mode::Default`], idle, looking up [`RATE_PAIR`]
    pub fn new(driver: L, delay: D, config: RenderConfig) -> Self {
        Self {
            lights: LightBank::new(driver),
            guard: RenderGuard::new(),
            modes: ModeController::new(config.base_speed_ms),
            config,
            delay,
            pair: RATE_PAIR,
        }
    }

    /// Look up a different currency pair
    pub fn with_pair(mut self, pair: &'static str) -> Self {
        self.pair = pair;
        self
    }

    /// The light bank
    ///
    /// Crate-internal: outside an admitted cycle only the orchestrator's
    /// startup reset and shutdown may touch the lights.
    pub(crate) fn lights(&self) -> &LightBank<L, N> {
        &self.lights
    }

    /// The render guard
    pub fn guard(&self) -> &RenderGuard {
        &self.guard
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.modes.mode()
    }

    fn blinker(&self) -> Blinker<'_, L, D, N> {
        Blinker::new(&self.lights, self.delay.clone())
    }

    /// Switch every light off
    pub(crate) fn reset(&self) {
        self.lights.reset();
    }

    /// Run one guarded fetch-and-display cycle
    ///
    /// Returns [`CycleOutcome::Dropped`] at once if another cycle (or a mode
    /// flash) is in progress. Once admitted the cycle runs to completion;
    /// the guard is released and all lights are off when it returns, on
    /// every path.
    pub async fn render_cycle<P: RateProvider>(
        &self,
        provider: &mut P,
    ) -> Result<CycleOutcome, CycleError> {
        let Some(permit) = self.guard.try_enter() else {
            debug!("render request dropped: cycle in progress");
            return Ok(CycleOutcome::Dropped);
        };

        let result = self.fetch_and_render(provider).await;

        self.lights.reset();
        permit.exit();
        result
    }

    async fn fetch_and_render<P: RateProvider>(
        &self,
        provider: &mut P,
    ) -> Result<CycleOutcome, CycleError> {
        let mode = self.modes.mode();
        info!("render cycle started in {} mode", mode.as_str());

        self.lights.set_status(true);
        let fetched = provider.fetch().await;
        self.lights.set_status(false);

        let table = match fetched {
            Ok(table) => table,
            Err(err) => {
                error!("rate fetch failed: {}", err);
                self.signal_error().await;
                return Err(err.into());
            }
        };

        let Some(rate) = table.get(self.pair) else {
            warn!("{} missing from {} fetched rates", self.pair, table.len());
            return Ok(CycleOutcome::NoRate);
        };
        info!("{} = {}", self.pair, rate);

        let digits = DigitSequence::<N>::from_rate(rate).map_err(|err| {
            error!("cannot display {}: {}", rate, err);
            CycleError::from(err)
        })?;

        self.render(mode, &digits).await;
        Ok(CycleOutcome::Rendered { rate, mode })
    }

    /// Drive the lights with a digit sequence in the given mode
    async fn render(&self, mode: Mode, digits: &DigitSequence<N>) {
        let speed = mode.speed(self.config.base_speed_ms);
        let mut blinker = self.blinker();
        match mode.render_style() {
            RenderStyle::Decimal => {
                DecimalRenderer::new(speed)
                    .render(&mut blinker, digits)
                    .await;
            }
            RenderStyle::Binary => {
                BinaryRenderer::new(speed).render(&blinker, digits).await;
            }
        }
    }

    /// Blink every value light together at the base speed
    async fn signal_error(&self) {
        let waveform = Waveform::from_speed_ms(self.config.base_speed_ms);
        self.blinker()
            .blink_all_values(waveform, self.config.error_blinks)
            .await;
    }

    /// Advance to the next mode and flash the confirmation light
    ///
    /// Returns `None` if a render cycle is in progress.
    pub async fn change_mode(&self) -> Option<Mode> {
        let mut blinker = self.blinker();
        self.modes
            .cycle(&self.guard, &mut blinker, self.config.mode_flash())
            .await
    }
}
