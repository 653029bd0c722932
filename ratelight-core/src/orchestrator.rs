//! Orchestrator
//!
//! Wires the three trigger sources into the session:
//!
//! - the periodic poll timer and the "render now" button start a render cycle
//! - the "change mode" button advances the mode
//!
//! One coordinating loop races the sources. While a cycle (or mode flash) is
//! running the loop keeps listening and drops whatever arrives, so nothing
//! is queued for later. The first cycle runs at startup, before the first
//! tick.

use core::pin::pin;

use embassy_futures::select::{select, select3, Either, Either3};
use embedded_hal_async::delay::DelayNs;

use crate::session::{CycleOutcome, Session};
use crate::traits::{InputSource, LightDriver, PollTimer, RateProvider, TimerError};

/// Source of a trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trigger {
    /// Periodic poll timer fired
    Tick,
    /// "Render now" button pressed
    RenderPressed,
    /// "Change mode" button pressed
    ModePressed,
}

/// Top-level coordinator
pub struct Orchestrator<L, D, P, T, R, M, const N: usize> {
    session: Session<L, D, N>,
    provider: P,
    timer: T,
    render_button: R,
    mode_button: M,
}

impl<L, D, P, T, R, M, const N: usize> Orchestrator<L, D, P, T, R, M, N>
where
    L: LightDriver,
    D: DelayNs + Clone,
    P: RateProvider,
    T: PollTimer,
    R: InputSource,
    M: InputSource,
{
    /// Assemble an orchestrator around a session
    pub fn new(
        session: Session<L, D, N>,
        provider: P,
        timer: T,
        render_button: R,
        mode_button: M,
    ) -> Self {
        Self {
            session,
            provider,
            timer,
            render_button,
            mode_button,
        }
    }

    /// The session
    pub fn session(&self) -> &Session<L, D, N> {
        &self.session
    }

    /// The rate source
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Run until the poll timer fails
    ///
    /// Render failures are logged and never end the loop. A timer failure
    /// switches every light off, shuts the light driver down and is
    /// returned.
    pub async fn run(&mut self) -> TimerError {
        info!("starting rate display with {} value lights", N);
        self.session.reset();

        let mut trigger = Trigger::Tick;
        loop {
            if let Err(err) = self.handle(trigger).await {
                return self.stop(err);
            }
            trigger = match next_trigger(
                &mut self.timer,
                &mut self.render_button,
                &mut self.mode_button,
            )
            .await
            {
                Ok(trigger) => trigger,
                Err(err) => return self.stop(err),
            };
        }
    }

    fn stop(&mut self, err: TimerError) -> TimerError {
        error!("poll timer failed: {}, shutting down lights", err);
        self.session.lights().shutdown();
        err
    }

    /// Handle one trigger while dropping everything that arrives meanwhile
    ///
    /// A timer failure seen while draining is reported after the admitted
    /// work has run to completion.
    async fn handle(&mut self, trigger: Trigger) -> Result<(), TimerError> {
        let Self {
            session,
            provider,
            timer,
            render_button,
            mode_button,
        } = self;

        debug!("trigger: {}", trigger);
        let mut work = pin!(dispatch(session, provider, trigger));
        let drain = async {
            loop {
                match next_trigger(timer, render_button, mode_button).await {
                    Ok(dropped) => debug!("{} dropped: render in progress", dropped),
                    Err(err) => return err,
                }
            }
        };

        match select(work.as_mut(), drain).await {
            Either::First(()) => Ok(()),
            Either::Second(err) => {
                work.await;
                Err(err)
            }
        }
    }
}

async fn dispatch<L, D, P, const N: usize>(
    session: &Session<L, D, N>,
    provider: &mut P,
    trigger: Trigger,
) where
    L: LightDriver,
    D: DelayNs + Clone,
    P: RateProvider,
{
    match trigger {
        Trigger::Tick | Trigger::RenderPressed => match session.render_cycle(provider).await {
            Ok(CycleOutcome::Rendered { rate, mode }) => {
                info!("rendered {} in {} mode", rate, mode.as_str());
            }
            Ok(CycleOutcome::NoRate) => {}
            Ok(CycleOutcome::Dropped) => debug!("{} dropped: render in progress", trigger),
            Err(err) => error!("render cycle failed: {}", err),
        },
        Trigger::ModePressed => {
            session.change_mode().await;
        }
    }
}

async fn next_trigger<T, R, M>(
    timer: &mut T,
    render_button: &mut R,
    mode_button: &mut M,
) -> Result<Trigger, TimerError>
where
    T: PollTimer,
    R: InputSource,
    M: InputSource,
{
    match select3(
        timer.next(),
        render_button.wait_for_press(),
        mode_button.wait_for_press(),
    )
    .await
    {
        Either3::First(result) => result.map(|()| Trigger::Tick),
        Either3::Second(()) => Ok(Trigger::RenderPressed),
        Either3::Third(()) => Ok(Trigger::ModePressed),
    }
}
