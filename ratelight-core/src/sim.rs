//! Deterministic simulated time for host tests
//!
//! Futures are polled with a no-op waker. Whenever the whole future is
//! pending, virtual time jumps to the earliest registered deadline and the
//! future is polled again. Every light write is recorded with the virtual
//! time it happened at.

use core::cell::{Cell, RefCell};
use core::future::Future;
use core::pin::{pin, Pin};
use core::task::{Context, Poll, Waker};
use std::collections::VecDeque;
use std::vec::Vec;

use embedded_hal_async::delay::DelayNs;

use crate::lights::LightId;
use crate::traits::{
    FetchError, InputSource, LightDriver, PollTimer, RateProvider, RateTable, TimerError,
};

/// Virtual clock with microsecond resolution
pub(crate) struct SimClock {
    now_us: Cell<u64>,
    deadlines: RefCell<Vec<u64>>,
}

impl SimClock {
    pub(crate) fn new() -> Self {
        Self {
            now_us: Cell::new(0),
            deadlines: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn now_ms(&self) -> u64 {
        self.now_us.get() / 1000
    }

    pub(crate) fn delay(&self) -> SimDelay<'_> {
        SimDelay { clock: self }
    }

    pub(crate) fn sleep_until_ms(&self, deadline_ms: u64) -> Sleep<'_> {
        Sleep {
            clock: self,
            deadline_us: deadline_ms * 1000,
        }
    }

    fn sleep_us(&self, us: u64) -> Sleep<'_> {
        Sleep {
            clock: self,
            deadline_us: self.now_us.get() + us,
        }
    }

    /// Run a future to completion
    pub(crate) fn run<F: Future>(&self, fut: F) -> F::Output {
        match self.run_until(fut, u64::MAX) {
            Some(output) => output,
            None => panic!("future stalled at {} ms with no pending timers", self.now_ms()),
        }
    }

    /// Run a future until it completes or virtual time would pass `limit_ms`
    pub(crate) fn run_until<F: Future>(&self, fut: F, limit_ms: u64) -> Option<F::Output> {
        let mut fut = pin!(fut);
        let mut cx = Context::from_waker(Waker::noop());
        let limit_us = limit_ms.saturating_mul(1000);

        loop {
            if let Poll::Ready(output) = fut.as_mut().poll(&mut cx) {
                return Some(output);
            }

            let next = self.deadlines.borrow_mut().drain(..).min()?;
            if next > limit_us {
                self.now_us.set(limit_us);
                return None;
            }
            if next > self.now_us.get() {
                self.now_us.set(next);
            }
        }
    }
}

/// Future that completes once virtual time reaches its deadline
pub(crate) struct Sleep<'a> {
    clock: &'a SimClock,
    deadline_us: u64,
}

impl Future for Sleep<'_> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        if self.clock.now_us.get() >= self.deadline_us {
            Poll::Ready(())
        } else {
            self.clock.deadlines.borrow_mut().push(self.deadline_us);
            Poll::Pending
        }
    }
}

/// `DelayNs` on the virtual clock
#[derive(Clone, Copy)]
pub(crate) struct SimDelay<'a> {
    clock: &'a SimClock,
}

impl DelayNs for SimDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        self.clock.sleep_us(u64::from(ns) / 1000).await;
    }

    async fn delay_us(&mut self, us: u32) {
        self.clock.sleep_us(u64::from(us)).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.clock.sleep_us(u64::from(ms) * 1000).await;
    }
}

/// Light driver that records every write with its virtual time (ms)
pub(crate) struct RecordingLights<'a> {
    clock: &'a SimClock,
    events: Vec<(u64, LightId, bool)>,
    shut_down: bool,
}

impl<'a> RecordingLights<'a> {
    pub(crate) fn new(clock: &'a SimClock) -> Self {
        Self {
            clock,
            events: Vec::new(),
            shut_down: false,
        }
    }

    pub(crate) fn events(&self) -> &[(u64, LightId, bool)] {
        &self.events
    }

    /// Times at which a light was switched on
    pub(crate) fn on_times(&self, light: LightId) -> Vec<u64> {
        self.events
            .iter()
            .filter(|(_, id, on)| *id == light && *on)
            .map(|(time, _, _)| *time)
            .collect()
    }

    /// Number of times a light was switched on
    pub(crate) fn blink_count(&self, light: LightId) -> usize {
        self.on_times(light).len()
    }

    /// Writes that switched something on, in order
    pub(crate) fn on_events(&self) -> Vec<(u64, LightId)> {
        self.events
            .iter()
            .filter(|(_, _, on)| *on)
            .map(|(time, id, _)| (*time, *id))
            .collect()
    }

    pub(crate) fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub(crate) fn clear(&mut self) {
        self.events.clear();
    }
}

impl LightDriver for RecordingLights<'_> {
    fn set_state(&mut self, light: LightId, on: bool) {
        self.events.push((self.clock.now_ms(), light, on));
    }

    fn shutdown(&mut self) {
        self.shut_down = true;
    }
}

/// Rate source with scripted responses and a fixed latency
pub(crate) struct FakeProvider<'a> {
    clock: &'a SimClock,
    responses: VecDeque<Result<RateTable, FetchError>>,
    latency_ms: u32,
    fetches: usize,
}

impl<'a> FakeProvider<'a> {
    pub(crate) fn new(clock: &'a SimClock, latency_ms: u32) -> Self {
        Self {
            clock,
            responses: VecDeque::new(),
            latency_ms,
            fetches: 0,
        }
    }

    /// Queue a successful response with one pair
    pub(crate) fn with_rate(mut self, pair: &str, rate: f64) -> Self {
        let mut table = RateTable::new();
        table.insert(pair, rate).unwrap();
        self.responses.push_back(Ok(table));
        self
    }

    pub(crate) fn with_error(mut self, error: FetchError) -> Self {
        self.responses.push_back(Err(error));
        self
    }

    pub(crate) fn fetches(&self) -> usize {
        self.fetches
    }
}

impl RateProvider for FakeProvider<'_> {
    async fn fetch(&mut self) -> Result<RateTable, FetchError> {
        self.fetches += 1;
        self.clock.delay().delay_ms(self.latency_ms).await;
        self.responses
            .pop_front()
            .unwrap_or(Err(FetchError::Transport))
    }
}

/// Button pressed at scripted virtual times (ms)
pub(crate) struct ScriptedInput<'a> {
    clock: &'a SimClock,
    presses_ms: VecDeque<u64>,
}

impl<'a> ScriptedInput<'a> {
    pub(crate) fn new(clock: &'a SimClock, presses_ms: &[u64]) -> Self {
        Self {
            clock,
            presses_ms: presses_ms.iter().copied().collect(),
        }
    }
}

impl InputSource for ScriptedInput<'_> {
    async fn wait_for_press(&mut self) {
        match self.presses_ms.front().copied() {
            Some(at) => {
                self.clock.sleep_until_ms(at).await;
                // Only consume once delivered, so a cancelled wait loses nothing
                self.presses_ms.pop_front();
            }
            None => core::future::pending().await,
        }
    }
}

/// Deadline-based periodic timer on the virtual clock
pub(crate) struct SimTicker<'a> {
    clock: &'a SimClock,
    period_ms: u64,
    next_ms: u64,
    remaining: Option<usize>,
}

impl<'a> SimTicker<'a> {
    pub(crate) fn new(clock: &'a SimClock, period_ms: u64) -> Self {
        Self {
            clock,
            period_ms,
            next_ms: period_ms,
            remaining: None,
        }
    }

    /// Fail with `TimerError::Stopped` after delivering `ticks` ticks
    pub(crate) fn failing_after(mut self, ticks: usize) -> Self {
        self.remaining = Some(ticks);
        self
    }
}

impl PollTimer for SimTicker<'_> {
    async fn next(&mut self) -> Result<(), TimerError> {
        if self.remaining == Some(0) {
            return Err(TimerError::Stopped);
        }
        self.clock.sleep_until_ms(self.next_ms).await;
        self.next_ms += self.period_ms;
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }
        Ok(())
    }
}
