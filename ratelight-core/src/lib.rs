//! Board-agnostic rendering core for the exchange-rate blink display
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (lights, rate source, buttons, poll timer)
//! - Digit extraction and the decimal/binary light renderers
//! - The blink waveform every renderer is built from
//! - Mode state machine and the single-flight render guard
//! - The session object and the orchestrator that wires triggers together
//! - Build-time configuration constants

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod config;
pub mod guard;
pub mod lights;
pub mod mode;
pub mod orchestrator;
pub mod render;
pub mod session;
pub mod traits;

#[cfg(test)]
pub(crate) mod sim;

pub use guard::{RenderGuard, RenderPermit};
pub use lights::{LightBank, LightId};
pub use mode::{Mode, ModeController, RenderStyle};
pub use orchestrator::{Orchestrator, Trigger};
pub use session::{CycleError, CycleOutcome, Session};

pub use embassy_time::Duration;
