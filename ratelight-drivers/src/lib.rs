//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator traits
//! defined in ratelight-core on top of `embedded-hal`:
//!
//! - Light drivers (GPIO value lights + status light)
//! - Inputs (debounced push buttons)
//! - Poll timer (embassy ticker)
//!
//! The delay primitive needs no wrapper: `embassy_time::Delay` already
//! implements `embedded_hal_async::delay::DelayNs`.

#![no_std]
#![deny(unsafe_code)]

pub mod input;
pub mod light;
pub mod timer;

pub use input::DebouncedButton;
pub use light::GpioLights;
pub use timer::TickerTimer;
