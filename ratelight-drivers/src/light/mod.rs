//! Light driver implementations

pub mod gpio;

pub use gpio::GpioLights;
