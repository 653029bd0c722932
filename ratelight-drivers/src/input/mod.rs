//! Input implementations

pub mod button;

pub use button::DebouncedButton;
