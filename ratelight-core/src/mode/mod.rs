//! Rendering mode state machine
//!
//! Four modes in a fixed cycle. Three of them render decimal blink counts at
//! different speeds; the fourth renders each digit as a 4-bit pattern.

pub mod controller;
pub mod machine;

pub use controller::ModeController;
pub use machine::{Mode, RenderStyle};
