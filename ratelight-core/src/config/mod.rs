//! Configuration types
//!
//! There is no configuration file. Light count, speeds and the poll interval
//! are fixed at build time and collected into [`RenderConfig`].

pub mod types;

pub use types::*;
