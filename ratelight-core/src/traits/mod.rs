//! Collaborator traits
//!
//! These traits define the interface between the rendering core and
//! everything it treats as external: the light hardware, the rate source,
//! the buttons and the periodic timer.

pub mod input;
pub mod light;
pub mod rates;

pub use input::{InputSource, PollTimer, TimerError};
pub use light::LightDriver;
pub use rates::{FetchError, PairSymbol, RateProvider, RateTable, RateTableFull};
