//! Light driver trait

use crate::lights::LightId;

/// Trait for the physical indicator lights
///
/// Writes are fire-and-forget: implementations are assumed to be
/// synchronous and reliable, so there is no error channel.
pub trait LightDriver {
    /// Switch one light on or off
    fn set_state(&mut self, light: LightId, on: bool);

    /// Release the hardware
    ///
    /// Called once, when the periodic trigger itself fails and the
    /// orchestrator gives up.
    fn shutdown(&mut self) {}
}

impl<T: LightDriver + ?Sized> LightDriver for &mut T {
    fn set_state(&mut self, light: LightId, on: bool) {
        T::set_state(self, light, on);
    }

    fn shutdown(&mut self) {
        T::shutdown(self);
    }
}
