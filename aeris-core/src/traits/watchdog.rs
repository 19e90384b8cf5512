//! Liveness watchdog trait

/// External liveness guard.
///
/// The pipeline feeds the watchdog once per successfully decoded
/// frame. If the loop stalls past the guard's bound, supervision is
/// expected to restart the process; nothing here participates in that
/// beyond the feed.
pub trait Watchdog {
    /// Signal that a frame was just processed.
    fn feed(&mut self);
}

impl<T: Watchdog + ?Sized> Watchdog for &mut T {
    fn feed(&mut self) {
        (**self).feed()
    }
}
