//! Animation lifecycle listener

/// Receives lifecycle notifications for a tween
///
/// All methods default to no-ops. Callbacks run on the thread that drives
/// the scheduler, outside the scheduler lock.
pub trait AnimationListener: Send + Sync {
    /// The tween started its first cycle
    fn on_start(&self) {}

    /// A repeat cycle began (1-based)
    fn on_repeat(&self, _iteration: u32) {}

    /// The tween reached the end of its last cycle
    fn on_end(&self) {}

    /// The tween was cancelled while running
    fn on_cancel(&self) {}
}
