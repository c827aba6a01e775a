//! Progress loader listener
//!
//! Callers observe a loader animation through [`ProgressBarListener`]. The
//! loader wraps it in a [`ProgressListenerAdapter`] before handing it to the
//! scheduler, which maps tween lifecycle events onto progress events.

use std::sync::Arc;

use midline_animation::AnimationListener;

/// Receives progress animation notifications
pub trait ProgressBarListener: Send + Sync {
    /// The progress animation started
    fn on_progress_start(&self);

    /// The progress animation reached its final cycle's end
    fn on_progress_complete(&self);

    /// Never invoked by the loader; cancelling an animation is silent
    fn on_progress_cancel(&self) {}
}

/// Forwards tween start/end to a [`ProgressBarListener`]
///
/// Repeats fire nothing, and cancellation is swallowed.
pub struct ProgressListenerAdapter {
    inner: Arc<dyn ProgressBarListener>,
}

impl ProgressListenerAdapter {
    pub fn new(inner: Arc<dyn ProgressBarListener>) -> Self {
        Self { inner }
    }
}

impl AnimationListener for ProgressListenerAdapter {
    fn on_start(&self) {
        self.inner.on_progress_start();
    }

    fn on_end(&self) {
        self.inner.on_progress_complete();
    }

    fn on_cancel(&self) {}
}

type Callback = Box<dyn Fn() + Send + Sync>;

/// Closure-based [`ProgressBarListener`]
///
/// ```rust
/// use std::sync::Arc;
/// use midline_widgets::ProgressCallbacks;
///
/// let listener = Arc::new(
///     ProgressCallbacks::new()
///         .on_start(|| println!("loading"))
///         .on_complete(|| println!("done")),
/// );
/// # let _ = listener;
/// ```
#[derive(Default)]
pub struct ProgressCallbacks {
    start: Option<Callback>,
    complete: Option<Callback>,
}

impl ProgressCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_start<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.start = Some(Box::new(f));
        self
    }

    pub fn on_complete<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.complete = Some(Box::new(f));
        self
    }
}

impl ProgressBarListener for ProgressCallbacks {
    fn on_progress_start(&self) {
        if let Some(start) = &self.start {
            start();
        }
    }

    fn on_progress_complete(&self) {
        if let Some(complete) = &self.complete {
            complete();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_adapter_forwards_start_and_end_only() {
        let starts = Arc::new(AtomicU32::new(0));
        let completes = Arc::new(AtomicU32::new(0));

        let listener = {
            let starts = starts.clone();
            let completes = completes.clone();
            ProgressCallbacks::new()
                .on_start(move || {
                    starts.fetch_add(1, Ordering::SeqCst);
                })
                .on_complete(move || {
                    completes.fetch_add(1, Ordering::SeqCst);
                })
        };
        let adapter = ProgressListenerAdapter::new(Arc::new(listener));

        adapter.on_start();
        adapter.on_repeat(1);
        adapter.on_repeat(2);
        adapter.on_cancel();
        assert_eq!(starts.load(Ordering::SeqCst), 1);
        assert_eq!(completes.load(Ordering::SeqCst), 0);

        adapter.on_end();
        assert_eq!(completes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_callbacks_are_noops() {
        let callbacks = ProgressCallbacks::new();
        callbacks.on_progress_start();
        callbacks.on_progress_complete();
        callbacks.on_progress_cancel();
    }
}
