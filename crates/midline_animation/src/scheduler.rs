//! Animation scheduler
//!
//! Owns every registered tween and advances them each frame. The scheduler
//! is cooperative: the host calls [`AnimationScheduler::tick`] (wall clock)
//! or [`AnimationScheduler::tick_by`] (explicit delta) from the same thread
//! that draws. Each tick writes the eased value into the tween's bound
//! [`AnimatedProperty`] and notifies its [`AnimationListener`].
//!
//! Listener callbacks run after the scheduler lock is released, so a
//! listener may freely call back into the scheduler.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Instant;

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::listener::AnimationListener;
use crate::tween::{Tween, TweenEvent, TweenEvents, TweenState};
use crate::values::AnimatedProperty;

new_key_type! {
    /// Handle to a registered tween
    pub struct TweenId;
}

struct TweenEntry {
    tween: Tween,
    target: Option<AnimatedProperty>,
    listener: Option<Arc<dyn AnimationListener>>,
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    tweens: SlotMap<TweenId, TweenEntry>,
    last_frame: Instant,
}

type PendingEvents = SmallVec<[(Arc<dyn AnimationListener>, TweenEvent); 4]>;

fn lock(inner: &Mutex<SchedulerInner>) -> MutexGuard<'_, SchedulerInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

fn queue(pending: &mut PendingEvents, entry: &TweenEntry, events: TweenEvents) {
    if let Some(listener) = &entry.listener {
        pending.extend(events.into_iter().map(|event| (Arc::clone(listener), event)));
    }
}

fn dispatch(pending: PendingEvents) {
    for (listener, event) in pending {
        match event {
            TweenEvent::Start => listener.on_start(),
            TweenEvent::Repeat(iteration) => listener.on_repeat(iteration),
            TweenEvent::End => listener.on_end(),
            TweenEvent::Cancel => listener.on_cancel(),
        }
    }
}

/// The animation scheduler that ticks all registered tweens
///
/// Held by the host; widgets receive a [`SchedulerHandle`] instead.
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
    /// Set whenever a tick wrote a new value
    needs_redraw: Arc<AtomicBool>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                tweens: SlotMap::with_key(),
                last_frame: Instant::now(),
            })),
            needs_redraw: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a handle to this scheduler for passing to widgets
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Tick all tweens using the wall-clock time since the previous tick
    ///
    /// Returns true if any tween is still running.
    pub fn tick(&self) -> bool {
        let dt_ms = {
            let mut inner = lock(&self.inner);
            let now = Instant::now();
            let dt = (now - inner.last_frame).as_secs_f32() * 1000.0;
            inner.last_frame = now;
            dt
        };
        self.tick_by(dt_ms)
    }

    /// Tick all tweens by an explicit delta in milliseconds
    ///
    /// Returns true if any tween is still running.
    pub fn tick_by(&self, dt_ms: f32) -> bool {
        let mut pending = PendingEvents::new();
        let mut wrote = false;

        let active = {
            let mut inner = lock(&self.inner);
            for (id, entry) in inner.tweens.iter_mut() {
                if !entry.tween.is_running() {
                    continue;
                }

                let events = entry.tween.advance(dt_ms);
                if let Some(target) = &entry.target {
                    target.set(entry.tween.value());
                    wrote = true;
                }
                tracing::trace!(
                    "tween {:?}: value={:.3} fraction={:.3}",
                    id,
                    entry.tween.value(),
                    entry.tween.fraction()
                );
                queue(&mut pending, entry, events);
            }
            inner.tweens.values().any(|entry| entry.tween.is_running())
        };

        if wrote {
            self.needs_redraw.store(true, Ordering::Release);
        }
        dispatch(pending);
        active
    }

    /// Check and clear the needs_redraw flag
    pub fn take_needs_redraw(&self) -> bool {
        self.needs_redraw.swap(false, Ordering::Acquire)
    }

    /// Check if any tweens are still running
    pub fn has_active_animations(&self) -> bool {
        lock(&self.inner)
            .tweens
            .values()
            .any(|entry| entry.tween.is_running())
    }

    /// Number of registered tweens, running or not
    pub fn tween_count(&self) -> usize {
        lock(&self.inner).tweens.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the animation scheduler
///
/// This is passed to widgets that need to register animations.
/// It won't prevent the scheduler from being dropped; every operation
/// becomes a no-op once it is.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Run `f` against the live scheduler state, if the scheduler still exists
    fn with_inner<R>(&self, f: impl FnOnce(&mut SchedulerInner) -> R) -> Option<R> {
        let inner = self.inner.upgrade()?;
        let mut guard = lock(&inner);
        Some(f(&mut guard))
    }

    /// Register a tween and return its ID
    ///
    /// `target` receives the tween's value on start and on every tick.
    pub fn register_tween(
        &self,
        tween: Tween,
        target: Option<AnimatedProperty>,
        listener: Option<Arc<dyn AnimationListener>>,
    ) -> Option<TweenId> {
        self.with_inner(|inner| {
            inner.tweens.insert(TweenEntry {
                tween,
                target,
                listener,
            })
        })
    }

    /// Start (or restart) a registered tween
    pub fn start_tween(&self, id: TweenId) {
        let pending = self.with_inner(|inner| {
            let mut pending = PendingEvents::new();
            // Restart the frame clock only when nothing else is consuming it
            let others_running = inner
                .tweens
                .iter()
                .any(|(other, entry)| other != id && entry.tween.is_running());
            if !others_running {
                inner.last_frame = Instant::now();
            }
            if let Some(entry) = inner.tweens.get_mut(id) {
                let events = entry.tween.start();
                if let Some(target) = &entry.target {
                    target.set(entry.tween.value());
                }
                tracing::debug!(
                    "tween {:?} started: {} -> {} over {}ms (repeat {})",
                    id,
                    entry.tween.from_value(),
                    entry.tween.to_value(),
                    entry.tween.duration_ms(),
                    entry.tween.repeat()
                );
                queue(&mut pending, entry, events);
            }
            pending
        });

        if let Some(pending) = pending {
            dispatch(pending);
        }
    }

    /// Cancel a running tween, leaving its target at the current value
    ///
    /// Returns true if the tween was running.
    pub fn cancel_tween(&self, id: TweenId) -> bool {
        let outcome = self.with_inner(|inner| {
            let mut pending = PendingEvents::new();
            let mut cancelled = false;
            if let Some(entry) = inner.tweens.get_mut(id) {
                let events = entry.tween.cancel();
                cancelled = !events.is_empty();
                queue(&mut pending, entry, events);
            }
            (cancelled, pending)
        });

        match outcome {
            Some((true, pending)) => {
                tracing::debug!("tween {:?} cancelled", id);
                dispatch(pending);
                true
            }
            _ => false,
        }
    }

    /// Remove a tween without notifying its listener
    pub fn remove_tween(&self, id: TweenId) {
        self.with_inner(|inner| inner.tweens.remove(id));
    }

    /// Check if a tween is running
    pub fn is_tween_running(&self, id: TweenId) -> bool {
        self.tween_state(id) == Some(TweenState::Running)
    }

    /// Lifecycle state of a tween, if it is still registered
    pub fn tween_state(&self, id: TweenId) -> Option<TweenState> {
        self.with_inner(|inner| inner.tweens.get(id).map(|entry| entry.tween.state()))
            .flatten()
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

// ============================================================================
// Animated Tween
// ============================================================================

/// A tween that registers itself with the scheduler and unregisters on drop
///
/// # Example
///
/// ```rust
/// use midline_animation::{AnimatedProperty, AnimatedTween, AnimationScheduler, Easing, Tween};
///
/// let scheduler = AnimationScheduler::new();
/// let progress = AnimatedProperty::new(0.0);
///
/// let mut anim = AnimatedTween::new(
///     scheduler.handle(),
///     Tween::new(0.0, 100.0, 1000).with_easing(Easing::decelerate()),
/// )
/// .bind(progress.clone())
/// .build();
/// anim.start();
///
/// scheduler.tick_by(1000.0);
/// assert_eq!(progress.get(), 100.0);
/// ```
pub struct AnimatedTween {
    handle: SchedulerHandle,
    tween_id: Option<TweenId>,
    tween: Option<Tween>,
    target: Option<AnimatedProperty>,
    listener: Option<Arc<dyn AnimationListener>>,
}

impl AnimatedTween {
    pub fn new(handle: SchedulerHandle, tween: Tween) -> Self {
        Self {
            handle,
            tween_id: None,
            tween: Some(tween),
            target: None,
            listener: None,
        }
    }

    /// Write the tween's value into `property` on every tick
    pub fn bind(mut self, property: AnimatedProperty) -> Self {
        self.target = Some(property);
        self
    }

    /// Receive lifecycle notifications
    pub fn listener(mut self, listener: Arc<dyn AnimationListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Register with the scheduler, returning self for chaining
    pub fn build(mut self) -> Self {
        self.register();
        self
    }

    fn register(&mut self) {
        if self.tween_id.is_some() {
            return;
        }
        if let Some(tween) = self.tween.take() {
            self.tween_id =
                self.handle
                    .register_tween(tween, self.target.take(), self.listener.take());
            if self.tween_id.is_none() {
                tracing::warn!("animation scheduler is gone; tween not registered");
            }
        }
    }

    /// Start the tween, registering it first if needed
    pub fn start(&mut self) {
        self.register();
        if let Some(id) = self.tween_id {
            self.handle.start_tween(id);
        }
    }

    /// Cancel the tween; returns true if it was running
    pub fn cancel(&self) -> bool {
        self.tween_id
            .map(|id| self.handle.cancel_tween(id))
            .unwrap_or(false)
    }

    pub fn is_running(&self) -> bool {
        self.tween_id
            .map(|id| self.handle.is_tween_running(id))
            .unwrap_or(false)
    }

    pub fn state(&self) -> TweenState {
        self.tween_id
            .and_then(|id| self.handle.tween_state(id))
            .unwrap_or_default()
    }
}

impl Drop for AnimatedTween {
    fn drop(&mut self) {
        if let Some(id) = self.tween_id {
            self.handle.remove_tween(id);
        }
    }
}
