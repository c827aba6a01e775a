//! Midline Animation System
//!
//! Timed tweens driven by a cooperative scheduler.
//!
//! # Features
//!
//! - **Easing Curves**: linear and factor-based decelerate
//! - **Tweens**: from/to interpolation with finite or infinite repeats
//! - **Typed Bindings**: tweens write straight into an [`AnimatedProperty`]
//! - **Lifecycle Listeners**: start, repeat, end, and cancel notifications
//! - **Weak Handles**: widgets hold a [`SchedulerHandle`] that never keeps
//!   the scheduler alive

pub mod easing;
pub mod listener;
pub mod scheduler;
pub mod tween;
pub mod values;

pub use easing::Easing;
pub use listener::AnimationListener;
pub use scheduler::{AnimatedTween, AnimationScheduler, SchedulerHandle, TweenId};
pub use tween::{ParseRepeatCountError, RepeatCount, Tween, TweenEvent, TweenState};
pub use values::{AnimatedProperty, Interpolate};
