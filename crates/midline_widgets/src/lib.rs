//! Midline Widgets
//!
//! Custom-drawn widgets built on the Midline draw context and animation
//! scheduler.
//!
//! # Widgets
//!
//! - [`ProgressLoader`]: a thin progress line with optional center-out fill
//!   and animated transitions
//!
//! Widgets implement [`Widget`]; hosts measure them, tick the scheduler,
//! and draw them into any [`DrawContext`](midline_core::DrawContext).

pub mod config;
pub mod listener;
pub mod progress_loader;
pub mod widget;

pub use config::{ConfigError, ProgressLoaderConfig};
pub use listener::{ProgressBarListener, ProgressCallbacks, ProgressListenerAdapter};
pub use progress_loader::{segments, Foreground, LineSegment, LoaderGeometry, ProgressLoader};
pub use widget::Widget;

/// Prelude for hosting widgets
pub mod prelude {
    pub use crate::config::ProgressLoaderConfig;
    pub use crate::listener::{ProgressBarListener, ProgressCallbacks};
    pub use crate::progress_loader::ProgressLoader;
    pub use crate::widget::Widget;

    pub use midline_animation::{AnimationScheduler, RepeatCount, SchedulerHandle};
    pub use midline_core::{Color, DrawContext, LineCap, Size};
}
