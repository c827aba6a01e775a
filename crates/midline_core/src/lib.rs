//! Midline Core
//!
//! Foundational types shared by every Midline crate:
//!
//! - **Geometry**: `Point`, `Size`, `Rect`
//! - **Color**: RGBA color with packed ARGB conversion and hex parsing
//! - **Draw Context**: the rendering abstraction widgets draw into, plus a
//!   recording implementation used by tests
//!
//! # Example
//!
//! ```rust
//! use midline_core::{Color, DrawContextExt, Point, RecordingContext, Size, Stroke};
//!
//! let mut ctx = RecordingContext::new(Size::new(200.0, 4.0));
//! ctx.stroke_line(
//!     Point::new(0.0, 0.0),
//!     Point::new(200.0, 0.0),
//!     &Stroke::new(3.0),
//!     Color::LIGHT_GRAY,
//! );
//! assert_eq!(ctx.commands().len(), 1);
//! ```

pub mod color;
pub mod draw;
pub mod geometry;

pub use color::{Color, ColorParseError};
pub use draw::{
    DrawCommand, DrawContext, DrawContextExt, LineCap, Path, PathCommand,
    RecordingContext, Stroke, Transform,
};
pub use geometry::{Point, Rect, Size};
