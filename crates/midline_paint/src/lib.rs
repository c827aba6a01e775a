//! Midline Paint/Canvas API
//!
//! A small canvas layer over the `midline_core` draw context:
//!
//! - [`Paint`] describes color, stroke width, and cap
//! - [`Canvas`] adds `draw_line` to every `DrawContext`, trait objects included
//! - [`PaintContext`] records commands for inspection
//!
//! # Example
//!
//! ```rust
//! use midline_paint::{Canvas, Color, LineCap, Paint, PaintContext};
//!
//! let mut ctx = PaintContext::new(200.0, 4.0);
//! let paint = Paint::stroke(3.0, Color::DARK_GRAY).with_cap(LineCap::Round);
//! ctx.draw_line(0.0, 0.0, 100.0, 0.0, &paint);
//!
//! assert_eq!(ctx.lines().len(), 1);
//! ```

pub mod context;
pub mod paint;

// ─────────────────────────────────────────────────────────────────────────────
// Core type re-exports from midline_core
// ─────────────────────────────────────────────────────────────────────────────

pub use midline_core::{Color, DrawCommand, DrawContext, LineCap, Point, Size, Stroke};

pub use context::{Canvas, PaintContext};
pub use paint::Paint;
