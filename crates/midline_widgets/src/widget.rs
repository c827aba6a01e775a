//! Widget capability trait
//!
//! The minimum a host needs from a custom-drawn widget: size it, advance
//! it, and draw it. Hosts own placement; widgets draw in local coordinates
//! with the origin at their top-left corner.

use midline_core::{DrawContext, Size};

/// A measurable, drawable UI element
pub trait Widget {
    /// Accept or adjust the size proposed by the container
    fn measure(&mut self, proposed: Size) -> Size;

    /// Render into `ctx` using local coordinates
    fn draw(&self, ctx: &mut dyn DrawContext);

    /// Per-frame hook; returns true if the widget wants to be redrawn
    fn update(&mut self) -> bool {
        false
    }
}
