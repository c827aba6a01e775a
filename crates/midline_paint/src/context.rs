//! Paint context - Canvas-like drawing API implementing DrawContext
//!
//! PaintContext provides a 2D-focused drawing API similar to HTML Canvas,
//! while implementing the unified DrawContext trait so anything that draws
//! into a `dyn DrawContext` can be recorded and inspected.

use midline_core::{
    DrawCommand, DrawContext, Path, Point, RecordingContext, Size, Stroke, Transform,
};

use crate::paint::Paint;

/// Canvas-style drawing with a [`Paint`], available on every draw context
pub trait Canvas: DrawContext {
    /// Draw a straight line from (start_x, start_y) to (stop_x, stop_y)
    fn draw_line(&mut self, start_x: f32, start_y: f32, stop_x: f32, stop_y: f32, paint: &Paint) {
        let path = Path::line(Point::new(start_x, start_y), Point::new(stop_x, stop_y));
        self.stroke_path(&path, paint.as_stroke(), paint.color());
    }
}

impl<T: DrawContext + ?Sized> Canvas for T {}

/// The paint context used for custom 2D drawing
///
/// PaintContext wraps a RecordingContext to record draw commands,
/// while providing a Canvas-like API for convenience.
pub struct PaintContext {
    recording: RecordingContext,
}

impl PaintContext {
    /// Create a new paint context with the given viewport size
    pub fn new(width: f32, height: f32) -> Self {
        Self::from_size(Size::new(width, height))
    }

    /// Create from a Size
    pub fn from_size(size: Size) -> Self {
        Self {
            recording: RecordingContext::new(size),
        }
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        self.recording.commands()
    }

    /// Endpoints of every recorded single-segment stroke, in draw order
    pub fn lines(&self) -> Vec<(Point, Point)> {
        self.commands()
            .iter()
            .filter_map(|command| command.as_line().map(|(from, to, _, _)| (from, to)))
            .collect()
    }
}

impl DrawContext for PaintContext {
    fn push_transform(&mut self, transform: Transform) {
        self.recording.push_transform(transform);
    }

    fn pop_transform(&mut self) {
        self.recording.pop_transform();
    }

    fn current_transform(&self) -> Transform {
        self.recording.current_transform()
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, color: midline_core::Color) {
        self.recording.stroke_path(path, stroke, color);
    }

    fn viewport(&self) -> Size {
        self.recording.viewport()
    }
}
