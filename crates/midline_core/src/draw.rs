//! Draw context
//!
//! The rendering surface every widget draws into. Backends (a GPU renderer,
//! a terminal rasterizer, a test recorder) implement [`DrawContext`]; widgets
//! only ever see `&mut dyn DrawContext`.

use crate::color::Color;
use crate::geometry::{Point, Size};

// ─────────────────────────────────────────────────────────────────────────────
// Transforms
// ─────────────────────────────────────────────────────────────────────────────

/// Axis-aligned 2D transform (scale, then translate)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale_x: f32,
    pub scale_y: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub const fn identity() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }

    pub const fn translate(x: f32, y: f32) -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            translate_x: x,
            translate_y: y,
        }
    }

    pub const fn scale(x: f32, y: f32) -> Self {
        Self {
            scale_x: x,
            scale_y: y,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }

    /// Compose so that `child` is applied first, then `self`
    pub fn concat(&self, child: &Transform) -> Transform {
        Transform {
            scale_x: self.scale_x * child.scale_x,
            scale_y: self.scale_y * child.scale_y,
            translate_x: self.scale_x * child.translate_x + self.translate_x,
            translate_y: self.scale_y * child.translate_y + self.translate_y,
        }
    }

    pub fn apply(&self, point: Point) -> Point {
        Point::new(
            point.x * self.scale_x + self.translate_x,
            point.y * self.scale_y + self.translate_y,
        )
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stroke Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Line cap style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    /// Flat cap at the endpoint
    #[default]
    Butt,
    /// Rounded cap extending past the endpoint
    Round,
    /// Square cap extending past the endpoint
    Square,
}

/// Stroke style configuration
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Line width
    pub width: f32,
    /// Line cap style
    pub cap: LineCap,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Butt,
        }
    }
}

impl Stroke {
    /// Create a new stroke with the given width
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Set line cap style
    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Paths
// ─────────────────────────────────────────────────────────────────────────────

/// Path command
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
}

/// A vector path
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Create a new empty path
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// A single straight segment
    pub fn line(from: Point, to: Point) -> Self {
        Self::new().move_to(from.x, from.y).line_to(to.x, to.y)
    }

    /// Move to a point
    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    /// Line to a point
    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Endpoints if this path is exactly one straight segment
    pub fn as_line(&self) -> Option<(Point, Point)> {
        match self.commands.as_slice() {
            [PathCommand::MoveTo(from), PathCommand::LineTo(to)] => Some((*from, *to)),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// DrawContext Trait
// ─────────────────────────────────────────────────────────────────────────────

/// The drawing surface a widget renders into
///
/// Coordinates passed to drawing operations are local; implementations map
/// them through the current transform.
pub trait DrawContext {
    /// Push a transform onto the stack (composed with the current one)
    fn push_transform(&mut self, transform: Transform);

    /// Pop the top transform from the stack
    fn pop_transform(&mut self);

    /// Get the current combined transform
    fn current_transform(&self) -> Transform;

    /// Stroke a path
    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, color: Color);

    /// Size of the drawable area
    fn viewport(&self) -> Size;
}

/// Convenience methods available on every [`DrawContext`]
pub trait DrawContextExt: DrawContext {
    /// Stroke a single straight segment
    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke, color: Color) {
        self.stroke_path(&Path::line(from, to), stroke, color);
    }

    /// Run `f` with `transform` pushed, popping it afterwards
    fn with_transform<F>(&mut self, transform: Transform, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.push_transform(transform);
        f(self);
        self.pop_transform();
    }
}

impl<T: DrawContext + ?Sized> DrawContextExt for T {}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// A draw command recorded by a [`RecordingContext`]
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    PushTransform(Transform),
    PopTransform,
    StrokePath {
        path: Path,
        stroke: Stroke,
        color: Color,
    },
}

impl DrawCommand {
    /// Line endpoints, stroke, and color if this command strokes a single segment
    pub fn as_line(&self) -> Option<(Point, Point, &Stroke, Color)> {
        match self {
            DrawCommand::StrokePath {
                path,
                stroke,
                color,
            } => path.as_line().map(|(from, to)| (from, to, stroke, *color)),
            _ => None,
        }
    }
}

/// A draw context that records commands for later execution
#[derive(Debug)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    transform_stack: Vec<Transform>,
    viewport: Size,
}

impl RecordingContext {
    /// Create a new recording context
    pub fn new(viewport: Size) -> Self {
        Self {
            commands: Vec::new(),
            transform_stack: vec![Transform::identity()],
            viewport,
        }
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl DrawContext for RecordingContext {
    fn push_transform(&mut self, transform: Transform) {
        self.commands.push(DrawCommand::PushTransform(transform));
        let combined = self.current_transform().concat(&transform);
        self.transform_stack.push(combined);
    }

    fn pop_transform(&mut self) {
        self.commands.push(DrawCommand::PopTransform);
        if self.transform_stack.len() > 1 {
            self.transform_stack.pop();
        }
    }

    fn current_transform(&self) -> Transform {
        self.transform_stack.last().copied().unwrap_or_default()
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, color: Color) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            stroke: stroke.clone(),
            color,
        });
    }

    fn viewport(&self) -> Size {
        self.viewport
    }
}
