//! Terminal rasterizer
//!
//! A [`DrawContext`] that renders horizontal strokes into a single row of
//! character cells. Widgets draw in pixels; the canvas maps pixels to
//! columns with a base scale transform.

use midline_core::{Color, DrawContext, Path, PathCommand, Point, Size, Stroke, Transform};

/// Horizontal pixels covered by one terminal column
pub const PIXELS_PER_COLUMN: f32 = 8.0;

const DARK_GLYPH: char = '█';
const LIGHT_GLYPH: char = '░';
const EMPTY: char = ' ';

fn glyph_for(color: Color) -> char {
    if color.luminance() < 0.5 {
        DARK_GLYPH
    } else {
        LIGHT_GLYPH
    }
}

/// Single-row character canvas
pub struct TerminalCanvas {
    cells: Vec<char>,
    transform_stack: Vec<Transform>,
}

impl TerminalCanvas {
    pub fn new(columns: usize) -> Self {
        Self {
            cells: vec![EMPTY; columns],
            transform_stack: vec![Self::base_transform()],
        }
    }

    fn base_transform() -> Transform {
        Transform::scale(1.0 / PIXELS_PER_COLUMN, 1.0)
    }

    pub fn columns(&self) -> usize {
        self.cells.len()
    }

    /// Width in pixels that exactly fills the row
    pub fn pixel_width(&self) -> f32 {
        self.cells.len() as f32 * PIXELS_PER_COLUMN
    }

    /// Blank every cell and reset the transform stack
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
        self.transform_stack = vec![Self::base_transform()];
    }

    /// The row as text
    pub fn render(&self) -> String {
        self.cells.iter().collect()
    }

    /// Fill the cells between two column positions
    fn fill_span(&mut self, from: f32, to: f32, glyph: char) {
        let columns = self.cells.len() as f32;
        let start = from.min(to).round().clamp(0.0, columns) as usize;
        let end = from.max(to).round().clamp(0.0, columns) as usize;
        for cell in &mut self.cells[start..end] {
            *cell = glyph;
        }
    }
}

impl DrawContext for TerminalCanvas {
    fn push_transform(&mut self, transform: Transform) {
        let combined = self.current_transform().concat(&transform);
        self.transform_stack.push(combined);
    }

    fn pop_transform(&mut self) {
        if self.transform_stack.len() > 1 {
            self.transform_stack.pop();
        }
    }

    fn current_transform(&self) -> Transform {
        self.transform_stack.last().copied().unwrap_or_default()
    }

    fn stroke_path(&mut self, path: &Path, _stroke: &Stroke, color: Color) {
        if color.alpha8() == 0 {
            return;
        }

        let transform = self.current_transform();
        let glyph = glyph_for(color);
        let mut current: Option<Point> = None;

        for command in path.commands() {
            match *command {
                PathCommand::MoveTo(point) => {
                    current = Some(transform.apply(point));
                }
                PathCommand::LineTo(point) => {
                    let point = transform.apply(point);
                    if let Some(from) = current {
                        self.fill_span(from.x, point.x, glyph);
                    }
                    current = Some(point);
                }
            }
        }
    }

    fn viewport(&self) -> Size {
        Size::new(self.pixel_width(), 1.0)
    }
}
