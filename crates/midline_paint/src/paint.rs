//! Paint - how a line is drawn
//!
//! A [`Paint`] bundles a color with stroke settings, the way a canvas API
//! pairs geometry with a brush description. Paints always stroke.

use midline_core::{Color, LineCap, Stroke};

/// Drawing attributes for canvas operations
#[derive(Clone, Debug, PartialEq)]
pub struct Paint {
    color: Color,
    stroke: Stroke,
}

impl Paint {
    /// Stroke paint with the given width and color and a butt cap
    pub fn stroke(width: f32, color: Color) -> Self {
        Self {
            color,
            stroke: Stroke::new(width),
        }
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.stroke.cap = cap;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke.width
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        self.stroke.width = width;
    }

    pub fn stroke_cap(&self) -> LineCap {
        self.stroke.cap
    }

    pub fn set_stroke_cap(&mut self, cap: LineCap) {
        self.stroke.cap = cap;
    }

    /// Stroke settings handed to the draw context
    pub fn as_stroke(&self) -> &Stroke {
        &self.stroke
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_paint() {
        let paint = Paint::stroke(3.0, Color::DARK_GRAY).with_cap(LineCap::Round);
        assert_eq!(paint.stroke_width(), 3.0);
        assert_eq!(paint.stroke_cap(), LineCap::Round);
        assert_eq!(Paint::stroke(1.0, Color::RED).stroke_cap(), LineCap::Butt);
    }

    #[test]
    fn test_paint_setters() {
        let mut paint = Paint::stroke(1.0, Color::BLACK);

        paint.set_color(Color::RED);
        paint.set_stroke_width(5.0);
        paint.set_stroke_cap(LineCap::Square);

        assert_eq!(paint.color(), Color::RED);
        assert_eq!(paint.as_stroke().width, 5.0);
        assert_eq!(paint.as_stroke().cap, LineCap::Square);
    }
}
