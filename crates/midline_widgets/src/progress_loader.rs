//! Progress loader widget
//!
//! A thin horizontal line with a foreground segment showing progress in
//! percent. In two-way mode the foreground grows outward from the center
//! toward both edges; otherwise it grows left to right.
//!
//! Progress changes can be animated with [`ProgressLoader::animate_to`]. The
//! tween writes straight into the loader's progress property, so the host only
//! needs to tick its [`AnimationScheduler`](midline_animation::AnimationScheduler)
//! and redraw when asked.
//!
//! # Example
//!
//! ```rust
//! use midline_animation::{AnimationScheduler, RepeatCount};
//! use midline_paint::PaintContext;
//! use midline_widgets::{ProgressLoader, ProgressLoaderConfig, Widget};
//! use midline_core::Size;
//!
//! let scheduler = AnimationScheduler::new();
//! let mut loader = ProgressLoader::new(scheduler.handle(), ProgressLoaderConfig::default());
//! loader.measure(Size::new(200.0, 6.0));
//!
//! loader.animate_to(100.0, RepeatCount::NONE, None);
//! scheduler.tick_by(1000.0);
//! assert_eq!(loader.progress(), 100.0);
//!
//! let mut ctx = PaintContext::new(200.0, 6.0);
//! loader.draw(&mut ctx);
//! ```

use std::sync::Arc;

use midline_animation::{
    AnimatedProperty, AnimatedTween, Easing, RepeatCount, SchedulerHandle, Tween, TweenState,
};
use midline_core::{Color, DrawContext, LineCap, Point, Rect, Size};
use midline_paint::{Canvas, Paint};

use crate::config::{clamp_duration, ProgressLoaderConfig};
use crate::listener::{ProgressBarListener, ProgressListenerAdapter};
use crate::widget::Widget;

/// Upper bound for animation targets
pub const MAX_PROGRESS: f32 = 100.0;

/// Alpha factor applied to the foreground by [`ProgressLoader::set_color`]
const FADED_ALPHA: f32 = 0.4;

/// Round half up, so `-2.5` becomes `-2` and `2.5` becomes `3`
///
/// Done in `f64`, where adding 0.5 to values just below one half is exact.
fn round_half_up(value: f32) -> f32 {
    (f64::from(value) + 0.5).floor() as f32
}

// =============================================================================
// Geometry
// =============================================================================

/// A horizontal line segment on the loader's top edge
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    fn horizontal(start_x: f32, end_x: f32) -> Self {
        Self {
            start: Point::new(start_x, 0.0),
            end: Point::new(end_x, 0.0),
        }
    }
}

/// The foreground of a loader
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Foreground {
    /// Left-to-right fill
    Single(LineSegment),
    /// Center-out fill, one segment per direction
    Split {
        right: LineSegment,
        left: LineSegment,
    },
}

impl Foreground {
    pub fn segments(&self) -> impl Iterator<Item = LineSegment> {
        let (first, second) = match *self {
            Foreground::Single(segment) => (segment, None),
            Foreground::Split { right, left } => (right, Some(left)),
        };
        std::iter::once(first).chain(second)
    }
}

/// Everything a loader draws for a given width and progress
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoaderGeometry {
    pub background: LineSegment,
    pub foreground: Foreground,
}

/// Compute the loader's line segments
///
/// Foreground end points are rounded to whole pixels. Progress is used as
/// given, so values outside `0..=100` overshoot the background.
pub fn segments(width: f32, progress: f32, two_way: bool) -> LoaderGeometry {
    let background = LineSegment::horizontal(0.0, width);

    let foreground = if two_way {
        let mid = width / 2.0;
        let step = mid / 100.0 * progress;
        Foreground::Split {
            right: LineSegment::horizontal(mid, round_half_up(mid + step)),
            left: LineSegment::horizontal(mid, round_half_up(mid - step)),
        }
    } else {
        Foreground::Single(LineSegment::horizontal(
            0.0,
            round_half_up(width * progress / 100.0),
        ))
    };

    LoaderGeometry {
        background,
        foreground,
    }
}

// =============================================================================
// Widget
// =============================================================================

/// Horizontal progress line with optional center-out fill
pub struct ProgressLoader {
    handle: SchedulerHandle,
    progress: AnimatedProperty,

    stroke_width: f32,
    stroke_cap: LineCap,
    duration_ms: u32,
    progress_color: Color,
    background_color: Color,
    two_way: bool,

    background_paint: Paint,
    progress_paint: Paint,

    /// The running (or last) progress animation
    animation: Option<AnimatedTween>,

    size: Size,
    bounds: Rect,

    needs_layout: bool,
    needs_redraw: bool,
}

impl ProgressLoader {
    pub fn new(handle: SchedulerHandle, config: ProgressLoaderConfig) -> Self {
        warn_non_positive_width(config.stroke_width);

        let background_paint = Paint::stroke(config.stroke_width, config.background_color);
        let progress_paint =
            Paint::stroke(config.stroke_width, config.progress_color).with_cap(config.stroke_cap);

        Self {
            handle,
            progress: AnimatedProperty::new(config.progress),
            stroke_width: config.stroke_width,
            stroke_cap: config.stroke_cap,
            duration_ms: clamp_duration(config.duration_ms),
            progress_color: config.progress_color,
            background_color: config.background_color,
            two_way: config.two_way,
            background_paint,
            progress_paint,
            animation: None,
            size: Size::ZERO,
            bounds: Rect::ZERO,
            needs_layout: false,
            needs_redraw: false,
        }
    }

    // =========================================================================
    // Appearance
    // =========================================================================

    /// Set the line thickness of both the background and the foreground
    pub fn set_stroke_width(&mut self, width: f32) {
        warn_non_positive_width(width);
        self.stroke_width = width;
        self.background_paint.set_stroke_width(width);
        self.progress_paint.set_stroke_width(width);
        self.needs_layout = true;
        self.needs_redraw = true;
    }

    /// Set the foreground's end cap
    ///
    /// Takes effect on the next draw; no redraw is requested.
    pub fn set_stroke_cap(&mut self, cap: LineCap) {
        self.stroke_cap = cap;
        self.progress_paint.set_stroke_cap(cap);
    }

    /// Set the animation duration; values below one second are raised to it
    pub fn set_duration(&mut self, duration_ms: u32) {
        self.duration_ms = clamp_duration(duration_ms);
    }

    /// Derive both colors from a single color
    ///
    /// The background becomes light gray and the foreground keeps `color`'s
    /// RGB with its alpha scaled to 40%.
    pub fn set_color(&mut self, color: impl Into<Color>) {
        self.apply_colors(color.into().fade(FADED_ALPHA), Color::LIGHT_GRAY);
    }

    /// Set the foreground and background colors verbatim
    pub fn set_colors(&mut self, color: impl Into<Color>, background: impl Into<Color>) {
        self.apply_colors(color.into(), background.into());
    }

    fn apply_colors(&mut self, color: Color, background: Color) {
        self.progress_color = color;
        self.background_color = background;
        self.progress_paint.set_color(color);
        self.background_paint.set_color(background);
        self.needs_layout = true;
        self.needs_redraw = true;
    }

    /// Switch between center-out and left-to-right fill
    pub fn set_two_way(&mut self, two_way: bool) {
        if self.two_way != two_way {
            self.two_way = two_way;
            self.needs_redraw = true;
        }
    }

    // =========================================================================
    // Progress
    // =========================================================================

    /// Current progress, including any in-flight animation value
    pub fn progress(&self) -> f32 {
        self.progress.get()
    }

    /// Set progress immediately (not clamped)
    ///
    /// A running animation keeps writing on subsequent ticks; call
    /// [`reset`](Self::reset) to stop it.
    pub fn set_progress(&mut self, progress: f32) {
        self.progress.set(progress);
        self.needs_redraw = true;
    }

    /// Animate from the current progress to `target`
    ///
    /// Targets above 100 are capped. Any previous animation is cancelled and
    /// replaced. The listener hears `on_progress_start` as the animation
    /// starts and `on_progress_complete` once its final cycle ends; repeats
    /// and cancellation are not reported.
    pub fn animate_to(
        &mut self,
        target: f32,
        repeat: RepeatCount,
        listener: Option<Arc<dyn ProgressBarListener>>,
    ) {
        let target = target.min(MAX_PROGRESS);
        self.cancel_animation();

        let from = self.progress();
        let tween = Tween::new(from, target, self.duration_ms)
            .with_easing(Easing::Decelerate(1.0))
            .with_repeat(repeat);

        let mut animation =
            AnimatedTween::new(self.handle.clone(), tween).bind(self.progress.clone());
        if let Some(listener) = listener {
            animation = animation.listener(Arc::new(ProgressListenerAdapter::new(listener)));
        }

        tracing::debug!(
            "progress loader animating {} -> {} over {}ms (repeat {})",
            from,
            target,
            self.duration_ms,
            repeat
        );

        let animation = self.animation.insert(animation.build());
        animation.start();
        self.needs_redraw = true;
    }

    /// Stop any animation and return progress to zero
    pub fn reset(&mut self) {
        self.cancel_animation();
        self.progress.set(0.0);
        self.needs_redraw = true;
        tracing::debug!("progress loader reset");
    }

    /// Cancel and unregister the current animation, if any
    fn cancel_animation(&mut self) {
        if let Some(animation) = self.animation.take() {
            if animation.cancel() {
                tracing::debug!("progress loader animation cancelled");
            }
        }
    }

    /// Whether an animation is currently driving progress
    pub fn is_animating(&self) -> bool {
        self.animation
            .as_ref()
            .is_some_and(|animation| animation.is_running())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn progress_color(&self) -> Color {
        self.progress_color
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn stroke_cap(&self) -> LineCap {
        self.stroke_cap
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn is_two_way(&self) -> bool {
        self.two_way
    }

    /// The measured rect inset by half the stroke width
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Size from the last [`measure`](Widget::measure)
    pub fn size(&self) -> Size {
        self.size
    }

    /// Line segments for the current size and progress
    pub fn geometry(&self) -> LoaderGeometry {
        segments(self.size.width, self.progress(), self.two_way)
    }

    // =========================================================================
    // Invalidation
    // =========================================================================

    /// Whether a redraw is pending, from a setter or an animation tick
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw || self.progress.is_dirty()
    }

    /// Check and clear the redraw request
    pub fn take_needs_redraw(&mut self) -> bool {
        let ticked = self.progress.take_dirty();
        std::mem::take(&mut self.needs_redraw) || ticked
    }

    /// Check and clear the re-layout request
    pub fn take_needs_layout(&mut self) -> bool {
        std::mem::take(&mut self.needs_layout)
    }
}

fn warn_non_positive_width(width: f32) {
    if width <= 0.0 {
        tracing::warn!("progress loader stroke width {} is not positive", width);
    }
}

impl Widget for ProgressLoader {
    fn measure(&mut self, proposed: Size) -> Size {
        self.size = proposed;
        self.bounds = proposed.to_rect().inset(self.stroke_width / 2.0);
        proposed
    }

    fn draw(&self, ctx: &mut dyn DrawContext) {
        let geometry = self.geometry();

        let background = geometry.background;
        ctx.draw_line(
            background.start.x,
            background.start.y,
            background.end.x,
            background.end.y,
            &self.background_paint,
        );

        for segment in geometry.foreground.segments() {
            ctx.draw_line(
                segment.start.x,
                segment.start.y,
                segment.end.x,
                segment.end.y,
                &self.progress_paint,
            );
        }
    }

    fn update(&mut self) -> bool {
        if self.progress.take_dirty() {
            self.needs_redraw = true;
        }

        let finished = self.animation.as_ref().is_some_and(|animation| {
            matches!(
                animation.state(),
                TweenState::Finished | TweenState::Cancelled
            )
        });
        if finished {
            self.animation = None;
        }

        self.needs_redraw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use midline_animation::AnimationScheduler;
    use midline_paint::PaintContext;

    fn loader(scheduler: &AnimationScheduler, config: ProgressLoaderConfig) -> ProgressLoader {
        let mut loader = ProgressLoader::new(scheduler.handle(), config);
        loader.measure(Size::new(200.0, 6.0));
        loader
    }

    fn end_xs(geometry: &LoaderGeometry) -> Vec<f32> {
        geometry.foreground.segments().map(|s| s.end.x).collect()
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.4), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(round_half_up(0.499_999_97), 0.0);
    }

    #[test]
    fn test_end_just_below_half_rounds_down() {
        let geometry = segments(1.0, 49.999_997, false);
        assert_eq!(end_xs(&geometry), vec![0.0]);
    }

    #[test]
    fn test_one_way_segments() {
        let geometry = segments(200.0, 37.0, false);
        assert_eq!(geometry.background, LineSegment::horizontal(0.0, 200.0));
        assert_eq!(end_xs(&geometry), vec![74.0]);

        // 201 * 50 / 100 = 100.5
        assert_eq!(end_xs(&segments(201.0, 50.0, false)), vec![101.0]);
        // 5 * -50 / 100 = -2.5
        assert_eq!(end_xs(&segments(5.0, -50.0, false)), vec![-2.0]);
    }

    #[test]
    fn test_two_way_segments() {
        let empty = segments(200.0, 0.0, true);
        assert_eq!(
            empty.foreground,
            Foreground::Split {
                right: LineSegment::horizontal(100.0, 100.0),
                left: LineSegment::horizontal(100.0, 100.0),
            }
        );

        assert_eq!(end_xs(&segments(200.0, 100.0, true)), vec![200.0, 0.0]);
        assert_eq!(end_xs(&segments(200.0, 25.0, true)), vec![125.0, 75.0]);

        // Odd widths start from a fractional midpoint
        let odd = segments(101.0, 0.0, true);
        assert_eq!(odd.background.end.x, 101.0);
        for segment in odd.foreground.segments() {
            assert_eq!(segment.start.x, 50.5);
            assert_eq!(segment.end.x, 51.0);
        }
    }

    #[test]
    fn test_defaults() {
        let scheduler = AnimationScheduler::new();
        let loader = ProgressLoader::new(scheduler.handle(), ProgressLoaderConfig::default());

        assert!(loader.is_two_way());
        assert_eq!(loader.stroke_width(), 3.0);
        assert_eq!(loader.progress(), 0.0);
        assert_eq!(loader.progress_color(), Color::DARK_GRAY);
        assert_eq!(loader.background_color(), Color::LIGHT_GRAY);
        assert_eq!(loader.duration_ms(), 1000);
        assert_eq!(loader.stroke_cap(), LineCap::Round);
        assert!(!loader.needs_redraw());
    }

    #[test]
    fn test_measure_insets_bounds() {
        let scheduler = AnimationScheduler::new();
        let mut loader =
            ProgressLoader::new(scheduler.handle(), ProgressLoaderConfig::new().stroke_width(4.0));

        let size = loader.measure(Size::new(300.0, 10.0));
        assert_eq!(size, Size::new(300.0, 10.0));
        assert_eq!(loader.size(), size);
        assert_eq!(loader.bounds(), Rect::from_ltrb(2.0, 2.0, 298.0, 8.0));
    }

    #[test]
    fn test_set_stroke_width_flags_layout() {
        let scheduler = AnimationScheduler::new();
        let mut loader = loader(&scheduler, ProgressLoaderConfig::default());

        loader.set_stroke_width(5.0);
        assert_eq!(loader.stroke_width(), 5.0);
        assert!(loader.take_needs_layout());
        assert!(loader.take_needs_redraw());
        assert!(!loader.take_needs_layout());

        let mut ctx = PaintContext::new(200.0, 6.0);
        loader.draw(&mut ctx);
        for command in ctx.commands() {
            let (_, _, stroke, _) = command.as_line().unwrap();
            assert_eq!(stroke.width, 5.0);
        }
    }

    #[test]
    fn test_set_stroke_cap_flags_nothing() {
        let scheduler = AnimationScheduler::new();
        let mut loader = loader(&scheduler, ProgressLoaderConfig::default());

        loader.set_stroke_cap(LineCap::Square);
        assert_eq!(loader.stroke_cap(), LineCap::Square);
        assert!(!loader.take_needs_redraw());
        assert!(!loader.take_needs_layout());

        let mut ctx = PaintContext::new(200.0, 6.0);
        loader.draw(&mut ctx);
        let caps: Vec<LineCap> = ctx
            .commands()
            .iter()
            .filter_map(|command| command.as_line().map(|(_, _, stroke, _)| stroke.cap))
            .collect();
        // Background paint keeps its default cap
        assert_eq!(caps, vec![LineCap::Butt, LineCap::Square, LineCap::Square]);
    }

    #[test]
    fn test_set_duration_floor() {
        let scheduler = AnimationScheduler::new();
        let mut loader = loader(&scheduler, ProgressLoaderConfig::default());

        loader.set_duration(500);
        assert_eq!(loader.duration_ms(), 1000);
        loader.set_duration(2000);
        assert_eq!(loader.duration_ms(), 2000);
    }

    #[test]
    fn test_set_color_fades_foreground() {
        let scheduler = AnimationScheduler::new();
        let mut loader = loader(
            &scheduler,
            ProgressLoaderConfig::new().background_color(Color::BLACK),
        );

        loader.set_color(0xFF33_6699u32);
        assert_eq!(loader.background_color(), Color::LIGHT_GRAY);
        // round(255 * 0.4) = 102
        assert_eq!(loader.progress_color().to_argb(), 0x6633_6699);
        assert!(loader.take_needs_redraw());
        assert!(loader.take_needs_layout());

        loader.set_color(0x8000_0000u32);
        // round(128 * 0.4) = round(51.2) = 51
        assert_eq!(loader.progress_color().alpha8(), 51);
    }

    #[test]
    fn test_set_colors_verbatim() {
        let scheduler = AnimationScheduler::new();
        let mut loader = loader(&scheduler, ProgressLoaderConfig::default());

        loader.set_colors(Color::RED, Color::BLUE);
        assert_eq!(loader.progress_color(), Color::RED);
        assert_eq!(loader.background_color(), Color::BLUE);
        assert!(loader.take_needs_layout());

        let mut ctx = PaintContext::new(200.0, 6.0);
        loader.draw(&mut ctx);
        let colors: Vec<Color> = ctx
            .commands()
            .iter()
            .filter_map(|command| command.as_line().map(|(_, _, _, color)| color))
            .collect();
        assert_eq!(colors, vec![Color::BLUE, Color::RED, Color::RED]);
    }

    #[test]
    fn test_set_progress_is_not_clamped() {
        let scheduler = AnimationScheduler::new();
        let mut loader = loader(&scheduler, ProgressLoaderConfig::default());

        loader.set_progress(250.0);
        assert_eq!(loader.progress(), 250.0);
        assert!(loader.take_needs_redraw());
        assert!(!loader.take_needs_layout());

        loader.set_progress(-10.0);
        assert_eq!(loader.progress(), -10.0);
    }

    #[test]
    fn test_draw_one_way() {
        let scheduler = AnimationScheduler::new();
        let mut loader = loader(&scheduler, ProgressLoaderConfig::new().two_way(false));
        loader.set_progress(40.0);

        let mut ctx = PaintContext::new(200.0, 6.0);
        loader.draw(&mut ctx);
        assert_eq!(
            ctx.lines(),
            vec![
                (Point::new(0.0, 0.0), Point::new(200.0, 0.0)),
                (Point::new(0.0, 0.0), Point::new(80.0, 0.0)),
            ]
        );
    }

    #[test]
    fn test_draw_two_way() {
        let scheduler = AnimationScheduler::new();
        let mut loader = loader(&scheduler, ProgressLoaderConfig::default());
        loader.set_progress(50.0);

        let mut ctx = PaintContext::new(200.0, 6.0);
        loader.draw(&mut ctx);
        assert_eq!(
            ctx.lines(),
            vec![
                (Point::new(0.0, 0.0), Point::new(200.0, 0.0)),
                (Point::new(100.0, 0.0), Point::new(150.0, 0.0)),
                (Point::new(100.0, 0.0), Point::new(50.0, 0.0)),
            ]
        );

        loader.set_two_way(false);
        assert!(loader.take_needs_redraw());
        assert_eq!(end_xs(&loader.geometry()), vec![100.0]);
    }

    #[test]
    fn test_animate_to_caps_target() {
        let scheduler = AnimationScheduler::new();
        let mut loader = loader(&scheduler, ProgressLoaderConfig::default());

        loader.animate_to(150.0, RepeatCount::NONE, None);
        scheduler.tick_by(1000.0);
        assert_eq!(loader.progress(), 100.0);
    }

    #[test]
    fn test_animate_to_negative_target_is_kept() {
        let scheduler = AnimationScheduler::new();
        let mut loader = loader(&scheduler, ProgressLoaderConfig::default());

        loader.animate_to(-20.0, RepeatCount::NONE, None);
        scheduler.tick_by(1000.0);
        assert_eq!(loader.progress(), -20.0);
    }

    #[test]
    fn test_animate_to_decelerates() {
        let scheduler = AnimationScheduler::new();
        let mut loader = loader(&scheduler, ProgressLoaderConfig::default());

        loader.animate_to(100.0, RepeatCount::NONE, None);
        assert!(loader.is_animating());

        // 1 - (1 - 0.5)^2 = 0.75
        scheduler.tick_by(500.0);
        assert!((loader.progress() - 75.0).abs() < 1e-3);
        assert!(loader.take_needs_redraw());
    }

    #[test]
    fn test_animate_to_replaces_previous() {
        let scheduler = AnimationScheduler::new();
        let mut loader = loader(&scheduler, ProgressLoaderConfig::default());

        loader.animate_to(100.0, RepeatCount::Infinite, None);
        scheduler.tick_by(500.0);
        loader.animate_to(0.0, RepeatCount::NONE, None);
        assert_eq!(scheduler.tween_count(), 1);

        scheduler.tick_by(1000.0);
        assert_eq!(loader.progress(), 0.0);
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_reset_stops_animation() {
        let scheduler = AnimationScheduler::new();
        let mut loader = loader(&scheduler, ProgressLoaderConfig::default());

        loader.animate_to(100.0, RepeatCount::Infinite, None);
        scheduler.tick_by(300.0);
        loader.reset();

        assert_eq!(loader.progress(), 0.0);
        assert!(!loader.is_animating());
        assert_eq!(scheduler.tween_count(), 0);

        scheduler.tick_by(300.0);
        assert_eq!(loader.progress(), 0.0);
    }

    #[test]
    fn test_update_folds_ticks_and_drops_finished() {
        let scheduler = AnimationScheduler::new();
        let mut loader = loader(&scheduler, ProgressLoaderConfig::default());

        loader.animate_to(100.0, RepeatCount::NONE, None);
        assert!(loader.take_needs_redraw());
        assert!(!loader.update());

        scheduler.tick_by(1000.0);
        assert!(loader.update());
        assert_eq!(scheduler.tween_count(), 0);
        assert!(loader.take_needs_redraw());
        assert!(!loader.update());
    }

    #[test]
    fn test_animation_survives_dead_scheduler() {
        let mut loader = {
            let scheduler = AnimationScheduler::new();
            ProgressLoader::new(scheduler.handle(), ProgressLoaderConfig::default())
        };

        loader.animate_to(100.0, RepeatCount::NONE, None);
        assert!(!loader.is_animating());
        assert_eq!(loader.progress(), 0.0);
    }
}
