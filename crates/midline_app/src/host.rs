//! Loading screen host
//!
//! Owns the animation scheduler and a single progress loader, and shows the
//! loader while some work is in flight.

use std::sync::Arc;

use midline_widgets::prelude::*;
use midline_widgets::progress_loader::MAX_PROGRESS;
use tracing::debug;

/// A screen that shows a progress loader during loading
pub struct HostScreen {
    scheduler: AnimationScheduler,
    loader: ProgressLoader,
    repeat: RepeatCount,
    listener: Option<Arc<dyn ProgressBarListener>>,
    visible: bool,
}

impl HostScreen {
    pub fn new(config: ProgressLoaderConfig) -> Self {
        let scheduler = AnimationScheduler::new();
        let loader = ProgressLoader::new(scheduler.handle(), config);
        Self {
            scheduler,
            loader,
            repeat: RepeatCount::Infinite,
            listener: None,
            visible: false,
        }
    }

    /// Repeat count for the loading animation (infinite by default)
    pub fn with_repeat(mut self, repeat: RepeatCount) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn with_listener(mut self, listener: Arc<dyn ProgressBarListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Size the loader to the available area
    pub fn layout(&mut self, size: Size) {
        self.loader.measure(size);
        self.loader.take_needs_layout();
    }

    /// Show the loader and start the fill animation from zero
    pub fn load(&mut self) {
        debug!("loading screen shown");
        self.visible = true;
        self.loader.set_progress(0.0);
        self.loader.animate_to(MAX_PROGRESS, self.repeat, self.listener.clone());
    }

    /// Stop the animation and hide the loader
    pub fn finish(&mut self) {
        self.loader.reset();
        self.visible = false;
        debug!("loading screen hidden");
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn loader(&self) -> &ProgressLoader {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut ProgressLoader {
        &mut self.loader
    }

    /// Advance animations by the wall-clock time since the last advance
    ///
    /// Returns true if a redraw is due.
    pub fn advance(&mut self) -> bool {
        self.scheduler.tick();
        self.after_tick()
    }

    /// Advance animations by exactly `dt_ms`; returns true if a redraw is due
    pub fn advance_by(&mut self, dt_ms: f32) -> bool {
        self.scheduler.tick_by(dt_ms);
        self.after_tick()
    }

    fn after_tick(&mut self) -> bool {
        self.scheduler.take_needs_redraw();
        if self.loader.take_needs_layout() {
            let size = self.loader.size();
            self.loader.measure(size);
        }
        self.loader.update()
    }

    /// Draw the loader if it is visible and clear its redraw request
    pub fn render(&mut self, ctx: &mut dyn DrawContext) {
        if self.is_visible() {
            self.loader.draw(ctx);
        }
        self.loader.take_needs_redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::{TerminalCanvas, PIXELS_PER_COLUMN};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn host(config: ProgressLoaderConfig, columns: usize) -> HostScreen {
        let mut host = HostScreen::new(config);
        host.layout(Size::new(columns as f32 * PIXELS_PER_COLUMN, 3.0));
        host
    }

    #[test]
    fn test_load_starts_infinite_fill() {
        let mut host = host(ProgressLoaderConfig::default(), 10);
        host.loader_mut().set_progress(60.0);

        host.load();
        assert!(host.is_visible());
        assert_eq!(host.loader().progress(), 0.0);
        assert!(host.loader().is_animating());

        assert!(host.advance_by(1000.0));
        assert_eq!(host.loader().progress(), 100.0);
        // Infinite: still running after a full cycle
        host.advance_by(100.0);
        assert!(host.loader().is_animating());
    }

    #[test]
    fn test_advance_uses_elapsed_time() {
        let mut host = host(ProgressLoaderConfig::new().duration_ms(10_000), 10);
        host.load();

        std::thread::sleep(std::time::Duration::from_millis(60));
        assert!(host.advance());
        // Decelerated 10s fill: 60ms of real time moves progress past 1%
        assert!(host.loader().progress() > 1.0);
    }

    #[test]
    fn test_finish_resets_and_hides() {
        let mut host = host(ProgressLoaderConfig::default(), 10);
        host.load();
        host.advance_by(500.0);

        host.finish();
        assert!(!host.is_visible());
        assert_eq!(host.loader().progress(), 0.0);

        host.advance_by(500.0);
        assert_eq!(host.loader().progress(), 0.0);

        let mut canvas = TerminalCanvas::new(10);
        host.render(&mut canvas);
        assert_eq!(canvas.render(), "          ");
    }

    #[test]
    fn test_render_two_way_half_loaded() {
        let mut host = host(ProgressLoaderConfig::default(), 10);
        host.load();
        host.loader_mut().set_progress(40.0);

        let mut canvas = TerminalCanvas::new(10);
        host.render(&mut canvas);
        // 80px wide: foreground spans 24..56px, i.e. columns 3..7
        assert_eq!(canvas.render(), "░░░████░░░");
    }

    #[test]
    fn test_finite_repeat_reports_completion() {
        let completes = Arc::new(AtomicU32::new(0));
        let listener = {
            let completes = completes.clone();
            ProgressCallbacks::new().on_complete(move || {
                completes.fetch_add(1, Ordering::SeqCst);
            })
        };

        let mut host = host(ProgressLoaderConfig::new().two_way(false), 10)
            .with_repeat(RepeatCount::Finite(1))
            .with_listener(Arc::new(listener));
        host.load();

        for _ in 0..30 {
            host.advance_by(100.0);
        }
        assert_eq!(completes.load(Ordering::SeqCst), 1);

        let mut canvas = TerminalCanvas::new(10);
        host.render(&mut canvas);
        assert_eq!(canvas.render(), "██████████");
    }
}
