//! Midline CLI
//!
//! Play the progress loader in the terminal.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod host;
mod terminal;

use host::HostScreen;
use midline_animation::RepeatCount;
use midline_core::Size;
use midline_widgets::{ProgressCallbacks, ProgressLoaderConfig};
use terminal::TerminalCanvas;

/// Loader height in pixels; only the top edge is drawn in a terminal
const LOADER_HEIGHT: f32 = 8.0;

#[derive(Parser)]
#[command(name = "midline")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render an animated progress loader in the terminal", long_about = None)]
struct Cli {
    /// Loader configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Width in terminal columns
    #[arg(short, long, default_value = "60")]
    width: usize,

    /// Number of frames to render
    #[arg(short, long, default_value = "120")]
    frames: u32,

    /// Frames per second
    #[arg(long, default_value = "30")]
    fps: u32,

    /// Extra animation cycles (a number, "infinite", or -1)
    #[arg(short, long, default_value = "infinite", allow_negative_numbers = true)]
    repeat: RepeatCount,

    /// Fill left to right instead of from the center
    #[arg(long)]
    one_way: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    if cli.width == 0 {
        anyhow::bail!("--width must be at least 1 column");
    }
    if cli.fps == 0 {
        anyhow::bail!("--fps must be at least 1");
    }

    let config = load_config(cli.config.as_deref())?;
    play(&cli, config)
}

fn load_config(path: Option<&Path>) -> Result<ProgressLoaderConfig> {
    let Some(path) = path else {
        return Ok(ProgressLoaderConfig::default());
    };

    let config = ProgressLoaderConfig::from_file(path)
        .with_context(|| format!("Failed to load loader config from {}", path.display()))?;
    info!("Loaded loader config from {}", path.display());
    Ok(config)
}

fn play(cli: &Cli, config: ProgressLoaderConfig) -> Result<()> {
    let listener = ProgressCallbacks::new()
        .on_start(|| info!("Loading started"))
        .on_complete(|| info!("Loading complete"));

    let mut canvas = TerminalCanvas::new(cli.width);
    let mut host = HostScreen::new(config)
        .with_repeat(cli.repeat)
        .with_listener(Arc::new(listener));
    if cli.one_way {
        host.loader_mut().set_two_way(false);
    }
    host.layout(Size::new(canvas.pixel_width(), LOADER_HEIGHT));

    info!(
        "Rendering {} frames at {} fps across {} columns",
        cli.frames,
        cli.fps,
        canvas.columns()
    );

    let frame_interval = Duration::from_secs_f32(1.0 / cli.fps as f32);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    host.load();
    for frame in 0..cli.frames {
        if frame > 0 && !host.advance() && !host.loader().is_animating() {
            info!("Animation finished after {} frames", frame);
            break;
        }

        canvas.clear();
        host.render(&mut canvas);
        write!(out, "\r{}", canvas.render()).context("Failed to write frame")?;
        out.flush().context("Failed to flush frame")?;

        thread::sleep(frame_interval);
    }
    writeln!(out).context("Failed to write frame")?;

    info!("Final progress: {:.1}", host.loader().progress());
    host.finish();

    Ok(())
}
