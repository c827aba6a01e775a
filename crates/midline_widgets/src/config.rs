//! Progress loader configuration
//!
//! The attribute bag a loader is constructed from. Every option has a
//! default, so an empty TOML document is a valid configuration:
//!
//! ```toml
//! two-way-loader = false
//! stroke-width = 4.0
//! progress = 10.0
//! progressbar-color = "#FF336699"
//! progress-bg-color = 0xFFCCCCCC
//! progress-duration = 1500
//! stroke-cap = 2            # 0 = butt, 1 = round, 2 = square
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use midline_core::{Color, LineCap};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Shortest allowed animation duration
pub const DEFAULT_DURATION_MS: u32 = 1000;

pub const DEFAULT_STROKE_WIDTH: f32 = 3.0;

/// Raise durations below [`DEFAULT_DURATION_MS`] to the floor
pub fn clamp_duration(duration_ms: u32) -> u32 {
    duration_ms.max(DEFAULT_DURATION_MS)
}

/// Map the attribute index to a cap; unknown indices fall back to round
pub fn stroke_cap_from_index(index: i64) -> LineCap {
    match index {
        0 => LineCap::Butt,
        1 => LineCap::Round,
        2 => LineCap::Square,
        _ => LineCap::Round,
    }
}

/// Errors loading a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Syntax error, wrong type, bad color, or unknown key
    #[error("invalid progress loader configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Progress loader configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProgressLoaderConfig {
    /// Fill outward from the center instead of left-to-right
    #[serde(rename = "two-way-loader")]
    pub two_way: bool,
    pub stroke_width: f32,
    /// Initial progress (not clamped)
    pub progress: f32,
    #[serde(rename = "progressbar-color", deserialize_with = "deserialize_color")]
    pub progress_color: Color,
    #[serde(rename = "progress-bg-color", deserialize_with = "deserialize_color")]
    pub background_color: Color,
    /// Animation duration, never below [`DEFAULT_DURATION_MS`]
    #[serde(rename = "progress-duration", deserialize_with = "deserialize_duration")]
    pub duration_ms: u32,
    #[serde(deserialize_with = "deserialize_stroke_cap")]
    pub stroke_cap: LineCap,
}

impl Default for ProgressLoaderConfig {
    fn default() -> Self {
        Self {
            two_way: true,
            stroke_width: DEFAULT_STROKE_WIDTH,
            progress: 0.0,
            progress_color: Color::DARK_GRAY,
            background_color: Color::LIGHT_GRAY,
            duration_ms: DEFAULT_DURATION_MS,
            stroke_cap: LineCap::Round,
        }
    }
}

impl ProgressLoaderConfig {
    /// Create a config with every option at its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn two_way(mut self, two_way: bool) -> Self {
        self.two_way = two_way;
        self
    }

    pub fn stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn progress(mut self, progress: f32) -> Self {
        self.progress = progress;
        self
    }

    pub fn progress_color(mut self, color: impl Into<Color>) -> Self {
        self.progress_color = color.into();
        self
    }

    pub fn background_color(mut self, color: impl Into<Color>) -> Self {
        self.background_color = color.into();
        self
    }

    /// Set the duration; values below the floor are raised to it
    pub fn duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = clamp_duration(duration_ms);
        self
    }

    pub fn stroke_cap(mut self, cap: LineCap) -> Self {
        self.stroke_cap = cap;
        self
    }
}

// =============================================================================
// Field deserializers
// =============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorValue {
    Argb(i64),
    Hex(String),
}

/// Accepts `0xAARRGGBB` integers (signed 32-bit values included) or hex strings
fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    match ColorValue::deserialize(deserializer)? {
        ColorValue::Argb(value) => {
            if (i32::MIN as i64..=u32::MAX as i64).contains(&value) {
                Ok(Color::from_argb(value as u32))
            } else {
                Err(D::Error::custom(format!(
                    "color {value} does not fit in 32 bits"
                )))
            }
        }
        ColorValue::Hex(text) => text.parse().map_err(D::Error::custom),
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    let value = u32::try_from(value.max(0)).unwrap_or(u32::MAX);
    Ok(clamp_duration(value))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StrokeCapValue {
    Index(i64),
    Name(String),
}

fn deserialize_stroke_cap<'de, D>(deserializer: D) -> Result<LineCap, D::Error>
where
    D: Deserializer<'de>,
{
    match StrokeCapValue::deserialize(deserializer)? {
        StrokeCapValue::Index(index) => Ok(stroke_cap_from_index(index)),
        StrokeCapValue::Name(name) => match name.to_ascii_lowercase().as_str() {
            "butt" => Ok(LineCap::Butt),
            "round" => Ok(LineCap::Round),
            "square" => Ok(LineCap::Square),
            _ => Err(D::Error::custom(format!("unknown stroke cap `{name}`"))),
        },
    }
}
