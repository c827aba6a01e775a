//! Color type
//!
//! Channels are stored as `f32` in `0.0..=1.0`. Packed `0xAARRGGBB` values
//! convert losslessly through [`Color::from_argb`] and [`Color::to_argb`].

use std::str::FromStr;

use thiserror::Error;

/// Error returned when a color string cannot be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// The string did not start with `#`
    #[error("color `{0}` must start with '#'")]
    MissingHash(String),

    /// Only `#RRGGBB` and `#AARRGGBB` are accepted
    #[error("color `{0}` must have 6 or 8 hex digits")]
    InvalidLength(String),

    /// A non-hex digit was found
    #[error("color `{0}` contains a non-hex digit")]
    InvalidDigit(String),
}

/// RGBA color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const GRAY: Color = Color::rgb(136.0 / 255.0, 136.0 / 255.0, 136.0 / 255.0);
    /// `0xFF444444`
    pub const DARK_GRAY: Color = Color::rgb(68.0 / 255.0, 68.0 / 255.0, 68.0 / 255.0);
    /// `0xFFCCCCCC`
    pub const LIGHT_GRAY: Color = Color::rgb(204.0 / 255.0, 204.0 / 255.0, 204.0 / 255.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from `0xRRGGBB`
    pub fn from_hex(hex: u32) -> Self {
        Self::from_argb(0xFF00_0000 | (hex & 0x00FF_FFFF))
    }

    /// Color from packed `0xAARRGGBB`
    pub fn from_argb(argb: u32) -> Self {
        Self::from_argb8(
            (argb >> 24) as u8,
            (argb >> 16) as u8,
            (argb >> 8) as u8,
            argb as u8,
        )
    }

    /// Color from 8-bit channels
    pub fn from_argb8(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Packed `0xAARRGGBB`
    pub fn to_argb(&self) -> u32 {
        (self.alpha8() as u32) << 24
            | (self.red8() as u32) << 16
            | (self.green8() as u32) << 8
            | self.blue8() as u32
    }

    pub fn alpha8(&self) -> u8 {
        channel_to_u8(self.a)
    }

    pub fn red8(&self) -> u8 {
        channel_to_u8(self.r)
    }

    pub fn green8(&self) -> u8 {
        channel_to_u8(self.g)
    }

    pub fn blue8(&self) -> u8 {
        channel_to_u8(self.b)
    }

    /// Replace the alpha channel with an 8-bit value
    pub fn with_alpha8(mut self, alpha: u8) -> Self {
        self.a = alpha as f32 / 255.0;
        self
    }

    /// Multiply the 8-bit alpha by `factor`, rounding to the nearest step
    pub fn fade(self, factor: f32) -> Self {
        let alpha = (self.alpha8() as f32 * factor).round().clamp(0.0, 255.0) as u8;
        self.with_alpha8(alpha)
    }

    /// Relative luminance, ignoring alpha
    pub fn luminance(&self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }
}

fn channel_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<u32> for Color {
    /// Interpret the value as `0xAARRGGBB`
    fn from(argb: u32) -> Self {
        Color::from_argb(argb)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Parse `#RRGGBB` or `#AARRGGBB`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(s.to_string()));
        }
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorParseError::InvalidLength(s.to_string()));
        }

        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorParseError::InvalidDigit(s.to_string()))?;

        if digits.len() == 6 {
            Ok(Color::from_hex(value))
        } else {
            Ok(Color::from_argb(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_round_trip() {
        let argb = 0x80FF_4020;
        let color = Color::from_argb(argb);
        assert_eq!(color.to_argb(), argb);
        assert_eq!(color.alpha8(), 0x80);
        assert_eq!(color.red8(), 0xFF);
    }

    #[test]
    fn test_gray_constants() {
        assert_eq!(Color::DARK_GRAY.to_argb(), 0xFF44_4444);
        assert_eq!(Color::LIGHT_GRAY.to_argb(), 0xFFCC_CCCC);
    }

    #[test]
    fn test_fade_keeps_rgb() {
        let faded = Color::from_argb(0xFF12_3456).fade(0.4);
        assert_eq!(faded.alpha8(), 102);
        assert_eq!(faded.to_argb() & 0x00FF_FFFF, 0x0012_3456);
    }

    #[test]
    fn test_parse_hex_strings() {
        assert_eq!("#336699".parse::<Color>().unwrap().to_argb(), 0xFF33_6699);
        assert_eq!("#80336699".parse::<Color>().unwrap().to_argb(), 0x8033_6699);
        assert!(matches!(
            "336699".parse::<Color>(),
            Err(ColorParseError::MissingHash(_))
        ));
        assert!(matches!(
            "#3366".parse::<Color>(),
            Err(ColorParseError::InvalidLength(_))
        ));
        assert!(matches!(
            "#33669z".parse::<Color>(),
            Err(ColorParseError::InvalidDigit(_))
        ));
    }
}
