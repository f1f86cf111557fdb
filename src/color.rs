//! Hex color parsing.
//!
//! Colors are written the way diagram authors type them: `#rgb`, `#rgba`,
//! `#rrggbb` or `#rrggbbaa`. Channels are normalized into `[0, 1]`.

use std::fmt;
use std::str::FromStr;

use crate::errors::ColorError;

/// Convert a hex code like `#fff` into channel values like `[1, 1, 1]`.
///
/// An empty string yields an empty vector, which callers treat as "leave the
/// current color alone".
pub fn parse_hex_color(hexcode: &str) -> Result<Vec<f64>, ColorError> {
    if hexcode.is_empty() {
        return Ok(Vec::new());
    }
    let Some(digits) = hexcode.strip_prefix('#') else {
        return Err(ColorError::InvalidFormat {
            input: hexcode.to_string(),
        });
    };

    // Count chars, not bytes, so multi-byte garbage reports a sensible length
    let len = digits.chars().count();
    let (take, limit) = match len {
        3 | 4 => (1, 15.0),
        6 | 8 => (2, 255.0),
        _ => {
            return Err(ColorError::InvalidLength {
                input: hexcode.to_string(),
                len,
            });
        }
    };

    // from_str_radix tolerates a leading sign, so check the digits up front
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidDigits {
            input: hexcode.to_string(),
        });
    }

    digits
        .as_bytes()
        .chunks(take)
        .map(|chunk| {
            std::str::from_utf8(chunk)
                .ok()
                .and_then(|code| u8::from_str_radix(code, 16).ok())
                .map(|value| f64::from(value) / limit)
                .ok_or_else(|| ColorError::InvalidDigits {
                    input: hexcode.to_string(),
                })
        })
        .collect()
}

/// A normalized paint color, channels in `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    Rgb { r: f64, g: f64, b: f64 },
    Rgba { r: f64, g: f64, b: f64, a: f64 },
}

impl Color {
    pub const BLACK: Color = Color::Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Parse a hex color; `Ok(None)` for the empty string.
    pub fn parse(hexcode: &str) -> Result<Option<Color>, ColorError> {
        let channels = parse_hex_color(hexcode)?;
        if channels.is_empty() {
            return Ok(None);
        }
        Color::from_channels(&channels).map(Some)
    }

    /// Build a color from 3 (opaque) or 4 (with alpha) channel values.
    pub fn from_channels(channels: &[f64]) -> Result<Color, ColorError> {
        match *channels {
            [r, g, b] => Ok(Color::Rgb { r, g, b }),
            [r, g, b, a] => Ok(Color::Rgba { r, g, b, a }),
            _ => Err(ColorError::InvalidChannelCount {
                count: channels.len(),
            }),
        }
    }

    /// Alpha channel, 1.0 for opaque colors
    pub fn alpha(&self) -> f64 {
        match *self {
            Color::Rgb { .. } => 1.0,
            Color::Rgba { a, .. } => a,
        }
    }

    /// `rgb(R,G,B)` with 0..=255 integer channels, as used in SVG paint attributes
    pub fn to_rgb_string(&self) -> String {
        let (r, g, b) = match *self {
            Color::Rgb { r, g, b } | Color::Rgba { r, g, b, .. } => (r, g, b),
        };
        format!("rgb({},{},{})", to_byte(r), to_byte(g), to_byte(b))
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)?.ok_or(ColorError::InvalidFormat {
            input: s.to_string(),
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Rgb { r, g, b } => {
                write!(f, "#{:02x}{:02x}{:02x}", to_byte(r), to_byte(g), to_byte(b))
            }
            Color::Rgba { r, g, b, a } => write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                to_byte(r),
                to_byte(g),
                to_byte(b),
                to_byte(a)
            ),
        }
    }
}

fn to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}
