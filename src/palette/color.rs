//! RGBA color value and string parsing
//!
//! Accepts the formats wallust and hand-edited sidecars produce:
//! `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(r,g,b)`, `rgba(r,g,b,a)`
//! and CSS named colors.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use super::named;

/// Regex for hex color: #RGB, #RGBA, #RRGGBB, or #RRGGBBAA.
static HEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .expect("hex color regex is valid")
});

/// Regex for rgb()/rgba() with an optional float or int alpha.
static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*([0-9]*\.?[0-9]+)\s*)?\)$",
    )
    .expect("rgb color regex is valid")
});

/// Error returned when a string is not a recognized color
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("empty color value")]
    Empty,

    #[error("invalid hex color: {0}")]
    InvalidHex(String),

    #[error("invalid rgb color: {0}")]
    InvalidRgb(String),

    #[error("unrecognized color: {0}")]
    Unrecognized(String),
}

/// A color with 8-bit red, green, blue and alpha channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse any supported color notation.
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorError::Empty);
        }

        if s.starts_with('#') {
            return parse_hex(s).ok_or_else(|| ColorError::InvalidHex(s.to_string()));
        }

        let lower = s.to_ascii_lowercase();
        if lower.starts_with("rgb") {
            return parse_rgb(&lower).ok_or_else(|| ColorError::InvalidRgb(s.to_string()));
        }

        named::lookup(&lower).ok_or_else(|| ColorError::Unrecognized(s.to_string()))
    }

    /// Lowercase `#rrggbb`, alpha dropped.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Lowercase `#rrggbbaa`.
    pub fn to_hexa(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }

    /// Same color with alpha set from a 0.0-1.0 fraction.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Raise HSL lightness by `ratio` of its current value.
    pub fn lighten(self, ratio: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        Self::from_hsl(h, s, (l + l * ratio).clamp(0.0, 1.0), self.a)
    }

    /// Lower HSL lightness by `ratio` of its current value.
    pub fn darken(self, ratio: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        Self::from_hsl(h, s, (l - l * ratio).clamp(0.0, 1.0), self.a)
    }

    /// Linear blend towards `other`; `weight` 0.0 keeps self, 1.0 yields other.
    pub fn mix(self, other: Color, weight: f32) -> Self {
        let w = weight.clamp(0.0, 1.0);
        let blend = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * w).round() as u8;
        Self {
            r: blend(self.r, other.r),
            g: blend(self.g, other.g),
            b: blend(self.b, other.b),
            a: blend(self.a, other.a),
        }
    }

    /// Relative luminance per WCAG (0.0 black .. 1.0 white)
    pub fn luminance(&self) -> f32 {
        let channel = |c: u8| {
            let c = c as f32 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }

    pub fn is_dark(&self) -> bool {
        self.luminance() < 0.5
    }

    fn to_hsl(self) -> (f32, f32, f32) {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let delta = max - min;

        if delta == 0.0 {
            return (0.0, 0.0, l);
        }

        let s = if l > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };

        let h = if max == r {
            ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        (h * 60.0, s, l)
    }

    fn from_hsl(h: f32, s: f32, l: f32, a: u8) -> Self {
        if s == 0.0 {
            let v = (l * 255.0).round() as u8;
            return Self::rgba(v, v, v, a);
        }

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let hp = h / 60.0;
        let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
        let (r1, g1, b1) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let to_u8 = |v: f32| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;

        Self::rgba(to_u8(r1), to_u8(g1), to_u8(b1), a)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            f.write_str(&self.to_hex())
        } else {
            f.write_str(&self.to_hexa())
        }
    }
}

fn parse_hex(s: &str) -> Option<Color> {
    if !HEX_RE.is_match(s) {
        return None;
    }
    let hex = &s[1..];
    let short = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17).ok();
    let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Color::rgb(short(0)?, short(1)?, short(2)?)),
        4 => Some(Color::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
        6 => Some(Color::rgb(long(0)?, long(2)?, long(4)?)),
        8 => Some(Color::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
        _ => None,
    }
}

/// Alpha is read as a 0.0-1.0 fraction when it has a decimal point,
/// otherwise as 0-255.
fn parse_rgb(s: &str) -> Option<Color> {
    let caps = RGB_RE.captures(s)?;
    let r: u8 = caps[1].parse().ok()?;
    let g: u8 = caps[2].parse().ok()?;
    let b: u8 = caps[3].parse().ok()?;

    let a = match caps.get(4).map(|m| m.as_str()) {
        None => 255,
        Some(a) if a.contains('.') => {
            let a: f32 = a.parse().ok()?;
            if !(0.0..=1.0).contains(&a) {
                return None;
            }
            (a * 255.0).round() as u8
        }
        Some(a) => a.parse().ok()?,
    };

    Some(Color::rgba(r, g, b, a))
}
