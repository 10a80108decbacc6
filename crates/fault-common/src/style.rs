//! Color scales for mapping cell values to fill colors.
//!
//! Stops are placed on a normalized `0.0..=1.0` axis; the scale's value
//! range is set separately so one palette can be stretched over any data.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{FaultError, FaultResult};

/// An RGBA color, serialized as `#rrggbb` (or `#rrggbbaa` when translucent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(s: &str) -> FaultResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        let channel = |i: usize, width: usize| -> FaultResult<u8> {
            let digits = hex
                .get(i * width..(i + 1) * width)
                .ok_or_else(|| FaultError::InvalidColorScale(format!("bad color '{}'", s)))?;
            let value = u8::from_str_radix(digits, 16)
                .map_err(|_| FaultError::InvalidColorScale(format!("bad color '{}'", s)))?;
            Ok(if width == 1 { value * 17 } else { value })
        };
        match hex.len() {
            3 => Ok(Self::rgb(channel(0, 1)?, channel(1, 1)?, channel(2, 1)?)),
            6 => Ok(Self::rgb(channel(0, 2)?, channel(1, 2)?, channel(2, 2)?)),
            8 => Ok(Self {
                r: channel(0, 2)?,
                g: channel(1, 2)?,
                b: channel(2, 2)?,
                a: channel(3, 2)?,
            }),
            _ => Err(FaultError::InvalidColorScale(format!("bad color '{}'", s))),
        }
    }

    /// Lowercase hex string.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Linear interpolation between two colors, `t` in `0.0..=1.0`.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = FaultError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// A color anchored at a normalized position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Position on the normalized axis (0.0 = vmin, 1.0 = vmax)
    pub value: f64,
    pub color: Color,
}

impl ColorStop {
    pub fn new(value: f64, color: Color) -> Self {
        Self { value, color }
    }
}

/// Continuous color scale with linear interpolation between stops.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    stops: Vec<ColorStop>,
    vmin: f64,
    vmax: f64,
}

impl ColorScale {
    /// Create a scale over `0.0..=1.0` from ascending stops.
    pub fn new(stops: Vec<ColorStop>) -> FaultResult<Self> {
        if stops.len() < 2 {
            return Err(FaultError::InvalidColorScale(
                "color scale must have at least 2 stops".to_string(),
            ));
        }
        if stops.windows(2).any(|w| w[1].value < w[0].value) {
            return Err(FaultError::InvalidColorScale(
                "color stops must be in ascending order".to_string(),
            ));
        }
        Ok(Self {
            stops,
            vmin: 0.0,
            vmax: 1.0,
        })
    }

    /// Stretch the scale over `vmin..=vmax`.
    pub fn with_range(mut self, vmin: f64, vmax: f64) -> Self {
        self.vmin = vmin;
        self.vmax = vmax;
        self
    }

    pub fn range(&self) -> (f64, f64) {
        (self.vmin, self.vmax)
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Color for a data value; values outside the range clamp to the end stops.
    pub fn color_for(&self, value: f64) -> Color {
        let span = self.vmax - self.vmin;
        let t = if span > 0.0 && value.is_finite() {
            ((value - self.vmin) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let first = self.stops[0];
        if t <= first.value {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if t <= hi.value {
                let width = hi.value - lo.value;
                if width <= 0.0 {
                    return hi.color;
                }
                return lo.color.lerp(hi.color, (t - lo.value) / width);
            }
        }
        self.stops[self.stops.len() - 1].color
    }
}
