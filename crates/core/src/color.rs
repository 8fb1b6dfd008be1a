//! Color types for the drift particle system.
//!
//! Particles pick a fixed hue at spawn time, so colors are generated in HSL
//! and converted once to sRGB for blending onto the surface. [`Srgb`]
//! serializes as a `"#rrggbb"` hex string so style configuration stays
//! human-editable.

use serde::{Deserialize, Serialize};

use crate::error::DriftError;

/// A color in sRGB space, components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// A color in HSL space: hue in degrees (wrapped mod 360), saturation and
/// lightness in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Srgb {
    /// Parses a `"#rrggbb"` or `"rrggbb"` hex string (case insensitive).
    ///
    /// Returns `DriftError::InvalidColor` for any other shape.
    pub fn from_hex(hex: &str) -> Result<Srgb, DriftError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 {
            return Err(DriftError::InvalidColor(hex.to_string()));
        }
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|_| DriftError::InvalidColor(hex.to_string()))
        };
        Ok(Srgb {
            r: parse(0..2)?,
            g: parse(2..4)?,
            b: parse(4..6)?,
        })
    }

    /// Formats as a lowercase `"#rrggbb"` hex string.
    ///
    /// Components are clamped to [0, 1] before quantization.
    pub fn to_hex(self) -> String {
        let quantize = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            quantize(self.r),
            quantize(self.g),
            quantize(self.b)
        )
    }
}

impl Serialize for Srgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl Hsl {
    /// Creates an HSL color. Hue is wrapped into [0, 360); saturation and
    /// lightness are clamped to [0, 1].
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s: s.clamp(0.0, 1.0),
            l: l.clamp(0.0, 1.0),
        }
    }

    /// Converts to sRGB.
    pub fn to_srgb(self) -> Srgb {
        hsl_to_srgb(self)
    }
}

/// Converts an HSL color to sRGB using the standard piecewise formula.
pub fn hsl_to_srgb(c: Hsl) -> Srgb {
    let h = c.h.rem_euclid(360.0);
    let s = c.s.clamp(0.0, 1.0);
    let l = c.l.clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h / 60.0;
    let x = chroma * (1.0 - (hp % 2.0 - 1.0).abs());

    let (r1, g1, b1) = match hp {
        hp if hp < 1.0 => (chroma, x, 0.0),
        hp if hp < 2.0 => (x, chroma, 0.0),
        hp if hp < 3.0 => (0.0, chroma, x),
        hp if hp < 4.0 => (0.0, x, chroma),
        hp if hp < 5.0 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let m = l - chroma / 2.0;
    Srgb {
        r: r1 + m,
        g: g1 + m,
        b: b1 + m,
    }
}
