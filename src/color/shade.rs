use std::fmt;

use crate::foundation::error::{SilhouetteError, SilhouetteResult};

/// Default darkening factor for [`skin_shade`].
pub const SHADE_FACTOR: f64 = 0.85;
/// Default lightening factor for [`skin_highlight`].
pub const HIGHLIGHT_FACTOR: f64 = 1.15;

/// Opaque 8-bit sRGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional). Any other length or a non-hex
    /// digit is a [`SilhouetteError::Color`].
    pub fn parse_hex(s: &str) -> SilhouetteResult<Self> {
        let digits = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(SilhouetteError::color(format!(
                "expected #RRGGBB, got '{s}'"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|e| SilhouetteError::color(format!("bad channel in '{s}': {e}")))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Multiply each channel by `factor`, clamp to `0..=255` and floor. NaN yields 0.
    pub fn scaled(self, factor: f64) -> Self {
        fn scale(c: u8, factor: f64) -> u8 {
            let v = f64::from(c) * factor;
            if v.is_nan() {
                return 0;
            }
            v.clamp(0.0, 255.0).floor() as u8
        }

        Self {
            r: scale(self.r, factor),
            g: scale(self.g, factor),
            b: scale(self.b, factor),
        }
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// CSS functional notation, `rgb(r, g, b)`.
    pub fn to_css_rgb(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Rgb8 {
    type Err = SilhouetteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

/// Darkened variant of `base_hex` as `rgb(r, g, b)`.
///
/// `factor` defaults to [`SHADE_FACTOR`] when `None`.
pub fn skin_shade(base_hex: &str, factor: Option<f64>) -> SilhouetteResult<String> {
    let base = Rgb8::parse_hex(base_hex)?;
    Ok(base.scaled(factor.unwrap_or(SHADE_FACTOR)).to_css_rgb())
}

/// Lightened variant of `base_hex` as `rgb(r, g, b)`, each channel capped at 255.
///
/// `factor` defaults to [`HIGHLIGHT_FACTOR`] when `None`.
pub fn skin_highlight(base_hex: &str, factor: Option<f64>) -> SilhouetteResult<String> {
    let base = Rgb8::parse_hex(base_hex)?;
    Ok(base.scaled(factor.unwrap_or(HIGHLIGHT_FACTOR)).to_css_rgb())
}

/// A base colour with its derived shade and highlight.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ColorPair {
    /// Normalized `#RRGGBB`.
    pub base: String,
    pub shade: String,
    pub highlight: String,
}

impl ColorPair {
    pub fn from_hex(base_hex: &str) -> SilhouetteResult<Self> {
        let base = Rgb8::parse_hex(base_hex)?;
        Ok(Self::from_rgb(base))
    }

    pub fn from_rgb(base: Rgb8) -> Self {
        Self {
            base: base.to_hex(),
            shade: base.scaled(SHADE_FACTOR).to_css_rgb(),
            highlight: base.scaled(HIGHLIGHT_FACTOR).to_css_rgb(),
        }
    }

    /// Like [`ColorPair::from_hex`], falling back to `fallback_hex` when `base_hex` is
    /// malformed. `fallback_hex` must be a well-formed constant.
    pub fn from_hex_or(base_hex: &str, fallback_hex: &'static str) -> Self {
        match Self::from_hex(base_hex) {
            Ok(pair) => pair,
            Err(err) => {
                tracing::warn!(%err, fallback = fallback_hex, "malformed colour replaced");
                Self::from_hex(fallback_hex).unwrap_or_else(|_| Self::from_rgb(Rgb8::new(0, 0, 0)))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/shade.rs"]
mod tests;
