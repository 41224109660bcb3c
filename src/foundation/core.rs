use crate::foundation::error::{SilhouetteError, SilhouetteResult};

pub use kurbo::{BezPath, Point, Rect, Vec2};

/// Drawing surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Avatar preview viewBox (`0 0 400 700`).
    pub const AVATAR: Canvas = Canvas {
        width: 400,
        height: 700,
    };

    /// Default body-part composition canvas.
    pub const COMPOSITION: Canvas = Canvas {
        width: 600,
        height: 1000,
    };

    /// Build a canvas, rejecting zero-sized dimensions.
    pub fn new(width: u32, height: u32) -> SilhouetteResult<Self> {
        if width == 0 || height == 0 {
            return Err(SilhouetteError::validation(
                "canvas width/height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Width as `f64` for geometry math.
    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64` for geometry math.
    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }

    /// The canvas as a rectangle anchored at the origin.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width_f64(), self.height_f64())
    }
}

/// Clamp `v` into `[min, max]`, mapping NaN to `min`.
pub(crate) fn clamp_finite(v: f64, min: f64, max: f64) -> f64 {
    if v.is_nan() {
        return min;
    }
    v.clamp(min, max)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
