//! Anatomical layout on an eight-head canon.
//!
//! The canvas height is split into nine units; every landmark is a fixed multiple of one
//! unit. Widths scale with the body-width factor, and shoulders and chest also scale with
//! the muscle factor unless explicit measurements override them.

use crate::body::descriptor::{Gender, ValidatedDescriptor};
use crate::body::factors::DerivedFactors;
use crate::foundation::core::Canvas;

pub const UNITS_PER_HEIGHT: f64 = 9.0;
pub const HEAD_RADIUS: f64 = 0.65;

pub const HEAD_Y: f64 = 0.75;
pub const NECK_Y: f64 = 1.15;
pub const SHOULDERS_Y: f64 = 1.55;
pub const CHEST_Y: f64 = 2.6;
pub const WAIST_Y: f64 = 3.6;
pub const HIPS_Y: f64 = 4.6;
pub const CROTCH_Y: f64 = 5.0;
pub const KNEE_Y: f64 = 6.5;
pub const ANKLE_Y: f64 = 8.1;
pub const FEET_Y: f64 = 8.5;

pub const BASE_WIDTH: f64 = 1.1;
pub const SHOULDER_WIDTH: f64 = 1.65;
pub const CHEST_WIDTH: f64 = 1.4;
pub const HIP_WIDTH_FEMALE: f64 = 1.35;
pub const HIP_WIDTH_DEFAULT: f64 = 1.15;
pub const THIGH_WIDTH: f64 = 0.5;
pub const KNEE_WIDTH: f64 = 0.42;
pub const ANKLE_WIDTH: f64 = 0.32;

/// Scale from "measurement relative to height" to canvas pixels.
const SHOULDER_MEASURE_SCALE: f64 = 2.5;
const WAIST_MEASURE_SCALE: f64 = 2.2;
const HIP_MEASURE_SCALE: f64 = 2.3;

/// Vertical landmarks in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Landmarks {
    pub head: f64,
    pub neck: f64,
    pub shoulders: f64,
    pub chest: f64,
    pub waist: f64,
    pub hips: f64,
    pub crotch: f64,
    pub knee: f64,
    pub ankle: f64,
    pub feet: f64,
}

/// Landmarks and widths for one avatar.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Anatomy {
    pub center_x: f64,
    pub unit: f64,
    pub head_radius: f64,
    pub y: Landmarks,
    pub base_width: f64,
    pub shoulder_width: f64,
    pub chest_width: f64,
    pub waist_width: f64,
    pub hip_width: f64,
    pub thigh_width: f64,
    pub knee_width: f64,
    pub ankle_width: f64,
}

impl Anatomy {
    pub fn new(canvas: Canvas, d: &ValidatedDescriptor, factors: &DerivedFactors) -> Self {
        let w = canvas.width_f64();
        let unit = canvas.height_f64() / UNITS_PER_HEIGHT;
        let base = unit * BASE_WIDTH * factors.body_width_factor;

        // Measurements are validated positive, and height is at least 120.
        let measured = |cm: Option<f64>, scale: f64| cm.map(|cm| cm / d.height * w * scale);

        let shoulder_width = measured(d.shoulder_width, SHOULDER_MEASURE_SCALE)
            .unwrap_or(base * SHOULDER_WIDTH * factors.muscle_factor);
        let waist_width = measured(d.waist_size, WAIST_MEASURE_SCALE).unwrap_or(base);
        let hip_width = measured(d.hip_size, HIP_MEASURE_SCALE).unwrap_or_else(|| {
            if d.gender == Some(Gender::Female) {
                base * HIP_WIDTH_FEMALE
            } else {
                base * HIP_WIDTH_DEFAULT
            }
        });

        Self {
            center_x: w / 2.0,
            unit,
            head_radius: unit * HEAD_RADIUS,
            y: Landmarks {
                head: unit * HEAD_Y,
                neck: unit * NECK_Y,
                shoulders: unit * SHOULDERS_Y,
                chest: unit * CHEST_Y,
                waist: unit * WAIST_Y,
                hips: unit * HIPS_Y,
                crotch: unit * CROTCH_Y,
                knee: unit * KNEE_Y,
                ankle: unit * ANKLE_Y,
                feet: unit * FEET_Y,
            },
            base_width: base,
            shoulder_width,
            chest_width: base * CHEST_WIDTH * factors.muscle_factor,
            waist_width,
            hip_width,
            thigh_width: base * THIGH_WIDTH,
            knee_width: base * KNEE_WIDTH,
            ankle_width: base * ANKLE_WIDTH,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/proportions.rs"]
mod tests;
