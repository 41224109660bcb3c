//! Clamping validators for body metrics.
//!
//! Out-of-range input is never rejected: it is clamped into the metric's closed interval so
//! that a visual preview can always be produced. Optional metrics keep their absence; the
//! calculators downstream decide what a missing value means.

use crate::body::descriptor::{BodyDescriptor, ValidatedDescriptor};
use crate::foundation::core::clamp_finite;

/// Closed interval a numeric metric is clamped into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp `v` into the range. NaN maps to `min`.
    pub fn clamp(self, v: f64) -> f64 {
        clamp_finite(v, self.min, self.max)
    }

    pub fn contains(self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }
}

/// Height range in centimeters.
pub const HEIGHT_CM: MetricRange = MetricRange::new(120.0, 250.0);
/// Weight range in kilograms.
pub const WEIGHT_KG: MetricRange = MetricRange::new(30.0, 300.0);
pub const MUSCLE_LEVEL: MetricRange = MetricRange::new(1.0, 5.0);
pub const FAT_LEVEL: MetricRange = MetricRange::new(1.0, 5.0);
pub const AGE_APPEARANCE: MetricRange = MetricRange::new(1.0, 100.0);

pub fn validate_height(height: f64) -> f64 {
    HEIGHT_CM.clamp(height)
}

pub fn validate_weight(weight: f64) -> f64 {
    WEIGHT_KG.clamp(weight)
}

/// Clamp a muscle level into `[1, 5]`.
///
/// `None`, `0` and NaN all mean "not provided" and yield `None`. Fractional levels are kept
/// as-is (no rounding).
pub fn validate_muscle_level(level: Option<f64>) -> Option<f64> {
    clamp_level(level, MUSCLE_LEVEL)
}

/// Clamp a fat level into `[1, 5]`, with the same absence rules as
/// [`validate_muscle_level`].
pub fn validate_fat_level(level: Option<f64>) -> Option<f64> {
    clamp_level(level, FAT_LEVEL)
}

pub fn validate_age_appearance(age: Option<f64>) -> Option<f64> {
    clamp_level(age, AGE_APPEARANCE)
}

fn clamp_level(level: Option<f64>, range: MetricRange) -> Option<f64> {
    let level = level.filter(|v| is_provided(*v))?;
    Some(range.clamp(level))
}

/// A metric counts as provided when it is neither zero nor NaN.
pub(crate) fn is_provided(v: f64) -> bool {
    v != 0.0 && !v.is_nan()
}

/// Body measurements only make sense as finite, positive lengths.
fn validate_measurement(cm: Option<f64>) -> Option<f64> {
    cm.filter(|v| v.is_finite() && *v > 0.0)
}

impl ValidatedDescriptor {
    /// Clamp every numeric field of `raw`. Idempotent: validating an already valid
    /// descriptor returns an equal one.
    pub fn from_descriptor(raw: &BodyDescriptor) -> Self {
        let mut d = raw.clone();
        d.height = validate_height(raw.height);
        d.weight = validate_weight(raw.weight);
        d.muscle_level = validate_muscle_level(raw.muscle_level);
        d.fat_level = validate_fat_level(raw.fat_level);
        d.age_appearance = validate_age_appearance(raw.age_appearance);
        d.shoulder_width = validate_measurement(raw.shoulder_width);
        d.waist_size = validate_measurement(raw.waist_size);
        d.hip_size = validate_measurement(raw.hip_size);
        d.leg_length = validate_measurement(raw.leg_length);
        Self(d)
    }
}

impl BodyDescriptor {
    /// Shorthand for [`ValidatedDescriptor::from_descriptor`].
    pub fn validate(&self) -> ValidatedDescriptor {
        ValidatedDescriptor::from_descriptor(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/body/validate.rs"]
mod tests;
