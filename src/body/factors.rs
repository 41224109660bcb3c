use crate::body::descriptor::{BodyShape, ValidatedDescriptor};
use crate::body::validate::is_provided;
use crate::foundation::core::clamp_finite;
use crate::foundation::error::{SilhouetteError, SilhouetteResult};

/// Width shift per fat level away from the neutral level 3.
pub const FAT_LEVEL_STEP: f64 = 0.06;
/// Muscle factor intercept; level `n` maps to `MUSCLE_BASE + n * MUSCLE_STEP`.
pub const MUSCLE_BASE: f64 = 0.9;
pub const MUSCLE_STEP: f64 = 0.05;
/// Hard output bounds of [`calculate_body_width_factor`].
pub const WIDTH_FACTOR_MIN: f64 = 0.7;
pub const WIDTH_FACTOR_MAX: f64 = 1.8;

const NEUTRAL_FAT_LEVEL: f64 = 3.0;

impl BodyShape {
    /// Base width factor for a recognized shape.
    ///
    /// Ordering: slim < balanced < athletic < muscular <= curvy < plus-size.
    pub fn base_width_factor(self) -> Option<f64> {
        match self {
            BodyShape::Slim => Some(0.8),
            BodyShape::Balanced => Some(1.0),
            BodyShape::Athletic => Some(1.05),
            BodyShape::Muscular => Some(1.2),
            BodyShape::Curvy => Some(1.25),
            BodyShape::PlusSize => Some(1.45),
            BodyShape::Unrecognized => None,
        }
    }
}

/// WHO BMI band, used as the width fallback when no body shape is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BmiBand {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiBand {
    pub const UNDERWEIGHT_BELOW: f64 = 18.5;
    pub const OVERWEIGHT_FROM: f64 = 25.0;
    pub const OBESE_FROM: f64 = 30.0;

    /// Classify a BMI value. NaN lands in [`BmiBand::Normal`].
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < Self::UNDERWEIGHT_BELOW {
            BmiBand::Underweight
        } else if (Self::OVERWEIGHT_FROM..Self::OBESE_FROM).contains(&bmi) {
            BmiBand::Overweight
        } else if bmi >= Self::OBESE_FROM {
            BmiBand::Obese
        } else {
            BmiBand::Normal
        }
    }

    pub fn width_factor(self) -> f64 {
        match self {
            BmiBand::Underweight => 0.85,
            BmiBand::Normal => 1.0,
            BmiBand::Overweight => 1.2,
            BmiBand::Obese => 1.4,
        }
    }
}

/// Body mass index: `weight / (height / 100)^2` with height in centimeters.
///
/// A zero height yields infinity; use [`checked_bmi`] where the inputs are not already
/// validated.
pub fn calculate_bmi(weight: f64, height: f64) -> f64 {
    let height_m = height / 100.0;
    weight / (height_m * height_m)
}

/// [`calculate_bmi`] that rejects non-finite results.
pub fn checked_bmi(weight: f64, height: f64) -> SilhouetteResult<f64> {
    let bmi = calculate_bmi(weight, height);
    if !bmi.is_finite() {
        return Err(SilhouetteError::validation(format!(
            "bmi is not finite for weight={weight} height={height}"
        )));
    }
    Ok(bmi)
}

/// Horizontal scale of the silhouette, always within
/// `[WIDTH_FACTOR_MIN, WIDTH_FACTOR_MAX]`.
///
/// A recognized `shape` wins outright; BMI is only consulted when the shape is missing or
/// unrecognized. A provided `fat_level` then shifts the factor by [`FAT_LEVEL_STEP`] per
/// level away from 3.
pub fn calculate_body_width_factor(
    shape: Option<BodyShape>,
    bmi: f64,
    fat_level: Option<f64>,
) -> f64 {
    let mut factor = match shape.and_then(BodyShape::base_width_factor) {
        Some(base) => base,
        None => BmiBand::from_bmi(bmi).width_factor(),
    };

    if let Some(fat) = fat_level.filter(|v| is_provided(*v)) {
        factor += (fat - NEUTRAL_FAT_LEVEL) * FAT_LEVEL_STEP;
    }

    clamp_finite(factor, WIDTH_FACTOR_MIN, WIDTH_FACTOR_MAX)
}

/// Muscle scale for shoulders and chest. A missing level is neutral (`1.0`).
pub fn calculate_muscle_factor(muscle_level: Option<f64>) -> f64 {
    match muscle_level.filter(|v| is_provided(*v)) {
        Some(level) => MUSCLE_BASE + level * MUSCLE_STEP,
        None => 1.0,
    }
}

/// Quantities derived from a validated descriptor. Pure and recomputed on demand.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedFactors {
    pub bmi: f64,
    pub bmi_band: BmiBand,
    pub body_width_factor: f64,
    pub muscle_factor: f64,
}

impl DerivedFactors {
    pub fn from_validated(d: &ValidatedDescriptor) -> Self {
        let bmi = calculate_bmi(d.weight, d.height);
        Self {
            bmi,
            bmi_band: BmiBand::from_bmi(bmi),
            body_width_factor: calculate_body_width_factor(d.body_shape, bmi, d.fat_level),
            muscle_factor: calculate_muscle_factor(d.muscle_level),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/body/factors.rs"]
mod tests;
