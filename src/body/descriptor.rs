use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Raw body descriptor as supplied by callers (usually deserialized from JSON).
///
/// Only `height` (cm) and `weight` (kg) are required. Every other field may be absent and
/// falls back to a renderer default. Categorical fields accept unknown strings, which
/// deserialize into an `Unrecognized` variant rather than failing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyDescriptor {
    /// Height in centimeters.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_shape: Option<BodyShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_tone: Option<SkinToneSpec>,
    /// Muscle level, nominally an integer in `1..=5`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscle_level: Option<f64>,
    /// Fat level, nominally an integer in `1..=5`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_level: Option<f64>,
    /// Shoulder width in centimeters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoulder_width: Option<f64>,
    /// Waist circumference in centimeters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist_size: Option<f64>,
    /// Hip circumference in centimeters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hip_size: Option<f64>,
    /// Leg length in centimeters (drawn as a measurement guide).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leg_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair_color: Option<HairColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair_style: Option<HairStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eye_color: Option<EyeColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_shape: Option<FaceShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beard_style: Option<BeardStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clothing_style: Option<ClothingStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footwear_type: Option<FootwearType>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub accessories: BTreeSet<String>,
    /// Ordered clothing colours: `[0]` is the top, `[1]` the pants.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub color_palette: Vec<String>,
    /// Apparent age in years.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_appearance: Option<f64>,
    /// Free-text tattoo description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tattoos: Option<String>,
    /// Free-text piercing description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub piercings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_proportion_preset: Option<ProportionPreset>,
}

impl BodyDescriptor {
    /// Minimal descriptor with only the required metrics set.
    pub fn new(height: f64, weight: f64) -> Self {
        Self {
            height,
            weight,
            ..Self::default()
        }
    }
}

/// A [`BodyDescriptor`] whose numeric fields are clamped to their domain ranges.
///
/// Built by [`ValidatedDescriptor::from_descriptor`]; the inner descriptor is read-only so
/// the clamping invariant cannot be broken after construction.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedDescriptor(pub(crate) BodyDescriptor);

impl ValidatedDescriptor {
    /// Borrow the clamped descriptor.
    pub fn as_descriptor(&self) -> &BodyDescriptor {
        &self.0
    }

    /// Unwrap into the clamped descriptor.
    pub fn into_inner(self) -> BodyDescriptor {
        self.0
    }
}

impl std::ops::Deref for ValidatedDescriptor {
    type Target = BodyDescriptor;

    fn deref(&self) -> &BodyDescriptor {
        &self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    #[serde(other)]
    Unrecognized,
}

impl Gender {
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::NonBinary | Gender::Unrecognized => "Non-binary",
        }
    }
}

/// Body shape category. Recognized shapes take priority over BMI when computing width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodyShape {
    Slim,
    Balanced,
    Athletic,
    Muscular,
    Curvy,
    PlusSize,
    #[serde(other)]
    Unrecognized,
}

impl BodyShape {
    pub fn label(self) -> &'static str {
        match self {
            BodyShape::Slim => "Slim",
            BodyShape::Balanced => "Balanced",
            BodyShape::Athletic => "Athletic",
            BodyShape::Muscular => "Muscular",
            BodyShape::Curvy => "Curvy",
            BodyShape::PlusSize => "Plus-size",
            BodyShape::Unrecognized => "Custom",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkinTone {
    VeryLight,
    Light,
    Medium,
    Tan,
    Brown,
    Dark,
}

impl SkinTone {
    pub fn label(self) -> &'static str {
        match self {
            SkinTone::VeryLight => "Very light",
            SkinTone::Light => "Light",
            SkinTone::Medium => "Medium",
            SkinTone::Tan => "Tan",
            SkinTone::Brown => "Brown",
            SkinTone::Dark => "Dark",
        }
    }
}

/// Skin tone given either as a named tone or as a raw `#RRGGBB` string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkinToneSpec {
    Named(SkinTone),
    Hex(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HairColor {
    Black,
    Brown,
    Blonde,
    Red,
    White,
    Gray,
    Purple,
    Blue,
    Green,
    Pink,
    Other,
    #[serde(other)]
    Unrecognized,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HairStyle {
    Long,
    Short,
    BuzzCut,
    Medium,
    Curly,
    Wavy,
    Ponytail,
    Bun,
    Straight,
    Bald,
    #[serde(other)]
    Unrecognized,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EyeColor {
    Brown,
    Black,
    Blue,
    Green,
    Gray,
    Amber,
    Hazel,
    #[serde(other)]
    Unrecognized,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FaceShape {
    Oval,
    Round,
    Square,
    Long,
    Heart,
    #[serde(other)]
    Unrecognized,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BeardStyle {
    #[serde(rename = "none")]
    CleanShaven,
    Full,
    Goatee,
    Stubble,
    Mustache,
    #[serde(other)]
    Unrecognized,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClothingStyle {
    Casual,
    Formal,
    Sporty,
    Bohemian,
    Vintage,
    Preppy,
    Minimalist,
    #[serde(other)]
    Unrecognized,
}

impl ClothingStyle {
    pub fn label(self) -> &'static str {
        match self {
            ClothingStyle::Casual | ClothingStyle::Unrecognized => "Casual",
            ClothingStyle::Formal => "Formal",
            ClothingStyle::Sporty => "Sporty",
            ClothingStyle::Bohemian => "Bohemian",
            ClothingStyle::Vintage => "Vintage",
            ClothingStyle::Preppy => "Preppy",
            ClothingStyle::Minimalist => "Minimalist",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FootwearType {
    Sneaker,
    Heels,
    Boots,
    Sandals,
    Formal,
    Loafers,
    Flats,
    Slippers,
    #[serde(other)]
    Unrecognized,
}

impl FootwearType {
    pub fn label(self) -> &'static str {
        match self {
            FootwearType::Sneaker => "Sneakers",
            FootwearType::Heels => "Heels",
            FootwearType::Boots => "Boots",
            FootwearType::Sandals => "Sandals",
            FootwearType::Formal => "Dress shoes",
            FootwearType::Loafers => "Loafers",
            FootwearType::Flats => "Flats",
            FootwearType::Slippers => "Slippers",
            FootwearType::Unrecognized => "Shoes",
        }
    }
}

/// Overall proportion preset. Only shown as a label; it does not alter geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProportionPreset {
    Supermodel,
    Athletic,
    Realistic,
    Petite,
    Tall,
    #[serde(other)]
    Unrecognized,
}

impl ProportionPreset {
    pub fn label(self) -> &'static str {
        match self {
            ProportionPreset::Supermodel => "Supermodel",
            ProportionPreset::Athletic => "Athletic build",
            ProportionPreset::Realistic => "Realistic",
            ProportionPreset::Petite => "Petite",
            ProportionPreset::Tall => "Tall",
            ProportionPreset::Unrecognized => "Average",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/body/descriptor.rs"]
mod tests;
