use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Canvas, Rect};

/// Canonical body-part category.
///
/// Categories are plain strings on the wire; names outside the fixed set are kept verbatim
/// in [`PartCategory::Custom`] so registration never fails on an unknown category.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PartCategory {
    Hair,
    Head,
    Torso,
    LeftArm,
    RightArm,
    Legs,
    Feet,
    Accessories,
    Custom(String),
}

impl PartCategory {
    /// The fixed categories, in catalog order.
    pub const KNOWN: [PartCategory; 8] = [
        PartCategory::Hair,
        PartCategory::Head,
        PartCategory::Torso,
        PartCategory::LeftArm,
        PartCategory::RightArm,
        PartCategory::Legs,
        PartCategory::Feet,
        PartCategory::Accessories,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            PartCategory::Hair => "hair",
            PartCategory::Head => "head",
            PartCategory::Torso => "torso",
            PartCategory::LeftArm => "leftArm",
            PartCategory::RightArm => "rightArm",
            PartCategory::Legs => "legs",
            PartCategory::Feet => "feet",
            PartCategory::Accessories => "accessories",
            PartCategory::Custom(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, PartCategory::Custom(_))
    }

    /// Resolve a canonical or legacy category name to canonical categories.
    ///
    /// `arms` expands to both arm categories. Unknown names resolve to nothing.
    pub fn parse_lenient(s: &str) -> Vec<PartCategory> {
        let canonical = PartCategory::from(s.to_string());
        if canonical.is_known() {
            return vec![canonical];
        }
        match LegacyPartCategory::parse(s) {
            Some(legacy) => legacy.to_canonical(),
            None => Vec::new(),
        }
    }
}

impl From<String> for PartCategory {
    fn from(s: String) -> Self {
        match s.as_str() {
            "hair" => PartCategory::Hair,
            "head" => PartCategory::Head,
            "torso" => PartCategory::Torso,
            "leftArm" => PartCategory::LeftArm,
            "rightArm" => PartCategory::RightArm,
            "legs" => PartCategory::Legs,
            "feet" => PartCategory::Feet,
            "accessories" => PartCategory::Accessories,
            _ => PartCategory::Custom(s),
        }
    }
}

impl From<PartCategory> for String {
    fn from(c: PartCategory) -> Self {
        match c {
            PartCategory::Custom(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for PartCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarser category set used by older catalogs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegacyPartCategory {
    Head,
    Hair,
    Face,
    Body,
    Arms,
    Legs,
    Accessories,
}

impl LegacyPartCategory {
    pub fn parse(s: &str) -> Option<Self> {
        let c = match s {
            "head" => LegacyPartCategory::Head,
            "hair" => LegacyPartCategory::Hair,
            "face" => LegacyPartCategory::Face,
            "body" => LegacyPartCategory::Body,
            "arms" => LegacyPartCategory::Arms,
            "legs" => LegacyPartCategory::Legs,
            "accessories" => LegacyPartCategory::Accessories,
            _ => return None,
        };
        Some(c)
    }

    /// Translation table into the canonical set.
    ///
    /// | legacy | canonical |
    /// |---|---|
    /// | `face` | `head` |
    /// | `body` | `torso` |
    /// | `arms` | `leftArm`, `rightArm` |
    /// | others | same name |
    pub fn to_canonical(self) -> Vec<PartCategory> {
        match self {
            LegacyPartCategory::Head | LegacyPartCategory::Face => vec![PartCategory::Head],
            LegacyPartCategory::Hair => vec![PartCategory::Hair],
            LegacyPartCategory::Body => vec![PartCategory::Torso],
            LegacyPartCategory::Arms => vec![PartCategory::LeftArm, PartCategory::RightArm],
            LegacyPartCategory::Legs => vec![PartCategory::Legs],
            LegacyPartCategory::Accessories => vec![PartCategory::Accessories],
        }
    }
}

/// How a part is combined with what is already on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    /// Source-over.
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
}

/// Target rectangle of a part on the composition canvas, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PartRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PartRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.right(), self.bottom())
    }
}

fn default_opacity() -> f64 {
    1.0
}

/// A named image fragment placed at a fixed rectangle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyPart {
    pub id: String,
    pub name: String,
    pub category: PartCategory,
    /// Reference to an external image resource, resolved at rasterization time.
    pub image_path: String,
    pub position: PartRect,
    #[serde(default)]
    pub blend_mode: BlendMode,
    /// `0.0..=1.0`.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

impl BodyPart {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: PartCategory,
        image_path: impl Into<String>,
        position: PartRect,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            image_path: image_path.into(),
            position,
            blend_mode: BlendMode::Normal,
            opacity: 1.0,
        }
    }
}

/// An ordered stack of parts. Index order is z-order, back to front.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyComposition {
    pub id: String,
    pub name: String,
    pub parts: Vec<BodyPart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_image: Option<String>,
    pub canvas_size: Canvas,
}

/// Partial update for [`BodyComposition`]; present fields replace stored ones.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<BodyPart>>,
    /// `Some(None)` (JSON `null`) clears the base image; absent leaves it unchanged.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_or_null"
    )]
    pub base_image: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_size: Option<Canvas>,
}

/// Distinguish an explicit `null` from a missing field.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl CompositionUpdate {
    /// Shallow merge onto `target`. The id is never changed.
    pub fn apply_to(self, target: &mut BodyComposition) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(parts) = self.parts {
            target.parts = parts;
        }
        if let Some(base) = self.base_image {
            target.base_image = base;
        }
        if let Some(canvas) = self.canvas_size {
            target.canvas_size = canvas;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/part.rs"]
mod tests;
