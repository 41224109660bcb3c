//! Fixed colour tables for the categorical body and style attributes.
//!
//! Every lookup returns a `#RRGGBB` string. Unrecognized variants resolve to the table's
//! default entry so the renderer never has to handle a missing colour.

use crate::body::descriptor::{
    ClothingStyle, EyeColor, FootwearType, HairColor, SkinTone, SkinToneSpec,
};

/// Fallback pants colour when the palette has no second entry.
pub const DEFAULT_PANTS_HEX: &str = "#334155";
/// Fallback shoe colour when no footwear type is given.
pub const DEFAULT_SHOE_HEX: &str = "#334155";

impl SkinTone {
    pub const DEFAULT: SkinTone = SkinTone::Medium;

    pub fn hex(self) -> &'static str {
        match self {
            SkinTone::VeryLight => "#FFE4D0",
            SkinTone::Light => "#F5D5C0",
            SkinTone::Medium => "#DDB896",
            SkinTone::Tan => "#C9956F",
            SkinTone::Brown => "#A67C52",
            SkinTone::Dark => "#6B4423",
        }
    }
}

impl SkinToneSpec {
    /// Base skin colour. Raw hex values are passed through unchecked; the renderer
    /// validates them when deriving shades.
    pub fn hex(&self) -> &str {
        match self {
            SkinToneSpec::Named(tone) => tone.hex(),
            SkinToneSpec::Hex(hex) => hex,
        }
    }

    /// Panel label; raw hex tones are labelled with the hex string itself.
    pub fn label(&self) -> &str {
        match self {
            SkinToneSpec::Named(tone) => tone.label(),
            SkinToneSpec::Hex(hex) => hex,
        }
    }
}

impl HairColor {
    pub const DEFAULT: HairColor = HairColor::Black;

    pub fn hex(self) -> &'static str {
        match self {
            HairColor::Black | HairColor::Unrecognized => "#2C2C2C",
            HairColor::Brown => "#6F4E37",
            HairColor::Blonde => "#F4DCA8",
            HairColor::Red => "#C1440E",
            HairColor::White => "#F5F5F5",
            HairColor::Gray => "#9E9E9E",
            HairColor::Purple => "#8B4789",
            HairColor::Blue => "#4A7C9E",
            HairColor::Green => "#5A7C4E",
            HairColor::Pink => "#FFB6C1",
            HairColor::Other => "#FF6B9D",
        }
    }
}

impl EyeColor {
    pub const DEFAULT: EyeColor = EyeColor::Brown;

    pub fn hex(self) -> &'static str {
        match self {
            EyeColor::Brown | EyeColor::Unrecognized => "#8B6F47",
            EyeColor::Black => "#1A1A1A",
            EyeColor::Blue => "#5B9BD5",
            EyeColor::Green => "#70AD47",
            EyeColor::Gray => "#A0A0A0",
            EyeColor::Amber => "#D97706",
            EyeColor::Hazel => "#8B7355",
        }
    }
}

impl ClothingStyle {
    pub const DEFAULT: ClothingStyle = ClothingStyle::Casual;

    pub fn hex(self) -> &'static str {
        match self {
            ClothingStyle::Casual | ClothingStyle::Unrecognized => "#94A3B8",
            ClothingStyle::Formal => "#1E3A8A",
            ClothingStyle::Sporty | ClothingStyle::Preppy => "#EF4444",
            ClothingStyle::Bohemian | ClothingStyle::Vintage => "#92400E",
            ClothingStyle::Minimalist => "#6B7280",
        }
    }
}

impl FootwearType {
    /// Shoe colour; an unrecognized footwear type has no entry.
    pub fn hex(self) -> Option<&'static str> {
        let hex = match self {
            FootwearType::Sneaker => "#F5F5F5",
            FootwearType::Heels => "#1A1A1A",
            FootwearType::Boots => "#2C3E50",
            FootwearType::Sandals | FootwearType::Loafers => "#8B6F47",
            FootwearType::Formal => "#000000",
            FootwearType::Flats => "#C19A6B",
            FootwearType::Slippers => "#BDBDBD",
            FootwearType::Unrecognized => return None,
        };
        Some(hex)
    }
}

/// The palette entry at exactly `index`, or `None` when it is missing or blank.
///
/// A blank entry does not fall through to later ones.
pub(crate) fn palette_entry(palette: &[String], index: usize) -> Option<&str> {
    palette
        .get(index)
        .map(String::as_str)
        .filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
#[path = "../../tests/unit/body/palette.rs"]
mod tests;
