use super::*;

#[test]
fn skin_tone_table() {
    assert_eq!(SkinTone::VeryLight.hex(), "#FFE4D0");
    assert_eq!(SkinTone::DEFAULT.hex(), "#DDB896");
    assert_eq!(SkinTone::Dark.hex(), "#6B4423");
}

#[test]
fn raw_skin_hex_passes_through() {
    let tone = SkinToneSpec::Hex("#123456".to_string());
    assert_eq!(tone.hex(), "#123456");
    assert_eq!(SkinToneSpec::Named(SkinTone::Tan).hex(), "#C9956F");
}

#[test]
fn unrecognized_variants_use_defaults() {
    assert_eq!(HairColor::Unrecognized.hex(), HairColor::DEFAULT.hex());
    assert_eq!(EyeColor::Unrecognized.hex(), EyeColor::DEFAULT.hex());
    assert_eq!(ClothingStyle::Unrecognized.hex(), ClothingStyle::DEFAULT.hex());
    assert_eq!(FootwearType::Unrecognized.hex(), None);
}

#[test]
fn footwear_colors() {
    assert_eq!(FootwearType::Sneaker.hex(), Some("#F5F5F5"));
    assert_eq!(FootwearType::Formal.hex(), Some("#000000"));
    assert_eq!(FootwearType::Slippers.hex(), Some("#BDBDBD"));
}

#[test]
fn palette_entry_treats_blank_values_as_missing() {
    let palette = vec!["#FF0000".to_string(), "  ".to_string()];
    assert_eq!(palette_entry(&palette, 0), Some("#FF0000"));
    assert_eq!(palette_entry(&palette, 1), None);
    assert_eq!(palette_entry(&palette, 2), None);
}

#[test]
fn palette_entry_does_not_fall_through_past_blank() {
    let palette = vec![String::new(), "#111111".to_string()];
    assert_eq!(palette_entry(&palette, 0), None);
    assert_eq!(palette_entry(&palette, 1), Some("#111111"));
}
