use serde_json::json;

use super::*;

#[test]
fn only_height_and_weight_are_required() {
    let d: BodyDescriptor = serde_json::from_value(json!({"height": 170, "weight": 65})).unwrap();
    assert_eq!(d, BodyDescriptor::new(170.0, 65.0));

    assert!(serde_json::from_value::<BodyDescriptor>(json!({"height": 170})).is_err());
}

#[test]
fn camel_case_fields_and_kebab_case_variants() {
    let d: BodyDescriptor = serde_json::from_value(json!({
        "height": 180,
        "weight": 95,
        "gender": "non-binary",
        "bodyShape": "plus-size",
        "hairStyle": "buzz-cut",
        "beardStyle": "none",
        "skinTone": "very-light",
        "muscleLevel": 4,
        "accessories": ["watch", "glasses"],
        "colorPalette": ["#112233", "#445566"]
    }))
    .unwrap();

    assert_eq!(d.gender, Some(Gender::NonBinary));
    assert_eq!(d.body_shape, Some(BodyShape::PlusSize));
    assert_eq!(d.hair_style, Some(HairStyle::BuzzCut));
    assert_eq!(d.beard_style, Some(BeardStyle::CleanShaven));
    assert_eq!(d.skin_tone, Some(SkinToneSpec::Named(SkinTone::VeryLight)));
    assert_eq!(d.muscle_level, Some(4.0));
    assert_eq!(d.accessories.len(), 2);
    assert_eq!(d.color_palette[1], "#445566");
}

#[test]
fn unknown_categorical_values_do_not_fail() {
    let d: BodyDescriptor = serde_json::from_value(json!({
        "height": 170,
        "weight": 60,
        "bodyShape": "pear",
        "hairStyle": "mohawk",
        "faceShape": "diamond",
        "footwearType": "clogs"
    }))
    .unwrap();

    assert_eq!(d.body_shape, Some(BodyShape::Unrecognized));
    assert_eq!(d.hair_style, Some(HairStyle::Unrecognized));
    assert_eq!(d.face_shape, Some(FaceShape::Unrecognized));
    assert_eq!(d.footwear_type, Some(FootwearType::Unrecognized));
}

#[test]
fn skin_tone_accepts_hex_strings() {
    let d: BodyDescriptor = serde_json::from_value(json!({
        "height": 170,
        "weight": 60,
        "skinTone": "#AA8866"
    }))
    .unwrap();
    assert_eq!(d.skin_tone, Some(SkinToneSpec::Hex("#AA8866".to_string())));
}

#[test]
fn serialization_skips_absent_fields() {
    let v = serde_json::to_value(BodyDescriptor::new(170.0, 60.0)).unwrap();
    assert_eq!(v, json!({"height": 170.0, "weight": 60.0}));
}
