use super::*;

#[test]
fn categories_round_trip_as_plain_strings() {
    for c in PartCategory::KNOWN {
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, format!("\"{}\"", c.as_str()));
        let back: PartCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
    let custom: PartCategory = serde_json::from_str("\"wings\"").unwrap();
    assert_eq!(custom, PartCategory::Custom("wings".to_string()));
    assert!(!custom.is_known());
    assert_eq!(serde_json::to_string(&custom).unwrap(), "\"wings\"");
}

#[test]
fn category_names_are_case_sensitive() {
    assert_eq!(
        PartCategory::from("leftArm".to_string()),
        PartCategory::LeftArm
    );
    assert!(!PartCategory::from("leftarm".to_string()).is_known());
}

#[test]
fn legacy_translation_table() {
    assert_eq!(
        LegacyPartCategory::Face.to_canonical(),
        vec![PartCategory::Head]
    );
    assert_eq!(
        LegacyPartCategory::Body.to_canonical(),
        vec![PartCategory::Torso]
    );
    assert_eq!(
        LegacyPartCategory::Arms.to_canonical(),
        vec![PartCategory::LeftArm, PartCategory::RightArm]
    );
    assert_eq!(
        LegacyPartCategory::Legs.to_canonical(),
        vec![PartCategory::Legs]
    );
}

#[test]
fn parse_lenient_accepts_both_sets() {
    assert_eq!(PartCategory::parse_lenient("feet"), vec![PartCategory::Feet]);
    assert_eq!(PartCategory::parse_lenient("face"), vec![PartCategory::Head]);
    assert_eq!(PartCategory::parse_lenient("arms").len(), 2);
    assert!(PartCategory::parse_lenient("tail").is_empty());
}

#[test]
fn body_part_defaults_blend_and_opacity() {
    let part: BodyPart = serde_json::from_value(serde_json::json!({
        "id": "p", "name": "P", "category": "hair", "imagePath": "/x.png",
        "position": {"x": 1, "y": 2, "width": 3, "height": 4}
    }))
    .unwrap();
    assert_eq!(part.blend_mode, BlendMode::Normal);
    assert_eq!(part.opacity, 1.0);
    assert_eq!(part.position, PartRect::new(1.0, 2.0, 3.0, 4.0));

    let json = serde_json::to_value(&part).unwrap();
    assert_eq!(json["imagePath"], "/x.png");
    assert_eq!(json["blendMode"], "normal");
}

#[test]
fn part_rect_edges() {
    let r = PartRect::new(10.0, 20.0, 30.0, 40.0);
    assert_eq!(r.right(), 40.0);
    assert_eq!(r.bottom(), 60.0);
    assert_eq!(r.to_rect(), Rect::new(10.0, 20.0, 40.0, 60.0));
}

#[test]
fn update_is_a_shallow_merge() {
    let part = BodyPart::new("a", "A", PartCategory::Head, "/a.svg", PartRect::default());
    let mut comp = BodyComposition {
        id: "comp-1".to_string(),
        name: "old".to_string(),
        parts: vec![part],
        base_image: Some("/base.png".to_string()),
        canvas_size: Canvas::COMPOSITION,
    };

    CompositionUpdate {
        name: Some("new".to_string()),
        ..CompositionUpdate::default()
    }
    .apply_to(&mut comp);

    assert_eq!(comp.id, "comp-1");
    assert_eq!(comp.name, "new");
    assert_eq!(comp.parts.len(), 1);
    assert_eq!(comp.base_image.as_deref(), Some("/base.png"));

    CompositionUpdate {
        parts: Some(Vec::new()),
        canvas_size: Some(Canvas::AVATAR),
        ..CompositionUpdate::default()
    }
    .apply_to(&mut comp);
    assert!(comp.parts.is_empty());
    assert_eq!(comp.canvas_size, Canvas::AVATAR);
}

#[test]
fn update_base_image_can_be_replaced_or_cleared() {
    let mut comp = BodyComposition {
        id: "comp-1".to_string(),
        name: "n".to_string(),
        parts: Vec::new(),
        base_image: Some("/old.png".to_string()),
        canvas_size: Canvas::COMPOSITION,
    };

    let keep: CompositionUpdate = serde_json::from_str(r#"{"name": "m"}"#).unwrap();
    assert_eq!(keep.base_image, None);
    keep.apply_to(&mut comp);
    assert_eq!(comp.base_image.as_deref(), Some("/old.png"));

    let replace: CompositionUpdate =
        serde_json::from_str(r#"{"baseImage": "/new.png"}"#).unwrap();
    replace.apply_to(&mut comp);
    assert_eq!(comp.base_image.as_deref(), Some("/new.png"));

    let clear: CompositionUpdate = serde_json::from_str(r#"{"baseImage": null}"#).unwrap();
    assert_eq!(clear.base_image, Some(None));
    clear.apply_to(&mut comp);
    assert_eq!(comp.base_image, None);

    let json = serde_json::to_value(CompositionUpdate {
        base_image: Some(None),
        ..CompositionUpdate::default()
    })
    .unwrap();
    assert_eq!(json, serde_json::json!({"baseImage": null}));
}

#[test]
fn composition_serializes_camel_case() {
    let comp = BodyComposition {
        id: "comp-1".to_string(),
        name: "n".to_string(),
        parts: Vec::new(),
        base_image: None,
        canvas_size: Canvas::COMPOSITION,
    };
    let json = serde_json::to_value(&comp).unwrap();
    assert_eq!(json["canvasSize"]["width"], 600);
    assert_eq!(json["canvasSize"]["height"], 1000);
    assert!(json.get("baseImage").is_none());
}
