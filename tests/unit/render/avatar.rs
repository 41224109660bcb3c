use super::*;
use crate::body::descriptor::{BodyDescriptor, BodyShape, Gender};

fn draw_with(raw: BodyDescriptor, opts: &RenderOptions) -> Drawing {
    let d = raw.validate();
    let f = DerivedFactors::from_validated(&d);
    render_avatar(&d, &f, opts)
}

fn draw(raw: BodyDescriptor) -> Drawing {
    draw_with(raw, &RenderOptions::default())
}

fn from_json(v: serde_json::Value) -> BodyDescriptor {
    serde_json::from_value(v).unwrap()
}

#[test]
fn minimal_descriptor_renders_every_core_layer() {
    let drawing = draw(BodyDescriptor::new(170.0, 65.0));
    for layer in [
        Layer::Background,
        Layer::FloorShadow,
        Layer::Legs,
        Layer::Footwear,
        Layer::Torso,
        Layer::Arms,
        Layer::Neck,
        Layer::Head,
        Layer::Ears,
        Layer::Hair,
        Layer::Face,
        Layer::Panels,
        Layer::Watermark,
    ] {
        assert!(drawing.has_layer(layer), "missing {layer:?}");
    }
    for layer in [
        Layer::Beard,
        Layer::Piercings,
        Layer::Accessories,
        Layer::Tattoos,
        Layer::MuscleDefinition,
    ] {
        assert!(!drawing.has_layer(layer), "unexpected {layer:?}");
    }
    assert_eq!(drawing.canvas, Canvas::AVATAR);
    assert!(drawing.texts().any(|t| t == "Virtual Model Preview"));
}

#[test]
fn layers_are_painted_back_to_front() {
    let drawing = draw(from_json(serde_json::json!({
        "height": 175, "weight": 70, "beardStyle": "full", "muscleLevel": 5,
        "accessories": ["watch"], "tattoos": "arm", "piercings": "ears"
    })));
    let layers: Vec<Layer> = drawing.elements.iter().map(|e| e.layer).collect();
    assert!(layers.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn rendering_is_deterministic() {
    let raw = from_json(serde_json::json!({
        "height": 182, "weight": 81, "gender": "male", "bodyShape": "athletic",
        "hairStyle": "curly", "hairColor": "red", "accessories": ["glasses", "hat"]
    }));
    let a = draw(raw.clone());
    let b = draw(raw);
    assert_eq!(a, b);
    assert_eq!(a.to_svg(), b.to_svg());
}

#[test]
fn wider_body_shape_widens_the_torso() {
    let slim = draw(BodyDescriptor {
        body_shape: Some(BodyShape::Slim),
        ..BodyDescriptor::new(170.0, 65.0)
    });
    let plus = draw(BodyDescriptor {
        body_shape: Some(BodyShape::PlusSize),
        ..BodyDescriptor::new(170.0, 65.0)
    });
    let torso_width = |d: &Drawing| match &d.layer(Layer::Torso).next().unwrap().shape {
        Shape::Path(p) => {
            use kurbo::Shape as _;
            p.bounding_box().width()
        }
        other => panic!("torso is not a path: {other:?}"),
    };
    assert!(torso_width(&plus) > torso_width(&slim));
}

#[test]
fn bald_draws_no_hair_and_unknown_style_draws_a_cap() {
    let bald = draw(from_json(serde_json::json!({
        "height": 170, "weight": 65, "hairStyle": "bald"
    })));
    assert!(!bald.has_layer(Layer::Hair));

    let unknown = draw(from_json(serde_json::json!({
        "height": 170, "weight": 65, "hairStyle": "mohawk"
    })));
    let hair: Vec<_> = unknown.layer(Layer::Hair).collect();
    assert_eq!(hair.len(), 1);
    assert!(matches!(hair[0].shape, Shape::Ellipse { .. }));
}

#[test]
fn face_shape_selects_head_geometry() {
    let head = |shape: &str| {
        let d = draw(from_json(serde_json::json!({
            "height": 170, "weight": 65, "faceShape": shape
        })));
        d.layer(Layer::Head).next().unwrap().shape.clone()
    };
    assert!(matches!(head("round"), Shape::Circle { .. }));
    assert!(matches!(head("square"), Shape::Rect { .. }));
    assert!(matches!(head("heart"), Shape::Path(_)));
    assert!(matches!(head("oval"), Shape::Ellipse { .. }));
    assert_eq!(head("triangle"), head("oval"));
}

#[test]
fn footwear_variants() {
    let footwear = |kind: &str| {
        let d = draw(from_json(serde_json::json!({
            "height": 170, "weight": 65, "footwearType": kind
        })));
        d.layer(Layer::Footwear).cloned().collect::<Vec<_>>()
    };
    let heels = footwear("heels");
    assert_eq!(heels.len(), 4);
    assert!(heels.iter().any(|e| matches!(e.shape, Shape::Line { .. })));

    let boots = footwear("boots");
    assert_eq!(boots.len(), 2);
    assert!(boots.iter().all(|e| matches!(e.shape, Shape::Rect { .. })));

    let sneakers = footwear("sneaker");
    assert!(sneakers.iter().all(|e| e.style.fill == Paint::color("#F5F5F5")));
}

#[test]
fn beard_only_when_requested() {
    let none = draw(from_json(serde_json::json!({
        "height": 170, "weight": 65, "beardStyle": "none"
    })));
    assert!(!none.has_layer(Layer::Beard));

    let mustache = draw(from_json(serde_json::json!({
        "height": 170, "weight": 65, "beardStyle": "mustache"
    })));
    assert_eq!(mustache.layer(Layer::Beard).count(), 2);
}

#[test]
fn accessories_match_keywords_case_insensitively() {
    let drawing = draw(from_json(serde_json::json!({
        "height": 170, "weight": 65, "accessories": ["Sunglasses", "Gold Necklace"]
    })));
    let acc: Vec<_> = drawing.layer(Layer::Accessories).collect();
    assert!(acc.iter().any(|e| matches!(e.shape, Shape::Rect { .. })));
    assert!(acc.iter().any(|e| e.style.fill == Paint::color(GOLD)));

    let localized = draw(from_json(serde_json::json!({
        "height": 170, "weight": 65, "accessories": ["Kính râm"]
    })));
    assert!(localized.has_layer(Layer::Accessories));

    let unmatched = draw(from_json(serde_json::json!({
        "height": 170, "weight": 65, "accessories": ["umbrella"]
    })));
    assert!(!unmatched.has_layer(Layer::Accessories));
    assert!(unmatched.texts().any(|t| t == "umbrella"));
}

#[test]
fn piercings_and_tattoos() {
    let drawing = draw(from_json(serde_json::json!({
        "height": 170, "weight": 65, "piercings": "ears and nose", "tattoos": "back piece"
    })));
    assert_eq!(drawing.layer(Layer::Piercings).count(), 3);
    assert!(drawing.has_layer(Layer::Tattoos));

    let blank = draw(from_json(serde_json::json!({
        "height": 170, "weight": 65, "piercings": "  ", "tattoos": ""
    })));
    assert!(!blank.has_layer(Layer::Piercings));
    assert!(!blank.has_layer(Layer::Tattoos));
}

#[test]
fn muscle_definition_from_level_four() {
    let level = |m: f64| {
        draw(BodyDescriptor {
            muscle_level: Some(m),
            ..BodyDescriptor::new(170.0, 65.0)
        })
    };
    assert!(!level(3.0).has_layer(Layer::MuscleDefinition));
    assert!(level(4.0).has_layer(Layer::MuscleDefinition));
    assert!(level(9.0).has_layer(Layer::MuscleDefinition));
}

#[test]
fn palette_drives_clothing_colours() {
    let d = from_json(serde_json::json!({
        "height": 170, "weight": 65, "clothingStyle": "formal",
        "colorPalette": ["#ff0000", "#00ff00"]
    }))
    .validate();
    let c = AvatarColors::resolve(&d);
    assert_eq!(c.top, "#FF0000");
    assert_eq!(c.pants, "#00FF00");

    let d = from_json(serde_json::json!({
        "height": 170, "weight": 65, "clothingStyle": "formal"
    }))
    .validate();
    let c = AvatarColors::resolve(&d);
    assert_eq!(c.top, "#1E3A8A");
    assert_eq!(c.pants, DEFAULT_PANTS_HEX);
    assert_eq!(c.shoe, DEFAULT_SHOE_HEX);
}

#[test]
fn malformed_colours_fall_back() {
    let d = from_json(serde_json::json!({
        "height": 170, "weight": 65, "skinTone": "#zzzzzz",
        "colorPalette": ["javascript:alert(1)"]
    }))
    .validate();
    let c = AvatarColors::resolve(&d);
    assert_eq!(c.skin.base, SkinTone::DEFAULT.hex());
    assert_eq!(c.top, ClothingStyle::DEFAULT.hex());
}

#[test]
fn default_colours() {
    let c = AvatarColors::resolve(&BodyDescriptor::new(170.0, 65.0).validate());
    assert_eq!(c.skin.base, "#DDB896");
    assert_eq!(c.hair, "#2C2C2C");
    assert_eq!(c.eye, "#8B6F47");
    assert_eq!(c.top, "#94A3B8");
}

#[test]
fn options_toggle_background_panels_and_watermark() {
    let opts = RenderOptions {
        show_panels: false,
        background: false,
        watermark: String::new(),
        ..RenderOptions::default()
    };
    let drawing = draw_with(BodyDescriptor::new(170.0, 65.0), &opts);
    assert!(!drawing.has_layer(Layer::Background));
    assert!(!drawing.has_layer(Layer::Panels));
    assert!(!drawing.has_layer(Layer::Watermark));
}

#[test]
fn panels_show_clamped_metrics_and_labels() {
    let drawing = draw(BodyDescriptor {
        gender: Some(Gender::Female),
        body_shape: Some(BodyShape::Curvy),
        age_appearance: Some(34.0),
        leg_length: Some(88.0),
        ..BodyDescriptor::new(300.0, 20.0)
    });
    let texts: Vec<&str> = drawing.texts().collect();
    assert!(texts.contains(&"250 cm"));
    assert!(texts.contains(&"30 kg"));
    assert!(texts.contains(&"Female"));
    assert!(texts.contains(&"Age 34"));
    assert!(texts.contains(&"Curvy"));
    assert!(texts.contains(&"88 cm"));
    assert!(texts.contains(&"Medium"));
}

#[test]
fn render_options_deserialize_with_defaults() {
    let opts: RenderOptions = serde_json::from_str(r#"{"showPanels": false}"#).unwrap();
    assert!(!opts.show_panels);
    assert!(opts.background);
    assert_eq!(opts.canvas, Canvas::AVATAR);
    assert_eq!(opts.watermark, "Virtual Model Preview");
}
