use super::*;
use crate::compose::part::{BodyPart, PartCategory};
use crate::foundation::core::Canvas;

fn part(id: &str, x: f64, y: f64, w: f64, h: f64) -> BodyPart {
    BodyPart::new(id, id, PartCategory::Torso, "/x.png", PartRect::new(x, y, w, h))
}

fn comp(name: &str, parts: Vec<BodyPart>) -> BodyComposition {
    BodyComposition {
        id: "comp-1".to_string(),
        name: name.to_string(),
        parts,
        base_image: None,
        canvas_size: Canvas::COMPOSITION,
    }
}

#[test]
fn touching_edges_do_not_overlap() {
    let a = PartRect::new(0.0, 0.0, 100.0, 100.0);
    let right = PartRect::new(100.0, 0.0, 50.0, 50.0);
    let below = PartRect::new(0.0, 100.0, 50.0, 50.0);
    let corner = PartRect::new(100.0, 100.0, 10.0, 10.0);
    assert!(!rects_overlap(&a, &right));
    assert!(!rects_overlap(&a, &below));
    assert!(!rects_overlap(&a, &corner));

    let inside = PartRect::new(99.0, 99.0, 10.0, 10.0);
    assert!(rects_overlap(&a, &inside));
    let contained = PartRect::new(10.0, 10.0, 5.0, 5.0);
    assert!(rects_overlap(&a, &contained));
}

#[test]
fn overlap_is_symmetric_over_a_grid() {
    let base = PartRect::new(50.0, 50.0, 100.0, 80.0);
    for x in (0..=200).step_by(25) {
        for y in (0..=200).step_by(25) {
            for (w, h) in [(10.0, 10.0), (50.0, 30.0), (200.0, 200.0)] {
                let other = PartRect::new(f64::from(x), f64::from(y), w, h);
                assert_eq!(
                    rects_overlap(&base, &other),
                    rects_overlap(&other, &base),
                    "asymmetric at {other:?}"
                );
            }
        }
    }
}

#[test]
fn valid_composition_has_no_errors() {
    let v = validate_composition(&comp(
        "Outfit",
        vec![part("a", 0.0, 0.0, 100.0, 100.0), part("b", 100.0, 0.0, 100.0, 100.0)],
    ));
    assert!(v.valid);
    assert!(v.errors.is_empty());
}

#[test]
fn blank_name_and_no_parts_are_reported() {
    let v = validate_composition(&comp("   ", Vec::new()));
    assert!(!v.valid);
    assert_eq!(
        v.errors,
        vec![
            "Composition name is required".to_string(),
            "At least one body part is required".to_string(),
        ]
    );
}

#[test]
fn each_overlapping_pair_is_reported_once() {
    let v = validate_composition(&comp(
        "Stack",
        vec![
            part("a", 0.0, 0.0, 100.0, 100.0),
            part("b", 50.0, 50.0, 100.0, 100.0),
            part("c", 75.0, 75.0, 10.0, 10.0),
            part("d", 500.0, 500.0, 10.0, 10.0),
        ],
    ));
    assert!(!v.valid);
    assert_eq!(v.errors.len(), 3);
    assert!(v.errors.contains(&"Body parts a and b overlap".to_string()));
    assert!(v.errors.contains(&"Body parts a and c overlap".to_string()));
    assert!(v.errors.contains(&"Body parts b and c overlap".to_string()));
}

#[test]
fn swapping_parts_keeps_the_verdict() {
    let a = part("a", 0.0, 0.0, 100.0, 100.0);
    let b = part("b", 60.0, 20.0, 30.0, 30.0);
    let ab = validate_composition(&comp("x", vec![a.clone(), b.clone()]));
    let ba = validate_composition(&comp("x", vec![b, a]));
    assert_eq!(ab.valid, ba.valid);
    assert_eq!(ab.errors.len(), ba.errors.len());
}

#[test]
fn default_catalog_rects_are_checked_pairwise() {
    let parts = crate::compose::catalog::default_parts();
    let v = validate_composition(&comp("Everything", parts));
    // Alternatives within a category share the same slot.
    assert!(!v.valid);
}
