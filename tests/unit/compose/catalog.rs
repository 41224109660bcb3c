use std::collections::HashSet;

use super::*;
use crate::compose::part::BlendMode;

#[test]
fn catalog_has_26_unique_parts() {
    let parts = default_parts();
    assert_eq!(parts.len(), 26);
    let ids: HashSet<&str> = parts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids.len(), 26);
}

#[test]
fn every_part_is_canonical_and_opaque() {
    for p in default_parts() {
        assert!(p.category.is_known(), "{}", p.id);
        assert_eq!(p.blend_mode, BlendMode::Normal);
        assert_eq!(p.opacity, 1.0);
        assert!(p.image_path.starts_with("/body-parts/"));
        assert!(p.position.width > 0.0 && p.position.height > 0.0);
    }
}

#[test]
fn category_counts() {
    let parts = default_parts();
    let count = |c: PartCategory| parts.iter().filter(|p| p.category == c).count();
    assert_eq!(count(PartCategory::Hair), 7);
    assert_eq!(count(PartCategory::Head), 4);
    assert_eq!(count(PartCategory::Torso), 3);
    assert_eq!(count(PartCategory::LeftArm), 1);
    assert_eq!(count(PartCategory::RightArm), 1);
    assert_eq!(count(PartCategory::Legs), 4);
    assert_eq!(count(PartCategory::Feet), 3);
    assert_eq!(count(PartCategory::Accessories), 3);
}

#[test]
fn arm_placement() {
    let parts = default_parts();
    let left = parts.iter().find(|p| p.id == "leftArm-1").unwrap();
    assert_eq!(left.position, PartRect::new(120.0, 300.0, 120.0, 200.0));
}
