use serde::{Deserialize, Serialize};

use crate::compose::part::{BodyComposition, PartRect};

/// Outcome of [`validate_composition`]. `valid` is true iff `errors` is empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Axis-aligned overlap. Rectangles that share only an edge do not overlap.
pub fn rects_overlap(a: &PartRect, b: &PartRect) -> bool {
    !(a.right() <= b.x || b.right() <= a.x || a.bottom() <= b.y || b.bottom() <= a.y)
}

/// Check the name, the part count and every pair of part rectangles.
pub fn validate_composition(composition: &BodyComposition) -> CompositionValidation {
    let mut errors = Vec::new();

    if composition.name.trim().is_empty() {
        errors.push("Composition name is required".to_string());
    }
    if composition.parts.is_empty() {
        errors.push("At least one body part is required".to_string());
    }

    let parts = &composition.parts;
    for (i, a) in parts.iter().enumerate() {
        for b in &parts[i + 1..] {
            if rects_overlap(&a.position, &b.position) {
                errors.push(format!("Body parts {} and {} overlap", a.id, b.id));
            }
        }
    }

    CompositionValidation {
        valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/validate.rs"]
mod tests;
