use serde::Serialize;

use crate::body::descriptor::{BodyDescriptor, ValidatedDescriptor};
use crate::body::factors::DerivedFactors;
use crate::render::avatar::{AvatarColors, AvatarRenderer, RenderOptions};
use crate::render::drawing::Drawing;

/// Every intermediate of one avatar preview.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarPreview {
    pub validated: ValidatedDescriptor,
    pub factors: DerivedFactors,
    pub colors: AvatarColors,
    #[serde(skip)]
    pub drawing: Drawing,
}

impl AvatarPreview {
    pub fn svg(&self) -> String {
        self.drawing.to_svg()
    }
}

/// Validate, derive factors, resolve colours and render, in that order.
#[tracing::instrument(skip_all, fields(height = raw.height, weight = raw.weight))]
pub fn preview_avatar(raw: &BodyDescriptor, opts: &RenderOptions) -> AvatarPreview {
    let validated = raw.validate();
    let factors = DerivedFactors::from_validated(&validated);
    let colors = AvatarColors::resolve(&validated);
    let drawing = AvatarRenderer::new(opts.clone()).render(&validated, &factors, &colors);
    AvatarPreview {
        validated,
        factors,
        colors,
        drawing,
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
