//! Silhouette turns a body description into a stylized avatar, and stacks image fragments
//! into body-part compositions.
//!
//! - Clamp a [`BodyDescriptor`] into a [`ValidatedDescriptor`]
//! - Derive BMI, width and muscle factors ([`DerivedFactors`])
//! - Render a layered SVG [`Drawing`] with [`AvatarRenderer`], or all at once with
//!   [`preview_avatar`]
//! - Manage parts and compositions through a [`BodyPartsComposer`] and rasterize them with
//!   [`rasterize_composition`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod body;
pub(crate) mod color;
pub(crate) mod compose;
pub(crate) mod pipeline;
pub(crate) mod render;

pub use crate::foundation::core::{BezPath, Canvas, Point, Rect, Vec2};
pub use crate::foundation::error::{SilhouetteError, SilhouetteResult};

pub use crate::body::descriptor::{
    BeardStyle, BodyDescriptor, BodyShape, ClothingStyle, EyeColor, FaceShape, FootwearType,
    Gender, HairColor, HairStyle, ProportionPreset, SkinTone, SkinToneSpec, ValidatedDescriptor,
};
pub use crate::body::factors::{
    BmiBand, DerivedFactors, FAT_LEVEL_STEP, MUSCLE_BASE, MUSCLE_STEP, WIDTH_FACTOR_MAX,
    WIDTH_FACTOR_MIN, calculate_bmi, calculate_body_width_factor, calculate_muscle_factor,
    checked_bmi,
};
pub use crate::body::palette::{DEFAULT_PANTS_HEX, DEFAULT_SHOE_HEX};
pub use crate::body::validate::{
    AGE_APPEARANCE, FAT_LEVEL, HEIGHT_CM, MUSCLE_LEVEL, MetricRange, WEIGHT_KG,
    validate_age_appearance, validate_fat_level, validate_height, validate_muscle_level,
    validate_weight,
};
pub use crate::color::shade::{
    ColorPair, HIGHLIGHT_FACTOR, Rgb8, SHADE_FACTOR, skin_highlight, skin_shade,
};

pub use crate::render::avatar::{AvatarColors, AvatarRenderer, RenderOptions, render_avatar};
pub use crate::render::drawing::{
    Drawing, Element, Gradient, GradientKind, GradientStop, Layer, Paint, Shape, Stroke, Style,
    Text, TextAnchor,
};
pub use crate::render::proportions::{Anatomy, Landmarks};
pub use crate::render::raster::{MAX_RASTER_DIM, rasterize_drawing};

pub use crate::compose::catalog::default_parts;
pub use crate::compose::composer::{
    BodyPartsComposer, ComposeRequest, ComposerConfig, PartRef,
};
pub use crate::compose::part::{
    BlendMode, BodyComposition, BodyPart, CompositionUpdate, LegacyPartCategory, PartCategory,
    PartRect,
};
pub use crate::compose::raster::{
    DirFragmentResolver, FragmentResolver, PremulRgba8, blend_pixel, decode_fragment,
    rasterize_composition,
};
pub use crate::compose::store::{CompositorStore, InMemoryStore};
pub use crate::compose::validate::{CompositionValidation, rects_overlap, validate_composition};

pub use crate::pipeline::{AvatarPreview, preview_avatar};
