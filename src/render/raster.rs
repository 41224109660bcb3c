use std::sync::{Arc, OnceLock};

use anyhow::Context;

use crate::foundation::error::{SilhouetteError, SilhouetteResult};
use crate::render::drawing::Drawing;

/// Largest raster edge accepted from SVG input.
pub const MAX_RASTER_DIM: u32 = 16_384;

/// Shared font database, loaded from system fonts on first use.
fn fontdb() -> Arc<usvg::fontdb::Database> {
    static DB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Arc::new(db)
    })
    .clone()
}

/// Parse SVG bytes with the shared font database.
pub fn parse_svg(bytes: &[u8]) -> SilhouetteResult<usvg::Tree> {
    let opts = usvg::Options {
        fontdb: fontdb(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(tree)
}

/// Rasterize a parsed tree, scaled to fill `width`x`height`, into premultiplied RGBA8.
pub fn rasterize_tree_premul(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> SilhouetteResult<Vec<u8>> {
    if width == 0 || height == 0 || width > MAX_RASTER_DIM || height > MAX_RASTER_DIM {
        return Err(SilhouetteError::render(format!(
            "raster size out of range: {width}x{height} (max {MAX_RASTER_DIM})"
        )));
    }
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| SilhouetteError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * a + 127) / 255) as u8;
        }
    }
}

/// Convert premultiplied RGBA8 back to straight alpha, in place.
pub(crate) fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

/// Rasterize an avatar drawing at `scale` times its canvas size.
#[tracing::instrument(skip(drawing), fields(w = drawing.canvas.width, h = drawing.canvas.height))]
pub fn rasterize_drawing(drawing: &Drawing, scale: f64) -> SilhouetteResult<image::RgbaImage> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(SilhouetteError::render(format!("invalid raster scale {scale}")));
    }
    let width = (drawing.canvas.width_f64() * scale).round().max(1.0) as u32;
    let height = (drawing.canvas.height_f64() * scale).round().max(1.0) as u32;

    let svg = drawing.to_svg();
    let tree = parse_svg(svg.as_bytes())?;
    let mut rgba = rasterize_tree_premul(&tree, width, height)?;
    demultiply_rgba8_in_place(&mut rgba);

    image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| SilhouetteError::render("raster buffer size mismatch"))
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
