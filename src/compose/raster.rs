//! Composition rasterizer.
//!
//! Fragments are looked up through a [`FragmentResolver`], decoded to premultiplied RGBA8 at
//! their target size and composited back to front. Blending runs on premultiplied pixels.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use anyhow::Context;

use crate::compose::part::{BlendMode, BodyComposition};
use crate::foundation::core::clamp_finite;
use crate::foundation::error::{SilhouetteError, SilhouetteResult};
use crate::render::raster::{
    MAX_RASTER_DIM, demultiply_rgba8_in_place, parse_svg, premultiply_rgba8_in_place,
    rasterize_tree_premul,
};

pub type PremulRgba8 = [u8; 4];

/// Source of image bytes for a part's `image_path`.
pub trait FragmentResolver: Send + Sync {
    /// Raw encoded bytes, or `None` when no fragment exists at `image_path`.
    fn resolve(&self, image_path: &str) -> SilhouetteResult<Option<Vec<u8>>>;
}

/// Resolves `image_path` values relative to a root directory.
///
/// A leading `/` is treated as the root itself. Paths with `..` or platform prefixes are
/// rejected so lookups cannot leave the root.
#[derive(Clone, Debug)]
pub struct DirFragmentResolver {
    root: PathBuf,
}

impl DirFragmentResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map `image_path` to a file under the root.
    pub fn locate(&self, image_path: &str) -> SilhouetteResult<PathBuf> {
        let rel = Path::new(image_path.trim_start_matches(['/', '\\']));
        let mut out = self.root.clone();
        for comp in rel.components() {
            match comp {
                Component::Normal(seg) => out.push(seg),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(SilhouetteError::validation(format!(
                        "fragment path escapes asset root: {image_path}"
                    )));
                }
            }
        }
        if out == self.root {
            return Err(SilhouetteError::validation(format!(
                "empty fragment path: {image_path:?}"
            )));
        }
        Ok(out)
    }
}

impl FragmentResolver for DirFragmentResolver {
    fn resolve(&self, image_path: &str) -> SilhouetteResult<Option<Vec<u8>>> {
        let path = self.locate(image_path)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("read fragment {}", path.display()))
                .into()),
        }
    }
}

fn is_svg(image_path: &str, bytes: &[u8]) -> bool {
    if Path::new(image_path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
    {
        return true;
    }
    let head = &bytes[..bytes.len().min(512)];
    String::from_utf8_lossy(head).contains("<svg")
}

/// Decode `bytes` and scale them to exactly `width`x`height`, premultiplied.
pub fn decode_fragment(
    image_path: &str,
    bytes: &[u8],
    width: u32,
    height: u32,
) -> SilhouetteResult<Vec<u8>> {
    if is_svg(image_path, bytes) {
        let tree = parse_svg(bytes)?;
        return rasterize_tree_premul(&tree, width, height);
    }

    let img = image::load_from_memory(bytes)
        .with_context(|| format!("decode image {image_path}"))?
        .to_rgba8();
    let img = if img.dimensions() == (width, height) {
        img
    } else {
        image::imageops::resize(&img, width, height, image::imageops::FilterType::Triangle)
    };
    let mut rgba = img.into_raw();
    premultiply_rgba8_in_place(&mut rgba);
    Ok(rgba)
}

/// Source-over with an extra opacity multiplier.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = mul_div255(u16::from(dst[3]), inv).saturating_add(sa);
    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Separable blend: `f(src, dst)` on straight channels, combined with Porter-Duff source-over.
pub fn blend(
    dst: PremulRgba8,
    src: PremulRgba8,
    opacity: f32,
    f: impl Fn(f32, f32) -> f32,
) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let sa = f32::from(src[3]) / 255.0 * opacity;
    let da = f32::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);

    let mut out = [0u8; 4];
    for i in 0..3 {
        let sp = f32::from(src[i]) / 255.0 * opacity;
        let dp = f32::from(dst[i]) / 255.0;
        let s = if sa > 0.0 { (sp / sa).min(1.0) } else { 0.0 };
        let d = if da > 0.0 { (dp / da).min(1.0) } else { 0.0 };
        let c = sp * (1.0 - da) + dp * (1.0 - sa) + sa * da * f(s, d);
        out[i] = to_u8(c);
    }
    out[3] = to_u8(out_a);
    out
}

pub fn blend_pixel(mode: BlendMode, dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    match mode {
        BlendMode::Normal => over(dst, src, opacity),
        BlendMode::Multiply => blend(dst, src, opacity, |s, d| s * d),
        BlendMode::Screen => blend(dst, src, opacity, |s, d| s + d - s * d),
        BlendMode::Overlay => blend(dst, src, opacity, |s, d| {
            if d <= 0.5 {
                2.0 * s * d
            } else {
                1.0 - 2.0 * (1.0 - s) * (1.0 - d)
            }
        }),
    }
}

/// A premultiplied RGBA8 canvas.
#[derive(Clone, Debug)]
struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Composite `src` (`sw`x`sh`) with its top-left at `(x, y)`, clipped to the surface.
    #[allow(clippy::too_many_arguments)]
    fn draw(
        &mut self,
        src: &[u8],
        sw: u32,
        sh: u32,
        x: i64,
        y: i64,
        mode: BlendMode,
        opacity: f32,
    ) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(i64::from(sw)).min(i64::from(self.width));
        let y1 = y.saturating_add(i64::from(sh)).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for dy in y0..y1 {
            let sy = (dy - y) as usize;
            for dx in x0..x1 {
                let sx = (dx - x) as usize;
                let si = (sy * sw as usize + sx) * 4;
                let di = (dy as usize * self.width as usize + dx as usize) * 4;
                let s = [src[si], src[si + 1], src[si + 2], src[si + 3]];
                let d = [
                    self.data[di],
                    self.data[di + 1],
                    self.data[di + 2],
                    self.data[di + 3],
                ];
                self.data[di..di + 4].copy_from_slice(&blend_pixel(mode, d, s, opacity));
            }
        }
    }

    fn into_image(mut self) -> SilhouetteResult<image::RgbaImage> {
        demultiply_rgba8_in_place(&mut self.data);
        image::RgbaImage::from_raw(self.width, self.height, self.data)
            .ok_or_else(|| SilhouetteError::render("composition buffer size mismatch"))
    }
}

fn target_dim(v: f64) -> Option<u32> {
    let v = v.round();
    if v.is_finite() && v >= 1.0 && v <= f64::from(MAX_RASTER_DIM) {
        Some(v as u32)
    } else {
        None
    }
}

/// Rounded pixel origin of a span of `extent` pixels starting at `v`, or `None` when the
/// span misses `0..limit` entirely.
fn visible_origin(v: f64, extent: u32, limit: u32) -> Option<i64> {
    let v = v.round();
    if !v.is_finite() || v >= f64::from(limit) || v + f64::from(extent) <= 0.0 {
        return None;
    }
    Some(v as i64)
}

/// Rasterize `composition` onto a transparent canvas of its `canvas_size`.
///
/// The base image, when present and resolvable, is stretched to the whole canvas first. Parts
/// follow in list order. Unresolvable fragments and degenerate rectangles are skipped with a
/// warning, parts entirely off the canvas are skipped silently; malformed fragment bytes are an error.
#[tracing::instrument(skip_all, fields(id = %composition.id, parts = composition.parts.len()))]
pub fn rasterize_composition(
    composition: &BodyComposition,
    resolver: &dyn FragmentResolver,
) -> SilhouetteResult<image::RgbaImage> {
    let canvas = composition.canvas_size;
    if canvas.width == 0
        || canvas.height == 0
        || canvas.width > MAX_RASTER_DIM
        || canvas.height > MAX_RASTER_DIM
    {
        return Err(SilhouetteError::render(format!(
            "composition canvas out of range: {}x{}",
            canvas.width, canvas.height
        )));
    }
    let mut surface = Surface::new(canvas.width, canvas.height);

    if let Some(base) = composition.base_image.as_deref() {
        match resolver.resolve(base)? {
            Some(bytes) => {
                let px = decode_fragment(base, &bytes, canvas.width, canvas.height)?;
                surface.draw(&px, canvas.width, canvas.height, 0, 0, BlendMode::Normal, 1.0);
            }
            None => tracing::warn!(path = base, "base image not found, skipping"),
        }
    }

    for part in &composition.parts {
        let rect = &part.position;
        let (Some(w), Some(h)) = (target_dim(rect.width), target_dim(rect.height)) else {
            tracing::warn!(id = %part.id, ?rect, "degenerate part rectangle, skipping");
            continue;
        };
        let (Some(x), Some(y)) = (
            visible_origin(rect.x, w, canvas.width),
            visible_origin(rect.y, h, canvas.height),
        ) else {
            tracing::debug!(id = %part.id, ?rect, "part outside canvas, skipping");
            continue;
        };
        let Some(bytes) = resolver.resolve(&part.image_path)? else {
            tracing::warn!(id = %part.id, path = %part.image_path, "fragment not found, skipping");
            continue;
        };
        let px = decode_fragment(&part.image_path, &bytes, w, h)?;
        let opacity = clamp_finite(part.opacity, 0.0, 1.0) as f32;
        surface.draw(&px, w, h, x, y, part.blend_mode, opacity);
    }

    surface.into_image()
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/compose/raster.rs"]
mod tests;
