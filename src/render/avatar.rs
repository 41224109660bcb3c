//! Procedural avatar renderer.
//!
//! [`AvatarRenderer::render`] is a pure function of the validated descriptor, its derived
//! factors and the resolved colours. Unknown categorical values always select a default
//! visual; nothing here can fail.

use crate::body::descriptor::{
    BeardStyle, ClothingStyle, EyeColor, FaceShape, FootwearType, HairColor, HairStyle, SkinTone,
    ValidatedDescriptor,
};
use crate::body::factors::DerivedFactors;
use crate::body::palette::{DEFAULT_PANTS_HEX, DEFAULT_SHOE_HEX, palette_entry};
use crate::color::shade::{ColorPair, Rgb8};
use crate::foundation::core::{BezPath, Canvas, Point};
use crate::render::drawing::{Drawing, Gradient, Layer, Paint, Shape, Style, Text, num};
use crate::render::proportions::Anatomy;

const OUTLINE: &str = "#1A1A1A";
const BROW: &str = "#3E2723";
const GOLD: &str = "#FFD700";
const GOLD_EDGE: &str = "#DAA520";
const PANEL_BORDER: &str = "#E2E8F0";
const PANEL_TEXT: &str = "#1E293B";
const PANEL_MUTED: &str = "#64748B";
const PANEL_FAINT: &str = "#94A3B8";
const MEASURE: &str = "#8B5CF6";

const BG: &str = "studioBg";
const VIGNETTE: &str = "vignette";
const SKIN_RADIAL: &str = "skinRadial";
const SKIN_LINEAR: &str = "skinLinear";
const TOP: &str = "topGrad";
const PANTS: &str = "pantsGrad";
const FLOOR: &str = "floorShadow";
const HAIR: &str = "hairGrad";

const GLASSES_WORDS: &[&str] = &["glass", "spectacle", "kính"];
const NECKLACE_WORDS: &[&str] = &["necklace", "chain", "pendant", "vòng cổ", "dây chuyền"];
const WATCH_WORDS: &[&str] = &["watch", "đồng hồ"];
const HAT_WORDS: &[&str] = &["hat", "cap", "beanie", "mũ", "nón"];
const ARM_TATTOO_WORDS: &[&str] = &["arm", "sleeve", "tay"];
const BACK_TATTOO_WORDS: &[&str] = &["back", "lưng"];
const NOSE_WORDS: &[&str] = &["nose", "mũi"];

/// Muscle level from which abdominal and pectoral definition is drawn.
const DEFINED_MUSCLE_LEVEL: f64 = 4.0;

/// Renderer configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// Output viewBox.
    pub canvas: Canvas,
    /// Footer text; empty disables it.
    pub watermark: String,
    /// Draw the metric/style info panels around the figure.
    pub show_panels: bool,
    /// Draw the studio background and vignette.
    pub background: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            canvas: Canvas::AVATAR,
            watermark: "Virtual Model Preview".to_string(),
            show_panels: true,
            background: true,
        }
    }
}

/// Every colour the renderer paints with, resolved once per avatar.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AvatarColors {
    pub skin: ColorPair,
    pub hair: String,
    pub eye: String,
    pub top: String,
    pub pants: String,
    pub shoe: String,
}

impl AvatarColors {
    /// Resolve colours from the descriptor's categorical fields and palette.
    ///
    /// Palette entries and raw skin hex values that do not parse are replaced by the
    /// relevant default with a warning.
    pub fn resolve(d: &ValidatedDescriptor) -> Self {
        let skin_hex = d
            .skin_tone
            .as_ref()
            .map_or(SkinTone::DEFAULT.hex(), |t| t.hex());
        let skin = ColorPair::from_hex_or(skin_hex, SkinTone::DEFAULT.hex());

        let clothing = d.clothing_style.unwrap_or(ClothingStyle::DEFAULT);
        let top = sanitize(palette_entry(&d.color_palette, 0), clothing.hex());
        let pants = sanitize(palette_entry(&d.color_palette, 1), DEFAULT_PANTS_HEX);
        let shoe = d
            .footwear_type
            .and_then(FootwearType::hex)
            .unwrap_or(DEFAULT_SHOE_HEX)
            .to_string();

        Self {
            skin,
            hair: d.hair_color.unwrap_or(HairColor::DEFAULT).hex().to_string(),
            eye: d.eye_color.unwrap_or(EyeColor::DEFAULT).hex().to_string(),
            top,
            pants,
            shoe,
        }
    }
}

fn sanitize(candidate: Option<&str>, fallback: &str) -> String {
    match candidate {
        None => fallback.to_string(),
        Some(raw) => match Rgb8::parse_hex(raw) {
            Ok(c) => c.to_hex(),
            Err(err) => {
                tracing::warn!(%err, fallback, "palette colour replaced");
                fallback.to_string()
            }
        },
    }
}

fn mentions(haystack: &str, needles: &[&str]) -> bool {
    let lower = haystack.to_lowercase();
    needles.iter().any(|n| lower.contains(n))
}

/// Stateless avatar renderer.
#[derive(Clone, Debug, Default)]
pub struct AvatarRenderer {
    opts: RenderOptions,
}

impl AvatarRenderer {
    pub fn new(opts: RenderOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.opts
    }

    #[tracing::instrument(skip_all, fields(height = d.height, weight = d.weight))]
    pub fn render(
        &self,
        d: &ValidatedDescriptor,
        factors: &DerivedFactors,
        colors: &AvatarColors,
    ) -> Drawing {
        let mut scene = Scene {
            d,
            f: factors,
            c: colors,
            opts: &self.opts,
            a: Anatomy::new(self.opts.canvas, d, factors),
            out: Drawing::new(self.opts.canvas),
        };
        scene.defs();
        if self.opts.background {
            scene.background();
        }
        scene.floor_shadow();
        scene.legs();
        scene.footwear();
        scene.torso();
        scene.arms();
        scene.neck();
        scene.head();
        scene.ears();
        scene.hair();
        scene.face();
        scene.beard();
        scene.piercings();
        scene.accessories();
        scene.tattoos();
        scene.muscle_definition();
        if self.opts.show_panels {
            scene.panels();
        }
        scene.watermark();

        tracing::debug!(elements = scene.out.elements.len(), "avatar drawing built");
        scene.out
    }
}

/// Render with freshly resolved colours.
pub fn render_avatar(
    d: &ValidatedDescriptor,
    factors: &DerivedFactors,
    opts: &RenderOptions,
) -> Drawing {
    let colors = AvatarColors::resolve(d);
    AvatarRenderer::new(opts.clone()).render(d, factors, &colors)
}

struct Scene<'a> {
    d: &'a ValidatedDescriptor,
    f: &'a DerivedFactors,
    c: &'a AvatarColors,
    opts: &'a RenderOptions,
    a: Anatomy,
    out: Drawing,
}

fn outlined(paint: Paint, width: f64) -> Style {
    Style::filled(paint).stroke(OUTLINE, width).round()
}

impl Scene<'_> {
    fn w(&self) -> f64 {
        self.opts.canvas.width_f64()
    }

    fn h(&self) -> f64 {
        self.opts.canvas.height_f64()
    }

    fn defs(&mut self) {
        let skin = &self.c.skin;
        let top = self.c.top.clone();
        let pants = self.c.pants.clone();
        let hair = self.c.hair.clone();
        let defs = [
            Gradient::linear(BG, (0.0, 0.0), (0.0, 100.0))
                .stop(0.0, "#F8FAFC", 1.0)
                .stop(50.0, "#F1F5F9", 1.0)
                .stop(100.0, "#E2E8F0", 1.0),
            Gradient::radial(VIGNETTE, 50.0, 50.0)
                .stop(0.0, "#FFFFFF", 0.0)
                .stop(60.0, "#000000", 0.0)
                .stop(100.0, "#000000", 0.12),
            Gradient::radial(SKIN_RADIAL, 35.0, 30.0)
                .stop(0.0, skin.highlight.clone(), 1.0)
                .stop(20.0, skin.base.clone(), 1.0)
                .stop(70.0, skin.base.clone(), 0.98)
                .stop(100.0, skin.shade.clone(), 0.95),
            Gradient::linear(SKIN_LINEAR, (0.0, 0.0), (100.0, 0.0))
                .stop(0.0, skin.shade.clone(), 1.0)
                .stop(50.0, skin.base.clone(), 1.0)
                .stop(100.0, skin.shade.clone(), 1.0),
            Gradient::linear(TOP, (0.0, 0.0), (100.0, 100.0))
                .stop(0.0, top.clone(), 1.0)
                .stop(30.0, top.clone(), 1.0)
                .stop(60.0, top.clone(), 0.95)
                .stop(100.0, top, 0.85),
            Gradient::linear(PANTS, (0.0, 0.0), (100.0, 100.0))
                .stop(0.0, pants.clone(), 0.98)
                .stop(50.0, pants.clone(), 0.95)
                .stop(100.0, pants, 0.85),
            Gradient::radial(FLOOR, 50.0, 50.0)
                .stop(0.0, "#000000", 0.2)
                .stop(50.0, "#000000", 0.1)
                .stop(100.0, "#000000", 0.0),
            Gradient::linear(HAIR, (30.0, 0.0), (70.0, 100.0))
                .stop(0.0, hair.clone(), 1.0)
                .stop(40.0, hair.clone(), 0.98)
                .stop(100.0, hair, 0.9),
        ];
        for g in defs {
            self.out.define(g);
        }
    }

    fn background(&mut self) {
        let (w, h) = (self.w(), self.h());
        self.out.push(
            Layer::Background,
            Shape::rect(0.0, 0.0, w, h, 0.0),
            Style::filled(Paint::gradient(BG)),
        );
        self.out.push(
            Layer::Background,
            Shape::rect(0.0, 0.0, w, h, 0.0),
            Style::filled(Paint::gradient(VIGNETTE)),
        );
    }

    fn floor_shadow(&mut self) {
        let a = self.a;
        self.out.push(
            Layer::FloorShadow,
            Shape::ellipse(a.center_x, a.y.feet + 20.0, a.base_width * 2.5, 15.0),
            Style::filled(Paint::gradient(FLOOR)),
        );
    }

    fn legs(&mut self) {
        let a = self.a;
        let y = a.y;
        for s in [-1.0, 1.0] {
            let x = |off: f64| a.center_x + s * off;
            let mut p = BezPath::new();
            p.move_to((x(a.hip_width / 2.0 - 8.0), y.hips));
            p.curve_to(
                (x(a.thigh_width + 5.0), y.crotch + 20.0),
                (x(a.thigh_width), y.knee - 30.0),
                (x(a.thigh_width), y.knee),
            );
            p.curve_to(
                (x(a.knee_width + 2.0), y.knee + 15.0),
                (x(a.knee_width), y.ankle - 15.0),
                (x(a.ankle_width + 3.0), y.ankle),
            );
            p.line_to((x(a.ankle_width - 5.0), y.ankle));
            p.curve_to(
                (x(a.knee_width - 5.0), y.ankle - 15.0),
                (x(a.knee_width - 8.0), y.knee + 15.0),
                (x(a.thigh_width - 15.0), y.knee),
            );
            p.curve_to(
                (x(a.thigh_width - 15.0), y.knee - 30.0),
                (x(a.thigh_width - 18.0), y.crotch + 20.0),
                (x(3.0), y.hips),
            );
            p.close_path();
            self.out
                .push(Layer::Legs, Shape::Path(p), outlined(Paint::gradient(PANTS), 1.5));
        }
        for s in [-1.0, 1.0] {
            self.out.push(
                Layer::Legs,
                Shape::ellipse(a.center_x + s * (a.thigh_width - 8.0), y.knee, 10.0, 6.0),
                Style::fill("#FFFFFF").opacity(0.08),
            );
        }
    }

    fn footwear(&mut self) {
        let a = self.a;
        let shoe = self.c.shoe.clone();
        let edge = |fill: &str| Style::fill(fill).stroke("#000000", 1.2);
        for s in [-1.0, 1.0] {
            let x = a.center_x + s * a.ankle_width;
            match self.d.footwear_type {
                Some(FootwearType::Heels) => {
                    self.out.push(
                        Layer::Footwear,
                        Shape::ellipse(x, a.y.feet - 5.0, 16.0, 7.0),
                        edge(&shoe),
                    );
                    self.out.push(
                        Layer::Footwear,
                        Shape::line(x, a.y.feet - 5.0, x - s * 2.0, a.y.feet + 15.0),
                        Style::outline(shoe.clone(), 4.0).round(),
                    );
                }
                Some(FootwearType::Boots) => {
                    let left = if s < 0.0 { x - 10.0 } else { x - 14.0 };
                    self.out.push(
                        Layer::Footwear,
                        Shape::rect(left, a.y.ankle - 35.0, 24.0, 42.0, 4.0),
                        edge(&shoe),
                    );
                }
                _ => {
                    self.out.push(
                        Layer::Footwear,
                        Shape::ellipse(x, a.y.feet, 17.0, 8.0),
                        edge(&shoe),
                    );
                }
            }
        }
    }

    fn torso(&mut self) {
        let a = self.a;
        let (cx, y) = (a.center_x, a.y);
        let (sw, chw, ww, hw) = (
            a.shoulder_width / 2.0,
            a.chest_width / 2.0,
            a.waist_width / 2.0,
            a.hip_width / 2.0,
        );

        let mut p = BezPath::new();
        p.move_to((cx - sw, y.shoulders));
        p.curve_to(
            (cx - chw - 3.0, y.shoulders + 25.0),
            (cx - chw, y.chest - 15.0),
            (cx - chw, y.chest),
        );
        p.curve_to(
            (cx - ww - 4.0, y.chest + 20.0),
            (cx - ww, y.waist - 10.0),
            (cx - ww, y.waist),
        );
        p.curve_to(
            (cx - hw - 2.0, y.waist + 18.0),
            (cx - hw, y.hips - 10.0),
            (cx - hw, y.hips),
        );
        p.line_to((cx + hw, y.hips));
        p.curve_to(
            (cx + hw, y.hips - 10.0),
            (cx + hw + 2.0, y.waist + 18.0),
            (cx + ww, y.waist),
        );
        p.curve_to(
            (cx + ww, y.waist - 10.0),
            (cx + ww + 4.0, y.chest + 20.0),
            (cx + chw, y.chest),
        );
        p.curve_to(
            (cx + chw, y.chest - 15.0),
            (cx + chw + 3.0, y.shoulders + 25.0),
            (cx + sw, y.shoulders),
        );
        p.close_path();
        self.out
            .push(Layer::Torso, Shape::Path(p), outlined(Paint::gradient(TOP), 1.8));

        let shadow = |o: f64| Style::fill("#000000").opacity(o);
        for s in [-1.0, 1.0] {
            self.out.push(
                Layer::Torso,
                Shape::ellipse(cx + s * a.chest_width / 4.0, y.chest, 18.0, 22.0),
                shadow(0.08),
            );
        }
        self.out.push(
            Layer::Torso,
            Shape::ellipse(cx, y.waist, a.waist_width / 3.0, 15.0),
            shadow(0.06),
        );

        // Collar, centre seam and two fabric folds.
        self.out.push(
            Layer::Torso,
            Shape::ellipse(cx, y.neck + 8.0, a.head_radius * 0.35, a.head_radius * 0.12),
            Style::outline(self.c.top.clone(), 2.5).opacity(0.7),
        );
        self.out.push(
            Layer::Torso,
            Shape::line(cx, y.shoulders + 10.0, cx, y.waist - 5.0),
            Style::outline("#000000", 1.0).dashed(&[3.0, 2.0]).opacity(0.1),
        );
        let fold = |x: f64, y0: f64, dip: f64| {
            let mut p = BezPath::new();
            p.move_to((cx - x, y0));
            p.quad_to((cx, y0 + dip), (cx + x, y0));
            Shape::Path(p)
        };
        self.out.push(
            Layer::Torso,
            fold(a.chest_width * 0.25, y.chest, 3.0),
            Style::outline("#000000", 1.0).opacity(0.12),
        );
        self.out.push(
            Layer::Torso,
            fold(a.waist_width * 0.3, y.waist - 8.0, 3.0),
            Style::outline("#000000", 0.8).opacity(0.1),
        );
    }

    fn arms(&mut self) {
        let a = self.a;
        let y = a.y;
        let sw = a.shoulder_width / 2.0;
        for s in [-1.0, 1.0] {
            let x = |off: f64| a.center_x + s * (sw + off);

            let mut sleeve = BezPath::new();
            sleeve.move_to((x(-5.0), y.shoulders + 8.0));
            sleeve.curve_to(
                (x(8.0), y.shoulders + 35.0),
                (x(12.0), y.chest),
                (x(14.0), y.chest + 30.0),
            );
            sleeve.curve_to(
                (x(15.0), y.chest + 55.0),
                (x(14.0), y.waist - 10.0),
                (x(12.0), y.waist + 15.0),
            );
            sleeve.line_to((x(8.0), y.waist + 15.0));
            sleeve.curve_to(
                (x(10.0), y.waist - 10.0),
                (x(11.0), y.chest + 55.0),
                (x(10.0), y.chest + 30.0),
            );
            sleeve.curve_to(
                (x(8.0), y.chest),
                (x(4.0), y.shoulders + 35.0),
                (x(-3.0), y.shoulders + 12.0),
            );
            sleeve.close_path();
            self.out
                .push(Layer::Arms, Shape::Path(sleeve), outlined(Paint::gradient(TOP), 1.5));

            let mut forearm = BezPath::new();
            forearm.move_to((x(12.0), y.waist + 20.0));
            forearm.curve_to(
                (x(10.0), y.waist + 55.0),
                (x(9.0), y.hips - 5.0),
                (x(8.0), y.hips + 25.0),
            );
            forearm.line_to((x(5.0), y.hips + 25.0));
            forearm.curve_to(
                (x(6.0), y.hips - 5.0),
                (x(7.0), y.waist + 55.0),
                (x(9.0), y.waist + 20.0),
            );
            forearm.close_path();
            self.out.push(
                Layer::Arms,
                Shape::Path(forearm),
                outlined(Paint::gradient(SKIN_LINEAR), 1.3),
            );

            self.out.push(
                Layer::Arms,
                Shape::ellipse(x(6.5), y.hips + 32.0, 9.0, 11.0),
                Style::filled(Paint::gradient(SKIN_RADIAL)).stroke(OUTLINE, 1.2),
            );
            for (top, bottom, end) in [(10.0, 11.0, 40.0), (6.0, 6.0, 40.0), (2.0, 1.0, 39.0)] {
                self.out.push(
                    Layer::Arms,
                    Shape::line(x(top), y.hips + 32.0, x(bottom), y.hips + end),
                    Style::outline(OUTLINE, 1.0).opacity(0.6),
                );
            }
        }
    }

    fn neck(&mut self) {
        let a = self.a;
        let (cx, r, y) = (a.center_x, a.head_radius, a.y);
        let mut p = BezPath::new();
        p.move_to((cx - r * 0.35, y.neck - 5.0));
        p.curve_to(
            (cx - r * 0.4, y.neck + 8.0),
            (cx - r * 0.42, y.shoulders - 5.0),
            (cx - r * 0.45, y.shoulders),
        );
        p.line_to((cx + r * 0.45, y.shoulders));
        p.curve_to(
            (cx + r * 0.42, y.shoulders - 5.0),
            (cx + r * 0.4, y.neck + 8.0),
            (cx + r * 0.35, y.neck - 5.0),
        );
        p.close_path();
        self.out.push(
            Layer::Neck,
            Shape::Path(p),
            outlined(Paint::gradient(SKIN_LINEAR), 1.2),
        );
    }

    fn head(&mut self) {
        let a = self.a;
        let (cx, r, hy) = (a.center_x, a.head_radius, a.y.head);
        let skin = || Style::filled(Paint::gradient(SKIN_RADIAL)).stroke(OUTLINE, 2.0);
        let shape = match self.d.face_shape {
            Some(FaceShape::Round) => Shape::circle(cx, hy, r),
            Some(FaceShape::Square) => Shape::rect(cx - r * 0.9, hy - r, r * 1.8, r * 2.0, 12.0),
            Some(FaceShape::Long) => Shape::ellipse(cx, hy, r * 0.8, r * 1.15),
            Some(FaceShape::Heart) => {
                let mut p = BezPath::new();
                p.move_to((cx, hy - r * 0.95));
                p.curve_to(
                    (cx - r * 0.7, hy - r * 0.6),
                    (cx - r * 0.85, hy - r * 0.2),
                    (cx - r * 0.75, hy + r * 0.3),
                );
                p.quad_to((cx - r * 0.4, hy + r * 0.85), (cx, hy + r));
                p.quad_to((cx + r * 0.4, hy + r * 0.85), (cx + r * 0.75, hy + r * 0.3));
                p.curve_to(
                    (cx + r * 0.85, hy - r * 0.2),
                    (cx + r * 0.7, hy - r * 0.6),
                    (cx, hy - r * 0.95),
                );
                p.close_path();
                Shape::Path(p)
            }
            _ => Shape::ellipse(cx, hy, r * 0.88, r),
        };
        self.out.push(Layer::Head, shape, skin());
        self.out.push(
            Layer::Head,
            Shape::ellipse(cx, a.y.neck, r * 0.35, 5.0),
            Style::fill("#000000").opacity(0.08),
        );
    }

    fn ears(&mut self) {
        let a = self.a;
        for s in [-1.0, 1.0] {
            let x = a.center_x + s * a.head_radius * 0.88;
            self.out.push(
                Layer::Ears,
                Shape::ellipse(x, a.y.head + 3.0, 7.0, 12.0),
                Style::fill(self.c.skin.base.clone()).stroke(OUTLINE, 1.2),
            );
            self.out.push(
                Layer::Ears,
                Shape::ellipse(x, a.y.head + 5.0, 3.0, 5.0),
                Style::fill(self.c.skin.shade.clone()).opacity(0.4),
            );
        }
    }

    fn hair_cap(&mut self, rx: f64, ry: f64) {
        let a = self.a;
        self.out.push(
            Layer::Hair,
            Shape::ellipse(
                a.center_x,
                a.y.head - a.head_radius * 0.7,
                a.head_radius * rx,
                a.head_radius * ry,
            ),
            Style::filled(Paint::gradient(HAIR)).stroke(OUTLINE, 1.8),
        );
    }

    fn hair(&mut self) {
        let a = self.a;
        let (cx, r, y) = (a.center_x, a.head_radius, a.y);
        let hy = y.head;
        let hair = self.c.hair.clone();
        let strand = |w: f64| Style::filled(Paint::gradient(HAIR)).stroke(OUTLINE, w);

        match self.d.hair_style {
            Some(HairStyle::Bald) => {}
            Some(HairStyle::Long) => {
                self.hair_cap(1.05, 0.75);
                for s in [-1.0, 1.0] {
                    let x = |k: f64| cx + s * r * k;
                    let mut p = BezPath::new();
                    p.move_to((x(0.85), hy - r * 0.1));
                    p.curve_to(
                        (x(0.9), y.shoulders + 30.0),
                        (x(0.88), y.chest + 10.0),
                        (x(0.82), y.chest + 50.0),
                    );
                    p.line_to((x(0.68), y.chest + 50.0));
                    p.curve_to(
                        (x(0.74), y.chest + 10.0),
                        (x(0.76), y.shoulders + 30.0),
                        (x(0.72), hy - r * 0.1),
                    );
                    p.close_path();
                    self.out.push(Layer::Hair, Shape::Path(p), strand(1.3));
                }
            }
            Some(style @ (HairStyle::Short | HairStyle::BuzzCut)) => {
                let mut p = BezPath::new();
                p.move_to((cx - r * 0.85, hy - r * 0.4));
                p.quad_to((cx, hy - r * 1.05), (cx + r * 0.85, hy - r * 0.4));
                p.quad_to((cx + r * 0.92, hy - r * 0.2), (cx + r * 0.92, hy + r * 0.05));
                p.quad_to((cx + r * 0.85, hy + r * 0.25), (cx + r * 0.7, hy + r * 0.35));
                p.line_to((cx - r * 0.7, hy + r * 0.35));
                p.quad_to((cx - r * 0.85, hy + r * 0.25), (cx - r * 0.92, hy + r * 0.05));
                p.quad_to((cx - r * 0.92, hy - r * 0.2), (cx - r * 0.85, hy - r * 0.4));
                p.close_path();
                let style = if style == HairStyle::BuzzCut {
                    strand(1.0).opacity(0.85)
                } else {
                    strand(1.6)
                };
                self.out.push(Layer::Hair, Shape::Path(p), style);
            }
            Some(HairStyle::Medium) => {
                self.hair_cap(1.02, 0.72);
                for s in [-1.0, 1.0] {
                    let x = |k: f64| cx + s * r * k;
                    let mut p = BezPath::new();
                    p.move_to((x(0.82), hy));
                    p.line_to((x(0.78), y.shoulders - 15.0));
                    p.line_to((x(0.68), y.shoulders - 15.0));
                    p.line_to((x(0.7), hy));
                    p.close_path();
                    self.out.push(Layer::Hair, Shape::Path(p), strand(1.2));
                }
            }
            Some(HairStyle::Curly | HairStyle::Wavy) => {
                self.hair_cap(1.1, 0.78);
                for i in 0..8 {
                    let fi = f64::from(i);
                    self.out.push(
                        Layer::Hair,
                        Shape::circle(
                            cx - r * 0.7 + fi * r * 0.2,
                            hy - r * 0.65 + f64::from(i % 2) * 8.0,
                            6.0,
                        ),
                        Style::fill(hair.clone()).opacity(0.5),
                    );
                }
            }
            Some(HairStyle::Ponytail) => {
                self.hair_cap(0.95, 0.65);
                self.out.push(
                    Layer::Hair,
                    Shape::ellipse(cx, hy - r * 0.85, 13.0, 18.0),
                    Style::fill(hair.clone()).stroke(OUTLINE, 1.5),
                );
                self.out.push(
                    Layer::Hair,
                    Shape::ellipse(cx, hy - r * 1.15, 10.0, 25.0),
                    strand(1.3),
                );
            }
            Some(HairStyle::Bun) => {
                self.hair_cap(0.95, 0.65);
                self.out.push(
                    Layer::Hair,
                    Shape::circle(cx, hy - r * 1.05, 18.0),
                    Style::fill(hair.clone()).stroke(OUTLINE, 1.8),
                );
                self.out.push(
                    Layer::Hair,
                    Shape::circle(cx, hy - r * 1.05, 12.0),
                    Style::fill(hair.clone()).opacity(0.6),
                );
            }
            Some(HairStyle::Straight) => {
                self.hair_cap(1.02, 0.72);
                let height = y.shoulders - hy + 5.0;
                for x in [cx - r * 0.82, cx + r * 0.67] {
                    self.out.push(
                        Layer::Hair,
                        Shape::rect(x, hy - r * 0.05, r * 0.15, height, 2.0),
                        Style::fill(hair.clone()).stroke(OUTLINE, 0.8),
                    );
                }
            }
            None | Some(HairStyle::Unrecognized) => self.hair_cap(0.98, 0.68),
        }
    }

    fn face(&mut self) {
        let a = self.a;
        let (cx, r, hy) = (a.center_x, a.head_radius, a.y.head);
        let shade = self.c.skin.shade.clone();

        for s in [-1.0, 1.0] {
            let x = |k: f64| cx + s * r * k;

            let mut brow = BezPath::new();
            brow.move_to((x(0.42), hy - r * 0.28));
            brow.quad_to((x(0.25), hy - r * 0.33), (x(0.12), hy - r * 0.28));
            self.out
                .push(Layer::Face, Shape::Path(brow), Style::outline(BROW, 2.5).round());

            let ey = hy - r * 0.15;
            self.out.push(
                Layer::Face,
                Shape::ellipse(x(0.3), ey, 10.0, 12.0),
                Style::fill("#FFFFFF").stroke(OUTLINE, 1.2),
            );
            self.out
                .push(Layer::Face, Shape::circle(x(0.3), ey, 7.0), Style::fill(self.c.eye.clone()));
            self.out
                .push(Layer::Face, Shape::circle(x(0.3), ey, 4.0), Style::fill("#000000"));
            self.out.push(
                Layer::Face,
                Shape::circle(x(0.33), hy - r * 0.2, 2.0),
                Style::fill("#FFFFFF").opacity(0.95),
            );
            self.out.push(
                Layer::Face,
                Shape::ellipse(x(0.3), hy - r * 0.08, 9.0, 3.0),
                Style::outline(OUTLINE, 1.0).opacity(0.3),
            );
            self.out.push(
                Layer::Face,
                Shape::line(x(0.38), hy - r * 0.2, x(0.4), hy - r * 0.23),
                Style::outline("#000000", 1.0).round(),
            );

            // Nose bridge and nostril.
            self.out.push(
                Layer::Face,
                Shape::line(cx + s * 2.0, hy - r * 0.18, cx + s * 3.0, hy + r * 0.05),
                Style::outline(shade.clone(), 2.0).round().opacity(0.15),
            );
            self.out.push(
                Layer::Face,
                Shape::ellipse(cx + s * 5.0, hy + r * 0.06, 2.8, 3.5),
                Style::fill(shade.clone()).opacity(0.3),
            );
            self.out.push(
                Layer::Face,
                Shape::ellipse(cx + s * 5.0, hy + r * 0.06, 2.5, 3.0),
                Style::outline(OUTLINE, 0.8).opacity(0.4),
            );

            self.out.push(
                Layer::Face,
                Shape::ellipse(x(0.5), hy + r * 0.15, 13.0, 9.0),
                Style::fill("#FFB6C1").opacity(0.15),
            );
        }

        self.out.push(
            Layer::Face,
            Shape::ellipse(cx, hy + r * 0.02, 4.0, 5.0),
            Style::fill("#FFFFFF").opacity(0.15),
        );

        let lip_y = hy + r * 0.4;
        let mut upper = BezPath::new();
        upper.move_to((cx - r * 0.25, lip_y));
        upper.quad_to((cx - r * 0.1, hy + r * 0.38), (cx, hy + r * 0.39));
        upper.quad_to((cx + r * 0.1, hy + r * 0.38), (cx + r * 0.25, lip_y));
        self.out.push(
            Layer::Face,
            Shape::Path(upper),
            Style::fill("#D8868B").stroke("#B8565B", 1.0).opacity(0.9),
        );
        let mut lower = BezPath::new();
        lower.move_to((cx - r * 0.25, lip_y));
        lower.quad_to((cx, hy + r * 0.47), (cx + r * 0.25, lip_y));
        self.out.push(
            Layer::Face,
            Shape::Path(lower),
            Style::fill("#C76D72").stroke("#B8565B", 1.0).opacity(0.9),
        );
        let mut gloss = BezPath::new();
        gloss.move_to((cx - r * 0.18, hy + r * 0.42));
        gloss.quad_to((cx, hy + r * 0.43), (cx + r * 0.18, hy + r * 0.42));
        self.out.push(
            Layer::Face,
            Shape::Path(gloss),
            Style::outline("#FFFFFF", 1.5).round().opacity(0.5),
        );

        self.out.push(
            Layer::Face,
            Shape::ellipse(cx, hy + r * 0.65, r * 0.3, r * 0.15),
            Style::fill(shade).opacity(0.08),
        );
    }

    fn beard(&mut self) {
        let a = self.a;
        let (cx, r, hy) = (a.center_x, a.head_radius, a.y.head);
        match self.d.beard_style {
            Some(BeardStyle::Full) => {
                let mut p = BezPath::new();
                p.move_to((cx - r * 0.6, hy + r * 0.2));
                p.quad_to((cx - r * 0.5, hy + r * 0.65), (cx, hy + r * 0.85));
                p.quad_to((cx + r * 0.5, hy + r * 0.65), (cx + r * 0.6, hy + r * 0.2));
                p.line_to((cx + r * 0.45, hy + r * 0.15));
                p.line_to((cx - r * 0.45, hy + r * 0.15));
                p.close_path();
                self.out.push(
                    Layer::Beard,
                    Shape::Path(p),
                    Style::fill(BROW).stroke(OUTLINE, 1.2).opacity(0.9),
                );
            }
            Some(BeardStyle::Goatee) => {
                self.out.push(
                    Layer::Beard,
                    Shape::ellipse(cx, hy + r * 0.6, r * 0.22, r * 0.18),
                    Style::fill(BROW).stroke(OUTLINE, 0.8).opacity(0.85),
                );
            }
            Some(BeardStyle::Stubble) => {
                let mut p = BezPath::new();
                p.move_to((cx - r * 0.55, hy + r * 0.25));
                p.quad_to((cx, hy + r * 0.65), (cx + r * 0.55, hy + r * 0.25));
                self.out
                    .push(Layer::Beard, Shape::Path(p), Style::fill(BROW).opacity(0.25));
            }
            Some(BeardStyle::Mustache) => {
                for s in [-1.0, 1.0] {
                    let x = |k: f64| cx + s * r * k;
                    let mut p = BezPath::new();
                    p.move_to((x(0.28), hy + r * 0.32));
                    p.quad_to((x(0.15), hy + r * 0.28), (x(0.02), hy + r * 0.32));
                    self.out
                        .push(Layer::Beard, Shape::Path(p), Style::outline(BROW, 5.0).round());
                }
            }
            None | Some(BeardStyle::CleanShaven | BeardStyle::Unrecognized) => {}
        }
    }

    fn piercings(&mut self) {
        let Some(text) = self.d.piercings.as_deref().filter(|t| !t.trim().is_empty()) else {
            return;
        };
        let a = self.a;
        let stud = || Style::fill(GOLD).stroke(GOLD_EDGE, 1.0);
        for s in [-1.0, 1.0] {
            self.out.push(
                Layer::Piercings,
                Shape::circle(a.center_x + s * a.head_radius * 0.88, a.y.head + 8.0, 3.5),
                stud(),
            );
        }
        if mentions(text, NOSE_WORDS) {
            self.out.push(
                Layer::Piercings,
                Shape::circle(a.center_x + 6.0, a.y.head + a.head_radius * 0.06, 2.5),
                Style::fill("#E0E0E0").stroke("#B0B0B0", 0.8),
            );
        }
    }

    fn accessories(&mut self) {
        let items = &self.d.accessories;
        let any = |words: &[&str]| items.iter().any(|a| mentions(a, words));
        let (glasses, necklace, watch, hat) = (
            any(GLASSES_WORDS),
            any(NECKLACE_WORDS),
            any(WATCH_WORDS),
            any(HAT_WORDS),
        );

        let a = self.a;
        let (cx, r, y) = (a.center_x, a.head_radius, a.y);
        let frame = "#2C3E50";

        if glasses {
            for x in [cx - r * 0.45, cx + r * 0.1] {
                self.out.push(
                    Layer::Accessories,
                    Shape::rect(x, y.head - r * 0.22, r * 0.35, r * 0.25, 4.0),
                    Style::outline(frame, 2.5).opacity(0.95),
                );
            }
            let bar = y.head - r * 0.095;
            self.out.push(
                Layer::Accessories,
                Shape::line(cx - r * 0.1, bar, cx + r * 0.1, bar),
                Style::outline(frame, 2.5).round().opacity(0.95),
            );
            for s in [-1.0, 1.0] {
                self.out.push(
                    Layer::Accessories,
                    Shape::line(cx + s * r * 0.45, bar, cx + s * r * 0.78, y.head - r * 0.05),
                    Style::outline(frame, 2.0).opacity(0.95),
                );
                self.out.push(
                    Layer::Accessories,
                    Shape::ellipse(cx + s * r * 0.27, y.head - r * 0.12, 8.0, 10.0),
                    Style::fill("#FFFFFF").opacity(0.2),
                );
            }
        }

        if necklace {
            self.out.push(
                Layer::Accessories,
                Shape::ellipse(cx, y.neck + 12.0, r * 0.48, 6.0),
                Style::outline(GOLD, 3.5),
            );
            self.out.push(
                Layer::Accessories,
                Shape::circle(cx, y.neck + 18.0, 5.0),
                Style::fill(GOLD).stroke(GOLD_EDGE, 1.0),
            );
            self.out.push(
                Layer::Accessories,
                Shape::circle(cx, y.neck + 18.0, 3.0),
                Style::fill("#FFF8DC").opacity(0.7),
            );
        }

        if watch {
            let x = cx - a.shoulder_width / 2.0;
            self.out.push(
                Layer::Accessories,
                Shape::rect(x - 16.0, y.waist + 20.0, 16.0, 13.0, 3.0),
                Style::fill(frame).stroke(OUTLINE, 1.0),
            );
            self.out.push(
                Layer::Accessories,
                Shape::circle(x - 8.0, y.waist + 26.5, 5.0),
                Style::fill("#E8E8E8").stroke("#000000", 0.5),
            );
            for (dx, dy) in [(0.0, -3.5), (2.0, 0.0)] {
                self.out.push(
                    Layer::Accessories,
                    Shape::line(x - 8.0, y.waist + 26.5, x - 8.0 + dx, y.waist + 26.5 + dy),
                    Style::outline("#000000", 0.8).round(),
                );
            }
        }

        if hat {
            self.out.push(
                Layer::Accessories,
                Shape::ellipse(cx, y.head - r * 1.05, r * 1.1, r * 0.28),
                Style::fill("#DC2626").stroke(OUTLINE, 1.8),
            );
        }
    }

    fn tattoos(&mut self) {
        let Some(text) = self.d.tattoos.as_deref().filter(|t| !t.trim().is_empty()) else {
            return;
        };
        let a = self.a;
        let y = a.y;
        let ink = |w: f64| Style::outline(OUTLINE, w).round().opacity(0.75);

        if mentions(text, ARM_TATTOO_WORDS) {
            let x = a.center_x + a.shoulder_width / 2.0;
            self.out.push(
                Layer::Tattoos,
                Shape::circle(x + 10.0, y.waist, 8.0),
                Style::fill("#8B4513").opacity(0.3),
            );
            let mut p = BezPath::new();
            p.move_to((x + 8.0, y.waist + 15.0));
            p.quad_to((x + 12.0, y.waist + 22.0), (x + 8.0, y.waist + 30.0));
            p.move_to((x + 6.0, y.waist + 18.0));
            p.quad_to((x + 13.0, y.waist + 24.0), (x + 10.0, y.waist + 28.0));
            self.out.push(Layer::Tattoos, Shape::Path(p), ink(2.5));
        }

        if mentions(text, BACK_TATTOO_WORDS) {
            // Small butterfly between the shoulder blades.
            let (cx, cy) = (a.center_x, y.waist - 32.0);
            for s in [-1.0, 1.0] {
                self.out.push(
                    Layer::Tattoos,
                    Shape::ellipse(cx + s * 6.0, cy - 4.0, 6.0, 7.0),
                    Style::fill("#4C1D95").opacity(0.45),
                );
                self.out.push(
                    Layer::Tattoos,
                    Shape::ellipse(cx + s * 5.0, cy + 6.0, 4.0, 5.0),
                    Style::fill("#4C1D95").opacity(0.45),
                );
            }
            self.out
                .push(Layer::Tattoos, Shape::line(cx, cy - 9.0, cx, cy + 10.0), ink(1.5));
        }
    }

    fn muscle_definition(&mut self) {
        if self.d.muscle_level.is_none_or(|m| m < DEFINED_MUSCLE_LEVEL) {
            return;
        }
        let a = self.a;
        let (cx, y) = (a.center_x, a.y);
        let tone = || Style::fill("#000000").opacity(0.15);
        for s in [-1.0, 1.0] {
            self.out.push(
                Layer::MuscleDefinition,
                Shape::ellipse(cx + s * a.chest_width / 3.5, y.chest, 22.0, 26.0),
                tone(),
            );
        }
        for top in [y.chest + 28.0, y.waist - 35.0] {
            for x in [cx - 12.0, cx + 2.0] {
                self.out.push(
                    Layer::MuscleDefinition,
                    Shape::rect(x, top, 10.0, 14.0, 3.0),
                    tone(),
                );
            }
        }
    }

    fn panel(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64) {
        self.out.push(
            Layer::Panels,
            Shape::rect(x, y, w, h, radius),
            Style::fill("#FFFFFF").stroke(PANEL_BORDER, 2.0).opacity(0.98),
        );
    }

    fn label(&mut self, x: f64, y: f64, size: f64, color: &str, weight: u16, text: String) {
        self.out.push(
            Layer::Panels,
            Shape::Text(Text::new(Point::new(x, y), text, size).weight(weight)),
            Style::fill(color),
        );
    }

    fn panels(&mut self) {
        let d = self.d;
        let (w, h) = (self.w(), self.h());

        // Metrics, top left.
        let measured = d.shoulder_width.is_some() || d.waist_size.is_some();
        self.panel(12.0, 12.0, 110.0, if measured { 105.0 } else { 75.0 }, 10.0);
        self.label(22.0, 32.0, 13.0, PANEL_TEXT, 700, format!("{} cm", num(d.height)));
        self.label(22.0, 50.0, 13.0, PANEL_TEXT, 700, format!("{} kg", num(d.weight)));
        self.label(22.0, 68.0, 13.0, PANEL_TEXT, 700, format!("BMI {:.1}", self.f.bmi));
        if let Some(sw) = d.shoulder_width {
            self.label(22.0, 86.0, 11.0, PANEL_MUTED, 600, format!("Shoulders {} cm", num(sw)));
        }
        if let Some(ws) = d.waist_size {
            self.label(22.0, 101.0, 11.0, PANEL_MUTED, 600, format!("Waist {} cm", num(ws)));
        }

        // Personal, top right. Rows collapse upward when a field is missing.
        let tall = d.age_appearance.is_some()
            || d.hip_size.is_some()
            || d.body_proportion_preset.is_some();
        self.panel(w - 122.0, 12.0, 110.0, if tall { 120.0 } else { 75.0 }, 10.0);
        let gender = d.gender.map_or("Unspecified", |g| g.label());
        self.label(w - 108.0, 32.0, 13.0, PANEL_TEXT, 700, gender.to_string());
        let mut row = 50.0;
        if let Some(age) = d.age_appearance {
            self.label(w - 108.0, row, 12.0, PANEL_MUTED, 600, format!("Age {}", num(age)));
            row += 18.0;
        }
        if let Some(shape) = d.body_shape {
            self.label(w - 108.0, row, 11.0, PANEL_MUTED, 600, shape.label().to_string());
            row += 18.0;
        }
        if let Some(hip) = d.hip_size {
            self.label(w - 108.0, row, 11.0, PANEL_MUTED, 600, format!("Hips {} cm", num(hip)));
            row += 18.0;
        }
        if let Some(preset) = d.body_proportion_preset {
            self.label(w - 108.0, row, 10.0, PANEL_FAINT, 500, preset.label().to_string());
        }

        // Style, bottom left.
        let styled = d.clothing_style.is_some() || d.footwear_type.is_some();
        if styled {
            let shoes = d.footwear_type.is_some();
            self.panel(
                12.0,
                h - if shoes { 60.0 } else { 38.0 },
                120.0,
                if shoes { 48.0 } else { 26.0 },
                10.0,
            );
            if let Some(style) = d.clothing_style {
                let y = h - if shoes { 38.0 } else { 18.0 };
                self.label(22.0, y, 11.0, PANEL_MUTED, 600, format!("Style: {}", style.label()));
            }
            if let Some(shoe) = d.footwear_type {
                self.label(22.0, h - 18.0, 11.0, PANEL_MUTED, 600, format!("Shoes: {}", shoe.label()));
            }
        }

        // Accessories, bottom right. First three only.
        if !d.accessories.is_empty() {
            self.panel(w - 132.0, h - 38.0, 120.0, 26.0, 10.0);
            let list: Vec<&str> = d.accessories.iter().take(3).map(String::as_str).collect();
            self.label(w - 120.0, h - 18.0, 10.0, PANEL_MUTED, 600, list.join(", "));
        }

        // Palette swatches, first four parseable colours.
        let swatches: Vec<String> = d
            .color_palette
            .iter()
            .filter_map(|c| Rgb8::parse_hex(c).ok())
            .take(4)
            .map(Rgb8::to_hex)
            .collect();
        if !swatches.is_empty() {
            let lift = if styled { 88.0 } else { 68.0 };
            self.out.push(
                Layer::Panels,
                Shape::rect(12.0, h - lift, 75.0, 22.0, 6.0),
                Style::fill("#FFFFFF").stroke(PANEL_BORDER, 1.5).opacity(0.95),
            );
            for (i, hex) in swatches.into_iter().enumerate() {
                self.out.push(
                    Layer::Panels,
                    Shape::circle(20.0 + i as f64 * 17.0, h - lift + 11.0, 7.0),
                    Style::fill(hex).stroke(OUTLINE, 1.2),
                );
            }
        }

        // Leg length guide beside the right hip.
        if let Some(leg) = d.leg_length {
            let a = self.a;
            let x = a.center_x + a.hip_width / 2.0 + 25.0;
            self.out.push(
                Layer::Panels,
                Shape::line(x, a.y.hips, x, a.y.feet),
                Style::outline(MEASURE, 2.5).round().dashed(&[6.0, 4.0]).opacity(0.6),
            );
            for cy in [a.y.hips, a.y.feet] {
                self.out.push(
                    Layer::Panels,
                    Shape::circle(x, cy, 4.0),
                    Style::fill(MEASURE).opacity(0.6),
                );
            }
            let mid = (a.y.hips + a.y.feet) / 2.0 + 5.0;
            self.label(x + 10.0, mid, 12.0, MEASURE, 700, format!("{} cm", num(leg)));
        }

        // Skin tone tab on the right edge.
        self.out.push(
            Layer::Panels,
            Shape::rect(w - 28.0, h - 100.0, 20.0, 85.0, 6.0),
            Style::fill("#FFFFFF").stroke(PANEL_BORDER, 1.5).opacity(0.95),
        );
        let tone = d
            .skin_tone
            .as_ref()
            .map_or(SkinTone::DEFAULT.label(), |t| t.label())
            .to_string();
        self.out.push(
            Layer::Panels,
            Shape::Text(
                Text::new(Point::new(w - 18.0, h - 50.0), tone, 10.0)
                    .weight(600)
                    .rotated(90.0),
            ),
            Style::fill(PANEL_MUTED),
        );
    }

    fn watermark(&mut self) {
        if self.opts.watermark.is_empty() {
            return;
        }
        let (cx, h) = (self.w() / 2.0, self.h());
        self.out.push(
            Layer::Watermark,
            Shape::Text(
                Text::new(Point::new(cx, h - 8.0), self.opts.watermark.clone(), 10.0)
                    .centered()
                    .weight(500),
            ),
            Style::fill("#CBD5E1"),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/avatar.rs"]
mod tests;
