//! Retained vector description of an avatar and its SVG serialisation.
//!
//! The renderer only builds a [`Drawing`]; turning it into SVG text (and from there into
//! pixels) is a separate step so callers can inspect layers and shapes directly.

use std::fmt::Write as _;

use kurbo::PathEl;

use crate::foundation::core::{BezPath, Canvas, Point, Rect};

/// Semantic layer of an element, in back-to-front paint order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Background,
    FloorShadow,
    Legs,
    Footwear,
    Torso,
    Arms,
    Neck,
    Head,
    Ears,
    Hair,
    Face,
    Beard,
    Piercings,
    Accessories,
    Tattoos,
    MuscleDefinition,
    Panels,
    Watermark,
}

impl Layer {
    pub fn as_str(self) -> &'static str {
        match self {
            Layer::Background => "background",
            Layer::FloorShadow => "floor-shadow",
            Layer::Legs => "legs",
            Layer::Footwear => "footwear",
            Layer::Torso => "torso",
            Layer::Arms => "arms",
            Layer::Neck => "neck",
            Layer::Head => "head",
            Layer::Ears => "ears",
            Layer::Hair => "hair",
            Layer::Face => "face",
            Layer::Beard => "beard",
            Layer::Piercings => "piercings",
            Layer::Accessories => "accessories",
            Layer::Tattoos => "tattoos",
            Layer::MuscleDefinition => "muscle-definition",
            Layer::Panels => "panels",
            Layer::Watermark => "watermark",
        }
    }
}

/// Fill or stroke paint.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    None,
    /// Any CSS colour string (`#RRGGBB`, `rgb(..)`, `white`).
    Color(String),
    /// Reference to a [`Gradient`] in the drawing's defs.
    Gradient(String),
}

impl Paint {
    pub fn color(c: impl Into<String>) -> Self {
        Paint::Color(c.into())
    }

    pub fn gradient(id: impl Into<String>) -> Self {
        Paint::Gradient(id.into())
    }

    fn to_attr(&self) -> String {
        match self {
            Paint::None => "none".to_string(),
            Paint::Color(c) => c.clone(),
            Paint::Gradient(id) => format!("url(#{id})"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f64,
    pub round: bool,
    pub dash: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub fill: Paint,
    pub stroke: Option<Stroke>,
    pub opacity: Option<f64>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Paint::None,
            stroke: None,
            opacity: None,
        }
    }
}

impl Style {
    pub fn filled(paint: Paint) -> Self {
        Self {
            fill: paint,
            ..Self::default()
        }
    }

    pub fn fill(color: impl Into<String>) -> Self {
        Self::filled(Paint::color(color))
    }

    /// Unfilled, stroked outline.
    pub fn outline(color: impl Into<String>, width: f64) -> Self {
        Self::default().stroke(color, width)
    }

    pub fn stroke(mut self, color: impl Into<String>, width: f64) -> Self {
        self.stroke = Some(Stroke {
            paint: Paint::color(color),
            width,
            round: false,
            dash: Vec::new(),
        });
        self
    }

    pub fn stroke_paint(mut self, paint: Paint, width: f64) -> Self {
        self.stroke = Some(Stroke {
            paint,
            width,
            round: false,
            dash: Vec::new(),
        });
        self
    }

    /// Round line caps and joins on the current stroke.
    pub fn round(mut self) -> Self {
        if let Some(s) = self.stroke.as_mut() {
            s.round = true;
        }
        self
    }

    pub fn dashed(mut self, dash: &[f64]) -> Self {
        if let Some(s) = self.stroke.as_mut() {
            s.dash = dash.to_vec();
        }
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    pub pos: Point,
    pub content: String,
    pub size: f64,
    pub anchor: TextAnchor,
    pub weight: u16,
    /// Clockwise rotation in degrees around `pos`.
    pub rotate: Option<f64>,
}

impl Text {
    pub fn new(pos: Point, content: impl Into<String>, size: f64) -> Self {
        Self {
            pos,
            content: content.into(),
            size,
            anchor: TextAnchor::Start,
            weight: 400,
            rotate: None,
        }
    }

    pub fn centered(mut self) -> Self {
        self.anchor = TextAnchor::Middle;
        self
    }

    pub fn weight(mut self, weight: u16) -> Self {
        self.weight = weight;
        self
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotate = Some(degrees);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Path(BezPath),
    Rect { rect: Rect, radius: f64 },
    Ellipse { center: Point, rx: f64, ry: f64 },
    Circle { center: Point, r: f64 },
    Line { from: Point, to: Point },
    Text(Text),
}

impl Shape {
    pub fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        Shape::Ellipse {
            center: Point::new(cx, cy),
            rx,
            ry,
        }
    }

    pub fn circle(cx: f64, cy: f64, r: f64) -> Self {
        Shape::Circle {
            center: Point::new(cx, cy),
            r,
        }
    }

    pub fn rect(x: f64, y: f64, w: f64, h: f64, radius: f64) -> Self {
        Shape::Rect {
            rect: Rect::new(x, y, x + w, y + h),
            radius,
        }
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Shape::Line {
            from: Point::new(x1, y1),
            to: Point::new(x2, y2),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub layer: Layer,
    pub shape: Shape,
    pub style: Style,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GradientKind {
    /// Endpoints in percent of the bounding box.
    Linear { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// Centre in percent of the bounding box.
    Radial { cx: f64, cy: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct GradientStop {
    /// Offset in percent.
    pub offset: f64,
    pub color: String,
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    pub id: String,
    pub kind: GradientKind,
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    pub fn linear(id: impl Into<String>, from: (f64, f64), to: (f64, f64)) -> Self {
        Self {
            id: id.into(),
            kind: GradientKind::Linear {
                x1: from.0,
                y1: from.1,
                x2: to.0,
                y2: to.1,
            },
            stops: Vec::new(),
        }
    }

    pub fn radial(id: impl Into<String>, cx: f64, cy: f64) -> Self {
        Self {
            id: id.into(),
            kind: GradientKind::Radial { cx, cy },
            stops: Vec::new(),
        }
    }

    pub fn stop(mut self, offset: f64, color: impl Into<String>, opacity: f64) -> Self {
        self.stops.push(GradientStop {
            offset,
            color: color.into(),
            opacity,
        });
        self
    }
}

/// A complete avatar drawing: gradient definitions plus elements in paint order.
#[derive(Clone, Debug, PartialEq)]
pub struct Drawing {
    pub canvas: Canvas,
    pub defs: Vec<Gradient>,
    pub elements: Vec<Element>,
}

impl Drawing {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            defs: Vec::new(),
            elements: Vec::new(),
        }
    }

    pub fn define(&mut self, gradient: Gradient) {
        self.defs.push(gradient);
    }

    pub fn push(&mut self, layer: Layer, shape: Shape, style: Style) {
        self.elements.push(Element {
            layer,
            shape,
            style,
        });
    }

    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &Element> + '_ {
        self.elements.iter().filter(move |e| e.layer == layer)
    }

    pub fn has_layer(&self, layer: Layer) -> bool {
        self.layer(layer).next().is_some()
    }

    /// All text runs, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.elements.iter().filter_map(|e| match &e.shape {
            Shape::Text(t) => Some(t.content.as_str()),
            _ => None,
        })
    }

    /// Serialise to a standalone SVG document.
    ///
    /// Consecutive elements of the same layer are grouped into one `<g data-layer=..>`.
    pub fn to_svg(&self) -> String {
        let mut out = String::with_capacity(16 * 1024);
        let (w, h) = (self.canvas.width, self.canvas.height);
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" preserveAspectRatio="xMidYMid meet">"#
        );

        if !self.defs.is_empty() {
            out.push_str("<defs>");
            for g in &self.defs {
                write_gradient(&mut out, g);
            }
            out.push_str("</defs>");
        }

        let mut open: Option<Layer> = None;
        for el in &self.elements {
            if open != Some(el.layer) {
                if open.is_some() {
                    out.push_str("</g>");
                }
                let _ = write!(out, r#"<g data-layer="{}">"#, el.layer.as_str());
                open = Some(el.layer);
            }
            write_element(&mut out, el);
        }
        if open.is_some() {
            out.push_str("</g>");
        }

        out.push_str("</svg>\n");
        out
    }
}

fn write_gradient(out: &mut String, g: &Gradient) {
    let tag = match g.kind {
        GradientKind::Linear { x1, y1, x2, y2 } => {
            let _ = write!(
                out,
                r#"<linearGradient id="{}" x1="{}%" y1="{}%" x2="{}%" y2="{}%">"#,
                escape(&g.id),
                num(x1),
                num(y1),
                num(x2),
                num(y2)
            );
            "linearGradient"
        }
        GradientKind::Radial { cx, cy } => {
            let _ = write!(
                out,
                r#"<radialGradient id="{}" cx="{}%" cy="{}%">"#,
                escape(&g.id),
                num(cx),
                num(cy)
            );
            "radialGradient"
        }
    };
    for s in &g.stops {
        let _ = write!(
            out,
            r#"<stop offset="{}%" stop-color="{}" stop-opacity="{}"/>"#,
            num(s.offset),
            escape(&s.color),
            num(s.opacity)
        );
    }
    let _ = write!(out, "</{tag}>");
}

fn write_element(out: &mut String, el: &Element) {
    match &el.shape {
        Shape::Path(p) => {
            let _ = write!(out, r#"<path d="{}""#, path_data(p));
        }
        Shape::Rect { rect, radius } => {
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                num(rect.x0),
                num(rect.y0),
                num(rect.width()),
                num(rect.height())
            );
            if *radius > 0.0 {
                let _ = write!(out, r#" rx="{}""#, num(*radius));
            }
        }
        Shape::Ellipse { center, rx, ry } => {
            let _ = write!(
                out,
                r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}""#,
                num(center.x),
                num(center.y),
                num(*rx),
                num(*ry)
            );
        }
        Shape::Circle { center, r } => {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}""#,
                num(center.x),
                num(center.y),
                num(*r)
            );
        }
        Shape::Line { from, to } => {
            let _ = write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                num(from.x),
                num(from.y),
                num(to.x),
                num(to.y)
            );
        }
        Shape::Text(t) => {
            let _ = write!(
                out,
                r#"<text x="{}" y="{}" font-size="{}" font-family="sans-serif" font-weight="{}""#,
                num(t.pos.x),
                num(t.pos.y),
                num(t.size),
                t.weight
            );
            if t.anchor == TextAnchor::Middle {
                out.push_str(r#" text-anchor="middle""#);
            }
            if let Some(deg) = t.rotate {
                let _ = write!(
                    out,
                    r#" transform="rotate({}, {}, {})""#,
                    num(deg),
                    num(t.pos.x),
                    num(t.pos.y)
                );
            }
        }
    }

    write_style(out, &el.style);

    match &el.shape {
        Shape::Text(t) => {
            let _ = write!(out, ">{}</text>", escape(&t.content));
        }
        _ => out.push_str("/>"),
    }
}

fn write_style(out: &mut String, style: &Style) {
    let _ = write!(out, r#" fill="{}""#, escape(&style.fill.to_attr()));
    if let Some(s) = &style.stroke {
        let _ = write!(
            out,
            r#" stroke="{}" stroke-width="{}""#,
            escape(&s.paint.to_attr()),
            num(s.width)
        );
        if s.round {
            out.push_str(r#" stroke-linecap="round" stroke-linejoin="round""#);
        }
        if !s.dash.is_empty() {
            let dash: Vec<String> = s.dash.iter().map(|d| num(*d)).collect();
            let _ = write!(out, r#" stroke-dasharray="{}""#, dash.join(","));
        }
    }
    if let Some(o) = style.opacity {
        let _ = write!(out, r#" opacity="{}""#, num(o));
    }
}

fn path_data(p: &BezPath) -> String {
    let mut d = String::new();
    for el in p.elements() {
        if !d.is_empty() {
            d.push(' ');
        }
        let _ = match el {
            PathEl::MoveTo(a) => write!(d, "M {} {}", num(a.x), num(a.y)),
            PathEl::LineTo(a) => write!(d, "L {} {}", num(a.x), num(a.y)),
            PathEl::QuadTo(a, b) => write!(
                d,
                "Q {} {} {} {}",
                num(a.x),
                num(a.y),
                num(b.x),
                num(b.y)
            ),
            PathEl::CurveTo(a, b, c) => write!(
                d,
                "C {} {} {} {} {} {}",
                num(a.x),
                num(a.y),
                num(b.x),
                num(b.y),
                num(c.x),
                num(c.y)
            ),
            PathEl::ClosePath => write!(d, "Z"),
        };
    }
    d
}

/// Format a coordinate with at most two decimals and no trailing zeros.
pub(crate) fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let rounded = (v * 100.0).round() / 100.0;
    let mut s = format!("{rounded:.2}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

pub(crate) fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/drawing.rs"]
mod tests;
