use super::*;

#[test]
fn num_trims_trailing_zeros() {
    assert_eq!(num(1.0), "1");
    assert_eq!(num(1.5), "1.5");
    assert_eq!(num(1.256), "1.26");
    assert_eq!(num(-0.001), "0");
    assert_eq!(num(f64::NAN), "0");
}

#[test]
fn escape_handles_markup() {
    assert_eq!(escape(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
}

#[test]
fn svg_has_viewbox_and_defs() {
    let mut d = Drawing::new(Canvas::AVATAR);
    d.define(
        Gradient::linear("g", (0.0, 0.0), (0.0, 100.0))
            .stop(0.0, "#FFFFFF", 1.0)
            .stop(100.0, "#000000", 0.5),
    );
    d.push(
        Layer::Background,
        Shape::rect(0.0, 0.0, 400.0, 700.0, 0.0),
        Style::filled(Paint::gradient("g")),
    );
    let svg = d.to_svg();
    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(svg.contains(r#"viewBox="0 0 400 700""#));
    assert!(svg.contains(r#"<linearGradient id="g" x1="0%" y1="0%" x2="0%" y2="100%">"#));
    assert!(svg.contains(r#"stop-opacity="0.5""#));
    assert!(svg.contains(r#"fill="url(#g)""#));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn consecutive_layers_share_a_group() {
    let mut d = Drawing::new(Canvas::AVATAR);
    d.push(Layer::Head, Shape::circle(1.0, 1.0, 1.0), Style::fill("#000000"));
    d.push(Layer::Head, Shape::circle(2.0, 2.0, 1.0), Style::fill("#000000"));
    d.push(Layer::Hair, Shape::circle(3.0, 3.0, 1.0), Style::fill("#000000"));
    let svg = d.to_svg();
    assert_eq!(svg.matches(r#"data-layer="head""#).count(), 1);
    assert_eq!(svg.matches(r#"data-layer="hair""#).count(), 1);
    assert_eq!(svg.matches("</g>").count(), 2);
}

#[test]
fn path_data_uses_absolute_commands() {
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.curve_to((1.0, 2.0), (3.0, 4.0), (5.0, 6.0));
    p.quad_to((7.0, 8.0), (9.5, 10.25));
    p.line_to((0.0, 1.0));
    p.close_path();
    assert_eq!(path_data(&p), "M 0 0 C 1 2 3 4 5 6 Q 7 8 9.5 10.25 L 0 1 Z");
}

#[test]
fn text_is_escaped_and_styled() {
    let mut d = Drawing::new(Canvas::AVATAR);
    d.push(
        Layer::Panels,
        Shape::Text(Text::new(Point::new(10.0, 20.0), "a < b", 12.0).centered().rotated(90.0)),
        Style::fill("#64748B").opacity(0.5),
    );
    let svg = d.to_svg();
    assert!(svg.contains(">a &lt; b</text>"));
    assert!(svg.contains(r#"text-anchor="middle""#));
    assert!(svg.contains(r#"transform="rotate(90, 10, 20)""#));
    assert!(svg.contains(r#"opacity="0.5""#));
    assert_eq!(d.texts().collect::<Vec<_>>(), vec!["a < b"]);
}

#[test]
fn stroke_attributes() {
    let mut d = Drawing::new(Canvas::AVATAR);
    d.push(
        Layer::Panels,
        Shape::line(0.0, 0.0, 10.0, 10.0),
        Style::outline("#8B5CF6", 2.5).round().dashed(&[6.0, 4.0]),
    );
    let svg = d.to_svg();
    assert!(svg.contains(r##"fill="none" stroke="#8B5CF6" stroke-width="2.5""##));
    assert!(svg.contains(r#"stroke-linecap="round""#));
    assert!(svg.contains(r#"stroke-dasharray="6,4""#));
}
