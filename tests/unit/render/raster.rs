use super::*;
use crate::foundation::core::Canvas;
use crate::render::drawing::{Layer, Shape, Style};

#[test]
fn demultiply_restores_straight_alpha() {
    let mut px = [64u8, 32, 0, 128, 10, 20, 30, 255, 9, 9, 9, 0];
    demultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[128, 64, 0, 128]);
    assert_eq!(&px[4..8], &[10, 20, 30, 255]);
    assert_eq!(&px[8..], &[9, 9, 9, 0]);
}

#[test]
fn rejects_bad_sizes() {
    let tree = parse_svg(br#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"/>"#)
        .unwrap();
    assert!(rasterize_tree_premul(&tree, 0, 4).is_err());
    assert!(rasterize_tree_premul(&tree, 4, MAX_RASTER_DIM + 1).is_err());
}

#[test]
fn parse_svg_reports_garbage() {
    let err = parse_svg(b"not svg").unwrap_err();
    assert!(matches!(err, SilhouetteError::Other(_)));
}

#[test]
fn rasterizes_a_filled_rect() {
    let mut d = Drawing::new(Canvas::new(8, 8).unwrap());
    d.push(
        Layer::Background,
        Shape::rect(0.0, 0.0, 8.0, 8.0, 0.0),
        Style::fill("#FF0000"),
    );
    let img = rasterize_drawing(&d, 2.0).unwrap();
    assert_eq!(img.dimensions(), (16, 16));
    assert_eq!(img.get_pixel(8, 8).0, [255, 0, 0, 255]);
}

#[test]
fn rejects_non_positive_scale() {
    let d = Drawing::new(Canvas::AVATAR);
    assert!(rasterize_drawing(&d, 0.0).is_err());
    assert!(rasterize_drawing(&d, f64::NAN).is_err());
}

#[test]
fn premultiply_scales_by_alpha() {
    let mut px = [100u8, 50, 200, 128, 7, 7, 7, 0, 1, 2, 3, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(
        &px[..4],
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    assert_eq!(&px[8..], &[1, 2, 3, 255]);
}
