use super::*;
use crate::body::descriptor::BodyDescriptor;

fn anatomy(d: BodyDescriptor) -> Anatomy {
    let v = d.validate();
    let f = DerivedFactors::from_validated(&v);
    Anatomy::new(Canvas::AVATAR, &v, &f)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn landmarks_follow_the_canon() {
    let a = anatomy(BodyDescriptor::new(170.0, 65.0));
    let unit = 700.0 / 9.0;
    assert!(close(a.unit, unit));
    assert!(close(a.center_x, 200.0));
    assert!(close(a.head_radius, unit * 0.65));
    assert!(close(a.y.head, unit * 0.75));
    assert!(close(a.y.feet, unit * 8.5));

    let ys = [
        a.y.head,
        a.y.neck,
        a.y.shoulders,
        a.y.chest,
        a.y.waist,
        a.y.hips,
        a.y.crotch,
        a.y.knee,
        a.y.ankle,
        a.y.feet,
    ];
    assert!(ys.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn widths_scale_with_factors() {
    let a = anatomy(BodyDescriptor {
        body_shape: Some(crate::body::descriptor::BodyShape::Balanced),
        muscle_level: Some(5.0),
        ..BodyDescriptor::new(170.0, 65.0)
    });
    let base = 700.0 / 9.0 * 1.1;
    assert!(close(a.base_width, base));
    assert!(close(a.shoulder_width, base * 1.65 * 1.15));
    assert!(close(a.chest_width, base * 1.4 * 1.15));
    assert!(close(a.waist_width, base));
    assert!(close(a.hip_width, base * 1.15));
    assert!(close(a.thigh_width, base * 0.5));
}

#[test]
fn female_hips_are_wider() {
    let male = anatomy(BodyDescriptor {
        gender: Some(Gender::Male),
        ..BodyDescriptor::new(170.0, 65.0)
    });
    let female = anatomy(BodyDescriptor {
        gender: Some(Gender::Female),
        ..BodyDescriptor::new(170.0, 65.0)
    });
    assert!(female.hip_width > male.hip_width);
    assert!(close(female.hip_width, female.base_width * 1.35));
}

#[test]
fn measurements_override_factor_widths() {
    let a = anatomy(BodyDescriptor {
        shoulder_width: Some(45.0),
        waist_size: Some(80.0),
        hip_size: Some(95.0),
        ..BodyDescriptor::new(180.0, 75.0)
    });
    assert!(close(a.shoulder_width, 45.0 / 180.0 * 400.0 * 2.5));
    assert!(close(a.waist_width, 80.0 / 180.0 * 400.0 * 2.2));
    assert!(close(a.hip_width, 95.0 / 180.0 * 400.0 * 2.3));
}

#[test]
fn non_positive_measurements_are_ignored() {
    let plain = anatomy(BodyDescriptor::new(170.0, 65.0));
    let zeroed = anatomy(BodyDescriptor {
        shoulder_width: Some(0.0),
        waist_size: Some(-3.0),
        ..BodyDescriptor::new(170.0, 65.0)
    });
    assert_eq!(plain, zeroed);
}
