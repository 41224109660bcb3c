//! Built-in part catalog seeded into every new composer.

use crate::compose::part::{BodyPart, PartCategory, PartRect};

type Entry = (&'static str, &'static str, PartCategory, &'static str, [f64; 4]);

#[rustfmt::skip]
fn entries() -> Vec<Entry> {
    use PartCategory::*;
    vec![
        ("head-1", "Head Style 1", Head, "/body-parts/faces/face-1.svg", [220.0, 100.0, 160.0, 180.0]),
        ("head-2", "Head Style 2", Head, "/body-parts/faces/face-2.svg", [220.0, 100.0, 160.0, 180.0]),
        ("body-lpc-male-1", "LPC Male Body", Head, "/body-parts/bodies/body-lpc-male-1.png", [150.0, 0.0, 300.0, 600.0]),
        ("body-lpc-female-1", "LPC Female Body", Head, "/body-parts/bodies/body-lpc-female-1.png", [150.0, 0.0, 300.0, 600.0]),
        ("hair-1", "Hair Style 1", Hair, "/body-parts/hair/hair-1.svg", [200.0, 30.0, 200.0, 200.0]),
        ("hair-2", "Hair Style 2", Hair, "/body-parts/hair/hair-2.svg", [200.0, 30.0, 200.0, 200.0]),
        ("hair-lpc-long-1", "LPC Long Hair", Hair, "/body-parts/hair/hair-lpc-long-1.png", [150.0, 0.0, 300.0, 400.0]),
        ("hair-lpc-pixie-1", "LPC Pixie Hair", Hair, "/body-parts/hair/hair-lpc-pixie-1.png", [150.0, 0.0, 300.0, 300.0]),
        ("hair-lpc-bob-1", "LPC Bob Hair", Hair, "/body-parts/hair/hair-lpc-bob-1.png", [150.0, 0.0, 300.0, 350.0]),
        ("torso-1", "Torso Style 1", Torso, "/body-parts/bodies/body-1.svg", [180.0, 280.0, 240.0, 400.0]),
        ("torso-2", "Torso Style 2", Torso, "/body-parts/bodies/body-2.svg", [180.0, 280.0, 240.0, 400.0]),
        ("torso-lpc-longsleeve-1", "LPC Long Sleeve Shirt", Torso, "/body-parts/torso/torso-lpc-longsleeve-1.png", [150.0, 150.0, 300.0, 400.0]),
        ("leftArm-1", "Left Arm Style 1", LeftArm, "/body-parts/arms/arms-1.svg", [120.0, 300.0, 120.0, 200.0]),
        ("rightArm-1", "Right Arm Style 1", RightArm, "/body-parts/arms/arms-2.svg", [300.0, 300.0, 120.0, 200.0]),
        ("legs-1", "Legs Style 1", Legs, "/body-parts/legs/legs-1.svg", [200.0, 680.0, 200.0, 300.0]),
        ("legs-2", "Legs Style 2", Legs, "/body-parts/legs/legs-2.svg", [200.0, 680.0, 200.0, 300.0]),
        ("legs-lpc-pants-1", "LPC Pants", Legs, "/body-parts/legs/legs-lpc-pants-1.png", [150.0, 350.0, 300.0, 350.0]),
        ("feet-1", "Feet Style 1", Feet, "/body-parts/legs/legs-1.svg", [200.0, 900.0, 200.0, 100.0]),
        ("feet-2", "Feet Style 2", Feet, "/body-parts/legs/legs-2.svg", [200.0, 900.0, 200.0, 100.0]),
        ("feet-lpc-shoes-1", "LPC Shoes", Feet, "/body-parts/feet/feet-lpc-shoes-1.png", [150.0, 500.0, 300.0, 200.0]),
        ("glasses-lpc-1", "LPC Glasses", Accessories, "/body-parts/accessories/glasses-lpc-1.png", [150.0, 80.0, 300.0, 200.0]),
        ("sunglasses-lpc-1", "LPC Sunglasses", Accessories, "/body-parts/accessories/sunglasses-lpc-1.png", [150.0, 80.0, 300.0, 200.0]),
        ("hair-lpc-afro-1", "Afro Hair LPC", Hair, "/body-parts/hair/hair-lpc-afro-1.png", [200.0, 30.0, 200.0, 120.0]),
        ("hair-lpc-braid-1", "Braid Hair LPC", Hair, "/body-parts/hair/hair-lpc-braid-1.png", [200.0, 30.0, 200.0, 120.0]),
        ("glasses-lpc-nerd-1", "Nerd Glasses LPC", Accessories, "/body-parts/accessories/glasses-lpc-nerd-1.png", [220.0, 80.0, 160.0, 80.0]),
        ("legs-lpc-pants-magenta-1", "Magenta Pants LPC", Legs, "/body-parts/legs/legs-lpc-pants-magenta-1.png", [200.0, 200.0, 200.0, 150.0]),
    ]
}

/// The default catalog, in registration order.
pub fn default_parts() -> Vec<BodyPart> {
    entries()
        .into_iter()
        .map(|(id, name, category, path, [x, y, w, h])| {
            BodyPart::new(id, name, category, path, PartRect::new(x, y, w, h))
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/compose/catalog.rs"]
mod tests;
