//! # Spherical Primitives
//!
//! Latitude/longitude spheres and hemispheres with single pole vertices.
//! Polar bands touching a pole are triangles, all other bands are quads.

use super::ShapeBuilder;
use crate::brush::Brush;
use config::constants::clamp_sides;
use glam::DVec3;
use std::f64::consts::{FRAC_PI_2, PI};

/// Replaces the brush with an ellipsoid.
///
/// `sides` segments around Y and `max(sides / 2, 2)` latitude bands, giving
/// `2 + (bands - 1) * sides` vertices and `bands * sides` faces.
pub fn build_sphere(brush: &mut Brush, size: DVec3, sides: u32) {
    let sides = clamp_sides(sides);
    let bands = (sides / 2).max(2);
    let r = size / 2.0;
    let mut shape = ShapeBuilder::new(
        brush,
        2 + ((bands - 1) * sides) as usize,
        (bands * sides) as usize,
    );

    let top = shape.vertex(DVec3::new(0.0, r.y, 0.0));
    let rings: Vec<Vec<u32>> = (1..bands)
        .map(|i| {
            let phi = PI * i as f64 / bands as f64;
            shape.ring(r.x * phi.sin(), r.z * phi.sin(), r.y * phi.cos(), sides)
        })
        .collect();
    let bottom = shape.vertex(DVec3::new(0.0, -r.y, 0.0));

    shape.fan_up(&rings[0], top);
    for pair in rings.windows(2) {
        shape.band(&pair[1], &pair[0]);
    }
    shape.fan_down(&rings[rings.len() - 1], bottom);

    shape.finish(brush);
}

/// Replaces the brush with the upper half of an ellipsoid standing on a
/// flat base.
///
/// The dome spans the full `size.y` height from the base at `-size.y / 2`.
/// `max(sides / 4, 1)` latitude bands give `1 + bands * sides` vertices and
/// `bands * sides + 1` faces.
pub fn build_hemisphere(brush: &mut Brush, size: DVec3, sides: u32) {
    let sides = clamp_sides(sides);
    let bands = (sides / 4).max(1);
    let r = DVec3::new(size.x / 2.0, size.y, size.z / 2.0);
    let base_y = -size.y / 2.0;
    let mut shape = ShapeBuilder::new(
        brush,
        1 + (bands * sides) as usize,
        (bands * sides + 1) as usize,
    );

    let top = shape.vertex(DVec3::new(0.0, base_y + r.y, 0.0));
    let rings: Vec<Vec<u32>> = (1..=bands)
        .map(|i| {
            let phi = FRAC_PI_2 * i as f64 / bands as f64;
            shape.ring(
                r.x * phi.sin(),
                r.z * phi.sin(),
                base_y + r.y * phi.cos(),
                sides,
            )
        })
        .collect();

    shape.fan_up(&rings[0], top);
    for pair in rings.windows(2) {
        shape.band(&pair[1], &pair[0]);
    }
    shape.cap_down(&rings[rings.len() - 1]);

    shape.finish(brush);
}
