//! # Cylindrical Primitives
//!
//! Cylinder, spike (cone) and tube brushes around the Y axis. Radii are
//! `size.x / 2` and `size.z / 2`, so sections may be elliptical.

use super::ShapeBuilder;
use crate::brush::Brush;
use config::constants::clamp_sides;
use glam::DVec3;

/// Fraction of the outer radius the tube's inner wall never shrinks below.
const MIN_INNER_RADIUS_FRACTION: f64 = 0.01;

/// Replaces the brush with a cylinder.
///
/// `2 * sides` vertices, `sides` side quads and two `sides`-gon caps.
pub fn build_cylinder(brush: &mut Brush, size: DVec3, sides: u32) {
    let sides = clamp_sides(sides);
    let h = size / 2.0;
    let mut shape = ShapeBuilder::new(brush, 2 * sides as usize, sides as usize + 2);

    let bottom = shape.ring(h.x, h.z, -h.y, sides);
    let top = shape.ring(h.x, h.z, h.y, sides);

    shape.band(&bottom, &top);
    shape.cap_down(&bottom);
    shape.cap_up(&top);

    shape.finish(brush);
}

/// Replaces the brush with a cone whose apex points up.
///
/// `sides + 1` vertices, `sides` side triangles and one base cap.
pub fn build_spike(brush: &mut Brush, size: DVec3, sides: u32) {
    let sides = clamp_sides(sides);
    let h = size / 2.0;
    let mut shape = ShapeBuilder::new(brush, sides as usize + 1, sides as usize + 1);

    let base = shape.ring(h.x, h.z, -h.y, sides);
    let apex = shape.vertex(DVec3::new(0.0, h.y, 0.0));

    shape.fan_up(&base, apex);
    shape.cap_down(&base);

    shape.finish(brush);
}

/// Replaces the brush with a hollow tube.
///
/// The inner radii are the outer radii minus `wall_thickness`, kept above
/// one percent of the outer radii. `4 * sides` vertices and `4 * sides`
/// quads (outer wall, inner wall, top and bottom rims).
pub fn build_tube(brush: &mut Brush, size: DVec3, sides: u32, wall_thickness: f64) {
    let sides = clamp_sides(sides);
    let h = size / 2.0;
    let wall = wall_thickness.max(0.0);
    let inner_x = (h.x - wall).max(h.x * MIN_INNER_RADIUS_FRACTION);
    let inner_z = (h.z - wall).max(h.z * MIN_INNER_RADIUS_FRACTION);
    let mut shape = ShapeBuilder::new(brush, 4 * sides as usize, 4 * sides as usize);

    let outer_bottom = shape.ring(h.x, h.z, -h.y, sides);
    let outer_top = shape.ring(h.x, h.z, h.y, sides);
    let inner_bottom = shape.ring(inner_x, inner_z, -h.y, sides);
    let inner_top = shape.ring(inner_x, inner_z, h.y, sides);

    let n = sides as usize;
    shape.band(&outer_bottom, &outer_top);
    for j in 0..n {
        let next = (j + 1) % n;
        // Inner wall faces the axis.
        shape.face(vec![inner_bottom[next], inner_top[next], inner_top[j], inner_bottom[j]]);
        shape.face(vec![outer_top[j], inner_top[j], inner_top[next], outer_top[next]]);
        shape.face(vec![outer_bottom[next], inner_bottom[next], inner_bottom[j], outer_bottom[j]]);
    }

    shape.finish(brush);
}
