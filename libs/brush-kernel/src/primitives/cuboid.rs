//! # Cuboid Primitives
//!
//! Box and wedge brushes.

use super::ShapeBuilder;
use crate::brush::Brush;
use glam::DVec3;

/// Replaces the brush with an axis-aligned box.
///
/// 8 vertices and 6 quad faces.
///
/// # Example
///
/// ```rust
/// use brush_kernel::{primitives::build_box, Brush};
/// use glam::DVec3;
///
/// let mut brush = Brush::new();
/// build_box(&mut brush, DVec3::splat(2.0));
/// assert_eq!(brush.vertex_count(), 8);
/// assert_eq!(brush.face_count(), 6);
/// ```
pub fn build_box(brush: &mut Brush, size: DVec3) {
    let h = size / 2.0;
    let mut shape = ShapeBuilder::new(brush, 8, 6);

    let v0 = shape.vertex(DVec3::new(-h.x, -h.y, -h.z));
    let v1 = shape.vertex(DVec3::new(h.x, -h.y, -h.z));
    let v2 = shape.vertex(DVec3::new(h.x, h.y, -h.z));
    let v3 = shape.vertex(DVec3::new(-h.x, h.y, -h.z));
    let v4 = shape.vertex(DVec3::new(-h.x, -h.y, h.z));
    let v5 = shape.vertex(DVec3::new(h.x, -h.y, h.z));
    let v6 = shape.vertex(DVec3::new(h.x, h.y, h.z));
    let v7 = shape.vertex(DVec3::new(-h.x, h.y, h.z));

    // Counter-clockwise seen from outside.
    shape.face(vec![v1, v2, v6, v5]); // +X
    shape.face(vec![v0, v4, v7, v3]); // -X
    shape.face(vec![v3, v7, v6, v2]); // +Y
    shape.face(vec![v0, v1, v5, v4]); // -Y
    shape.face(vec![v4, v5, v6, v7]); // +Z
    shape.face(vec![v0, v3, v2, v1]); // -Z

    shape.finish(brush);
}

/// Replaces the brush with a wedge: a box whose top slopes from the back
/// (-Z) top edge down to the front (+Z) bottom edge.
///
/// 6 vertices, 3 quads and 2 triangles.
pub fn build_wedge(brush: &mut Brush, size: DVec3) {
    let h = size / 2.0;
    let mut shape = ShapeBuilder::new(brush, 6, 5);

    let v0 = shape.vertex(DVec3::new(-h.x, -h.y, -h.z));
    let v1 = shape.vertex(DVec3::new(h.x, -h.y, -h.z));
    let v2 = shape.vertex(DVec3::new(h.x, -h.y, h.z));
    let v3 = shape.vertex(DVec3::new(-h.x, -h.y, h.z));
    let v4 = shape.vertex(DVec3::new(-h.x, h.y, -h.z));
    let v5 = shape.vertex(DVec3::new(h.x, h.y, -h.z));

    shape.face(vec![v0, v1, v2, v3]); // bottom
    shape.face(vec![v0, v4, v5, v1]); // back
    shape.face(vec![v3, v2, v5, v4]); // slope
    shape.face(vec![v0, v3, v4]); // -X
    shape.face(vec![v1, v5, v2]); // +X

    shape.finish(brush);
}
