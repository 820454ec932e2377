//! # Cap Polygon
//!
//! Orders the points along a clip cut into the polygon that closes the
//! brush. Points are sorted by polar angle around their centroid in a basis
//! spanning the plane, which assumes a convex cross-section; a non-convex
//! section gets the same treatment and may come out self-intersecting.

use crate::brush::Vertex;
use glam::DVec3;
use std::cmp::Ordering;

/// Angular ordering state for one cap, handed to the comparator by
/// reference.
#[derive(Debug, Clone, Copy)]
pub struct CapSortContext {
    centroid: DVec3,
    u_axis: DVec3,
    v_axis: DVec3,
}

impl CapSortContext {
    /// Builds the context for `points` lying on a plane with `normal`.
    ///
    /// `(u_axis, v_axis, normal)` is right-handed, so increasing angle runs
    /// counter-clockwise seen from the tip of `normal`.
    pub fn new(points: &[DVec3], normal: DVec3) -> Self {
        let centroid = points.iter().copied().sum::<DVec3>() / points.len().max(1) as f64;
        let (u_axis, v_axis) = plane_axes(normal);
        Self {
            centroid,
            u_axis,
            v_axis,
        }
    }

    /// Polar angle of `point` around the centroid.
    pub fn angle(&self, point: DVec3) -> f64 {
        let offset = point - self.centroid;
        offset.dot(self.v_axis).atan2(offset.dot(self.u_axis))
    }

    /// Orders two points by polar angle.
    pub fn compare(&self, a: DVec3, b: DVec3) -> Ordering {
        self.angle(a).total_cmp(&self.angle(b))
    }
}

/// Two unit axes spanning the plane perpendicular to `normal`.
fn plane_axes(normal: DVec3) -> (DVec3, DVec3) {
    let n = normal.normalize_or_zero();
    let a = n.abs();
    let reference = if a.y >= a.x && a.y >= a.z {
        DVec3::Z
    } else {
        DVec3::Y
    };
    let u = n.cross(reference).normalize_or_zero();
    let v = n.cross(u);
    (u, v)
}

/// Drops candidates within `merge_distance` of an earlier one.
pub fn merge_points(vertices: &[Vertex], candidates: &[u32], merge_distance: f64) -> Vec<u32> {
    let mut unique: Vec<u32> = Vec::with_capacity(candidates.len());
    for &index in candidates {
        let p = vertices[index as usize].position;
        let duplicate = unique
            .iter()
            .any(|&u| vertices[u as usize].position.distance(p) < merge_distance);
        if !duplicate {
            unique.push(index);
        }
    }
    unique
}

/// Orders cap corners so the polygon faces away from `keep_normal`, the
/// local-space direction pointing into the kept half.
pub fn order_cap(vertices: &[Vertex], corners: &[u32], keep_normal: DVec3) -> Vec<u32> {
    let points: Vec<DVec3> = corners
        .iter()
        .map(|&i| vertices[i as usize].position)
        .collect();
    let context = CapSortContext::new(&points, keep_normal);

    let mut ordered = corners.to_vec();
    ordered.sort_by(|&a, &b| {
        context.compare(vertices[a as usize].position, vertices[b as usize].position)
    });
    // Counter-clockwise about the keep normal faces inward; flip it.
    ordered.reverse();
    ordered
}
