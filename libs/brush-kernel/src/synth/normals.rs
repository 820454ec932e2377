//! Smooth vertex normals.

use crate::brush::Brush;
use crate::error::{with_capacity, KernelResult};
use config::constants::NORMAL_EPSILON;
use glam::DVec3;

/// Computes one normal per brush vertex.
///
/// The unnormalized cross product of every fan triangle is added to its
/// three corners, so larger faces weigh more; sums are normalized once all
/// faces are in. Vertices no face references keep a zero normal.
pub fn smooth_normals(brush: &Brush) -> KernelResult<Vec<DVec3>> {
    let vertices = brush.vertices();
    let mut normals = with_capacity(vertices.len(), "accumulating normals")?;
    normals.resize(vertices.len(), DVec3::ZERO);

    for face in brush.faces() {
        for tri in face.fan_triangles() {
            let v0 = vertices[tri[0] as usize].position;
            let v1 = vertices[tri[1] as usize].position;
            let v2 = vertices[tri[2] as usize].position;

            let normal = (v1 - v0).cross(v2 - v0);

            normals[tri[0] as usize] += normal;
            normals[tri[1] as usize] += normal;
            normals[tri[2] as usize] += normal;
        }
    }

    for normal in &mut normals {
        let len = normal.length();
        *normal = if len > NORMAL_EPSILON {
            *normal / len
        } else {
            DVec3::ZERO
        };
    }
    Ok(normals)
}
