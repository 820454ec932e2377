//! Per-triangle tangent frames.
//!
//! Tangents follow the layer-0 texture `u` direction across the triangle and
//! are orthogonalized against each corner's normal. The `w` component holds
//! the bitangent handedness so shaders can rebuild it as
//! `cross(normal, tangent) * w`.

use glam::{DVec3, Vec2};

/// Determinant magnitude below which a triangle's UV mapping is treated as
/// degenerate.
const UV_AREA_EPSILON: f64 = 1e-12;

/// Positions and layer-0 UVs of one triangle.
#[derive(Debug, Clone, Copy)]
pub struct TriangleFrame {
    positions: [DVec3; 3],
    uvs: [Vec2; 3],
}

/// Unnormalized texture-space directions of a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Gradients {
    tangent: DVec3,
    bitangent: DVec3,
}

impl TriangleFrame {
    pub fn new(positions: [DVec3; 3], uvs: [Vec2; 3]) -> Self {
        Self { positions, uvs }
    }

    fn gradients(&self) -> Option<Gradients> {
        let [p0, p1, p2] = self.positions;
        let [uv0, uv1, uv2] = self.uvs;

        let e1 = p1 - p0;
        let e2 = p2 - p0;
        let duv1 = (uv1 - uv0).as_dvec2();
        let duv2 = (uv2 - uv0).as_dvec2();

        let det = duv1.x * duv2.y - duv2.x * duv1.y;
        if det.abs() < UV_AREA_EPSILON {
            return None;
        }
        let r = 1.0 / det;
        Some(Gradients {
            tangent: (e1 * duv2.y - e2 * duv1.y) * r,
            bitangent: (e2 * duv1.x - e1 * duv2.x) * r,
        })
    }

    /// Tangent for a corner with the given normal, as `[x, y, z, w]`.
    ///
    /// Falls back to an arbitrary unit vector orthogonal to `normal` with
    /// `w = 1` when the UVs are degenerate or the texture direction is
    /// parallel to the normal.
    pub fn tangent(&self, normal: DVec3) -> [f32; 4] {
        let n = normal.try_normalize().unwrap_or(DVec3::Y);
        let orthogonal = self.gradients().and_then(|g| {
            let t = (g.tangent - n * n.dot(g.tangent)).try_normalize()?;
            let w = if n.cross(t).dot(g.bitangent) < 0.0 { -1.0 } else { 1.0 };
            Some((t, w))
        });
        let (t, w) = orthogonal.unwrap_or_else(|| (n.any_orthonormal_vector(), 1.0));
        [t.x as f32, t.y as f32, t.z as f32, w]
    }
}
