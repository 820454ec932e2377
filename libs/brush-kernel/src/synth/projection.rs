//! Dominant-axis planar projection.
//!
//! Each triangle picks the axis its geometric normal is most aligned with and
//! drops it: X projects to `(z, y)`, Y to `(x, z)` and Z to `(x, y)`. Ties
//! resolve in X, Y, Z order.

use crate::material::MaterialLayer;
use config::constants::MATERIAL_LAYER_COUNT;
use glam::{DVec3, Vec2};

/// Axis a triangle is projected along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DominantAxis {
    X,
    Y,
    Z,
}

impl DominantAxis {
    /// Picks the largest-magnitude component of `normal`.
    pub fn of(normal: DVec3) -> Self {
        let a = normal.abs();
        if a.x >= a.y && a.x >= a.z {
            Self::X
        } else if a.y >= a.z {
            Self::Y
        } else {
            Self::Z
        }
    }

    /// Projects a local position onto the plane of the other two axes.
    pub fn project(self, position: DVec3) -> Vec2 {
        let (u, v) = match self {
            Self::X => (position.z, position.y),
            Self::Y => (position.x, position.z),
            Self::Z => (position.x, position.y),
        };
        Vec2::new(u as f32, v as f32)
    }
}

/// Applies every layer's rotation, scale and offset to a projected position.
pub fn layer_uvs(
    layers: &[MaterialLayer; MATERIAL_LAYER_COUNT],
    projected: Vec2,
) -> [Vec2; MATERIAL_LAYER_COUNT] {
    std::array::from_fn(|i| layers[i].project(projected))
}
