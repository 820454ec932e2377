//! # Face Materials
//!
//! Material handles, per-layer planar UV projection parameters and the
//! lightmap atlas sub-rectangle stored on every face.

use config::constants::{DEFAULT_MATERIAL_NAME, UV_SCALE_EPSILON};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque handle to a material or texture, looked up by name.
///
/// The kernel only copies handles around; resolving them is up to the
/// renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialHandle(String);

impl MaterialHandle {
    /// Creates a handle for the given material name.
    pub fn named(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the material name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for MaterialHandle {
    fn default() -> Self {
        Self::named(DEFAULT_MATERIAL_NAME)
    }
}

/// One planar-projected material layer of a face.
///
/// Texture coordinates are `rotate(u, v, rotation) / scale + offset`, where
/// `(u, v)` is the corner position projected onto the plane perpendicular to
/// the triangle's dominant normal axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLayer {
    /// Material sampled by this layer, if any.
    pub material: Option<MaterialHandle>,
    /// Offset added after rotation and scale.
    pub offset: Vec2,
    /// World units per texture repeat on each axis.
    pub scale: Vec2,
    /// Rotation of the projection in degrees.
    pub rotation: f32,
}

impl MaterialLayer {
    /// An unassigned layer with identity projection.
    pub fn empty() -> Self {
        Self {
            material: None,
            offset: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
        }
    }

    /// An identity-projection layer sampling `material`.
    pub fn with_material(material: MaterialHandle) -> Self {
        Self {
            material: Some(material),
            ..Self::empty()
        }
    }

    /// Maps a projected position to this layer's texture coordinates.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brush_kernel::MaterialLayer;
    /// use glam::Vec2;
    ///
    /// let mut layer = MaterialLayer::empty();
    /// layer.scale = Vec2::splat(2.0);
    /// layer.offset = Vec2::new(0.5, 0.0);
    /// assert_eq!(layer.project(Vec2::new(4.0, 2.0)), Vec2::new(2.5, 1.0));
    /// ```
    pub fn project(&self, uv: Vec2) -> Vec2 {
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let rotated = Vec2::new(uv.x * cos - uv.y * sin, uv.x * sin + uv.y * cos);
        let scale = Vec2::new(safe_scale(self.scale.x), safe_scale(self.scale.y));
        rotated / scale + self.offset
    }
}

impl Default for MaterialLayer {
    fn default() -> Self {
        Self::empty()
    }
}

/// Keeps the sign of a scale component but never lets it reach zero.
fn safe_scale(value: f32) -> f32 {
    if value.abs() >= UV_SCALE_EPSILON {
        value
    } else if value.is_sign_negative() {
        -UV_SCALE_EPSILON
    } else {
        UV_SCALE_EPSILON
    }
}

/// Normalized sub-rectangle of a lightmap atlas.
///
/// Both fields are zero until a baked image has been packed for the face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LightmapRect {
    /// Top-left corner in atlas UV space.
    pub origin: Vec2,
    /// Extent in atlas UV space.
    pub size: Vec2,
}

impl LightmapRect {
    /// Maps local face coordinates `(s, t)` in `[0, 1]²` into the atlas.
    pub fn remap(&self, local: Vec2) -> Vec2 {
        self.origin + local * self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_handle_is_named_default() {
        assert_eq!(MaterialHandle::default().name(), DEFAULT_MATERIAL_NAME);
    }

    #[test]
    fn test_identity_projection() {
        let layer = MaterialLayer::empty();
        assert_eq!(layer.project(Vec2::new(3.0, -1.0)), Vec2::new(3.0, -1.0));
    }

    #[test]
    fn test_rotation_is_in_degrees() {
        let layer = MaterialLayer {
            rotation: 90.0,
            ..MaterialLayer::empty()
        };
        let uv = layer.project(Vec2::new(1.0, 0.0));
        assert_relative_eq!(uv.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(uv.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_scale_stays_finite() {
        let layer = MaterialLayer {
            scale: Vec2::new(0.0, -0.0),
            ..MaterialLayer::empty()
        };
        let uv = layer.project(Vec2::new(1.0, 1.0));
        assert!(uv.x.is_finite() && uv.y.is_finite());
        assert!(uv.y < 0.0);
    }

    #[test]
    fn test_lightmap_remap() {
        let rect = LightmapRect {
            origin: Vec2::new(0.5, 0.25),
            size: Vec2::new(0.25, 0.5),
        };
        assert_eq!(rect.remap(Vec2::ZERO), Vec2::new(0.5, 0.25));
        assert_eq!(rect.remap(Vec2::ONE), Vec2::new(0.75, 0.75));
    }
}
