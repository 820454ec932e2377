//! # Transform
//!
//! Rigid-plus-scale local-to-world transform shared by brushes and the other
//! editor entities.

use glam::{DMat4, DQuat, DVec3, EulerRot};
use serde::{Deserialize, Serialize};

/// Position, Euler rotation and non-uniform scale.
///
/// The rotation is in radians and applied about X, then Y, then Z; the model
/// matrix is `translate * rotate * scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// World-space translation.
    pub position: DVec3,
    /// Euler angles in radians.
    pub rotation: DVec3,
    /// Per-axis scale.
    pub scale: DVec3,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        position: DVec3::ZERO,
        rotation: DVec3::ZERO,
        scale: DVec3::ONE,
    };

    /// A pure translation.
    pub fn from_position(position: DVec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Returns the rotation as a quaternion.
    pub fn rotation_quat(&self) -> DQuat {
        DQuat::from_euler(
            EulerRot::ZYX,
            self.rotation.z,
            self.rotation.y,
            self.rotation.x,
        )
    }

    /// Returns the local-to-world model matrix.
    pub fn matrix(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(self.scale, self.rotation_quat(), self.position)
    }

    /// Transforms a local-space point into world space.
    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.matrix().transform_point3(point)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
