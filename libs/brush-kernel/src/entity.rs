//! # Editor Entities
//!
//! The closed set of things a level holds. Every kind carries a
//! [`Transform`], reachable without matching on the kind.

use crate::brush::Brush;
use crate::transform::Transform;
use serde::{Deserialize, Serialize};

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightEntity {
    pub transform: Transform,
    /// Linear RGB color.
    pub color: [f32; 3],
    pub intensity: f32,
    /// Distance at which the light's contribution reaches zero.
    pub range: f32,
}

impl Default for LightEntity {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            color: [1.0; 3],
            intensity: 1.0,
            range: 10.0,
        }
    }
}

/// A player spawn location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub transform: Transform,
}

/// Any editor entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Entity {
    Brush(Brush),
    Light(LightEntity),
    Spawn(SpawnPoint),
}

impl Entity {
    /// The entity's local-to-world transform.
    pub fn transform(&self) -> &Transform {
        match self {
            Entity::Brush(brush) => &brush.transform,
            Entity::Light(light) => &light.transform,
            Entity::Spawn(spawn) => &spawn.transform,
        }
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        match self {
            Entity::Brush(brush) => &mut brush.transform,
            Entity::Light(light) => &mut light.transform,
            Entity::Spawn(spawn) => &mut spawn.transform,
        }
    }

    pub fn set_transform(&mut self, transform: Transform) {
        *self.transform_mut() = transform;
    }

    /// The brush, if this entity is one.
    pub fn as_brush(&self) -> Option<&Brush> {
        match self {
            Entity::Brush(brush) => Some(brush),
            _ => None,
        }
    }

    pub fn as_brush_mut(&mut self) -> Option<&mut Brush> {
        match self {
            Entity::Brush(brush) => Some(brush),
            _ => None,
        }
    }

    /// Explicit deep copy; brushes get fresh vertex and face buffers.
    pub fn duplicate(&self) -> Entity {
        match self {
            Entity::Brush(brush) => Entity::Brush(brush.duplicate()),
            Entity::Light(light) => Entity::Light(*light),
            Entity::Spawn(spawn) => Entity::Spawn(*spawn),
        }
    }
}

impl From<Brush> for Entity {
    fn from(brush: Brush) -> Self {
        Entity::Brush(brush)
    }
}

impl From<LightEntity> for Entity {
    fn from(light: LightEntity) -> Self {
        Entity::Light(light)
    }
}

impl From<SpawnPoint> for Entity {
    fn from(spawn: SpawnPoint) -> Self {
        Entity::Spawn(spawn)
    }
}
