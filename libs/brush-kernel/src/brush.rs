//! # Brush Data Structure
//!
//! The editable polyhedron: an owned vertex list, an owned face list of
//! index polygons and a local-to-world transform.
//!
//! A brush exclusively owns its buffers. [`Brush::duplicate`] is the only way
//! to obtain a second copy and [`Brush::clear`] releases them; operations
//! that rebuild geometry assemble complete new buffers first and swap them
//! in with [`Brush::replace_geometry`].

use crate::error::{KernelError, KernelResult};
use crate::material::{LightmapRect, MaterialHandle, MaterialLayer};
use crate::transform::Transform;
use config::constants::{DEFAULT_LIGHTMAP_SCALE, DEFAULT_VERTEX_COLOR, MATERIAL_LAYER_COUNT};
use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

// =============================================================================
// VERTEX
// =============================================================================

/// A brush vertex in local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Local-space position.
    pub position: DVec3,
    /// RGBA blend weight and tint.
    pub color: [f32; 4],
    /// Lightmap UV, written by the render synthesizer.
    pub lightmap_uv: [f32; 2],
}

impl Vertex {
    /// Creates a vertex with the default color.
    pub fn new(position: DVec3) -> Self {
        Self {
            position,
            color: DEFAULT_VERTEX_COLOR,
            lightmap_uv: [0.0; 2],
        }
    }

    /// Creates a vertex with an explicit color.
    pub fn with_color(position: DVec3, color: [f32; 4]) -> Self {
        Self {
            color,
            ..Self::new(position)
        }
    }

    /// Linear interpolation of position and color.
    ///
    /// `t = 0.0` returns `self`, `t = 1.0` returns `other`.
    pub fn lerp(&self, other: &Vertex, t: f64) -> Vertex {
        let tc = t as f32;
        let mut color = self.color;
        for (c, o) in color.iter_mut().zip(other.color) {
            *c += (o - *c) * tc;
        }
        Vertex::with_color(self.position.lerp(other.position, t), color)
    }
}

// =============================================================================
// FACE
// =============================================================================

/// A planar polygon over brush vertices.
///
/// Corners wind counter-clockwise when seen from outside, so the fan
/// triangle `(c0, c1, c2)` has an outward right-hand-rule normal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    indices: Vec<u32>,
    /// Planar projection layers; layer 0 drives tangents and lightmap UVs.
    pub layers: [MaterialLayer; MATERIAL_LAYER_COUNT],
    /// Atlas sub-rectangle assigned by the lightmap packer.
    pub lightmap: LightmapRect,
    /// Lightmap resolution multiplier.
    pub lightmap_scale: f32,
}

impl Face {
    /// Creates a face sampling `material` on layer 0 with identity UVs.
    pub fn new(indices: Vec<u32>, material: MaterialHandle) -> Self {
        let mut layers: [MaterialLayer; MATERIAL_LAYER_COUNT] = Default::default();
        layers[0] = MaterialLayer::with_material(material);
        Self {
            indices,
            layers,
            lightmap: LightmapRect::default(),
            lightmap_scale: DEFAULT_LIGHTMAP_SCALE,
        }
    }

    /// Creates a face over `indices` carrying this face's material, UV and
    /// lightmap settings.
    pub fn with_indices(&self, indices: Vec<u32>) -> Self {
        Self {
            indices,
            layers: self.layers.clone(),
            lightmap: self.lightmap,
            lightmap_scale: self.lightmap_scale,
        }
    }

    /// Corner vertex indices in winding order.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of corners.
    #[inline]
    pub fn corner_count(&self) -> usize {
        self.indices.len()
    }

    /// Fan triangles `(c0, c[k+1], c[k+2])`; empty for fewer than 3 corners.
    pub fn fan_triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        let first = self.indices.first().copied().unwrap_or(0);
        self.indices
            .windows(2)
            .skip(1)
            .map(move |pair| [first, pair[0], pair[1]])
    }
}

// =============================================================================
// BRUSH
// =============================================================================

/// An editable convex solid.
///
/// Deserialized brushes go through [`Brush::validate`], so a document with a
/// dangling vertex index or a degenerate face is rejected on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BrushData")]
pub struct Brush {
    /// Local-to-world transform.
    pub transform: Transform,
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    render_vertex_count: usize,
    default_material: MaterialHandle,
}

/// Wire form of [`Brush`] before validation.
#[derive(Deserialize)]
struct BrushData {
    transform: Transform,
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    render_vertex_count: usize,
    default_material: MaterialHandle,
}

impl TryFrom<BrushData> for Brush {
    type Error = KernelError;

    fn try_from(data: BrushData) -> KernelResult<Self> {
        let brush = Self {
            transform: data.transform,
            vertices: data.vertices,
            faces: data.faces,
            render_vertex_count: data.render_vertex_count,
            default_material: data.default_material,
        };
        brush.validate()?;
        Ok(brush)
    }
}

impl Brush {
    /// Creates an empty brush with the default material.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty brush whose new faces use `material`.
    pub fn with_material(material: MaterialHandle) -> Self {
        Self {
            default_material: material,
            ..Self::default()
        }
    }

    /// Creates a brush from raw geometry after checking its invariants.
    pub fn from_parts(vertices: Vec<Vertex>, faces: Vec<Face>) -> KernelResult<Self> {
        let brush = Self {
            vertices,
            faces,
            ..Self::default()
        };
        brush.validate()?;
        Ok(brush)
    }

    /// Returns true if the brush has no vertices (deleted or clipped away).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Mutable access to vertex data (painting, vertex dragging).
    #[inline]
    pub fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    /// Returns a reference to the faces.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Mutable access to face attributes. Corner lists stay read-only.
    #[inline]
    pub fn faces_mut(&mut self) -> &mut [Face] {
        &mut self.faces
    }

    /// Material given to faces created by builders and clip caps.
    pub fn default_material(&self) -> &MaterialHandle {
        &self.default_material
    }

    /// Changes the material used for newly created faces.
    pub fn set_default_material(&mut self, material: MaterialHandle) {
        self.default_material = material;
    }

    /// Render-vertex count from the last synthesis, zero after any geometry
    /// change.
    #[inline]
    pub fn render_vertex_count(&self) -> usize {
        self.render_vertex_count
    }

    pub(crate) fn set_render_vertex_count(&mut self, count: usize) {
        self.render_vertex_count = count;
    }

    /// Returns the local-to-world model matrix.
    pub fn model_matrix(&self) -> DMat4 {
        self.transform.matrix()
    }

    /// Explicit deep copy.
    pub fn duplicate(&self) -> Brush {
        self.clone()
    }

    /// Releases the vertex and face buffers, leaving an empty brush.
    pub fn clear(&mut self) {
        self.vertices = Vec::new();
        self.faces = Vec::new();
        self.render_vertex_count = 0;
    }

    /// Swaps in freshly built geometry, dropping the previous buffers.
    pub(crate) fn replace_geometry(&mut self, vertices: Vec<Vertex>, faces: Vec<Face>) {
        self.vertices = vertices;
        self.faces = faces;
        self.render_vertex_count = 0;
    }

    /// World-space positions of every vertex, for physics hull construction.
    pub fn world_points(&self) -> Vec<DVec3> {
        let matrix = self.model_matrix();
        self.vertices
            .iter()
            .map(|v| matrix.transform_point3(v.position))
            .collect()
    }

    /// Computes the local-space axis-aligned bounding box.
    ///
    /// Returns (min, max) corners, both zero for an empty brush.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some(first) = self.vertices.first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        self.vertices[1..]
            .iter()
            .fold((first.position, first.position), |(min, max), v| {
                (min.min(v.position), max.max(v.position))
            })
    }

    /// Checks that every face has at least 3 corners and only valid indices.
    pub fn validate(&self) -> KernelResult<()> {
        let vertex_count = self.vertices.len();
        for (face_index, face) in self.faces.iter().enumerate() {
            if face.corner_count() < 3 {
                return Err(KernelError::invalid_topology(format!(
                    "face {face_index} has {} corners",
                    face.corner_count()
                )));
            }
            if let Some(bad) = face.indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(KernelError::invalid_topology(format!(
                    "face {face_index} references vertex {bad} of {vertex_count}"
                )));
            }
        }
        Ok(())
    }
}
