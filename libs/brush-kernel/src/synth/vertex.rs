//! Render vertex layout.

use bytemuck::{Pod, Zeroable};
use config::constants::MATERIAL_LAYER_COUNT;

/// One triangle corner of the render buffer.
///
/// Plain `f32` fields with no padding, uploadable with
/// `bytemuck::cast_slice`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct RenderVertex {
    /// Local-space position.
    pub position: [f32; 3],
    /// Smoothed vertex normal.
    pub normal: [f32; 3],
    /// Vertex color (blend weight and tint).
    pub color: [f32; 4],
    /// Projected texture coordinates, one pair per material layer.
    pub uv: [[f32; 2]; MATERIAL_LAYER_COUNT],
    /// Tangent in `xyz`, bitangent handedness in `w`.
    pub tangent: [f32; 4],
    /// Coordinates in the lightmap atlas.
    pub lightmap_uv: [f32; 2],
}
