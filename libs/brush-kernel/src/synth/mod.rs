//! # Render Synthesis
//!
//! Flattens a brush into an unindexed triangle list ready for GPU upload.
//!
//! ## Pipeline
//!
//! 1. Smooth vertex normals from area-weighted fan triangles.
//! 2. Fan triangulation: a face with `n` corners emits `n - 2` triangles.
//! 3. Per corner, project the local position along the triangle's dominant
//!    axis and run it through each material layer.
//! 4. Tangent frames from the layer-0 UVs.
//! 5. Lightmap UVs: layer-0 UVs normalized to the face's bounding box and
//!    remapped into its atlas rectangle.
//!
//! The brush is only touched to record the render-vertex count and the last
//! lightmap UV computed for each vertex.

pub mod normals;
pub mod projection;
pub mod tangent;
pub mod vertex;


pub use projection::DominantAxis;
pub use tangent::TriangleFrame;
pub use vertex::RenderVertex;

use crate::brush::{Brush, Face};
use crate::error::{with_capacity, KernelResult};
use config::constants::MATERIAL_LAYER_COUNT;
use glam::{DVec3, Vec2};

/// Flat render buffer produced by [`build_render_data`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderData {
    /// Three consecutive vertices per triangle.
    pub vertices: Vec<RenderVertex>,
    /// Number of vertices in the buffer.
    pub vertex_count: usize,
}

impl RenderData {
    /// Number of triangles in the buffer.
    pub fn triangle_count(&self) -> usize {
        self.vertex_count / 3
    }

    /// The buffer as raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// One fan triangle of a face after projection.
struct Corners {
    indices: [u32; 3],
    positions: [DVec3; 3],
    uvs: [[Vec2; MATERIAL_LAYER_COUNT]; 3],
}

/// Builds the render buffer for `brush`.
///
/// An empty brush yields an empty buffer. On success the brush's cached
/// render-vertex count and per-vertex lightmap UVs are updated.
///
/// # Example
///
/// ```rust
/// use brush_kernel::{primitives::build_box, synth::build_render_data, Brush};
/// use glam::DVec3;
///
/// let mut brush = Brush::new();
/// build_box(&mut brush, DVec3::splat(2.0));
///
/// let data = build_render_data(&mut brush).unwrap();
/// assert_eq!(data.vertex_count, 36);
/// assert_eq!(brush.render_vertex_count(), 36);
/// ```
pub fn build_render_data(brush: &mut Brush) -> KernelResult<RenderData> {
    let vertex_count: usize = brush
        .faces()
        .iter()
        .map(|f| f.corner_count().saturating_sub(2) * 3)
        .sum();

    let normals = normals::smooth_normals(brush)?;
    let mut vertices = with_capacity(vertex_count, "synthesizing render vertices")?;
    let mut lightmap_writes = with_capacity(vertex_count, "synthesizing render vertices")?;

    for (face_index, face) in brush.faces().iter().enumerate() {
        let triangles = project_face(brush, face)?;
        let (min, extent) = uv_bounds(&triangles);

        for tri in &triangles {
            let layer0 = [tri.uvs[0][0], tri.uvs[1][0], tri.uvs[2][0]];
            let frame = TriangleFrame::new(tri.positions, layer0);

            for corner in 0..3 {
                let index = tri.indices[corner] as usize;
                let source = &brush.vertices()[index];
                let normal = normals[index];

                let local = (layer0[corner] - min) / extent;
                let lightmap_uv = face.lightmap.remap(local).to_array();
                lightmap_writes.push((index, lightmap_uv));

                vertices.push(RenderVertex {
                    position: source.position.as_vec3().to_array(),
                    normal: normal.as_vec3().to_array(),
                    color: source.color,
                    uv: tri.uvs[corner].map(|uv| uv.to_array()),
                    tangent: frame.tangent(normal),
                    lightmap_uv,
                });
            }
        }
        log::trace!("face {face_index}: {} triangles", triangles.len());
    }

    for (index, uv) in lightmap_writes {
        brush.vertices_mut()[index].lightmap_uv = uv;
    }
    brush.set_render_vertex_count(vertex_count);
    log::debug!(
        "synthesized {} render vertices from {} faces",
        vertex_count,
        brush.face_count()
    );
    Ok(RenderData {
        vertices,
        vertex_count,
    })
}

/// Fan-triangulates `face` and projects every corner.
fn project_face(brush: &Brush, face: &Face) -> KernelResult<Vec<Corners>> {
    let vertices = brush.vertices();
    let mut triangles = with_capacity(face.corner_count().saturating_sub(2), "projecting face")?;
    for indices in face.fan_triangles() {
        let positions = indices.map(|i| vertices[i as usize].position);
        let [p0, p1, p2] = positions;
        let axis = DominantAxis::of((p1 - p0).cross(p2 - p0));
        let uvs = positions.map(|p| projection::layer_uvs(&face.layers, axis.project(p)));
        triangles.push(Corners {
            indices,
            positions,
            uvs,
        });
    }
    Ok(triangles)
}

/// Minimum and extent of the layer-0 UVs over a face's corners.
///
/// Zero extents are replaced by one so degenerate faces map to `s = 0`.
fn uv_bounds(triangles: &[Corners]) -> (Vec2, Vec2) {
    let mut corners = triangles.iter().flat_map(|t| t.uvs.iter().map(|uv| uv[0]));
    let Some(first) = corners.next() else {
        return (Vec2::ZERO, Vec2::ONE);
    };
    let (min, max) = corners.fold((first, first), |(min, max), uv| (min.min(uv), max.max(uv)));
    let extent = max - min;
    let safe = |e: f32| if e > f32::EPSILON { e } else { 1.0 };
    (min, Vec2::new(safe(extent.x), safe(extent.y)))
}
