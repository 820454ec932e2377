//! # Plane Clipping
//!
//! Carves a brush with a world-space plane. The half in front of the plane
//! (`dot(normal, world) + d >= -epsilon`) survives, everything behind it is
//! discarded and the cut is closed with a cap face. The cap faces out of the
//! kept half, i.e. along `-normal`.
//!
//! ## Algorithm
//!
//! 1. Classify every vertex in world space as front, back or coincident.
//! 2. Nothing behind: no-op. Everything behind: the brush is emptied.
//! 3. Keep front and coincident vertices; add one interpolated vertex per
//!    edge running from front to back (shared by both faces of the edge).
//! 4. Walk each face in order emitting kept and cut corners; drop faces
//!    left with fewer than 3 corners.
//! 5. Merge the cut points, order them around their centroid and append the
//!    cap face.
//! 6. Swap the new arrays into the brush.
//!
//! Only edge intersections become cap corners. A plane running through
//! existing vertices yields fewer intersections, and with fewer than three
//! the brush is left open.

pub mod cap;
pub mod plane;

#[cfg(test)]
mod tests;

pub use cap::CapSortContext;
pub use plane::{ClipPlane, Side};

use crate::brush::{Brush, Face, Vertex};
use crate::error::{reserve, with_capacity, KernelError, KernelResult};
use config::constants::KernelConfig;
use glam::DMat3;
use std::collections::HashMap;

/// Result of a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipOutcome {
    /// The plane did not cut the brush.
    Unchanged,
    /// Every vertex was behind the plane.
    Emptied,
    /// The brush was cut.
    Clipped {
        /// Vertices behind the plane that were removed.
        removed_vertices: usize,
        /// Interpolated vertices inserted along cut edges.
        added_vertices: usize,
        /// Whether a cap face was appended.
        capped: bool,
    },
}

/// Clips `brush` by `plane` with the default tolerances.
///
/// # Example
///
/// ```rust
/// use brush_kernel::{ops::{clip, ClipOutcome, ClipPlane}, primitives::build_box, Brush};
/// use glam::DVec3;
///
/// let mut brush = Brush::new();
/// build_box(&mut brush, DVec3::splat(2.0));
///
/// // Keep x <= 0.
/// let outcome = clip(&mut brush, ClipPlane::new(-DVec3::X, 0.0)).unwrap();
/// assert!(matches!(outcome, ClipOutcome::Clipped { capped: true, .. }));
/// assert_eq!(brush.face_count(), 6);
/// ```
pub fn clip(brush: &mut Brush, plane: ClipPlane) -> KernelResult<ClipOutcome> {
    clip_with(brush, plane, &KernelConfig::default())
}

/// Clips `brush` by `plane` using the tolerances in `config`.
///
/// On error the brush is untouched.
pub fn clip_with(
    brush: &mut Brush,
    plane: ClipPlane,
    config: &KernelConfig,
) -> KernelResult<ClipOutcome> {
    if brush.is_empty() {
        return Ok(ClipOutcome::Unchanged);
    }

    let matrix = brush.model_matrix();
    let mut distances = with_capacity(brush.vertex_count(), "classifying clip vertices")?;
    distances.extend(
        brush
            .vertices()
            .iter()
            .map(|v| plane.signed_distance(matrix.transform_point3(v.position))),
    );
    let mut sides = with_capacity(distances.len(), "classifying clip vertices")?;
    sides.extend(
        distances
            .iter()
            .map(|&d| ClipPlane::classify_distance(d, config.clip_epsilon)),
    );

    let back = sides.iter().filter(|&&s| s == Side::Back).count();
    if back == 0 {
        log::trace!("clip plane misses brush");
        return Ok(ClipOutcome::Unchanged);
    }
    if back == sides.len() {
        log::debug!("clip removed entire brush ({} vertices)", brush.vertex_count());
        brush.clear();
        return Ok(ClipOutcome::Emptied);
    }

    let mut cut = Cut::new(brush.vertices(), &distances, &sides)?;
    let mut faces = with_capacity(brush.face_count() + 1, "clipping faces")?;
    for face in brush.faces() {
        let Some(indices) = cut.clip_face(face)? else {
            continue;
        };
        faces.push(face.with_indices(indices));
    }

    // The cap is built in local space; the world plane normal maps back
    // through the transpose of the linear part.
    let keep_normal = DMat3::from_mat4(matrix).transpose() * plane.normal;
    let (vertices, cut_points) = cut.finish();
    let added_vertices = cut_points.len();
    let corners = cap::merge_points(&vertices, &cut_points, config.cap_merge_distance);
    let capped = corners.len() >= 3;
    if capped {
        let order = cap::order_cap(&vertices, &corners, keep_normal);
        faces.push(Face::new(order, brush.default_material().clone()));
    } else {
        log::debug!("clip left {} cut points, brush stays open", corners.len());
    }

    log::debug!(
        "clipped brush: removed {} vertices, added {}, {} faces",
        back,
        added_vertices,
        faces.len()
    );
    brush.replace_geometry(vertices, faces);
    Ok(ClipOutcome::Clipped {
        removed_vertices: back,
        added_vertices,
        capped,
    })
}

/// New vertex array under construction, with the old-to-new index map and
/// the edge intersections created so far.
struct Cut<'a> {
    source: &'a [Vertex],
    distances: &'a [f64],
    sides: &'a [Side],
    remap: Vec<Option<u32>>,
    vertices: Vec<Vertex>,
    edge_points: HashMap<(u32, u32), u32>,
    cut_points: Vec<u32>,
}

impl<'a> Cut<'a> {
    fn new(source: &'a [Vertex], distances: &'a [f64], sides: &'a [Side]) -> KernelResult<Self> {
        let mut vertices = with_capacity(source.len(), "clipping vertices")?;
        let mut remap = with_capacity(source.len(), "clipping vertices")?;
        for (vertex, side) in source.iter().zip(sides) {
            if *side == Side::Back {
                remap.push(None);
            } else {
                remap.push(Some(vertices.len() as u32));
                vertices.push(*vertex);
            }
        }
        Ok(Self {
            source,
            distances,
            sides,
            remap,
            vertices,
            edge_points: HashMap::new(),
            cut_points: Vec::new(),
        })
    }

    /// Hands back the new vertex array and the cut vertex indices.
    fn finish(self) -> (Vec<Vertex>, Vec<u32>) {
        (self.vertices, self.cut_points)
    }

    /// Returns the new corner list of `face`, or `None` if it degenerates.
    fn clip_face(&mut self, face: &Face) -> KernelResult<Option<Vec<u32>>> {
        let corners = face.indices();
        let n = corners.len();
        let mut indices = with_capacity(n + 2, "clipping faces")?;

        for (i, &a) in corners.iter().enumerate() {
            let b = corners[(i + 1) % n];
            if let Some(kept) = self.remap[a as usize] {
                indices.push(kept);
            }
            if self.sides[a as usize].straddles(self.sides[b as usize]) {
                indices.push(self.edge_point(a, b)?);
            }
        }

        if indices.len() < 3 {
            log::trace!("face with {n} corners degenerated to {}", indices.len());
            return Ok(None);
        }
        Ok(Some(indices))
    }

    /// Index of the intersection vertex on edge `a`-`b`, created on first
    /// use.
    fn edge_point(&mut self, a: u32, b: u32) -> KernelResult<u32> {
        let key = (a.min(b), a.max(b));
        if let Some(&index) = self.edge_points.get(&key) {
            return Ok(index);
        }
        let (da, db) = (self.distances[a as usize], self.distances[b as usize]);
        let t = da / (da - db);
        let point = self.source[a as usize].lerp(&self.source[b as usize], t);

        reserve(&mut self.vertices, 1, "clipping vertices")?;
        reserve(&mut self.cut_points, 1, "building clip cap")?;
        self.edge_points
            .try_reserve(1)
            .map_err(|source| KernelError::allocation("clipping vertices", source))?;

        let index = self.vertices.len() as u32;
        self.vertices.push(point);
        self.cut_points.push(index);
        self.edge_points.insert(key, index);
        Ok(index)
    }
}
