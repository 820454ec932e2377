//! # Face Subdivision
//!
//! Splits one quad face into a grid of smaller quads by bilinear
//! interpolation over its corners.
//!
//! The corners `c0..c3` are read as the patch `p00, p10, p11, p01`, so `u`
//! runs along the edge `c0 -> c1` and `v` along `c0 -> c3`. Grid vertices are
//! new even on the original corners; neighbouring faces keep referencing the
//! old vertices.

use crate::brush::{Brush, Vertex};
use crate::error::{reserve, with_capacity, KernelError, KernelResult};

/// Result of a subdivision request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubdivideOutcome {
    /// The target face does not have exactly four corners; nothing changed.
    NotAQuad {
        /// Corner count of the target face.
        corners: usize,
    },
    /// The face was replaced by a grid.
    Subdivided {
        /// Grid vertices appended to the brush.
        added_vertices: usize,
        /// Grid faces appended to the brush.
        added_faces: usize,
    },
}

/// Replaces quad `face_index` with a `u_divs` × `v_divs` grid.
///
/// Division counts of zero are treated as one. Grid faces inherit the
/// material layers, atlas rectangle and lightmap scale of the original and
/// keep its winding.
///
/// # Example
///
/// ```rust
/// use brush_kernel::{ops::{subdivide, SubdivideOutcome}, primitives::build_box, Brush};
/// use glam::DVec3;
///
/// let mut brush = Brush::new();
/// build_box(&mut brush, DVec3::splat(2.0));
///
/// let outcome = subdivide(&mut brush, 0, 2, 2).unwrap();
/// assert_eq!(
///     outcome,
///     SubdivideOutcome::Subdivided { added_vertices: 9, added_faces: 4 }
/// );
/// assert_eq!(brush.face_count(), 9);
/// ```
pub fn subdivide(
    brush: &mut Brush,
    face_index: usize,
    u_divs: u32,
    v_divs: u32,
) -> KernelResult<SubdivideOutcome> {
    let face = brush
        .faces()
        .get(face_index)
        .ok_or(KernelError::FaceOutOfRange {
            index: face_index,
            count: brush.face_count(),
        })?;

    let &[c00, c10, c11, c01] = face.indices() else {
        log::trace!(
            "face {face_index} has {} corners, not subdividing",
            face.corner_count()
        );
        return Ok(SubdivideOutcome::NotAQuad {
            corners: face.corner_count(),
        });
    };

    let too_large = || KernelError::GridTooLarge { u_divs, v_divs };
    let u_divs = u_divs.max(1) as usize;
    let v_divs = v_divs.max(1) as usize;
    let columns = u_divs.checked_add(1).ok_or_else(too_large)?;
    let added_vertices = v_divs
        .checked_add(1)
        .and_then(|rows| rows.checked_mul(columns))
        .ok_or_else(too_large)?;
    let added_faces = u_divs.checked_mul(v_divs).ok_or_else(too_large)?;

    let source = brush.vertices();
    // Grid corners are stored as u32 indices.
    let vertex_total = source
        .len()
        .checked_add(added_vertices)
        .filter(|&total| u32::try_from(total - 1).is_ok())
        .ok_or_else(too_large)?;
    let corner = |i: u32| source[i as usize];
    let (p00, p10, p11, p01) = (corner(c00), corner(c10), corner(c11), corner(c01));

    let mut vertices = with_capacity(vertex_total, "subdividing vertices")?;
    vertices.extend_from_slice(source);
    let base = vertices.len();
    for j in 0..=v_divs {
        let t = j as f64 / v_divs as f64;
        for i in 0..=u_divs {
            let s = i as f64 / u_divs as f64;
            let bottom: Vertex = p00.lerp(&p10, s);
            let top = p01.lerp(&p11, s);
            vertices.push(bottom.lerp(&top, t));
        }
    }

    let grid = |i: usize, j: usize| (base + j * columns + i) as u32;
    let mut faces = with_capacity(brush.face_count() - 1 + added_faces, "subdividing faces")?;
    faces.extend(
        brush
            .faces()
            .iter()
            .enumerate()
            .filter(|&(index, _)| index != face_index)
            .map(|(_, f)| f.clone()),
    );
    for j in 0..v_divs {
        for i in 0..u_divs {
            let mut indices = with_capacity(4, "subdividing faces")?;
            indices.extend([grid(i, j), grid(i + 1, j), grid(i + 1, j + 1), grid(i, j + 1)]);
            reserve(&mut faces, 1, "subdividing faces")?;
            faces.push(face.with_indices(indices));
        }
    }

    log::debug!(
        "subdivided face {face_index} into {u_divs}x{v_divs}: {added_vertices} vertices, {added_faces} faces"
    );
    brush.replace_geometry(vertices, faces);
    Ok(SubdivideOutcome::Subdivided {
        added_vertices,
        added_faces,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::MaterialHandle;
    use crate::primitives::test_support::{area_vector, signed_volume};
    use crate::primitives::{build_box, build_cylinder};
    use approx::assert_relative_eq;
    use glam::DVec3;

    fn test_box() -> Brush {
        let mut brush = Brush::new();
        build_box(&mut brush, DVec3::splat(2.0));
        brush
    }

    #[test]
    fn test_box_face_two_by_two() {
        let mut brush = test_box();
        let outcome = subdivide(&mut brush, 0, 2, 2).unwrap();

        assert_eq!(
            outcome,
            SubdivideOutcome::Subdivided {
                added_vertices: 9,
                added_faces: 4
            }
        );
        assert_eq!(brush.vertex_count(), 8 + 9);
        assert_eq!(brush.face_count(), 9);
        assert!(brush.validate().is_ok());
    }

    #[test]
    fn test_counts_follow_divisions() {
        for (u, v) in [(1, 1), (3, 1), (1, 4), (3, 5)] {
            let mut brush = test_box();
            subdivide(&mut brush, 2, u, v).unwrap();
            let (u, v) = (u as usize, v as usize);
            assert_eq!(brush.vertex_count(), 8 + (u + 1) * (v + 1));
            assert_eq!(brush.face_count(), 6 - 1 + u * v);
        }
    }

    #[test]
    fn test_zero_divisions_clamp_to_one() {
        let mut brush = test_box();
        let outcome = subdivide(&mut brush, 0, 0, 0).unwrap();
        assert_eq!(
            outcome,
            SubdivideOutcome::Subdivided {
                added_vertices: 4,
                added_faces: 1
            }
        );
        assert_eq!(brush.face_count(), 6);
    }

    #[test]
    fn test_grid_lies_on_the_face() {
        let mut brush = test_box();
        // Face 0 is +X.
        subdivide(&mut brush, 0, 3, 2).unwrap();
        for v in &brush.vertices()[8..] {
            assert_relative_eq!(v.position.x, 1.0, epsilon = 1e-12);
        }
        // Grid faces keep the outward winding, so the solid stays closed.
        assert_relative_eq!(signed_volume(&brush), 8.0, epsilon = 1e-9);
        assert!(area_vector(&brush).length() < 1e-9);
    }

    #[test]
    fn test_untouched_geometry_is_preserved() {
        let mut brush = test_box();
        let before = brush.duplicate();
        subdivide(&mut brush, 1, 2, 2).unwrap();

        assert_eq!(&brush.vertices()[..8], before.vertices());
        assert_eq!(brush.faces()[0], before.faces()[0]);
        assert_eq!(&brush.faces()[1..5], &before.faces()[2..6]);
    }

    #[test]
    fn test_color_is_interpolated() {
        let mut brush = test_box();
        let corners: Vec<u32> = brush.faces()[0].indices().to_vec();
        brush.vertices_mut()[corners[0] as usize].color = [0.0; 4];
        brush.vertices_mut()[corners[2] as usize].color = [0.0; 4];

        subdivide(&mut brush, 0, 2, 2).unwrap();

        // Grid center averages two white and two black corners.
        let center = brush.vertices()[8 + 4];
        assert_relative_eq!(center.color[0], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_attributes_are_inherited() {
        let mut brush = test_box();
        brush.faces_mut()[0].layers[0].material = Some(MaterialHandle::named("tile"));
        brush.faces_mut()[0].lightmap_scale = 4.0;

        subdivide(&mut brush, 0, 2, 1).unwrap();

        for face in &brush.faces()[5..] {
            assert_eq!(face.layers[0].material, Some(MaterialHandle::named("tile")));
            assert_eq!(face.lightmap_scale, 4.0);
        }
    }

    #[test]
    fn test_non_quad_is_noop() {
        let mut brush = Brush::new();
        build_cylinder(&mut brush, DVec3::splat(2.0), 6);
        let before = brush.duplicate();
        let cap = brush
            .faces()
            .iter()
            .position(|f| f.corner_count() == 6)
            .unwrap();

        let outcome = subdivide(&mut brush, cap, 2, 2).unwrap();

        assert_eq!(outcome, SubdivideOutcome::NotAQuad { corners: 6 });
        assert_eq!(brush, before);
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        let mut brush = test_box();
        let before = brush.duplicate();

        let err = subdivide(&mut brush, 0, u32::MAX, u32::MAX).unwrap_err();
        assert!(matches!(
            err,
            KernelError::GridTooLarge {
                u_divs: u32::MAX,
                v_divs: u32::MAX
            }
        ));
        assert_eq!(brush, before);
    }

    #[test]
    fn test_grid_beyond_index_range_is_rejected() {
        let mut brush = test_box();
        let before = brush.duplicate();

        // 70001 * 70001 vertices do not fit in u32 indices.
        let err = subdivide(&mut brush, 0, 70_000, 70_000).unwrap_err();
        assert!(matches!(err, KernelError::GridTooLarge { .. }));
        assert_eq!(brush, before);
    }

    #[test]
    fn test_face_out_of_range() {
        let mut brush = test_box();
        let err = subdivide(&mut brush, 6, 2, 2).unwrap_err();
        assert!(matches!(err, KernelError::FaceOutOfRange { index: 6, count: 6 }));
        assert_eq!(brush.face_count(), 6);
    }
}
