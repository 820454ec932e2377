//! # Clip Tests
//!
//! Plane clipping against boxes, transformed brushes and the degenerate
//! configurations the cap builder has to survive.

use super::*;
use crate::material::{MaterialHandle, MaterialLayer};
use crate::primitives::build_box;
use crate::primitives::test_support::{area_vector, signed_volume};
use crate::transform::Transform;
use approx::assert_relative_eq;
use glam::DVec3;
use std::f64::consts::FRAC_PI_2;

/// A (2,2,2) box centered at the origin.
fn test_box() -> Brush {
    let mut brush = Brush::new();
    build_box(&mut brush, DVec3::splat(2.0));
    brush
}

fn face_normal(brush: &Brush, face: &Face) -> DVec3 {
    let v = brush.vertices();
    face.fan_triangles()
        .map(|[a, b, c]| {
            let (a, b, c) = (v[a as usize].position, v[b as usize].position, v[c as usize].position);
            (b - a).cross(c - a)
        })
        .sum()
}

// =============================================================================
// NO-OP AND EMPTY
// =============================================================================

#[test]
fn test_plane_in_front_is_noop() {
    let mut brush = test_box();
    let before = brush.duplicate();

    let outcome = clip(&mut brush, ClipPlane::new(DVec3::X, 5.0)).unwrap();

    assert_eq!(outcome, ClipOutcome::Unchanged);
    assert_eq!(brush, before);
}

#[test]
fn test_plane_touching_face_is_noop() {
    let mut brush = test_box();
    // x + 1 >= 0: the -X face lies inside the epsilon band.
    let outcome = clip(&mut brush, ClipPlane::new(DVec3::X, 1.0)).unwrap();
    assert_eq!(outcome, ClipOutcome::Unchanged);
    assert_eq!(brush.vertex_count(), 8);
    assert_eq!(brush.face_count(), 6);
}

#[test]
fn test_plane_behind_empties_brush() {
    let mut brush = test_box();

    let outcome = clip(&mut brush, ClipPlane::new(DVec3::X, -5.0)).unwrap();

    assert_eq!(outcome, ClipOutcome::Emptied);
    assert!(brush.is_empty());
    assert_eq!(brush.vertex_count(), 0);
    assert_eq!(brush.face_count(), 0);
}

#[test]
fn test_coincident_face_survives_when_rest_is_behind() {
    let mut brush = test_box();
    // -x - 1 >= 0 keeps only the zero-thickness -X face.
    let outcome = clip(&mut brush, ClipPlane::new(-DVec3::X, -1.0)).unwrap();

    assert_eq!(
        outcome,
        ClipOutcome::Clipped {
            removed_vertices: 4,
            added_vertices: 0,
            capped: false
        }
    );
    assert_eq!(brush.vertex_count(), 4);
    assert_eq!(brush.face_count(), 1);
    assert_eq!(brush.faces()[0].corner_count(), 4);
    assert!(brush.vertices().iter().all(|v| v.position.x == -1.0));
    assert!(brush.validate().is_ok());
}

#[test]
fn test_clip_empty_brush() {
    let mut brush = Brush::new();
    let outcome = clip(&mut brush, ClipPlane::new(DVec3::Y, 0.0)).unwrap();
    assert_eq!(outcome, ClipOutcome::Unchanged);
}

// =============================================================================
// BOX HALVES
// =============================================================================

#[test]
fn test_box_keeps_negative_x_half() {
    let mut brush = test_box();

    let outcome = clip(&mut brush, ClipPlane::new(-DVec3::X, 0.0)).unwrap();

    assert_eq!(
        outcome,
        ClipOutcome::Clipped {
            removed_vertices: 4,
            added_vertices: 4,
            capped: true
        }
    );
    assert!(brush.vertices().iter().all(|v| v.position.x <= 1e-5));
    assert_eq!(brush.vertex_count(), 8);
    assert_eq!(brush.face_count(), 6);
    assert!(brush.validate().is_ok());

    let cap = &brush.faces()[brush.face_count() - 1];
    assert_eq!(cap.corner_count(), 4);
    for &i in cap.indices() {
        assert_relative_eq!(brush.vertices()[i as usize].position.x, 0.0, epsilon = 1e-12);
    }

    // Remaining box faces are rectangles.
    for face in &brush.faces()[..5] {
        assert_eq!(face.corner_count(), 4);
    }
}

#[test]
fn test_box_keeps_positive_x_half() {
    let mut brush = test_box();

    clip(&mut brush, ClipPlane::new(DVec3::X, 0.0)).unwrap();

    assert!(brush.vertices().iter().all(|v| v.position.x >= -1e-5));
    assert_eq!(brush.face_count(), 6);
}

#[test]
fn test_cap_faces_outward() {
    let mut brush = test_box();
    clip(&mut brush, ClipPlane::new(-DVec3::X, 0.0)).unwrap();

    let cap = &brush.faces()[brush.face_count() - 1];
    let normal = face_normal(&brush, cap);
    assert!(normal.x > 0.0);
    assert!(normal.y.abs() < 1e-9 && normal.z.abs() < 1e-9);

    // The half box is closed and wound outward.
    assert_relative_eq!(signed_volume(&brush), 4.0, epsilon = 1e-9);
    assert!(area_vector(&brush).length() < 1e-9);
}

#[test]
fn test_clip_is_idempotent() {
    let mut brush = test_box();
    let plane = ClipPlane::new(DVec3::new(0.3, -1.0, 0.2), 0.25);

    clip(&mut brush, plane).unwrap();
    let once = brush.duplicate();
    let outcome = clip(&mut brush, plane).unwrap();

    assert_eq!(outcome, ClipOutcome::Unchanged);
    assert_eq!(brush, once);
}

#[test]
fn test_corner_cut_adds_triangle_cap() {
    let mut brush = test_box();
    // Keep x + y + z <= 2, removing the (1,1,1) corner.
    let outcome = clip(&mut brush, ClipPlane::new(DVec3::splat(-1.0), 2.0)).unwrap();

    assert_eq!(
        outcome,
        ClipOutcome::Clipped {
            removed_vertices: 1,
            added_vertices: 3,
            capped: true
        }
    );
    assert_eq!(brush.vertex_count(), 10);
    assert_eq!(brush.face_count(), 7);

    let pentagons = brush.faces().iter().filter(|f| f.corner_count() == 5).count();
    assert_eq!(pentagons, 3);

    let cap = &brush.faces()[6];
    assert_eq!(cap.corner_count(), 3);
    let normal = face_normal(&brush, cap).normalize();
    assert_relative_eq!(normal.dot(DVec3::ONE.normalize()), 1.0, epsilon = 1e-9);

    let expected = 8.0 - 1.0 / 6.0;
    assert_relative_eq!(signed_volume(&brush), expected, epsilon = 1e-9);
}

/// A plane through four box vertices crosses no edge, so there are no
/// intersection points to build a cap from and the half box stays open.
#[test]
fn test_cut_through_vertices_leaves_brush_open() {
    let mut brush = test_box();
    // Keep x + z <= 0; the plane passes through four box vertices.
    let outcome = clip(&mut brush, ClipPlane::new(DVec3::new(-1.0, 0.0, -1.0), 0.0)).unwrap();

    assert_eq!(
        outcome,
        ClipOutcome::Clipped {
            removed_vertices: 2,
            added_vertices: 0,
            capped: false
        }
    );
    assert_eq!(brush.vertex_count(), 6);
    // -X and -Z stay whole, +Y and -Y become triangles, +X and +Z vanish.
    assert_eq!(brush.face_count(), 4);
    let triangles = brush.faces().iter().filter(|f| f.corner_count() == 3).count();
    assert_eq!(triangles, 2);
    assert!(area_vector(&brush).length() > 1.0);
}

// =============================================================================
// ATTRIBUTES
// =============================================================================

#[test]
fn test_cut_vertices_interpolate_color() {
    let mut brush = test_box();
    for v in brush.vertices_mut() {
        let c = if v.position.x > 0.0 { 1.0 } else { 0.0 };
        v.color = [c, c, c, 1.0];
    }

    clip(&mut brush, ClipPlane::new(-DVec3::X, 0.0)).unwrap();

    for v in brush.vertices().iter().filter(|v| v.position.x.abs() < 1e-9) {
        assert_relative_eq!(v.color[0], 0.5, epsilon = 1e-6);
        assert_eq!(v.color[3], 1.0);
    }
}

#[test]
fn test_face_attributes_survive_and_cap_uses_default_material() {
    let mut brush = Brush::with_material(MaterialHandle::named("rock"));
    build_box(&mut brush, DVec3::splat(2.0));
    for face in brush.faces_mut() {
        face.layers[0].material = Some(MaterialHandle::named("brick"));
        face.layers[1] = MaterialLayer {
            rotation: 45.0,
            ..MaterialLayer::with_material(MaterialHandle::named("decal"))
        };
        face.lightmap_scale = 2.0;
    }

    clip(&mut brush, ClipPlane::new(DVec3::Y, 0.0)).unwrap();

    let (cap, rest) = brush.faces().split_last().unwrap();
    for face in rest {
        assert_eq!(face.layers[0].material, Some(MaterialHandle::named("brick")));
        assert_eq!(face.layers[1].rotation, 45.0);
        assert_eq!(face.lightmap_scale, 2.0);
    }
    assert_eq!(cap.layers[0].material, Some(MaterialHandle::named("rock")));
    assert_eq!(cap.layers[1], MaterialLayer::empty());
}

// =============================================================================
// TRANSFORMS
// =============================================================================

#[test]
fn test_classification_uses_world_space() {
    let mut brush = test_box();
    brush.transform = Transform::from_position(DVec3::new(10.0, 0.0, 0.0));

    // Keep world x <= 10, i.e. local x <= 0.
    clip(&mut brush, ClipPlane::new(-DVec3::X, 10.0)).unwrap();

    assert!(brush.vertices().iter().all(|v| v.position.x <= 1e-5));
    assert_eq!(brush.face_count(), 6);
}

#[test]
fn test_rotated_brush_cap_faces_outward_in_local_space() {
    let mut brush = test_box();
    brush.transform = Transform {
        rotation: DVec3::new(0.0, FRAC_PI_2, 0.0),
        ..Transform::IDENTITY
    };

    // World z >= 0 is local x <= 0 after a quarter turn about Y.
    clip(&mut brush, ClipPlane::new(DVec3::Z, 0.0)).unwrap();

    assert!(brush.vertices().iter().all(|v| v.position.x <= 1e-5));
    let cap = &brush.faces()[brush.face_count() - 1];
    assert!(face_normal(&brush, cap).x > 0.0);
    assert!(signed_volume(&brush) > 0.0);
}

#[test]
fn test_scaled_brush() {
    let mut brush = test_box();
    brush.transform.scale = DVec3::new(2.0, 1.0, 1.0);

    // Keep world x <= 1, i.e. local x <= 0.5.
    clip(&mut brush, ClipPlane::new(-DVec3::X, 1.0)).unwrap();

    let (_, max) = brush.bounding_box();
    assert_relative_eq!(max.x, 0.5, epsilon = 1e-9);
    assert!(area_vector(&brush).length() < 1e-9);
}

// =============================================================================
// CONFIGURATION AND LIMITATIONS
// =============================================================================

#[test]
fn test_wide_epsilon_treats_near_vertices_as_coincident() {
    let config = KernelConfig::new(0.5, 1e-3, 1).unwrap();
    let plane = ClipPlane::new(-DVec3::X, 0.6);

    let mut wide = test_box();
    assert_eq!(clip_with(&mut wide, plane, &config).unwrap(), ClipOutcome::Unchanged);

    let mut strict = test_box();
    assert!(matches!(
        clip(&mut strict, plane).unwrap(),
        ClipOutcome::Clipped { .. }
    ));
}

#[test]
fn test_open_surface_gets_no_cap() {
    let vertices = vec![
        Vertex::new(DVec3::ZERO),
        Vertex::new(DVec3::new(2.0, 0.0, 0.0)),
        Vertex::new(DVec3::new(0.0, 0.0, 2.0)),
    ];
    let faces = vec![Face::new(vec![0, 2, 1], MaterialHandle::default())];
    let mut brush = Brush::from_parts(vertices, faces).unwrap();

    let outcome = clip(&mut brush, ClipPlane::new(-DVec3::X, 1.0)).unwrap();

    assert_eq!(
        outcome,
        ClipOutcome::Clipped {
            removed_vertices: 1,
            added_vertices: 2,
            capped: false
        }
    );
    assert_eq!(brush.face_count(), 1);
    assert_eq!(brush.faces()[0].corner_count(), 4);
}

/// An L-shaped prism cut across its extrusion axis has a non-convex
/// section. The cap still collects every cut point and orders them by angle
/// around their centroid, which for this shape is the reflex corner itself;
/// the resulting polygon is not guaranteed to be simple.
#[test]
fn test_non_convex_section_is_capped_by_angle_sort() {
    let outline = [
        (0.0, 0.0),
        (2.0, 0.0),
        (2.0, 1.0),
        (1.0, 1.0),
        (1.0, 2.0),
        (0.0, 2.0),
    ];
    let mut vertices = Vec::new();
    for y in [-1.0, 1.0] {
        vertices.extend(outline.iter().map(|&(x, z)| Vertex::new(DVec3::new(x, y, z))));
    }
    let mut faces = vec![
        Face::new((0..6).collect(), MaterialHandle::default()),
        Face::new((6..12).rev().collect(), MaterialHandle::default()),
    ];
    for j in 0..6u32 {
        let next = (j + 1) % 6;
        faces.push(Face::new(vec![j, next, next + 6, j + 6], MaterialHandle::default()));
    }
    let mut brush = Brush::from_parts(vertices, faces).unwrap();

    let outcome = clip(&mut brush, ClipPlane::new(DVec3::Y, 0.0)).unwrap();

    assert!(matches!(outcome, ClipOutcome::Clipped { capped: true, .. }));
    let cap = &brush.faces()[brush.face_count() - 1];
    assert_eq!(cap.corner_count(), 6);
    for &i in cap.indices() {
        assert_relative_eq!(brush.vertices()[i as usize].position.y, 0.0, epsilon = 1e-12);
    }
}
