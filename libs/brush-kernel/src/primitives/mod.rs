//! # Primitives
//!
//! Parametric brush builders. Every builder replaces the brush's vertex and
//! face arrays with a shape centered on the local origin, `size` giving the
//! full extent along each axis (Y up). Round shapes clamp `sides` to
//! [`MIN_PRIMITIVE_SIDES`](config::constants::MIN_PRIMITIVE_SIDES).
//!
//! Builders never fail. Each new face samples the brush's default material
//! on layer 0 with an identity projection.

pub mod cuboid;
pub mod cylinder;
pub mod sphere;

pub use cuboid::{build_box, build_wedge};
pub use cylinder::{build_cylinder, build_spike, build_tube};
pub use sphere::{build_hemisphere, build_sphere};

use crate::brush::{Brush, Face, Vertex};
use crate::material::MaterialHandle;
use glam::DVec3;
use std::f64::consts::TAU;

/// Accumulates a shape's vertices and faces before swapping them into a
/// brush.
pub(crate) struct ShapeBuilder {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    material: MaterialHandle,
}

impl ShapeBuilder {
    pub(crate) fn new(brush: &Brush, vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
            material: brush.default_material().clone(),
        }
    }

    pub(crate) fn vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(Vertex::new(position));
        index
    }

    pub(crate) fn face(&mut self, indices: Vec<u32>) {
        self.faces.push(Face::new(indices, self.material.clone()));
    }

    /// Adds `sides` vertices on an ellipse in the plane `y`, ordered by
    /// increasing angle from +X toward +Z (clockwise seen from above).
    pub(crate) fn ring(&mut self, radius_x: f64, radius_z: f64, y: f64, sides: u32) -> Vec<u32> {
        (0..sides)
            .map(|j| {
                let theta = TAU * j as f64 / sides as f64;
                self.vertex(DVec3::new(radius_x * theta.cos(), y, radius_z * theta.sin()))
            })
            .collect()
    }

    /// Quads joining a lower ring to an upper ring, wound outward.
    pub(crate) fn band(&mut self, lower: &[u32], upper: &[u32]) {
        let n = lower.len();
        for j in 0..n {
            let next = (j + 1) % n;
            self.face(vec![lower[j], upper[j], upper[next], lower[next]]);
        }
    }

    /// Triangles joining a ring to an apex above it.
    pub(crate) fn fan_up(&mut self, ring: &[u32], apex: u32) {
        let n = ring.len();
        for j in 0..n {
            self.face(vec![ring[j], apex, ring[(j + 1) % n]]);
        }
    }

    /// Triangles joining a ring to an apex below it.
    pub(crate) fn fan_down(&mut self, ring: &[u32], apex: u32) {
        let n = ring.len();
        for j in 0..n {
            self.face(vec![apex, ring[j], ring[(j + 1) % n]]);
        }
    }

    /// Cap polygon facing -Y over a ring.
    pub(crate) fn cap_down(&mut self, ring: &[u32]) {
        self.face(ring.to_vec());
    }

    /// Cap polygon facing +Y over a ring.
    pub(crate) fn cap_up(&mut self, ring: &[u32]) {
        self.face(ring.iter().rev().copied().collect());
    }

    pub(crate) fn finish(self, brush: &mut Brush) {
        log::trace!(
            "built primitive: {} vertices, {} faces",
            self.vertices.len(),
            self.faces.len()
        );
        brush.replace_geometry(self.vertices, self.faces);
    }
}
