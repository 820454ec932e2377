//! # Clip Plane
//!
//! World-space plane with epsilon-band point classification.

use glam::DVec3;

// =============================================================================
// SIDE
// =============================================================================

/// Position of a point relative to a clip plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Positive side, kept.
    Front,
    /// Negative side, removed.
    Back,
    /// Inside the epsilon band, kept.
    Coincident,
}

impl Side {
    /// `+1`, `-1` or `0`.
    pub fn sign(self) -> i8 {
        match self {
            Side::Front => 1,
            Side::Back => -1,
            Side::Coincident => 0,
        }
    }

    /// True for exactly one front and one back endpoint.
    pub fn straddles(self, other: Side) -> bool {
        self.sign() * other.sign() < 0
    }
}

// =============================================================================
// CLIP PLANE
// =============================================================================

/// The plane `dot(normal, p) + d = 0`; points with a positive value are in
/// front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlane {
    /// Plane normal, pointing into the half that survives a clip.
    pub normal: DVec3,
    /// Plane offset.
    pub d: f64,
}

impl ClipPlane {
    /// Creates a plane from its normal and offset.
    pub fn new(normal: DVec3, d: f64) -> Self {
        Self { normal, d }
    }

    /// Creates the plane through `point` with the given normal.
    pub fn from_point_normal(point: DVec3, normal: DVec3) -> Self {
        Self {
            normal,
            d: -normal.dot(point),
        }
    }

    /// Signed distance-like value, scaled by the normal's length.
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) + self.d
    }

    /// Classifies a signed distance against the epsilon band.
    pub fn classify_distance(distance: f64, epsilon: f64) -> Side {
        if distance > epsilon {
            Side::Front
        } else if distance < -epsilon {
            Side::Back
        } else {
            Side::Coincident
        }
    }

    /// Classifies a point.
    pub fn classify_point(&self, point: DVec3, epsilon: f64) -> Side {
        Self::classify_distance(self.signed_distance(point), epsilon)
    }
}

// =============================================================================
// TESTS
// =============================================================================
