//! # Configuration Constants
//!
//! Centralized constants for the brush geometry kernel. Classification
//! tolerances, primitive defaults and lightmap limits are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Plane classification and point merging tolerances
//! - **Primitives**: Tessellation and face defaults
//! - **Lightmaps**: Atlas padding and bake resolution limits

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Half-width of the band around a clip plane in which a vertex counts as
/// coincident rather than front or back.
///
/// # Example
///
/// ```rust
/// use config::constants::CLIP_EPSILON;
///
/// fn side(distance: f64) -> i8 {
///     if distance > CLIP_EPSILON {
///         1
///     } else if distance < -CLIP_EPSILON {
///         -1
///     } else {
///         0
///     }
/// }
///
/// assert_eq!(side(1e-6), 0);
/// assert_eq!(side(-0.5), -1);
/// ```
pub const CLIP_EPSILON: f64 = 1e-5;

/// Distance below which two cut points are treated as the same point when
/// building the cap polygon of a clip.
///
/// # Example
///
/// ```rust
/// use config::constants::CAP_MERGE_DISTANCE;
///
/// let a = [0.0_f64, 0.0, 0.0];
/// let b = [0.0005_f64, 0.0, 0.0];
/// let d = ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt();
/// assert!(d < CAP_MERGE_DISTANCE);
/// ```
pub const CAP_MERGE_DISTANCE: f64 = 1e-3;

/// Smallest accumulated normal length that is still normalized.
///
/// Shorter vectors come from degenerate or fully cancelled geometry and are
/// left at zero.
pub const NORMAL_EPSILON: f64 = 1e-12;

/// Smallest magnitude a UV scale component may take before division.
///
/// Zero scales would produce infinite texture coordinates, so the sign is
/// kept and the magnitude is clamped to this value.
///
/// # Example
///
/// ```rust
/// use config::constants::UV_SCALE_EPSILON;
///
/// let scale: f32 = 0.0;
/// let safe = if scale.abs() < UV_SCALE_EPSILON { UV_SCALE_EPSILON } else { scale };
/// assert!(safe > 0.0);
/// ```
pub const UV_SCALE_EPSILON: f32 = 1e-3;

// =============================================================================
// PRIMITIVE CONSTANTS
// =============================================================================

/// Minimum number of sides for any round primitive.
///
/// Requests below this are clamped rather than rejected.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_PRIMITIVE_SIDES;
///
/// let requested = 1_u32;
/// assert_eq!(requested.max(MIN_PRIMITIVE_SIDES), 3);
/// ```
pub const MIN_PRIMITIVE_SIDES: u32 = 3;

/// Number of independent material layers carried by every face.
pub const MATERIAL_LAYER_COUNT: usize = 4;

/// Name of the material handle assigned to freshly built faces and caps.
pub const DEFAULT_MATERIAL_NAME: &str = "default";

/// Default vertex color (opaque white, so it tints nothing).
///
/// RGBA values in range [0.0, 1.0].
pub const DEFAULT_VERTEX_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Default lightmap scale multiplier for new faces.
pub const DEFAULT_LIGHTMAP_SCALE: f32 = 1.0;

// =============================================================================
// LIGHTMAP CONSTANTS
// =============================================================================

/// Pixels trimmed from every side of a face's atlas sub-rectangle so bilinear
/// sampling does not bleed into neighbouring cells.
pub const LIGHTMAP_PADDING_PX: u32 = 1;

/// Smallest bake image edge suggested for a face.
pub const MIN_LIGHTMAP_TEXELS: u32 = 4;

/// Largest bake image edge suggested for a face.
pub const MAX_LIGHTMAP_TEXELS: u32 = 512;

// =============================================================================
// KERNEL CONFIGURATION SNAPSHOT
// =============================================================================

/// Immutable snapshot of the tunable kernel settings.
///
/// # Examples
/// ```
/// use config::constants::KernelConfig;
/// let config = KernelConfig::default();
/// assert!(config.clip_epsilon > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelConfig {
    /// Plane classification tolerance used by the clipper.
    pub clip_epsilon: f64,
    /// Merge distance for cap polygon points.
    pub cap_merge_distance: f64,
    /// Padding trimmed from each atlas sub-rectangle, in pixels.
    pub lightmap_padding: u32,
}

impl KernelConfig {
    /// Builds a configuration, rejecting non-positive tolerances.
    ///
    /// # Examples
    /// ```
    /// use config::constants::KernelConfig;
    /// let cfg = KernelConfig::new(1.0e-4, 1.0e-2, 2).expect("valid config");
    /// assert_eq!(cfg.lightmap_padding, 2);
    /// ```
    pub fn new(
        clip_epsilon: f64,
        cap_merge_distance: f64,
        lightmap_padding: u32,
    ) -> Result<Self, ConfigError> {
        if clip_epsilon.is_nan() || clip_epsilon <= 0.0 {
            return Err(ConfigError::InvalidEpsilon(clip_epsilon));
        }
        if cap_merge_distance.is_nan() || cap_merge_distance <= 0.0 {
            return Err(ConfigError::InvalidMergeDistance(cap_merge_distance));
        }
        Ok(Self {
            clip_epsilon,
            cap_merge_distance,
            lightmap_padding,
        })
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            clip_epsilon: CLIP_EPSILON,
            cap_merge_distance: CAP_MERGE_DISTANCE,
            lightmap_padding: LIGHTMAP_PADDING_PX,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the clip epsilon is zero, negative or NaN.
    InvalidEpsilon(f64),
    /// Raised when the cap merge distance is zero, negative or NaN.
    InvalidMergeDistance(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidEpsilon(value) => {
                write!(f, "clip_epsilon must be positive: {value}")
            }
            ConfigError::InvalidMergeDistance(value) => {
                write!(f, "cap_merge_distance must be positive: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Clamps a requested side count to [`MIN_PRIMITIVE_SIDES`].
///
/// # Example
///
/// ```rust
/// use config::constants::clamp_sides;
///
/// assert_eq!(clamp_sides(0), 3);
/// assert_eq!(clamp_sides(12), 12);
/// ```
#[inline]
pub fn clamp_sides(sides: u32) -> u32 {
    sides.max(MIN_PRIMITIVE_SIDES)
}
