//! # Kernel Errors
//!
//! Error types for brush operations.
//!
//! No-op conditions (a plane that misses the brush, a non-quad subdivision
//! target, an empty brush) and defined data loss (a brush clipped away, a
//! face degenerating below three corners) are reported through outcome
//! values, not errors. Errors are reserved for requests that cannot be
//! carried out; the brush is left exactly as it was when one is returned.

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors that can occur during brush operations.
#[derive(Debug, Error)]
pub enum KernelError {
    /// A growable buffer could not be reserved while building new geometry.
    #[error("Allocation failed while {context}: {source}")]
    Allocation {
        context: &'static str,
        #[source]
        source: TryReserveError,
    },

    /// A face index does not name a face of the brush.
    #[error("Face index {index} out of range (brush has {count} faces)")]
    FaceOutOfRange { index: usize, count: usize },

    /// The brush breaks one of its structural invariants.
    #[error("Invalid topology: {message}")]
    InvalidTopology { message: String },

    /// The lightmap packer received a different number of image slots than
    /// the brush has faces.
    #[error("Expected {expected} lightmap image slots, got {actual}")]
    LightmapImageCount { expected: usize, actual: usize },

    /// A subdivision grid has more vertices or faces than the brush can index.
    #[error("Subdivision grid of {u_divs}x{v_divs} is too large")]
    GridTooLarge { u_divs: u32, v_divs: u32 },

    /// The packed atlas would not fit in 32-bit image dimensions.
    #[error("Lightmap atlas of {width}x{height} pixels is too large")]
    AtlasTooLarge { width: u64, height: u64 },
}

impl KernelError {
    /// Creates an allocation error for the named build step.
    pub fn allocation(context: &'static str, source: TryReserveError) -> Self {
        Self::Allocation { context, source }
    }

    /// Creates an invalid topology error.
    pub fn invalid_topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology {
            message: message.into(),
        }
    }
}

/// Result type alias for brush operations.
pub type KernelResult<T> = Result<T, KernelError>;

/// Reserves room for `additional` elements, mapping failure to
/// [`KernelError::Allocation`].
pub(crate) fn reserve<T>(
    buffer: &mut Vec<T>,
    additional: usize,
    context: &'static str,
) -> KernelResult<()> {
    buffer
        .try_reserve(additional)
        .map_err(|source| KernelError::allocation(context, source))
}

/// Allocates an empty vector able to hold `capacity` elements.
pub(crate) fn with_capacity<T>(capacity: usize, context: &'static str) -> KernelResult<Vec<T>> {
    let mut buffer = Vec::new();
    reserve(&mut buffer, capacity, context)?;
    Ok(buffer)
}
