//! # Brush Operations
//!
//! In-place edits of a brush's vertex and face arrays. Each operation builds
//! complete replacement buffers and swaps them in only once nothing can fail
//! any more, so an error always leaves the brush as it was.

pub mod clip;
pub mod subdivide;

pub use clip::{clip, clip_with, ClipOutcome, ClipPlane};
pub use subdivide::{subdivide, SubdivideOutcome};
