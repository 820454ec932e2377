//! # Config Crate
//!
//! Centralized configuration constants for the brush geometry kernel.
//! Every tolerance, default and size limit used while building, clipping,
//! subdividing and baking brushes is defined here so the kernel never
//! scatters literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{CLIP_EPSILON, MIN_PRIMITIVE_SIDES};
//!
//! // A signed distance inside the epsilon band counts as "on the plane".
//! let distance: f64 = 0.000_004;
//! assert!(distance.abs() <= CLIP_EPSILON);
//!
//! // Parametric shapes never go below a triangle.
//! let sides = 2_u32.max(MIN_PRIMITIVE_SIDES);
//! assert_eq!(sides, 3);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Validated Snapshots**: Runtime overrides go through [`constants::KernelConfig::new`]
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
