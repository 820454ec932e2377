//! # Brush Kernel
//!
//! Geometry core of a level editor's convex brushes.
//! Builds parametric solids, carves and subdivides them, and turns them into
//! render-ready vertex buffers.
//!
//! ## Architecture
//!
//! ```text
//! primitives ─┐
//! ops::clip ──┼─> Brush ──> lightmap (atlas rects) ──> synth (RenderData)
//! ops::subdivide ┘                                 └─> Brush::world_points
//! ```
//!
//! Builders and operations replace the brush's vertex and face arrays with
//! freshly built ones; the lightmap packer only annotates faces; the render
//! synthesizer is the terminal consumer.
//!
//! ## Usage
//!
//! ```rust
//! use brush_kernel::{
//!     ops::{clip, subdivide, ClipPlane},
//!     primitives::build_box,
//!     synth::build_render_data,
//!     Brush,
//! };
//! use glam::DVec3;
//!
//! let mut brush = Brush::new();
//! build_box(&mut brush, DVec3::splat(2.0));
//! subdivide(&mut brush, 2, 2, 2).unwrap();
//! clip(&mut brush, ClipPlane::new(-DVec3::X, 0.5)).unwrap();
//!
//! let data = build_render_data(&mut brush).unwrap();
//! assert_eq!(data.vertex_count, brush.render_vertex_count());
//! ```

pub mod brush;
pub mod entity;
pub mod error;
pub mod lightmap;
pub mod material;
pub mod ops;
pub mod primitives;
pub mod synth;
pub mod transform;

pub use brush::{Brush, Face, Vertex};
pub use entity::{Entity, LightEntity, SpawnPoint};
pub use error::{KernelError, KernelResult};
pub use lightmap::{pack_atlas, BakedFaceImages, LightmapAtlas, LightmapImage};
pub use material::{LightmapRect, MaterialHandle, MaterialLayer};
pub use synth::{build_render_data, RenderData, RenderVertex};
pub use transform::Transform;
