//! Baked lightmap inputs and bake sizing.

use crate::brush::Brush;
use crate::error::{with_capacity, KernelError, KernelResult};
use crate::synth::DominantAxis;
use config::constants::{MAX_LIGHTMAP_TEXELS, MIN_LIGHTMAP_TEXELS};
use glam::DVec3;
use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// An RGBA8 image produced by an external lightmap baker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightmapImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA bytes, `width * height * 4` long.
    pub pixels: Vec<u8>,
}

impl LightmapImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// A `width` × `height` image filled with one color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let texels = width as usize * height as usize;
        Self::new(width, height, rgba.repeat(texels))
    }

    /// True if the buffer length matches the dimensions and neither
    /// dimension is zero.
    pub fn is_valid(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.pixels.len() as u64 == u64::from(self.width) * u64::from(self.height) * 4
    }

    /// Copies the pixels into an [`RgbaImage`], `None` if the image is
    /// invalid.
    pub fn to_rgba(&self) -> KernelResult<Option<RgbaImage>> {
        if !self.is_valid() {
            return Ok(None);
        }
        let mut pixels = with_capacity(self.pixels.len(), "copying lightmap image")?;
        pixels.extend_from_slice(&self.pixels);
        Ok(RgbaImage::from_raw(self.width, self.height, pixels))
    }
}

/// The two baked images of one face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BakedFaceImages {
    /// Incoming light color.
    pub color: LightmapImage,
    /// Dominant light direction, encoded as color.
    pub direction: LightmapImage,
}

impl BakedFaceImages {
    pub fn new(color: LightmapImage, direction: LightmapImage) -> Self {
        Self { color, direction }
    }
}

/// Suggests bake image dimensions for a face.
///
/// The face's world-space corners are projected along their dominant axis
/// and the extent scaled by `texels_per_unit` and the face's lightmap scale.
/// Each side is clamped to
/// [`MIN_LIGHTMAP_TEXELS`]..=[`MAX_LIGHTMAP_TEXELS`].
pub fn bake_resolution(
    brush: &Brush,
    face_index: usize,
    texels_per_unit: f64,
) -> KernelResult<(u32, u32)> {
    let face = brush
        .faces()
        .get(face_index)
        .ok_or(KernelError::FaceOutOfRange {
            index: face_index,
            count: brush.face_count(),
        })?;

    let matrix = brush.model_matrix();
    let world: Vec<DVec3> = face
        .indices()
        .iter()
        .map(|&i| matrix.transform_point3(brush.vertices()[i as usize].position))
        .collect();
    let normal: DVec3 = world
        .windows(2)
        .skip(1)
        .map(|pair| (pair[0] - world[0]).cross(pair[1] - world[0]))
        .sum();
    let axis = DominantAxis::of(normal);

    let mut projected = world.iter().map(|&p| axis.project(p));
    let Some(first) = projected.next() else {
        return Ok((MIN_LIGHTMAP_TEXELS, MIN_LIGHTMAP_TEXELS));
    };
    let (min, max) = projected.fold((first, first), |(min, max), uv| (min.min(uv), max.max(uv)));

    let density = texels_per_unit * f64::from(face.lightmap_scale);
    let texels = |extent: f32| {
        let wanted = (f64::from(extent) * density).ceil();
        if wanted.is_nan() {
            MIN_LIGHTMAP_TEXELS
        } else {
            wanted.clamp(f64::from(MIN_LIGHTMAP_TEXELS), f64::from(MAX_LIGHTMAP_TEXELS)) as u32
        }
    };
    let extent = max - min;
    Ok((texels(extent.x), texels(extent.y)))
}
