//! # Lightmap Atlas
//!
//! Packs externally baked per-face lightmaps into one color atlas and one
//! direction atlas on a uniform grid, and records each face's sub-rectangle
//! for the render synthesizer.
//!
//! The grid has `ceil(sqrt(n))` columns for `n` usable faces. Every cell is
//! as large as the largest image, images sit in the top-left of their cell,
//! and the stored rectangle is inset by the padding on every side so
//! bilinear sampling does not bleed into a neighbour.

pub mod bake;


pub use bake::{bake_resolution, BakedFaceImages, LightmapImage};

use crate::brush::Brush;
use crate::error::{with_capacity, KernelError, KernelResult};
use crate::material::LightmapRect;
use config::constants::KernelConfig;
use glam::Vec2;
use image::{imageops, RgbaImage};

/// Packed lightmap textures.
#[derive(Debug, Clone, PartialEq)]
pub struct LightmapAtlas {
    /// Packed color lightmaps.
    pub color: RgbaImage,
    /// Packed direction lightmaps, same layout as `color`.
    pub direction: RgbaImage,
    pub columns: u32,
    pub rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    /// Indices of the faces that received a cell, in cell order.
    pub packed_faces: Vec<usize>,
}

/// One face accepted for packing.
struct Entry {
    face_index: usize,
    color: RgbaImage,
    direction: RgbaImage,
}

/// Packs `face_images` (one slot per face) with the default padding.
///
/// Returns `Ok(None)` when no face has usable images; every face's
/// rectangle is then zero.
pub fn pack_atlas(
    brush: &mut Brush,
    face_images: &[Option<BakedFaceImages>],
) -> KernelResult<Option<LightmapAtlas>> {
    pack_atlas_with(brush, face_images, &KernelConfig::default())
}

/// Packs `face_images` using the padding in `config`.
///
/// A face is skipped, and its rectangle reset to zero, when its slot is
/// empty, either image buffer does not match its dimensions, or the two
/// images differ in size.
pub fn pack_atlas_with(
    brush: &mut Brush,
    face_images: &[Option<BakedFaceImages>],
    config: &KernelConfig,
) -> KernelResult<Option<LightmapAtlas>> {
    if face_images.len() != brush.face_count() {
        return Err(KernelError::LightmapImageCount {
            expected: brush.face_count(),
            actual: face_images.len(),
        });
    }

    let entries = collect_entries(face_images)?;
    if entries.is_empty() {
        log::debug!("no usable lightmaps for {} faces", brush.face_count());
        for face in brush.faces_mut() {
            face.lightmap = LightmapRect::default();
        }
        return Ok(None);
    }

    let count = entries.len();
    let columns = grid_columns(count);
    let rows = count.div_ceil(columns);
    let cell_width = entries.iter().map(|e| e.color.width()).max().unwrap_or(0);
    let cell_height = entries.iter().map(|e| e.color.height()).max().unwrap_or(0);

    let width = columns as u64 * u64::from(cell_width);
    let height = rows as u64 * u64::from(cell_height);
    let (Ok(atlas_width), Ok(atlas_height)) = (u32::try_from(width), u32::try_from(height)) else {
        return Err(KernelError::AtlasTooLarge { width, height });
    };

    let mut color = blank_image(atlas_width, atlas_height)?;
    let mut direction = blank_image(atlas_width, atlas_height)?;
    let mut rects = with_capacity(count, "packing lightmaps")?;
    let atlas_size = Vec2::new(atlas_width as f32, atlas_height as f32);
    let pad = config.lightmap_padding as f32;

    for (slot, entry) in entries.iter().enumerate() {
        let x = (slot % columns) as u32 * cell_width;
        let y = (slot / columns) as u32 * cell_height;
        imageops::replace(&mut color, &entry.color, i64::from(x), i64::from(y));
        imageops::replace(&mut direction, &entry.direction, i64::from(x), i64::from(y));

        let image_size = Vec2::new(entry.color.width() as f32, entry.color.height() as f32);
        let rect = LightmapRect {
            origin: (Vec2::new(x as f32, y as f32) + pad) / atlas_size,
            size: (image_size - 2.0 * pad).max(Vec2::ZERO) / atlas_size,
        };
        log::trace!("face {} packed at ({x}, {y})", entry.face_index);
        rects.push((entry.face_index, rect));
    }

    for face in brush.faces_mut() {
        face.lightmap = LightmapRect::default();
    }
    for &(face_index, rect) in &rects {
        brush.faces_mut()[face_index].lightmap = rect;
    }

    log::debug!(
        "packed {count} lightmaps into {atlas_width}x{atlas_height} atlas ({columns}x{rows} cells of {cell_width}x{cell_height})"
    );
    Ok(Some(LightmapAtlas {
        color,
        direction,
        columns: columns as u32,
        rows: rows as u32,
        cell_width,
        cell_height,
        packed_faces: rects.iter().map(|&(face_index, _)| face_index).collect(),
    }))
}

fn collect_entries(face_images: &[Option<BakedFaceImages>]) -> KernelResult<Vec<Entry>> {
    let mut entries = with_capacity(face_images.len(), "packing lightmaps")?;
    for (face_index, slot) in face_images.iter().enumerate() {
        let Some(images) = slot else {
            log::warn!("face {face_index} has no baked lightmap, skipping");
            continue;
        };
        let (Some(color), Some(direction)) = (images.color.to_rgba()?, images.direction.to_rgba()?)
        else {
            log::warn!("face {face_index} lightmap buffer does not match its size, skipping");
            continue;
        };
        if color.dimensions() != direction.dimensions() {
            log::warn!(
                "face {face_index} color lightmap is {:?} but direction is {:?}, skipping",
                color.dimensions(),
                direction.dimensions()
            );
            continue;
        }
        entries.push(Entry {
            face_index,
            color,
            direction,
        });
    }
    Ok(entries)
}

/// A transparent black image whose buffer is reserved fallibly.
fn blank_image(width: u32, height: u32) -> KernelResult<RgbaImage> {
    let too_large = || KernelError::AtlasTooLarge {
        width: width.into(),
        height: height.into(),
    };
    let len = u64::from(width)
        .checked_mul(u64::from(height))
        .and_then(|texels| texels.checked_mul(4))
        .and_then(|len| usize::try_from(len).ok())
        .ok_or_else(too_large)?;

    let mut buffer = with_capacity(len, "allocating lightmap atlas")?;
    buffer.resize(len, 0);
    RgbaImage::from_raw(width, height, buffer).ok_or_else(too_large)
}

/// Smallest column count whose square holds `count` cells.
fn grid_columns(count: usize) -> usize {
    let mut columns = (count as f64).sqrt() as usize;
    while columns * columns < count {
        columns += 1;
    }
    columns.max(1)
}
