//! Painting loading and sizing.
//!
//! A painting becomes a `LoadedPainting` only when its main image, every
//! thumbnail and every supplemental image block have loaded. Any failure
//! fails the whole painting; no partial state escapes.

use rayon::prelude::*;

use super::{PaintingId, Size2};
use crate::config::{LayoutConfig, ThumbnailConfig};
use crate::content::{PaintingSpec, SupplementalBlock};
use crate::error::Result;
use crate::net::image::{ImageSource, LoadedImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Landscape iff wider than tall; squares count as portrait.
    pub fn classify(aspect_ratio: f32) -> Self {
        if aspect_ratio > 1.0 {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedThumbnail {
    pub image: LoadedImage,
    /// Pixel size as decoded
    pub natural_size: Size2,
}

impl LoadedThumbnail {
    pub fn aspect_ratio(&self) -> f32 {
        self.image.aspect_ratio()
    }
}

#[derive(Debug, Clone)]
pub struct LoadedPainting {
    pub id: PaintingId,
    pub spec: PaintingSpec,
    pub main_image: LoadedImage,
    /// World size of the main painting (long edge = base size)
    pub main_size: Size2,
    pub thumbnails: Vec<LoadedThumbnail>,
    pub orientation: Orientation,
    /// Images of `Image` supplemental blocks, aligned with `spec.supplemental_blocks`
    pub block_images: Vec<Option<LoadedImage>>,
}

impl LoadedPainting {
    pub fn has_thumbnails(&self) -> bool {
        !self.thumbnails.is_empty()
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.main_image.aspect_ratio()
    }

    /// Main image URL followed by every thumbnail URL, in viewer order.
    pub fn image_urls(&self) -> (String, Vec<String>) {
        (
            self.main_image.url.clone(),
            self.thumbnails.iter().map(|t| t.image.url.clone()).collect(),
        )
    }

    /// Build from already-loaded images.
    pub fn from_images(
        id: PaintingId,
        spec: PaintingSpec,
        main_image: LoadedImage,
        thumbnails: Vec<LoadedImage>,
        block_images: Vec<Option<LoadedImage>>,
        cfg: &LayoutConfig,
    ) -> Self {
        let aspect = main_image.aspect_ratio();
        let thumbnails = thumbnails
            .into_iter()
            .map(|image| LoadedThumbnail {
                natural_size: Size2::new(image.width as f32, image.height as f32),
                image,
            })
            .collect();
        Self {
            id,
            spec,
            main_size: Size2::from_long_edge(aspect, cfg.base_size),
            orientation: Orientation::classify(aspect),
            main_image,
            thumbnails,
            block_images,
        }
    }
}

/// Load every image a painting needs, concurrently, all-or-nothing.
pub fn load_painting(
    spec: &PaintingSpec,
    id: PaintingId,
    source: &dyn ImageSource,
    cfg: &LayoutConfig,
) -> Result<LoadedPainting> {
    let (main, (thumbs, blocks)) = rayon::join(
        || source.load(&spec.image_url),
        || {
            rayon::join(
                || {
                    spec.thumbnail_urls
                        .par_iter()
                        .map(|url| source.load(url))
                        .collect::<Result<Vec<_>>>()
                },
                || {
                    spec.supplemental_blocks
                        .par_iter()
                        .map(|block| match block {
                            SupplementalBlock::Image { url } => source.load(url).map(Some),
                            _ => Ok(None),
                        })
                        .collect::<Result<Vec<_>>>()
                },
            )
        },
    );

    let painting =
        LoadedPainting::from_images(id, spec.clone(), main?, thumbs?, blocks?, cfg);
    log::debug!(
        "Painting {} loaded: {:?} {:.2}x{:.2}, {} thumbnails",
        id,
        painting.orientation,
        painting.main_size.width,
        painting.main_size.height,
        painting.thumbnails.len()
    );
    Ok(painting)
}

/// Estimated bounding size of a painting plus its thumbnail strip.
///
/// Portrait strips add columns to the width, landscape strips add rows to
/// the height. Used for spacing, collision and camera framing before (and
/// independently of) the real thumbnail layout.
pub fn composition_size(painting: &LoadedPainting, cfg: &ThumbnailConfig) -> Size2 {
    let main = painting.main_size;
    let n = painting.thumbnails.len();
    if n == 0 {
        return main;
    }

    let cell = cfg.estimate_size + cfg.padding;
    match painting.orientation {
        Orientation::Portrait => {
            let columns = n.div_ceil(cfg.estimate_per_column.max(1));
            Size2::new(main.width + columns as f32 * cell, main.height)
        }
        Orientation::Landscape => {
            let per_row = ((main.width * 0.8 / cell).floor() as usize).max(1);
            let rows = n.div_ceil(per_row);
            Size2::new(main.width, main.height + rows as f32 * cell)
        }
    }
}
