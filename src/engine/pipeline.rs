use std::collections::HashMap;
use std::sync::Arc;

use image::RgbaImage;
use rand::Rng;
use rayon::prelude::*;

use crate::camera::{Choreographer, Viewport};
use crate::config::GalleryConfig;
use crate::content::PaintingSpec;
use crate::error::{GalleryError, Result};
use crate::gallery::Gallery;
use crate::layout::thumbnails::position_thumbnails;
use crate::layout::{load_painting, LayoutStrategy, LoadedPainting, PaintingId, Placement};
use crate::net::image::{ImageSource, LoadedImage};
use crate::render::blocks::{layout_blocks, BlockContent};
use crate::render::room::compose_room;
use crate::render::scene::{Material, Node, NodeKind, Scene};

/// Pipeline phase names carried by `GalleryError::Pipeline`.
pub mod phase {
    pub const LOAD: &str = "load";
    pub const ARRANGE: &str = "arrange";
    pub const ROOM: &str = "room";
    pub const POSITION: &str = "position";
    pub const CAMERA: &str = "camera";
}

/// The gallery pipeline: Load → Arrange → Room → Position → Camera.
///
/// Each phase completes before the next starts. The first failure aborts the
/// whole build; nothing is retried.
pub struct GalleryEngine {
    source: Arc<dyn ImageSource>,
    config: GalleryConfig,
}

impl GalleryEngine {
    pub fn new(source: Arc<dyn ImageSource>, config: GalleryConfig) -> Self {
        Self { source, config }
    }

    /// Override the arrangement strategy from the config.
    pub fn with_strategy(mut self, strategy: LayoutStrategy) -> Self {
        self.config.room.strategy = strategy;
        self
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Run the full pipeline.
    pub fn build<R: Rng + ?Sized>(
        &self,
        specs: &[PaintingSpec],
        viewport: Viewport,
        rng: &mut R,
    ) -> Result<Gallery> {
        let cfg = &self.config;

        // Phase 1: Load every painting (all-or-nothing per painting and overall)
        let paintings = load_all(specs, self.source.as_ref(), cfg).map_err(|e| e.in_phase(phase::LOAD))?;
        log::info!("[{}] {} paintings loaded", phase::LOAD, paintings.len());

        // Phase 2: Arrange on the walls
        let arrangement = cfg.room.strategy.arrange(&paintings, cfg, rng);
        if arrangement.placements.len() != paintings.len() {
            return Err(GalleryError::Room(format!(
                "{} placements for {} paintings",
                arrangement.placements.len(),
                paintings.len()
            ))
            .in_phase(phase::ARRANGE));
        }
        log::info!(
            "[{}] {:?}: {} degraded placements",
            phase::ARRANGE,
            cfg.room.strategy,
            arrangement.report.degraded.len()
        );

        // Phase 3: Room shell
        let dims = arrangement.dimensions;
        if !(dims.width > 0.0 && dims.height > 0.0 && dims.depth > 0.0) {
            return Err(GalleryError::Room(format!("{:?}", dims)).in_phase(phase::ROOM));
        }
        let mut scene = Scene::new();
        let shell = compose_room(&dims, &cfg.room, &mut scene);

        // Phase 4: Paintings, thumbnails, content blocks
        for placement in &arrangement.placements {
            position_painting(&paintings[placement.painting.0], placement, cfg, &mut scene);
        }
        log::info!("[{}] scene has {} nodes", phase::POSITION, scene.len());

        // Phase 5: Camera defaults
        let camera = Choreographer::new(dims, viewport, cfg.camera.clone());
        if !camera.current_pose().is_finite() {
            return Err(GalleryError::Room("non-finite overview pose".into()).in_phase(phase::CAMERA));
        }

        let mut textures = collect_textures(&paintings);
        let surfaces = [&cfg.room.wall_texture, &cfg.room.floor_texture, &cfg.room.ceiling_texture];
        for url in surfaces.into_iter().flatten() {
            if textures.contains_key(url) {
                continue;
            }
            match self.source.load(url) {
                Ok(LoadedImage {
                    pixels: Some(px), ..
                }) => {
                    textures.insert(url.clone(), px);
                }
                Ok(_) => {}
                // Surfaces fall back to their flat tint
                Err(e) => log::warn!("[{}] room texture unavailable: {}", phase::ROOM, e),
            }
        }
        Ok(Gallery {
            paintings,
            placements: arrangement.placements,
            dimensions: dims,
            report: arrangement.report,
            scene,
            shell,
            camera,
            textures,
        })
    }
}

/// Load every painting concurrently. Ids are input positions.
pub fn load_all(
    specs: &[PaintingSpec],
    source: &dyn ImageSource,
    cfg: &GalleryConfig,
) -> Result<Vec<LoadedPainting>> {
    specs
        .par_iter()
        .enumerate()
        .map(|(i, spec)| load_painting(spec, PaintingId(i), source, &cfg.layout))
        .collect()
}

/// Add a painting's main quad, thumbnails and content blocks to the scene.
pub fn position_painting(painting: &LoadedPainting, placement: &Placement, cfg: &GalleryConfig, scene: &mut Scene) {
    let wall = placement.wall;
    let rotation = wall.rotation();

    scene.add(Node::quad(
        NodeKind::Painting(painting.id),
        placement.position,
        rotation,
        painting.main_size,
        Material::Image(painting.main_image.url.clone()),
    ));

    for thumb in position_thumbnails(painting, placement.position, wall, &cfg.thumbnails) {
        let url = painting.thumbnails[thumb.index - 1].image.url.clone();
        scene.add(Node::quad(
            NodeKind::Thumbnail {
                painting: painting.id,
                index: thumb.index,
            },
            thumb.center,
            rotation,
            thumb.size,
            Material::Image(url),
        ));
    }

    for block in layout_blocks(painting, placement.position, wall, &cfg.blocks) {
        let link = block.content.link().map(str::to_string);
        let material = match block.content {
            BlockContent::Title(text) => Material::Text {
                lines: vec![text],
                heading: true,
            },
            BlockContent::Text(lines) => Material::Text { lines, heading: false },
            BlockContent::Image { url } => Material::Image(url),
            BlockContent::Link { label, .. } => Material::Link { label },
        };
        scene.add(Node::quad(
            NodeKind::Block {
                painting: painting.id,
                link,
            },
            block.center,
            rotation,
            block.size,
            material,
        ));
    }
}

fn collect_textures(paintings: &[LoadedPainting]) -> HashMap<String, Arc<RgbaImage>> {
    let mut textures = HashMap::new();
    let mut keep = |img: &LoadedImage| {
        if let Some(px) = &img.pixels {
            textures.entry(img.url.clone()).or_insert_with(|| Arc::clone(px));
        }
    };
    for p in paintings {
        keep(&p.main_image);
        p.thumbnails.iter().for_each(|t| keep(&t.image));
        p.block_images.iter().flatten().for_each(|img| keep(img));
    }
    textures
}
