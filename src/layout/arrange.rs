//! Room arrangement strategies.
//!
//! - `AutoFit`: shuffle, split the paintings between the left and front
//!   walls, size the room around them and space them evenly.
//!
//! A painting with supplemental blocks also claims the block column to the
//! left of its composition, so neighbours and wall ends stay clear of it.
//! - `Scattered`: fixed room, random wall and position per painting with
//!   retry-bounded collision avoidance.
//!
//! Both produce the same `Arrangement`; the strategy is picked once at
//! initialization.

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use super::painting::{composition_size, LoadedPainting, Orientation};
use super::{PaintingId, Placement, RoomDimensions, Size2, Wall, WallRect};
use crate::config::GalleryConfig;
use crate::render::blocks::column_reach;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutStrategy {
    #[default]
    AutoFit,
    Scattered,
}

/// Conditions worth surfacing about a finished layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutReport {
    /// Paintings that could not be placed without overlapping a neighbour
    pub degraded: Vec<PaintingId>,
}

impl LayoutReport {
    pub fn is_clean(&self) -> bool {
        self.degraded.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Arrangement {
    pub dimensions: RoomDimensions,
    /// One placement per painting, ordered by painting id
    pub placements: Vec<Placement>,
    pub report: LayoutReport,
}

impl LayoutStrategy {
    pub fn arrange<R: Rng + ?Sized>(
        self,
        paintings: &[LoadedPainting],
        cfg: &GalleryConfig,
        rng: &mut R,
    ) -> Arrangement {
        match self {
            LayoutStrategy::AutoFit => arrange_room(paintings, cfg, rng),
            LayoutStrategy::Scattered => scatter_paintings(paintings, cfg, rng),
        }
    }
}

/// Main painting centre (wall-local) inside a composition box.
///
/// Portrait strips extend to the right, landscape strips extend downward,
/// so the painting hugs the composition's left or top edge respectively.
fn painting_center(rect: &WallRect, main: Size2, orientation: Orientation) -> Vec2 {
    match orientation {
        Orientation::Portrait => Vec2::new(rect.min.x + main.width * 0.5, (rect.min.y + rect.max.y) * 0.5),
        Orientation::Landscape => Vec2::new((rect.min.x + rect.max.x) * 0.5, rect.max.y - main.height * 0.5),
    }
}

/// Composition rect widened to the left by the block column.
fn with_reach(rect: &WallRect, reach: f32) -> WallRect {
    WallRect {
        min: Vec2::new(rect.min.x - reach, rect.min.y),
        max: rect.max,
    }
}

fn placement(
    painting: &LoadedPainting,
    wall: Wall,
    rect: &WallRect,
    composition: Size2,
    room: &RoomDimensions,
    clearance: f32,
) -> Placement {
    let local = painting_center(rect, painting.main_size, painting.orientation);
    Placement {
        painting: painting.id,
        wall,
        position: wall.point(room, local.x, local.y, clearance),
        rotation_y: wall.rotation_y(),
        composition_size: composition,
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Auto-fit
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Size the room around the paintings and hang them edge to edge.
pub fn arrange_room<R: Rng + ?Sized>(
    paintings: &[LoadedPainting],
    cfg: &GalleryConfig,
    rng: &mut R,
) -> Arrangement {
    let room_cfg = &cfg.room;
    let compositions: Vec<Size2> = paintings
        .iter()
        .map(|p| composition_size(p, &cfg.thumbnails))
        .collect();

    let mut order: Vec<usize> = (0..paintings.len()).collect();
    order.shuffle(rng);
    let (left, front) = order.split_at(paintings.len().div_ceil(2));

    let reach: Vec<f32> = paintings.iter().map(|p| column_reach(p, &cfg.blocks)).collect();

    let total_width = |idx: &[usize]| {
        idx.iter()
            .map(|&i| compositions[i].width + reach[i])
            .sum::<f32>()
    };
    let left_total = total_width(left);
    let front_total = total_width(front);
    let tallest = compositions.iter().fold(0.0f32, |m, c| m.max(c.height));

    let depth = (left_total + room_cfg.wall_padding).max(room_cfg.minimum.depth);
    let width = (front_total + room_cfg.wall_padding)
        .max(room_cfg.minimum.width)
        .max(depth * 0.8);
    let height = (tallest + room_cfg.height_padding).max(room_cfg.minimum.height);
    let dimensions = RoomDimensions {
        width,
        height,
        depth,
    };
    log::info!(
        "Auto-fit room {:.2}x{:.2}x{:.2} (left: {}, front: {})",
        width,
        height,
        depth,
        left.len(),
        front.len()
    );

    let mut placements = Vec::with_capacity(paintings.len());
    for (wall, idx, total) in [(Wall::Left, left, left_total), (Wall::Front, front, front_total)] {
        let spacing = (wall.length(&dimensions) - total) / (idx.len() + 1) as f32;
        let mut cursor = spacing;
        for &i in idx {
            let comp = compositions[i];
            cursor += reach[i];
            let center = Vec2::new(cursor + comp.width * 0.5, height * 0.5);
            let rect = WallRect::from_center(center, comp);
            placements.push(placement(
                &paintings[i],
                wall,
                &rect,
                comp,
                &dimensions,
                cfg.layout.wall_clearance,
            ));
            cursor += comp.width + spacing;
        }
    }
    placements.sort_by_key(|p| p.painting);

    Arrangement {
        dimensions,
        placements,
        report: LayoutReport::default(),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Scattered
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Random placement in the fixed room.
///
/// Each painting gets `scatter_wall_attempts` random wall choices with
/// `scatter_position_attempts` random positions each. When every candidate
/// collides, the last one is kept and the painting is listed in
/// `LayoutReport::degraded`.
pub fn scatter_paintings<R: Rng + ?Sized>(
    paintings: &[LoadedPainting],
    cfg: &GalleryConfig,
    rng: &mut R,
) -> Arrangement {
    let room_cfg = &cfg.room;
    let dimensions = room_cfg.fixed;
    let mut taken: Vec<(Wall, WallRect)> = Vec::new();
    let mut placements = Vec::with_capacity(paintings.len());
    let mut report = LayoutReport::default();

    for painting in paintings {
        let comp = composition_size(painting, &cfg.thumbnails);
        let reach = column_reach(painting, &cfg.blocks);
        let y = (dimensions.height * 0.5)
            .max(comp.height * 0.5)
            .min((dimensions.height - comp.height * 0.5).max(comp.height * 0.5));

        let mut chosen: Option<(Wall, WallRect)> = None;
        let mut last: Option<(Wall, WallRect)> = None;

        'walls: for _ in 0..room_cfg.scatter_wall_attempts {
            let wall = Wall::ALL[rng.random_range(0..Wall::ALL.len())];
            let len = wall.length(&dimensions);
            if comp.width + reach > len {
                continue;
            }
            for _ in 0..room_cfg.scatter_position_attempts {
                let u = rng.random_range(reach + comp.width * 0.5..=len - comp.width * 0.5);
                let rect = WallRect::from_center(Vec2::new(u, y), comp);
                let footprint = with_reach(&rect, reach);
                let collides = taken
                    .iter()
                    .any(|(w, r)| *w == wall && r.overlaps(&footprint, room_cfg.collision_margin));
                if !collides {
                    chosen = Some((wall, rect));
                    break 'walls;
                }
                last = Some((wall, rect));
            }
        }

        let (wall, rect) = match chosen {
            Some(found) => found,
            None => {
                report.degraded.push(painting.id);
                let fallback = last.unwrap_or_else(|| {
                    let u = Wall::Front.length(&dimensions) * 0.5;
                    (Wall::Front, WallRect::from_center(Vec2::new(u, y), comp))
                });
                log::warn!(
                    "Painting {} overlaps a neighbour on the {} wall: no free spot after {} attempts",
                    painting.id,
                    fallback.0,
                    room_cfg.scatter_wall_attempts * room_cfg.scatter_position_attempts
                );
                fallback
            }
        };

        taken.push((wall, with_reach(&rect, reach)));
        placements.push(placement(
            painting,
            wall,
            &rect,
            comp,
            &dimensions,
            cfg.layout.wall_clearance,
        ));
    }
    placements.sort_by_key(|p| p.painting);

    Arrangement {
        dimensions,
        placements,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::content::{PaintingSpec, SupplementalBlock};
    use crate::render::blocks::layout_blocks;
    use crate::net::image::LoadedImage;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gallery(sizes: &[(u32, u32, usize)]) -> Vec<LoadedPainting> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &(w, h, thumbs))| {
                LoadedPainting::from_images(
                    PaintingId(i),
                    PaintingSpec::new(format!("p{}", i)),
                    LoadedImage::sized(format!("p{}", i), w, h),
                    (0..thumbs)
                        .map(|t| LoadedImage::sized(format!("p{}t{}", i, t), 100, 100))
                        .collect(),
                    Vec::new(),
                    &LayoutConfig::default(),
                )
            })
            .collect()
    }

    fn with_title(mut paintings: Vec<LoadedPainting>) -> Vec<LoadedPainting> {
        for p in &mut paintings {
            p.spec.supplemental_blocks = vec![SupplementalBlock::Title { text: "Study".into() }];
        }
        paintings
    }

    fn rect_of(p: &Placement, painting: &LoadedPainting, room: &RoomDimensions) -> WallRect {
        let local = p.wall.local_coords(room, p.composition_center(painting.main_size, painting.orientation));
        WallRect::from_center(local, p.composition_size)
    }

    #[test]
    fn auto_fit_splits_between_left_and_front() {
        let paintings = gallery(&[(400, 300, 3), (300, 400, 0), (300, 300, 0), (500, 300, 0), (300, 500, 2)]);
        let cfg = GalleryConfig::default();
        let arr = arrange_room(&paintings, &cfg, &mut StdRng::seed_from_u64(7));
        let left = arr.placements.iter().filter(|p| p.wall == Wall::Left).count();
        let front = arr.placements.iter().filter(|p| p.wall == Wall::Front).count();
        assert_eq!((left, front), (3, 2));
        assert!(arr.report.is_clean());
        assert_eq!(
            arr.placements.iter().map(|p| p.painting).collect::<Vec<_>>(),
            (0..5).map(PaintingId).collect::<Vec<_>>()
        );
    }

    #[test]
    fn auto_fit_room_respects_floor_and_aspect() {
        let cfg = GalleryConfig::default();
        let small = arrange_room(&gallery(&[(300, 300, 0)]), &cfg, &mut StdRng::seed_from_u64(1));
        assert!(small.dimensions.width >= cfg.room.minimum.width);
        assert!(small.dimensions.depth >= cfg.room.minimum.depth);
        assert!(small.dimensions.height >= cfg.room.minimum.height);

        let many: Vec<_> = (0..16).map(|_| (300, 400, 0)).collect();
        let big = arrange_room(&gallery(&many), &cfg, &mut StdRng::seed_from_u64(2));
        let d = big.dimensions;
        assert!(d.width >= 0.8 * d.depth - 1e-4);
        // 8 portrait paintings of 1.5m per wall + padding
        assert!((d.depth - (8.0 * 1.5 + cfg.room.wall_padding)).abs() < 1e-3);
    }

    #[test]
    fn auto_fit_spaces_evenly_without_overlap() {
        let paintings = gallery(&[(400, 300, 0), (300, 400, 4), (300, 300, 0), (500, 300, 6), (300, 500, 1), (200, 300, 0)]);
        let cfg = GalleryConfig::default();
        let arr = arrange_room(&paintings, &cfg, &mut StdRng::seed_from_u64(11));
        let room = arr.dimensions;
        for wall in [Wall::Left, Wall::Front] {
            let mut rects: Vec<WallRect> = arr
                .placements
                .iter()
                .filter(|p| p.wall == wall)
                .map(|p| rect_of(p, &paintings[p.painting.0], &room))
                .collect();
            rects.sort_by(|a, b| a.min.x.total_cmp(&b.min.x));
            let mut edges = vec![0.0];
            for r in &rects {
                edges.push(r.min.x);
                edges.push(r.max.x);
            }
            edges.push(wall.length(&room));
            let gaps: Vec<f32> = edges.chunks(2).map(|c| c[1] - c[0]).collect();
            for g in &gaps {
                assert!((g - gaps[0]).abs() < 1e-3, "{}: {:?}", wall, gaps);
                assert!(*g >= 0.0);
            }
            for r in &rects {
                assert!(r.min.y >= 0.0 && r.max.y <= room.height);
            }
        }
    }

    #[test]
    fn auto_fit_keeps_block_columns_clear_of_neighbours() {
        let many: Vec<_> = (0..16).map(|i| if i % 2 == 0 { (400, 300, 2) } else { (300, 400, 0) }).collect();
        let paintings = with_title(gallery(&many));
        let cfg = GalleryConfig::default();
        let arr = arrange_room(&paintings, &cfg, &mut StdRng::seed_from_u64(21));
        let room = arr.dimensions;
        let reach = cfg.blocks.side_margin + cfg.blocks.block_width;

        for wall in [Wall::Left, Wall::Front] {
            let mut spans: Vec<(f32, f32)> = Vec::new();
            for p in arr.placements.iter().filter(|p| p.wall == wall) {
                let painting = &paintings[p.painting.0];
                let rect = rect_of(p, painting, &room);
                let mut lo = rect.min.x;
                for block in layout_blocks(painting, p.position, wall, &cfg.blocks) {
                    let u = wall.local_coords(&room, block.center).x;
                    lo = lo.min(u - block.size.width * 0.5);
                }
                assert!((rect.min.x - reach - lo).abs() < 1e-3, "{}: {} vs {}", wall, lo, rect.min.x);
                spans.push((lo, rect.max.x));
            }
            spans.sort_by(|a, b| a.0.total_cmp(&b.0));
            assert!(spans[0].0 >= -1e-3, "{}: {:?}", wall, spans[0]);
            assert!(spans[spans.len() - 1].1 <= wall.length(&room) + 1e-3);
            for pair in spans.windows(2) {
                assert!(pair[0].1 <= pair[1].0 + 1e-3, "{}: {:?}", wall, pair);
            }
        }
    }

    #[test]
    fn scattered_footprints_include_block_columns() {
        let paintings = with_title(gallery(&[(400, 300, 0), (300, 400, 0), (300, 300, 0), (500, 300, 0)]));
        let cfg = GalleryConfig::default();
        let arr = scatter_paintings(&paintings, &cfg, &mut StdRng::seed_from_u64(13));
        assert!(arr.report.is_clean());
        let room = arr.dimensions;
        let reach = cfg.blocks.side_margin + cfg.blocks.block_width;
        let footprints: Vec<(Wall, WallRect)> = arr
            .placements
            .iter()
            .map(|p| (p.wall, with_reach(&rect_of(p, &paintings[p.painting.0], &room), reach)))
            .collect();
        for (i, (wa, a)) in footprints.iter().enumerate() {
            assert!(a.min.x >= -1e-3);
            for (wb, b) in &footprints[i + 1..] {
                if wa == wb {
                    assert!(!a.overlaps(b, cfg.room.collision_margin - 1e-3));
                }
            }
        }
    }

    #[test]
    fn paintings_hang_just_off_their_wall() {
        let paintings = gallery(&[(400, 300, 0), (300, 400, 0)]);
        let cfg = GalleryConfig::default();
        let arr = arrange_room(&paintings, &cfg, &mut StdRng::seed_from_u64(3));
        let room = arr.dimensions;
        for p in &arr.placements {
            let off = match p.wall {
                Wall::Left => p.position.x + room.width * 0.5,
                Wall::Right => room.width * 0.5 - p.position.x,
                Wall::Front => p.position.z + room.depth * 0.5,
            };
            assert!((off - cfg.layout.wall_clearance).abs() < 1e-5);
            assert_eq!(p.rotation_y, p.wall.rotation_y());
        }
    }

    #[test]
    fn scattered_places_without_overlap_when_room_allows() {
        let paintings = gallery(&[(400, 300, 0), (300, 400, 2), (300, 300, 0), (500, 300, 3), (300, 500, 0)]);
        let cfg = GalleryConfig::default();
        let arr = scatter_paintings(&paintings, &cfg, &mut StdRng::seed_from_u64(5));
        assert!(arr.report.is_clean());
        assert_eq!(arr.dimensions, cfg.room.fixed);
        let room = arr.dimensions;
        let rects: Vec<(Wall, WallRect)> = arr
            .placements
            .iter()
            .map(|p| (p.wall, rect_of(p, &paintings[p.painting.0], &room)))
            .collect();
        for (i, (wa, a)) in rects.iter().enumerate() {
            assert!(a.min.x >= -1e-4 && a.max.x <= wa.length(&room) + 1e-4);
            for (wb, b) in &rects[i + 1..] {
                if wa == wb {
                    assert!(!a.overlaps(b, cfg.room.collision_margin - 1e-3));
                }
            }
        }
    }

    #[test]
    fn scattered_reports_degraded_layout() {
        let many: Vec<_> = (0..40).map(|_| (400, 300, 0)).collect();
        let paintings = gallery(&many);
        let cfg = GalleryConfig::default();
        let arr = scatter_paintings(&paintings, &cfg, &mut StdRng::seed_from_u64(9));
        assert_eq!(arr.placements.len(), 40);
        assert!(!arr.report.is_clean());
        assert!(arr.report.degraded.len() >= 40 - 3 * 8);
    }

    #[test]
    fn strategy_dispatch() {
        let paintings = gallery(&[(400, 300, 0)]);
        let cfg = GalleryConfig::default();
        let scattered = LayoutStrategy::Scattered.arrange(&paintings, &cfg, &mut StdRng::seed_from_u64(1));
        assert_eq!(scattered.dimensions, cfg.room.fixed);
        let fit = LayoutStrategy::AutoFit.arrange(&paintings, &cfg, &mut StdRng::seed_from_u64(1));
        assert_eq!(fit.placements[0].wall, Wall::Left);
    }
}
