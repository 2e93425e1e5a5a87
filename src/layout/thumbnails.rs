//! Thumbnail strip layout.
//!
//! Portrait paintings get columns to their right; landscape paintings get
//! rows underneath. Layout is computed in the painting's wall-local frame
//! (origin at the painting centre) and then lifted to world space.

use glam::{Vec2, Vec3};

use super::painting::{LoadedPainting, Orientation};
use super::{Size2, Wall};
use crate::config::ThumbnailConfig;

/// A thumbnail rectangle relative to the painting centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalRect {
    pub center: Vec2,
    pub size: Size2,
}

impl LocalRect {
    pub fn top(&self) -> f32 {
        self.center.y + self.size.height * 0.5
    }

    pub fn bottom(&self) -> f32 {
        self.center.y - self.size.height * 0.5
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.size.width * 0.5
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.size.width * 0.5
    }
}

/// A positioned thumbnail in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbnailPlacement {
    /// 1-based; index 0 is reserved for the main painting
    pub index: usize,
    pub center: Vec3,
    pub size: Size2,
    pub rotation_y: f32,
}

/// Lay out a painting's thumbnails around `anchor` (the painting centre).
pub fn position_thumbnails(
    painting: &LoadedPainting,
    anchor: Vec3,
    wall: Wall,
    cfg: &ThumbnailConfig,
) -> Vec<ThumbnailPlacement> {
    let aspects: Vec<f32> = painting.thumbnails.iter().map(|t| t.aspect_ratio()).collect();
    let groups = match painting.orientation {
        Orientation::Portrait => column_layout(&aspects, painting.main_size, cfg),
        Orientation::Landscape => row_layout(&aspects, painting.main_size, cfg),
    };

    groups
        .into_iter()
        .flatten()
        .enumerate()
        .map(|(i, rect)| ThumbnailPlacement {
            index: i + 1,
            center: wall.offset(anchor, rect.center, 0.0),
            size: rect.size,
            rotation_y: wall.rotation_y(),
        })
        .collect()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Columns (portrait)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Uniform scale for a column so its tallest image lands in
/// `[min_size, max_size]` without any image growing wider than `max_size`.
fn column_scale(tallest: f32, widest: f32, cfg: &ThumbnailConfig) -> f32 {
    let fit_tall = tallest.clamp(cfg.min_size, cfg.max_size) / tallest;
    fit_tall.min(cfg.max_size / widest)
}

fn column_height(sizes: &[Size2], cfg: &ThumbnailConfig) -> (f32, f32) {
    let tallest = sizes.iter().fold(0.0f32, |m, s| m.max(s.height));
    let widest = sizes.iter().fold(0.0f32, |m, s| m.max(s.width));
    let scale = column_scale(tallest, widest, cfg);
    let sum: f32 = sizes.iter().map(|s| s.height).sum();
    let gaps = sizes.len().saturating_sub(1) as f32 * cfg.padding;
    (sum * scale + gaps, scale)
}

/// Pack thumbnails top-to-bottom into columns no taller than the painting.
///
/// A column closes as soon as the next image would push its (scaled) height
/// past the painting's height; a lone oversized image still gets a column.
pub fn column_layout(aspects: &[f32], painting: Size2, cfg: &ThumbnailConfig) -> Vec<Vec<LocalRect>> {
    let nominal: Vec<Size2> = aspects
        .iter()
        .map(|&a| Size2::fit_within(a, cfg.max_size, cfg.max_size))
        .collect();

    let mut columns: Vec<Vec<Size2>> = Vec::new();
    let mut current: Vec<Size2> = Vec::new();
    for size in nominal {
        current.push(size);
        let (height, _) = column_height(&current, cfg);
        if current.len() > 1 && height > painting.height {
            current.pop();
            columns.push(std::mem::take(&mut current));
            current.push(size);
        }
    }
    if !current.is_empty() {
        columns.push(current);
    }

    let top = painting.height * 0.5;
    let first_x = painting.width * 0.5 + cfg.padding + cfg.max_size * 0.5;
    let spacing = cfg.max_size + cfg.column_gap;

    columns
        .iter()
        .enumerate()
        .map(|(c, sizes)| {
            let (_, scale) = column_height(sizes, cfg);
            let x = first_x + c as f32 * spacing;
            let mut cursor = top;
            sizes
                .iter()
                .map(|s| {
                    let size = s.scaled(scale);
                    let rect = LocalRect {
                        center: Vec2::new(x, cursor - size.height * 0.5),
                        size,
                    };
                    cursor -= size.height + cfg.padding;
                    rect
                })
                .collect()
        })
        .collect()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Rows (landscape)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Split `n` images into rows of at most `max_per_row`, spread evenly so
/// no row drops below `min_per_row` when that is achievable.
pub fn row_sizes(n: usize, max_per_row: usize, min_per_row: usize) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    let mut rows = n.div_ceil(max_per_row.max(1));
    while rows > 1 && n / rows < min_per_row {
        rows -= 1;
    }
    let base = n / rows;
    let extra = n % rows;
    (0..rows).map(|r| base + usize::from(r < extra)).collect()
}

/// Rows that span exactly the painting's width, stacked under it.
///
/// Each row is scaled uniformly so `sum(widths) + (k-1) * padding` equals
/// the painting width. `row_sizes` already packs as many images per row as
/// allowed, which is what keeps row heights inside `[min_size, max_size]`;
/// a row that still falls outside (one or two wide-ish images, or many very
/// wide ones) keeps the exact span and is only reported.
pub fn row_layout(aspects: &[f32], painting: Size2, cfg: &ThumbnailConfig) -> Vec<Vec<LocalRect>> {
    let mut out = Vec::new();
    let mut cursor = -painting.height * 0.5 - cfg.padding;
    let mut start = 0;

    for k in row_sizes(aspects.len(), cfg.max_per_row, cfg.min_per_row) {
        let row = &aspects[start..start + k];
        start += k;

        let aspect_sum: f32 = row.iter().sum();
        let available = painting.width - (k - 1) as f32 * cfg.padding;
        let height = available / aspect_sum;
        if height < cfg.min_size || height > cfg.max_size {
            log::debug!(
                "Thumbnail row of {} at height {:.3} (outside {:.3}..{:.3})",
                k,
                height,
                cfg.min_size,
                cfg.max_size
            );
        }

        let y = cursor - height * 0.5;
        let mut x = -painting.width * 0.5;
        let rects = row
            .iter()
            .map(|&a| {
                let size = Size2::new(a * height, height);
                let rect = LocalRect {
                    center: Vec2::new(x + size.width * 0.5, y),
                    size,
                };
                x += size.width + cfg.padding;
                rect
            })
            .collect();
        out.push(rects);
        cursor -= height + cfg.padding;
    }
    out
}
