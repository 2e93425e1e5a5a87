//! Supplemental content blocks stacked beside a painting.
//!
//! Blocks form one column on the wall-local left of the painting, starting
//! at its top edge and running down. Each block takes its own height plus
//! `block_padding`.

use glam::{Vec2, Vec3};

use crate::config::BlockConfig;
use crate::content::SupplementalBlock;
use crate::layout::{LoadedPainting, Size2, Wall};

#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    Title(String),
    /// Word-wrapped lines
    Text(Vec<String>),
    Image { url: String },
    Link { label: String, url: String },
}

impl BlockContent {
    pub fn link(&self) -> Option<&str> {
        match self {
            BlockContent::Link { url, .. } => Some(url),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockLayout {
    /// Position in the painting's block list
    pub index: usize,
    pub content: BlockContent,
    pub center: Vec3,
    pub size: Size2,
}

/// Greedy word wrap at `width` characters. Words longer than a line are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let len = line.chars().count();
        if len > 0 && len + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.extend(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn text_height(text: &str, cfg: &BlockConfig) -> f32 {
    let chars = text.chars().count();
    chars.div_ceil(cfg.chars_per_line.max(1)) as f32 * cfg.line_height
}

/// Width the block column occupies to the wall-local left of the painting
/// (zero without blocks). Arrangement reserves it next to the composition.
pub fn column_reach(painting: &LoadedPainting, cfg: &BlockConfig) -> f32 {
    if painting.spec.supplemental_blocks.is_empty() {
        0.0
    } else {
        cfg.side_margin + cfg.block_width
    }
}

/// Lay out `painting`'s supplemental blocks around a painting centred at `anchor`.
pub fn layout_blocks(painting: &LoadedPainting, anchor: Vec3, wall: Wall, cfg: &BlockConfig) -> Vec<BlockLayout> {
    let main = painting.main_size;
    let right_edge = -main.width * 0.5 - cfg.side_margin;
    let mut cursor_y = main.height * 0.5;
    let mut out = Vec::with_capacity(painting.spec.supplemental_blocks.len());

    for (index, block) in painting.spec.supplemental_blocks.iter().enumerate() {
        let (content, size) = match block {
            SupplementalBlock::Title { text } => (
                BlockContent::Title(text.clone()),
                Size2::new(cfg.block_width, cfg.title_height),
            ),
            SupplementalBlock::Text { text } => (
                BlockContent::Text(wrap_text(text, cfg.chars_per_line)),
                Size2::new(cfg.block_width, text_height(text, cfg)),
            ),
            SupplementalBlock::Image { url } => {
                let aspect = painting
                    .block_images
                    .get(index)
                    .and_then(|img| img.as_ref())
                    .map(|img| img.aspect_ratio())
                    .unwrap_or(1.0);
                (
                    BlockContent::Image { url: url.clone() },
                    Size2::fit_within(aspect, cfg.block_width, cfg.image_max_height),
                )
            }
            SupplementalBlock::Link { label, url } => (
                BlockContent::Link {
                    label: label.clone(),
                    url: url.clone(),
                },
                Size2::new(cfg.block_width, cfg.link_height),
            ),
        };

        let local = Vec2::new(right_edge - size.width * 0.5, cursor_y - size.height * 0.5);
        out.push(BlockLayout {
            index,
            content,
            center: wall.offset(anchor, local, 0.0),
            size,
        });
        cursor_y -= size.height + cfg.block_padding;
    }
    out
}
