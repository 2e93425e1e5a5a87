//! Tunable constants for layout, room sizing and camera motion.
//!
//! Every struct deserializes with `#[serde(default)]`, so a manifest only
//! needs to name the values it overrides.

use serde::Deserialize;

use crate::camera::SpeedPair;
use crate::layout::arrange::LayoutStrategy;
use crate::layout::RoomDimensions;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub layout: LayoutConfig,
    pub thumbnails: ThumbnailConfig,
    pub blocks: BlockConfig,
    pub room: RoomConfig,
    pub camera: CameraConfig,
}

/// Main painting sizing (world units are meters).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Long edge of every main painting
    pub base_size: f32,
    /// Gap between a painting and its wall so the quads never z-fight
    pub wall_clearance: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            base_size: 2.0,
            wall_clearance: 0.02,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    /// Nominal thumbnail edge used by the composition estimate
    pub estimate_size: f32,
    /// Gap between thumbnails (and between the strip and the painting)
    pub padding: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Extra space between two thumbnail columns
    pub column_gap: f32,
    /// Thumbnails per column assumed by the composition estimate
    pub estimate_per_column: usize,
    pub max_per_row: usize,
    pub min_per_row: usize,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            estimate_size: 0.5,
            padding: 0.08,
            min_size: 0.25,
            max_size: 0.5,
            column_gap: 0.08,
            estimate_per_column: 3,
            max_per_row: 4,
            min_per_row: 2,
        }
    }
}

/// Supplemental content stack beside a painting.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BlockConfig {
    pub block_width: f32,
    pub side_margin: f32,
    pub title_height: f32,
    pub line_height: f32,
    pub chars_per_line: usize,
    pub image_max_height: f32,
    pub link_height: f32,
    pub block_padding: f32,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            block_width: 1.4,
            side_margin: 0.3,
            title_height: 0.28,
            line_height: 0.11,
            chars_per_line: 40,
            image_max_height: 0.9,
            link_height: 0.18,
            block_padding: 0.08,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub strategy: LayoutStrategy,
    /// Room used by the scattered strategy
    pub fixed: RoomDimensions,
    /// Smallest room the auto-fit strategy may produce
    pub minimum: RoomDimensions,
    /// Added to the summed composition widths of a wall
    pub wall_padding: f32,
    /// Added to the tallest composition
    pub height_padding: f32,
    /// Texture repeat period of walls, floor and ceiling
    pub texture_tile: f32,
    pub wall_texture: Option<String>,
    pub floor_texture: Option<String>,
    pub ceiling_texture: Option<String>,
    pub scatter_wall_attempts: usize,
    pub scatter_position_attempts: usize,
    /// Minimum free space kept around a composition when scattering
    pub collision_margin: f32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            strategy: LayoutStrategy::AutoFit,
            fixed: RoomDimensions {
                width: 16.0,
                height: 6.0,
                depth: 14.0,
            },
            minimum: RoomDimensions {
                width: 10.0,
                height: 5.0,
                depth: 8.0,
            },
            wall_padding: 3.0,
            height_padding: 2.0,
            texture_tile: 5.0,
            wall_texture: None,
            floor_texture: None,
            ceiling_texture: None,
            scatter_wall_attempts: 20,
            scatter_position_attempts: 50,
            collision_margin: 0.3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Multiplier on the painting's long edge when framing it
    pub framing_padding: f32,
    /// Vertical offset of the overview camera from the room's mid height
    pub default_height_offset: f32,
    pub focus_speeds: SpeedPair,
    pub reset_speeds: SpeedPair,
    pub resize_speeds: SpeedPair,
    /// How long the resize speeds stay active before reverting to reset speeds
    pub resize_hold_secs: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            near: 0.05,
            far: 200.0,
            framing_padding: 1.2,
            default_height_offset: 0.0,
            focus_speeds: SpeedPair {
                position: 0.05,
                rotation: 0.05,
            },
            reset_speeds: SpeedPair {
                position: 0.01,
                rotation: 0.02,
            },
            resize_speeds: SpeedPair {
                position: 0.9,
                rotation: 0.9,
            },
            resize_hold_secs: 0.3,
        }
    }
}

impl CameraConfig {
    pub fn fov_y(&self) -> f32 {
        self.fov_y_degrees.to_radians()
    }
}
