//! Painting layout: room geometry primitives, painting loading and sizing,
//! thumbnail strips and the two room arrangement strategies.
//!
//! Coordinate frame (Y up, right handed, meters):
//!   - floor at `y = 0`, ceiling at `y = height`
//!   - room centred on `x = 0`, spanning `[-width/2, width/2]`
//!   - front wall at `z = -depth/2`; the `+z` side is open
//!
//! Wall-local frame: `x` runs along the wall (to the right for a visitor
//! facing it), `y` is up, and the outward normal points into the room.

pub mod arrange;
pub mod painting;
pub mod thumbnails;

use std::fmt;

use glam::{Quat, Vec2, Vec3};
use serde::Deserialize;

pub use self::arrange::{Arrangement, LayoutReport, LayoutStrategy};
pub use self::painting::{composition_size, load_painting, LoadedPainting, Orientation};

/// Stable painting identifier: the index of its spec in the input list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaintingId(pub usize);

impl fmt::Display for PaintingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Sizes
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size2 {
    pub width: f32,
    pub height: f32,
}

impl Size2 {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Size with the given aspect ratio whose long edge is `long_edge`.
    pub fn from_long_edge(aspect: f32, long_edge: f32) -> Self {
        if aspect >= 1.0 {
            Self::new(long_edge, long_edge / aspect)
        } else {
            Self::new(long_edge * aspect, long_edge)
        }
    }

    /// Largest size with the given aspect ratio that fits in `max_w` × `max_h`.
    pub fn fit_within(aspect: f32, max_w: f32, max_h: f32) -> Self {
        let w = max_w.min(max_h * aspect);
        Self::new(w, w / aspect)
    }

    pub fn scaled(self, s: f32) -> Self {
        Self::new(self.width * s, self.height * s)
    }

    pub fn max_edge(self) -> f32 {
        self.width.max(self.height)
    }

    pub fn aspect(self) -> f32 {
        self.width / self.height
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RoomDimensions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Walls
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wall {
    Left,
    Right,
    Front,
}

impl Wall {
    pub const ALL: [Wall; 3] = [Wall::Left, Wall::Right, Wall::Front];

    /// Rotation about Y that turns a `+z`-facing quad to face into the room.
    pub fn rotation_y(self) -> f32 {
        match self {
            Wall::Left => std::f32::consts::FRAC_PI_2,
            Wall::Right => -std::f32::consts::FRAC_PI_2,
            Wall::Front => 0.0,
        }
    }

    pub fn rotation(self) -> Quat {
        Quat::from_rotation_y(self.rotation_y())
    }

    /// Outward normal (pointing into the room).
    pub fn normal(self) -> Vec3 {
        match self {
            Wall::Left => Vec3::X,
            Wall::Right => Vec3::NEG_X,
            Wall::Front => Vec3::Z,
        }
    }

    /// Wall-local `+x` expressed in world space.
    pub fn along(self) -> Vec3 {
        match self {
            Wall::Left => Vec3::NEG_Z,
            Wall::Right => Vec3::Z,
            Wall::Front => Vec3::X,
        }
    }

    pub fn length(self, room: &RoomDimensions) -> f32 {
        match self {
            Wall::Left | Wall::Right => room.depth,
            Wall::Front => room.width,
        }
    }

    /// Floor-level point at the wall-local left end of the wall.
    fn origin(self, room: &RoomDimensions) -> Vec3 {
        let hw = room.width * 0.5;
        let hd = room.depth * 0.5;
        match self {
            Wall::Left => Vec3::new(-hw, 0.0, hd),
            Wall::Right => Vec3::new(hw, 0.0, -hd),
            Wall::Front => Vec3::new(-hw, 0.0, -hd),
        }
    }

    /// World position of wall-local `(u, y)`, pushed `clearance` off the surface.
    pub fn point(self, room: &RoomDimensions, u: f32, y: f32, clearance: f32) -> Vec3 {
        self.origin(room) + self.along() * u + Vec3::Y * y + self.normal() * clearance
    }

    /// Offset a world anchor by wall-local `(x, y)` and a distance off the wall.
    pub fn offset(self, anchor: Vec3, local: Vec2, out: f32) -> Vec3 {
        anchor + self.along() * local.x + Vec3::Y * local.y + self.normal() * out
    }

    /// Project a world point onto the wall-local `(u, y)` plane.
    pub fn local_coords(self, room: &RoomDimensions, p: Vec3) -> Vec2 {
        let d = p - self.origin(room);
        Vec2::new(d.dot(self.along()), d.y)
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Wall::Left => "left",
            Wall::Right => "right",
            Wall::Front => "front",
        };
        f.write_str(name)
    }
}

/// Axis-aligned rectangle in a wall's local `(u, y)` plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl WallRect {
    pub fn from_center(center: Vec2, size: Size2) -> Self {
        let half = size.as_vec2() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// True when the rectangles come closer than `margin`.
    pub fn overlaps(&self, other: &WallRect, margin: f32) -> bool {
        self.min.x < other.max.x + margin
            && other.min.x < self.max.x + margin
            && self.min.y < other.max.y + margin
            && other.min.y < self.max.y + margin
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Placement
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Where a painting ended up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub painting: PaintingId,
    pub wall: Wall,
    /// Centre of the main painting
    pub position: Vec3,
    pub rotation_y: f32,
    /// Bounding size of painting + thumbnail strip (estimate)
    pub composition_size: Size2,
}

impl Placement {
    /// Centre of the composition box, given the main painting's size.
    pub fn composition_center(&self, main: Size2, orientation: Orientation) -> Vec3 {
        let extra_w = self.composition_size.width - main.width;
        let extra_h = self.composition_size.height - main.height;
        match orientation {
            Orientation::Portrait => {
                self.wall.offset(self.position, Vec2::new(extra_w * 0.5, 0.0), 0.0)
            }
            Orientation::Landscape => {
                self.wall.offset(self.position, Vec2::new(0.0, -extra_h * 0.5), 0.0)
            }
        }
    }
}
