//! Room shell: three walls, floor and ceiling.

use glam::{Quat, Vec3};

use super::scene::{Material, Node, NodeId, NodeKind, Scene, Surface};
use crate::config::RoomConfig;
use crate::layout::{RoomDimensions, Size2, Wall};

const WALL_TINT: [u8; 3] = [236, 232, 224];
const FLOOR_TINT: [u8; 3] = [150, 128, 104];
const CEILING_TINT: [u8; 3] = [246, 246, 244];

/// Node ids of the five room surfaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomShell {
    pub left: NodeId,
    pub right: NodeId,
    pub front: NodeId,
    pub floor: NodeId,
    pub ceiling: NodeId,
}

impl RoomShell {
    pub fn ids(&self) -> [NodeId; 5] {
        [self.left, self.right, self.front, self.floor, self.ceiling]
    }
}

fn surface(
    kind: Surface,
    center: Vec3,
    rotation: Quat,
    size: Size2,
    texture: &Option<String>,
    tint: [u8; 3],
    tile: f32,
) -> Node {
    Node::quad(
        NodeKind::Surface(kind),
        center,
        rotation,
        size,
        Material::Surface {
            texture: texture.clone(),
            tint,
        },
    )
    .with_uv_repeat(size.as_vec2() / tile.max(f32::EPSILON))
}

/// Add the room's five planes to `scene`. Depends on nothing but the
/// dimensions and the surface textures.
pub fn compose_room(room: &RoomDimensions, cfg: &RoomConfig, scene: &mut Scene) -> RoomShell {
    let RoomDimensions {
        width,
        height,
        depth,
    } = *room;
    let tile = cfg.texture_tile;
    let mid = height * 0.5;

    let side = Size2::new(depth, height);
    let left = scene.add(surface(
        Surface::LeftWall,
        Vec3::new(-width * 0.5, mid, 0.0),
        Wall::Left.rotation(),
        side,
        &cfg.wall_texture,
        WALL_TINT,
        tile,
    ));
    let right = scene.add(surface(
        Surface::RightWall,
        Vec3::new(width * 0.5, mid, 0.0),
        Wall::Right.rotation(),
        side,
        &cfg.wall_texture,
        WALL_TINT,
        tile,
    ));
    let front = scene.add(surface(
        Surface::FrontWall,
        Vec3::new(0.0, mid, -depth * 0.5),
        Wall::Front.rotation(),
        Size2::new(width, height),
        &cfg.wall_texture,
        WALL_TINT,
        tile,
    ));

    let plan = Size2::new(width, depth);
    let floor = scene.add(surface(
        Surface::Floor,
        Vec3::ZERO,
        Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
        plan,
        &cfg.floor_texture,
        FLOOR_TINT,
        tile,
    ));
    let ceiling = scene.add(surface(
        Surface::Ceiling,
        Vec3::new(0.0, height, 0.0),
        Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
        plan,
        &cfg.ceiling_texture,
        CEILING_TINT,
        tile,
    ));

    log::info!("Room shell {:.1}x{:.1}x{:.1}", width, height, depth);
    RoomShell {
        left,
        right,
        front,
        floor,
        ceiling,
    }
}
