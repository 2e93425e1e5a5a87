//! Click → ray → nearest pickable quad.
//!
//! Screen points are in pixels with the origin at the top-left of the
//! viewport. NDC runs `[-1, 1]` with `+y` up.

use glam::{Vec2, Vec3};

use crate::camera::{CameraPose, Viewport};
use crate::layout::PaintingId;
use crate::render::scene::{Node, NodeId, NodeKind, Scene};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// What a click landed on.
#[derive(Debug, Clone, PartialEq)]
pub enum Hit {
    /// `index` 0 is the main painting, 1.. are thumbnails
    Image { painting: PaintingId, index: usize },
    Link { painting: PaintingId, url: String },
}

pub fn screen_to_ndc(point: Vec2, viewport: Viewport) -> Vec2 {
    Vec2::new(
        point.x / viewport.width * 2.0 - 1.0,
        1.0 - point.y / viewport.height * 2.0,
    )
}

pub fn ndc_to_screen(ndc: Vec2, viewport: Viewport) -> Vec2 {
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * viewport.width,
        (1.0 - ndc.y) * 0.5 * viewport.height,
    )
}

/// Ray through an NDC point for a perspective camera with vertical fov `fov_y`.
pub fn ray_from_ndc(pose: &CameraPose, ndc: Vec2, fov_y: f32, aspect: f32) -> Ray {
    let half_tan = (fov_y * 0.5).tan();
    let local = Vec3::new(ndc.x * half_tan * aspect, ndc.y * half_tan, -1.0);
    Ray {
        origin: pose.position,
        direction: (pose.rotation * local).normalize(),
    }
}

/// Project a world point to NDC. `None` when it lies at or behind `near`.
pub fn project_to_ndc(pose: &CameraPose, world: Vec3, fov_y: f32, aspect: f32, near: f32) -> Option<Vec2> {
    let view = pose.rotation.inverse() * (world - pose.position);
    let depth = -view.z;
    if depth <= near {
        return None;
    }
    let half_tan = (fov_y * 0.5).tan();
    Some(Vec2::new(
        view.x / (depth * half_tan * aspect),
        view.y / (depth * half_tan),
    ))
}

/// Distance along `ray` to the quad, if hit from either side.
pub fn intersect_quad(ray: &Ray, node: &Node) -> Option<f32> {
    let normal = node.normal();
    let denom = normal.dot(ray.direction);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = normal.dot(node.center - ray.origin) / denom;
    if t < 0.0 {
        return None;
    }
    let local = node.rotation.inverse() * (ray.at(t) - node.center);
    let half = node.size.as_vec2() * 0.5;
    (local.x.abs() <= half.x && local.y.abs() <= half.y).then_some(t)
}

fn hit_for(kind: &NodeKind) -> Option<Hit> {
    match kind {
        NodeKind::Painting(id) => Some(Hit::Image {
            painting: *id,
            index: 0,
        }),
        NodeKind::Thumbnail { painting, index } => Some(Hit::Image {
            painting: *painting,
            index: *index,
        }),
        NodeKind::Block {
            painting,
            link: Some(url),
        } => Some(Hit::Link {
            painting: *painting,
            url: url.clone(),
        }),
        NodeKind::Block { link: None, .. } | NodeKind::Surface(_) => None,
    }
}

/// Nearest pickable node along `ray`.
pub fn pick(scene: &Scene, ray: &Ray) -> Option<(NodeId, Hit)> {
    let mut best: Option<(f32, NodeId, Hit)> = None;
    for (id, node) in scene.iter() {
        let Some(hit) = hit_for(&node.kind) else {
            continue;
        };
        if let Some(t) = intersect_quad(ray, node) {
            if best.as_ref().map_or(true, |(bt, _, _)| t < *bt) {
                best = Some((t, id, hit));
            }
        }
    }
    best.map(|(_, id, hit)| (id, hit))
}
