//! Scene arena.
//!
//! The scene owns every renderable quad. Paintings, thumbnails and blocks
//! refer to each other only through ids (`PaintingId`, `NodeId`).

use glam::{Quat, Vec2, Vec3};

use crate::layout::{PaintingId, Size2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    LeftWall,
    RightWall,
    FrontWall,
    Floor,
    Ceiling,
}

/// What a node stands for. Only paintings, thumbnails and link blocks are pickable.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Surface(Surface),
    Painting(PaintingId),
    /// `index` is 1-based; 0 is the main painting
    Thumbnail { painting: PaintingId, index: usize },
    Block {
        painting: PaintingId,
        /// Target of link blocks
        link: Option<String>,
    },
}

impl NodeKind {
    pub fn owner(&self) -> Option<PaintingId> {
        match self {
            NodeKind::Surface(_) => None,
            NodeKind::Painting(id) => Some(*id),
            NodeKind::Thumbnail { painting, .. } | NodeKind::Block { painting, .. } => Some(*painting),
        }
    }

    pub fn is_pickable(&self) -> bool {
        match self {
            NodeKind::Surface(_) => false,
            NodeKind::Painting(_) | NodeKind::Thumbnail { .. } => true,
            NodeKind::Block { link, .. } => link.is_some(),
        }
    }
}

/// How a node is painted.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// Decoded image keyed by its url
    Image(String),
    /// Room surface: optional tiled texture url over a flat tint
    Surface { texture: Option<String>, tint: [u8; 3] },
    Text { lines: Vec<String>, heading: bool },
    Link { label: String },
}

/// A textured rectangle. Its local frame has the quad in the XY plane facing `+z`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub center: Vec3,
    pub rotation: Quat,
    pub size: Size2,
    pub material: Material,
    /// Texture repeats across the quad
    pub uv_repeat: Vec2,
}

impl Node {
    pub fn quad(kind: NodeKind, center: Vec3, rotation: Quat, size: Size2, material: Material) -> Self {
        Self {
            kind,
            center,
            rotation,
            size,
            material,
            uv_repeat: Vec2::ONE,
        }
    }

    pub fn with_uv_repeat(mut self, repeat: Vec2) -> Self {
        self.uv_repeat = repeat;
        self
    }

    pub fn normal(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// World position of quad-local `(x, y)`, both in `[-0.5, 0.5]`.
    pub fn local_point(&self, x: f32, y: f32) -> Vec3 {
        self.center + self.rotation * Vec3::new(x * self.size.width, y * self.size.height, 0.0)
    }

    /// Corners: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Vec3; 4] {
        [
            self.local_point(-0.5, 0.5),
            self.local_point(0.5, 0.5),
            self.local_point(0.5, -0.5),
            self.local_point(-0.5, -0.5),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// The main quad of a painting.
    pub fn painting_node(&self, id: PaintingId) -> Option<(NodeId, &Node)> {
        self.iter().find(|(_, n)| n.kind == NodeKind::Painting(id))
    }

    /// Thumbnail quad by owner and 1-based index.
    pub fn thumbnail_node(&self, painting: PaintingId, index: usize) -> Option<(NodeId, &Node)> {
        self.iter()
            .find(|(_, n)| n.kind == NodeKind::Thumbnail { painting, index })
    }

    /// Every node belonging to one painting, in insertion order.
    pub fn nodes_of(&self, painting: PaintingId) -> impl Iterator<Item = (NodeId, &Node)> {
        self.iter().filter(move |(_, n)| n.kind.owner() == Some(painting))
    }
}
