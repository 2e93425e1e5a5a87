pub mod blocks;
pub mod room;
pub mod scene;

pub use self::scene::{Material, Node, NodeId, NodeKind, Scene, Surface};
