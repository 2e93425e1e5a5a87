pub mod camera;
pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod gallery;
pub mod layout;
pub mod net;
pub mod picking;
pub mod render;
pub mod viewer;

pub use crate::config::GalleryConfig;
pub use crate::error::{GalleryError, Result};
pub use crate::gallery::{ClickOutcome, Gallery, GalleryRoom};
