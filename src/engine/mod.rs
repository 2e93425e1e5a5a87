pub mod pipeline;

pub use self::pipeline::GalleryEngine;
