pub mod cache;
pub mod fetch;
pub mod image;

pub use self::cache::CachedImageSource;
pub use self::image::{HttpImageSource, ImageSource, LoadedImage};
