//! Image loading collaborator.
//!
//! The layout engine only needs "load an image, get its dimensions". The
//! decoded RGBA pixels ride along so a renderer can upload them as textures.

use std::sync::Arc;

use image::RgbaImage;

use super::fetch::fetch_bytes;
use crate::error::{GalleryError, Result};

/// Decoded image. `pixels` is `None` for sources that only know dimensions.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub pixels: Option<Arc<RgbaImage>>,
}

impl LoadedImage {
    /// Dimension-only image (no pixel data).
    pub fn sized(url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            width,
            height,
            pixels: None,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}

/// Anything that can turn a URL into a decoded image.
///
/// Called from rayon workers, hence `Send + Sync`.
pub trait ImageSource: Send + Sync {
    fn load(&self, url: &str) -> Result<LoadedImage>;
}

impl<S: ImageSource + ?Sized> ImageSource for Arc<S> {
    fn load(&self, url: &str) -> Result<LoadedImage> {
        (**self).load(url)
    }
}

/// Fetches over HTTP(S) or from disk and decodes with the `image` crate.
pub struct HttpImageSource {
    /// Decoded images wider or taller than this are downscaled
    max_dimension: u32,
}

impl HttpImageSource {
    pub fn new() -> Self {
        Self {
            max_dimension: 2048,
        }
    }

    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension.max(1);
        self
    }
}

impl Default for HttpImageSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageSource for HttpImageSource {
    fn load(&self, url: &str) -> Result<LoadedImage> {
        let fetched = fetch_bytes(url)?;
        decode(url, &fetched.bytes, self.max_dimension)
    }
}

/// Decode encoded bytes into an RGBA image, capping the long edge.
pub fn decode(url: &str, bytes: &[u8], max_dimension: u32) -> Result<LoadedImage> {
    let img = image::load_from_memory(bytes).map_err(|e| GalleryError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    if w == 0 || h == 0 {
        return Err(GalleryError::Decode {
            url: url.to_string(),
            reason: "image has no pixels".into(),
        });
    }

    let long = w.max(h);
    let rgba = if long > max_dimension {
        let ratio = max_dimension as f32 / long as f32;
        let nw = ((w as f32 * ratio).round() as u32).max(1);
        let nh = ((h as f32 * ratio).round() as u32).max(1);
        image::imageops::resize(&rgba, nw, nh, image::imageops::FilterType::Triangle)
    } else {
        rgba
    };

    // Dimensions are reported from the original so aspect ratios stay exact
    Ok(LoadedImage {
        url: url.to_string(),
        width: w,
        height: h,
        pixels: Some(Arc::new(rgba)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(w, h, image::Rgba([200, 10, 10, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decodes_dimensions() {
        let loaded = decode("mem.png", &png_bytes(40, 20), 2048).unwrap();
        assert_eq!((loaded.width, loaded.height), (40, 20));
        assert!((loaded.aspect_ratio() - 2.0).abs() < 1e-6);
        assert!(loaded.pixels.is_some());
    }

    #[test]
    fn caps_texture_size_but_keeps_aspect() {
        let loaded = decode("mem.png", &png_bytes(400, 100), 100).unwrap();
        let px = loaded.pixels.unwrap();
        assert_eq!(px.dimensions(), (100, 25));
        assert_eq!((loaded.width, loaded.height), (400, 100));
    }

    #[test]
    fn garbage_is_decode_error() {
        assert!(matches!(
            decode("junk", b"not an image", 2048),
            Err(GalleryError::Decode { .. })
        ));
    }

    #[test]
    fn loads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        std::fs::write(&path, png_bytes(8, 16)).unwrap();
        let loaded = HttpImageSource::new().load(path.to_str().unwrap()).unwrap();
        assert_eq!((loaded.width, loaded.height), (8, 16));
    }
}
