//! URL-keyed cache of decoded images.
//!
//! Thumbnails are often shared between paintings (or reused as supplemental
//! image blocks); the cache makes each URL load once per gallery.

use std::collections::HashMap;
use std::sync::Mutex;

use super::image::{ImageSource, LoadedImage};
use crate::error::Result;

pub struct CachedImageSource<S> {
    inner: S,
    cache: Mutex<HashMap<String, LoadedImage>>,
}

impl<S: ImageSource> CachedImageSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Number of cached images.
    pub fn cached_images(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Drop every cached pixel buffer.
    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }
}

impl<S: ImageSource> ImageSource for CachedImageSource<S> {
    fn load(&self, url: &str) -> Result<LoadedImage> {
        if let Some(hit) = self.cache.lock().ok().and_then(|c| c.get(url).cloned()) {
            log::debug!("Image cache HIT: {}", url);
            return Ok(hit);
        }

        // The lock is not held while loading; two workers racing on the same
        // URL both load it and the second insert wins.
        log::debug!("Image cache MISS: {}", url);
        let loaded = self.inner.load(url)?;
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(url.to_string(), loaded.clone());
        }
        Ok(loaded)
    }
}
