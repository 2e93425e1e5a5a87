//! Painting descriptions supplied by the page/content layer.

use std::path::Path;

use serde::Deserialize;

use crate::config::GalleryConfig;
use crate::error::{GalleryError, Result};

/// One painting as described by the content layer. Immutable input.
#[derive(Debug, Clone, Deserialize)]
pub struct PaintingSpec {
    pub image_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail_urls: Vec<String>,
    #[serde(default)]
    pub supplemental_blocks: Vec<SupplementalBlock>,
}

impl PaintingSpec {
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            title: String::new(),
            description: String::new(),
            thumbnail_urls: Vec::new(),
            supplemental_blocks: Vec::new(),
        }
    }

    pub fn with_thumbnails<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.thumbnail_urls = urls.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_blocks(mut self, blocks: Vec<SupplementalBlock>) -> Self {
        self.supplemental_blocks = blocks;
        self
    }
}

/// Extra content shown beside a focused painting.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SupplementalBlock {
    Title { text: String },
    Text { text: String },
    Image { url: String },
    Link { label: String, url: String },
}

impl SupplementalBlock {
    pub fn kind_name(&self) -> &'static str {
        match self {
            SupplementalBlock::Title { .. } => "title",
            SupplementalBlock::Text { .. } => "text",
            SupplementalBlock::Image { .. } => "image",
            SupplementalBlock::Link { .. } => "link",
        }
    }
}

/// On-disk gallery description: the painting list plus config overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct GalleryManifest {
    #[serde(default)]
    pub config: GalleryConfig,
    pub paintings: Vec<PaintingSpec>,
}

impl GalleryManifest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|source| GalleryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let manifest = Self::from_json(&data)?;
        log::info!(
            "Loaded manifest {} ({} paintings)",
            path.display(),
            manifest.paintings.len()
        );
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MANIFEST: &str = r#"{
        "config": { "room": { "strategy": "scattered" } },
        "paintings": [
            {
                "image_url": "https://example.com/a.jpg",
                "title": "Harbour",
                "thumbnail_urls": ["https://example.com/a1.jpg"],
                "supplemental_blocks": [
                    { "kind": "title", "text": "Harbour at dawn" },
                    { "kind": "link", "label": "Artist", "url": "https://example.com/artist" }
                ]
            },
            { "image_url": "b.png" }
        ]
    }"#;

    #[test]
    fn parses_blocks_and_defaults() {
        let m = GalleryManifest::from_json(MANIFEST).unwrap();
        assert_eq!(m.paintings.len(), 2);
        assert_eq!(m.paintings[0].thumbnail_urls.len(), 1);
        assert_eq!(m.paintings[0].supplemental_blocks[1].kind_name(), "link");
        assert!(m.paintings[1].thumbnail_urls.is_empty());
        assert!(m.paintings[1].title.is_empty());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MANIFEST.as_bytes()).unwrap();
        let m = GalleryManifest::load(file.path()).unwrap();
        assert_eq!(m.paintings[0].title, "Harbour");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GalleryManifest::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, GalleryError::Io { .. }));
    }

    #[test]
    fn unknown_block_kind_is_rejected() {
        let json = r#"{ "paintings": [ { "image_url": "a", "supplemental_blocks": [ { "kind": "video" } ] } ] }"#;
        assert!(matches!(
            GalleryManifest::from_json(json),
            Err(GalleryError::Manifest(_))
        ));
    }
}
