use std::time::Duration;

use url::Url;

use crate::error::{GalleryError, Result};

/// Raw bytes of a fetched image resource.
#[derive(Clone)]
pub struct FetchResult {
    pub bytes: Vec<u8>,
    /// Final location after redirects (or the canonical file path)
    pub url: String,
    pub content_type: Option<String>,
}

/// Where a resource string points to.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceLocation {
    Remote(Url),
    File(std::path::PathBuf),
}

/// Classify a resource string.
///
/// `http(s)://` URLs are fetched over the network, `file://` URLs and bare
/// paths are read from disk. Anything else is rejected.
pub fn resolve_location(url_str: &str) -> Result<ResourceLocation> {
    let trimmed = url_str.trim();
    if trimmed.is_empty() {
        return Err(GalleryError::InvalidUrl {
            url: url_str.to_string(),
            reason: "empty".into(),
        });
    }

    match Url::parse(trimmed) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(ResourceLocation::Remote(url)),
            "file" => url
                .to_file_path()
                .map(ResourceLocation::File)
                .map_err(|_| GalleryError::InvalidUrl {
                    url: url_str.to_string(),
                    reason: "file url without a usable path".into(),
                }),
            // Windows drive letters parse as a one-letter scheme
            s if s.len() == 1 => Ok(ResourceLocation::File(trimmed.into())),
            other => Err(GalleryError::InvalidUrl {
                url: url_str.to_string(),
                reason: format!("unsupported scheme `{}`", other),
            }),
        },
        Err(url::ParseError::RelativeUrlWithoutBase) => Ok(ResourceLocation::File(trimmed.into())),
        Err(e) => Err(GalleryError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Fetch a resource (blocking).
pub fn fetch_bytes(url_str: &str) -> Result<FetchResult> {
    match resolve_location(url_str)? {
        ResourceLocation::Remote(url) => fetch_remote(url),
        ResourceLocation::File(path) => {
            let bytes = std::fs::read(&path).map_err(|source| GalleryError::Io {
                path: path.display().to_string(),
                source,
            })?;
            Ok(FetchResult {
                bytes,
                url: path.display().to_string(),
                content_type: None,
            })
        }
    }
}

fn fetch_remote(url: Url) -> Result<FetchResult> {
    let fetch_err = |reason: String| GalleryError::Fetch {
        url: url.to_string(),
        reason,
    };

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("gallery-room/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(15))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| fetch_err(format!("client error: {}", e)))?;

    let response = client
        .get(url.as_str())
        .header("Accept", "image/avif,image/webp,image/png,image/*;q=0.8,*/*;q=0.5")
        .send()
        .map_err(|e| fetch_err(format!("request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(GalleryError::Http {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let final_url = response.url().to_string();

    let bytes = response
        .bytes()
        .map_err(|e| fetch_err(format!("failed to read body: {}", e)))?;

    Ok(FetchResult {
        bytes: bytes.to_vec(),
        url: final_url,
        content_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_locations() {
        assert!(matches!(
            resolve_location("https://example.com/a.png"),
            Ok(ResourceLocation::Remote(_))
        ));
        assert!(matches!(
            resolve_location("assets/a.png"),
            Ok(ResourceLocation::File(_))
        ));
        assert!(matches!(
            resolve_location("/tmp/a.png"),
            Ok(ResourceLocation::File(_))
        ));
    }

    #[test]
    fn rejects_empty_and_foreign_schemes() {
        assert!(matches!(
            resolve_location("  "),
            Err(GalleryError::InvalidUrl { .. })
        ));
        assert!(matches!(
            resolve_location("ftp://example.com/a.png"),
            Err(GalleryError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn missing_file_fails() {
        assert!(matches!(
            fetch_bytes("/definitely/not/here.png"),
            Err(GalleryError::Io { .. })
        ));
    }
}
