//! Error type shared by the loader, layout pipeline and camera framing.

use thiserror::Error;

use crate::layout::PaintingId;

pub type Result<T> = std::result::Result<T, GalleryError>;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("invalid image url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request for {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    #[error("{url} answered with HTTP {status}")]
    Http { url: String, status: u16 },

    #[error("could not decode {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("gallery manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("no painting with id {0}")]
    UnknownPainting(PaintingId),

    #[error("gallery is not ready yet")]
    NotReady,

    #[error("invalid room: {0}")]
    Room(String),

    #[error("cannot frame painting {painting}: {reason}")]
    Framing { painting: PaintingId, reason: String },

    #[error("[{phase}] {source}")]
    Pipeline {
        phase: &'static str,
        #[source]
        source: Box<GalleryError>,
    },
}

impl GalleryError {
    /// Tag an error with the pipeline phase it escaped from.
    pub fn in_phase(self, phase: &'static str) -> Self {
        GalleryError::Pipeline {
            phase,
            source: Box::new(self),
        }
    }

    /// The pipeline phase this error was raised in, if any.
    pub fn phase(&self) -> Option<&'static str> {
        match self {
            GalleryError::Pipeline { phase, .. } => Some(phase),
            _ => None,
        }
    }
}
