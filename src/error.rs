//! Mapping errors

use thiserror::Error;

/// Errors raised when an edge can't be turned into a post view
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("post `{slug}` has no thumbnail")]
    MissingThumbnail { slug: String },

    #[error("post `{slug}` thumbnail is missing `{path}`")]
    MissingImage { slug: String, path: &'static str },
}

impl MapError {
    /// Slug of the post that failed to map
    pub fn slug(&self) -> &str {
        match self {
            MapError::MissingThumbnail { slug } | MapError::MissingImage { slug, .. } => slug,
        }
    }
}
