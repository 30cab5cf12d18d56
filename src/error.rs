//! Errors raised while building a request or resolving it into descriptors.
//!
//! Every variant is a deterministic input problem: nothing here is retried and
//! no fallback markup is produced. A failed resolution fails the whole render.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
    #[error("Image role '{role}' has more than one crop ({crops:?}), please pick one explicitly")]
    AmbiguousCrop { role: String, crops: Vec<String> },
    #[error("No media was found for role '{role}' and crop '{crop}'")]
    MediaNotFound { role: String, crop: String },
    #[error("Invalid source: {0}")]
    InvalidSource(String),
    #[error("Invalid preset: {0}")]
    InvalidPreset(String),
    #[error("Invalid columns: {0}")]
    InvalidColumns(String),
}

pub type Result<T> = std::result::Result<T, ImageError>;
