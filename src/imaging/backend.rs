//! Dimension probe trait and shared types.
//!
//! Static images (files shipped with the site rather than uploaded through
//! the media library) need their pixel size before a descriptor can be built.
//! The [`DimensionProbe`] trait isolates that read so the static-image helper
//! stays testable without files on disk.
//!
//! The production implementation is
//! [`RustProbe`](super::rust_backend::RustProbe), which only decodes headers.

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unreadable image {path}: {reason}")]
    Unreadable { path: String, reason: String },
}

/// Result of a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Reads pixel dimensions of a local image.
pub trait DimensionProbe: Sync {
    fn identify(&self, path: &Path) -> Result<Dimensions, ProbeError>;
}
