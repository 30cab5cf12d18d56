//! Parameter types for the URL-transform service.
//!
//! These structs describe *what* image variant to serve, not *how* its URL
//! looks. They are the interface between the resolver (which decides widths,
//! heights and formats) and a [`UrlBuilder`](crate::urls::UrlBuilder) (which
//! encodes them for a particular transform service).

use serde::{Deserialize, Serialize};

/// How the transform service fits the image into the requested box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fit {
    /// Fill the box exactly, cropping the overflow.
    Crop,
}

impl Fit {
    pub fn as_str(self) -> &'static str {
        match self {
            Fit::Crop => "crop",
        }
    }
}

/// Output encoding requested from the transform service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Webp,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Webp => "webp",
        }
    }
}

/// Parameters for a single variant URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlParams {
    pub width: u32,
    pub height: Option<u32>,
    pub fit: Option<Fit>,
    pub format: Option<Format>,
}

impl UrlParams {
    /// Width-only variant; the service keeps the stored proportions.
    pub fn width(width: u32) -> Self {
        Self {
            width,
            height: None,
            fit: None,
            format: None,
        }
    }

    /// Fixed box. A height always implies a crop fit.
    pub fn sized(width: u32, height: Option<u32>) -> Self {
        Self {
            width,
            height,
            fit: height.map(|_| Fit::Crop),
            format: None,
        }
    }

    pub fn with_format(self, format: Option<Format>) -> Self {
        Self { format, ..self }
    }
}
