//! Shared types passed between the resolver, the assembler and the templates.
//!
//! Media records are deserialized from JSON (fixtures, the CLI) and resolved
//! images serialize back to JSON for inspection, so everything here derives
//! serde.

use serde::{Deserialize, Serialize};

/// Crop rectangle relative to the original upload, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// A stored image asset bound to a model role and crop.
///
/// Owned by the storage layer; read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaReference {
    /// Opaque content address passed through to the URL service.
    pub uuid: String,
    pub filename: String,
    /// Intrinsic dimensions of the original upload.
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_rect: Option<CropRect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Precomputed low-quality placeholder, usually a base64 data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lqip_data: Option<String>,
    /// Label of the crop ratio as stored by the editor (e.g. `"16/9"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<String>,
}

impl MediaReference {
    /// Dimensions the descriptor is computed from: the crop if there is one.
    pub fn base_dimensions(&self) -> (u32, u32) {
        match self.crop_rect {
            Some(rect) => (rect.w, rect.h),
            None => (self.width, self.height),
        }
    }

    /// File extension without the dot, as stored in the filename.
    pub fn extension(&self) -> &str {
        match self.filename.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext,
            _ => "",
        }
    }
}

/// One `url width` pair of a `srcset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SrcSetCandidate {
    pub url: String,
    pub width: u32,
}

/// Render `url 250w, url 500w` from a candidate list.
pub fn srcset_attr(candidates: &[SrcSetCandidate]) -> String {
    candidates
        .iter()
        .map(|c| format!("{} {}w", c.url, c.width))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Presentation-ready description of one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDescriptor {
    pub src: String,
    pub src_set: Vec<SrcSetCandidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src_webp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src_set_webp: Option<Vec<SrcSetCandidate>>,
    pub width: u32,
    pub height: u32,
    /// Height over width.
    pub aspect_ratio: f64,
    pub alt: String,
    pub caption: String,
    pub crop: String,
    pub extension: String,
    /// Placeholder payload: stored LQIP data or the transparent fallback.
    pub lqip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<String>,
}

/// An alternate `<source>` bound to a media query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSource {
    pub media_query: String,
    pub image: ImageDescriptor,
}

/// Everything the assembler needs: the fallback image, `sizes`, and the
/// alternates in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedImage {
    pub image: ImageDescriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<ResolvedSource>,
}
