//! URL-transform service.
//!
//! This crate never decides what an image URL looks like; it only decides
//! which variants exist. [`UrlBuilder`] is the capability the resolver is
//! handed, and [`GlideUrls`] is the default implementation, producing
//! Glide-style query strings:
//!
//! ```text
//! /img/2024/05/cover.jpg?w=800&h=450&fit=crop&fm=webp&crop=4000,2250,0,375
//! ```

use crate::imaging::UrlParams;
use crate::types::CropRect;
use serde::{Deserialize, Serialize};

/// 1x1 transparent GIF, used when a media record has no stored placeholder.
pub const TRANSPARENT_GIF: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

/// Builds URLs for image variants.
pub trait UrlBuilder: Sync {
    fn url_for(&self, asset: &str, crop: Option<&CropRect>, params: &UrlParams) -> String;

    fn transparent_fallback_url(&self) -> String {
        TRANSPARENT_GIF.to_string()
    }
}

/// Glide-compatible URL builder rooted at `base_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlideUrls {
    pub base_url: String,
}

impl GlideUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl UrlBuilder for GlideUrls {
    fn url_for(&self, asset: &str, crop: Option<&CropRect>, params: &UrlParams) -> String {
        let mut query = vec![format!("w={}", params.width)];
        if let Some(h) = params.height {
            query.push(format!("h={h}"));
        }
        if let Some(fit) = params.fit {
            query.push(format!("fit={}", fit.as_str()));
        }
        if let Some(format) = params.format {
            query.push(format!("fm={}", format.as_str()));
        }
        if let Some(rect) = crop {
            query.push(format!("crop={},{},{},{}", rect.w, rect.h, rect.x, rect.y));
        }

        format!(
            "{}/{}?{}",
            self.base_url.trim_end_matches('/'),
            asset.trim_start_matches('/'),
            query.join("&")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Format;

    #[test]
    fn width_only_url() {
        let urls = GlideUrls::new("/img");
        assert_eq!(
            urls.url_for("a/b.jpg", None, &UrlParams::width(500)),
            "/img/a/b.jpg?w=500"
        );
    }

    #[test]
    fn full_url_with_crop_and_format() {
        let urls = GlideUrls::new("https://cdn.test/img/");
        let rect = CropRect { x: 0, y: 375, w: 4000, h: 2250 };
        let params = UrlParams::sized(800, Some(450)).with_format(Some(Format::Webp));
        assert_eq!(
            urls.url_for("/2024/cover.jpg", Some(&rect), &params),
            "https://cdn.test/img/2024/cover.jpg?w=800&h=450&fit=crop&fm=webp&crop=4000,2250,0,375"
        );
    }

    #[test]
    fn fallback_is_transparent_gif() {
        let urls = GlideUrls::new("/img");
        assert!(urls.transparent_fallback_url().starts_with("data:image/gif;base64,"));
    }
}
