//! Shared test utilities.
//!
//! Provides a small media library covering the interesting crop layouts and a
//! recording URL builder for asserting on collaborator calls.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let library = sample_library();
//! let urls = RecordingUrls::default();
//! let resolved = Resolver::new(&library, &urls, &GridColumns::default())
//!     .resolve(&ImageRequest::new(ARTICLE, "cover"))
//!     .unwrap();
//! assert_eq!(urls.take_calls().len(), 1 + resolved.image.src_set.len());
//! ```

use std::sync::Mutex;

use crate::imaging::UrlParams;
use crate::media::{MediaLibrary, MediaRecord};
use crate::types::{CropRect, MediaReference};
use crate::urls::{GlideUrls, UrlBuilder};

pub const ARTICLE: &str = "article:12";

pub const LQIP: &str = "data:image/gif;base64,R0lGODlhAQABAAAAACw=";

// =========================================================================
// Fixture library
// =========================================================================

pub fn media(uuid: &str, width: u32, height: u32, crop_rect: Option<CropRect>) -> MediaReference {
    let filename = uuid.rsplit('/').next().unwrap_or(uuid).to_string();
    MediaReference {
        uuid: uuid.to_string(),
        filename,
        width,
        height,
        crop_rect,
        alt_text: None,
        caption: None,
        lqip_data: None,
        ratio: None,
    }
}

pub fn record(role: &str, crop: &str, media: MediaReference) -> MediaRecord {
    MediaRecord {
        model: ARTICLE.to_string(),
        role: role.to_string(),
        crop: crop.to_string(),
        media,
    }
}

/// Library for [`ARTICLE`]:
///
/// | role | crops | notes |
/// |---|---|---|
/// | `cover` | `default` (16:9), `mobile` (2:3) | alt text, caption, LQIP |
/// | `gallery` | `a`, `b` | no default → ambiguous |
/// | `broken` | `default` | zero width |
pub fn sample_library() -> MediaLibrary {
    let mut cover = media(
        "u/cover.jpg",
        4000,
        3000,
        Some(CropRect { x: 0, y: 375, w: 4000, h: 2250 }),
    );
    cover.alt_text = Some("A lighthouse at dusk".to_string());
    cover.caption = Some("Photo: the archive".to_string());
    cover.lqip_data = Some(LQIP.to_string());

    let mut mobile = cover.clone();
    mobile.crop_rect = Some(CropRect { x: 1000, y: 0, w: 2000, h: 3000 });
    mobile.ratio = Some("2/3".to_string());

    let mut library = MediaLibrary::new();
    library.insert(record("cover", "default", cover));
    library.insert(record("cover", "mobile", mobile));
    library.insert(record("gallery", "a", media("u/a.png", 1200, 800, None)));
    library.insert(record("gallery", "b", media("u/b.png", 800, 1200, None)));
    library.insert(record("broken", "default", media("u/broken.gif", 0, 100, None)));
    library
}

// =========================================================================
// Recording URL builder
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub asset: String,
    pub crop: Option<CropRect>,
    pub params: UrlParams,
}

/// Delegates to [`GlideUrls`] and records every call.
/// Uses Mutex (not RefCell) so it is Sync and works with rayon's par_iter.
pub struct RecordingUrls {
    inner: GlideUrls,
    calls: Mutex<Vec<RecordedCall>>,
}

impl Default for RecordingUrls {
    fn default() -> Self {
        Self {
            inner: GlideUrls::new("/img"),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingUrls {
    /// Drain recorded calls.
    pub fn take_calls(&self) -> Vec<RecordedCall> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }
}

impl UrlBuilder for RecordingUrls {
    fn url_for(&self, asset: &str, crop: Option<&CropRect>, params: &UrlParams) -> String {
        self.calls.lock().unwrap().push(RecordedCall {
            asset: asset.to_string(),
            crop: crop.copied(),
            params: *params,
        });
        self.inner.url_for(asset, crop, params)
    }
}
