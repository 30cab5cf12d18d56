//! Media lookup: which stored assets belong to a model role.
//!
//! The storage layer is external. [`MediaLookup`] is the seam the resolver
//! talks to; [`MediaLibrary`] is the in-memory implementation used by the
//! CLI, the static-image helper and tests. It deserializes from a JSON list
//! of records:
//!
//! ```json
//! [
//!   { "model": "article:12", "role": "cover", "crop": "default",
//!     "uuid": "2024/05/cover.jpg", "filename": "cover.jpg",
//!     "width": 4000, "height": 3000,
//!     "crop_rect": { "x": 0, "y": 375, "w": 4000, "h": 2250 } }
//! ]
//! ```
//!
//! Record order is preserved: crops are reported in insertion order.

use crate::error::{ImageError, Result};
use crate::types::MediaReference;
use serde::{Deserialize, Serialize};

/// Crop name preferred when a role stores several crops.
pub const DEFAULT_CROP: &str = "default";

/// Read access to stored media, keyed by model, role and crop.
pub trait MediaLookup: Sync {
    /// All crop names stored for `(model, role)`, in insertion order.
    fn crops(&self, model: &str, role: &str) -> Vec<String>;

    fn lookup(&self, model: &str, role: &str, crop: &str) -> Option<MediaReference>;
}

/// Pick the crop to render when the request does not name one.
///
/// - no crops → `MediaNotFound`
/// - exactly one → that crop
/// - several including `"default"` → `"default"`
/// - otherwise → `AmbiguousCrop`
pub fn select_crop(role: &str, crops: &[String]) -> Result<String> {
    match crops {
        [] => Err(ImageError::MediaNotFound {
            role: role.to_string(),
            crop: "<any>".to_string(),
        }),
        [only] => Ok(only.clone()),
        _ if crops.iter().any(|c| c == DEFAULT_CROP) => Ok(DEFAULT_CROP.to_string()),
        _ => Err(ImageError::AmbiguousCrop {
            role: role.to_string(),
            crops: crops.to_vec(),
        }),
    }
}

/// One stored asset attached to a model role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub model: String,
    pub role: String,
    pub crop: String,
    #[serde(flatten)]
    pub media: MediaReference,
}

/// In-memory media store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaLibrary {
    records: Vec<MediaRecord>,
}

impl MediaLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn insert(&mut self, record: MediaRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[MediaRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl MediaLookup for MediaLibrary {
    fn crops(&self, model: &str, role: &str) -> Vec<String> {
        let mut crops: Vec<String> = Vec::new();
        for record in &self.records {
            if record.model == model && record.role == role && !crops.contains(&record.crop) {
                crops.push(record.crop.clone());
            }
        }
        crops
    }

    fn lookup(&self, model: &str, role: &str, crop: &str) -> Option<MediaReference> {
        self.records
            .iter()
            .find(|r| r.model == model && r.role == role && r.crop == crop)
            .map(|r| r.media.clone())
    }
}
