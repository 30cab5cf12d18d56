//! Static images: local files rendered through the same pipeline as library
//! media.
//!
//! A static image has no media records. [`make_library`] builds them on the
//! fly: each file is probed for its pixel size, a centered crop rectangle is
//! computed for the requested ratio, and the result is filed under
//! [`STATIC_ROLE`] with the crop name the preset asks for. Every alternate
//! source of the preset gets its own record, so the resolver finds all of
//! them like it would for an uploaded image.

use crate::config::Preset;
use crate::error::{ImageError, Result};
use crate::imaging::{DimensionProbe, calc_crop};
use crate::media::{DEFAULT_CROP, MediaLibrary, MediaRecord};
use crate::types::MediaReference;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const STATIC_ROLE: &str = "static-image";

/// Model name static records are filed under.
pub const STATIC_MODEL: &str = "static";

/// One file for every crop, or one file per crop name.
#[derive(Debug, Clone, PartialEq)]
pub enum StaticFiles {
    Single(PathBuf),
    PerCrop(BTreeMap<String, PathBuf>),
}

impl StaticFiles {
    fn for_crop(&self, crop: &str) -> Result<&Path> {
        match self {
            Self::Single(path) => Ok(path),
            Self::PerCrop(files) => files.get(crop).map(PathBuf::as_path).ok_or_else(|| {
                ImageError::InvalidSource(format!("no static file given for crop '{crop}'"))
            }),
        }
    }
}

/// Output ratio (width over height): none keeps the file's own ratio.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum StaticRatios {
    #[default]
    Native,
    Single(f64),
    PerCrop(BTreeMap<String, f64>),
}

impl StaticRatios {
    fn for_crop(&self, crop: &str) -> Option<f64> {
        match self {
            Self::Native => None,
            Self::Single(ratio) => Some(*ratio),
            Self::PerCrop(ratios) => ratios.get(crop).copied(),
        }
    }

    fn check(&self) -> Result<()> {
        let bad = match self {
            Self::Native => None,
            Self::Single(ratio) => (!(*ratio > 0.0 && ratio.is_finite())).then_some(*ratio),
            Self::PerCrop(ratios) => ratios
                .values()
                .copied()
                .find(|r| !(*r > 0.0 && r.is_finite())),
        };
        match bad {
            Some(ratio) => Err(ImageError::InvalidDimensions(format!(
                "static image ratio must be positive, got {ratio}"
            ))),
            None => Ok(()),
        }
    }
}

/// Input of [`make_library`].
#[derive(Debug, Clone)]
pub struct StaticImage {
    /// Directory the file paths are relative to.
    pub root: PathBuf,
    pub files: StaticFiles,
    pub ratios: StaticRatios,
    pub alt: Option<String>,
}

/// Crop name the primary image is filed under.
pub fn primary_crop(preset: Option<&Preset>) -> &str {
    preset
        .and_then(|p| p.crop.as_deref())
        .unwrap_or(DEFAULT_CROP)
}

/// Build the media records for a static image.
pub fn make_library(
    probe: &dyn DimensionProbe,
    image: &StaticImage,
    preset: Option<&Preset>,
) -> Result<MediaLibrary> {
    image.ratios.check()?;

    let mut crops = vec![primary_crop(preset)];
    if let Some(preset) = preset {
        crops.extend(preset.sources.iter().map(|s| s.crop.as_str()));
    }

    let mut library = MediaLibrary::new();
    for (index, crop) in crops.into_iter().enumerate() {
        let mut media = make_media(probe, image, crop)?;
        // Alt text describes the primary image only
        if index == 0 {
            media.alt_text = image.alt.clone();
        }
        library.insert(MediaRecord {
            model: STATIC_MODEL.to_string(),
            role: STATIC_ROLE.to_string(),
            crop: crop.to_string(),
            media,
        });
    }
    Ok(library)
}

fn make_media(probe: &dyn DimensionProbe, image: &StaticImage, crop: &str) -> Result<MediaReference> {
    let file = image.files.for_crop(crop)?;
    let dims = probe
        .identify(&image.root.join(file))
        .map_err(|e| ImageError::InvalidSource(format!("{}: {e}", file.display())))?;
    if dims.width == 0 || dims.height == 0 {
        return Err(ImageError::InvalidDimensions(format!(
            "{} is {}x{}",
            file.display(),
            dims.width,
            dims.height
        )));
    }

    let ratio = image.ratios.for_crop(crop);
    let uuid = file.to_string_lossy().replace('\\', "/");
    let filename = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| uuid.clone());

    Ok(MediaReference {
        uuid,
        filename,
        width: dims.width,
        height: dims.height,
        crop_rect: Some(calc_crop((dims.width, dims.height), ratio)),
        alt_text: None,
        caption: None,
        lqip_data: None,
        ratio: ratio.map(|r| r.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockProbe;
    use crate::media::MediaLookup;
    use crate::request::{AltSource, SourceCondition};
    use crate::types::CropRect;

    fn single(path: &str) -> StaticImage {
        StaticImage {
            root: PathBuf::from("/site"),
            files: StaticFiles::Single(PathBuf::from(path)),
            ratios: StaticRatios::Native,
            alt: Some("Team photo".to_string()),
        }
    }

    fn preset_with_mobile() -> Preset {
        Preset {
            crop: Some("desktop".into()),
            sources: vec![AltSource::new(
                "mobile",
                SourceCondition::MediaQuery("(max-width: 767px)".into()),
            )
            .unwrap()],
            ..Preset::default()
        }
    }

    #[test]
    fn single_file_without_preset_uses_default_crop() {
        let probe = MockProbe::with(&[("/site/img/team.jpg", 1600, 900)]);
        let library = make_library(&probe, &single("img/team.jpg"), None).unwrap();

        assert_eq!(library.crops(STATIC_MODEL, STATIC_ROLE), vec!["default"]);
        let media = library.lookup(STATIC_MODEL, STATIC_ROLE, "default").unwrap();
        assert_eq!(media.uuid, "img/team.jpg");
        assert_eq!(media.filename, "team.jpg");
        assert_eq!(media.alt_text.as_deref(), Some("Team photo"));
        assert_eq!(media.crop_rect, Some(CropRect { x: 0, y: 0, w: 1600, h: 900 }));
        assert_eq!(probe.get_probed(), vec!["/site/img/team.jpg".to_string()]);
    }

    #[test]
    fn ratio_yields_centered_crop() {
        let probe = MockProbe::with(&[("/site/team.jpg", 1600, 900)]);
        let mut image = single("team.jpg");
        image.ratios = StaticRatios::Single(1.0);

        let library = make_library(&probe, &image, None).unwrap();
        let media = library.lookup(STATIC_MODEL, STATIC_ROLE, "default").unwrap();
        assert_eq!(media.crop_rect, Some(CropRect { x: 350, y: 0, w: 900, h: 900 }));
        assert_eq!(media.ratio.as_deref(), Some("1"));
    }

    #[test]
    fn preset_sources_get_their_own_records() {
        let probe = MockProbe::with(&[("/site/wide.jpg", 2000, 1000), ("/site/tall.jpg", 600, 1200)]);
        let image = StaticImage {
            root: PathBuf::from("/site"),
            files: StaticFiles::PerCrop(BTreeMap::from([
                ("desktop".to_string(), PathBuf::from("wide.jpg")),
                ("mobile".to_string(), PathBuf::from("tall.jpg")),
            ])),
            ratios: StaticRatios::PerCrop(BTreeMap::from([("mobile".to_string(), 0.75)])),
            alt: Some("Wide".to_string()),
        };

        let library = make_library(&probe, &image, Some(&preset_with_mobile())).unwrap();
        assert_eq!(library.crops(STATIC_MODEL, STATIC_ROLE), vec!["desktop", "mobile"]);

        let mobile = library.lookup(STATIC_MODEL, STATIC_ROLE, "mobile").unwrap();
        assert_eq!(mobile.uuid, "tall.jpg");
        assert_eq!(mobile.crop_rect, Some(CropRect { x: 0, y: 200, w: 600, h: 800 }));
        // Only the primary carries alt text
        assert_eq!(mobile.alt_text, None);

        let desktop = library.lookup(STATIC_MODEL, STATIC_ROLE, "desktop").unwrap();
        assert_eq!(desktop.crop_rect, Some(CropRect { x: 0, y: 0, w: 2000, h: 1000 }));
    }

    #[test]
    fn missing_file_for_crop_is_invalid_source() {
        let probe = MockProbe::with(&[("/site/wide.jpg", 2000, 1000)]);
        let image = StaticImage {
            root: PathBuf::from("/site"),
            files: StaticFiles::PerCrop(BTreeMap::from([(
                "desktop".to_string(),
                PathBuf::from("wide.jpg"),
            )])),
            ratios: StaticRatios::Native,
            alt: None,
        };
        let err = make_library(&probe, &image, Some(&preset_with_mobile())).unwrap_err();
        assert!(matches!(err, ImageError::InvalidSource(msg) if msg.contains("mobile")));
    }

    #[test]
    fn unreadable_file_is_invalid_source() {
        let probe = MockProbe::default();
        let err = make_library(&probe, &single("gone.png"), None).unwrap_err();
        assert!(matches!(err, ImageError::InvalidSource(_)));
    }

    #[test]
    fn non_positive_ratio_rejected_before_probing() {
        let probe = MockProbe::with(&[("/site/team.jpg", 1600, 900)]);
        let mut image = single("team.jpg");
        image.ratios = StaticRatios::Single(0.0);
        assert!(matches!(
            make_library(&probe, &image, None),
            Err(ImageError::InvalidDimensions(_))
        ));
        assert!(probe.get_probed().is_empty());
    }

    #[test]
    fn zero_sized_file_rejected() {
        let probe = MockProbe::with(&[("/site/empty.gif", 0, 0)]);
        assert!(matches!(
            make_library(&probe, &single("empty.gif"), None),
            Err(ImageError::InvalidDimensions(_))
        ));
    }
}
