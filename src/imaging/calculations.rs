//! Pure calculation functions for responsive image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use crate::error::{ImageError, Result};
use crate::types::CropRect;

/// Target width used when the request does not ask for one.
pub const DEFAULT_WIDTH: u32 = 1000;

/// Synthesized candidates never exceed `target_width * AUTO_WIDTHS_RATIO`.
pub const AUTO_WIDTHS_RATIO: f64 = 2.5;

/// A single `srcset` candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub width: u32,
    pub height: u32,
}

/// Dimensions and candidate list for one rendered image.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    pub width: u32,
    pub height: u32,
    /// Height over width.
    pub aspect_ratio: f64,
    /// True when the caller asked for a fixed height, i.e. the transform
    /// service must crop rather than scale.
    pub fixed_height: bool,
    pub candidates: Vec<Candidate>,
}

impl Descriptor {
    /// Height for an arbitrary width, derived from the descriptor's ratio.
    pub fn height_for(&self, width: u32) -> u32 {
        height_for(width, self.aspect_ratio)
    }
}

fn height_for(width: u32, aspect_ratio: f64) -> u32 {
    (width as f64 * aspect_ratio).round() as u32
}

/// Build the descriptor for a base image and an optional target box.
///
/// # Arguments
/// * `base` - Source dimensions (width, height), usually the stored crop size
/// * `target_width` - Display width, defaults to `min(base width, 1000)`
/// * `target_height` - Fixed display height; changes the aspect ratio
/// * `explicit_widths` - Candidate widths used verbatim when non-empty
///
/// # Examples
/// ```
/// # use responsive_picture::imaging::build_descriptor;
/// let d = build_descriptor((2000, 1000), None, None, &[]).unwrap();
/// assert_eq!((d.width, d.height), (1000, 500));
/// assert_eq!(d.aspect_ratio, 0.5);
/// ```
pub fn build_descriptor(
    base: (u32, u32),
    target_width: Option<u32>,
    target_height: Option<u32>,
    explicit_widths: &[u32],
) -> Result<Descriptor> {
    let (base_w, base_h) = base;
    if base_w == 0 || base_h == 0 {
        return Err(ImageError::InvalidDimensions(format!(
            "base image is {base_w}x{base_h}"
        )));
    }
    if target_width == Some(0) || target_height == Some(0) {
        return Err(ImageError::InvalidDimensions(
            "target width and height must be non-zero".into(),
        ));
    }
    if explicit_widths.contains(&0) {
        return Err(ImageError::InvalidDimensions(
            "srcset widths must be non-zero".into(),
        ));
    }

    let width = target_width.unwrap_or_else(|| base_w.min(DEFAULT_WIDTH));
    let aspect_ratio = match target_height {
        Some(h) => h as f64 / width as f64,
        None => base_h as f64 / base_w as f64,
    };
    let height = target_height.unwrap_or_else(|| height_for(width, aspect_ratio));

    let widths = if explicit_widths.is_empty() {
        width_range(width)
    } else {
        explicit_widths.to_vec()
    };

    let candidates = widths
        .into_iter()
        .map(|w| Candidate {
            width: w,
            height: height_for(w, aspect_ratio),
        })
        .collect();

    Ok(Descriptor {
        width,
        height,
        aspect_ratio,
        fixed_height: target_height.is_some(),
        candidates,
    })
}

/// Synthesize candidate widths for a target width.
///
/// Dense steps of 250 up to 1250, coarse steps of 500 from 1500 to 10000,
/// capped at `target_width * 2.5`. The result is strictly ascending.
pub fn width_range(target_width: u32) -> Vec<u32> {
    let limit = target_width as f64 * AUTO_WIDTHS_RATIO;
    let start = target_width.min(250);

    (start..=1250)
        .step_by(250)
        .chain((1500..=10_000).step_by(500))
        .filter(|&w| w as f64 <= limit)
        .collect()
}

/// Centered crop rectangle that gives `input` the requested ratio.
///
/// `ratio` is width over height. Without a ratio the whole image is kept.
/// Mirrors how a fill-crop trims the longer axis evenly on both sides.
pub fn calc_crop(input: (u32, u32), ratio: Option<f64>) -> CropRect {
    let (in_w, in_h) = input;
    let input_ratio = in_w as f64 / in_h as f64;
    let output_ratio = ratio.unwrap_or(input_ratio);

    let (mut out_w, mut out_h) = (in_w as f64, in_h as f64);
    if input_ratio > output_ratio {
        // Input is wider: trim left and right
        out_w = in_h as f64 * output_ratio;
    } else if input_ratio < output_ratio {
        // Input is taller: trim top and bottom
        out_h = in_w as f64 / output_ratio;
    }

    let out_w = out_w.round() as u32;
    let out_h = out_h.round() as u32;

    CropRect {
        x: (in_w - out_w) / 2,
        y: (in_h - out_h) / 2,
        w: out_w,
        h: out_h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // width_range tests
    // =========================================================================

    #[test]
    fn range_for_default_width() {
        assert_eq!(
            width_range(1000),
            vec![250, 500, 750, 1000, 1250, 1500, 2000, 2500]
        );
    }

    #[test]
    fn range_caps_small_targets() {
        // 300 * 2.5 = 750
        assert_eq!(width_range(300), vec![250, 500, 750]);
    }

    #[test]
    fn range_starts_below_250_for_tiny_targets() {
        // start at 100, step 250, cap at 250
        assert_eq!(width_range(100), vec![100]);
        assert_eq!(width_range(200), vec![200, 450]);
    }

    #[test]
    fn range_tops_out_at_10000() {
        let range = width_range(8000);
        assert_eq!(range.last(), Some(&10_000));
        assert_eq!(range.first(), Some(&250));
    }

    #[test]
    fn range_is_strictly_ascending_and_bounded() {
        for target in [1, 50, 249, 250, 251, 333, 999, 1000, 1777, 4000, 12_000] {
            let range = width_range(target);
            assert!(!range.is_empty(), "empty range for {target}");
            assert!(
                range.windows(2).all(|pair| pair[0] < pair[1]),
                "not ascending for {target}: {range:?}"
            );
            assert!(
                range.iter().all(|&w| w as f64 <= target as f64 * 2.5),
                "over limit for {target}: {range:?}"
            );
        }
    }

    // =========================================================================
    // build_descriptor tests
    // =========================================================================

    #[test]
    fn default_target_is_capped_at_1000() {
        let d = build_descriptor((2000, 1000), None, None, &[]).unwrap();
        assert_eq!(d.width, 1000);
        assert_eq!(d.height, 500);
        assert_eq!(d.aspect_ratio, 0.5);
        assert!(!d.fixed_height);
    }

    #[test]
    fn default_target_uses_small_base_width() {
        let d = build_descriptor((640, 480), None, None, &[]).unwrap();
        assert_eq!(d.width, 640);
        assert_eq!(d.height, 480);
    }

    #[test]
    fn target_height_sets_ratio() {
        let d = build_descriptor((2000, 1000), Some(800), Some(800), &[]).unwrap();
        assert_eq!(d.aspect_ratio, 1.0);
        assert_eq!(d.height, 800);
        assert!(d.fixed_height);
        assert!(d.candidates.iter().all(|c| c.width == c.height));
    }

    #[test]
    fn explicit_widths_used_verbatim() {
        let d = build_descriptor((1600, 900), Some(800), None, &[1200, 400, 800]).unwrap();
        let widths: Vec<u32> = d.candidates.iter().map(|c| c.width).collect();
        assert_eq!(widths, vec![1200, 400, 800]);
    }

    #[test]
    fn candidate_heights_follow_ratio() {
        let d = build_descriptor((1600, 900), Some(700), None, &[]).unwrap();
        for c in &d.candidates {
            let ratio = c.height as f64 / c.width as f64;
            assert!(
                (ratio - d.aspect_ratio).abs() <= 1.0 / c.width as f64,
                "{c:?} drifts from {}",
                d.aspect_ratio
            );
        }
    }

    #[test]
    fn target_300_excludes_wide_candidates() {
        let d = build_descriptor((3000, 2000), Some(300), None, &[]).unwrap();
        assert!(d.candidates.iter().all(|c| c.width <= 750));
    }

    #[test]
    fn zero_base_is_invalid() {
        assert!(matches!(
            build_descriptor((0, 100), None, None, &[]),
            Err(ImageError::InvalidDimensions(_))
        ));
        assert!(matches!(
            build_descriptor((100, 0), None, None, &[]),
            Err(ImageError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn zero_target_is_invalid() {
        assert!(build_descriptor((100, 100), Some(0), None, &[]).is_err());
        assert!(build_descriptor((100, 100), None, Some(0), &[]).is_err());
        assert!(build_descriptor((100, 100), None, None, &[0, 200]).is_err());
    }

    #[test]
    fn height_for_rounds() {
        let d = build_descriptor((3, 2), Some(3), None, &[]).unwrap();
        // 2/3 ratio: 250 * 0.666.. = 166.67 → 167
        assert_eq!(d.height_for(250), 167);
    }

    // =========================================================================
    // calc_crop tests
    // =========================================================================

    #[test]
    fn crop_without_ratio_keeps_full_image() {
        assert_eq!(
            calc_crop((1200, 800), None),
            CropRect { x: 0, y: 0, w: 1200, h: 800 }
        );
    }

    #[test]
    fn crop_wide_input_to_square() {
        assert_eq!(
            calc_crop((1200, 800), Some(1.0)),
            CropRect { x: 200, y: 0, w: 800, h: 800 }
        );
    }

    #[test]
    fn crop_tall_input_to_landscape() {
        // 800x1200 → 16:9 = 800x450, centered vertically
        assert_eq!(
            calc_crop((800, 1200), Some(16.0 / 9.0)),
            CropRect { x: 0, y: 375, w: 800, h: 450 }
        );
    }
}
