//! Pure Rust dimension probe.
//!
//! Uses `image::image_dimensions`, which reads only the header of JPEG, PNG,
//! GIF, TIFF and WebP files. No pixels are decoded.

use super::backend::{DimensionProbe, Dimensions, ProbeError};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct RustProbe;

impl RustProbe {
    pub fn new() -> Self {
        Self
    }
}

impl DimensionProbe for RustProbe {
    fn identify(&self, path: &Path) -> Result<Dimensions, ProbeError> {
        if !path.exists() {
            return Err(ProbeError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )));
        }
        let (width, height) =
            image::image_dimensions(path).map_err(|e| ProbeError::Unreadable {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(Dimensions { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageEncoder, RgbImage};

    /// Create a small valid PNG file with the given dimensions.
    fn create_test_png(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let file = std::fs::File::create(path).unwrap();
        let writer = std::io::BufWriter::new(file);
        image::codecs::png::PngEncoder::new(writer)
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
    }

    #[test]
    fn identify_synthetic_png() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.png");
        create_test_png(&path, 200, 150);

        let dims = RustProbe::new().identify(&path).unwrap();
        assert_eq!(dims.width, 200);
        assert_eq!(dims.height, 150);
    }

    #[test]
    fn identify_missing_file_is_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let result = RustProbe::new().identify(&tmp.path().join("nope.png"));
        assert!(matches!(result, Err(ProbeError::Io(_))));
    }

    #[test]
    fn identify_garbage_is_unreadable() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("fake.png");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let result = RustProbe::new().identify(&path);
        assert!(matches!(result, Err(ProbeError::Unreadable { .. })));
    }
}
