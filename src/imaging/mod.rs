//! Image dimension math and the parameters handed to the transform service.
//!
//! | Concern | Where |
//! |---|---|
//! | **Descriptor** (target size, ratio, srcset widths) | [`build_descriptor`] |
//! | **Centered crop** for static files | [`calc_crop`] |
//! | **Variant URL parameters** | [`UrlParams`] |
//! | **Header probe** | `image::image_dimensions` via [`RustProbe`] |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing one image variant
//! - **Backend**: [`DimensionProbe`] trait + [`RustProbe`]

pub mod backend;
mod calculations;
mod params;
pub mod rust_backend;

pub use backend::{DimensionProbe, Dimensions, ProbeError};
pub use calculations::{
    AUTO_WIDTHS_RATIO, Candidate, DEFAULT_WIDTH, Descriptor, build_descriptor, calc_crop,
    width_range,
};
pub use params::{Fit, Format, UrlParams};
pub use rust_backend::RustProbe;
