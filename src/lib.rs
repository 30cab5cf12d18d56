//! # Responsive Picture
//!
//! Builds responsive `<picture>` markup for images stored in a media library
//! and served through an on-the-fly transform service. Given a model, an image
//! role and a few layout hints, it works out which crop to use, which widths
//! to offer, what every candidate URL looks like, and how the placeholder and
//! wrapper are styled.
//!
//! # Architecture: Three-Step Render
//!
//! ```text
//! 1. Resolve   ImageRequest   →  ResolvedImage    (crops, dimensions, URLs)
//! 2. Assemble  ResolvedImage  →  FlatAttributes   (sources, styles, flags)
//! 3. Render    FlatAttributes →  HTML             (maud)
//! ```
//!
//! Each step is a pure function of its input plus injected collaborators, so
//! every step can be tested on its own. Templates that do their own HTML can
//! stop after step 2 and bind [`FlatAttributes::to_json_map`] directly.
//!
//! ```
//! use responsive_picture::{
//!     GlideUrls, GridColumns, ImageRequest, MediaLibrary, RenderDefaults,
//!     RenderOptions, Resolver, assemble, markup,
//! };
//!
//! let library = MediaLibrary::from_json(r#"[
//!     {"model": "page:1", "role": "hero", "crop": "default",
//!      "uuid": "a/hero.jpg", "filename": "hero.jpg", "width": 2400, "height": 1600}
//! ]"#).unwrap();
//!
//! let urls = GlideUrls::new("/img");
//! let resolved = Resolver::new(&library, &urls, &GridColumns::default())
//!     .resolve(&ImageRequest::new("page:1", "hero").width(800))
//!     .unwrap();
//! let attrs = assemble(&resolved, &RenderOptions::default(), &RenderDefaults::default());
//! let html = markup::render(&attrs).into_string();
//! assert!(html.contains("/img/a/hero.jpg?w=800"));
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`request`] | `ImageRequest` builder and alternate sources |
//! | [`resolve`] | Step 1: crop selection, descriptors, URLs |
//! | [`imaging`] | Descriptor math, URL parameters, dimension probing |
//! | [`media`] | Media lookup trait and the in-memory `MediaLibrary` |
//! | [`urls`] | URL builder trait and the Glide-style implementation |
//! | [`columns`] | Column grid: column specs → media queries and `sizes` |
//! | [`assemble`] | Step 2: template-ready attribute set |
//! | [`styles`] | Classes and inline styles of wrapper, placeholder, image |
//! | [`markup`] | Step 3: HTML with maud |
//! | [`static_image`] | Media records for local files |
//! | [`config`] | `picture.toml` loading, validation, presets |
//! | [`output`] | CLI output formatting |
//! | [`types`] | Shared data: media references, descriptors |
//! | [`error`] | The single error type of the render path |
//!
//! # Design Decisions
//!
//! ## Collaborators Are Traits
//!
//! Media lookup, URL building and column translation are reached through
//! [`MediaLookup`], [`UrlBuilder`] and [`ColumnTranslator`]. The resolver
//! owns none of them. Swapping the transform service or the storage backend
//! is a new trait impl, not a change to the resolver.
//!
//! ## All-or-Nothing Resolution
//!
//! A request either resolves completely or fails with an [`ImageError`].
//! There is no partially rendered picture: a bad alternate source fails the
//! whole render, which surfaces content mistakes early.
//!
//! ## Parallel Alternates
//!
//! Alternate sources are independent lookups, so they are resolved on rayon's
//! pool. Results keep declaration order.

pub mod assemble;
pub mod columns;
pub mod config;
pub mod error;
pub mod imaging;
pub mod markup;
pub mod media;
pub mod output;
pub mod request;
pub mod resolve;
pub mod static_image;
pub mod styles;
pub mod types;
pub mod urls;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use assemble::{FlatAttributes, Loading, RenderDefaults, RenderOptions, SizerMode, assemble};
pub use columns::{ColumnSpec, ColumnTranslator, GridColumns};
pub use config::{Preset, Settings};
pub use error::{ImageError, Result};
pub use media::{MediaLibrary, MediaLookup, MediaRecord};
pub use request::{AltSource, ImageRequest, SizesSpec, SourceCondition, SourceSpec};
pub use resolve::Resolver;
pub use types::{ImageDescriptor, MediaReference, ResolvedImage, ResolvedSource};
pub use urls::{GlideUrls, UrlBuilder};
