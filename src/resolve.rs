//! Source resolution: request → descriptors with URLs.
//!
//! The resolver owns no state. It is handed three collaborators — media
//! lookup, URL builder, column translator — and turns one [`ImageRequest`]
//! into a [`ResolvedImage`]:
//!
//! 1. Translate every alternate's condition into a media query and the
//!    request's `sizes` spec into a string. Bad column specs fail here,
//!    before any media is looked up.
//! 2. Resolve the primary image: pick the crop, look up the media, build the
//!    descriptor, ask the URL builder for `src` and every `srcset` candidate.
//! 3. Resolve the alternates the same way. They are independent, so they run
//!    on rayon's pool; collecting into `Result<Vec<_>>` keeps declaration
//!    order and drops everything if any one fails.

use crate::columns::ColumnTranslator;
use crate::error::{ImageError, Result};
use crate::imaging::{Format, UrlParams, build_descriptor};
use crate::media::{MediaLookup, select_crop};
use crate::request::{ImageRequest, SizesSpec, SourceCondition};
use crate::types::{ImageDescriptor, MediaReference, ResolvedImage, ResolvedSource, SrcSetCandidate};
use crate::urls::UrlBuilder;
use rayon::prelude::*;

pub struct Resolver<'a> {
    lookup: &'a dyn MediaLookup,
    urls: &'a dyn UrlBuilder,
    columns: &'a dyn ColumnTranslator,
    webp: bool,
}

/// Which crop and box to describe.
struct Target<'r> {
    crop: Option<&'r str>,
    width: Option<u32>,
    height: Option<u32>,
    widths: &'r [u32],
}

impl<'a> Resolver<'a> {
    pub fn new(
        lookup: &'a dyn MediaLookup,
        urls: &'a dyn UrlBuilder,
        columns: &'a dyn ColumnTranslator,
    ) -> Self {
        Self {
            lookup,
            urls,
            columns,
            webp: false,
        }
    }

    /// Also produce WebP `src`/`srcset` variants.
    pub fn webp(self, enabled: bool) -> Self {
        Self {
            webp: enabled,
            ..self
        }
    }

    pub fn resolve(&self, request: &ImageRequest) -> Result<ResolvedImage> {
        let media_queries = request
            .sources
            .iter()
            .map(|source| self.media_query(&source.condition))
            .collect::<Result<Vec<_>>>()?;

        let sizes = match &request.sizes {
            Some(SizesSpec::Literal(sizes)) => Some(sizes.clone()),
            Some(SizesSpec::Columns(spec)) => Some(self.columns.sizes(spec)?),
            None => None,
        };

        let image = self.describe(
            request,
            Target {
                crop: request.crop.as_deref(),
                width: request.width,
                height: request.height,
                widths: &request.src_set_widths,
            },
        )?;

        let sources = request
            .sources
            .par_iter()
            .zip(media_queries.into_par_iter())
            .map(|(source, media_query)| {
                let image = self.describe(
                    request,
                    Target {
                        crop: Some(&source.crop),
                        width: source.width,
                        height: source.height,
                        widths: &source.src_set_widths,
                    },
                )?;
                Ok(ResolvedSource { media_query, image })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ResolvedImage {
            image,
            sizes,
            sources,
        })
    }

    fn media_query(&self, condition: &SourceCondition) -> Result<String> {
        match condition {
            SourceCondition::MediaQuery(query) => Ok(query.clone()),
            SourceCondition::Columns(spec) => self.columns.media_query(spec),
        }
    }

    fn describe(&self, request: &ImageRequest, target: Target<'_>) -> Result<ImageDescriptor> {
        let crop = match target.crop {
            Some(crop) => crop.to_string(),
            None => select_crop(
                &request.role,
                &self.lookup.crops(&request.model, &request.role),
            )?,
        };

        let media = self
            .lookup
            .lookup(&request.model, &request.role, &crop)
            .ok_or_else(|| ImageError::MediaNotFound {
                role: request.role.clone(),
                crop: crop.clone(),
            })?;

        let descriptor = build_descriptor(
            media.base_dimensions(),
            target.width,
            target.height,
            target.widths,
        )?;

        let fixed = descriptor.fixed_height;
        // `src` reuses the srcset candidate of the same width when there is one
        let urls_for = |format: Option<Format>| {
            let src_set = descriptor
                .candidates
                .iter()
                .map(|c| SrcSetCandidate {
                    url: self.url(&media, c.width, fixed.then_some(c.height), format),
                    width: c.width,
                })
                .collect::<Vec<_>>();
            let src = match src_set.iter().find(|c| c.width == descriptor.width) {
                Some(candidate) => candidate.url.clone(),
                None => self.url(
                    &media,
                    descriptor.width,
                    fixed.then_some(descriptor.height),
                    format,
                ),
            };
            (src, src_set)
        };

        let (src, src_set) = urls_for(None);
        let (src_webp, src_set_webp) = if self.webp {
            let (src, src_set) = urls_for(Some(Format::Webp));
            (Some(src), Some(src_set))
        } else {
            (None, None)
        };

        Ok(ImageDescriptor {
            src,
            src_set,
            src_webp,
            src_set_webp,
            width: descriptor.width,
            height: descriptor.height,
            aspect_ratio: descriptor.aspect_ratio,
            alt: media.alt_text.clone().unwrap_or_default(),
            caption: media.caption.clone().unwrap_or_default(),
            crop,
            extension: media.extension().to_string(),
            lqip: media
                .lqip_data
                .clone()
                .unwrap_or_else(|| self.urls.transparent_fallback_url()),
            ratio: media.ratio.clone(),
        })
    }

    fn url(
        &self,
        media: &MediaReference,
        width: u32,
        height: Option<u32>,
        format: Option<Format>,
    ) -> String {
        let params = UrlParams::sized(width, height).with_format(format);
        self.urls
            .url_for(&media.uuid, media.crop_rect.as_ref(), &params)
    }
}
