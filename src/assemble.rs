//! Presentation assembly: resolved descriptors + render options → the flat
//! attribute set the templates bind to.
//!
//! ## Placeholder and sizer
//!
//! - `needPlaceholder` is true when LQIP is enabled and the image has a
//!   placeholder payload.
//! - `needSizer` follows the sizer mode: `auto` mirrors `needPlaceholder`,
//!   `true` always wraps, `false` never does.
//!
//! Either one renders a wrapper whose inline style ends with an
//! `aspect-ratio` rule, so the box is reserved before any image loads.
//!
//! ## Sources
//!
//! Alternates come first, in declaration order, each as a WebP entry (when
//! WebP variants were resolved) followed by the original format. The primary
//! image is last and carries no media query: it is the fallback.
//!
//! ## Empty keys
//!
//! Serialization omits empty strings, empty lists, `false` flags and absent
//! values. Templates test for key presence, so this is part of the contract.

use crate::styles::{ImageStyles, StyleInputs, StyleMap};
use crate::types::{ImageDescriptor, ResolvedImage, SrcSetCandidate, srcset_attr};
use serde::{Deserialize, Serialize};

/// Wrapper ("sizer") behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SizerRepr", into = "SizerRepr")]
pub enum SizerMode {
    /// Wrap only when a placeholder is shown.
    #[default]
    Auto,
    Always,
    Never,
}

/// Config spelling: `"auto"`, `true` or `false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum SizerRepr {
    Flag(bool),
    Keyword(String),
}

impl TryFrom<SizerRepr> for SizerMode {
    type Error = String;

    fn try_from(repr: SizerRepr) -> Result<Self, Self::Error> {
        match repr {
            SizerRepr::Flag(true) => Ok(SizerMode::Always),
            SizerRepr::Flag(false) => Ok(SizerMode::Never),
            SizerRepr::Keyword(k) if k == "auto" => Ok(SizerMode::Auto),
            SizerRepr::Keyword(k) => Err(format!(
                "image_sizer must be \"auto\", true or false, got \"{k}\""
            )),
        }
    }
}

impl From<SizerMode> for SizerRepr {
    fn from(mode: SizerMode) -> Self {
        match mode {
            SizerMode::Auto => SizerRepr::Keyword("auto".to_string()),
            SizerMode::Always => SizerRepr::Flag(true),
            SizerMode::Never => SizerRepr::Flag(false),
        }
    }
}

/// `<img loading>` value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Loading {
    #[default]
    Lazy,
    Eager,
}

impl Loading {
    pub fn as_str(self) -> &'static str {
        match self {
            Loading::Lazy => "lazy",
            Loading::Eager => "eager",
        }
    }
}

/// Site-wide defaults for options a caller leaves unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderDefaults {
    pub lqip: bool,
    pub image_sizer: SizerMode,
    pub loading: Loading,
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            lqip: true,
            image_sizer: SizerMode::Auto,
            loading: Loading::Lazy,
        }
    }
}

/// Per-render overrides from the template call site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct RenderOptions {
    pub lqip: Option<bool>,
    pub image_sizer: Option<SizerMode>,
    pub loading: Option<Loading>,
    pub sizes: Option<String>,
    pub wrapper_class: Option<String>,
    pub wrapper_styles: Option<StyleMap>,
    pub image_class: Option<String>,
    pub image_styles: Option<StyleMap>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// One `<source>` entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceAttributes {
    pub srcset: String,
    /// Height over width, in percent.
    pub aspect_ratio: f64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_query: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

/// Template-ready attributes of one responsive image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatAttributes {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub alt: String,
    pub aspect_ratio: f64,
    #[serde(skip_serializing_if = "is_zero")]
    pub height: u32,
    pub loading: Loading,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub main_style: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub main_classes: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub main_src: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub main_sources: Vec<SourceAttributes>,
    #[serde(skip_serializing_if = "is_false")]
    pub need_placeholder: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub need_sizer: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder_classes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder_src: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub placeholder_sources: Vec<SourceAttributes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub width: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub wrapper_classes: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub wrapper_styles: String,
}

impl FlatAttributes {
    /// The serialized key/value view handed to template engines.
    pub fn to_json_map(&self) -> serde_json::Result<serde_json::Map<String, serde_json::Value>> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(serde::ser::Error::custom(format!(
                "attributes serialized to {other}, not an object"
            ))),
        }
    }

    /// Wrapper `<div>` is rendered around the images.
    pub fn is_wrapped(&self) -> bool {
        self.need_sizer || self.need_placeholder
    }
}

/// MIME type for a file extension, from a fixed table.
///
/// Unknown extensions return `None`; the browser sniffs the type itself.
pub fn mime_type(extension: &str) -> Option<&'static str> {
    let mime = match extension.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpe" | "jpeg" | "jpg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "ico" => "image/vnd.microsoft.icon",
        "tiff" | "tif" => "image/tiff",
        "svg" | "svgz" => "image/svg+xml",
        "webp" => "image/webp",
        _ => return None,
    };
    Some(mime)
}

/// `aspect-ratio` rule: `100/<height percent>` with two decimals.
pub fn aspect_ratio_rule(aspect_ratio: f64) -> String {
    format!("aspect-ratio: 100/{:.2}", aspect_ratio * 100.0)
}

fn source(
    src_set: &[SrcSetCandidate],
    aspect_ratio: f64,
    mime: Option<&str>,
    media_query: Option<&str>,
) -> SourceAttributes {
    SourceAttributes {
        srcset: srcset_attr(src_set),
        aspect_ratio: aspect_ratio * 100.0,
        mime_type: mime.map(str::to_string),
        media_query: media_query.filter(|q| !q.is_empty()).map(str::to_string),
    }
}

/// WebP entry (when resolved) then the original format.
fn image_sources(image: &ImageDescriptor, media_query: Option<&str>) -> Vec<SourceAttributes> {
    let mut sources = Vec::with_capacity(2);
    if let Some(webp) = &image.src_set_webp {
        sources.push(source(webp, image.aspect_ratio, mime_type("webp"), media_query));
    }
    sources.push(source(
        &image.src_set,
        image.aspect_ratio,
        mime_type(&image.extension),
        media_query,
    ));
    sources
}

pub fn assemble(
    resolved: &ResolvedImage,
    options: &RenderOptions,
    defaults: &RenderDefaults,
) -> FlatAttributes {
    let image = &resolved.image;

    let lqip = options.lqip.unwrap_or(defaults.lqip);
    let placeholder_src = Some(image.lqip.clone()).filter(|src| lqip && !src.is_empty());
    let need_placeholder = placeholder_src.is_some();
    let need_sizer = match options.image_sizer.unwrap_or(defaults.image_sizer) {
        SizerMode::Auto => need_placeholder,
        SizerMode::Always => true,
        SizerMode::Never => false,
    };
    let layered = need_sizer || need_placeholder;

    let styles = ImageStyles::new(
        layered,
        StyleInputs {
            image_class: options.image_class.as_deref(),
            image_styles: options.image_styles.as_ref(),
            wrapper_class: options.wrapper_class.as_deref(),
            wrapper_styles: options.wrapper_styles.as_ref(),
        },
    );

    let wrapper_styles = if layered {
        let rule = aspect_ratio_rule(image.aspect_ratio);
        if styles.wrapper.style.is_empty() {
            rule
        } else {
            format!("{}; {}", styles.wrapper.style, rule)
        }
    } else {
        styles.wrapper.style
    };

    let mut main_sources: Vec<SourceAttributes> = resolved
        .sources
        .iter()
        .flat_map(|alt| image_sources(&alt.image, Some(&alt.media_query)))
        .collect();
    main_sources.extend(image_sources(image, None));

    let placeholder_sources = if need_placeholder {
        resolved
            .sources
            .iter()
            .map(|alt| SourceAttributes {
                srcset: format!("{} 1x", alt.image.lqip),
                aspect_ratio: alt.image.aspect_ratio * 100.0,
                mime_type: mime_type("gif").map(str::to_string),
                media_query: Some(alt.media_query.clone()).filter(|q| !q.is_empty()),
            })
            .collect()
    } else {
        Vec::new()
    };

    FlatAttributes {
        alt: image.alt.clone(),
        aspect_ratio: image.aspect_ratio,
        height: options.height.unwrap_or(image.height),
        loading: options.loading.unwrap_or(defaults.loading),
        main_style: styles.main.style,
        main_classes: styles.main.class,
        main_src: image.src.clone(),
        main_sources,
        need_placeholder,
        need_sizer,
        placeholder_classes: need_placeholder.then_some(styles.placeholder.class),
        placeholder_src,
        placeholder_sources,
        placeholder_style: Some(styles.placeholder.style).filter(|s| need_placeholder && !s.is_empty()),
        sizes: options
            .sizes
            .clone()
            .or_else(|| resolved.sizes.clone())
            .filter(|s| !s.is_empty()),
        width: options.width.unwrap_or(image.width),
        wrapper_classes: styles.wrapper.class,
        wrapper_styles,
    }
}
