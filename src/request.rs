//! What to render: the per-call request value and its alternate sources.
//!
//! An [`ImageRequest`] is built once per render with consuming builder
//! methods:
//!
//! ```
//! use responsive_picture::{AltSource, ImageRequest, SourceCondition};
//!
//! # fn main() -> responsive_picture::Result<()> {
//! let request = ImageRequest::new("article:12", "cover")
//!     .crop("default")
//!     .width(1200)
//!     .sizes("(min-width: 1024px) 50vw, 100vw")
//!     .sources(vec![AltSource::new(
//!         "mobile",
//!         SourceCondition::MediaQuery("(max-width: 767px)".into()),
//!     )?]);
//! # Ok(())
//! # }
//! ```
//!
//! Alternate sources coming from untyped input (presets, JSON) arrive as
//! [`SourceSpec`] and are validated eagerly into [`AltSource`], so a
//! malformed source fails before any resolution work starts.

use crate::columns::ColumnSpec;
use crate::error::{ImageError, Result};
use serde::{Deserialize, Serialize};

/// Where an alternate `<source>` applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceCondition {
    MediaQuery(String),
    /// Translated to a media query by the column translator.
    Columns(ColumnSpec),
}

/// How the `sizes` attribute is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizesSpec {
    Literal(String),
    Columns(ColumnSpec),
}

/// Untyped alternate source, as written in presets or JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<String>,
    #[serde(default, alias = "mediaQuery", skip_serializing_if = "Option::is_none")]
    pub media_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<ColumnSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, alias = "srcSetWidths", skip_serializing_if = "Vec::is_empty")]
    pub src_set_widths: Vec<u32>,
}

/// An alternate crop rendered as a `<source>` ahead of the fallback image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SourceSpec", into = "SourceSpec")]
pub struct AltSource {
    pub crop: String,
    pub condition: SourceCondition,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub src_set_widths: Vec<u32>,
}

impl AltSource {
    /// A blank crop name or a blank media query is `InvalidSource`.
    pub fn new(crop: impl Into<String>, condition: SourceCondition) -> Result<Self> {
        let crop = crop.into();
        check_crop(&crop)?;
        if matches!(&condition, SourceCondition::MediaQuery(query) if query.trim().is_empty()) {
            return Err(ImageError::InvalidSource(format!(
                "source '{crop}' has an empty media query"
            )));
        }
        Ok(Self {
            crop,
            condition,
            width: None,
            height: None,
            src_set_widths: Vec::new(),
        })
    }

    pub fn width(self, width: u32) -> Self {
        Self {
            width: Some(width),
            ..self
        }
    }

    pub fn height(self, height: u32) -> Self {
        Self {
            height: Some(height),
            ..self
        }
    }

    pub fn src_set_widths(self, widths: Vec<u32>) -> Self {
        Self {
            src_set_widths: widths,
            ..self
        }
    }
}

fn check_crop(crop: &str) -> Result<()> {
    if crop.trim().is_empty() {
        return Err(ImageError::InvalidSource(
            "crop name is mandatory in sources".into(),
        ));
    }
    Ok(())
}

impl TryFrom<SourceSpec> for AltSource {
    type Error = ImageError;

    /// A literal media query wins over a column spec when both are given.
    fn try_from(spec: SourceSpec) -> Result<Self> {
        let crop = spec.crop.unwrap_or_default();
        check_crop(&crop)?;
        let condition = match (spec.media_query, spec.columns) {
            (Some(query), _) if !query.trim().is_empty() => SourceCondition::MediaQuery(query),
            (_, Some(columns)) => SourceCondition::Columns(columns),
            _ => {
                return Err(ImageError::InvalidSource(format!(
                    "source '{crop}' needs a media query or a columns spec"
                )));
            }
        };
        let mut source = Self::new(crop, condition)?;
        source.width = spec.width;
        source.height = spec.height;
        source.src_set_widths = spec.src_set_widths;
        Ok(source)
    }
}

impl From<AltSource> for SourceSpec {
    fn from(source: AltSource) -> Self {
        let (media_query, columns) = match source.condition {
            SourceCondition::MediaQuery(q) => (Some(q), None),
            SourceCondition::Columns(c) => (None, Some(c)),
        };
        Self {
            crop: Some(source.crop),
            media_query,
            columns,
            width: source.width,
            height: source.height,
            src_set_widths: source.src_set_widths,
        }
    }
}

/// A request to render one image role of one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub(crate) model: String,
    pub(crate) role: String,
    pub(crate) crop: Option<String>,
    pub(crate) width: Option<u32>,
    pub(crate) height: Option<u32>,
    pub(crate) src_set_widths: Vec<u32>,
    pub(crate) sizes: Option<SizesSpec>,
    pub(crate) sources: Vec<AltSource>,
}

impl ImageRequest {
    pub fn new(model: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            role: role.into(),
            crop: None,
            width: None,
            height: None,
            src_set_widths: Vec::new(),
            sizes: None,
            sources: Vec::new(),
        }
    }

    pub fn crop(mut self, crop: impl Into<String>) -> Self {
        self.crop = Some(crop.into());
        self
    }

    /// Fixed width, or max width when the layout scales the image down.
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn sizes(mut self, sizes: impl Into<String>) -> Self {
        self.sizes = Some(SizesSpec::Literal(sizes.into()));
        self
    }

    /// Derive `sizes` from a column layout instead of a literal string.
    pub fn columns(mut self, columns: ColumnSpec) -> Self {
        self.sizes = Some(SizesSpec::Columns(columns));
        self
    }

    pub fn src_set_widths(mut self, widths: Vec<u32>) -> Self {
        self.src_set_widths = widths;
        self
    }

    pub fn sources(mut self, sources: Vec<AltSource>) -> Self {
        self.sources = sources;
        self
    }

    /// Validate untyped sources up front; nothing is kept on failure.
    pub fn source_specs(self, specs: Vec<SourceSpec>) -> Result<Self> {
        let sources = specs
            .into_iter()
            .map(AltSource::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(self.sources(sources))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn requested_crop(&self) -> Option<&str> {
        self.crop.as_deref()
    }
}
