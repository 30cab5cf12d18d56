//! Settings module.
//!
//! Handles loading, validating, and merging `picture.toml`. User values are
//! merged over stock defaults, unknown keys are rejected, and the merged
//! result is validated once, at load time. Presets in particular are fully
//! checked here so a render never meets a malformed one.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! webp_support = false      # Also emit WebP <source> entries
//!
//! [render]
//! lqip = true               # Show the low-quality placeholder
//! image_sizer = "auto"      # "auto" (follow lqip), true or false
//! loading = "lazy"          # "lazy" or "eager"
//!
//! [urls]
//! base_url = "/img"         # Root of the image transform service
//!
//! [columns]
//! total = 12
//! breakpoints = [
//!     { name = "xs", min_width = 0 },
//!     { name = "md", min_width = 768 },
//! ]
//!
//! [presets.hero]
//! crop = "default"
//! width = 1600
//! columns = { md = 8 }
//! sources = [{ crop = "mobile", media_query = "(max-width: 767px)" }]
//! ```

use crate::assemble::{Loading, RenderDefaults, SizerMode};
use crate::columns::{ColumnSpec, GridColumns};
use crate::error::ImageError;
use crate::request::{AltSource, ImageRequest, SourceCondition};
use crate::urls::GlideUrls;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Settings file name looked up in a directory.
pub const CONFIG_FILE: &str = "picture.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings loaded from `picture.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Resolve and emit WebP variants next to the original format.
    pub webp_support: bool,
    pub render: RenderConfig,
    pub urls: UrlsConfig,
    pub columns: GridColumns,
    /// Named request bundles, applied with [`ImageRequest::preset`].
    pub presets: BTreeMap<String, Preset>,
}

/// Defaults for options the template call site leaves unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub lqip: bool,
    pub image_sizer: SizerMode,
    pub loading: Loading,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let defaults = RenderDefaults::default();
        Self {
            lqip: defaults.lqip,
            image_sizer: defaults.image_sizer,
            loading: defaults.loading,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UrlsConfig {
    pub base_url: String,
}

impl Default for UrlsConfig {
    fn default() -> Self {
        Self {
            base_url: "/img".to_string(),
        }
    }
}

/// A named bundle of request fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Preset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<ColumnSpec>,
    #[serde(alias = "srcSetWidths", skip_serializing_if = "Vec::is_empty")]
    pub src_set_widths: Vec<u32>,
    /// Already validated on deserialization.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<AltSource>,
}

impl ImageRequest {
    /// Apply every field the preset sets; unset fields keep their value.
    pub fn preset(self, preset: &Preset) -> Self {
        let mut request = self;
        if let Some(crop) = &preset.crop {
            request = request.crop(crop.clone());
        }
        if let Some(width) = preset.width {
            request = request.width(width);
        }
        if let Some(height) = preset.height {
            request = request.height(height);
        }
        if let Some(sizes) = &preset.sizes {
            request = request.sizes(sizes.clone());
        }
        if let Some(columns) = &preset.columns {
            request = request.columns(columns.clone());
        }
        if !preset.sources.is_empty() {
            request = request.sources(preset.sources.clone());
        }
        if !preset.src_set_widths.is_empty() {
            request = request.src_set_widths(preset.src_set_widths.clone());
        }
        request
    }
}

impl Settings {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns.total == 0 {
            return Err(ConfigError::Validation(
                "columns.total must be non-zero".into(),
            ));
        }
        let mut names = HashSet::new();
        for bp in &self.columns.breakpoints {
            if !names.insert(bp.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "columns.breakpoints: duplicate breakpoint '{}'",
                    bp.name
                )));
            }
        }
        if self.urls.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "urls.base_url must not be empty".into(),
            ));
        }
        for (name, preset) in &self.presets {
            self.validate_preset(preset)
                .map_err(|e| ConfigError::Validation(format!("presets.{name}: {e}")))?;
        }
        Ok(())
    }

    fn validate_preset(&self, preset: &Preset) -> Result<(), ImageError> {
        if preset.sizes.is_some() && preset.columns.is_some() {
            return Err(ImageError::InvalidPreset(
                "sizes and columns are mutually exclusive".into(),
            ));
        }
        if preset.width == Some(0) || preset.height == Some(0) {
            return Err(ImageError::InvalidPreset(
                "width and height must be non-zero".into(),
            ));
        }
        if preset.src_set_widths.contains(&0) {
            return Err(ImageError::InvalidPreset(
                "src_set_widths must be non-zero".into(),
            ));
        }
        if let Some(columns) = &preset.columns {
            self.columns.check(columns)?;
        }
        for source in &preset.sources {
            if let SourceCondition::Columns(columns) = &source.condition {
                self.columns.check(columns)?;
            }
            if source.width == Some(0)
                || source.height == Some(0)
                || source.src_set_widths.contains(&0)
            {
                return Err(ImageError::InvalidPreset(format!(
                    "source '{}' has a zero dimension",
                    source.crop
                )));
            }
        }
        Ok(())
    }

    /// Look up a preset by name.
    pub fn preset(&self, name: &str) -> Result<&Preset, ImageError> {
        self.presets.get(name).ok_or_else(|| {
            let known: Vec<&str> = self.presets.keys().map(String::as_str).collect();
            ImageError::InvalidPreset(format!("unknown preset '{name}'. Available: {known:?}"))
        })
    }

    pub fn render_defaults(&self) -> RenderDefaults {
        RenderDefaults {
            lqip: self.render.lqip,
            image_sizer: self.render.image_sizer,
            loading: self.render.loading,
        }
    }

    pub fn url_builder(&self) -> GlideUrls {
        GlideUrls::new(self.urls.base_url.clone())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(Settings::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `picture.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<Settings, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let settings: Settings = merged.try_into()?;
    settings.validate()?;
    Ok(settings)
}

/// Load settings from `picture.toml` in the given directory.
pub fn load_config(dir: &Path) -> Result<Settings, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// Returns a fully-commented stock `picture.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Responsive Picture Configuration
# ================================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Also resolve WebP variants and emit them as extra <source> entries.
webp_support = false

# ---------------------------------------------------------------------------
# Render defaults (each can be overridden per render)
# ---------------------------------------------------------------------------
[render]
# Show a low-quality placeholder while the image loads.
lqip = true

# Wrap the image in an aspect-ratio box:
#   "auto" = only when a placeholder is shown, true = always, false = never.
image_sizer = "auto"

# <img loading> attribute: "lazy" or "eager".
loading = "lazy"

# ---------------------------------------------------------------------------
# Image transform service
# ---------------------------------------------------------------------------
[urls]
base_url = "/img"

# ---------------------------------------------------------------------------
# Column grid used by `columns` specs in requests and presets
# ---------------------------------------------------------------------------
[columns]
total = 12
breakpoints = [
    { name = "xs", min_width = 0 },
    { name = "sm", min_width = 640 },
    { name = "md", min_width = 768 },
    { name = "lg", min_width = 1024 },
    { name = "xl", min_width = 1280 },
]

# ---------------------------------------------------------------------------
# Presets: named request bundles
# ---------------------------------------------------------------------------
# [presets.hero]
# crop = "default"
# width = 1600
# columns = { md = 8, xl = 6 }        # or: sizes = "(min-width: 768px) 66vw, 100vw"
# src_set_widths = [400, 800, 1200, 1600]
# sources = [
#     { crop = "mobile", media_query = "(max-width: 767px)", width = 800 },
# ]
"##
}
