//! Column-breakpoint translation.
//!
//! Layouts often describe an image's rendered size as "spans 6 of 12 columns
//! from `md` up". A [`ColumnSpec`] captures that per breakpoint, and a
//! [`ColumnTranslator`] turns it into the two strings the browser needs: a
//! `media` query for `<source>` selection and a `sizes` attribute.
//!
//! [`GridColumns`] is the default translator, driven by the `[columns]`
//! section of the config:
//!
//! ```text
//! { md = 6, xl = 4 }  →  sizes  "(min-width: 1280px) 33.33vw, (min-width: 768px) 50vw, 100vw"
//!                      →  media  "(min-width: 768px)"
//! ```

use crate::error::{ImageError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of grid columns spanned, keyed by breakpoint name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSpec(pub BTreeMap<String, u32>);

impl ColumnSpec {
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(name, cols)| (name.to_string(), cols))
                .collect(),
        )
    }

    pub fn get(&self, breakpoint: &str) -> Option<u32> {
        self.0.get(breakpoint).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Translates column specs into media queries and `sizes` values.
pub trait ColumnTranslator: Sync {
    fn media_query(&self, spec: &ColumnSpec) -> Result<String>;

    fn sizes(&self, spec: &ColumnSpec) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Breakpoint {
    pub name: String,
    /// Viewport width in CSS pixels at which the breakpoint starts.
    pub min_width: u32,
}

/// A fixed-column grid with named breakpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridColumns {
    /// Columns in a full-width row.
    pub total: u32,
    pub breakpoints: Vec<Breakpoint>,
}

impl Default for GridColumns {
    fn default() -> Self {
        let bp = |name: &str, min_width| Breakpoint {
            name: name.to_string(),
            min_width,
        };
        Self {
            total: 12,
            breakpoints: vec![
                bp("xs", 0),
                bp("sm", 640),
                bp("md", 768),
                bp("lg", 1024),
                bp("xl", 1280),
            ],
        }
    }
}

impl GridColumns {
    /// Check that `spec` only names known breakpoints and fits the grid.
    pub fn check(&self, spec: &ColumnSpec) -> Result<()> {
        if spec.is_empty() {
            return Err(ImageError::InvalidColumns(
                "column spec names no breakpoint".into(),
            ));
        }
        for (name, &cols) in &spec.0 {
            if self.breakpoint(name).is_none() {
                return Err(ImageError::InvalidColumns(format!(
                    "unknown breakpoint '{name}'"
                )));
            }
            if cols == 0 || cols > self.total {
                return Err(ImageError::InvalidColumns(format!(
                    "'{name}' spans {cols} columns, grid has {}",
                    self.total
                )));
            }
        }
        Ok(())
    }

    fn breakpoint(&self, name: &str) -> Option<&Breakpoint> {
        self.breakpoints.iter().find(|b| b.name == name)
    }

    /// Breakpoints named in `spec`, widest first.
    fn named_descending<'a>(&'a self, spec: &ColumnSpec) -> Vec<(&'a Breakpoint, u32)> {
        let mut named: Vec<_> = self
            .breakpoints
            .iter()
            .filter_map(|b| spec.get(&b.name).map(|cols| (b, cols)))
            .collect();
        named.sort_by(|a, b| b.0.min_width.cmp(&a.0.min_width));
        named
    }

    fn viewport_width(&self, cols: u32) -> String {
        let vw = format!("{:.2}", cols as f64 * 100.0 / self.total as f64);
        let vw = vw.trim_end_matches('0').trim_end_matches('.');
        format!("{vw}vw")
    }
}

impl ColumnTranslator for GridColumns {
    fn media_query(&self, spec: &ColumnSpec) -> Result<String> {
        self.check(spec)?;
        let narrowest = self
            .named_descending(spec)
            .last()
            .map(|(b, _)| b.min_width)
            .unwrap_or_default();
        Ok(format!("(min-width: {narrowest}px)"))
    }

    fn sizes(&self, spec: &ColumnSpec) -> Result<String> {
        self.check(spec)?;
        let mut parts = Vec::new();
        let mut has_fallback = false;
        for (bp, cols) in self.named_descending(spec) {
            if bp.min_width == 0 {
                parts.push(self.viewport_width(cols));
                has_fallback = true;
            } else {
                parts.push(format!(
                    "(min-width: {}px) {}",
                    bp.min_width,
                    self.viewport_width(cols)
                ));
            }
        }
        if !has_fallback {
            parts.push("100vw".to_string());
        }
        Ok(parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_widest_first_with_fallback() {
        let grid = GridColumns::default();
        let spec = ColumnSpec::new([("md", 6), ("xl", 4)]);
        assert_eq!(
            grid.sizes(&spec).unwrap(),
            "(min-width: 1280px) 33.33vw, (min-width: 768px) 50vw, 100vw"
        );
    }

    #[test]
    fn sizes_uses_zero_width_breakpoint_as_fallback() {
        let grid = GridColumns::default();
        let spec = ColumnSpec::new([("xs", 12), ("lg", 3)]);
        assert_eq!(grid.sizes(&spec).unwrap(), "(min-width: 1024px) 25vw, 100vw");
    }

    #[test]
    fn media_query_uses_narrowest_breakpoint() {
        let grid = GridColumns::default();
        let spec = ColumnSpec::new([("xl", 4), ("md", 6)]);
        assert_eq!(grid.media_query(&spec).unwrap(), "(min-width: 768px)");
    }

    #[test]
    fn unknown_breakpoint_rejected() {
        let grid = GridColumns::default();
        let spec = ColumnSpec::new([("huge", 4)]);
        assert!(matches!(
            grid.media_query(&spec),
            Err(ImageError::InvalidColumns(_))
        ));
    }

    #[test]
    fn span_outside_grid_rejected() {
        let grid = GridColumns::default();
        assert!(grid.sizes(&ColumnSpec::new([("md", 13)])).is_err());
        assert!(grid.sizes(&ColumnSpec::new([("md", 0)])).is_err());
    }

    #[test]
    fn empty_spec_rejected() {
        assert!(GridColumns::default().sizes(&ColumnSpec::default()).is_err());
    }

    #[test]
    fn spec_parses_from_toml_table() {
        let spec: ColumnSpec = toml::from_str("md = 6\nxl = 4").unwrap();
        assert_eq!(spec.get("md"), Some(6));
        assert_eq!(spec.get("xl"), Some(4));
        assert_eq!(spec.get("lg"), None);
    }
}
