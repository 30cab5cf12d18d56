//! CLI output formatting.
//!
//! Output is **information-centric**: each entity gets a header line with its
//! positional index and name, details go on indented context lines below it.
//!
//! # Output Format
//!
//! ## Render
//!
//! ```text
//! Image cover (article:12)
//! 001 default 1000x563 jpg
//!     Src: /img/u/cover.jpg?w=1000&crop=4000,2250,0,375
//!     Srcset: 9 candidates, 250w..2500w
//!     WebP: 9 candidates
//! 002 mobile 1000x1500 jpg
//!     Media: (max-width: 767px)
//!     Src: /img/u/cover.jpg?w=1000&crop=2000,3000,1000,0
//!     Srcset: 9 candidates, 250w..2500w
//! Sizes: (min-width: 1024px) 50vw, 100vw
//! ```
//!
//! ## Check
//!
//! ```text
//! Config
//!     WebP: off
//!     Render: lqip on, sizer auto, loading lazy
//!     Base URL: /img
//!     Grid: 12 columns (xs 0px, sm 640px, md 768px, lg 1024px, xl 1280px)
//!
//! Presets
//! 001 card
//!     Width: 600
//!     Sizes: (min-width: 768px) 33vw, 100vw
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure —
//! no I/O, no side effects.

use crate::assemble::SizerMode;
use crate::config::{Preset, Settings};
use crate::request::SourceCondition;
use crate::types::{ImageDescriptor, ResolvedImage, SrcSetCandidate};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based position as a zero-padded 3-digit index.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Indentation for context lines below a header.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

/// Header line: index, name and an optional detail.
fn entity_header(index: usize, name: &str, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("{} {} {}", format_index(index), name, detail),
        None => format!("{} {}", format_index(index), name),
    }
}

/// `9 candidates, 250w..2500w`
fn srcset_summary(candidates: &[SrcSetCandidate]) -> String {
    match (candidates.first(), candidates.last()) {
        (Some(first), Some(last)) if candidates.len() > 1 => format!(
            "{} candidates, {}w..{}w",
            candidates.len(),
            first.width,
            last.width
        ),
        (Some(only), _) => format!("1 candidate, {}w", only.width),
        _ => "none".to_string(),
    }
}

fn descriptor_lines(
    index: usize,
    image: &ImageDescriptor,
    media_query: Option<&str>,
) -> Vec<String> {
    let detail = format!("{}x{} {}", image.width, image.height, image.extension);
    let mut lines = vec![entity_header(index, &image.crop, Some(&detail))];
    if let Some(query) = media_query {
        lines.push(format!("{}Media: {}", indent(1), query));
    }
    lines.push(format!("{}Src: {}", indent(1), image.src));
    lines.push(format!("{}Srcset: {}", indent(1), srcset_summary(&image.src_set)));
    if let Some(webp) = &image.src_set_webp {
        lines.push(format!("{}WebP: {} candidates", indent(1), webp.len()));
    }
    if !image.alt.is_empty() {
        lines.push(format!("{}Alt: {}", indent(1), image.alt));
    }
    lines
}

// ============================================================================
// Render
// ============================================================================

/// Format a resolved image: the fallback first, then alternates in order.
pub fn format_resolved(role: &str, model: &str, resolved: &ResolvedImage) -> Vec<String> {
    let mut lines = vec![format!("Image {} ({})", role, model)];
    lines.extend(descriptor_lines(1, &resolved.image, None));
    for (i, source) in resolved.sources.iter().enumerate() {
        lines.extend(descriptor_lines(i + 2, &source.image, Some(&source.media_query)));
    }
    if let Some(sizes) = &resolved.sizes {
        lines.push(format!("Sizes: {}", sizes));
    }
    lines
}

pub fn print_resolved(role: &str, model: &str, resolved: &ResolvedImage) {
    for line in format_resolved(role, model, resolved) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

fn sizer_label(mode: SizerMode) -> &'static str {
    match mode {
        SizerMode::Auto => "auto",
        SizerMode::Always => "always",
        SizerMode::Never => "never",
    }
}

fn preset_lines(index: usize, name: &str, preset: &Preset) -> Vec<String> {
    let mut lines = vec![entity_header(index, name, None)];
    let ctx = indent(1);
    if let Some(crop) = &preset.crop {
        lines.push(format!("{ctx}Crop: {crop}"));
    }
    match (preset.width, preset.height) {
        (Some(w), Some(h)) => lines.push(format!("{ctx}Size: {w}x{h}")),
        (Some(w), None) => lines.push(format!("{ctx}Width: {w}")),
        (None, Some(h)) => lines.push(format!("{ctx}Height: {h}")),
        (None, None) => {}
    }
    if let Some(sizes) = &preset.sizes {
        lines.push(format!("{ctx}Sizes: {sizes}"));
    }
    if let Some(columns) = &preset.columns {
        let spec: Vec<String> = columns.0.iter().map(|(bp, n)| format!("{bp} {n}")).collect();
        lines.push(format!("{ctx}Columns: {}", spec.join(", ")));
    }
    if !preset.src_set_widths.is_empty() {
        let widths: Vec<String> = preset.src_set_widths.iter().map(u32::to_string).collect();
        lines.push(format!("{ctx}Widths: {}", widths.join(", ")));
    }
    for source in &preset.sources {
        let condition = match &source.condition {
            SourceCondition::MediaQuery(query) => query.clone(),
            SourceCondition::Columns(columns) => {
                let spec: Vec<String> =
                    columns.0.iter().map(|(bp, n)| format!("{bp} {n}")).collect();
                format!("columns {}", spec.join(", "))
            }
        };
        lines.push(format!("{ctx}Source: {} → {}", source.crop, condition));
    }
    lines
}

/// Format the effective settings and every preset.
pub fn format_settings(settings: &Settings) -> Vec<String> {
    let breakpoints: Vec<String> = settings
        .columns
        .breakpoints
        .iter()
        .map(|bp| format!("{} {}px", bp.name, bp.min_width))
        .collect();

    let mut lines = vec![
        "Config".to_string(),
        format!("{}WebP: {}", indent(1), on_off(settings.webp_support)),
        format!(
            "{}Render: lqip {}, sizer {}, loading {}",
            indent(1),
            on_off(settings.render.lqip),
            sizer_label(settings.render.image_sizer),
            settings.render.loading.as_str()
        ),
        format!("{}Base URL: {}", indent(1), settings.urls.base_url),
        format!(
            "{}Grid: {} columns ({})",
            indent(1),
            settings.columns.total,
            breakpoints.join(", ")
        ),
    ];

    if !settings.presets.is_empty() {
        lines.push(String::new());
        lines.push("Presets".to_string());
        for (i, (name, preset)) in settings.presets.iter().enumerate() {
            lines.extend(preset_lines(i + 1, name, preset));
        }
    }
    lines
}

pub fn print_settings(settings: &Settings) {
    for line in format_settings(settings) {
        println!("{}", line);
    }
}
