//! CSS classes and inline styles for the rendered elements.
//!
//! Three elements can appear in the output: the wrapper `<div>`, the
//! placeholder image and the main image. When a wrapper is rendered the two
//! images are stacked inside it, so both get absolute-fill layout rules. Caller
//! styles are applied on top and win over the layout rules.

use std::collections::BTreeMap;

/// CSS property → value.
pub type StyleMap = BTreeMap<String, String>;

pub const WRAPPER_CLASS: &str = "picture-wrapper";
pub const MAIN_CLASS: &str = "picture-main";
pub const PLACEHOLDER_CLASS: &str = "picture-placeholder";

/// Render a style map as an inline `style` value.
pub fn render_styles(styles: &StyleMap) -> String {
    styles
        .iter()
        .map(|(prop, value)| format!("{prop}: {value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_classes(base: &str, extra: Option<&str>) -> String {
    match extra.map(str::trim) {
        Some(extra) if !extra.is_empty() => format!("{base} {extra}"),
        _ => base.to_string(),
    }
}

fn fill_layout() -> StyleMap {
    [
        ("position", "absolute"),
        ("top", "0"),
        ("left", "0"),
        ("width", "100%"),
        ("height", "100%"),
        ("object-fit", "cover"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Class and style of one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementStyle {
    pub class: String,
    pub style: String,
}

/// Caller overrides that feed the style computation.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleInputs<'a> {
    pub image_class: Option<&'a str>,
    pub image_styles: Option<&'a StyleMap>,
    pub wrapper_class: Option<&'a str>,
    pub wrapper_styles: Option<&'a StyleMap>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageStyles {
    pub wrapper: ElementStyle,
    pub main: ElementStyle,
    pub placeholder: ElementStyle,
}

impl ImageStyles {
    /// `layered` is true when the images sit inside a sized wrapper.
    pub fn new(layered: bool, inputs: StyleInputs<'_>) -> Self {
        let mut image = if layered { fill_layout() } else { StyleMap::new() };
        if let Some(styles) = inputs.image_styles {
            image.extend(styles.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        let mut wrapper = StyleMap::new();
        if layered {
            wrapper.insert("position".to_string(), "relative".to_string());
            wrapper.insert("overflow".to_string(), "hidden".to_string());
        }
        if let Some(styles) = inputs.wrapper_styles {
            wrapper.extend(styles.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        let image_style = render_styles(&image);
        Self {
            wrapper: ElementStyle {
                class: join_classes(WRAPPER_CLASS, inputs.wrapper_class),
                style: render_styles(&wrapper),
            },
            main: ElementStyle {
                class: join_classes(MAIN_CLASS, inputs.image_class),
                style: image_style.clone(),
            },
            placeholder: ElementStyle {
                class: join_classes(PLACEHOLDER_CLASS, inputs.image_class),
                style: image_style,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styles(pairs: &[(&str, &str)]) -> StyleMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn render_styles_joins_pairs() {
        let map = styles(&[("opacity", "0.5"), ("color", "red")]);
        assert_eq!(render_styles(&map), "color: red; opacity: 0.5");
        assert_eq!(render_styles(&StyleMap::new()), "");
    }

    #[test]
    fn unlayered_images_only_get_caller_styles() {
        let caller = styles(&[("border-radius", "4px")]);
        let s = ImageStyles::new(
            false,
            StyleInputs {
                image_styles: Some(&caller),
                ..StyleInputs::default()
            },
        );
        assert_eq!(s.main.style, "border-radius: 4px");
        assert_eq!(s.wrapper.style, "");
        assert_eq!(s.main.class, MAIN_CLASS);
    }

    #[test]
    fn layered_images_fill_the_wrapper() {
        let s = ImageStyles::new(true, StyleInputs::default());
        assert!(s.main.style.contains("position: absolute"));
        assert!(s.placeholder.style.contains("height: 100%"));
        assert_eq!(s.wrapper.style, "overflow: hidden; position: relative");
    }

    #[test]
    fn caller_styles_override_layout() {
        let caller = styles(&[("object-fit", "contain")]);
        let s = ImageStyles::new(
            true,
            StyleInputs {
                image_styles: Some(&caller),
                ..StyleInputs::default()
            },
        );
        assert!(s.main.style.contains("object-fit: contain"));
        assert!(!s.main.style.contains("object-fit: cover"));
    }

    #[test]
    fn classes_are_appended() {
        let s = ImageStyles::new(
            false,
            StyleInputs {
                image_class: Some("rounded"),
                wrapper_class: Some(" card "),
                ..StyleInputs::default()
            },
        );
        assert_eq!(s.main.class, "picture-main rounded");
        assert_eq!(s.placeholder.class, "picture-placeholder rounded");
        assert_eq!(s.wrapper.class, "picture-wrapper card");
    }
}
