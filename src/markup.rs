//! HTML rendering of assembled attributes with maud.
//!
//! Output shape:
//!
//! ```html
//! <div class="picture-wrapper" style="..." data-picture-wrapper>
//!   <picture class="picture-placeholder" aria-hidden="true">...</picture>
//!   <picture>
//!     <source media="..." type="image/webp" srcset="..." sizes="...">
//!     <img class="picture-main" src="..." alt="..." loading="lazy">
//!   </picture>
//! </div>
//! ```
//!
//! The wrapper and the placeholder are only emitted when needed. A main image
//! with a single source collapses to a bare `<img srcset>`.

use crate::assemble::{FlatAttributes, SourceAttributes};
use maud::{Markup, html};

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

fn non_zero(value: u32) -> Option<u32> {
    (value != 0).then_some(value)
}

fn render_source(source: &SourceAttributes, sizes: Option<&str>) -> Markup {
    html! {
        source
            media=[source.media_query.as_deref()]
            type=[source.mime_type.as_deref()]
            srcset=(source.srcset)
            sizes=[sizes];
    }
}

fn render_placeholder(attrs: &FlatAttributes) -> Markup {
    html! {
        picture
            class=[attrs.placeholder_classes.as_deref()]
            aria-hidden="true" {
            @for source in &attrs.placeholder_sources {
                (render_source(source, None))
            }
            img
                src=[attrs.placeholder_src.as_deref()]
                alt=""
                style=[attrs.placeholder_style.as_deref().and_then(non_empty)]
                width=[non_zero(attrs.width)]
                height=[non_zero(attrs.height)];
        }
    }
}

fn render_main(attrs: &FlatAttributes) -> Markup {
    let sizes = attrs.sizes.as_deref();
    let img = |srcset: Option<&str>| {
        html! {
            img
                class=[non_empty(&attrs.main_classes)]
                style=[non_empty(&attrs.main_style)]
                src=[non_empty(&attrs.main_src)]
                srcset=[srcset]
                sizes=[srcset.and(sizes)]
                alt=(attrs.alt)
                loading=(attrs.loading.as_str())
                width=[non_zero(attrs.width)]
                height=[non_zero(attrs.height)];
        }
    };

    match attrs.main_sources.as_slice() {
        [single] => img(Some(single.srcset.as_str())),
        [] => img(None),
        sources => html! {
            picture {
                @for source in sources {
                    (render_source(source, sizes))
                }
                (img(None))
            }
        },
    }
}

/// Render the full element tree for one image.
pub fn render(attrs: &FlatAttributes) -> Markup {
    let main = html! {
        @if attrs.need_placeholder {
            (render_placeholder(attrs))
        }
        (render_main(attrs))
    };

    if attrs.is_wrapped() {
        html! {
            div
                class=[non_empty(&attrs.wrapper_classes)]
                style=[non_empty(&attrs.wrapper_styles)]
                data-picture-wrapper {
                (main)
            }
        }
    } else {
        main
    }
}
