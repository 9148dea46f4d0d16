//! Front-end output for styled blocks.
//!
//! Produces the block's CSS class list and its formatted heading markup.

use tracing::trace;

use crate::attributes::{ContentBlockAttributes, HeadlineTag};
use crate::config::ConfigResolver;
use crate::format::TextFormatter;

/// Class added for top spacing.
pub const SPACE_TOP_CLASS: &str = "space-top";
/// Class added for bottom spacing.
pub const SPACE_BOTTOM_CLASS: &str = "space-bottom";
/// Class added for a top border.
pub const BORDER_TOP_CLASS: &str = "border-top";
/// Class added for a bottom border.
pub const BORDER_BOTTOM_CLASS: &str = "border-bottom";

/// Renders block attributes for the public site.
#[derive(Debug, Clone, Default)]
pub struct OutputRenderer {
    resolver: ConfigResolver,
}

impl OutputRenderer {
    pub fn new(resolver: ConfigResolver) -> Self {
        Self { resolver }
    }

    /// Space-separated class list for the block wrapper.
    ///
    /// Order: extra class, `space-top`, `space-bottom`, `border-top`,
    /// `border-bottom`. Spacing honours the per-block-type exclusions; the
    /// border classes only check the global border flag.
    pub fn css_classes(&self, attrs: &ContentBlockAttributes) -> String {
        let mut classes: Vec<&str> = Vec::with_capacity(5);

        if !attrs.extra_class.is_empty() {
            classes.push(&attrs.extra_class);
        }

        if self.resolver.is_spacing_enabled(&attrs.block_type_id) {
            if attrs.space_top {
                classes.push(SPACE_TOP_CLASS);
            }
            if attrs.space_bottom {
                classes.push(SPACE_BOTTOM_CLASS);
            }
        }

        if self.resolver.has_borders() {
            if attrs.border_top {
                classes.push(BORDER_TOP_CLASS);
            }
            if attrs.border_bottom {
                classes.push(BORDER_BOTTOM_CLASS);
            }
        }

        classes.join(" ")
    }

    /// Formatted heading for the block title, or an empty string without one.
    ///
    /// The complete heading element, not just the title text, is passed
    /// through `formatter`, and the formatter's output is returned as is.
    pub fn render_headline(
        &self,
        attrs: &ContentBlockAttributes,
        formatter: &dyn TextFormatter,
    ) -> String {
        if attrs.title.is_empty() {
            return String::new();
        }

        let markup = self.headline_markup(attrs, &attrs.title);
        let html = formatter.formatted_text(&markup);
        trace!(block_type = %attrs.block_type_id, %html, "rendered headline");
        html
    }

    /// Heading element wrapping `content`, before formatting.
    pub fn headline_markup(&self, attrs: &ContentBlockAttributes, content: &str) -> String {
        let tag = if self.resolver.is_headline_tag_enabled() {
            attrs.headline_tag
        } else {
            HeadlineTag::H2
        };

        let optical_class = if self.resolver.is_headline_optic_enabled() {
            attrs.optical_headline.as_str()
        } else {
            ""
        };

        if optical_class.is_empty() {
            format!("<{tag}>{content}</{tag}>")
        } else {
            let class = html_escape(optical_class);
            format!(r#"<{tag} class="{class}">{content}</{tag}>"#)
        }
    }
}

/// Escape a string for use in HTML text or a quoted attribute.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
