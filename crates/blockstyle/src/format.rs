//! Text formatter collaborators.
//!
//! The renderer hands the finished heading markup to a [`TextFormatter`],
//! which turns the lightweight inline syntax editors type into HTML. The
//! form builder shows the formatter's syntax description next to the title.
//!
//! Provided formatters:
//! - [`InlineMarkupFormatter`]: `**bold**`, `__italic__`, `||` line breaks,
//!   sanitized with ammonia
//! - [`PassthroughFormatter`]: returns its input unchanged

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Converts inline markup into HTML.
pub trait TextFormatter: Send + Sync {
    /// Convert `input` (which may already contain HTML) into final markup.
    fn formatted_text(&self, input: &str) -> String;

    /// Human-readable description of the supported syntax (HTML).
    fn formatting_description(&self) -> String;
}

// Patterns are literals checked by the tests below.
#[allow(clippy::expect_used)]
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern is valid"));
#[allow(clippy::expect_used)]
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(.+?)__").expect("italic pattern is valid"));

/// Tags that survive sanitizing.
const ALLOWED_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "strong", "em", "br", "span",
];

/// Tags that keep their `class` attribute.
const CLASSED_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "span"];

const CLASS_ATTR: &[&str] = &["class"];

/// Default formatter for block titles.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineMarkupFormatter;

impl InlineMarkupFormatter {
    fn convert(input: &str) -> String {
        let result = BOLD_RE.replace_all(input, "<strong>$1</strong>");
        let result = ITALIC_RE.replace_all(&result, "<em>$1</em>");
        result.replace("||", "<br>")
    }

    fn sanitize(input: &str) -> String {
        let mut builder = ammonia::Builder::default();
        builder.tags(ALLOWED_TAGS.iter().copied().collect::<HashSet<_>>());
        for tag in CLASSED_TAGS {
            builder.add_tag_attributes(*tag, CLASS_ATTR.iter());
        }
        builder.clean(input).to_string()
    }
}

impl TextFormatter for InlineMarkupFormatter {
    fn formatted_text(&self, input: &str) -> String {
        Self::sanitize(&Self::convert(input))
    }

    fn formatting_description(&self) -> String {
        "<p>Textformatierung im Titel: <code>**fett**</code>, <code>__kursiv__</code>, \
         <code>||</code> für einen Zeilenumbruch.</p>"
            .to_string()
    }
}

/// Formatter that leaves text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughFormatter;

impl TextFormatter for PassthroughFormatter {
    fn formatted_text(&self, input: &str) -> String {
        input.to_string()
    }

    fn formatting_description(&self) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_and_italic() {
        let out = InlineMarkupFormatter.formatted_text("<h2>A **big** __deal__</h2>");
        assert_eq!(out, "<h2>A <strong>big</strong> <em>deal</em></h2>");
    }

    #[test]
    fn line_break() {
        let out = InlineMarkupFormatter.formatted_text("<h3>First||Second</h3>");
        assert_eq!(out, "<h3>First<br>Second</h3>");
    }

    #[test]
    fn keeps_heading_class() {
        let out = InlineMarkupFormatter.formatted_text(r#"<h3 class="h1">Hello</h3>"#);
        assert_eq!(out, r#"<h3 class="h1">Hello</h3>"#);
    }

    #[test]
    fn strips_scripts_and_handlers() {
        let out = InlineMarkupFormatter
            .formatted_text(r#"<h2 onclick="x()">Hi<script>alert('xss')</script></h2>"#);
        assert!(!out.contains("script"));
        assert!(!out.contains("onclick"));
        assert!(out.contains("Hi"));
    }

    #[test]
    fn unmatched_markers_are_left_alone() {
        let out = InlineMarkupFormatter.formatted_text("<h2>2 ** 3</h2>");
        assert_eq!(out, "<h2>2 ** 3</h2>");
    }

    #[test]
    fn description_mentions_syntax() {
        let description = InlineMarkupFormatter.formatting_description();
        assert!(description.contains("**fett**"));
        assert!(description.contains("||"));
    }

    #[test]
    fn passthrough_is_identity() {
        let input = "<h2>**raw**</h2>";
        assert_eq!(PassthroughFormatter.formatted_text(input), input);
        assert!(PassthroughFormatter.formatting_description().is_empty());
    }
}
