//! Editor field set for block styling attributes.

use serde_json::{Map, Value};
use tracing::debug;

use super::types::{FieldSpec, FieldTab};
use crate::attributes::{
    ContentBlockAttributes, HeadlineTag, MANAGED_FIELDS, OpticalHeadline, parse_flag,
};
use crate::config::ConfigResolver;
use crate::format::TextFormatter;

/// Host field the formatting hint is placed after.
pub const TITLE_FIELD: &str = "Title";

/// Key of the formatting hint literal.
pub const TITLE_HINT_FIELD: &str = "TitleHint";

/// Builds the ordered styling fields for a block's edit form, and applies
/// submitted values back onto the attributes.
#[derive(Debug, Clone, Default)]
pub struct FieldSetBuilder {
    resolver: ConfigResolver,
}

impl FieldSetBuilder {
    pub fn new(resolver: ConfigResolver) -> Self {
        Self { resolver }
    }

    /// Fields to show for `attrs`, in display order.
    ///
    /// The formatting hint is always present. Spacing, border and font
    /// setting fields appear only when enabled for the block's type; hidden
    /// fields are simply absent.
    pub fn build_fields(
        &self,
        attrs: &ContentBlockAttributes,
        formatter: &dyn TextFormatter,
    ) -> Vec<FieldSpec> {
        let mut fields = vec![
            FieldSpec::literal(
                TITLE_HINT_FIELD,
                format!(
                    r#"<div class="field mb-5">{}</div>"#,
                    formatter.formatting_description()
                ),
            )
            .insert_after(TITLE_FIELD),
        ];

        if self.resolver.is_spacing_enabled(&attrs.block_type_id) {
            fields.push(
                FieldSpec::checkbox("SpaceTop", "Abstand oben")
                    .value(attrs.space_top)
                    .tab(FieldTab::Spacing),
            );
            fields.push(
                FieldSpec::checkbox("SpaceBottom", "Abstand unten")
                    .value(attrs.space_bottom)
                    .tab(FieldTab::Spacing),
            );
        }

        if self.resolver.is_borders_enabled(&attrs.block_type_id) {
            fields.push(
                FieldSpec::checkbox("BorderTop", "Trennlinie oben")
                    .value(attrs.border_top)
                    .tab(FieldTab::Borders),
            );
            fields.push(
                FieldSpec::checkbox("BorderBottom", "Trennlinie unten")
                    .value(attrs.border_bottom)
                    .tab(FieldTab::Borders),
            );
        }

        if self.resolver.has_font_settings() {
            if self.resolver.is_headline_tag_enabled() {
                fields.push(
                    FieldSpec::dropdown(
                        "HeadlineTag",
                        "Strukturelle Headline (SEO-relevant)",
                        headline_tag_options(),
                    )
                    .description("Diese Headline wird als HTML-Tag für SEO verwendet.")
                    .value(attrs.headline_tag.as_str())
                    .tab(FieldTab::FontSettings),
                );
            }

            if self.resolver.is_headline_optic_enabled() {
                fields.push(
                    FieldSpec::dropdown(
                        "OpticalHeadline",
                        "Optische Anpassung (Styling-Klasse, optional)",
                        optical_headline_options(),
                    )
                    .description(
                        "Falls gewünscht, kann die Headline optisch wie eine andere Größe aussehen.",
                    )
                    .empty_string("Keine optische Anpassung")
                    .value(attrs.optical_headline.as_str())
                    .tab(FieldTab::FontSettings),
                );
            }
        }

        debug!(
            block_type = %attrs.block_type_id,
            fields = fields.len(),
            "built styling field set"
        );

        fields
    }

    /// Write submitted form values onto `attrs`.
    ///
    /// Only keys of fields that [`Self::build_fields`] would show are
    /// applied; values for hidden fields are ignored. Keys that are absent
    /// from `submitted` leave the attribute untouched. Returns the keys whose
    /// value actually changed, in [`MANAGED_FIELDS`] order.
    pub fn apply_submission(
        &self,
        attrs: &mut ContentBlockAttributes,
        submitted: &Map<String, Value>,
    ) -> Vec<&'static str> {
        let spacing = self.resolver.is_spacing_enabled(&attrs.block_type_id);
        let borders = self.resolver.is_borders_enabled(&attrs.block_type_id);
        let tags = self.resolver.is_headline_tag_enabled();
        let optic = self.resolver.is_headline_optic_enabled();

        let mut changed = Vec::new();

        for key in MANAGED_FIELDS {
            let Some(value) = submitted.get(key) else {
                continue;
            };

            let visible = match key {
                "SpaceTop" | "SpaceBottom" => spacing,
                "BorderTop" | "BorderBottom" => borders,
                "HeadlineTag" => tags,
                _ => optic,
            };
            if !visible {
                debug!(field = key, "ignoring submitted value for hidden field");
                continue;
            }

            let updated = match key {
                "SpaceTop" => set_flag(&mut attrs.space_top, key, value),
                "SpaceBottom" => set_flag(&mut attrs.space_bottom, key, value),
                "BorderTop" => set_flag(&mut attrs.border_top, key, value),
                "BorderBottom" => set_flag(&mut attrs.border_bottom, key, value),
                "HeadlineTag" => {
                    let tag = HeadlineTag::parse_lenient(value.as_str().unwrap_or_default());
                    replace(&mut attrs.headline_tag, tag)
                }
                _ => {
                    let optical =
                        OpticalHeadline::parse_lenient(value.as_str().unwrap_or_default());
                    replace(&mut attrs.optical_headline, optical)
                }
            };

            if updated {
                changed.push(key);
            }
        }

        changed
    }
}

fn set_flag(target: &mut bool, key: &str, value: &Value) -> bool {
    match parse_flag(value) {
        Some(flag) => replace(target, flag),
        None => {
            debug!(field = key, %value, "ignoring unreadable checkbox value");
            false
        }
    }
}

fn replace<T: PartialEq>(target: &mut T, value: T) -> bool {
    if *target == value {
        return false;
    }
    *target = value;
    true
}

fn headline_tag_options() -> Vec<(String, String)> {
    HeadlineTag::ALL
        .iter()
        .map(|tag| {
            let label = match tag {
                HeadlineTag::H2 => "H2 (Standard)".to_string(),
                other => other.as_str().to_uppercase(),
            };
            (tag.as_str().to_string(), label)
        })
        .collect()
}

fn optical_headline_options() -> Vec<(String, String)> {
    OpticalHeadline::ALL
        .iter()
        .map(|optic| {
            let label = match optic {
                OpticalHeadline::None => "Keine optische Anpassung".to_string(),
                other => format!("{}-Optik", other.as_str().to_uppercase()),
            };
            (optic.as_str().to_string(), label)
        })
        .collect()
}
