//! Styling attributes carried by a content block.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Persisted attribute keys managed by this crate.
///
/// A form host must remove these from its own scaffolded fields before
/// inserting the fields produced by [`FieldSetBuilder`](crate::form::FieldSetBuilder).
pub const MANAGED_FIELDS: [&str; 6] = [
    "SpaceTop",
    "SpaceBottom",
    "BorderTop",
    "BorderBottom",
    "HeadlineTag",
    "OpticalHeadline",
];

/// Styling attributes are never edited inline; hosts must open the full form.
pub const INLINE_EDITABLE: bool = false;

/// Structural heading level used for the rendered title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value", into = "String")]
pub enum HeadlineTag {
    #[default]
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadlineTag {
    /// All selectable tags, in dropdown order.
    pub const ALL: [HeadlineTag; 5] = [
        HeadlineTag::H2,
        HeadlineTag::H3,
        HeadlineTag::H4,
        HeadlineTag::H5,
        HeadlineTag::H6,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HeadlineTag::H2 => "h2",
            HeadlineTag::H3 => "h3",
            HeadlineTag::H4 => "h4",
            HeadlineTag::H5 => "h5",
            HeadlineTag::H6 => "h6",
        }
    }

    /// Parse leniently: anything that is not `h2`..`h6` becomes `h2`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "h3" => HeadlineTag::H3,
            "h4" => HeadlineTag::H4,
            "h5" => HeadlineTag::H5,
            "h6" => HeadlineTag::H6,
            _ => HeadlineTag::H2,
        }
    }
}

impl fmt::Display for HeadlineTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Value> for HeadlineTag {
    /// Non-string values (numbers, null, booleans) fall back to the default.
    fn from(value: Value) -> Self {
        value.as_str().map(Self::parse_lenient).unwrap_or_default()
    }
}

impl From<HeadlineTag> for String {
    fn from(tag: HeadlineTag) -> Self {
        tag.as_str().to_string()
    }
}

/// Visual heading style applied as a class, independent of the tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value", into = "String")]
pub enum OpticalHeadline {
    /// No optical override.
    #[default]
    None,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl OpticalHeadline {
    /// All selectable values, in dropdown order.
    pub const ALL: [OpticalHeadline; 7] = [
        OpticalHeadline::None,
        OpticalHeadline::H1,
        OpticalHeadline::H2,
        OpticalHeadline::H3,
        OpticalHeadline::H4,
        OpticalHeadline::H5,
        OpticalHeadline::H6,
    ];

    /// Class name, or the empty string for [`OpticalHeadline::None`].
    pub fn as_str(&self) -> &'static str {
        match self {
            OpticalHeadline::None => "",
            OpticalHeadline::H1 => "h1",
            OpticalHeadline::H2 => "h2",
            OpticalHeadline::H3 => "h3",
            OpticalHeadline::H4 => "h4",
            OpticalHeadline::H5 => "h5",
            OpticalHeadline::H6 => "h6",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, OpticalHeadline::None)
    }

    /// Parse leniently: anything that is not `h1`..`h6` becomes `None`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "h1" => OpticalHeadline::H1,
            "h2" => OpticalHeadline::H2,
            "h3" => OpticalHeadline::H3,
            "h4" => OpticalHeadline::H4,
            "h5" => OpticalHeadline::H5,
            "h6" => OpticalHeadline::H6,
            _ => OpticalHeadline::None,
        }
    }
}

impl fmt::Display for OpticalHeadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Value> for OpticalHeadline {
    fn from(value: Value) -> Self {
        value.as_str().map(Self::parse_lenient).unwrap_or_default()
    }
}

impl From<OpticalHeadline> for String {
    fn from(optic: OpticalHeadline) -> Self {
        optic.as_str().to_string()
    }
}

/// Styling attributes of one content block, plus the owner fields the
/// renderer reads (`title`, `extra_class`, `block_type_id`).
///
/// Field names follow the persisted record, so a stored block deserializes
/// directly; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ContentBlockAttributes {
    #[serde(deserialize_with = "lenient_flag")]
    pub space_top: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub space_bottom: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub border_top: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub border_bottom: bool,
    pub headline_tag: HeadlineTag,
    pub optical_headline: OpticalHeadline,

    /// Editor-entered title, may contain inline formatting syntax.
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,

    /// Base CSS class supplied by the owning block.
    #[serde(deserialize_with = "lenient_text")]
    pub extra_class: String,

    /// Concrete block type, used only for exclusion lookups.
    #[serde(rename = "ClassName", deserialize_with = "lenient_text")]
    pub block_type_id: String,
}

impl Default for ContentBlockAttributes {
    fn default() -> Self {
        Self {
            space_top: true,
            space_bottom: true,
            border_top: false,
            border_bottom: false,
            headline_tag: HeadlineTag::H2,
            optical_headline: OpticalHeadline::None,
            title: String::new(),
            extra_class: String::new(),
            block_type_id: String::new(),
        }
    }
}

impl ContentBlockAttributes {
    /// Default attributes for a block of the given type.
    pub fn new(block_type_id: impl Into<String>) -> Self {
        Self {
            block_type_id: block_type_id.into(),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn extra_class(mut self, extra_class: impl Into<String>) -> Self {
        self.extra_class = extra_class.into();
        self
    }

    pub fn spacing(mut self, top: bool, bottom: bool) -> Self {
        self.space_top = top;
        self.space_bottom = bottom;
        self
    }

    pub fn borders(mut self, top: bool, bottom: bool) -> Self {
        self.border_top = top;
        self.border_bottom = bottom;
        self
    }

    pub fn headline_tag(mut self, tag: HeadlineTag) -> Self {
        self.headline_tag = tag;
        self
    }

    pub fn optical_headline(mut self, optic: OpticalHeadline) -> Self {
        self.optical_headline = optic;
        self
    }
}

/// Interpret a stored or submitted value as a checkbox state.
///
/// Accepts booleans, numbers (non-zero is true) and the usual string forms.
/// Returns `None` for values that cannot be read as a flag.
pub fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "on" | "yes" => Some(true),
            "0" | "false" | "off" | "no" | "" => Some(false),
            _ => None,
        },
        Value::Null => Some(false),
        _ => None,
    }
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_flag(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("expected a boolean flag, got {value}")))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
