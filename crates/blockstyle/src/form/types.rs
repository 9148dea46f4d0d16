//! Field specification types handed to the form host.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Settings tab a field belongs to.
///
/// Serialized as `{ "name", "title", "path" }` so a host can create the tab
/// with its editor title at the right place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "TabRecord", try_from = "TabRecord")]
pub enum FieldTab {
    Spacing,
    Borders,
    FontSettings,
}

impl FieldTab {
    /// Machine name of the tab.
    pub fn name(&self) -> &'static str {
        match self {
            FieldTab::Spacing => "Spacing",
            FieldTab::Borders => "Borders",
            FieldTab::FontSettings => "FontSettings",
        }
    }

    /// Tab title shown in the editor.
    pub fn title(&self) -> &'static str {
        match self {
            FieldTab::Spacing => "Abstände",
            FieldTab::Borders => "Trennlinien",
            FieldTab::FontSettings => "Schrifteinstellung",
        }
    }

    /// Full tab path inside the editing surface (e.g. "Root.Settings.Spacing").
    pub fn path(&self) -> String {
        format!("Root.Settings.{}", self.name())
    }

    /// Look up a tab by machine name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Spacing" => Some(FieldTab::Spacing),
            "Borders" => Some(FieldTab::Borders),
            "FontSettings" => Some(FieldTab::FontSettings),
            _ => None,
        }
    }
}

/// Wire shape of a [`FieldTab`].
#[derive(Serialize, Deserialize)]
struct TabRecord {
    name: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    path: String,
}

impl From<FieldTab> for TabRecord {
    fn from(tab: FieldTab) -> Self {
        Self {
            name: tab.name().to_string(),
            title: tab.title().to_string(),
            path: tab.path(),
        }
    }
}

impl TryFrom<TabRecord> for FieldTab {
    type Error = String;

    fn try_from(record: TabRecord) -> Result<Self, Self::Error> {
        FieldTab::from_name(&record.name).ok_or_else(|| format!("unknown tab: {}", record.name))
    }
}

/// Field kind with kind-specific configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Single checkbox.
    Checkbox,

    /// Dropdown select of `(value, label)` pairs.
    Dropdown {
        options: Vec<(String, String)>,
        /// Label shown for the empty value, if the dropdown has one.
        #[serde(skip_serializing_if = "Option::is_none")]
        empty_string: Option<String>,
    },

    /// Display-only markup.
    Literal { markup: String },
}

/// One editable (or informational) field, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field key, matching the persisted attribute name.
    pub key: String,

    #[serde(flatten)]
    pub kind: FieldKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Current value of the attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Tab the field is placed in; `None` for fields on the main tab.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab: Option<FieldTab>,

    /// Key of the host field this one must directly follow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_after: Option<String>,
}

impl FieldSpec {
    /// Create a checkbox field.
    pub fn checkbox(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, FieldKind::Checkbox).label(label)
    }

    /// Create a dropdown field.
    pub fn dropdown(
        key: impl Into<String>,
        label: impl Into<String>,
        options: Vec<(String, String)>,
    ) -> Self {
        Self::new(
            key,
            FieldKind::Dropdown {
                options,
                empty_string: None,
            },
        )
        .label(label)
    }

    /// Create a display-only literal field.
    pub fn literal(key: impl Into<String>, markup: impl Into<String>) -> Self {
        Self::new(
            key,
            FieldKind::Literal {
                markup: markup.into(),
            },
        )
    }

    fn new(key: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            kind,
            label: None,
            description: None,
            value: None,
            tab: None,
            insert_after: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn tab(mut self, tab: FieldTab) -> Self {
        self.tab = Some(tab);
        self
    }

    pub fn insert_after(mut self, key: impl Into<String>) -> Self {
        self.insert_after = Some(key.into());
        self
    }

    /// Set the empty-value label of a dropdown. No-op for other kinds.
    pub fn empty_string(mut self, label: impl Into<String>) -> Self {
        if let FieldKind::Dropdown {
            ref mut empty_string,
            ..
        } = self.kind
        {
            *empty_string = Some(label.into());
        }
        self
    }
}
