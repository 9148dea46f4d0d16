//! blockstyle test utilities.
//!
//! Helpers for integration testing: stored block fixtures, a formatter that
//! records its input, and assertion utilities for JSON output.

// Test helpers panic on malformed fixtures.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex};

use blockstyle::{ContentBlockAttributes, TextFormatter};
use serde_json::Value as JsonValue;

/// Create a stored block record of the given type with no styling columns set.
pub fn test_block(block_type: &str) -> TestBlock {
    TestBlock {
        record: serde_json::json!({ "ClassName": block_type }),
    }
}

/// A stored block record builder, shaped like the host's persisted row.
#[derive(Debug, Clone)]
pub struct TestBlock {
    pub record: JsonValue,
}

impl TestBlock {
    /// Set a single column.
    pub fn with_field(mut self, name: &str, value: JsonValue) -> Self {
        if let Some(obj) = self.record.as_object_mut() {
            obj.insert(name.to_string(), value);
        }
        self
    }

    /// Set the title.
    pub fn with_title(self, title: &str) -> Self {
        self.with_field("Title", JsonValue::from(title))
    }

    /// Set the base CSS class.
    pub fn with_extra_class(self, class: &str) -> Self {
        self.with_field("ExtraClass", JsonValue::from(class))
    }

    /// Set the spacing columns, stored as 0/1 like the host database does.
    pub fn with_spacing(self, top: bool, bottom: bool) -> Self {
        self.with_field("SpaceTop", JsonValue::from(u8::from(top)))
            .with_field("SpaceBottom", JsonValue::from(u8::from(bottom)))
    }

    /// Set the border columns, stored as 0/1.
    pub fn with_borders(self, top: bool, bottom: bool) -> Self {
        self.with_field("BorderTop", JsonValue::from(u8::from(top)))
            .with_field("BorderBottom", JsonValue::from(u8::from(bottom)))
    }

    /// Set the raw headline tag column.
    pub fn with_headline_tag(self, tag: &str) -> Self {
        self.with_field("HeadlineTag", JsonValue::from(tag))
    }

    /// Set the raw optical headline column.
    pub fn with_optical_headline(self, optic: &str) -> Self {
        self.with_field("OpticalHeadline", JsonValue::from(optic))
    }

    /// Deserialize into attributes.
    pub fn attributes(&self) -> ContentBlockAttributes {
        serde_json::from_value(self.record.clone()).expect("test block record should deserialize")
    }
}

/// A formatter that records every input and wraps the output in a marker,
/// so tests can see both what was passed in and that its output was used.
#[derive(Debug, Clone, Default)]
pub struct RecordingFormatter {
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inputs received so far, oldest first.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Output the formatter produces for `input`.
    pub fn output_for(input: &str) -> String {
        format!("[formatted]{input}")
    }
}

impl TextFormatter for RecordingFormatter {
    fn formatted_text(&self, input: &str) -> String {
        self.calls.lock().unwrap().push(input.to_string());
        Self::output_for(input)
    }

    fn formatting_description(&self) -> String {
        "Syntax help".to_string()
    }
}

/// Assertion helpers for JSON content.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }

    /// Assert that a JSON value does not have a specific key.
    pub fn lacks_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_none(),
            "Expected JSON not to have key '{key}', got: {value}"
        );
    }

    /// Assert that a JSON value equals expected.
    pub fn json_eq(actual: &Value, expected: &Value) {
        assert_eq!(
            actual,
            expected,
            "JSON mismatch:\nactual: {}\nexpected: {}",
            serde_json::to_string_pretty(actual).unwrap(),
            serde_json::to_string_pretty(expected).unwrap()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_defaults() {
        let attrs = test_block("ElementContent").attributes();
        assert_eq!(attrs.block_type_id, "ElementContent");
        assert!(attrs.space_top);
        assert!(!attrs.border_top);
    }

    #[test]
    fn test_block_columns() {
        let attrs = test_block("ElementContent")
            .with_title("Hi")
            .with_spacing(false, true)
            .with_borders(true, false)
            .attributes();
        assert_eq!(attrs.title, "Hi");
        assert!(!attrs.space_top);
        assert!(attrs.space_bottom);
        assert!(attrs.border_top);
    }

    #[test]
    fn recording_formatter_records() {
        let formatter = RecordingFormatter::new();
        let out = formatter.formatted_text("<h2>x</h2>");
        assert_eq!(out, "[formatted]<h2>x</h2>");
        assert_eq!(formatter.calls(), vec!["<h2>x</h2>".to_string()]);
    }
}
