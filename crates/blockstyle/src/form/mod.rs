//! Editor form fields for block styling.
//!
//! The form host renders the fields; this module only decides which fields
//! exist, in which order and tab, and applies submitted values.

mod builder;
mod types;

pub use builder::{FieldSetBuilder, TITLE_FIELD, TITLE_HINT_FIELD};
pub use types::{FieldKind, FieldSpec, FieldTab};
