//! Spacing, border and headline styling for CMS content blocks.
//!
//! - [`config`]: which features are enabled, per block type
//! - [`form`]: editor fields for the enabled features
//! - [`render`]: CSS classes and heading markup for the public site
//! - [`format`]: text formatter collaborators

pub mod attributes;
pub mod config;
pub mod error;
pub mod form;
pub mod format;
pub mod render;

pub use attributes::{ContentBlockAttributes, HeadlineTag, OpticalHeadline};
pub use config::{ConfigResolver, FeatureConfig};
pub use error::{ConfigError, ConfigResult};
pub use form::{FieldKind, FieldSetBuilder, FieldSpec, FieldTab};
pub use format::{InlineMarkupFormatter, PassthroughFormatter, TextFormatter};
pub use render::OutputRenderer;
