//! Feature configuration and resolution.
//!
//! A [`FeatureConfig`] is built once at startup (from a YAML/TOML file, the
//! environment, or the builder methods) and never mutated afterwards. The
//! [`ConfigResolver`] shares it behind an `Arc` and answers the per-block-type
//! questions that the form builder and the renderer ask.

use std::collections::BTreeSet;
use std::env;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Block type of a virtual block, which mirrors another block's content and
/// therefore never carries its own spacing or borders.
pub const VIRTUAL_BLOCK_TYPE: &str = "ElementVirtual";

/// Prefix of all environment variables read by [`FeatureConfig::from_env`].
pub const ENV_PREFIX: &str = "BLOCKSTYLE_";

/// Which optional styling features are enabled, and for which block types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeatureConfig {
    /// Offer top/bottom spacing toggles.
    pub has_spacing: bool,

    /// Offer top/bottom border toggles.
    pub has_borders: bool,

    /// Let editors pick the structural heading tag.
    pub has_headline_tags: bool,

    /// Let editors pick an optical heading class.
    pub has_headline_optic: bool,

    /// Block types that never get spacing fields or classes.
    #[serde(rename = "classes_without_spacing")]
    pub block_types_excluded_from_spacing: BTreeSet<String>,

    /// Block types that never get border fields.
    #[serde(rename = "classes_without_borders")]
    pub block_types_excluded_from_borders: BTreeSet<String>,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            has_spacing: false,
            has_borders: false,
            has_headline_tags: false,
            has_headline_optic: false,
            block_types_excluded_from_spacing: BTreeSet::from([VIRTUAL_BLOCK_TYPE.to_string()]),
            block_types_excluded_from_borders: BTreeSet::from([VIRTUAL_BLOCK_TYPE.to_string()]),
        }
    }
}

impl FeatureConfig {
    /// Config with every feature enabled and the default exclusions.
    pub fn all_enabled() -> Self {
        Self::default()
            .with_spacing(true)
            .with_borders(true)
            .with_headline_tags(true)
            .with_headline_optic(true)
    }

    /// Enable or disable spacing.
    pub fn with_spacing(mut self, enabled: bool) -> Self {
        self.has_spacing = enabled;
        self
    }

    /// Enable or disable borders.
    pub fn with_borders(mut self, enabled: bool) -> Self {
        self.has_borders = enabled;
        self
    }

    /// Enable or disable the structural headline tag selector.
    pub fn with_headline_tags(mut self, enabled: bool) -> Self {
        self.has_headline_tags = enabled;
        self
    }

    /// Enable or disable the optical headline selector.
    pub fn with_headline_optic(mut self, enabled: bool) -> Self {
        self.has_headline_optic = enabled;
        self
    }

    /// Exclude a block type from spacing.
    pub fn exclude_from_spacing(mut self, block_type_id: impl Into<String>) -> Self {
        self.block_types_excluded_from_spacing
            .insert(block_type_id.into());
        self
    }

    /// Exclude a block type from borders.
    pub fn exclude_from_borders(mut self, block_type_id: impl Into<String>) -> Self {
        self.block_types_excluded_from_borders
            .insert(block_type_id.into());
        self
    }

    /// Drop all exclusions, including the default virtual block type.
    pub fn without_exclusions(mut self) -> Self {
        self.block_types_excluded_from_spacing.clear();
        self.block_types_excluded_from_borders.clear();
        self
    }

    /// Parse a YAML document.
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yml::Error> {
        serde_yml::from_str(content)
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load from a `.yml`, `.yaml` or `.toml` file.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let is_yaml = match extension.as_deref() {
            Some("yml" | "yaml") => true,
            Some("toml") => false,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = if is_yaml {
            Self::from_yaml_str(&content).map_err(|source| ConfigError::ParseYaml {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            Self::from_toml_str(&content).map_err(|source| ConfigError::ParseToml {
                path: path.to_path_buf(),
                source,
            })?
        };

        debug!(path = %path.display(), "feature config loaded from file");
        Ok(config)
    }

    /// Load from `BLOCKSTYLE_*` environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load from an arbitrary variable lookup, starting from the defaults.
    ///
    /// Exclusion lists given here replace the default lists.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let flag = |name: &str, current: bool| -> ConfigResult<bool> {
            let var = format!("{ENV_PREFIX}{name}");
            match lookup(&var) {
                Some(value) => parse_bool(&value).ok_or(ConfigError::InvalidEnv { var, value }),
                None => Ok(current),
            }
        };

        config.has_spacing = flag("HAS_SPACING", config.has_spacing)?;
        config.has_borders = flag("HAS_BORDERS", config.has_borders)?;
        config.has_headline_tags = flag("HAS_HEADLINE_TAGS", config.has_headline_tags)?;
        config.has_headline_optic = flag("HAS_HEADLINE_OPTIC", config.has_headline_optic)?;

        if let Some(list) = lookup(&format!("{ENV_PREFIX}CLASSES_WITHOUT_SPACING")) {
            config.block_types_excluded_from_spacing = parse_list(&list);
        }
        if let Some(list) = lookup(&format!("{ENV_PREFIX}CLASSES_WITHOUT_BORDERS")) {
            config.block_types_excluded_from_borders = parse_list(&list);
        }

        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn parse_list(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Answers feature questions against a shared, immutable [`FeatureConfig`].
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    config: Arc<FeatureConfig>,
}

impl ConfigResolver {
    /// Create a resolver owning the given config.
    pub fn new(config: FeatureConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Create a resolver sharing an existing config.
    pub fn from_shared(config: Arc<FeatureConfig>) -> Self {
        Self { config }
    }

    /// The underlying config.
    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Spacing is on and the block type is not excluded from it.
    pub fn is_spacing_enabled(&self, block_type_id: &str) -> bool {
        self.config.has_spacing
            && !self
                .config
                .block_types_excluded_from_spacing
                .contains(block_type_id)
    }

    /// Borders are on and the block type is not excluded from them.
    pub fn is_borders_enabled(&self, block_type_id: &str) -> bool {
        self.config.has_borders
            && !self
                .config
                .block_types_excluded_from_borders
                .contains(block_type_id)
    }

    /// Borders are on globally, ignoring per-block-type exclusions.
    ///
    /// Front-end border classes use this check, not [`Self::is_borders_enabled`].
    pub fn has_borders(&self) -> bool {
        self.config.has_borders
    }

    /// Editors may pick the structural heading tag.
    pub fn is_headline_tag_enabled(&self) -> bool {
        self.config.has_headline_tags
    }

    /// Editors may pick an optical heading class independent of the tag.
    pub fn is_headline_optic_enabled(&self) -> bool {
        self.config.has_headline_optic
    }

    /// Either headline selector is on.
    pub fn has_font_settings(&self) -> bool {
        self.config.has_headline_tags || self.config.has_headline_optic
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new(FeatureConfig::default())
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn default_config_disables_everything() {
        let resolver = ConfigResolver::default();
        assert!(!resolver.is_spacing_enabled("ElementContent"));
        assert!(!resolver.is_borders_enabled("ElementContent"));
        assert!(!resolver.is_headline_tag_enabled());
        assert!(!resolver.is_headline_optic_enabled());
        assert!(!resolver.has_font_settings());
    }

    #[test]
    fn spacing_enabled_unless_excluded() {
        let resolver = ConfigResolver::new(
            FeatureConfig::default()
                .with_spacing(true)
                .exclude_from_spacing("ElementGallery"),
        );
        assert!(resolver.is_spacing_enabled("ElementContent"));
        assert!(resolver.is_spacing_enabled("SomethingUnknown"));
        assert!(!resolver.is_spacing_enabled("ElementGallery"));
        assert!(!resolver.is_spacing_enabled(VIRTUAL_BLOCK_TYPE));
    }

    #[test]
    fn excluded_block_type_stays_disabled_without_flag() {
        let resolver =
            ConfigResolver::new(FeatureConfig::default().exclude_from_spacing("ElementGallery"));
        assert!(!resolver.is_spacing_enabled("ElementGallery"));
    }

    #[test]
    fn borders_use_their_own_exclusions() {
        let resolver = ConfigResolver::new(
            FeatureConfig::default()
                .without_exclusions()
                .with_spacing(true)
                .with_borders(true)
                .exclude_from_borders("ElementHero"),
        );
        assert!(resolver.is_spacing_enabled("ElementHero"));
        assert!(!resolver.is_borders_enabled("ElementHero"));
        assert!(resolver.has_borders());
        assert!(resolver.is_spacing_enabled(VIRTUAL_BLOCK_TYPE));
    }

    #[test]
    fn font_settings_when_either_headline_flag() {
        let tags = ConfigResolver::new(FeatureConfig::default().with_headline_tags(true));
        let optic = ConfigResolver::new(FeatureConfig::default().with_headline_optic(true));
        assert!(tags.has_font_settings());
        assert!(optic.has_font_settings());
    }

    #[test]
    fn yaml_uses_original_keys() {
        let yaml = r#"
has_spacing: true
has_headline_tags: true
classes_without_spacing:
  - ElementVirtual
  - ElementForm
"#;
        let config = FeatureConfig::from_yaml_str(yaml).unwrap();
        assert!(config.has_spacing);
        assert!(!config.has_borders);
        assert!(config.has_headline_tags);
        assert!(
            config
                .block_types_excluded_from_spacing
                .contains("ElementForm")
        );
        // Missing list keeps its default.
        assert!(
            config
                .block_types_excluded_from_borders
                .contains(VIRTUAL_BLOCK_TYPE)
        );
    }

    #[test]
    fn toml_config() {
        let toml = r#"
has_borders = true
has_headline_optic = true
classes_without_borders = []
"#;
        let config = FeatureConfig::from_toml_str(toml).unwrap();
        assert!(config.has_borders);
        assert!(config.has_headline_optic);
        assert!(config.block_types_excluded_from_borders.is_empty());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FeatureConfig::from_yaml_str("has_spaceing: true\n").is_err());
        assert!(FeatureConfig::from_toml_str("has_border = true\n").is_err());
    }

    #[test]
    fn lookup_overrides_defaults() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("BLOCKSTYLE_HAS_SPACING", "yes"),
            ("BLOCKSTYLE_HAS_BORDERS", "0"),
            ("BLOCKSTYLE_HAS_HEADLINE_TAGS", "TRUE"),
            ("BLOCKSTYLE_CLASSES_WITHOUT_SPACING", "ElementA, ElementB,,"),
        ]);
        let config = FeatureConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();

        assert!(config.has_spacing);
        assert!(!config.has_borders);
        assert!(config.has_headline_tags);
        assert!(!config.has_headline_optic);
        assert_eq!(
            config.block_types_excluded_from_spacing,
            BTreeSet::from(["ElementA".to_string(), "ElementB".to_string()])
        );
        assert!(
            config
                .block_types_excluded_from_borders
                .contains(VIRTUAL_BLOCK_TYPE)
        );
    }

    #[test]
    fn lookup_rejects_bad_flag() {
        let err = FeatureConfig::from_lookup(|k| {
            (k == "BLOCKSTYLE_HAS_BORDERS").then(|| "maybe".to_string())
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnv { ref var, ref value }
                if var == "BLOCKSTYLE_HAS_BORDERS" && value == "maybe"
        ));
    }

    #[test]
    fn unsupported_extension() {
        let err = FeatureConfig::load_from_path("features.json").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));

        let err = FeatureConfig::load_from_path("does-not-exist.yml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
