#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Integration tests for loading feature config files.

use std::path::PathBuf;

use blockstyle::config::VIRTUAL_BLOCK_TYPE;
use blockstyle::{ConfigError, ConfigResolver, FeatureConfig};

/// Write `content` to a uniquely named file in the temp directory.
fn write_temp(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("blockstyle-{}-{name}", std::process::id()));
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn load_yaml_file() {
    let path = write_temp(
        "features.yml",
        "has_spacing: true\nhas_borders: true\nclasses_without_borders: [ElementHero]\n",
    );

    let config = FeatureConfig::load_from_path(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let resolver = ConfigResolver::new(config);
    assert!(resolver.is_spacing_enabled("ElementHero"));
    assert!(!resolver.is_borders_enabled("ElementHero"));
    // An explicit list replaces the default one.
    assert!(resolver.is_borders_enabled(VIRTUAL_BLOCK_TYPE));
    assert!(!resolver.is_spacing_enabled(VIRTUAL_BLOCK_TYPE));
}

#[test]
fn load_toml_file() {
    let path = write_temp(
        "features.toml",
        "has_headline_tags = true\nhas_headline_optic = true\n",
    );

    let config = FeatureConfig::load_from_path(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert!(config.has_headline_tags);
    assert!(config.has_headline_optic);
    assert!(!config.has_spacing);
}

#[test]
fn parse_error_names_file() {
    let path = write_temp("broken.yml", "has_spacing: [not, a, bool]\n");

    let err = FeatureConfig::load_from_path(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, ConfigError::ParseYaml { .. }));
    assert!(err.to_string().contains("broken.yml"));
}

#[test]
fn unknown_block_types_are_not_excluded() {
    let resolver = ConfigResolver::new(FeatureConfig::all_enabled());
    for block_type in ["ElementContent", "", "Some\\Namespaced\\Element"] {
        assert!(resolver.is_spacing_enabled(block_type));
        assert!(resolver.is_borders_enabled(block_type));
    }
}
