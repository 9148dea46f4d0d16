//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a [`FeatureConfig`](crate::config::FeatureConfig).
///
/// The styling logic itself never fails; only configuration sources can.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse YAML config {}: {source}", path.display())]
    ParseYaml {
        path: PathBuf,
        source: serde_yml::Error,
    },

    #[error("failed to parse TOML config {}: {source}", path.display())]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("unsupported config format for {} (expected .yml, .yaml or .toml)", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: String, value: String },
}

/// Result type alias using ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;
