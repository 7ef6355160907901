//! # Transformer Configuration
//!
//! Tunables for [`Transformer`](crate::Transformer). Every key is optional
//! and falls back to its default, so an empty YAML document is a valid
//! configuration:
//!
//! ```yaml
//! root_label: root   # path reported for errors at the root of the input
//! max_depth: 64      # maximum nesting of target types
//! ```

use std::path::Path;

use hydrate_core::path::DEFAULT_ROOT_LABEL;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error loading a [`TransformConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config '{path}': {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid YAML for this shape.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A value is out of range.
    #[error("invalid config value for '{key}': {reason}")]
    Invalid {
        /// Offending key.
        key: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// Transformer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformConfig {
    /// Path reported for errors at the root of the input.
    #[serde(default = "default_root_label")]
    pub root_label: String,
    /// Maximum nesting of target types before the transform aborts.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_root_label() -> String {
    DEFAULT_ROOT_LABEL.to_string()
}

fn default_max_depth() -> usize {
    64
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            root_label: default_root_label(),
            max_depth: default_max_depth(),
        }
    }
}

impl TransformConfig {
    /// Parse and validate a YAML configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed YAML or unknown keys, and
    /// `ConfigError::Invalid` for out-of-range values.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as null rather than an empty map.
        let config: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise as
    /// [`from_yaml_str`](Self::from_yaml_str).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for an empty root label or a zero
    /// maximum depth.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root_label.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "root_label",
                reason: "must not be empty".to_string(),
            });
        }
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid {
                key: "max_depth",
                reason: "must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TransformConfig::default();
        assert_eq!(config.root_label, "root");
        assert_eq!(config.max_depth, 64);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(TransformConfig::from_yaml_str("").unwrap(), TransformConfig::default());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = TransformConfig::from_yaml_str("max_depth: 8\n").unwrap();
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.root_label, "root");
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(
            TransformConfig::from_yaml_str("max_dept: 8\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_zero_depth_rejected() {
        assert!(matches!(
            TransformConfig::from_yaml_str("max_depth: 0\n"),
            Err(ConfigError::Invalid { key: "max_depth", .. })
        ));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hydrate.yaml");
        std::fs::write(&path, "root_label: input\n").unwrap();
        let config = TransformConfig::from_path(&path).unwrap();
        assert_eq!(config.root_label, "input");
        assert!(matches!(
            TransformConfig::from_path(dir.path().join("absent.yaml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
