use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{RegistryError, Result};
use crate::handlers::builtin_handlers;
use crate::options::{CssConversionOptions, ScssConversionOptions};
use crate::registry::Registry;
use crate::types::TokenType;

/// Converter configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Detection policy
    pub detection: DetectionConfig,

    /// Default CSS render options
    pub css: CssConversionOptions,

    /// Default SCSS render options
    pub scss: ScssConversionOptions,

    /// Built-in handlers to leave out of the registry
    pub disabled_types: Vec<TokenType>,
}

/// Detection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Type assigned to values no handler claims; `None` makes them an error
    pub fallback: Option<TokenType>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            fallback: Some(TokenType::String),
        }
    }
}

impl ConverterConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RegistryError::ConfigError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        serde_yaml::from_str(&content).map_err(|e| RegistryError::ConfigError {
            message: format!("Failed to parse YAML config: {}", e),
        })
    }

    /// Load configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RegistryError::ConfigError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        serde_json::from_str(&content).map_err(|e| RegistryError::ConfigError {
            message: format!("Failed to parse JSON config: {}", e),
        })
    }

    /// Load configuration from a file (auto-detect format)
    pub fn from_file(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(RegistryError::ConfigError {
                message: format!(
                    "Unsupported config file format: {}. Use .yaml, .yml, or .json",
                    path.display()
                ),
            }),
        }
    }

    /// Merge with another configuration; settings present in `other` win
    pub fn merge(mut self, other: Self) -> Self {
        if other.detection != DetectionConfig::default() {
            self.detection = other.detection;
        }

        if other.css.color_format.is_some() {
            self.css.color_format = other.css.color_format;
        }
        if other.css.prefix.is_some() {
            self.css.prefix = other.css.prefix;
        }
        if other.scss.color_format.is_some() {
            self.scss.color_format = other.scss.color_format;
        }
        if other.scss.prefix.is_some() {
            self.scss.prefix = other.scss.prefix;
        }

        for token_type in other.disabled_types {
            if !self.disabled_types.contains(&token_type) {
                self.disabled_types.push(token_type);
            }
        }

        self
    }

    /// Build a registry from the built-in handlers, honoring the disabled
    /// types and the detection fallback.
    pub fn build_registry(&self) -> Result<Registry> {
        if let Some(fallback) = &self.detection.fallback {
            if self.disabled_types.contains(fallback) {
                return Err(RegistryError::ConfigError {
                    message: format!("Fallback type '{}' is disabled", fallback),
                });
            }
        }

        let mut registry = Registry::new();
        for handler in builtin_handlers() {
            if !self.disabled_types.contains(handler.token_type()) {
                registry.register(handler)?;
            }
        }

        if let Some(fallback) = &self.detection.fallback {
            if !registry.contains(fallback) {
                return Err(RegistryError::ConfigError {
                    message: format!("Fallback type '{}' has no handler", fallback),
                });
            }
        }
        registry.set_fallback(self.detection.fallback.clone());
        Ok(registry)
    }
}
