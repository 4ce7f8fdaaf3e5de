//! Generator configuration loading from YAML files
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working configuration.

use crate::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings that shape the emitted source
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Path through which generated code reaches the runtime types
    pub runtime_crate: String,
    /// Receiver field holding the runtime `Service` handle
    pub service_field: String,
    /// Module prefix the default shape resolver puts before shape names
    pub types_module: String,
    /// Whether aggregated files start with an auto-generated notice
    pub header: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            runtime_crate: "opgen_runtime".to_string(),
            service_field: "service".to_string(),
            types_module: "crate::types".to_string(),
            header: true,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content).map_err(|e| {
            GeneratorError::Config(format!("Failed to parse config {:?}: {}", path, e))
        })
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that path-like settings are usable in generated code
    pub fn validate(&self) -> Result<()> {
        if !is_rust_path(&self.runtime_crate) {
            return Err(GeneratorError::Config(format!(
                "runtime_crate '{}' is not a Rust path",
                self.runtime_crate
            )));
        }
        if !is_rust_path(&self.types_module) {
            return Err(GeneratorError::Config(format!(
                "types_module '{}' is not a Rust path",
                self.types_module
            )));
        }
        if self.service_field.is_empty() || self.service_field.contains("::") {
            return Err(GeneratorError::Config(format!(
                "service_field '{}' is not a field name",
                self.service_field
            )));
        }
        Ok(())
    }
}

fn is_rust_path(path: &str) -> bool {
    !path.is_empty()
        && path.split("::").all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
