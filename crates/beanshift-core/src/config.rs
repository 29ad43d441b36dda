//! Transformer configuration
//!
//! Settings are loaded and merged from:
//! - Default values
//! - TOML documents (string or file)
//! - Environment variables (`BEANSHIFT_*`)
//!
//! Builder methods on [`TransformerBuilder`](crate::TransformerBuilder) apply
//! on top of whatever was loaded here.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Environment variable toggling result validation
pub const ENV_VALIDATION: &str = "BEANSHIFT_VALIDATION";
/// Environment variable overriding [`TransformerSettings::parallel_threshold`]
pub const ENV_PARALLEL_THRESHOLD: &str = "BEANSHIFT_PARALLEL_THRESHOLD";
/// Environment variable overriding [`TransformerSettings::max_parallelism`]
pub const ENV_MAX_PARALLELISM: &str = "BEANSHIFT_MAX_PARALLELISM";

/// Behavior switches for a transformer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformerSettings {
    /// Validate the top-level result against its declared constraints
    pub validation_enabled: bool,

    /// Use a default value when a target field has no source counterpart
    pub default_value_for_missing_field: bool,

    /// Convert between primitive kinds when source and target differ
    pub primitive_type_conversion: bool,

    /// Containers at least this large are transformed on worker threads
    pub parallel_threshold: usize,

    /// Upper bound on worker threads per container
    pub max_parallelism: usize,

    /// Extra bean type names copied as-is instead of being transformed
    pub special_types: BTreeSet<String>,

    /// Destination field → source field path.
    ///
    /// Keys are either `"Type.field"` or a bare `"field"` that applies to
    /// every type; the qualified form wins.
    pub field_mappings: BTreeMap<String, String>,

    /// Destination fields left unset, keyed like `field_mappings`
    pub skipped_fields: BTreeSet<String>,
}

impl Default for TransformerSettings {
    fn default() -> Self {
        Self {
            validation_enabled: false,
            default_value_for_missing_field: false,
            primitive_type_conversion: true,
            parallel_threshold: 64,
            max_parallelism: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            special_types: BTreeSet::new(),
            field_mappings: BTreeMap::new(),
            skipped_fields: BTreeSet::new(),
        }
    }
}

impl TransformerSettings {
    /// Parse settings from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::Configuration {
            message: format!("Failed to read config file '{}'", path.display()),
            source: Some(e.into()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply `BEANSHIFT_*` environment overrides
    pub fn merge_with_env(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var(ENV_VALIDATION) {
            self.validation_enabled = parse_flag(ENV_VALIDATION, &value)?;
        }

        if let Ok(value) = std::env::var(ENV_PARALLEL_THRESHOLD) {
            self.parallel_threshold = parse_number(ENV_PARALLEL_THRESHOLD, &value)?;
        }

        if let Ok(value) = std::env::var(ENV_MAX_PARALLELISM) {
            self.max_parallelism = parse_number(ENV_MAX_PARALLELISM, &value)?;
        }

        self.validate()
    }

    /// Source path mapped to `field` of `type_name`, if any
    pub fn mapped_source<'a>(&'a self, type_name: &str, field: &str) -> Option<&'a str> {
        self.field_mappings
            .get(&format!("{}.{}", type_name, field))
            .or_else(|| self.field_mappings.get(field))
            .map(String::as_str)
    }

    /// Whether `field` of `type_name` is skipped
    pub fn is_skipped(&self, type_name: &str, field: &str) -> bool {
        self.skipped_fields.contains(&format!("{}.{}", type_name, field))
            || self.skipped_fields.contains(field)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_parallelism == 0 {
            return Err(Error::Configuration {
                message: "max_parallelism must be at least 1".to_string(),
                source: None,
            });
        }
        Ok(())
    }
}

fn parse_flag(var: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(Error::Configuration {
            message: format!("Invalid boolean for {}: {}", var, value),
            source: None,
        }),
    }
}

fn parse_number(var: &str, value: &str) -> Result<usize> {
    value.trim().parse().map_err(|e: std::num::ParseIntError| Error::Configuration {
        message: format!("Invalid number for {}: {}", var, value),
        source: Some(e.into()),
    })
}
