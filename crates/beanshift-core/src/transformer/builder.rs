//! Builder for configuring a bean transformer
//!
//! Copyright (c) 2025 Beanshift Team
//! Licensed under the Apache-2.0 license

use super::{BeanTransformer, FieldTransformerFn};
use crate::config::TransformerSettings;
use crate::guard::not_null_with;
use crate::registry::TypeRegistry;
use crate::resolver::{RegistryTypeResolver, TypeResolver};
use crate::types::Value;
use crate::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// Fluent builder for [`BeanTransformer`]
///
/// Field keys accepted by [`field_mapping`](Self::field_mapping),
/// [`skip_field`](Self::skip_field) and
/// [`field_transformer`](Self::field_transformer) are either `"Type.field"`
/// or a bare `"field"` applying to every target type.
#[derive(Default)]
pub struct TransformerBuilder {
    registry: Option<Arc<TypeRegistry>>,
    settings: TransformerSettings,
    resolver: Option<Box<dyn TypeResolver>>,
    field_transformers: HashMap<String, FieldTransformerFn>,
    env_overrides: bool,
}

impl TransformerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the registry of target type descriptors (required)
    pub fn registry(mut self, registry: Arc<TypeRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Replace all settings, e.g. with ones loaded from a TOML file
    pub fn settings(mut self, settings: TransformerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Validate top-level results
    pub fn validation(mut self, enabled: bool) -> Self {
        self.settings.validation_enabled = enabled;
        self
    }

    /// Use default values for target fields missing from the source
    pub fn default_value_for_missing_field(mut self, enabled: bool) -> Self {
        self.settings.default_value_for_missing_field = enabled;
        self
    }

    pub fn primitive_type_conversion(mut self, enabled: bool) -> Self {
        self.settings.primitive_type_conversion = enabled;
        self
    }

    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.settings.parallel_threshold = threshold;
        self
    }

    pub fn max_parallelism(mut self, workers: usize) -> Self {
        self.settings.max_parallelism = workers;
        self
    }

    /// Copy beans of `type_name` as-is instead of transforming them
    pub fn special_type(mut self, type_name: impl Into<String>) -> Self {
        self.settings.special_types.insert(type_name.into());
        self
    }

    /// Read the destination field from `source_path` in the source bean
    pub fn field_mapping(
        mut self,
        destination: impl Into<String>,
        source_path: impl Into<String>,
    ) -> Self {
        self.settings
            .field_mappings
            .insert(destination.into(), source_path.into());
        self
    }

    /// Leave the destination field unset
    pub fn skip_field(mut self, destination: impl Into<String>) -> Self {
        self.settings.skipped_fields.insert(destination.into());
        self
    }

    /// Apply `function` to the populated value of the destination field
    pub fn field_transformer<F>(mut self, destination: impl Into<String>, function: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.field_transformers
            .insert(destination.into(), Arc::new(function));
        self
    }

    /// Use a custom element type resolver instead of the registry-backed one
    pub fn type_resolver(mut self, resolver: impl TypeResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Apply `BEANSHIFT_*` environment overrides when building
    pub fn with_env_overrides(mut self) -> Self {
        self.env_overrides = true;
        self
    }

    /// Build the transformer
    pub fn build(self) -> Result<BeanTransformer> {
        let registry = not_null_with(self.registry, "A type registry is required")?;

        let mut settings = self.settings;
        if self.env_overrides {
            settings.merge_with_env()?;
        }
        settings.validate()?;

        let resolver = self
            .resolver
            .unwrap_or_else(|| Box::new(RegistryTypeResolver::new(Arc::clone(&registry))));

        tracing::debug!(
            types = registry.len(),
            validation = settings.validation_enabled,
            parallel_threshold = settings.parallel_threshold,
            max_parallelism = settings.max_parallelism,
            "building bean transformer"
        );
        Ok(BeanTransformer::new(
            registry,
            resolver,
            settings,
            self.field_transformers,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transformer::Transformer;
    use crate::Error;

    #[test]
    fn test_registry_is_required() {
        let err = TransformerBuilder::new().build().unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument: A type registry is required");
    }

    #[test]
    fn test_settings_are_applied() -> Result<()> {
        let transformer = TransformerBuilder::new()
            .registry(Arc::new(TypeRegistry::new()))
            .validation(true)
            .parallel_threshold(10)
            .max_parallelism(2)
            .special_type("Money")
            .skip_field("password")
            .build()?;

        let settings = transformer.settings();
        assert!(settings.validation_enabled);
        assert_eq!(settings.parallel_threshold, 10);
        assert_eq!(settings.max_parallelism, 2);
        assert!(settings.special_types.contains("Money"));
        assert!(settings.is_skipped("Any", "password"));
        Ok(())
    }

    #[test]
    fn test_zero_parallelism_is_rejected() {
        let result = TransformerBuilder::new()
            .registry(Arc::new(TypeRegistry::new()))
            .max_parallelism(0)
            .build();
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }
}
