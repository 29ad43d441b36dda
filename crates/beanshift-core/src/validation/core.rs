//! Validation gate applied to transformation results
//!
//! Copyright (c) 2025 Beanshift Team
//! Licensed under the Apache-2.0 license

use super::engine::ConstraintEngine;
use super::Validation;
use crate::cache::{cache_manager, namespaces, CacheManager};
use crate::registry::TypeRegistry;
use crate::types::Value;
use crate::Result;
use std::sync::Arc;

/// Cache key of the shared constraint engine
pub const BEAN_VALIDATOR_KEY: &str = "BeanValidator";

/// Checks populated objects against the constraints declared in a registry
///
/// The underlying [`ConstraintEngine`] is built at most once per process and
/// shared through the [`namespaces::VALIDATION`] cache namespace; creating a
/// `Validator` is cheap.
#[derive(Debug, Clone)]
pub struct Validator {
    registry: Arc<TypeRegistry>,
    cache: Arc<CacheManager>,
}

impl Validator {
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self {
            registry,
            cache: cache_manager(namespaces::VALIDATION),
        }
    }

    /// Fail with the aggregated violations of `value`, if any
    pub fn validate(&self, value: &Value) -> Result<()> {
        let validation = self.check(value)?;
        if let Validation::Invalid(violations) = &validation {
            tracing::debug!(violations = violations.len(), "validation failed");
        }
        validation.into_result()
    }

    /// Compute the full set of violations without raising them
    ///
    /// Only beans carry constraints; any other value is valid.
    pub fn check(&self, value: &Value) -> Result<Validation> {
        let Value::Bean(bean) = value else {
            return Ok(Validation::Valid);
        };
        let violations = self.engine()?.evaluate(bean, &self.registry)?;
        Ok(Validation::from_violations(violations))
    }

    fn engine(&self) -> Result<Arc<ConstraintEngine>> {
        self.cache.get_or_compute(BEAN_VALIDATOR_KEY, ConstraintEngine::new)
    }
}
