//! Environment overrides for transformer settings
//!
//! Kept in its own test binary: environment variables are process-wide.

use beanshift_core::config::{ENV_MAX_PARALLELISM, ENV_PARALLEL_THRESHOLD, ENV_VALIDATION};
use beanshift_core::{Error, TransformerBuilder, TransformerSettings, TypeRegistry};
use std::sync::Arc;

#[test]
fn test_environment_overrides() {
    std::env::set_var(ENV_VALIDATION, "true");
    std::env::set_var(ENV_PARALLEL_THRESHOLD, "16");
    std::env::set_var(ENV_MAX_PARALLELISM, "3");

    let mut settings = TransformerSettings::default();
    settings.merge_with_env().unwrap();
    assert!(settings.validation_enabled);
    assert_eq!(settings.parallel_threshold, 16);
    assert_eq!(settings.max_parallelism, 3);

    let transformer = TransformerBuilder::new()
        .registry(Arc::new(TypeRegistry::new()))
        .validation(false)
        .with_env_overrides()
        .build()
        .unwrap();
    assert!(beanshift_core::Transformer::settings(&transformer).validation_enabled);

    std::env::set_var(ENV_MAX_PARALLELISM, "zero");
    let err = TransformerSettings::default().merge_with_env().unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));

    std::env::set_var(ENV_MAX_PARALLELISM, "0");
    let err = TransformerSettings::default().merge_with_env().unwrap_err();
    assert!(err.to_string().contains("max_parallelism"));

    std::env::remove_var(ENV_VALIDATION);
    std::env::remove_var(ENV_PARALLEL_THRESHOLD);
    std::env::remove_var(ENV_MAX_PARALLELISM);
}
