//! Validation of populated objects against declared constraints
//!
//! The validator is organized into focused modules:
//! - `types`: constraint declarations, violations and the [`Validation`] result
//! - `engine`: the shared constraint evaluation engine
//! - `core`: the [`Validator`] gate used by transformers
//!
//! Copyright (c) 2025 Beanshift Team
//! Licensed under the Apache-2.0 license

pub mod core;
pub mod engine;
pub mod types;

// Re-export public API
pub use self::core::{Validator, BEAN_VALIDATOR_KEY};
pub use engine::ConstraintEngine;
pub use types::{
    Constraint, ConstraintKind, ConstraintViolation, Validation, PATH_SEPARATOR,
    VIOLATION_SEPARATOR,
};
