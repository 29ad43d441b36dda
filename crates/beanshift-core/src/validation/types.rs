//! Core validation types
//!
//! This module contains the constraint declarations attached to bean fields,
//! the violations they produce, and the [`Validation`] sum type returned by
//! the validator before any error is raised.
//!
//! Copyright (c) 2025 Beanshift Team
//! Licensed under the Apache-2.0 license

use crate::types::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the type name and the property path of a violation
pub const PATH_SEPARATOR: &str = ".";
/// Separator between violations in an aggregated message
pub const VIOLATION_SEPARATOR: &str = ";";

/// The rule a constraint enforces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConstraintKind {
    NotNull,
    NotBlank,
    NotEmpty,
    Positive,
    PositiveOrZero,
    Negative,
    Min { value: i64 },
    Max { value: i64 },
    Size { min: usize, max: usize },
    Pattern { regex: String },
    /// Cascade validation into nested beans
    Valid,
}

/// A constraint declared on a field, with an optional message override
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    #[serde(flatten)]
    pub kind: ConstraintKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Constraint {
    pub fn new(kind: ConstraintKind) -> Self {
        Self { kind, message: None }
    }

    pub fn not_null() -> Self {
        Self::new(ConstraintKind::NotNull)
    }

    pub fn not_blank() -> Self {
        Self::new(ConstraintKind::NotBlank)
    }

    pub fn not_empty() -> Self {
        Self::new(ConstraintKind::NotEmpty)
    }

    pub fn positive() -> Self {
        Self::new(ConstraintKind::Positive)
    }

    pub fn positive_or_zero() -> Self {
        Self::new(ConstraintKind::PositiveOrZero)
    }

    pub fn negative() -> Self {
        Self::new(ConstraintKind::Negative)
    }

    pub fn min(value: i64) -> Self {
        Self::new(ConstraintKind::Min { value })
    }

    pub fn max(value: i64) -> Self {
        Self::new(ConstraintKind::Max { value })
    }

    pub fn size(min: usize, max: usize) -> Self {
        Self::new(ConstraintKind::Size { min, max })
    }

    pub fn pattern(regex: impl Into<String>) -> Self {
        Self::new(ConstraintKind::Pattern {
            regex: regex.into(),
        })
    }

    pub fn valid() -> Self {
        Self::new(ConstraintKind::Valid)
    }

    /// Override the default violation message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Message reported when this constraint is violated
    pub fn violation_message(&self) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        match &self.kind {
            ConstraintKind::NotNull => "must not be null".to_string(),
            ConstraintKind::NotBlank => "must not be blank".to_string(),
            ConstraintKind::NotEmpty => "must not be empty".to_string(),
            ConstraintKind::Positive => "must be positive".to_string(),
            ConstraintKind::PositiveOrZero => "must be greater than or equal to 0".to_string(),
            ConstraintKind::Negative => "must be negative".to_string(),
            ConstraintKind::Min { value } => format!("must be greater than or equal to {}", value),
            ConstraintKind::Max { value } => format!("must be less than or equal to {}", value),
            ConstraintKind::Size { min, max } => {
                format!("size must be between {} and {}", min, max)
            }
            ConstraintKind::Pattern { regex } => format!("must match \"{}\"", regex),
            ConstraintKind::Valid => "must be valid".to_string(),
        }
    }
}

/// A single failed constraint
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintViolation {
    /// Type name of the object passed to the validator
    pub root_type: String,
    /// Dotted path from the root object to the offending property
    pub property_path: String,
    pub message: String,
    pub invalid_value: Value,
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{} {}",
            self.root_type, PATH_SEPARATOR, self.property_path, self.message
        )
    }
}

/// Outcome of checking an object's constraints
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Valid,
    /// Every violation found, in discovery order; never empty
    Invalid(Vec<ConstraintViolation>),
}

impl Validation {
    pub(crate) fn from_violations(violations: Vec<ConstraintViolation>) -> Self {
        if violations.is_empty() {
            Validation::Valid
        } else {
            Validation::Invalid(violations)
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    pub fn violations(&self) -> &[ConstraintViolation] {
        match self {
            Validation::Valid => &[],
            Validation::Invalid(violations) => violations,
        }
    }

    /// All violations rendered and joined into one message
    pub fn aggregated_message(&self) -> String {
        join_violations(self.violations())
    }

    /// Convert into a `Result`, raising [`crate::Error::InvalidBean`] on violations
    pub fn into_result(self) -> crate::Result<()> {
        match self {
            Validation::Valid => Ok(()),
            Validation::Invalid(violations) => Err(crate::Error::InvalidBean {
                message: join_violations(&violations),
                violations,
            }),
        }
    }
}

fn join_violations(violations: &[ConstraintViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(VIOLATION_SEPARATOR)
}
