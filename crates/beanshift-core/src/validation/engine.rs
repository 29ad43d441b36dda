//! Constraint evaluation engine
//!
//! The engine walks a bean against the descriptors in a [`TypeRegistry`] and
//! collects every violation in discovery order: fields in declaration order,
//! constraints in declaration order, with cascaded nested beans visited in
//! place. Compiled patterns are kept for the life of the engine, which is why
//! a single engine is shared process-wide through the cache.
//!
//! Copyright (c) 2025 Beanshift Team
//! Licensed under the Apache-2.0 license

use super::{Constraint, ConstraintKind, ConstraintViolation};
use crate::registry::TypeRegistry;
use crate::types::{Bean, Value};
use crate::{Error, Result};
use dashmap::DashMap;
use regex::Regex;
use std::sync::atomic::{AtomicUsize, Ordering};

static ENGINES_BUILT: AtomicUsize = AtomicUsize::new(0);

/// Evaluates declared constraints over populated beans
#[derive(Debug)]
pub struct ConstraintEngine {
    patterns: DashMap<String, Regex>,
}

impl ConstraintEngine {
    pub(crate) fn new() -> Self {
        ENGINES_BUILT.fetch_add(1, Ordering::SeqCst);
        tracing::debug!("building constraint engine");
        Self {
            patterns: DashMap::new(),
        }
    }

    /// Number of engines constructed by this process
    pub fn instances_built() -> usize {
        ENGINES_BUILT.load(Ordering::SeqCst)
    }

    /// Collect every violation of `bean` and its cascaded children
    pub fn evaluate(
        &self,
        bean: &Bean,
        registry: &TypeRegistry,
    ) -> Result<Vec<ConstraintViolation>> {
        let mut violations = Vec::new();
        self.walk(&bean.type_name, "", bean, registry, &mut violations)?;
        Ok(violations)
    }

    fn walk(
        &self,
        root_type: &str,
        prefix: &str,
        bean: &Bean,
        registry: &TypeRegistry,
        out: &mut Vec<ConstraintViolation>,
    ) -> Result<()> {
        let Some(descriptor) = registry.get(&bean.type_name) else {
            return Ok(());
        };

        for field in &descriptor.fields {
            let value = bean.get(&field.name).unwrap_or(&Value::Null);
            let path = if prefix.is_empty() {
                field.name.clone()
            } else {
                format!("{}.{}", prefix, field.name)
            };

            for constraint in &field.constraints {
                if constraint.kind == ConstraintKind::Valid {
                    self.cascade(root_type, &path, value, registry, out)?;
                } else if !self.satisfies(constraint, value)? {
                    out.push(ConstraintViolation {
                        root_type: root_type.to_string(),
                        property_path: path.clone(),
                        message: constraint.violation_message(),
                        invalid_value: value.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn cascade(
        &self,
        root_type: &str,
        path: &str,
        value: &Value,
        registry: &TypeRegistry,
        out: &mut Vec<ConstraintViolation>,
    ) -> Result<()> {
        match value {
            Value::Bean(nested) => self.walk(root_type, path, nested, registry, out),
            Value::List(items) | Value::Set(items) => {
                for (index, item) in items.iter().enumerate() {
                    self.cascade(root_type, &format!("{}[{}]", path, index), item, registry, out)?;
                }
                Ok(())
            }
            Value::Map(entries) => {
                for (key, item) in entries {
                    self.cascade(root_type, &format!("{}[{}]", path, key), item, registry, out)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn satisfies(&self, constraint: &Constraint, value: &Value) -> Result<bool> {
        let ok = match (&constraint.kind, value) {
            (ConstraintKind::NotNull, v) => !v.is_null(),
            (ConstraintKind::NotBlank, Value::Str(s)) => !s.trim().is_empty(),
            (ConstraintKind::NotBlank, v) => !v.is_null(),
            (ConstraintKind::NotEmpty, v) => match size_of(v) {
                Some(size) => size > 0,
                None => !v.is_null(),
            },
            // Remaining constraints accept null
            (_, Value::Null) => true,
            (ConstraintKind::Positive, v) => numeric(v).map_or(true, |n| n > 0.0),
            (ConstraintKind::PositiveOrZero, v) => numeric(v).map_or(true, |n| n >= 0.0),
            (ConstraintKind::Negative, v) => numeric(v).map_or(true, |n| n < 0.0),
            (ConstraintKind::Min { value: min }, Value::Int(n)) => n >= min,
            (ConstraintKind::Max { value: max }, Value::Int(n)) => n <= max,
            (ConstraintKind::Min { value: min }, v) => {
                numeric(v).map_or(true, |n| n >= *min as f64)
            }
            (ConstraintKind::Max { value: max }, v) => {
                numeric(v).map_or(true, |n| n <= *max as f64)
            }
            (ConstraintKind::Size { min, max }, v) => {
                size_of(v).map_or(true, |size| size >= *min && size <= *max)
            }
            (ConstraintKind::Pattern { regex }, Value::Str(s)) => self.is_match(regex, s)?,
            (ConstraintKind::Pattern { .. }, _) => true,
            (ConstraintKind::Valid, _) => true,
        };
        Ok(ok)
    }

    /// Full-string match against a compiled, memoized pattern
    fn is_match(&self, pattern: &str, text: &str) -> Result<bool> {
        if let Some(regex) = self.patterns.get(pattern) {
            return Ok(regex.is_match(text));
        }

        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| Error::InvalidArgument {
            message: Some(format!("Invalid pattern '{}': {}", pattern, e)),
        })?;
        let matched = regex.is_match(text);
        self.patterns.insert(pattern.to_string(), regex);
        Ok(matched)
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Int(n) => Some(*n as f64),
        Value::Float(n) => Some(*n),
        Value::Decimal(d) => d.trim().parse().ok(),
        _ => None,
    }
}

fn size_of(value: &Value) -> Option<usize> {
    match value {
        Value::Str(s) => Some(s.chars().count()),
        Value::List(items) | Value::Set(items) => Some(items.len()),
        Value::Map(entries) => Some(entries.len()),
        _ => None,
    }
}
