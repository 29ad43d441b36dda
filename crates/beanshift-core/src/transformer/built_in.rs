//! Built-in field transformer functions
//!
//! Ready-made functions for
//! [`TransformerBuilder::field_transformer`](super::TransformerBuilder::field_transformer).
//! String functions leave non-string values untouched.
//!
//! Copyright (c) 2025 Beanshift Team
//! Licensed under the Apache-2.0 license

use crate::types::Value;

/// Trim surrounding whitespace
pub fn trim() -> impl Fn(&Value) -> Value + Send + Sync + 'static {
    map_str(|s| s.trim().to_string())
}

/// Convert to upper case
pub fn uppercase() -> impl Fn(&Value) -> Value + Send + Sync + 'static {
    map_str(str::to_uppercase)
}

/// Convert to lower case
pub fn lowercase() -> impl Fn(&Value) -> Value + Send + Sync + 'static {
    map_str(str::to_lowercase)
}

/// Replace null with `default`
pub fn default_if_null(
    default: impl Into<Value>,
) -> impl Fn(&Value) -> Value + Send + Sync + 'static {
    let default = default.into();
    move |value| {
        if value.is_null() {
            default.clone()
        } else {
            value.clone()
        }
    }
}

/// Always produce `constant`, whatever the source holds
pub fn constant(constant: impl Into<Value>) -> impl Fn(&Value) -> Value + Send + Sync + 'static {
    let constant = constant.into();
    move |_| constant.clone()
}

/// Render any non-null value as a string
pub fn to_text() -> impl Fn(&Value) -> Value + Send + Sync + 'static {
    |value| match value {
        Value::Null => Value::Null,
        Value::Str(_) => value.clone(),
        other => Value::Str(other.to_string()),
    }
}

fn map_str<F>(f: F) -> impl Fn(&Value) -> Value + Send + Sync + 'static
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    move |value| match value {
        Value::Str(s) => Value::Str(f(s)),
        other => other.clone(),
    }
}
