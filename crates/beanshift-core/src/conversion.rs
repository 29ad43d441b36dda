//! Primitive and special type conversion
//!
//! Conversion functions are looked up once per `(source, target)` pair and
//! memoized in the [`namespaces::CONVERSION`] cache namespace.
//!
//! Copyright (c) 2025 Beanshift Team
//! Licensed under the Apache-2.0 license

use crate::cache::{cache_manager, namespaces, CacheKey, CacheManager};
use crate::descriptor::{PrimitiveKind, SpecialKind, TypeRef};
use crate::types::Value;
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;

/// A conversion between two scalar types; `None` when the input does not parse
pub type ConversionFn = fn(&Value) -> Option<Value>;

/// Finds and applies conversions between primitive and special types
#[derive(Debug, Clone)]
pub struct ConversionAnalyzer {
    cache: Arc<CacheManager>,
}

impl ConversionAnalyzer {
    pub fn new() -> Self {
        Self {
            cache: cache_manager(namespaces::CONVERSION),
        }
    }

    /// Convert `value` into `target`
    ///
    /// Values already of the target type are returned unchanged.
    pub fn convert(&self, value: &Value, target: &TypeRef) -> Result<Value> {
        let Some(source) = value.runtime_type() else {
            return Ok(Value::Null);
        };
        if &source == target {
            return Ok(value.clone());
        }

        let conversion = self
            .conversion_function(&source, target)?
            .ok_or_else(|| Error::Conversion {
                from: source.to_string(),
                to: target.to_string(),
                value: value.to_string(),
            })?;

        conversion(value).ok_or_else(|| Error::Conversion {
            from: source.to_string(),
            to: target.to_string(),
            value: value.to_string(),
        })
    }

    /// Memoized lookup of the conversion for a type pair
    pub fn conversion_function(
        &self,
        source: &TypeRef,
        target: &TypeRef,
    ) -> Result<Option<ConversionFn>> {
        let key = CacheKey::composite([
            "conversion".to_string(),
            source.to_string(),
            target.to_string(),
        ]);
        let function = self
            .cache
            .get_or_compute(key, || lookup_conversion(source, target))?;
        Ok(*function)
    }
}

impl Default for ConversionAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn lookup_conversion(source: &TypeRef, target: &TypeRef) -> Option<ConversionFn> {
    use PrimitiveKind as P;
    use SpecialKind as S;

    let (TypeRef::Primitive(_) | TypeRef::Special(_)) = source else {
        return None;
    };

    let function: ConversionFn = match target {
        TypeRef::Special(S::String) => to_string,
        TypeRef::Primitive(P::Int) => to_int,
        TypeRef::Primitive(P::Float) => to_float,
        TypeRef::Primitive(P::Bool) => to_bool,
        TypeRef::Primitive(P::Char) => to_char,
        TypeRef::Special(S::Decimal) => to_decimal,
        TypeRef::Special(S::Date) => to_date,
        TypeRef::Special(S::DateTime) => to_date_time,
        _ => return None,
    };
    Some(function)
}

fn to_string(value: &Value) -> Option<Value> {
    match value {
        Value::Bool(_)
        | Value::Int(_)
        | Value::Float(_)
        | Value::Char(_)
        | Value::Str(_)
        | Value::Date(_)
        | Value::DateTime(_)
        | Value::Decimal(_) => Some(Value::Str(value.to_string())),
        _ => None,
    }
}

fn to_int(value: &Value) -> Option<Value> {
    let n = match value {
        Value::Int(n) => *n,
        // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
        Value::Float(f) if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 => {
            *f as i64
        }
        Value::Bool(b) => i64::from(*b),
        Value::Char(c) => i64::from(u32::from(*c)),
        Value::Str(s) | Value::Decimal(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    Some(Value::Int(n))
}

fn to_float(value: &Value) -> Option<Value> {
    let n = match value {
        Value::Float(f) => *f,
        Value::Int(n) => *n as f64,
        Value::Str(s) | Value::Decimal(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    Some(Value::Float(n))
}

fn to_bool(value: &Value) -> Option<Value> {
    let b = match value {
        Value::Bool(b) => *b,
        Value::Int(0) => false,
        Value::Int(1) => true,
        Value::Str(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => true,
            "false" | "no" | "0" | "off" => false,
            _ => return None,
        },
        _ => return None,
    };
    Some(Value::Bool(b))
}

fn to_char(value: &Value) -> Option<Value> {
    match value {
        Value::Char(c) => Some(Value::Char(*c)),
        Value::Int(n) => u32::try_from(*n).ok().and_then(char::from_u32).map(Value::Char),
        Value::Str(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Value::Char(c)),
                _ => None,
            }
        }
        _ => None,
    }
}

fn to_decimal(value: &Value) -> Option<Value> {
    match value {
        Value::Int(n) => Some(Value::Decimal(n.to_string())),
        Value::Float(f) if f.is_finite() => Some(Value::Decimal(f.to_string())),
        Value::Str(s) => {
            let trimmed = s.trim();
            trimmed.parse::<f64>().ok()?;
            Some(Value::Decimal(trimmed.to_string()))
        }
        Value::Decimal(d) => Some(Value::Decimal(d.clone())),
        _ => None,
    }
}

fn to_date(value: &Value) -> Option<Value> {
    match value {
        Value::Date(d) => Some(Value::Date(*d)),
        Value::DateTime(dt) => Some(Value::Date(dt.date_naive())),
        Value::Str(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok().map(Value::Date),
        _ => None,
    }
}

fn to_date_time(value: &Value) -> Option<Value> {
    match value {
        Value::DateTime(dt) => Some(Value::DateTime(*dt)),
        Value::Date(d) => d.and_hms_opt(0, 0, 0).map(|naive| Value::DateTime(naive.and_utc())),
        Value::Str(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| Value::DateTime(dt.with_timezone(&Utc))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(value: impl Into<Value>, target: TypeRef) -> Result<Value> {
        ConversionAnalyzer::new().convert(&value.into(), &target)
    }

    #[test]
    fn test_numeric_conversions() {
        assert_eq!(convert(3, TypeRef::float()).unwrap(), Value::Float(3.0));
        assert_eq!(convert(4.0, TypeRef::int()).unwrap(), Value::Int(4));
        assert!(matches!(convert(4.5, TypeRef::int()), Err(Error::Conversion { .. })));
        assert_eq!(convert(true, TypeRef::int()).unwrap(), Value::Int(1));
        assert_eq!(convert('A', TypeRef::int()).unwrap(), Value::Int(65));
    }

    #[test]
    fn test_float_to_int_range() {
        let two_pow_63 = 9_223_372_036_854_775_808.0_f64;
        assert!(matches!(convert(two_pow_63, TypeRef::int()), Err(Error::Conversion { .. })));
        assert!(matches!(convert(f64::INFINITY, TypeRef::int()), Err(Error::Conversion { .. })));

        // -2^63 - 1 rounds to -2^63, which is exactly i64::MIN
        assert_eq!(convert(-two_pow_63 - 1.0, TypeRef::int()).unwrap(), Value::Int(i64::MIN));
        let below_min = -9_223_372_036_854_777_856.0_f64;
        assert!(matches!(convert(below_min, TypeRef::int()), Err(Error::Conversion { .. })));
    }

    #[test]
    fn test_string_parsing() {
        assert_eq!(convert(" 42 ", TypeRef::int()).unwrap(), Value::Int(42));
        assert_eq!(convert("2.5", TypeRef::float()).unwrap(), Value::Float(2.5));
        assert_eq!(convert("yes", TypeRef::bool()).unwrap(), Value::Bool(true));
        assert_eq!(convert("x", TypeRef::char()).unwrap(), Value::Char('x'));
        assert!(convert("xy", TypeRef::char()).is_err());
        assert_eq!(
            convert("2024-02-29", TypeRef::date()).unwrap(),
            Value::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
        assert_eq!(
            convert("12.50", TypeRef::decimal()).unwrap(),
            Value::Decimal("12.50".to_string())
        );
        assert!(convert("twelve", TypeRef::decimal()).is_err());
    }

    #[test]
    fn test_to_string() {
        assert_eq!(convert(7, TypeRef::string()).unwrap(), Value::from("7"));
        assert_eq!(convert(false, TypeRef::string()).unwrap(), Value::from("false"));
        let date = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        assert_eq!(convert(date, TypeRef::string()).unwrap(), Value::from("2020-01-02"));
    }

    #[test]
    fn test_date_time_round_trip_through_date() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        let dt = convert(date, TypeRef::date_time()).unwrap();
        assert_eq!(convert(dt, TypeRef::date()).unwrap(), Value::Date(date));
    }

    #[test]
    fn test_identity_and_null() {
        assert_eq!(convert("same", TypeRef::string()).unwrap(), Value::from("same"));
        assert_eq!(convert(Value::Null, TypeRef::int()).unwrap(), Value::Null);
    }

    #[test]
    fn test_unsupported_pairs() {
        assert!(convert(1, TypeRef::bean("Child")).is_err());
        assert!(convert(Value::List(vec![]), TypeRef::string()).is_err());
    }

    #[test]
    fn test_conversion_functions_are_memoized() -> Result<()> {
        let analyzer = ConversionAnalyzer::new();
        let first = analyzer.conversion_function(&TypeRef::int(), &TypeRef::float())?;
        let second = analyzer.conversion_function(&TypeRef::int(), &TypeRef::float())?;
        assert!(first.is_some());
        assert_eq!(first.map(|f| f as usize), second.map(|f| f as usize));
        assert!(analyzer.cache.contains(CacheKey::composite(["conversion", "int", "float"])));
        Ok(())
    }
}
