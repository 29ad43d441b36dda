//! Core data types for Beanshift
//!
//! This module contains the dynamic object model that the transformation
//! engine operates on. A [`Value`] is one node of an object graph: a scalar,
//! a container, or a [`Bean`] (a named record of fields).
//!
//! Copyright (c) 2025 Beanshift Team
//! Licensed under the Apache-2.0 license

use crate::descriptor::{PrimitiveKind, SpecialKind, TypeRef};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A node of an object graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    Str(String),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    /// Arbitrary-precision decimal kept in its textual form
    Decimal(String),
    /// Ordered collection
    List(Vec<Value>),
    /// Unordered collection; element order carries no meaning
    Set(Vec<Value>),
    /// String-keyed map
    Map(BTreeMap<String, Value>),
    Bean(Bean),
}

/// A named record of fields
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Bean {
    /// Name of the type this bean is an instance of
    pub type_name: String,
    /// Field values by name
    pub fields: BTreeMap<String, Value>,
}

impl Bean {
    /// Create an empty bean of the given type
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field setter
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Set a field value, returning the previous one
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Get a field value
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Get a value by dotted path, descending through nested beans
    ///
    /// `"address.city"` reads the `city` field of the bean stored in
    /// `address`. Any non-bean node along the way yields `None`.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.fields.get(first)?;
        for segment in segments {
            current = match current {
                Value::Bean(bean) => bean.fields.get(segment)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl Value {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the value's shape, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::Str(_) => "String",
            Value::Date(_) => "Date",
            Value::DateTime(_) => "DateTime",
            Value::Decimal(_) => "Decimal",
            Value::List(_) => "List",
            Value::Set(_) => "Set",
            Value::Map(_) => "Map",
            Value::Bean(_) => "Bean",
        }
    }

    /// Runtime type of this value
    ///
    /// Containers report an erased element type ([`TypeRef::Any`]); null has
    /// no runtime type.
    pub fn runtime_type(&self) -> Option<TypeRef> {
        let ty = match self {
            Value::Null => return None,
            Value::Bool(_) => TypeRef::Primitive(PrimitiveKind::Bool),
            Value::Int(_) => TypeRef::Primitive(PrimitiveKind::Int),
            Value::Float(_) => TypeRef::Primitive(PrimitiveKind::Float),
            Value::Char(_) => TypeRef::Primitive(PrimitiveKind::Char),
            Value::Str(_) => TypeRef::Special(SpecialKind::String),
            Value::Date(_) => TypeRef::Special(SpecialKind::Date),
            Value::DateTime(_) => TypeRef::Special(SpecialKind::DateTime),
            Value::Decimal(_) => TypeRef::Special(SpecialKind::Decimal),
            Value::List(_) => TypeRef::list(TypeRef::Any),
            Value::Set(_) => TypeRef::set(TypeRef::Any),
            Value::Map(_) => TypeRef::map(TypeRef::Any),
            Value::Bean(bean) => TypeRef::Bean(bean.type_name.clone()),
        };
        Some(ty)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bean(&self) -> Option<&Bean> {
        match self {
            Value::Bean(bean) => Some(bean),
            _ => None,
        }
    }

    /// Elements of a list or set
    pub fn as_elements(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Set(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Char(c) => write!(f, "{}", c),
            Value::Str(s) => write!(f, "{}", s),
            Value::Date(d) => write!(f, "{}", d),
            Value::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::List(items) | Value::Set(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", key, value)?;
                }
                write!(f, "}}")
            }
            Value::Bean(bean) => write!(f, "{}{}", bean.type_name, Value::Map(bean.fields.clone())),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::DateTime(dt)
    }
}

impl From<Bean> for Value {
    fn from(bean: Bean) -> Self {
        Value::Bean(bean)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}
