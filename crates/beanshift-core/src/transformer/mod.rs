//! Object graph transformation
//!
//! The [`Transformer`] trait is the seam between the population strategies
//! and the orchestrator that drives them. [`BeanTransformer`] is the
//! registry-backed orchestrator: it copies beans field by field, picks a
//! populator per field shape and recurses through nested values.
//!
//! # Module Organization
//!
//! - [`bean`] - The field-by-field bean transformer
//! - [`builder`] - Fluent builder for configuring a transformer
//! - [`built_in`] - Ready-made field transformer functions
//!
//! # Examples
//!
//! ```
//! use beanshift_core::{Bean, BeanDescriptor, TransformerBuilder, TypeRef, TypeRegistry, Value};
//! use std::sync::Arc;
//!
//! let registry = TypeRegistry::new()
//!     .with(BeanDescriptor::new("PersonDto").with_field("name", TypeRef::string()));
//!
//! let transformer = TransformerBuilder::new()
//!     .registry(Arc::new(registry))
//!     .build()
//!     .unwrap();
//!
//! let person: Value = Bean::new("Person").with("name", "Ada").with("age", 36).into();
//! let dto = transformer.transform_to(Some(&person), "PersonDto").unwrap();
//! assert_eq!(dto.as_bean().unwrap().get("name"), Some(&Value::from("Ada")));
//! ```
//!
//! Copyright (c) 2025 Beanshift Team
//! Licensed under the Apache-2.0 license

pub mod bean;
pub mod builder;
pub mod built_in;

pub use bean::BeanTransformer;
pub use builder::TransformerBuilder;

use crate::config::TransformerSettings;
use crate::conversion::ConversionAnalyzer;
use crate::descriptor::TypeRef;
use crate::resolver::TypeResolver;
use crate::types::Value;
use crate::Result;
use std::sync::Arc;

/// Function applied to a populated field value before it is stored
pub type FieldTransformerFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Recursive transformation used by the population strategies
pub trait Transformer: Send + Sync {
    /// Transform `source` into a value of type `target`
    ///
    /// `Null` always transforms to `Null`.
    fn transform(&self, source: &Value, target: &TypeRef) -> Result<Value>;

    /// Resolver for container element types
    fn type_resolver(&self) -> &dyn TypeResolver;

    fn settings(&self) -> &TransformerSettings;

    /// Converter used when primitive kinds differ
    fn conversion(&self) -> &ConversionAnalyzer;
}
