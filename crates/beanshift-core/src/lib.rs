//! Beanshift Core - Object graph transformation engine
//!
//! This crate copies and converts object graphs from one type into another:
//! nested beans are transformed recursively, container members are populated
//! element by element, primitive values are converted when kinds differ, and
//! the finished result can be checked against declared constraints.
//!
//! # Main Components
//!
//! - **Object Model**: [`Value`] and [`Bean`], the dynamic graphs being transformed
//! - **Type Descriptors**: [`TypeRef`], [`BeanDescriptor`] and the [`TypeRegistry`]
//! - **Population Strategies**: one [`Populator`] per field shape
//! - **Transformer**: [`BeanTransformer`], built with [`TransformerBuilder`]
//! - **Validation**: the [`Validator`] gate and its constraint engine
//! - **Caching**: process-wide namespaces in [`cache`]
//! - **Error Handling**: [`Error`] types using `thiserror` and `anyhow`
//!
//! # Example
//!
//! ```
//! use beanshift_core::{
//!     Bean, BeanDescriptor, Result, TransformerBuilder, TypeRef, TypeRegistry, Value,
//! };
//! use std::sync::Arc;
//!
//! fn example() -> Result<()> {
//!     let registry = TypeRegistry::new()
//!         .with(
//!             BeanDescriptor::new("ParentDto")
//!                 .with_field("tags", TypeRef::list(TypeRef::string()))
//!                 .with_field("children", TypeRef::list(TypeRef::bean("ChildDto"))),
//!         )
//!         .with(BeanDescriptor::new("ChildDto").with_field("id", TypeRef::int()));
//!
//!     let transformer = TransformerBuilder::new().registry(Arc::new(registry)).build()?;
//!
//!     let parent: Value = Bean::new("Parent")
//!         .with("tags", Value::List(vec!["x".into(), "y".into()]))
//!         .with("children", Value::List(vec![Bean::new("Child").with("id", 1).into()]))
//!         .into();
//!
//!     let dto = transformer.transform_to(Some(&parent), "ParentDto")?;
//!     assert_eq!(dto.as_bean().unwrap().type_name, "ParentDto");
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod cache;
pub mod config;
pub mod conversion;
pub mod descriptor;
pub mod error;
pub mod guard;
pub mod populator;
pub mod registry;
pub mod resolver;
pub mod transformer;
pub mod types;
pub mod validation;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use types::{Bean, Value};
pub use descriptor::{BeanDescriptor, FieldDescriptor, PrimitiveKind, SpecialKind, TypeRef};
pub use registry::TypeRegistry;
pub use config::TransformerSettings;
pub use conversion::ConversionAnalyzer;
pub use resolver::{RegistryTypeResolver, TypeResolver};
pub use populator::{FieldShape, Populator, PopulatorFactory};
pub use transformer::{BeanTransformer, FieldTransformerFn, Transformer, TransformerBuilder};
pub use validation::{Constraint, ConstraintKind, ConstraintViolation, Validation, Validator};
pub use cache::{cache_manager, CacheKey, CacheManager, CacheStats};
pub use guard::{not_null, not_null_with};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_error_creation() {
        let err = Error::unsupported("Test error");
        assert!(err.to_string().contains("Test error"));
    }
}
