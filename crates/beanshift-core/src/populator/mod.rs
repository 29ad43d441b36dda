//! Population strategies
//!
//! A populator turns a source value into a value of a declared field shape.
//! There is one strategy per shape:
//!
//! - [`CollectionPopulator`] for lists and sets
//! - [`MapPopulator`] for string-keyed maps
//! - [`OptionalPopulator`] for optional values
//! - [`BeanPopulator`] for nested beans
//! - [`PrimitivePopulator`] for primitive and pass-through values
//!
//! Populators hold no state of their own. They borrow the [`Transformer`]
//! that created them and call back into it for nested values, so a populator
//! never outlives the transformation call it serves.
//!
//! Copyright (c) 2025 Beanshift Team
//! Licensed under the Apache-2.0 license

pub mod bean;
pub mod collection;
pub mod map;
pub mod optional;
pub mod primitive;

pub use bean::BeanPopulator;
pub use collection::CollectionPopulator;
pub use map::MapPopulator;
pub use optional::OptionalPopulator;
pub use primitive::PrimitivePopulator;

use crate::config::TransformerSettings;
use crate::descriptor::{FieldDescriptor, TypeRef};
use crate::transformer::Transformer;
use crate::types::Value;
use crate::{Error, Result};

/// Strategy for populating one field shape
pub trait Populator {
    /// Populate `source` as a value whose element type is declared as
    /// `declared_element_type`
    ///
    /// For containers the declared type is the generic element type; for
    /// beans and primitives it is the field type itself. A resolved element
    /// type, when present, takes precedence over the declared one.
    fn populate(
        &self,
        declared_element_type: &TypeRef,
        source: &Value,
        resolved_element_type: Option<&TypeRef>,
    ) -> Result<Value>;

    /// The transformer used for nested values
    fn transformer(&self) -> &dyn Transformer;

    /// Populate the value of `field`, resolving its element type first
    fn populate_field(&self, field: &FieldDescriptor, source: &Value) -> Result<Value> {
        if source.is_null() {
            return Ok(Value::Null);
        }

        let declared = declared_argument(&field.declared);
        let resolved = match field.generic_type() {
            Some(_) => self.transformer().type_resolver().resolve_element_type(
                source,
                &field.owning_type,
                &field.name,
                true,
            )?,
            None => None,
        };
        self.populate(declared, source, resolved.as_ref())
    }
}

/// Population category of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    Collection,
    Map,
    Optional,
    Bean,
    Primitive,
}

impl FieldShape {
    /// Shape of `ty`; erased types have none until resolved
    pub fn of(ty: &TypeRef) -> Option<Self> {
        match ty {
            TypeRef::List(_) | TypeRef::Set(_) => Some(FieldShape::Collection),
            TypeRef::Map(_) => Some(FieldShape::Map),
            TypeRef::Optional(_) => Some(FieldShape::Optional),
            TypeRef::Bean(_) => Some(FieldShape::Bean),
            TypeRef::Primitive(_) | TypeRef::Special(_) => Some(FieldShape::Primitive),
            TypeRef::Any => None,
        }
    }
}

/// Creates the populator for a declared type
pub struct PopulatorFactory;

impl PopulatorFactory {
    /// Populator for values declared as `ty`
    pub fn populator<'a>(
        ty: &TypeRef,
        transformer: &'a dyn Transformer,
    ) -> Result<Box<dyn Populator + 'a>> {
        let shape = FieldShape::of(ty).ok_or_else(|| {
            Error::unsupported(format!("no population strategy for unresolved type {}", ty))
        })?;

        tracing::trace!(target_type = %ty, ?shape, "selecting populator");
        let populator: Box<dyn Populator + 'a> = match shape {
            FieldShape::Collection => Box::new(CollectionPopulator::new(transformer)),
            FieldShape::Map => Box::new(MapPopulator::new(transformer)),
            FieldShape::Optional => Box::new(OptionalPopulator::new(transformer)),
            FieldShape::Bean => Box::new(BeanPopulator::new(transformer)),
            FieldShape::Primitive => Box::new(PrimitivePopulator::new(transformer)),
        };
        Ok(populator)
    }

    /// Populate `source` as a value of type `ty`
    pub fn populate(ty: &TypeRef, source: &Value, transformer: &dyn Transformer) -> Result<Value> {
        Self::populator(ty, transformer)?.populate(declared_argument(ty), source, None)
    }
}

/// Type passed as `declared_element_type` for a field declared as `ty`
pub(crate) fn declared_argument(ty: &TypeRef) -> &TypeRef {
    ty.element_type().unwrap_or(ty)
}

/// Values of a pass-through type are copied without recursive transformation
pub fn is_pass_through(ty: &TypeRef, settings: &TransformerSettings) -> bool {
    match ty {
        TypeRef::Bean(name) => settings.special_types.contains(name),
        other => other.is_primitive_or_special(),
    }
}

/// Error for a source value whose shape does not match the populator
pub(crate) fn shape_mismatch(expected: &str, source: &Value) -> Error {
    Error::UnsupportedPopulation {
        message: format!("expected {}, found {}", expected, source.kind_name()),
        type_name: source.as_bean().map(|bean| bean.type_name.clone()),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::RenamingTransformer;
    use super::*;

    #[test]
    fn test_shapes() {
        assert_eq!(FieldShape::of(&TypeRef::set(TypeRef::int())), Some(FieldShape::Collection));
        assert_eq!(FieldShape::of(&TypeRef::map(TypeRef::int())), Some(FieldShape::Map));
        assert_eq!(FieldShape::of(&TypeRef::bean("Child")), Some(FieldShape::Bean));
        assert_eq!(FieldShape::of(&TypeRef::decimal()), Some(FieldShape::Primitive));
        assert_eq!(FieldShape::of(&TypeRef::Any), None);
    }

    #[test]
    fn test_erased_type_has_no_populator() {
        let transformer = RenamingTransformer::new(TransformerSettings::default());
        let result = PopulatorFactory::populator(&TypeRef::Any, &transformer);
        assert!(matches!(result, Err(Error::UnsupportedPopulation { .. })));
    }

    #[test]
    fn test_pass_through_includes_special_types() {
        let mut settings = TransformerSettings::default();
        settings.special_types.insert("Money".to_string());

        assert!(is_pass_through(&TypeRef::string(), &settings));
        assert!(is_pass_through(&TypeRef::bean("Money"), &settings));
        assert!(!is_pass_through(&TypeRef::bean("Child"), &settings));
        assert!(!is_pass_through(&TypeRef::list(TypeRef::int()), &settings));
    }

    #[test]
    fn test_populate_field_resolves_erased_element_type() -> Result<()> {
        let transformer = RenamingTransformer::new(TransformerSettings::default());
        let field = FieldDescriptor::new("Parent", "children", TypeRef::list(TypeRef::Any));
        let source = Value::List(vec![crate::types::Bean::new("Child").into()]);

        let populated = PopulatorFactory::populator(&field.declared, &transformer)?
            .populate_field(&field, &source)?;
        assert_eq!(populated, source);
        Ok(())
    }

    #[test]
    fn test_populate_field_null_is_untouched() -> Result<()> {
        let transformer = RenamingTransformer::new(TransformerSettings::default());
        let field =
            FieldDescriptor::new("Parent", "children", TypeRef::list(TypeRef::bean("Child")));

        let populated = PopulatorFactory::populator(&field.declared, &transformer)?
            .populate_field(&field, &Value::Null)?;
        assert_eq!(populated, Value::Null);
        assert_eq!(transformer.calls(), 0);
        Ok(())
    }
}
