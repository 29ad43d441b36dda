//! Type descriptors
//!
//! Rust has no runtime reflection, so the declared shape of every bean field
//! is described explicitly: a [`TypeRef`] per field, grouped into a
//! [`BeanDescriptor`] per type. Descriptors are plain data and can be loaded
//! from JSON with serde.
//!
//! Copyright (c) 2025 Beanshift Team
//! Licensed under the Apache-2.0 license

use crate::validation::Constraint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive value kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Bool,
    Int,
    Float,
    Char,
}

/// Value types that are copied as-is and never recursively transformed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialKind {
    String,
    Date,
    DateTime,
    Decimal,
}

/// Declared type of a field or container element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    Primitive(PrimitiveKind),
    Special(SpecialKind),
    /// A registered bean type, by name
    Bean(String),
    List(Box<TypeRef>),
    Set(Box<TypeRef>),
    /// String-keyed map; the boxed type is the value type
    Map(Box<TypeRef>),
    Optional(Box<TypeRef>),
    /// Erased generic parameter, resolved from the value at population time
    Any,
}

impl TypeRef {
    pub fn bool() -> Self {
        TypeRef::Primitive(PrimitiveKind::Bool)
    }

    pub fn int() -> Self {
        TypeRef::Primitive(PrimitiveKind::Int)
    }

    pub fn float() -> Self {
        TypeRef::Primitive(PrimitiveKind::Float)
    }

    pub fn char() -> Self {
        TypeRef::Primitive(PrimitiveKind::Char)
    }

    pub fn string() -> Self {
        TypeRef::Special(SpecialKind::String)
    }

    pub fn date() -> Self {
        TypeRef::Special(SpecialKind::Date)
    }

    pub fn date_time() -> Self {
        TypeRef::Special(SpecialKind::DateTime)
    }

    pub fn decimal() -> Self {
        TypeRef::Special(SpecialKind::Decimal)
    }

    pub fn bean(name: impl Into<String>) -> Self {
        TypeRef::Bean(name.into())
    }

    pub fn list(element: TypeRef) -> Self {
        TypeRef::List(Box::new(element))
    }

    pub fn set(element: TypeRef) -> Self {
        TypeRef::Set(Box::new(element))
    }

    pub fn map(value: TypeRef) -> Self {
        TypeRef::Map(Box::new(value))
    }

    pub fn optional(inner: TypeRef) -> Self {
        TypeRef::Optional(Box::new(inner))
    }

    /// Generic parameter of a container type
    ///
    /// The element type for lists and sets, the value type for maps and the
    /// wrapped type for optionals.
    pub fn element_type(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::List(inner)
            | TypeRef::Set(inner)
            | TypeRef::Map(inner)
            | TypeRef::Optional(inner) => Some(inner),
            _ => None,
        }
    }

    /// Primitive and special types are never recursively transformed
    pub fn is_primitive_or_special(&self) -> bool {
        matches!(self, TypeRef::Primitive(_) | TypeRef::Special(_))
    }

    /// `true` when the type still needs to be resolved from a value
    pub fn is_erased(&self) -> bool {
        matches!(self, TypeRef::Any)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveKind::Bool => write!(f, "bool"),
            PrimitiveKind::Int => write!(f, "int"),
            PrimitiveKind::Float => write!(f, "float"),
            PrimitiveKind::Char => write!(f, "char"),
        }
    }
}

impl fmt::Display for SpecialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecialKind::String => write!(f, "String"),
            SpecialKind::Date => write!(f, "Date"),
            SpecialKind::DateTime => write!(f, "DateTime"),
            SpecialKind::Decimal => write!(f, "Decimal"),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(kind) => write!(f, "{}", kind),
            TypeRef::Special(kind) => write!(f, "{}", kind),
            TypeRef::Bean(name) => write!(f, "{}", name),
            TypeRef::List(inner) => write!(f, "List<{}>", inner),
            TypeRef::Set(inner) => write!(f, "Set<{}>", inner),
            TypeRef::Map(inner) => write!(f, "Map<String, {}>", inner),
            TypeRef::Optional(inner) => write!(f, "Optional<{}>", inner),
            TypeRef::Any => write!(f, "?"),
        }
    }
}

/// Declaration of a single bean field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name
    pub name: String,
    /// Declared type, including the generic element type for containers
    #[serde(rename = "type")]
    pub declared: TypeRef,
    /// Name of the type that declares this field
    #[serde(default)]
    pub owning_type: String,
    /// Constraints checked by the validator, in declaration order
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

impl FieldDescriptor {
    pub fn new(owning_type: impl Into<String>, name: impl Into<String>, declared: TypeRef) -> Self {
        Self {
            name: name.into(),
            declared,
            owning_type: owning_type.into(),
            constraints: Vec::new(),
        }
    }

    /// Declared generic element type, if the field is a container
    pub fn generic_type(&self) -> Option<&TypeRef> {
        self.declared.element_type()
    }
}

/// Declaration of a bean type: its name and ordered fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeanDescriptor {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl BeanDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add an unconstrained field
    pub fn with_field(self, name: impl Into<String>, declared: TypeRef) -> Self {
        self.with_constrained_field(name, declared, Vec::new())
    }

    /// Add a field with constraints
    pub fn with_constrained_field(
        mut self,
        name: impl Into<String>,
        declared: TypeRef,
        constraints: Vec<Constraint>,
    ) -> Self {
        let mut field = FieldDescriptor::new(self.name.clone(), name, declared);
        field.constraints = constraints;
        self.fields.push(field);
        self
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fill in owning type names left empty by deserialization
    pub(crate) fn normalize(mut self) -> Self {
        for field in &mut self.fields {
            if field.owning_type.is_empty() {
                field.owning_type = self.name.clone();
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_type() {
        assert_eq!(TypeRef::list(TypeRef::string()).element_type(), Some(&TypeRef::string()));
        assert_eq!(TypeRef::map(TypeRef::int()).element_type(), Some(&TypeRef::int()));
        assert_eq!(TypeRef::int().element_type(), None);
    }

    #[test]
    fn test_primitive_or_special() {
        assert!(TypeRef::int().is_primitive_or_special());
        assert!(TypeRef::date().is_primitive_or_special());
        assert!(!TypeRef::bean("Child").is_primitive_or_special());
        assert!(!TypeRef::list(TypeRef::int()).is_primitive_or_special());
    }

    #[test]
    fn test_display() {
        let ty = TypeRef::map(TypeRef::list(TypeRef::bean("Child")));
        assert_eq!(ty.to_string(), "Map<String, List<Child>>");
        assert_eq!(TypeRef::optional(TypeRef::Any).to_string(), "Optional<?>");
    }

    #[test]
    fn test_descriptor_builder_sets_owning_type() {
        let descriptor = BeanDescriptor::new("Parent")
            .with_field("id", TypeRef::int())
            .with_field("children", TypeRef::list(TypeRef::bean("Child")));

        let children = descriptor.field("children").unwrap();
        assert_eq!(children.owning_type, "Parent");
        assert_eq!(children.generic_type(), Some(&TypeRef::bean("Child")));
        assert!(descriptor.field("missing").is_none());
    }

    #[test]
    fn test_descriptor_deserialization() {
        let json = serde_json::json!({
            "name": "Parent",
            "fields": [
                {"name": "tags", "type": {"list": {"special": "string"}}},
                {"name": "child", "type": {"bean": "Child"}}
            ]
        });

        let descriptor: BeanDescriptor = serde_json::from_value(json).unwrap();
        let descriptor = descriptor.normalize();

        assert_eq!(descriptor.fields.len(), 2);
        assert_eq!(descriptor.fields[0].declared, TypeRef::list(TypeRef::string()));
        assert_eq!(descriptor.fields[1].owning_type, "Parent");
    }
}
