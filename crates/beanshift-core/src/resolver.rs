//! Element type resolution for container fields
//!
//! A container field declares its element type through its [`TypeRef`]
//! (`List<Child>`). When the declaration is erased (`List<?>`), the element
//! type is inferred from the runtime shape of the container's members.
//!
//! Copyright (c) 2025 Beanshift Team
//! Licensed under the Apache-2.0 license

use crate::cache::{cache_manager, namespaces, CacheKey, CacheManager};
use crate::descriptor::TypeRef;
use crate::registry::TypeRegistry;
use crate::types::Value;
use crate::{Error, Result};
use std::sync::Arc;

/// Determines the concrete element type a container is transformed into
pub trait TypeResolver: Send + Sync {
    /// Resolve the element type of `container`, the value of `owning_type.field_name`
    ///
    /// With `strict` set, failure to resolve is an error rather than `Ok(None)`.
    fn resolve_element_type(
        &self,
        container: &Value,
        owning_type: &str,
        field_name: &str,
        strict: bool,
    ) -> Result<Option<TypeRef>>;
}

/// [`TypeResolver`] backed by the descriptors of a [`TypeRegistry`]
///
/// Declared element types are memoized per `(registry, owning type, field)`
/// in the [`namespaces::REFLECTION`] cache namespace.
#[derive(Debug, Clone)]
pub struct RegistryTypeResolver {
    registry: Arc<TypeRegistry>,
    cache: Arc<CacheManager>,
}

impl RegistryTypeResolver {
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self {
            registry,
            cache: cache_manager(namespaces::REFLECTION),
        }
    }

    /// Declared generic element type; `None` when the field is unknown
    fn declared_element_type(
        &self,
        owning_type: &str,
        field_name: &str,
    ) -> Result<Option<TypeRef>> {
        let key = CacheKey::composite([
            "element_type".to_string(),
            self.registry.id().to_string(),
            owning_type.to_string(),
            field_name.to_string(),
        ]);
        let declared = self.cache.get_or_compute(key, || {
            self.registry
                .field(owning_type, field_name)
                .map(|field| field.generic_type().cloned().unwrap_or(TypeRef::Any))
        })?;
        Ok(declared.as_ref().clone())
    }
}

impl TypeResolver for RegistryTypeResolver {
    fn resolve_element_type(
        &self,
        container: &Value,
        owning_type: &str,
        field_name: &str,
        strict: bool,
    ) -> Result<Option<TypeRef>> {
        match self.declared_element_type(owning_type, field_name)? {
            Some(declared) if !declared.is_erased() => return Ok(Some(declared)),
            Some(_) => {}
            None if strict => {
                return Err(Error::TypeResolution {
                    owning_type: owning_type.to_string(),
                    field: field_name.to_string(),
                    message: "field is not declared in the type registry".to_string(),
                })
            }
            None => {}
        }

        let inferred = infer_element_type(container).map_err(|found| Error::UnsupportedPopulation {
            message: format!(
                "ambiguous element type for {}.{}: found {}",
                owning_type, field_name, found
            ),
            type_name: Some(owning_type.to_string()),
        })?;

        tracing::trace!(
            owning_type,
            field_name,
            inferred = ?inferred,
            "inferred element type from container members"
        );
        Ok(inferred)
    }
}

/// Infer a single element type from the non-null members of a container
///
/// Returns `Ok(None)` when there is nothing to infer from, and `Err` with the
/// conflicting type names when members disagree.
pub fn infer_element_type(container: &Value) -> std::result::Result<Option<TypeRef>, String> {
    let members: Box<dyn Iterator<Item = &Value>> = match container {
        Value::List(items) | Value::Set(items) => Box::new(items.iter()),
        Value::Map(entries) => Box::new(entries.values()),
        other => Box::new(std::iter::once(other)),
    };

    let mut found: Vec<TypeRef> = Vec::new();
    for ty in members.filter_map(Value::runtime_type) {
        if !found.contains(&ty) {
            found.push(ty);
        }
    }

    match found.len() {
        0 => Ok(None),
        1 => Ok(found.pop()),
        _ => Err(found
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")),
    }
}
