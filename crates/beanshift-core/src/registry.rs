//! Registry of bean descriptors
//!
//! Copyright (c) 2025 Beanshift Team
//! Licensed under the Apache-2.0 license

use crate::descriptor::{BeanDescriptor, FieldDescriptor};
use crate::Result;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(1);

/// Named bean descriptors known to a transformer
///
/// Each registry carries a process-unique id so that memoized lookups in the
/// shared cache never mix descriptors from two registries that happen to
/// declare the same type name.
#[derive(Debug)]
pub struct TypeRegistry {
    id: u64,
    beans: HashMap<String, Arc<BeanDescriptor>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self {
            id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
            beans: HashMap::new(),
        }
    }

    /// Load descriptors from a JSON array of bean descriptors
    pub fn from_json_str(json: &str) -> Result<Self> {
        let descriptors: Vec<BeanDescriptor> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.register(descriptor);
        }
        Ok(registry)
    }

    /// Load descriptors from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Register a descriptor, replacing any previous one with the same name
    pub fn register(&mut self, descriptor: BeanDescriptor) -> &mut Self {
        let descriptor = descriptor.normalize();
        tracing::trace!(
            type_name = %descriptor.name,
            fields = descriptor.fields.len(),
            "registering bean descriptor"
        );
        self.beans.insert(descriptor.name.clone(), Arc::new(descriptor));
        self
    }

    /// Builder-style registration
    pub fn with(mut self, descriptor: BeanDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    pub fn get(&self, type_name: &str) -> Option<Arc<BeanDescriptor>> {
        self.beans.get(type_name).cloned()
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.beans.contains_key(type_name)
    }

    /// Look up a field of a registered type
    pub fn field(&self, type_name: &str, field_name: &str) -> Option<&FieldDescriptor> {
        self.beans.get(type_name)?.field(field_name)
    }

    pub fn len(&self) -> usize {
        self.beans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beans.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
