//! Primitive and pass-through population
//!
//! Copyright (c) 2025 Beanshift Team
//! Licensed under the Apache-2.0 license

use super::{shape_mismatch, Populator};
use crate::descriptor::TypeRef;
use crate::transformer::Transformer;
use crate::types::Value;
use crate::{Error, Result};

/// Copies scalar values, converting between kinds when they differ
pub struct PrimitivePopulator<'a> {
    transformer: &'a dyn Transformer,
}

impl<'a> PrimitivePopulator<'a> {
    pub fn new(transformer: &'a dyn Transformer) -> Self {
        Self { transformer }
    }
}

impl Populator for PrimitivePopulator<'_> {
    fn populate(
        &self,
        declared_element_type: &TypeRef,
        source: &Value,
        resolved_element_type: Option<&TypeRef>,
    ) -> Result<Value> {
        let target = resolved_element_type.unwrap_or(declared_element_type);
        let Some(actual) = source.runtime_type() else {
            return Ok(Value::Null);
        };

        if &actual == target {
            return Ok(source.clone());
        }
        if !actual.is_primitive_or_special() {
            return Err(shape_mismatch(&format!("a {} value", target), source));
        }
        if !self.transformer.settings().primitive_type_conversion {
            return Err(Error::UnsupportedPopulation {
                message: format!(
                    "cannot copy {} into {} with primitive type conversion disabled",
                    actual, target
                ),
                type_name: None,
            });
        }

        tracing::trace!(from = %actual, to = %target, "converting primitive value");
        self.transformer.conversion().convert(source, target)
    }

    fn transformer(&self) -> &dyn Transformer {
        self.transformer
    }
}
