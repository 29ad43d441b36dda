//! List and set population
//!
//! Copyright (c) 2025 Beanshift Team
//! Licensed under the Apache-2.0 license

use super::{is_pass_through, shape_mismatch, Populator};
use crate::descriptor::TypeRef;
use crate::transformer::Transformer;
use crate::types::Value;
use crate::Result;
use std::panic;
use std::thread;

type Rebuild = fn(Vec<Value>) -> Value;

/// Populates lists and sets element by element
///
/// The output container has the same kind as the source. Lists keep their
/// order even when elements are transformed on worker threads.
pub struct CollectionPopulator<'a> {
    transformer: &'a dyn Transformer,
}

impl<'a> CollectionPopulator<'a> {
    pub fn new(transformer: &'a dyn Transformer) -> Self {
        Self { transformer }
    }
}

impl Populator for CollectionPopulator<'_> {
    fn populate(
        &self,
        declared_element_type: &TypeRef,
        source: &Value,
        resolved_element_type: Option<&TypeRef>,
    ) -> Result<Value> {
        let (items, rebuild): (&[Value], Rebuild) = match source {
            Value::Null => return Ok(Value::Null),
            Value::List(items) => (items.as_slice(), Value::List as Rebuild),
            Value::Set(items) => (items.as_slice(), Value::Set as Rebuild),
            other => return Err(shape_mismatch("a list or set", other)),
        };

        let element_type = resolved_element_type.unwrap_or(declared_element_type);
        if is_pass_through(element_type, self.transformer.settings()) {
            return Ok(source.clone());
        }
        if items.is_empty() {
            return Ok(rebuild(Vec::new()));
        }

        let populated = transform_elements(self.transformer, items, element_type)?;
        Ok(rebuild(populated))
    }

    fn transformer(&self) -> &dyn Transformer {
        self.transformer
    }
}

/// Transform every item into `element_type`, preserving index order
///
/// Large inputs are split into contiguous chunks, one per worker thread. When
/// several items fail, the error of the lowest index is returned.
pub(crate) fn transform_elements(
    transformer: &dyn Transformer,
    items: &[Value],
    element_type: &TypeRef,
) -> Result<Vec<Value>> {
    let settings = transformer.settings();
    let workers = settings.max_parallelism.min(items.len());

    if items.len() < settings.parallel_threshold || workers <= 1 {
        return items
            .iter()
            .map(|item| transformer.transform(item, element_type))
            .collect();
    }

    let chunk_size = items.len().div_ceil(workers);
    tracing::debug!(
        elements = items.len(),
        workers,
        chunk_size,
        element_type = %element_type,
        "transforming collection in parallel"
    );

    let chunks: Vec<Result<Vec<Value>>> = thread::scope(|scope| {
        let handles: Vec<_> = items
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|item| transformer.transform(item, element_type))
                        .collect::<Result<Vec<_>>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(payload) => panic::resume_unwind(payload),
            })
            .collect()
    });

    let mut populated = Vec::with_capacity(items.len());
    for chunk in chunks {
        populated.extend(chunk?);
    }
    Ok(populated)
}
