//! Map population
//!
//! Copyright (c) 2025 Beanshift Team
//! Licensed under the Apache-2.0 license

use super::collection::transform_elements;
use super::{is_pass_through, shape_mismatch, Populator};
use crate::descriptor::TypeRef;
use crate::transformer::Transformer;
use crate::types::Value;
use crate::Result;

/// Populates string-keyed maps; keys are kept, values are transformed
pub struct MapPopulator<'a> {
    transformer: &'a dyn Transformer,
}

impl<'a> MapPopulator<'a> {
    pub fn new(transformer: &'a dyn Transformer) -> Self {
        Self { transformer }
    }
}

impl Populator for MapPopulator<'_> {
    fn populate(
        &self,
        declared_element_type: &TypeRef,
        source: &Value,
        resolved_element_type: Option<&TypeRef>,
    ) -> Result<Value> {
        let entries = match source {
            Value::Null => return Ok(Value::Null),
            Value::Map(entries) => entries,
            other => return Err(shape_mismatch("a map", other)),
        };

        let value_type = resolved_element_type.unwrap_or(declared_element_type);
        if is_pass_through(value_type, self.transformer.settings()) {
            return Ok(source.clone());
        }

        let values: Vec<Value> = entries.values().cloned().collect();
        let populated = transform_elements(self.transformer, &values, value_type)?;
        Ok(Value::Map(entries.keys().cloned().zip(populated).collect()))
    }

    fn transformer(&self) -> &dyn Transformer {
        self.transformer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransformerSettings;
    use crate::populator::test_support::RenamingTransformer;
    use crate::types::Bean;
    use crate::Error;
    use std::collections::BTreeMap;

    #[test]
    fn test_values_are_transformed_and_keys_kept() -> Result<()> {
        let transformer = RenamingTransformer::new(TransformerSettings::default());
        let mut entries = BTreeMap::new();
        entries.insert("first".to_string(), Bean::new("Src").with("n", 1).into());
        entries.insert("second".to_string(), Value::Null);

        let populated = MapPopulator::new(&transformer).populate(
            &TypeRef::bean("Dst"),
            &Value::Map(entries),
            None,
        )?;

        let Value::Map(result) = populated else {
            panic!("expected a map");
        };
        assert_eq!(result["first"].as_bean().unwrap().type_name, "Dst");
        assert_eq!(result["second"], Value::Null);
        Ok(())
    }

    #[test]
    fn test_pass_through_values() -> Result<()> {
        let transformer = RenamingTransformer::new(TransformerSettings::default());
        let mut entries = BTreeMap::new();
        entries.insert("a".to_string(), Value::Int(1));
        let source = Value::Map(entries);

        let populated = MapPopulator::new(&transformer).populate(&TypeRef::int(), &source, None)?;
        assert_eq!(populated, source);
        assert_eq!(transformer.calls(), 0);
        Ok(())
    }

    #[test]
    fn test_list_source_is_unsupported() {
        let transformer = RenamingTransformer::new(TransformerSettings::default());
        let result = MapPopulator::new(&transformer).populate(
            &TypeRef::bean("Dst"),
            &Value::List(vec![]),
            None,
        );
        assert!(matches!(result, Err(Error::UnsupportedPopulation { .. })));
    }
}
