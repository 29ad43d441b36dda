//! Optional value population
//!
//! Copyright (c) 2025 Beanshift Team
//! Licensed under the Apache-2.0 license

use super::Populator;
use crate::descriptor::TypeRef;
use crate::transformer::Transformer;
use crate::types::Value;
use crate::Result;

/// Populates optional values: null stays null, anything else is transformed
/// into the wrapped type
pub struct OptionalPopulator<'a> {
    transformer: &'a dyn Transformer,
}

impl<'a> OptionalPopulator<'a> {
    pub fn new(transformer: &'a dyn Transformer) -> Self {
        Self { transformer }
    }
}

impl Populator for OptionalPopulator<'_> {
    fn populate(
        &self,
        declared_element_type: &TypeRef,
        source: &Value,
        resolved_element_type: Option<&TypeRef>,
    ) -> Result<Value> {
        if source.is_null() {
            return Ok(Value::Null);
        }
        let inner = resolved_element_type.unwrap_or(declared_element_type);
        self.transformer.transform(source, inner)
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

    #[test]
    fn test_present_value_is_transformed() -> Result<()> {
        let transformer = RenamingTransformer::new(TransformerSettings::default());
        let populated = OptionalPopulator::new(&transformer).populate(
            &TypeRef::bean("Dst"),
            &Bean::new("Src").into(),
            None,
        )?;
        assert_eq!(populated.as_bean().unwrap().type_name, "Dst");
        Ok(())
    }

    #[test]
    fn test_absent_value_stays_absent() -> Result<()> {
        let transformer = RenamingTransformer::new(TransformerSettings::default());
        let populator = OptionalPopulator::new(&transformer);
        let populated = populator.populate(&TypeRef::bean("Dst"), &Value::Null, None)?;
        assert_eq!(populated, Value::Null);
        assert_eq!(transformer.calls(), 0);
        Ok(())
    }

    #[test]
    fn test_wrapped_primitive_is_converted() -> Result<()> {
        let transformer = RenamingTransformer::new(TransformerSettings::default());
        let populator = OptionalPopulator::new(&transformer);
        let populated = populator.populate(&TypeRef::int(), &Value::from("12"), None)?;
        assert_eq!(populated, Value::Int(12));
        Ok(())
    }
}
