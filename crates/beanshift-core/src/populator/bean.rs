//! Nested bean population
//!
//! Copyright (c) 2025 Beanshift Team
//! Licensed under the Apache-2.0 license

use super::{is_pass_through, shape_mismatch, Populator};
use crate::descriptor::TypeRef;
use crate::transformer::Transformer;
use crate::types::Value;
use crate::{Error, Result};

/// Populates a nested bean by delegating to the transformer
pub struct BeanPopulator<'a> {
    transformer: &'a dyn Transformer,
}

impl<'a> BeanPopulator<'a> {
    pub fn new(transformer: &'a dyn Transformer) -> Self {
        Self { transformer }
    }
}

impl Populator for BeanPopulator<'_> {
    fn populate(
        &self,
        declared_element_type: &TypeRef,
        source: &Value,
        resolved_element_type: Option<&TypeRef>,
    ) -> Result<Value> {
        let target = resolved_element_type.unwrap_or(declared_element_type);
        if !matches!(target, TypeRef::Bean(_)) {
            return Err(Error::unsupported(format!("{} is not a bean type", target)));
        }

        match source {
            Value::Null => Ok(Value::Null),
            _ if is_pass_through(target, self.transformer.settings()) => Ok(source.clone()),
            Value::Bean(_) => self.transformer.transform(source, target),
            other => Err(shape_mismatch("a bean", other)),
        }
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
    fn test_delegates_to_transformer() -> Result<()> {
        let transformer = RenamingTransformer::new(TransformerSettings::default());
        let source = Bean::new("Src").with("name", "a");

        let populated =
            BeanPopulator::new(&transformer).populate(&TypeRef::bean("Dst"), &source.into(), None)?;
        let bean = populated.as_bean().unwrap();
        assert_eq!(bean.type_name, "Dst");
        assert_eq!(bean.get("name"), Some(&Value::from("a")));
        assert_eq!(transformer.calls(), 1);
        Ok(())
    }

    #[test]
    fn test_special_type_is_copied() -> Result<()> {
        let mut settings = TransformerSettings::default();
        settings.special_types.insert("Money".to_string());
        let transformer = RenamingTransformer::new(settings);
        let source: Value = Bean::new("Money").with("amount", 3).into();

        let populated =
            BeanPopulator::new(&transformer).populate(&TypeRef::bean("Money"), &source, None)?;
        assert_eq!(populated, source);
        assert_eq!(transformer.calls(), 0);
        Ok(())
    }

    #[test]
    fn test_scalar_source_is_unsupported() {
        let transformer = RenamingTransformer::new(TransformerSettings::default());
        let populator = BeanPopulator::new(&transformer);
        let result = populator.populate(&TypeRef::bean("Dst"), &Value::from("x"), None);
        assert!(matches!(result, Err(Error::UnsupportedPopulation { .. })));
    }
}
