//! Field-by-field bean transformer
//!
//! Copyright (c) 2025 Beanshift Team
//! Licensed under the Apache-2.0 license

use super::{FieldTransformerFn, Transformer};
use crate::cache::{cache_manager, namespaces, CacheKey, CacheManager};
use crate::config::TransformerSettings;
use crate::conversion::ConversionAnalyzer;
use crate::descriptor::{FieldDescriptor, PrimitiveKind, TypeRef};
use crate::guard::not_null_with;
use crate::populator::PopulatorFactory;
use crate::registry::TypeRegistry;
use crate::resolver::TypeResolver;
use crate::types::{Bean, Value};
use crate::validation::Validator;
use crate::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Per target type copy instructions, derived once from the descriptor and
/// the plan-relevant settings
///
/// Plans are keyed by registry id and `plan_fingerprint`, so transformers
/// built over the same registry with equal mappings, skips and function keys
/// share one entry.
#[derive(Debug)]
struct CopyPlan {
    fields: Vec<PlannedField>,
}

#[derive(Debug)]
struct PlannedField {
    field: FieldDescriptor,
    /// Dotted path of the value in the source bean
    source_path: String,
    /// Key of the registered field transformer function, if any
    function_key: Option<String>,
}

/// Transforms beans into registered target types
///
/// Construct with [`TransformerBuilder`](super::TransformerBuilder).
pub struct BeanTransformer {
    registry: Arc<TypeRegistry>,
    resolver: Box<dyn TypeResolver>,
    conversion: ConversionAnalyzer,
    validator: Validator,
    settings: TransformerSettings,
    field_transformers: HashMap<String, FieldTransformerFn>,
    plan_fingerprint: String,
    cache: Arc<CacheManager>,
}

impl BeanTransformer {
    pub(crate) fn new(
        registry: Arc<TypeRegistry>,
        resolver: Box<dyn TypeResolver>,
        settings: TransformerSettings,
        field_transformers: HashMap<String, FieldTransformerFn>,
    ) -> Self {
        Self {
            plan_fingerprint: plan_fingerprint(&settings, &field_transformers),
            validator: Validator::new(Arc::clone(&registry)),
            registry,
            resolver,
            conversion: ConversionAnalyzer::new(),
            settings,
            field_transformers,
            cache: cache_manager(namespaces::TRANSFORMER),
        }
    }

    /// Transform `source` into a new bean of `target_type`
    ///
    /// The result is validated against its declared constraints when
    /// validation is enabled.
    pub fn transform_to(&self, source: Option<&Value>, target_type: &str) -> Result<Value> {
        let source = not_null_with(
            source.filter(|value| !value.is_null()),
            "The object to copy cannot be null",
        )?;

        let result = self.transform(source, &TypeRef::bean(target_type))?;
        if self.settings.validation_enabled {
            self.validator.validate(&result)?;
        }
        Ok(result)
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    fn copy_bean(&self, source: &Bean, target_type: &str) -> Result<Value> {
        let plan = self.copy_plan(target_type)?;
        tracing::trace!(source_type = %source.type_name, target_type, "copying bean");

        let mut target = Bean::new(target_type);
        for planned in &plan.fields {
            let function = planned
                .function_key
                .as_ref()
                .and_then(|key| self.field_transformers.get(key));

            let value = match source.get_path(&planned.source_path) {
                Some(value) => self.populate_field(&planned.field, value)?,
                None if self.settings.default_value_for_missing_field => {
                    default_value(&planned.field.declared)
                }
                None if function.is_some() => Value::Null,
                None => {
                    return Err(Error::MissingField {
                        type_name: target_type.to_string(),
                        field: planned.field.name.clone(),
                    })
                }
            };

            let value = match function {
                Some(function) => function(&value),
                None => value,
            };
            target.set(planned.field.name.clone(), value);
        }
        Ok(Value::Bean(target))
    }

    fn populate_field(&self, field: &FieldDescriptor, value: &Value) -> Result<Value> {
        if value.is_null() || field.declared.is_erased() {
            return Ok(value.clone());
        }
        PopulatorFactory::populator(&field.declared, self)?.populate_field(field, value)
    }

    fn copy_plan(&self, target_type: &str) -> Result<Arc<CopyPlan>> {
        let key = CacheKey::composite([
            "copy_plan".to_string(),
            self.registry.id().to_string(),
            self.plan_fingerprint.clone(),
            target_type.to_string(),
        ]);

        self.cache.try_get_or_compute(key, || {
            let descriptor = self.registry.get(target_type).ok_or_else(|| {
                Error::UnsupportedPopulation {
                    message: format!("target type {} is not registered", target_type),
                    type_name: Some(target_type.to_string()),
                }
            })?;

            let fields = descriptor
                .fields
                .iter()
                .filter(|field| !self.settings.is_skipped(target_type, &field.name))
                .map(|field| PlannedField {
                    source_path: self
                        .settings
                        .mapped_source(target_type, &field.name)
                        .unwrap_or(&field.name)
                        .to_string(),
                    function_key: self.function_key(target_type, &field.name),
                    field: field.clone(),
                })
                .collect::<Vec<_>>();

            tracing::debug!(
                target_type,
                fields = fields.len(),
                skipped = descriptor.fields.len() - fields.len(),
                "built copy plan"
            );
            Ok(CopyPlan { fields })
        })
    }

    fn function_key(&self, type_name: &str, field: &str) -> Option<String> {
        let qualified = format!("{}.{}", type_name, field);
        if self.field_transformers.contains_key(&qualified) {
            Some(qualified)
        } else if self.field_transformers.contains_key(field) {
            Some(field.to_string())
        } else {
            None
        }
    }
}

impl Transformer for BeanTransformer {
    fn transform(&self, source: &Value, target: &TypeRef) -> Result<Value> {
        match (source, target) {
            (Value::Null, _) => Ok(Value::Null),
            (_, TypeRef::Bean(name)) if self.settings.special_types.contains(name) => {
                Ok(source.clone())
            }
            (Value::Bean(bean), TypeRef::Bean(name)) => self.copy_bean(bean, name),
            _ => PopulatorFactory::populate(target, source, self),
        }
    }

    fn type_resolver(&self) -> &dyn TypeResolver {
        self.resolver.as_ref()
    }

    fn settings(&self) -> &TransformerSettings {
        &self.settings
    }

    fn conversion(&self) -> &ConversionAnalyzer {
        &self.conversion
    }
}

impl fmt::Debug for BeanTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanTransformer")
            .field("registry", &self.registry.id())
            .field("settings", &self.settings)
            .field("field_transformers", &self.field_transformers.len())
            .finish_non_exhaustive()
    }
}

/// Identity of the settings a copy plan is derived from
fn plan_fingerprint(
    settings: &TransformerSettings,
    field_transformers: &HashMap<String, FieldTransformerFn>,
) -> String {
    let mappings = settings
        .field_mappings
        .iter()
        .map(|(target, source)| format!("{}={}", target, source))
        .collect::<Vec<_>>()
        .join(",");
    let skipped = settings
        .skipped_fields
        .iter()
        .cloned()
        .collect::<Vec<_>>()
        .join(",");
    let mut functions = field_transformers.keys().cloned().collect::<Vec<_>>();
    functions.sort();

    format!("mappings[{}]skips[{}]functions[{}]", mappings, skipped, functions.join(","))
}

/// Value used for a target field missing from the source
fn default_value(declared: &TypeRef) -> Value {
    match declared {
        TypeRef::Primitive(PrimitiveKind::Bool) => Value::Bool(false),
        TypeRef::Primitive(PrimitiveKind::Int) => Value::Int(0),
        TypeRef::Primitive(PrimitiveKind::Float) => Value::Float(0.0),
        TypeRef::Primitive(PrimitiveKind::Char) => Value::Char('\0'),
        _ => Value::Null,
    }
}
