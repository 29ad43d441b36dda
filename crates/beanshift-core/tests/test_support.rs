//! Shared test support utilities for integration tests

#![allow(dead_code)]

use beanshift_core::{Bean, BeanDescriptor, Constraint, TypeRef, TypeRegistry, Value};
use std::sync::Arc;

/// Registry with a parent type holding tags, children, lookups and a note
pub fn parent_registry() -> Arc<TypeRegistry> {
    Arc::new(
        TypeRegistry::new()
            .with(
                BeanDescriptor::new("ParentDst")
                    .with_field("tags", TypeRef::list(TypeRef::string()))
                    .with_constrained_field(
                        "children",
                        TypeRef::list(TypeRef::bean("ChildDst")),
                        vec![Constraint::valid()],
                    )
                    .with_field("lookup", TypeRef::map(TypeRef::bean("ChildDst")))
                    .with_field("favorite", TypeRef::optional(TypeRef::bean("ChildDst"))),
            )
            .with(
                BeanDescriptor::new("ChildDst")
                    .with_constrained_field(
                        "name",
                        TypeRef::string(),
                        vec![Constraint::not_blank()],
                    )
                    .with_constrained_field("age", TypeRef::int(), vec![Constraint::positive()]),
            ),
    )
}

/// A source child bean
pub fn child(name: &str, age: i64) -> Value {
    Bean::new("ChildSrc").with("name", name).with("age", age).into()
}

/// A source parent with the given children and no lookups
pub fn parent(children: Vec<Value>) -> Value {
    Bean::new("ParentSrc")
        .with("tags", Value::List(vec!["x".into(), "y".into()]))
        .with("children", Value::List(children))
        .with("lookup", Value::Map(Default::default()))
        .with("favorite", Value::Null)
        .into()
}

/// Names of the children of a transformed parent, in order
pub fn child_names(result: &Value) -> Vec<String> {
    result
        .as_bean()
        .and_then(|bean| bean.get("children"))
        .and_then(Value::as_elements)
        .map(|children| {
            children
                .iter()
                .filter_map(|c| c.as_bean()?.get("name")?.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
