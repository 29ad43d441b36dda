//! Integration tests for result validation

mod test_support;

use beanshift_core::validation::{BEAN_VALIDATOR_KEY, ConstraintEngine};
use beanshift_core::cache::{cache_manager, namespaces};
use beanshift_core::{Error, TransformerBuilder, Validator};
use pretty_assertions::assert_eq;
use test_support::{child, parent, parent_registry};

#[test]
fn test_violations_are_aggregated_in_discovery_order() {
    let transformer = TransformerBuilder::new()
        .registry(parent_registry())
        .validation(true)
        .build()
        .unwrap();
    let source = parent(vec![child("ok", 1), child(" ", 0), child("z", -3)]);

    let err = transformer.transform_to(Some(&source), "ParentDst").unwrap_err();
    assert_eq!(
        err.to_string(),
        "ParentDst.children[1].name must not be blank;\
         ParentDst.children[1].age must be positive;\
         ParentDst.children[2].age must be positive"
    );

    let Error::InvalidBean { violations, .. } = err else {
        panic!("expected an invalid bean error");
    };
    assert_eq!(violations.len(), 3);
    assert_eq!(violations[0].root_type, "ParentDst");
    assert_eq!(violations[2].property_path, "children[2].age");
}

#[test]
fn test_valid_result_is_returned() {
    let transformer = TransformerBuilder::new()
        .registry(parent_registry())
        .validation(true)
        .build()
        .unwrap();
    let source = parent(vec![child("a", 1)]);

    assert!(transformer.transform_to(Some(&source), "ParentDst").is_ok());
}

#[test]
fn test_validation_disabled_returns_invalid_result() {
    let transformer = TransformerBuilder::new()
        .registry(parent_registry())
        .build()
        .unwrap();
    let source = parent(vec![child("", 0)]);

    let result = transformer.transform_to(Some(&source), "ParentDst").unwrap();
    let validation = transformer.validator().check(&result).unwrap();
    assert!(!validation.is_valid());
    assert_eq!(validation.violations().len(), 2);
}

#[test]
fn test_engine_is_shared_through_the_cache() {
    let first = Validator::new(parent_registry());
    let second = Validator::new(parent_registry());
    let source = parent(vec![]);

    first.check(&source).unwrap();
    second.check(&source).unwrap();

    assert!(cache_manager(namespaces::VALIDATION).contains(BEAN_VALIDATOR_KEY));
    assert_eq!(ConstraintEngine::instances_built(), 1);
}
