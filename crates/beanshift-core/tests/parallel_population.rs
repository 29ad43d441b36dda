//! Property tests: parallel and sequential population agree

mod test_support;

use beanshift_core::TransformerBuilder;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use test_support::{child, child_names, parent, parent_registry};

fn children_strategy() -> impl Strategy<Value = Vec<(String, i64)>> {
    prop::collection::vec(("[a-z]{1,8}", 1i64..1000), 0..300)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_parallel_population_preserves_order(
        children in children_strategy(),
        threshold in 1usize..64,
        workers in 2usize..8,
    ) {
        let source = parent(children.iter().map(|(name, age)| child(name, *age)).collect());

        let sequential = TransformerBuilder::new()
            .registry(parent_registry())
            .parallel_threshold(usize::MAX)
            .build()
            .unwrap();
        let parallel = TransformerBuilder::new()
            .registry(parent_registry())
            .parallel_threshold(threshold)
            .max_parallelism(workers)
            .build()
            .unwrap();

        let expected = sequential.transform_to(Some(&source), "ParentDst").unwrap();
        let actual = parallel.transform_to(Some(&source), "ParentDst").unwrap();

        prop_assert_eq!(&expected, &actual);
        let names: Vec<String> = children.into_iter().map(|(name, _)| name).collect();
        prop_assert_eq!(child_names(&actual), names);
    }
}

#[test]
fn test_large_collection_in_parallel() {
    let transformer = TransformerBuilder::new()
        .registry(parent_registry())
        .parallel_threshold(8)
        .max_parallelism(4)
        .build()
        .unwrap();
    let children: Vec<_> = (0..1000).map(|i| child(&format!("c{}", i), i + 1)).collect();

    let result = transformer.transform_to(Some(&parent(children)), "ParentDst").unwrap();
    let names = child_names(&result);
    assert_eq!(names.len(), 1000);
    assert_eq!(names[999], "c999");
}
