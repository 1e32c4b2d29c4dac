//! Copies never share storage with their source.

use strux_array::{NestedProvider, PrimitiveArray, StructuredArray};
use strux_construct::{provider_fn, ConstructionContext};
use strux_store::StoreConfig;
use strux_test_utils::fixtures::ConstProvider;

type Grid = StructuredArray<StructuredArray<Vec<u8>>>;

fn grid() -> Grid {
    let model = Grid::nested_model_of(3, StructuredArray::<Vec<u8>>::model_of(2));
    let mut provider = NestedProvider::new(provider_fn(|_, ctx: &ConstructionContext<'_>| {
        Ok(ctx.indices().iter().map(|&i| i as u8).collect::<Vec<u8>>())
    }));
    Grid::with_provider(&model, &mut provider).unwrap()
}

#[test]
fn flat_copy_is_equal_then_independent() {
    let model = StructuredArray::<String>::model_of(4);
    let mut provider = ConstProvider::new("x".to_string());
    let source = StructuredArray::<String>::with_provider(&model, &mut provider).unwrap();
    let mut copy = StructuredArray::copy_of(&source).unwrap();
    assert_eq!(copy, source);
    copy.get_mut(3).unwrap().push('y');
    assert_eq!(source.get(3).unwrap(), "x");
    assert_eq!(copy.get(3).unwrap(), "xy");
}

#[test]
fn nested_copy_is_element_wise_at_every_level() {
    let source = grid();
    let mut copy = Grid::copy_of_nested(&source).unwrap();
    assert_eq!(copy, source);
    assert_eq!(copy.model(), source.model());

    copy.get_mut(2).unwrap().get_mut(1).unwrap().push(9);
    assert_eq!(source.get_at(2, 1).unwrap(), &vec![2, 1]);
    assert_eq!(copy.get_at(2, 1).unwrap(), &vec![2, 1, 9]);
}

#[test]
fn clone_matches_copy_of_nested() {
    let source = grid();
    let cloned = source.clone();
    let copied = Grid::copy_of_nested(&source).unwrap();
    assert_eq!(cloned, copied);
    assert_ne!(cloned.id(), copied.id());
}

#[test]
fn copy_of_overflowing_array_keeps_layout() {
    let config = StoreConfig::new(4, 1);
    let model = StructuredArray::<u64>::model_of(9);
    let source = strux_array::StructuredArrayBuilder::new(&model)
        .with_config(config)
        .build(&mut provider_fn(|i, _: &ConstructionContext<'_>| Ok(i * 3)))
        .unwrap();
    let copy = StructuredArray::copy_of(&source).unwrap();
    assert_eq!(copy.config(), &config);
    assert_eq!(copy.store().overflow_partition_count(), 3);
    assert_eq!(copy.get(8), Ok(&24));
}

#[test]
fn primitive_copy_is_independent() {
    let source = PrimitiveArray::from_fn(6, StoreConfig::new(2, 1), |i| i as i16 - 3).unwrap();
    let mut copy = PrimitiveArray::copy_of(&source);
    copy.fill(0);
    assert_eq!(source.get(5), Ok(2));
    assert!(copy.iter().all(|v| v == 0));
}
