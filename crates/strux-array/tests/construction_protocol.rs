//! End-to-end checks of the per-slot construction protocol.

use std::any::Any;

use strux_array::{
    CopyStrategy, CopySubArrays, NestedProvider, StructuredArray, StructuredArrayBuilder,
};
use strux_construct::{
    provider_fn, ArrayInfo, ByIndices, ConstructionContext, Constructor, ConstructorTable,
    DefaultProvider, FnProvider, MultiDimProvider,
};
use strux_core::{ArrayId, ArrayModel, BuildError};
use strux_test_utils::fixtures::{FailingProvider, FailureMode};
use strux_test_utils::{Witness, WitnessProvider, RecordingProvider};

type Grid<T> = StructuredArray<StructuredArray<T>>;

fn grid_model<T: 'static>(rows: u64, cols: u64) -> ArrayModel {
    Grid::<T>::nested_model_of(rows, StructuredArray::<T>::model_of(cols))
}

#[test]
fn nested_slots_are_visited_row_major() {
    let model = grid_model::<Witness>(3, 4);
    let mut provider = NestedProvider::new(RecordingProvider::new(WitnessProvider::new()));
    let grid = Grid::<Witness>::with_provider(&model, &mut provider).unwrap();

    let expected: Vec<Vec<u64>> = (0..3)
        .flat_map(|row| (0..4).map(move |col| vec![row, col]))
        .collect();
    let recorder = provider.inner();
    assert_eq!(recorder.log(), expected.as_slice());
    assert_eq!(recorder.inner().constructed(), 12);

    for (row, sub) in (0u64..).zip(grid.iter()) {
        for (col, witness) in (0u64..).zip(sub.iter()) {
            assert_eq!(witness.path, vec![row, col]);
            assert_eq!(witness.depth, 1);
            assert_eq!(witness.serial as u64, row * 4 + col);
        }
    }
}

#[test]
fn outer_provider_is_asked_once_per_row() {
    let model = grid_model::<u32>(5, 2);
    let mut provider = RecordingProvider::new(NestedProvider::new(DefaultProvider));
    let grid = Grid::<u32>::with_provider(&model, &mut provider).unwrap();
    assert_eq!(grid.len(), 5);
    assert_eq!(
        provider.log(),
        &[vec![0u64], vec![1], vec![2], vec![3], vec![4]]
    );
}

#[test]
fn failing_slot_aborts_the_build() {
    let model = StructuredArray::<u64>::model_of(10);
    let mut provider = FailingProvider::new(5);
    let result = StructuredArray::<u64>::with_provider(&model, &mut provider);
    assert!(matches!(
        result,
        Err(BuildError::NoMatchingConstructor { .. })
    ));
    assert_eq!(provider.calls(), 6);
}

#[test]
fn failing_constructor_aborts_the_build() {
    let model = StructuredArray::<String>::model_of(4);
    let mut provider = FailingProvider::with_mode(0, FailureMode::Constructor);
    let result = StructuredArray::<String>::with_provider(&model, &mut provider);
    assert_eq!(
        result.unwrap_err(),
        BuildError::ConstructionFailed {
            index: 0,
            reason: "deliberate failure".into()
        }
    );
    assert_eq!(provider.calls(), 1);
}

#[test]
fn failure_in_a_sub_array_fails_the_outer_build() {
    let model = grid_model::<u8>(4, 3);
    let mut rows_started = 0;
    let mut provider = NestedProvider::new(provider_fn(|index, ctx: &ConstructionContext<'_>| {
        let row = ctx.containing().map_or(0, |outer| outer.index());
        if index == 0 {
            rows_started += 1;
        }
        if row == 2 && index == 1 {
            return Err(BuildError::ConstructionFailed {
                index,
                reason: "row 2 rejected".into(),
            });
        }
        Ok(1u8)
    }));
    let result = Grid::<u8>::with_provider(&model, &mut provider);
    assert!(matches!(
        result,
        Err(BuildError::ConstructionFailed { index: 1, .. })
    ));
    drop(provider);
    assert_eq!(rows_started, 3);
}

#[test]
fn cookie_reaches_every_level() {
    const COOKIE: u64 = 0xC0FFEE;
    let model = grid_model::<Witness>(2, 3);
    let mut provider = NestedProvider::new(WitnessProvider::new());
    let grid: Grid<Witness> = StructuredArrayBuilder::new(&model)
        .with_cookie(&COOKIE)
        .build(&mut provider)
        .unwrap();
    assert!(grid
        .iter()
        .flat_map(|sub| sub.iter())
        .all(|witness| witness.cookie == Some(COOKIE)));
}

#[test]
fn no_cookie_means_none_everywhere() {
    let model = grid_model::<Witness>(2, 2);
    let grid =
        Grid::<Witness>::with_provider(&model, &mut NestedProvider::new(WitnessProvider::new()))
            .unwrap();
    assert!(grid
        .iter()
        .flat_map(|sub| sub.iter())
        .all(|witness| witness.cookie.is_none()));
}

#[test]
fn top_level_witnesses_have_depth_zero() {
    let model = StructuredArray::<Witness>::model_of(3);
    let array =
        StructuredArray::<Witness>::with_provider(&model, &mut WitnessProvider::new()).unwrap();
    let paths: Vec<_> = array.iter().map(|p| (p.path.clone(), p.depth)).collect();
    assert_eq!(paths, vec![(vec![0], 0), (vec![1], 0), (vec![2], 0)]);
}

#[test]
fn element_type_must_match_model() {
    let model = StructuredArray::<u32>::model_of(2);
    let result = StructuredArray::<i64>::new(&model);
    assert!(matches!(result, Err(BuildError::ShapeMismatch { .. })));
}

#[test]
fn empty_array_never_calls_the_provider() {
    let model = StructuredArray::<u64>::model_of(0);
    let mut provider = FailingProvider::new(0);
    let array = StructuredArray::<u64>::with_provider(&model, &mut provider).unwrap();
    assert!(array.is_empty());
    assert_eq!(provider.calls(), 0);
}

#[test]
fn new_within_continues_the_enclosing_chain() {
    const COOKIE: u64 = 77;
    let outer_model = grid_model::<Witness>(9, 3);
    let enclosing = ConstructionContext::new(
        7,
        ArrayInfo::new(ArrayId::next(), &outer_model),
        None,
        Some(&COOKIE as &dyn Any),
    );
    let model = StructuredArray::<Witness>::model_of(3);
    let row =
        StructuredArray::<Witness>::new_within(&model, &mut WitnessProvider::new(), Some(&enclosing))
            .unwrap();

    for (col, witness) in (0u64..).zip(row.iter()) {
        assert_eq!(witness.path, vec![7, col]);
        assert_eq!(witness.depth, 1);
        assert_eq!(witness.cookie, Some(COOKIE));
    }
}

#[test]
fn new_within_none_builds_a_top_level_array() {
    let model = StructuredArray::<Witness>::model_of(2);
    let array =
        StructuredArray::<Witness>::new_within(&model, &mut WitnessProvider::new(), None).unwrap();
    let paths: Vec<_> = array.iter().map(|p| (p.path.clone(), p.depth)).collect();
    assert_eq!(paths, vec![(vec![0], 0), (vec![1], 0)]);
    assert!(array.iter().all(|p| p.cookie.is_none()));
}

type RowFn = fn(u64, &ConstructionContext<'_>) -> Result<u64, BuildError>;

/// Copies each row by reading the source row handed over as the cookie.
struct ScaleFromCookie;

impl CopyStrategy<u64> for ScaleFromCookie {
    type Provider<'s> = FnProvider<RowFn>;

    fn provider(_source: &StructuredArray<u64>) -> Self::Provider<'_> {
        let read: RowFn = |index, ctx| {
            let row = ctx.cookie_as::<StructuredArray<u64>>().ok_or(
                BuildError::ConstructionFailed {
                    index,
                    reason: "cookie is not a source row".into(),
                },
            )?;
            Ok(*row.get(index)? * 10)
        };
        provider_fn(read)
    }
}

#[test]
fn nested_copy_hands_each_source_row_to_the_row_build() {
    let model = grid_model::<u64>(3, 4);
    let source = Grid::<u64>::with_provider(
        &model,
        &mut NestedProvider::new(provider_fn(|col, ctx: &ConstructionContext<'_>| {
            let row = ctx.containing().map_or(0, |outer| outer.index());
            Ok::<u64, BuildError>(row * 4 + col)
        })),
    )
    .unwrap();

    let copy = Grid::<u64>::copy_with::<CopySubArrays<ScaleFromCookie>>(&source).unwrap();
    assert_eq!(copy.len(), 3);
    for (src_row, copy_row) in source.iter().zip(copy.iter()) {
        assert_ne!(src_row.id(), copy_row.id());
        let scaled: Vec<u64> = src_row.iter().map(|v| v * 10).collect();
        assert_eq!(copy_row.iter().copied().collect::<Vec<_>>(), scaled);
    }
}

/// Places each cell at `row * 100 + col`, computed from the full index path.
struct Place;

impl MultiDimProvider<u64> for Place {
    fn constructor_for_indices(
        &mut self,
        indices: &[u64],
        _ctx: &ConstructionContext<'_>,
    ) -> Result<Constructor<'_, u64>, BuildError> {
        match indices {
            [row, col] => Ok(Constructor::value("place", row * 100 + col)),
            other => Err(BuildError::ConstructionFailed {
                index: other.last().copied().unwrap_or(0),
                reason: format!("expected a 2-d path, got {other:?}"),
            }),
        }
    }
}

#[test]
fn multi_dim_provider_fills_a_nested_build() {
    let model = grid_model::<u64>(3, 4);
    let grid =
        Grid::<u64>::with_provider(&model, &mut NestedProvider::new(ByIndices(Place))).unwrap();
    for (row, sub) in (0u64..).zip(grid.iter()) {
        let values: Vec<u64> = sub.iter().copied().collect();
        let expected: Vec<u64> = (0..4).map(|col| row * 100 + col).collect();
        assert_eq!(values, expected);
    }
}

#[test]
fn multi_dim_provider_at_the_wrong_rank_fails() {
    let model = StructuredArray::<u64>::model_of(2);
    let result = StructuredArray::<u64>::with_provider(&model, &mut ByIndices(Place));
    assert!(matches!(
        result,
        Err(BuildError::ConstructionFailed { index: 0, .. })
    ));
}

fn squares_table() -> ConstructorTable<u64> {
    let mut table = ConstructorTable::new();
    table
        .register("square", |x: u64| x * x)
        .register("shift", |(x, by): (u64, u32)| x << by);
    table
}

#[test]
fn table_provider_builds_every_slot() {
    let table = squares_table();
    let model = StructuredArray::<u64>::model_of(5);
    let mut provider = table.provider(|index, _ctx: &ConstructionContext<'_>| ("square", index));
    let array = StructuredArray::<u64>::with_provider(&model, &mut provider).unwrap();
    assert_eq!(array.iter().copied().collect::<Vec<_>>(), vec![0, 1, 4, 9, 16]);
}

#[test]
fn unknown_table_constructor_aborts_the_build() {
    let table = squares_table();
    let model = StructuredArray::<u64>::model_of(6);
    let mut asked = Vec::new();
    let mut provider = table.provider(|index, _ctx: &ConstructionContext<'_>| {
        asked.push(index);
        if index == 3 {
            ("cube", index)
        } else {
            ("square", index)
        }
    });
    let result = StructuredArray::<u64>::with_provider(&model, &mut provider);
    assert_eq!(
        result.unwrap_err(),
        BuildError::NoMatchingConstructor {
            element: "u64",
            constructor: "cube(u64)".into(),
        }
    );
    drop(provider);
    assert_eq!(asked, vec![0, 1, 2, 3]);
}

#[test]
fn table_overload_with_wrong_arguments_fails_inside_a_nested_build() {
    let table = squares_table();
    let model = grid_model::<u64>(2, 3);
    // `shift` is registered for `(u64, u32)`, not `u64`.
    let mut provider = NestedProvider::new(table.provider(
        |index, ctx: &ConstructionContext<'_>| {
            let row = ctx.containing().map_or(0, |outer| outer.index());
            if row == 1 {
                ("shift", index)
            } else {
                ("square", index)
            }
        },
    ));
    let result = Grid::<u64>::with_provider(&model, &mut provider);
    assert!(matches!(
        result,
        Err(BuildError::NoMatchingConstructor { ref constructor, .. }) if constructor == "shift(u64)"
    ));
}
