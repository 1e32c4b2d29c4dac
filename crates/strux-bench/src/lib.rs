//! Benchmark profiles and utilities for strux arrays.
//!
//! Provides pre-built configurations and arrays for benchmarks:
//!
//! - [`overflow_config`]: a store config that spills into overflow
//!   partitions after 64K elements, so overflow paths run at bench scale
//! - [`grid_model`]: a two-level nested model of `u64` leaves
//! - [`sequential_store`]: a store holding `0..length`

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use strux_array::StructuredArray;
use strux_core::ArrayModel;
use strux_store::{PartitionedStore, StoreConfig};

/// Direct limit used by [`overflow_config`].
pub const BENCH_DIRECT_LIMIT: u64 = 1 << 16;

/// Overflow partition exponent used by [`overflow_config`].
pub const BENCH_PARTITION_SHIFT: u32 = 14;

/// A config with a 64K direct partition and 16K overflow partitions.
pub fn overflow_config() -> StoreConfig {
    StoreConfig::new(BENCH_DIRECT_LIMIT, BENCH_PARTITION_SHIFT)
}

/// Model for `rows` sub-arrays of `cols` `u64` elements.
pub fn grid_model(rows: u64, cols: u64) -> ArrayModel {
    StructuredArray::<StructuredArray<u64>>::nested_model_of(
        rows,
        StructuredArray::<u64>::model_of(cols),
    )
}

/// A store of `length` elements where slot `i` holds `i`.
///
/// # Panics
///
/// Panics if `config` cannot hold `length` elements.
pub fn sequential_store(length: u64, config: StoreConfig) -> PartitionedStore<u64> {
    let mut filler = match PartitionedStore::reserve(length, config) {
        Ok(filler) => filler,
        Err(e) => panic!("bench store of {length} elements: {e}"),
    };
    for i in 0..length {
        if let Err(e) = filler.push(i) {
            panic!("bench store push {i}: {e}");
        }
    }
    match filler.finish() {
        Ok(store) => store,
        Err(e) => panic!("bench store finish: {e}"),
    }
}
