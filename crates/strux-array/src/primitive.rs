//! Arrays of plain values with no per-element construction.

use std::fmt;

use strux_core::{ArrayIndex, ArrayModel, ElementAccess, StoreError};
use strux_store::{PartitionedStore, StoreConfig};

/// A fixed-length array of up to `2^63` copyable values.
///
/// Elements start as `T::default()`. Reads and writes move values in and
/// out by copy. `Clone` is a deep copy.
#[derive(Clone)]
pub struct PrimitiveArray<T> {
    model: ArrayModel,
    store: PartitionedStore<T>,
}

impl<T: Copy + Default + 'static> PrimitiveArray<T> {
    /// `length` default values.
    pub fn new(length: u64) -> Result<Self, StoreError> {
        Self::with_config(length, StoreConfig::default())
    }

    /// `length` default values stored according to `config`.
    pub fn with_config(length: u64, config: StoreConfig) -> Result<Self, StoreError> {
        Ok(Self {
            model: ArrayModel::new::<T>(length),
            store: PartitionedStore::allocate(length, config)?,
        })
    }

    /// `length` values where slot `i` holds `f(i)`.
    pub fn from_fn<F>(length: u64, config: StoreConfig, mut f: F) -> Result<Self, StoreError>
    where
        F: FnMut(u64) -> T,
    {
        let mut array = Self::with_config(length, config)?;
        for (index, slot) in (0u64..).zip(array.store.iter_mut()) {
            *slot = f(index);
        }
        Ok(array)
    }

    /// Deep copy of `source`.
    pub fn copy_of(source: &Self) -> Self {
        source.clone()
    }

    /// Value at `index`.
    pub fn get<I: ArrayIndex>(&self, index: I) -> Result<T, StoreError> {
        let index = index.resolve(self.len())?;
        self.store.get(index).copied()
    }

    /// Store `value` at `index`, returning the previous value.
    pub fn set<I: ArrayIndex>(&mut self, index: I, value: T) -> Result<T, StoreError> {
        let index = index.resolve(self.len())?;
        self.store.set(index, value)
    }

    /// Overwrite every slot with `value`.
    pub fn fill(&mut self, value: T) {
        for slot in self.store.iter_mut() {
            *slot = value;
        }
    }
}

impl<T> PrimitiveArray<T> {
    /// The model describing this array.
    pub fn model(&self) -> &ArrayModel {
        &self.model
    }

    /// Number of elements.
    pub fn len(&self) -> u64 {
        self.store.len()
    }

    /// Whether the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Store configuration backing this array.
    pub fn config(&self) -> &StoreConfig {
        self.store.config()
    }

    /// Read-only access to the backing store.
    pub fn store(&self) -> &PartitionedStore<T> {
        &self.store
    }

    /// All values as one slice, if the array fits the direct partition.
    pub fn as_flat_view(&self) -> Result<&[T], StoreError> {
        self.store.as_flat_view()
    }

    /// Mutable counterpart of [`as_flat_view`](Self::as_flat_view).
    pub fn as_flat_view_mut(&mut self) -> Result<&mut [T], StoreError> {
        self.store.as_flat_view_mut()
    }

    /// Values in index order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_
    where
        T: Copy,
    {
        self.store.iter().copied()
    }
}

impl<T: PartialEq> PartialEq for PrimitiveArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.model == other.model && self.store.iter().eq(other.store.iter())
    }
}

impl<T> fmt::Debug for PrimitiveArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimitiveArray")
            .field("model", &format_args!("{}", self.model))
            .field("overflow_partitions", &self.store.overflow_partition_count())
            .finish()
    }
}

impl<T> ElementAccess for PrimitiveArray<T> {
    type Element = T;

    fn model(&self) -> &ArrayModel {
        &self.model
    }

    fn len(&self) -> u64 {
        self.store.len()
    }

    fn element(&self, index: u64) -> Result<&T, StoreError> {
        self.store.get(index)
    }

    fn element_mut(&mut self, index: u64) -> Result<&mut T, StoreError> {
        self.store.get_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed() {
        let array = PrimitiveArray::<f64>::new(16).unwrap();
        assert_eq!(array.len(), 16);
        assert!(array.iter().all(|v| v == 0.0));
        assert_eq!(array.model().to_string(), "f64[16]");
    }

    #[test]
    fn set_and_get_by_value() {
        let mut array = PrimitiveArray::<i32>::new(4).unwrap();
        assert_eq!(array.set(1, -5), Ok(0));
        assert_eq!(array.get(1), Ok(-5));
        assert_eq!(
            array.get(-1i64).unwrap_err(),
            StoreError::IndexOutOfRange {
                index: -1,
                length: 4
            }
        );
    }

    #[test]
    fn fill_reaches_overflow_partitions() {
        let mut array = PrimitiveArray::<u16>::with_config(10, StoreConfig::new(3, 2)).unwrap();
        array.fill(7);
        assert!(array.iter().all(|v| v == 7));
        assert_eq!(array.get(9u64), Ok(7));
    }

    #[test]
    fn copy_is_independent() {
        let original = PrimitiveArray::from_fn(5, StoreConfig::default(), |i| i as u32).unwrap();
        let mut copy = PrimitiveArray::copy_of(&original);
        copy.set(0, 99).unwrap();
        assert_eq!(original.get(0), Ok(0));
        assert_eq!(copy.get(0), Ok(99));
        assert_eq!(copy.as_flat_view().unwrap()[1..], [1, 2, 3, 4]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn from_fn_matches_generator(len in 0u64..200, limit in 1u64..32, shift in 0u32..4) {
                let config = StoreConfig::new(limit, shift);
                let array = PrimitiveArray::from_fn(len, config, |i| i.wrapping_mul(31)).unwrap();
                prop_assert_eq!(array.len(), len);
                for i in 0..len {
                    prop_assert_eq!(array.get(i), Ok(i.wrapping_mul(31)));
                }
            }
        }
    }
}
