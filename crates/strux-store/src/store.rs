//! Partitioned storage: one direct partition plus overflow partitions.
//!
//! [`PartitionedStore`] owns every element of one logical array. Indices
//! below the direct limit resolve without partition arithmetic; the rest
//! resolve through [`IndexPartitioner`]. A store is either allocated full
//! of default values or reserved and then filled in ascending index order
//! through a [`StoreFiller`].

use strux_core::StoreError;

use crate::config::StoreConfig;
use crate::partition::Partition;
use crate::partitioner::{IndexPartitioner, Location};

/// Storage for one logical array of up to `2^63` elements.
///
/// Exclusively owned by the array it backs. `Clone` deep-copies the direct
/// partition and every overflow partition independently; original and
/// clone never share storage.
#[derive(Clone, Debug)]
pub struct PartitionedStore<E> {
    config: StoreConfig,
    partitioner: IndexPartitioner,
    length: u64,
    direct: Partition<E>,
    overflow: Vec<Partition<E>>,
}

/// Partition layout shared by `allocate` and `reserve`.
struct Layout {
    partitioner: IndexPartitioner,
    direct_len: u32,
    overflow_partitions: u32,
}

impl Layout {
    fn plan(length: u64, config: &StoreConfig) -> Result<Self, StoreError> {
        config.validate()?;
        let partitioner = IndexPartitioner::new(config);
        let overflow_partitions = partitioner.overflow_partitions(length);
        if overflow_partitions > u64::from(u32::MAX) {
            return Err(StoreError::CapacityExceeded {
                requested: overflow_partitions,
                capacity: u64::from(u32::MAX),
            });
        }
        tracing::trace!(
            length,
            direct_limit = config.direct_limit,
            overflow_partitions,
            "planned partitioned store"
        );
        Ok(Self {
            partitioner,
            direct_len: partitioner.direct_len(length) as u32,
            overflow_partitions: overflow_partitions as u32,
        })
    }
}

impl<E> PartitionedStore<E> {
    /// Allocate a store of `length` default-initialized elements.
    pub fn allocate(length: u64, config: StoreConfig) -> Result<Self, StoreError>
    where
        E: Default,
    {
        let layout = Layout::plan(length, &config)?;
        let overflow = (0..layout.overflow_partitions)
            .map(|id| Partition::filled_default(layout.partitioner.partition_len(length, id)))
            .collect();
        Ok(Self {
            config,
            partitioner: layout.partitioner,
            length,
            direct: Partition::filled_default(layout.direct_len),
            overflow,
        })
    }

    /// Reserve storage for `length` elements without initializing any.
    ///
    /// The returned filler must be given exactly `length` values in
    /// ascending index order before it can be sealed into a store.
    pub fn reserve(length: u64, config: StoreConfig) -> Result<StoreFiller<E>, StoreError> {
        let layout = Layout::plan(length, &config)?;
        let overflow = (0..layout.overflow_partitions)
            .map(|id| Partition::with_capacity(layout.partitioner.partition_len(length, id)))
            .collect();
        Ok(StoreFiller {
            store: Self {
                config,
                partitioner: layout.partitioner,
                length,
                direct: Partition::with_capacity(layout.direct_len),
                overflow,
            },
            filled: 0,
        })
    }

    /// Logical length.
    pub fn len(&self) -> u64 {
        self.length
    }

    /// Whether the store holds no elements.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The configuration this store was allocated with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The addressing arithmetic for this store.
    pub fn partitioner(&self) -> &IndexPartitioner {
        &self.partitioner
    }

    /// Shared reference to the element at `index`.
    #[inline]
    pub fn get(&self, index: u64) -> Result<&E, StoreError> {
        if index >= self.length {
            return Err(self.out_of_range(index));
        }
        let slot = match self.partitioner.locate(index) {
            Location::Direct { offset } => self.direct.get(offset),
            Location::Overflow { partition, offset } => self
                .overflow
                .get(partition as usize)
                .and_then(|p| p.get(offset)),
        };
        slot.ok_or_else(|| self.out_of_range(index))
    }

    /// Mutable reference to the element at `index`.
    #[inline]
    pub fn get_mut(&mut self, index: u64) -> Result<&mut E, StoreError> {
        if index >= self.length {
            return Err(self.out_of_range(index));
        }
        let length = self.length;
        let slot = match self.partitioner.locate(index) {
            Location::Direct { offset } => self.direct.get_mut(offset),
            Location::Overflow { partition, offset } => self
                .overflow
                .get_mut(partition as usize)
                .and_then(|p| p.get_mut(offset)),
        };
        slot.ok_or(StoreError::IndexOutOfRange {
            index: i128::from(index),
            length,
        })
    }

    /// Store `value` at `index`, returning the previous element.
    pub fn set(&mut self, index: u64, value: E) -> Result<E, StoreError> {
        Ok(std::mem::replace(self.get_mut(index)?, value))
    }

    /// The direct partition as one flat slice.
    ///
    /// Fails with [`StoreError::LengthTooLarge`] when any element lives in
    /// an overflow partition, since no single slice covers the array.
    pub fn as_flat_view(&self) -> Result<&[E], StoreError> {
        self.check_flat()?;
        Ok(self.direct.as_slice())
    }

    /// Mutable flat view; same restriction as [`as_flat_view`](Self::as_flat_view).
    pub fn as_flat_view_mut(&mut self) -> Result<&mut [E], StoreError> {
        self.check_flat()?;
        Ok(self.direct.as_mut_slice())
    }

    /// Number of overflow partitions.
    pub fn overflow_partition_count(&self) -> usize {
        self.overflow.len()
    }

    /// Elements of overflow partition `partition`.
    pub fn overflow_partition(&self, partition: u32) -> Option<&[E]> {
        self.overflow.get(partition as usize).map(Partition::as_slice)
    }

    /// Iterate every element in ascending logical index order.
    pub fn iter(&self) -> impl Iterator<Item = &E> + '_ {
        self.direct
            .as_slice()
            .iter()
            .chain(self.overflow.iter().flat_map(|p| p.as_slice().iter()))
    }

    /// Iterate every element mutably in ascending logical index order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut E> + '_ {
        self.direct
            .as_mut_slice()
            .iter_mut()
            .chain(
                self.overflow
                    .iter_mut()
                    .flat_map(|p| p.as_mut_slice().iter_mut()),
            )
    }

    /// Memory reserved across all partitions in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.direct.memory_bytes()
            + self
                .overflow
                .iter()
                .map(Partition::memory_bytes)
                .sum::<usize>()
    }

    fn check_flat(&self) -> Result<(), StoreError> {
        if self.length > self.partitioner.direct_limit() {
            return Err(StoreError::LengthTooLarge {
                length: self.length,
                limit: self.partitioner.direct_limit(),
            });
        }
        Ok(())
    }

    fn out_of_range(&self, index: u64) -> StoreError {
        StoreError::IndexOutOfRange {
            index: i128::from(index),
            length: self.length,
        }
    }
}

/// A reserved store being filled in ascending index order.
///
/// Slots are reserved but hold no valid element until pushed. Dropping a
/// filler drops every element pushed so far together with the storage.
#[derive(Debug)]
pub struct StoreFiller<E> {
    store: PartitionedStore<E>,
    filled: u64,
}

impl<E> StoreFiller<E> {
    /// Write `value` into the next slot, returning its logical index.
    pub fn push(&mut self, value: E) -> Result<u64, StoreError> {
        let index = self.filled;
        let length = self.store.length;
        if index >= length {
            return Err(StoreError::CapacityExceeded {
                requested: index + 1,
                capacity: length,
            });
        }
        let partition = match self.store.partitioner.locate(index) {
            Location::Direct { .. } => Some(&mut self.store.direct),
            Location::Overflow { partition, .. } => {
                self.store.overflow.get_mut(partition as usize)
            }
        };
        partition
            .ok_or(StoreError::CapacityExceeded {
                requested: index + 1,
                capacity: length,
            })?
            .push(value)
            .map_err(|_| StoreError::CapacityExceeded {
                requested: index + 1,
                capacity: length,
            })?;
        self.filled += 1;
        Ok(index)
    }

    /// Number of slots written so far.
    pub fn filled(&self) -> u64 {
        self.filled
    }

    /// Number of slots still to be written.
    pub fn remaining(&self) -> u64 {
        self.store.length - self.filled
    }

    /// Logical length being filled.
    pub fn len(&self) -> u64 {
        self.store.length
    }

    /// Whether the reserved length is zero.
    pub fn is_empty(&self) -> bool {
        self.store.length == 0
    }

    /// Seal the store once every slot has been written.
    pub fn finish(self) -> Result<PartitionedStore<E>, StoreError> {
        if self.filled != self.store.length {
            return Err(StoreError::Unfilled {
                filled: self.filled,
                length: self.store.length,
            });
        }
        Ok(self.store)
    }
}
