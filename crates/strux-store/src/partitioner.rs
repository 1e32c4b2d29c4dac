//! Logical index to (partition, offset) arithmetic.
//!
//! Indices below the direct limit live in the direct partition at the same
//! offset. Indices at or beyond it live in overflow partitions:
//!
//! ```text
//! overflow = index - direct_limit
//! partition = overflow >> shift
//! offset    = overflow & (partition_size - 1)
//! ```

use crate::config::StoreConfig;

/// Physical location of one logical index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    /// In the directly addressable partition.
    Direct {
        /// Offset within the direct partition.
        offset: u32,
    },
    /// In an overflow partition.
    Overflow {
        /// Which overflow partition, counting from zero.
        partition: u32,
        /// Offset within that partition.
        offset: u32,
    },
}

/// Pure addressing arithmetic for one storage configuration.
///
/// Holds no state beyond the configured limit and exponent. Range checks
/// are the caller's job. [`locate`](Self::locate) expects an index the
/// owning store has admitted; [`checked_locate`](Self::checked_locate)
/// accepts any `u64`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexPartitioner {
    direct_limit: u64,
    shift: u32,
}

impl IndexPartitioner {
    /// Create a partitioner for the given configuration.
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            direct_limit: config.direct_limit,
            shift: config.partition_shift,
        }
    }

    /// Number of indices held by the direct partition.
    pub fn direct_limit(&self) -> u64 {
        self.direct_limit
    }

    /// Number of elements in each full overflow partition.
    pub fn partition_size(&self) -> u64 {
        1u64 << self.shift
    }

    /// Translate a logical index to its physical location.
    ///
    /// `index` must be below the length of a store planned with this
    /// partitioner. Such a store has at most `u32::MAX` overflow
    /// partitions, so the partition id always fits. Other indices may
    /// produce a truncated partition id; use
    /// [`checked_locate`](Self::checked_locate) for them.
    #[inline]
    pub fn locate(&self, index: u64) -> Location {
        if index < self.direct_limit {
            return Location::Direct {
                offset: index as u32,
            };
        }
        let overflow = index - self.direct_limit;
        let partition = overflow >> self.shift;
        debug_assert!(partition <= u64::from(u32::MAX), "partition id overflows u32");
        Location::Overflow {
            partition: partition as u32,
            offset: (overflow & (self.partition_size() - 1)) as u32,
        }
    }

    /// Translate any logical index, or `None` when its partition id does
    /// not fit `u32`.
    pub fn checked_locate(&self, index: u64) -> Option<Location> {
        if index < self.direct_limit {
            return Some(Location::Direct {
                offset: index as u32,
            });
        }
        let overflow = index - self.direct_limit;
        let partition = u32::try_from(overflow >> self.shift).ok()?;
        Some(Location::Overflow {
            partition,
            offset: (overflow & (self.partition_size() - 1)) as u32,
        })
    }

    /// Translate a physical location back to its logical index.
    pub fn to_index(&self, location: Location) -> u64 {
        match location {
            Location::Direct { offset } => u64::from(offset),
            Location::Overflow { partition, offset } => {
                self.direct_limit + (u64::from(partition) << self.shift) + u64::from(offset)
            }
        }
    }

    /// Length of the direct partition for an array of `length` elements.
    pub fn direct_len(&self, length: u64) -> u64 {
        length.min(self.direct_limit)
    }

    /// Number of overflow partitions needed to cover `length` elements.
    pub fn overflow_partitions(&self, length: u64) -> u64 {
        let overflow = length.saturating_sub(self.direct_limit);
        overflow.div_ceil(self.partition_size())
    }

    /// Number of elements held by overflow partition `partition`.
    ///
    /// Every partition but the last is full; the last holds the remainder.
    /// Returns zero for partitions past the end.
    pub fn partition_len(&self, length: u64, partition: u32) -> u32 {
        let overflow = length.saturating_sub(self.direct_limit);
        let start = u64::from(partition) << self.shift;
        overflow
            .saturating_sub(start)
            .min(self.partition_size()) as u32
    }
}
