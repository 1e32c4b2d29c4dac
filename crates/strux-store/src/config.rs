//! Storage configuration parameters.

use strux_core::StoreError;

/// Configuration for partitioned storage.
///
/// Controls where the direct partition ends and how large each overflow
/// partition is. Validated at every allocation; all values are immutable
/// once a store is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Number of logical indices held by the direct partition.
    ///
    /// Default: `2^31 - 1`, the natively addressable bound.
    /// Must not exceed [`StoreConfig::NATIVE_INDEX_LIMIT`].
    pub direct_limit: u64,

    /// Base-2 logarithm of the overflow partition size.
    ///
    /// Default: 30 (1G elements per overflow partition).
    /// Must not exceed [`StoreConfig::MAX_PARTITION_SHIFT`].
    pub partition_shift: u32,
}

impl StoreConfig {
    /// The natively addressable bound: `2^31 - 1`.
    pub const NATIVE_INDEX_LIMIT: u64 = i32::MAX as u64;

    /// Default overflow partition size exponent.
    pub const DEFAULT_PARTITION_SHIFT: u32 = 30;

    /// Largest permitted exponent; keeps in-partition offsets within `u32`.
    pub const MAX_PARTITION_SHIFT: u32 = 30;

    /// Create a config with explicit limits.
    pub fn new(direct_limit: u64, partition_shift: u32) -> Self {
        Self {
            direct_limit,
            partition_shift,
        }
    }

    /// Number of elements in each full overflow partition.
    pub fn partition_size(&self) -> u64 {
        1u64 << self.partition_shift
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.direct_limit > Self::NATIVE_INDEX_LIMIT {
            return Err(StoreError::InvalidConfig {
                reason: format!(
                    "direct_limit {} exceeds native index limit {}",
                    self.direct_limit,
                    Self::NATIVE_INDEX_LIMIT
                ),
            });
        }
        if self.partition_shift > Self::MAX_PARTITION_SHIFT {
            return Err(StoreError::InvalidConfig {
                reason: format!(
                    "partition_shift {} exceeds maximum {}",
                    self.partition_shift,
                    Self::MAX_PARTITION_SHIFT
                ),
            });
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(Self::NATIVE_INDEX_LIMIT, Self::DEFAULT_PARTITION_SHIFT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limit_is_native_bound() {
        let config = StoreConfig::default();
        assert_eq!(config.direct_limit, 2_147_483_647);
        assert_eq!(config.partition_size(), 1 << 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn small_configs_are_valid() {
        assert!(StoreConfig::new(0, 0).validate().is_ok());
        assert!(StoreConfig::new(8, 2).validate().is_ok());
    }

    #[test]
    fn direct_limit_above_native_rejected() {
        let config = StoreConfig::new(StoreConfig::NATIVE_INDEX_LIMIT + 1, 4);
        assert!(matches!(
            config.validate(),
            Err(StoreError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn oversized_partition_shift_rejected() {
        let config = StoreConfig::new(16, 31);
        assert!(matches!(
            config.validate(),
            Err(StoreError::InvalidConfig { .. })
        ));
    }
}
