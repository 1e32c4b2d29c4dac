//! Array identities, logical index conversion, and the [`Indices`] alias.

use smallvec::SmallVec;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::StoreError;

/// Counter for unique [`ArrayId`] allocation.
static ARRAY_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for an array.
///
/// Allocated from a monotonic atomic counter via [`ArrayId::next`] when a
/// build starts, so construction contexts can name the array they are
/// populating before the array value itself exists. Cloning an array
/// allocates a fresh ID: clones are independent, mutable instances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArrayId(u64);

impl ArrayId {
    /// Allocate a fresh, unique array ID.
    ///
    /// Each call returns a new ID that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(ARRAY_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ArrayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A position within a (possibly nested) array, outermost dimension first.
///
/// Uses `SmallVec<[u64; 4]>` so index vectors of up to four dimensions
/// never touch the heap. Deeper nesting spills transparently.
pub type Indices = SmallVec<[u64; 4]>;

/// An integer type usable as an array index.
///
/// Implemented for the 32-bit and 64-bit integer types (signed and
/// unsigned) plus `usize`. Every accessor resolves through
/// [`resolve`](ArrayIndex::resolve), so a negative signed index and an
/// index past the end fail identically with
/// [`StoreError::IndexOutOfRange`].
pub trait ArrayIndex: Copy {
    /// Widen to `i128`, which represents every implementing type exactly.
    fn as_i128(self) -> i128;

    /// Range-check against `length` and convert to a logical `u64` index.
    fn resolve(self, length: u64) -> Result<u64, StoreError> {
        let index = self.as_i128();
        if index < 0 || index >= i128::from(length) {
            return Err(StoreError::IndexOutOfRange { index, length });
        }
        Ok(index as u64)
    }
}

macro_rules! impl_array_index {
    ($($ty:ty),*) => {
        $(
            impl ArrayIndex for $ty {
                #[inline]
                fn as_i128(self) -> i128 {
                    self as i128
                }
            }
        )*
    };
}

impl_array_index!(u32, u64, usize, i32, i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_ids_are_unique() {
        let a = ArrayId::next();
        let b = ArrayId::next();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }

    #[test]
    fn resolve_accepts_in_range_indices() {
        assert_eq!(3u32.resolve(10), Ok(3));
        assert_eq!(9u64.resolve(10), Ok(9));
        assert_eq!(0usize.resolve(1), Ok(0));
        assert_eq!(4i32.resolve(5), Ok(4));
        assert_eq!(7i64.resolve(8), Ok(7));
    }

    #[test]
    fn resolve_rejects_length_itself() {
        assert_eq!(
            10u64.resolve(10),
            Err(StoreError::IndexOutOfRange {
                index: 10,
                length: 10
            })
        );
    }

    #[test]
    fn resolve_rejects_negative_indices() {
        assert_eq!(
            (-1i32).resolve(10),
            Err(StoreError::IndexOutOfRange {
                index: -1,
                length: 10
            })
        );
        assert!(i64::MIN.resolve(u64::MAX).is_err());
    }

    #[test]
    fn resolve_handles_indices_beyond_i32() {
        let big = u64::from(u32::MAX) + 7;
        assert_eq!(big.resolve(big + 1), Ok(big));
        assert!(u64::MAX.resolve(u64::MAX).is_err());
    }

    #[test]
    fn empty_length_rejects_everything() {
        assert!(0u32.resolve(0).is_err());
    }
}
