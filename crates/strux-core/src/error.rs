//! Error types for strux arrays.
//!
//! Organized by layer: [`StoreError`] covers addressing and storage,
//! [`BuildError`] covers per-element construction and wraps storage
//! failures that occur mid-build.

use std::error::Error;
use std::fmt;

/// Errors from partitioned storage and indexed access.
///
/// All variants are caller-recoverable and never leave a store in a
/// corrupted state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The index is negative or not below the array length.
    IndexOutOfRange {
        /// The offending index, widened so negative inputs survive.
        index: i128,
        /// Length of the array that rejected it.
        length: u64,
    },
    /// A flat view was requested on an array longer than the direct
    /// partition can hold.
    LengthTooLarge {
        /// Logical length of the array.
        length: u64,
        /// Size limit of the direct partition.
        limit: u64,
    },
    /// More elements were requested than the storage can address.
    CapacityExceeded {
        /// Number of elements (or partitions) requested.
        requested: u64,
        /// Number that can be accommodated.
        capacity: u64,
    },
    /// A reserved store was sealed before every slot was written.
    Unfilled {
        /// Number of slots written.
        filled: u64,
        /// Number of slots reserved.
        length: u64,
    },
    /// A storage configuration invariant was violated.
    InvalidConfig {
        /// Description of which invariant was violated.
        reason: String,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, length } => {
                write!(f, "index {index} out of range for length {length}")
            }
            Self::LengthTooLarge { length, limit } => {
                write!(
                    f,
                    "length {length} exceeds flat view limit {limit}; use indexed access"
                )
            }
            Self::CapacityExceeded {
                requested,
                capacity,
            } => {
                write!(
                    f,
                    "storage capacity exceeded: requested {requested}, capacity {capacity}"
                )
            }
            Self::Unfilled { filled, length } => {
                write!(f, "store sealed with {filled} of {length} slots written")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid store config: {reason}"),
        }
    }
}

impl Error for StoreError {}

/// Errors from building a structured array.
///
/// Any of these aborts the build in progress. The partially built array
/// is dropped and never returned to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// A provider requested a constructor the element type does not have.
    NoMatchingConstructor {
        /// Name of the element type being constructed.
        element: &'static str,
        /// The requested constructor signature.
        constructor: String,
    },
    /// The model handed to a build or copy does not match the shape
    /// expected by the element type or the copy source.
    ShapeMismatch {
        /// The shape the build required.
        expected: String,
        /// The shape it was given.
        actual: String,
    },
    /// A caller-supplied constructor reported failure.
    ConstructionFailed {
        /// Index of the slot being constructed (within its own array).
        index: u64,
        /// Human-readable description of the failure.
        reason: String,
    },
    /// Storage allocation or addressing failed during the build.
    Storage(StoreError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMatchingConstructor {
                element,
                constructor,
            } => {
                write!(f, "no constructor {constructor} for element type {element}")
            }
            Self::ShapeMismatch { expected, actual } => {
                write!(f, "shape mismatch: expected {expected}, found {actual}")
            }
            Self::ConstructionFailed { index, reason } => {
                write!(f, "construction of slot {index} failed: {reason}")
            }
            Self::Storage(e) => write!(f, "storage error: {e}"),
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for BuildError {
    fn from(e: StoreError) -> Self {
        Self::Storage(e)
    }
}
