//! Partitioned storage for strux arrays.
//!
//! Provides the storage engine shared by every array flavor: a logical
//! array of up to `2^63` elements split into one directly addressable
//! partition and a sequence of fixed-size overflow partitions.
//!
//! # Architecture
//!
//! ```text
//! PartitionedStore<E>
//! ├── IndexPartitioner (pure index ↔ (partition, offset) arithmetic)
//! ├── Partition<E>      direct: indices [0, direct_limit)
//! └── Partition<E> × N  overflow: 2^shift elements each, last truncated
//! ```
//!
//! # Fill modes
//!
//! - **Allocated:** every slot default-initialized up front (primitive arrays).
//! - **Reserved:** capacity reserved, slots written in ascending index order
//!   through a [`StoreFiller`] and sealed once complete (structured arrays).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod partition;
pub mod partitioner;
pub mod store;

// Public re-exports for the primary API surface.
pub use config::StoreConfig;
pub use partition::Partition;
pub use partitioner::{IndexPartitioner, Location};
pub use store::{PartitionedStore, StoreFiller};
