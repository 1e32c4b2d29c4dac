//! Core types and traits for strux partitioned arrays.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other strux crate: array identities,
//! index conversion, shape models, error types, and the element access
//! capability trait.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod model;
pub mod traits;

pub use error::{BuildError, StoreError};
pub use id::{ArrayId, ArrayIndex, Indices};
pub use model::{ArrayModel, ElementType};
pub use traits::ElementAccess;
