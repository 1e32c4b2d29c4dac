//! Structured and primitive arrays backed by partitioned storage.
//!
//! A [`StructuredArray`] is built by a [`StructuredArrayBuilder`] that
//! visits every slot in ascending order, hands a fresh construction context
//! to a provider, and runs the constructor it returns. Arrays of arrays are
//! built by [`NestedProvider`], which starts a nested build inside each
//! slot's context. [`CopyProvider`] and [`NestedCopyProvider`] rebuild an
//! existing array element by element, one level per [`CopyStrategy`].
//! [`PrimitiveArray`] skips construction entirely and stores
//! default-initialized values.
//!
//! ```
//! use strux_array::{NestedProvider, StructuredArray};
//! use strux_construct::{provider_fn, ConstructionContext};
//!
//! type Grid = StructuredArray<StructuredArray<u64>>;
//!
//! let model = Grid::nested_model_of(3, StructuredArray::<u64>::model_of(4));
//! let mut provider = NestedProvider::new(provider_fn(|_, ctx: &ConstructionContext<'_>| {
//!     let path = ctx.indices();
//!     Ok(path[0] * 100 + path[1])
//! }));
//! let grid = Grid::with_provider(&model, &mut provider)?;
//! assert_eq!(grid.get_at(2, 3)?, &203);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod copy;
pub mod nested;
pub mod primitive;
pub mod structured;

pub use builder::StructuredArrayBuilder;
pub use copy::{CloneElements, CopyProvider, CopyStrategy, CopySubArrays, NestedCopyProvider};
pub use nested::NestedProvider;
pub use primitive::PrimitiveArray;
pub use structured::StructuredArray;
