//! Strux: large-capacity partitioned arrays with per-element construction.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all strux sub-crates. For most users, adding `strux` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use strux::prelude::*;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Cell {
//!     row: u64,
//!     col: u64,
//!     tag: &'static str,
//! }
//!
//! // A provider that builds each cell from its position and the cookie.
//! struct CellProvider;
//! impl ConstructionArgsProvider<Cell> for CellProvider {
//!     fn constructor_for(
//!         &mut self,
//!         _index: u64,
//!         _ctx: &ConstructionContext<'_>,
//!     ) -> Result<Constructor<'_, Cell>, BuildError> {
//!         Ok(Constructor::new("cell", |ctx| {
//!             let path = ctx.indices();
//!             Ok(Cell {
//!                 row: path[0],
//!                 col: path[1],
//!                 tag: ctx.cookie_as::<&'static str>().copied().unwrap_or("untagged"),
//!             })
//!         }))
//!     }
//! }
//!
//! type Grid = StructuredArray<StructuredArray<Cell>>;
//!
//! let model = Grid::nested_model_of(3, StructuredArray::<Cell>::model_of(4));
//! let tag = "demo";
//! let grid: Grid = StructuredArrayBuilder::new(&model)
//!     .with_cookie(&tag)
//!     .build(&mut NestedProvider::new(CellProvider))
//!     .unwrap();
//! assert_eq!(grid.get_at(2, 3).unwrap(), &Cell { row: 2, col: 3, tag: "demo" });
//!
//! let copy = Grid::copy_of_nested(&grid).unwrap();
//! assert_eq!(copy, grid);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `strux-core` | Models, IDs, index types, errors, element access |
//! | [`store`] | `strux-store` | Partitioned storage and its configuration |
//! | [`construct`] | `strux-construct` | Construction contexts, providers, constructor tables |
//! | [`array`] | `strux-array` | Builders, structured and primitive arrays, copying |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`strux-core`).
///
/// Contains [`types::ArrayModel`], [`types::ArrayId`], the index trait
/// [`types::ArrayIndex`], and the error types.
pub use strux_core as types;

/// Partitioned element storage (`strux-store`).
///
/// [`store::PartitionedStore`] holds one array's elements in a direct
/// partition plus overflow partitions sized by [`store::StoreConfig`].
pub use strux_store as store;

/// Construction contexts and providers (`strux-construct`).
///
/// The [`construct::ConstructionArgsProvider`] trait is the main extension
/// point for user-defined element construction.
pub use strux_construct as construct;

/// Builders and array types (`strux-array`).
///
/// [`array::StructuredArray`] for constructed elements,
/// [`array::PrimitiveArray`] for plain values.
pub use strux_array as array;

/// Common imports for typical strux usage.
///
/// ```rust
/// use strux::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use strux_core::{ArrayId, ArrayIndex, ArrayModel, ElementAccess, ElementType};

    // Errors
    pub use strux_core::{BuildError, StoreError};

    // Storage
    pub use strux_store::StoreConfig;

    // Construction
    pub use strux_construct::{
        provider_fn, ByIndices, ConstructionArgsProvider, ConstructionContext, Constructor,
        ConstructorTable, DefaultProvider, MultiDimProvider,
    };

    // Arrays
    pub use strux_array::{
        CloneElements, CopyProvider, CopyStrategy, CopySubArrays, NestedCopyProvider,
        NestedProvider, PrimitiveArray, StructuredArray, StructuredArrayBuilder,
    };
}
