//! Construction contexts and providers for strux arrays.
//!
//! A build populates an array slot by slot. For each slot it creates a
//! [`ConstructionContext`] and asks a [`ConstructionArgsProvider`] for a
//! [`Constructor`], then runs that constructor to produce the element.
//! Multi-dimensional providers implement [`MultiDimProvider`] and are
//! adapted with [`ByIndices`]. Named, argument-typed constructors live in
//! a [`ConstructorTable`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod provider;
pub mod table;

pub use context::{ArrayInfo, ConstructionContext};
pub use provider::{
    provider_fn, ByIndices, ConstructionArgsProvider, Constructor, DefaultProvider, FnProvider,
    MultiDimProvider,
};
pub use table::{ConstructorTable, TableProvider};
