//! Per-slot construction context passed to providers.
//!
//! A fresh [`ConstructionContext`] is created for every slot the builder
//! populates. It names the slot (index and owning array), links to the
//! context of the enclosing slot when the array is nested inside another
//! array under construction, and carries the caller's opaque cookie.
//! Contexts borrow from the build that created them, so none can outlive
//! it; providers copy out whatever they want to keep.

use std::any::Any;
use std::fmt;

use strux_core::{ArrayId, ArrayModel, Indices};

/// Describes the array a slot belongs to.
///
/// The array value does not exist until its build seals, so this carries
/// the identity it will be sealed with plus its model.
#[derive(Clone, Copy, Debug)]
pub struct ArrayInfo<'a> {
    id: ArrayId,
    model: &'a ArrayModel,
}

impl<'a> ArrayInfo<'a> {
    /// Describe the array with identity `id` and shape `model`.
    pub fn new(id: ArrayId, model: &'a ArrayModel) -> Self {
        Self { id, model }
    }

    /// Identity of the array under construction.
    pub fn id(&self) -> ArrayId {
        self.id
    }

    /// Shape of the array under construction.
    pub fn model(&self) -> &'a ArrayModel {
        self.model
    }
}

/// Context for constructing one slot.
///
/// Immutable once created. The cookie is never interpreted here: it is
/// whatever the outermost build supplied, unless a provider substituted
/// a new one when it started a nested build.
#[derive(Clone, Copy)]
pub struct ConstructionContext<'a> {
    index: u64,
    array: ArrayInfo<'a>,
    containing: Option<&'a ConstructionContext<'a>>,
    cookie: Option<&'a dyn Any>,
}

impl<'a> ConstructionContext<'a> {
    /// Construct a context for slot `index` of `array`.
    ///
    /// Typically called by the builder, not by providers directly.
    pub fn new(
        index: u64,
        array: ArrayInfo<'a>,
        containing: Option<&'a ConstructionContext<'a>>,
        cookie: Option<&'a dyn Any>,
    ) -> Self {
        Self {
            index,
            array,
            containing,
            cookie,
        }
    }

    /// Index of the slot within its own array.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// The array this slot belongs to.
    pub fn array(&self) -> ArrayInfo<'a> {
        self.array
    }

    /// Identity of the array this slot belongs to.
    pub fn array_id(&self) -> ArrayId {
        self.array.id
    }

    /// Shape of the array this slot belongs to.
    pub fn model(&self) -> &'a ArrayModel {
        self.array.model
    }

    /// Context of the enclosing slot, when this array is itself an element
    /// of an outer array under construction.
    pub fn containing(&self) -> Option<&'a ConstructionContext<'a>> {
        self.containing
    }

    /// The opaque caller-supplied cookie.
    pub fn cookie(&self) -> Option<&'a dyn Any> {
        self.cookie
    }

    /// The cookie, if present and of type `T`.
    pub fn cookie_as<T: 'static>(&self) -> Option<&'a T> {
        self.cookie.and_then(|c| c.downcast_ref::<T>())
    }

    /// Nesting depth: 0 for a slot of the outermost array.
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    /// Enclosing contexts, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = &'a ConstructionContext<'a>> {
        std::iter::successors(self.containing, |c| c.containing)
    }

    /// Full index path of this slot, outermost dimension first.
    pub fn indices(&self) -> Indices {
        let mut indices: Indices = std::iter::once(self.index)
            .chain(self.ancestors().map(|c| c.index))
            .collect();
        indices.reverse();
        indices
    }
}

impl fmt::Debug for ConstructionContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructionContext")
            .field("indices", &self.indices())
            .field("array", &self.array.id)
            .field("model", &format_args!("{}", self.array.model))
            .field("has_cookie", &self.cookie.is_some())
            .finish()
    }
}
