//! The [`ConstructionArgsProvider`] protocol and the built-in providers.
//!
//! A provider decides, slot by slot, how each element is constructed. It
//! does not construct the element itself: it returns a [`Constructor`],
//! a one-shot closure the builder invokes with the same context. The
//! builder calls the provider exactly once per slot, in ascending index
//! order, and never retries a successful call.

use strux_core::{ArrayModel, BuildError};

use crate::context::ConstructionContext;

type MakeFn<'p, E> = dyn FnOnce(&ConstructionContext<'_>) -> Result<E, BuildError> + 'p;

/// A selected constructor for one slot.
///
/// Pairs a constructor identity, used in diagnostics, with the closure
/// that produces the element. The closure may borrow from the provider
/// that returned it.
pub struct Constructor<'p, E> {
    identity: &'static str,
    make: Box<MakeFn<'p, E>>,
}

impl<'p, E> Constructor<'p, E> {
    /// A constructor named `identity` that runs `make` for the slot.
    pub fn new<F>(identity: &'static str, make: F) -> Self
    where
        F: FnOnce(&ConstructionContext<'_>) -> Result<E, BuildError> + 'p,
    {
        Self {
            identity,
            make: Box::new(make),
        }
    }

    /// A constructor that yields an already-built value.
    pub fn value(identity: &'static str, value: E) -> Self
    where
        E: 'p,
    {
        Self::new(identity, move |_| Ok(value))
    }

    /// The constructor identity.
    pub fn identity(&self) -> &'static str {
        self.identity
    }

    /// Produce the element for the slot described by `ctx`.
    pub fn construct(self, ctx: &ConstructionContext<'_>) -> Result<E, BuildError> {
        (self.make)(ctx)
    }
}

/// Chooses how to construct each slot of a one-dimensional build.
///
/// # Contract
///
/// - Called exactly once per slot, in ascending `index` order.
/// - Must be deterministic for a given `(index, ctx)` unless the provider
///   intentionally varies its output (e.g. consuming a sequential source).
/// - Returning an error aborts the whole build; no array is produced.
/// - [`prepare`](Self::prepare) runs once per build before the first slot,
///   even when the array is empty.
///
/// # Examples
///
/// ```
/// use strux_construct::{ConstructionArgsProvider, ConstructionContext, Constructor};
/// use strux_core::BuildError;
///
/// struct Squares;
///
/// impl ConstructionArgsProvider<u64> for Squares {
///     fn constructor_for(
///         &mut self,
///         index: u64,
///         _ctx: &ConstructionContext<'_>,
///     ) -> Result<Constructor<'_, u64>, BuildError> {
///         Ok(Constructor::value("square", index * index))
///     }
/// }
/// ```
pub trait ConstructionArgsProvider<E> {
    /// Check that this provider can populate an array shaped by `model`.
    ///
    /// Called once per build before storage is allocated. An error aborts
    /// the build without visiting any slot.
    fn prepare(&mut self, model: &ArrayModel) -> Result<(), BuildError> {
        let _ = model;
        Ok(())
    }

    /// Select the constructor for slot `index`.
    fn constructor_for(
        &mut self,
        index: u64,
        ctx: &ConstructionContext<'_>,
    ) -> Result<Constructor<'_, E>, BuildError>;
}

impl<E, P> ConstructionArgsProvider<E> for &mut P
where
    P: ConstructionArgsProvider<E> + ?Sized,
{
    fn prepare(&mut self, model: &ArrayModel) -> Result<(), BuildError> {
        (**self).prepare(model)
    }

    fn constructor_for(
        &mut self,
        index: u64,
        ctx: &ConstructionContext<'_>,
    ) -> Result<Constructor<'_, E>, BuildError> {
        (**self).constructor_for(index, ctx)
    }
}

impl<E, P> ConstructionArgsProvider<E> for Box<P>
where
    P: ConstructionArgsProvider<E> + ?Sized,
{
    fn prepare(&mut self, model: &ArrayModel) -> Result<(), BuildError> {
        (**self).prepare(model)
    }

    fn constructor_for(
        &mut self,
        index: u64,
        ctx: &ConstructionContext<'_>,
    ) -> Result<Constructor<'_, E>, BuildError> {
        (**self).constructor_for(index, ctx)
    }
}

/// Chooses how to construct each leaf slot of a multi-dimensional build.
///
/// Receives the full index path of the slot, outermost dimension first.
/// Adapt it to the single-index protocol with [`ByIndices`].
pub trait MultiDimProvider<E> {
    /// Select the constructor for the slot at `indices`.
    fn constructor_for_indices(
        &mut self,
        indices: &[u64],
        ctx: &ConstructionContext<'_>,
    ) -> Result<Constructor<'_, E>, BuildError>;
}

/// Adapts a [`MultiDimProvider`] to [`ConstructionArgsProvider`].
///
/// The index path is recovered from the context chain, so the adapter
/// works at any nesting depth.
#[derive(Clone, Debug, Default)]
pub struct ByIndices<P>(pub P);

impl<E, P> ConstructionArgsProvider<E> for ByIndices<P>
where
    P: MultiDimProvider<E>,
{
    fn constructor_for(
        &mut self,
        _index: u64,
        ctx: &ConstructionContext<'_>,
    ) -> Result<Constructor<'_, E>, BuildError> {
        let indices = ctx.indices();
        self.0.constructor_for_indices(&indices, ctx)
    }
}

/// Constructs every slot with `E::default()`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultProvider;

impl<E: Default + 'static> ConstructionArgsProvider<E> for DefaultProvider {
    fn constructor_for(
        &mut self,
        _index: u64,
        _ctx: &ConstructionContext<'_>,
    ) -> Result<Constructor<'_, E>, BuildError> {
        Ok(Constructor::new("default", |_| Ok(E::default())))
    }
}

impl<E: Default + 'static> MultiDimProvider<E> for DefaultProvider {
    fn constructor_for_indices(
        &mut self,
        _indices: &[u64],
        _ctx: &ConstructionContext<'_>,
    ) -> Result<Constructor<'_, E>, BuildError> {
        Ok(Constructor::new("default", |_| Ok(E::default())))
    }
}

/// A provider backed by a closure over `(index, context)`.
///
/// Created with [`provider_fn`].
#[derive(Clone, Debug)]
pub struct FnProvider<F> {
    f: F,
}

/// Build a provider from a closure that constructs the element for a slot.
pub fn provider_fn<E, F>(f: F) -> FnProvider<F>
where
    F: FnMut(u64, &ConstructionContext<'_>) -> Result<E, BuildError>,
{
    FnProvider { f }
}

impl<E, F> ConstructionArgsProvider<E> for FnProvider<F>
where
    E: 'static,
    F: FnMut(u64, &ConstructionContext<'_>) -> Result<E, BuildError>,
{
    fn constructor_for(
        &mut self,
        index: u64,
        _ctx: &ConstructionContext<'_>,
    ) -> Result<Constructor<'_, E>, BuildError> {
        let f = &mut self.f;
        Ok(Constructor::new("fn", move |ctx| (*f)(index, ctx)))
    }
}
