//! Providers that rebuild an existing array element by element.
//!
//! Copies are built level by level. A [`CopyStrategy`] decides how the
//! elements of one level are produced: [`CloneElements`] clones them,
//! [`CopySubArrays`] rebuilds each sub-array with a nested build and hands
//! the sub-array's own elements to the next strategy. Nest `CopySubArrays`
//! once per array level below the outermost.

use std::marker::PhantomData;

use strux_construct::{ConstructionArgsProvider, ConstructionContext, Constructor};
use strux_core::{ArrayModel, BuildError, ElementAccess};

use crate::builder::StructuredArrayBuilder;
use crate::structured::StructuredArray;

fn ensure_same_model(source: &ArrayModel, target: &ArrayModel) -> Result<(), BuildError> {
    if source == target {
        Ok(())
    } else {
        Err(BuildError::ShapeMismatch {
            expected: source.to_string(),
            actual: target.to_string(),
        })
    }
}

/// Supplies, for slot `i`, a constructor that clones `source[i]`.
///
/// The target model must equal the source model. This is checked once per
/// build before any slot is visited, so it also holds for empty arrays.
#[derive(Debug)]
pub struct CopyProvider<'s, A: ?Sized> {
    source: &'s A,
}

impl<'s, A: ElementAccess + ?Sized> CopyProvider<'s, A> {
    /// Copy from `source`.
    pub fn new(source: &'s A) -> Self {
        Self { source }
    }
}

impl<'s, A> ConstructionArgsProvider<A::Element> for CopyProvider<'s, A>
where
    A: ElementAccess + ?Sized,
    A::Element: Clone + 'static,
{
    fn prepare(&mut self, model: &ArrayModel) -> Result<(), BuildError> {
        ensure_same_model(self.source.model(), model)
    }

    fn constructor_for(
        &mut self,
        index: u64,
        _ctx: &ConstructionContext<'_>,
    ) -> Result<Constructor<'_, A::Element>, BuildError> {
        let element = self.source.element(index)?;
        Ok(Constructor::new("copy", move |_| Ok(element.clone())))
    }
}

/// How the elements of one array level are copied.
pub trait CopyStrategy<E> {
    /// Provider that rebuilds an array of `E` from a source array.
    type Provider<'s>: ConstructionArgsProvider<E>
    where
        E: 's;

    /// The provider copying `source`.
    fn provider(source: &StructuredArray<E>) -> Self::Provider<'_>;
}

/// Copies elements with `Clone`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CloneElements;

impl<E: Clone + 'static> CopyStrategy<E> for CloneElements {
    type Provider<'s>
        = CopyProvider<'s, StructuredArray<E>>
    where
        E: 's;

    fn provider(source: &StructuredArray<E>) -> Self::Provider<'_> {
        CopyProvider::new(source)
    }
}

/// Rebuilds each sub-array, copying its elements with `S`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CopySubArrays<S>(PhantomData<fn() -> S>);

impl<U: 'static, S: CopyStrategy<U>> CopyStrategy<StructuredArray<U>> for CopySubArrays<S> {
    type Provider<'s>
        = NestedCopyProvider<'s, U, S>
    where
        U: 's;

    fn provider(source: &StructuredArray<StructuredArray<U>>) -> Self::Provider<'_> {
        NestedCopyProvider::new(source)
    }
}

/// Deep-copies an array of arrays one sub-array at a time.
///
/// Each sub-array is rebuilt within its slot's context, with the matching
/// source sub-array as the cookie of the nested build. The sub-array's
/// elements are produced by the provider of strategy `S`, which defaults
/// to cloning them.
pub struct NestedCopyProvider<'s, U, S = CloneElements> {
    source: &'s StructuredArray<StructuredArray<U>>,
    _strategy: PhantomData<fn() -> S>,
}

impl<'s, U, S> NestedCopyProvider<'s, U, S> {
    /// Copy from `source`.
    pub fn new(source: &'s StructuredArray<StructuredArray<U>>) -> Self {
        Self {
            source,
            _strategy: PhantomData,
        }
    }
}

impl<U, S> std::fmt::Debug for NestedCopyProvider<'_, U, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NestedCopyProvider")
            .field("source", &self.source.id())
            .field("strategy", &std::any::type_name::<S>())
            .finish()
    }
}

impl<'s, U, S> ConstructionArgsProvider<StructuredArray<U>> for NestedCopyProvider<'s, U, S>
where
    U: 'static,
    S: CopyStrategy<U>,
{
    fn prepare(&mut self, model: &ArrayModel) -> Result<(), BuildError> {
        ensure_same_model(self.source.model(), model)
    }

    fn constructor_for(
        &mut self,
        index: u64,
        _ctx: &ConstructionContext<'_>,
    ) -> Result<Constructor<'_, StructuredArray<U>>, BuildError> {
        let sub_source: &'s StructuredArray<U> = self.source.get(index)?;
        Ok(Constructor::new("copy", move |ctx| {
            let sub_model = ctx.model().sub_model().ok_or_else(|| BuildError::ShapeMismatch {
                expected: "a model with a sub-array model".into(),
                actual: ctx.model().to_string(),
            })?;
            StructuredArrayBuilder::new(sub_model)
                .with_config(*sub_source.config())
                .within(ctx)
                .with_cookie(sub_source)
                .build(&mut S::provider(sub_source))
        }))
    }
}
