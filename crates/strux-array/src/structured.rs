//! Structured arrays: elements built one slot at a time by a provider.

use std::fmt;

use strux_construct::{ConstructionArgsProvider, ConstructionContext, DefaultProvider};
use strux_core::{ArrayId, ArrayIndex, ArrayModel, BuildError, ElementAccess, StoreError};
use strux_store::{PartitionedStore, StoreConfig};

use crate::builder::StructuredArrayBuilder;
use crate::copy::{CloneElements, CopyStrategy, CopySubArrays};
use crate::nested::NestedProvider;

/// A fixed-length array of up to `2^63` elements whose every slot was
/// populated by exactly one constructor invocation.
///
/// Arrays of arrays are plain `StructuredArray<StructuredArray<U>>` values
/// built from a nested [`ArrayModel`].
///
/// `Clone` produces an independent deep copy with a fresh [`ArrayId`].
pub struct StructuredArray<E> {
    id: ArrayId,
    model: ArrayModel,
    store: PartitionedStore<E>,
}

impl<E> StructuredArray<E> {
    pub(crate) fn from_parts(id: ArrayId, model: ArrayModel, store: PartitionedStore<E>) -> Self {
        debug_assert_eq!(model.length(), store.len());
        Self { id, model, store }
    }

    /// The model for a flat array of `length` elements of type `E`.
    pub fn model_of(length: u64) -> ArrayModel
    where
        E: 'static,
    {
        ArrayModel::new::<E>(length)
    }

    /// Build an array with every slot set to `E::default()`.
    pub fn new(model: &ArrayModel) -> Result<Self, BuildError>
    where
        E: Default + 'static,
    {
        Self::with_provider(model, &mut DefaultProvider)
    }

    /// Build an array, asking `provider` for the constructor of each slot.
    pub fn with_provider<P>(model: &ArrayModel, provider: &mut P) -> Result<Self, BuildError>
    where
        E: 'static,
        P: ConstructionArgsProvider<E> + ?Sized,
    {
        StructuredArrayBuilder::new(model).build(provider)
    }

    /// Build an array stored according to `config`.
    pub fn with_config<P>(
        model: &ArrayModel,
        config: StoreConfig,
        provider: &mut P,
    ) -> Result<Self, BuildError>
    where
        E: 'static,
        P: ConstructionArgsProvider<E> + ?Sized,
    {
        StructuredArrayBuilder::new(model)
            .with_config(config)
            .build(provider)
    }

    /// Build an array as the element of the slot described by `enclosing`.
    ///
    /// With `None` this is the same as [`with_provider`](Self::with_provider).
    pub fn new_within<P>(
        model: &ArrayModel,
        provider: &mut P,
        enclosing: Option<&ConstructionContext<'_>>,
    ) -> Result<Self, BuildError>
    where
        E: 'static,
        P: ConstructionArgsProvider<E> + ?Sized,
    {
        let mut builder = StructuredArrayBuilder::new(model);
        if let Some(ctx) = enclosing {
            builder = builder.within(ctx);
        }
        builder.build(provider)
    }

    /// Build a copy of `source`, cloning each element in index order.
    ///
    /// The copy uses the source's store config and shares no storage with
    /// it. For arrays of arrays use
    /// [`copy_of_nested`](StructuredArray::copy_of_nested) or
    /// [`copy_with`](Self::copy_with) to rebuild the sub-arrays too.
    pub fn copy_of(source: &Self) -> Result<Self, BuildError>
    where
        E: Clone + 'static,
    {
        Self::copy_with::<CloneElements>(source)
    }

    /// Build a copy of `source` whose elements are produced by strategy `S`.
    ///
    /// `CopySubArrays<CopySubArrays<CloneElements>>` rebuilds every level of
    /// a rank-three array; each extra level adds one `CopySubArrays`.
    pub fn copy_with<S>(source: &Self) -> Result<Self, BuildError>
    where
        E: 'static,
        S: CopyStrategy<E>,
    {
        StructuredArrayBuilder::new(&source.model)
            .with_config(*source.config())
            .build(&mut S::provider(source))
    }

    /// Process-unique identity of this array.
    pub fn id(&self) -> ArrayId {
        self.id
    }

    /// The model this array was built from.
    pub fn model(&self) -> &ArrayModel {
        &self.model
    }

    /// Number of elements.
    pub fn len(&self) -> u64 {
        self.store.len()
    }

    /// Whether the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Store configuration backing this array.
    pub fn config(&self) -> &StoreConfig {
        self.store.config()
    }

    /// Read-only access to the backing store.
    pub fn store(&self) -> &PartitionedStore<E> {
        &self.store
    }

    /// Element at `index`.
    ///
    /// Negative and out-of-range indices fail with
    /// [`StoreError::IndexOutOfRange`].
    pub fn get<I: ArrayIndex>(&self, index: I) -> Result<&E, StoreError> {
        let index = index.resolve(self.len())?;
        self.store.get(index)
    }

    /// Mutable element at `index`.
    pub fn get_mut<I: ArrayIndex>(&mut self, index: I) -> Result<&mut E, StoreError> {
        let index = index.resolve(self.len())?;
        self.store.get_mut(index)
    }

    /// Replace the element at `index`, returning the previous one.
    pub fn set<I: ArrayIndex>(&mut self, index: I, value: E) -> Result<E, StoreError> {
        let index = index.resolve(self.len())?;
        self.store.set(index, value)
    }

    /// All elements as one slice, if the array fits the direct partition.
    pub fn as_flat_view(&self) -> Result<&[E], StoreError> {
        self.store.as_flat_view()
    }

    /// Mutable counterpart of [`as_flat_view`](Self::as_flat_view).
    pub fn as_flat_view_mut(&mut self) -> Result<&mut [E], StoreError> {
        self.store.as_flat_view_mut()
    }

    /// Elements in index order.
    pub fn iter(&self) -> impl Iterator<Item = &E> + '_ {
        self.store.iter()
    }

    /// Mutable elements in index order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut E> + '_ {
        self.store.iter_mut()
    }
}

impl<U: 'static> StructuredArray<StructuredArray<U>> {
    /// The model for `length` sub-arrays each shaped by `inner`.
    pub fn nested_model_of(length: u64, inner: ArrayModel) -> ArrayModel {
        ArrayModel::nested::<StructuredArray<U>>(length, inner)
    }

    /// Build an array of arrays with every leaf set to `U::default()`.
    pub fn new_nested(model: &ArrayModel) -> Result<Self, BuildError>
    where
        U: Default,
    {
        Self::with_provider(model, &mut NestedProvider::new(DefaultProvider))
    }

    /// Copy of an array of arrays with every sub-array rebuilt.
    ///
    /// Each sub-array is rebuilt element-wise within its slot's context,
    /// with the source sub-array it copies as the cookie of its slots. The
    /// leaves are cloned; for deeper arrays use
    /// [`copy_with`](StructuredArray::copy_with) and nest [`CopySubArrays`]
    /// once per level.
    pub fn copy_of_nested(source: &Self) -> Result<Self, BuildError>
    where
        U: Clone,
    {
        Self::copy_with::<CopySubArrays<CloneElements>>(source)
    }

    /// Leaf element `inner` of sub-array `outer`.
    pub fn get_at<I, J>(&self, outer: I, inner: J) -> Result<&U, StoreError>
    where
        I: ArrayIndex,
        J: ArrayIndex,
    {
        self.get(outer)?.get(inner)
    }
}

impl<E: Clone> Clone for StructuredArray<E> {
    fn clone(&self) -> Self {
        Self {
            id: ArrayId::next(),
            model: self.model.clone(),
            store: self.store.clone(),
        }
    }
}

/// Equal when models and elements are equal; identities are ignored.
impl<E: PartialEq> PartialEq for StructuredArray<E> {
    fn eq(&self, other: &Self) -> bool {
        self.model == other.model && self.iter().eq(other.iter())
    }
}

impl<E: fmt::Debug> fmt::Debug for StructuredArray<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredArray")
            .field("id", &self.id)
            .field("model", &format_args!("{}", self.model))
            .field("overflow_partitions", &self.store.overflow_partition_count())
            .finish_non_exhaustive()
    }
}

impl<E> ElementAccess for StructuredArray<E> {
    type Element = E;

    fn model(&self) -> &ArrayModel {
        &self.model
    }

    fn len(&self) -> u64 {
        self.store.len()
    }

    fn element(&self, index: u64) -> Result<&E, StoreError> {
        self.store.get(index)
    }

    fn element_mut(&mut self, index: u64) -> Result<&mut E, StoreError> {
        self.store.get_mut(index)
    }
}
