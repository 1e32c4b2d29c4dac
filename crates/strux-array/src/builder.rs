//! Orchestrates the construction of one (possibly nested) structured array.
//!
//! # Build phases
//!
//! ```text
//! Start ─► AllocateStorage ─► ConstructSlot(0) ─► … ─► ConstructSlot(n-1) ─► Sealed
//!    │            │                  │                        │
//!    └────────────┴──────────────────┴────────────────────────┴─► Failed
//! ```
//!
//! - **Start:** the model's element type must be the requested `E` and the
//!   provider's `prepare` hook must accept the model.
//! - **AllocateStorage:** the store is reserved for `model.length()` slots;
//!   no slot holds a valid element yet.
//! - **ConstructSlot(i):** a fresh context is created, the provider is
//!   asked once for a constructor, the constructor runs once, and the
//!   element is written. Slots are visited in strictly ascending order.
//! - **Sealed:** every slot is valid and the array is handed to the caller.
//! - **Failed:** the first error stops the build. Elements written so far
//!   are dropped with the reserved storage and the error is returned
//!   unchanged; no array is ever produced.

use std::any::Any;

use strux_construct::{ArrayInfo, ConstructionArgsProvider, ConstructionContext};
use strux_core::{ArrayId, ArrayModel, BuildError, ElementType};
use strux_store::{PartitionedStore, StoreConfig};

use crate::structured::StructuredArray;

/// Builds a [`StructuredArray`] from an [`ArrayModel`] and a provider.
///
/// A builder is configured by value and consumed by [`build`](Self::build).
/// When started from inside a provider with [`within`](Self::within), the
/// enclosing slot's context becomes the `containing` context of every slot
/// of the new array and its cookie is inherited unless replaced with
/// [`with_cookie`](Self::with_cookie).
#[derive(Clone, Copy, Debug)]
pub struct StructuredArrayBuilder<'a> {
    model: &'a ArrayModel,
    config: StoreConfig,
    enclosing: Option<&'a ConstructionContext<'a>>,
    cookie: Option<&'a dyn Any>,
}

impl<'a> StructuredArrayBuilder<'a> {
    /// A builder for arrays shaped by `model`, using the default store config.
    pub fn new(model: &'a ArrayModel) -> Self {
        Self {
            model,
            config: StoreConfig::default(),
            enclosing: None,
            cookie: None,
        }
    }

    /// Use `config` for the array's storage.
    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Build as the element of the slot described by `enclosing`.
    pub fn within(mut self, enclosing: &'a ConstructionContext<'a>) -> Self {
        self.enclosing = Some(enclosing);
        self
    }

    /// Pass `cookie` to every slot of this build.
    ///
    /// Overrides any cookie inherited from the enclosing context.
    pub fn with_cookie(mut self, cookie: &'a dyn Any) -> Self {
        self.cookie = Some(cookie);
        self
    }

    /// The model being built.
    pub fn model(&self) -> &'a ArrayModel {
        self.model
    }

    /// The store config the array will be allocated with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Run the build, calling `provider` once per slot in ascending order.
    pub fn build<E, P>(self, provider: &mut P) -> Result<StructuredArray<E>, BuildError>
    where
        E: 'static,
        P: ConstructionArgsProvider<E> + ?Sized,
    {
        let model = self.model;
        if !model.describes::<E>() {
            return Err(BuildError::ShapeMismatch {
                expected: format!("{model} of {}", model.element_type()),
                actual: format!("elements of {}", ElementType::of::<E>()),
            });
        }

        provider.prepare(model)?;

        let id = ArrayId::next();
        let depth = self.enclosing.map_or(0, |c| c.depth() + 1);
        tracing::debug!(
            array = %id,
            model = %model,
            length = model.length(),
            depth,
            "building structured array"
        );

        let mut filler = PartitionedStore::reserve(model.length(), self.config)?;
        let info = ArrayInfo::new(id, model);
        let cookie = self
            .cookie
            .or_else(|| self.enclosing.and_then(|c| c.cookie()));

        for index in 0..model.length() {
            let ctx = ConstructionContext::new(index, info, self.enclosing, cookie);
            let slot = provider
                .constructor_for(index, &ctx)
                .and_then(|constructor| constructor.construct(&ctx))
                .and_then(|element| filler.push(element).map_err(BuildError::from));
            if let Err(e) = slot {
                tracing::debug!(array = %id, index, error = %e, "structured array build failed");
                return Err(e);
            }
        }

        let store = filler.finish()?;
        tracing::debug!(array = %id, length = model.length(), "sealed structured array");
        Ok(StructuredArray::from_parts(id, model.clone(), store))
    }
}
