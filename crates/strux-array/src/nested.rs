//! Provider for arrays whose elements are themselves structured arrays.

use strux_construct::{ConstructionArgsProvider, ConstructionContext, Constructor};
use strux_core::BuildError;
use strux_store::StoreConfig;

use crate::builder::StructuredArrayBuilder;
use crate::structured::StructuredArray;

/// Builds each slot's sub-array with a nested builder driven by `inner`.
///
/// The sub-array is shaped by the enclosing model's `sub_model` and built
/// within the slot's context, so the inner provider sees the full index
/// path through [`ConstructionContext::indices`] and inherits the cookie.
/// Nest `NestedProvider`s for arrays of rank three and above.
#[derive(Debug)]
pub struct NestedProvider<P> {
    inner: P,
    config: StoreConfig,
}

impl<P> NestedProvider<P> {
    /// Wrap `inner`, building sub-arrays with the default store config.
    pub fn new(inner: P) -> Self {
        Self::with_config(inner, StoreConfig::default())
    }

    /// Wrap `inner`, building sub-arrays with `config`.
    pub fn with_config(inner: P, config: StoreConfig) -> Self {
        Self { inner, config }
    }

    /// The provider used for sub-array slots.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Unwrap the inner provider.
    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<U, P> ConstructionArgsProvider<StructuredArray<U>> for NestedProvider<P>
where
    U: 'static,
    P: ConstructionArgsProvider<U>,
{
    fn constructor_for(
        &mut self,
        _index: u64,
        _ctx: &ConstructionContext<'_>,
    ) -> Result<Constructor<'_, StructuredArray<U>>, BuildError> {
        let config = self.config;
        let inner = &mut self.inner;
        Ok(Constructor::new("sub-array", move |ctx| {
            let sub = ctx.model().sub_model().ok_or_else(|| BuildError::ShapeMismatch {
                expected: "a model with a sub-array model".into(),
                actual: ctx.model().to_string(),
            })?;
            StructuredArrayBuilder::new(sub)
                .with_config(config)
                .within(ctx)
                .build(inner)
        }))
    }
}
