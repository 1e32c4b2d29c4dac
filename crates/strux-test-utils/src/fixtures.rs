//! Reusable provider fixtures.
//!
//! - [`ConstProvider`]: every slot receives a clone of one value.
//! - [`FailingProvider`]: succeeds with defaults until a chosen index, then
//!   fails either while choosing a constructor or while running it.

use strux_construct::{ConstructionArgsProvider, ConstructionContext, Constructor};
use strux_core::BuildError;

/// Gives every slot a clone of `value`.
#[derive(Clone, Debug)]
pub struct ConstProvider<E> {
    /// The value every slot receives.
    pub value: E,
}

impl<E> ConstProvider<E> {
    /// Give every slot a clone of `value`.
    pub fn new(value: E) -> Self {
        Self { value }
    }
}

impl<E: Clone + 'static> ConstructionArgsProvider<E> for ConstProvider<E> {
    fn constructor_for(
        &mut self,
        _index: u64,
        _ctx: &ConstructionContext<'_>,
    ) -> Result<Constructor<'_, E>, BuildError> {
        Ok(Constructor::value("const", self.value.clone()))
    }
}

/// Where a [`FailingProvider`] fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureMode {
    /// No constructor is found for the slot.
    Provider,
    /// A constructor is found but reports an error when run.
    Constructor,
}

/// Fails deterministically at one slot index of every array it builds.
///
/// Slots before the failing one receive `E::default()`.
#[derive(Debug)]
pub struct FailingProvider {
    /// Slot index at which every build fails.
    pub fail_at: u64,
    /// Whether the failure comes from the provider or the constructor.
    pub mode: FailureMode,
    calls: usize,
}

impl FailingProvider {
    /// Fail at `fail_at` with [`BuildError::NoMatchingConstructor`].
    pub fn new(fail_at: u64) -> Self {
        Self::with_mode(fail_at, FailureMode::Provider)
    }

    /// Fail at `fail_at` in the given way.
    pub fn with_mode(fail_at: u64, mode: FailureMode) -> Self {
        Self {
            fail_at,
            mode,
            calls: 0,
        }
    }

    /// How many times a constructor was requested.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Reset the call counter.
    pub fn reset(&mut self) {
        self.calls = 0;
    }
}

impl<E: Default + 'static> ConstructionArgsProvider<E> for FailingProvider {
    fn constructor_for(
        &mut self,
        index: u64,
        _ctx: &ConstructionContext<'_>,
    ) -> Result<Constructor<'_, E>, BuildError> {
        self.calls += 1;
        if index != self.fail_at {
            return Ok(Constructor::new("default", |_| Ok(E::default())));
        }
        match self.mode {
            FailureMode::Provider => Err(BuildError::NoMatchingConstructor {
                element: std::any::type_name::<E>(),
                constructor: format!("missing(index = {index})"),
            }),
            FailureMode::Constructor => Ok(Constructor::new("failing", move |_| {
                Err(BuildError::ConstructionFailed {
                    index,
                    reason: "deliberate failure".into(),
                })
            })),
        }
    }
}
