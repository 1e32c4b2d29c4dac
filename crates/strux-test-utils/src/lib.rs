//! Test utilities and mock providers for strux development.
//!
//! Provides [`Witness`], an element type that captures what its constructor
//! saw, a [`WitnessProvider`] that builds them, and a [`RecordingProvider`]
//! wrapper that logs the index path of every slot it is asked about.
//! Deterministic providers for failure testing live in [`fixtures`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use strux_construct::{ConstructionArgsProvider, ConstructionContext, Constructor};
use strux_core::{ArrayModel, BuildError};

/// An element recording the context it was constructed in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Witness {
    /// Index path from the outermost array to this slot.
    pub path: Vec<u64>,
    /// Nesting depth of the slot; `0` for a top-level array.
    pub depth: usize,
    /// The cookie, when it was a `u64`.
    pub cookie: Option<u64>,
    /// Position of this construction among all the provider's calls.
    pub serial: usize,
}

impl Witness {
    fn capture(ctx: &ConstructionContext<'_>, serial: usize) -> Self {
        Self {
            path: ctx.indices().to_vec(),
            depth: ctx.depth(),
            cookie: ctx.cookie_as::<u64>().copied(),
            serial,
        }
    }
}

/// Builds a [`Witness`] for every slot.
#[derive(Debug, Default)]
pub struct WitnessProvider {
    constructed: usize,
}

impl WitnessProvider {
    /// A provider that has handed out no constructors yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of constructors handed out.
    pub fn constructed(&self) -> usize {
        self.constructed
    }
}

impl ConstructionArgsProvider<Witness> for WitnessProvider {
    fn constructor_for(
        &mut self,
        _index: u64,
        _ctx: &ConstructionContext<'_>,
    ) -> Result<Constructor<'_, Witness>, BuildError> {
        let serial = self.constructed;
        self.constructed += 1;
        Ok(Constructor::new("witness", move |ctx| {
            Ok(Witness::capture(ctx, serial))
        }))
    }
}

/// Wraps a provider and logs the index path of every request.
#[derive(Debug, Default)]
pub struct RecordingProvider<P> {
    inner: P,
    log: Vec<Vec<u64>>,
}

impl<P> RecordingProvider<P> {
    /// Record requests made to `inner`.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            log: Vec::new(),
        }
    }

    /// Index paths in the order they were requested.
    pub fn log(&self) -> &[Vec<u64>] {
        &self.log
    }

    /// Forget every recorded request.
    pub fn clear(&mut self) {
        self.log.clear();
    }

    /// The wrapped provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<E, P> ConstructionArgsProvider<E> for RecordingProvider<P>
where
    P: ConstructionArgsProvider<E>,
{
    fn prepare(&mut self, model: &ArrayModel) -> Result<(), BuildError> {
        self.inner.prepare(model)
    }

    fn constructor_for(
        &mut self,
        index: u64,
        ctx: &ConstructionContext<'_>,
    ) -> Result<Constructor<'_, E>, BuildError> {
        self.log.push(ctx.indices().to_vec());
        self.inner.constructor_for(index, ctx)
    }
}
