//! Named constructors overloaded by argument type.
//!
//! A [`ConstructorTable`] gives an element type a set of named
//! constructors, each accepting one argument type. A [`TableProvider`]
//! asks a closure for `(name, args)` per slot and resolves the pair
//! against the table; a pair with no matching entry fails the build with
//! [`BuildError::NoMatchingConstructor`].

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::marker::PhantomData;

use indexmap::IndexMap;
use strux_core::BuildError;

use crate::context::ConstructionContext;
use crate::provider::{ConstructionArgsProvider, Constructor};

/// One registered overload. `make` holds a `Box<dyn Fn(A) -> E>`.
struct Overload {
    arguments: TypeId,
    argument_name: &'static str,
    make: Box<dyn Any>,
}

/// Registry of named constructors for element type `E`.
///
/// Names map to one or more overloads, distinguished by argument type.
/// Registration order is preserved for [`signatures`](Self::signatures).
pub struct ConstructorTable<E> {
    entries: IndexMap<&'static str, Vec<Overload>>,
    _element: PhantomData<fn() -> E>,
}

impl<E: 'static> ConstructorTable<E> {
    /// An empty table.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            _element: PhantomData,
        }
    }

    /// Register `make` as constructor `name` taking arguments of type `A`.
    ///
    /// Replaces any existing overload with the same name and argument type.
    pub fn register<A, F>(&mut self, name: &'static str, make: F) -> &mut Self
    where
        A: 'static,
        F: Fn(A) -> E + 'static,
    {
        let make: Box<dyn Fn(A) -> E> = Box::new(make);
        let overload = Overload {
            arguments: TypeId::of::<A>(),
            argument_name: type_name::<A>(),
            make: Box::new(make),
        };
        let overloads = self.entries.entry(name).or_default();
        match overloads
            .iter()
            .position(|o| o.arguments == overload.arguments)
        {
            Some(slot) => overloads[slot] = overload,
            None => overloads.push(overload),
        }
        self
    }

    /// Look up constructor `name` accepting arguments of type `A`.
    pub fn resolve<A: 'static>(&self, name: &str) -> Result<&dyn Fn(A) -> E, BuildError> {
        let make = self
            .entries
            .get(name)
            .and_then(|overloads| {
                overloads
                    .iter()
                    .find(|o| o.arguments == TypeId::of::<A>())
            })
            .and_then(|o| o.make.downcast_ref::<Box<dyn Fn(A) -> E>>());
        match make {
            Some(make) => Ok(&**make),
            None => Err(BuildError::NoMatchingConstructor {
                element: type_name::<E>(),
                constructor: format!("{name}({})", type_name::<A>()),
            }),
        }
    }

    /// Whether constructor `name` accepts arguments of type `A`.
    pub fn contains<A: 'static>(&self, name: &str) -> bool {
        self.resolve::<A>(name).is_ok()
    }

    /// Every registered `(name, argument type)` pair, in registration order.
    pub fn signatures(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().flat_map(|(&name, overloads)| {
            overloads.iter().map(move |o| (name, o.argument_name))
        })
    }

    /// Total number of registered overloads.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Whether no constructor is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A provider that resolves each slot's `(name, args)` against this table.
    pub fn provider<A, F>(&self, args: F) -> TableProvider<'_, E, A, F>
    where
        A: 'static,
        F: FnMut(u64, &ConstructionContext<'_>) -> (&'static str, A),
    {
        TableProvider {
            table: self,
            args,
            _args: PhantomData,
        }
    }
}

impl<E: 'static> Default for ConstructorTable<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> fmt::Debug for ConstructorTable<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.signatures()
                    .map(|(name, args)| format!("{name}({args})")),
            )
            .finish()
    }
}

/// Provider that constructs each slot through a [`ConstructorTable`].
///
/// Created with [`ConstructorTable::provider`].
pub struct TableProvider<'t, E, A, F> {
    table: &'t ConstructorTable<E>,
    args: F,
    _args: PhantomData<fn() -> A>,
}

impl<E, A, F> ConstructionArgsProvider<E> for TableProvider<'_, E, A, F>
where
    E: 'static,
    A: 'static,
    F: FnMut(u64, &ConstructionContext<'_>) -> (&'static str, A),
{
    fn constructor_for(
        &mut self,
        index: u64,
        ctx: &ConstructionContext<'_>,
    ) -> Result<Constructor<'_, E>, BuildError> {
        let (name, args) = (self.args)(index, ctx);
        let make = self.table.resolve::<A>(name)?;
        Ok(Constructor::new(name, move |_| Ok(make(args))))
    }
}
