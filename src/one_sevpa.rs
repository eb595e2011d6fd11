//! Mutable 1-SEVPA builder.
//!
//! A 1-SEVPA has a single module, so the initial location doubles as the
//! entry location of every call symbol. Construction is the only mutable
//! phase; once built, the automaton is used read-only through [`Sevpa`].

use std::hash::Hash;

use log::debug;

use crate::alphabet::VpAlphabet;
use crate::location::Location;
use crate::sevpa::Sevpa;
use crate::types::{LocationId, StackSym};

/// A 1-module single-entry visibly pushdown automaton.
pub struct OneSevpa<I> {
    alphabet: VpAlphabet<I>,
    locations: Vec<Location>,
    initial: LocationId,
}

impl<I> OneSevpa<I>
where
    I: Clone + Eq + Hash,
{
    /// Creates a new 1-SEVPA with a single non-accepting initial location,
    /// which is also the entry location of every call.
    pub fn new(alphabet: VpAlphabet<I>) -> Self {
        let initial = Location::new(
            LocationId::new(0),
            false,
            alphabet.num_internals(),
            alphabet.num_returns(),
        );
        Self {
            alphabet,
            locations: vec![initial],
            initial: LocationId::new(0),
        }
    }

    /// Adds a fresh location and returns its id.
    pub fn add_location(&mut self, accepting: bool) -> LocationId {
        let id = LocationId::new(self.locations.len());
        debug!("add_location(accepting = {}) -> {}", accepting, id);
        self.locations.push(Location::new(
            id,
            accepting,
            self.alphabet.num_internals(),
            self.alphabet.num_returns(),
        ));
        id
    }

    pub fn set_accepting(&mut self, loc: LocationId, accepting: bool) {
        self.locations[loc.index()].set_accepting(accepting);
    }

    /// Defines the internal successor of `loc` under the internal symbol
    /// `sym`.
    ///
    /// # Panics
    ///
    /// Panics if `sym` is not an internal symbol of the alphabet.
    pub fn set_internal_successor(&mut self, loc: LocationId, sym: &I, succ: LocationId) {
        let idx = self.alphabet.internal_index(sym);
        debug!("set_internal_successor({}, i{}, {})", loc, idx, succ);
        self.locations[loc.index()].set_internal_successor(idx, succ);
    }

    /// Defines the return successor of `loc` under the return symbol `sym`
    /// for the given call site.
    ///
    /// # Panics
    ///
    /// Panics if `sym` is not a return symbol of the alphabet, or if
    /// `stack_sym` lies outside the current stack-symbol address space.
    pub fn set_return_successor(&mut self, loc: LocationId, sym: &I, stack_sym: StackSym, succ: LocationId) {
        let idx = self.alphabet.return_index(sym);
        assert!(
            stack_sym.value() < self.num_stack_symbols(),
            "Stack symbol {} is out of range",
            stack_sym
        );
        debug!("set_return_successor({}, r{}, {}, {})", loc, idx, stack_sym, succ);
        self.locations[loc.index()].set_return_successor(idx, stack_sym, succ);
    }
}

impl<I> Sevpa<I> for OneSevpa<I>
where
    I: Clone + Eq + Hash,
{
    fn alphabet(&self) -> &VpAlphabet<I> {
        &self.alphabet
    }

    fn size(&self) -> usize {
        self.locations.len()
    }

    fn location(&self, id: LocationId) -> &Location {
        &self.locations[id.index()]
    }

    fn initial_location(&self) -> LocationId {
        self.initial
    }

    fn module_entry(&self, _call_idx: usize) -> Option<LocationId> {
        // Single module: every call enters at the initial location.
        Some(self.initial)
    }
}
