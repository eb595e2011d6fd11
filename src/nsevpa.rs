//! Mutable k-SEVPA builder with module-membership enforcement.
//!
//! Every location of an [`NSevpa`] belongs to exactly one module: the main
//! module containing the initial location, or the module of one call symbol.
//! Module encapsulation is the defining property of k-SEVPA, so it is
//! checked at mutation time: an internal edge may only connect locations of
//! one module, and a return edge must lead back into the module of its
//! decoded call site. Violations panic immediately at the mutating call
//! instead of surfacing later during simulation.

use std::hash::Hash;

use log::debug;

use crate::alphabet::VpAlphabet;
use crate::location::Location;
use crate::sevpa::Sevpa;
use crate::types::{LocationId, StackSym};

/// The module a location belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Module {
    /// The module of the initial location.
    Main,
    /// The module entered by the call symbol with the given call index.
    Call(usize),
}

/// A k-module single-entry visibly pushdown automaton.
pub struct NSevpa<I> {
    alphabet: VpAlphabet<I>,
    locations: Vec<Location>,
    /// Module ownership, parallel to `locations`.
    modules: Vec<Module>,
    /// Unique entry location per call index.
    entries: Vec<Option<LocationId>>,
    initial: LocationId,
}

impl<I> NSevpa<I>
where
    I: Clone + Eq + Hash,
{
    /// Creates a new k-SEVPA with a single non-accepting initial location in
    /// the main module and no module entries.
    pub fn new(alphabet: VpAlphabet<I>) -> Self {
        let initial = Location::new(
            LocationId::new(0),
            false,
            alphabet.num_internals(),
            alphabet.num_returns(),
        );
        let entries = vec![None; alphabet.num_calls()];
        Self {
            alphabet,
            locations: vec![initial],
            modules: vec![Module::Main],
            entries,
            initial: LocationId::new(0),
        }
    }

    /// The module owning the given location.
    pub fn module_of(&self, loc: LocationId) -> Module {
        self.modules[loc.index()]
    }

    /// Adds a fresh location to the given module and returns its id.
    pub fn add_location(&mut self, module: Module, accepting: bool) -> LocationId {
        if let Module::Call(call_idx) = module {
            assert!(
                call_idx < self.alphabet.num_calls(),
                "Module call index {} is out of range",
                call_idx
            );
        }
        let id = LocationId::new(self.locations.len());
        debug!("add_location({:?}, accepting = {}) -> {}", module, accepting, id);
        self.locations.push(Location::new(
            id,
            accepting,
            self.alphabet.num_internals(),
            self.alphabet.num_returns(),
        ));
        self.modules.push(module);
        id
    }

    /// Creates a fresh location and registers it as the unique entry of the
    /// module identified by `call_sym`.
    ///
    /// # Panics
    ///
    /// Panics if `call_sym` is not a call symbol or its module already has
    /// an entry.
    pub fn add_module_entry_location(&mut self, call_sym: &I, accepting: bool) -> LocationId {
        let call_idx = self.alphabet.call_index(call_sym);
        assert!(
            self.entries[call_idx].is_none(),
            "Module of call symbol index {} already has an entry location",
            call_idx
        );
        let id = self.add_location(Module::Call(call_idx), accepting);
        self.entries[call_idx] = Some(id);
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
    /// Panics if `sym` is not an internal symbol, or if `loc` and `succ`
    /// belong to different modules.
    pub fn set_internal_successor(&mut self, loc: LocationId, sym: &I, succ: LocationId) {
        let idx = self.alphabet.internal_index(sym);
        assert_eq!(
            self.module_of(loc),
            self.module_of(succ),
            "Internal transition {} -> {} crosses modules",
            loc,
            succ
        );
        debug!("set_internal_successor({}, i{}, {})", loc, idx, succ);
        self.locations[loc.index()].set_internal_successor(idx, succ);
    }

    /// Defines the return successor of `loc` under the return symbol `sym`
    /// for the given call site.
    ///
    /// # Panics
    ///
    /// Panics if `sym` is not a return symbol, if `stack_sym` lies outside
    /// the stack-symbol address space, or if the module of the decoded
    /// call-site location differs from `succ`'s module (a procedure must
    /// return into the module that called it).
    pub fn set_return_successor(&mut self, loc: LocationId, sym: &I, stack_sym: StackSym, succ: LocationId) {
        let idx = self.alphabet.return_index(sym);
        assert!(
            stack_sym.value() < self.num_stack_symbols(),
            "Stack symbol {} is out of range",
            stack_sym
        );
        let call_site = self.stack_loc(stack_sym);
        assert_eq!(
            self.module_of(call_site),
            self.module_of(succ),
            "Return transition into {} crosses out of the calling module of {}",
            succ,
            call_site
        );
        debug!("set_return_successor({}, r{}, {}, {})", loc, idx, stack_sym, succ);
        self.locations[loc.index()].set_return_successor(idx, stack_sym, succ);
    }
}

impl<I> Sevpa<I> for NSevpa<I>
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

    fn module_entry(&self, call_idx: usize) -> Option<LocationId> {
        self.entries[call_idx]
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::state::State;

    fn alphabet() -> VpAlphabet<char> {
        VpAlphabet::new(vec!['c', 'd'], vec!['a'], vec!['r'])
    }

    /// Two modules with one extra location each, entries registered for
    /// both call symbols.
    fn two_modules() -> (NSevpa<char>, [LocationId; 5]) {
        let mut sevpa = NSevpa::new(alphabet());
        let q0 = sevpa.initial_location();
        let c_entry = sevpa.add_module_entry_location(&'c', false);
        let c_inner = sevpa.add_location(Module::Call(0), true);
        let d_entry = sevpa.add_module_entry_location(&'d', false);
        let d_inner = sevpa.add_location(Module::Call(1), true);
        (sevpa, [q0, c_entry, c_inner, d_entry, d_inner])
    }

    #[test]
    fn test_module_ownership() {
        let (sevpa, [q0, c_entry, c_inner, d_entry, d_inner]) = two_modules();
        assert_eq!(sevpa.module_of(q0), Module::Main);
        assert_eq!(sevpa.module_of(c_entry), Module::Call(0));
        assert_eq!(sevpa.module_of(c_inner), Module::Call(0));
        assert_eq!(sevpa.module_of(d_entry), Module::Call(1));
        assert_eq!(sevpa.module_of(d_inner), Module::Call(1));
        assert_eq!(sevpa.module_entry(0), Some(c_entry));
        assert_eq!(sevpa.module_entry(1), Some(d_entry));
    }

    #[test]
    fn test_internal_transitions_within_module() {
        let (mut sevpa, [_, c_entry, c_inner, ..]) = two_modules();
        sevpa.set_internal_successor(c_entry, &'a', c_inner);
        assert_eq!(sevpa.internal_successor(c_entry, 0), Some(c_inner));
    }

    #[test]
    fn test_internal_transitions_cannot_cross_modules() {
        let (sevpa, locs) = two_modules();
        // Every cross-module pair must be refused.
        for &src in &locs {
            for &dst in &locs {
                if sevpa.module_of(src) == sevpa.module_of(dst) {
                    continue;
                }
                let mut fresh = two_modules().0;
                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    fresh.set_internal_successor(src, &'a', dst);
                }));
                assert!(result.is_err(), "edge {} -> {} must be refused", src, dst);
            }
        }
    }

    #[test]
    fn test_return_must_reenter_calling_module() {
        let (mut sevpa, [_, c_entry, c_inner, _, d_inner]) = two_modules();
        // The call site c_entry belongs to module c.
        let from_c = sevpa.encode_stack_sym(c_entry, 0);
        sevpa.set_return_successor(c_inner, &'r', from_c, c_inner);
        assert_eq!(sevpa.return_successor(c_inner, 0, from_c), Some(c_inner));

        // Returning into module d from a module-c call site must fail.
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            sevpa.set_return_successor(c_inner, &'r', from_c, d_inner);
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_call_enters_module_entry() {
        let (sevpa, [q0, c_entry, ..]) = two_modules();
        let state = sevpa.transition(&sevpa.initial_state(), &'c');
        match state {
            State::Run { location, ref stack } => {
                assert_eq!(location, c_entry);
                assert_eq!(stack.peek(), sevpa.encode_stack_sym(q0, 0));
            }
            State::Sink => panic!("call must not sink"),
        }
    }

    #[test]
    fn test_accepts_word_through_module() {
        let mut sevpa = NSevpa::new(alphabet());
        let q0 = sevpa.initial_location();
        let c_entry = sevpa.add_module_entry_location(&'c', false);
        let c_inner = sevpa.add_location(Module::Call(0), false);
        let q_done = sevpa.add_location(Module::Main, true);

        sevpa.set_internal_successor(c_entry, &'a', c_inner);
        // Returning from the 'c' module over the call site q0 re-enters Main.
        let from_main = sevpa.encode_stack_sym(q0, 0);
        sevpa.set_return_successor(c_inner, &'r', from_main, q_done);

        let word: Vec<char> = "car".chars().collect();
        assert!(sevpa.accepts(&word));

        // The open call leaves the stack non-empty: live but not accepting.
        let open: Vec<char> = "ca".chars().collect();
        let state = sevpa.run(&open);
        assert!(!state.is_sink());
        assert!(!sevpa.accepts(&open));

        // No return transition is defined at the entry location.
        let early: Vec<char> = "cr".chars().collect();
        assert!(sevpa.run(&early).is_sink());
    }

    #[test]
    fn test_call_into_missing_module_sinks() {
        let mut sevpa = NSevpa::new(alphabet());
        let _ = sevpa.add_module_entry_location(&'c', false);
        // No entry registered for 'd': dead module, the run sinks.
        let state = sevpa.transition(&sevpa.initial_state(), &'d');
        assert!(state.is_sink());
    }

    #[test]
    #[should_panic(expected = "already has an entry")]
    fn test_duplicate_module_entry() {
        let mut sevpa = NSevpa::new(alphabet());
        sevpa.add_module_entry_location(&'c', false);
        sevpa.add_module_entry_location(&'c', true);
    }
}
