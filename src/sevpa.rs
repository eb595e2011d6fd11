//! The SEVPA engine: stateless transition dispatch over `(location, stack)`.
//!
//! [`Sevpa`] is the contract shared by 1-SEVPAs and k-SEVPAs. Implementors
//! provide location storage and module entries; the trait supplies the
//! stack-symbol encoding, the symbol-class dispatch and the acceptance test.
//!
//! Word rejection is a value (`State::Sink` / `None`), never a panic. Feeding
//! a symbol that is not part of the alphabet violates the alphabet contract
//! and panics.

use std::hash::Hash;

use log::trace;

use crate::alphabet::{SymbolKind, VpAlphabet};
use crate::location::Location;
use crate::stack::StackContents;
use crate::state::State;
use crate::types::{LocationId, StackSym};

/// A single-entry visibly pushdown automaton over a structured alphabet.
pub trait Sevpa<I>
where
    I: Clone + Eq + Hash,
{
    /// The structured input alphabet.
    fn alphabet(&self) -> &VpAlphabet<I>;

    /// Number of locations.
    fn size(&self) -> usize;

    /// The location with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id is out of range.
    fn location(&self, id: LocationId) -> &Location;

    /// The location every run starts in.
    fn initial_location(&self) -> LocationId;

    /// The unique entry location of the module invoked by the call symbol
    /// with the given call index, or `None` if no such module exists. A call
    /// into a missing module routes the run to the sink (a "dead module"),
    /// it is not an error.
    fn module_entry(&self, call_idx: usize) -> Option<LocationId>;

    /// Encodes a call site into a stack symbol: the location that executes
    /// the call together with the call symbol it uses.
    fn encode_stack_sym(&self, src: LocationId, call_idx: usize) -> StackSym {
        debug_assert!(src.index() < self.size());
        debug_assert!(call_idx < self.alphabet().num_calls());
        StackSym::new(self.alphabet().num_calls() * src.index() + call_idx)
    }

    /// Decodes the call-site location of a stack symbol.
    fn stack_loc(&self, sym: StackSym) -> LocationId {
        sym.location(self.alphabet().num_calls())
    }

    /// Decodes the call symbol of a stack symbol.
    fn call_sym(&self, sym: StackSym) -> &I {
        self.alphabet().call_symbol(sym.call_index(self.alphabet().num_calls()))
    }

    /// The size of the stack-symbol address space: every storage indexed by
    /// stack symbol must accommodate `size() * num_calls` slots.
    fn num_stack_symbols(&self) -> usize {
        self.size() * self.alphabet().num_calls()
    }

    fn is_accepting_location(&self, id: LocationId) -> bool {
        self.location(id).is_accepting()
    }

    fn internal_successor(&self, loc: LocationId, sym_idx: usize) -> Option<LocationId> {
        self.location(loc).internal_successor(sym_idx)
    }

    fn return_successor(&self, loc: LocationId, ret_idx: usize, stack_sym: StackSym) -> Option<LocationId> {
        self.location(loc).return_successor(ret_idx, stack_sym)
    }

    /// The initial state: the initial location with an empty stack.
    fn initial_state(&self) -> State {
        State::new(self.initial_location(), StackContents::empty())
    }

    /// Performs one transition step.
    ///
    /// # Panics
    ///
    /// Panics if `input` does not belong to the alphabet (contract
    /// violation; the alphabet must partition all input symbols into the
    /// three structural classes).
    fn transition(&self, state: &State, input: &I) -> State {
        let (location, stack) = match state {
            State::Sink => return State::Sink,
            State::Run { location, stack } => (*location, stack),
        };

        let (kind, idx) = self
            .alphabet()
            .classify(input)
            .unwrap_or_else(|| panic!("Input symbol does not belong to the alphabet"));

        match kind {
            SymbolKind::Call => {
                let entry = match self.module_entry(idx) {
                    Some(entry) => entry,
                    // Dead module: structurally fine, semantically rejecting.
                    None => return State::Sink,
                };
                let sym = self.encode_stack_sym(location, idx);
                trace!("call from {} pushes {}, enters {}", location, sym, entry);
                State::new(entry, stack.push(sym))
            }
            SymbolKind::Return => {
                if stack.is_empty() {
                    // Not well-matched: nothing to return to.
                    return State::Sink;
                }
                let sym = stack.peek();
                match self.return_successor(location, idx, sym) {
                    Some(succ) => {
                        trace!("return from {} over {} to {}", location, sym, succ);
                        State::new(succ, stack.pop())
                    }
                    None => State::Sink,
                }
            }
            SymbolKind::Internal => match self.internal_successor(location, idx) {
                Some(succ) => State::new(succ, stack.clone()),
                None => State::Sink,
            },
        }
    }

    /// A state accepts iff its location accepts and its stack is empty.
    fn is_accepting(&self, state: &State) -> bool {
        match state {
            State::Sink => false,
            State::Run { location, stack } => {
                self.is_accepting_location(*location) && stack.is_empty()
            }
        }
    }

    /// Runs the automaton over the word, starting from the initial state.
    fn run<'a>(&self, word: impl IntoIterator<Item = &'a I>) -> State
    where
        I: 'a,
    {
        let mut state = self.initial_state();
        for sym in word {
            state = self.transition(&state, sym);
            if state.is_sink() {
                break;
            }
        }
        state
    }

    /// Returns whether the automaton accepts the word.
    fn accepts<'a>(&self, word: impl IntoIterator<Item = &'a I>) -> bool
    where
        I: 'a,
    {
        let state = self.run(word);
        self.is_accepting(&state)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::one_sevpa::OneSevpa;

    /// L = { c^n a r^n | n >= 1 } over calls {c}, internals {a}, returns {r}.
    ///
    /// Every call executes from the entry q0, so every stack symbol is
    /// `encode(q0, c)`; acceptance relies on the empty-stack requirement to
    /// enforce the balance.
    fn matched_language() -> OneSevpa<char> {
        let alphabet = VpAlphabet::new(vec!['c'], vec!['a'], vec!['r']);
        let mut sevpa = OneSevpa::new(alphabet);

        let q0 = sevpa.initial_location();
        let q1 = sevpa.add_location(true);

        sevpa.set_internal_successor(q0, &'a', q1);

        let call_site = sevpa.encode_stack_sym(q0, 0);
        sevpa.set_return_successor(q1, &'r', call_site, q1);

        sevpa
    }

    #[test]
    fn test_accepts_matched_word() {
        let sevpa = matched_language();
        let word: Vec<char> = "car".chars().collect();
        assert!(sevpa.accepts(&word));
    }

    #[test]
    fn test_rejects_unbalanced_return() {
        let sevpa = matched_language();
        let word: Vec<char> = "carr".chars().collect();
        // The extra return hits an empty stack and sinks.
        let state = sevpa.run(&word);
        assert!(state.is_sink());
    }

    #[test]
    fn test_accepts_deeper_nesting() {
        let sevpa = matched_language();
        let word: Vec<char> = "ccarr".chars().collect();
        assert!(sevpa.accepts(&word));
    }

    #[test]
    fn test_rejects_open_call() {
        let sevpa = matched_language();
        let word: Vec<char> = "cca".chars().collect();
        let state = sevpa.run(&word);
        // Still live, but the stack is not empty, so not accepting.
        assert!(!state.is_sink());
        assert!(!sevpa.accepts(&word));
    }

    #[test]
    fn test_acceptance_needs_empty_stack() {
        let sevpa = matched_language();
        // "ccar" reaches the accepting location with one call still open.
        let word: Vec<char> = "ccar".chars().collect();
        let state = sevpa.run(&word);
        assert!(!state.is_sink());
        assert!(!sevpa.is_accepting(&state));
    }

    #[test]
    #[should_panic(expected = "does not belong to the alphabet")]
    fn test_foreign_symbol_panics() {
        let sevpa = matched_language();
        sevpa.transition(&sevpa.initial_state(), &'x');
    }

    #[test]
    fn test_encoding_bijection() {
        let sevpa = matched_language();
        for loc in 0..sevpa.size() {
            let loc = LocationId::new(loc);
            for call_idx in 0..sevpa.alphabet().num_calls() {
                let sym = sevpa.encode_stack_sym(loc, call_idx);
                assert_eq!(sevpa.stack_loc(sym), loc);
                assert_eq!(sevpa.call_sym(sym), sevpa.alphabet().call_symbol(call_idx));
            }
        }
        assert_eq!(sevpa.num_stack_symbols(), sevpa.size() * sevpa.alphabet().num_calls());
    }

    /// A 1-SEVPA with every internal and return transition defined, so the
    /// only possible cause of sinking is a RETURN on the empty stack.
    fn complete_sevpa() -> OneSevpa<char> {
        let alphabet = VpAlphabet::new(vec!['c', 'd'], vec!['a', 'b'], vec!['r']);
        let mut sevpa = OneSevpa::new(alphabet);
        let q0 = sevpa.initial_location();
        let q1 = sevpa.add_location(true);

        for loc in [q0, q1] {
            sevpa.set_internal_successor(loc, &'a', q0);
            sevpa.set_internal_successor(loc, &'b', q1);
        }
        for loc in [q0, q1] {
            for site in [q0, q1] {
                for call_idx in 0..2 {
                    let sym = sevpa.encode_stack_sym(site, call_idx);
                    sevpa.set_return_successor(loc, &'r', sym, q1);
                }
            }
        }
        sevpa
    }

    struct XorShift(u64);

    impl XorShift {
        fn next(&mut self) -> u64 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            x
        }
    }

    /// Generates a random well-matched word over {c,d,a,b,r}.
    fn random_well_matched(rng: &mut XorShift, len: usize) -> Vec<char> {
        let mut word = Vec::with_capacity(len + 4);
        let mut open = 0usize;
        for _ in 0..len {
            match rng.next() % 4 {
                0 => word.push('c'),
                1 => word.push('d'),
                2 => word.push(if rng.next() % 2 == 0 { 'a' } else { 'b' }),
                _ => {
                    if open > 0 {
                        word.push('r');
                        open -= 1;
                        continue;
                    }
                    word.push('a');
                }
            }
            if let Some('c' | 'd') = word.last().copied() {
                open += 1;
            }
        }
        // Close every call still open.
        word.extend(std::iter::repeat('r').take(open));
        word
    }

    #[test]
    fn test_well_matched_words_never_sink() {
        let sevpa = complete_sevpa();
        let mut rng = XorShift(0x5eed_cafe);
        for round in 0..200 {
            let word = random_well_matched(&mut rng, 1 + (round % 40));
            assert!(sevpa.alphabet().is_well_matched(&word));
            let state = sevpa.run(&word);
            assert!(!state.is_sink(), "well-matched word {:?} sank", word);
            // A well-matched word fully unwinds its stack.
            assert!(state.stack().unwrap().is_empty());
        }
    }

    #[test]
    fn test_extra_return_sinks() {
        let sevpa = complete_sevpa();
        let mut rng = XorShift(0xdead_beef);
        for round in 0..200 {
            let mut word = random_well_matched(&mut rng, 1 + (round % 40));
            word.push('r');
            let state = sevpa.run(&word);
            assert!(state.is_sink(), "word with extra return {:?} did not sink", word);
        }
    }

    #[test]
    fn test_determinism() {
        let sevpa = matched_language();
        let word: Vec<char> = "car".chars().collect();
        // Same word, same result, every time.
        let first = sevpa.run(&word);
        let second = sevpa.run(&word);
        assert_eq!(first.location(), second.location());
        assert_eq!(sevpa.is_accepting(&first), sevpa.is_accepting(&second));
    }
}
