//! Deterministic finite acceptors used as procedures.
//!
//! A procedural system composes plain finite automata through a call/return
//! stack. The system only needs the minimal simulation surface of its
//! procedures, captured by the [`Dfa`] trait. [`CompactDfa`] is the dense,
//! index-based implementation used to build procedures by hand.

use std::collections::HashMap;
use std::hash::Hash;

use log::debug;

/// A deterministic finite acceptor with partial transitions.
///
/// `None` results are first-class "no transition" values, used by callers to
/// detect rejection; they are never errors.
pub trait Dfa<I> {
    /// The state type. Kept `Copy` so interpreter frames can hold states by
    /// value.
    type State: Copy + Eq;

    /// The initial state, or `None` for the empty acceptor.
    fn initial_state(&self) -> Option<Self::State>;

    /// The successor of `state` under `input`, or `None` if undefined.
    fn transition(&self, state: Self::State, input: &I) -> Option<Self::State>;

    fn is_accepting(&self, state: Self::State) -> bool;

    /// Number of states.
    fn size(&self) -> usize;

    /// All states, for read-only graph views. Simulation never needs this.
    fn states(&self) -> Vec<Self::State>;
}

/// A dense DFA over an explicit symbol list.
///
/// States are dense `u32` ids; transitions live in one flat
/// `states x symbols` table.
#[derive(Debug, Clone)]
pub struct CompactDfa<I> {
    symbols: Vec<I>,
    symbol_index: HashMap<I, usize>,
    /// Flat table, `state * symbols.len() + symbol`.
    transitions: Vec<Option<u32>>,
    accepting: Vec<bool>,
    initial: Option<u32>,
}

impl<I> CompactDfa<I>
where
    I: Clone + Eq + Hash,
{
    /// Creates an empty DFA over the given symbols.
    ///
    /// # Panics
    ///
    /// Panics if the symbol list contains duplicates.
    pub fn new(symbols: Vec<I>) -> Self {
        let mut symbol_index = HashMap::with_capacity(symbols.len());
        for (i, sym) in symbols.iter().enumerate() {
            let prev = symbol_index.insert(sym.clone(), i);
            assert!(prev.is_none(), "Symbol occurs twice in the DFA alphabet");
        }
        Self {
            symbols,
            symbol_index,
            transitions: Vec::new(),
            accepting: Vec::new(),
            initial: None,
        }
    }

    /// Adds a fresh state and returns its id.
    pub fn add_state(&mut self, accepting: bool) -> u32 {
        let id = self.accepting.len() as u32;
        debug!("add_state(accepting = {}) -> {}", accepting, id);
        self.accepting.push(accepting);
        self.transitions.extend(std::iter::repeat(None).take(self.symbols.len()));
        id
    }

    /// Adds a fresh state and marks it initial.
    ///
    /// # Panics
    ///
    /// Panics if an initial state is already set.
    pub fn add_initial_state(&mut self, accepting: bool) -> u32 {
        assert!(self.initial.is_none(), "Initial state is already set");
        let id = self.add_state(accepting);
        self.initial = Some(id);
        id
    }

    /// Defines the transition `from --sym--> to`.
    ///
    /// # Panics
    ///
    /// Panics if `sym` does not belong to the DFA alphabet or a state id is
    /// out of range.
    pub fn add_transition(&mut self, from: u32, sym: &I, to: u32) {
        let sym_idx = *self
            .symbol_index
            .get(sym)
            .unwrap_or_else(|| panic!("Symbol does not belong to the DFA alphabet"));
        assert!((from as usize) < self.accepting.len(), "State {} does not exist", from);
        assert!((to as usize) < self.accepting.len(), "State {} does not exist", to);
        let slot = from as usize * self.symbols.len() + sym_idx;
        self.transitions[slot] = Some(to);
    }

    pub fn set_accepting(&mut self, state: u32, accepting: bool) {
        self.accepting[state as usize] = accepting;
    }

    pub fn symbols(&self) -> &[I] {
        &self.symbols
    }

    /// Runs the DFA over the word and returns whether it accepts.
    pub fn accepts<'a>(&self, word: impl IntoIterator<Item = &'a I>) -> bool
    where
        I: 'a,
    {
        let mut state = match self.initial_state() {
            Some(state) => state,
            None => return false,
        };
        for sym in word {
            state = match self.transition(state, sym) {
                Some(next) => next,
                None => return false,
            };
        }
        self.is_accepting(state)
    }
}

impl<I> Dfa<I> for CompactDfa<I>
where
    I: Clone + Eq + Hash,
{
    type State = u32;

    fn initial_state(&self) -> Option<u32> {
        self.initial
    }

    fn transition(&self, state: u32, input: &I) -> Option<u32> {
        let sym_idx = *self.symbol_index.get(input)?;
        self.transitions[state as usize * self.symbols.len() + sym_idx]
    }

    fn is_accepting(&self, state: u32) -> bool {
        self.accepting[state as usize]
    }

    fn size(&self) -> usize {
        self.accepting.len()
    }

    fn states(&self) -> Vec<u32> {
        (0..self.accepting.len() as u32).collect()
    }
}
