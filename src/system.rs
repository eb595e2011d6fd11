//! The procedural-system contract.
//!
//! A procedural system composes a map of call symbol → procedure into one
//! language acceptor, interpreted through an explicit call stack. The
//! contract exposes the minimal simulation surface (initial state,
//! transition, acceptance) plus the system-level views: the restricted
//! procedural-input projection and the aggregate size.

use std::hash::Hash;

use crate::alphabet::ProceduralAlphabet;

/// A system of procedures addressed by call symbols.
pub trait ProceduralSystem<I>
where
    I: Clone + Eq + Hash,
{
    /// Interpreter state type.
    type State: Clone;

    /// Procedure model type.
    type Procedure;

    /// The structured input alphabet this system operates on.
    fn input_alphabet(&self) -> &ProceduralAlphabet<I>;

    /// The call symbol of the initial procedure, or `None` if undefined.
    fn initial_procedure(&self) -> Option<&I>;

    /// The procedure registered for `call_symbol`, or `None`. A call symbol
    /// without a procedure rejects every invocation.
    ///
    /// # Panics
    ///
    /// Panics if `call_symbol` is not a call symbol of the alphabet.
    fn procedure(&self, call_symbol: &I) -> Option<&Self::Procedure>;

    /// The subset of `constraints` this system can actually process. What
    /// counts as processable depends on the semantics: internal symbols and
    /// calls with a registered procedure always do; the return symbol only
    /// for reactive (SBA) systems.
    fn procedural_inputs(&self, constraints: &[I]) -> Vec<I>;

    /// The sum of all procedure sizes. Note that this is not the size of a
    /// product automaton; a procedural system may denote an infinite
    /// language even though each procedure is finite.
    fn size(&self) -> usize;

    fn initial_state(&self) -> Self::State;

    fn transition(&self, state: &Self::State, input: &I) -> Self::State;

    fn is_accepting(&self, state: &Self::State) -> bool;

    /// Runs the interpreter over the word, starting from the initial state.
    fn run<'a>(&self, word: impl IntoIterator<Item = &'a I>) -> Self::State
    where
        I: 'a,
    {
        let mut state = self.initial_state();
        for sym in word {
            state = self.transition(&state, sym);
        }
        state
    }

    /// Returns whether the system accepts the word.
    fn accepts<'a>(&self, word: impl IntoIterator<Item = &'a I>) -> bool
    where
        I: 'a,
    {
        let state = self.run(word);
        self.is_accepting(&state)
    }
}
