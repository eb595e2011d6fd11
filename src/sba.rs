//! Stack-based SBA interpretation.
//!
//! An SBA shares the SPA interpreter unchanged; the difference is semantic:
//! it models reactive systems whose prefixes of unterminated procedures are
//! meaningful observable behavior, so the return symbol counts as a valid
//! procedural input.

use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

use crate::alphabet::ProceduralAlphabet;
use crate::dfa::Dfa;
use crate::graph::ProceduralGraphView;
use crate::spa::{spa_inputs, stack_transition};
use crate::stack_state::StackState;
use crate::system::ProceduralSystem;

/// A stack-based SBA: the reactive variant of [`StackSpa`][crate::spa::StackSpa].
pub struct StackSba<I, M> {
    alphabet: ProceduralAlphabet<I>,
    initial_call: Option<I>,
    procedures: HashMap<I, Rc<M>>,
}

impl<I, M> StackSba<I, M>
where
    I: Clone + Eq + Hash,
    M: Dfa<I>,
{
    /// Creates a new SBA.
    ///
    /// # Panics
    ///
    /// Panics if a procedure key or the initial call is not a call symbol of
    /// the alphabet.
    pub fn new(alphabet: ProceduralAlphabet<I>, initial_call: Option<I>, procedures: HashMap<I, M>) -> Self {
        for key in procedures.keys() {
            assert!(alphabet.is_call(key), "Procedure key is not a call symbol");
        }
        if let Some(call) = &initial_call {
            assert!(alphabet.is_call(call), "Initial procedure is not a call symbol");
        }
        let procedures = procedures.into_iter().map(|(k, v)| (k, Rc::new(v))).collect();
        Self {
            alphabet,
            initial_call,
            procedures,
        }
    }

    pub fn procedures(&self) -> &HashMap<I, Rc<M>> {
        &self.procedures
    }

    /// A read-only graph view for external rendering.
    pub fn graph_view(&self) -> ProceduralGraphView<'_, I, M> {
        let all: Vec<I> = self.alphabet.vp().symbols().cloned().collect();
        let inputs = self.procedural_inputs(&all);
        ProceduralGraphView::new(&self.procedures, inputs)
    }
}

impl<I, M> ProceduralSystem<I> for StackSba<I, M>
where
    I: Clone + Eq + Hash,
    M: Dfa<I>,
{
    type State = StackState<M, M::State>;
    type Procedure = M;

    fn input_alphabet(&self) -> &ProceduralAlphabet<I> {
        &self.alphabet
    }

    fn initial_procedure(&self) -> Option<&I> {
        self.initial_call.as_ref()
    }

    fn procedure(&self, call_symbol: &I) -> Option<&M> {
        assert!(self.alphabet.is_call(call_symbol), "Not a call symbol");
        self.procedures.get(call_symbol).map(Rc::as_ref)
    }

    /// Like the SPA projection, plus the return symbol: terminating a
    /// procedure is an observable input of a reactive system.
    fn procedural_inputs(&self, constraints: &[I]) -> Vec<I> {
        let mut inputs = spa_inputs(&self.alphabet, &self.procedures, constraints);
        if let Some(ret) = constraints.iter().find(|sym| self.alphabet.is_return(sym)) {
            inputs.push(ret.clone());
        }
        inputs
    }

    fn size(&self) -> usize {
        self.procedures.values().map(|p| p.size()).sum()
    }

    fn initial_state(&self) -> Self::State {
        StackState::Init
    }

    fn transition(&self, state: &Self::State, input: &I) -> Self::State {
        stack_transition(
            &self.alphabet,
            self.initial_call.as_ref(),
            &self.procedures,
            state,
            input,
        )
    }

    fn is_accepting(&self, state: &Self::State) -> bool {
        state.is_term()
    }
}
