//! Stack-based SPA interpretation.
//!
//! [`StackSpa`] interprets a system of procedures (SPA) word by word: a call
//! symbol opens a frame for the called procedure, internal symbols step the
//! current procedure, and the return symbol closes the frame, provided the
//! procedure accepts its consumed sub-word. The accepted language is
//! prefix-free and call/return balanced by construction.
//!
//! The return address is computed at call time: the caller's frame is
//! advanced over the call symbol (an internal move of the calling procedure)
//! *before* the callee's frame is pushed. This makes RETURN a pure pop and
//! keeps the transition function a function of the current top of stack
//! only, as determinism requires.

use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

use crate::alphabet::{ProceduralAlphabet, SymbolKind};
use crate::dfa::Dfa;
use crate::graph::ProceduralGraphView;
use crate::stack_state::StackState;
use crate::system::ProceduralSystem;

/// One interpreter step, shared verbatim between SPA and SBA semantics.
///
/// # Panics
///
/// Panics if `input` does not belong to the alphabet.
pub(crate) fn stack_transition<I, M>(
    alphabet: &ProceduralAlphabet<I>,
    initial_call: Option<&I>,
    procedures: &HashMap<I, Rc<M>>,
    state: &StackState<M, M::State>,
    input: &I,
) -> StackState<M, M::State>
where
    I: Clone + Eq + Hash,
    M: Dfa<I>,
{
    // No symbol un-terminates or un-rejects a run.
    if state.is_sink() || state.is_term() {
        return StackState::Sink;
    }

    let kind = alphabet
        .kind(input)
        .unwrap_or_else(|| panic!("Input symbol does not belong to the alphabet"));

    match kind {
        SymbolKind::Internal => {
            if state.is_init() {
                // No procedure is open yet.
                return StackState::Sink;
            }
            match state.procedure().transition(state.current_state(), input) {
                Some(next) => state.update_state(next),
                None => StackState::Sink,
            }
        }
        SymbolKind::Call => {
            if state.is_init() && initial_call != Some(input) {
                return StackState::Sink;
            }

            // An unregistered procedure rejects every invocation.
            let procedure = match procedures.get(input) {
                Some(procedure) => procedure,
                None => return StackState::Sink,
            };
            let entry = match procedure.initial_state() {
                Some(entry) => entry,
                None => return StackState::Sink,
            };

            // Record the return address now, so RETURN is a pure pop later.
            let return_address = if state.is_init() {
                StackState::Term
            } else {
                match state.procedure().transition(state.current_state(), input) {
                    Some(succ) => state.update_state(succ),
                    None => return StackState::Sink,
                }
            };

            return_address.push(Rc::clone(procedure), entry)
        }
        SymbolKind::Return => {
            if state.is_init() {
                // Nothing to return from.
                return StackState::Sink;
            }
            // A procedure may only return once it deems itself done.
            if !state.procedure().is_accepting(state.current_state()) {
                return StackState::Sink;
            }
            state.pop()
        }
    }
}

/// The SPA procedural inputs: internal symbols and calls with a registered
/// procedure, intersected with `constraints`.
pub(crate) fn spa_inputs<I, M>(
    alphabet: &ProceduralAlphabet<I>,
    procedures: &HashMap<I, Rc<M>>,
    constraints: &[I],
) -> Vec<I>
where
    I: Clone + Eq + Hash,
{
    constraints
        .iter()
        .filter(|sym| {
            alphabet.is_internal(sym) || (alphabet.is_call(sym) && procedures.contains_key(sym))
        })
        .cloned()
        .collect()
}

/// A stack-based SPA: a map of call symbol → procedure plus an initial call,
/// accepting exactly the terminated, well-matched runs.
pub struct StackSpa<I, M> {
    alphabet: ProceduralAlphabet<I>,
    initial_call: Option<I>,
    procedures: HashMap<I, Rc<M>>,
}

impl<I, M> StackSpa<I, M>
where
    I: Clone + Eq + Hash,
    M: Dfa<I>,
{
    /// Creates a new SPA.
    ///
    /// # Panics
    ///
    /// Panics if a procedure key or the initial call is not a call symbol of
    /// the alphabet. The map may be partial: call symbols without a
    /// procedure simply reject every invocation.
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

    /// The procedures of this system.
    pub fn procedures(&self) -> &HashMap<I, Rc<M>> {
        &self.procedures
    }

    /// A read-only graph view: the disjoint union of all procedure graphs,
    /// tagged by call symbol, for external rendering.
    pub fn graph_view(&self) -> ProceduralGraphView<'_, I, M> {
        let inputs = self.procedural_inputs_vec();
        ProceduralGraphView::new(&self.procedures, inputs)
    }

    fn procedural_inputs_vec(&self) -> Vec<I> {
        let all: Vec<I> = self.alphabet.vp().symbols().cloned().collect();
        self.procedural_inputs(&all)
    }
}

impl<I, M> ProceduralSystem<I> for StackSpa<I, M>
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

    fn procedural_inputs(&self, constraints: &[I]) -> Vec<I> {
        spa_inputs(&self.alphabet, &self.procedures, constraints)
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

    /// Acceptance is exactly the `Term` sentinel; no frame state, including
    /// `Init`, accepts.
    fn is_accepting(&self, state: &Self::State) -> bool {
        state.is_term()
    }
}

/// The degenerate SPA with no procedures and no initial procedure. It
/// accepts nothing; it exists so "no language" is representable without a
/// sentinel null system.
pub struct EmptySpa<I> {
    alphabet: ProceduralAlphabet<I>,
}

impl<I> EmptySpa<I>
where
    I: Clone + Eq + Hash,
{
    pub fn new(alphabet: ProceduralAlphabet<I>) -> Self {
        Self { alphabet }
    }
}

impl<I> ProceduralSystem<I> for EmptySpa<I>
where
    I: Clone + Eq + Hash,
{
    type State = StackState<(), ()>;
    type Procedure = ();

    fn input_alphabet(&self) -> &ProceduralAlphabet<I> {
        &self.alphabet
    }

    fn initial_procedure(&self) -> Option<&I> {
        None
    }

    fn procedure(&self, call_symbol: &I) -> Option<&()> {
        assert!(self.alphabet.is_call(call_symbol), "Not a call symbol");
        None
    }

    fn procedural_inputs(&self, constraints: &[I]) -> Vec<I> {
        constraints
            .iter()
            .filter(|sym| self.alphabet.is_internal(sym))
            .cloned()
            .collect()
    }

    fn size(&self) -> usize {
        0
    }

    fn initial_state(&self) -> Self::State {
        StackState::Init
    }

    fn transition(&self, _state: &Self::State, _input: &I) -> Self::State {
        StackState::Sink
    }

    fn is_accepting(&self, _state: &Self::State) -> bool {
        false
    }
}
