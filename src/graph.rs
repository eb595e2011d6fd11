//! Read-only graph views over automata.
//!
//! These views exist for external collaborators (visualization, graph
//! algorithms, serialization); simulation never consults them. Nodes are
//! locations (SEVPA) or `(call symbol, procedure state)` pairs (procedural
//! systems); edges carry their input symbol and, for return edges, the call
//! site they match.

use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

use crate::dfa::Dfa;
use crate::sevpa::Sevpa;
use crate::types::LocationId;

/// The label of a SEVPA view edge.
#[derive(Debug, Clone)]
pub enum SevpaEdgeLabel<I> {
    Call(I),
    Internal(I),
    /// A return edge, annotated with the matching call site so a renderer
    /// can label "who called, and with which symbol".
    Return { symbol: I, call_site: (LocationId, I) },
}

/// One edge of a SEVPA graph view.
#[derive(Debug, Clone)]
pub struct SevpaViewEdge<I> {
    pub from: LocationId,
    pub to: LocationId,
    pub label: SevpaEdgeLabel<I>,
}

/// A graph view of a SEVPA: nodes are locations, edges are the defined
/// transitions.
pub struct SevpaGraphView<'a, I, A> {
    automaton: &'a A,
    _marker: std::marker::PhantomData<I>,
}

impl<'a, I, A> SevpaGraphView<'a, I, A>
where
    I: Clone + Eq + Hash,
    A: Sevpa<I>,
{
    pub fn new(automaton: &'a A) -> Self {
        Self {
            automaton,
            _marker: std::marker::PhantomData,
        }
    }

    /// All locations of the automaton.
    pub fn nodes(&self) -> impl Iterator<Item = LocationId> {
        (0..self.automaton.size()).map(LocationId::new)
    }

    /// All defined outgoing edges of `from`.
    ///
    /// Call and internal edges are one lookup each. Return edges are
    /// enumerated per call site: for every return symbol, every location and
    /// every call symbol, because return successors are keyed by the encoded
    /// call site, not by the source location alone.
    pub fn outgoing_edges(&self, from: LocationId) -> Vec<SevpaViewEdge<I>> {
        let automaton = self.automaton;
        let alphabet = automaton.alphabet();
        let mut edges = Vec::new();

        for call_idx in 0..alphabet.num_calls() {
            if let Some(entry) = automaton.module_entry(call_idx) {
                edges.push(SevpaViewEdge {
                    from,
                    to: entry,
                    label: SevpaEdgeLabel::Call(alphabet.call_symbol(call_idx).clone()),
                });
            }
        }

        for int_idx in 0..alphabet.num_internals() {
            if let Some(to) = automaton.internal_successor(from, int_idx) {
                edges.push(SevpaViewEdge {
                    from,
                    to,
                    label: SevpaEdgeLabel::Internal(alphabet.internal_symbol(int_idx).clone()),
                });
            }
        }

        for ret_idx in 0..alphabet.num_returns() {
            for loc in 0..automaton.size() {
                let loc = LocationId::new(loc);
                for call_idx in 0..alphabet.num_calls() {
                    let stack_sym = automaton.encode_stack_sym(loc, call_idx);
                    if let Some(to) = automaton.return_successor(from, ret_idx, stack_sym) {
                        edges.push(SevpaViewEdge {
                            from,
                            to,
                            label: SevpaEdgeLabel::Return {
                                symbol: alphabet.return_symbol_at(ret_idx).clone(),
                                call_site: (loc, alphabet.call_symbol(call_idx).clone()),
                            },
                        });
                    }
                }
            }
        }

        edges
    }

    /// All defined edges of the automaton.
    pub fn edges(&self) -> Vec<SevpaViewEdge<I>> {
        self.nodes().flat_map(|loc| self.outgoing_edges(loc)).collect()
    }

    pub fn initial(&self) -> LocationId {
        self.automaton.initial_location()
    }

    pub fn is_accepting(&self, node: LocationId) -> bool {
        self.automaton.is_accepting_location(node)
    }
}

/// One node of a procedural graph view: a state of one procedure, tagged by
/// the procedure's call symbol.
#[derive(Debug, Clone)]
pub struct ProceduralNode<I, S> {
    pub procedure: I,
    pub state: S,
    pub accepting: bool,
    pub initial: bool,
}

/// One edge of a procedural graph view, internal to a single procedure.
#[derive(Debug, Clone)]
pub struct ProceduralEdge<I, S> {
    pub procedure: I,
    pub from: S,
    pub to: S,
    pub input: I,
}

/// The disjoint union of all procedure graphs of a procedural system.
pub struct ProceduralGraphView<'a, I, M> {
    procedures: &'a HashMap<I, Rc<M>>,
    inputs: Vec<I>,
}

impl<'a, I, M> ProceduralGraphView<'a, I, M>
where
    I: Clone + Eq + Hash,
    M: Dfa<I>,
{
    /// Creates a view over `procedures`, drawing only edges labeled with
    /// `inputs` (the system's procedural inputs).
    pub fn new(procedures: &'a HashMap<I, Rc<M>>, inputs: Vec<I>) -> Self {
        Self { procedures, inputs }
    }

    pub fn nodes(&self) -> Vec<ProceduralNode<I, M::State>> {
        let mut nodes = Vec::new();
        for (call, procedure) in self.procedures {
            let initial = procedure.initial_state();
            for state in procedure.states() {
                nodes.push(ProceduralNode {
                    procedure: call.clone(),
                    state,
                    accepting: procedure.is_accepting(state),
                    initial: initial == Some(state),
                });
            }
        }
        nodes
    }

    pub fn edges(&self) -> Vec<ProceduralEdge<I, M::State>> {
        let mut edges = Vec::new();
        for (call, procedure) in self.procedures {
            for state in procedure.states() {
                for input in &self.inputs {
                    if let Some(to) = procedure.transition(state, input) {
                        edges.push(ProceduralEdge {
                            procedure: call.clone(),
                            from: state,
                            to,
                            input: input.clone(),
                        });
                    }
                }
            }
        }
        edges
    }

    pub fn procedures(&self) -> impl Iterator<Item = &I> {
        self.procedures.keys()
    }
}
