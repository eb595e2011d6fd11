//! Graph views to DOT (Graphviz) conversion.
//!
//! Renders the read-only [`graph`][crate::graph] views into DOT format for
//! external tooling (`dot`, `neato`, online viewers). Conventions:
//!
//! - **Locations / states** are circles; accepting ones are double circles.
//! - **The initial location** (or each procedure's initial state) gets an
//!   incoming arrow from an invisible source node.
//! - **Return edges** are labeled `r/(l,c)`: the return symbol plus the call
//!   site `(location, call symbol)` it matches.
//! - **Procedures** of a procedural system are grouped into clusters, one
//!   per call symbol.

use std::fmt::Display;
use std::fmt::Write;
use std::hash::Hash;

use crate::dfa::Dfa;
use crate::graph::{ProceduralGraphView, SevpaEdgeLabel, SevpaGraphView};
use crate::sevpa::Sevpa;

impl<I, A> SevpaGraphView<'_, I, A>
where
    I: Clone + Eq + Hash + Display,
    A: Sevpa<I>,
{
    /// Converts the SEVPA view to DOT format.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        let mut out = String::new();

        writeln!(out, "digraph sevpa {{")?;
        writeln!(out, "  rankdir=LR;")?;
        writeln!(out, "  node [shape=circle];")?;

        writeln!(out, "  __init [shape=none, label=\"\"];")?;
        writeln!(out, "  __init -> \"{}\";", self.initial())?;

        for node in self.nodes() {
            let shape = if self.is_accepting(node) {
                "doublecircle"
            } else {
                "circle"
            };
            writeln!(out, "  \"{}\" [shape={}, label=\"{}\"];", node, shape, node)?;
        }

        for edge in self.edges() {
            let label = match &edge.label {
                SevpaEdgeLabel::Call(sym) => format!("{}", sym),
                SevpaEdgeLabel::Internal(sym) => format!("{}", sym),
                SevpaEdgeLabel::Return { symbol, call_site } => {
                    format!("{}/({},{})", symbol, call_site.0, call_site.1)
                }
            };
            let style = match &edge.label {
                SevpaEdgeLabel::Call(_) => ", style=dashed",
                _ => "",
            };
            writeln!(
                out,
                "  \"{}\" -> \"{}\" [label=\"{}\"{}];",
                edge.from, edge.to, label, style
            )?;
        }

        writeln!(out, "}}")?;
        Ok(out)
    }
}

impl<I, M> ProceduralGraphView<'_, I, M>
where
    I: Clone + Eq + Hash + Display,
    M: Dfa<I>,
    M::State: Display,
{
    /// Converts the procedural view to DOT format, one cluster per
    /// procedure.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        let mut out = String::new();

        writeln!(out, "digraph procedural_system {{")?;
        writeln!(out, "  rankdir=LR;")?;
        writeln!(out, "  node [shape=circle];")?;

        let mut procedures: Vec<&I> = self.procedures().collect();
        // Deterministic output regardless of map iteration order.
        procedures.sort_by_key(|p| p.to_string());

        let nodes = self.nodes();
        let edges = self.edges();

        for (cluster, procedure) in procedures.iter().enumerate() {
            writeln!(out, "  subgraph cluster_{} {{", cluster)?;
            writeln!(out, "    label=\"{}\";", procedure)?;

            for node in nodes.iter().filter(|n| &&n.procedure == procedure) {
                let shape = if node.accepting { "doublecircle" } else { "circle" };
                writeln!(
                    out,
                    "    \"{}_{}\" [shape={}, label=\"{}\"];",
                    procedure, node.state, shape, node.state
                )?;
                if node.initial {
                    writeln!(out, "    \"__init_{}\" [shape=none, label=\"\"];", procedure)?;
                    writeln!(out, "    \"__init_{}\" -> \"{}_{}\";", procedure, procedure, node.state)?;
                }
            }

            for edge in edges.iter().filter(|e| &&e.procedure == procedure) {
                writeln!(
                    out,
                    "    \"{}_{}\" -> \"{}_{}\" [label=\"{}\"];",
                    procedure, edge.from, procedure, edge.to, edge.input
                )?;
            }

            writeln!(out, "  }}")?;
        }

        writeln!(out, "}}")?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::*;
    use crate::alphabet::VpAlphabet;
    use crate::dfa::CompactDfa;
    use crate::one_sevpa::OneSevpa;
    use crate::types::StackSym;

    #[test]
    fn test_sevpa_dot_output() {
        let alphabet = VpAlphabet::new(vec!['c'], vec!['a'], vec!['r']);
        let mut sevpa = OneSevpa::new(alphabet);
        let q0 = sevpa.initial_location();
        let q1 = sevpa.add_location(true);
        sevpa.set_internal_successor(q0, &'a', q1);
        sevpa.set_return_successor(q1, &'r', StackSym::new(0), q1);

        let dot = SevpaGraphView::new(&sevpa).to_dot().unwrap();
        assert!(dot.starts_with("digraph sevpa {"));
        assert!(dot.contains("doublecircle"));
        // Return edges carry their call site.
        assert!(dot.contains("r/(q0,c)"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn test_procedural_dot_output() {
        let mut dfa = CompactDfa::new(vec!['F', 'a']);
        let s0 = dfa.add_initial_state(false);
        let s1 = dfa.add_state(true);
        dfa.add_transition(s0, &'a', s1);

        let mut procedures = HashMap::new();
        procedures.insert('F', Rc::new(dfa));

        let view = ProceduralGraphView::new(&procedures, vec!['F', 'a']);
        let dot = view.to_dot().unwrap();
        assert!(dot.starts_with("digraph procedural_system {"));
        assert!(dot.contains("subgraph cluster_0"));
        assert!(dot.contains("label=\"F\""));
        assert!(dot.contains("[label=\"a\"]"));
    }
}
