//! Exports a sample 1-SEVPA or the palindrome SPA as a DOT graph.
//!
//! Render with, e.g.:
//! ```bash
//! cargo run --example dot-export -- sevpa | dot -Tpng -o sevpa.png
//! ```

use std::collections::HashMap;
use std::io::Write;

use clap::{Parser, ValueEnum};
use vpa_rs::alphabet::{ProceduralAlphabet, VpAlphabet};
use vpa_rs::dfa::CompactDfa;
use vpa_rs::graph::SevpaGraphView;
use vpa_rs::one_sevpa::OneSevpa;
use vpa_rs::sevpa::Sevpa;
use vpa_rs::spa::StackSpa;

#[derive(Debug, Copy, Clone, ValueEnum)]
enum Kind {
    /// A 1-SEVPA for c^n a r^n.
    Sevpa,
    /// The palindrome SPA, one cluster per procedure.
    Spa,
}

#[derive(Debug, Parser)]
#[command(about = "Export a sample automaton as a DOT graph")]
struct Args {
    /// Which automaton to export.
    #[arg(value_enum, default_value = "sevpa")]
    kind: Kind,

    /// Output file (stdout if omitted).
    #[arg(short, long)]
    output: Option<std::path::PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let dot = match args.kind {
        Kind::Sevpa => {
            let sevpa = build_sevpa();
            SevpaGraphView::new(&sevpa).to_dot()?
        }
        Kind::Spa => {
            let spa = build_spa();
            spa.graph_view().to_dot()?
        }
    };

    match args.output {
        Some(path) => std::fs::write(path, dot)?,
        None => std::io::stdout().write_all(dot.as_bytes())?,
    }

    Ok(())
}

fn build_sevpa() -> OneSevpa<char> {
    let alphabet = VpAlphabet::new(vec!['c'], vec!['a'], vec!['r']);
    let mut sevpa = OneSevpa::new(alphabet);
    let q0 = sevpa.initial_location();
    let q1 = sevpa.add_location(true);
    sevpa.set_internal_successor(q0, &'a', q1);
    let call_site = sevpa.encode_stack_sym(q0, 0);
    sevpa.set_return_successor(q1, &'r', call_site, q1);
    sevpa
}

fn build_spa() -> StackSpa<char, CompactDfa<char>> {
    let alphabet = ProceduralAlphabet::new(vec!['F'], vec!['a', 'b'], 'R');
    let symbols: Vec<char> = alphabet.procedural_symbols().cloned().collect();

    // F accepts {eps, a, b, aFa, bFb}.
    let mut f = CompactDfa::new(symbols);
    let s0 = f.add_initial_state(true);
    let s1 = f.add_state(true);
    let s2 = f.add_state(true);
    let s3 = f.add_state(false);
    let s4 = f.add_state(false);
    let s5 = f.add_state(true);
    f.add_transition(s0, &'a', s1);
    f.add_transition(s0, &'b', s2);
    f.add_transition(s1, &'F', s3);
    f.add_transition(s2, &'F', s4);
    f.add_transition(s3, &'a', s5);
    f.add_transition(s4, &'b', s5);

    let mut procedures = HashMap::new();
    procedures.insert('F', f);
    StackSpa::new(alphabet, Some('F'), procedures)
}
