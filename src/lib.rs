//! # vpa-rs: Visibly Pushdown and Procedural Automata in Rust
//!
//! **`vpa-rs`** is a library of automaton data structures for formal-language
//! and model-checking research. It implements the family of k-module
//! single-entry visibly pushdown automata (k-SEVPA / 1-SEVPA) and the
//! procedural systems (SPA / SBA) built by composing plain finite automata
//! through an explicit call/return stack discipline.
//!
//! ## What is a visibly pushdown automaton?
//!
//! A visibly pushdown automaton is a pushdown automaton whose stack behavior
//! is determined by the input: the alphabet is partitioned into *call*
//! symbols (push), *internal* symbols (no stack effect) and *return* symbols
//! (pop). Each pushed stack symbol encodes the call site --- the location
//! that executed the call together with the call symbol it used --- so a
//! return transition can depend on both. This restriction keeps the model
//! deterministic and closed under boolean operations, which makes it a
//! workhorse for learning and model checking of recursive systems.
//!
//! ## Key Features
//!
//! - **Persistent runtime state**: [`StackContents`][crate::stack::StackContents]
//!   and [`StackState`][crate::stack_state::StackState] are immutable cons
//!   structures; forking many continuations from one prefix is O(1) per step
//!   and never disturbs sibling runs.
//! - **Checked construction**: the k-SEVPA builder enforces module
//!   encapsulation at the mutating call; a finished automaton is used
//!   read-only.
//! - **Rejection is a value**: undefined transitions, stack underflow and
//!   call/return mismatches yield sink states or `None`, never a panic.
//! - **Two acceptance semantics**: context-free-style [`StackSpa`][crate::spa::StackSpa]
//!   (prefix-free, call/return balanced) and reactive
//!   [`StackSba`][crate::sba::StackSba] (the return symbol is an observable
//!   input).
//!
//! ## Basic Usage
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use vpa_rs::alphabet::ProceduralAlphabet;
//! use vpa_rs::dfa::CompactDfa;
//! use vpa_rs::spa::StackSpa;
//! use vpa_rs::system::ProceduralSystem;
//!
//! // Alphabet: call F, internal a, return R.
//! let alphabet = ProceduralAlphabet::new(vec!['F'], vec!['a'], 'R');
//!
//! // Procedure F accepts {eps, a}.
//! let mut f = CompactDfa::new(vec!['F', 'a']);
//! let s0 = f.add_initial_state(true);
//! let s1 = f.add_state(true);
//! f.add_transition(s0, &'a', s1);
//!
//! let mut procedures = HashMap::new();
//! procedures.insert('F', f);
//! let spa = StackSpa::new(alphabet, Some('F'), procedures);
//!
//! assert!(spa.accepts(&['F', 'R']));
//! assert!(spa.accepts(&['F', 'a', 'R']));
//! assert!(!spa.accepts(&['F', 'a', 'a', 'R']));
//! assert!(!spa.accepts(&['F', 'a']));
//! ```
//!
//! ## Core Components
//!
//! - **[`sevpa`]**: the SEVPA engine --- stateless transition dispatch,
//!   stack-symbol encoding, acceptance. [`one_sevpa`] and [`nsevpa`] are the
//!   mutable builders.
//! - **[`spa`] / [`sba`]**: the procedural-system interpreters over
//!   [`dfa`] procedures.
//! - **[`graph`] / [`dot`]**: read-only views and Graphviz export for
//!   external tooling.

pub mod alphabet;
pub mod dfa;
pub mod dot;
pub mod graph;
pub mod location;
pub mod nsevpa;
pub mod one_sevpa;
pub mod sba;
pub mod sevpa;
pub mod spa;
pub mod stack;
pub mod stack_state;
pub mod state;
pub mod system;
pub mod types;
