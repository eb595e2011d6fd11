//! Type-safe wrappers for location ids and encoded stack symbols.
//!
//! These newtypes enforce a compile-time distinction between the dense index
//! of a location and the integer encoding of a stack symbol, which would
//! otherwise be easy to confuse (both are small non-negative integers and
//! both index into successor tables).

use std::fmt;

/// The dense index of a location within its automaton.
///
/// Location ids are assigned contiguously at creation (`0..size`) and stay
/// stable for the lifetime of the automaton.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct LocationId(usize);

impl LocationId {
    /// Creates a new location id with the given index.
    pub fn new(index: usize) -> Self {
        LocationId(index)
    }

    /// Returns the raw index as a `usize`.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<LocationId> for usize {
    fn from(id: LocationId) -> Self {
        id.0
    }
}

/// An encoded stack symbol.
///
/// A stack symbol couples the location that executed a call with the index of
/// the call symbol it used:
///
/// ```text
/// stack_sym = num_calls * location_id + call_idx
/// ```
///
/// The encoding is a bijection on `0..size * num_calls`, so a return
/// transition can depend on both the call site and the call symbol.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct StackSym(usize);

impl StackSym {
    /// Creates a stack symbol from its raw encoding.
    pub fn new(value: usize) -> Self {
        StackSym(value)
    }

    /// Returns the raw encoding as a `usize`.
    pub fn value(self) -> usize {
        self.0
    }

    /// Decodes the call-site location id, given the number of call symbols.
    pub fn location(self, num_calls: usize) -> LocationId {
        assert_ne!(num_calls, 0, "Alphabet has no call symbols");
        LocationId(self.0 / num_calls)
    }

    /// Decodes the call symbol index, given the number of call symbols.
    pub fn call_index(self, num_calls: usize) -> usize {
        assert_ne!(num_calls, 0, "Alphabet has no call symbols");
        self.0 % num_calls
    }
}

impl fmt::Display for StackSym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<StackSym> for usize {
    fn from(sym: StackSym) -> Self {
        sym.0
    }
}
