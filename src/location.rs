//! A single location of a SEVPA module.
//!
//! A location stores its acceptance flag and two successor tables: a dense
//! array indexed by internal symbol, and per-return-symbol sparse tables
//! indexed by encoded stack symbol. Unset slots mean "no transition" and are
//! reported as `None`; reading them is not an error, it is how callers detect
//! word rejection.

use crate::types::{LocationId, StackSym};

/// A state of a SEVPA module.
#[derive(Debug, Clone)]
pub struct Location {
    index: LocationId,
    accepting: bool,
    /// Dense successor table, one slot per internal symbol.
    internal_successors: Vec<Option<LocationId>>,
    /// Sparse successor tables, one per return symbol, each indexed by
    /// encoded stack symbol and grown on demand.
    return_successors: Vec<Vec<Option<LocationId>>>,
}

impl Location {
    /// Creates a location with the given dense index for an alphabet with
    /// `num_internals` internal and `num_returns` return symbols.
    pub fn new(index: LocationId, accepting: bool, num_internals: usize, num_returns: usize) -> Self {
        Self {
            index,
            accepting,
            internal_successors: vec![None; num_internals],
            return_successors: vec![Vec::new(); num_returns],
        }
    }

    /// The dense index of this location, stable for the automaton lifetime.
    pub fn index(&self) -> LocationId {
        self.index
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    pub fn set_accepting(&mut self, accepting: bool) {
        self.accepting = accepting;
    }

    /// Returns the internal successor for the given internal symbol index,
    /// or `None` if no transition is defined.
    pub fn internal_successor(&self, sym_idx: usize) -> Option<LocationId> {
        self.internal_successors[sym_idx]
    }

    pub fn set_internal_successor(&mut self, sym_idx: usize, succ: LocationId) {
        self.internal_successors[sym_idx] = Some(succ);
    }

    /// Returns the return successor for the given return symbol index and
    /// stack symbol. `None` if the sparse table has not grown far enough or
    /// the slot is unset; both mean "no transition".
    pub fn return_successor(&self, ret_idx: usize, stack_sym: StackSym) -> Option<LocationId> {
        let table = &self.return_successors[ret_idx];
        table.get(stack_sym.value()).copied().flatten()
    }

    /// Defines the return successor for the given return symbol index and
    /// stack symbol, growing the sparse table on demand. Intermediate slots
    /// are backfilled with "no transition".
    pub fn set_return_successor(&mut self, ret_idx: usize, stack_sym: StackSym, succ: LocationId) {
        let table = &mut self.return_successors[ret_idx];
        let slot = stack_sym.value();
        if slot >= table.len() {
            table.resize(slot + 1, None);
        }
        table[slot] = Some(succ);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_successors() {
        let mut loc = Location::new(LocationId::new(0), false, 3, 1);
        assert_eq!(loc.internal_successor(0), None);
        assert_eq!(loc.internal_successor(2), None);

        loc.set_internal_successor(1, LocationId::new(4));
        assert_eq!(loc.internal_successor(1), Some(LocationId::new(4)));
        assert_eq!(loc.internal_successor(0), None);
    }

    #[test]
    fn test_return_successors_grow_on_demand() {
        let mut loc = Location::new(LocationId::new(0), false, 0, 2);

        // No table yet: no transition.
        assert_eq!(loc.return_successor(0, StackSym::new(5)), None);

        loc.set_return_successor(0, StackSym::new(5), LocationId::new(1));
        assert_eq!(loc.return_successor(0, StackSym::new(5)), Some(LocationId::new(1)));

        // Backfilled intermediate slots stay "no transition".
        assert_eq!(loc.return_successor(0, StackSym::new(3)), None);
        // Other return symbols are unaffected.
        assert_eq!(loc.return_successor(1, StackSym::new(5)), None);
        // Out-of-range reads are "no transition", not a panic.
        assert_eq!(loc.return_successor(0, StackSym::new(100)), None);
    }

    #[test]
    fn test_accepting_flag() {
        let mut loc = Location::new(LocationId::new(2), true, 0, 1);
        assert!(loc.is_accepting());
        loc.set_accepting(false);
        assert!(!loc.is_accepting());
        assert_eq!(loc.index(), LocationId::new(2));
    }
}
