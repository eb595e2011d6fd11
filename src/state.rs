//! Execution state of a SEVPA: a `(location, stack)` pair or the sink.
//!
//! The sink is a dedicated variant rather than a null location, so that "has
//! this run already failed" is an exhaustive match instead of an identity
//! check. Once a run reaches [`State::Sink`] it stays there.

use crate::stack::StackContents;
use crate::types::LocationId;

/// The state of a SEVPA run.
#[derive(Debug, Clone)]
pub enum State {
    /// The absorbing rejection state.
    Sink,
    /// A live run at `location` with the given stack.
    Run {
        location: LocationId,
        stack: StackContents,
    },
}

impl State {
    /// Creates a live state.
    pub fn new(location: LocationId, stack: StackContents) -> Self {
        State::Run { location, stack }
    }

    pub fn is_sink(&self) -> bool {
        matches!(self, State::Sink)
    }

    /// The location of a live state, `None` for the sink.
    pub fn location(&self) -> Option<LocationId> {
        match self {
            State::Sink => None,
            State::Run { location, .. } => Some(*location),
        }
    }

    /// The stack of a live state, `None` for the sink.
    pub fn stack(&self) -> Option<&StackContents> {
        match self {
            State::Sink => None,
            State::Run { stack, .. } => Some(stack),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StackSym;

    #[test]
    fn test_live_state() {
        let stack = StackContents::empty().push(StackSym::new(0));
        let state = State::new(LocationId::new(1), stack);
        assert!(!state.is_sink());
        assert_eq!(state.location(), Some(LocationId::new(1)));
        assert_eq!(state.stack().unwrap().depth(), 1);
    }

    #[test]
    fn test_sink_state() {
        let state = State::Sink;
        assert!(state.is_sink());
        assert_eq!(state.location(), None);
        assert!(state.stack().is_none());
    }
}
