//! The state of the procedural-system interpreter.
//!
//! A [`StackState`] is either one of three sentinels, `Init` (no procedure
//! opened yet), `Sink` (irrecoverable rejection) and `Term` (initial procedure
//! accepted and stack fully unwound), or a frame holding the currently
//! executing procedure, its state, and the state to resume on return.
//!
//! Frames are persistent: `push` allocates a new frame pointing at the
//! current state, `pop` hands the `prev` handle back. States forked from a
//! common prefix share their frame chain through `Rc`, so exploring many
//! continuations from one prefix costs one allocation per push.
//!
//! The sentinels carry no frame data; asking a sentinel for its procedure or
//! procedure state is a programming error and panics.

use std::rc::Rc;

/// Interpreter state: a sentinel or a call-frame chain.
///
/// `M` is the procedure model type, `S` its state type.
#[derive(Debug)]
pub enum StackState<M, S> {
    /// Initial state, before the first call.
    Init,
    /// Absorbing rejection.
    Sink,
    /// Absorbing acceptance: the initial procedure returned.
    Term,
    /// One open call.
    Frame {
        /// The state to resume when this call returns.
        prev: Rc<StackState<M, S>>,
        /// The procedure executing this call.
        procedure: Rc<M>,
        /// The procedure's current state.
        state: S,
    },
}

// Manual impl: `S` itself is `Copy`-like per the `Dfa` contract, but a
// derived `Clone` would also demand `M: Clone`, which `Rc` makes unnecessary.
impl<M, S: Clone> Clone for StackState<M, S> {
    fn clone(&self) -> Self {
        match self {
            StackState::Init => StackState::Init,
            StackState::Sink => StackState::Sink,
            StackState::Term => StackState::Term,
            StackState::Frame { prev, procedure, state } => StackState::Frame {
                prev: Rc::clone(prev),
                procedure: Rc::clone(procedure),
                state: state.clone(),
            },
        }
    }
}

impl<M, S: Clone> StackState<M, S> {
    pub fn is_init(&self) -> bool {
        matches!(self, StackState::Init)
    }
    pub fn is_sink(&self) -> bool {
        matches!(self, StackState::Sink)
    }
    pub fn is_term(&self) -> bool {
        matches!(self, StackState::Term)
    }
    pub fn is_frame(&self) -> bool {
        matches!(self, StackState::Frame { .. })
    }

    /// Pushes a new frame for `procedure` starting in `state`; `self`
    /// becomes the return address.
    pub fn push(&self, procedure: Rc<M>, state: S) -> Self {
        StackState::Frame {
            prev: Rc::new(self.clone()),
            procedure,
            state,
        }
    }

    /// Replaces the procedure state of the current frame, keeping procedure
    /// and return address.
    ///
    /// # Panics
    ///
    /// Panics on a sentinel state.
    pub fn update_state(&self, next: S) -> Self {
        match self {
            StackState::Frame { prev, procedure, .. } => StackState::Frame {
                prev: Rc::clone(prev),
                procedure: Rc::clone(procedure),
                state: next,
            },
            _ => panic!("update_state on a sentinel state"),
        }
    }

    /// Pops the current frame, returning to the state recorded at call time.
    ///
    /// # Panics
    ///
    /// Panics on a sentinel state.
    pub fn pop(&self) -> Self {
        match self {
            StackState::Frame { prev, .. } => (**prev).clone(),
            _ => panic!("pop on a sentinel state"),
        }
    }

    /// The procedure of the current frame.
    ///
    /// # Panics
    ///
    /// Panics on a sentinel state.
    pub fn procedure(&self) -> &M {
        match self {
            StackState::Frame { procedure, .. } => procedure,
            _ => panic!("procedure on a sentinel state"),
        }
    }

    /// The procedure state of the current frame.
    ///
    /// # Panics
    ///
    /// Panics on a sentinel state.
    pub fn current_state(&self) -> S {
        match self {
            StackState::Frame { state, .. } => state.clone(),
            _ => panic!("current_state on a sentinel state"),
        }
    }

    /// Number of open calls. Walks the frame chain, O(depth).
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let StackState::Frame { prev, .. } = current {
            depth += 1;
            current = prev;
        }
        depth
    }
}
