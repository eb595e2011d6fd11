//! Persistent stack of encoded stack symbols.
//!
//! [`StackContents`] is an immutable singly linked list of [`StackSym`]s.
//! `push` allocates a fresh cons cell and never mutates existing ones, so
//! stacks derived from a common prefix share their suffix. Callers that
//! explore many continuations from one state (learning, model checking) can
//! clone a stack in O(1) and never observe mutation through another handle.

use std::rc::Rc;

use crate::types::StackSym;

struct Cell {
    top: StackSym,
    rest: StackContents,
}

/// An immutable stack of stack symbols, possibly empty.
#[derive(Clone, Default)]
pub struct StackContents(Option<Rc<Cell>>);

impl StackContents {
    /// The empty stack.
    pub fn empty() -> Self {
        StackContents(None)
    }

    /// Returns a new stack with `top` pushed onto `self`. Does not modify
    /// `self`; both stacks remain usable and share their common suffix.
    pub fn push(&self, top: StackSym) -> Self {
        StackContents(Some(Rc::new(Cell {
            top,
            rest: self.clone(),
        })))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Returns the top symbol.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty. Callers must check [`is_empty`][Self::is_empty]
    /// first; a RETURN symbol on an empty stack is a word rejection, which is
    /// handled before ever peeking.
    pub fn peek(&self) -> StackSym {
        self.0.as_ref().expect("peek on the empty stack").top
    }

    /// Returns the stack below the top symbol.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty.
    pub fn pop(&self) -> Self {
        self.0.as_ref().expect("pop on the empty stack").rest.clone()
    }

    /// Number of symbols on the stack. Walks the chain, O(depth).
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.0.as_ref();
        while let Some(cell) = current {
            depth += 1;
            current = cell.rest.0.as_ref();
        }
        depth
    }
}

impl std::fmt::Debug for StackContents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        let mut current = self.0.as_ref();
        while let Some(cell) = current {
            list.entry(&cell.top);
            current = cell.rest.0.as_ref();
        }
        list.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_peek_pop() {
        let empty = StackContents::empty();
        assert!(empty.is_empty());

        let one = empty.push(StackSym::new(7));
        let two = one.push(StackSym::new(3));

        assert_eq!(two.peek(), StackSym::new(3));
        assert_eq!(two.pop().peek(), StackSym::new(7));
        assert!(two.pop().pop().is_empty());
        assert_eq!(two.depth(), 2);
    }

    #[test]
    fn test_push_is_persistent() {
        let base = StackContents::empty().push(StackSym::new(1));
        let left = base.push(StackSym::new(2));
        let right = base.push(StackSym::new(3));

        // Divergent pushes share the suffix and do not disturb each other.
        assert_eq!(left.peek(), StackSym::new(2));
        assert_eq!(right.peek(), StackSym::new(3));
        assert_eq!(base.peek(), StackSym::new(1));
        assert_eq!(left.pop().peek(), StackSym::new(1));
        assert_eq!(right.pop().peek(), StackSym::new(1));
    }

    #[test]
    #[should_panic(expected = "peek on the empty stack")]
    fn test_peek_empty() {
        StackContents::empty().peek();
    }

    #[test]
    #[should_panic(expected = "pop on the empty stack")]
    fn test_pop_empty() {
        StackContents::empty().pop();
    }
}
