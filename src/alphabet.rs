//! Structured alphabets for visibly pushdown automata.
//!
//! A [`VpAlphabet`] partitions its symbols into three classes: *call* symbols
//! (push one stack symbol), *internal* symbols (no stack effect) and *return*
//! symbols (pop one stack symbol). Each class exposes stable dense indices,
//! which the automata use to address their successor tables.
//!
//! A [`ProceduralAlphabet`] is the single-return-symbol refinement used by
//! procedural systems (SPA/SBA), with helpers for analyzing the call/return
//! nesting structure of words.

use std::collections::HashMap;
use std::hash::Hash;

/// The structural class of an alphabet symbol.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SymbolKind {
    Call,
    Internal,
    Return,
}

/// An alphabet partitioned into call, internal and return symbols.
///
/// Indices are relative to the symbol's own class (the first call symbol has
/// call index 0, the first internal symbol has internal index 0, and so on).
#[derive(Debug, Clone)]
pub struct VpAlphabet<I> {
    calls: Vec<I>,
    internals: Vec<I>,
    returns: Vec<I>,
    index: HashMap<I, (SymbolKind, usize)>,
}

impl<I> VpAlphabet<I>
where
    I: Clone + Eq + Hash,
{
    /// Creates a new alphabet from the three symbol classes.
    ///
    /// # Panics
    ///
    /// Panics if the same symbol occurs twice (within one class or across
    /// classes). The partition must be exact.
    pub fn new(calls: Vec<I>, internals: Vec<I>, returns: Vec<I>) -> Self {
        let mut index = HashMap::with_capacity(calls.len() + internals.len() + returns.len());

        let classes = [
            (SymbolKind::Call, &calls),
            (SymbolKind::Internal, &internals),
            (SymbolKind::Return, &returns),
        ];
        for (kind, symbols) in classes {
            for (i, sym) in symbols.iter().enumerate() {
                let prev = index.insert(sym.clone(), (kind, i));
                assert!(prev.is_none(), "Symbol occurs twice in the alphabet");
            }
        }

        Self {
            calls,
            internals,
            returns,
            index,
        }
    }

    /// Total number of symbols across all classes.
    pub fn size(&self) -> usize {
        self.index.len()
    }

    pub fn num_calls(&self) -> usize {
        self.calls.len()
    }
    pub fn num_internals(&self) -> usize {
        self.internals.len()
    }
    pub fn num_returns(&self) -> usize {
        self.returns.len()
    }

    pub fn calls(&self) -> &[I] {
        &self.calls
    }
    pub fn internals(&self) -> &[I] {
        &self.internals
    }
    pub fn returns(&self) -> &[I] {
        &self.returns
    }

    /// Returns the class of the given symbol, or `None` if the symbol does
    /// not belong to this alphabet.
    pub fn kind(&self, symbol: &I) -> Option<SymbolKind> {
        self.index.get(symbol).map(|&(kind, _)| kind)
    }

    /// Returns the class and in-class index of the given symbol.
    pub fn classify(&self, symbol: &I) -> Option<(SymbolKind, usize)> {
        self.index.get(symbol).copied()
    }

    pub fn is_call(&self, symbol: &I) -> bool {
        self.kind(symbol) == Some(SymbolKind::Call)
    }
    pub fn is_internal(&self, symbol: &I) -> bool {
        self.kind(symbol) == Some(SymbolKind::Internal)
    }
    pub fn is_return(&self, symbol: &I) -> bool {
        self.kind(symbol) == Some(SymbolKind::Return)
    }

    /// Returns the call index of `symbol`.
    ///
    /// # Panics
    ///
    /// Panics if `symbol` is not a call symbol of this alphabet.
    pub fn call_index(&self, symbol: &I) -> usize {
        match self.classify(symbol) {
            Some((SymbolKind::Call, i)) => i,
            _ => panic!("Symbol is not a call symbol of this alphabet"),
        }
    }

    /// Returns the internal index of `symbol`.
    ///
    /// # Panics
    ///
    /// Panics if `symbol` is not an internal symbol of this alphabet.
    pub fn internal_index(&self, symbol: &I) -> usize {
        match self.classify(symbol) {
            Some((SymbolKind::Internal, i)) => i,
            _ => panic!("Symbol is not an internal symbol of this alphabet"),
        }
    }

    /// Returns the return index of `symbol`.
    ///
    /// # Panics
    ///
    /// Panics if `symbol` is not a return symbol of this alphabet.
    pub fn return_index(&self, symbol: &I) -> usize {
        match self.classify(symbol) {
            Some((SymbolKind::Return, i)) => i,
            _ => panic!("Symbol is not a return symbol of this alphabet"),
        }
    }

    pub fn call_symbol(&self, index: usize) -> &I {
        &self.calls[index]
    }
    pub fn internal_symbol(&self, index: usize) -> &I {
        &self.internals[index]
    }
    pub fn return_symbol_at(&self, index: usize) -> &I {
        &self.returns[index]
    }

    /// Iterates over all symbols of the alphabet (calls, then internals,
    /// then returns).
    pub fn symbols(&self) -> impl Iterator<Item = &I> {
        self.calls
            .iter()
            .chain(self.internals.iter())
            .chain(self.returns.iter())
    }

    /// Returns the call-return balance of the word: the number of call
    /// symbols minus the number of return symbols.
    pub fn call_return_balance<'a>(&self, word: impl IntoIterator<Item = &'a I>) -> isize
    where
        I: 'a,
    {
        let mut balance = 0;
        for sym in word {
            match self.kind(sym) {
                Some(SymbolKind::Call) => balance += 1,
                Some(SymbolKind::Return) => balance -= 1,
                _ => {}
            }
        }
        balance
    }

    /// Returns whether every call symbol in the word is succeeded by a
    /// matching return symbol. A call-matched word may still contain
    /// un-matched return symbols.
    pub fn is_call_matched<'a>(&self, word: impl IntoIterator<Item = &'a I>) -> bool
    where
        I: 'a,
    {
        let mut balance = 0;
        for sym in word {
            match self.kind(sym) {
                Some(SymbolKind::Call) => balance += 1,
                Some(SymbolKind::Return) => {
                    if balance > 0 {
                        balance -= 1;
                    }
                }
                _ => {}
            }
        }
        balance == 0
    }

    /// Returns whether every return symbol in the word is preceded by a
    /// matching call symbol. A return-matched word may still contain
    /// un-matched call symbols.
    pub fn is_return_matched<'a>(&self, word: impl IntoIterator<Item = &'a I>) -> bool
    where
        I: 'a,
    {
        let mut balance = 0;
        for sym in word {
            match self.kind(sym) {
                Some(SymbolKind::Call) => balance += 1,
                Some(SymbolKind::Return) => {
                    balance -= 1;
                    if balance < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }
        true
    }

    /// Returns whether the word is well-matched: calls and returns are
    /// correctly nested and balanced.
    pub fn is_well_matched(&self, word: &[I]) -> bool {
        self.is_call_matched(word) && self.is_return_matched(word)
    }
}

/// The structured alphabet of a procedural system: call and internal symbols
/// plus a single return symbol.
#[derive(Debug, Clone)]
pub struct ProceduralAlphabet<I> {
    base: VpAlphabet<I>,
}

impl<I> ProceduralAlphabet<I>
where
    I: Clone + Eq + Hash,
{
    /// Creates a new procedural alphabet with the given call and internal
    /// symbols and the single return symbol.
    pub fn new(calls: Vec<I>, internals: Vec<I>, return_symbol: I) -> Self {
        Self {
            base: VpAlphabet::new(calls, internals, vec![return_symbol]),
        }
    }

    /// The underlying three-way partitioned alphabet.
    pub fn vp(&self) -> &VpAlphabet<I> {
        &self.base
    }

    /// The single return symbol.
    pub fn return_symbol(&self) -> &I {
        &self.base.returns[0]
    }

    /// Iterates over the procedural symbols: calls and internals, which is
    /// the alphabet a single procedure operates on.
    pub fn procedural_symbols(&self) -> impl Iterator<Item = &I> {
        self.base.calls.iter().chain(self.base.internals.iter())
    }

    pub fn size(&self) -> usize {
        self.base.size()
    }
    pub fn num_calls(&self) -> usize {
        self.base.num_calls()
    }
    pub fn calls(&self) -> &[I] {
        self.base.calls()
    }
    pub fn internals(&self) -> &[I] {
        self.base.internals()
    }

    pub fn kind(&self, symbol: &I) -> Option<SymbolKind> {
        self.base.kind(symbol)
    }
    pub fn is_call(&self, symbol: &I) -> bool {
        self.base.is_call(symbol)
    }
    pub fn is_internal(&self, symbol: &I) -> bool {
        self.base.is_internal(symbol)
    }
    pub fn is_return(&self, symbol: &I) -> bool {
        self.base.is_return(symbol)
    }
    pub fn is_well_matched(&self, word: &[I]) -> bool {
        self.base.is_well_matched(word)
    }

    /// Returns the index of the call symbol of the procedure executing the
    /// symbol at position `idx`, or `None` if no enclosing procedure exists.
    pub fn find_call_index(&self, input: &[I], idx: usize) -> Option<usize> {
        if idx > input.len() {
            return None;
        }

        let mut balance = 0;
        for i in (0..idx).rev() {
            let sym = &input[i];
            if self.is_return(sym) {
                balance += 1;
            }
            if self.is_call(sym) {
                if balance > 0 {
                    balance -= 1;
                } else {
                    return Some(i);
                }
            }
        }
        None
    }

    /// Returns the index of the return symbol that closes the procedure
    /// about to execute the symbol at position `idx`, or `None` if the
    /// procedure is never closed.
    pub fn find_return_index(&self, input: &[I], idx: usize) -> Option<usize> {
        let mut balance = 0;
        for (i, sym) in input.iter().enumerate().skip(idx) {
            if self.is_call(sym) {
                balance += 1;
            }
            if self.is_return(sym) {
                if balance > 0 {
                    balance -= 1;
                } else {
                    return Some(i);
                }
            }
        }
        None
    }

    /// Replaces every call symbol in `input` with the call symbol followed
    /// by its terminating sequence and the return symbol, turning a
    /// procedure-local word into a well-matched global one.
    pub fn expand<F>(&self, input: &[I], terminating_sequence: F) -> Vec<I>
    where
        F: Fn(&I) -> Vec<I>,
    {
        let mut result = Vec::with_capacity(input.len());
        for sym in input {
            if self.is_call(sym) {
                result.push(sym.clone());
                result.extend(terminating_sequence(sym));
                result.push(self.return_symbol().clone());
            } else {
                result.push(sym.clone());
            }
        }
        result
    }

    /// Collapses every well-matched procedural invocation in `input`
    /// (starting the analysis at `idx`) to its single call symbol, yielding
    /// the procedure-local view of the enclosing run.
    pub fn project(&self, input: &[I], idx: usize) -> Vec<I> {
        let mut result = Vec::with_capacity(input.len().saturating_sub(idx));
        let mut i = idx;
        while i < input.len() {
            let sym = &input[i];
            result.push(sym.clone());
            if self.is_call(sym) {
                // Skip the matched invocation body, if it is closed.
                if let Some(return_idx) = self.find_return_index(input, i + 1) {
                    i = return_idx;
                }
            }
            i += 1;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alphabet() -> ProceduralAlphabet<char> {
        ProceduralAlphabet::new(vec!['S', 'T'], vec!['a', 'b', 'c'], 'R')
    }

    #[test]
    fn test_partition() {
        let alphabet = alphabet();
        assert_eq!(alphabet.size(), 6);
        assert_eq!(alphabet.num_calls(), 2);
        assert!(alphabet.is_call(&'S'));
        assert!(alphabet.is_internal(&'b'));
        assert!(alphabet.is_return(&'R'));
        assert_eq!(alphabet.kind(&'x'), None);
        assert_eq!(alphabet.vp().call_index(&'T'), 1);
        assert_eq!(alphabet.vp().internal_index(&'c'), 2);
        assert_eq!(alphabet.return_symbol(), &'R');
    }

    #[test]
    #[should_panic(expected = "Symbol occurs twice")]
    fn test_overlapping_classes() {
        VpAlphabet::new(vec!['S'], vec!['S'], vec!['R']);
    }

    #[test]
    #[should_panic(expected = "not a call symbol")]
    fn test_call_index_of_internal() {
        alphabet().vp().call_index(&'a');
    }

    #[test]
    fn test_matching() {
        let alphabet = alphabet();
        let well: Vec<char> = "SaSRaR".chars().collect();
        let extra_return: Vec<char> = "SaRR".chars().collect();
        let open_call: Vec<char> = "SaS".chars().collect();

        assert!(alphabet.is_well_matched(&well));
        assert_eq!(alphabet.vp().call_return_balance(&well), 0);

        assert!(!alphabet.is_well_matched(&extra_return));
        assert!(alphabet.vp().is_call_matched(&extra_return));
        assert!(!alphabet.vp().is_return_matched(&extra_return));

        assert!(!alphabet.is_well_matched(&open_call));
        assert!(alphabet.vp().is_return_matched(&open_call));
        assert_eq!(alphabet.vp().call_return_balance(&open_call), 2);
    }

    #[test]
    fn test_find_call_index() {
        let alphabet = alphabet();
        let word: Vec<char> = "SaSRaR".chars().collect();

        // 'a' at position 1 runs inside the outer 'S'.
        assert_eq!(alphabet.find_call_index(&word, 1), Some(0));
        // 'a' at position 4 runs inside the outer 'S' again (inner call closed).
        assert_eq!(alphabet.find_call_index(&word, 4), Some(0));
        // Nothing encloses position 0.
        assert_eq!(alphabet.find_call_index(&word, 0), None);
        // Out of range.
        assert_eq!(alphabet.find_call_index(&word, 7), None);
    }

    #[test]
    fn test_find_return_index() {
        let alphabet = alphabet();
        let word: Vec<char> = "SaSRaR".chars().collect();

        // The procedure executing position 1 is closed by the final 'R'.
        assert_eq!(alphabet.find_return_index(&word, 1), Some(5));
        // The inner 'S' at position 2 is closed at position 3.
        assert_eq!(alphabet.find_return_index(&word, 3), Some(3));
        // An unterminated procedure has no return index.
        let open: Vec<char> = "Sa".chars().collect();
        assert_eq!(alphabet.find_return_index(&open, 1), None);
    }

    #[test]
    fn test_expand() {
        let alphabet = alphabet();
        let local: Vec<char> = "aSa".chars().collect();
        let expanded = alphabet.expand(&local, |_| vec!['b']);
        assert_eq!(expanded, "aSbRa".chars().collect::<Vec<_>>());
        assert!(alphabet.is_well_matched(&expanded));
    }

    #[test]
    fn test_project() {
        let alphabet = alphabet();
        let word: Vec<char> = "SaSRaR".chars().collect();
        // Inside the outer call, the inner invocation collapses to 'S'.
        assert_eq!(alphabet.project(&word, 1), "aSaR".chars().collect::<Vec<_>>());
    }
}
