//! Finite automata and the algorithms that build them.
//!
//! This module provides epsilon-NFA and DFA implementations with:
//! - Epsilon closure computation
//! - Thompson's construction (regex syntax tree to NFA)
//! - Subset construction (NFA to DFA conversion)

mod dfa;
mod nfa;
mod state;
mod subset_construction;
mod symbol;
mod thompson;

use std::collections::BTreeSet;

pub use dfa::Dfa;
pub use nfa::Nfa;
pub use state::{StateId, StateSet};
pub use subset_construction::subset_construction;
pub use symbol::{EPSILON, EPSILON_SYMBOL, SymbolId, char_of, is_epsilon, symbol_label, symbol_of};
pub use thompson::thompson_construction;

/// The read-only surface shared by [`Nfa`] and [`Dfa`].
pub trait Automaton {
    /// Get the number of states; valid ids are `0..num_states()`.
    fn num_states(&self) -> StateId;

    /// Get the display name of `state`.
    ///
    /// # Panics
    ///
    /// Panics if `state` is not a state of this automaton.
    fn state_name(&self, state: StateId) -> &str;

    fn initial_state(&self) -> StateId;

    fn is_final(&self, state: StateId) -> bool;

    /// Get the alphabet, excluding epsilon.
    fn alphabet(&self) -> &BTreeSet<SymbolId>;

    /// Every edge as `(source, symbol, destination)`, ordered by source then
    /// symbol. Epsilon edges carry `EPSILON`.
    fn edges(&self) -> Box<dyn Iterator<Item = (StateId, SymbolId, StateId)> + '_>;

    /// Whether `input` is in the language. Symbols outside the alphabet and
    /// missing transitions reject; this never fails.
    fn accepts(&self, input: &str) -> bool;
}

/// Test `input` against any automaton.
pub fn accepts<A: Automaton + ?Sized>(automaton: &A, input: &str) -> bool {
    automaton.accepts(input)
}
