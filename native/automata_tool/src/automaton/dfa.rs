//! Deterministic Finite Automaton (DFA) implementation.

use crate::automaton::Automaton;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{SymbolId, is_epsilon, symbol_of};
use std::collections::{BTreeMap, BTreeSet};

/// A Deterministic Finite Automaton.
///
/// The transition function is partial: a missing `(state, symbol)` entry
/// sends the input to an implicit dead state.
#[derive(Debug, Clone)]
pub struct Dfa {
    /// Display name of each state, indexed by `StateId`
    names: Vec<String>,
    /// Initial state
    initial_state: StateId,
    /// Final (accepting) states
    final_states: StateSet,
    /// Transitions: (source, symbol) -> destination
    transitions: BTreeMap<(StateId, SymbolId), StateId>,
    /// All symbols of the language
    alphabet: BTreeSet<SymbolId>,
    /// Mapping from DFA states to original NFA states (if created via subset construction)
    state_mapping: Option<Vec<Vec<StateId>>>,
}

impl Dfa {
    /// Create a DFA with no states.
    pub(crate) fn new() -> Self {
        Self {
            names: Vec::new(),
            initial_state: 0,
            final_states: StateSet::default(),
            transitions: BTreeMap::new(),
            alphabet: BTreeSet::new(),
            state_mapping: None,
        }
    }

    /// Add a new named state and return its ID.
    pub(crate) fn add_state(&mut self, name: impl Into<String>) -> StateId {
        let id = self.names.len() as StateId;
        self.names.push(name.into());
        id
    }

    pub(crate) fn set_initial_state(&mut self, state: StateId) {
        self.initial_state = state;
    }

    /// Add a final (accepting) state.
    pub(crate) fn add_final_state(&mut self, state: StateId) {
        self.final_states.insert(state);
    }

    /// Add a symbol to the alphabet, even if no transition uses it.
    pub(crate) fn add_symbol(&mut self, symbol: SymbolId) {
        debug_assert!(!is_epsilon(symbol));
        self.alphabet.insert(symbol);
    }

    /// Add a transition, replacing any previous one for `(source, symbol)`.
    pub(crate) fn add_transition(
        &mut self,
        source: StateId,
        symbol: SymbolId,
        destination: StateId,
    ) {
        debug_assert!(!is_epsilon(symbol), "a DFA has no epsilon transitions");
        self.alphabet.insert(symbol);
        self.transitions.insert((source, symbol), destination);
    }

    /// Set the state mapping from original NFA states.
    pub(crate) fn set_state_mapping(&mut self, mapping: Vec<Vec<StateId>>) {
        self.state_mapping = Some(mapping);
    }

    /// Get the transition from a state on a symbol.
    pub fn transition(&self, source: StateId, symbol: SymbolId) -> Option<StateId> {
        self.transitions.get(&(source, symbol)).copied()
    }

    /// Get the number of states.
    pub fn num_states(&self) -> StateId {
        self.names.len() as StateId
    }

    /// Get the initial state.
    pub fn initial_state(&self) -> StateId {
        self.initial_state
    }

    /// Get the final states.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    /// Get the alphabet.
    pub fn alphabet(&self) -> &BTreeSet<SymbolId> {
        &self.alphabet
    }

    /// Get the NFA states each DFA state stands for, indexed by DFA state.
    pub fn state_mapping(&self) -> Option<&[Vec<StateId>]> {
        self.state_mapping.as_deref()
    }

    /// Get all transitions as an iterator, ordered by source then symbol.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        self.transitions
            .iter()
            .map(|(&(src, sym), &dst)| (src, sym, dst))
    }
}

impl Automaton for Dfa {
    fn num_states(&self) -> StateId {
        Dfa::num_states(self)
    }

    fn state_name(&self, state: StateId) -> &str {
        &self.names[state as usize]
    }

    fn initial_state(&self) -> StateId {
        self.initial_state
    }

    fn is_final(&self, state: StateId) -> bool {
        self.final_states.contains(state)
    }

    fn alphabet(&self) -> &BTreeSet<SymbolId> {
        &self.alphabet
    }

    fn edges(&self) -> Box<dyn Iterator<Item = (StateId, SymbolId, StateId)> + '_> {
        Box::new(self.transitions())
    }

    fn accepts(&self, input: &str) -> bool {
        let mut current = self.initial_state;

        for ch in input.chars() {
            let symbol = symbol_of(ch);
            if !self.alphabet.contains(&symbol) {
                return false;
            }
            match self.transition(current, symbol) {
                Some(next) => current = next,
                None => return false,
            }
        }

        self.final_states.contains(current)
    }
}
