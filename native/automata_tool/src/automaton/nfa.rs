//! Epsilon Non-deterministic Finite Automaton (ε-NFA) implementation.

use crate::automaton::Automaton;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{EPSILON, SymbolId, is_epsilon, symbol_of};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

/// An Epsilon Non-deterministic Finite Automaton.
///
/// States are numbered `0..num_states()`; every state has a (possibly
/// empty) row in the transition table. Once built the automaton is
/// read-only, so it can be shared between threads freely.
#[derive(Debug, Clone)]
pub struct Nfa {
    /// Display name of each state, indexed by `StateId`
    names: Vec<String>,
    /// Initial state
    initial_state: StateId,
    /// Final (accepting) states
    final_states: StateSet,
    /// Transitions: (source, symbol) -> set of destination states
    /// For epsilon transitions, symbol == EPSILON
    transitions: BTreeMap<(StateId, SymbolId), BTreeSet<StateId>>,
    /// All symbols of the language (excluding epsilon)
    alphabet: BTreeSet<SymbolId>,
    /// Cached epsilon closures for each state, as sorted state lists
    epsilon_closures: OnceLock<Vec<Vec<StateId>>>,
}

impl Nfa {
    /// Create an NFA with no states.
    pub(crate) fn new() -> Self {
        Self {
            names: Vec::new(),
            initial_state: 0,
            final_states: StateSet::default(),
            transitions: BTreeMap::new(),
            alphabet: BTreeSet::new(),
            epsilon_closures: OnceLock::new(),
        }
    }

    /// Add a named state and return its ID.
    pub(crate) fn add_state(&mut self, name: impl Into<String>) -> StateId {
        let id = self.names.len() as StateId;
        self.names.push(name.into());
        self.epsilon_closures = OnceLock::new();
        id
    }

    /// Add a symbol to the alphabet, even if no transition uses it.
    pub(crate) fn add_symbol(&mut self, symbol: SymbolId) {
        debug_assert!(!is_epsilon(symbol));
        self.alphabet.insert(symbol);
    }

    /// Add a transition from source to destination on the given symbol.
    pub(crate) fn add_transition(
        &mut self,
        source: StateId,
        symbol: SymbolId,
        destination: StateId,
    ) {
        debug_assert!((source as usize) < self.names.len());
        debug_assert!((destination as usize) < self.names.len());

        if !is_epsilon(symbol) {
            self.alphabet.insert(symbol);
        }

        self.transitions
            .entry((source, symbol))
            .or_default()
            .insert(destination);

        // Invalidate cached epsilon closures
        self.epsilon_closures = OnceLock::new();
    }

    /// Add an epsilon transition from source to destination.
    pub(crate) fn add_epsilon_transition(&mut self, source: StateId, destination: StateId) {
        self.add_transition(source, EPSILON, destination);
    }

    pub(crate) fn set_initial_state(&mut self, state: StateId) {
        self.initial_state = state;
    }

    /// Add a final (accepting) state.
    pub(crate) fn add_final_state(&mut self, state: StateId) {
        self.final_states.insert(state);
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

    /// Get the alphabet (all symbols except epsilon).
    pub fn alphabet(&self) -> &BTreeSet<SymbolId> {
        &self.alphabet
    }

    /// Get the destinations of `source` on `symbol` (which may be `EPSILON`).
    pub fn destinations(
        &self,
        source: StateId,
        symbol: SymbolId,
    ) -> Option<&BTreeSet<StateId>> {
        self.transitions.get(&(source, symbol))
    }

    /// Compute the epsilon closure of every state using DFS.
    ///
    /// One scratch set serves every search; it is cleared through the
    /// closure list rather than wholesale.
    fn compute_epsilon_closures(&self) -> Vec<Vec<StateId>> {
        let mut seen = StateSet::with_capacity(self.names.len());
        let mut closures = Vec::with_capacity(self.names.len());

        for state in 0..self.num_states() {
            let mut closure = Vec::new();
            let mut stack = vec![state];

            while let Some(s) = stack.pop() {
                if seen.contains(s) {
                    continue;
                }
                seen.insert(s);
                closure.push(s);

                // Follow epsilon transitions
                if let Some(destinations) = self.destinations(s, EPSILON) {
                    stack.extend(destinations.iter().filter(|&&dest| !seen.contains(dest)));
                }
            }

            for &s in &closure {
                seen.remove(s);
            }
            closure.sort_unstable();
            closures.push(closure);
        }

        closures
    }

    /// Get the epsilon closure of a set of states: every state reachable
    /// from `states` using only epsilon transitions, `states` included.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let cached = self
            .epsilon_closures
            .get_or_init(|| self.compute_epsilon_closures());
        let mut closure = StateSet::with_capacity(self.names.len());

        for state in states.iter() {
            match cached.get(state as usize) {
                Some(reachable) => closure.extend(reachable.iter().copied()),
                // Not one of ours; it has no outgoing edges.
                None => closure.insert(state),
            }
        }

        closure
    }

    /// Get the states reachable from a set of states by one edge labeled
    /// `symbol`. Epsilon edges are not followed.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: SymbolId) -> StateSet {
        assert!(!is_epsilon(symbol), "Use epsilon_closure for epsilon moves");

        let mut reached = StateSet::with_capacity(self.names.len());

        for state in states.iter() {
            if let Some(destinations) = self.destinations(state, symbol) {
                reached.extend(destinations.iter().copied());
            }
        }

        reached
    }

    /// Get all transitions as an iterator, ordered by source then symbol.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(src, sym), dests)| dests.iter().map(move |&dst| (src, sym, dst)))
    }
}

impl Automaton for Nfa {
    fn num_states(&self) -> StateId {
        Nfa::num_states(self)
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

    /// Simulate the NFA on `input`, tracking the set of live states.
    fn accepts(&self, input: &str) -> bool {
        let mut current =
            self.epsilon_closure(&StateSet::singleton(self.initial_state, self.names.len()));

        for ch in input.chars() {
            let symbol = symbol_of(ch);
            if !self.alphabet.contains(&symbol) {
                return false;
            }
            current = self.epsilon_closure(&self.move_on_symbol(&current, symbol));
            if current.is_empty() {
                return false;
            }
        }

        current.intersects(&self.final_states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build an NFA with states named `s0..sN`.
    fn with_states(n: u32) -> Nfa {
        let mut nfa = Nfa::new();
        for i in 0..n {
            nfa.add_state(format!("s{i}"));
        }
        nfa
    }

    #[test]
    fn test_epsilon_nfa_basic() {
        let mut nfa = with_states(3);

        // 0 -a-> 1 -ε-> 2 (final)
        nfa.add_transition(0, symbol_of('a'), 1);
        nfa.add_epsilon_transition(1, 2);
        nfa.set_initial_state(0);
        nfa.add_final_state(2);

        assert_eq!(nfa.num_states(), 3);
        assert_eq!(nfa.alphabet().len(), 1);
        assert!(nfa.accepts("a"));
        assert!(!nfa.accepts(""));
        assert!(!nfa.accepts("aa"));
    }

    #[test]
    fn test_epsilon_closure() {
        let mut nfa = with_states(4);

        // 0 -ε-> 1 -ε-> 2, 3 unreachable
        nfa.add_epsilon_transition(0, 1);
        nfa.add_epsilon_transition(1, 2);

        let start = StateSet::singleton(0, 4);
        let closure = nfa.epsilon_closure(&start);

        assert_eq!(closure.to_vec(), vec![0, 1, 2]);
        assert_eq!(nfa.epsilon_closure(&StateSet::singleton(3, 4)).to_vec(), vec![3]);
    }

    #[test]
    fn test_epsilon_closure_with_cycle() {
        let mut nfa = with_states(3);
        nfa.add_epsilon_transition(0, 1);
        nfa.add_epsilon_transition(1, 0);
        nfa.add_epsilon_transition(1, 2);

        let closure = nfa.epsilon_closure(&StateSet::singleton(1, 3));
        assert_eq!(closure.to_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn test_move_on_symbol() {
        let mut nfa = with_states(4);

        // 0 -a-> 1, 0 -a-> 2, 1 -ε-> 3
        let a = symbol_of('a');
        nfa.add_transition(0, a, 1);
        nfa.add_transition(0, a, 2);
        nfa.add_epsilon_transition(1, 3);

        let start = StateSet::singleton(0, 4);
        let reached = nfa.move_on_symbol(&start, a);

        // Epsilon edges are not part of a move.
        assert_eq!(reached.to_vec(), vec![1, 2]);
        assert_eq!(nfa.epsilon_closure(&reached).to_vec(), vec![1, 2, 3]);
        assert!(nfa.move_on_symbol(&start, symbol_of('b')).is_empty());
    }

    #[test]
    fn test_rejects_foreign_symbol_immediately() {
        let mut nfa = with_states(2);
        nfa.add_transition(0, symbol_of('a'), 1);
        nfa.add_transition(1, symbol_of('a'), 1);
        nfa.add_final_state(1);

        assert!(nfa.accepts("aaa"));
        assert!(!nfa.accepts("aXa"));
    }

    #[test]
    fn test_epsilon_loop_accepts_only_empty() {
        let mut nfa = with_states(2);
        nfa.add_epsilon_transition(0, 1);
        nfa.add_epsilon_transition(1, 0);
        nfa.add_final_state(0);

        assert!(nfa.accepts(""));
        assert!(!nfa.accepts("a"));
    }
}
