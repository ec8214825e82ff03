//! Subset construction algorithm for converting ε-NFA to DFA.

use crate::automaton::dfa::Dfa;
use crate::automaton::nfa::Nfa;
use crate::automaton::state::{StateId, StateSet};
use indexmap::IndexMap;
use log::{debug, trace};
use std::collections::VecDeque;

type Worklist = VecDeque<(StateId, StateSet)>;

/// Convert an epsilon-NFA to a DFA using the powerset construction algorithm.
///
/// Subsets are explored breadth-first and named `D0, D1, …` in discovery
/// order. Symbols are tried in ascending order, so the same NFA always
/// yields the same DFA, names included.
pub fn subset_construction(nfa: &Nfa) -> Dfa {
    // Each DFA state corresponds to a set of NFA states; the map's
    // insertion order is the discovery order.
    let mut state_mapping: IndexMap<Vec<StateId>, StateId> = IndexMap::new();
    let mut dfa = Dfa::new();
    for &symbol in nfa.alphabet() {
        dfa.add_symbol(symbol);
    }

    // Queue of DFA states to process (as NFA state sets)
    let mut worklist: Worklist = VecDeque::new();

    // Name `set` on first sight and queue it; later sightings reuse the name.
    let mut discover = |dfa: &mut Dfa, set: StateSet, worklist: &mut Worklist| {
        let key = set.to_vec();
        if let Some(&existing) = state_mapping.get(&key) {
            return existing;
        }
        let state = dfa.add_state(format!("D{}", state_mapping.len()));
        trace!("D{state} = {set:?}");
        if set.intersects(nfa.final_states()) {
            dfa.add_final_state(state);
        }
        state_mapping.insert(key, state);
        worklist.push_back((state, set));
        state
    };

    // Initial DFA state is the epsilon closure of the NFA initial state
    let initial_set = nfa.epsilon_closure(&StateSet::singleton(
        nfa.initial_state(),
        nfa.num_states() as usize,
    ));
    let initial = discover(&mut dfa, initial_set, &mut worklist);
    dfa.set_initial_state(initial);

    while let Some((current, current_set)) = worklist.pop_front() {
        for &symbol in nfa.alphabet() {
            let next_set = nfa.epsilon_closure(&nfa.move_on_symbol(&current_set, symbol));

            if next_set.is_empty() {
                // No transition on this symbol - skip (DFA will have no transition)
                continue;
            }

            let next = discover(&mut dfa, next_set, &mut worklist);
            dfa.add_transition(current, symbol, next);
        }
    }

    // Store the NFA-to-DFA state mapping in the DFA for later use
    dfa.set_state_mapping(state_mapping.into_keys().collect());

    debug!(
        "subset construction: {} NFA states -> {} DFA states",
        nfa.num_states(),
        dfa.num_states()
    );
    dfa
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::Automaton;
    use crate::automaton::symbol::symbol_of;
    use crate::automaton::thompson_construction;
    use crate::regex::parse;

    fn nfa_of(pattern: &str) -> Nfa {
        thompson_construction(&parse(pattern).unwrap())
    }

    #[test]
    fn test_subset_construction_basic() {
        // NFA: 0 -a-> 1, 0 -a-> 2, 1 -b-> 3(final), 2 -b-> 3(final)
        let mut nfa = Nfa::new();
        for name in ["p", "q", "r", "s"] {
            nfa.add_state(name);
        }
        let (a, b) = (symbol_of('a'), symbol_of('b'));
        nfa.add_transition(0, a, 1);
        nfa.add_transition(0, a, 2);
        nfa.add_transition(1, b, 3);
        nfa.add_transition(2, b, 3);
        nfa.set_initial_state(0);
        nfa.add_final_state(3);

        let dfa = subset_construction(&nfa);

        assert_eq!(dfa.num_states(), 3);
        assert_eq!(dfa.transition(0, a), Some(1));
        assert_eq!(dfa.transition(1, b), Some(2));
        assert_eq!(dfa.final_states().to_vec(), vec![2]);
        assert_eq!(
            dfa.state_mapping().unwrap(),
            &[vec![0], vec![1, 2], vec![3]]
        );
    }

    #[test]
    fn test_subset_construction_with_epsilon() {
        // NFA: 0 -ε-> 1 -a-> 2(final)
        let mut nfa = Nfa::new();
        for name in ["x", "y", "z"] {
            nfa.add_state(name);
        }
        nfa.add_epsilon_transition(0, 1);
        nfa.add_transition(1, symbol_of('a'), 2);
        nfa.set_initial_state(0);
        nfa.add_final_state(2);

        let dfa = subset_construction(&nfa);

        // Initial DFA state is {0, 1}, the epsilon closure of {0}
        assert_eq!(dfa.state_mapping().unwrap()[0], vec![0, 1]);
        assert!(dfa.accepts("a"));
        assert!(!dfa.accepts(""));
    }

    #[test]
    fn test_names_follow_breadth_first_discovery() {
        let dfa = subset_construction(&nfa_of("a|bc"));
        let names: Vec<&str> = (0..dfa.num_states()).map(|s| dfa.state_name(s)).collect();
        assert_eq!(names, vec!["D0", "D1", "D2", "D3"]);
        // D0 discovers the 'a' successor before the 'b' successor.
        assert_eq!(dfa.transition(0, symbol_of('a')), Some(1));
        assert_eq!(dfa.transition(0, symbol_of('b')), Some(2));
        assert_eq!(dfa.transition(2, symbol_of('c')), Some(3));
    }

    #[test]
    fn test_deterministic_across_runs() {
        let nfa = nfa_of("(a|b)*abb");
        let first = subset_construction(&nfa);
        let second = subset_construction(&nfa);
        assert_eq!(
            first.transitions().collect::<Vec<_>>(),
            second.transitions().collect::<Vec<_>>()
        );
        assert_eq!(first.final_states(), second.final_states());
    }

    #[test]
    fn test_subset_count_is_bounded() {
        let nfa = nfa_of("(a|b)*a(a|b)(a|b)");
        let dfa = subset_construction(&nfa);
        assert!(u64::from(dfa.num_states()) <= 1u64 << nfa.num_states().min(63));
        assert_eq!(dfa.alphabet(), nfa.alphabet());
    }

    #[test]
    fn test_final_iff_subset_has_final() {
        let nfa = nfa_of("a*b?");
        let dfa = subset_construction(&nfa);
        let mapping = dfa.state_mapping().unwrap();
        for state in 0..dfa.num_states() {
            let has_final = mapping[state as usize]
                .iter()
                .any(|s| nfa.final_states().contains(*s));
            assert_eq!(dfa.is_final(state), has_final);
        }
    }
}
