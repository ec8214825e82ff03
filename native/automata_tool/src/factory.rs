//! High-level entry points wiring the pipeline together.

use crate::automaton::{Automaton, Dfa, Nfa, subset_construction, thompson_construction};
use crate::definition::{AutomatonDefinition, AutomatonKind};
use crate::error::Result;
use crate::regex;
use log::debug;

/// An automaton in both forms, recognizing the same language.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub nfa: Nfa,
    pub dfa: Dfa,
}

impl Compiled {
    pub fn nfa_definition(&self) -> AutomatonDefinition {
        AutomatonDefinition::from_nfa(&self.nfa)
    }

    pub fn dfa_definition(&self) -> AutomatonDefinition {
        AutomatonDefinition::from_dfa(&self.dfa)
    }

    /// Test `input` against the DFA.
    pub fn accepts(&self, input: &str) -> bool {
        self.dfa.accepts(input)
    }
}

/// Compile `pattern` to an NFA by Thompson's construction and then to a DFA
/// by subset construction.
pub fn from_regex(pattern: &str) -> Result<Compiled> {
    let ast = regex::parse(pattern)?;
    let nfa = thompson_construction(&ast);
    let dfa = subset_construction(&nfa);
    debug!(
        "compiled {pattern:?}: {} NFA states, {} DFA states",
        nfa.num_states(),
        dfa.num_states()
    );
    Ok(Compiled { nfa, dfa })
}

/// Load an explicit definition. An NFA is determinized; a DFA is paired
/// with the epsilon-free NFA that has the same edges.
pub fn from_definition(definition: &AutomatonDefinition) -> Result<Compiled> {
    let (nfa, dfa) = match definition.kind {
        AutomatonKind::Nfa => {
            let nfa = definition.to_nfa()?;
            let dfa = subset_construction(&nfa);
            (nfa, dfa)
        }
        AutomatonKind::Dfa => {
            let dfa = definition.to_dfa()?;
            (nfa_from_dfa(&dfa), dfa)
        }
    };
    Ok(Compiled { nfa, dfa })
}

/// Whether `input` is in the language of `pattern`.
pub fn is_string_accepted_by_regex(pattern: &str, input: &str) -> Result<bool> {
    Ok(from_regex(pattern)?.accepts(input))
}

/// Whether `input` is in the language of `definition`.
pub fn is_string_accepted_by_definition(
    definition: &AutomatonDefinition,
    input: &str,
) -> Result<bool> {
    Ok(from_definition(definition)?.accepts(input))
}

/// A DFA is already an NFA without epsilon edges; copy it over.
fn nfa_from_dfa(dfa: &Dfa) -> Nfa {
    let mut nfa = Nfa::new();
    for state in 0..dfa.num_states() {
        nfa.add_state(dfa.state_name(state));
    }
    for &symbol in dfa.alphabet() {
        nfa.add_symbol(symbol);
    }
    nfa.set_initial_state(dfa.initial_state());
    for state in dfa.final_states().iter() {
        nfa.add_final_state(state);
    }
    for (src, symbol, dst) in dfa.transitions() {
        nfa.add_transition(src, symbol, dst);
    }
    nfa
}
