//! The 5-tuple automaton definition used for import and export.
//!
//! A definition names its states with strings and spells epsilon as
//! [`EPSILON_SYMBOL`]. Importing checks the shape invariants the models rely
//! on; exporting is total.

use crate::automaton::{
    Automaton, Dfa, EPSILON, EPSILON_SYMBOL, Nfa, StateId, SymbolId, symbol_label, symbol_of,
};
use crate::error::{Error, Result, malformed};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

/// Which model a definition describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum AutomatonKind {
    #[serde(rename = "NFA")]
    Nfa,
    #[serde(rename = "DFA")]
    Dfa,
}

impl FromStr for AutomatonKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "NFA" => Ok(AutomatonKind::Nfa),
            "DFA" => Ok(AutomatonKind::Dfa),
            _ => Err(malformed(format!("kind must be \"NFA\" or \"DFA\", got {s:?}"))),
        }
    }
}

impl TryFrom<String> for AutomatonKind {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for AutomatonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AutomatonKind::Nfa => "NFA",
            AutomatonKind::Dfa => "DFA",
        })
    }
}

/// The target(s) of one `(state, symbol)` entry: a bare name or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Destinations {
    One(String),
    Many(Vec<String>),
}

impl Destinations {
    fn as_slice(&self) -> &[String] {
        match self {
            Destinations::One(name) => std::slice::from_ref(name),
            Destinations::Many(names) => names,
        }
    }
}

/// An automaton as a 5-tuple plus its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonDefinition {
    pub kind: AutomatonKind,
    #[serde(default)]
    pub states: BTreeSet<String>,
    #[serde(default)]
    pub alphabet: BTreeSet<String>,
    pub initial_state: String,
    #[serde(default)]
    pub final_states: BTreeSet<String>,
    #[serde(default)]
    pub transition_function: BTreeMap<String, BTreeMap<String, Destinations>>,
}

impl AutomatonDefinition {
    /// Decode a definition from JSON.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Encode the definition as indented JSON with sorted keys.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Describe `nfa`. Destination lists are sorted by state name.
    pub fn from_nfa(nfa: &Nfa) -> Self {
        let mut definition = Self::skeleton(AutomatonKind::Nfa, nfa);
        for (src, symbol, dst) in nfa.transitions() {
            let entry = definition
                .row_mut(nfa.state_name(src))
                .entry(symbol_label(symbol))
                .or_insert_with(|| Destinations::Many(Vec::new()));
            if let Destinations::Many(names) = entry {
                names.push(nfa.state_name(dst).to_string());
            }
        }
        for row in definition.transition_function.values_mut() {
            for destinations in row.values_mut() {
                if let Destinations::Many(names) = destinations {
                    names.sort();
                }
            }
        }
        definition
    }

    /// Describe `dfa`.
    pub fn from_dfa(dfa: &Dfa) -> Self {
        let mut definition = Self::skeleton(AutomatonKind::Dfa, dfa);
        for (src, symbol, dst) in dfa.transitions() {
            definition.row_mut(dfa.state_name(src)).insert(
                symbol_label(symbol),
                Destinations::One(dfa.state_name(dst).to_string()),
            );
        }
        definition
    }

    /// Everything but the edges; every state gets a (possibly empty) row.
    fn skeleton<A: Automaton>(kind: AutomatonKind, automaton: &A) -> Self {
        let names: Vec<String> = (0..automaton.num_states())
            .map(|s| automaton.state_name(s).to_string())
            .collect();
        Self {
            kind,
            states: names.iter().cloned().collect(),
            alphabet: automaton.alphabet().iter().map(|&s| symbol_label(s)).collect(),
            initial_state: automaton.state_name(automaton.initial_state()).to_string(),
            final_states: (0..automaton.num_states())
                .filter(|&s| automaton.is_final(s))
                .map(|s| automaton.state_name(s).to_string())
                .collect(),
            transition_function: names.into_iter().map(|name| (name, BTreeMap::new())).collect(),
        }
    }

    fn row_mut(&mut self, state: &str) -> &mut BTreeMap<String, Destinations> {
        self.transition_function.entry(state.to_string()).or_default()
    }

    /// Build the NFA this definition describes.
    ///
    /// The `kind` field is not consulted; a DFA-shaped table is a valid NFA.
    pub fn to_nfa(&self) -> Result<Nfa> {
        let scope = Scope::new(self)?;
        let mut nfa = Nfa::new();
        for name in &self.states {
            nfa.add_state(name.clone());
        }
        for &symbol in &scope.alphabet {
            nfa.add_symbol(symbol);
        }
        nfa.set_initial_state(scope.initial);
        for &state in &scope.finals {
            nfa.add_final_state(state);
        }

        for (src_name, row) in &self.transition_function {
            let src = scope.state(src_name, "transition source")?;
            for (symbol_name, destinations) in row {
                let symbol = scope.symbol(symbol_name, true)?;
                for dst_name in destinations.as_slice() {
                    let dst = scope.state(dst_name, "transition destination")?;
                    nfa.add_transition(src, symbol, dst);
                }
            }
        }
        Ok(nfa)
    }

    /// Build the DFA this definition describes.
    ///
    /// Each `(state, symbol)` must map to exactly one destination and no
    /// epsilon entries are allowed.
    pub fn to_dfa(&self) -> Result<Dfa> {
        let scope = Scope::new(self)?;
        let mut dfa = Dfa::new();
        for name in &self.states {
            dfa.add_state(name.clone());
        }
        for &symbol in &scope.alphabet {
            dfa.add_symbol(symbol);
        }
        dfa.set_initial_state(scope.initial);
        for &state in &scope.finals {
            dfa.add_final_state(state);
        }

        for (src_name, row) in &self.transition_function {
            let src = scope.state(src_name, "transition source")?;
            for (symbol_name, destinations) in row {
                let symbol = scope.symbol(symbol_name, false)?;
                let [dst_name] = destinations.as_slice() else {
                    return Err(malformed(format!(
                        "DFA transition ({src_name}, {symbol_name}) must have exactly one destination, found {}",
                        destinations.as_slice().len()
                    )));
                };
                let dst = scope.state(dst_name, "transition destination")?;
                dfa.add_transition(src, symbol, dst);
            }
        }
        Ok(dfa)
    }
}

/// Name resolution shared by both imports.
struct Scope<'a> {
    ids: HashMap<&'a str, StateId>,
    alphabet: BTreeSet<SymbolId>,
    initial: StateId,
    finals: Vec<StateId>,
}

impl<'a> Scope<'a> {
    fn new(definition: &'a AutomatonDefinition) -> Result<Self> {
        let ids: HashMap<&str, StateId> = definition
            .states
            .iter()
            .enumerate()
            .map(|(id, name)| (name.as_str(), id as StateId))
            .collect();

        let mut alphabet = BTreeSet::new();
        for name in &definition.alphabet {
            if name == EPSILON_SYMBOL {
                return Err(malformed(format!(
                    "the epsilon symbol {EPSILON_SYMBOL:?} cannot be part of the alphabet"
                )));
            }
            alphabet.insert(single_char(name)?);
        }

        let mut scope = Self {
            ids,
            alphabet,
            initial: 0,
            finals: Vec::new(),
        };
        scope.initial = scope.state(&definition.initial_state, "initial state")?;
        scope.finals = definition
            .final_states
            .iter()
            .map(|name| scope.state(name, "final state"))
            .collect::<Result<_>>()?;
        Ok(scope)
    }

    fn state(&self, name: &str, role: &str) -> Result<StateId> {
        self.ids
            .get(name)
            .copied()
            .ok_or_else(|| malformed(format!("{role} {name:?} is not in states")))
    }

    fn symbol(&self, name: &str, allow_epsilon: bool) -> Result<SymbolId> {
        if name == EPSILON_SYMBOL {
            return if allow_epsilon {
                Ok(EPSILON)
            } else {
                Err(malformed("a DFA cannot have epsilon transitions"))
            };
        }
        let symbol = single_char(name)?;
        if !self.alphabet.contains(&symbol) {
            return Err(malformed(format!(
                "transition symbol {name:?} is not in the alphabet"
            )));
        }
        Ok(symbol)
    }
}

fn single_char(name: &str) -> Result<SymbolId> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(symbol_of(ch)),
        _ => Err(malformed(format!(
            "symbol {name:?} must be exactly one character"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON_LOOP: &str = r#"{
        "kind": "nfa",
        "states": ["p", "q"],
        "alphabet": ["a"],
        "initial_state": "p",
        "final_states": ["p"],
        "transition_function": {
            "p": {"ε": ["q"]},
            "q": {"ε": ["p"]}
        }
    }"#;

    fn dfa_json(transitions: &str) -> String {
        format!(
            r#"{{
                "kind": "DFA",
                "states": ["s", "t"],
                "alphabet": ["0", "1"],
                "initial_state": "s",
                "final_states": ["t"],
                "transition_function": {transitions}
            }}"#
        )
    }

    fn malformed_message(result: Result<impl fmt::Debug>) -> String {
        match result {
            Err(Error::MalformedDefinition(message)) => message,
            other => panic!("expected a malformed definition, got {other:?}"),
        }
    }

    #[test]
    fn test_kind_is_case_insensitive() {
        let definition = AutomatonDefinition::from_json(EPSILON_LOOP).unwrap();
        assert_eq!(definition.kind, AutomatonKind::Nfa);
        assert!(definition.to_json_pretty().unwrap().contains("\"NFA\""));
        assert!(AutomatonDefinition::from_json(&EPSILON_LOOP.replace("nfa", "PDA")).is_err());
    }

    #[test]
    fn test_epsilon_loop_nfa() {
        let nfa = AutomatonDefinition::from_json(EPSILON_LOOP)
            .unwrap()
            .to_nfa()
            .unwrap();
        assert_eq!(nfa.num_states(), 2);
        assert!(nfa.accepts(""));
        assert!(!nfa.accepts("a"));
        assert!(!nfa.accepts("aa"));
    }

    #[test]
    fn test_dfa_import_accepts_single_or_list() {
        let json = dfa_json(r#"{"s": {"0": "s", "1": ["t"]}, "t": {}}"#);
        let dfa = AutomatonDefinition::from_json(&json).unwrap().to_dfa().unwrap();
        assert!(dfa.accepts("001"));
        assert!(!dfa.accepts("10"));
        assert!(!dfa.accepts(""));
    }

    #[test]
    fn test_dfa_rejects_epsilon() {
        let json = dfa_json(r#"{"s": {"ε": "t"}}"#);
        let message =
            malformed_message(AutomatonDefinition::from_json(&json).unwrap().to_dfa());
        assert!(message.contains("epsilon"));
    }

    #[test]
    fn test_dfa_rejects_multiple_or_zero_destinations() {
        for table in [r#"{"s": {"0": ["s", "t"]}}"#, r#"{"s": {"0": []}}"#] {
            let json = dfa_json(table);
            let message =
                malformed_message(AutomatonDefinition::from_json(&json).unwrap().to_dfa());
            assert!(message.contains("exactly one destination"), "{message}");
        }
    }

    #[test]
    fn test_nfa_allows_empty_and_multiple_destinations() {
        let json = dfa_json(r#"{"s": {"0": [], "1": ["s", "t"]}}"#).replace("DFA", "NFA");
        let nfa = AutomatonDefinition::from_json(&json).unwrap().to_nfa().unwrap();
        assert!(nfa.accepts("1"));
        assert!(nfa.accepts("11"));
        assert!(!nfa.accepts("0"));
    }

    #[test]
    fn test_unknown_states_are_rejected() {
        for (json, needle) in [
            (dfa_json(r#"{"u": {"0": "s"}}"#), "transition source"),
            (dfa_json(r#"{"s": {"0": "u"}}"#), "transition destination"),
            (
                dfa_json("{}").replace(r#""initial_state": "s""#, r#""initial_state": "u""#),
                "initial state",
            ),
            (dfa_json("{}").replace(r#"["t"]"#, r#"["u"]"#), "final state"),
        ] {
            let definition = AutomatonDefinition::from_json(&json).unwrap();
            let message = malformed_message(definition.to_dfa());
            assert!(message.contains(needle), "{message}");
        }
    }

    #[test]
    fn test_bad_symbols_are_rejected() {
        let long = dfa_json(r#"{"s": {"01": "t"}}"#);
        let foreign = dfa_json(r#"{"s": {"2": "t"}}"#);
        let eps_alphabet = dfa_json("{}").replace(r#"["0", "1"]"#, r#"["0", "ε"]"#);
        for json in [long, foreign, eps_alphabet] {
            let definition = AutomatonDefinition::from_json(&json).unwrap();
            malformed_message(definition.to_nfa());
        }
    }

    #[test]
    fn test_missing_initial_state_is_a_json_error() {
        let json = r#"{"kind": "NFA", "states": ["p"]}"#;
        assert!(matches!(
            AutomatonDefinition::from_json(json),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_export_lists_every_state() {
        let definition = AutomatonDefinition::from_json(EPSILON_LOOP).unwrap();
        let exported = AutomatonDefinition::from_nfa(&definition.to_nfa().unwrap());
        assert_eq!(exported, definition);
    }

    #[test]
    fn test_dfa_export_uses_single_names() {
        let json = dfa_json(r#"{"s": {"0": ["t"]}}"#);
        let dfa = AutomatonDefinition::from_json(&json).unwrap().to_dfa().unwrap();
        let exported = AutomatonDefinition::from_dfa(&dfa);
        assert_eq!(
            exported.transition_function["s"]["0"],
            Destinations::One("t".to_string())
        );
        assert!(exported.transition_function["t"].is_empty());
        assert_eq!(exported.final_states, BTreeSet::from(["t".to_string()]));
    }
}
