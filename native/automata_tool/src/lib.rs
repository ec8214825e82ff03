//! Compile regular expressions, or explicit 5-tuple definitions, into
//! equivalent NFAs and DFAs and test strings against them.
//!
//! The pipeline is: pattern text → [`regex::Token`]s → [`regex::Ast`] →
//! [`Nfa`] (Thompson's construction) → [`Dfa`] (subset construction).
//!
//! ```
//! use automata_tool::{Automaton, from_regex};
//!
//! let compiled = from_regex("(ab)?c").unwrap();
//! assert!(compiled.dfa.accepts("abc"));
//! assert!(!compiled.nfa.accepts("ab"));
//! ```

pub mod automaton;
pub mod definition;
pub mod diagram;
pub mod error;
pub mod factory;
pub mod regex;

pub use automaton::{
    Automaton, Dfa, EPSILON, EPSILON_SYMBOL, Nfa, StateId, StateSet, SymbolId, accepts,
    subset_construction, thompson_construction,
};
pub use definition::{AutomatonDefinition, AutomatonKind, Destinations};
pub use error::{Error, ParseErrorKind, Result};
pub use factory::{
    Compiled, from_definition, from_regex, is_string_accepted_by_definition,
    is_string_accepted_by_regex,
};
