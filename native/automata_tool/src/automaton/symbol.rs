//! Symbol types for automata transitions.

/// A symbol identifier: the code point of an input `char`.
/// The special value `EPSILON` represents an epsilon (empty) transition.
pub type SymbolId = u32;

/// Special symbol ID representing epsilon (empty) transitions.
/// `u32::MAX` lies outside the `char` range, so it never collides with input.
pub const EPSILON: SymbolId = u32::MAX;

/// Textual form of `EPSILON` in definitions and diagrams.
pub const EPSILON_SYMBOL: &str = "ε";

/// Check if a symbol is an epsilon transition.
#[inline]
pub fn is_epsilon(symbol: SymbolId) -> bool {
    symbol == EPSILON
}

/// The symbol consumed by the input character `ch`.
#[inline]
pub fn symbol_of(ch: char) -> SymbolId {
    ch as SymbolId
}

/// The input character for `symbol`, or `None` for `EPSILON`.
#[inline]
pub fn char_of(symbol: SymbolId) -> Option<char> {
    char::from_u32(symbol)
}

/// Render a symbol the way definitions and diagrams spell it.
pub fn symbol_label(symbol: SymbolId) -> String {
    match char_of(symbol) {
        Some(ch) => ch.to_string(),
        None => EPSILON_SYMBOL.to_string(),
    }
}
