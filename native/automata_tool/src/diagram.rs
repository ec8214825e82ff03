//! Graphviz DOT rendering of automata.

use crate::automaton::{Automaton, symbol_label};
use log::debug;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::{fs, io};

/// Render `automaton` as a left-to-right DOT digraph. Final states are drawn
/// as double circles and an invisible `__start__` node points at the
/// initial state.
pub fn to_dot<A: Automaton + ?Sized>(automaton: &A, name: &str) -> String {
    let mut out = String::new();
    write_dot(&mut out, automaton, name).expect("writing to a String cannot fail");
    out
}

fn write_dot<A: Automaton + ?Sized>(
    out: &mut String,
    automaton: &A,
    name: &str,
) -> std::fmt::Result {
    writeln!(out, "digraph {} {{", quote(name))?;
    writeln!(out, "  rankdir=LR;")?;
    writeln!(out, "  node [shape=circle];")?;
    writeln!(out, "  \"__start__\" [shape=point];")?;

    for state in 0..automaton.num_states() {
        let shape = if automaton.is_final(state) {
            "doublecircle"
        } else {
            "circle"
        };
        writeln!(out, "  {} [shape={shape}];", quote(automaton.state_name(state)))?;
    }

    if automaton.num_states() > 0 {
        let initial = automaton.state_name(automaton.initial_state());
        writeln!(out, "  \"__start__\" -> {};", quote(initial))?;
    }

    for (src, symbol, dst) in automaton.edges() {
        writeln!(
            out,
            "  {} -> {} [label={}];",
            quote(automaton.state_name(src)),
            quote(automaton.state_name(dst)),
            quote(&symbol_label(symbol))
        )?;
    }

    writeln!(out, "}}")
}

fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Write the DOT rendering to `<base>.dot`, creating parent directories.
/// Returns the path written.
pub fn save_dot<A: Automaton + ?Sized>(
    automaton: &A,
    base: &Path,
    name: &str,
) -> io::Result<PathBuf> {
    let mut path = base.as_os_str().to_owned();
    path.push(".dot");
    let path = PathBuf::from(path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, to_dot(automaton, name))?;
    debug!("wrote {} diagram to {}", name, path.display());
    Ok(path)
}
