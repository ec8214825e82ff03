//! Thompson's construction: regex syntax tree to ε-NFA.

use crate::automaton::nfa::Nfa;
use crate::automaton::state::StateId;
use crate::automaton::symbol::symbol_of;
use crate::regex::Ast;
use log::debug;

/// A sub-automaton under construction with one entry and one exit state.
/// Its edges live in the session's shared table.
#[derive(Debug, Clone, Copy)]
struct Fragment {
    start: StateId,
    end: StateId,
}

/// Pending work for [`Compiler::build`]. `Enter` visits a node; the others
/// combine the fragments its children left on the stack.
enum Step<'a> {
    Enter(&'a Ast),
    Concat,
    Union,
    Star,
    Plus,
    Optional,
}

fn pop_one(built: &mut Vec<Fragment>) -> Fragment {
    built.pop().expect("every operator follows its operands")
}

fn pop_pair(built: &mut Vec<Fragment>) -> (Fragment, Fragment) {
    let right = pop_one(built);
    let left = pop_one(built);
    (left, right)
}

/// One compilation. Owns the state counter and the transition table, so
/// separate builds never share state.
struct Compiler {
    nfa: Nfa,
}

impl Compiler {
    fn new() -> Self {
        Self { nfa: Nfa::new() }
    }

    fn new_state(&mut self) -> StateId {
        let id = self.nfa.num_states();
        self.nfa.add_state(format!("q{id}"))
    }

    /// Allocate a fresh `(start, end)` pair around an already built child.
    fn wrap(&mut self) -> Fragment {
        let start = self.new_state();
        let end = self.new_state();
        Fragment { start, end }
    }

    /// Build `root` bottom-up. Children are built left to right before their
    /// parent allocates its own states, so numbering matches a recursive walk
    /// while the call depth stays constant.
    fn build(&mut self, root: &Ast) -> Fragment {
        let mut work = vec![Step::Enter(root)];
        let mut built: Vec<Fragment> = Vec::new();

        while let Some(step) = work.pop() {
            let frag = match step {
                Step::Enter(node) => {
                    match node {
                        Ast::Literal(ch) => {
                            let frag = self.wrap();
                            self.nfa.add_transition(frag.start, symbol_of(*ch), frag.end);
                            built.push(frag);
                        }
                        Ast::Concat(left, right) => work.extend([
                            Step::Concat,
                            Step::Enter(right),
                            Step::Enter(left),
                        ]),
                        Ast::Union(left, right) => work.extend([
                            Step::Union,
                            Step::Enter(right),
                            Step::Enter(left),
                        ]),
                        Ast::Star(child) => work.extend([Step::Star, Step::Enter(child)]),
                        Ast::Plus(child) => work.extend([Step::Plus, Step::Enter(child)]),
                        Ast::Optional(child) => {
                            work.extend([Step::Optional, Step::Enter(child)])
                        }
                    }
                    continue;
                }
                Step::Concat => {
                    let (left, right) = pop_pair(&mut built);
                    self.nfa.add_epsilon_transition(left.end, right.start);
                    Fragment {
                        start: left.start,
                        end: right.end,
                    }
                }
                Step::Union => {
                    let (left, right) = pop_pair(&mut built);
                    let frag = self.wrap();
                    self.nfa.add_epsilon_transition(frag.start, left.start);
                    self.nfa.add_epsilon_transition(frag.start, right.start);
                    self.nfa.add_epsilon_transition(left.end, frag.end);
                    self.nfa.add_epsilon_transition(right.end, frag.end);
                    frag
                }
                Step::Star => {
                    let inner = pop_one(&mut built);
                    let frag = self.wrap();
                    self.nfa.add_epsilon_transition(frag.start, inner.start);
                    self.nfa.add_epsilon_transition(frag.start, frag.end);
                    self.nfa.add_epsilon_transition(inner.end, inner.start);
                    self.nfa.add_epsilon_transition(inner.end, frag.end);
                    frag
                }
                Step::Plus => {
                    // Like star, but without the edge that skips the child.
                    let inner = pop_one(&mut built);
                    let frag = self.wrap();
                    self.nfa.add_epsilon_transition(frag.start, inner.start);
                    self.nfa.add_epsilon_transition(inner.end, inner.start);
                    self.nfa.add_epsilon_transition(inner.end, frag.end);
                    frag
                }
                Step::Optional => {
                    let inner = pop_one(&mut built);
                    let frag = self.wrap();
                    self.nfa.add_epsilon_transition(frag.start, inner.start);
                    self.nfa.add_epsilon_transition(frag.start, frag.end);
                    self.nfa.add_epsilon_transition(inner.end, frag.end);
                    frag
                }
            };
            built.push(frag);
        }

        pop_one(&mut built)
    }

    fn finish(mut self, frag: Fragment) -> Nfa {
        self.nfa.set_initial_state(frag.start);
        self.nfa.add_final_state(frag.end);
        self.nfa
    }
}

/// Compile a syntax tree into an ε-NFA with exactly one initial and one final
/// state. States are named `q0, q1, …` in allocation order.
pub fn thompson_construction(root: &Ast) -> Nfa {
    let mut compiler = Compiler::new();
    let frag = compiler.build(root);
    let nfa = compiler.finish(frag);
    debug!(
        "thompson construction: {} states, {} symbols",
        nfa.num_states(),
        nfa.alphabet().len()
    );
    nfa
}
