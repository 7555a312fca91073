//! Definition diagnostics.
//!
//! Construction accepts any combination of labels. `lint` reports the
//! combinations that will make queries fail or never match, so a loader or
//! shell can warn before the first word is tested. None of these block
//! evaluation.

use crate::automaton::Automaton;
use crate::label::{State, Symbol};
use std::fmt;

/// How much a lint matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// The automaton is usable but partial.
    Note,
    /// Some labels can never be reached or matched as written.
    Warning,
}

/// A single diagnostic about an automaton definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lint {
    UnknownInitialState(State),
    UnknownAcceptingState(State),
    UnknownSourceState { from: State, symbol: Symbol },
    UnknownTargetState { from: State, symbol: Symbol, to: State },
    SymbolOutsideAlphabet { from: State, symbol: Symbol },
    MissingTransition { state: State, symbol: Symbol },
}

impl Lint {
    pub fn severity(&self) -> Severity {
        match self {
            Lint::MissingTransition { .. } => Severity::Note,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for Lint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lint::UnknownInitialState(state) => {
                write!(f, "initial state '{}' is not in the state list", state)
            }
            Lint::UnknownAcceptingState(state) => {
                write!(f, "accepting state '{}' is not in the state list", state)
            }
            Lint::UnknownSourceState { from, symbol } => write!(
                f,
                "transition δ({}, {}) starts from an undeclared state",
                from, symbol
            ),
            Lint::UnknownTargetState { from, symbol, to } => write!(
                f,
                "transition δ({}, {}) = {} targets an undeclared state",
                from, symbol, to
            ),
            Lint::SymbolOutsideAlphabet { from, symbol } => write!(
                f,
                "transition δ({}, {}) uses a symbol outside the alphabet and can never fire",
                from, symbol
            ),
            Lint::MissingTransition { state, symbol } => {
                write!(f, "no transition for δ({}, {})", state, symbol)
            }
        }
    }
}

/// Collects every diagnostic for `automaton`, warnings first.
pub fn lint(automaton: &Automaton) -> Vec<Lint> {
    let mut lints = Vec::new();
    let states = automaton.states();
    let alphabet = automaton.alphabet();

    if !states.contains(automaton.initial_state()) {
        lints.push(Lint::UnknownInitialState(automaton.initial_state().clone()));
    }

    for state in automaton.accepting_states() {
        if !states.contains(state) {
            lints.push(Lint::UnknownAcceptingState(state.clone()));
        }
    }

    for (from, symbol, to) in automaton.transitions() {
        if !states.contains(from) {
            lints.push(Lint::UnknownSourceState {
                from: from.clone(),
                symbol: symbol.clone(),
            });
        }
        if !alphabet.contains(symbol) {
            lints.push(Lint::SymbolOutsideAlphabet {
                from: from.clone(),
                symbol: symbol.clone(),
            });
        }
        if !states.contains(to) {
            lints.push(Lint::UnknownTargetState {
                from: from.clone(),
                symbol: symbol.clone(),
                to: to.clone(),
            });
        }
    }

    for state in states {
        for symbol in alphabet {
            if automaton.step(state, symbol).is_none() {
                lints.push(Lint::MissingTransition {
                    state: state.clone(),
                    symbol: symbol.clone(),
                });
            }
        }
    }

    lints.sort_by_key(|l| std::cmp::Reverse(l.severity()));
    lints
}

/// Returns true if every declared `(state, symbol)` pair has a transition.
pub fn is_complete(automaton: &Automaton) -> bool {
    automaton.states().iter().all(|state| {
        automaton
            .alphabet()
            .iter()
            .all(|symbol| automaton.step(state, symbol).is_some())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::TransitionSpec;

    #[test]
    fn test_clean_automaton_has_no_lints() {
        let afd = Automaton::new(
            ["a", "b"],
            ["0"],
            "a",
            ["b"],
            TransitionSpec::from_triples([("a", "0", "b"), ("b", "0", "a")]),
        );
        assert!(lint(&afd).is_empty());
        assert!(is_complete(&afd));
    }

    #[test]
    fn test_reports_dangling_labels() {
        let afd = Automaton::new(
            ["a"],
            ["0"],
            "ghost",
            ["a", "nowhere"],
            TransitionSpec::from_triples([("a", "0", "z"), ("y", "1", "a")]),
        );
        let lints = lint(&afd);

        assert!(lints.contains(&Lint::UnknownInitialState(State::from("ghost"))));
        assert!(lints.contains(&Lint::UnknownAcceptingState(State::from("nowhere"))));
        assert!(lints.contains(&Lint::UnknownTargetState {
            from: State::from("a"),
            symbol: Symbol::from("0"),
            to: State::from("z"),
        }));
        assert!(lints.contains(&Lint::UnknownSourceState {
            from: State::from("y"),
            symbol: Symbol::from("1"),
        }));
        assert!(lints.contains(&Lint::SymbolOutsideAlphabet {
            from: State::from("y"),
            symbol: Symbol::from("1"),
        }));
    }

    #[test]
    fn test_missing_transitions_are_notes_listed_last() {
        let afd = Automaton::new(
            ["a", "b"],
            ["0"],
            "a",
            ["missing"],
            TransitionSpec::from_triples([("a", "0", "b")]),
        );
        let lints = lint(&afd);

        assert!(!is_complete(&afd));
        assert_eq!(lints.first().map(Lint::severity), Some(Severity::Warning));
        assert_eq!(
            lints.last(),
            Some(&Lint::MissingTransition {
                state: State::from("b"),
                symbol: Symbol::from("0"),
            })
        );
    }
}
