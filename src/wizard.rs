//! Guided manual construction of an automaton.

use crate::prompt::{Answer, Prompt};
use crate::session::parse_state_list;
use afdsim_core::{Automaton, AutomatonBuilder, State, Symbol};
use colored::Colorize;
use std::io::Write;

macro_rules! ask_or_cancel {
    ($prompt:expr, $out:expr, $text:expr) => {
        match $prompt.ask($text)? {
            Answer::Line(line) => line,
            Answer::Cancelled => {
                writeln!($out, "{}", "Cancelled.".dimmed())?;
                return Ok(None);
            }
        }
    };
}

/// Asks for the five components and builds an automaton.
///
/// Returns `Ok(None)` when the user cancels or gives an unusable answer.
pub fn create(
    prompt: &mut impl Prompt,
    out: &mut impl Write,
) -> Result<Option<Automaton>, Box<dyn std::error::Error>> {
    writeln!(out, "{}", "Create automaton".bold())?;

    writeln!(out, "\n1. States")?;
    let line = ask_or_cancel!(prompt, out, "States, comma separated (e.g. q0,q1,q2): ");
    let states = parse_state_list(&line);
    if states.is_empty() {
        writeln!(out, "{}: at least one state is required", "Error".red())?;
        return Ok(None);
    }

    writeln!(out, "\n2. Alphabet")?;
    let line = ask_or_cancel!(prompt, out, "Symbols, comma separated (e.g. 0,1): ");
    let alphabet = Symbol::split(&line, ",");
    if alphabet.is_empty() {
        writeln!(out, "{}: at least one symbol is required", "Error".red())?;
        return Ok(None);
    }

    writeln!(out, "\n3. Initial state (declared: {})", join(states.iter()))?;
    let line = ask_or_cancel!(prompt, out, "Initial state: ");
    let initial = State::from(line.as_str());
    if !states.contains(&initial) {
        writeln!(
            out,
            "{}: '{}' is not in the state list",
            "Error".red(),
            initial
        )?;
        return Ok(None);
    }

    writeln!(out, "\n4. Accepting states (declared: {})", join(states.iter()))?;
    let line = ask_or_cancel!(prompt, out, "Accepting states, comma separated: ");
    let mut builder = AutomatonBuilder::new(initial)
        .states(states.iter().cloned())
        .symbols(alphabet.iter().cloned());
    for state in parse_state_list(&line) {
        if states.contains(&state) {
            builder = builder.accepting(state);
        } else {
            writeln!(
                out,
                "{}: ignoring undeclared accepting state '{}'",
                "Warning".yellow(),
                state
            )?;
        }
    }

    writeln!(out, "\n5. Transitions")?;
    writeln!(out, "Enter one transition per line as from,symbol,to. Empty line to finish.")?;
    loop {
        let line = ask_or_cancel!(prompt, out, "Transition: ");
        if line.is_empty() {
            break;
        }

        let parts: Vec<&str> = line.split(',').map(str::trim).collect();
        let [from, symbol, to] = parts.as_slice() else {
            writeln!(out, "{}: expected from,symbol,to", "Error".red())?;
            continue;
        };
        let (from, symbol, to) = (State::from(*from), Symbol::from(*symbol), State::from(*to));

        if !states.contains(&from) {
            writeln!(out, "{}: state '{}' does not exist", "Error".red(), from)?;
            continue;
        }
        if !alphabet.contains(&symbol) {
            writeln!(out, "{}: symbol '{}' is not in the alphabet", "Error".red(), symbol)?;
            continue;
        }
        if !states.contains(&to) {
            writeln!(out, "{}: state '{}' does not exist", "Error".red(), to)?;
            continue;
        }

        if builder.has_transition(&from, &symbol) {
            writeln!(
                out,
                "{}: δ({}, {}) already defined, overwriting",
                "Warning".yellow(),
                from,
                symbol
            )?;
        }
        writeln!(out, "{} δ({}, {}) = {}", "Added".green(), from, symbol, to)?;
        builder.add_transition(from, symbol, to);
    }

    if builder.transition_count() == 0 {
        writeln!(out, "{}: no transitions defined", "Warning".yellow())?;
    }

    Ok(Some(builder.build()))
}

fn join<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items.map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::Scripted;

    fn run(lines: &[&str]) -> (Option<Automaton>, String) {
        colored::control::set_override(false);
        let mut prompt = Scripted::new(lines);
        let mut out = Vec::new();
        let afd = create(&mut prompt, &mut out).unwrap();
        (afd, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_create_even_a() {
        let (afd, _) = run(&[
            "par, impar",
            "a,b",
            "par",
            "par",
            "par,a,impar",
            "par,b,par",
            "impar,a,par",
            "impar,b,impar",
            "",
        ]);
        let afd = afd.unwrap();

        assert_eq!(afd.transition_count(), 4);
        assert!(afd.accepts(&Symbol::chars("aab")));
        assert!(!afd.accepts(&Symbol::chars("ab")));
    }

    #[test]
    fn test_invalid_transitions_are_skipped() {
        let (afd, out) = run(&[
            "a,b",
            "x",
            "a",
            "b,zz",
            "a,x",
            "a,y,b",
            "a,x,c",
            "c,x,a",
            "a,x,b",
            "",
        ]);
        let afd = afd.unwrap();

        assert!(out.contains("ignoring undeclared accepting state 'zz'"));
        assert!(out.contains("expected from,symbol,to"));
        assert!(out.contains("symbol 'y' is not in the alphabet"));
        assert!(out.contains("state 'c' does not exist"));
        assert_eq!(afd.transition_count(), 1);
        assert!(afd.accepts(&Symbol::chars("x")));
    }

    #[test]
    fn test_redefinition_overwrites() {
        let (afd, out) = run(&["a,b", "x", "a", "b", "a,x,a", "a,x,b", ""]);

        assert!(out.contains("already defined, overwriting"));
        assert!(afd.unwrap().accepts(&Symbol::chars("x")));
    }

    #[test]
    fn test_unknown_initial_state_aborts() {
        let (afd, out) = run(&["a,b", "x", "c"]);
        assert!(afd.is_none());
        assert!(out.contains("'c' is not in the state list"));
    }

    #[test]
    fn test_empty_states_abort() {
        let (afd, out) = run(&[" , "]);
        assert!(afd.is_none());
        assert!(out.contains("at least one state"));
    }

    #[test]
    fn test_cancel_midway() {
        let (afd, out) = run(&["a", "x"]);
        assert!(afd.is_none());
        assert!(out.contains("Cancelled."));
    }

    #[test]
    fn test_no_transitions_warns() {
        let (afd, out) = run(&["a", "x", "a", "", ""]);
        assert!(out.contains("no transitions defined"));
        assert_eq!(afd.unwrap().transition_count(), 0);
    }
}
