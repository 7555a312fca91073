//! Built-in example automata.

use crate::automaton::{Automaton, TransitionSpec};

/// A named example with the words it is demonstrated on.
#[derive(Debug, Clone)]
pub struct Example {
    pub name: &'static str,
    pub description: &'static str,
    pub automaton: Automaton,
    pub words: &'static [&'static str],
}

/// Binary strings ending in `01`. Transitions given as triples.
pub fn ends_with_01() -> Automaton {
    Automaton::new(
        ["q0", "q1", "q2"],
        ["0", "1"],
        "q0",
        ["q2"],
        TransitionSpec::from_triples([
            ("q0", "0", "q1"),
            ("q0", "1", "q0"),
            ("q1", "0", "q1"),
            ("q1", "1", "q2"),
            ("q2", "0", "q1"),
            ("q2", "1", "q0"),
        ]),
    )
}

/// Strings over `{a, b}` with an even number of `a`. Transitions given as a
/// pair-keyed map.
pub fn even_a() -> Automaton {
    Automaton::new(
        ["par", "impar"],
        ["a", "b"],
        "par",
        ["par"],
        TransitionSpec::from_pairs([
            (("par", "a"), "impar"),
            (("par", "b"), "par"),
            (("impar", "a"), "par"),
            (("impar", "b"), "impar"),
        ]),
    )
}

/// Every built-in example, in menu order.
pub fn all() -> Vec<Example> {
    vec![
        Example {
            name: "ends-with-01",
            description: "accepts strings over {0,1} ending in '01'",
            automaton: ends_with_01(),
            words: &["01", "001", "101", "1101", "10", "11", "00"],
        },
        Example {
            name: "even-a",
            description: "accepts strings over {a,b} with an even number of 'a'",
            automaton: even_a(),
            words: &["", "a", "aa", "ab", "ba", "aba", "aab", "baba"],
        },
    ]
}

/// Looks up an example by name.
pub fn by_name(name: &str) -> Option<Example> {
    all().into_iter().find(|e| e.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Symbol;

    #[test]
    fn test_example_verdicts() {
        let afd = ends_with_01();
        let accepted: Vec<bool> = ["01", "001", "101", "1101", "10", "11", "00"]
            .iter()
            .map(|w| afd.accepts(&Symbol::chars(w)))
            .collect();
        assert_eq!(accepted, vec![true, true, true, true, false, false, false]);

        let afd = even_a();
        let accepted: Vec<bool> = ["", "a", "aa", "ab", "ba", "aba", "aab", "baba"]
            .iter()
            .map(|w| afd.accepts(&Symbol::chars(w)))
            .collect();
        assert_eq!(
            accepted,
            vec![true, false, true, false, false, true, true, true]
        );
    }

    #[test]
    fn test_lookup_by_name() {
        assert!(by_name("even-a").is_some());
        assert!(by_name("odd-b").is_none());
        assert_eq!(all().len(), 2);
    }
}
