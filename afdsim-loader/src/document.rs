//! Serialized automaton document.
//!
//! The same shape is used by the JSON and YAML formats:
//!
//! ```json
//! {
//!   "Q": ["q0", "q1", "q2"],
//!   "Sigma": ["0", "1"],
//!   "q0": "q0",
//!   "F": ["q2"],
//!   "delta": [
//!     ["q0", "0", "q1"],
//!     {"from": "q1", "symbol": "1", "to": "q2"}
//!   ]
//! }
//! ```
//!
//! `delta` may also be a nested map `{"q0": {"0": "q1"}}`, keyed by source
//! state then symbol.

use afdsim_core::{Automaton, TransitionSpec};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A label as written in a document.
///
/// YAML resolves unquoted `0` or `true` to numbers and booleans; labels
/// accept integers and booleans and keep their text. Floats are rejected,
/// since `1.0` and `1.10` would not survive as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Label(pub String);

impl Label {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct LabelVisitor;

        impl<'de> Visitor<'de> for LabelVisitor {
            type Value = Label;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, integer or boolean label (quote decimal labels)")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Label(v.to_string()))
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Label(v))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Label(v.to_string()))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Label(v.to_string()))
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Err(E::invalid_type(de::Unexpected::Float(v), &self))
            }

            fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Label(v.to_string()))
            }
        }

        deserializer.deserialize_any(LabelVisitor)
    }
}

/// One transition in list form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransitionEntry {
    /// `[from, symbol, to]`
    Triple(Label, Label, Label),
    /// `{from, symbol, to}`
    Record { from: Label, symbol: Label, to: Label },
}

impl TransitionEntry {
    /// Returns `(from, symbol, to)`.
    pub fn parts(&self) -> (&str, &str, &str) {
        match self {
            TransitionEntry::Triple(from, symbol, to)
            | TransitionEntry::Record { from, symbol, to } => {
                (from.as_str(), symbol.as_str(), to.as_str())
            }
        }
    }
}

/// The transition function in either accepted shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Delta {
    /// Ordered transitions; later entries for the same pair win.
    List(Vec<TransitionEntry>),
    /// `from -> symbol -> to`.
    Nested(IndexMap<Label, IndexMap<Label, Label>>),
}

impl Default for Delta {
    fn default() -> Self {
        Delta::List(Vec::new())
    }
}

impl Delta {
    pub fn len(&self) -> usize {
        match self {
            Delta::List(entries) => entries.len(),
            Delta::Nested(map) => map.values().map(IndexMap::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn to_spec(&self) -> TransitionSpec {
        match self {
            Delta::List(entries) => TransitionSpec::from_triples(entries.iter().map(|e| e.parts())),
            Delta::Nested(map) => TransitionSpec::from_pairs(map.iter().flat_map(|(from, row)| {
                row.iter()
                    .map(move |(symbol, to)| ((from.as_str(), symbol.as_str()), to.as_str()))
            })),
        }
    }
}

/// Raw automaton document as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomatonDocument {
    /// States.
    #[serde(rename = "Q")]
    pub states: Vec<Label>,

    /// Alphabet.
    #[serde(rename = "Sigma")]
    pub alphabet: Vec<Label>,

    /// Initial state.
    pub q0: Label,

    /// Accepting states.
    #[serde(rename = "F", default)]
    pub accepting: Vec<Label>,

    /// Transition function.
    #[serde(default)]
    pub delta: Delta,
}

impl AutomatonDocument {
    /// Builds the automaton this document describes.
    pub fn to_automaton(&self) -> Automaton {
        Automaton::new(
            self.states.iter().map(Label::as_str),
            self.alphabet.iter().map(Label::as_str),
            self.q0.as_str(),
            self.accepting.iter().map(Label::as_str),
            self.delta.to_spec(),
        )
    }

    /// CRC32C of the canonical JSON encoding, as 8 hex digits.
    pub fn checksum(&self) -> Result<String, serde_json::Error> {
        let json_bytes = serde_json::to_vec(self)?;
        Ok(format!("{:08x}", crc32c::crc32c(&json_bytes)))
    }
}

impl From<&Automaton> for AutomatonDocument {
    fn from(automaton: &Automaton) -> Self {
        let label = |s: &str| Label(s.to_string());
        Self {
            states: automaton.states().iter().map(|s| label(s.as_str())).collect(),
            alphabet: automaton
                .alphabet()
                .iter()
                .map(|s| label(s.as_str()))
                .collect(),
            q0: label(automaton.initial_state().as_str()),
            accepting: automaton
                .accepting_states()
                .iter()
                .map(|s| label(s.as_str()))
                .collect(),
            delta: Delta::List(
                automaton
                    .transitions()
                    .map(|(from, symbol, to)| {
                        TransitionEntry::Triple(
                            label(from.as_str()),
                            label(symbol.as_str()),
                            label(to.as_str()),
                        )
                    })
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use afdsim_core::{builtin, State, Symbol};

    #[test]
    fn test_triples_and_records_mix() {
        let doc: AutomatonDocument = serde_json::from_value(serde_json::json!({
            "Q": ["a", "b"],
            "Sigma": ["x"],
            "q0": "a",
            "F": ["b"],
            "delta": [
                ["a", "x", "b"],
                {"from": "b", "symbol": "x", "to": "a"}
            ]
        }))
        .unwrap();

        assert_eq!(doc.delta.len(), 2);
        let afd = doc.to_automaton();
        assert!(afd.accepts(&Symbol::chars("x")));
        assert!(!afd.accepts(&Symbol::chars("xx")));
    }

    #[test]
    fn test_nested_delta() {
        let doc: AutomatonDocument = serde_json::from_value(serde_json::json!({
            "Q": ["par", "impar"],
            "Sigma": ["a", "b"],
            "q0": "par",
            "F": ["par"],
            "delta": {
                "par": {"a": "impar", "b": "par"},
                "impar": {"a": "par", "b": "impar"}
            }
        }))
        .unwrap();

        assert!(matches!(doc.delta, Delta::Nested(_)));
        assert_eq!(doc.to_automaton(), builtin::even_a());
    }

    #[test]
    fn test_later_list_entries_win() {
        let doc: AutomatonDocument = serde_json::from_value(serde_json::json!({
            "Q": ["a", "b", "c"],
            "Sigma": ["x"],
            "q0": "a",
            "delta": [["a", "x", "b"], ["a", "x", "c"]]
        }))
        .unwrap();

        let afd = doc.to_automaton();
        assert_eq!(
            afd.step(&State::from("a"), &Symbol::from("x")),
            Some(&State::from("c"))
        );
        assert!(afd.accepting_states().is_empty());
    }

    #[test]
    fn test_numeric_labels() {
        let doc: AutomatonDocument = serde_json::from_value(serde_json::json!({
            "Q": [0, 1],
            "Sigma": [0, 1],
            "q0": 0,
            "F": [1],
            "delta": [[0, 1, 1], [1, 0, 0]]
        }))
        .unwrap();

        assert_eq!(doc.q0.as_str(), "0");
        assert!(doc.to_automaton().accepts(&Symbol::chars("1")));
    }

    #[test]
    fn test_decimal_labels_must_be_quoted() {
        let err = serde_yaml::from_str::<AutomatonDocument>(
            "Q: [1.0, 1.10]\nSigma: [a]\nq0: 1.0\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("quote decimal labels"));

        let doc: AutomatonDocument =
            serde_yaml::from_str("Q: ['1.0', '1.10']\nSigma: [a]\nq0: '1.0'\n").unwrap();
        assert_eq!(doc.states, vec![Label::from("1.0"), Label::from("1.10")]);
        assert_eq!(doc.q0.as_str(), "1.0");
    }

    #[test]
    fn test_export_preserves_automaton() {
        let original = builtin::ends_with_01();
        let doc = AutomatonDocument::from(&original);

        assert_eq!(doc.states.len(), 3);
        assert_eq!(doc.delta.len(), 6);
        assert_eq!(doc.to_automaton(), original);
    }

    #[test]
    fn test_checksum_is_stable() {
        let doc = AutomatonDocument::from(&builtin::ends_with_01());
        let first = doc.checksum().unwrap();

        assert_eq!(first.len(), 8);
        assert_eq!(first, doc.clone().checksum().unwrap());
        let other = AutomatonDocument::from(&builtin::even_a());
        assert_ne!(first, other.checksum().unwrap());
    }
}
