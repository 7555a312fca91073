//! XML encoding.
//!
//! ```xml
//! <AFD>
//!     <Q><state>q0</state><state>q1</state></Q>
//!     <Sigma><symbol>0</symbol></Sigma>
//!     <q0>q0</q0>
//!     <F><state>q1</state></F>
//!     <delta>
//!         <transition><from>q0</from><symbol>0</symbol><to>q1</to></transition>
//!     </delta>
//! </AFD>
//! ```

use crate::document::{AutomatonDocument, Delta, Label, TransitionEntry};
use crate::error::LoaderError;
use serde::{Deserialize, Serialize};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename = "AFD")]
struct XmlAutomaton {
    #[serde(rename = "Q")]
    states: XmlStates,
    #[serde(rename = "Sigma")]
    alphabet: XmlSymbols,
    q0: String,
    #[serde(rename = "F", default)]
    accepting: XmlStates,
    #[serde(default)]
    delta: XmlDelta,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct XmlStates {
    #[serde(default)]
    state: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct XmlSymbols {
    #[serde(default)]
    symbol: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct XmlDelta {
    #[serde(default)]
    transition: Vec<XmlTransition>,
}

#[derive(Debug, Serialize, Deserialize)]
struct XmlTransition {
    from: String,
    symbol: String,
    to: String,
}

fn labels(items: Vec<String>) -> Vec<Label> {
    items.into_iter().map(Label).collect()
}

fn texts(items: &[Label]) -> Vec<String> {
    items.iter().map(|l| l.0.clone()).collect()
}

/// Parses an XML document.
pub fn parse(text: &str) -> Result<AutomatonDocument, LoaderError> {
    let xml: XmlAutomaton = quick_xml::de::from_str(text)?;
    let delta = xml
        .delta
        .transition
        .into_iter()
        .map(|t| TransitionEntry::Record {
            from: Label(t.from),
            symbol: Label(t.symbol),
            to: Label(t.to),
        })
        .collect();

    Ok(AutomatonDocument {
        states: labels(xml.states.state),
        alphabet: labels(xml.alphabet.symbol),
        q0: Label(xml.q0),
        accepting: labels(xml.accepting.state),
        delta: Delta::List(delta),
    })
}

/// Renders a document as indented XML with a declaration line.
pub fn render(doc: &AutomatonDocument) -> Result<String, LoaderError> {
    let transition = match &doc.delta {
        Delta::List(entries) => entries.iter().map(|e| e.parts()).map(xml_transition).collect(),
        Delta::Nested(map) => map
            .iter()
            .flat_map(|(from, row)| {
                row.iter()
                    .map(move |(symbol, to)| (from.as_str(), symbol.as_str(), to.as_str()))
            })
            .map(xml_transition)
            .collect(),
    };

    let xml = XmlAutomaton {
        states: XmlStates {
            state: texts(&doc.states),
        },
        alphabet: XmlSymbols {
            symbol: texts(&doc.alphabet),
        },
        q0: doc.q0.0.clone(),
        accepting: XmlStates {
            state: texts(&doc.accepting),
        },
        delta: XmlDelta { transition },
    };

    let mut body = String::new();
    let mut serializer = quick_xml::se::Serializer::with_root(&mut body, Some("AFD"))?;
    serializer.indent(' ', 4);
    xml.serialize(serializer)?;

    Ok(format!("{}\n{}\n", XML_DECLARATION, body))
}

fn xml_transition((from, symbol, to): (&str, &str, &str)) -> XmlTransition {
    XmlTransition {
        from: from.to_string(),
        symbol: symbol.to_string(),
        to: to.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use afdsim_core::{builtin, Symbol};

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<AFD>
    <Q>
        <state>q0</state>
        <state>q1</state>
        <state>q2</state>
    </Q>
    <Sigma>
        <symbol>0</symbol>
        <symbol>1</symbol>
    </Sigma>
    <q0>q0</q0>
    <F>
        <state>q2</state>
    </F>
    <delta>
        <transition>
            <from>q0</from>
            <symbol>0</symbol>
            <to>q1</to>
        </transition>
        <transition>
            <from>q0</from>
            <symbol>1</symbol>
            <to>q0</to>
        </transition>
        <transition>
            <from>q1</from>
            <symbol>0</symbol>
            <to>q1</to>
        </transition>
        <transition>
            <from>q1</from>
            <symbol>1</symbol>
            <to>q2</to>
        </transition>
        <transition>
            <from>q2</from>
            <symbol>0</symbol>
            <to>q1</to>
        </transition>
        <transition>
            <from>q2</from>
            <symbol>1</symbol>
            <to>q0</to>
        </transition>
    </delta>
</AFD>"#;

    #[test]
    fn test_parse_sample() {
        let doc = parse(SAMPLE).unwrap();
        assert_eq!(doc.states.len(), 3);
        assert_eq!(doc.q0.as_str(), "q0");
        assert_eq!(doc.delta.len(), 6);

        let afd = doc.to_automaton();
        assert_eq!(afd, builtin::ends_with_01());
        assert!(afd.accepts(&Symbol::chars("1101")));
    }

    #[test]
    fn test_render_then_parse() {
        let doc = AutomatonDocument::from(&builtin::even_a());
        let text = render(&doc).unwrap();

        assert!(text.starts_with(XML_DECLARATION));
        assert!(text.contains("<q0>par</q0>"));
        assert_eq!(parse(&text).unwrap().to_automaton(), builtin::even_a());
    }

    #[test]
    fn test_missing_optional_sections() {
        let text = "<AFD><Q><state>a</state></Q><Sigma><symbol>x</symbol></Sigma><q0>a</q0></AFD>";
        let doc = parse(text).unwrap();
        assert!(doc.accepting.is_empty());
        assert!(doc.delta.is_empty());
    }

    #[test]
    fn test_malformed_xml() {
        assert!(matches!(
            parse("<AFD><Q>"),
            Err(LoaderError::XmlRead(_))
        ));
    }
}
