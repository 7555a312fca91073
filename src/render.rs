//! Text rendering for engine results.

use afdsim_core::builtin::Example;
use afdsim_core::{Automaton, CoreError, Lint, Run, Severity, Step, Symbol};
use colored::Colorize;

/// Renders a derivation as `[(q0, 1, q0), (q0, 0, q1)]`.
pub fn derivation(steps: &[Step]) -> String {
    let inner: Vec<String> = steps.iter().map(Step::to_string).collect();
    format!("[{}]", inner.join(", "))
}

/// Renders the outcome of testing one word.
///
/// The derivation line is left out for the empty word.
pub fn run(word: &str, symbols: &[Symbol], outcome: &Result<Run, CoreError>) -> String {
    let mut output = format!("Word '{}':", word.cyan());
    match outcome {
        Ok(run) => {
            output.push_str(&format!("\n  Final state: {}", run.final_state.as_str().yellow()));
            if !symbols.is_empty() {
                output.push_str(&format!("\n  Derivation: {}", derivation(&run.steps)));
            }
            let verdict = if run.accepted {
                "YES".green().bold()
            } else {
                "NO".red().bold()
            };
            output.push_str(&format!("\n  Accepted: {}", verdict));
        }
        Err(e) => {
            output.push_str(&format!("\n  {}: {}", "Error".red(), e));
            output.push_str(&format!("\n  Accepted: {}", "NO".red().bold()));
        }
    }
    output
}

/// Renders definition diagnostics, one per line.
pub fn lints(lints: &[Lint]) -> String {
    lints
        .iter()
        .map(|l| match l.severity() {
            Severity::Warning => format!("  {}: {}", "Warning".yellow(), l),
            Severity::Note => format!("  {}: {}", "Note".dimmed(), l),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders an automaton with an optional heading.
pub fn automaton(heading: &str, automaton: &Automaton) -> String {
    format!("{}\n{}", heading.bold(), automaton)
}

/// Runs and renders a built-in example over its demonstration words.
pub fn example(example: &Example) -> String {
    let mut output = format!(
        "{}\n{}\n",
        format!("=== {}: {} ===", example.name, example.description).bold(),
        example.automaton
    );
    for word in example.words {
        let symbols = Symbol::chars(word);
        let outcome = example.automaton.evaluate_from_initial(&symbols, None);
        output.push('\n');
        output.push_str(&run(word, &symbols, &outcome));
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use afdsim_core::builtin;

    #[test]
    fn test_render_accepted_run() {
        colored::control::set_override(false);
        let afd = builtin::ends_with_01();
        let symbols = Symbol::chars("101");
        let text = run("101", &symbols, &afd.evaluate_from_initial(&symbols, None));

        assert!(text.contains("Final state: q2"));
        assert!(text.contains("Derivation: [(q0, 1, q0), (q0, 0, q1), (q1, 1, q2)]"));
        assert!(text.contains("Accepted: YES"));
    }

    #[test]
    fn test_render_empty_word_skips_derivation() {
        colored::control::set_override(false);
        let afd = builtin::even_a();
        let text = run("", &[], &afd.evaluate_from_initial(&[], None));

        assert!(text.contains("Final state: par"));
        assert!(!text.contains("Derivation"));
    }

    #[test]
    fn test_render_error() {
        colored::control::set_override(false);
        let afd = builtin::ends_with_01();
        let symbols = Symbol::chars("2");
        let text = run("2", &symbols, &afd.evaluate_from_initial(&symbols, None));

        assert!(text.contains("Error: symbol '2' is not in the alphabet"));
        assert!(text.contains("Accepted: NO"));
    }

    #[test]
    fn test_render_example_covers_all_words() {
        colored::control::set_override(false);
        let ex = builtin::by_name("even-a").unwrap();
        let text = example(&ex);
        assert_eq!(text.matches("Word '").count(), ex.words.len());
    }
}
