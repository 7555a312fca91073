//! One-shot command execution.

use crate::config::Config;
use crate::render;
use crate::Commands;
use afdsim_core::{builtin, lint, Automaton, State, StateSet, Symbol};
use afdsim_loader::{load_path, write_samples, Format};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

/// JSON report for `run --json`.
#[derive(Debug, Serialize)]
struct RunReport<'a> {
    word: &'a str,
    start: &'a str,
    symbols: &'a [Symbol],
    #[serde(skip_serializing_if = "Option::is_none")]
    final_state: Option<&'a State>,
    #[serde(skip_serializing_if = "Option::is_none")]
    derivation: Option<&'a [afdsim_core::Step]>,
    accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
}

#[derive(Debug, Serialize)]
struct ErrorReport {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<usize>,
}

/// Executes a command and returns the formatted output.
pub fn execute(cmd: Commands, config: &Config) -> Result<String, Box<dyn std::error::Error>> {
    match cmd {
        Commands::Shell => unreachable!(), // Handled by main

        Commands::Run {
            file,
            word,
            format,
            start,
            accepting,
            separator,
            json,
        } => {
            let automaton = load(&file, format)?;
            let separator = separator.or_else(|| config.output.separator.clone());
            let symbols = match &separator {
                Some(sep) => Symbol::split(&word, sep),
                None => Symbol::chars(&word),
            };
            let accepting: Option<StateSet> =
                accepting.map(|states| states.into_iter().map(State::from).collect());

            // Without --start the initial state must be a declared state.
            let (start, outcome) = match start.map(State::from) {
                Some(start) => {
                    let outcome = automaton.evaluate(&start, &symbols, accepting.as_ref());
                    (start, outcome)
                }
                None => (
                    automaton.initial_state().clone(),
                    automaton.evaluate_from_initial(&symbols, accepting.as_ref()),
                ),
            };

            if json {
                let report = RunReport {
                    word: &word,
                    start: start.as_str(),
                    symbols: &symbols,
                    final_state: outcome.as_ref().ok().map(|r| &r.final_state),
                    derivation: outcome.as_ref().ok().map(|r| r.steps.as_slice()),
                    accepted: outcome.as_ref().map(|r| r.accepted).unwrap_or(false),
                    error: outcome.as_ref().err().map(|e| ErrorReport {
                        code: e.error_code(),
                        message: e.to_string(),
                        position: e.position(),
                    }),
                };
                Ok(serde_json::to_string_pretty(&report)?)
            } else {
                Ok(render::run(&word, &symbols, &outcome))
            }
        }

        Commands::Show { file, format, json } => {
            let automaton = load(&file, format)?;
            if json {
                Ok(serde_json::to_string_pretty(&automaton)?)
            } else {
                Ok(automaton.to_string())
            }
        }

        Commands::Lint { file, format } => {
            let automaton = load(&file, format)?;
            let lints = lint(&automaton);
            if lints.is_empty() {
                Ok(format!("{} no issues found", "OK".green()))
            } else {
                Ok(render::lints(&lints))
            }
        }

        Commands::Examples { which } => examples(&which),

        Commands::Samples { dir } => {
            let dir = dir.unwrap_or_else(|| config.shell.samples_dir.clone());
            samples(&dir)
        }
    }
}

/// Renders the built-in example called `which`, or all of them for `all`.
pub fn examples(which: &str) -> Result<String, Box<dyn std::error::Error>> {
    let selected = if which == "all" {
        builtin::all()
    } else {
        match builtin::by_name(which) {
            Some(example) => vec![example],
            None => {
                let names: Vec<_> = builtin::all().iter().map(|e| e.name).collect();
                return Err(format!(
                    "unknown example '{}' (available: {}, all)",
                    which,
                    names.join(", ")
                )
                .into());
            }
        }
    };

    let rendered: Vec<String> = selected.iter().map(render::example).collect();
    Ok(rendered.join(&format!("\n{}\n\n", "=".repeat(60))))
}

/// Writes the sample files and lists them.
pub fn samples(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let paths = write_samples(dir)?;
    let mut output = format!("{} sample files:", "Created".green());
    for path in paths {
        output.push_str(&format!("\n  - {}", path.display()));
    }
    output.push_str("\nLoad them with 'load <file>'.");
    Ok(output)
}

fn load(file: &Path, format: Option<Format>) -> Result<Automaton, Box<dyn std::error::Error>> {
    Ok(load_path(file, format)?.automaton)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_file(dir: &TempDir) -> std::path::PathBuf {
        write_samples(dir.path()).unwrap().remove(0)
    }

    fn run_cmd(file: &Path, word: &str, json: bool) -> String {
        colored::control::set_override(false);
        execute(
            Commands::Run {
                file: file.to_path_buf(),
                word: word.to_string(),
                format: None,
                start: None,
                accepting: None,
                separator: None,
                json,
            },
            &Config::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_run_text() {
        let dir = TempDir::new().unwrap();
        let output = run_cmd(&sample_file(&dir), "1101", false);
        assert!(output.contains("Final state: q2"));
        assert!(output.contains("Accepted: YES"));
    }

    #[test]
    fn test_run_json_with_error() {
        let dir = TempDir::new().unwrap();
        let output = run_cmd(&sample_file(&dir), "012", true);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["accepted"], false);
        assert_eq!(value["error"]["code"], "SYMBOL_NOT_IN_ALPHABET");
        assert_eq!(value["error"]["position"], 2);
        assert!(value.get("final_state").is_none());
    }

    fn dangling_initial(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("ghost.json");
        std::fs::write(
            &path,
            r#"{"Q":["a"],"Sigma":["0"],"q0":"ghost","F":["a"],"delta":[["ghost","0","a"]]}"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn test_run_rejects_undeclared_initial_state() {
        let dir = TempDir::new().unwrap();
        let file = dangling_initial(&dir);

        for word in ["0", ""] {
            let output = run_cmd(&file, word, true);
            let value: serde_json::Value = serde_json::from_str(&output).unwrap();

            assert_eq!(value["start"], "ghost");
            assert_eq!(value["accepted"], false);
            assert_eq!(value["error"]["code"], "UNKNOWN_INITIAL_STATE");
            assert!(value["error"].get("position").is_none());
            assert!(value.get("final_state").is_none());
        }
    }

    #[test]
    fn test_run_explicit_start_bypasses_initial_state() {
        let dir = TempDir::new().unwrap();
        let output = execute(
            Commands::Run {
                file: dangling_initial(&dir),
                word: "0".to_string(),
                format: None,
                start: Some("ghost".to_string()),
                accepting: None,
                separator: None,
                json: true,
            },
            &Config::default(),
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["final_state"], "a");
        assert_eq!(value["accepted"], true);
    }

    #[test]
    fn test_run_json_derivation() {
        let dir = TempDir::new().unwrap();
        let output = run_cmd(&sample_file(&dir), "101", true);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["final_state"], "q2");
        assert_eq!(value["derivation"][1]["from"], "q0");
        assert_eq!(value["derivation"][1]["to"], "q1");
        assert_eq!(value["accepted"], true);
    }

    #[test]
    fn test_run_with_start_and_accepting() {
        let dir = TempDir::new().unwrap();
        let output = execute(
            Commands::Run {
                file: sample_file(&dir),
                word: "0".to_string(),
                format: None,
                start: Some("q2".to_string()),
                accepting: Some(vec!["q1".to_string()]),
                separator: None,
                json: true,
            },
            &Config::default(),
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["start"], "q2");
        assert_eq!(value["final_state"], "q1");
        assert_eq!(value["accepted"], true);
    }

    #[test]
    fn test_show_json() {
        let dir = TempDir::new().unwrap();
        let output = execute(
            Commands::Show {
                file: sample_file(&dir),
                format: None,
                json: true,
            },
            &Config::default(),
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["transitions"]["q1"]["1"], "q2");
    }

    #[test]
    fn test_lint_clean_sample() {
        colored::control::set_override(false);
        let dir = TempDir::new().unwrap();
        let output = execute(
            Commands::Lint {
                file: sample_file(&dir),
                format: None,
            },
            &Config::default(),
        )
        .unwrap();
        assert!(output.contains("no issues found"));
    }

    #[test]
    fn test_unknown_example() {
        let err = examples("odd-b").unwrap_err();
        assert!(err.to_string().contains("available: ends-with-01, even-a"));
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let result = execute(
            Commands::Show {
                file: dir.path().join("absent.json"),
                format: None,
                json: false,
            },
            &Config::default(),
        );
        assert!(result.is_err());
    }
}
