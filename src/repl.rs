//! Interactive REPL.

use crate::commands;
use crate::config::Config;
use crate::prompt::{Answer, Prompt};
use crate::render;
use crate::session::{parse_state_list, Session, Source};
use crate::wizard;
use afdsim_core::lint::is_complete;
use afdsim_core::{builtin, lint};
use afdsim_loader::{load_path, Format};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::io::Write;

const HELP_TEXT: &str = r#"
Available commands:
  help                          Show this help
  examples [name|all]           Run the built-in examples

  load <file> [json|yaml|xml]   Load an automaton from a file
  create                        Build an automaton step by step
  samples [dir]                 Write sample files in every format
  use <example>                 Make a built-in example current

  test <word>, t <word>         Test a word on the current automaton
  test                          Test words one by one until an empty line
  empty                         Test the empty word
  info                          Show the current automaton and diagnostics

  accepting <a,b,...>           Override the accepting states for tests
  accepting reset               Go back to the automaton's accepting states
  separator <sep>|none          Split words on <sep> ("quote" to keep spaces)

  quit, exit                    Exit the REPL
"#;

pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "afdsim - DFA simulator".bold().cyan());

    let rl_config = rustyline::Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .build();
    let mut rl: Editor<(), DefaultHistory> = Editor::with_config(rl_config)?;

    let history_path = &config.shell.history_file;
    let _ = rl.load_history(history_path);

    let mut session = Session::new(config.output.separator.clone());
    let mut stdout = std::io::stdout();

    println!("Type 'help' for available commands.\n");

    loop {
        let prompt = format!("{} ", "afd>".cyan());
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match execute_repl_command(&mut session, line, &mut rl, &mut stdout, config) {
                    Ok(Some(output)) => println!("{}\n", output),
                    Ok(None) => break,
                    Err(e) => println!("{}: {}\n", "Error".red(), e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                println!("{}: {:?}", "Error".red(), err);
                break;
            }
        }
    }

    if let Err(e) = rl.save_history(history_path) {
        tracing::warn!("Failed to save history to {}: {}", history_path.display(), e);
    }
    println!("{}", "Bye.".dimmed());

    Ok(())
}

/// Executes one REPL line. Returns `Ok(None)` when the shell should exit.
///
/// Commands that need more input read it from `prompt` and stream their
/// progress to `out`.
fn execute_repl_command(
    session: &mut Session,
    line: &str,
    prompt: &mut impl Prompt,
    out: &mut impl Write,
    config: &Config,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return Ok(Some(String::new()));
    }

    let cmd = parts[0].to_lowercase();
    let args = &parts[1..];

    match cmd.as_str() {
        "help" | "?" => Ok(Some(HELP_TEXT.to_string())),

        "quit" | "exit" | "q" => Ok(None),

        "examples" | "ex" => commands::examples(args.first().copied().unwrap_or("all")).map(Some),

        "use" => {
            let Some(name) = args.first() else {
                return Ok(Some("Usage: use <example>".to_string()));
            };
            let example =
                builtin::by_name(name).ok_or_else(|| format!("unknown example '{}'", name))?;
            session.set_automaton(example.automaton, Source::Example(example.name));
            Ok(Some(format!("{} example {}", "Using".green(), example.name.cyan())))
        }

        "load" | "l" => {
            let Some(path) = args.first() else {
                return Ok(Some("Usage: load <file> [json|yaml|xml]".to_string()));
            };
            let format = args.get(1).map(|f| f.parse::<Format>()).transpose()?;
            let loaded = match load_path(path, format) {
                Ok(loaded) => loaded,
                Err(e) if e.is_not_found() => {
                    return Ok(Some(format!("{}: file '{}' not found", "Error".red(), path)));
                }
                Err(e) if e.is_parse_error() => {
                    return Ok(Some(format!("{}: could not parse {}", "Error".red(), e)));
                }
                Err(e) => return Err(e.into()),
            };

            let mut output = format!(
                "{} {} ({}, checksum {})",
                "Loaded".green(),
                loaded.path.display().to_string().cyan(),
                loaded.format,
                loaded.checksum
            );
            output.push('\n');
            output.push_str(&loaded.automaton.to_string());
            append_lints(&mut output, &loaded.automaton, config);

            session.set_loaded(loaded);
            Ok(Some(output))
        }

        "create" | "c" => match wizard::create(prompt, out)? {
            Some(automaton) => {
                let mut output = render::automaton("Created:", &automaton);
                append_lints(&mut output, &automaton, config);
                session.set_automaton(automaton, Source::Manual);
                Ok(Some(output))
            }
            None => Ok(Some("No automaton created.".yellow().to_string())),
        },

        "samples" => {
            let dir = args
                .first()
                .map(std::path::PathBuf::from)
                .unwrap_or_else(|| config.shell.samples_dir.clone());
            commands::samples(&dir).map(Some)
        }

        "test" | "t" => {
            if session.current().is_none() {
                return Ok(Some(no_automaton()));
            }
            if args.is_empty() {
                return test_interactively(session, prompt, out);
            }
            // A separator may contain spaces, so test the raw remainder.
            let word = line[parts[0].len()..].trim();
            Ok(Some(test_word(session, word)))
        }

        "empty" => {
            if session.current().is_none() {
                return Ok(Some(no_automaton()));
            }
            Ok(Some(test_word(session, "")))
        }

        "info" | "i" => {
            let Some(current) = session.current() else {
                return Ok(Some(no_automaton()));
            };
            let mut output = format!("{}\n", current.automaton);
            output.push_str(&format!("Source: {}", current.source));
            let complete = if is_complete(&current.automaton) {
                "yes".green()
            } else {
                "no".yellow()
            };
            output.push_str(&format!("\nComplete: {}", complete));
            if let Some(checksum) = &current.checksum {
                output.push_str(&format!("\nChecksum: {}", checksum));
            }
            if let Some(accepting) = session.accepting_override() {
                let names: Vec<&str> = accepting.iter().map(|s| s.as_str()).collect();
                output.push_str(&format!(
                    "\nAccepting override: {{{}}}",
                    names.join(", ").yellow()
                ));
            }
            let lints = lint(&current.automaton);
            if !lints.is_empty() {
                output.push_str(&format!("\nDiagnostics:\n{}", render::lints(&lints)));
            }
            Ok(Some(output))
        }

        "accepting" | "f" => match args.first() {
            None => Ok(Some("Usage: accepting <a,b,...> | reset".to_string())),
            Some(&"reset") => {
                session.set_accepting_override(None);
                Ok(Some("Accepting states reset.".green().to_string()))
            }
            Some(_) => {
                let states = parse_state_list(&args.join(""));
                if states.is_empty() {
                    return Ok(Some("Usage: accepting <a,b,...> | reset".to_string()));
                }
                let names: Vec<&str> = states.iter().map(|s| s.as_str()).collect();
                let output = format!(
                    "{} accepting states to {{{}}}",
                    "Set".green(),
                    names.join(", ")
                );
                session.set_accepting_override(Some(states));
                Ok(Some(output))
            }
        },

        "separator" | "sep" => match line[parts[0].len()..].trim() {
            "" => Ok(Some(format!(
                "Separator: {}",
                session.separator().map_or("none (per character)".to_string(), |s| {
                    format!("'{}'", s)
                })
            ))),
            "none" => {
                session.set_separator(None);
                Ok(Some("Words are split per character.".to_string()))
            }
            raw => {
                let sep = unquote(raw);
                if sep.is_empty() {
                    return Ok(Some(format!(
                        "{}: separator must not be empty (use 'separator none')",
                        "Error".red()
                    )));
                }
                session.set_separator(Some(sep.to_string()));
                Ok(Some(format!("Words are split on '{}'.", sep)))
            }
        },

        _ => Ok(Some(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            cmd
        ))),
    }
}

/// Strips one pair of matching surrounding quotes, so `" "` names a space.
fn unquote(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = raw
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    raw
}

fn test_word(session: &Session, word: &str) -> String {
    match session.evaluate(word) {
        Some((symbols, outcome)) => render::run(word, &symbols, &outcome),
        None => no_automaton(),
    }
}

/// Tests words until an empty line that is not confirmed as the empty word.
fn test_interactively(
    session: &Session,
    prompt: &mut impl Prompt,
    out: &mut impl Write,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    if let Some(current) = session.current() {
        let symbols: Vec<&str> = current.automaton.alphabet().iter().map(|s| s.as_str()).collect();
        writeln!(out, "Alphabet: {{{}}}", symbols.join(", "))?;
    }
    writeln!(out, "Enter words to test (empty line to stop).")?;

    let mut tested = 0usize;
    loop {
        let word = match prompt.ask("Word: ")? {
            Answer::Line(word) => word,
            Answer::Cancelled => break,
        };
        if word.is_empty() {
            match prompt.ask("Test the empty word? (y/n): ")? {
                Answer::Line(answer) if answer.eq_ignore_ascii_case("y") => {}
                _ => break,
            }
        }
        writeln!(out, "{}", test_word(session, &word))?;
        tested += 1;
    }

    Ok(Some(format!("Tested {} word(s).", tested)))
}

fn append_lints(output: &mut String, automaton: &afdsim_core::Automaton, config: &Config) {
    if !config.output.show_lints {
        return;
    }
    let lints = lint(automaton);
    if !lints.is_empty() {
        output.push('\n');
        output.push_str(&render::lints(&lints));
    }
}

fn no_automaton() -> String {
    format!(
        "{}: no automaton loaded (use 'load', 'create' or 'use')",
        "Error".red()
    )
}
