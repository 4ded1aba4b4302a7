mod ast;
mod config;
mod diagnostics;
mod env;
mod error;
mod interpreter;
mod lexer;
mod operators;
mod parser;
mod token;
mod value;

use clap::Parser;
use config::{HELP_TEXT, VERSION, WELCOME_MESSAGE, WELCOME_SUBTITLE};
use diagnostics::Diagnostics;
use error::RuntimeError;
use interpreter::Interpreter;
use lexer::Lexer;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use std::path::PathBuf;
use std::process::ExitCode;

/// Leaf: a small C-like dynamically-typed scripting language interpreter
#[derive(Parser, Debug)]
#[command(name = "leaf")]
#[command(version = VERSION)]
#[command(about = "A tree-walking interpreter for the Leaf scripting language")]
#[command(long_about = "Runs a .leaf script file, or starts an interactive REPL when no file is given.")]
struct CliArgs {
    /// Script file to execute (optional - if not provided, starts the REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    if let Some(path) = args.script {
        return run_script(&path);
    }

    run_repl();
    ExitCode::SUCCESS
}

/// Formats a runtime fault the way the Leaf diagnostic conventions require:
/// `RuntimeError: [Near line N] - <message>`.
fn format_runtime_error(err: &RuntimeError) -> String {
    format!("RuntimeError: [Near line {}] - {}", err.line(), err)
}

fn run_script(path: &PathBuf) -> ExitCode {
    let source = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Cannot read script file {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let mut diagnostics = Diagnostics::new();
    let tokens = Lexer::new(&source).scan(&mut diagnostics);
    let statements = parser::parse(&tokens, &mut diagnostics);

    if diagnostics.has_errors() {
        for message in diagnostics.messages() {
            eprintln!("{message}");
        }
        return ExitCode::FAILURE;
    }

    let mut interpreter = Interpreter::new();
    if let Err(err) = interpreter.run(&statements) {
        eprintln!("{}", format_runtime_error(&err));
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run_repl() {
    println!("{WELCOME_MESSAGE}");
    println!("{WELCOME_SUBTITLE}");
    println!("{HELP_TEXT}");

    let config = Config::builder().auto_add_history(true).build();
    let mut rl = match Editor::<(), rustyline::history::DefaultHistory>::with_config(config) {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to initialize REPL: {e}");
            return;
        }
    };

    let history_file = ".leaf_history";
    let _ = rl.load_history(history_file);

    let mut interpreter = Interpreter::new();

    loop {
        let readline = rl.readline("leaf> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "exit" || trimmed == "exit;" {
                    break;
                }

                let mut diagnostics = Diagnostics::new();
                let tokens = Lexer::new(&line).scan(&mut diagnostics);
                let statements = parser::parse(&tokens, &mut diagnostics);

                if diagnostics.has_errors() {
                    for message in diagnostics.messages() {
                        eprintln!("{message}");
                    }
                    continue;
                }

                if let Err(err) = interpreter.run(&statements) {
                    eprintln!("{}", format_runtime_error(&err));
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("Error: {err}");
                break;
            }
        }
    }

    let _ = rl.save_history(history_file);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_runtime_error_with_required_prefix() {
        let err = RuntimeError::UndefinedVariable {
            name: "x".to_string(),
            line: 4,
        };
        let formatted = format_runtime_error(&err);
        assert!(formatted.starts_with("RuntimeError: [Near line 4] - "));
        assert!(formatted.contains("Undefined variable 'x'"));
    }
}
