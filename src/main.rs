use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process,
};

use aspid::{Session, StatementOutcome};
use clap::Parser;

/// aspid is an interpreter for a small, indentation-sensitive scripting
/// language with gradual typing.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script file to execute. Omit to start an interactive session.
    file: Option<PathBuf>,
}

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

fn main() {
    let args = Args::parse();

    match args.file {
        Some(path) => run_file(&path),
        None => run_repl(),
    }
}

/// Executes a script file.
///
/// Diagnostics and runtime errors are reported per statement and execution
/// continues with the next one; only an unreadable file terminates with a
/// nonzero exit status.
fn run_file(path: &Path) {
    let source = fs::read_to_string(path).unwrap_or_else(|_| {
                     eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                               path.display());
                     process::exit(1);
                 });

    let mut session = Session::new();
    match session.execute(&source) {
        Ok(outcomes) => render_outcomes(&outcomes, false),
        Err(error) => eprintln!("{RED}{error}{RESET}"),
    }
}

/// Runs the interactive line-at-a-time session.
///
/// Each line is executed against the persistent session; parse errors and
/// runtime errors are reported without ending the loop. End of input
/// (Ctrl-D) exits.
fn run_repl() {
    let mut session = Session::new();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return;
        }

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => {
                println!();
                return;
            },
            Ok(_) => {},
        }
        if line.trim().is_empty() {
            continue;
        }

        match session.execute(&line) {
            Ok(outcomes) => render_outcomes(&outcomes, true),
            Err(error) => eprintln!("{RED}{error}{RESET}"),
        }
    }
}

/// Renders statement outcomes: diagnostics in red on stderr, runtime
/// errors in red prefixed with `Runtime Error:`, and (in the REPL) echoed
/// values in green on stdout.
fn render_outcomes(outcomes: &[StatementOutcome], echo: bool) {
    for outcome in outcomes {
        match outcome {
            StatementOutcome::Value(value) => {
                if echo {
                    println!("{GREEN}{value}{RESET}");
                }
            },
            StatementOutcome::Unit => {},
            StatementOutcome::Rejected(diagnostics) => {
                for diagnostic in diagnostics {
                    eprintln!("{RED}{diagnostic}{RESET}");
                }
            },
            StatementOutcome::Failed(error) => {
                eprintln!("{RED}Runtime Error: {error}{RESET}");
            },
        }
    }
}
