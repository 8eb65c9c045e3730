//! # aspid
//!
//! Aspid is an interpreter for a small, indentation-sensitive scripting
//! language with gradual typing. Source text runs through a four-stage
//! pipeline: an indentation-aware lexer (with f-string desugaring), a
//! precedence-climbing parser, a name-resolving and type-checking binder,
//! and a tree-walking evaluator over a runtime scope stack.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

use crate::{
    error::{Diagnostic, ParseError, RuntimeError},
    interpreter::{
        binder::core::Binder,
        evaluator::{
            core::{Context, Flow},
            function::builtin::builtins,
        },
        lexer::tokenize,
        parser::core::parse_program,
        value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types
/// that represent the syntactic structure of source code as a tree. The
/// CST is built by the parser and consumed by the binder.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source spans to CST nodes for error reporting.
pub mod ast;
/// Provides unified error types for parsing, binding, and evaluation.
///
/// This module defines all errors that can be raised while lexing,
/// parsing, binding, or evaluating code. It standardizes error reporting
/// and carries line information for every failure.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer/parser, evaluator).
/// - Defines the diagnostic record accumulated by the binder.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, binding, evaluation, value
/// representations, and all supporting infrastructure to provide a
/// complete runtime for source code execution.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, binder, and
///   evaluator.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert between `i64`, `usize`, and `f64` without silent data
///   loss.
pub mod util;

/// The observable result of one top-level statement.
#[derive(Debug)]
pub enum StatementOutcome {
    /// The statement produced a value worth echoing (a non-void expression
    /// statement).
    Value(Value),
    /// The statement executed without producing a value.
    Unit,
    /// The binder rejected the statement; it was not evaluated.
    Rejected(Vec<Diagnostic>),
    /// Evaluation aborted with a runtime error.
    Failed(RuntimeError),
}

/// A persistent interpreter session.
///
/// The session owns the binder (whose global scope accumulates
/// declarations) and the evaluation context (whose global frame holds the
/// runtime state), so both a file runner and a line-at-a-time REPL drive
/// the same code path. The built-in functions are created once and seed
/// both sides, since calls are dispatched by symbol identity.
///
/// # Example
/// ```
/// use aspid::{Session, StatementOutcome};
///
/// let mut session = Session::new();
/// let outcomes = session.execute("1 + 2 * 3").unwrap();
///
/// assert!(matches!(&outcomes[0], StatementOutcome::Value(v) if v.to_string() == "7"));
/// ```
pub struct Session {
    binder:  Binder,
    context: Context,
}

impl Session {
    /// Creates a session with the built-in functions registered.
    #[must_use]
    pub fn new() -> Self {
        let builtins = builtins();
        let symbols: Vec<_> = builtins.iter().map(|(symbol, _)| symbol.clone()).collect();

        Self { binder:  Binder::new(&symbols),
               context: Context::new(&builtins), }
    }

    /// Executes a piece of source text, statement by statement.
    ///
    /// Lex and parse errors are fatal for the whole input and surface as
    /// the `Err` variant. After that, every top-level statement is bound;
    /// statements with diagnostics are rejected without being evaluated,
    /// runtime errors abort only their own statement, and execution
    /// continues with the next one. A `return` escaping to the top level
    /// is a runtime error.
    ///
    /// # Errors
    /// Returns a [`ParseError`] when tokenizing or parsing fails.
    pub fn execute(&mut self, source: &str) -> Result<Vec<StatementOutcome>, ParseError> {
        let tokens = tokenize(source)?;
        let statements = parse_program(&tokens)?;

        let mut outcomes = Vec::with_capacity(statements.len());
        for statement in &statements {
            let bound = self.binder.bind_statement(statement);
            let diagnostics = self.binder.take_diagnostics();
            if !diagnostics.is_empty() {
                outcomes.push(StatementOutcome::Rejected(diagnostics));
                continue;
            }

            let outcome = match self.context.eval_statement(&bound) {
                Ok(Flow::Normal(Some(value))) => StatementOutcome::Value(value),
                Ok(Flow::Normal(None)) => StatementOutcome::Unit,
                Ok(Flow::Return(_)) => {
                    StatementOutcome::Failed(RuntimeError::ReturnOutsideFunction { line:
                                                                                      statement.line() })
                },
                Err(error) => StatementOutcome::Failed(error),
            };
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    /// The current runtime scope stack depth; 1 between top-level
    /// statements.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.context.depth()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Executes a whole program, failing on the first rejected or failed
/// statement.
///
/// This is the strict entry point used by tests and batch embedding; the
/// CLI drives [`Session::execute`] directly so it can keep going after
/// errors.
///
/// # Errors
/// Returns the parse error, the first binder diagnostic, or the first
/// runtime error encountered.
///
/// # Examples
/// ```
/// use aspid::run_program;
///
/// assert!(run_program("x: int = 2\nprint(x + 2)").is_ok());
///
/// // 'y' is not declared.
/// assert!(run_program("print(y)").is_err());
/// ```
pub fn run_program(source: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new();

    for outcome in session.execute(source)? {
        match outcome {
            StatementOutcome::Value(_) | StatementOutcome::Unit => {},
            StatementOutcome::Rejected(mut diagnostics) => {
                return Err(Box::new(diagnostics.remove(0)));
            },
            StatementOutcome::Failed(error) => return Err(Box::new(error)),
        }
    }

    Ok(())
}
