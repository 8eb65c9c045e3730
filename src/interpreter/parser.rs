/// Program and expression entry points.
///
/// Contains the top-level statement loop and the expression entry that
/// starts the precedence climb.
pub mod core;

/// Statement parsing.
///
/// Implements the statement dispatch and the individual statement forms:
/// declarations, assignments, control flow, and `return`.
pub mod statement;

/// Block parsing.
///
/// Parses INDENT…DEDENT delimited statement groups.
pub mod block;

/// Binary expression parsing.
///
/// Implements precedence climbing over the fixed operator table and the
/// token-to-operator mapping.
pub mod binary;

/// Unary, postfix, and primary expression parsing.
///
/// Handles prefix operators, the postfix suffix loop (calls, indexing,
/// `++`/`--`), and the primary forms.
pub mod unary;

/// Utility functions for the parser.
///
/// Provides helpers shared by the statement and expression parsers, such as
/// comma-separated lists and token expectations.
pub mod utils;
