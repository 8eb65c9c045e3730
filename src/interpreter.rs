/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens,
/// each corresponding to meaningful language elements such as numbers,
/// identifiers, operators, delimiters, and keywords. Because the language
/// is indentation-sensitive, the stream also carries synthetic INDENT,
/// DEDENT, and NEWLINE markers, and f-strings are desugared into
/// concatenation token sequences before parsing.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source spans.
/// - Measures indentation and emits balanced INDENT/DEDENT markers.
/// - Expands f-strings by re-entering the scanner on interpolations.
/// - Reports lexical errors for unterminated or malformed input.
pub mod lexer;
/// The parser module builds the concrete syntax tree (CST) from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs a CST that represents the syntactic structure of expressions
/// and statements, recovering block structure from the layout markers.
///
/// # Responsibilities
/// - Converts tokens into structured CST nodes (expressions, statements).
/// - Climbs the fixed operator precedence table for binary expressions.
/// - Validates correct grammar and syntax, reporting errors with location
///   info.
pub mod parser;
/// The binder module resolves names and types over the CST.
///
/// The binder walks the CST, resolves variable and function references
/// against the scope chain, checks and infers types, and produces a typed
/// ("bound") tree. Failures become diagnostics paired with error nodes;
/// binding itself never aborts.
///
/// # Responsibilities
/// - Produces the bound tree consumed by the evaluator.
/// - Resolves operators through the central operator tables.
/// - Collects human-readable diagnostics per top-level statement.
pub mod binder;
/// The evaluator module executes bound trees and computes results.
///
/// The evaluator traverses the bound tree, evaluates expressions and
/// statements against the runtime scope stack, dispatches calls through
/// the function table, and produces results. It is the core execution
/// engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates bound nodes, performing all supported operations.
/// - Handles variables, functions, and control flow, including the
///   non-local `return` exit.
/// - Reports runtime errors such as type mismatches under `any` or
///   out-of-range indexing.
pub mod evaluator;
/// The scope module defines the shared scope-chain shape.
///
/// One generic frame chain serves both pipeline halves: the binder tracks
/// declared types in it, and the evaluator tracks runtime values.
///
/// # Responsibilities
/// - Innermost-outward name resolution.
/// - Frame push/pop for blocks, loops, and function activations.
/// - The assignment path (write the innermost declaring frame).
pub mod scope;
/// The types module defines the type and symbol model.
///
/// Declares the type symbols shared by the binder and the evaluator,
/// along with parameter and function symbols. Function symbols compare by
/// identity so shadowed declarations stay distinct.
pub mod types;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares all the value types used during interpretation and
/// execution, and provides checked accessors and coercions for the
/// `any`-typed paths.
pub mod value;
