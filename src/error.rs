/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Parse errors include syntax mistakes, unexpected tokens, layout
/// (indentation) problems, and unterminated literals. They are fatal for the
/// input that produced them.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation and
/// execution. Runtime errors include things like division by zero, type
/// mismatches under `any`, out-of-range indexing, or failed numeric
/// conversions.
pub mod runtime_error;
/// Binder diagnostics.
///
/// Defines the diagnostic record accumulated by the binder during name
/// resolution and type checking. Unlike parse and runtime errors,
/// diagnostics are collected rather than raised.
pub mod diagnostic;

pub use diagnostic::Diagnostic;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
