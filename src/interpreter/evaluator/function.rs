/// The dispatch table and call evaluation.
///
/// Defines the callable representation shared by built-ins and user
/// functions, and implements argument evaluation and the function-call
/// trampoline that consumes `return`.
pub mod core;

/// Built-in functions.
///
/// The host-provided primitives `print`, `input`, and `random`, together
/// with the shared symbol table the binder and the evaluator are seeded
/// from.
pub mod builtin;
