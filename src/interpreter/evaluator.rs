/// Core evaluation logic and context management.
///
/// Contains the main evaluation engine, the runtime scope stack, statement
/// dispatch, and the `return` flow threading.
pub mod core;

/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions, including
/// arithmetic, concatenation, comparisons, and logical operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic identity and negation, logical NOT, and the
/// read-modify-write increment/decrement operators.
pub mod unary;

/// Evaluation of for-in loops.
///
/// Iterates arrays, manages the loop variable, and executes the loop body
/// in context.
pub mod for_loop;

/// Function evaluation.
///
/// Handles the function dispatch table, user-defined function calls, and
/// the built-in functions.
pub mod function;

/// Utility functions for evaluation.
///
/// Provides index resolution, element access, array assignment, and the
/// runtime conversion rules.
pub mod utils;
