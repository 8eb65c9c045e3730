use std::io;

use rand::Rng;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, function::core::BuiltinFn},
        types::{FunctionSymbol, ParameterSymbol, TypeSymbol},
        value::core::Value,
    },
};

/// Builds the built-in function table.
///
/// The same symbols must seed both the binder's global scope and the
/// evaluator's dispatch table: calls are bound to symbols and dispatched by
/// symbol identity, so the two sides have to agree on the exact instances.
///
/// | Symbol                      | Effect                                        |
/// |-----------------------------|-----------------------------------------------|
/// | `print(x: any)`             | Writes `x` and a newline to standard output.  |
/// | `input() -> string`         | Reads a line from standard input.             |
/// | `random(min, max) -> int`   | Uniform integer in `[min, max)`.              |
#[must_use]
pub fn builtins() -> Vec<(FunctionSymbol, BuiltinFn)> {
    vec![(FunctionSymbol::new("print",
                              vec![ParameterSymbol { name: "x".to_string(),
                                                     ty:   TypeSymbol::Any, }],
                              TypeSymbol::Void),
          print as BuiltinFn),
         (FunctionSymbol::new("input", Vec::new(), TypeSymbol::String), input as BuiltinFn),
         (FunctionSymbol::new("random",
                              vec![ParameterSymbol { name: "min".to_string(),
                                                     ty:   TypeSymbol::Int, },
                                   ParameterSymbol { name: "max".to_string(),
                                                     ty:   TypeSymbol::Int, }],
                              TypeSymbol::Int),
          random as BuiltinFn)]
}

/// Writes a human-readable rendering of the argument followed by a
/// newline. Arrays render as `[e1, e2, …]`.
fn print(args: &[Value], line: usize) -> EvalResult<Option<Value>> {
    let [value] = args else {
        return Err(RuntimeError::ArgumentCountMismatch { line });
    };

    println!("{value}");
    Ok(None)
}

/// Reads a line from standard input. End of input yields the empty
/// string; the trailing newline is stripped.
fn input(_args: &[Value], _line: usize) -> EvalResult<Option<Value>> {
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        line.clear();
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }

    Ok(Some(Value::Str(line)))
}

/// Returns a uniform random integer in `[min, max)`.
fn random(args: &[Value], line: usize) -> EvalResult<Option<Value>> {
    let [min, max] = args else {
        return Err(RuntimeError::ArgumentCountMismatch { line });
    };
    let min = min.as_integer(line)?;
    let max = max.as_integer(line)?;

    if min >= max {
        return Err(RuntimeError::InvalidArgument { details: format!("random(min, max) requires min < max, got {min} and {max}"),
                                                   line });
    }

    Ok(Some(Value::Integer(rand::thread_rng().gen_range(min..max))))
}
