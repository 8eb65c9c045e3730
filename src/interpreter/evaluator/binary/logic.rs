use crate::{
    ast::BinaryOperator,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Evaluates logical `&&` and `||`.
///
/// Both operands have already been evaluated by the binary dispatch; the
/// operators do not short-circuit. Each side must be a boolean at runtime.
///
/// # Parameters
/// - `op`: The logical operator.
/// - `left`: The left-hand value.
/// - `right`: The right-hand value.
/// - `line`: Current line number used for error reporting.
///
/// # Returns
/// An `EvalResult<Value>` containing a boolean result.
pub(crate) fn eval_logical(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
    let left = left.as_bool(line)?;
    let right = right.as_bool(line)?;

    Ok(Value::Bool(match op {
                       BinaryOperator::And => left && right,
                       BinaryOperator::Or => left || right,
                       _ => unreachable!("eval_logical used with non logical operator"),
                   }))
}
