use crate::{
    ast::BinaryOperator,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Tolerance used when comparing numeric values for equality.
pub const EQUALITY_EPSILON: f64 = 1e-9;

/// Evaluates a comparison of the form `Value <Operator> Value`.
///
/// Relational operators coerce both sides to double and compare. Equality
/// uses an epsilon tolerance when both sides are numeric, and structural
/// equality otherwise (strings, booleans, and arrays compare element by
/// element).
///
/// # Parameters
/// - `op`: The comparison operator.
/// - `left`: The left-hand value.
/// - `right`: The right-hand value.
/// - `line`: Current line number used for error reporting.
///
/// # Returns
/// An `EvalResult<Value>` containing a boolean result.
pub(crate) fn eval_comparison(op: BinaryOperator,
                              left: &Value,
                              right: &Value,
                              line: usize)
                              -> EvalResult<Value> {
    Ok(Value::Bool(match op {
                       BinaryOperator::Equal => values_equal(left, right, line)?,
                       BinaryOperator::NotEqual => !values_equal(left, right, line)?,

                       BinaryOperator::Less
                       | BinaryOperator::LessEqual
                       | BinaryOperator::Greater
                       | BinaryOperator::GreaterEqual => {
                           let left = left.as_double(line)?;
                           let right = right.as_double(line)?;

                           match op {
                               BinaryOperator::Less => left < right,
                               BinaryOperator::LessEqual => left <= right,
                               BinaryOperator::Greater => left > right,
                               BinaryOperator::GreaterEqual => left >= right,
                               _ => unreachable!(),
                           }
                       },

                       _ => unreachable!("eval_comparison used with non comparison operator"),
                   }))
}

/// Equality with epsilon tolerance for numbers, structural equality for
/// everything else.
pub(crate) fn values_equal(left: &Value, right: &Value, line: usize) -> EvalResult<bool> {
    if left.is_numeric() && right.is_numeric() {
        let difference = (left.as_double(line)? - right.as_double(line)?).abs();
        return Ok(difference < EQUALITY_EPSILON);
    }

    Ok(left == right)
}
