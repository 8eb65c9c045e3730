use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        binder::operators::BoundBinaryOperator,
        evaluator::core::EvalResult,
        types::TypeSymbol,
        value::core::Value,
    },
};

/// Evaluates arithmetic and concatenation.
///
/// The bound operator's result type selects the behavior: `string` means
/// concatenation via textual conversion, `double` means floating-point
/// arithmetic, `int` means checked integer arithmetic, and `any` defers
/// the same three-way choice to runtime value inspection (string wins over
/// double wins over int).
///
/// # Parameters
/// - `op`: The bound operator record.
/// - `left`: The evaluated left operand.
/// - `right`: The evaluated right operand.
/// - `line`: Current line number used for error reporting.
///
/// # Returns
/// The arithmetic result, or a runtime error for undefined combinations
/// under `any`, overflow, and division by zero.
pub(crate) fn eval_arithmetic(op: &BoundBinaryOperator,
                              left: &Value,
                              right: &Value,
                              line: usize)
                              -> EvalResult<Value> {
    match &op.result {
        TypeSymbol::String => Ok(Value::Str(format!("{left}{right}"))),
        TypeSymbol::Double => {
            double_arithmetic(op.op, left.as_double(line)?, right.as_double(line)?)
        },
        TypeSymbol::Int => {
            integer_arithmetic(op.op, left.as_integer(line)?, right.as_integer(line)?, line)
        },
        TypeSymbol::Any => dispatch_runtime(op.op, left, right, line),
        other => {
            Err(RuntimeError::TypeError { details: format!("Operator '{}' cannot produce type '{other}'",
                                                           op.op),
                                          line })
        },
    }
}

/// Picks the arithmetic for operands the binder could not type.
///
/// A string on either side concatenates (for `+` only); otherwise a double
/// on either side selects floating-point arithmetic; otherwise both sides
/// must be integers.
fn dispatch_runtime(op: BinaryOperator,
                    left: &Value,
                    right: &Value,
                    line: usize)
                    -> EvalResult<Value> {
    if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) {
        if op == BinaryOperator::Add {
            return Ok(Value::Str(format!("{left}{right}")));
        }
        return Err(undefined_for(op, left, right, line));
    }

    if !left.is_numeric() || !right.is_numeric() {
        return Err(undefined_for(op, left, right, line));
    }

    if matches!(left, Value::Double(_)) || matches!(right, Value::Double(_)) {
        return double_arithmetic(op, left.as_double(line)?, right.as_double(line)?);
    }

    integer_arithmetic(op, left.as_integer(line)?, right.as_integer(line)?, line)
}

fn undefined_for(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> RuntimeError {
    RuntimeError::TypeError { details: format!("Operator '{op}' is not defined for values of type '{}' and '{}'",
                                               left.kind(),
                                               right.kind()),
                              line }
}

/// Checked 64-bit integer arithmetic.
///
/// Overflow is reported rather than wrapped, and division by zero is a
/// runtime error.
fn integer_arithmetic(op: BinaryOperator, left: i64, right: i64, line: usize) -> EvalResult<Value> {
    let result = match op {
        BinaryOperator::Add => left.checked_add(right),
        BinaryOperator::Sub => left.checked_sub(right),
        BinaryOperator::Mul => left.checked_mul(right),
        BinaryOperator::Div => {
            if right == 0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            left.checked_div(right)
        },
        _ => unreachable!("integer_arithmetic used with non arithmetic operator"),
    };

    result.map(Value::Integer)
          .ok_or(RuntimeError::Overflow { line })
}

/// Double-precision arithmetic. Infinities and NaN follow IEEE behavior.
fn double_arithmetic(op: BinaryOperator, left: f64, right: f64) -> EvalResult<Value> {
    let result = match op {
        BinaryOperator::Add => left + right,
        BinaryOperator::Sub => left - right,
        BinaryOperator::Mul => left * right,
        BinaryOperator::Div => left / right,
        _ => unreachable!("double_arithmetic used with non arithmetic operator"),
    };

    Ok(Value::Double(result))
}
