use crate::{
    error::RuntimeError,
    interpreter::{
        binder::bound::BoundExpr,
        evaluator::core::{Context, EvalResult, Flow},
        types::TypeSymbol,
        value::core::Value,
    },
    util::num::{f64_truncate_to_i64, i64_to_f64_checked, i64_to_usize_checked},
};

impl Context {
    /// Evaluates an array element access.
    ///
    /// The index converts to an integer (integral doubles are accepted),
    /// negative indices count from the end (`-1` is the last element), and
    /// anything out of range is a runtime error.
    pub(crate) fn eval_index_access(&mut self,
                                    array: &BoundExpr,
                                    index: &BoundExpr,
                                    line: usize)
                                    -> EvalResult<Value> {
        let items = self.eval_child(array)?.as_array(line)?;
        let index = self.eval_child(index)?.to_index(line)?;

        let items = items.borrow();
        let resolved = resolve_index(index, items.len(), line)?;
        Ok(items[resolved].clone())
    }

    /// Evaluates an assignment through an array access.
    ///
    /// The access expression produces the shared array, so writes are
    /// visible through every reference to it, including nested accesses
    /// like `grid[1][2] = x`.
    pub(crate) fn eval_array_assignment(&mut self,
                                        access: &BoundExpr,
                                        value: &BoundExpr,
                                        line: usize)
                                        -> EvalResult<Flow> {
        let BoundExpr::Index { array, index, .. } = access else {
            return Err(RuntimeError::TypeError { details: "Array assignment through a non-access expression".to_string(),
                                                 line });
        };

        let items = self.eval_child(array)?.as_array(line)?;
        let index = self.eval_child(index)?.to_index(line)?;
        let value = self.eval_child(value)?;

        let mut items = items.borrow_mut();
        let resolved = resolve_index(index, items.len(), line)?;
        items[resolved] = value;

        Ok(Flow::Normal(None))
    }

    /// Evaluates a conversion node.
    ///
    /// A conversion to `void` discards the value. Everything else goes
    /// through [`convert_value`].
    pub(crate) fn eval_conversion(&mut self,
                                  target: &TypeSymbol,
                                  expression: &BoundExpr,
                                  line: usize)
                                  -> EvalResult<Option<Value>> {
        if *target == TypeSymbol::Void {
            self.eval(expression)?;
            return Ok(None);
        }

        let value = self.eval_child(expression)?;
        convert_value(value, target, line).map(Some)
    }
}

/// Resolves a possibly negative index against an array length.
///
/// Negative `i` means `len + i`. The resolved index must land inside the
/// array.
pub(crate) fn resolve_index(index: i64, len: usize, line: usize) -> EvalResult<usize> {
    let adjusted = if index < 0 {
        let Ok(len) = i64::try_from(len) else {
            return Err(RuntimeError::LiteralTooLarge { line });
        };
        index + len
    } else {
        index
    };

    if adjusted < 0 {
        return Err(RuntimeError::IndexOutOfBounds { len, index, line });
    }
    let resolved = i64_to_usize_checked(adjusted, line)?;
    if resolved >= len {
        return Err(RuntimeError::IndexOutOfBounds { len, index, line });
    }

    Ok(resolved)
}

/// Applies the runtime conversion rules.
///
/// - `any` accepts every value unchanged.
/// - `int` accepts integers, truncates doubles, and parses strings
///   (whitespace-trimmed, `0x`/`0X` prefix for base 16, base 10
///   otherwise).
/// - `double` accepts doubles and widens integers.
/// - `bool` accepts booleans and maps nonzero numbers to `true`.
/// - `string` renders any value as text.
/// - Array targets accept arrays; element types stay gradual.
pub(crate) fn convert_value(value: Value, target: &TypeSymbol, line: usize) -> EvalResult<Value> {
    match target {
        TypeSymbol::Any => Ok(value),

        TypeSymbol::Int => match value {
            Value::Integer(_) => Ok(value),
            Value::Double(d) => f64_truncate_to_i64(d, line).map(Value::Integer),
            Value::Str(text) => parse_int_text(&text, line),
            other => Err(cannot_convert(&other, target, line)),
        },

        TypeSymbol::Double => match value {
            Value::Double(_) => Ok(value),
            Value::Integer(n) => {
                i64_to_f64_checked(n, RuntimeError::LiteralTooLarge { line }).map(Value::Double)
            },
            other => Err(cannot_convert(&other, target, line)),
        },

        TypeSymbol::Bool => match value {
            Value::Bool(_) => Ok(value),
            Value::Integer(n) => Ok(Value::Bool(n != 0)),
            Value::Double(d) => Ok(Value::Bool(d != 0.0)),
            other => Err(cannot_convert(&other, target, line)),
        },

        TypeSymbol::String => Ok(Value::Str(value.to_string())),

        TypeSymbol::Array(_) => match value {
            Value::Array(_) => Ok(value),
            other => Err(cannot_convert(&other, target, line)),
        },

        TypeSymbol::Void | TypeSymbol::Error => {
            Err(RuntimeError::TypeError { details: format!("Cannot convert to '{target}'"),
                                          line })
        },
    }
}

fn cannot_convert(value: &Value, target: &TypeSymbol, line: usize) -> RuntimeError {
    RuntimeError::TypeError { details: format!("Cannot convert a value of type '{}' to '{target}'",
                                               value.kind()),
                              line }
}

/// Parses the explicit `int(text)` conversion.
///
/// The text is whitespace-trimmed, an optional sign is honoured, and a
/// `0x`/`0X` prefix selects base 16.
fn parse_int_text(text: &str, line: usize) -> EvalResult<Value> {
    let trimmed = text.trim();
    let (digits, negative) = match trimmed.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (trimmed.strip_prefix('+').unwrap_or(trimmed), false),
    };

    let parsed = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16)
    } else {
        digits.parse::<i64>()
    };

    match parsed {
        Ok(value) => {
            let value = if negative {
                value.checked_neg().ok_or(RuntimeError::Overflow { line })?
            } else {
                value
            };
            Ok(Value::Integer(value))
        },
        Err(_) => {
            Err(RuntimeError::InvalidArgument { details: format!("Cannot convert '{text}' to 'int'"),
                                                line })
        },
    }
}
