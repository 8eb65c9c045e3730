use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        binder::{bound::BoundExpr, operators::BoundUnaryOperator},
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a plain unary operation (`+`, `-`, `!`).
    ///
    /// Identity and negation require a numeric value at runtime; logical
    /// NOT requires a boolean. Operands the binder typed as `any` dispatch
    /// on the runtime value's kind here.
    ///
    /// # Parameters
    /// - `op`: The bound operator record.
    /// - `operand`: The bound operand expression.
    /// - `line`: Current line number used for error reporting.
    ///
    /// # Returns
    /// The operation's result value.
    pub(crate) fn eval_unary(&mut self,
                             op: &BoundUnaryOperator,
                             operand: &BoundExpr,
                             line: usize)
                             -> EvalResult<Value> {
        let value = self.eval_child(operand)?;

        match op.op {
            UnaryOperator::Identity => {
                if value.is_numeric() {
                    Ok(value)
                } else {
                    Err(RuntimeError::ExpectedNumber { line })
                }
            },

            UnaryOperator::Negate => match value {
                Value::Integer(n) => {
                    n.checked_neg()
                     .map(Value::Integer)
                     .ok_or(RuntimeError::Overflow { line })
                },
                Value::Double(d) => Ok(Value::Double(-d)),
                _ => Err(RuntimeError::ExpectedNumber { line }),
            },

            UnaryOperator::Not => Ok(Value::Bool(!value.as_bool(line)?)),

            UnaryOperator::Increment | UnaryOperator::Decrement => {
                unreachable!("increments are bound to dedicated nodes")
            },
        }
    }

    /// Evaluates a pre- or post-increment/decrement.
    ///
    /// Reads the variable's current value, adds or subtracts one, stores
    /// the result back through the assignment path, and returns the new
    /// value (prefix) or the old one (postfix).
    pub(crate) fn eval_increment(&mut self,
                                 name: &str,
                                 op: &BoundUnaryOperator,
                                 postfix: bool,
                                 line: usize)
                                 -> EvalResult<Value> {
        let current = self.scopes
                          .resolve(name)
                          .cloned()
                          .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                                         line })?;

        let increment = matches!(op.op, UnaryOperator::Increment);
        let updated = match &current {
            Value::Integer(n) => {
                let step = if increment { 1 } else { -1 };
                Value::Integer(n.checked_add(step).ok_or(RuntimeError::Overflow { line })?)
            },
            Value::Double(d) => Value::Double(if increment { d + 1.0 } else { d - 1.0 }),
            _ => return Err(RuntimeError::ExpectedNumber { line }),
        };

        self.scopes.assign_nearest(name, updated.clone());
        Ok(if postfix { current } else { updated })
    }
}
