use crate::{
    ast::BinaryOperator,
    interpreter::{
        binder::{bound::BoundExpr, operators::BoundBinaryOperator},
        evaluator::{
            binary::{arithmetic::eval_arithmetic, comparison::eval_comparison,
                     logic::eval_logical},
            core::{Context, EvalResult},
        },
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a binary operation.
    ///
    /// Both operands are evaluated left to right before the operator is
    /// applied; `&&` and `||` do not short-circuit.
    ///
    /// # Parameters
    /// - `left`: The bound left operand.
    /// - `op`: The bound operator record chosen by the binder.
    /// - `right`: The bound right operand.
    /// - `line`: Current line number used for error reporting.
    ///
    /// # Returns
    /// The operation's result value.
    pub(crate) fn eval_binary(&mut self,
                              left: &BoundExpr,
                              op: &BoundBinaryOperator,
                              right: &BoundExpr,
                              line: usize)
                              -> EvalResult<Value> {
        let left = self.eval_child(left)?;
        let right = self.eval_child(right)?;

        match op.op {
            BinaryOperator::Add
            | BinaryOperator::Sub
            | BinaryOperator::Mul
            | BinaryOperator::Div => eval_arithmetic(op, &left, &right, line),

            BinaryOperator::Equal
            | BinaryOperator::NotEqual
            | BinaryOperator::Less
            | BinaryOperator::LessEqual
            | BinaryOperator::Greater
            | BinaryOperator::GreaterEqual => eval_comparison(op.op, &left, &right, line),

            BinaryOperator::And | BinaryOperator::Or => eval_logical(op.op, &left, &right, line),
        }
    }
}
