use crate::{
    error::RuntimeError,
    interpreter::{
        binder::bound::{BoundExpr, BoundStatement},
        evaluator::core::{Context, EvalResult, Flow},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a for-in loop.
    ///
    /// The enumerated expression must produce an array. The loop variable
    /// is written through the normal assignment path before each step, so
    /// the body observes (and may overwrite) it like any other variable. A
    /// `return` inside the body propagates outward immediately.
    ///
    /// # Parameters
    /// - `variable`: The loop variable name.
    /// - `iterable`: The bound enumerated expression.
    /// - `body`: The bound loop body.
    /// - `line`: Current line number used for error reporting.
    ///
    /// # Returns
    /// The resulting control flow; an empty array skips the body entirely.
    pub(crate) fn eval_for_in(&mut self,
                              variable: &str,
                              iterable: &BoundExpr,
                              body: &BoundStatement,
                              line: usize)
                              -> EvalResult<Flow> {
        let value = self.eval_child(iterable)?;
        let Value::Array(items) = value else {
            return Err(RuntimeError::ExpectedArray { line });
        };

        // Iterate over a snapshot so the body can grow or shrink the array
        // without invalidating the walk.
        let items = items.borrow().clone();
        for item in items {
            self.scopes.assign_nearest(variable, item);
            if let Flow::Return(value) = self.eval_statement(body)? {
                return Ok(Flow::Return(value));
            }
        }

        Ok(Flow::Normal(None))
    }
}
