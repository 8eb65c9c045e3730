use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{
        binder::bound::{BoundExpr, BoundStatement},
        evaluator::core::{Context, EvalResult, Flow},
        types::FunctionSymbol,
        value::core::Value,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives a slice of evaluated argument values and the line
/// number. It returns an optional value wrapped in `EvalResult`; `None`
/// stands for a void result.
pub type BuiltinFn = fn(&[Value], usize) -> EvalResult<Option<Value>>;

/// An entry in the function dispatch table.
///
/// Built-ins are host function pointers; user functions carry their bound
/// body, shared with the bound tree that declared them.
#[derive(Clone)]
pub enum Callable {
    /// A host-provided builtin.
    Builtin(BuiltinFn),
    /// A user-declared function body.
    User {
        /// The bound body to evaluate on call.
        body: Rc<BoundStatement>,
    },
}

impl Context {
    /// Registers a user function in the dispatch table.
    ///
    /// Keyed by symbol identity: re-declaring a name in a fresh scope adds
    /// a new entry instead of clobbering calls already bound to the old
    /// one.
    pub(crate) fn declare_function(&mut self, symbol: FunctionSymbol, body: Rc<BoundStatement>) {
        self.functions.insert(symbol, Callable::User { body });
    }

    /// Evaluates a call expression.
    ///
    /// All arguments are evaluated left to right first, then the callable
    /// is looked up by symbol identity and invoked with the argument
    /// vector.
    ///
    /// # Parameters
    /// - `symbol`: The resolved function symbol.
    /// - `arguments`: The bound argument expressions.
    /// - `line`: Current line number used for error reporting.
    ///
    /// # Returns
    /// The call's result; `None` for void built-ins and functions that
    /// finish without returning a value.
    pub(crate) fn eval_call(&mut self,
                            symbol: &FunctionSymbol,
                            arguments: &[BoundExpr],
                            line: usize)
                            -> EvalResult<Option<Value>> {
        let mut values = Vec::with_capacity(arguments.len());
        for argument in arguments {
            values.push(self.eval_child(argument)?);
        }

        let callable = self.functions
                           .get(symbol)
                           .cloned()
                           .ok_or_else(|| RuntimeError::UnknownFunction { name: symbol.name()
                                                                                      .to_string(),
                                                                          line })?;

        match callable {
            Callable::Builtin(function) => function(&values, line),
            Callable::User { body } => self.call_user_function(symbol, &body, values, line),
        }
    }

    /// Invokes a user function.
    ///
    /// A fresh frame is pushed onto the live scope stack (not a snapshot of
    /// the declaration site), the parameters are bound by position, and the
    /// body is evaluated. A propagating `return` is consumed here and
    /// becomes the call's result.
    fn call_user_function(&mut self,
                          symbol: &FunctionSymbol,
                          body: &BoundStatement,
                          values: Vec<Value>,
                          line: usize)
                          -> EvalResult<Option<Value>> {
        if values.len() != symbol.parameters().len() {
            return Err(RuntimeError::ArgumentCountMismatch { line });
        }

        self.scopes.enter();
        for (parameter, value) in symbol.parameters().iter().zip(values) {
            self.scopes.declare(parameter.name.clone(), value);
        }

        let flow = self.eval_statement(body);
        // The activation frame is popped even when the body errors or
        // exits through `return`.
        self.scopes.leave();

        match flow? {
            Flow::Return(value) => Ok(value),
            Flow::Normal(_) => Ok(None),
        }
    }
}
