use std::{collections::HashMap, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        binder::bound::{BoundExpr, BoundStatement},
        evaluator::function::core::{BuiltinFn, Callable},
        scope::Scope,
        types::{FunctionSymbol, TypeSymbol},
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How a statement finished.
///
/// `Return` is the non-local exit raised by a `return` statement; it
/// propagates outward through blocks and loops until the enclosing function
/// call consumes it. At the top level it is a runtime error.
#[derive(Debug)]
pub enum Flow {
    /// Normal completion, with the statement's value when it has one (only
    /// non-void expression statements do).
    Normal(Option<Value>),
    /// A `return` on its way to the enclosing function call.
    Return(Option<Value>),
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the runtime scope stack, whose
/// single global frame is pre-populated with the built-in functions, and
/// the function dispatch table mapping function symbols to callables. The
/// table is keyed by symbol identity, so shadowed declarations keep their
/// own entries.
///
/// ## Usage
///
/// `Context` is created once and reused for evaluating statements. One
/// invariant worth knowing when embedding it: the scope stack depth is 1
/// again after every completed top-level statement, on success and on every
/// error path.
pub struct Context {
    pub(crate) scopes:    Scope<Value>,
    pub(crate) functions: HashMap<FunctionSymbol, Callable>,
}

impl Context {
    /// Creates a new evaluation context with the given built-in functions
    /// in its dispatch table.
    ///
    /// The symbols must be the same ones the binder was seeded with, since
    /// the dispatch table is keyed by symbol identity.
    #[must_use]
    pub fn new(builtins: &[(FunctionSymbol, BuiltinFn)]) -> Self {
        let mut functions = HashMap::new();
        for (symbol, function) in builtins {
            functions.insert(symbol.clone(), Callable::Builtin(*function));
        }

        Self { scopes: Scope::new(),
               functions }
    }

    /// The current scope stack depth, counting the global frame.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.depth()
    }

    /// Evaluates a single statement.
    ///
    /// Statements return a [`Flow`]: either normal completion (with the
    /// echoable value for non-void expression statements) or a propagating
    /// `return`.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] when evaluation fails.
    pub fn eval_statement(&mut self, statement: &BoundStatement) -> EvalResult<Flow> {
        match statement {
            BoundStatement::Block { statements, .. } => self.eval_block(statements),

            BoundStatement::VariableDeclaration { name, initializer, .. } => {
                let value = match initializer {
                    Some(expr) => self.eval_child(expr)?,
                    // Declarations without an initializer default to
                    // integer zero, whatever the declared type.
                    None => Value::Integer(0),
                };
                self.scopes.declare(name.clone(), value);
                Ok(Flow::Normal(None))
            },

            BoundStatement::FunctionDeclaration { symbol, body, .. } => {
                self.declare_function(symbol.clone(), Rc::clone(body));
                Ok(Flow::Normal(None))
            },

            BoundStatement::Assignment { name, value, .. } => {
                let value = self.eval_child(value)?;
                self.scopes.assign_nearest(name, value);
                Ok(Flow::Normal(None))
            },

            BoundStatement::ArrayAssignment { access, value, span } => {
                self.eval_array_assignment(access, value, span.line)
            },

            BoundStatement::If { condition,
                                 then_branch,
                                 else_branch,
                                 .. } => {
                if self.eval_truthy(condition)? {
                    self.eval_statement(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.eval_statement(else_branch)
                } else {
                    Ok(Flow::Normal(None))
                }
            },

            BoundStatement::While { condition, body, .. } => {
                while self.eval_truthy(condition)? {
                    if let Flow::Return(value) = self.eval_statement(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal(None))
            },

            BoundStatement::DoWhile { body, condition, .. } => {
                loop {
                    if let Flow::Return(value) = self.eval_statement(body)? {
                        return Ok(Flow::Return(value));
                    }
                    if !self.eval_truthy(condition)? {
                        break;
                    }
                }
                Ok(Flow::Normal(None))
            },

            BoundStatement::ForIn { variable,
                                    iterable,
                                    body,
                                    span, } => {
                self.eval_for_in(variable, iterable, body, span.line)
            },

            BoundStatement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => Some(self.eval_child(expr)?),
                    None => None,
                };
                Ok(Flow::Return(value))
            },

            BoundStatement::Expression { expr, .. } => {
                let value = self.eval(expr)?;
                if expr.ty() == TypeSymbol::Void {
                    Ok(Flow::Normal(None))
                } else {
                    Ok(Flow::Normal(value))
                }
            },
        }
    }

    /// Evaluates a block inside a fresh scope frame.
    fn eval_block(&mut self, statements: &[BoundStatement]) -> EvalResult<Flow> {
        self.scopes.enter();
        let result = self.eval_block_statements(statements);
        // The frame is popped on every path: normal completion, runtime
        // errors, and propagating returns.
        self.scopes.leave();
        result
    }

    fn eval_block_statements(&mut self, statements: &[BoundStatement]) -> EvalResult<Flow> {
        for statement in statements {
            if let Flow::Return(value) = self.eval_statement(statement)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal(None))
    }

    /// Evaluates a condition. The value is expected to be a boolean;
    /// anything else counts as "not true".
    fn eval_truthy(&mut self, condition: &BoundExpr) -> EvalResult<bool> {
        Ok(matches!(self.eval_child(condition)?, Value::Bool(true)))
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The
    /// evaluator dispatches based on the bound node kind. `None` is
    /// produced only by void calls and void conversions.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] when evaluation fails.
    pub fn eval(&mut self, expr: &BoundExpr) -> EvalResult<Option<Value>> {
        match expr {
            BoundExpr::Integer { value, .. } => Ok(Some(Value::Integer(*value))),
            BoundExpr::Double { value, .. } => Ok(Some(Value::Double(*value))),
            BoundExpr::Bool { value, .. } => Ok(Some(Value::Bool(*value))),
            BoundExpr::Str { value, .. } => Ok(Some(Value::Str(value.clone()))),

            BoundExpr::Variable { name, span, .. } => {
                self.eval_variable(name, span.line).map(Some)
            },

            BoundExpr::Array { elements, .. } => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.eval_child(element)?);
                }
                Ok(Some(values.into()))
            },

            BoundExpr::Index { array, index, span, .. } => {
                self.eval_index_access(array, index, span.line).map(Some)
            },

            BoundExpr::Unary { op, operand, span } => {
                self.eval_unary(op, operand, span.line).map(Some)
            },

            BoundExpr::Increment { name,
                                   op,
                                   postfix,
                                   span, } => {
                self.eval_increment(name, op, *postfix, span.line).map(Some)
            },

            BoundExpr::Binary { left, op, right, span } => {
                self.eval_binary(left, op, right, span.line).map(Some)
            },

            BoundExpr::Call { symbol, arguments, span } => {
                self.eval_call(symbol, arguments, span.line)
            },

            BoundExpr::Conversion { target,
                                    expression,
                                    span, } => {
                self.eval_conversion(target, expression, span.line)
            },

            BoundExpr::Error { span, .. } => {
                Err(RuntimeError::TypeError { details: "Cannot evaluate an invalid expression"
                                                           .to_string(),
                                              line:    span.line, })
            },
        }
    }

    /// Evaluates a subexpression and ensures that it produces a value.
    ///
    /// Many evaluation paths require the same sequence: evaluate the
    /// expression, check for `None`, and report a missing-value error when
    /// the expression yields nothing (a void call used for its result).
    /// This helper centralizes that behavior so the operator and call logic
    /// stay simple.
    pub(crate) fn eval_child(&mut self, expr: &BoundExpr) -> EvalResult<Value> {
        self.eval(expr)?
            .ok_or(RuntimeError::MissingValue { line: expr.span().line })
    }

    /// Looks a variable up, innermost frame first.
    fn eval_variable(&self, name: &str, line: usize) -> EvalResult<Value> {
        self.scopes
            .resolve(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           line })
    }
}
