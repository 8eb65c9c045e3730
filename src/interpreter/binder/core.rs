use std::{collections::HashSet, rc::Rc};

use crate::{
    ast::{BinaryOperator, Expr, Parameter, Statement, UnaryOperator},
    error::Diagnostic,
    interpreter::{
        binder::{
            bound::{BoundExpr, BoundStatement},
            operators::{Conversion, bind_binary_operator, bind_unary_operator,
                        classify_conversion},
        },
        lexer::Span,
        scope::Scope,
        types::{FunctionSymbol, ParameterSymbol, TypeSymbol},
    },
};

/// Resolves names and types over the CST, producing the bound tree.
///
/// The binder holds the compile-time scope chain and a diagnostic list.
/// Binding never fails for a well-formed CST: every error path appends one
/// diagnostic and returns one [`BoundExpr::Error`] node carrying the same
/// text. The driver flushes the diagnostics after each top-level statement
/// and skips evaluation when any were produced.
///
/// The global frame persists across `bind_statement` calls, which is what
/// lets a REPL session accumulate declarations line by line.
pub struct Binder {
    scopes:      Scope<TypeSymbol>,
    diagnostics: Vec<Diagnostic>,
}

impl Binder {
    /// Creates a binder whose global frame knows the given built-in
    /// functions.
    #[must_use]
    pub fn new(builtins: &[FunctionSymbol]) -> Self {
        let mut scopes = Scope::new();
        for symbol in builtins {
            scopes.declare_function(symbol.clone());
        }

        Self { scopes,
               diagnostics: Vec::new() }
    }

    /// The diagnostics collected so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Takes all collected diagnostics, leaving the list empty.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Appends a diagnostic and returns its paired error node.
    fn report(&mut self, message: impl Into<String>, span: Span) -> BoundExpr {
        let message = message.into();
        self.diagnostics.push(Diagnostic::new(message.clone(), span.line));
        BoundExpr::Error { message, span }
    }

    /// Like [`Binder::report`], wrapped as a statement.
    fn report_statement(&mut self, message: impl Into<String>, span: Span) -> BoundStatement {
        let expr = self.report(message, span);
        BoundStatement::Expression { expr, span }
    }

    /// Binds a single statement, dispatching on its CST kind.
    pub fn bind_statement(&mut self, statement: &Statement) -> BoundStatement {
        match statement {
            Statement::Block { statements, span } => self.bind_block(statements, *span),
            Statement::VariableDeclaration { name,
                                             type_name,
                                             initializer,
                                             span, } => {
                self.bind_variable_declaration(name, type_name, initializer.as_ref(), *span)
            },
            Statement::FunctionDeclaration { name,
                                             parameters,
                                             return_type,
                                             body,
                                             span, } => {
                self.bind_function_declaration(name, parameters, return_type.as_deref(), body,
                                               *span)
            },
            Statement::Assignment { target, value, span } => {
                self.bind_assignment(target, value, *span)
            },
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            span, } => {
                let condition = self.bind_condition(condition);
                let then_branch = Box::new(self.bind_statement(then_branch));
                let else_branch = else_branch.as_ref()
                                             .map(|branch| Box::new(self.bind_statement(branch)));
                BoundStatement::If { condition,
                                     then_branch,
                                     else_branch,
                                     span: *span }
            },
            Statement::While { condition, body, span } => {
                let condition = self.bind_condition(condition);
                let body = Box::new(self.bind_statement(body));
                BoundStatement::While { condition,
                                        body,
                                        span: *span }
            },
            Statement::DoWhile { body, condition, span } => {
                let body = Box::new(self.bind_statement(body));
                let condition = self.bind_condition(condition);
                BoundStatement::DoWhile { body,
                                          condition,
                                          span: *span }
            },
            Statement::ForIn { variable,
                               iterable,
                               body,
                               span, } => self.bind_for_in(variable, iterable, body, *span),
            Statement::Return { value, span } => {
                // The declared return type is deliberately not checked.
                let value = value.as_ref().map(|expr| self.bind_expression(expr));
                BoundStatement::Return { value, span: *span }
            },
            Statement::Expression { expr, span } => {
                let expr = self.bind_expression(expr);
                BoundStatement::Expression { expr, span: *span }
            },
        }
    }

    /// Binds a block inside a fresh scope frame.
    fn bind_block(&mut self, statements: &[Statement], span: Span) -> BoundStatement {
        self.scopes.enter();
        let statements = statements.iter()
                                   .map(|statement| self.bind_statement(statement))
                                   .collect();
        self.scopes.leave();

        BoundStatement::Block { statements, span }
    }

    /// Binds a variable declaration.
    ///
    /// The declared type must exist, the name must not already be declared
    /// in the innermost frame, and the initializer (when present) must
    /// convert to the declared type. Shadowing an outer frame is allowed.
    fn bind_variable_declaration(&mut self,
                                 name: &str,
                                 type_name: &str,
                                 initializer: Option<&Expr>,
                                 span: Span)
                                 -> BoundStatement {
        let Some(ty) = TypeSymbol::parse(type_name) else {
            return self.report_statement(format!("Type '{type_name}' does not exist"), span);
        };

        if self.scopes.resolve_local(name).is_some() {
            return self.report_statement(format!("Variable '{name}' is already declared in this scope"),
                                         span);
        }

        let initializer = initializer.map(|expr| {
                                         let bound = self.bind_expression(expr);
                                         self.convert_implicit(bound, &ty, span)
                                     });

        self.scopes.declare(name, ty.clone());
        BoundStatement::VariableDeclaration { name: name.to_string(),
                                              ty,
                                              initializer,
                                              span }
    }

    /// Binds a function declaration and its body.
    ///
    /// The name must not collide with a declared variable, function, or
    /// built-in type name. Parameters without annotations default to `any`,
    /// as does an omitted return type. The body is bound inside a fresh
    /// scope containing the parameters.
    fn bind_function_declaration(&mut self,
                                 name: &str,
                                 parameters: &[Parameter],
                                 return_type: Option<&str>,
                                 body: &Statement,
                                 span: Span)
                                 -> BoundStatement {
        if self.scopes.resolve(name).is_some()
           || self.scopes.resolve_function(name).is_some()
           || TypeSymbol::parse(name).is_some()
        {
            return self.report_statement(format!("The name '{name}' is already in use"), span);
        }

        let mut seen = HashSet::new();
        let mut symbols = Vec::with_capacity(parameters.len());
        for parameter in parameters {
            if !seen.insert(parameter.name.as_str()) {
                return self.report_statement(format!("Duplicate parameter name '{}'",
                                                     parameter.name),
                                             parameter.span);
            }

            let ty = match &parameter.type_name {
                Some(text) => match TypeSymbol::parse(text) {
                    Some(ty) => ty,
                    None => {
                        return self.report_statement(format!("Type '{text}' does not exist"),
                                                     parameter.span);
                    },
                },
                None => TypeSymbol::Any,
            };
            symbols.push(ParameterSymbol { name: parameter.name.clone(),
                                           ty });
        }

        let return_type = match return_type {
            Some(text) => match TypeSymbol::parse(text) {
                Some(ty) => ty,
                None => {
                    return self.report_statement(format!("Type '{text}' does not exist"), span);
                },
            },
            None => TypeSymbol::Any,
        };

        let symbol = FunctionSymbol::new(name, symbols, return_type);
        self.scopes.declare_function(symbol.clone());

        self.scopes.enter();
        for parameter in symbol.parameters() {
            self.scopes.declare(parameter.name.clone(), parameter.ty.clone());
        }
        let body = Rc::new(self.bind_statement(body));
        self.scopes.leave();

        BoundStatement::FunctionDeclaration { symbol, body, span }
    }

    /// Binds an assignment to a variable or an array element.
    ///
    /// Assigning to an unseen variable declares it as `any`. Assigning to a
    /// typed variable or array element inserts an implicit conversion when
    /// the target type is not `any`.
    fn bind_assignment(&mut self, target: &Expr, value: &Expr, span: Span) -> BoundStatement {
        match target {
            Expr::Variable { name, .. } => {
                let bound_value = self.bind_expression(value);

                if let Some(target_ty) = self.scopes.resolve(name).cloned() {
                    let bound_value = self.convert_implicit(bound_value, &target_ty, span);
                    BoundStatement::Assignment { name: name.clone(),
                                                 value: bound_value,
                                                 span }
                } else {
                    self.scopes.declare(name.clone(), TypeSymbol::Any);
                    BoundStatement::Assignment { name: name.clone(),
                                                 value: bound_value,
                                                 span }
                }
            },

            Expr::Index { .. } => {
                let access = self.bind_expression(target);
                if let BoundExpr::Error { .. } = access {
                    return BoundStatement::Expression { expr: access, span };
                }
                if !index_root_is_variable(&access) {
                    return self.report_statement("The target of an array assignment must be a variable",
                                                 span);
                }

                let element = access.ty();
                let bound_value = self.bind_expression(value);
                let bound_value = self.convert_implicit(bound_value, &element, span);

                BoundStatement::ArrayAssignment { access,
                                                  value: bound_value,
                                                  span }
            },

            _ => self.report_statement("Only variables and array elements can be assigned to",
                                       span),
        }
    }

    /// Binds a loop or conditional condition, which must have type `bool`.
    ///
    /// `any` does not satisfy this check.
    fn bind_condition(&mut self, condition: &Expr) -> BoundExpr {
        let bound = self.bind_expression(condition);
        let ty = bound.ty();

        if ty.is_error() || ty == TypeSymbol::Bool {
            bound
        } else {
            self.report(format!("Condition must be of type 'bool', but was '{ty}'"),
                        bound.span())
        }
    }

    /// Binds a for-in loop.
    ///
    /// The enumerated expression must have an array type or `any`. The loop
    /// variable is declared in its own scope frame with the element type.
    fn bind_for_in(&mut self,
                   variable: &str,
                   iterable: &Expr,
                   body: &Statement,
                   span: Span)
                   -> BoundStatement {
        let iterable = self.bind_expression(iterable);
        let ty = iterable.ty();

        let element = match &ty {
            TypeSymbol::Array(element) => (**element).clone(),
            TypeSymbol::Any | TypeSymbol::Error => TypeSymbol::Any,
            _ => {
                let expr = self.report(format!("Type '{ty}' is not enumerable"), iterable.span());
                return BoundStatement::Expression { expr, span };
            },
        };

        self.scopes.enter();
        self.scopes.declare(variable, element);
        let body = Box::new(self.bind_statement(body));
        self.scopes.leave();

        BoundStatement::ForIn { variable: variable.to_string(),
                                iterable,
                                body,
                                span }
    }

    /// Binds a single expression, dispatching on its CST kind.
    pub fn bind_expression(&mut self, expr: &Expr) -> BoundExpr {
        match expr {
            Expr::Number { text, span } => self.bind_number(text, *span),
            Expr::Str { value, span } => {
                BoundExpr::Str { value: value.clone(),
                                 span:  *span, }
            },
            Expr::Bool { value, span } => {
                BoundExpr::Bool { value: *value,
                                  span:  *span, }
            },
            Expr::Variable { name, span } => self.bind_variable(name, *span),
            Expr::Array { elements, span } => self.bind_array(elements, *span),
            Expr::Index { array, index, span } => self.bind_index(array, index, *span),
            Expr::Unary { op,
                          operand,
                          postfix,
                          span, } => self.bind_unary(*op, operand, *postfix, *span),
            Expr::Binary { left, op, right, span } => self.bind_binary(left, *op, right, *span),
            Expr::Call { callee, arguments, span } => self.bind_call(callee, arguments, *span),
            Expr::Parenthesized { expression, .. } => self.bind_expression(expression),
        }
    }

    /// Parses a number literal as hex-int, decimal-int, or double, in that
    /// order.
    fn bind_number(&mut self, text: &str, span: Span) -> BoundExpr {
        if let Some(digits) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            return match i64::from_str_radix(digits, 16) {
                Ok(value) => BoundExpr::Integer { value, span },
                Err(_) => {
                    self.report(format!("The literal '{text}' is not a valid number"), span)
                },
            };
        }

        if let Ok(value) = text.parse::<i64>() {
            return BoundExpr::Integer { value, span };
        }

        match text.parse::<f64>() {
            Ok(value) => BoundExpr::Double { value, span },
            Err(_) => self.report(format!("The literal '{text}' is not a valid number"), span),
        }
    }

    /// Resolves a variable reference against the scope chain.
    fn bind_variable(&mut self, name: &str, span: Span) -> BoundExpr {
        match self.scopes.resolve(name) {
            Some(ty) => {
                BoundExpr::Variable { name: name.to_string(),
                                      ty: ty.clone(),
                                      span }
            },
            None => self.report(format!("Variable '{name}' is not declared"), span),
        }
    }

    /// Binds an array literal.
    ///
    /// The array type is `T[]` when all elements share the type `T`, and
    /// `any[]` otherwise (including the empty literal).
    fn bind_array(&mut self, elements: &[Expr], span: Span) -> BoundExpr {
        let elements: Vec<BoundExpr> = elements.iter()
                                               .map(|element| self.bind_expression(element))
                                               .collect();
        let element_ty = common_element_type(&elements);

        BoundExpr::Array { elements,
                           ty: TypeSymbol::Array(Box::new(element_ty)),
                           span }
    }

    /// Binds an array access.
    ///
    /// The array expression must have an array type or `any`, and the index
    /// must be `int` or `any`. The result type is the element type, or
    /// `any` when the array itself is `any`.
    fn bind_index(&mut self, array: &Expr, index: &Expr, span: Span) -> BoundExpr {
        let array = self.bind_expression(array);
        let array_ty = array.ty();
        if array_ty.is_error() {
            return array;
        }

        let element = match &array_ty {
            TypeSymbol::Array(element) => (**element).clone(),
            TypeSymbol::Any => TypeSymbol::Any,
            _ => return self.report(format!("Type '{array_ty}' cannot be indexed"), span),
        };

        let index = self.bind_expression(index);
        let index_ty = index.ty();
        if index_ty.is_error() {
            return index;
        }
        if !matches!(index_ty, TypeSymbol::Int | TypeSymbol::Any) {
            return self.report(format!("Array index must be of type 'int', but was '{index_ty}'"),
                               index.span());
        }

        BoundExpr::Index { array: Box::new(array),
                           index: Box::new(index),
                           ty: element,
                           span }
    }

    /// Binds a unary operation.
    ///
    /// `++`/`--` bind to a dedicated increment node carrying the variable
    /// name, since they read and write their operand.
    fn bind_unary(&mut self,
                  op: UnaryOperator,
                  operand: &Expr,
                  postfix: bool,
                  span: Span)
                  -> BoundExpr {
        if matches!(op, UnaryOperator::Increment | UnaryOperator::Decrement) {
            let Expr::Variable { name, .. } = operand else {
                return self.report("'++' and '--' require a variable operand", span);
            };

            let bound_operand = self.bind_variable(name, operand.span());
            let ty = bound_operand.ty();
            if ty.is_error() {
                return bound_operand;
            }

            return match bind_unary_operator(op, &ty) {
                Some(bound_op) => {
                    BoundExpr::Increment { name: name.clone(),
                                           op: bound_op,
                                           postfix,
                                           span }
                },
                None => {
                    self.report(format!("Unary operator '{op}' is not defined for type '{ty}'"),
                                span)
                },
            };
        }

        let operand = self.bind_expression(operand);
        let ty = operand.ty();
        if ty.is_error() {
            return operand;
        }

        match bind_unary_operator(op, &ty) {
            Some(bound_op) => {
                BoundExpr::Unary { op:      bound_op,
                                   operand: Box::new(operand),
                                   span }
            },
            None => {
                self.report(format!("Unary operator '{op}' is not defined for type '{ty}'"),
                            span)
            },
        }
    }

    /// Binds a binary operation through the operator table.
    fn bind_binary(&mut self,
                   left: &Expr,
                   op: BinaryOperator,
                   right: &Expr,
                   span: Span)
                   -> BoundExpr {
        let left = self.bind_expression(left);
        let right = self.bind_expression(right);

        if left.ty().is_error() {
            return left;
        }
        if right.ty().is_error() {
            return right;
        }

        match bind_binary_operator(op, &left.ty(), &right.ty()) {
            Some(bound_op) => {
                BoundExpr::Binary { left: Box::new(left),
                                    op: bound_op,
                                    right: Box::new(right),
                                    span }
            },
            None => {
                let message = format!("Binary operator '{op}' is not defined for types '{}' and '{}'",
                                      left.ty(),
                                      right.ty());
                self.report(message, span)
            },
        }
    }

    /// Binds a call expression.
    ///
    /// A callee that names a primitive type is an explicit conversion.
    /// Otherwise the name resolves against user functions first, then
    /// built-ins; the arity must match and each argument must be
    /// convertible to its parameter type, with `any` on either side
    /// permitted.
    fn bind_call(&mut self, callee: &Expr, arguments: &[Expr], span: Span) -> BoundExpr {
        let Expr::Variable { name, .. } = callee else {
            return self.report("Expression is not callable", span);
        };

        if let Some(target) = TypeSymbol::parse(name) {
            return self.bind_conversion_call(&target, arguments, span);
        }

        let Some(symbol) = self.scopes.resolve_function(name).cloned() else {
            return self.report(format!("Function '{name}' is not declared"), span);
        };

        if arguments.len() != symbol.parameters().len() {
            let message = format!("Function '{name}' expects {} arguments, but {} were given",
                                  symbol.parameters().len(),
                                  arguments.len());
            return self.report(message, span);
        }

        let mut bound_arguments = Vec::with_capacity(arguments.len());
        for (argument, parameter) in arguments.iter().zip(symbol.parameters()) {
            let bound = self.bind_expression(argument);
            let bound = if parameter.ty.is_any() {
                bound
            } else {
                let target = parameter.ty.clone();
                self.convert_implicit(bound, &target, argument.span())
            };
            bound_arguments.push(bound);
        }

        BoundExpr::Call { symbol,
                          arguments: bound_arguments,
                          span }
    }

    /// Binds the explicit conversion call form, e.g. `int(x)`.
    fn bind_conversion_call(&mut self,
                            target: &TypeSymbol,
                            arguments: &[Expr],
                            span: Span)
                            -> BoundExpr {
        if arguments.len() != 1 {
            return self.report(format!("Conversion to '{target}' expects exactly one argument"),
                               span);
        }

        let bound = self.bind_expression(&arguments[0]);
        if bound.ty().is_error() {
            return bound;
        }

        self.convert(bound, target, span, true)
    }

    /// Inserts an implicit conversion towards `target` when one is needed
    /// and allowed. An `any` target accepts every value unchanged.
    fn convert_implicit(&mut self, expr: BoundExpr, target: &TypeSymbol, span: Span) -> BoundExpr {
        if target.is_any() {
            return expr;
        }
        self.convert(expr, target, span, false)
    }

    /// Converts `expr` to `target`, reporting when no conversion applies.
    fn convert(&mut self,
               expr: BoundExpr,
               target: &TypeSymbol,
               span: Span,
               explicit: bool)
               -> BoundExpr {
        let from = expr.ty();
        if from.is_error() {
            return expr;
        }

        match classify_conversion(&from, target) {
            Conversion::Identity => expr,
            Conversion::Allowed => {
                BoundExpr::Conversion { target:     target.clone(),
                                        expression: Box::new(expr),
                                        span }
            },
            Conversion::Explicit if explicit => {
                BoundExpr::Conversion { target:     target.clone(),
                                        expression: Box::new(expr),
                                        span }
            },
            _ => self.report(format!("Cannot convert type '{from}' to '{target}'"), span),
        }
    }
}

/// Walks an access chain down to its root, which must be a variable for the
/// access to be assignable.
fn index_root_is_variable(expr: &BoundExpr) -> bool {
    match expr {
        BoundExpr::Index { array, .. } => index_root_is_variable(array),
        BoundExpr::Variable { .. } => true,
        _ => false,
    }
}

/// The common element type of a bound array literal: `T` when every element
/// has type `T`, `any` otherwise (including empty literals).
fn common_element_type(elements: &[BoundExpr]) -> TypeSymbol {
    let mut iter = elements.iter();
    let Some(first) = iter.next() else {
        return TypeSymbol::Any;
    };

    let first = first.ty();
    if first.is_error() {
        return TypeSymbol::Any;
    }

    for element in iter {
        if element.ty() != first {
            return TypeSymbol::Any;
        }
    }
    first
}
