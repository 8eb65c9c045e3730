use std::rc::Rc;

use crate::interpreter::{
    binder::operators::{BoundBinaryOperator, BoundUnaryOperator},
    lexer::Span,
    types::{FunctionSymbol, TypeSymbol},
};

/// A type-annotated expression, mirroring the CST.
///
/// Every node carries a resolved type, available through [`BoundExpr::ty`].
/// `Error` nodes are produced instead of well-typed nodes when binding
/// fails; exactly one diagnostic is emitted per error node.
#[derive(Debug, Clone)]
pub enum BoundExpr {
    /// An integer literal.
    Integer {
        /// The literal value.
        value: i64,
        /// Source span of the literal.
        span:  Span,
    },
    /// A double literal.
    Double {
        /// The literal value.
        value: f64,
        /// Source span of the literal.
        span:  Span,
    },
    /// A boolean literal.
    Bool {
        /// The literal value.
        value: bool,
        /// Source span of the literal.
        span:  Span,
    },
    /// A string literal.
    Str {
        /// The literal value.
        value: String,
        /// Source span of the literal.
        span:  Span,
    },
    /// A resolved variable reference.
    Variable {
        /// The variable name.
        name: String,
        /// The declared type of the variable.
        ty:   TypeSymbol,
        /// Source span of the reference.
        span: Span,
    },
    /// An array literal.
    Array {
        /// The bound elements.
        elements: Vec<Self>,
        /// The array type (`T[]`, with `any[]` for mixed elements).
        ty:       TypeSymbol,
        /// Source span of the literal.
        span:     Span,
    },
    /// An array element access.
    Index {
        /// The bound array expression.
        array: Box<Self>,
        /// The bound index expression.
        index: Box<Self>,
        /// The element type.
        ty:    TypeSymbol,
        /// Source span of the access.
        span:  Span,
    },
    /// A unary operation with a resolved operator.
    Unary {
        /// The bound operator record.
        op:      BoundUnaryOperator,
        /// The bound operand.
        operand: Box<Self>,
        /// Source span of the operation.
        span:    Span,
    },
    /// A pre- or post-increment/decrement of a variable.
    Increment {
        /// The variable being modified.
        name:    String,
        /// The bound operator record.
        op:      BoundUnaryOperator,
        /// Whether the old value (postfix) or the new value (prefix) is the
        /// result.
        postfix: bool,
        /// Source span of the operation.
        span:    Span,
    },
    /// A binary operation with a resolved operator.
    Binary {
        /// The bound left operand.
        left:  Box<Self>,
        /// The bound operator record.
        op:    BoundBinaryOperator,
        /// The bound right operand.
        right: Box<Self>,
        /// Source span of the operation.
        span:  Span,
    },
    /// A call to a resolved function symbol.
    Call {
        /// The resolved function.
        symbol:    FunctionSymbol,
        /// The bound arguments, in order.
        arguments: Vec<Self>,
        /// Source span of the call.
        span:      Span,
    },
    /// An explicit or implicit type conversion.
    Conversion {
        /// The conversion target type.
        target:     TypeSymbol,
        /// The converted expression.
        expression: Box<Self>,
        /// Source span of the conversion.
        span:       Span,
    },
    /// A binding failure; carries the same text as its diagnostic.
    Error {
        /// The diagnostic message.
        message: String,
        /// Source span of the failed expression.
        span:    Span,
    },
}

impl BoundExpr {
    /// The resolved type of this expression.
    ///
    /// Never `void`; only [`BoundExpr::Error`] nodes have type `error`.
    #[must_use]
    pub fn ty(&self) -> TypeSymbol {
        match self {
            Self::Integer { .. } => TypeSymbol::Int,
            Self::Double { .. } => TypeSymbol::Double,
            Self::Bool { .. } => TypeSymbol::Bool,
            Self::Str { .. } => TypeSymbol::String,
            Self::Variable { ty, .. } | Self::Array { ty, .. } | Self::Index { ty, .. } => {
                ty.clone()
            },
            Self::Unary { op, .. } | Self::Increment { op, .. } => op.result.clone(),
            Self::Binary { op, .. } => op.result.clone(),
            Self::Call { symbol, .. } => symbol.return_type().clone(),
            Self::Conversion { target, .. } => target.clone(),
            Self::Error { .. } => TypeSymbol::Error,
        }
    }

    /// The source span of this expression.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Integer { span, .. }
            | Self::Double { span, .. }
            | Self::Bool { span, .. }
            | Self::Str { span, .. }
            | Self::Variable { span, .. }
            | Self::Array { span, .. }
            | Self::Index { span, .. }
            | Self::Unary { span, .. }
            | Self::Increment { span, .. }
            | Self::Binary { span, .. }
            | Self::Call { span, .. }
            | Self::Conversion { span, .. }
            | Self::Error { span, .. } => *span,
        }
    }
}

/// A type-checked statement.
#[derive(Debug, Clone)]
pub enum BoundStatement {
    /// A block of statements with its own scope frame.
    Block {
        /// The bound statements, in order.
        statements: Vec<Self>,
        /// Source span of the block.
        span:       Span,
    },
    /// A variable declaration. Without an initializer the variable defaults
    /// to integer zero at runtime.
    VariableDeclaration {
        /// The variable name.
        name:        String,
        /// The declared type.
        ty:          TypeSymbol,
        /// The bound initializer, if present.
        initializer: Option<BoundExpr>,
        /// Source span of the declaration.
        span:        Span,
    },
    /// A function declaration. The body is shared with the evaluator's
    /// dispatch table.
    FunctionDeclaration {
        /// The declared function symbol.
        symbol: FunctionSymbol,
        /// The bound function body.
        body:   Rc<Self>,
        /// Source span of the declaration.
        span:   Span,
    },
    /// An assignment to a variable.
    Assignment {
        /// The target variable name.
        name:  String,
        /// The bound value.
        value: BoundExpr,
        /// Source span of the assignment.
        span:  Span,
    },
    /// An assignment through an array access.
    ArrayAssignment {
        /// The bound access ([`BoundExpr::Index`]) being written through.
        access: BoundExpr,
        /// The bound value.
        value:  BoundExpr,
        /// Source span of the assignment.
        span:   Span,
    },
    /// A conditional statement.
    If {
        /// The bound condition (type `bool`).
        condition:   BoundExpr,
        /// The bound `then` branch.
        then_branch: Box<Self>,
        /// The bound `else` branch, if present.
        else_branch: Option<Box<Self>>,
        /// Source span of the statement.
        span:        Span,
    },
    /// A pre-checked loop.
    While {
        /// The bound condition (type `bool`).
        condition: BoundExpr,
        /// The bound loop body.
        body:      Box<Self>,
        /// Source span of the statement.
        span:      Span,
    },
    /// A post-checked loop.
    DoWhile {
        /// The bound loop body.
        body:      Box<Self>,
        /// The bound condition (type `bool`).
        condition: BoundExpr,
        /// Source span of the statement.
        span:      Span,
    },
    /// Iteration over an array's elements.
    ForIn {
        /// The loop variable name.
        variable: String,
        /// The bound enumerated expression.
        iterable: BoundExpr,
        /// The bound loop body.
        body:     Box<Self>,
        /// Source span of the statement.
        span:     Span,
    },
    /// A `return` statement.
    Return {
        /// The bound result expression, if any.
        value: Option<BoundExpr>,
        /// Source span of the statement.
        span:  Span,
    },
    /// A standalone expression statement.
    Expression {
        /// The bound expression.
        expr: BoundExpr,
        /// Source span of the statement.
        span: Span,
    },
}

impl BoundStatement {
    /// The source span of this statement.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Block { span, .. }
            | Self::VariableDeclaration { span, .. }
            | Self::FunctionDeclaration { span, .. }
            | Self::Assignment { span, .. }
            | Self::ArrayAssignment { span, .. }
            | Self::If { span, .. }
            | Self::While { span, .. }
            | Self::DoWhile { span, .. }
            | Self::ForIn { span, .. }
            | Self::Return { span, .. }
            | Self::Expression { span, .. } => *span,
        }
    }
}
