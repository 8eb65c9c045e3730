use crate::{
    ast::{BinaryOperator, UnaryOperator},
    interpreter::types::TypeSymbol,
};

/// A binary operator resolved against its operand types.
///
/// The record fixes the operand and result types at bind time; the
/// evaluator selects its arithmetic from `result` and only falls back to
/// runtime value inspection when it is `any`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundBinaryOperator {
    /// The operator kind.
    pub op:     BinaryOperator,
    /// The left operand type.
    pub left:   TypeSymbol,
    /// The right operand type.
    pub right:  TypeSymbol,
    /// The result type.
    pub result: TypeSymbol,
}

/// A unary operator resolved against its operand type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundUnaryOperator {
    /// The operator kind.
    pub op:      UnaryOperator,
    /// The operand type.
    pub operand: TypeSymbol,
    /// The result type.
    pub result:  TypeSymbol,
}

/// Resolves a binary operator against its operand types.
///
/// The rules, in order:
/// - Equality permits equal types, two numeric types, or `any` on either
///   side; the result is `bool`.
/// - Relational operators permit two numeric types or `any` on either
///   side; the result is `bool`.
/// - `+` with a string on either side concatenates; the result is
///   `string`.
/// - Arithmetic on two numeric types yields `double` if either side is
///   `double`, otherwise `int`; with `any` on either side the decision is
///   deferred and the result is `any`.
/// - `&&`/`||` permit two booleans, or `any` on either side (deferred).
///
/// # Returns
/// `Some(BoundBinaryOperator)` when the combination is defined, `None`
/// otherwise.
///
/// # Example
/// ```
/// use aspid::{
///     ast::BinaryOperator,
///     interpreter::{binder::operators::bind_binary_operator, types::TypeSymbol},
/// };
///
/// let op = bind_binary_operator(BinaryOperator::Add, &TypeSymbol::Int, &TypeSymbol::Double);
/// assert_eq!(op.unwrap().result, TypeSymbol::Double);
///
/// assert!(bind_binary_operator(BinaryOperator::Sub, &TypeSymbol::Bool, &TypeSymbol::Int).is_none());
/// ```
#[must_use]
pub fn bind_binary_operator(op: BinaryOperator,
                            left: &TypeSymbol,
                            right: &TypeSymbol)
                            -> Option<BoundBinaryOperator> {
    use BinaryOperator::{
        Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Or, Sub,
    };

    let either_any = left.is_any() || right.is_any();
    let both_numeric = left.is_numeric() && right.is_numeric();

    let result = match op {
        Equal | NotEqual => {
            if left == right || both_numeric || either_any {
                TypeSymbol::Bool
            } else {
                return None;
            }
        },

        Less | LessEqual | Greater | GreaterEqual => {
            if both_numeric || either_any {
                TypeSymbol::Bool
            } else {
                return None;
            }
        },

        Add if *left == TypeSymbol::String || *right == TypeSymbol::String => TypeSymbol::String,

        Add | Sub | Mul | Div => {
            if both_numeric {
                if *left == TypeSymbol::Double || *right == TypeSymbol::Double {
                    TypeSymbol::Double
                } else {
                    TypeSymbol::Int
                }
            } else if either_any {
                TypeSymbol::Any
            } else {
                return None;
            }
        },

        And | Or => {
            if *left == TypeSymbol::Bool && *right == TypeSymbol::Bool {
                TypeSymbol::Bool
            } else if either_any {
                TypeSymbol::Any
            } else {
                return None;
            }
        },
    };

    Some(BoundBinaryOperator { op,
                               left: left.clone(),
                               right: right.clone(),
                               result })
}

/// Resolves a unary operator against its operand type.
///
/// `+`, `-`, `++`, and `--` accept numeric or `any` operands; `!` accepts
/// `bool` or `any`. The result type always equals the operand type.
#[must_use]
pub fn bind_unary_operator(op: UnaryOperator, operand: &TypeSymbol) -> Option<BoundUnaryOperator> {
    let permitted = match op {
        UnaryOperator::Identity
        | UnaryOperator::Negate
        | UnaryOperator::Increment
        | UnaryOperator::Decrement => operand.is_numeric() || operand.is_any(),
        UnaryOperator::Not => *operand == TypeSymbol::Bool || operand.is_any(),
    };

    if !permitted {
        return None;
    }

    Some(BoundUnaryOperator { op,
                              operand: operand.clone(),
                              result: operand.clone() })
}

/// How a type converts to another, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// No conversion exists.
    None,
    /// The types are identical.
    Identity,
    /// The conversion is allowed implicitly (assignments and arguments).
    Allowed,
    /// The conversion is allowed only through the explicit call form, e.g.
    /// `int("0x10")`.
    Explicit,
}

/// Classifies the conversion from one type to another.
///
/// Identity conversions are always fine; to and from `any` is always
/// allowed; numeric types convert to `bool` (nonzero means true); `int`
/// widens to `double`; and `string` converts to `int` through the explicit
/// call form only.
///
/// # Example
/// ```
/// use aspid::interpreter::{binder::operators::{Conversion, classify_conversion},
///                          types::TypeSymbol};
///
/// assert_eq!(classify_conversion(&TypeSymbol::Int, &TypeSymbol::Double),
///            Conversion::Allowed);
/// assert_eq!(classify_conversion(&TypeSymbol::String, &TypeSymbol::Int),
///            Conversion::Explicit);
/// assert_eq!(classify_conversion(&TypeSymbol::Bool, &TypeSymbol::Int),
///            Conversion::None);
/// ```
#[must_use]
pub fn classify_conversion(from: &TypeSymbol, to: &TypeSymbol) -> Conversion {
    if from == to {
        return Conversion::Identity;
    }
    if from.is_any() || to.is_any() {
        return Conversion::Allowed;
    }
    if from.is_numeric() && *to == TypeSymbol::Bool {
        return Conversion::Allowed;
    }
    if *from == TypeSymbol::Int && *to == TypeSymbol::Double {
        return Conversion::Allowed;
    }
    if *from == TypeSymbol::String && *to == TypeSymbol::Int {
        return Conversion::Explicit;
    }
    Conversion::None
}
