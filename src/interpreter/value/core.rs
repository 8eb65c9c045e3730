use std::{cell::RefCell, rc::Rc};

use crate::{
    error::RuntimeError,
    util::num::{f64_to_i64_checked, i64_to_f64_checked},
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the types a value can have at runtime: integers,
/// doubles, booleans, strings, and arrays. Arrays are shared, mutable
/// lists, so element assignment through one reference is visible through
/// every other. Functions are not first-class values; callables live in the
/// evaluator's dispatch table.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A double-precision floating-point number.
    Double(f64),
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// A text string.
    Str(String),
    /// A shared, mutable array of values.
    Array(Rc<RefCell<Vec<Self>>>),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(RefCell::new(v)))
    }
}

impl Value {
    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// Integers are widened; the conversion fails if the integer is too
    /// large to be represented as `f64` exactly.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: If the value is a double or a safe integer.
    /// - `Err(RuntimeError::ExpectedNumber | LiteralTooLarge)`: Otherwise.
    ///
    /// # Example
    /// ```
    /// use aspid::interpreter::value::core::Value;
    ///
    /// let x = Value::Integer(10);
    /// assert_eq!(x.as_double(1).unwrap(), 10.0);
    /// ```
    pub fn as_double(&self, line: usize) -> Result<f64, RuntimeError> {
        match self {
            Self::Double(d) => Ok(*d),
            Self::Integer(n) => i64_to_f64_checked(*n, RuntimeError::LiteralTooLarge { line }),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }

    /// Converts the value to `i64`, or returns an error if not an integer.
    pub const fn as_integer(&self, line: usize) -> Result<i64, RuntimeError> {
        match self {
            Self::Integer(n) => Ok(*n),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }

    /// Converts the value to `bool`, or returns an error if not boolean.
    ///
    /// Used by the logical operators.
    pub const fn as_bool(&self, line: usize) -> Result<bool, RuntimeError> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(RuntimeError::ExpectedBoolean { line }),
        }
    }

    /// Returns the shared array behind the value, or an error if it is not
    /// an array.
    pub fn as_array(&self, line: usize) -> Result<Rc<RefCell<Vec<Self>>>, RuntimeError> {
        match self {
            Self::Array(items) => Ok(Rc::clone(items)),
            _ => Err(RuntimeError::ExpectedArray { line }),
        }
    }

    /// Converts the value to an `i64` index, accepting integers and
    /// integral doubles.
    ///
    /// # Errors
    /// Fails for fractional doubles, out-of-range doubles, and non-numeric
    /// values.
    pub fn to_index(&self, line: usize) -> Result<i64, RuntimeError> {
        match self {
            Self::Integer(n) => Ok(*n),
            Self::Double(d) => f64_to_i64_checked(*d, line),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }

    /// Returns `true` if the value is numeric (integer or double).
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(..) | Self::Double(..))
    }

    /// A short name for the value's runtime kind, used in error messages.
    ///
    /// # Example
    /// ```
    /// use aspid::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Bool(true).kind(), "bool");
    /// assert_eq!(Value::from(vec![Value::Integer(1)]).kind(), "array");
    /// ```
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Integer(..) => "int",
            Self::Double(..) => "double",
            Self::Bool(..) => "bool",
            Self::Str(..) => "string",
            Self::Array(..) => "array",
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Double(d) => write!(f, "{d}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Array(items) => {
                write!(f, "[")?;

                for (index, value) in items.borrow().iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{value}")?;
                }

                write!(f, "]")
            },
        }
    }
}
