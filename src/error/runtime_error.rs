#[derive(Debug)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// Tried to use an undefined variable.
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a function that is not present in the dispatch table.
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value had an unexpected or incompatible type.
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A boolean value was expected, but not found.
    ExpectedBoolean {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A numeric value was expected, but not found.
    ExpectedNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An array value was expected, but not found.
    ExpectedArray {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An argument was invalid or out of range.
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The wrong number of arguments was supplied to a function.
    ArgumentCountMismatch {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An expected value was missing (e.g., a call used for its result
    /// produced none).
    MissingValue {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Arithmetic operation overflowed.
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to access an array element outside the allowed bounds.
    IndexOutOfBounds {
        /// The length of the indexed array.
        len:   usize,
        /// The index that was actually requested.
        index: i64,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Attempted division by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A literal value was too large to be represented safely.
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to use a fractional number where an integer was required.
    RealIsFractional {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `return` statement executed outside of any function body.
    ReturnOutsideFunction {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name, line } => {
                write!(f, "Unknown variable '{name}' on line {line}.")
            },
            Self::UnknownFunction { name, line } => {
                write!(f, "Unknown function '{name}' on line {line}.")
            },
            Self::TypeError { details, line } => {
                write!(f, "Type error on line {line}: {details}.")
            },
            Self::ExpectedBoolean { line } => write!(f, "Expected boolean on line {line}."),
            Self::ExpectedNumber { line } => write!(f, "Expected number on line {line}."),
            Self::ExpectedArray { line } => write!(f, "Expected array on line {line}."),
            Self::InvalidArgument { details, line } => {
                write!(f, "Invalid argument on line {line}: {details}.")
            },
            Self::ArgumentCountMismatch { line } => {
                write!(f, "Argument count mismatch on line {line}.")
            },

            Self::MissingValue { line } => {
                write!(f, "Expression on line {line} produced no value.")
            },
            Self::Overflow { line } => write!(f,
                                              "Integer overflow while trying to compute result on line {line}."),
            Self::IndexOutOfBounds { len, index, line } => write!(f,
                                                                  "Index {index} is out of bounds for array of length {len} on line {line}."),
            Self::DivisionByZero { line } => write!(f, "Division by zero on line {line}."),
            Self::LiteralTooLarge { line } => {
                write!(f, "Literal on line {line} is too large.")
            },
            Self::RealIsFractional { line } => write!(f,
                                                      "Value on line {line} is fractional and cannot be used as an integer."),
            Self::ReturnOutsideFunction { line } => {
                write!(f, "Return outside function on line {line}.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
