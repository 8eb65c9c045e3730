#[derive(Debug)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A string literal was opened but never closed on the same line.
    UnterminatedString {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An f-string was opened but never closed on the same line.
    UnterminatedFString {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An interpolation `{` inside an f-string was never closed.
    UnclosedInterpolation {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A dedent did not land on any enclosing indentation level.
    IndentationError {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The left-hand side of an assignment was not a variable or an array
    /// element.
    InvalidAssignmentTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The operand of `++` or `--` was not a variable.
    InvalidIncrementTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An indented block was expected but not found.
    ExpectedBlock {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Found extra tokens after parsing should have completed.
    UnexpectedTrailingTokens {
        /// The extra/unexpected token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            },

            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input.")
            },

            Self::UnterminatedString { line } => {
                write!(f, "Error on line {line}: Unterminated string literal.")
            },

            Self::UnterminatedFString { line } => {
                write!(f, "Error on line {line}: Unterminated f-string literal.")
            },

            Self::UnclosedInterpolation { line } => write!(f,
                                                           "Error on line {line}: Unclosed '{{' inside f-string."),

            Self::IndentationError { line } => {
                write!(f, "Error on line {line}: Indentation error.")
            },

            Self::InvalidAssignmentTarget { line } => write!(f,
                                                             "Error on line {line}: Only variables and array elements can be assigned to."),

            Self::InvalidIncrementTarget { line } => write!(f,
                                                            "Error on line {line}: '++' and '--' require a variable operand."),

            Self::ExpectedBlock { line } => {
                write!(f, "Error on line {line}: Expected an indented block.")
            },

            Self::UnexpectedTrailingTokens { token, line } => write!(f,
                                                                     "Error on line {line}: Extra tokens after statement. Check your input: {token}"),
        }
    }
}

impl std::error::Error for ParseError {}
