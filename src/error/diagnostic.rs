/// A single diagnostic produced while binding a statement.
///
/// Diagnostics are collected on the binder instead of being raised: binding
/// never aborts, and every diagnostic is paired with exactly one error node
/// in the bound tree. The driver flushes the list after each top-level
/// statement and skips evaluation when it is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Human-readable description of the problem.
    pub message: String,
    /// The source line the diagnostic refers to.
    pub line:    usize,
}

impl Diagnostic {
    /// Creates a new diagnostic for the given line.
    #[must_use]
    pub fn new(message: impl Into<String>, line: usize) -> Self {
        Self { message: message.into(),
               line }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error on line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for Diagnostic {}
