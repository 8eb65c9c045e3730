use std::{
    hash::{Hash, Hasher},
    rc::Rc,
};

/// Represents a type in the language.
///
/// `Any` is the gradual-typing escape hatch: operations on `any`-typed
/// operands are deferred to runtime value inspection. `Error` is the type of
/// bound error nodes and never appears in a well-typed tree. Arrays compose
/// with any element type, including other arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSymbol {
    /// 64-bit signed integer.
    Int,
    /// Double-precision floating point.
    Double,
    /// Boolean.
    Bool,
    /// Text string.
    String,
    /// The type of statements and value-less functions.
    Void,
    /// The gradual-typing escape hatch.
    Any,
    /// The type of bound error nodes.
    Error,
    /// An array with the given element type.
    Array(Box<Self>),
}

impl TypeSymbol {
    /// Parses a type identifier such as `int`, `string[]`, or `int[][]`.
    ///
    /// Every trailing `[]` wraps the parsed element type in another array.
    ///
    /// # Returns
    /// `Some(TypeSymbol)` for a known type name, `None` otherwise.
    ///
    /// # Example
    /// ```
    /// use aspid::interpreter::types::TypeSymbol;
    ///
    /// assert_eq!(TypeSymbol::parse("int"), Some(TypeSymbol::Int));
    /// assert_eq!(TypeSymbol::parse("int[]"),
    ///            Some(TypeSymbol::Array(Box::new(TypeSymbol::Int))));
    /// assert_eq!(TypeSymbol::parse("point"), None);
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        if let Some(element) = text.strip_suffix("[]") {
            return Self::parse(element).map(|e| Self::Array(Box::new(e)));
        }

        match text {
            "int" => Some(Self::Int),
            "double" => Some(Self::Double),
            "bool" => Some(Self::Bool),
            "string" => Some(Self::String),
            "void" => Some(Self::Void),
            "any" => Some(Self::Any),
            _ => None,
        }
    }

    /// Returns `true` if the type is `int` or `double`.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Double)
    }

    /// Returns `true` if the type is [`TypeSymbol::Error`].
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Returns `true` if the type is [`TypeSymbol::Any`].
    #[must_use]
    pub const fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Returns the element type of an array type.
    #[must_use]
    pub fn element_type(&self) -> Option<&Self> {
        match self {
            Self::Array(element) => Some(element),
            _ => None,
        }
    }
}

impl std::fmt::Display for TypeSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Double => write!(f, "double"),
            Self::Bool => write!(f, "bool"),
            Self::String => write!(f, "string"),
            Self::Void => write!(f, "void"),
            Self::Any => write!(f, "any"),
            Self::Error => write!(f, "error"),
            Self::Array(element) => write!(f, "{element}[]"),
        }
    }
}

/// A function parameter: a name with its (possibly gradual) type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSymbol {
    /// The parameter name.
    pub name: String,
    /// The parameter type; `any` when the annotation was omitted.
    pub ty:   TypeSymbol,
}

#[derive(Debug)]
struct FunctionData {
    name:        String,
    parameters:  Vec<ParameterSymbol>,
    return_type: TypeSymbol,
}

/// A resolved function: built-in or user-declared.
///
/// Equality and hashing are by identity, not by name, so two declarations
/// that share a name (e.g. a shadowing redeclaration in the REPL) stay
/// distinct keys in the evaluator's dispatch table.
#[derive(Debug, Clone)]
pub struct FunctionSymbol(Rc<FunctionData>);

impl FunctionSymbol {
    /// Creates a new function symbol with its own identity.
    #[must_use]
    pub fn new(name: impl Into<String>,
               parameters: Vec<ParameterSymbol>,
               return_type: TypeSymbol)
               -> Self {
        Self(Rc::new(FunctionData { name: name.into(),
                                    parameters,
                                    return_type }))
    }

    /// The declared name of the function.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The declared parameters, in order.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterSymbol] {
        &self.0.parameters
    }

    /// The declared return type.
    #[must_use]
    pub fn return_type(&self) -> &TypeSymbol {
        &self.0.return_type
    }
}

impl PartialEq for FunctionSymbol {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for FunctionSymbol {}

impl Hash for FunctionSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as usize).hash(state);
    }
}
