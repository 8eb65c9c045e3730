use aspid::{
    Session, StatementOutcome,
    ast::BinaryOperator,
    interpreter::{
        binder::operators::{Conversion, bind_binary_operator, classify_conversion},
        types::TypeSymbol,
    },
};

fn diagnostics(source: &str) -> Vec<String> {
    let mut session = Session::new();
    let outcomes = session.execute(source)
                          .unwrap_or_else(|e| panic!("Script failed to parse: {e}\n{source}"));

    outcomes.into_iter()
            .filter_map(|outcome| match outcome {
                StatementOutcome::Rejected(diagnostics) => Some(diagnostics),
                _ => None,
            })
            .flatten()
            .map(|diagnostic| diagnostic.message)
            .collect()
}

fn assert_diagnostic(source: &str, fragment: &str) {
    let messages = diagnostics(source);
    assert!(messages.iter().any(|message| message.contains(fragment)),
            "Expected a diagnostic containing '{fragment}', got {messages:?}\n{source}");
}

#[test]
fn undeclared_variable() {
    assert_diagnostic("y", "Variable 'y' is not declared");
}

#[test]
fn unknown_type() {
    assert_diagnostic("x: point = 1", "Type 'point' does not exist");
    assert_diagnostic("fn f(a: matrix):\n    return a", "Type 'matrix' does not exist");
}

#[test]
fn condition_must_be_bool() {
    assert_diagnostic("if 1:\n    print(1)", "Condition must be of type 'bool'");
    assert_diagnostic("while 0.5:\n    print(1)", "Condition must be of type 'bool'");
}

#[test]
fn duplicate_parameter() {
    assert_diagnostic("fn f(a, a):\n    return a", "Duplicate parameter name 'a'");
}

#[test]
fn call_arity_mismatch() {
    assert_diagnostic("print(1, 2)", "expects 1 arguments, but 2 were given");
    assert_diagnostic("random(3)", "expects 2 arguments, but 1 were given");
}

#[test]
fn unknown_function() {
    assert_diagnostic("frobnicate()", "Function 'frobnicate' is not declared");
}

#[test]
fn operator_type_mismatch() {
    assert_diagnostic("true + 1", "Binary operator '+' is not defined");
    assert_diagnostic("!1", "Unary operator '!' is not defined for type 'int'");
    assert_diagnostic("-\"s\"", "Unary operator '-' is not defined for type 'string'");
}

#[test]
fn declaration_type_mismatch() {
    assert_diagnostic("x: int = \"s\"", "Cannot convert type 'string' to 'int'");
    assert_diagnostic("x: bool = \"s\"", "Cannot convert type 'string' to 'bool'");
}

#[test]
fn function_name_collisions() {
    assert_diagnostic("x: int = 1\nfn x():\n    return 0", "The name 'x' is already in use");
    assert_diagnostic("fn int():\n    return 0", "The name 'int' is already in use");
    assert_diagnostic("fn print(v):\n    return v", "The name 'print' is already in use");
}

#[test]
fn array_binding_rules() {
    assert_diagnostic("x: int = 1\ny: int = x[0]", "Type 'int' cannot be indexed");
    assert_diagnostic("a: int[] = [1]\ny: int = a[\"x\"]",
                      "Array index must be of type 'int'");
    assert_diagnostic("a: int[] = [1]\na[0][0] = 1",
                      "Type 'int' cannot be indexed");
}

#[test]
fn assignment_to_unseen_name_declares_any() {
    // No diagnostic: plain assignment may introduce a gradually-typed
    // variable.
    assert!(diagnostics("x = 1\nx = \"now a string\"").is_empty());
}

#[test]
fn numeric_result_widening_property() {
    // For numeric operands the result is double iff either operand is.
    let numeric = [TypeSymbol::Int, TypeSymbol::Double];
    for left in &numeric {
        for right in &numeric {
            let bound = bind_binary_operator(BinaryOperator::Mul, left, right)
                .expect("numeric arithmetic is always defined");
            let expect_double =
                *left == TypeSymbol::Double || *right == TypeSymbol::Double;
            assert_eq!(bound.result == TypeSymbol::Double, expect_double,
                       "{left} * {right} -> {}", bound.result);
        }
    }
}

#[test]
fn equality_and_relational_results_are_bool() {
    let bound = bind_binary_operator(BinaryOperator::Equal,
                                     &TypeSymbol::String,
                                     &TypeSymbol::String).unwrap();
    assert_eq!(bound.result, TypeSymbol::Bool);

    let bound = bind_binary_operator(BinaryOperator::Less,
                                     &TypeSymbol::Any,
                                     &TypeSymbol::Int).unwrap();
    assert_eq!(bound.result, TypeSymbol::Bool);

    assert!(bind_binary_operator(BinaryOperator::Less,
                                 &TypeSymbol::String,
                                 &TypeSymbol::String).is_none());
}

#[test]
fn conversion_classification() {
    assert_eq!(classify_conversion(&TypeSymbol::Int, &TypeSymbol::Int),
               Conversion::Identity);
    assert_eq!(classify_conversion(&TypeSymbol::Int, &TypeSymbol::Double),
               Conversion::Allowed);
    assert_eq!(classify_conversion(&TypeSymbol::Double, &TypeSymbol::Bool),
               Conversion::Allowed);
    assert_eq!(classify_conversion(&TypeSymbol::Any, &TypeSymbol::Int),
               Conversion::Allowed);
    assert_eq!(classify_conversion(&TypeSymbol::String, &TypeSymbol::Int),
               Conversion::Explicit);
    assert_eq!(classify_conversion(&TypeSymbol::Double, &TypeSymbol::Int),
               Conversion::None);
    assert_eq!(classify_conversion(&TypeSymbol::Bool, &TypeSymbol::String),
               Conversion::None);
}

#[test]
fn array_types_parse_and_display() {
    let nested = TypeSymbol::parse("int[][]").unwrap();
    assert_eq!(nested.to_string(), "int[][]");
    assert_eq!(TypeSymbol::parse("any[]").unwrap().to_string(), "any[]");
    assert!(TypeSymbol::parse("int[").is_none());
}

#[test]
fn mixed_array_literals_are_any() {
    // Observable through indexing: the element type of a mixed literal is
    // any, so indexing it binds without complaint.
    assert!(diagnostics("a: any[] = [1, \"two\"]\nx: any = a[0]").is_empty());
    assert_diagnostic("a: int[] = [1, \"two\"]",
                      "Cannot convert type 'any[]' to 'int[]'");
}
