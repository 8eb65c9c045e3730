use aspid::{Session, StatementOutcome, interpreter::value::core::Value};

fn run(source: &str) -> Vec<StatementOutcome> {
    let mut session = Session::new();
    session.execute(source)
           .unwrap_or_else(|e| panic!("Script failed to parse: {e}\n{source}"))
}

fn last_value(source: &str) -> Value {
    match run(source).into_iter().last() {
        Some(StatementOutcome::Value(value)) => value,
        other => panic!("Expected a value, got {other:?}\n{source}"),
    }
}

fn assert_rejected(source: &str) {
    let rejected = run(source).iter()
                              .any(|outcome| matches!(outcome, StatementOutcome::Rejected(_)));
    assert!(rejected, "Script was expected to be rejected:\n{source}");
}

fn assert_runtime_error(source: &str) {
    let failed = run(source).iter()
                            .any(|outcome| matches!(outcome, StatementOutcome::Failed(_)));
    assert!(failed, "Script was expected to fail at runtime:\n{source}");
}

#[test]
fn arithmetic_precedence() {
    assert_eq!(last_value("1 + 2 * 3"), Value::Integer(7));
    assert_eq!(last_value("(1 + 2) * 3"), Value::Integer(9));
    assert_eq!(last_value("10 - 2 - 3"), Value::Integer(5));
    assert_eq!(last_value("7 / 2"), Value::Integer(3));
}

#[test]
fn declarations_and_lookup() {
    assert_eq!(last_value("x: int = 10\nx"), Value::Integer(10));
    assert_eq!(last_value("x: double = 1\nx"), Value::Double(1.0));
    // A declaration without an initializer defaults to integer zero.
    assert_eq!(last_value("x: int\nx"), Value::Integer(0));
    assert_eq!(last_value("s: string\ns"), Value::Integer(0));
}

#[test]
fn conditional_with_indentation() {
    let source = r#"n: int = 5
result: string = ""
if n == 5:
    result = "five"
else:
    result = "other"
result
"#;
    assert_eq!(last_value(source), Value::Str("five".to_string()));
}

#[test]
fn while_counter_with_compound_assignment() {
    let source = "i: int = 0
total: int = 0
while i < 3:
    total += i
    i += 1
total
";
    assert_eq!(last_value(source), Value::Integer(3));
}

#[test]
fn do_while_runs_at_least_once() {
    let source = "i: int = 10
do:
    i += 1
while i < 3
i
";
    assert_eq!(last_value(source), Value::Integer(11));
}

#[test]
fn fstring_and_function() {
    let source = "fn greet(name):
    return f\"hello {name}\"
greet(\"world\")
";
    assert_eq!(last_value(source), Value::Str("hello world".to_string()));
}

#[test]
fn nested_fstring_expressions() {
    assert_eq!(last_value("x: int = 6\nf\"{x} * 7 = {x * 7}\""),
               Value::Str("6 * 7 = 42".to_string()));
    assert_eq!(last_value("f\"{1 + 1}\""), Value::Str("2".to_string()));
}

#[test]
fn arrays_with_negative_index_and_in_place_writes() {
    let source = "a: int[] = [10, 20, 30]
last: int = a[-1]
last
";
    assert_eq!(last_value(source), Value::Integer(30));

    let source = "a: int[] = [10, 20, 30]
a[0] = 99
a
";
    assert_eq!(last_value(source).to_string(), "[99, 20, 30]");
}

#[test]
fn nested_arrays_share_storage() {
    let source = "grid: int[][] = [[1, 2], [3, 4]]
row: int[] = grid[0]
row[1] = 20
grid
";
    assert_eq!(last_value(source).to_string(), "[[1, 20], [3, 4]]");
}

#[test]
fn array_index_out_of_range() {
    assert_runtime_error("a: int[] = [1, 2]\nprint(a[2])");
    assert_runtime_error("a: int[] = [1, 2]\nprint(a[-3])");
    assert_runtime_error("a: int[] = [1, 2]\na[5] = 0");
}

#[test]
fn index_at_statement_start_commits_to_assignment() {
    // `name[` opens the assignment path, so a bare access statement is a
    // parse error.
    let mut session = Session::new();
    assert!(session.execute("a: int[] = [1]\na[0]").is_err());
}

#[test]
fn for_in_over_arrays() {
    let source = "total: int = 0
for x in [1, 2, 3]:
    total += x
total
";
    assert_eq!(last_value(source), Value::Integer(6));

    // An empty array skips the body entirely.
    let source = "hits: int = 0
for x in []:
    hits += 1
hits
";
    assert_eq!(last_value(source), Value::Integer(0));
}

#[test]
fn hex_literals() {
    assert_eq!(last_value("0xFF"), Value::Integer(255));
    assert_eq!(last_value("0x10 + 1"), Value::Integer(17));
}

#[test]
fn deeply_nested_indentation() {
    let source = "x: int = 0
if true:
    if true:
        if true:
            x = 3
x
";
    assert_eq!(last_value(source), Value::Integer(3));
}

#[test]
fn inner_block_shadowing_leaves_outer_untouched() {
    let source = "x: int = 1
if true:
    x: int = 2
x
";
    assert_eq!(last_value(source), Value::Integer(1));
}

#[test]
fn redeclaration_in_same_scope_is_rejected() {
    assert_rejected("x: int = 1\nx: int = 2");
}

#[test]
fn function_recursion() {
    let source = "fn fact(n: int) -> int:
    if n <= 1:
        return 1
    return n * fact(n - 1)
fact(5)
";
    assert_eq!(last_value(source), Value::Integer(120));
}

#[test]
fn return_from_nested_if() {
    let source = "fn pick(n: int) -> string:
    if n > 0:
        if n > 10:
            return \"big\"
        return \"small\"
    return \"negative\"
pick(3)
";
    assert_eq!(last_value(source), Value::Str("small".to_string()));
}

#[test]
fn return_outside_function_is_a_runtime_error() {
    assert_runtime_error("return 5");
    assert_runtime_error("if true:\n    return");
}

#[test]
fn logical_operators_evaluate_both_sides() {
    // No short-circuiting: the right operand runs even when the left
    // already decides the result.
    let source = "hits: int = 0
fn bump() -> bool:
    hits = hits + 1
    return true
ok: bool = false && bump()
hits
";
    assert_eq!(last_value(source), Value::Integer(1));

    assert_eq!(last_value("true || false"), Value::Bool(true));
    assert_eq!(last_value("true && false"), Value::Bool(false));
}

#[test]
fn any_condition_is_rejected() {
    assert_rejected("flag: any = true\nif flag:\n    print(1)");
    assert_rejected("flag: any = true\nwhile flag:\n    print(1)");
}

#[test]
fn division_by_zero_is_reported() {
    assert_runtime_error("1 / 0");
    // Doubles follow IEEE behavior instead.
    assert_eq!(last_value("x: double = 1.0\nx / 0.0"), Value::Double(f64::INFINITY));
}

#[test]
fn mixed_numeric_arithmetic_widens_to_double() {
    assert_eq!(last_value("1 + 2.5"), Value::Double(3.5));
    assert_eq!(last_value("2.0 * 3"), Value::Double(6.0));
}

#[test]
fn numeric_equality_uses_epsilon() {
    assert_eq!(last_value("0.1 + 0.2 == 0.3"), Value::Bool(true));
    assert_eq!(last_value("1 == 1.0"), Value::Bool(true));
    assert_eq!(last_value("1.5 != 1.25"), Value::Bool(true));
}

#[test]
fn string_concatenation() {
    assert_eq!(last_value("\"a\" + 1"), Value::Str("a1".to_string()));
    assert_eq!(last_value("1 + \"a\""), Value::Str("1a".to_string()));
    assert_eq!(last_value("\"ab\" + \"cd\""), Value::Str("abcd".to_string()));
}

#[test]
fn structural_equality_for_non_numbers() {
    assert_eq!(last_value("\"a\" == \"a\""), Value::Bool(true));
    assert_eq!(last_value("\"a\" == \"b\""), Value::Bool(false));
    assert_eq!(last_value("[1, 2] == [1, 2]"), Value::Bool(true));
}

#[test]
fn explicit_conversions() {
    assert_eq!(last_value("int(\" 42 \")"), Value::Integer(42));
    assert_eq!(last_value("int(\"0x10\")"), Value::Integer(16));
    assert_eq!(last_value("int(\"-7\")"), Value::Integer(-7));
    assert_eq!(last_value("double(3)"), Value::Double(3.0));
    assert_eq!(last_value("bool(0)"), Value::Bool(false));
    assert_eq!(last_value("bool(2.5)"), Value::Bool(true));
}

#[test]
fn conversion_failures() {
    // No double-to-int conversion exists, even explicitly.
    assert_rejected("int(2.9)");
    // string(x) only exists through `any`.
    assert_rejected("string(5)");
    // A malformed int(text) fails at runtime.
    assert_runtime_error("int(\"zzz\")");
}

#[test]
fn any_defers_conversion_to_runtime() {
    let source = "a: any = \"7\"\nint(a)";
    assert_eq!(last_value(source), Value::Integer(7));

    let source = "a: any = 2.75\nint(a)";
    assert_eq!(last_value(source), Value::Integer(2));
}

#[test]
fn increment_and_decrement() {
    let outcomes = run("x: int = 5\nx++\nx");
    assert!(matches!(&outcomes[1], StatementOutcome::Value(Value::Integer(5))),
            "postfix increment returns the old value");
    assert!(matches!(&outcomes[2], StatementOutcome::Value(Value::Integer(6))));

    assert_eq!(last_value("x: int = 5\n++x"), Value::Integer(6));
    assert_eq!(last_value("x: int = 5\n--x\nx"), Value::Integer(4));
}

#[test]
fn any_arithmetic_dispatches_on_runtime_values() {
    let source = "x: any = 2\ny: any = 2.5\nx + y";
    assert_eq!(last_value(source), Value::Double(4.5));

    let source = "x: any = \"n = \"\ny: any = 3\nx + y";
    assert_eq!(last_value(source), Value::Str("n = 3".to_string()));

    assert_runtime_error("x: any = true\ny: any = 1\nx + y");
}

#[test]
fn parameters_widen_like_assignments() {
    let source = "fn twice(x: double) -> double:
    return x * 2.0
twice(3)
";
    assert_eq!(last_value(source), Value::Double(6.0));
}

#[test]
fn return_type_is_not_checked() {
    // The binder deliberately skips the return-type-vs-value check.
    let source = "fn f() -> int:
    return \"s\"
f()
";
    assert_eq!(last_value(source), Value::Str("s".to_string()));
}

#[test]
fn sessions_persist_across_inputs() {
    let mut session = Session::new();
    session.execute("x: int = 1").unwrap();
    session.execute("fn next() -> int:\n    return x + 1").unwrap();

    let outcomes = session.execute("next()").unwrap();
    assert!(matches!(&outcomes[0], StatementOutcome::Value(Value::Integer(2))));
}

#[test]
fn scope_depth_is_restored_after_every_statement() {
    let mut session = Session::new();

    session.execute("if true:\n    y: int = 1").unwrap();
    assert_eq!(session.depth(), 1);

    // A runtime error inside a nested block still unwinds the stack.
    let outcomes = session.execute("if true:\n    print([1][5])").unwrap();
    assert!(matches!(outcomes[0], StatementOutcome::Failed(_)));
    assert_eq!(session.depth(), 1);

    // So does a return consumed by a function call.
    session.execute("fn f() -> int:\n    return 1").unwrap();
    session.execute("f()").unwrap();
    assert_eq!(session.depth(), 1);
}

#[test]
fn empty_and_blank_inputs() {
    assert!(run("").is_empty());
    assert!(run("\n\n").is_empty());
    assert!(run("# just a comment\n").is_empty());
}

#[test]
fn unterminated_literals_are_hard_errors() {
    let mut session = Session::new();
    assert!(session.execute("x: string = \"abc").is_err());
    assert!(session.execute("x: string = f\"abc").is_err());
    assert!(session.execute("f\"{x\"").is_err());
}

#[test]
fn stray_characters_are_reported() {
    let mut session = Session::new();
    assert!(session.execute("1 @ 2").is_err());
}

#[test]
fn binder_failures_do_not_stop_later_statements() {
    let outcomes = run("y\nx: int = 3\nx");
    assert!(matches!(outcomes[0], StatementOutcome::Rejected(_)));
    assert!(matches!(&outcomes[2], StatementOutcome::Value(Value::Integer(3))));
}
