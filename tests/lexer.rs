use aspid::interpreter::lexer::{Token, tokenize};

fn kinds(source: &str) -> Vec<Token> {
    tokenize(source).unwrap_or_else(|e| panic!("Lexing failed: {e}\n{source}"))
                    .into_iter()
                    .map(|(token, _)| token)
                    .collect()
}

fn count(tokens: &[Token], wanted: &Token) -> usize {
    tokens.iter().filter(|token| *token == wanted).count()
}

#[test]
fn simple_expression_tokens() {
    assert_eq!(kinds("1 + 2"),
               vec![Token::Number("1".to_string()),
                    Token::Plus,
                    Token::Number("2".to_string()),
                    Token::Eof]);
}

#[test]
fn indent_and_dedent_are_balanced() {
    let sources = ["if true:\n    x = 1\n",
                   "if true:\n    if true:\n        x = 1\n    y = 2\nz = 3\n",
                   "if a:\n    b = 1\n\n    c = 2\n",
                   // No trailing newline: the stack still drains at EOF.
                   "if true:\n    x = 1"];

    for source in sources {
        let tokens = kinds(source);
        assert_eq!(count(&tokens, &Token::Indent),
                   count(&tokens, &Token::Dedent),
                   "unbalanced layout for:\n{source}");
        assert_eq!(tokens.last(), Some(&Token::Eof));
    }
}

#[test]
fn blank_and_comment_lines_do_not_disturb_layout() {
    let source = "if true:\n    a = 1\n\n    # a comment line\n    b = 2\n";
    let tokens = kinds(source);

    assert_eq!(count(&tokens, &Token::Indent), 1);
    assert_eq!(count(&tokens, &Token::Dedent), 1);
}

#[test]
fn tabs_and_space_runs_measure_in_units() {
    // One tab is one unit.
    let tokens = kinds("if true:\n\tx = 1\n");
    assert_eq!(count(&tokens, &Token::Indent), 1);

    // Six spaces are one unit: the two-space tail is ignored.
    let tokens = kinds("if true:\n      x = 1\n");
    assert_eq!(count(&tokens, &Token::Indent), 1);

    // Eight spaces are two units.
    let tokens = kinds("if true:\n        x = 1\n");
    assert_eq!(count(&tokens, &Token::Indent), 2);
    assert_eq!(count(&tokens, &Token::Dedent), 2);
}

#[test]
fn hex_and_decimal_number_texts() {
    assert_eq!(kinds("0xFF 12 3.25"),
               vec![Token::Number("0xFF".to_string()),
                    Token::Number("12".to_string()),
                    Token::Number("3.25".to_string()),
                    Token::Eof]);
}

#[test]
fn operators_match_greedily() {
    assert_eq!(kinds("== = ++ + -> -"),
               vec![Token::EqualEqual,
                    Token::Equals,
                    Token::PlusPlus,
                    Token::Plus,
                    Token::Arrow,
                    Token::Minus,
                    Token::Eof]);
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(kinds("if iffy fn fnord"),
               vec![Token::If,
                    Token::Identifier("iffy".to_string()),
                    Token::Fn,
                    Token::Identifier("fnord".to_string()),
                    Token::Eof]);
}

#[test]
fn fstring_expands_to_concatenation() {
    assert_eq!(kinds("f\"hi {name}!\""),
               vec![Token::LParen,
                    Token::Str("hi ".to_string()),
                    Token::Plus,
                    Token::LParen,
                    Token::Identifier("name".to_string()),
                    Token::RParen,
                    Token::Plus,
                    Token::Str("!".to_string()),
                    Token::RParen,
                    Token::Eof]);
}

#[test]
fn fstring_empty_chunks_still_emit_strings() {
    assert_eq!(kinds("f\"{x}\""),
               vec![Token::LParen,
                    Token::Str(String::new()),
                    Token::Plus,
                    Token::LParen,
                    Token::Identifier("x".to_string()),
                    Token::RParen,
                    Token::Plus,
                    Token::Str(String::new()),
                    Token::RParen,
                    Token::Eof]);
}

#[test]
fn fstring_interpolations_rebase_spans_onto_the_source() {
    let source = "f\"a {spot} b\"";
    let tokens = tokenize(source).unwrap();

    let (_, span) = tokens.iter()
                          .find(|(token, _)| {
                              matches!(token, Token::Identifier(name) if name == "spot")
                          })
                          .expect("interpolated identifier should be present");
    assert_eq!(&source[span.start..span.end], "spot");
}

#[test]
fn nested_fstrings_expand_recursively() {
    let tokens = kinds("f\"a {f\"b {x}\"}\"");
    // Two levels of expansion: the outer and the inner f-string each
    // contribute their own parenthesized concatenation.
    assert!(count(&tokens, &Token::Plus) >= 4);
    assert_eq!(count(&tokens, &Token::LParen), count(&tokens, &Token::RParen));
}

#[test]
fn string_tokens_strip_quotes() {
    assert_eq!(kinds("\"abc\""), vec![Token::Str("abc".to_string()), Token::Eof]);
    assert_eq!(kinds("\"\""), vec![Token::Str(String::new()), Token::Eof]);
}

#[test]
fn unterminated_literals_error() {
    assert!(tokenize("\"abc").is_err());
    assert!(tokenize("f\"abc").is_err());
    assert!(tokenize("f\"abc{x").is_err());
}

#[test]
fn stray_characters_become_undefined_tokens() {
    let tokens = kinds("1 @ 2");
    assert_eq!(count(&tokens, &Token::Undefined), 1);
}

#[test]
fn newlines_are_tokens() {
    assert_eq!(kinds("a\nb"),
               vec![Token::Identifier("a".to_string()),
                    Token::NewLine,
                    Token::Identifier("b".to_string()),
                    Token::Eof]);
}

#[test]
fn spans_point_back_into_the_source() {
    let source = "total = alpha + 42\n";
    for (token, span) in tokenize(source).unwrap() {
        if matches!(token, Token::Indent | Token::Dedent | Token::Eof) {
            continue;
        }
        assert!(span.start < span.end, "{token:?} has an empty span");
        assert!(span.end <= source.len());
    }
}
