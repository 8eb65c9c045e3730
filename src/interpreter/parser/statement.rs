use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, Parameter, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Span, Token},
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            unary::parse_postfix,
            utils::{expect, parse_comma_separated, parse_identifier, parse_type_name,
                    skip_newlines},
        },
    },
};

/// Parses a single statement.
///
/// The dispatch looks at the current token: an INDENT opens a block; the
/// keywords `if`, `while`, `do`, `for`, `fn`, and `return` take their
/// dedicated paths; an identifier followed by `:` starts a variable
/// declaration; an identifier followed by `=`, `+=`, `-=`, or `[` starts an
/// assignment. Everything else is an expression statement. A trailing
/// NEWLINE is consumed opportunistically.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, Span)` pairs.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let statement = match tokens.peek() {
        Some((Token::Indent, _)) => parse_block(tokens),
        Some((Token::If, _)) => parse_if(tokens),
        Some((Token::While, _)) => parse_while(tokens),
        Some((Token::Do, _)) => parse_do_while(tokens),
        Some((Token::For, _)) => parse_for_in(tokens),
        Some((Token::Fn, _)) => parse_function_declaration(tokens),
        Some((Token::Return, _)) => parse_return(tokens),
        Some((Token::Identifier(_), _)) => {
            let mut lookahead = tokens.clone();
            lookahead.next();
            match lookahead.peek() {
                Some((Token::Colon, _)) => parse_variable_declaration(tokens),
                Some((Token::Equals
                      | Token::PlusAssign
                      | Token::MinusAssign
                      | Token::LBracket,
                      _)) => parse_assignment(tokens),
                _ => parse_expression_statement(tokens),
            }
        },
        _ => parse_expression_statement(tokens),
    }?;

    if let Some((Token::NewLine, _)) = tokens.peek() {
        tokens.next();
    }

    Ok(statement)
}

/// Parses a standalone expression statement.
fn parse_expression_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let expr = parse_expression(tokens)?;
    let span = expr.span();

    Ok(Statement::Expression { expr, span })
}

/// Parses a variable declaration.
///
/// A declaration has the form `name ':' type ('[' ']')* ('=' expression)?`.
/// Each `[]` suffix is appended to the type text; the binder rebuilds the
/// nested array type from it. The initializer may be omitted.
fn parse_variable_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let (name, span) = parse_identifier(tokens)?;
    expect(tokens, &Token::Colon, span.line)?;
    let type_name = parse_type_name(tokens)?;

    let initializer = if let Some((Token::Equals, _)) = tokens.peek() {
        tokens.next();
        Some(parse_expression(tokens)?)
    } else {
        None
    };

    Ok(Statement::VariableDeclaration { name,
                                        type_name,
                                        initializer,
                                        span })
}

/// Parses an assignment or compound-assignment statement.
///
/// The left-hand side is parsed as a postfix expression and must come out
/// as a variable or an array access; anything else (for instance a call) is
/// rejected. `+=` and `-=` are desugared on the spot into an assignment of
/// the corresponding binary expression.
///
/// # Errors
/// Returns a `ParseError` if the target is invalid, the operator is
/// missing, or the assigned expression fails to parse.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let target = parse_postfix(tokens)?;
    let span = target.span();

    if !matches!(target, Expr::Variable { .. } | Expr::Index { .. }) {
        return Err(ParseError::InvalidAssignmentTarget { line: span.line });
    }

    match tokens.next() {
        Some((Token::Equals, _)) => {
            let value = parse_expression(tokens)?;
            Ok(Statement::Assignment { target, value, span })
        },
        Some((Token::PlusAssign, op_span)) => {
            desugar_compound(tokens, target, BinaryOperator::Add, *op_span)
        },
        Some((Token::MinusAssign, op_span)) => {
            desugar_compound(tokens, target, BinaryOperator::Sub, *op_span)
        },
        Some((token, span)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected '=', found {token:?}"),
                                              line:  span.line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: span.line }),
    }
}

/// Desugars `target op= value` into `target = target op value`.
fn desugar_compound<'a, I>(tokens: &mut Peekable<I>,
                           target: Expr,
                           op: BinaryOperator,
                           op_span: Span)
                           -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let right = parse_expression(tokens)?;
    let span = target.span();
    let value = Expr::Binary { left: Box::new(target.clone()),
                               op,
                               right: Box::new(right),
                               span: op_span };

    Ok(Statement::Assignment { target, value, span })
}

/// Parses a function declaration.
///
/// Grammar: `fn name '(' params ')' ('->' type)? ':' body`. Parameters are
/// comma-separated names with optional type annotations. The body is a
/// statement, typically a block; a NEWLINE between the `:` and the body is
/// accepted.
fn parse_function_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let span = expect(tokens, &Token::Fn, 0)?;
    let (name, _) = parse_identifier(tokens)?;

    expect(tokens, &Token::LParen, span.line)?;
    let parameters = parse_comma_separated(tokens, parse_parameter, &Token::RParen)?;

    let return_type = if let Some((Token::Arrow, _)) = tokens.peek() {
        tokens.next();
        Some(parse_type_name(tokens)?)
    } else {
        None
    };

    expect(tokens, &Token::Colon, span.line)?;
    skip_newlines(tokens);
    let body = Box::new(parse_statement(tokens)?);

    Ok(Statement::FunctionDeclaration { name,
                                        parameters,
                                        return_type,
                                        body,
                                        span })
}

/// Parses one function parameter: `name (':' type)?`.
fn parse_parameter<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Parameter>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let (name, span) = parse_identifier(tokens)?;

    let type_name = if let Some((Token::Colon, _)) = tokens.peek() {
        tokens.next();
        Some(parse_type_name(tokens)?)
    } else {
        None
    };

    Ok(Parameter { name,
                   type_name,
                   span })
}

/// Parses an `if` statement with an optional `else` arm.
///
/// Syntax:
/// ```text
///     if <condition>:
///         <statements>
///     else:
///         <statements>
/// ```
/// The `else` arm is looked for past any blank lines, without committing
/// when it is absent.
fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let span = expect(tokens, &Token::If, 0)?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::Colon, span.line)?;
    skip_newlines(tokens);
    let then_branch = Box::new(parse_statement(tokens)?);

    let mut lookahead = tokens.clone();
    skip_newlines(&mut lookahead);
    let else_branch = if let Some((Token::Else, _)) = lookahead.peek() {
        skip_newlines(tokens);
        let else_span = expect(tokens, &Token::Else, span.line)?;
        expect(tokens, &Token::Colon, else_span.line)?;
        skip_newlines(tokens);
        Some(Box::new(parse_statement(tokens)?))
    } else {
        None
    };

    Ok(Statement::If { condition,
                       then_branch,
                       else_branch,
                       span })
}

/// Parses a `while` loop.
fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let span = expect(tokens, &Token::While, 0)?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::Colon, span.line)?;
    skip_newlines(tokens);
    let body = Box::new(parse_statement(tokens)?);

    Ok(Statement::While { condition, body, span })
}

/// Parses a `do: … while <condition>` loop.
fn parse_do_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let span = expect(tokens, &Token::Do, 0)?;
    expect(tokens, &Token::Colon, span.line)?;
    skip_newlines(tokens);
    let body = Box::new(parse_statement(tokens)?);

    skip_newlines(tokens);
    expect(tokens, &Token::While, span.line)?;
    let condition = parse_expression(tokens)?;

    Ok(Statement::DoWhile { body, condition, span })
}

/// Parses a `for <name> in <expression>:` loop.
fn parse_for_in<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let span = expect(tokens, &Token::For, 0)?;
    let (variable, _) = parse_identifier(tokens)?;
    expect(tokens, &Token::In, span.line)?;
    let iterable = parse_expression(tokens)?;
    expect(tokens, &Token::Colon, span.line)?;
    skip_newlines(tokens);
    let body = Box::new(parse_statement(tokens)?);

    Ok(Statement::ForIn { variable,
                          iterable,
                          body,
                          span })
}

/// Parses a `return` statement with an optional result expression.
fn parse_return<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let span = expect(tokens, &Token::Return, 0)?;

    let value = match tokens.peek() {
        Some((Token::NewLine | Token::Dedent | Token::Eof, _)) | None => None,
        _ => Some(parse_expression(tokens)?),
    };

    Ok(Statement::Return { value, span })
}
