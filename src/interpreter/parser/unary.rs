use std::iter::Peekable;

use crate::{
    ast::{Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{Span, Token},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect, parse_comma_separated},
        },
    },
};

/// Parses a unary expression.
///
/// Recognized prefix operators are `+`, `-`, `!`, `++`, and `--`; prefix
/// operators nest (`--x` is two tokens, `-(-x)` needs parentheses). The
/// operand of `++`/`--` must be a variable, which is checked syntactically.
/// Without a prefix operator this falls through to postfix parsing.
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// The parsed expression node.
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    match tokens.peek() {
        Some((Token::Plus
              | Token::Minus
              | Token::Bang
              | Token::PlusPlus
              | Token::MinusMinus,
              span)) => {
            let span = *span;
            let Some((token, _)) = tokens.next() else {
                unreachable!()
            };
            let op = match token {
                Token::Plus => UnaryOperator::Identity,
                Token::Minus => UnaryOperator::Negate,
                Token::Bang => UnaryOperator::Not,
                Token::PlusPlus => UnaryOperator::Increment,
                Token::MinusMinus => UnaryOperator::Decrement,
                _ => unreachable!(),
            };

            let operand = parse_unary(tokens)?;
            if matches!(op, UnaryOperator::Increment | UnaryOperator::Decrement)
               && !matches!(operand, Expr::Variable { .. })
            {
                return Err(ParseError::InvalidIncrementTarget { line: span.line });
            }

            Ok(Expr::Unary { op,
                             operand: Box::new(operand),
                             postfix: false,
                             span })
        },
        _ => parse_postfix(tokens),
    }
}

/// Parses a primary expression followed by any number of postfix suffixes.
///
/// Suffixes are calls `(…)`, index accesses `[expr]`, and the postfix
/// `++`/`--` operators, iterated until the next token does not start a
/// suffix. Postfix `++`/`--` require the already-parsed expression to be a
/// variable.
pub(in crate::interpreter::parser) fn parse_postfix<'a, I>(tokens: &mut Peekable<I>)
                                                           -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let mut expr = parse_primary(tokens)?;

    loop {
        match tokens.peek() {
            Some((Token::LParen, span)) => {
                let span = *span;
                tokens.next();
                let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
                expr = Expr::Call { callee: Box::new(expr),
                                    arguments,
                                    span };
            },
            Some((Token::LBracket, span)) => {
                let span = *span;
                tokens.next();
                let index = parse_expression(tokens)?;
                expect(tokens, &Token::RBracket, span.line)?;
                expr = Expr::Index { array: Box::new(expr),
                                     index: Box::new(index),
                                     span };
            },
            Some((Token::PlusPlus | Token::MinusMinus, span)) => {
                let span = *span;
                let Some((token, _)) = tokens.next() else {
                    unreachable!()
                };
                let op = if matches!(token, Token::PlusPlus) {
                    UnaryOperator::Increment
                } else {
                    UnaryOperator::Decrement
                };

                if !matches!(expr, Expr::Variable { .. }) {
                    return Err(ParseError::InvalidIncrementTarget { line: span.line });
                }

                expr = Expr::Unary { op,
                                     operand: Box::new(expr),
                                     postfix: true,
                                     span };
            },
            _ => break,
        }
    }

    Ok(expr)
}

/// Parses a primary expression.
///
/// Primaries are boolean, number, and string literals, parenthesized
/// expressions, array literals, and variable references.
///
/// # Errors
/// Returns a `ParseError` for any other token, including the stray
/// characters the lexer turned into `Undefined` tokens.
fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    match tokens.next() {
        Some((Token::Number(text), span)) => {
            Ok(Expr::Number { text: text.clone(),
                              span: *span, })
        },
        Some((Token::Str(value), span)) => {
            Ok(Expr::Str { value: value.clone(),
                           span:  *span, })
        },
        Some((Token::Bool(value), span)) => {
            Ok(Expr::Bool { value: *value,
                            span:  *span, })
        },
        Some((Token::Identifier(name), span)) => {
            Ok(Expr::Variable { name: name.clone(),
                                span: *span, })
        },
        Some((Token::LParen, span)) => {
            let expression = parse_expression(tokens)?;
            expect(tokens, &Token::RParen, span.line)?;
            Ok(Expr::Parenthesized { expression: Box::new(expression),
                                     span:       *span, })
        },
        Some((Token::LBracket, span)) => {
            let elements = parse_comma_separated(tokens, parse_expression, &Token::RBracket)?;
            Ok(Expr::Array { elements,
                             span: *span, })
        },
        Some((token, span)) => {
            Err(ParseError::UnexpectedToken { token: format!("{token:?}"),
                                              line:  span.line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}
