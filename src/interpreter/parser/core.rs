use std::iter::Peekable;

use crate::{
    ast::{Expr, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Span, Token},
        parser::{binary::parse_binary_expression, statement::parse_statement, utils::skip_newlines},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete token stream into its top-level statements.
///
/// Stray newlines between statements are skipped. The stream must be fully
/// consumed: anything left over besides the final EOF token is a hard parse
/// error.
///
/// # Parameters
/// - `tokens`: The token stream produced by the lexer.
///
/// # Returns
/// The top-level statements in source order.
///
/// # Errors
/// Propagates any statement-level parse error and reports trailing tokens.
pub fn parse_program(tokens: &[(Token, Span)]) -> ParseResult<Vec<Statement>> {
    let mut iter = tokens.iter().peekable();
    let mut statements = Vec::new();

    loop {
        skip_newlines(&mut iter);
        match iter.peek() {
            Some((Token::Eof, _)) | None => break,
            _ => statements.push(parse_statement(&mut iter)?),
        }
    }

    match iter.next() {
        Some((Token::Eof, _)) | None => Ok(statements),
        Some((token, span)) => {
            Err(ParseError::UnexpectedTrailingTokens { token: format!("{token:?}"),
                                                       line:  span.line, })
        },
    }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It starts the precedence
/// climb at the lowest level, so every binary operator is admitted.
///
/// Grammar: `expression := binary(0)`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, Span)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    parse_binary_expression(tokens, 0)
}
