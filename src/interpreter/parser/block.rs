use std::iter::Peekable;

use crate::{
    ast::Statement,
    error::ParseError,
    interpreter::{
        lexer::{Span, Token},
        parser::{core::ParseResult, statement::parse_statement, utils::skip_newlines},
    },
};

/// Parses an indented block.
///
/// A block is introduced by an INDENT marker and contains statements until
/// the matching DEDENT (or the end of input, which closes every open
/// block). Blank lines between statements are tolerated.
///
/// Grammar: `block := INDENT statement* DEDENT`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the INDENT marker.
///
/// # Returns
/// A `Statement::Block` containing all parsed statements.
///
/// # Errors
/// Returns a `ParseError` if no INDENT is present or a statement inside the
/// block fails to parse.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let span = match tokens.next() {
        Some((Token::Indent, span)) => *span,
        Some((_, span)) => return Err(ParseError::ExpectedBlock { line: span.line }),
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    let mut statements = Vec::new();
    loop {
        skip_newlines(tokens);
        match tokens.peek() {
            Some((Token::Dedent, _)) => {
                tokens.next();
                break;
            },
            Some((Token::Eof, _)) | None => break,
            _ => statements.push(parse_statement(tokens)?),
        }
    }

    Ok(Statement::Block { statements, span })
}
