use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Span, Token},
        parser::core::ParseResult,
    },
};

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by array literals, call argument lists, and
/// parameter lists. It repeatedly calls `parse_item` to parse one element,
/// expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list. The
/// closing token is consumed.
///
/// Grammar (simplified): `list := (item ("," item)*)?`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, an unexpected token is
/// encountered, or the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let mut items = Vec::new();
    if let Some((token, _)) = tokens.peek()
       && token == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((token, _)) if token == closing => {
                tokens.next();
                break;
            },
            Some((token, span)) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected ',' or {closing:?}, found {token:?}"),
                                                         line:  span.line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name with its span.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier or the
/// input ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<(String, Span)>
    where I: Iterator<Item = &'a (Token, Span)>
{
    match tokens.next() {
        Some((Token::Identifier(name), span)) => Ok((name.clone(), *span)),
        Some((token, span)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected identifier, found {token:?}"),
                                              line:  span.line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Consumes the next token, which must equal `expected`.
///
/// # Errors
/// Returns a `ParseError` naming both the expected and the found token.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token,
                                                    line: usize)
                                                    -> ParseResult<Span>
    where I: Iterator<Item = &'a (Token, Span)>
{
    match tokens.next() {
        Some((token, span)) if token == expected => Ok(*span),
        Some((token, span)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected {expected:?}, found {token:?}"),
                                              line:  span.line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line }),
    }
}

/// Skips any run of NEWLINE tokens.
pub(in crate::interpreter::parser) fn skip_newlines<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, Span)>
{
    while let Some((Token::NewLine, _)) = tokens.peek() {
        tokens.next();
    }
}

/// Parses a type identifier with any number of `[]` suffixes.
///
/// Each suffix appends `[]` to the returned text, so `int[][]` round-trips
/// as written and the type-symbol parser can rebuild the nesting.
///
/// # Errors
/// Returns a `ParseError` if no identifier is present or a `[` suffix is
/// not closed.
pub(in crate::interpreter::parser) fn parse_type_name<'a, I>(tokens: &mut Peekable<I>)
                                                             -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let (mut text, span) = parse_identifier(tokens)?;

    while let Some((Token::LBracket, _)) = tokens.peek() {
        tokens.next();
        expect(tokens, &Token::RBracket, span.line)?;
        text.push_str("[]");
    }

    Ok(text)
}
