/// Raw token scanning.
///
/// Defines the `Token` enum and the `logos`-driven scanner that turns source
/// text into a flat token stream. Layout markers and f-string expansion are
/// layered on top by the sibling modules.
pub mod core;
/// F-string expansion.
///
/// Rewrites every f-string token into an equivalent concatenation token
/// sequence by re-entering the scanner on each interpolated expression.
mod fstring;
/// Indentation layout.
///
/// Converts leading whitespace into INDENT and DEDENT markers using an
/// explicit indent stack.
mod layout;

use crate::error::ParseError;

pub use self::core::Token;

/// A half-open byte range into the source text, together with the source
/// line it starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end:   usize,
    /// 1-based source line of the first character.
    pub line:  usize,
}

/// Tokenizes source text into the stream consumed by the parser.
///
/// Runs the full lexing pipeline: the raw scan, f-string expansion, and the
/// indentation layout pass. The returned stream always ends with a single
/// [`Token::Eof`], and INDENT/DEDENT markers are balanced.
///
/// # Errors
/// Returns a [`ParseError`] for unterminated string or f-string literals,
/// unclosed interpolations, and indentation errors.
///
/// # Example
/// ```
/// use aspid::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("1 + 2").unwrap();
/// let kinds = tokens.iter().map(|(t, _)| t.clone()).collect::<Vec<_>>();
///
/// assert_eq!(kinds,
///            vec![Token::Number("1".to_string()),
///                 Token::Plus,
///                 Token::Number("2".to_string()),
///                 Token::Eof]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>, ParseError> {
    let raw = self::core::scan(source, 0, 1)?;
    let expanded = fstring::expand_fstrings(raw)?;
    layout::apply_layout(expanded, source)
}
