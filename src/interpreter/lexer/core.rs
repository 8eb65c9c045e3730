use logos::{Lexer, Logos};

use crate::{error::ParseError, interpreter::lexer::Span};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language, plus the layout
/// markers synthesized after scanning.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Number literal tokens, kept as raw text (`42`, `0xFF`, `3.25`).
    /// The binder decides between hexadecimal integer, decimal integer, and
    /// double.
    #[regex(r"0[xX][0-9a-fA-F]+", |lex| lex.slice().to_string())]
    #[regex(r"[0-9]+(\.[0-9]*)?", |lex| lex.slice().to_string())]
    Number(String),
    /// String literal tokens with the surrounding quotes stripped. The
    /// language has no escape sequences.
    #[regex(r#""[^"\n]*""#, |lex| { let s = lex.slice(); s[1..s.len() - 1].to_string() })]
    Str(String),
    /// The raw contents of an f-string (`f"…"`), captured between the
    /// opening `f"` and the closing quote. Expanded into a concatenation
    /// token sequence before parsing.
    #[token("f\"", lex_fstring)]
    FString(String),
    /// Boolean literal tokens, `true` or `false`.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `do`
    #[token("do")]
    Do,
    /// `while`
    #[token("while")]
    While,
    /// `for`
    #[token("for")]
    For,
    /// `in`
    #[token("in")]
    In,
    /// `fn`
    #[token("fn")]
    Fn,
    /// `return`
    #[token("return")]
    Return,
    /// Identifier tokens; variable, type, or function names such as `x` or
    /// `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `# Comments.`
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `++`
    #[token("++")]
    PlusPlus,
    /// `--`
    #[token("--")]
    MinusMinus,
    /// `->`
    #[token("->")]
    Arrow,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `&&`
    #[token("&&")]
    DoubleAmpersand,
    /// `||`
    #[token("||")]
    DoublePipe,
    /// `=`
    #[token("=")]
    Equals,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `:`
    #[token(":")]
    Colon,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `!`
    #[token("!")]
    Bang,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// End of a logical line.
    #[token("\n", |lex| lex.extras.line += 1)]
    NewLine,
    /// Spaces, tabs and feeds inside a line. Indentation is measured from
    /// the source text by the layout pass, so the scanner can skip them.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,

    /// Block entry marker, synthesized by the layout pass.
    Indent,
    /// Block exit marker, synthesized by the layout pass.
    Dedent,
    /// End of input, appended by the layout pass.
    Eof,
    /// A stray character the scanner could not match.
    Undefined,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Captures the raw contents of an f-string.
///
/// Called by `logos` after the opening `f"` has been consumed. Scans the
/// remainder for the closing quote, tracking `{…}` nesting so that braces
/// and quotes inside interpolated expressions do not terminate the literal
/// early.
///
/// # Returns
/// - `Some(String)`: The contents between the quotes.
/// - `None`: If the f-string is not terminated on its line.
fn lex_fstring(lex: &mut Lexer<Token>) -> Option<String> {
    let remainder = lex.remainder();
    let bytes = remainder.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' if depth == 0 => {
                let content = remainder[..i].to_string();
                lex.bump(i + 1);
                return Some(content);
            },
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string && depth > 0 => depth -= 1,
            b'\n' => return None,
            _ => {},
        }
        i += 1;
    }

    None
}

/// Scans a source slice into raw tokens.
///
/// Spans are rebased by `offset` and lines start at `first_line`, which lets
/// the f-string expansion re-enter the scanner on an interpolated slice and
/// keep positions anchored in the original text.
///
/// # Errors
/// Returns a [`ParseError`] for unterminated string and f-string literals.
/// Any other unmatched character becomes a [`Token::Undefined`] token for
/// the parser to report.
pub(crate) fn scan(source: &str,
                   offset: usize,
                   first_line: usize)
                   -> Result<Vec<(Token, Span)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: first_line });

    while let Some(token) = lexer.next() {
        let range = lexer.span();
        let line = match &token {
            // The newline callback has already advanced the counter; the
            // token itself belongs to the line it ends.
            Ok(Token::NewLine) => lexer.extras.line - 1,
            _ => lexer.extras.line,
        };
        let span = Span { start: range.start + offset,
                          end:   range.end + offset,
                          line };

        match token {
            Ok(token) => tokens.push((token, span)),
            Err(()) => {
                let slice = lexer.slice();
                if slice.starts_with("f\"") {
                    return Err(ParseError::UnterminatedFString { line });
                }
                if slice.starts_with('"') {
                    return Err(ParseError::UnterminatedString { line });
                }
                tokens.push((Token::Undefined, span));
            },
        }
    }

    Ok(tokens)
}
