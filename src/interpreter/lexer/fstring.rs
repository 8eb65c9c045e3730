use crate::{
    error::ParseError,
    interpreter::lexer::{
        Span,
        core::{Token, scan},
    },
};

/// Expands every f-string token in the stream into its desugared form.
///
/// `f"text{expr}more"` becomes the token sequence
/// `( "text" + ( expr… ) + "more" )`: literal chunks turn into string
/// tokens, each braced region is re-tokenized by the scanner with spans
/// rebased onto the original text, and `+` tokens join the pieces inside
/// one surrounding pair of parentheses. Empty chunks still produce empty
/// string tokens, so `f"{x}"` concatenates `x` between two empty strings.
/// Nested f-strings inside an interpolated expression are expanded
/// recursively.
///
/// # Errors
/// Returns a [`ParseError`] when a `{` is never closed or when the
/// re-tokenized expression slice contains an unterminated literal.
pub(crate) fn expand_fstrings(tokens: Vec<(Token, Span)>)
                              -> Result<Vec<(Token, Span)>, ParseError> {
    let mut out = Vec::with_capacity(tokens.len());

    for (token, span) in tokens {
        if let Token::FString(content) = token {
            expand_one(&content, span, &mut out)?;
        } else {
            out.push((token, span));
        }
    }

    Ok(out)
}

/// One piece of an f-string: a literal chunk or a braced expression,
/// identified by its byte range within the contents.
enum Part {
    Literal(usize, usize),
    Expr(usize, usize),
}

/// Expands a single f-string into `out`.
fn expand_one(content: &str, span: Span, out: &mut Vec<(Token, Span)>) -> Result<(), ParseError> {
    // The contents start after the opening `f"` in the original text.
    let base = span.start + 2;
    let line = span.line;
    let parts = split_parts(content, line)?;

    let marker = |at: usize| {
        Span { start: at,
               end:   at,
               line }
    };

    out.push((Token::LParen, marker(span.start)));

    let mut first = true;
    for part in parts {
        if !first {
            let at = match part {
                Part::Literal(s, _) | Part::Expr(s, _) => base + s,
            };
            out.push((Token::Plus, marker(at)));
        }
        first = false;

        match part {
            Part::Literal(s, e) => {
                let piece = Span { start: base + s,
                                   end:   base + e,
                                   line };
                out.push((Token::Str(content[s..e].to_string()), piece));
            },
            Part::Expr(s, e) => {
                out.push((Token::LParen, marker(base + s)));
                let inner = scan(&content[s..e], base + s, line)?;
                let inner = expand_fstrings(inner)?;
                out.extend(inner);
                out.push((Token::RParen, marker(base + e)));
            },
        }
    }

    out.push((Token::RParen, marker(span.end)));
    Ok(())
}

/// Splits f-string contents into alternating literal and expression parts.
///
/// The result always starts and ends with a literal part (possibly empty),
/// and literals and expressions strictly alternate. Braces nest, and quotes
/// inside a braced region are honoured so string literals containing braces
/// do not end the region early.
fn split_parts(content: &str, line: usize) -> Result<Vec<Part>, ParseError> {
    let bytes = content.as_bytes();
    let mut parts = Vec::new();
    let mut chunk_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'{' {
            parts.push(Part::Literal(chunk_start, i));

            let expr_start = i + 1;
            let mut depth = 1usize;
            let mut in_string = false;
            let mut j = expr_start;
            while j < bytes.len() {
                match bytes[j] {
                    b'"' => in_string = !in_string,
                    b'{' if !in_string => depth += 1,
                    b'}' if !in_string => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    },
                    _ => {},
                }
                j += 1;
            }
            if depth != 0 {
                return Err(ParseError::UnclosedInterpolation { line });
            }

            parts.push(Part::Expr(expr_start, j));
            i = j + 1;
            chunk_start = i;
        } else {
            i += 1;
        }
    }

    parts.push(Part::Literal(chunk_start, bytes.len()));
    Ok(parts)
}
