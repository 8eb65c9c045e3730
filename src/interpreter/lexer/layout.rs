use crate::{
    error::ParseError,
    interpreter::lexer::{Span, core::Token},
};

/// Applies the indentation layout rules to a raw token stream.
///
/// Walks the stream with an explicit indent stack seeded with level 0. At
/// the first token of every logical line the indentation is measured and
/// compared with the stack top: one INDENT is emitted and pushed per unit of
/// increase, and one DEDENT is emitted and popped per unit of decrease.
/// Blank lines and comment-only lines produce no tokens besides NEWLINE and
/// therefore never disturb the stack. At the end of input the stack drains
/// back to level 0 and a single EOF token is appended.
///
/// # Errors
/// Returns [`ParseError::IndentationError`] when a dedent does not land on
/// an enclosing indentation level.
pub(crate) fn apply_layout(tokens: Vec<(Token, Span)>,
                           source: &str)
                           -> Result<Vec<(Token, Span)>, ParseError> {
    let mut out = Vec::with_capacity(tokens.len() + 8);
    let mut indent_stack: Vec<usize> = vec![0];
    let mut at_line_start = true;
    let mut last_line = 1;

    for (token, span) in tokens {
        last_line = span.line;

        if token == Token::NewLine {
            out.push((token, span));
            at_line_start = true;
            continue;
        }

        if at_line_start {
            at_line_start = false;

            let indent = measure_indent(source, span.start);
            let marker = Span { start: span.start,
                                end:   span.start,
                                line:  span.line, };
            let current = *indent_stack.last().expect("indent stack is never empty");

            if indent > current {
                for level in current + 1..=indent {
                    indent_stack.push(level);
                    out.push((Token::Indent, marker));
                }
            } else if indent < current {
                while *indent_stack.last().expect("indent stack is never empty") > indent {
                    indent_stack.pop();
                    out.push((Token::Dedent, marker));
                }
                if *indent_stack.last().expect("indent stack is never empty") != indent {
                    return Err(ParseError::IndentationError { line: span.line });
                }
            }
        }

        out.push((token, span));
    }

    let marker = Span { start: source.len(),
                        end:   source.len(),
                        line:  last_line, };
    while indent_stack.len() > 1 {
        indent_stack.pop();
        out.push((Token::Dedent, marker));
    }
    out.push((Token::Eof, marker));

    Ok(out)
}

/// Measures the indentation of the line a token starts on, in units.
///
/// A tab counts as one unit and resets the space run; every four consecutive
/// spaces form one unit; a trailing run of fewer than four spaces is
/// ignored.
fn measure_indent(source: &str, token_start: usize) -> usize {
    let line_start = source[..token_start].rfind('\n').map_or(0, |i| i + 1);
    let mut units = 0;
    let mut spaces = 0;

    for ch in source[line_start..token_start].chars() {
        match ch {
            '\t' => {
                units += 1;
                spaces = 0;
            },
            ' ' => {
                spaces += 1;
                if spaces == 4 {
                    units += 1;
                    spaces = 0;
                }
            },
            _ => break,
        }
    }

    units
}
