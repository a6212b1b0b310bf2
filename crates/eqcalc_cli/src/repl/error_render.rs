//! Parse error rendering with source location caret.

use eqcalc_ast::Span;
use eqcalc_parser::ParseError;

/// Render an error with a caret under the offending column.
///
/// ```text
/// f(:x ]
///      ^ expected either an argument separator ...
/// ```
pub fn render_error_with_caret(input: &str, span: Span, message: &str) -> String {
    // Clamp span to input bounds and snap to char boundaries
    let mut start = span.start.min(input.len());
    while !input.is_char_boundary(start) {
        start -= 1;
    }
    let column = input[..start].chars().count();
    let width = input[start..span.end.clamp(start, input.len())].chars().count();

    let mut result = String::new();
    result.push_str(input);
    result.push('\n');
    result.push_str(&" ".repeat(column));
    result.push('^');
    if width > 1 {
        result.push_str(&"~".repeat(width - 1));
    }
    result.push(' ');
    result.push_str(message);
    result
}

/// Render a ParseError against the text it was parsed from.
pub fn render_parse_error(input: &str, error: &ParseError) -> String {
    render_error_with_caret(
        input,
        error.span(input),
        &format!("expected {}", error.expected()),
    )
}
