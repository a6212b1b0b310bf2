use eqcalc_ast::Span;
use thiserror::Error;

/// Malformed input: where parsing stopped and what was expected there.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unexpected symbol at {offset}, expected {expected}")]
pub struct ParseError {
    /// Byte offset into the parsed source.
    pub offset: usize,
    /// Human-readable description of the expected construct.
    pub expected: String,
}

impl ParseError {
    pub fn new(offset: usize, expected: impl Into<String>) -> Self {
        Self {
            offset,
            expected: expected.into(),
        }
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// Location of the offending character within `input`.
    pub fn span(&self, input: &str) -> Span {
        Span::at_char(input, self.offset)
    }
}
