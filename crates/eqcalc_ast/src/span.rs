//! Source span type for error reporting.
//!
//! Byte offsets into an input string.

/// Source location span (byte offsets), the range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span covering the single character starting at `offset` in `input`,
    /// or an empty span when `offset` is at the end of the input.
    pub fn at_char(input: &str, offset: usize) -> Self {
        let width = input
            .get(offset..)
            .and_then(|rest| rest.chars().next())
            .map_or(0, char::len_utf8);
        Self::new(offset, offset + width)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_basic() {
        let span = Span::new(5, 10);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert_eq!(format!("{}", span), "5..10");
    }

    #[test]
    fn test_span_at_char() {
        assert_eq!(Span::at_char("f(x", 1), Span::new(1, 2));
        assert_eq!(Span::at_char("f(x", 3), Span::new(3, 3));
        assert_eq!(Span::at_char("f(√", 2), Span::new(2, 5));
        assert!(Span::at_char("", 0).is_empty());
    }
}
