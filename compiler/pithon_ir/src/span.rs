//! Source locations.

use std::fmt;

/// Byte range in the source text a statement was parsed from.
///
/// Trees built without a parser use [`Span::DUMMY`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Placeholder for synthesized nodes.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    pub const fn is_dummy(self) -> bool {
        self.start == 0 && self.end == 0
    }

    /// 1-based line of `start` within `source`.
    pub fn line_in(self, source: &str) -> usize {
        let end = (self.start as usize).min(source.len());
        source.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_line_lookup() {
        let source = "x = 1\ny = 2\nprint(x)";
        assert_eq!(Span::new(0, 5).line_in(source), 1);
        assert_eq!(Span::new(6, 11).line_in(source), 2);
        assert_eq!(Span::new(12, 20).line_in(source), 3);
    }

    #[test]
    fn test_span_dummy() {
        assert!(Span::DUMMY.is_dummy());
        assert!(!Span::new(3, 4).is_dummy());
        assert_eq!(Span::new(3, 4).to_string(), "3..4");
    }
}
