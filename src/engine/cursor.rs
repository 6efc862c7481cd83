use super::LinePattern;
use crate::error::ParseError;
use crate::source::Line;

/// Condition on an upcoming line, used for conditional consumption.
pub trait LinePredicate {
    fn test(&self, line: &str) -> bool;
}

impl LinePredicate for LinePattern {
    fn test(&self, line: &str) -> bool {
        self.matches(line)
    }
}

impl<F: Fn(&str) -> bool> LinePredicate for F {
    fn test(&self, line: &str) -> bool {
        self(line)
    }
}

/// Forward-only cursor with one line of lookahead.
///
/// Peeking never advances the position. A failing source reads as end of
/// input; the error is kept and handed out once by [`check`](Self::check).
pub struct LookaheadCursor<I> {
    lines: I,
    lookahead: Option<Line>,
    error: Option<ParseError>,
    line_number: usize,
}

impl<I> LookaheadCursor<I>
where
    I: Iterator<Item = Result<Line, ParseError>>,
{
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            lookahead: None,
            error: None,
            line_number: 0,
        }
    }

    fn fill(&mut self) {
        if self.lookahead.is_some() || self.error.is_some() {
            return;
        }
        match self.lines.next() {
            Some(Ok(line)) => self.lookahead = Some(line),
            Some(Err(e)) => self.error = Some(e),
            None => {}
        }
    }

    pub fn has_next(&mut self) -> bool {
        self.peek().is_some()
    }

    /// True if a next line exists and satisfies `predicate`; nothing is consumed.
    pub fn has_next_matching(&mut self, predicate: &impl LinePredicate) -> bool {
        self.peek().is_some_and(|line| predicate.test(line))
    }

    pub fn peek(&mut self) -> Option<&Line> {
        self.fill();
        self.lookahead.as_ref()
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Line> {
        self.fill();
        let line = self.lookahead.take()?;
        self.line_number = line.number();
        Some(line)
    }

    /// Consume the next line only if it satisfies `predicate`.
    pub fn next_matching(&mut self, predicate: &impl LinePredicate) -> Option<Line> {
        if self.has_next_matching(predicate) {
            self.next()
        } else {
            None
        }
    }

    /// Number of the most recently consumed line, 0 before the first.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Surface a source error that ended the input early.
    pub fn check(&mut self) -> Result<(), ParseError> {
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(text: &str) -> LookaheadCursor<impl Iterator<Item = Result<Line, ParseError>>> {
        let lines: Vec<_> = text
            .lines()
            .enumerate()
            .map(|(i, l)| Ok(Line::new(i + 1, l)))
            .collect();
        LookaheadCursor::new(lines.into_iter())
    }

    #[test]
    fn test_empty_input() {
        let mut cursor = cursor("");

        assert!(!cursor.has_next());
        assert!(cursor.peek().is_none());
        assert!(cursor.next().is_none());
        assert_eq!(cursor.line_number(), 0);
    }

    #[test]
    fn test_single_line() {
        let mut cursor = cursor("First Line");

        assert!(cursor.has_next());
        assert_eq!(cursor.next().unwrap().as_str(), "First Line");
        assert_eq!(cursor.line_number(), 1);
        assert!(!cursor.has_next());
    }

    #[test]
    fn test_lookahead_matching() {
        let line_end = LinePattern::new(r".*Line$").unwrap();
        let second = LinePattern::new(r"Second.*").unwrap();
        let first = LinePattern::new(r"First.*").unwrap();
        let mut cursor = cursor("First Line\nSecond Line");

        assert!(cursor.has_next_matching(&line_end));
        assert!(!cursor.has_next_matching(&second));
        assert_eq!(cursor.next().unwrap().as_str(), "First Line");

        assert!(cursor.has_next_matching(&line_end));
        assert!(!cursor.has_next_matching(&first));
        assert_eq!(cursor.next().unwrap().as_str(), "Second Line");

        assert!(!cursor.has_next());
        assert!(!cursor.has_next_matching(&LinePattern::new(".*").unwrap()));
    }

    #[test]
    fn test_peek_is_side_effect_free() {
        let mut cursor = cursor("a\nb");
        cursor.next();

        for _ in 0..5 {
            assert_eq!(cursor.peek().unwrap().as_str(), "b");
            assert!(cursor.has_next());
            assert_eq!(cursor.line_number(), 1);
        }
        assert_eq!(cursor.next().unwrap().number(), 2);
    }

    #[test]
    fn test_next_matching_with_closure() {
        let mut cursor = cursor("  indented\nflush");
        let indented = |line: &str| line.starts_with(' ');

        assert!(cursor.next_matching(&indented).is_some());
        assert!(cursor.next_matching(&indented).is_none());
        assert_eq!(cursor.next().unwrap().as_str(), "flush");
    }

    #[test]
    fn test_source_error_is_latched() {
        let lines = vec![
            Ok(Line::new(1, "ok")),
            Err(ParseError::Decode {
                file: "x".to_string(),
                line: 2,
            }),
        ];
        let mut cursor = LookaheadCursor::new(lines.into_iter());

        assert!(cursor.next().is_some());
        assert!(cursor.check().is_ok());
        assert!(!cursor.has_next());
        assert!(matches!(cursor.check(), Err(ParseError::Decode { line: 2, .. })));
        assert!(cursor.check().is_ok());
    }
}
