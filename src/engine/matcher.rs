use crate::source::Line;
use regex::{Captures, Regex};

/// A regular expression that must match a whole line.
#[derive(Debug, Clone)]
pub struct LinePattern {
    regex: Regex,
}

impl LinePattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(&format!("^(?:{})$", pattern))?,
        })
    }

    pub fn matches(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    pub fn captures<'t>(&self, line: &'t str) -> Option<Captures<'t>> {
        self.regex.captures(line)
    }
}

/// The primary pattern of a parser, fixed for the parser's lifetime.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    regex: Regex,
}

impl PatternMatcher {
    /// Anchored at both ends: the pattern must cover the entire line.
    pub fn full(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(&format!("^(?:{})$", pattern))?,
        })
    }

    /// Opt-in to find semantics: the first match anywhere in the line.
    pub fn partial(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn try_match<'t>(&self, line: &'t Line) -> Option<Match<'t>> {
        self.regex
            .captures(line.as_str())
            .map(|captures| Match { captures, line })
    }
}

/// Capture groups of one successful match.
///
/// Groups that did not take part in the match are absent, not errors.
#[derive(Debug)]
pub struct Match<'t> {
    captures: Captures<'t>,
    line: &'t Line,
}

impl<'t> Match<'t> {
    pub fn line(&self) -> &'t Line {
        self.line
    }

    pub fn line_number(&self) -> usize {
        self.line.number()
    }

    /// Named group, `None` if it did not participate.
    pub fn get(&self, name: &str) -> Option<&'t str> {
        self.captures.name(name).map(|m| m.as_str())
    }

    /// Positional group, `None` if it did not participate or does not exist.
    pub fn get_index(&self, index: usize) -> Option<&'t str> {
        self.captures.get(index).map(|m| m.as_str())
    }

    /// Named group or `""`.
    pub fn str(&self, name: &str) -> &'t str {
        self.get(name).unwrap_or("")
    }

    /// Named group parsed as a line or column number; 0 if absent or not a number.
    pub fn number(&self, name: &str) -> u32 {
        self.get(name)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }

    /// True if the named group participated and is not blank.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some_and(|s| !s.trim().is_empty())
    }

    /// First participating, non-blank group among `names`.
    pub fn first_of(&self, names: &[&str]) -> Option<&'t str> {
        names
            .iter()
            .filter_map(|name| self.get(name))
            .find(|s| !s.trim().is_empty())
    }
}
