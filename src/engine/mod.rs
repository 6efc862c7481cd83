//! The line-oriented lookahead parsing engine.
//!
//! A [`LookaheadParser`] reads its input line by line. Lines that pass the
//! optional filter are tested against the primary pattern; on a full match
//! the parser's continuation gets the [`Match`], the [`LookaheadCursor`] and
//! the [`IssueBuilder`](crate::issue::IssueBuilder), may consume more lines
//! and yields at most one issue. Scanning resumes wherever the continuation
//! left the cursor.

mod cancel;
mod cursor;
mod driver;
mod matcher;

pub use cancel::CancellationToken;
pub use cursor::{LinePredicate, LookaheadCursor};
pub use driver::{Continuation, Cursor, IssueParser, LookaheadParser, ANT_TASK};
pub use matcher::{LinePattern, Match, PatternMatcher};
