use crate::engine::{Cursor, LinePattern, LookaheadParser, Match, PatternMatcher};
use crate::error::ParseError;
use crate::issue::{Issue, IssueBuilder, Severity};

pub const ID: &str = "javac";

/// Maven/ant javac output and kotlinc `w:` lines.
const JAVAC_WARNING_PATTERN: &str = r"(?:\S+\s+)?(?:(?:\[(?P<level>WARNING|ERROR)\]|w:)\s+)(?P<file>[^\[\(]*):\s*[\[\(](?P<line>\d+)[.,;]*\s?(?P<column>\d+)?[\]\)]\s*:?(?:\[(?P<category>\w+)\])?\s*(?P<message>.*)";

/// Error Prone appends a link line to its findings; those are reported by
/// the dedicated Error Prone tooling.
const ERRORPRONE_URL_PATTERN: &str = r"\s+\(see https?://errorprone\S+\s*\)";

pub fn create() -> Result<LookaheadParser, regex::Error> {
    let matcher = PatternMatcher::full(JAVAC_WARNING_PATTERN)?;
    let errorprone = LinePattern::new(ERRORPRONE_URL_PATTERN)?;

    Ok(LookaheadParser::new(ID, matcher, move |m, lookahead, builder| {
        create_issue(&errorprone, m, lookahead, builder)
    })
    .with_filter(|line| line.contains('[') || line.contains("w:")))
}

fn create_issue(
    errorprone: &LinePattern,
    m: &Match<'_>,
    lookahead: &mut Cursor<'_>,
    builder: &mut IssueBuilder,
) -> Result<Option<Issue>, ParseError> {
    if lookahead.has_next_matching(errorprone) {
        return Ok(None);
    }

    let message = m.str("message");
    let severity = if m.str("level") == "ERROR" {
        Severity::Error
    } else {
        Severity::WarningNormal
    };
    let category = match m.get("category") {
        Some(category) if !category.is_empty() => category.to_string(),
        _ => guess_category(message).to_string(),
    };

    Ok(builder
        .set_file_name(m.str("file").trim())
        .set_line_start(m.number("line"))
        .set_column_start(m.number("column"))
        .set_category(category)
        .set_severity(severity)
        .set_message(message)
        .build_optional())
}

fn guess_category(message: &str) -> &'static str {
    if message.contains("proprietary") {
        "Proprietary API"
    } else if message.contains("deprecated") {
        "Deprecation"
    } else {
        ""
    }
}
