use crate::engine::{Cursor, LookaheadParser, Match, PatternMatcher, ANT_TASK};
use crate::error::ParseError;
use crate::issue::{Issue, IssueBuilder};
use regex::Regex;

pub const ID: &str = "gcc4";

const WARNING_PATTERN: &str = r"(?P<file>.+?):(?P<line>\d+):(?:(?P<column>\d+):)? ?(?P<severity>[wW]arning|.*[Ee]rror): (?P<message>.*)";

/// gcc 4.x and later: `file:line:[column:] warning: message [-Wflag]`.
pub fn create() -> Result<LookaheadParser, regex::Error> {
    let matcher = PatternMatcher::full(&format!("{}{}", ANT_TASK, WARNING_PATTERN))?;
    let flag = Regex::new(r"\[-W(?P<flag>.+)\]$")?;

    Ok(LookaheadParser::new(ID, matcher, move |m, lookahead, builder| {
        create_issue(&flag, m, lookahead, builder)
    })
    .with_filter(|line| line.contains("arning") || line.contains("rror"))
    .with_make_directories())
}

fn create_issue(
    flag: &Regex,
    m: &Match<'_>,
    lookahead: &mut Cursor<'_>,
    builder: &mut IssueBuilder,
) -> Result<Option<Issue>, ParseError> {
    let mut message = m.str("message").to_string();

    if let Some(caps) = flag.captures(&message) {
        builder.set_category(&caps["flag"]);
    }

    while lookahead.has_next_matching(&is_message_continuation) {
        if let Some(line) = lookahead.next() {
            message.push('\n');
            message.push_str(&line);
        }
    }

    Ok(builder
        .set_file_name(m.str("file"))
        .set_line_start(m.number("line"))
        .set_column_start(m.number("column"))
        .guess_severity(m.str("severity"))
        .set_message(message)
        .build_optional())
}

/// Source excerpts and caret lines follow a diagnostic; paths, brackets and
/// further diagnostics do not.
fn is_message_continuation(peek: &str) -> bool {
    let head: Vec<char> = peek.chars().take(3).collect();
    if head.len() < 3 {
        return false;
    }
    if matches!(head[0], '/' | '[' | '<' | '=' | '\\') {
        return false;
    }
    if head[1] == ':' || head[2] == '/' {
        return false;
    }
    let lower = peek.to_lowercase();
    !["arning", "rror", "make"].iter().any(|t| lower.contains(t))
}
