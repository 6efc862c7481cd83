use crate::engine::{Cursor, LinePattern, LookaheadParser, Match, PatternMatcher};
use crate::error::ParseError;
use crate::issue::{Issue, IssueBuilder, Severity, UNDEFINED};
use regex::Regex;

pub const ID: &str = "drmemory";

const DR_MEMORY_WARNING_PATTERN: &str = r"Error #\d+: (?P<header>.*)";

struct Patterns {
    elapsed: LinePattern,
    frame: LinePattern,
    note: LinePattern,
    frame_location: Regex,
    workspace: Regex,
}

/// Dr. Memory result files: an `Error #N:` header, the elapsed time, the
/// stack (`#` frames) and trailing `Note:` lines.
pub fn create() -> Result<LookaheadParser, regex::Error> {
    let matcher = PatternMatcher::full(DR_MEMORY_WARNING_PATTERN)?;
    let patterns = Patterns {
        elapsed: LinePattern::new(r"Elapsed time.*")?,
        frame: LinePattern::new(r"#.*")?,
        note: LinePattern::new(r"Note:.*")?,
        frame_location: Regex::new(r"#\s*\d+.*?\[(?P<file>.*/?.*):(?P<line>\d+)\]")?,
        workspace: Regex::new(r".*?(?:/jobs/.*?/workspace/|workspace/)")?,
    };

    Ok(LookaheadParser::new(ID, matcher, move |m, lookahead, builder| {
        create_issue(&patterns, m, lookahead, builder)
    })
    .with_filter(|line| line.contains("Error #")))
}

fn create_issue(
    patterns: &Patterns,
    m: &Match<'_>,
    lookahead: &mut Cursor<'_>,
    builder: &mut IssueBuilder,
) -> Result<Option<Issue>, ParseError> {
    let header = m.str("header");
    let mut message = vec![header.to_string()];
    let mut frames = Vec::new();

    while let Some(line) = lookahead.next_matching(&patterns.elapsed) {
        message.push(line.into_text());
    }
    while let Some(line) = lookahead.next_matching(&patterns.frame) {
        frames.push(line.into_text());
    }
    message.extend(frames.iter().cloned());
    while let Some(line) = lookahead.next_matching(&patterns.note) {
        message.push(line.into_text());
    }

    let (category, severity) = classify(header);
    let message = match message.join("\n") {
        joined if joined.trim().is_empty() => "Unknown Dr. Memory Error".to_string(),
        joined => joined,
    };
    if let Some((file, line)) = locate(patterns, &frames) {
        builder.set_file_name(file).set_line_start(line);
    } else {
        builder.set_file_name(UNDEFINED);
    }

    Ok(builder
        .set_category(category)
        .set_severity(severity)
        .set_message(message)
        .build_optional())
}

/// Category and severity from the header text, most specific first.
fn classify(header: &str) -> (&'static str, Severity) {
    const KINDS: &[(&str, &str, Severity)] = &[
        ("UNADDRESSABLE ACCESS", "Unaddressable Access", Severity::WarningHigh),
        ("UNINITIALIZED READ", "Uninitialized Read", Severity::WarningHigh),
        ("INVALID HEAP ARGUMENT", "Invalid Heap Argument", Severity::WarningHigh),
        ("POSSIBLE LEAK", "Possible Leak", Severity::WarningNormal),
        ("REACHABLE LEAK", "Reachable Leak", Severity::WarningHigh),
        ("LEAK", "Leak", Severity::WarningHigh),
        ("GDI USAGE ERROR", "GDI Usage Error", Severity::WarningNormal),
        ("HANDLE LEAK", "Handle Leak", Severity::WarningNormal),
        ("WARNING", "Warning", Severity::WarningNormal),
    ];

    let upper = header.to_uppercase();
    KINDS
        .iter()
        .find(|(token, _, _)| upper.starts_with(token))
        .map(|(_, category, severity)| (*category, *severity))
        .unwrap_or(("Unknown", Severity::WarningNormal))
}

/// Location of the first frame inside a workspace, else of the first frame
/// with any source location.
fn locate(patterns: &Patterns, frames: &[String]) -> Option<(String, u32)> {
    let located: Vec<(String, u32)> = frames
        .iter()
        .filter_map(|frame| patterns.frame_location.captures(frame))
        .filter_map(|caps| {
            let line = caps["line"].parse().ok()?;
            Some((caps["file"].to_string(), line))
        })
        .collect();

    located
        .iter()
        .find(|(file, _)| patterns.workspace.is_match(file))
        .or_else(|| located.first())
        .cloned()
}
