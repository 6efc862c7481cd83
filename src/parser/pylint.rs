use crate::engine::{LookaheadParser, Match, PatternMatcher};
use crate::issue::{Issue, IssueBuilder, Severity, UNDEFINED};

pub const ID: &str = "pylint";

/// `--output-format=parseable`, with or without the module column.
const PYLINT_PATTERN: &str = r"(?P<path>(?:[A-Z]:\\)?[^:]*)(?::(?P<module>.*))?:(?P<line>\d+): \[(?P<type>(?P<category>[A-Z])\d*)?(?:\((?P<symbol>.*)\), )?.*?\] (?P<message>.*)";

const UNKNOWN_CATEGORY: &str = "pylint-unknown-category";
const UNKNOWN_TYPE: &str = "pylint-unknown-type";

pub fn create() -> Result<LookaheadParser, regex::Error> {
    let matcher = PatternMatcher::full(PYLINT_PATTERN)?;

    Ok(LookaheadParser::new(ID, matcher, |m, _lookahead, builder| {
        Ok(create_issue(m, builder))
    })
    .with_filter(|line| line.contains('[')))
}

fn create_issue(m: &Match<'_>, builder: &mut IssueBuilder) -> Option<Issue> {
    let category = m.str("category");
    let issue_type = m
        .first_of(&["symbol", "type"])
        .unwrap_or(UNKNOWN_TYPE);

    let module = m.get("module").filter(|s| !s.is_empty());
    let package = module
        .and_then(|module| module.rsplit_once('.'))
        .map(|(package, _)| package)
        .unwrap_or(UNDEFINED);

    builder
        .set_file_name(m.str("path"))
        .set_line_start(m.number("line"))
        .set_module_name(module.unwrap_or(UNDEFINED))
        .set_package_name(package)
        .set_category(category_name(category))
        .set_type(issue_type)
        .set_severity(severity_of(category))
        .set_message(m.str("message"))
        .build_optional()
}

fn category_name(category: &str) -> &'static str {
    match category {
        "I" => "Informational",
        "R" => "Refactor",
        "C" => "Convention",
        "W" => "Warning",
        "E" => "Error",
        "F" => "Fatal",
        _ => UNKNOWN_CATEGORY,
    }
}

fn severity_of(category: &str) -> Severity {
    match category {
        "I" | "R" | "C" => Severity::WarningLow,
        "E" => Severity::WarningHigh,
        "F" => Severity::Error,
        _ => Severity::WarningNormal,
    }
}
