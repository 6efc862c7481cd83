use crate::engine::{LookaheadParser, Match, PatternMatcher};
use crate::issue::{Issue, IssueBuilder, Severity};

pub const ID: &str = "clang-tidy";

const CLANG_TIDY_PATTERN: &str = r"(?:clang-tidy\S* (?:-\S+ )*|)(?:(?P<file>.+):(?P<line>\d+):(?P<column>\d+): |)(?P<level>warning|error): (?P<message>.*?) \[(?P<check>[^\s]*?)\]";

const DOCS_URL: &str = "https://clang.llvm.org/extra/clang-tidy/checks";

pub fn create() -> Result<LookaheadParser, regex::Error> {
    let matcher = PatternMatcher::full(CLANG_TIDY_PATTERN)?;

    Ok(LookaheadParser::new(ID, matcher, |m, _lookahead, builder| {
        Ok(create_issue(m, builder))
    })
    .with_filter(|line| line.contains("warning") || line.contains("error")))
}

fn create_issue(m: &Match<'_>, builder: &mut IssueBuilder) -> Option<Issue> {
    let check = m.str("check");
    // compiler warnings passed through by clang-tidy belong to the compiler parser
    if check.starts_with("-W") {
        return None;
    }

    let level = m.str("level");
    let severity = if level.contains("error") {
        Severity::WarningHigh
    } else {
        Severity::WarningNormal
    };

    if m.is_set("file") {
        builder
            .set_file_name(m.str("file"))
            .set_line_start(m.number("line"))
            .set_column_start(m.number("column"));
    }
    if let Some(url) = documentation_url(check) {
        builder.set_description(format!(
            "<p>See <a href=\"{url}\">{check}</a> for details.</p>"
        ));
    }

    builder
        .set_category(check)
        .set_type(capitalize(level))
        .set_severity(severity)
        .set_message(m.str("message"))
        .build_optional()
}

/// `bugprone-use-after-move` lives at `<docs>/bugprone/use-after-move.html`.
fn documentation_url(check: &str) -> Option<String> {
    if check.starts_with("clang-diagnostic-") || check.starts_with("clang-analyzer-") {
        return None;
    }
    let (module, name) = check.split_once('-')?;
    if module.is_empty() || name.is_empty() {
        return None;
    }
    Some(format!("{DOCS_URL}/{module}/{name}.html"))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_text;

    #[test]
    fn test_warning_with_location() {
        let log = "/src/app/main.cpp:14:3: warning: 'x' used after it was moved [bugprone-use-after-move]\n";
        let report = parse_text(&create().unwrap(), log);

        assert_eq!(report.len(), 1);
        let issue = report.get(0).unwrap();
        assert_eq!(issue.file_name, "/src/app/main.cpp");
        assert_eq!(issue.line_start, 14);
        assert_eq!(issue.column_start, 3);
        assert_eq!(issue.category, "bugprone-use-after-move");
        assert_eq!(issue.issue_type, "Warning");
        assert_eq!(issue.severity, Severity::WarningNormal);
        assert_eq!(issue.message, "'x' used after it was moved");
        assert!(issue
            .description
            .contains("https://clang.llvm.org/extra/clang-tidy/checks/bugprone/use-after-move.html"));
    }

    #[test]
    fn test_error_without_location() {
        let log = "error: no input files [clang-diagnostic-error]\n";
        let report = parse_text(&create().unwrap(), log);

        let issue = report.get(0).unwrap();
        assert_eq!(issue.file_name, "-");
        assert_eq!(issue.severity, Severity::WarningHigh);
        assert_eq!(issue.issue_type, "Error");
        assert_eq!(issue.description, "");
    }

    #[test]
    fn test_invocation_prefix_is_skipped() {
        let log = "clang-tidy-14 -quiet -p=build a.cpp:1:2: warning: use nullptr [modernize-use-nullptr]\n";
        let report = parse_text(&create().unwrap(), log);

        assert_eq!(report.get(0).unwrap().file_name, "a.cpp");
    }

    #[test]
    fn test_compiler_flags_are_suppressed() {
        let log = "\
a.cpp:3:1: warning: unused variable 'y' [-Wunused-variable]
a.cpp:4:1: warning: use auto [modernize-use-auto]
";
        let report = parse_text(&create().unwrap(), log);

        assert_eq!(report.len(), 1);
        assert_eq!(report.get(0).unwrap().category, "modernize-use-auto");
    }

    #[test]
    fn test_documentation_url() {
        assert_eq!(
            documentation_url("readability-identifier-naming").as_deref(),
            Some("https://clang.llvm.org/extra/clang-tidy/checks/readability/identifier-naming.html")
        );
        assert_eq!(documentation_url("clang-analyzer-core.NullDereference"), None);
        assert_eq!(documentation_url("misc"), None);
    }
}
