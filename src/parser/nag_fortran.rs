use crate::engine::{LinePattern, LookaheadParser, PatternMatcher};
use crate::issue::Severity;

pub const ID: &str = "nagfor";

const NAGFOR_MSG_PATTERN: &str = r"(?P<kind>Info|Warning|Questionable|Extension|Obsolescent|Deleted feature used|Error|Runtime Error|Fatal Error|Panic|Non-standard\(Obsolete\)|Extension\(NAG\)|Extension\(F[0-9]+\)): (?P<file>.+\.[^,:\n]+)(?:, line (?P<line>\d+))?: (?P<message>.+(?:\s+detected at .+)?)";

const CONTINUATION_PATTERN: &str = r"\s+ .+";

/// NAG Fortran compiler messages, optionally followed by indented
/// `detected at` lines.
pub fn create() -> Result<LookaheadParser, regex::Error> {
    let matcher = PatternMatcher::full(NAGFOR_MSG_PATTERN)?;
    let continuation = LinePattern::new(CONTINUATION_PATTERN)?;

    Ok(LookaheadParser::new(ID, matcher, move |m, lookahead, builder| {
        let mut message = m.str("message").to_string();
        while let Some(line) = lookahead.next_matching(&continuation) {
            message.push('\n');
            message.push_str(&line);
        }

        let kind = m.str("kind");
        Ok(builder
            .set_file_name(m.str("file"))
            .set_line_start(m.number("line"))
            .set_category(kind)
            .set_severity(severity_of(kind))
            .set_message(message)
            .build_optional())
    }))
}

fn severity_of(kind: &str) -> Severity {
    match kind {
        "Error" | "Runtime Error" | "Fatal Error" | "Panic" => Severity::WarningHigh,
        "Info" => Severity::WarningLow,
        _ => Severity::WarningNormal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_text;

    #[test]
    fn test_warning_with_line() {
        let log = "Warning: example.f90, line 3: Unused dummy variable X\n";
        let report = parse_text(&create().unwrap(), log);

        let issue = report.get(0).unwrap();
        assert_eq!(issue.file_name, "example.f90");
        assert_eq!(issue.line_start, 3);
        assert_eq!(issue.category, "Warning");
        assert_eq!(issue.severity, Severity::WarningNormal);
        assert_eq!(issue.message, "Unused dummy variable X");
    }

    #[test]
    fn test_error_with_detected_at_continuation() {
        let log = "\
Error: example.f90, line 5: Implicit type for I
       detected at I@<end-of-statement>
Info: example.f90, line 9: Unused local variable J
";
        let report = parse_text(&create().unwrap(), log);

        assert_eq!(report.len(), 2);
        let error = report.get(0).unwrap();
        assert_eq!(error.severity, Severity::WarningHigh);
        assert_eq!(
            error.message,
            "Implicit type for I\n       detected at I@<end-of-statement>"
        );
        assert_eq!(report.get(1).unwrap().severity, Severity::WarningLow);
    }

    #[test]
    fn test_message_without_line() {
        let log = "Extension(F2008): mod.f90: Module procedure without MODULE keyword\n";
        let report = parse_text(&create().unwrap(), log);

        let issue = report.get(0).unwrap();
        assert_eq!(issue.category, "Extension(F2008)");
        assert_eq!(issue.line_start, 0);
        assert_eq!(issue.file_name, "mod.f90");
    }

    #[test]
    fn test_runtime_error_severity() {
        let log = "Runtime Error: run.f90, line 7: Reference to undefined variable A\n";
        let report = parse_text(&create().unwrap(), log);

        let issue = report.get(0).unwrap();
        assert_eq!(issue.category, "Runtime Error");
        assert_eq!(issue.severity, Severity::WarningHigh);
    }
}
