use crate::engine::{CancellationToken, IssueParser, LookaheadCursor};
use crate::error::ParseError;
use crate::issue::{IssueBuilder, Report};
use crate::source::ReaderFactory;
use regex::Regex;
use tracing::debug;

pub const ID: &str = "ajc";

const DETAIL_HEADER: &str = "[INFO] Showing AJC message detail for messages of types";
const WARNING_PREFIX: &str = "[WARNING] ";

const DEPRECATION: &str = "Deprecation";
const ADVICE: &str = "Advice";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Before the detail header; everything is ignored.
    Start,
    Parsing,
    ParsedWarning,
    ParsedFile,
}

#[derive(Default)]
struct Pending {
    message: String,
    file: String,
    category: &'static str,
    line: u32,
}

/// AspectJ compiler output as logged by the aspectj-maven-plugin.
///
/// Messages only count after the detail header. Each one is a `[WARNING]`
/// line, an optional tab-indented `file:line` reference and a closing blank
/// line.
pub struct AjcParser {
    color_codes: Regex,
}

impl AjcParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            color_codes: Regex::new(r"\x1b\[.*\x1b\[0m")?,
        })
    }
}

impl IssueParser for AjcParser {
    fn id(&self) -> &str {
        ID
    }

    fn parse(
        &self,
        factory: &dyn ReaderFactory,
        cancel: &CancellationToken,
    ) -> Result<Report, ParseError> {
        let mut report = Report::new();
        let mut builder = IssueBuilder::new();
        builder.set_origin(ID);

        let mut lookahead = LookaheadCursor::new(factory.lines()?);
        let mut state = State::Start;
        let mut pending = Pending::default();

        while let Some(line) = lookahead.next() {
            let line = self.color_codes.replace_all(&line, "");

            state = match state {
                State::Start if line.starts_with(DETAIL_HEADER) => State::Parsing,
                State::Start => State::Start,
                State::Parsing => match line.strip_prefix(WARNING_PREFIX) {
                    Some(message) => {
                        pending.message = message.to_string();
                        pending.category = guess_category(message);
                        State::ParsedWarning
                    }
                    None => State::Parsing,
                },
                State::ParsedWarning | State::ParsedFile if line.is_empty() => {
                    flush(&mut pending, &mut builder, &mut report);
                    State::Parsing
                }
                State::ParsedWarning if line.starts_with('\t') => {
                    if let Some((file, number)) = line.rsplit_once(':') {
                        pending.file = file.trim().to_string();
                        pending.line = number.trim().parse().unwrap_or(0);
                    }
                    State::ParsedFile
                }
                other => other,
            };

            lookahead.check()?;
            if cancel.is_canceled() {
                return Err(ParseError::canceled(report));
            }
        }
        lookahead.check()?;

        if matches!(state, State::ParsedWarning | State::ParsedFile) {
            flush(&mut pending, &mut builder, &mut report);
        }

        debug!(
            "{}: {} lines, {} issues in {}",
            ID,
            lookahead.line_number(),
            report.len(),
            factory.file_name()
        );
        Ok(report)
    }
}

fn guess_category(message: &str) -> &'static str {
    if message.contains("is deprecated") || message.contains("overrides a deprecated") {
        DEPRECATION
    } else if message.contains("adviceDidNotMatch") {
        ADVICE
    } else {
        ""
    }
}

fn flush(pending: &mut Pending, builder: &mut IssueBuilder, report: &mut Report) {
    let Pending {
        message,
        file,
        category,
        line,
    } = std::mem::take(pending);

    if message.trim().is_empty() {
        return;
    }
    if !file.is_empty() {
        builder.set_file_name(file);
    }
    let issue = builder
        .set_line_start(line)
        .set_category(category)
        .set_message(message.trim())
        .build_and_clean();
    report.add(issue);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Severity;
    use crate::parser::parse_text;

    #[test]
    fn test_warning_after_detail_header() {
        let log = "\
[INFO] Showing AJC message detail for messages of types: [error, warning, fail]
[WARNING] unused import com.example.Foo
\t/home/dev/project/src/main/java/com/example/Bar.java:7

";
        let report = parse_text(&AjcParser::new().unwrap(), log);

        assert_eq!(report.len(), 1);
        let issue = report.get(0).unwrap();
        assert_eq!(issue.category, "");
        assert_eq!(issue.file_name, "/home/dev/project/src/main/java/com/example/Bar.java");
        assert_eq!(issue.line_start, 7);
        assert_eq!(issue.severity, Severity::WarningNormal);
        assert_eq!(issue.message, "unused import com.example.Foo");
        assert_eq!(issue.origin, "ajc");
    }

    #[test]
    fn test_warnings_before_header_are_ignored() {
        let log = "\
[WARNING] too early
\t/src/A.java:1

";
        assert!(parse_text(&AjcParser::new().unwrap(), log).is_empty());
    }

    #[test]
    fn test_categories_and_fields_do_not_leak() {
        let log = "\
[INFO] Showing AJC message detail for messages of types: [error, warning, fail]
[WARNING] advice defined in com.example.Tracing has not been applied [Xlint:adviceDidNotMatch]
\t/src/Tracing.aj:12

[WARNING] bar() in com.example.Old is deprecated
\t/src/Client.java:30

[WARNING] no location here

";
        let report = parse_text(&AjcParser::new().unwrap(), log);

        assert_eq!(report.len(), 3);
        assert_eq!(report.get(0).unwrap().category, "Advice");
        assert_eq!(report.get(1).unwrap().category, "Deprecation");
        assert_eq!(report.get(1).unwrap().line_start, 30);

        let last = report.get(2).unwrap();
        assert_eq!(last.category, "");
        assert_eq!(last.file_name, "-");
        assert_eq!(last.line_start, 0);
    }

    #[test]
    fn test_pending_warning_is_flushed_at_end_of_input() {
        let log = "\
[INFO] Showing AJC message detail for messages of types: [error, warning, fail]
[WARNING] foo() in com.example.Legacy is deprecated
\t/src/Caller.java:5";
        let report = parse_text(&AjcParser::new().unwrap(), log);

        assert_eq!(report.len(), 1);
        let issue = report.get(0).unwrap();
        assert_eq!(issue.file_name, "/src/Caller.java");
        assert_eq!(issue.line_start, 5);
        assert_eq!(issue.category, "Deprecation");
    }

    #[test]
    fn test_color_codes_are_stripped() {
        let log = "[INFO] Showing AJC message detail for messages of types: [warning]\n\
                   \x1b[1;33m[WARN]\x1b[0m[WARNING] colored message\n\
                   \t/src/C.java:3\n";
        let report = parse_text(&AjcParser::new().unwrap(), log);

        assert_eq!(report.len(), 1);
        assert_eq!(report.get(0).unwrap().message, "colored message");
    }
}
