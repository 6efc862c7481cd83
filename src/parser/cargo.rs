use crate::engine::{CancellationToken, IssueParser};
use crate::error::ParseError;
use crate::issue::{Issue, IssueBuilder, Report};
use crate::source::ReaderFactory;
use serde::Deserialize;
use tracing::debug;

pub const ID: &str = "cargo";

const COMPILER_MESSAGE: &str = "compiler-message";

/// One line of `cargo check --message-format json`.
#[derive(Debug, Deserialize)]
struct CargoEvent {
    reason: String,
    #[serde(default)]
    message: Option<CompilerMessage>,
}

#[derive(Debug, Deserialize)]
struct CompilerMessage {
    message: String,
    level: String,
    #[serde(default)]
    code: Option<DiagnosticCode>,
    #[serde(default)]
    spans: Vec<Span>,
}

#[derive(Debug, Deserialize)]
struct DiagnosticCode {
    code: String,
}

#[derive(Debug, Deserialize)]
struct Span {
    file_name: String,
    line_start: u32,
    line_end: u32,
    column_start: u32,
    column_end: u32,
    #[serde(default)]
    is_primary: bool,
}

/// Compiler diagnostics from cargo's JSON message stream.
///
/// Only `compiler-message` events with a diagnostic code and a primary span
/// become issues. Lines that are not JSON objects (build script output) are
/// skipped; a malformed object fails the parse.
#[derive(Debug, Default)]
pub struct CargoCheckParser;

impl CargoCheckParser {
    pub fn new() -> Self {
        Self
    }
}

impl IssueParser for CargoCheckParser {
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
        let mut lines_read = 0;

        for line in factory.lines()? {
            let line = line?;
            lines_read = line.number();

            let text = line.trim();
            if text.starts_with('{') {
                let event: CargoEvent =
                    serde_json::from_str(text).map_err(|source| ParseError::Json {
                        file: factory.file_name().to_string(),
                        line: line.number(),
                        source,
                    })?;
                if let Some(issue) = extract_issue(event, &mut builder) {
                    report.add(issue);
                }
            }

            if cancel.is_canceled() {
                return Err(ParseError::canceled(report));
            }
        }

        debug!(
            "{}: {} lines, {} issues in {}",
            ID,
            lines_read,
            report.len(),
            factory.file_name()
        );
        Ok(report)
    }
}

fn extract_issue(event: CargoEvent, builder: &mut IssueBuilder) -> Option<Issue> {
    if event.reason != COMPILER_MESSAGE {
        return None;
    }
    let message = event.message?;
    let code = message.code?;
    let span = message.spans.into_iter().find(|span| span.is_primary)?;

    builder
        .set_file_name(span.file_name)
        .set_line_start(span.line_start)
        .set_line_end(span.line_end)
        .set_column_start(span.column_start)
        .set_column_end(span.column_end)
        .set_category(code.code)
        .guess_severity(&message.level)
        .set_message(message.message)
        .build_optional()
}
