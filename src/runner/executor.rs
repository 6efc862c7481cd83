use crate::config::{Config, Tool};
use crate::discovery::discover_files_for_tool;
use crate::engine::{CancellationToken, IssueParser};
use crate::error::{ParseError, RunnerError};
use crate::issue::Report;
use crate::parser::create_parser;
use crate::source::FileReaderFactory;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{ToolResult, ToolStatus};

enum FileOutcome {
    Parsed(Report),
    Canceled(Report),
    Failed(ParseError),
}

/// Parse one report file on the blocking pool.
async fn parse_file(
    parser: Arc<dyn IssueParser>,
    factory: FileReaderFactory,
    cancel: CancellationToken,
) -> Result<FileOutcome, RunnerError> {
    let outcome = tokio::task::spawn_blocking(move || match parser.parse(&factory, &cancel) {
        Ok(report) => FileOutcome::Parsed(report),
        Err(ParseError::Canceled { partial }) => FileOutcome::Canceled(*partial),
        Err(e) => FileOutcome::Failed(e),
    })
    .await?;
    Ok(outcome)
}

pub async fn execute_tool(
    config: &Config,
    tool: &Tool,
    cancel: &CancellationToken,
) -> Result<ToolResult, RunnerError> {
    let start = std::time::Instant::now();

    let files = match discover_files_for_tool(config, tool) {
        Ok(f) => f,
        Err(e) => {
            return Ok(ToolResult::empty(
                tool,
                ToolStatus::Failed {
                    error: e.to_string(),
                },
                start.elapsed(),
            ));
        }
    };

    if files.is_empty() {
        info!("Skipping {} - no matching files", tool.id);
        return Ok(ToolResult::empty(
            tool,
            ToolStatus::Skipped {
                reason: "no matching files".to_string(),
            },
            start.elapsed(),
        ));
    }

    let parser: Arc<dyn IssueParser> = match create_parser(&tool.parser) {
        Ok(parser) => Arc::from(parser),
        Err(e) => {
            return Ok(ToolResult::empty(
                tool,
                ToolStatus::Failed {
                    error: e.to_string(),
                },
                start.elapsed(),
            ));
        }
    };

    info!("Tool {} found {} files", tool.id, files.len());

    let encoding = tool.encoding_or(config.encoding);
    let mut report = Report::new();
    let mut files_parsed = 0usize;
    let mut failures: Vec<(PathBuf, String)> = Vec::new();
    let mut canceled = false;

    for file in &files {
        if cancel.is_canceled() {
            canceled = true;
            break;
        }

        let factory = FileReaderFactory::new(config.target.join(file), encoding);
        debug!("Tool {} parsing {}", tool.id, file.display());

        match parse_file(Arc::clone(&parser), factory, cancel.clone()).await? {
            FileOutcome::Parsed(file_report) => {
                debug!(
                    "Tool {} found {} issues in {}",
                    tool.id,
                    file_report.len(),
                    file.display()
                );
                report.log_info(format!(
                    "Parsed {} issues from {}",
                    file_report.len(),
                    file.display()
                ));
                report.merge(file_report);
                files_parsed += 1;
            }
            FileOutcome::Canceled(partial) => {
                warn!("Tool {} canceled while parsing {}", tool.id, file.display());
                report.merge(partial);
                canceled = true;
                break;
            }
            FileOutcome::Failed(e) => {
                warn!("Tool {} failed to parse {}: {}", tool.id, file.display(), e);
                report.log_error(e.to_string());
                failures.push((file.clone(), e.to_string()));
            }
        }
    }

    report.assign_fingerprints();

    let status = if canceled {
        ToolStatus::Canceled
    } else if files_parsed == 0 {
        ToolStatus::Failed {
            error: failures
                .last()
                .map(|(_, e)| e.clone())
                .unwrap_or_else(|| "no files parsed".to_string()),
        }
    } else if !failures.is_empty() {
        ToolStatus::Failed {
            error: format!(
                "{} of {} files failed; partial results returned",
                failures.len(),
                failures.len() + files_parsed
            ),
        }
    } else {
        ToolStatus::Completed
    };

    Ok(ToolResult {
        tool_id: tool.id.clone(),
        tool_name: tool.name.clone(),
        parser: tool.parser.clone(),
        status,
        files_parsed,
        files_failed: failures.len(),
        report,
        duration: start.elapsed(),
    })
}
