use crate::config::Config;
use crate::engine::CancellationToken;
use crate::error::RunnerError;
use crate::issue::{Report, SeverityCounts};
use crate::output::write_tool_report;
use futures::stream::{FuturesUnordered, StreamExt};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use super::executor::execute_tool;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub tool_filter: Option<Vec<String>>,
    pub scope_filter: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct RunReport {
    pub tool_results: Vec<ToolResult>,
    pub total_duration: Duration,
}

impl RunReport {
    pub fn totals(&self) -> SeverityCounts {
        let mut counts = SeverityCounts::default();
        for result in &self.tool_results {
            counts.add(&result.report.counts());
        }
        counts
    }

    pub fn was_canceled(&self) -> bool {
        self.tool_results
            .iter()
            .any(|r| r.status == ToolStatus::Canceled)
    }
}

#[derive(Debug)]
pub struct ToolResult {
    pub tool_id: String,
    pub tool_name: String,
    pub parser: String,
    pub status: ToolStatus,
    pub files_parsed: usize,
    pub files_failed: usize,
    pub report: Report,
    pub duration: Duration,
}

impl ToolResult {
    pub(super) fn empty(tool: &crate::config::Tool, status: ToolStatus, duration: Duration) -> Self {
        Self {
            tool_id: tool.id.clone(),
            tool_name: tool.name.clone(),
            parser: tool.parser.clone(),
            status,
            files_parsed: 0,
            files_failed: 0,
            report: Report::new(),
            duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToolStatus {
    Completed,
    Skipped { reason: String },
    /// Stopped by Ctrl-C; the report holds what was parsed until then.
    Canceled,
    Failed { error: String },
}

impl std::fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolStatus::Completed => write!(f, "completed"),
            ToolStatus::Skipped { reason } => write!(f, "skipped: {}", reason),
            ToolStatus::Canceled => write!(f, "canceled"),
            ToolStatus::Failed { error } => write!(f, "failed: {}", error),
        }
    }
}

pub struct Orchestrator {
    config: Arc<Config>,
    semaphore: Arc<Semaphore>,
    cancel: CancellationToken,
}

impl Orchestrator {
    pub fn new(config: Config, cancel: CancellationToken) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.concurrency.max(1)));
        Self {
            config: Arc::new(config),
            semaphore,
            cancel,
        }
    }

    pub async fn run(
        &self,
        options: &RunOptions,
        report_dir: &Path,
    ) -> Result<RunReport, RunnerError> {
        let start = std::time::Instant::now();

        let tools: Vec<_> = self
            .config
            .enabled_tools()
            .filter(|t| {
                options
                    .tool_filter
                    .as_ref()
                    .map(|f| f.contains(&t.id))
                    .unwrap_or(true)
            })
            .filter(|t| {
                options
                    .scope_filter
                    .as_ref()
                    .map(|f| t.scopes.iter().any(|s| f.contains(s)))
                    .unwrap_or(true)
            })
            .cloned()
            .collect();

        if tools.is_empty() {
            return Err(RunnerError::NoToolsMatched);
        }

        info!(
            "Running {} tools with concurrency {}",
            tools.len(),
            self.config.concurrency
        );

        let mut futures = FuturesUnordered::new();

        for tool in tools {
            let permit = self.semaphore.clone().acquire_owned().await?;
            let config = Arc::clone(&self.config);
            let cancel = self.cancel.clone();

            futures.push(tokio::spawn(async move {
                let _permit = permit;
                execute_tool(&config, &tool, &cancel).await
            }));
        }

        let mut results = Vec::new();
        while let Some(result) = futures.next().await {
            match result {
                Ok(Ok(result)) => {
                    info!(
                        "Finished {}: {} issues from {} files ({})",
                        result.tool_id,
                        result.report.len(),
                        result.files_parsed,
                        result.status
                    );

                    if let Err(e) = write_tool_report(report_dir, &result) {
                        warn!("Failed to write report for {}: {}", result.tool_id, e);
                    } else {
                        info!(
                            "Wrote report: {}/{}.md",
                            report_dir.display(),
                            result.tool_id
                        );
                    }

                    results.push(result);
                }
                Ok(Err(e)) => {
                    warn!("Tool execution failed: {}", e);
                }
                Err(e) => {
                    warn!("Task panicked: {}", e);
                }
            }
        }

        results.sort_by(|a, b| a.tool_id.cmp(&b.tool_id));

        Ok(RunReport {
            tool_results: results,
            total_duration: start.elapsed(),
        })
    }
}
