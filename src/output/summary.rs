use crate::error::OutputError;
use crate::issue::SeverityCounts;
use crate::runner::{RunReport, ToolStatus};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryReport {
    pub timestamp: String,
    pub target: String,
    pub duration_sec: f64,
    pub tools: Vec<ToolSummary>,
    pub totals: SeverityCounts,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
    pub canceled: Vec<String>,
    pub exit_code: i32,
    pub report_dir: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToolSummary {
    pub id: String,
    pub name: String,
    pub parser: String,
    pub status: String,
    pub duration_sec: f64,
    pub files_parsed: usize,
    pub files_failed: usize,
    pub issues: SeverityCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

pub fn write_summary(
    report_dir: &Path,
    run_report: &RunReport,
    target: &Path,
) -> Result<SummaryReport, OutputError> {
    // Needed when every tool was skipped
    fs::create_dir_all(report_dir).map_err(OutputError::CreateDir)?;

    let summary = build_summary(run_report, report_dir.to_path_buf(), target);

    let json_path = report_dir.join("summary.json");
    let json = serde_json::to_string_pretty(&summary)?;
    fs::write(&json_path, json).map_err(OutputError::WriteReport)?;

    let md_path = report_dir.join("summary.md");
    let md = build_summary_markdown(&summary);
    fs::write(&md_path, md).map_err(OutputError::WriteReport)?;

    Ok(summary)
}

fn build_summary(run_report: &RunReport, report_dir: PathBuf, target: &Path) -> SummaryReport {
    let mut tools = Vec::new();
    let mut skipped = Vec::new();
    let mut failed = Vec::new();
    let mut canceled = Vec::new();

    for result in &run_report.tool_results {
        let (status, reason) = match &result.status {
            ToolStatus::Completed => ("completed", None),
            ToolStatus::Skipped { reason } => {
                skipped.push(result.tool_id.clone());
                ("skipped", Some(reason.clone()))
            }
            ToolStatus::Canceled => {
                canceled.push(result.tool_id.clone());
                ("canceled", None)
            }
            ToolStatus::Failed { error } => {
                failed.push(result.tool_id.clone());
                ("failed", Some(error.clone()))
            }
        };

        tools.push(ToolSummary {
            id: result.tool_id.clone(),
            name: result.tool_name.clone(),
            parser: result.parser.clone(),
            status: status.to_string(),
            duration_sec: result.duration.as_secs_f64(),
            files_parsed: result.files_parsed,
            files_failed: result.files_failed,
            issues: result.report.counts(),
            reason,
        });
    }

    let totals = run_report.totals();
    let exit_code = if totals.error > 0 { 1 } else { 0 };

    SummaryReport {
        timestamp: Utc::now().to_rfc3339(),
        target: target.display().to_string(),
        duration_sec: run_report.total_duration.as_secs_f64(),
        tools,
        totals,
        skipped,
        failed,
        canceled,
        exit_code,
        report_dir,
    }
}

fn build_summary_markdown(summary: &SummaryReport) -> String {
    let mut md = String::new();

    md.push_str("# issuescan Summary\n\n");
    md.push_str(&format!("**Generated:** {}\n", summary.timestamp));
    md.push_str(&format!("**Target:** {}\n", summary.target));
    md.push_str(&format!(
        "**Report Dir:** {}\n",
        summary.report_dir.display()
    ));
    md.push_str(&format!("**Duration:** {:.1}s\n\n", summary.duration_sec));

    md.push_str("## Totals\n\n");
    md.push_str("| Severity | Count |\n");
    md.push_str("|----------|-------|\n");
    md.push_str(&format!("| ERROR | {} |\n", summary.totals.error));
    md.push_str(&format!("| HIGH | {} |\n", summary.totals.high));
    md.push_str(&format!("| NORMAL | {} |\n", summary.totals.normal));
    md.push_str(&format!("| LOW | {} |\n\n", summary.totals.low));

    md.push_str("## Tools\n\n");
    md.push_str("| Tool | Parser | Status | Files | Issues |\n");
    md.push_str("|------|--------|--------|-------|--------|\n");

    for tool in &summary.tools {
        let status_icon = match tool.status.as_str() {
            "completed" => "✅",
            "skipped" => "⏭️",
            "canceled" => "⏹️",
            "failed" => "❌",
            _ => "❓",
        };

        let issues_str = format!(
            "{} error, {} high, {} normal, {} low",
            tool.issues.error, tool.issues.high, tool.issues.normal, tool.issues.low
        );

        let status_str = if let Some(reason) = &tool.reason {
            format!("{} {} ({})", status_icon, tool.status, reason)
        } else {
            format!("{} {}", status_icon, tool.status)
        };

        md.push_str(&format!(
            "| {} | `{}` | {} | {} | {} |\n",
            tool.name, tool.parser, status_str, tool.files_parsed, issues_str
        ));
    }

    if summary.totals.error > 0 {
        md.push_str("\n## Errors\n\n");
        md.push_str("See individual tool reports for details.\n");
    }

    md
}
