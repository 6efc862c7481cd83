use crate::error::OutputError;
use crate::issue::{Issue, Severity};
use crate::runner::{ToolResult, ToolStatus};
use std::fs;
use std::path::Path;

/// Write a single tool's report immediately
pub fn write_tool_report(report_dir: &Path, result: &ToolResult) -> Result<(), OutputError> {
    fs::create_dir_all(report_dir).map_err(OutputError::CreateDir)?;

    let report_path = report_dir.join(format!("{}.md", result.tool_id));
    fs::write(&report_path, render_tool_markdown(result)).map_err(OutputError::WriteReport)?;

    // Issues as JSON for downstream tooling
    if !result.report.is_empty() {
        let issues_path = report_dir.join(format!("{}.issues.json", result.tool_id));
        let json = serde_json::to_string_pretty(&result.report)?;
        fs::write(&issues_path, json).map_err(OutputError::WriteReport)?;
    }

    Ok(())
}

fn render_tool_markdown(result: &ToolResult) -> String {
    let mut content = String::new();

    content.push_str(&format!("# {}\n\n", result.tool_name));

    content.push_str("| Metric | Value |\n");
    content.push_str("|--------|-------|\n");
    content.push_str(&format!("| Status | {} |\n", format_status(&result.status)));
    content.push_str(&format!("| Parser | `{}` |\n", result.parser));
    content.push_str(&format!(
        "| Duration | {:.1}s |\n",
        result.duration.as_secs_f64()
    ));
    content.push_str(&format!("| Files Parsed | {} |\n", result.files_parsed));
    if result.files_failed > 0 {
        content.push_str(&format!("| Files Failed | {} |\n", result.files_failed));
    }

    let counts = result.report.counts();
    for severity in Severity::ALL {
        content.push_str(&format!("| {} | {} |\n", severity, counts.get(severity)));
    }
    content.push_str("\n---\n\n");

    if result.report.is_empty() {
        content.push_str("*No issues*\n");
    } else {
        content.push_str("## Issues\n\n");
        for issue in result.report.iter() {
            push_issue(&mut content, issue);
        }
    }

    if !result.report.error_messages().is_empty() {
        content.push_str("## Errors\n\n");
        for message in result.report.error_messages() {
            content.push_str(&format!("- {}\n", message));
        }
        content.push('\n');
    }

    content
}

fn push_issue(content: &mut String, issue: &Issue) {
    let title = issue.message.lines().next().unwrap_or_default();
    content.push_str(&format!("### [{}] {}\n\n", issue.severity, title));
    content.push_str(&format!("- **Location:** `{}`\n", issue.location()));
    if !issue.category.is_empty() {
        content.push_str(&format!("- **Category:** `{}`\n", issue.category));
    }
    if !issue.issue_type.is_empty() {
        content.push_str(&format!("- **Type:** `{}`\n", issue.issue_type));
    }
    content.push_str(&format!("- **Fingerprint:** `{}`\n", issue.fingerprint));
    content.push('\n');

    let details: Vec<&str> = issue.message.lines().skip(1).collect();
    if !details.is_empty() {
        content.push_str(&format!("```\n{}\n```\n\n", details.join("\n")));
    }
    if !issue.description.is_empty() {
        content.push_str(&format!("{}\n\n", issue.description));
    }

    content.push_str("---\n\n");
}

fn format_status(status: &ToolStatus) -> String {
    match status {
        ToolStatus::Completed => "✅ Completed".to_string(),
        ToolStatus::Skipped { reason } => format!("⏭️ Skipped ({})", reason),
        ToolStatus::Canceled => "⏹️ Canceled".to_string(),
        ToolStatus::Failed { error } => format!("❌ Failed ({})", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::{IssueBuilder, Report};
    use std::time::Duration;
    use tempfile::TempDir;

    fn result_with(report: Report) -> ToolResult {
        ToolResult {
            tool_id: "gcc".into(),
            tool_name: "GCC".into(),
            parser: "gcc4".into(),
            status: ToolStatus::Completed,
            files_parsed: 1,
            files_failed: 0,
            report,
            duration: Duration::from_millis(1500),
        }
    }

    #[test]
    fn test_writes_markdown_and_json() {
        let dir = TempDir::new().unwrap();
        let mut report = Report::new();
        report.add(
            IssueBuilder::new()
                .set_file_name("src/a.c")
                .set_line_start(3)
                .set_severity(Severity::Error)
                .set_category("syntax")
                .set_message("expected ';'\n  int x\n       ^")
                .build(),
        );
        report.assign_fingerprints();

        write_tool_report(dir.path(), &result_with(report)).unwrap();

        let md = fs::read_to_string(dir.path().join("gcc.md")).unwrap();
        assert!(md.contains("# GCC"));
        assert!(md.contains("| ERROR | 1 |"));
        assert!(md.contains("### [ERROR] expected ';'"));
        assert!(md.contains("`src/a.c:3`"));
        assert!(md.contains("```\n  int x\n       ^\n```"));

        let json = fs::read_to_string(dir.path().join("gcc.issues.json")).unwrap();
        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_empty_report_has_no_json() {
        let dir = TempDir::new().unwrap();

        write_tool_report(dir.path(), &result_with(Report::new())).unwrap();

        assert!(fs::read_to_string(dir.path().join("gcc.md"))
            .unwrap()
            .contains("*No issues*"));
        assert!(!dir.path().join("gcc.issues.json").exists());
    }
}
