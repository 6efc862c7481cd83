mod report;
mod summary;

pub use report::write_tool_report;
pub use summary::{write_summary, SummaryReport, ToolSummary};
