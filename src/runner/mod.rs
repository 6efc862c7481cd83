mod executor;
mod orchestrator;

pub use orchestrator::{Orchestrator, RunOptions, RunReport, ToolResult, ToolStatus};
