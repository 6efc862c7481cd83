//! Normalized issue records and the builder that assembles them.

mod builder;
mod model;
mod report;
mod severity;

pub use builder::IssueBuilder;
pub use model::{Issue, UNDEFINED};
pub use report::{Report, SeverityCounts};
pub use severity::Severity;
