use super::Severity;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Placeholder for unknown file, package and module names.
pub const UNDEFINED: &str = "-";

/// One normalized finding produced by a parser.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Issue {
    pub id: Uuid,

    pub file_name: String,

    #[serde(default)]
    pub line_start: u32, // 0 means unknown

    #[serde(default)]
    pub line_end: u32,

    #[serde(default)]
    pub column_start: u32,

    #[serde(default)]
    pub column_end: u32,

    #[serde(default)]
    pub severity: Severity,

    #[serde(default)]
    pub category: String,

    #[serde(default, rename = "type")]
    pub issue_type: String,

    pub message: String,

    #[serde(default)]
    pub description: String,

    #[serde(default = "undefined")]
    pub package_name: String,

    #[serde(default = "undefined")]
    pub module_name: String,

    #[serde(default)]
    pub origin: String,

    #[serde(default)]
    pub fingerprint: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub additional_properties: BTreeMap<String, String>,
}

/// Content equality. The generated id and the fingerprint are not compared.
impl PartialEq for Issue {
    fn eq(&self, other: &Self) -> bool {
        self.file_name == other.file_name
            && self.line_start == other.line_start
            && self.line_end == other.line_end
            && self.column_start == other.column_start
            && self.column_end == other.column_end
            && self.severity == other.severity
            && self.category == other.category
            && self.issue_type == other.issue_type
            && self.message == other.message
            && self.description == other.description
            && self.package_name == other.package_name
            && self.module_name == other.module_name
            && self.origin == other.origin
            && self.additional_properties == other.additional_properties
    }
}

fn undefined() -> String {
    UNDEFINED.to_string()
}

impl Issue {
    /// Normalize message for stable fingerprinting
    fn normalize_message(&self) -> String {
        self.message.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Deterministic dedup key.
    /// Uses: origin | file | line | category | type | normalized message
    pub fn compute_fingerprint(&self) -> String {
        let input = format!(
            "{}|{}|{}|{}|{}|{}",
            self.origin,
            self.file_name,
            self.line_start,
            self.category,
            self.issue_type,
            self.normalize_message(),
        );
        let hash = Sha256::digest(input.as_bytes());
        format!("{:x}", hash)[..12].to_string()
    }

    pub fn location(&self) -> String {
        match (self.line_start, self.column_start) {
            (0, _) => self.file_name.clone(),
            (line, 0) => format!("{}:{}", self.file_name, line),
            (line, column) => format!("{}:{}:{}", self.file_name, line, column),
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: [{}]", self.location(), self.severity)?;
        if !self.category.is_empty() {
            write!(f, " {}:", self.category)?;
        }
        write!(f, " {}", self.message)
    }
}
