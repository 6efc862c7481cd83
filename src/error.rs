use crate::issue::Report;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Unknown scope '{scope}' referenced by tool '{tool}'")]
    UnknownScope { tool: String, scope: String },

    #[error("Unknown parser '{parser}' referenced by tool '{tool}'")]
    UnknownParser { tool: String, parser: String },

    #[error("No tools enabled")]
    NoToolsEnabled,
}

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Failed to build glob pattern '{pattern}': {source}")]
    GlobPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),
}

/// Failure to construct a parser from the registry.
#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Unknown parser '{0}'")]
    UnknownParser(String),

    #[error("Invalid pattern in parser '{parser}': {source}")]
    Pattern {
        parser: String,
        #[source]
        source: regex::Error,
    },
}

/// Failure of a single parse invocation.
///
/// `Canceled` is not a parsing failure: it signals a caller-requested stop and
/// carries the issues that were appended before the cancellation was observed.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read '{file}': {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid character data in '{file}' at line {line}")]
    Decode { file: String, line: usize },

    #[error("Malformed input in '{file}' at line {line}: {message}")]
    Malformed {
        file: String,
        line: usize,
        message: String,
    },

    #[error("Invalid JSON in '{file}' at line {line}: {source}")]
    Json {
        file: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Parsing canceled after {} issues", .partial.len())]
    Canceled { partial: Box<Report> },
}

impl ParseError {
    pub fn canceled(partial: Report) -> Self {
        ParseError::Canceled {
            partial: Box::new(partial),
        }
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, ParseError::Canceled { .. })
    }
}

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("No tools matched filters")]
    NoToolsMatched,

    #[error("Failed to acquire semaphore: {0}")]
    Semaphore(#[from] tokio::sync::AcquireError),

    #[error("Parse task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Failed to write report: {0}")]
    WriteReport(std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
