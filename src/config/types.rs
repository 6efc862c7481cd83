use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use super::defaults::*;
use crate::source::Encoding;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Root that scope paths are resolved against.
    #[serde(default = "default_target")]
    pub target: PathBuf,

    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,

    /// Encoding of report files unless a tool overrides it.
    #[serde(default)]
    pub encoding: Encoding,

    #[serde(default)]
    pub dry_run: bool,

    #[serde(default = "default_max_files")]
    pub max_files: usize,

    #[serde(default)]
    pub scopes: HashMap<String, Scope>,

    #[serde(default)]
    pub tools: Vec<Tool>,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Scope {
    pub paths: Vec<PathBuf>,

    #[serde(default)]
    pub include: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,
}

/// A parser applied to the report files found in one or more scopes.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Tool {
    pub id: String,

    pub name: String,

    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Registry id of the parser, e.g. `gcc4` or `pylint`.
    pub parser: String,

    pub scopes: Vec<String>,

    #[serde(default)]
    pub encoding: Option<Encoding>,

    #[serde(default)]
    pub max_files: Option<usize>,
}

impl Tool {
    pub fn encoding_or(&self, default: Encoding) -> Encoding {
        self.encoding.unwrap_or(default)
    }
}
