mod scope;

pub use scope::resolve_scope;

use crate::config::{Config, Tool};
use crate::error::DiscoveryError;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Discover the report files of a tool across its scopes, sorted and
/// capped at the tool's (or the global) file limit.
pub fn discover_files_for_tool(config: &Config, tool: &Tool) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut all_files = BTreeSet::new();

    for scope_name in &tool.scopes {
        if let Some(scope) = config.scopes.get(scope_name) {
            all_files.extend(resolve_scope(&config.target, scope)?);
        }
    }

    let limit = tool.max_files.unwrap_or(config.max_files);
    if all_files.len() > limit {
        tracing::warn!(
            "Tool {} matched {} files, only the first {} are parsed",
            tool.id,
            all_files.len(),
            limit
        );
    }

    Ok(all_files.into_iter().take(limit).collect())
}
