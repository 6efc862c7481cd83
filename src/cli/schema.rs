use crate::config::Config;
use schemars::schema_for;

/// JSON Schema of `issuescan.yaml`, for editor completion and CI validation.
pub fn execute() -> anyhow::Result<()> {
    let mut schema = schema_for!(Config);
    schema.schema.metadata().title = Some("issuescan configuration".to_string());
    let json = serde_json::to_string_pretty(&schema)?;
    println!("{}", json);
    Ok(())
}
