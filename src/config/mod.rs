mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use crate::parser;
use crate::source::Encoding;
use defaults::*;
use std::collections::HashMap;
use std::path::Path;

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            target: default_target(),
            concurrency: default_concurrency(),
            report_dir: default_report_dir(),
            encoding: Encoding::default(),
            dry_run: false,
            max_files: default_max_files(),
            scopes: HashMap::new(),
            tools: Vec::new(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        for tool in &self.tools {
            for scope_name in &tool.scopes {
                if !self.scopes.contains_key(scope_name) {
                    return Err(ConfigError::UnknownScope {
                        tool: tool.id.clone(),
                        scope: scope_name.clone(),
                    });
                }
            }

            if !parser::is_known_parser(&tool.parser) {
                return Err(ConfigError::UnknownParser {
                    tool: tool.id.clone(),
                    parser: tool.parser.clone(),
                });
            }
        }

        if !self.tools.iter().any(|t| t.enabled) {
            return Err(ConfigError::NoToolsEnabled);
        }

        Ok(())
    }

    pub fn enabled_tools(&self) -> impl Iterator<Item = &Tool> {
        self.tools.iter().filter(|t| t.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CONFIG: &str = r#"
version: 1
target: .
encoding: iso-8859-1
scopes:
  build:
    paths: [logs]
    include: ["**/*.log"]
tools:
  - id: gcc
    name: GCC
    parser: gcc4
    scopes: [build]
  - id: lint
    name: Pylint
    parser: pylint
    scopes: [build]
    enabled: false
    encoding: utf-8
    max_files: 3
"#;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_with_defaults() {
        let file = write_config(CONFIG);
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.concurrency, 4);
        assert_eq!(config.report_dir, Path::new("reports"));
        assert_eq!(config.encoding, Encoding::Latin1);
        assert_eq!(config.tools.len(), 2);
        assert!(config.tools[0].enabled);
        assert_eq!(config.tools[0].encoding_or(config.encoding), Encoding::Latin1);
        assert_eq!(config.tools[1].encoding_or(config.encoding), Encoding::Utf8);
        assert_eq!(config.tools[1].max_files, Some(3));
        assert_eq!(config.enabled_tools().count(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/issuescan.yaml")).unwrap_err();

        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn test_invalid_yaml() {
        let file = write_config("tools: [");

        assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_scope() {
        let file = write_config(&CONFIG.replace("scopes: [build]\n  - id: lint", "scopes: [nope]\n  - id: lint"));
        let config = Config::load(file.path()).unwrap();

        match config.validate() {
            Err(ConfigError::UnknownScope { tool, scope }) => {
                assert_eq!(tool, "gcc");
                assert_eq!(scope, "nope");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unknown_parser() {
        let file = write_config(&CONFIG.replace("parser: gcc4", "parser: msbuild"));
        let config = Config::load(file.path()).unwrap();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownParser { ref parser, .. }) if parser == "msbuild"
        ));
    }

    #[test]
    fn test_no_enabled_tools() {
        let mut config = Config::default();

        assert!(matches!(config.validate(), Err(ConfigError::NoToolsEnabled)));

        config.tools.push(Tool {
            id: "t".into(),
            name: "T".into(),
            enabled: false,
            parser: "gcc4".into(),
            scopes: vec![],
            encoding: None,
            max_files: None,
        });
        assert!(matches!(config.validate(), Err(ConfigError::NoToolsEnabled)));
    }
}
