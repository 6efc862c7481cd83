use crate::config::Scope;
use crate::error::DiscoveryError;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

fn build_globset(patterns: &[String]) -> Result<GlobSet, DiscoveryError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| DiscoveryError::GlobPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| DiscoveryError::GlobPattern {
        pattern: patterns.join(", "),
        source: e,
    })
}

/// Resolve a scope to the report files it names, relative to `target`.
///
/// Build output is usually git-ignored, so ignore files are not consulted;
/// hidden files are still skipped. A scope path may name a file directly.
pub fn resolve_scope(target: &Path, scope: &Scope) -> Result<Vec<PathBuf>, DiscoveryError> {
    let include_set = build_globset(&scope.include)?;
    let exclude_set = build_globset(&scope.exclude)?;

    let mut files = Vec::new();

    for scope_path in &scope.paths {
        let full_path = target.join(scope_path);
        if !full_path.exists() {
            tracing::debug!("Scope path {} does not exist", full_path.display());
            continue;
        }

        let walker = WalkBuilder::new(&full_path)
            .hidden(true)
            .ignore(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .build();

        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                continue;
            }

            let rel_path = path.strip_prefix(target).unwrap_or(path);

            if !scope.include.is_empty() && !include_set.is_match(rel_path) {
                continue;
            }
            if exclude_set.is_match(rel_path) {
                continue;
            }

            files.push(rel_path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("build/sub")).unwrap();
        fs::write(dir.path().join("build/gcc.log"), "").unwrap();
        fs::write(dir.path().join("build/sub/clang.log"), "").unwrap();
        fs::write(dir.path().join("build/sub/notes.txt"), "").unwrap();
        fs::write(dir.path().join("build/.hidden.log"), "").unwrap();
        fs::write(dir.path().join(".gitignore"), "build/\n").unwrap();
        fs::write(dir.path().join("pylint.txt"), "").unwrap();
        dir
    }

    fn scope(paths: &[&str], include: &[&str], exclude: &[&str]) -> Scope {
        Scope {
            paths: paths.iter().map(PathBuf::from).collect(),
            include: include.iter().map(|s| s.to_string()).collect(),
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_include_and_exclude() {
        let dir = fixture();
        let files = resolve_scope(dir.path(), &scope(&["build"], &["**/*.log"], &["**/sub/**"])).unwrap();

        assert_eq!(files, vec![PathBuf::from("build/gcc.log")]);
    }

    #[test]
    fn test_ignored_build_dirs_are_walked() {
        let dir = fixture();
        let files = resolve_scope(dir.path(), &scope(&["build"], &[], &[])).unwrap();

        assert_eq!(
            files,
            vec![
                PathBuf::from("build/gcc.log"),
                PathBuf::from("build/sub/clang.log"),
                PathBuf::from("build/sub/notes.txt"),
            ]
        );
    }

    #[test]
    fn test_file_paths_and_missing_paths() {
        let dir = fixture();
        let files = resolve_scope(dir.path(), &scope(&["pylint.txt", "missing"], &[], &[])).unwrap();

        assert_eq!(files, vec![PathBuf::from("pylint.txt")]);
    }

    #[test]
    fn test_invalid_glob() {
        let dir = fixture();
        let err = resolve_scope(dir.path(), &scope(&["build"], &["a[b"], &[])).unwrap_err();

        assert!(matches!(err, DiscoveryError::GlobPattern { ref pattern, .. } if pattern == "a[b"));
    }
}
