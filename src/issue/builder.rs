use super::{Issue, Severity, UNDEFINED};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Per-issue state of an [`IssueBuilder`].
///
/// `Default` is the documented default table every field returns to after
/// `clean()`:
///
/// | field | default |
/// |-------|---------|
/// | file name | `"-"` |
/// | line/column start/end | `0` (unknown) |
/// | severity | `WarningNormal` |
/// | category, type, message, description, fingerprint | `""` |
/// | package name, module name | `"-"` |
/// | additional properties | empty |
#[derive(Debug, Clone, Default)]
struct PendingIssue {
    file_name: Option<String>,
    line_start: u32,
    line_end: u32,
    column_start: u32,
    column_end: u32,
    severity: Option<Severity>,
    category: String,
    issue_type: String,
    message: String,
    description: String,
    package_name: Option<String>,
    module_name: Option<String>,
    fingerprint: String,
    additional_properties: BTreeMap<String, String>,
}

/// Reusable accumulator for issues.
///
/// Per-issue fields are reset by [`clean`](Self::clean) (and by
/// [`build_and_clean`](Self::build_and_clean)). The base directory and origin
/// are parse-scoped context: they survive `clean()` and are only cleared by
/// [`reset`](Self::reset).
#[derive(Debug, Clone, Default)]
pub struct IssueBuilder {
    pending: PendingIssue,
    directory: Option<String>,
    origin: String,
}

impl IssueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_file_name(&mut self, file_name: impl Into<String>) -> &mut Self {
        self.pending.file_name = Some(file_name.into());
        self
    }

    pub fn set_line_start(&mut self, line: u32) -> &mut Self {
        self.pending.line_start = line;
        self
    }

    pub fn set_line_end(&mut self, line: u32) -> &mut Self {
        self.pending.line_end = line;
        self
    }

    pub fn set_column_start(&mut self, column: u32) -> &mut Self {
        self.pending.column_start = column;
        self
    }

    pub fn set_column_end(&mut self, column: u32) -> &mut Self {
        self.pending.column_end = column;
        self
    }

    pub fn set_severity(&mut self, severity: Severity) -> &mut Self {
        self.pending.severity = Some(severity);
        self
    }

    /// Set the severity from a tool's own vocabulary, see [`Severity::guess_from_string`].
    pub fn guess_severity(&mut self, text: &str) -> &mut Self {
        self.set_severity(Severity::guess_from_string(text))
    }

    pub fn set_category(&mut self, category: impl Into<String>) -> &mut Self {
        self.pending.category = category.into();
        self
    }

    pub fn set_type(&mut self, issue_type: impl Into<String>) -> &mut Self {
        self.pending.issue_type = issue_type.into();
        self
    }

    pub fn set_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.pending.message = message.into();
        self
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.pending.description = description.into();
        self
    }

    pub fn set_package_name(&mut self, package_name: impl Into<String>) -> &mut Self {
        self.pending.package_name = Some(package_name.into());
        self
    }

    pub fn set_module_name(&mut self, module_name: impl Into<String>) -> &mut Self {
        self.pending.module_name = Some(module_name.into());
        self
    }

    pub fn set_fingerprint(&mut self, fingerprint: impl Into<String>) -> &mut Self {
        self.pending.fingerprint = fingerprint.into();
        self
    }

    pub fn set_additional_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.pending
            .additional_properties
            .insert(key.into(), value.into());
        self
    }

    /// Base directory for relative file names, kept across issues.
    pub fn set_directory(&mut self, directory: impl Into<String>) -> &mut Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn directory(&self) -> Option<&str> {
        self.directory.as_deref()
    }

    /// Id of the producing parser, kept across issues.
    pub fn set_origin(&mut self, origin: impl Into<String>) -> &mut Self {
        self.origin = origin.into();
        self
    }

    pub fn message(&self) -> &str {
        &self.pending.message
    }

    /// Materialize an issue from the current fields without resetting them.
    /// The message is not checked; use [`build_optional`](Self::build_optional)
    /// when a blank message means there is no issue.
    pub fn build(&self) -> Issue {
        let p = &self.pending;
        let (line_start, line_end) = normalize_range(p.line_start, p.line_end);
        let (column_start, column_end) = normalize_range(p.column_start, p.column_end);

        Issue {
            id: Uuid::new_v4(),
            file_name: self.resolve_file_name(),
            line_start,
            line_end,
            column_start,
            column_end,
            severity: p.severity.unwrap_or_default(),
            category: p.category.clone(),
            issue_type: p.issue_type.clone(),
            message: p.message.clone(),
            description: p.description.clone(),
            package_name: p.package_name.clone().unwrap_or_else(|| UNDEFINED.to_string()),
            module_name: p.module_name.clone().unwrap_or_else(|| UNDEFINED.to_string()),
            origin: self.origin.clone(),
            fingerprint: p.fingerprint.clone(),
            additional_properties: p.additional_properties.clone(),
        }
    }

    pub fn build_and_clean(&mut self) -> Issue {
        let issue = self.build();
        self.clean();
        issue
    }

    /// Like [`build_and_clean`](Self::build_and_clean), but yields `None` when
    /// no message was set. The fields are reset either way.
    pub fn build_optional(&mut self) -> Option<Issue> {
        if self.pending.message.trim().is_empty() {
            self.clean();
            return None;
        }
        Some(self.build_and_clean())
    }

    /// Reset every per-issue field to its default.
    pub fn clean(&mut self) -> &mut Self {
        self.pending = PendingIssue::default();
        self
    }

    /// Reset per-issue fields and parse-scoped context.
    pub fn reset(&mut self) -> &mut Self {
        *self = Self::default();
        self
    }

    fn resolve_file_name(&self) -> String {
        let file_name = match self.pending.file_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.trim(),
            _ => return UNDEFINED.to_string(),
        };

        match self.directory.as_deref() {
            Some(dir) if file_name != UNDEFINED && !is_absolute_path(file_name) => {
                format!("{}/{}", dir.trim_end_matches(['/', '\\']), file_name)
            }
            _ => file_name.to_string(),
        }
    }
}

/// An end of 0 takes the start; a reversed range is swapped.
fn normalize_range(start: u32, end: u32) -> (u32, u32) {
    if end == 0 {
        (start, start)
    } else if start > end {
        (end, start)
    } else {
        (start, end)
    }
}

/// Absolute in either Unix or Windows notation, independent of the host.
fn is_absolute_path(path: &str) -> bool {
    let bytes = path.as_bytes();
    path.starts_with('/')
        || path.starts_with('\\')
        || (bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let issue = IssueBuilder::new().build();

        assert_eq!(issue.file_name, "-");
        assert_eq!(issue.line_start, 0);
        assert_eq!(issue.line_end, 0);
        assert_eq!(issue.severity, Severity::WarningNormal);
        assert_eq!(issue.category, "");
        assert_eq!(issue.issue_type, "");
        assert_eq!(issue.package_name, "-");
        assert_eq!(issue.module_name, "-");
        assert!(issue.additional_properties.is_empty());
    }

    #[test]
    fn test_build_does_not_reset() {
        let mut builder = IssueBuilder::new();
        builder.set_message("first").set_category("cat");

        let first = builder.build();
        let second = builder.build();

        assert_eq!(first.message, "first");
        assert_eq!(second.category, "cat");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_build_and_clean_does_not_leak_fields() {
        let mut builder = IssueBuilder::new();
        builder
            .set_file_name("a.c")
            .set_line_start(10)
            .set_column_start(3)
            .set_severity(Severity::Error)
            .set_category("cat")
            .set_type("type")
            .set_description("desc")
            .set_package_name("pkg")
            .set_module_name("mod")
            .set_fingerprint("fp")
            .set_additional_property("k", "v")
            .set_message("first");
        builder.build_and_clean();

        let second = builder.set_message("second").build_and_clean();

        assert_eq!(second.file_name, "-");
        assert_eq!(second.line_start, 0);
        assert_eq!(second.column_start, 0);
        assert_eq!(second.severity, Severity::WarningNormal);
        assert_eq!(second.category, "");
        assert_eq!(second.issue_type, "");
        assert_eq!(second.description, "");
        assert_eq!(second.package_name, "-");
        assert_eq!(second.module_name, "-");
        assert_eq!(second.fingerprint, "");
        assert!(second.additional_properties.is_empty());
    }

    #[test]
    fn test_build_optional_requires_message() {
        let mut builder = IssueBuilder::new();
        builder.set_file_name("a.c").set_message("   ");

        assert!(builder.build_optional().is_none());
        // fields were cleaned even though nothing was emitted
        assert_eq!(builder.set_message("m").build().file_name, "-");
    }

    #[test]
    fn test_range_normalization() {
        let issue = IssueBuilder::new()
            .set_line_start(12)
            .set_column_start(9)
            .set_column_end(4)
            .build();

        assert_eq!((issue.line_start, issue.line_end), (12, 12));
        assert_eq!((issue.column_start, issue.column_end), (4, 9));
    }

    #[test]
    fn test_directory_survives_clean_and_resolves_relative_names() {
        let mut builder = IssueBuilder::new();
        builder.set_directory("/work/build/");
        builder.set_file_name("src/main.c").set_message("m");
        assert_eq!(builder.build_and_clean().file_name, "/work/build/src/main.c");

        builder.set_file_name("/abs/main.c").set_message("m");
        assert_eq!(builder.build_and_clean().file_name, "/abs/main.c");

        builder.set_file_name("C:\\win\\main.c").set_message("m");
        assert_eq!(builder.build_and_clean().file_name, "C:\\win\\main.c");

        builder.set_message("m");
        assert_eq!(builder.build_and_clean().file_name, "-");

        builder.reset();
        assert!(builder.directory().is_none());
    }

    #[test]
    fn test_origin_is_kept() {
        let mut builder = IssueBuilder::new();
        builder.set_origin("gcc4");

        builder.set_message("a").build_and_clean();
        let issue = builder.set_message("b").build_and_clean();

        assert_eq!(issue.origin, "gcc4");
    }
}
