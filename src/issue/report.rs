use super::{Issue, Severity};
use serde::{Deserialize, Serialize};

/// Ordered collection of issues in order of appearance, plus the log
/// messages recorded while producing them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Report {
    issues: Vec<Issue>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    info_messages: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    error_messages: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SeverityCounts {
    pub error: usize,
    pub high: usize,
    pub normal: usize,
    pub low: usize,
}

impl SeverityCounts {
    pub fn total(&self) -> usize {
        self.error + self.high + self.normal + self.low
    }

    pub fn add(&mut self, other: &SeverityCounts) {
        self.error += other.error;
        self.high += other.high;
        self.normal += other.normal;
        self.low += other.low;
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Error => self.error,
            Severity::WarningHigh => self.high,
            Severity::WarningNormal => self.normal,
            Severity::WarningLow => self.low,
        }
    }
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Issue> {
        self.issues.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.issues.iter()
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn log_info(&mut self, message: impl Into<String>) {
        self.info_messages.push(message.into());
    }

    pub fn log_error(&mut self, message: impl Into<String>) {
        self.error_messages.push(message.into());
    }

    pub fn info_messages(&self) -> &[String] {
        &self.info_messages
    }

    pub fn error_messages(&self) -> &[String] {
        &self.error_messages
    }

    pub fn has_errors(&self) -> bool {
        !self.error_messages.is_empty()
    }

    /// Append all issues and messages of `other`, keeping order.
    pub fn merge(&mut self, other: Report) {
        self.issues.extend(other.issues);
        self.info_messages.extend(other.info_messages);
        self.error_messages.extend(other.error_messages);
    }

    pub fn counts(&self) -> SeverityCounts {
        let mut counts = SeverityCounts::default();
        for issue in &self.issues {
            match issue.severity {
                Severity::Error => counts.error += 1,
                Severity::WarningHigh => counts.high += 1,
                Severity::WarningNormal => counts.normal += 1,
                Severity::WarningLow => counts.low += 1,
            }
        }
        counts
    }

    /// Fill in fingerprints for issues whose parser did not provide one.
    pub fn assign_fingerprints(&mut self) {
        for issue in self.issues.iter_mut().filter(|i| i.fingerprint.is_empty()) {
            issue.fingerprint = issue.compute_fingerprint();
        }
    }

    /// Keep only the issues matching `predicate`, preserving order.
    pub fn retain(&mut self, predicate: impl FnMut(&Issue) -> bool) {
        self.issues.retain(predicate);
    }
}

impl IntoIterator for Report {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}

impl Extend<Issue> for Report {
    fn extend<T: IntoIterator<Item = Issue>>(&mut self, iter: T) {
        self.issues.extend(iter);
    }
}

impl FromIterator<Issue> for Report {
    fn from_iter<T: IntoIterator<Item = Issue>>(iter: T) -> Self {
        Self {
            issues: iter.into_iter().collect(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueBuilder;

    fn issue(message: &str, severity: Severity) -> Issue {
        IssueBuilder::new()
            .set_message(message)
            .set_severity(severity)
            .build()
    }

    #[test]
    fn test_insertion_order_and_duplicates_kept() {
        let mut report = Report::new();
        report.add(issue("b", Severity::Error));
        report.add(issue("a", Severity::WarningLow));
        report.add(issue("b", Severity::Error));

        let messages: Vec<_> = report.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(messages, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_counts() {
        let report: Report = vec![
            issue("1", Severity::Error),
            issue("2", Severity::WarningNormal),
            issue("3", Severity::WarningNormal),
            issue("4", Severity::WarningLow),
        ]
        .into_iter()
        .collect();

        let counts = report.counts();
        assert_eq!(counts.error, 1);
        assert_eq!(counts.high, 0);
        assert_eq!(counts.get(Severity::WarningNormal), 2);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn test_merge_keeps_messages() {
        let mut first = Report::new();
        first.add(issue("1", Severity::Error));
        first.log_info("parsed a.log");

        let mut second = Report::new();
        second.add(issue("2", Severity::Error));
        second.log_error("b.log failed");

        first.merge(second);

        assert_eq!(first.len(), 2);
        assert_eq!(first.info_messages(), ["parsed a.log".to_string()]);
        assert!(first.has_errors());
    }

    #[test]
    fn test_assign_fingerprints_keeps_existing() {
        let mut report = Report::new();
        report.add(issue("1", Severity::Error));
        let mut fixed = issue("2", Severity::Error);
        fixed.fingerprint = "given".to_string();
        report.add(fixed);

        report.assign_fingerprints();

        assert_eq!(report.get(0).unwrap().fingerprint.len(), 12);
        assert_eq!(report.get(1).unwrap().fingerprint, "given");
    }
}
