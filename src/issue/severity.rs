use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Severity of an issue: an error plus three warning levels.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize, JsonSchema,
)]
pub enum Severity {
    #[serde(rename = "ERROR")]
    Error,
    #[serde(rename = "HIGH")]
    WarningHigh,
    #[default]
    #[serde(rename = "NORMAL")]
    WarningNormal,
    #[serde(rename = "LOW")]
    WarningLow,
}

const ERROR_TOKENS: &[&str] = &["error", "severe", "critical", "fatal", "エラー"];
const HIGH_TOKENS: &[&str] = &["high", "major"];
const LOW_TOKENS: &[&str] = &["info", "note", "low", "minor"];

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Error,
        Severity::WarningHigh,
        Severity::WarningNormal,
        Severity::WarningLow,
    ];

    /// Map a tool's own severity vocabulary onto the four levels.
    /// Anything unrecognized (including "warning" and its localized forms)
    /// resolves to `WarningNormal`.
    pub fn guess_from_string(text: &str) -> Severity {
        let lower = text.to_lowercase();
        let contains_any = |tokens: &[&str]| tokens.iter().any(|t| lower.contains(t));

        if contains_any(ERROR_TOKENS) {
            Severity::Error
        } else if contains_any(HIGH_TOKENS) {
            Severity::WarningHigh
        } else if contains_any(LOW_TOKENS) {
            Severity::WarningLow
        } else {
            Severity::WarningNormal
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::WarningHigh => "HIGH",
            Severity::WarningNormal => "NORMAL",
            Severity::WarningLow => "LOW",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ERROR" => Ok(Severity::Error),
            "HIGH" | "WARNING_HIGH" => Ok(Severity::WarningHigh),
            "NORMAL" | "WARNING_NORMAL" => Ok(Severity::WarningNormal),
            "LOW" | "WARNING_LOW" => Ok(Severity::WarningLow),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_common_vocabulary() {
        assert_eq!(Severity::guess_from_string("error"), Severity::Error);
        assert_eq!(Severity::guess_from_string("fatal error"), Severity::Error);
        assert_eq!(Severity::guess_from_string("Warning"), Severity::WarningNormal);
        assert_eq!(Severity::guess_from_string("note"), Severity::WarningLow);
        assert_eq!(Severity::guess_from_string("INFO"), Severity::WarningLow);
        assert_eq!(Severity::guess_from_string("major"), Severity::WarningHigh);
    }

    #[test]
    fn test_guess_localized_tokens() {
        assert_eq!(Severity::guess_from_string("エラー"), Severity::Error);
        assert_eq!(Severity::guess_from_string("警告"), Severity::WarningNormal);
    }

    #[test]
    fn test_guess_unknown_falls_back_to_normal() {
        assert_eq!(Severity::guess_from_string(""), Severity::WarningNormal);
        assert_eq!(Severity::guess_from_string("remark"), Severity::WarningNormal);
    }

    #[test]
    fn test_from_str_names() {
        assert_eq!("error".parse::<Severity>().unwrap(), Severity::Error);
        assert_eq!("WARNING_HIGH".parse::<Severity>().unwrap(), Severity::WarningHigh);
        assert_eq!("low".parse::<Severity>().unwrap(), Severity::WarningLow);
        assert!("bogus".parse::<Severity>().is_err());
    }
}
