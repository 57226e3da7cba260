use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Tip,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Tip => write!(f, "tip"),
        }
    }
}

/// A short advisory message produced by one insight rule.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Insight {
    pub id: &'static str,
    pub title: String,
    pub message: String,
    pub severity: Severity,
}
