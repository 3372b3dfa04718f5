use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors at the engine boundary.
///
/// Only ingestion can fail. Rule evaluation and totals derivation are total
/// functions: malformed invoice data fails rules, it never raises.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// Upstream payload could not be deserialized at all.
    #[error("payload error: {0}")]
    Payload(#[from] serde_json::Error),

    /// Output format identifier is not in the registry.
    #[error("unknown output format '{0}'")]
    UnknownFormat(String),
}

/// Rule severity.
///
/// `Error` blocks document generation for the active format; `Warning` is
/// surfaced to the reviewer but never blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single failed business rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Stable rule code (e.g. "BR-CO-10", "SEMANTIC-NET-GROSS").
    pub rule: String,
    pub severity: Severity,
    /// Human-readable error description.
    pub message: String,
    /// Dot-separated path to the offending field, when one applies.
    pub field: Option<String>,
    /// Expected value; money is formatted to 2 decimals.
    pub expected: Option<String>,
    /// Actual value; money is formatted to 2 decimals.
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "[{}] {}: {}", self.rule, field, self.message)
        } else {
            write!(f, "[{}] {}", self.rule, self.message)
        }
    }
}

impl ValidationError {
    /// Create a validation error without a field path.
    pub fn new(rule: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            severity,
            message: message.into(),
            field: None,
            expected: None,
            actual: None,
        }
    }

    /// Create a validation error attached to a field path.
    pub fn for_field(
        rule: impl Into<String>,
        severity: Severity,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: Some(field.into()),
            ..Self::new(rule, severity, message)
        }
    }

    /// Attach formatted expected/actual values.
    pub fn with_values(mut self, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self.actual = Some(actual.into());
        self
    }
}
