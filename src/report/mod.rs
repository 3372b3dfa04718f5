//! Compliance summary aggregation.

use serde::Serialize;

use crate::core::Severity;
use crate::rules::RuleOutcome;

/// Aggregate view over one evaluation run.
///
/// Warnings never block: `is_ready` depends only on the error-severity
/// rules. The counts feed review surfaces that show "17 of 19 checks
/// passed" next to the raw failure list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComplianceSummary {
    pub errors_passed: usize,
    pub errors_total: usize,
    pub warnings_passed: usize,
    pub warnings_total: usize,
    /// True iff every error-severity rule passed.
    pub is_ready: bool,
}

pub fn summarize(outcomes: &[RuleOutcome]) -> ComplianceSummary {
    let mut summary = ComplianceSummary {
        errors_passed: 0,
        errors_total: 0,
        warnings_passed: 0,
        warnings_total: 0,
        is_ready: true,
    };
    for outcome in outcomes {
        match outcome.severity {
            Severity::Error => {
                summary.errors_total += 1;
                if outcome.passed {
                    summary.errors_passed += 1;
                } else {
                    summary.is_ready = false;
                }
            }
            Severity::Warning => {
                summary.warnings_total += 1;
                if outcome.passed {
                    summary.warnings_passed += 1;
                }
            }
        }
    }
    summary
}
