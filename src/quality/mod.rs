//! Declarative data-quality rules over the output record set.
//!
//! Rule evaluation is best-effort: outcomes are published to the log for
//! observability and never halt or branch the pipeline.

use std::fmt;

use arrow::record_batch::RecordBatch;

/// A declarative rule evaluated against a record set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Total row count across all batches must exceed the threshold
    RowCountGreaterThan(usize),
    /// Column count of the record set must exceed the threshold
    ColumnCountGreaterThan(usize),
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowCountGreaterThan(n) => write!(f, "RowCount > {n}"),
            Self::ColumnCountGreaterThan(n) => write!(f, "ColumnCount > {n}"),
        }
    }
}

/// Result of evaluating one rule
#[derive(Debug, Clone)]
pub struct RuleOutcome {
    /// The rule that was evaluated
    pub rule: Rule,
    /// Whether the record set satisfied the rule
    pub passed: bool,
    /// The observed value the rule was compared against
    pub actual: usize,
}

/// Evaluate rules against a record set
///
/// Pure and infallible: an empty record set simply observes zero rows and
/// zero columns.
#[must_use]
pub fn evaluate(rules: &[Rule], batches: &[RecordBatch]) -> Vec<RuleOutcome> {
    let row_count: usize = batches.iter().map(RecordBatch::num_rows).sum();
    let column_count = batches.first().map_or(0, RecordBatch::num_columns);

    rules
        .iter()
        .map(|rule| {
            let (passed, actual) = match rule {
                Rule::RowCountGreaterThan(n) => (row_count > *n, row_count),
                Rule::ColumnCountGreaterThan(n) => (column_count > *n, column_count),
            };
            RuleOutcome {
                rule: rule.clone(),
                passed,
                actual,
            }
        })
        .collect()
}

/// Publish rule outcomes to the log
///
/// Failures are warnings, not errors; the pipeline continues regardless.
pub fn publish(outcomes: &[RuleOutcome]) {
    for outcome in outcomes {
        if outcome.passed {
            log::info!(
                "Data quality rule passed: {} (actual: {})",
                outcome.rule,
                outcome.actual
            );
        } else {
            log::warn!(
                "Data quality rule failed: {} (actual: {})",
                outcome.rule,
                outcome.actual
            );
        }
    }
}
