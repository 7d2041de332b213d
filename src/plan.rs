//! EXPLAIN plan report formatter.
//!
//! Renders an ordered list of plan rows into one annotated block, one section
//! per row:
//!
//! ```text
//! Row 1:
//! --------------------------------------------------
//!                   id: 1
//!                 type: ALL
//!                  key: NULL
//!                 rows: 15000
//!                Extra: Using filesort
//!
//! ```
//!
//! Column names are right-aligned in a field of at least
//! [`PlanConfig::key_width`] characters, as MySQL's vertical (`\G`) output
//! does. Each value carries a severity class chosen by [`classify`]. Keys and
//! values are HTML-escaped, since MySQL reports derived tables and
//! temporary keys as `<derived2>` or `<auto_key0>`.

mod classify;
mod types;

pub use classify::classify;
use tracing::debug;
pub use types::{Finding, PlanRow, PlanSummary, PlanValue};

use crate::{
    config::PlanConfig,
    markup::{Severity, SpanClass, escape_html, span}
};

/// Width of the separator line under each row header.
pub const SEPARATOR_WIDTH: usize = 50;

/// Plan formatter with configurable thresholds and key width.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanFormatter {
    config: PlanConfig
}

impl PlanFormatter {
    pub fn new(config: PlanConfig) -> Self {
        Self {
            config
        }
    }

    /// Render `rows` as one annotated block. No rows, no output.
    pub fn format(&self, rows: &[PlanRow]) -> String {
        let mut out = String::new();
        let separator = span(SpanClass::PlanSeparator, &"-".repeat(SEPARATOR_WIDTH));
        for (i, row) in rows.iter().enumerate() {
            out.push_str(&span(SpanClass::PlanRowHeader, &format!("Row {}:", i + 1)));
            out.push('\n');
            out.push_str(&separator);
            out.push('\n');
            for (column, value) in row.iter() {
                let class = classify(column, value, &self.config);
                let key = format!("{:>width$}", column, width = self.config.key_width);
                out.push_str(&span(SpanClass::PlanKey, &escape_html(&key)));
                out.push_str(": ");
                out.push_str(&span(class, &escape_html(&value.to_string())));
                out.push('\n');
            }
            out.push('\n');
        }
        debug!(rows = rows.len(), len = out.len(), "formatted plan");
        out
    }

    /// Classify every cell and collect the non-neutral ones.
    pub fn summarize(&self, rows: &[PlanRow]) -> PlanSummary {
        let findings: Vec<Finding> = rows
            .iter()
            .enumerate()
            .flat_map(|(i, row)| {
                row.iter().filter_map(move |(column, value)| {
                    let class = classify(column, value, &self.config);
                    let severity = class.severity();
                    (severity != Severity::Neutral).then(|| Finding {
                        row: i + 1,
                        column: column.into(),
                        value: value.to_string(),
                        class,
                        severity
                    })
                })
            })
            .collect();
        let worst = findings
            .iter()
            .map(|f| f.severity)
            .max()
            .unwrap_or(Severity::Neutral);
        PlanSummary {
            rows_count: rows.len(),
            worst,
            findings
        }
    }
}

/// Render `rows` with the default thresholds (`rows` > 1000 warn,
/// > 10000 bad) and a 20-character key field.
pub fn format_plan(rows: &[PlanRow]) -> String {
    PlanFormatter::default().format(rows)
}

/// Worst severity across all cells, with default thresholds.
pub fn worst_severity(rows: &[PlanRow]) -> Severity {
    PlanFormatter::default().summarize(rows).worst
}
