//! Query response envelope delivered by the tuning API.
//!
//! The API answers each demo call with the SQL it executed, the measured
//! execution time and, when requested, the EXPLAIN rows:
//!
//! ```json
//! {
//!   "executedSql": "SELECT ... FROM film WHERE title LIKE 'ACADEMY%'",
//!   "executionTimeMs": 12,
//!   "plan": [{ "id": 1, "type": "range", "key": "idx_title", "rows": 12 }]
//! }
//! ```
//!
//! A bare JSON array of rows is accepted as well, and so is a single row
//! object.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{
    error::{AppResult, plan_parse_error},
    plan::PlanRow
};

/// Keys that mark an object as a response envelope rather than a row.
const ENVELOPE_FIELDS: [&str; 4] = ["executedSql", "executionTimeMs", "plan", "explain"];

/// Decoded API response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    #[serde(default)]
    pub executed_sql:      Option<String>,
    #[serde(default)]
    pub execution_time_ms: Option<u64>,
    #[serde(default, alias = "explain")]
    pub plan:              Vec<PlanRow>
}

/// Parse a response envelope or a bare row array.
///
/// Blank input is an empty plan.
///
/// # Errors
///
/// Returns a plan parse error for malformed JSON, or for JSON that is neither
/// an array of row objects nor a response object.
pub fn parse_response(text: &str) -> AppResult<QueryResponse> {
    if text.trim().is_empty() {
        return Ok(QueryResponse::default());
    }
    let value: Value =
        serde_json::from_str(text).map_err(|e| plan_parse_error(e.to_string()))?;
    let is_envelope = value
        .as_object()
        .is_some_and(|fields| ENVELOPE_FIELDS.iter().any(|f| fields.contains_key(*f)));
    let response = match value {
        Value::Array(_) => QueryResponse {
            plan: serde_json::from_value(value).map_err(|e| plan_parse_error(e.to_string()))?,
            ..QueryResponse::default()
        },
        Value::Object(_) if !is_envelope => QueryResponse {
            plan: vec![serde_json::from_value(value).map_err(|e| plan_parse_error(e.to_string()))?],
            ..QueryResponse::default()
        },
        Value::Object(_) => {
            serde_json::from_value(value).map_err(|e| plan_parse_error(e.to_string()))?
        }
        other => {
            return Err(plan_parse_error(format!(
                "expected an array of rows or a response object, found {}",
                json_kind(&other)
            )));
        }
    };
    debug!(
        rows = response.plan.len(),
        has_sql = response.executed_sql.is_some(),
        "parsed plan input"
    );
    Ok(response)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlanValue;

    #[test]
    fn test_bare_array_keeps_column_order() {
        let response = parse_response(r#"[{"rows": 5, "type": "ref", "id": 1}]"#).unwrap();
        let columns: Vec<_> = response.plan[0].iter().map(|(k, _)| k).collect();
        assert_eq!(columns, vec!["rows", "type", "id"]);
        assert!(response.executed_sql.is_none());
    }

    #[test]
    fn test_envelope() {
        let response = parse_response(
            r#"{"executedSql": "SELECT 1", "executionTimeMs": 7, "explain": [{"key": null}]}"#
        )
        .unwrap();
        assert_eq!(response.executed_sql.as_deref(), Some("SELECT 1"));
        assert_eq!(response.execution_time_ms, Some(7));
        assert_eq!(response.plan[0].get("key"), Some(&PlanValue::Null));
    }

    #[test]
    fn test_single_row_object() {
        let response = parse_response(r#"{"type": "ALL", "rows": 15000}"#).unwrap();
        assert_eq!(response.plan.len(), 1);
        assert_eq!(response.plan[0].get("type"), Some(&PlanValue::from("ALL")));
    }

    #[test]
    fn test_blank_is_empty_plan() {
        assert!(parse_response("  \n").unwrap().plan.is_empty());
    }

    #[test]
    fn test_scalar_is_rejected() {
        assert!(parse_response("42").is_err());
        assert!(parse_response("[1, 2]").is_err());
        assert!(parse_response("{").is_err());
    }
}
