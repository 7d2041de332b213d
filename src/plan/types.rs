use compact_str::CompactString;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::markup::{Severity, SpanClass};

/// Scalar cell of an EXPLAIN row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum PlanValue {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(CompactString)
}

impl PlanValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric reading of the value.
    ///
    /// JSON numbers are taken as is; text is trimmed and parsed. Anything else,
    /// including non-finite floats, has no numeric reading.
    pub fn as_f64(&self) -> Option<f64> {
        let n = match self {
            Self::Number(n) => n.as_f64()?,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Null | Self::Bool(_) => return None
        };
        n.is_finite().then_some(n)
    }

    /// Text reading of the value, `None` for null.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            other => Some(other.to_string())
        }
    }
}

impl std::fmt::Display for PlanValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s)
        }
    }
}

impl From<&str> for PlanValue {
    fn from(s: &str) -> Self {
        Self::Text(s.into())
    }
}

impl From<String> for PlanValue {
    fn from(s: String) -> Self {
        Self::Text(s.into())
    }
}

impl From<i64> for PlanValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for PlanValue {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

impl From<f64> for PlanValue {
    fn from(n: f64) -> Self {
        serde_json::Number::from_f64(n).map_or(Self::Null, Self::Number)
    }
}

impl From<bool> for PlanValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<PlanValue>> From<Option<T>> for PlanValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// One EXPLAIN row: column name to value, in the order the columns arrived
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanRow {
    columns: IndexMap<CompactString, PlanValue>
}

impl PlanRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, keeping first-insertion order.
    pub fn with(mut self, column: &str, value: impl Into<PlanValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &str, value: impl Into<PlanValue>) {
        self.columns.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&PlanValue> {
        self.columns.get(column)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlanValue)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<PlanValue>> FromIterator<(K, V)> for PlanRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (column, value) in iter {
            row.insert(column.as_ref(), value);
        }
        row
    }
}

/// Classified cell of a plan report
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    /// One-based row number, as shown in the report header
    pub row:      usize,
    pub column:   CompactString,
    pub value:    String,
    pub class:    SpanClass,
    pub severity: Severity
}

/// Severity overview of a whole plan report
#[derive(Debug, Clone, Serialize)]
pub struct PlanSummary {
    pub rows_count: usize,
    pub worst:      Severity,
    /// Non-neutral cells only
    pub findings:   Vec<Finding>
}

impl PlanSummary {
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }
}
