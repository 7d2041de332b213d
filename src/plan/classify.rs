//! Severity classification of individual plan cells.
//!
//! | Column | Value | Class |
//! |--------|-------|-------|
//! | `type` | `ALL` | `plan-type-bad` |
//! | `type` | `index`, `ref`, `eq_ref` | `plan-type-good` |
//! | `key` | non-empty | `plan-index` |
//! | `key` | empty or NULL | `plan-null` |
//! | `rows` | `> bad` threshold | `plan-rows-bad` |
//! | `rows` | `> warn` threshold | `plan-rows-warn` |
//! | `rows` | `0..=warn` | `plan-rows-good` |
//! | `Extra` | `Using filesort` / `Using temporary` | `plan-extra-warn` |
//! | `Extra` | `Using index` | `plan-extra-good` |
//!
//! Everything else, including non-numeric or negative `rows`, is
//! `plan-value`. Column names and values are matched case-sensitively, as
//! MySQL prints them.

use super::PlanValue;
use crate::{config::PlanConfig, markup::SpanClass};

/// Access types that use an index.
const GOOD_ACCESS_TYPES: [&str; 3] = ["index", "ref", "eq_ref"];

/// Pick the span class for `value` in `column`.
pub fn classify(column: &str, value: &PlanValue, config: &PlanConfig) -> SpanClass {
    match column {
        "type" => classify_type(value),
        "key" => classify_key(value),
        "rows" => classify_rows(value, config),
        "Extra" => classify_extra(value),
        _ => SpanClass::PlanValue
    }
}

fn classify_type(value: &PlanValue) -> SpanClass {
    match value {
        PlanValue::Text(t) if t.as_str() == "ALL" => SpanClass::PlanTypeBad,
        PlanValue::Text(t) if GOOD_ACCESS_TYPES.contains(&t.as_str()) => SpanClass::PlanTypeGood,
        _ => SpanClass::PlanValue
    }
}

fn classify_key(value: &PlanValue) -> SpanClass {
    match value.as_text() {
        Some(text) if !text.is_empty() => SpanClass::PlanIndex,
        _ => SpanClass::PlanNull
    }
}

fn classify_rows(value: &PlanValue, config: &PlanConfig) -> SpanClass {
    match value.as_f64() {
        Some(n) if n > config.rows_bad_threshold as f64 => SpanClass::PlanRowsBad,
        Some(n) if n > config.rows_warn_threshold as f64 => SpanClass::PlanRowsWarn,
        Some(n) if n >= 0.0 => SpanClass::PlanRowsGood,
        _ => SpanClass::PlanValue
    }
}

fn classify_extra(value: &PlanValue) -> SpanClass {
    let PlanValue::Text(extra) = value else {
        return SpanClass::PlanValue;
    };
    if extra.contains("Using filesort") || extra.contains("Using temporary") {
        SpanClass::PlanExtraWarn
    } else if extra.contains("Using index") {
        SpanClass::PlanExtraGood
    } else {
        SpanClass::PlanValue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(column: &str, value: impl Into<PlanValue>) -> SpanClass {
        classify(column, &value.into(), &PlanConfig::default())
    }

    #[test]
    fn test_type_classes() {
        assert_eq!(class("type", "ALL"), SpanClass::PlanTypeBad);
        assert_eq!(class("type", "eq_ref"), SpanClass::PlanTypeGood);
        assert_eq!(class("type", "range"), SpanClass::PlanValue);
        assert_eq!(class("type", "all"), SpanClass::PlanValue);
        assert_eq!(class("type", PlanValue::Null), SpanClass::PlanValue);
    }

    #[test]
    fn test_key_classes() {
        assert_eq!(class("key", "PRIMARY"), SpanClass::PlanIndex);
        assert_eq!(class("key", ""), SpanClass::PlanNull);
        assert_eq!(class("key", PlanValue::Null), SpanClass::PlanNull);
    }

    #[test]
    fn test_rows_thresholds_are_exclusive() {
        assert_eq!(class("rows", 10001i64), SpanClass::PlanRowsBad);
        assert_eq!(class("rows", 10000i64), SpanClass::PlanRowsWarn);
        assert_eq!(class("rows", 1001i64), SpanClass::PlanRowsWarn);
        assert_eq!(class("rows", 1000i64), SpanClass::PlanRowsGood);
        assert_eq!(class("rows", 0i64), SpanClass::PlanRowsGood);
    }

    #[test]
    fn test_rows_from_text_and_fallbacks() {
        assert_eq!(class("rows", " 15000 "), SpanClass::PlanRowsBad);
        assert_eq!(class("rows", "many"), SpanClass::PlanValue);
        assert_eq!(class("rows", -5i64), SpanClass::PlanValue);
        assert_eq!(class("rows", PlanValue::Null), SpanClass::PlanValue);
        assert_eq!(class("rows", true), SpanClass::PlanValue);
    }

    #[test]
    fn test_extra_precedence() {
        assert_eq!(
            class("Extra", "Using index; Using temporary"),
            SpanClass::PlanExtraWarn
        );
        assert_eq!(class("Extra", "Using where; Using index"), SpanClass::PlanExtraGood);
        assert_eq!(class("Extra", "Using where"), SpanClass::PlanValue);
        assert_eq!(class("extra", "Using filesort"), SpanClass::PlanValue);
    }

    #[test]
    fn test_custom_thresholds() {
        let config = PlanConfig {
            rows_warn_threshold: 10,
            rows_bad_threshold: 100,
            ..PlanConfig::default()
        };
        assert_eq!(classify("rows", &50i64.into(), &config), SpanClass::PlanRowsWarn);
        assert_eq!(classify("rows", &101i64.into(), &config), SpanClass::PlanRowsBad);
    }
}
