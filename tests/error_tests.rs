// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_tuning_annotator::error::{
    config_error, file_read_error, pipeline_order_error, plan_parse_error, serialize_error,
    unknown_demo_error
};

#[test]
fn test_file_read_error() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error = file_read_error("/path/to/plan.json", io_error);
    assert!(!error.to_string().is_empty());
}

#[test]
fn test_plan_parse_error() {
    let error = plan_parse_error("EOF while parsing a list");
    let _msg = error.to_string();
}

#[test]
fn test_plan_parse_error_with_position() {
    let error = plan_parse_error("expected `,` or `]` at line 4 column 2");
    let _msg = error.to_string();
}

#[test]
fn test_plan_parse_error_from_serde() {
    let serde_err = serde_json::from_str::<serde_json::Value>("[1,").unwrap_err();
    let error = plan_parse_error(serde_err.to_string());
    assert!(!error.to_string().is_empty());
}

#[test]
fn test_config_error() {
    let error = config_error("Invalid config");
    let _msg = error.to_string();
}

#[test]
fn test_pipeline_order_error() {
    let error = pipeline_order_error("restore-comments", "park-comments");
    let _msg = error.to_string();
}

#[test]
fn test_unknown_demo_error() {
    let error = unknown_demo_error("missing");
    let _msg = error.to_string();
}

#[test]
fn test_serialize_error() {
    let error = serialize_error("unsupported value");
    let _msg = error.to_string();
}
