pub use masterror::{AppError, AppResult};

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create plan parse error with optional position info
pub fn plan_parse_error(message: impl Into<String>) -> AppError {
    let msg = message.into();
    AppError::bad_request(format_json_error("Plan parse error", &msg))
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Create error for a pipeline whose pass runs before one it depends on
pub fn pipeline_order_error(pass: &str, missing: &str) -> AppError {
    AppError::internal(format!(
        "Pass '{}' requires '{}' to run earlier in the pipeline",
        pass, missing
    ))
}

/// Create error for an unknown demo identifier
pub fn unknown_demo_error(id: &str) -> AppError {
    AppError::not_found(format!("Unknown demo '{}' (use `demo --list`)", id))
}

/// Create serialization error for structured output
pub fn serialize_error(message: impl Into<String>) -> AppError {
    AppError::internal(format!("Failed to serialize output: {}", message.into()))
}

/// Format JSON error with position highlighting
fn format_json_error(prefix: &str, message: &str) -> String {
    // serde_json format: "... at line X column Y"
    if let Some(pos) = extract_position(message) {
        format!(
            "{} at line {}, column {}:\n  {}",
            prefix, pos.line, pos.column, message
        )
    } else {
        format!("{}:\n  {}", prefix, message)
    }
}

struct JsonPosition {
    line:   usize,
    column: usize
}

fn extract_position(message: &str) -> Option<JsonPosition> {
    let line_marker = " at line ";
    let col_marker = " column ";

    let line_start = message.rfind(line_marker)?;
    let line_num_start = line_start + line_marker.len();
    let col_start = message[line_num_start..].find(col_marker)?;
    let line_str = &message[line_num_start..line_num_start + col_start];
    let col_num_start = line_num_start + col_start + col_marker.len();

    let col_end = message[col_num_start..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(message.len() - col_num_start);
    let col_str = &message[col_num_start..col_num_start + col_end];

    match (line_str.parse(), col_str.parse()) {
        (Ok(line), Ok(column)) => Some(JsonPosition { line, column }),
        _ => None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_position_from_serde_message() {
        let pos = extract_position("expected value at line 3 column 17").unwrap();
        assert_eq!(pos.line, 3);
        assert_eq!(pos.column, 17);
    }

    #[test]
    fn test_extract_position_absent() {
        assert!(extract_position("EOF while parsing").is_none());
        assert!(extract_position("bad at line x column 1").is_none());
    }

    #[test]
    fn test_format_json_error_with_position() {
        let msg = format_json_error("Plan parse error", "trailing comma at line 2 column 5");
        assert!(msg.starts_with("Plan parse error at line 2, column 5:"));
    }
}
