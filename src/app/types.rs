//! Application types for CLI commands.

/// Result of one command: what to print and how to exit.
///
/// # Example
///
/// ```
/// use sql_tuning_annotator::app::CommandOutput;
///
/// let output = CommandOutput::success("ok\n".to_string());
/// assert_eq!(output.exit_code, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// `0` clean, `1` plan warnings, `2` bad plan values.
    pub exit_code: i32,
    /// Rendered output for stdout.
    pub stdout:    String
}

impl CommandOutput {
    pub fn success(stdout: String) -> Self {
        Self {
            exit_code: 0,
            stdout
        }
    }
}
