//! Helper functions for CLI operations.
//!
//! Reading input, naming sources, mapping plan severity to exit codes and
//! assembling output options from flags and configuration.

use std::{
    fs::read_to_string,
    io::{self, Read},
    path::Path
};

use super::convert::convert_format;
use crate::{
    cli::Format,
    config::Config,
    error::{AppResult, file_read_error},
    markup::Severity,
    output::OutputOptions,
    theme::Theme
};

/// Calculates the process exit code from the worst plan severity.
///
/// - `0` - No findings, or only good ones
/// - `1` - At least one warning
/// - `2` - At least one bad value
///
/// # Example
///
/// ```
/// use sql_tuning_annotator::{app::calculate_exit_code, markup::Severity};
///
/// assert_eq!(calculate_exit_code(Severity::Good), 0);
/// assert_eq!(calculate_exit_code(Severity::Bad), 2);
/// ```
pub fn calculate_exit_code(worst: Severity) -> i32 {
    match worst {
        Severity::Bad => 2,
        Severity::Warn => 1,
        Severity::Good | Severity::Neutral => 0
    }
}

/// Reads text from a file or stdin.
///
/// The path "-" reads standard input.
///
/// # Errors
///
/// Returns an error if the file cannot be read or stdin fails.
pub fn read_input(path: &Path) -> AppResult<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| file_read_error("stdin", e))?;
        Ok(buffer)
    } else {
        read_to_string(path).map_err(|e| file_read_error(&path.display().to_string(), e))
    }
}

/// Display name of an input: `stdin` for "-", the path otherwise.
pub fn source_name(path: &Path) -> String {
    if path.as_os_str() == "-" {
        "stdin".to_string()
    } else {
        path.display().to_string()
    }
}

/// Creates output options from CLI flags and configuration.
///
/// Color is on only when neither `--no-color` nor the configuration
/// (including `NO_COLOR`) turns it off.
pub fn create_output_options(
    format: Format,
    no_color: bool,
    standalone: bool,
    config: &Config
) -> OutputOptions {
    OutputOptions {
        format: convert_format(format),
        colored: !no_color && config.output.colored,
        standalone
    }
}

/// Builds the theme with configured color overrides applied.
///
/// # Errors
///
/// Returns a config error for unknown class names or malformed colors.
pub fn build_theme(config: &Config) -> AppResult<Theme> {
    Theme::default().with_overrides(&config.theme)
}
