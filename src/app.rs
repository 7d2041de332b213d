//! Application logic for the SQL Tuning Annotator CLI.
//!
//! Kept apart from the binary entry point so commands can be tested without
//! spawning a process.

mod commands;
mod convert;
mod helpers;
mod types;

pub use commands::{
    demo_severities, list_demos, run, run_demo, run_plan, run_snippet, run_sql
};
pub use convert::convert_format;
pub use helpers::{
    build_theme, calculate_exit_code, create_output_options, read_input, source_name
};
pub use types::CommandOutput;
