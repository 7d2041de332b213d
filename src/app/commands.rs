//! Command execution.
//!
//! Each `run_*` function reads its input, runs the matching annotator and
//! renders the results. Nothing here prints; callers receive a
//! [`CommandOutput`] and decide what to do with it.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info};

use super::{
    helpers::{build_theme, calculate_exit_code, create_output_options, read_input, source_name},
    types::CommandOutput
};
use crate::{
    catalog::{Demo, ILLUSTRATIVE_SNIPPET, Variant, demos, find_demo},
    cli::{Cli, Commands},
    config::{Config, PlanConfig},
    error::{AppResult, unknown_demo_error},
    markup::Severity,
    output::{AnnotationKind, AnnotationResult, OutputOptions, format_results},
    plan::PlanFormatter,
    response::parse_response,
    snippet::annotate_snippet,
    sql::annotate_sql,
    theme::Theme
};

/// Dispatches a parsed command line.
///
/// # Errors
///
/// Returns an error if input cannot be read or parsed, the theme
/// configuration is invalid, or output serialization fails.
pub fn run(cli: Cli, config: &Config) -> AppResult<CommandOutput> {
    let opts = create_output_options(cli.format, cli.no_color, cli.standalone, config);
    let theme = build_theme(config)?;
    match cli.command {
        Commands::Sql {
            inputs
        } => run_sql(&inputs, &theme, &opts),
        Commands::Snippet {
            input
        } => run_snippet(input.as_deref(), &theme, &opts),
        Commands::Plan {
            input
        } => run_plan(&input, config.plan, &theme, &opts),
        Commands::Demo {
            id,
            list
        } => {
            if list {
                Ok(CommandOutput::success(list_demos()))
            } else {
                run_demo(id.as_deref(), config.plan, &theme, &opts)
            }
        }
        Commands::Stylesheet => Ok(CommandOutput::success(theme.stylesheet()))
    }
}

/// Annotates SQL files in parallel, keeping input order in the output.
///
/// # Errors
///
/// Returns the first read error encountered.
pub fn run_sql(
    inputs: &[PathBuf],
    theme: &Theme,
    opts: &OutputOptions
) -> AppResult<CommandOutput> {
    let results = inputs
        .par_iter()
        .map(|path| -> AppResult<AnnotationResult> {
            let raw = read_input(path)?;
            let annotated = annotate_sql(&raw);
            Ok(
                AnnotationResult::new(source_name(path), AnnotationKind::Sql, annotated)
                    .with_raw(raw)
            )
        })
        .collect::<AppResult<Vec<_>>>()?;
    info!(files = results.len(), "annotated sql inputs");
    Ok(CommandOutput::success(format_results(&results, theme, opts)?))
}

/// Annotates one snippet, or the built-in illustrative snippet.
///
/// # Errors
///
/// Returns an error if the input cannot be read.
pub fn run_snippet(
    input: Option<&Path>,
    theme: &Theme,
    opts: &OutputOptions
) -> AppResult<CommandOutput> {
    let (source, raw) = match input {
        Some(path) => (source_name(path), read_input(path)?),
        None => ("illustrative snippet".to_string(), ILLUSTRATIVE_SNIPPET.to_string())
    };
    let annotated = annotate_snippet(&raw);
    let result = AnnotationResult::new(source, AnnotationKind::Snippet, annotated).with_raw(raw);
    Ok(CommandOutput::success(format_results(&[result], theme, opts)?))
}

/// Formats a JSON plan and sets the exit code from its worst severity.
///
/// A response envelope that carries the executed SQL yields an annotated SQL
/// result ahead of the plan.
///
/// # Errors
///
/// Returns an error if the input cannot be read or is not a plan.
pub fn run_plan(
    input: &Path,
    plan_config: PlanConfig,
    theme: &Theme,
    opts: &OutputOptions
) -> AppResult<CommandOutput> {
    let response = parse_response(&read_input(input)?)?;
    let source = source_name(input);
    let formatter = PlanFormatter::new(plan_config);
    let summary = formatter.summarize(&response.plan);
    let exit_code = calculate_exit_code(summary.worst);
    let mut results = Vec::with_capacity(2);
    if let Some(sql) = &response.executed_sql {
        results.push(
            AnnotationResult::new(
                format!("{} (sql)", source),
                AnnotationKind::Sql,
                annotate_sql(sql)
            )
            .with_raw(sql.as_str())
        );
    }
    results.push(
        AnnotationResult::new(
            format!("{} (plan)", source),
            AnnotationKind::Plan,
            formatter.format(&response.plan)
        )
        .with_summary(summary)
        .with_execution_time(response.execution_time_ms)
    );
    debug!(exit_code, "plan command finished");
    Ok(CommandOutput {
        exit_code,
        stdout: format_results(&results, theme, opts)?
    })
}

/// Renders one demo, or all of them, followed by the illustrative snippet.
///
/// Demo plans are samples, so they never affect the exit code.
///
/// # Errors
///
/// Returns a not-found error for an unknown demo id.
pub fn run_demo(
    id: Option<&str>,
    plan_config: PlanConfig,
    theme: &Theme,
    opts: &OutputOptions
) -> AppResult<CommandOutput> {
    let selected: Vec<&Demo> = match id {
        Some(id) => vec![find_demo(id).ok_or_else(|| unknown_demo_error(id))?],
        None => demos().iter().collect()
    };
    let formatter = PlanFormatter::new(plan_config);
    let mut results = Vec::new();
    for demo in selected {
        for (side, variant) in [("slow", &demo.slow), ("fast", &demo.fast)] {
            results.extend(render_variant(demo, side, variant, &formatter));
        }
    }
    results.push(
        AnnotationResult::new(
            "illustrative snippet",
            AnnotationKind::Snippet,
            annotate_snippet(ILLUSTRATIVE_SNIPPET)
        )
        .with_raw(ILLUSTRATIVE_SNIPPET)
    );
    Ok(CommandOutput::success(format_results(&results, theme, opts)?))
}

fn render_variant(
    demo: &Demo,
    side: &str,
    variant: &Variant,
    formatter: &PlanFormatter
) -> [AnnotationResult; 2] {
    let source = format!("{} / {}: {}", demo.id, side, variant.label);
    let plan = variant.plan();
    let summary = formatter.summarize(&plan);
    [
        AnnotationResult::new(source.clone(), AnnotationKind::Sql, annotate_sql(variant.sql))
            .with_raw(variant.sql),
        AnnotationResult::new(
            format!("{} (plan)", source),
            AnnotationKind::Plan,
            formatter.format(&plan)
        )
        .with_summary(summary)
    ]
}

/// Demo ids with their title, lesson on the following line.
pub fn list_demos() -> String {
    let width = demos().iter().map(|d| d.id.len()).max().unwrap_or(0);
    demos()
        .iter()
        .map(|d| format!("{:<width$}  {}\n{:<width$}  {}\n", d.id, d.title, "", d.lesson))
        .collect()
}

/// Worst severity among all bundled demo plans, per side.
pub fn demo_severities(plan_config: PlanConfig) -> Vec<(&'static str, Severity, Severity)> {
    let formatter = PlanFormatter::new(plan_config);
    demos()
        .iter()
        .map(|d| {
            (
                d.id,
                formatter.summarize(&d.slow.plan()).worst,
                formatter.summarize(&d.fast.plan()).worst
            )
        })
        .collect()
}
