use colored::Colorize;
use serde::Serialize;

use crate::{
    error::{AppResult, serialize_error},
    markup::{escape_html, strip, strip_raw},
    plan::PlanSummary,
    theme::Theme
};

/// Output format for results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Terminal text, ANSI-colored unless disabled
    #[default]
    Text,
    /// Raw span markup for the presentation layer
    Html,
    Json,
    Yaml
}

/// Output options
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub format:     OutputFormat,
    pub colored:    bool,
    /// Wrap HTML output in a complete document with the stylesheet
    pub standalone: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:     OutputFormat::Text,
            colored:    true,
            standalone: false
        }
    }
}

/// What produced an annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    Sql,
    Snippet,
    Plan
}

/// One annotated input, ready for rendering or serialization
#[derive(Debug, Clone, Serialize)]
pub struct AnnotationResult {
    /// File name, `stdin`, or a demo label
    pub source:            String,
    pub kind:              AnnotationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw:               Option<String>,
    pub annotated:         String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary:           Option<PlanSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>
}

impl AnnotationResult {
    pub fn new(source: impl Into<String>, kind: AnnotationKind, annotated: String) -> Self {
        Self {
            source: source.into(),
            kind,
            raw: None,
            annotated,
            summary: None,
            execution_time_ms: None
        }
    }

    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }

    pub fn with_summary(mut self, summary: PlanSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_execution_time(mut self, ms: Option<u64>) -> Self {
        self.execution_time_ms = ms;
        self
    }
}

/// Render results in the requested format
///
/// # Errors
///
/// Returns an error if JSON or YAML serialization fails.
pub fn format_results(
    results: &[AnnotationResult],
    theme: &Theme,
    opts: &OutputOptions
) -> AppResult<String> {
    match opts.format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(results).map_err(|e| serialize_error(e.to_string()))
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(results).map_err(|e| serialize_error(e.to_string()))
        }
        OutputFormat::Html => Ok(format_html(results, theme, opts)),
        OutputFormat::Text => Ok(format_text(results, theme, opts))
    }
}

fn format_text(results: &[AnnotationResult], theme: &Theme, opts: &OutputOptions) -> String {
    let mut output = String::new();
    for result in results {
        let header = format!("=== {} ===", result.source);
        if opts.colored {
            output.push_str(&header.cyan().bold().to_string());
        } else {
            output.push_str(&header);
        }
        output.push('\n');
        if let Some(ms) = result.execution_time_ms {
            output.push_str(&format!("Execution time: {}ms\n", ms));
        }
        // SQL is annotated unescaped, so its entity-like text is literal.
        let body = match (opts.colored, result.kind) {
            (true, AnnotationKind::Sql) => theme.to_ansi_raw(&result.annotated),
            (true, _) => theme.to_ansi(&result.annotated),
            (false, AnnotationKind::Sql) => strip_raw(&result.annotated),
            (false, _) => strip(&result.annotated)
        };
        output.push_str(&body);
        if !body.ends_with('\n') {
            output.push('\n');
        }
        if let Some(summary) = &result.summary {
            output.push_str(&format_summary_line(summary, opts.colored));
        }
        output.push('\n');
    }
    output
}

fn format_summary_line(summary: &PlanSummary, colored: bool) -> String {
    use crate::markup::Severity;

    let worst = summary.worst.to_string();
    let worst = if !colored {
        worst
    } else {
        match summary.worst {
            Severity::Bad => worst.red().bold().to_string(),
            Severity::Warn => worst.yellow().to_string(),
            Severity::Good => worst.green().to_string(),
            Severity::Neutral => worst
        }
    };
    format!(
        "Plan: {} row(s), worst: {} ({} bad, {} warn, {} good)\n",
        summary.rows_count,
        worst,
        summary.count(Severity::Bad),
        summary.count(Severity::Warn),
        summary.count(Severity::Good)
    )
}

fn format_html(results: &[AnnotationResult], theme: &Theme, opts: &OutputOptions) -> String {
    if !opts.standalone {
        return results
            .iter()
            .map(|r| r.annotated.as_str())
            .collect::<Vec<_>>()
            .join("\n");
    }
    let mut body = String::new();
    for result in results {
        body.push_str(&format!(
            "<section class=\"annotation-{}\">\n<h2>{}</h2>\n<pre>{}</pre>\n</section>\n",
            match result.kind {
                AnnotationKind::Sql => "sql",
                AnnotationKind::Snippet => "snippet",
                AnnotationKind::Plan => "plan"
            },
            escape_html(&result.source),
            result.annotated
        ));
    }
    html_document(&body, theme)
}

/// Wrap an HTML body in a document carrying the theme stylesheet
pub fn html_document(body: &str, theme: &Theme) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\npre {{ background: \
         #282a36; color: #f8f8f2; padding: 1em; }}\n{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        theme.stylesheet(),
        body
    )
}
