//! # SQL Tuning Annotator
//!
//! Lightweight, regex-driven annotation of SQL text, service-layer source
//! snippets and MySQL `EXPLAIN` plans for a SQL tuning dashboard.
//!
//! Each annotator turns plain text into the same text interspersed with
//! `<span class="...">` wrappers; a presentation layer styles the spans by
//! class name. The annotators are total: empty input gives empty output and
//! nothing ever fails.
//!
//! ```
//! use sql_tuning_annotator::{markup::strip, sql::annotate_sql};
//!
//! let annotated = annotate_sql("select title from film where length > 90");
//! assert!(annotated.contains(r#"<span class="sql-keyword">SELECT</span>"#));
//! assert_eq!(strip(&annotated), "SELECT title FROM film WHERE length > 90");
//! ```
//!
//! # Annotators
//!
//! - [`sql::annotate_sql`] - keywords, single-quoted strings, integers and
//!   `--` comments
//! - [`snippet::annotate_snippet`] - keywords, types, method calls, local
//!   variable declarations and `//` comments of a Java-like snippet
//! - [`plan::format_plan`] - vertical plan report with every value classified
//!   as good, warn, bad or neutral
//!
//! The SQL and snippet annotators are ordered [`pipeline`]s of text passes.
//! Passes that must not see each other's output park finished fragments in a
//! [`placeholder::PlaceholderTable`] and restore them at the end.
//!
//! # Exit Codes
//!
//! The `plan` command exits with the worst severity found:
//!
//! - `0` - No findings, or only good ones
//! - `1` - Warnings (filesort, temporary table, mid-sized row estimates)
//! - `2` - Bad values (full table scans, large row estimates)
//!
//! # Modules
//!
//! - [`markup`] - Span classes, escaping and span-aware segmentation
//! - [`pipeline`] / [`placeholder`] - Pass pipeline and placeholder parking
//! - [`sql`], [`snippet`], [`plan`] - The three annotators
//! - [`response`] - Query response envelope parsing
//! - [`catalog`] - Bundled slow/fast tuning demos
//! - [`theme`] / [`output`] - Stylesheet, ANSI rendering and output formats
//! - [`config`] - Configuration loading and validation
//! - [`error`] - Error types and constructors

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod markup;
pub mod output;
pub mod pipeline;
pub mod placeholder;
pub mod plan;
pub mod response;
pub mod snippet;
pub mod sql;
pub mod theme;
