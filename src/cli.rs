use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// SQL Tuning Annotator - Highlight SQL, source snippets and EXPLAIN plans
#[derive(Parser, Debug)]
#[command(name = "sql-tuning-annotator")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text", global = true)]
    pub format: Format,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Wrap HTML output in a complete document with the stylesheet
    #[arg(long, global = true)]
    pub standalone: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Annotate SQL files
    Sql {
        /// SQL files to annotate (use - for stdin)
        #[arg(short, long = "input", required = true, num_args = 1..)]
        inputs: Vec<PathBuf>
    },

    /// Annotate a source snippet
    Snippet {
        /// Snippet file (use - for stdin); defaults to the built-in snippet
        #[arg(short, long)]
        input: Option<PathBuf>
    },

    /// Format an EXPLAIN plan given as JSON
    Plan {
        /// JSON file with rows or a query response (use - for stdin)
        #[arg(short, long)]
        input: PathBuf
    },

    /// Render the bundled tuning demos
    Demo {
        /// Demo id; all demos when omitted
        id: Option<String>,

        /// List demo ids and titles
        #[arg(long)]
        list: bool
    },

    /// Print the CSS stylesheet for all span classes
    Stylesheet
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Text,
    Html,
    Json,
    Yaml
}
