use std::{io, process};

use clap::Parser;
use sql_tuning_annotator::{app::run, cli::Cli, config::Config, error::AppResult};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match execute(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn execute(cli: Cli) -> AppResult<i32> {
    let config = Config::load()?;
    let output = run(cli, &config)?;
    print!("{}", output.stdout);
    debug!(exit_code = output.exit_code, "done");
    Ok(output.exit_code)
}

/// `RUST_LOG` wins; otherwise `-v` enables debug output for this crate.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "sql_tuning_annotator=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
