mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::input::table::write_table;
use crate::input::{DEFAULT_SEED, InputError, load_input, load_input_synthetic};
use crate::model::profile::{ConfigError, ScoringProfile};
use crate::pipeline::stage4_report::{ReportPaths, Stage4Input, write_reports};
use crate::pipeline::{ScoreError, score_entities};
use crate::report::ReportError;

const TOOL_NAME: &str = "borough-score";

#[derive(Debug, Parser)]
#[command(
    name = "borough-score",
    version,
    about = "Predictive selling score for London boroughs"
)]
struct Cli {
    /// Log level used when RUST_LOG is unset.
    #[arg(
        long,
        global = true,
        default_value = "info",
        value_parser = clap::builder::PossibleValuesParser::new(logging::LOG_LEVELS)
    )]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a table (or the synthetic boroughs) and write reports.
    Run(RunArgs),
    /// Write the synthetic borough table to a TSV file.
    Simulate(SimulateArgs),
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    /// Tab-separated input table; synthetic boroughs are used when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Seed for the synthetic table.
    #[arg(long, default_value_t = DEFAULT_SEED, conflicts_with = "input")]
    seed: u64,

    /// JSON file overriding the four feature weights.
    #[arg(long)]
    weights: Option<PathBuf>,

    /// Number of entities listed in the summary and report.
    #[arg(long, default_value_t = 5)]
    top: usize,
}

#[derive(Debug, Clone, Args)]
struct SimulateArgs {
    /// Destination TSV file.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);
    if let Err(err) = run(cli.command) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), AppError> {
    match command {
        Command::Run(args) => {
            let paths = run_scoring(&args)?;
            tracing::info!(
                scores = %paths.scores.display(),
                summary = %paths.summary.display(),
                report = %paths.report.display(),
                markers = ?paths.markers,
                "run complete"
            );
            Ok(())
        }
        Command::Simulate(args) => run_simulate(&args),
    }
}

fn run_scoring(args: &RunArgs) -> Result<ReportPaths, AppError> {
    let profile = build_profile(args.weights.as_deref())?;
    let bundle = load_input(args.input.as_deref(), args.seed)?;

    let output = score_entities(&bundle.entities, &profile)?;
    tracing::info!(
        profile = %profile.name,
        n_entities = output.scored.len(),
        "scores computed"
    );

    let input = Stage4Input {
        scored: &output.scored,
        maxima: &output.maxima,
        profile: &profile,
        source: &bundle.source,
        top_n: args.top,
        tool_name: TOOL_NAME.to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };
    Ok(write_reports(&input, &args.out)?)
}

fn run_simulate(args: &SimulateArgs) -> Result<(), AppError> {
    let bundle = load_input_synthetic(args.seed);
    write_table(&bundle.entities, &args.out).map_err(|source| AppError::Write {
        path: args.out.clone(),
        source,
    })?;
    tracing::info!(path = %args.out.display(), "synthetic table written");
    Ok(())
}

fn build_profile(weights: Option<&Path>) -> Result<ScoringProfile, ConfigError> {
    let profile = ScoringProfile::selling_v1();
    match weights {
        Some(path) => profile.with_weights_file(path),
        None => Ok(profile),
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
