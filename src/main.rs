mod input;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use planar_truss::Structure;

use input::load_problem;
use report::{render_report, render_summary};

/// Output encoding for the results file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Plain-text report.
    Text,
    /// JSON result arrays.
    Json,
}

/// Linear static analysis of a planar pin-jointed truss.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON problem definition.
    input: PathBuf,

    /// Where to write the results.
    #[arg(short, long, default_value = "results.txt")]
    output: PathBuf,

    /// Results encoding.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Overrides the singular-pivot tolerance from the input file.
    #[arg(long)]
    pivot_tolerance: Option<f64>,

    /// Overrides the degenerate-length tolerance from the input file.
    #[arg(long)]
    length_tolerance: Option<f64>,

    /// Log every pipeline stage.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut problem = load_problem(&args.input)?;
    if let Some(tolerance) = args.pivot_tolerance {
        problem.settings = problem.settings.with_pivot_tolerance(tolerance);
    }
    if let Some(tolerance) = args.length_tolerance {
        problem.settings = problem.settings.with_length_tolerance(tolerance);
    }

    let structure = Structure::analyze(&problem)
        .with_context(|| format!("analysis of {} failed", args.input.display()))?;

    let contents = match args.format {
        Format::Text => render_report(&structure),
        Format::Json => serde_json::to_string_pretty(structure.results())?,
    };
    std::fs::write(&args.output, contents)
        .with_context(|| format!("unable to write {}", args.output.display()))?;
    info!("wrote results to {}", args.output.display());

    println!("{}", render_summary(structure.results()));
    Ok(())
}
