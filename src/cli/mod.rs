//! Command-line parsing for the age-model LSR tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the numerical code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "lsr",
    version,
    about = "Polynomial age-model fits and linear sedimentation rates"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a tiepoint file and report raw/smoothed sedimentation rates.
    ///
    /// `lsr <INPUT> <DEGREE>` is shorthand for `lsr run <INPUT> <DEGREE>`.
    Run(RunArgs),
    /// Plot a previously exported run JSON.
    Plot(PlotArgs),
    /// Generate a synthetic, sorted tiepoint file.
    Synth(SynthArgs),
}

/// Options for a pipeline run.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Tiepoint file: one `depth,age` pair per line, no header.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Polynomial degree of the age model fit (0-9).
    #[arg(value_name = "DEGREE", allow_negative_numbers = true)]
    pub degree: i64,

    /// Compute non-finite rates for zero age steps instead of failing.
    #[arg(long)]
    pub allow_degenerate: bool,

    /// Render ASCII plots in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plots.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, env = "LSR_PLOT_WIDTH", default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, env = "LSR_PLOT_HEIGHT", default_value_t = 20)]
    pub height: usize,

    /// Write the two-panel report as SVG.
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,

    /// Export per-interval rates to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the full run (tiepoints, fit, rates, step curves) to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,

    /// Write a markdown debug bundle under `debug/`.
    #[arg(long)]
    pub debug_bundle: bool,
}

/// Options for plotting a saved run.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Run JSON file produced by `lsr run --export-json`.
    #[arg(long, value_name = "JSON")]
    pub run: PathBuf,

    /// Plot width (columns).
    #[arg(long, env = "LSR_PLOT_WIDTH", default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, env = "LSR_PLOT_HEIGHT", default_value_t = 20)]
    pub height: usize,
}

/// Options for synthetic tiepoint generation.
#[derive(Debug, Parser)]
pub struct SynthArgs {
    /// Number of tiepoints.
    #[arg(short = 'n', long, default_value_t = 30)]
    pub count: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Age of the first tiepoint (Ma).
    #[arg(long, default_value_t = 0.0)]
    pub age_start: f64,

    /// Mean age step between tiepoints (Ma).
    #[arg(long, default_value_t = 0.1)]
    pub age_step: f64,

    /// Baseline sedimentation rate (cm/kyr).
    #[arg(long, default_value_t = 2.0)]
    pub rate: f64,

    /// Relative rate noise (standard deviation as a fraction of `rate`).
    #[arg(long, default_value_t = 0.25)]
    pub noise: f64,

    /// Probability that an interval is a hiatus (zero rate).
    #[arg(long, default_value_t = 0.05)]
    pub hiatus_prob: f64,

    /// Output file (stdout when omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_takes_two_positionals() {
        let cli = Cli::try_parse_from(["lsr", "run", "core.csv", "3", "--no-plot"]).unwrap();
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.input, PathBuf::from("core.csv"));
                assert_eq!(args.degree, 3);
                assert!(args.no_plot);
                assert!(!args.allow_degenerate);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn degree_must_be_an_integer() {
        assert!(Cli::try_parse_from(["lsr", "run", "core.csv", "two"]).is_err());
        assert!(Cli::try_parse_from(["lsr", "run", "core.csv", "1.5"]).is_err());

        // Range checks happen later, so a negative degree still parses.
        let cli = Cli::try_parse_from(["lsr", "run", "core.csv", "-1"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.degree, -1);
    }

    #[test]
    fn synth_defaults() {
        let cli = Cli::try_parse_from(["lsr", "synth"]).unwrap();
        match cli.command {
            Command::Synth(args) => {
                assert_eq!(args.count, 30);
                assert_eq!(args.seed, 42);
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
