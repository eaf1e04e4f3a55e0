//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and sets up logging
//! - parses CLI arguments
//! - runs the tiepoint pipeline
//! - hands the result to the requested presenters
//! - generates synthetic tiepoint files

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, PlotArgs, RunArgs, SynthArgs};
use crate::debug::DebugPresenter;
use crate::domain::{IntervalPolicy, RunConfig, SynthConfig};
use crate::error::{AppError, PipelineError};
use crate::fit::check_degree;
use crate::io::{CsvExportPresenter, JsonExportPresenter};
use crate::plot::{AsciiPresenter, SvgPresenter};
use crate::report::{Presenter, SummaryPresenter};

pub mod pipeline;

const DEBUG_DIR: &str = "debug";

/// Entry point for the `lsr` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    // `lsr core.csv 3` should behave like `lsr run core.csv 3`. Clap requires a
    // subcommand name, so argv is rewritten before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Run(args) => handle_run(&run_config_from_args(&args)?),
        Command::Plot(args) => handle_plot(args),
        Command::Synth(args) => handle_synth(&synth_config_from_args(&args)),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_run(config: &RunConfig) -> Result<(), AppError> {
    debug!(?config, "starting run");
    let output = pipeline::run_pipeline(&config.input, config.degree, config.interval_policy)
        .map_err(|e| match e {
            PipelineError::SortOrder { .. } => {
                debug!(error = %e, "sort check failed");
                println!("{}", sort_order_message(&config.input));
                AppError::reported(e.exit_code())
            }
            other => AppError::from(other),
        })?;

    for presenter in presenters(config) {
        presenter.present(&output)?;
    }
    Ok(())
}

/// Message shown on stdout when a tiepoint column is out of order.
pub fn sort_order_message(input: &Path) -> String {
    format!(
        "The data is not properly sorted; inspect the {} file and try again.",
        input.display()
    )
}

/// Presenters requested by `config`, in output order.
pub fn presenters(config: &RunConfig) -> Vec<Box<dyn Presenter>> {
    let mut out: Vec<Box<dyn Presenter>> = vec![Box::new(SummaryPresenter)];

    if config.plot {
        out.push(Box::new(AsciiPresenter {
            width: config.plot_width,
            height: config.plot_height,
        }));
    }
    if let Some(path) = &config.svg {
        out.push(Box::new(SvgPresenter { path: path.clone() }));
    }
    if let Some(path) = &config.export_csv {
        out.push(Box::new(CsvExportPresenter { path: path.clone() }));
    }
    if let Some(path) = &config.export_json {
        out.push(Box::new(JsonExportPresenter { path: path.clone() }));
    }
    if config.debug_bundle {
        out.push(Box::new(DebugPresenter {
            dir: DEBUG_DIR.into(),
        }));
    }

    out
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let output = crate::io::read_output_json(&args.run)?;
    AsciiPresenter {
        width: args.width,
        height: args.height,
    }
    .present(&output)
}

fn handle_synth(config: &SynthConfig) -> Result<(), AppError> {
    let model = crate::data::generate_tiepoints(config)?;

    match &config.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                AppError::new(2, format!("Failed to create '{}': {e}", path.display()))
            })?;
            let mut out = BufWriter::new(file);
            crate::io::write_tiepoints(&mut out, &model.tiepoints)?;
            out.flush()
                .map_err(|e| AppError::new(2, format!("Failed to write '{}': {e}", path.display())))?;
            info!(path = %path.display(), tiepoints = model.tiepoints.len(), "wrote synthetic tiepoints");
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            crate::io::write_tiepoints(&mut out, &model.tiepoints)?;
        }
    }
    Ok(())
}

pub fn run_config_from_args(args: &RunArgs) -> Result<RunConfig, AppError> {
    Ok(RunConfig {
        input: args.input.clone(),
        degree: check_degree(args.degree)?,
        interval_policy: if args.allow_degenerate {
            IntervalPolicy::Propagate
        } else {
            IntervalPolicy::Reject
        },
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        svg: args.svg.clone(),
        export_csv: args.export.clone(),
        export_json: args.export_json.clone(),
        debug_bundle: args.debug_bundle,
    })
}

pub fn synth_config_from_args(args: &SynthArgs) -> SynthConfig {
    SynthConfig {
        count: args.count,
        seed: args.seed,
        age_start: args.age_start,
        age_step: args.age_step,
        rate: args.rate,
        noise: args.noise,
        hiatus_prob: args.hiatus_prob,
        output: args.output.clone(),
    }
}

/// Rewrite argv so a bare `lsr <INPUT> <DEGREE>` means `lsr run <INPUT> <DEGREE>`.
///
/// Rules:
/// - `lsr`                      -> unchanged (clap prints usage)
/// - `lsr --help/--version/-h`  -> unchanged (top-level help/version)
/// - `lsr run|plot|synth ...`   -> unchanged
/// - anything else              -> `lsr run ...`
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1) else {
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    let is_subcommand = matches!(arg1.as_str(), "run" | "plot" | "synth");
    if is_top_level_help_or_version || is_subcommand {
        return argv;
    }

    argv.insert(1, "run".to_string());
    argv
}
