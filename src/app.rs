//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs logging
//! - prompts for missing inputs
//! - runs synthesis (single mode or sweep)
//! - prints reports/plots and writes optional exports

use std::io::{self, BufRead, IsTerminal, Write};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::prompt::{parse_time_range, prompt_for_nu, resolve_time_range};
use crate::cli::{Command, PlotArgs, SweepArgs, SynthArgs};
use crate::domain::{DEFAULT_TIME_RANGE, PhysicalParameters, SynthesisConfig, TimeRange};
use crate::error::AppError;
use crate::models::DirectoryProvider;

pub mod pipeline;

/// Entry point for the `uwave` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // We want `uwave` and `uwave --nu 0.1` to behave like `uwave tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    // A stderr subscriber would draw over the alternate screen.
    if !matches!(cli.command, Command::Tui(_)) {
        init_logging(cli.verbose);
    }

    match cli.command {
        Command::Synth(args) => handle_synth(args),
        Command::Sweep(args) => handle_sweep(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => handle_tui(args),
    }
}

/// Install the stderr `tracing` subscriber (`RUST_LOG` wins over `--verbose`).
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn handle_synth(args: SynthArgs) -> Result<(), AppError> {
    let interactive = io::stdin().is_terminal();
    let config = config_from_args(&args, interactive, &mut io::stdin().lock(), &mut io::stdout())?;
    let run = pipeline::run_synthesis(&config)?;

    println!("{}", crate::report::format_summary(&run.result, Some(run.elapsed)));

    for &series in config.plot.series() {
        let plot = crate::plot::render_waveform_plot(&run.result, series, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export_csv {
        crate::io::write_waveform_csv(path, &run.result)?;
        info!("wrote CSV export to {}", path.display());
    }
    if let Some(path) = &config.export_json {
        crate::io::write_waveform_json(path, &run.result)?;
        info!("wrote waveform JSON to {}", path.display());
    }

    Ok(())
}

fn handle_sweep(args: SweepArgs) -> Result<(), AppError> {
    let time_range = match args.mode.time.as_deref() {
        Some(raw) => parse_time_range(raw).map_err(|msg| AppError::new(2, format!("Invalid --time: {msg}")))?,
        None => DEFAULT_TIME_RANGE,
    };
    let params: Vec<PhysicalParameters> = args
        .nu
        .iter()
        .map(|&nu| PhysicalParameters {
            nu,
            parity: args.mode.parity,
            l: args.mode.l,
            m: args.mode.m,
        })
        .collect();

    let provider = DirectoryProvider::new(&args.mode.polynomial_dir);
    provider.preload()?;
    let rows = pipeline::run_sweep(&params, time_range, &provider)?;

    let failed = rows.iter().filter(|(_, r)| r.is_err()).count();
    info!(requests = rows.len(), failed, "sweep finished");

    println!("{}", crate::report::format_sweep_table(&rows));
    Ok(())
}

fn handle_tui(args: SynthArgs) -> Result<(), AppError> {
    crate::tui::run(args)
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let file = crate::io::read_waveform_json(&args.waveform)?;

    println!("{}", crate::plot::plot_title(&file.parameters));
    for &series in args.series.series() {
        let plot = crate::plot::render_file_plot(&file, series, args.width, args.height);
        println!("{plot}");
    }
    Ok(())
}

/// Turn synth flags into a config, prompting for what is missing.
///
/// Without a terminal, an absent `--time` selects the default grid instead of prompting.
pub fn config_from_args<R: BufRead, W: Write>(
    args: &SynthArgs,
    interactive: bool,
    input: &mut R,
    output: &mut W,
) -> Result<SynthesisConfig, AppError> {
    let nu = match args.nu {
        Some(nu) => nu,
        None => prompt_for_nu(input, output)?,
    };

    let time_range = match args.mode.time.as_deref() {
        None if !interactive => DEFAULT_TIME_RANGE,
        flag => resolve_time_range(flag, input, output)?,
    };

    Ok(synthesis_config(args, nu, time_range))
}

/// Build a config from flags with `nu` and the grid already resolved.
pub fn synthesis_config(args: &SynthArgs, nu: f64, time_range: TimeRange) -> SynthesisConfig {
    SynthesisConfig {
        parameters: PhysicalParameters {
            nu,
            parity: args.mode.parity,
            l: args.mode.l,
            m: args.mode.m,
        },
        time_range,
        polynomial_dir: args.mode.polynomial_dir.clone(),
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        export_csv: args.export.clone(),
        export_json: args.export_json.clone(),
    }
}

/// Rewrite argv so `uwave` defaults to `uwave tui`.
///
/// Rules:
/// - `uwave`                      -> `uwave tui`
/// - `uwave --nu 0.1 ...`         -> `uwave tui --nu 0.1 ...`
/// - `uwave --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "synth" | "sweep" | "plot" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::cli::Cli;
    use crate::domain::Parity;

    fn args(argv: &[&str]) -> Vec<String> {
        argv.iter().map(|s| s.to_string()).collect()
    }

    fn synth_args(argv: &[&str]) -> SynthArgs {
        match Cli::try_parse_from(argv.iter().copied()).unwrap().command {
            Command::Synth(a) => a,
            other => panic!("expected synth, got {other:?}"),
        }
    }

    #[test]
    fn bare_invocation_and_flags_default_to_tui() {
        assert_eq!(rewrite_args(args(&["uwave"])), args(&["uwave", "tui"]));
        assert_eq!(
            rewrite_args(args(&["uwave", "--nu", "0.1"])),
            args(&["uwave", "tui", "--nu", "0.1"])
        );
        assert_eq!(rewrite_args(args(&["uwave", "--help"])), args(&["uwave", "--help"]));
        assert_eq!(
            rewrite_args(args(&["uwave", "synth", "--nu", "0.1"])),
            args(&["uwave", "synth", "--nu", "0.1"])
        );
    }

    #[test]
    fn flags_become_config_without_prompting() {
        let a = synth_args(&[
            "uwave", "synth", "--nu", "0.05", "-p", "o", "--time", "-100,100,1", "--export", "out.csv",
        ]);
        let mut input = Cursor::new("");
        let cfg = config_from_args(&a, true, &mut input, &mut Vec::new()).unwrap();

        assert_eq!(cfg.parameters.nu, 0.05);
        assert_eq!(cfg.parameters.parity, Parity::Odd);
        assert_eq!(cfg.time_range, TimeRange { start: -100.0, end: 100.0, step: 1.0 });
        assert_eq!(cfg.export_csv.as_deref(), Some(std::path::Path::new("out.csv")));
    }

    #[test]
    fn missing_values_are_prompted_for() {
        let a = synth_args(&["uwave", "synth"]);
        let mut input = Cursor::new("0.5\n0.02\n\n");
        let mut output = Vec::new();
        let cfg = config_from_args(&a, true, &mut input, &mut output).unwrap();

        assert_eq!(cfg.parameters.nu, 0.02);
        assert_eq!(cfg.time_range, DEFAULT_TIME_RANGE);
        assert!(String::from_utf8(output).unwrap().contains("too large"));
    }

    #[test]
    fn non_interactive_runs_use_default_grid() {
        let a = synth_args(&["uwave", "synth", "--nu", "0.1"]);
        let mut input = Cursor::new("");
        let cfg = config_from_args(&a, false, &mut input, &mut Vec::new()).unwrap();
        assert_eq!(cfg.time_range, DEFAULT_TIME_RANGE);
    }
}
