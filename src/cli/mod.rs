//! Command-line parsing for the universal waveform synthesizer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the synthesis code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{Parity, PlotKind};
use crate::models::DEFAULT_POLYNOMIAL_DIR;

pub mod prompt;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "uwave", version, about = "Universal gravitational waveform mode synthesizer")]
pub struct Cli {
    /// Enable debug logging (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Synthesize one mode, print a summary, and optionally plot/export.
    Synth(SynthArgs),
    /// Synthesize the same mode for several mass ratios in parallel.
    Sweep(SweepArgs),
    /// Plot a previously exported waveform JSON.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same synthesis pipeline as `uwave synth`, but renders the
    /// waveform in a terminal UI using Ratatui.
    Tui(SynthArgs),
}

/// Mode selection and model location, shared by every synthesizing command.
#[derive(Debug, Args, Clone)]
pub struct ModeArgs {
    /// Mode parity (e or o).
    #[arg(short = 'p', long, value_enum, default_value_t = Parity::Even)]
    pub parity: Parity,

    /// Multipolar index l.
    #[arg(short = 'l', long, default_value_t = 2.0)]
    pub l: f64,

    /// Multipolar index m (scales the adiabatic phase).
    #[arg(short = 'm', long, default_value_t = 2.0)]
    pub m: f64,

    /// Retarded-time grid as `start,end,step` (end exclusive).
    #[arg(short = 't', long, value_name = "START,END,STEP", allow_hyphen_values = true)]
    pub time: Option<String>,

    /// Directory holding the four polynomial model files.
    #[arg(long, env = "UWAVE_POLYNOMIAL_DIR", default_value = DEFAULT_POLYNOMIAL_DIR)]
    pub polynomial_dir: PathBuf,
}

/// Options for synthesizing a single mode.
#[derive(Debug, Args, Clone)]
pub struct SynthArgs {
    /// Symmetric mass ratio, 0 < nu < 0.25 (prompted for when absent).
    #[arg(short = 'n', long)]
    pub nu: Option<f64>,

    #[command(flatten)]
    pub mode: ModeArgs,

    /// Which series to plot in the terminal.
    #[arg(long, value_enum, default_value_t = PlotKind::Waveform)]
    pub plot: PlotKind,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export per-sample results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the waveform (parameters + arrays) to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

/// Options for a mass-ratio sweep.
#[derive(Debug, Args, Clone)]
pub struct SweepArgs {
    /// Mass ratios to synthesize (repeat the flag or separate with commas).
    #[arg(short = 'n', long, required = true, value_delimiter = ',')]
    pub nu: Vec<f64>,

    #[command(flatten)]
    pub mode: ModeArgs,
}

/// Options for plotting a saved waveform.
#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Waveform JSON file produced by `uwave synth --export-json`.
    #[arg(long, value_name = "JSON")]
    pub waveform: PathBuf,

    /// Which series to plot.
    #[arg(long, value_enum, default_value_t = PlotKind::All)]
    pub series: PlotKind,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn synth_flags_parse() {
        let cli = Cli::try_parse_from([
            "uwave", "synth", "--nu", "0.01", "--parity", "o", "-m", "3", "--time", "-500,100,0.5",
            "--plot", "all",
        ])
        .unwrap();
        let Command::Synth(args) = cli.command else {
            panic!("expected synth");
        };
        assert_eq!(args.nu, Some(0.01));
        assert_eq!(args.mode.parity, Parity::Odd);
        assert_eq!(args.mode.m, 3.0);
        assert_eq!(args.mode.time.as_deref(), Some("-500,100,0.5"));
        assert_eq!(args.plot, PlotKind::All);
    }

    #[test]
    fn sweep_accepts_comma_separated_and_repeated_nu() {
        let cli = Cli::try_parse_from(["uwave", "sweep", "--nu", "0.01,0.1", "--nu", "0.2"]).unwrap();
        let Command::Sweep(args) = cli.command else {
            panic!("expected sweep");
        };
        assert_eq!(args.nu, vec![0.01, 0.1, 0.2]);
    }
}
