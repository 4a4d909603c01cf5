use clap::{Args, Parser, Subcommand};
use solvate::device::probe::DEFAULT_IDLE_THRESHOLD;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "SOLVATE CLI - A command-line interface for launching and driving protein-in-solvent molecular dynamics runs across GPU devices.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch one independent simulation process per GPU device.
    Run(RunArgs),
    /// Drive the full simulation pipeline for a single device in this process.
    Simulate(SimulateArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Device indices to launch on, one process per index (comma-separated).
    #[arg(
        short,
        long,
        value_delimiter = ',',
        value_name = "INDEX",
        default_values_t = vec![0u32, 1u32]
    )]
    pub devices: Vec<u32>,

    /// Seconds to wait between consecutive process launches.
    #[arg(long, value_name = "SECONDS", default_value_t = 3)]
    pub stagger_secs: u64,

    /// Path to the run configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Forward --dry-run to every launched simulation process.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `simulate` subcommand.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Device index this run is bound to. Defaults to 0.
    #[arg(short, long, value_name = "INDEX")]
    pub device: Option<u32>,

    /// Probe GPU memory usage and bind the first idle device instead of a
    /// fixed index.
    #[arg(long, conflicts_with = "device")]
    pub auto_device: bool,

    /// Fraction of total device memory below which a device counts as idle
    /// (used with --auto-device).
    #[arg(long, value_name = "FLOAT", default_value_t = DEFAULT_IDLE_THRESHOLD)]
    pub idle_threshold: f64,

    /// Path to the run configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to the input structure file, overriding the config file.
    #[arg(short, long, value_name = "PATH")]
    pub structure: Option<PathBuf>,

    /// Validate the pipeline with the built-in dry-run engine backend
    /// instead of a physics backend.
    #[arg(long)]
    pub dry_run: bool,
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
    fn run_defaults_to_devices_zero_and_one() {
        let cli = Cli::parse_from(["solvate", "run"]);
        let Commands::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.devices, vec![0, 1]);
        assert_eq!(args.stagger_secs, 3);
    }

    #[test]
    fn run_parses_comma_separated_devices() {
        let cli = Cli::parse_from(["solvate", "run", "--devices", "2,3,5"]);
        let Commands::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.devices, vec![2, 3, 5]);
    }

    #[test]
    fn simulate_rejects_device_with_auto_device() {
        let result =
            Cli::try_parse_from(["solvate", "simulate", "--device", "1", "--auto-device"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_are_accepted_after_the_subcommand() {
        let cli = Cli::parse_from(["solvate", "simulate", "--device", "1", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }
}
