use crate::cli::SimulateArgs;
use crate::config;
use crate::error::{CliError, Result};
use crate::progress::CliProgressHandler;
use solvate::core::models::device::DeviceIndex;
use solvate::device::nvml::NvmlProbe;
use solvate::device::selection::DeviceSelection;
use solvate::engine::dryrun::DryRunEngine;
use solvate::engine::progress::ProgressReporter;
use solvate::engine::traits::MdEngine;
use solvate::workflows::simulate as workflow;
use tracing::info;

pub fn run(args: &SimulateArgs) -> Result<()> {
    let device = resolve_device(args)?;
    info!(device = %device, "Running simulation on device {}.", device);

    let config = config::build_simulation_config(args, device)?;
    let mut engine = make_engine(args)?;

    let mut reporters = workflow::build_reporter_stack(&config.reporting)?;
    let progress_handler = CliProgressHandler::new();
    let progress = ProgressReporter::with_callback(progress_handler.get_callback());

    let summary = workflow::run(engine.as_mut(), &config, &mut reporters, &progress)?;

    println!(
        "Simulation finished at step {} ({} NVT + {} NPT).",
        summary.final_step, summary.nvt_steps, summary.npt_steps
    );
    Ok(())
}

fn resolve_device(args: &SimulateArgs) -> Result<DeviceIndex> {
    let selection = if args.auto_device {
        if !(args.idle_threshold > 0.0 && args.idle_threshold <= 1.0) {
            return Err(CliError::Argument(format!(
                "--idle-threshold must be in (0, 1], got {}",
                args.idle_threshold
            )));
        }
        DeviceSelection::FirstIdle {
            threshold: args.idle_threshold,
        }
    } else {
        DeviceSelection::Fixed(DeviceIndex::new(args.device.unwrap_or(0)))
    };

    let probe = NvmlProbe::new();
    selection.resolve(&probe)?.ok_or_else(|| {
        CliError::Argument(
            "no idle GPU found; pass --device to pin one explicitly".to_string(),
        )
    })
}

fn make_engine(args: &SimulateArgs) -> Result<Box<dyn MdEngine>> {
    if args.dry_run {
        info!("Using the dry-run engine backend (no physics).");
        return Ok(Box::new(DryRunEngine::new()));
    }
    // Physics backends are linked out of tree; this build carries only the
    // dry-run backend.
    Err(CliError::Argument(
        "no physics engine backend is linked into this build; pass --dry-run to validate the pipeline".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn simulate_args(argv: &[&str]) -> SimulateArgs {
        let mut full = vec!["solvate", "simulate"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::Simulate(args) => args,
            _ => panic!("expected simulate command"),
        }
    }

    #[test]
    fn fixed_device_defaults_to_zero() {
        let device = resolve_device(&simulate_args(&[])).unwrap();
        assert_eq!(device, DeviceIndex::new(0));
    }

    #[test]
    fn fixed_device_uses_the_given_index() {
        let device = resolve_device(&simulate_args(&["--device", "1"])).unwrap();
        assert_eq!(device, DeviceIndex::new(1));
    }

    #[test]
    fn out_of_range_idle_threshold_is_rejected() {
        let err =
            resolve_device(&simulate_args(&["--auto-device", "--idle-threshold", "1.5"]))
                .unwrap_err();
        assert!(matches!(err, CliError::Argument(_)));
    }

    #[test]
    fn without_dry_run_no_backend_is_available() {
        let err = make_engine(&simulate_args(&[])).err().unwrap();
        assert!(matches!(err, CliError::Argument(_)));
    }
}
