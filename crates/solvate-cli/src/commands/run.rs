use crate::cli::RunArgs;
use crate::error::Result;
use solvate::core::models::device::DeviceIndex;
use solvate::launch::{launch, CommandTemplate, LaunchPlan, SystemSpawner};
use std::time::Duration;
use tracing::info;

/// Launches one `solvate simulate` process per requested device index.
///
/// Fire and forget: children are never waited on, inspected, or restarted. A
/// crashed run surfaces only through its own output; siblings keep going.
pub fn run(args: &RunArgs, verbose: u8, quiet: bool) -> Result<()> {
    let program = std::env::current_exe()?;

    let mut template = CommandTemplate::new(program);
    for _ in 0..verbose {
        template = template.arg("-v");
    }
    if quiet {
        template = template.arg("--quiet");
    }
    template = template.arg("simulate");
    if let Some(config) = &args.config {
        template = template.arg("--config").arg(config.as_os_str());
    }
    if args.dry_run {
        template = template.arg("--dry-run");
    }
    // The launcher appends each device index after this flag.
    template = template.arg("--device");

    let plan = LaunchPlan {
        devices: args.devices.iter().map(|&i| DeviceIndex::new(i)).collect(),
        stagger: Duration::from_secs(args.stagger_secs),
        template,
    };

    println!(
        "Launching {} simulation process(es) on device(s) {:?}...",
        plan.devices.len(),
        args.devices
    );
    info!(
        devices = ?args.devices,
        stagger_secs = args.stagger_secs,
        "Starting per-device simulation processes."
    );

    launch(&plan, &mut SystemSpawner)?;

    println!("All processes launched. Runs proceed independently; check their logs for progress.");
    Ok(())
}
