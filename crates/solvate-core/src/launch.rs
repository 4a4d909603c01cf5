//! Fire-and-forget multi-device process launching.
//!
//! One isolated OS process is started per requested device index, with the
//! device-visibility environment variable scoping that process to exactly its
//! device, and a fixed stagger delay between consecutive starts. Children
//! share nothing with each other or with the launcher: there is no join, no
//! result collection, and no failure propagation back from a crashed run.

use crate::core::models::device::DeviceIndex;
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Environment variable scoping a child process to a single device.
pub const DEVICE_VISIBILITY_ENV: &str = "CUDA_VISIBLE_DEVICES";

/// Delay between consecutive process starts.
pub const DEFAULT_STAGGER: Duration = Duration::from_secs(3);

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Failed to spawn simulation process for device {device}: {source}")]
    Spawn {
        device: DeviceIndex,
        #[source]
        source: std::io::Error,
    },

    #[error("Device {device} requested more than once; each process must own a distinct device")]
    DuplicateDevice { device: DeviceIndex },
}

/// The command every child runs, minus its device argument.
///
/// The launcher appends the device index as the final argument, so the
/// template's trailing argument is typically the flag that receives it.
#[derive(Debug, Clone)]
pub struct CommandTemplate {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl CommandTemplate {
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub devices: Vec<DeviceIndex>,
    pub stagger: Duration,
    pub template: CommandTemplate,
}

impl LaunchPlan {
    fn request_for(&self, device: DeviceIndex) -> LaunchRequest {
        let mut args = self.template.args.clone();
        args.push(OsString::from(device.to_string()));
        LaunchRequest {
            program: self.template.program.clone(),
            args,
            device,
            visibility: (DEVICE_VISIBILITY_ENV.to_string(), device.to_string()),
        }
    }
}

/// Everything a spawner needs to start one child process.
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub device: DeviceIndex,
    /// Environment variable (name, value) carrying device visibility.
    pub visibility: (String, String),
}

/// Starts child processes. The seam exists so launch scheduling can be
/// observed without creating real processes.
pub trait ProcessSpawner {
    fn spawn(&mut self, request: &LaunchRequest) -> Result<(), LaunchError>;
}

/// Spawns real OS processes and immediately drops the handles.
pub struct SystemSpawner;

impl ProcessSpawner for SystemSpawner {
    fn spawn(&mut self, request: &LaunchRequest) -> Result<(), LaunchError> {
        Command::new(&request.program)
            .args(&request.args)
            .env(&request.visibility.0, &request.visibility.1)
            .stdin(Stdio::null())
            .spawn()
            .map(drop)
            .map_err(|e| LaunchError::Spawn {
                device: request.device,
                source: e,
            })
    }
}

/// Launches one process per device index, in the given order, sleeping the
/// plan's stagger delay after each start.
///
/// Spawn failures abort the launch sequence; already-started children are
/// left running and are never inspected, restarted, or waited on.
pub fn launch(plan: &LaunchPlan, spawner: &mut dyn ProcessSpawner) -> Result<(), LaunchError> {
    let mut seen = HashSet::new();
    for &device in &plan.devices {
        if !seen.insert(device) {
            return Err(LaunchError::DuplicateDevice { device });
        }
    }

    for &device in &plan.devices {
        info!(device = %device, "Launching simulation process.");
        spawner.spawn(&plan.request_for(device))?;
        std::thread::sleep(plan.stagger);
    }
    Ok(())
}
