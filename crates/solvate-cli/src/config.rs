use crate::cli::SimulateArgs;
use crate::error::{CliError, Result};
use serde::Deserialize;
use solvate::core::models::device::DeviceIndex;
use solvate::engine::config::{
    ConstraintClass, NonbondedMethod, Precision, SimulationConfig, SimulationConfigBuilder,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A partially-specified run configuration as read from a TOML file.
///
/// Every field is optional; anything absent falls back to the policy
/// defaults, and CLI flags override anything present here.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub structure: Option<PathBuf>,
    pub forcefield: Option<Vec<String>>,
    #[serde(default)]
    pub solvent: SolventSection,
    #[serde(default)]
    pub system: SystemSection,
    #[serde(default)]
    pub integrator: IntegratorSection,
    #[serde(default)]
    pub barostat: BarostatSection,
    #[serde(default)]
    pub phases: PhasesSection,
    #[serde(default)]
    pub platform: PlatformSection,
    #[serde(default)]
    pub reporting: ReportingSection,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct SolventSection {
    pub padding_nm: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct SystemSection {
    pub nonbonded_method: Option<NonbondedMethod>,
    pub cutoff_nm: Option<f64>,
    pub constraints: Option<ConstraintClass>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct IntegratorSection {
    pub temperature_k: Option<f64>,
    pub friction_per_ps: Option<f64>,
    pub step_size_ps: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct BarostatSection {
    pub pressure_bar: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PhasesSection {
    pub nvt_steps: Option<u64>,
    pub npt_steps: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PlatformSection {
    pub name: Option<String>,
    pub precision: Option<Precision>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ReportingSection {
    pub console_interval: Option<u64>,
    pub trajectory_interval: Option<u64>,
    pub trajectory_path: Option<PathBuf>,
    pub state_log_interval: Option<u64>,
    pub state_log_path: Option<PathBuf>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Reading configuration file.");
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn apply(self, mut builder: SimulationConfigBuilder) -> SimulationConfigBuilder {
        if let Some(v) = self.structure {
            builder = builder.structure_path(v);
        }
        if let Some(v) = self.forcefield {
            builder = builder.forcefield_resources(v);
        }
        if let Some(v) = self.solvent.padding_nm {
            builder = builder.solvent_padding_nm(v);
        }
        if let Some(v) = self.system.nonbonded_method {
            builder = builder.nonbonded_method(v);
        }
        if let Some(v) = self.system.cutoff_nm {
            builder = builder.nonbonded_cutoff_nm(v);
        }
        if let Some(v) = self.system.constraints {
            builder = builder.constraints(v);
        }
        if let Some(v) = self.integrator.temperature_k {
            builder = builder.temperature_k(v);
        }
        if let Some(v) = self.integrator.friction_per_ps {
            builder = builder.friction_per_ps(v);
        }
        if let Some(v) = self.integrator.step_size_ps {
            builder = builder.step_size_ps(v);
        }
        if let Some(v) = self.barostat.pressure_bar {
            builder = builder.pressure_bar(v);
        }
        if let Some(v) = self.phases.nvt_steps {
            builder = builder.nvt_steps(v);
        }
        if let Some(v) = self.phases.npt_steps {
            builder = builder.npt_steps(v);
        }
        if let Some(v) = self.platform.name {
            builder = builder.platform_name(v);
        }
        if let Some(v) = self.platform.precision {
            builder = builder.precision(v);
        }
        if let Some(v) = self.reporting.console_interval {
            builder = builder.console_interval(v);
        }
        if let Some(v) = self.reporting.trajectory_interval {
            builder = builder.trajectory_interval(v);
        }
        if let Some(v) = self.reporting.trajectory_path {
            builder = builder.trajectory_path(v);
        }
        if let Some(v) = self.reporting.state_log_interval {
            builder = builder.state_log_interval(v);
        }
        if let Some(v) = self.reporting.state_log_path {
            builder = builder.state_log_path(v);
        }
        builder
    }
}

/// Builds the final run configuration: policy defaults, overlaid by the
/// config file (if given), overlaid by CLI flags, with the resolved device.
pub fn build_simulation_config(
    args: &SimulateArgs,
    device: DeviceIndex,
) -> Result<SimulationConfig> {
    let mut builder = SimulationConfigBuilder::new();
    if let Some(path) = &args.config {
        builder = FileConfig::from_file(path)?.apply(builder);
    }
    if let Some(structure) = &args.structure {
        builder = builder.structure_path(structure.clone());
    }
    builder = builder.device(device);
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn simulate_args(argv: &[&str]) -> SimulateArgs {
        let mut full = vec!["solvate", "simulate"];
        full.extend_from_slice(argv);
        let cli = Cli::parse_from(full);
        match cli.command {
            Commands::Simulate(args) => args,
            _ => panic!("expected simulate command"),
        }
    }

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_apply_without_a_config_file() {
        let args = simulate_args(&["--device", "1"]);
        let config = build_simulation_config(&args, DeviceIndex::new(1)).unwrap();
        assert_eq!(config.structure_path, PathBuf::from("1AKI.pdb"));
        assert_eq!(config.integrator.temperature_k, 300.0);
        assert_eq!(config.platform.device, DeviceIndex::new(1));
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_config(
            r#"
structure = "villin.pdb"

[integrator]
temperature-k = 310.0

[phases]
nvt-steps = 50000

[reporting]
state-log-path = "run.csv"
"#,
        );
        let args = simulate_args(&["--config", file.path().to_str().unwrap()]);
        let config = build_simulation_config(&args, DeviceIndex::new(0)).unwrap();
        assert_eq!(config.structure_path, PathBuf::from("villin.pdb"));
        assert_eq!(config.integrator.temperature_k, 310.0);
        assert_eq!(config.nvt_steps, 50_000);
        assert_eq!(config.npt_steps, 1_000_000);
        assert_eq!(config.reporting.state_log_path, PathBuf::from("run.csv"));
    }

    #[test]
    fn cli_flags_override_file_values() {
        let file = write_config("structure = \"from-file.pdb\"\n");
        let args = simulate_args(&[
            "--config",
            file.path().to_str().unwrap(),
            "--structure",
            "from-cli.pdb",
        ]);
        let config = build_simulation_config(&args, DeviceIndex::new(0)).unwrap();
        assert_eq!(config.structure_path, PathBuf::from("from-cli.pdb"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_config("structure = \"x.pdb\"\nnot-a-key = 1\n");
        let args = simulate_args(&["--config", file.path().to_str().unwrap()]);
        let err = build_simulation_config(&args, DeviceIndex::new(0)).unwrap_err();
        assert!(matches!(err, CliError::FileParsing { .. }));
    }

    #[test]
    fn invalid_values_surface_as_config_errors() {
        let file = write_config("[reporting]\nconsole-interval = 0\n");
        let args = simulate_args(&["--config", file.path().to_str().unwrap()]);
        let err = build_simulation_config(&args, DeviceIndex::new(0)).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
