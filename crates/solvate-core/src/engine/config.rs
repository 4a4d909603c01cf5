use crate::core::models::device::DeviceIndex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_STRUCTURE_PATH: &str = "1AKI.pdb";
pub const DEFAULT_FORCEFIELD_RESOURCES: [&str; 2] = ["amber14-all.xml", "amber14/tip3pfb.xml"];
pub const DEFAULT_SOLVENT_PADDING_NM: f64 = 1.0;
pub const DEFAULT_NONBONDED_CUTOFF_NM: f64 = 1.0;
pub const DEFAULT_TEMPERATURE_K: f64 = 300.0;
pub const DEFAULT_FRICTION_PER_PS: f64 = 1.0;
pub const DEFAULT_STEP_SIZE_PS: f64 = 0.004;
pub const DEFAULT_PRESSURE_BAR: f64 = 1.0;
pub const DEFAULT_NVT_STEPS: u64 = 1_000_000;
pub const DEFAULT_NPT_STEPS: u64 = 1_000_000;
pub const DEFAULT_PLATFORM_NAME: &str = "CUDA";
pub const DEFAULT_CONSOLE_INTERVAL: u64 = 10_000;
pub const DEFAULT_TRAJECTORY_INTERVAL: u64 = 10_000;
pub const DEFAULT_TRAJECTORY_PATH: &str = "output.pdb";
pub const DEFAULT_STATE_LOG_INTERVAL: u64 = 1_000;
pub const DEFAULT_STATE_LOG_PATH: &str = "md_log.txt";

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NonbondedMethod {
    Pme,
    CutoffPeriodic,
    NoCutoff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConstraintClass {
    None,
    HBonds,
    AllBonds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Precision {
    Single,
    Mixed,
    Double,
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Precision::Single => "single",
            Precision::Mixed => "mixed",
            Precision::Double => "double",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemSpec {
    pub forcefield_resources: Vec<String>,
    pub nonbonded_method: NonbondedMethod,
    pub nonbonded_cutoff_nm: f64,
    pub constraints: ConstraintClass,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegratorSpec {
    pub temperature_k: f64,
    pub friction_per_ps: f64,
    pub step_size_ps: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarostatSpec {
    pub pressure_bar: f64,
    pub temperature_k: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlatformSpec {
    pub name: String,
    pub precision: Precision,
    pub device: DeviceIndex,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportingConfig {
    pub console_interval: u64,
    pub trajectory_interval: u64,
    pub trajectory_path: PathBuf,
    pub state_log_interval: u64,
    pub state_log_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub structure_path: PathBuf,
    pub solvent_padding_nm: f64,
    pub system: SystemSpec,
    pub integrator: IntegratorSpec,
    pub barostat: BarostatSpec,
    pub platform: PlatformSpec,
    pub nvt_steps: u64,
    pub npt_steps: u64,
    pub reporting: ReportingConfig,
}

#[derive(Debug, Default)]
pub struct SimulationConfigBuilder {
    structure_path: Option<PathBuf>,
    forcefield_resources: Option<Vec<String>>,
    solvent_padding_nm: Option<f64>,
    nonbonded_method: Option<NonbondedMethod>,
    nonbonded_cutoff_nm: Option<f64>,
    constraints: Option<ConstraintClass>,
    temperature_k: Option<f64>,
    friction_per_ps: Option<f64>,
    step_size_ps: Option<f64>,
    pressure_bar: Option<f64>,
    platform_name: Option<String>,
    precision: Option<Precision>,
    device: Option<DeviceIndex>,
    nvt_steps: Option<u64>,
    npt_steps: Option<u64>,
    console_interval: Option<u64>,
    trajectory_interval: Option<u64>,
    trajectory_path: Option<PathBuf>,
    state_log_interval: Option<u64>,
    state_log_path: Option<PathBuf>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn structure_path(mut self, path: PathBuf) -> Self {
        self.structure_path = Some(path);
        self
    }
    pub fn forcefield_resources(mut self, resources: Vec<String>) -> Self {
        self.forcefield_resources = Some(resources);
        self
    }
    pub fn solvent_padding_nm(mut self, padding: f64) -> Self {
        self.solvent_padding_nm = Some(padding);
        self
    }
    pub fn nonbonded_method(mut self, method: NonbondedMethod) -> Self {
        self.nonbonded_method = Some(method);
        self
    }
    pub fn nonbonded_cutoff_nm(mut self, cutoff: f64) -> Self {
        self.nonbonded_cutoff_nm = Some(cutoff);
        self
    }
    pub fn constraints(mut self, constraints: ConstraintClass) -> Self {
        self.constraints = Some(constraints);
        self
    }
    pub fn temperature_k(mut self, temperature: f64) -> Self {
        self.temperature_k = Some(temperature);
        self
    }
    pub fn friction_per_ps(mut self, friction: f64) -> Self {
        self.friction_per_ps = Some(friction);
        self
    }
    pub fn step_size_ps(mut self, step_size: f64) -> Self {
        self.step_size_ps = Some(step_size);
        self
    }
    pub fn pressure_bar(mut self, pressure: f64) -> Self {
        self.pressure_bar = Some(pressure);
        self
    }
    pub fn platform_name(mut self, name: String) -> Self {
        self.platform_name = Some(name);
        self
    }
    pub fn precision(mut self, precision: Precision) -> Self {
        self.precision = Some(precision);
        self
    }
    pub fn device(mut self, device: DeviceIndex) -> Self {
        self.device = Some(device);
        self
    }
    pub fn nvt_steps(mut self, steps: u64) -> Self {
        self.nvt_steps = Some(steps);
        self
    }
    pub fn npt_steps(mut self, steps: u64) -> Self {
        self.npt_steps = Some(steps);
        self
    }
    pub fn console_interval(mut self, interval: u64) -> Self {
        self.console_interval = Some(interval);
        self
    }
    pub fn trajectory_interval(mut self, interval: u64) -> Self {
        self.trajectory_interval = Some(interval);
        self
    }
    pub fn trajectory_path(mut self, path: PathBuf) -> Self {
        self.trajectory_path = Some(path);
        self
    }
    pub fn state_log_interval(mut self, interval: u64) -> Self {
        self.state_log_interval = Some(interval);
        self
    }
    pub fn state_log_path(mut self, path: PathBuf) -> Self {
        self.state_log_path = Some(path);
        self
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let config = SimulationConfig {
            structure_path: self
                .structure_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STRUCTURE_PATH)),
            solvent_padding_nm: self.solvent_padding_nm.unwrap_or(DEFAULT_SOLVENT_PADDING_NM),
            system: SystemSpec {
                forcefield_resources: self.forcefield_resources.unwrap_or_else(|| {
                    DEFAULT_FORCEFIELD_RESOURCES
                        .iter()
                        .map(|s| s.to_string())
                        .collect()
                }),
                nonbonded_method: self.nonbonded_method.unwrap_or(NonbondedMethod::Pme),
                nonbonded_cutoff_nm: self
                    .nonbonded_cutoff_nm
                    .unwrap_or(DEFAULT_NONBONDED_CUTOFF_NM),
                constraints: self.constraints.unwrap_or(ConstraintClass::HBonds),
            },
            integrator: IntegratorSpec {
                temperature_k: self.temperature_k.unwrap_or(DEFAULT_TEMPERATURE_K),
                friction_per_ps: self.friction_per_ps.unwrap_or(DEFAULT_FRICTION_PER_PS),
                step_size_ps: self.step_size_ps.unwrap_or(DEFAULT_STEP_SIZE_PS),
            },
            barostat: BarostatSpec {
                pressure_bar: self.pressure_bar.unwrap_or(DEFAULT_PRESSURE_BAR),
                temperature_k: self.temperature_k.unwrap_or(DEFAULT_TEMPERATURE_K),
            },
            platform: PlatformSpec {
                name: self
                    .platform_name
                    .unwrap_or_else(|| DEFAULT_PLATFORM_NAME.to_string()),
                precision: self.precision.unwrap_or(Precision::Mixed),
                device: self.device.unwrap_or(DeviceIndex::new(0)),
            },
            nvt_steps: self.nvt_steps.unwrap_or(DEFAULT_NVT_STEPS),
            npt_steps: self.npt_steps.unwrap_or(DEFAULT_NPT_STEPS),
            reporting: ReportingConfig {
                console_interval: self.console_interval.unwrap_or(DEFAULT_CONSOLE_INTERVAL),
                trajectory_interval: self
                    .trajectory_interval
                    .unwrap_or(DEFAULT_TRAJECTORY_INTERVAL),
                trajectory_path: self
                    .trajectory_path
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_TRAJECTORY_PATH)),
                state_log_interval: self.state_log_interval.unwrap_or(DEFAULT_STATE_LOG_INTERVAL),
                state_log_path: self
                    .state_log_path
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_LOG_PATH)),
            },
        };
        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &SimulationConfig) -> Result<(), ConfigError> {
    fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
        if value > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidParameter {
                name,
                reason: format!("must be positive, got {}", value),
            })
        }
    }
    fn nonzero(name: &'static str, value: u64) -> Result<(), ConfigError> {
        if value > 0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidParameter {
                name,
                reason: "must be nonzero".to_string(),
            })
        }
    }

    if config.system.forcefield_resources.is_empty() {
        return Err(ConfigError::MissingParameter("forcefield_resources"));
    }
    positive("solvent_padding_nm", config.solvent_padding_nm)?;
    positive("nonbonded_cutoff_nm", config.system.nonbonded_cutoff_nm)?;
    positive("temperature_k", config.integrator.temperature_k)?;
    positive("friction_per_ps", config.integrator.friction_per_ps)?;
    positive("step_size_ps", config.integrator.step_size_ps)?;
    positive("pressure_bar", config.barostat.pressure_bar)?;
    nonzero("nvt_steps", config.nvt_steps)?;
    nonzero("npt_steps", config.npt_steps)?;
    nonzero("console_interval", config.reporting.console_interval)?;
    nonzero("trajectory_interval", config.reporting.trajectory_interval)?;
    nonzero("state_log_interval", config.reporting.state_log_interval)?;
    Ok(())
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            structure_path: PathBuf::from(DEFAULT_STRUCTURE_PATH),
            solvent_padding_nm: DEFAULT_SOLVENT_PADDING_NM,
            system: SystemSpec {
                forcefield_resources: DEFAULT_FORCEFIELD_RESOURCES
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                nonbonded_method: NonbondedMethod::Pme,
                nonbonded_cutoff_nm: DEFAULT_NONBONDED_CUTOFF_NM,
                constraints: ConstraintClass::HBonds,
            },
            integrator: IntegratorSpec {
                temperature_k: DEFAULT_TEMPERATURE_K,
                friction_per_ps: DEFAULT_FRICTION_PER_PS,
                step_size_ps: DEFAULT_STEP_SIZE_PS,
            },
            barostat: BarostatSpec {
                pressure_bar: DEFAULT_PRESSURE_BAR,
                temperature_k: DEFAULT_TEMPERATURE_K,
            },
            platform: PlatformSpec {
                name: DEFAULT_PLATFORM_NAME.to_string(),
                precision: Precision::Mixed,
                device: DeviceIndex::new(0),
            },
            nvt_steps: DEFAULT_NVT_STEPS,
            npt_steps: DEFAULT_NPT_STEPS,
            reporting: ReportingConfig {
                console_interval: DEFAULT_CONSOLE_INTERVAL,
                trajectory_interval: DEFAULT_TRAJECTORY_INTERVAL,
                trajectory_path: PathBuf::from(DEFAULT_TRAJECTORY_PATH),
                state_log_interval: DEFAULT_STATE_LOG_INTERVAL,
                state_log_path: PathBuf::from(DEFAULT_STATE_LOG_PATH),
            },
        }
    }
}
