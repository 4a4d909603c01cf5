//! A deterministic stand-in for a real engine backend.
//!
//! `DryRunEngine` walks the whole preparation-and-run pipeline, enforces the
//! legal call order, touches the same files a real run would, and synthesizes
//! plausible observables — without computing any physics. It exists so the
//! orchestration around the engine seam can be exercised end to end when no
//! physics backend is linked.

use super::config::{BarostatSpec, IntegratorSpec, PlatformSpec, SystemSpec};
use super::error::EngineError;
use super::traits::MdEngine;
use crate::core::models::observables::StateSample;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::debug;

const UNMINIMIZED_ENERGY_KJ_MOL: f64 = -1.0e4;
const MINIMIZED_ENERGY_KJ_MOL: f64 = -2.2e5;
const ENERGY_RIPPLE_KJ_MOL: f64 = 350.0;
const TEMPERATURE_RIPPLE_K: f64 = 4.0;
const VOLUME_RIPPLE_NM3: f64 = 0.6;
// Rough edge length of a lysozyme-sized solute box before padding, in nm.
const SOLUTE_EXTENT_NM: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    Empty,
    Loaded,
    WaterStripped,
    Hydrogenated,
    Solvated,
    SystemBuilt,
    IntegratorBuilt,
    PlatformBound,
    Minimized,
    Running,
}

impl Stage {
    fn name(self) -> &'static str {
        match self {
            Stage::Empty => "empty",
            Stage::Loaded => "loaded",
            Stage::WaterStripped => "water-stripped",
            Stage::Hydrogenated => "hydrogenated",
            Stage::Solvated => "solvated",
            Stage::SystemBuilt => "system-built",
            Stage::IntegratorBuilt => "integrator-built",
            Stage::PlatformBound => "platform-bound",
            Stage::Minimized => "minimized",
            Stage::Running => "running",
        }
    }
}

pub struct DryRunEngine {
    stage: Stage,
    step: u64,
    temperature_k: f64,
    box_volume_nm3: f64,
    barostat_attached: bool,
    needs_reinitialize: bool,
}

impl DryRunEngine {
    pub fn new() -> Self {
        Self {
            stage: Stage::Empty,
            step: 0,
            temperature_k: 0.0,
            box_volume_nm3: 0.0,
            barostat_attached: false,
            needs_reinitialize: false,
        }
    }

    fn expect_stage(
        &self,
        operation: &'static str,
        expected: Stage,
    ) -> Result<(), EngineError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(EngineError::OutOfOrder {
                operation,
                stage: self.stage.name(),
            })
        }
    }

    /// Cheap deterministic ripple in [-0.5, 0.5] derived from the step count.
    fn ripple(&self, salt: u64) -> f64 {
        let mut x = self.step.wrapping_mul(6364136223846793005).wrapping_add(salt);
        x ^= x >> 33;
        (x % 10_000) as f64 / 10_000.0 - 0.5
    }
}

impl Default for DryRunEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MdEngine for DryRunEngine {
    fn load_structure(&mut self, path: &Path) -> Result<(), EngineError> {
        self.expect_stage("load_structure", Stage::Empty)?;
        if !path.is_file() {
            return Err(EngineError::StructureLoad {
                path: path.to_path_buf(),
                message: "file not found".to_string(),
            });
        }
        debug!(path = %path.display(), "Dry-run: structure loaded.");
        self.stage = Stage::Loaded;
        Ok(())
    }

    fn delete_water(&mut self) -> Result<(), EngineError> {
        self.expect_stage("delete_water", Stage::Loaded)?;
        self.stage = Stage::WaterStripped;
        Ok(())
    }

    fn add_hydrogens(&mut self) -> Result<usize, EngineError> {
        self.expect_stage("add_hydrogens", Stage::WaterStripped)?;
        self.stage = Stage::Hydrogenated;
        Ok(129)
    }

    fn add_solvent(&mut self, padding_nm: f64) -> Result<(), EngineError> {
        self.expect_stage("add_solvent", Stage::Hydrogenated)?;
        if padding_nm <= 0.0 {
            return Err(EngineError::Topology {
                stage: "add-solvent",
                message: format!("solvent padding must be positive, got {} nm", padding_nm),
            });
        }
        let edge = SOLUTE_EXTENT_NM + 2.0 * padding_nm;
        self.box_volume_nm3 = edge * edge * edge;
        self.stage = Stage::Solvated;
        Ok(())
    }

    fn build_system(&mut self, spec: &SystemSpec) -> Result<(), EngineError> {
        self.expect_stage("build_system", Stage::Solvated)?;
        if let Some(name) = spec.forcefield_resources.iter().find(|r| r.is_empty()) {
            return Err(EngineError::Forcefield {
                name: name.clone(),
                message: "empty resource name".to_string(),
            });
        }
        self.stage = Stage::SystemBuilt;
        Ok(())
    }

    fn build_integrator(&mut self, spec: &IntegratorSpec) -> Result<(), EngineError> {
        self.expect_stage("build_integrator", Stage::SystemBuilt)?;
        self.temperature_k = spec.temperature_k;
        self.stage = Stage::IntegratorBuilt;
        Ok(())
    }

    fn select_platform(&mut self, spec: &PlatformSpec) -> Result<(), EngineError> {
        self.expect_stage("select_platform", Stage::IntegratorBuilt)?;
        debug!(
            platform = %spec.name,
            device = %spec.device,
            precision = %spec.precision,
            "Dry-run: platform bound."
        );
        self.stage = Stage::PlatformBound;
        Ok(())
    }

    fn minimize_energy(&mut self) -> Result<(), EngineError> {
        self.expect_stage("minimize_energy", Stage::PlatformBound)?;
        self.stage = Stage::Minimized;
        Ok(())
    }

    fn step(&mut self, steps: u64) -> Result<(), EngineError> {
        if self.stage < Stage::Minimized {
            return Err(EngineError::OutOfOrder {
                operation: "step",
                stage: self.stage.name(),
            });
        }
        if self.needs_reinitialize {
            return Err(EngineError::OutOfOrder {
                operation: "step",
                stage: "awaiting-reinitialize",
            });
        }
        self.step += steps;
        self.stage = Stage::Running;
        Ok(())
    }

    fn add_barostat(&mut self, _spec: &BarostatSpec) -> Result<(), EngineError> {
        if self.stage < Stage::SystemBuilt {
            return Err(EngineError::OutOfOrder {
                operation: "add_barostat",
                stage: self.stage.name(),
            });
        }
        self.barostat_attached = true;
        self.needs_reinitialize = true;
        Ok(())
    }

    fn reinitialize(&mut self, preserve_state: bool) -> Result<(), EngineError> {
        if self.stage < Stage::PlatformBound {
            return Err(EngineError::OutOfOrder {
                operation: "reinitialize",
                stage: self.stage.name(),
            });
        }
        if !preserve_state {
            self.step = 0;
        }
        self.needs_reinitialize = false;
        Ok(())
    }

    fn current_step(&self) -> u64 {
        self.step
    }

    fn sample_state(&self) -> Result<StateSample, EngineError> {
        if self.stage < Stage::SystemBuilt {
            return Err(EngineError::OutOfOrder {
                operation: "sample_state",
                stage: self.stage.name(),
            });
        }
        let base_energy = if self.stage >= Stage::Minimized {
            MINIMIZED_ENERGY_KJ_MOL
        } else {
            UNMINIMIZED_ENERGY_KJ_MOL
        };
        let volume = if self.barostat_attached {
            self.box_volume_nm3 + VOLUME_RIPPLE_NM3 * self.ripple(2)
        } else {
            // Constant-volume ensemble: the box never moves.
            self.box_volume_nm3
        };
        Ok(StateSample {
            step: self.step,
            potential_energy_kj_mol: base_energy + ENERGY_RIPPLE_KJ_MOL * self.ripple(0),
            temperature_k: self.temperature_k + TEMPERATURE_RIPPLE_K * self.ripple(1),
            volume_nm3: volume,
        })
    }

    fn write_trajectory_frame(&mut self, path: &Path) -> Result<(), EngineError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| EngineError::Simulation {
                step: self.step,
                message: format!("trajectory write failed: {}", e),
            })?;
        writeln!(file, "REMARK DRY-RUN FRAME STEP {}", self.step).map_err(|e| {
            EngineError::Simulation {
                step: self.step,
                message: format!("trajectory write failed: {}", e),
            }
        })
    }
}
