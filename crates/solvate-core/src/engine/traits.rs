use super::config::{BarostatSpec, IntegratorSpec, PlatformSpec, SystemSpec};
use super::error::EngineError;
use crate::core::models::observables::StateSample;
use std::path::Path;

/// Defines the boundary to the external molecular-dynamics engine.
///
/// Every method is a single blocking, fallible call corresponding to one
/// transition of the preparation-and-run pipeline. The engine owns all physics
/// and all engine-side state (topology, positions, velocities, the integrator,
/// and any attached forces); this trait never exposes that state beyond the
/// observables in [`StateSample`].
///
/// Implementations are free to parallelize internally. Callers must assume
/// every method may run for a long time and must not retry on failure: any
/// error is fatal for the owning run.
pub trait MdEngine {
    /// Loads the input structure (topology and positions) from a file.
    ///
    /// This is always the first pipeline call. Fails with
    /// [`EngineError::StructureLoad`] if the file is missing or malformed.
    fn load_structure(&mut self, path: &Path) -> Result<(), EngineError>;

    /// Removes all crystallographic water from the loaded structure.
    fn delete_water(&mut self) -> Result<(), EngineError>;

    /// Adds missing hydrogens at the engine's default protonation state.
    ///
    /// Returns the number of residues whose protonation was decided.
    fn add_hydrogens(&mut self) -> Result<usize, EngineError>;

    /// Surrounds the structure with a solvent box, leaving at least
    /// `padding_nm` of solvent between the solute and every box face.
    fn add_solvent(&mut self, padding_nm: f64) -> Result<(), EngineError>;

    /// Parameterizes the prepared topology into a simulatable system using the
    /// force-field resources and nonbonded settings in `spec`.
    ///
    /// Fails with [`EngineError::Forcefield`] when a resource cannot be
    /// resolved or a residue has no template.
    fn build_system(&mut self, spec: &SystemSpec) -> Result<(), EngineError>;

    /// Creates the Langevin-middle integrator driving the dynamics.
    fn build_integrator(&mut self, spec: &IntegratorSpec) -> Result<(), EngineError>;

    /// Binds the run to a compute platform and device.
    ///
    /// Fails with [`EngineError::PlatformUnavailable`] when the named platform
    /// or the requested device does not exist.
    fn select_platform(&mut self, spec: &PlatformSpec) -> Result<(), EngineError>;

    /// Runs local energy minimization to convergence. Must precede dynamics.
    fn minimize_energy(&mut self) -> Result<(), EngineError>;

    /// Advances the simulation by `steps` integration steps.
    fn step(&mut self, steps: u64) -> Result<(), EngineError>;

    /// Attaches a Monte Carlo barostat to the system.
    ///
    /// Changing the system composition invalidates the engine's run context;
    /// callers must follow with [`MdEngine::reinitialize`] before stepping.
    fn add_barostat(&mut self, spec: &BarostatSpec) -> Result<(), EngineError>;

    /// Rebuilds the run context after a system change.
    ///
    /// With `preserve_state` set, current positions and velocities survive the
    /// rebuild; otherwise the context starts from the initial coordinates.
    fn reinitialize(&mut self, preserve_state: bool) -> Result<(), EngineError>;

    /// The current step count. Zero before the first [`MdEngine::step`] call.
    fn current_step(&self) -> u64;

    /// Samples the current observables. Read-only with respect to the
    /// trajectory: sampling never perturbs the dynamics.
    fn sample_state(&self) -> Result<StateSample, EngineError>;

    /// Appends the current coordinates as one trajectory frame to `path` in
    /// the engine's native trajectory format.
    fn write_trajectory_frame(&mut self, path: &Path) -> Result<(), EngineError>;
}
