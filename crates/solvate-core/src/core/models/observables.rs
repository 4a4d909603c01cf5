use serde::{Deserialize, Serialize};

/// Selects which observables a reporter captures at each report boundary.
///
/// Mirrors the column flags of the engine's own state-data output: a reporter
/// constructed with a field disabled neither samples nor prints that column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservableFields {
    pub step: bool,
    pub potential_energy: bool,
    pub temperature: bool,
    pub volume: bool,
}

impl ObservableFields {
    /// All observables enabled. This matches the run policy: every reporter in
    /// the default pipeline captures step, energy, temperature, and volume.
    pub const fn all() -> Self {
        Self {
            step: true,
            potential_energy: true,
            temperature: true,
            volume: true,
        }
    }
}

impl Default for ObservableFields {
    fn default() -> Self {
        Self::all()
    }
}

/// A snapshot of the simulation state taken at a report boundary.
///
/// Produced by the engine seam on request; the stepping loop samples once per
/// boundary and hands the same snapshot to every reporter due at that step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateSample {
    /// Step count of the simulation at the moment of sampling.
    pub step: u64,
    /// Potential energy in kJ/mol.
    pub potential_energy_kj_mol: f64,
    /// Instantaneous temperature in Kelvin.
    pub temperature_k: f64,
    /// Periodic box volume in nm^3.
    pub volume_nm3: f64,
}
