use crate::core::models::observables::ObservableFields;
use crate::engine::config::{ReportingConfig, SimulationConfig};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::traits::MdEngine;
use crate::report::state_data::StateDataReporter;
use crate::report::timestamped::TimestampedReporter;
use crate::report::trajectory::TrajectoryReporter;
use crate::report::{ReportError, ReporterStack};
use serde::Serialize;
use tracing::{info, instrument};

#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub nvt_steps: u64,
    pub npt_steps: u64,
    pub final_step: u64,
    pub protonated_residues: usize,
}

/// The default reporter registration for a run, in attachment order:
/// trajectory frames, the console pair (a timestamped line followed by the
/// columned state output, both on stdout at the console interval), then the
/// columned state log file.
pub fn build_reporter_stack(reporting: &ReportingConfig) -> Result<ReporterStack, ReportError> {
    let mut stack = ReporterStack::new();
    stack.push(Box::new(TrajectoryReporter::new(
        reporting.trajectory_path.clone(),
        reporting.trajectory_interval,
    )));
    stack.push(Box::new(TimestampedReporter::stdout(
        reporting.console_interval,
    )));
    stack.push(Box::new(StateDataReporter::new(
        std::io::stdout(),
        reporting.console_interval,
        ObservableFields::all(),
    )));
    stack.push(Box::new(StateDataReporter::from_path(
        &reporting.state_log_path,
        reporting.state_log_interval,
        ObservableFields::all(),
    )?));
    Ok(stack)
}

/// Runs the complete protein-in-solvent pipeline on one device.
///
/// The pipeline is linear with no branching back:
/// load → strip water → add hydrogens → add solvent → build system →
/// build integrator → select platform → minimize → NVT → barostat →
/// reinitialize (preserving state) → NPT.
///
/// Every transition is a single blocking engine call and every failure is
/// fatal for the run: nothing here retries. Minimization always precedes
/// dynamics, the barostat is attached only after the NVT phase, and the
/// reinitialization that follows it preserves positions and velocities.
/// Reporters in `reporters` receive samples from both dynamics phases and
/// never during minimization.
#[instrument(skip_all, name = "simulation_workflow")]
pub fn run(
    engine: &mut dyn MdEngine,
    config: &SimulationConfig,
    reporters: &mut ReporterStack,
    progress: &ProgressReporter,
) -> Result<SimulationSummary, EngineError> {
    progress.report(Progress::PhaseStart {
        name: "Preparing system",
    });
    info!(
        structure = %config.structure_path.display(),
        "Loading input structure."
    );
    engine.load_structure(&config.structure_path)?;
    engine.delete_water()?;
    let protonated_residues = engine.add_hydrogens()?;
    info!(
        residues = protonated_residues,
        "Hydrogens added at default protonation."
    );
    engine.add_solvent(config.solvent_padding_nm)?;
    engine.build_system(&config.system)?;
    engine.build_integrator(&config.integrator)?;
    engine.select_platform(&config.platform)?;
    progress.report(Progress::PhaseFinish);

    progress.report(Progress::PhaseStart {
        name: "Minimizing energy",
    });
    info!("Minimizing energy.");
    engine.minimize_energy()?;
    progress.report(Progress::PhaseFinish);

    progress.report(Progress::PhaseStart {
        name: "Running NVT",
    });
    info!(steps = config.nvt_steps, "Running NVT phase.");
    run_phase(engine, reporters, config.nvt_steps, progress)?;
    progress.report(Progress::PhaseFinish);

    // The system changes shape here; the run context must be rebuilt with
    // state preserved so positions and velocities survive into NPT.
    engine.add_barostat(&config.barostat)?;
    engine.reinitialize(true)?;

    progress.report(Progress::PhaseStart {
        name: "Running NPT",
    });
    info!(steps = config.npt_steps, "Running NPT phase.");
    run_phase(engine, reporters, config.npt_steps, progress)?;
    progress.report(Progress::PhaseFinish);

    let summary = SimulationSummary {
        nvt_steps: config.nvt_steps,
        npt_steps: config.npt_steps,
        final_step: engine.current_step(),
        protonated_residues,
    };
    info!(final_step = summary.final_step, "Simulation complete.");
    Ok(summary)
}

/// Advances the engine by `steps`, stopping at each reporter boundary to take
/// one sample and drive every due reporter with it.
fn run_phase(
    engine: &mut dyn MdEngine,
    reporters: &mut ReporterStack,
    steps: u64,
    progress: &ProgressReporter,
) -> Result<(), EngineError> {
    let start = engine.current_step();
    let end = start + steps;
    progress.report(Progress::TaskStart { total_steps: steps });

    let mut current = start;
    while current < end {
        let boundary = reporters.next_boundary(current).unwrap_or(end).min(end);
        let chunk = boundary - current;
        engine.step(chunk)?;
        current = boundary;

        if reporters.any_due(current) {
            let sample = engine.sample_state()?;
            reporters
                .report_due(&mut *engine, &sample)
                .map_err(|e| EngineError::Report {
                    step: current,
                    source: e,
                })?;
        }
        progress.report(Progress::TaskAdvance { steps: chunk });
    }

    progress.report(Progress::TaskFinish);
    Ok(())
}
