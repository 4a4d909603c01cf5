use super::{ReportError, StateReporter};
use crate::core::models::observables::StateSample;
use crate::engine::traits::MdEngine;
use std::path::PathBuf;

/// Requests one engine-written trajectory frame per report boundary.
///
/// The frame format is owned by the engine; this reporter only decides when a
/// frame is captured and where it goes.
pub struct TrajectoryReporter {
    path: PathBuf,
    interval: u64,
}

impl TrajectoryReporter {
    pub fn new(path: PathBuf, interval: u64) -> Self {
        Self { path, interval }
    }
}

impl StateReporter for TrajectoryReporter {
    fn interval(&self) -> u64 {
        self.interval
    }

    fn report(
        &mut self,
        engine: &mut dyn MdEngine,
        _sample: &StateSample,
    ) -> Result<(), ReportError> {
        engine
            .write_trajectory_frame(&self.path)
            .map_err(|e| ReportError::Engine(e.to_string()))
    }
}
