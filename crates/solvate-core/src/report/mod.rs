//! # Report Module
//!
//! Periodic observers of simulation state.
//!
//! ## Overview
//!
//! A reporter declares a reporting interval (steps between samples) and is
//! invoked by the stepping loop at each interval boundary with a shared
//! [`StateSample`]. Layered output (a timestamped console line alongside a
//! formatted-column state log) is composition, not inheritance: independent
//! reporters stacked in order inside a [`ReporterStack`], so two reporters
//! registered with the same interval are always driven together and never
//! skipped independently.
//!
//! ## Key Components
//!
//! - [`timestamped`] - Human-readable `HH:MM:SS - Step: …, Energy: …` lines
//! - [`state_data`] - Formatted-column state log (CSV)
//! - [`trajectory`] - Periodic trajectory-frame capture through the engine
//! - [`stack`] - Ordered reporter composition and boundary scheduling

pub mod stack;
pub mod state_data;
pub mod timestamped;
pub mod trajectory;

pub use stack::ReporterStack;

use crate::core::models::observables::StateSample;
use crate::engine::traits::MdEngine;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Engine error during reporting: {0}")]
    Engine(String),
}

/// A periodic observer of simulation state.
///
/// Implementations never drive the simulation themselves: the stepping loop
/// invokes [`StateReporter::report`] at each multiple of
/// [`StateReporter::interval`], passing the engine (for reporters that need to
/// request engine-side output, such as trajectory frames) and the sample taken
/// at that boundary. Write failures propagate to the stepping loop and abort
/// the run.
pub trait StateReporter {
    /// Steps between samples. Must be nonzero.
    fn interval(&self) -> u64;

    /// Called at each interval boundary with the sample taken there.
    fn report(
        &mut self,
        engine: &mut dyn MdEngine,
        sample: &StateSample,
    ) -> Result<(), ReportError>;
}
