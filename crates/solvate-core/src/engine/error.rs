use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to load structure '{path}': {message}", path = path.display())]
    StructureLoad { path: PathBuf, message: String },

    #[error("Force-field resource '{name}' could not be resolved: {message}")]
    Forcefield { name: String, message: String },

    #[error("Topology preparation failed during {stage}: {message}")]
    Topology {
        stage: &'static str,
        message: String,
    },

    #[error("Platform '{name}' is unavailable: {message}")]
    PlatformUnavailable { name: String, message: String },

    #[error("Pipeline operation '{operation}' invoked out of order (current stage: {stage})")]
    OutOfOrder {
        operation: &'static str,
        stage: &'static str,
    },

    #[error("Engine failure at step {step}: {message}")]
    Simulation { step: u64, message: String },

    #[error("Reporter failed at step {step}: {source}")]
    Report {
        step: u64,
        #[source]
        source: crate::report::ReportError,
    },
}
