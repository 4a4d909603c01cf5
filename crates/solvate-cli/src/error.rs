use solvate::device::probe::ProbeError;
use solvate::engine::config::ConfigError;
use solvate::engine::error::EngineError;
use solvate::launch::LaunchError;
use solvate::report::ReportError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Reporter error: {0}")]
    Report(#[from] ReportError),

    #[error("Device probe error: {0}")]
    Probe(#[from] ProbeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),
}
