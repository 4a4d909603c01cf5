//! # Engine Module
//!
//! The seam between SOLVATE and the external molecular-dynamics engine.
//!
//! ## Overview
//!
//! All physics — force-field parameterization, integration, the thermostat and
//! barostat, PME electrostatics — belongs to the engine behind the
//! [`traits::MdEngine`] trait, one method per pipeline transition. This module
//! also carries the run configuration (with policy defaults and a validating
//! builder), the progress-event channel the workflow reports through, and a
//! deterministic dry-run backend used for pipeline validation and testing.
//!
//! ## Key Components
//!
//! - [`traits`] - The `MdEngine` boundary trait
//! - [`config`] - Run configuration, specs, and the validating builder
//! - [`error`] - Engine failure taxonomy
//! - [`progress`] - Progress events emitted by the simulation workflow
//! - [`dryrun`] - Deterministic stand-in backend (no physics)

pub mod config;
pub mod dryrun;
pub mod error;
pub mod progress;
pub mod traits;
