//! # SOLVATE Core Library
//!
//! A library for orchestrating molecular-dynamics simulations of a protein in
//! explicit solvent over an external simulation engine. The engine owns all of
//! the physics (force-field parameterization, integration, thermostat/barostat,
//! PME electrostatics); this crate owns everything around it: preparing the
//! run, attaching periodic reporters, probing and partitioning GPU devices, and
//! launching one isolated OS process per device.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict layered architecture to keep the
//! orchestration logic independent of any concrete engine backend.
//!
//! - **[`core`]: The Foundation.** Stateless data models shared by every other
//!   layer: device indices and the observables sampled at report boundaries.
//!
//! - **[`engine`]: The Engine Seam.** The [`engine::traits::MdEngine`] trait is
//!   the single boundary to the external physics engine, one method per
//!   pipeline transition, together with run configuration and progress events.
//!
//! - **[`report`]**, **[`device`]**, **[`launch`]: The Services.** Periodic
//!   state reporters composed in an ordered stack, GPU-idleness probing with an
//!   explicit device-selection policy, and the fire-and-forget per-device
//!   process launcher.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer:
//!   the linear minimize → NVT → NPT simulation pipeline that ties the seam and
//!   the services together.

pub mod core;
pub mod device;
pub mod engine;
pub mod launch;
pub mod report;
pub mod workflows;
