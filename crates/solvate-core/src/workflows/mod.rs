//! # Workflows Module
//!
//! The public, user-facing entry points of SOLVATE.
//!
//! A workflow ties the engine seam and the service layers together into one
//! complete procedure. There is currently a single workflow: the linear
//! protein-in-solvent pipeline in [`simulate`] (prepare, minimize, NVT, then
//! NPT with periodic reporting).

pub mod simulate;
