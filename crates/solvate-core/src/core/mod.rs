//! # Core Module
//!
//! Fundamental data structures shared by every layer of SOLVATE.
//!
//! ## Overview
//!
//! The core module holds the small, stateless value types the orchestration
//! layers pass around: compute-device identifiers and the observables sampled
//! from a running simulation at report boundaries. Everything that touches the
//! external physics engine, the filesystem, or other processes lives in the
//! higher layers; nothing here performs I/O.
//!
//! ## Key Components
//!
//! - [`models::device`] - Device index identifying a compute accelerator
//! - [`models::observables`] - Sampled simulation state and field selection

pub mod models;
