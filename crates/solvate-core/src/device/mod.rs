//! # Device Module
//!
//! GPU availability probing and device-selection policy.
//!
//! ## Overview
//!
//! The prober is a pure, best-effort, read-only query over per-device memory
//! usage: it reserves nothing, locks nothing, and its snapshot carries no
//! guarantee that a device stays idle. The probed index is an explicit
//! per-call parameter; probing never mutates any process-wide current-device
//! context. Which device a run actually binds to is decided by an explicit
//! [`selection::DeviceSelection`] policy, never inferred.
//!
//! ## Key Components
//!
//! - [`probe`] - `DeviceProbe` trait, idle-GPU classification
//! - [`nvml`] - NVML-backed probe with graceful fallback
//! - [`selection`] - Fixed-index vs first-idle selection policy

pub mod nvml;
pub mod probe;
pub mod selection;
