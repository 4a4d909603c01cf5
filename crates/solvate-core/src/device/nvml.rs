//! NVML-backed device probing.
//!
//! Initialization failure is not fatal: on hosts without the NVIDIA driver the
//! probe simply reports zero visible devices, which downstream policy treats
//! as "no idle device", never as an error.

use super::probe::{DeviceProbe, MemoryInfo, ProbeError};
use crate::core::models::device::DeviceIndex;
use nvml_wrapper::Nvml;
use tracing::{debug, warn};

pub struct NvmlProbe {
    nvml: Option<Nvml>,
}

impl NvmlProbe {
    pub fn new() -> Self {
        let nvml = match Nvml::init() {
            Ok(nvml) => {
                debug!("NVML initialized successfully.");
                Some(nvml)
            }
            Err(e) => {
                warn!("Failed to initialize NVML: {}. No devices will be visible.", e);
                None
            }
        };
        Self { nvml }
    }
}

impl Default for NvmlProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceProbe for NvmlProbe {
    fn device_count(&self) -> u32 {
        match &self.nvml {
            Some(nvml) => nvml.device_count().unwrap_or(0),
            None => 0,
        }
    }

    fn memory_info(&self, index: DeviceIndex) -> Result<MemoryInfo, ProbeError> {
        let nvml = self.nvml.as_ref().ok_or_else(|| ProbeError::Query {
            index,
            message: "NVML is not available".to_string(),
        })?;
        let device = nvml
            .device_by_index(index.get())
            .map_err(|e| ProbeError::Query {
                index,
                message: e.to_string(),
            })?;
        let memory = device.memory_info().map_err(|e| ProbeError::Query {
            index,
            message: e.to_string(),
        })?;
        Ok(MemoryInfo {
            total_bytes: memory.total,
            used_bytes: memory.used,
        })
    }
}
