use crate::core::models::device::DeviceIndex;
use thiserror::Error;

/// Fraction of total device memory below which a device counts as idle.
pub const DEFAULT_IDLE_THRESHOLD: f64 = 0.05;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Memory query for device {index} failed: {message}")]
    Query { index: DeviceIndex, message: String },
}

/// A point-in-time memory snapshot for one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryInfo {
    pub total_bytes: u64,
    pub used_bytes: u64,
}

/// Read-only access to per-device memory usage.
///
/// Implementations must not reserve or lock devices, and must not mutate any
/// process-wide device context: the index is an explicit per-call parameter.
pub trait DeviceProbe {
    /// Number of visible devices. Zero when no accelerator is available.
    fn device_count(&self) -> u32;

    /// Memory capacity and current allocation for one device.
    fn memory_info(&self, index: DeviceIndex) -> Result<MemoryInfo, ProbeError>;
}

/// Classifies visible devices as idle by memory usage.
///
/// A device is idle iff `used/total` is strictly below `threshold`. Indices
/// are returned in ascending order. With no visible devices the result is
/// empty, not an error. The snapshot is best-effort: nothing prevents another
/// process from claiming a device immediately afterward.
pub fn get_idle_gpus(
    probe: &dyn DeviceProbe,
    threshold: f64,
) -> Result<Vec<DeviceIndex>, ProbeError> {
    let mut idle = Vec::new();
    for i in 0..probe.device_count() {
        let index = DeviceIndex::new(i);
        let info = probe.memory_info(index)?;
        // A zero-capacity device can never be idle.
        if info.total_bytes == 0 {
            continue;
        }
        if (info.used_bytes as f64 / info.total_bytes as f64) < threshold {
            idle.push(index);
        }
    }
    Ok(idle)
}

/// First element of `arr`, or `-1` when it is empty.
pub fn first_number(arr: &[i64]) -> i64 {
    arr.first().copied().unwrap_or(-1)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeProbe {
        devices: Vec<MemoryInfo>,
    }

    impl DeviceProbe for FakeProbe {
        fn device_count(&self) -> u32 {
            self.devices.len() as u32
        }

        fn memory_info(&self, index: DeviceIndex) -> Result<MemoryInfo, ProbeError> {
            self.devices
                .get(index.get() as usize)
                .copied()
                .ok_or(ProbeError::Query {
                    index,
                    message: "out of range".to_string(),
                })
        }
    }

    fn device(total: u64, used: u64) -> MemoryInfo {
        MemoryInfo {
            total_bytes: total,
            used_bytes: used,
        }
    }

    #[test]
    fn includes_exactly_devices_strictly_below_threshold() {
        let probe = FakeProbe {
            devices: vec![
                device(100, 4),  // 0.04 -> idle
                device(100, 5),  // 0.05 -> busy (not strictly below)
                device(100, 90), // busy
                device(100, 0),  // idle
            ],
        };
        let idle = get_idle_gpus(&probe, 0.05).unwrap();
        assert_eq!(idle, vec![DeviceIndex::new(0), DeviceIndex::new(3)]);
    }

    #[test]
    fn returns_indices_in_ascending_order() {
        let probe = FakeProbe {
            devices: vec![device(100, 0), device(100, 99), device(100, 1), device(100, 2)],
        };
        let idle = get_idle_gpus(&probe, 0.5).unwrap();
        assert_eq!(
            idle,
            vec![DeviceIndex::new(0), DeviceIndex::new(2), DeviceIndex::new(3)]
        );
    }

    #[test]
    fn no_visible_devices_yields_empty_not_error() {
        let probe = FakeProbe { devices: vec![] };
        assert!(get_idle_gpus(&probe, 0.05).unwrap().is_empty());
    }

    #[test]
    fn zero_threshold_yields_empty() {
        let probe = FakeProbe {
            devices: vec![device(100, 0), device(100, 50)],
        };
        assert!(get_idle_gpus(&probe, 0.0).unwrap().is_empty());
    }

    #[test]
    fn threshold_of_one_admits_everything_not_full() {
        let probe = FakeProbe {
            devices: vec![device(100, 99), device(100, 100)],
        };
        let idle = get_idle_gpus(&probe, 1.0).unwrap();
        assert_eq!(idle, vec![DeviceIndex::new(0)]);
    }

    #[test]
    fn zero_capacity_devices_are_never_idle() {
        let probe = FakeProbe {
            devices: vec![device(0, 0), device(100, 0)],
        };
        let idle = get_idle_gpus(&probe, 0.05).unwrap();
        assert_eq!(idle, vec![DeviceIndex::new(1)]);
    }

    #[test]
    fn first_number_returns_first_element_not_minimum() {
        assert_eq!(first_number(&[5, 2]), 5);
        assert_eq!(first_number(&[2, 5]), 2);
    }

    #[test]
    fn first_number_of_empty_is_negative_one() {
        assert_eq!(first_number(&[]), -1);
    }
}
