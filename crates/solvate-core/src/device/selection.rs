use super::probe::{first_number, get_idle_gpus, DeviceProbe, ProbeError};
use crate::core::models::device::DeviceIndex;
use tracing::info;

/// How a run decides which device to bind.
///
/// The two strategies are deliberately kept side by side rather than merged:
/// `Fixed` pins a run to a known index, `FirstIdle` consults the memory-usage
/// probe and takes the lowest idle index. Callers choose one explicitly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceSelection {
    Fixed(DeviceIndex),
    FirstIdle { threshold: f64 },
}

impl DeviceSelection {
    /// Resolves the policy against a probe.
    ///
    /// Returns `None` when `FirstIdle` finds no idle device; a `Fixed` policy
    /// always resolves without touching the probe.
    pub fn resolve(
        &self,
        probe: &dyn DeviceProbe,
    ) -> Result<Option<DeviceIndex>, ProbeError> {
        match *self {
            DeviceSelection::Fixed(index) => Ok(Some(index)),
            DeviceSelection::FirstIdle { threshold } => {
                let idle = get_idle_gpus(probe, threshold)?;
                let indices: Vec<i64> = idle.iter().map(|d| d.get() as i64).collect();
                let picked = first_number(&indices);
                if picked < 0 {
                    info!(threshold, "No idle device found.");
                    Ok(None)
                } else {
                    info!(device = picked, "Picked first idle device.");
                    Ok(Some(DeviceIndex::new(picked as u32)))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::probe::MemoryInfo;

    struct FakeProbe {
        devices: Vec<MemoryInfo>,
    }

    impl DeviceProbe for FakeProbe {
        fn device_count(&self) -> u32 {
            self.devices.len() as u32
        }

        fn memory_info(&self, index: DeviceIndex) -> Result<MemoryInfo, ProbeError> {
            Ok(self.devices[index.get() as usize])
        }
    }

    fn device(used: u64) -> MemoryInfo {
        MemoryInfo {
            total_bytes: 100,
            used_bytes: used,
        }
    }

    #[test]
    fn fixed_policy_ignores_the_probe() {
        let probe = FakeProbe { devices: vec![] };
        let picked = DeviceSelection::Fixed(DeviceIndex::new(3))
            .resolve(&probe)
            .unwrap();
        assert_eq!(picked, Some(DeviceIndex::new(3)));
    }

    #[test]
    fn first_idle_picks_lowest_idle_index() {
        let probe = FakeProbe {
            devices: vec![device(90), device(1), device(0)],
        };
        let picked = DeviceSelection::FirstIdle { threshold: 0.05 }
            .resolve(&probe)
            .unwrap();
        assert_eq!(picked, Some(DeviceIndex::new(1)));
    }

    #[test]
    fn first_idle_with_no_idle_device_resolves_to_none() {
        let probe = FakeProbe {
            devices: vec![device(90), device(80)],
        };
        let picked = DeviceSelection::FirstIdle { threshold: 0.05 }
            .resolve(&probe)
            .unwrap();
        assert_eq!(picked, None);
    }
}
