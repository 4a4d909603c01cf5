use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifies a single compute accelerator visible to the process.
///
/// Device indices are small non-negative integers assigned by the driver in
/// enumeration order. They are used in two places: as the value of the
/// per-process device-visibility environment variable, and as the
/// device-selection property handed to the simulation engine's platform.
///
/// Each launched simulation process owns exactly one index for its lifetime;
/// the launcher never assigns the same index to two processes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DeviceIndex(u32);

impl DeviceIndex {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for DeviceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for DeviceIndex {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

impl FromStr for DeviceIndex {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_as_plain_integer() {
        assert_eq!(DeviceIndex::new(0).to_string(), "0");
        assert_eq!(DeviceIndex::new(3).to_string(), "3");
    }

    #[test]
    fn parses_from_decimal_string() {
        assert_eq!("1".parse::<DeviceIndex>().unwrap(), DeviceIndex::new(1));
        assert!("gpu0".parse::<DeviceIndex>().is_err());
        assert!("-1".parse::<DeviceIndex>().is_err());
    }

    #[test]
    fn orders_by_index() {
        let mut indices = vec![DeviceIndex::new(2), DeviceIndex::new(0), DeviceIndex::new(1)];
        indices.sort();
        assert_eq!(
            indices,
            vec![DeviceIndex::new(0), DeviceIndex::new(1), DeviceIndex::new(2)]
        );
    }
}
