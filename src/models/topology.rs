use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, Violation};
use crate::models::device::{Device, DeviceRecord};

/// Network represents the whole topology: every device under management,
/// in source order. Device names are unique within a network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub devices: Vec<Device>,
}

/// Raw topology document as produced by the source of truth
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkRecord {
    #[serde(default)]
    pub devices: Vec<DeviceRecord>,
}

impl Network {
    /// Construct a validated Network from a raw topology document.
    ///
    /// Every device is validated; all violations across the whole document
    /// are aggregated into a single error, each prefixed with the device's
    /// position and name. Duplicate device names are rejected here because
    /// schema artifacts are keyed by name and a duplicate would silently
    /// overwrite another device's output.
    pub fn from_record(record: NetworkRecord) -> Result<Network, ValidationError> {
        let mut violations = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut devices = Vec::with_capacity(record.devices.len());

        for (i, device_record) in record.devices.into_iter().enumerate() {
            match Device::from_record(device_record) {
                Ok(device) => {
                    if !seen.insert(device.name.clone()) {
                        violations.push(Violation::new(
                            format!("devices[{}].name", i),
                            format!("duplicate device name '{}'", device.name),
                        ));
                        continue;
                    }
                    devices.push(device);
                }
                Err(err) => {
                    for v in err.violations {
                        violations.push(Violation::new(
                            format!("devices[{}] ({}).{}", i, err.entity, v.field),
                            v.message,
                        ));
                    }
                }
            }
        }

        if violations.is_empty() {
            Ok(Network { devices })
        } else {
            Err(ValidationError::new("topology", violations))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TOPOLOGY: &str = r#"
devices:
- name: R1
  serial: BX109
  model: MX10008
  platform: juniper
  mgmt: 10.0.0.1/31
  role: spine
  interfaces:
    - name: et-0/0/0
      ipv4: 192.168.1.1/31
      description: core_link
- name: R2
  serial: BX110
  model: MX10008
  platform: juniper
  mgmt: 10.0.0.2/31
  role: leaf
  interfaces:
    - name: et-0/0/0
      ipv4: 192.168.1.5/31
      description: core_link
"#;

    #[test]
    fn builds_network_preserving_device_order() {
        let record: NetworkRecord = serde_yaml::from_str(TOPOLOGY).unwrap();
        let network = Network::from_record(record).unwrap();

        let names: Vec<&str> = network.devices.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["R1", "R2"]);
    }

    #[test]
    fn duplicate_device_names_are_rejected() {
        let mut record: NetworkRecord = serde_yaml::from_str(TOPOLOGY).unwrap();
        record.devices[1].name = Some("R1".to_string());

        let err = Network::from_record(record).unwrap_err();
        assert_eq!(err.entity, "topology");
        assert!(err.violations[0]
            .message
            .contains("duplicate device name 'R1'"));
    }

    #[test]
    fn device_violations_are_aggregated_with_device_context() {
        let mut record: NetworkRecord = serde_yaml::from_str(TOPOLOGY).unwrap();
        record.devices[0].mgmt = Some("bogus".to_string());
        record.devices[1].model = Some("UNKNOWN9000".to_string());

        let err = Network::from_record(record).unwrap_err();
        assert_eq!(err.violations.len(), 2);
        assert!(err.violations[0].field.starts_with("devices[0] (R1)"));
        assert!(err.violations[1].field.starts_with("devices[1] (R2)"));
    }
}
