use std::collections::HashSet;
use std::str::FromStr;

use ipnet::{Ipv4Net, Ipv6Net};
use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, Violation};
use crate::models::{Communities, Secrets};

/// Supported vendor platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Juniper,
    Arista,
}

impl Platform {
    pub const ALL: &'static [&'static str] = &["juniper", "arista"];
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "juniper" => Ok(Platform::Juniper),
            "arista" => Ok(Platform::Arista),
            other => Err(format!(
                "unknown platform '{}' (expected one of: {})",
                other,
                Self::ALL.join(", ")
            )),
        }
    }
}

/// Supported hardware models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HardwareModel {
    #[serde(rename = "QFX10008")]
    Qfx10008,
    #[serde(rename = "MX10008")]
    Mx10008,
    #[serde(rename = "DCS-7050CX3-32S-R")]
    Dcs7050Cx332SR,
    #[serde(rename = "DCS-7260CX3-64-R")]
    Dcs7260Cx364R,
}

impl HardwareModel {
    pub const ALL: &'static [&'static str] = &[
        "QFX10008",
        "MX10008",
        "DCS-7050CX3-32S-R",
        "DCS-7260CX3-64-R",
    ];
}

impl FromStr for HardwareModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "QFX10008" => Ok(HardwareModel::Qfx10008),
            "MX10008" => Ok(HardwareModel::Mx10008),
            "DCS-7050CX3-32S-R" => Ok(HardwareModel::Dcs7050Cx332SR),
            "DCS-7260CX3-64-R" => Ok(HardwareModel::Dcs7260Cx364R),
            other => Err(format!(
                "unknown model '{}' (expected one of: {})",
                other,
                Self::ALL.join(", ")
            )),
        }
    }
}

/// Sub-interface attached to a layer-3 interface (name only for now)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubInterface {
    pub name: String,
}

/// A device interface, tagged by kind so consumers can branch exhaustively
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Interface {
    Layer3 {
        name: String,
        device_name: String,
        ipv4: Option<Ipv4Net>,
        ipv6: Option<Ipv6Net>,
        description: Option<String>,
        sub_interfaces: Option<Vec<SubInterface>>,
    },
    Layer2 {
        name: String,
    },
}

/// A validated network device. `communities` and `secrets` start out unset
/// and are written exactly once, by the enrichment step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    pub serial: String,
    pub model: HardwareModel,
    pub platform: Platform,
    pub mgmt: Ipv4Net,
    pub role: String,
    pub interfaces: Vec<Interface>,
    pub communities: Option<Communities>,
    pub secrets: Option<Secrets>,
}

/// Raw sub-interface record as it appears in the source topology
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubInterfaceRecord {
    #[serde(default)]
    pub name: Option<String>,
}

/// Raw interface record as it appears in the source topology.
/// Every field is optional so validation can report all problems at once.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InterfaceRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub ipv4: Option<String>,
    #[serde(default)]
    pub ipv6: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sub_interfaces: Option<Vec<SubInterfaceRecord>>,
}

impl InterfaceRecord {
    /// A record with any layer-3 payload is a layer-3 interface;
    /// a bare name is layer 2.
    fn is_layer3(&self) -> bool {
        self.device_name.is_some()
            || self.ipv4.is_some()
            || self.ipv6.is_some()
            || self.description.is_some()
            || self.sub_interfaces.is_some()
    }
}

/// Raw device record as it appears in the source topology
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub serial: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub mgmt: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceRecord>,
}

/// Pull a required non-empty string field, recording a violation if absent
fn require(
    value: Option<String>,
    field: &str,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    match value {
        Some(s) if !s.trim().is_empty() => Some(s),
        Some(_) => {
            violations.push(Violation::new(field, "must not be empty"));
            None
        }
        None => {
            violations.push(Violation::new(field, "field is required"));
            None
        }
    }
}

impl Device {
    /// Construct a validated Device from a raw record.
    ///
    /// Validation is exhaustive: every missing field, unknown enum value,
    /// malformed CIDR, and interface-name problem is collected before the
    /// record is rejected, so one pass over the error is enough to fix the
    /// input.
    pub fn from_record(record: DeviceRecord) -> Result<Device, ValidationError> {
        let mut violations = Vec::new();

        let name = require(record.name, "name", &mut violations);
        let serial = require(record.serial, "serial", &mut violations);
        let role = require(record.role, "role", &mut violations);

        let model = require(record.model, "model", &mut violations).and_then(|s| {
            match HardwareModel::from_str(&s) {
                Ok(m) => Some(m),
                Err(e) => {
                    violations.push(Violation::new("model", e));
                    None
                }
            }
        });

        let platform = require(record.platform, "platform", &mut violations).and_then(|s| {
            match Platform::from_str(&s) {
                Ok(p) => Some(p),
                Err(e) => {
                    violations.push(Violation::new("platform", e));
                    None
                }
            }
        });

        let mgmt = require(record.mgmt, "mgmt", &mut violations).and_then(|s| {
            match Ipv4Net::from_str(&s) {
                Ok(net) => Some(net),
                Err(e) => {
                    violations.push(Violation::new(
                        "mgmt",
                        format!("invalid CIDR notation '{}' (expected address/prefix): {}", s, e),
                    ));
                    None
                }
            }
        });

        let owner = name.clone().unwrap_or_default();
        let interfaces = validate_interfaces(record.interfaces, &owner, &mut violations);

        match (name, serial, model, platform, mgmt, role) {
            (Some(name), Some(serial), Some(model), Some(platform), Some(mgmt), Some(role))
                if violations.is_empty() =>
            {
                Ok(Device {
                    name,
                    serial,
                    model,
                    platform,
                    mgmt,
                    role,
                    interfaces,
                    communities: None,
                    secrets: None,
                })
            }
            _ => {
                let entity = if owner.is_empty() {
                    "<unnamed device>".to_string()
                } else {
                    owner
                };
                Err(ValidationError::new(entity, violations))
            }
        }
    }
}

/// Validate and classify every interface record, collecting violations.
/// Returns the successfully built interfaces; callers only use them when
/// the violation list stayed empty.
fn validate_interfaces(
    records: Vec<InterfaceRecord>,
    owner: &str,
    violations: &mut Vec<Violation>,
) -> Vec<Interface> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut interfaces = Vec::with_capacity(records.len());

    for (i, record) in records.into_iter().enumerate() {
        let field = |suffix: &str| format!("interfaces[{}].{}", i, suffix);

        let name = match require(record.name.clone(), &field("name"), violations) {
            Some(n) => n,
            None => continue,
        };

        if !seen.insert(name.clone()) {
            violations.push(Violation::new(
                field("name"),
                format!("duplicate interface name '{}'", name),
            ));
            continue;
        }

        if !record.is_layer3() {
            interfaces.push(Interface::Layer2 { name });
            continue;
        }

        let ipv4 = record.ipv4.as_deref().and_then(|s| {
            match Ipv4Net::from_str(s) {
                Ok(net) => Some(net),
                Err(e) => {
                    violations.push(Violation::new(
                        field("ipv4"),
                        format!("invalid CIDR notation '{}': {}", s, e),
                    ));
                    None
                }
            }
        });

        let ipv6 = record.ipv6.as_deref().and_then(|s| {
            match Ipv6Net::from_str(s) {
                Ok(net) => Some(net),
                Err(e) => {
                    violations.push(Violation::new(
                        field("ipv6"),
                        format!("invalid CIDR notation '{}': {}", s, e),
                    ));
                    None
                }
            }
        });

        let sub_interfaces = record.sub_interfaces.map(|subs| {
            subs.into_iter()
                .enumerate()
                .filter_map(|(j, sub)| {
                    require(
                        sub.name,
                        &format!("interfaces[{}].sub_interfaces[{}].name", i, j),
                        violations,
                    )
                    .map(|name| SubInterface { name })
                })
                .collect::<Vec<_>>()
        });

        interfaces.push(Interface::Layer3 {
            name,
            device_name: record
                .device_name
                .unwrap_or_else(|| owner.to_string()),
            ipv4,
            ipv6,
            description: record.description,
            sub_interfaces,
        });
    }

    interfaces
}
