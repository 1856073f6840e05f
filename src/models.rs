//! Data models for the NetBox tenant report
//!
//! Read-only snapshots of NetBox API objects. Nothing here is mutated
//! locally; the builder only cross-references these records.

use serde::{Deserialize, Serialize};

/// One page of a NetBox list endpoint response.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// A `{value, label}` choice field (status, type, face, length unit, ...).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LabelValue {
    pub value: String,
    pub label: String,
}

/// A nested object reference carrying only id and name.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NamedRef {
    pub id: i64,
    pub name: String,
}

/// Top-level organizational owner of the reported infrastructure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Tenant {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

/// An ASN assigned to a site.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AsnRef {
    pub id: i64,
    pub asn: i64,
}

/// Physical facility containing racks and devices.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Site {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub physical_address: String,
    #[serde(default)]
    pub facility: String,
    #[serde(default)]
    pub asns: Vec<AsnRef>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub region: Option<NamedRef>,
    #[serde(default)]
    pub circuit_count: u64,
    #[serde(default)]
    pub device_count: u64,
    #[serde(default)]
    pub prefix_count: u64,
    #[serde(default)]
    pub rack_count: u64,
    #[serde(default)]
    pub virtualmachine_count: u64,
    #[serde(default)]
    pub vlan_count: u64,
}

/// Physical mounting frame holding devices. Belongs to exactly one site.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Rack {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub facility_id: Option<String>,
    #[serde(rename = "type", default)]
    pub rack_type: Option<LabelValue>,
    #[serde(default)]
    pub width: Option<LabelValue>,
    #[serde(default)]
    pub u_height: u32,
    pub status: LabelValue,
    #[serde(default)]
    pub serial: String,
    #[serde(default)]
    pub asset_tag: Option<String>,
    #[serde(default)]
    pub role: Option<NamedRef>,
    #[serde(default)]
    pub comments: String,
}

/// Device type reference (manufacturer model).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DeviceTypeRef {
    pub id: i64,
    pub model: String,
}

/// A piece of equipment: server, switch, patch panel.
///
/// A device may or may not be rack-mounted; unracked devices are still
/// reported once via the tenant-wide device list.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Device {
    pub id: i64,
    pub name: String,
    pub device_type: DeviceTypeRef,
    pub role: NamedRef,
    #[serde(default)]
    pub serial: String,
    #[serde(default)]
    pub asset_tag: Option<String>,
    pub site: NamedRef,
    #[serde(default)]
    pub location: Option<NamedRef>,
    #[serde(default)]
    pub rack: Option<NamedRef>,
    #[serde(default)]
    pub position: Option<f64>,
    #[serde(default)]
    pub face: Option<LabelValue>,
    #[serde(default)]
    pub custom_fields: serde_json::Map<String, serde_json::Value>,
}

/// Reference from a port/interface to the cable plugged into it.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CableRef {
    pub id: i64,
}

/// VLAN reference on an interface.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VlanRef {
    pub vid: u16,
    #[serde(default)]
    pub name: String,
}

/// IP address assigned to an interface.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IpAddressRef {
    pub address: String,
}

/// A logical or physical interface on a device.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Interface {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub if_type: LabelValue,
    #[serde(default)]
    pub cable: Option<CableRef>,
    #[serde(default)]
    pub ip_addresses: Vec<IpAddressRef>,
    #[serde(default)]
    pub untagged_vlan: Option<VlanRef>,
    #[serde(default)]
    pub tagged_vlans: Vec<VlanRef>,
}

/// A front port on a patch panel.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FrontPort {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub port_type: LabelValue,
    #[serde(default)]
    pub cable: Option<CableRef>,
}

/// A rear port on a patch panel.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RearPort {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub port_type: LabelValue,
    #[serde(default)]
    pub cable: Option<CableRef>,
}

/// Device end of a cable termination.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TerminationDevice {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub display: String,
}

/// The terminated object on one side of a cable.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TerminationObject {
    pub device: TerminationDevice,
}

/// One endpoint descriptor inside a cable's termination set.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CableTermination {
    pub object: TerminationObject,
}

/// A physical link. Which side is "a" vs "b" is arbitrary relative to the
/// querying device, so both sets must be searched when resolving the far end.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Cable {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub cable_type: Option<String>,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub length_unit: Option<LabelValue>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub a_terminations: Vec<CableTermination>,
    #[serde(default)]
    pub b_terminations: Vec<CableTermination>,
}

impl Cable {
    /// `"{length} {unit}"` with `"N/A"` for whichever part is missing;
    /// plain `"N/A"` when neither is set.
    pub fn length_text(&self) -> String {
        match (&self.length, &self.length_unit) {
            (None, None) => "N/A".to_string(),
            (length, unit) => format!(
                "{} {}",
                length.map_or_else(|| "N/A".to_string(), trim_float),
                unit.as_ref().map_or("N/A", |u| u.value.as_str())
            ),
        }
    }
}

/// NetBox reports lengths as decimals; render `3.0` as `3`.
fn trim_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
