//! Interface-to-VLAN aggregation
//!
//! Derives the set of VLANs an interface can legally carry: at most one
//! untagged, any number tagged.

use crate::models::Interface;

/// Human-readable VLAN summary for an interface, e.g. `"10U,20T,30T"`.
///
/// The untagged VLAN (if any) comes first as `"{vid}U"`, followed by tagged
/// VLANs in API order as `"{vid}T"`, comma-joined with no trailing comma.
/// An interface without VLAN assignments yields an empty string. Pure
/// function, no I/O.
pub fn interface_vlans(interface: &Interface) -> String {
    let mut labels = Vec::with_capacity(1 + interface.tagged_vlans.len());

    if let Some(untagged) = &interface.untagged_vlan {
        labels.push(format!("{}U", untagged.vid));
    }
    for tagged in &interface.tagged_vlans {
        labels.push(format!("{}T", tagged.vid));
    }

    labels.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LabelValue, VlanRef};

    fn iface(untagged: Option<u16>, tagged: &[u16]) -> Interface {
        Interface {
            id: 1,
            name: "eth0".to_string(),
            if_type: LabelValue {
                value: "1000base-t".to_string(),
                label: "1000BASE-T".to_string(),
            },
            cable: None,
            ip_addresses: vec![],
            untagged_vlan: untagged.map(|vid| VlanRef {
                vid,
                name: String::new(),
            }),
            tagged_vlans: tagged
                .iter()
                .map(|&vid| VlanRef {
                    vid,
                    name: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_untagged_and_tagged_ordering() {
        assert_eq!(interface_vlans(&iface(Some(10), &[20, 30])), "10U,20T,30T");
    }

    #[test]
    fn test_no_vlans_yields_empty_string() {
        assert_eq!(interface_vlans(&iface(None, &[])), "");
    }

    #[test]
    fn test_untagged_only() {
        assert_eq!(interface_vlans(&iface(Some(100), &[])), "100U");
    }

    #[test]
    fn test_tagged_only_preserves_api_order() {
        assert_eq!(interface_vlans(&iface(None, &[300, 200])), "300T,200T");
    }
}
