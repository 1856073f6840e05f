//! End-to-end report builder tests against an in-memory inventory fixture.

use std::collections::{HashMap, HashSet};

use anyhow::{Result, anyhow};
use serde_json::json;

use netbox_report::{
    Cable, Device, FrontPort, Interface, Inventory, Rack, RearPort, ReportBuilder, Section,
    SectionBody, Site, Tenant,
};

/// In-memory stand-in for the NetBox API.
#[derive(Default)]
struct FixtureInventory {
    tenant: Option<Tenant>,
    sites: Vec<Site>,
    racks_by_site: HashMap<i64, Vec<Rack>>,
    devices_by_rack: HashMap<i64, Vec<Device>>,
    tenant_devices: Vec<Device>,
    interfaces_by_device: HashMap<i64, Vec<Interface>>,
    front_ports_by_device: HashMap<i64, Vec<FrontPort>>,
    rear_ports_by_device: HashMap<i64, Vec<RearPort>>,
    cables: HashMap<i64, Cable>,
    fail_interfaces_for: HashSet<i64>,
}

impl Inventory for FixtureInventory {
    async fn tenant(&self, _tenant_id: i64) -> Result<Tenant> {
        self.tenant.clone().ok_or_else(|| anyhow!("tenant not found"))
    }

    async fn sites_for_tenant(&self, _tenant_id: i64) -> Result<Vec<Site>> {
        Ok(self.sites.clone())
    }

    async fn racks_for_site(&self, site_id: i64) -> Result<Vec<Rack>> {
        Ok(self.racks_by_site.get(&site_id).cloned().unwrap_or_default())
    }

    async fn devices_for_rack(&self, rack_id: i64) -> Result<Vec<Device>> {
        Ok(self.devices_by_rack.get(&rack_id).cloned().unwrap_or_default())
    }

    async fn devices_for_tenant(&self, _tenant_id: i64) -> Result<Vec<Device>> {
        Ok(self.tenant_devices.clone())
    }

    async fn interfaces_for_device(&self, device_id: i64) -> Result<Vec<Interface>> {
        if self.fail_interfaces_for.contains(&device_id) {
            return Err(anyhow!("simulated 500 from interfaces endpoint"));
        }
        Ok(self
            .interfaces_by_device
            .get(&device_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn front_ports_for_device(&self, device_id: i64) -> Result<Vec<FrontPort>> {
        Ok(self
            .front_ports_by_device
            .get(&device_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn rear_ports_for_device(&self, device_id: i64) -> Result<Vec<RearPort>> {
        Ok(self
            .rear_ports_by_device
            .get(&device_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn cable(&self, cable_id: i64) -> Result<Cable> {
        self.cables
            .get(&cable_id)
            .cloned()
            .ok_or_else(|| anyhow!("cable {} not found", cable_id))
    }
}

fn tenant() -> Tenant {
    Tenant {
        id: 1,
        name: "Acme".to_string(),
        slug: "acme".to_string(),
        description: "Test tenant".to_string(),
    }
}

fn site(id: i64, name: &str) -> Site {
    serde_json::from_value(json!({"id": id, "name": name})).unwrap()
}

fn rack(id: i64, name: &str) -> Rack {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "status": {"value": "active", "label": "Active"}
    }))
    .unwrap()
}

fn device(id: i64, name: &str, role: &str) -> Device {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "device_type": {"id": 1, "model": "Generic"},
        "role": {"id": 10, "name": role},
        "site": {"id": 1, "name": "DC-West"}
    }))
    .unwrap()
}

fn interface(id: i64, name: &str, cable_id: Option<i64>) -> Interface {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "type": {"value": "1000base-t", "label": "1000BASE-T"},
        "cable": cable_id.map(|c| json!({"id": c})),
        "ip_addresses": [],
        "untagged_vlan": null,
        "tagged_vlans": []
    }))
    .unwrap()
}

fn front_port(id: i64, name: &str, cable_id: Option<i64>) -> FrontPort {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "type": {"value": "8p8c", "label": "8P8C"},
        "cable": cable_id.map(|c| json!({"id": c}))
    }))
    .unwrap()
}

fn termination(device_id: i64, name: &str) -> serde_json::Value {
    json!({"object": {"device": {"id": device_id, "name": name, "display": name}}})
}

fn section_titles(sections: &[Section]) -> Vec<&str> {
    sections.iter().map(|s| s.title.as_str()).collect()
}

fn device_section<'a>(sections: &'a [Section], name: &str) -> &'a netbox_report::report::DeviceDetails {
    sections
        .iter()
        .find_map(|s| match &s.body {
            SectionBody::Device(details) if s.title == name => Some(details),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no device section '{}'", name))
}

#[tokio::test]
async fn racked_and_unracked_devices_each_appear_once() {
    let device_a = device(100, "srv-a", "Server");
    let device_b = device(101, "srv-b", "Server");

    let inventory = FixtureInventory {
        tenant: Some(tenant()),
        sites: vec![site(1, "DC-West")],
        racks_by_site: HashMap::from([(1, vec![rack(20, "R01")])]),
        devices_by_rack: HashMap::from([(20, vec![device_a.clone()])]),
        tenant_devices: vec![device_a, device_b],
        ..Default::default()
    };

    let model = ReportBuilder::new(&inventory).build(1).await.unwrap();

    assert_eq!(
        section_titles(&model.sections),
        vec!["DC-West", "R01", "srv-a", "srv-b"]
    );

    let levels: Vec<u8> = model.toc.iter().map(|e| e.level).collect();
    assert_eq!(levels, vec![0, 1, 3, 3]);
    let positions: Vec<usize> = model.toc.iter().map(|e| e.position).collect();
    assert_eq!(positions, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn device_listed_in_two_racks_is_emitted_once() {
    let shared = device(100, "srv-a", "Server");

    let inventory = FixtureInventory {
        tenant: Some(tenant()),
        sites: vec![site(1, "DC-West")],
        racks_by_site: HashMap::from([(1, vec![rack(20, "R01"), rack(21, "R02")])]),
        devices_by_rack: HashMap::from([(20, vec![shared.clone()]), (21, vec![shared.clone()])]),
        tenant_devices: vec![shared],
        ..Default::default()
    };

    let model = ReportBuilder::new(&inventory).build(1).await.unwrap();
    assert_eq!(
        section_titles(&model.sections),
        vec!["DC-West", "R01", "srv-a", "R02"]
    );
}

#[tokio::test]
async fn patchpanel_resolves_remote_end_skipping_own_device() {
    // Cable lists the patch panel itself first in b_terminations; resolution
    // must return sw1, never the querying device.
    let panel = device(5, "pp1", "Patchpanel");
    let cable: Cable = serde_json::from_value(json!({
        "id": 7,
        "type": "cat6",
        "length": 2.0,
        "length_unit": {"value": "m", "label": "Meters"},
        "color": "2196f3",
        "a_terminations": [termination(5, "pp1")],
        "b_terminations": [termination(5, "pp1"), termination(9, "sw1")]
    }))
    .unwrap();

    let inventory = FixtureInventory {
        tenant: Some(tenant()),
        sites: vec![site(1, "DC-West")],
        racks_by_site: HashMap::from([(1, vec![rack(20, "R01")])]),
        devices_by_rack: HashMap::from([(20, vec![panel.clone()])]),
        tenant_devices: vec![panel],
        front_ports_by_device: HashMap::from([(
            5,
            vec![front_port(1, "1", Some(7)), front_port(2, "2", None)],
        )]),
        cables: HashMap::from([(7, cable)]),
        ..Default::default()
    };

    let model = ReportBuilder::new(&inventory).build(1).await.unwrap();
    let details = device_section(&model.sections, "pp1");

    assert_eq!(details.tables.len(), 1); // front ports only, no rear ports or interfaces
    let table = &details.tables[0];
    assert_eq!(table.title, "Front-Ports");
    assert_eq!(
        table.rows[0],
        vec!["1", "8P8C", "sw1", "cat6", "2 m", "Blue"]
    );
    // Port without a cable renders N/A across the connectivity columns.
    assert_eq!(table.rows[1], vec!["2", "8P8C", "N/A", "N/A", "N/A", "N/A"]);
}

#[tokio::test]
async fn interface_vlans_and_addresses_filled_even_without_cable() {
    let server = device(100, "srv-a", "Server");
    let iface: Interface = serde_json::from_value(json!({
        "id": 1,
        "name": "eth0",
        "type": {"value": "1000base-t", "label": "1000BASE-T"},
        "cable": null,
        "ip_addresses": [{"address": "10.0.0.5/24"}, {"address": "10.0.1.5/24"}],
        "untagged_vlan": {"vid": 10, "name": "mgmt"},
        "tagged_vlans": [{"vid": 20, "name": "prod"}, {"vid": 30, "name": "lab"}]
    }))
    .unwrap();

    let inventory = FixtureInventory {
        tenant: Some(tenant()),
        sites: vec![site(1, "DC-West")],
        tenant_devices: vec![server],
        interfaces_by_device: HashMap::from([(100, vec![iface])]),
        ..Default::default()
    };

    let model = ReportBuilder::new(&inventory).build(1).await.unwrap();
    let details = device_section(&model.sections, "srv-a");
    let table = &details.tables[0];

    assert_eq!(table.title, "Interfaces");
    assert_eq!(
        table.rows[0],
        vec![
            "eth0",
            "1000BASE-T",
            "10U,20T,30T",
            "10.0.0.5/24, 10.0.1.5/24",
            "N/A",
            "N/A",
            "N/A",
            "N/A"
        ]
    );
}

#[tokio::test]
async fn unresolvable_cable_degrades_to_na_cells() {
    let server = device(100, "srv-a", "Server");
    // Cable reference exists but the detail fetch fails.
    let inventory = FixtureInventory {
        tenant: Some(tenant()),
        sites: vec![site(1, "DC-West")],
        tenant_devices: vec![server],
        interfaces_by_device: HashMap::from([(100, vec![interface(1, "eth0", Some(404))])]),
        ..Default::default()
    };

    let model = ReportBuilder::new(&inventory).build(1).await.unwrap();
    let table = &device_section(&model.sections, "srv-a").tables[0];
    assert_eq!(&table.rows[0][4..], ["N/A", "N/A", "N/A", "N/A"]);
}

#[tokio::test]
async fn interface_fetch_failure_skips_table_but_not_other_devices() {
    let broken = device(100, "srv-broken", "Server");
    let healthy = device(101, "srv-ok", "Server");

    let inventory = FixtureInventory {
        tenant: Some(tenant()),
        sites: vec![site(1, "DC-West")],
        tenant_devices: vec![broken, healthy],
        interfaces_by_device: HashMap::from([(101, vec![interface(2, "eth0", None)])]),
        fail_interfaces_for: HashSet::from([100]),
        ..Default::default()
    };

    let model = ReportBuilder::new(&inventory).build(1).await.unwrap();

    let broken_details = device_section(&model.sections, "srv-broken");
    assert!(broken_details.tables.is_empty());

    let healthy_details = device_section(&model.sections, "srv-ok");
    assert_eq!(healthy_details.tables.len(), 1);
}

#[tokio::test]
async fn missing_tenant_aborts_the_build() {
    let inventory = FixtureInventory {
        tenant: None,
        sites: vec![site(1, "DC-West")],
        ..Default::default()
    };

    let result = ReportBuilder::new(&inventory).build(1).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn report_model_serializes_to_json() {
    let inventory = FixtureInventory {
        tenant: Some(tenant()),
        sites: vec![site(1, "DC-West")],
        tenant_devices: vec![device(100, "srv-a", "Server")],
        ..Default::default()
    };

    let model = ReportBuilder::new(&inventory).build(1).await.unwrap();
    let json = netbox_report::export_report_json(&model).unwrap();
    assert!(json.contains("\"srv-a\""));
    assert!(json.contains("\"kind\": \"device\""));
}
