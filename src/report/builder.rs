//! Report model assembly
//!
//! Walks the tenant hierarchy (sites, racks, devices, ports/interfaces)
//! against the inventory, cross-referencing cables and VLANs into an
//! ordered sequence of sections plus a table-of-contents index.

use anyhow::{Context, Result};
use chrono::Utc;
use std::collections::HashSet;

use crate::client::Inventory;
use crate::models::{CableRef, Device};
use crate::report::colors::color_name_from_hex;
use crate::report::model::{
    ConnectivityTable, DeviceDetails, INTERFACE_COLUMNS, LEVEL_DEVICE, LEVEL_LOCATION, LEVEL_RACK,
    PORT_COLUMNS, ReportModel, Section, SectionBody, TocEntry,
};
use crate::report::terminations::remote_termination;
use crate::report::vlans::interface_vlans;

/// Device role whose front/rear ports are reported separately from its
/// logical interfaces.
const PATCHPANEL_ROLE: &str = "Patchpanel";

const NOT_AVAILABLE: &str = "N/A";

/// Assembles a [`ReportModel`] from an [`Inventory`].
///
/// The traversal is a single sequential pass. Only the tenant and site
/// fetches are fatal; any deeper fetch failure is logged and degrades to an
/// empty collection so the remaining devices still get processed.
pub struct ReportBuilder<'a, C: Inventory> {
    inventory: &'a C,
    sections: Vec<Section>,
    toc: Vec<TocEntry>,
    /// Device ids already emitted. Spans the whole run so a device listed in
    /// several racks, or in a rack and the tenant-wide list, appears exactly
    /// once.
    processed: HashSet<i64>,
}

impl<'a, C: Inventory> ReportBuilder<'a, C> {
    pub fn new(inventory: &'a C) -> Self {
        Self {
            inventory,
            sections: Vec::new(),
            toc: Vec::new(),
            processed: HashSet::new(),
        }
    }

    /// Build the full report for one tenant.
    ///
    /// Fails only when the tenant itself or its site list cannot be
    /// fetched; no partial report is produced in that case.
    pub async fn build(mut self, tenant_id: i64) -> Result<ReportModel> {
        let tenant = self
            .inventory
            .tenant(tenant_id)
            .await
            .context("Report aborted: tenant fetch failed")?;
        let sites = self
            .inventory
            .sites_for_tenant(tenant_id)
            .await
            .context("Report aborted: site list fetch failed")?;

        crate::log_stderr!(
            "Building report for tenant '{}' ({} sites)",
            tenant.name,
            sites.len()
        );

        for site in sites {
            let site_id = site.id;
            self.push_section(site.name.clone(), LEVEL_LOCATION, SectionBody::Location(site));

            // Complete tenant device list, cached for this site's processing
            // only. Used after the racks to surface unracked devices.
            let all_devices = self
                .or_empty(
                    self.inventory.devices_for_tenant(tenant_id).await,
                    "devices for tenant",
                    tenant_id,
                );

            let racks = self
                .or_empty(
                    self.inventory.racks_for_site(site_id).await,
                    "racks for site",
                    site_id,
                );

            for rack in racks {
                let rack_id = rack.id;
                self.push_section(rack.name.clone(), LEVEL_RACK, SectionBody::Rack(rack));

                let devices = self
                    .or_empty(
                        self.inventory.devices_for_rack(rack_id).await,
                        "devices for rack",
                        rack_id,
                    );
                for device in devices {
                    self.emit_device(device).await;
                }
            }

            // Second pass over the complete list catches devices with no
            // rack assignment; emit_device skips anything already seen.
            for device in all_devices {
                self.emit_device(device).await;
            }
        }

        Ok(ReportModel {
            tenant,
            generated_at: Utc::now(),
            sections: self.sections,
            toc: self.toc,
        })
    }

    /// Emit a device section with its connectivity tables, unless the
    /// device id was already processed earlier in the run.
    async fn emit_device(&mut self, device: Device) {
        if !self.processed.insert(device.id) {
            crate::log_debug!("Device {} ('{}') already emitted", device.id, device.name);
            return;
        }

        let tables = self.assemble_tables(&device).await;
        self.push_section(
            device.name.clone(),
            LEVEL_DEVICE,
            SectionBody::Device(DeviceDetails { device, tables }),
        );
    }

    /// Port/interface assembly for one device.
    ///
    /// Patch panels get Front-Ports and Rear-Ports tables; every device gets
    /// an Interfaces table. Empty collections produce no table.
    async fn assemble_tables(&self, device: &Device) -> Vec<ConnectivityTable> {
        let mut tables = Vec::new();

        if device.role.name == PATCHPANEL_ROLE {
            let front_ports = self
                .or_empty(
                    self.inventory.front_ports_for_device(device.id).await,
                    "front ports for device",
                    device.id,
                );
            let mut table = ConnectivityTable::new("Front-Ports", PORT_COLUMNS);
            for port in &front_ports {
                let mut row = vec![port.name.clone(), port.port_type.label.clone()];
                row.extend(self.connectivity_cells(device.id, port.cable.as_ref()).await);
                table.rows.push(row);
            }
            if !table.rows.is_empty() {
                tables.push(table);
            }

            let rear_ports = self
                .or_empty(
                    self.inventory.rear_ports_for_device(device.id).await,
                    "rear ports for device",
                    device.id,
                );
            let mut table = ConnectivityTable::new("Rear-Ports", PORT_COLUMNS);
            for port in &rear_ports {
                let mut row = vec![port.name.clone(), port.port_type.label.clone()];
                row.extend(self.connectivity_cells(device.id, port.cable.as_ref()).await);
                table.rows.push(row);
            }
            if !table.rows.is_empty() {
                tables.push(table);
            }
        }

        let interfaces = self
            .or_empty(
                self.inventory.interfaces_for_device(device.id).await,
                "interfaces for device",
                device.id,
            );
        let mut table = ConnectivityTable::new("Interfaces", INTERFACE_COLUMNS);
        for interface in &interfaces {
            let addresses = interface
                .ip_addresses
                .iter()
                .map(|ip| ip.address.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let mut row = vec![
                interface.name.clone(),
                interface.if_type.label.clone(),
                interface_vlans(interface),
                addresses,
            ];
            row.extend(
                self.connectivity_cells(device.id, interface.cable.as_ref())
                    .await,
            );
            table.rows.push(row);
        }
        if !table.rows.is_empty() {
            tables.push(table);
        }

        tables
    }

    /// The four connectivity cells shared by all table kinds:
    /// remote device name, cable type, length, color.
    ///
    /// No cable, an unfetchable cable, or a cable with no opposite-device
    /// termination all render as "N/A" across the board.
    async fn connectivity_cells(&self, device_id: i64, cable_ref: Option<&CableRef>) -> [String; 4] {
        let Some(cable_ref) = cable_ref else {
            return unavailable_cells();
        };

        let cable = match self.inventory.cable(cable_ref.id).await {
            Ok(cable) => cable,
            Err(e) => {
                crate::log_warn!("Skipping cable {} for device {}: {:#}", cable_ref.id, device_id, e);
                return unavailable_cells();
            }
        };

        match remote_termination(device_id, &cable) {
            Some(remote) => [
                remote.object.device.name.clone(),
                cable
                    .cable_type
                    .clone()
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                cable.length_text(),
                color_name_from_hex(cable.color.as_deref()).to_string(),
            ],
            None => unavailable_cells(),
        }
    }

    fn push_section(&mut self, title: String, level: u8, body: SectionBody) {
        self.toc.push(TocEntry {
            title: title.clone(),
            level,
            position: self.sections.len(),
        });
        self.sections.push(Section { title, level, body });
    }

    /// Degrade a failed collection fetch to an empty list, logging the
    /// operation and its input id.
    fn or_empty<T>(&self, result: Result<Vec<T>>, what: &str, id: i64) -> Vec<T> {
        match result {
            Ok(items) => items,
            Err(e) => {
                crate::log_warn!("Failed to fetch {} {}: {:#}", what, id, e);
                Vec::new()
            }
        }
    }
}

fn unavailable_cells() -> [String; 4] {
    std::array::from_fn(|_| NOT_AVAILABLE.to_string())
}
