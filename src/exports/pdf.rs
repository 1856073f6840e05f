//! PDF export functionality
//!
//! Renders the report model into a paginated PDF using printpdf: cover
//! page, one section flow, and a closing table-of-contents index.

use anyhow::Result;
use printpdf::*;
use std::io::BufWriter;

use crate::models::{Device, Rack, Site};
use crate::report::model::{ConnectivityTable, ReportModel, Section, SectionBody};

const FONT_SIZE_TITLE: f32 = 24.0;
const FONT_SIZE_HEADING: f32 = 16.0;
const FONT_SIZE_SUBHEADING: f32 = 12.0;
const FONT_SIZE_BODY: f32 = 10.0;

// Landscape A4; connectivity tables need the width.
const PAGE_WIDTH_MM: f32 = 297.0;
const PAGE_HEIGHT_MM: f32 = 210.0;
const MARGIN_LEFT_MM: f32 = 15.0;
const MARGIN_RIGHT_MM: f32 = 15.0;
const PAGE_TOP_Y: f32 = 190.0;
const PAGE_BOTTOM_Y: f32 = 15.0;
const LINE_STEP: f32 = 6.0;

/// Cursor over the current page; starts a fresh page when a block of the
/// given height no longer fits.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl<'a> PageWriter<'a> {
    fn new(doc: &'a PdfDocumentReference, layer: PdfLayerReference) -> Self {
        Self {
            doc,
            layer,
            y: PAGE_TOP_Y,
        }
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_TOP_Y;
    }

    fn ensure_space(&mut self, needed: f32) {
        if self.y - needed < PAGE_BOTTOM_Y {
            self.new_page();
        }
    }

    fn text_at(&self, text: &str, size: f32, x: f32, font: &IndirectFontRef) {
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    /// One full-width text line followed by a cursor step.
    fn line(&mut self, text: &str, size: f32, font: &IndirectFontRef) {
        self.ensure_space(LINE_STEP);
        self.text_at(text, size, MARGIN_LEFT_MM, font);
        self.y -= LINE_STEP;
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }
}

/// Generate the tenant report PDF.
pub fn generate_report_pdf(model: &ReportModel) -> Result<Vec<u8>> {
    let (doc, page1, layer1) = PdfDocument::new(
        "NetBox Device Report",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );

    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let font_bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut writer = PageWriter::new(&doc, doc.get_page(page1).get_layer(layer1));

    // === COVER PAGE ===
    writer.text_at("NetBox Device Report", FONT_SIZE_TITLE, MARGIN_LEFT_MM, &font_bold);
    writer.gap(15.0);

    let generated = model
        .generated_at
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string();
    writer.line(&format!("Generated: {}", generated), FONT_SIZE_BODY, &font);
    writer.gap(8.0);

    writer.line("Tenant Information", FONT_SIZE_HEADING, &font_bold);
    writer.line(&format!("Name: {}", model.tenant.name), FONT_SIZE_SUBHEADING, &font);
    writer.line(&format!("Slug: {}", model.tenant.slug), FONT_SIZE_SUBHEADING, &font);
    writer.line(
        &format!("Description: {}", or_na(&model.tenant.description)),
        FONT_SIZE_SUBHEADING,
        &font,
    );

    // === SECTIONS ===
    for section in &model.sections {
        draw_section(&mut writer, section, &font, &font_bold);
    }

    // === TABLE OF CONTENTS ===
    writer.new_page();
    writer.line("Table of Contents", FONT_SIZE_HEADING, &font_bold);
    writer.gap(4.0);
    for entry in &model.toc {
        let indent = "    ".repeat(entry.level as usize);
        writer.line(
            &format!("{}{} ...... {}", indent, entry.title, entry.position + 1),
            FONT_SIZE_BODY,
            &font,
        );
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)?;
    let bytes = buf.into_inner()?;

    Ok(bytes)
}

fn draw_section(
    writer: &mut PageWriter<'_>,
    section: &Section,
    font: &IndirectFontRef,
    font_bold: &IndirectFontRef,
) {
    writer.new_page();
    match &section.body {
        SectionBody::Location(site) => draw_location(writer, site, font, font_bold),
        SectionBody::Rack(rack) => draw_rack(writer, rack, font, font_bold),
        SectionBody::Device(details) => {
            draw_device(writer, &details.device, font, font_bold);
            for table in &details.tables {
                draw_table(writer, table, font, font_bold);
            }
        }
    }
}

fn draw_location(
    writer: &mut PageWriter<'_>,
    site: &Site,
    font: &IndirectFontRef,
    font_bold: &IndirectFontRef,
) {
    writer.line(&format!("Location: {}", site.name), FONT_SIZE_HEADING, font_bold);
    writer.gap(4.0);

    writer.line(&format!("Description: {}", or_na(&site.description)), FONT_SIZE_BODY, font);
    writer.line(
        &format!("Physical Address: {}", or_na(&site.physical_address)),
        FONT_SIZE_BODY,
        font,
    );
    writer.line(&format!("Facility: {}", or_na(&site.facility)), FONT_SIZE_BODY, font);

    let asns = site
        .asns
        .iter()
        .map(|a| a.asn.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    writer.line(&format!("ASN: {}", or_na(&asns)), FONT_SIZE_BODY, font);
    writer.line(
        &format!("Timezone: {}", site.time_zone.as_deref().unwrap_or("N/A")),
        FONT_SIZE_BODY,
        font,
    );
    writer.line(
        &format!("Latitude: {}", opt_num(site.latitude)),
        FONT_SIZE_BODY,
        font,
    );
    writer.line(
        &format!("Longitude: {}", opt_num(site.longitude)),
        FONT_SIZE_BODY,
        font,
    );
    writer.line(
        &format!(
            "Region: {}",
            site.region.as_ref().map_or("N/A", |r| r.name.as_str())
        ),
        FONT_SIZE_BODY,
        font,
    );
    writer.gap(3.0);

    writer.line(
        &format!(
            "Circuits: {}   Devices: {}   Prefixes: {}   Racks: {}   VMs: {}   VLANs: {}",
            site.circuit_count,
            site.device_count,
            site.prefix_count,
            site.rack_count,
            site.virtualmachine_count,
            site.vlan_count
        ),
        FONT_SIZE_BODY,
        font,
    );
}

fn draw_rack(
    writer: &mut PageWriter<'_>,
    rack: &Rack,
    font: &IndirectFontRef,
    font_bold: &IndirectFontRef,
) {
    writer.line(&format!("Rack: {}", rack.name), FONT_SIZE_HEADING, font_bold);
    writer.gap(4.0);

    writer.line(
        &format!(
            "Facility ID: {}",
            rack.facility_id.as_deref().unwrap_or("N/A")
        ),
        FONT_SIZE_BODY,
        font,
    );
    writer.line(
        &format!(
            "Type: {}",
            rack.rack_type.as_ref().map_or("N/A", |t| t.label.as_str())
        ),
        FONT_SIZE_BODY,
        font,
    );
    writer.line(
        &format!(
            "Width: {}",
            rack.width.as_ref().map_or("N/A", |w| w.label.as_str())
        ),
        FONT_SIZE_BODY,
        font,
    );
    writer.line(&format!("Height: {} U", rack.u_height), FONT_SIZE_BODY, font);
    writer.line(&format!("Status: {}", rack.status.label), FONT_SIZE_BODY, font);
    writer.line(
        &format!("Serial Number: {}", or_na(&rack.serial)),
        FONT_SIZE_BODY,
        font,
    );
    writer.line(
        &format!("Asset Tag: {}", rack.asset_tag.as_deref().unwrap_or("N/A")),
        FONT_SIZE_BODY,
        font,
    );
    writer.line(
        &format!(
            "Role: {}",
            rack.role.as_ref().map_or("N/A", |r| r.name.as_str())
        ),
        FONT_SIZE_BODY,
        font,
    );
    writer.line(
        &format!("Comments: {}", or_na(&rack.comments)),
        FONT_SIZE_BODY,
        font,
    );
}

fn draw_device(
    writer: &mut PageWriter<'_>,
    device: &Device,
    font: &IndirectFontRef,
    font_bold: &IndirectFontRef,
) {
    writer.line(
        &format!("Device Name: {}", device.name),
        FONT_SIZE_HEADING,
        font_bold,
    );
    writer.gap(4.0);

    writer.line(
        &format!("Device Type: {}", device.device_type.model),
        FONT_SIZE_BODY,
        font,
    );
    writer.line(
        &format!("Device Role: {}", device.role.name),
        FONT_SIZE_BODY,
        font,
    );
    writer.line(
        &format!("Serial Number: {}", or_na(&device.serial)),
        FONT_SIZE_BODY,
        font,
    );
    writer.line(
        &format!(
            "Asset Tag: {}",
            device.asset_tag.as_deref().unwrap_or("N/A")
        ),
        FONT_SIZE_BODY,
        font,
    );
    writer.line(&format!("Site: {}", device.site.name), FONT_SIZE_BODY, font);
    writer.line(
        &format!(
            "Location: {}",
            device.location.as_ref().map_or("N/A", |l| l.name.as_str())
        ),
        FONT_SIZE_BODY,
        font,
    );

    if let Some(rack) = &device.rack {
        writer.line(&format!("Rack: {}", rack.name), FONT_SIZE_BODY, font);
        writer.line(
            &format!("Rack Position: {}", opt_num(device.position)),
            FONT_SIZE_BODY,
            font,
        );
        writer.line(
            &format!(
                "Face: {}",
                device.face.as_ref().map_or("N/A", |f| f.label.as_str())
            ),
            FONT_SIZE_BODY,
            font,
        );
    }

    if !device.custom_fields.is_empty() {
        writer.gap(2.0);
        writer.line("Custom Fields:", FONT_SIZE_BODY, font_bold);
        for (field, value) in &device.custom_fields {
            writer.line(
                &format!(" - {}: {}", field, custom_field_text(value)),
                FONT_SIZE_BODY,
                font,
            );
        }
    }
}

/// One generic table renderer for all connectivity tables; columns are
/// spread evenly across the printable width.
fn draw_table(
    writer: &mut PageWriter<'_>,
    table: &ConnectivityTable,
    font: &IndirectFontRef,
    font_bold: &IndirectFontRef,
) {
    let col_width =
        (PAGE_WIDTH_MM - MARGIN_LEFT_MM - MARGIN_RIGHT_MM) / table.columns.len() as f32;
    let col_x = |i: usize| MARGIN_LEFT_MM + col_width * i as f32;

    let draw_header = |writer: &mut PageWriter<'_>| {
        for (i, column) in table.columns.iter().enumerate() {
            writer.text_at(column, FONT_SIZE_BODY, col_x(i), font_bold);
        }
        writer.y -= LINE_STEP;
    };

    writer.gap(4.0);
    writer.ensure_space(3.0 * LINE_STEP);
    writer.line(&format!("{}:", table.title), FONT_SIZE_SUBHEADING, font_bold);
    draw_header(writer);

    for row in &table.rows {
        if writer.y - LINE_STEP < PAGE_BOTTOM_Y {
            writer.new_page();
            writer.line(
                &format!("{} (continued):", table.title),
                FONT_SIZE_SUBHEADING,
                font_bold,
            );
            draw_header(writer);
        }
        for (i, cell) in row.iter().enumerate() {
            writer.text_at(cell, FONT_SIZE_BODY, col_x(i), font);
        }
        writer.y -= LINE_STEP;
    }
}

fn or_na(value: &str) -> &str {
    if value.is_empty() { "N/A" } else { value }
}

fn opt_num(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

fn custom_field_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "N/A".to_string(),
        other => other.to_string(),
    }
}
