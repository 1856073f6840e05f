use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::client::{Inventory, InventoryClient};
use crate::config::Settings;
use crate::exports::{default_json_filename, export_report_json, generate_report_pdf};
use crate::report::ReportBuilder;

pub(crate) async fn handle_report(
    tenant_id: Option<i64>,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let settings = Settings::from_env(tenant_id)?;
    crate::log_stderr!(
        "netbox-report v{} — generating report for tenant {}",
        env!("CARGO_PKG_VERSION"),
        settings.tenant_id
    );

    let client = InventoryClient::new(&settings)?;
    let model = ReportBuilder::new(&client).build(settings.tenant_id).await?;

    let path = match format {
        OutputFormat::Pdf => {
            let bytes = generate_report_pdf(&model).context("PDF rendering failed")?;
            let path = output.unwrap_or_else(|| PathBuf::from(model.default_pdf_filename()));
            std::fs::write(&path, bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            path
        }
        OutputFormat::Json => {
            let json = export_report_json(&model)?;
            let path = output.unwrap_or_else(|| PathBuf::from(default_json_filename(&model)));
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            path
        }
    };

    crate::log_stderr!(
        "Report written: {} sections, {} TOC entries",
        model.sections.len(),
        model.toc.len()
    );
    println!("{}", path.display());
    Ok(())
}

pub(crate) async fn handle_check(tenant_id: Option<i64>) -> Result<()> {
    let settings = Settings::from_env(tenant_id)?;
    let client = InventoryClient::new(&settings)?;

    let tenant = client.tenant(settings.tenant_id).await?;
    println!(
        "OK: tenant {} ('{}', slug '{}') reachable at {}",
        tenant.id, tenant.name, tenant.slug, settings.base_url
    );
    Ok(())
}
