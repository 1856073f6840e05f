//! NetBox Tenant Report — CLI entrypoint

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = netbox_report::logging::init_logging() {
        eprintln!("Warning: logging initialization failed: {}", e);
    }

    netbox_report::app::run(std::env::args()).await
}
