//! NetBox inventory client
//!
//! Read-only queries against the NetBox REST API. Every collection fetch
//! follows the `next` link until exhausted, so inventories larger than one
//! page are returned in full.

use anyhow::{Context, Result, anyhow};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use crate::config::Settings;
use crate::models::{Cable, Device, FrontPort, Interface, Page, Rack, RearPort, Site, Tenant};

/// Query surface of the inventory service.
///
/// The report builder is generic over this trait; tests substitute an
/// in-memory fixture for the HTTP client.
#[allow(async_fn_in_trait)]
pub trait Inventory {
    async fn tenant(&self, tenant_id: i64) -> Result<Tenant>;
    async fn sites_for_tenant(&self, tenant_id: i64) -> Result<Vec<Site>>;
    async fn racks_for_site(&self, site_id: i64) -> Result<Vec<Rack>>;
    async fn devices_for_rack(&self, rack_id: i64) -> Result<Vec<Device>>;
    async fn devices_for_tenant(&self, tenant_id: i64) -> Result<Vec<Device>>;
    async fn interfaces_for_device(&self, device_id: i64) -> Result<Vec<Interface>>;
    async fn front_ports_for_device(&self, device_id: i64) -> Result<Vec<FrontPort>>;
    async fn rear_ports_for_device(&self, device_id: i64) -> Result<Vec<RearPort>>;
    async fn cable(&self, cable_id: i64) -> Result<Cable>;
}

/// HTTP implementation of [`Inventory`] over the NetBox REST API.
pub struct InventoryClient {
    http: reqwest::Client,
    base_url: String,
    page_limit: usize,
}

impl InventoryClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Token {}", settings.api_token))
            .context("NETBOX_TOKEN contains characters invalid in an HTTP header")?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.http_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: settings.base_url.clone(),
            page_limit: settings.page_limit,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("NetBox returned {} for {}", status, url));
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse NetBox response from {}", url))
    }

    /// Fetch a single object by detail endpoint, e.g. `dcim/cables/17/`.
    async fn get_detail<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        self.get_json(&url).await
    }

    /// Fetch a full collection, following pagination `next` links.
    async fn get_all<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<Vec<T>> {
        let mut url = format!(
            "{}{}&limit={}",
            self.base_url, path_and_query, self.page_limit
        );
        let mut items = Vec::new();

        loop {
            let page: Page<T> = self.get_json(&url).await?;
            items.extend(page.results);
            match page.next {
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(items)
    }
}

impl Inventory for InventoryClient {
    async fn tenant(&self, tenant_id: i64) -> Result<Tenant> {
        self.get_detail(&format!("tenancy/tenants/{}/", tenant_id))
            .await
            .with_context(|| format!("Failed to fetch tenant {}", tenant_id))
    }

    async fn sites_for_tenant(&self, tenant_id: i64) -> Result<Vec<Site>> {
        self.get_all(&format!("dcim/sites/?tenant_id={}", tenant_id))
            .await
            .with_context(|| format!("Failed to fetch sites for tenant {}", tenant_id))
    }

    async fn racks_for_site(&self, site_id: i64) -> Result<Vec<Rack>> {
        self.get_all(&format!("dcim/racks/?site_id={}", site_id))
            .await
            .with_context(|| format!("Failed to fetch racks for site {}", site_id))
    }

    async fn devices_for_rack(&self, rack_id: i64) -> Result<Vec<Device>> {
        self.get_all(&format!("dcim/devices/?rack_id={}", rack_id))
            .await
            .with_context(|| format!("Failed to fetch devices for rack {}", rack_id))
    }

    async fn devices_for_tenant(&self, tenant_id: i64) -> Result<Vec<Device>> {
        self.get_all(&format!("dcim/devices/?tenant_id={}", tenant_id))
            .await
            .with_context(|| format!("Failed to fetch devices for tenant {}", tenant_id))
    }

    async fn interfaces_for_device(&self, device_id: i64) -> Result<Vec<Interface>> {
        self.get_all(&format!("dcim/interfaces/?device_id={}", device_id))
            .await
            .with_context(|| format!("Failed to fetch interfaces for device {}", device_id))
    }

    async fn front_ports_for_device(&self, device_id: i64) -> Result<Vec<FrontPort>> {
        self.get_all(&format!("dcim/front-ports/?device_id={}", device_id))
            .await
            .with_context(|| format!("Failed to fetch front ports for device {}", device_id))
    }

    async fn rear_ports_for_device(&self, device_id: i64) -> Result<Vec<RearPort>> {
        self.get_all(&format!("dcim/rear-ports/?device_id={}", device_id))
            .await
            .with_context(|| format!("Failed to fetch rear ports for device {}", device_id))
    }

    async fn cable(&self, cable_id: i64) -> Result<Cable> {
        self.get_detail(&format!("dcim/cables/{}/", cable_id))
            .await
            .with_context(|| format!("Failed to fetch cable {}", cable_id))
    }
}
