//! Configuration for the NetBox tenant report
//!
//! Connection settings come from the environment; page size and HTTP
//! timeout are runtime-tunable with clamped fallbacks.

use anyhow::{Context, Result};
use std::time::Duration;

/// Default page size for NetBox list endpoints.
pub const DEFAULT_PAGE_LIMIT: usize = 50;

/// Default HTTP request timeout.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse_u64(name: &str, default: u64, min: u64, max: u64) -> u64 {
    match env_var(name).and_then(|v| v.parse::<u64>().ok()) {
        Some(v) => v.clamp(min, max),
        None => default,
    }
}

fn env_parse_usize(name: &str, default: usize, min: usize, max: usize) -> usize {
    match env_var(name).and_then(|v| v.parse::<usize>().ok()) {
        Some(v) => v.clamp(min, max),
        None => default,
    }
}

/// Runtime-tunable page size for collection fetches.
/// Env: `NETBOX_PAGE_LIMIT`
pub fn page_limit() -> usize {
    env_parse_usize("NETBOX_PAGE_LIMIT", DEFAULT_PAGE_LIMIT, 1, 1000)
}

/// Runtime-tunable HTTP timeout.
/// Env: `NETBOX_HTTP_TIMEOUT_MS`
pub fn http_timeout() -> Duration {
    Duration::from_millis(env_parse_u64(
        "NETBOX_HTTP_TIMEOUT_MS",
        HTTP_TIMEOUT.as_millis() as u64,
        500,
        300_000,
    ))
}

/// Connection settings for the NetBox API.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base API URL, normalized to end with a single `/`.
    pub base_url: String,
    pub api_token: String,
    pub tenant_id: i64,
    pub page_limit: usize,
    pub http_timeout: Duration,
}

impl Settings {
    /// Load settings from `NETBOX_URL`, `NETBOX_TOKEN` and `TENANT_ID`.
    ///
    /// A tenant id passed on the command line takes precedence over the
    /// `TENANT_ID` variable, which is then not required.
    pub fn from_env(tenant_override: Option<i64>) -> Result<Self> {
        let base_url = env_var("NETBOX_URL")
            .context("NETBOX_URL is not set (expected e.g. https://netbox.example.com/api/)")?;
        let api_token = env_var("NETBOX_TOKEN").context("NETBOX_TOKEN is not set")?;
        let tenant_id = match tenant_override {
            Some(id) => id,
            None => env_var("TENANT_ID")
                .context("TENANT_ID is not set and no --tenant flag was given")?
                .parse::<i64>()
                .context("TENANT_ID is not a valid integer id")?,
        };

        Ok(Self {
            base_url: normalize_base_url(&base_url),
            api_token,
            tenant_id,
            page_limit: page_limit(),
            http_timeout: http_timeout(),
        })
    }
}

fn normalize_base_url(url: &str) -> String {
    format!("{}/", url.trim_end_matches('/'))
}
