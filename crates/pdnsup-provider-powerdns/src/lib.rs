// # PowerDNS Provider
//
// This crate provides a DNS provider implementation for the PowerDNS
// authority server's HTTP management API.
//
// A publish call is single-shot: build the zone patch, issue one PATCH,
// interpret the status. There is no retry, no backoff, and no caching here;
// the update loop owns rescheduling by running the next cycle.
//
// ## API Reference
//
// - Zone patch: PATCH `/api/v1/servers/localhost/zones/:zone_id`
// - Authentication: `X-API-Key` header
// - Success: 204 No Content with an empty body. Anything else, other 2xx
//   codes included, is a failure carrying the observed status code.
//
// ## Security
//
// The API key never appears in logs, and the Debug implementation redacts
// it.

use async_trait::async_trait;
use pdnsup_core::config::AgentConfig;
use pdnsup_core::traits::DnsProvider;
use pdnsup_core::{Error, Result};
use std::net::Ipv4Addr;
use std::time::Duration;
use tracing::{debug, info};

pub mod model;

pub use model::{Record, RrSet, ZonePatch};

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// PowerDNS authority server provider
///
/// # Dry-Run Mode
///
/// When `dry_run` is true, the provider logs the target URL and the
/// serialized zone patch instead of sending the request. This allows safe
/// testing of a deployment's configuration without touching the zone.
pub struct PowerDnsProvider {
    /// API key for the authority server; never log this value
    api_key: String,

    /// Authority server as host:port
    server: String,

    /// Zone the patch is addressed to, as configured
    zone: String,

    /// TTL applied to the published record set
    ttl: u32,

    /// HTTP client for API requests
    client: reqwest::Client,

    /// Dry-run mode: if true, log the intended patch but skip the request
    dry_run: bool,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for PowerDnsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PowerDnsProvider")
            .field("api_key", &"<REDACTED>")
            .field("server", &self.server)
            .field("zone", &self.zone)
            .field("ttl", &self.ttl)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl PowerDnsProvider {
    /// Create a new PowerDNS provider from the agent configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Agent configuration carrying server, API key, zone, TTL
    /// - `dry_run`: If true, log intended patches instead of sending them
    pub fn new(config: &AgentConfig, dry_run: bool) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::config("API key cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::request(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key: config.api_key.clone(),
            server: config.server.clone(),
            zone: config.zone.clone(),
            ttl: config.ttl,
            client,
            dry_run,
        })
    }

    /// The zone-patch endpoint URL for this provider's zone
    fn zone_url(&self) -> String {
        format!(
            "http://{}/api/v1/servers/localhost/zones/{}",
            self.server, self.zone
        )
    }
}

#[async_trait]
impl DnsProvider for PowerDnsProvider {
    /// Replace the A record set for `record_name` with `ip`
    ///
    /// Issues exactly one PATCH request. The REPLACE change type makes the
    /// call idempotent: the full record set for the name+type is overwritten,
    /// not appended to.
    async fn update_record(&self, record_name: &str, ip: Ipv4Addr) -> Result<()> {
        let patch = ZonePatch::replace_a(record_name, ip, self.ttl);
        let body = serde_json::to_vec(&patch)?;
        let url = self.zone_url();

        debug!("zone patch for {}: {} -> {}", self.zone, record_name, ip);

        if self.dry_run {
            info!(
                "[DRY-RUN] would send PATCH {} with payload: {}",
                url,
                String::from_utf8_lossy(&body)
            );
            return Ok(());
        }

        let request = self
            .client
            .patch(&url)
            .header("X-API-Key", &self.api_key)
            .header("Content-Type", "application/json")
            .body(body)
            .build()
            .map_err(|e| Error::request(e.to_string()))?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| Error::transport(e.to_string()))?;

        // The authority answers a successful patch with 204 and nothing
        // else; other 2xx codes mean the zone was not replaced as asked.
        let status = response.status();
        if status != reqwest::StatusCode::NO_CONTENT {
            return Err(Error::UnexpectedStatus(status.as_u16()));
        }

        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "powerdns"
    }
}
