//! Configuration types for the update agent
//!
//! The agent is configured once at startup with a single immutable
//! [`AgentConfig`]. The structure is passed explicitly into the update loop
//! and both operations; nothing reads the process environment after startup.

use crate::error::{Error, Result};

/// Default record TTL in seconds
pub const DEFAULT_TTL: u32 = 300;

/// Default sleep interval between update cycles in seconds (30 minutes)
pub const DEFAULT_INTERVAL_SECS: u64 = 1800;

/// Main agent configuration
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Network interface whose first IPv4 address is published (e.g. "eth0")
    pub interface: String,

    /// Owner name of the record inside the zone (e.g. "host1")
    pub owner_name: String,

    /// Zone the record lives in, with or without its trailing dot
    /// (e.g. "example.com." or "example.com")
    pub zone: String,

    /// Authority server API endpoint as host:port (e.g. "127.0.0.1:8081")
    pub server: String,

    /// API key sent as `X-API-Key` on every request
    pub api_key: String,

    /// TTL in seconds for the published record
    pub ttl: u32,

    /// Sleep interval between update cycles in seconds
    pub interval_secs: u64,

    /// What the loop does when interface address resolution fails
    pub on_resolve_failure: ResolveFailurePolicy,
}

impl AgentConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.interface.is_empty() {
            return Err(Error::config("interface name cannot be empty"));
        }

        if self.api_key.is_empty() {
            return Err(Error::config("API key cannot be empty"));
        }

        if self.server.is_empty() {
            return Err(Error::config("server cannot be empty"));
        }

        // The server is a bare host:port; the scheme and path are fixed
        // by the authority API endpoint.
        if self.server.contains("://") || self.server.contains('/') {
            return Err(Error::config(format!(
                "server must be host:port without scheme or path, got '{}'",
                self.server
            )));
        }

        if self.owner_name.ends_with('.') {
            return Err(Error::config(format!(
                "owner name must be relative to the zone, without trailing dot: '{}'",
                self.owner_name
            )));
        }

        validate_dns_name(&self.owner_name)?;
        validate_dns_name(self.zone.strip_suffix('.').unwrap_or(&self.zone))?;

        if self.ttl == 0 {
            return Err(Error::config("TTL must be at least 1 second"));
        }

        if self.interval_secs == 0 {
            return Err(Error::config("update interval must be at least 1 second"));
        }

        Ok(())
    }

    /// The fully-qualified record name `<owner>.<zone>.`
    ///
    /// Always carries exactly one trailing dot, whether or not the zone was
    /// configured with one.
    pub fn record_name(&self) -> String {
        let zone = self.zone.strip_suffix('.').unwrap_or(&self.zone);
        format!("{}.{}.", self.owner_name, zone)
    }
}

/// Loop behavior when interface address resolution fails
///
/// Publish failures always log-and-continue; resolution failures are local
/// configuration problems and default to stopping the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveFailurePolicy {
    /// Report the error and terminate the loop
    #[default]
    Exit,

    /// Report the error, skip this cycle, and try again next interval
    Retry,
}

impl std::str::FromStr for ResolveFailurePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "exit" => Ok(Self::Exit),
            "retry" => Ok(Self::Retry),
            other => Err(Error::config(format!(
                "invalid resolve failure policy '{}', expected 'exit' or 'retry'",
                other
            ))),
        }
    }
}

/// Validate that a string is a valid DNS name
///
/// Basic label validation per RFC 1035; not comprehensive but catches
/// common configuration mistakes before they reach the wire.
fn validate_dns_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::config("DNS name cannot be empty"));
    }

    if name.len() > 253 {
        return Err(Error::config(format!(
            "DNS name too long: {} chars (max 253): '{}'",
            name.len(),
            name
        )));
    }

    for label in name.split('.') {
        if label.is_empty() {
            return Err(Error::config(format!("DNS name has empty label: '{}'", name)));
        }

        if label.len() > 63 {
            return Err(Error::config(format!(
                "DNS label too long: {} chars (max 63): '{}'",
                label.len(),
                label
            )));
        }

        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(Error::config(format!(
                "DNS label contains invalid characters: '{}'",
                label
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(Error::config(format!(
                "DNS label cannot start or end with hyphen: '{}'",
                label
            )));
        }
    }

    Ok(())
}
