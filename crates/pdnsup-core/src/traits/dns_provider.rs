// # DNS Provider Trait
//
// Defines the interface for replacing a record set via an authority server's
// management API.
//
// ## Implementations
//
// - PowerDNS zone-patch API: `pdnsup-provider-powerdns` crate

use async_trait::async_trait;
use std::net::Ipv4Addr;

/// Trait for DNS provider implementations
///
/// A provider call replaces the full A record set for `record_name` with the
/// single address `ip` (overwrite semantics, not append), so repeating a
/// call with identical inputs is safe.
///
/// Providers are single-shot: exactly one outbound request per invocation
/// and no retry inside the call. Whether and when to try again is owned by
/// the update loop, which reschedules every failure at the next interval.
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Replace the record set for `record_name` with `ip`
    ///
    /// # Parameters
    ///
    /// - `record_name`: Fully-qualified record name with trailing dot
    ///   (e.g. "host1.example.com.")
    /// - `ip`: The IPv4 address to publish
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The authority server acknowledged the replacement
    /// - `Err(Error)`: A publish error ([`Serialization`],
    ///   [`RequestConstruction`], [`Transport`], or [`UnexpectedStatus`])
    ///
    /// [`Serialization`]: crate::Error::Serialization
    /// [`RequestConstruction`]: crate::Error::RequestConstruction
    /// [`Transport`]: crate::Error::Transport
    /// [`UnexpectedStatus`]: crate::Error::UnexpectedStatus
    async fn update_record(&self, record_name: &str, ip: Ipv4Addr) -> Result<(), crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
