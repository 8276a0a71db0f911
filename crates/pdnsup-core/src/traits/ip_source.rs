// # IP Source Trait
//
// Defines the interface for resolving the local IPv4 address that should be
// published.
//
// ## Implementations
//
// - Interface-based (getifaddrs): `pdnsup-ip-iface` crate

use async_trait::async_trait;
use std::net::Ipv4Addr;

/// Trait for IP source implementations
///
/// The agent polls [`current()`] once per update cycle; implementations
/// must read fresh host state on every call rather than caching an earlier
/// answer. A pure read: no side effects.
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// [`current()`]: IpSource::current
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Resolve the current IPv4 address
    ///
    /// # Returns
    ///
    /// - `Ok(Ipv4Addr)`: The address the record should point at
    /// - `Err(Error)`: A resolution error ([`InterfaceNotFound`],
    ///   [`AddressEnumeration`], or [`NoIpv4Address`])
    ///
    /// [`InterfaceNotFound`]: crate::Error::InterfaceNotFound
    /// [`AddressEnumeration`]: crate::Error::AddressEnumeration
    /// [`NoIpv4Address`]: crate::Error::NoIpv4Address
    async fn current(&self) -> Result<Ipv4Addr, crate::Error>;

    /// Get the source name (for logging/debugging)
    fn source_name(&self) -> &'static str;
}
