// # Interface IP Source
//
// This crate provides an IP source that reads the host's configured
// interface addresses and selects the first IPv4 address of a named
// interface.
//
// Enumeration goes through getifaddrs (via the `if-addrs` crate), which
// yields one entry per configured address. An interface that only carries
// IPv6 addresses therefore still appears by name, which lets the source
// distinguish "interface missing" from "interface has no IPv4 address".

use async_trait::async_trait;
use pdnsup_core::traits::IpSource;
use pdnsup_core::{Error, Result};
use std::net::{IpAddr, Ipv4Addr};
use tracing::debug;

/// IP source backed by a named local network interface
pub struct IfaceIpSource {
    /// Interface to resolve (e.g. "eth0")
    interface: String,
}

impl IfaceIpSource {
    /// Create a new interface IP source
    pub fn new(interface: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
        }
    }
}

#[async_trait]
impl IpSource for IfaceIpSource {
    /// Resolve the interface's first IPv4 address
    ///
    /// Reads the host's address table fresh on every call; nothing is
    /// cached between cycles.
    async fn current(&self) -> Result<Ipv4Addr> {
        let addrs = if_addrs::get_if_addrs().map_err(|e| Error::AddressEnumeration {
            interface: self.interface.clone(),
            source: e,
        })?;

        let ip = first_ipv4(
            &self.interface,
            addrs.iter().map(|entry| (entry.name.as_str(), entry.ip())),
        )?;

        debug!("interface {} resolved to {}", self.interface, ip);
        Ok(ip)
    }

    fn source_name(&self) -> &'static str {
        "iface"
    }
}

/// Select the first IPv4 address for `interface` among enumerated entries
///
/// Entries for other interfaces and IPv6 entries are ignored. Errors
/// distinguish an interface that is absent entirely from one that is
/// present without an IPv4 address.
fn first_ipv4<'a>(
    interface: &str,
    entries: impl IntoIterator<Item = (&'a str, IpAddr)>,
) -> Result<Ipv4Addr> {
    let mut seen = false;

    for (name, ip) in entries {
        if name != interface {
            continue;
        }
        seen = true;

        if let IpAddr::V4(v4) = ip {
            return Ok(v4);
        }
    }

    if seen {
        Err(Error::NoIpv4Address(interface.to_string()))
    } else {
        Err(Error::InterfaceNotFound(interface.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v4(a: u8, b: u8, c: u8, d: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(a, b, c, d))
    }

    fn v6_loopback() -> IpAddr {
        IpAddr::V6(std::net::Ipv6Addr::LOCALHOST)
    }

    #[test]
    fn picks_first_ipv4_of_named_interface() {
        let entries = vec![
            ("lo", v4(127, 0, 0, 1)),
            ("eth0", v6_loopback()),
            ("eth0", v4(203, 0, 113, 5)),
            ("eth0", v4(203, 0, 113, 6)),
        ];

        let ip = first_ipv4("eth0", entries).unwrap();
        assert_eq!(ip, Ipv4Addr::new(203, 0, 113, 5));
    }

    #[test]
    fn ipv6_only_interface_reports_no_ipv4() {
        let entries = vec![("eth0", v6_loopback())];

        match first_ipv4("eth0", entries) {
            Err(Error::NoIpv4Address(name)) => assert_eq!(name, "eth0"),
            other => panic!("expected NoIpv4Address, got {:?}", other),
        }
    }

    #[test]
    fn missing_interface_reports_not_found() {
        let entries = vec![("lo", v4(127, 0, 0, 1))];

        match first_ipv4("eth7", entries) {
            Err(Error::InterfaceNotFound(name)) => assert_eq!(name, "eth7"),
            other => panic!("expected InterfaceNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn nonexistent_interface_fails_on_host() {
        let source = IfaceIpSource::new("pdnsup-test-no-such-if");

        match source.current().await {
            Err(Error::InterfaceNotFound(_)) => {}
            other => panic!("expected InterfaceNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    #[cfg(target_os = "linux")]
    async fn loopback_resolves_on_host() {
        let source = IfaceIpSource::new("lo");

        let ip = source.current().await.expect("loopback has an IPv4 address");
        assert!(ip.is_loopback());
    }
}
