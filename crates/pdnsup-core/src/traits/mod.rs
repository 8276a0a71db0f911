//! Core traits for the update agent
//!
//! This module defines the abstract interfaces the agent is assembled from.
//!
//! - [`IpSource`]: Resolve the local address the record should point at
//! - [`DnsProvider`]: Replace the record set via the authority server API

pub mod dns_provider;
pub mod ip_source;

pub use dns_provider::DnsProvider;
pub use ip_source::IpSource;
