// # pdnsup-core
//
// Core library for the PowerDNS dynamic-DNS update agent.
//
// ## Architecture Overview
//
// This library provides the core functionality for the update agent:
// - **IpSource**: Trait for resolving the local IPv4 address to publish
// - **DnsProvider**: Trait for replacing the record set via an authority API
// - **UpdateAgent**: The resolve → publish → sleep loop
// - **AgentConfig**: Immutable configuration built once at startup
//
// ## Design Principles
//
// 1. **Separation of Concerns**: The loop knows nothing about getifaddrs or
//    the authority wire format; those live behind the two traits
// 2. **Stateless Cycles**: Every cycle resolves and builds everything fresh;
//    nothing is persisted or cached across the sleep boundary
// 3. **Single-Shot Providers**: One outbound request per publish call; the
//    loop owns rescheduling by virtue of the fixed interval

pub mod agent;
pub mod config;
pub mod error;
pub mod traits;

// Re-export core types for convenience
pub use agent::UpdateAgent;
pub use config::{AgentConfig, ResolveFailurePolicy, DEFAULT_INTERVAL_SECS, DEFAULT_TTL};
pub use error::{Error, Result};
pub use traits::{DnsProvider, IpSource};
