//! Test doubles and common utilities for update loop contract tests

use async_trait::async_trait;
use pdnsup_core::config::{AgentConfig, ResolveFailurePolicy};
use pdnsup_core::error::{Error, Result};
use pdnsup_core::traits::{DnsProvider, IpSource};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// An IP source that always resolves to a fixed address
pub struct FixedIpSource {
    ip: Ipv4Addr,
    calls: Arc<AtomicUsize>,
}

impl FixedIpSource {
    pub fn new(ip: Ipv4Addr) -> Self {
        Self {
            ip,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Handle onto the call counter, usable after the source is boxed
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl IpSource for FixedIpSource {
    async fn current(&self) -> Result<Ipv4Addr> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.ip)
    }

    fn source_name(&self) -> &'static str {
        "fixed"
    }
}

/// An IP source that always fails resolution
pub struct FailingIpSource {
    calls: Arc<AtomicUsize>,
}

impl FailingIpSource {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl IpSource for FailingIpSource {
    async fn current(&self) -> Result<Ipv4Addr> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Error::InterfaceNotFound("eth7".to_string()))
    }

    fn source_name(&self) -> &'static str {
        "failing"
    }
}

/// A provider that counts calls and records the published names
pub struct CountingProvider {
    calls: Arc<AtomicUsize>,
    published: Arc<Mutex<Vec<(String, Ipv4Addr)>>>,
    fail: bool,
}

impl CountingProvider {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            published: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// A provider whose every publish call fails with an unexpected status
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    /// Handle onto the published (name, ip) pairs
    pub fn published_handle(&self) -> Arc<Mutex<Vec<(String, Ipv4Addr)>>> {
        Arc::clone(&self.published)
    }
}

#[async_trait]
impl DnsProvider for CountingProvider {
    async fn update_record(&self, record_name: &str, ip: Ipv4Addr) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(Error::UnexpectedStatus(500));
        }

        self.published
            .lock()
            .unwrap()
            .push((record_name.to_string(), ip));
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "counting"
    }
}

/// A minimal valid configuration for loop tests
pub fn test_config(interval_secs: u64, policy: ResolveFailurePolicy) -> AgentConfig {
    AgentConfig {
        interface: "eth0".to_string(),
        owner_name: "host1".to_string(),
        zone: "example.com.".to_string(),
        server: "127.0.0.1:8081".to_string(),
        api_key: "test-key".to_string(),
        ttl: 300,
        interval_secs,
        on_resolve_failure: policy,
    }
}
