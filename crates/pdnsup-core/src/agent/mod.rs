//! Core update loop
//!
//! The [`UpdateAgent`] drives the whole program: once per cycle it resolves
//! the local IPv4 address via [`IpSource`], replaces the record set via
//! [`DnsProvider`], and sleeps for the configured interval.
//!
//! ## Cycle flow
//!
//! 1. Resolve the interface address
//! 2. Publish the replacement record set (one request, no retry)
//! 3. Sleep until the next cycle, or until shutdown
//!
//! Publish failures are reported and rescheduled implicitly by the next
//! cycle. Resolution failures follow the configured
//! [`ResolveFailurePolicy`]: they either terminate the loop (the default) or
//! are rescheduled like publish failures.
//!
//! The sleep is cancellable: the production entry point races it against
//! Ctrl-C so a supervisor can stop the process without waiting out the
//! interval.

use crate::config::{AgentConfig, ResolveFailurePolicy};
use crate::error::Result;
use crate::traits::{DnsProvider, IpSource};
use std::time::Duration;
use tracing::{error, info};

/// The update agent
///
/// Owns the IP source, the DNS provider, and the immutable configuration.
/// All state is per-cycle; nothing is carried across the sleep boundary.
pub struct UpdateAgent {
    /// IP source queried at the start of every cycle
    ip_source: Box<dyn IpSource>,

    /// DNS provider performing the record replacement
    provider: Box<dyn DnsProvider>,

    /// Fully-qualified record name, precomputed from the configuration
    record_name: String,

    /// Sleep interval between cycles
    interval: Duration,

    /// What to do when address resolution fails
    on_resolve_failure: ResolveFailurePolicy,
}

impl UpdateAgent {
    /// Create a new update agent
    ///
    /// Validates the configuration before anything runs.
    pub fn new(
        ip_source: Box<dyn IpSource>,
        provider: Box<dyn DnsProvider>,
        config: AgentConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            ip_source,
            provider,
            record_name: config.record_name(),
            interval: Duration::from_secs(config.interval_secs),
            on_resolve_failure: config.on_resolve_failure,
        })
    }

    /// Run the agent until shutdown
    ///
    /// Loops forever in the steady state; Ctrl-C interrupts the sleep and
    /// returns `Ok(())`. The only error path is a resolution failure under
    /// [`ResolveFailurePolicy::Exit`].
    pub async fn run(&self) -> Result<()> {
        self.run_internal(None).await
    }

    /// Internal run implementation that accepts an optional shutdown signal
    async fn run_internal(
        &self,
        shutdown_rx: Option<tokio::sync::oneshot::Receiver<()>>,
    ) -> Result<()> {
        info!(
            "update agent started: record {} via {} / {}",
            self.record_name,
            self.ip_source.source_name(),
            self.provider.provider_name()
        );

        if let Some(mut rx) = shutdown_rx {
            // Test mode: the sleep races a provided shutdown channel
            loop {
                self.cycle().await?;

                tokio::select! {
                    _ = tokio::time::sleep(self.interval) => {}
                    _ = &mut rx => {
                        info!("shutdown signal received");
                        break;
                    }
                }
            }
        } else {
            // Production mode: the sleep races Ctrl-C
            loop {
                self.cycle().await?;

                info!("sleeping for {}s", self.interval.as_secs());
                tokio::select! {
                    _ = tokio::time::sleep(self.interval) => {}
                    _ = tokio::signal::ctrl_c() => {
                        info!("shutdown signal received");
                        break;
                    }
                }
            }
        }

        info!("update agent stopped");
        Ok(())
    }

    /// Run one resolve-and-publish cycle
    ///
    /// Returns `Err` only for a resolution failure under
    /// [`ResolveFailurePolicy::Exit`]; every other outcome falls through to
    /// the next cycle.
    async fn cycle(&self) -> Result<()> {
        let ip = match self.ip_source.current().await {
            Ok(ip) => ip,
            Err(e) => {
                return match self.on_resolve_failure {
                    ResolveFailurePolicy::Exit => {
                        error!("address resolution failed: {}", e);
                        Err(e)
                    }
                    ResolveFailurePolicy::Retry => {
                        error!("address resolution failed: {}, retrying next cycle", e);
                        Ok(())
                    }
                };
            }
        };

        info!("resolved local address: {}", ip);

        match self.provider.update_record(&self.record_name, ip).await {
            Ok(()) => {
                info!("record {} updated to {}", self.record_name, ip);
            }
            Err(e) => {
                // Recoverable by the next cycle; never stops the loop
                error!("failed to update record {}: {}", self.record_name, e);
            }
        }

        Ok(())
    }

    /// Test-only helper to run the agent with a controlled shutdown signal
    ///
    /// Production code should use [`run()`](Self::run), which manages
    /// shutdown via Ctrl-C rather than a programmatic channel.
    pub async fn run_with_shutdown(
        &self,
        shutdown_rx: Option<tokio::sync::oneshot::Receiver<()>>,
    ) -> Result<()> {
        self.run_internal(shutdown_rx).await
    }
}
