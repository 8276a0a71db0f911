// # pdnsupd - PowerDNS dynamic-DNS update daemon
//
// The pdnsupd daemon is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing the runtime and tracing
// 3. Wiring the interface IP source to the PowerDNS provider
// 4. Running the update agent until shutdown
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// ### Required
// - `PDNS_API_KEY`: API key for the authority server management API
// - `PDNS_OWN_NAME`: Owner name of the record inside the zone (e.g. "host1")
// - `PDNS_SERVER`: Authority server as host:port (e.g. "127.0.0.1:8081")
// - `PDNS_INTERFACE`: Network interface to publish (e.g. "eth0")
// - `PDNS_ZONE`: Zone the record lives in (e.g. "example.com.")
//
// ### Optional
// - `PDNS_TTL`: Record TTL in seconds (default 300)
// - `PDNS_INTERVAL`: Seconds between update cycles (default 1800)
// - `PDNS_ON_RESOLVE_FAILURE`: exit|retry on resolution failure (default exit)
// - `PDNS_LOG_LEVEL`: trace|debug|info|warn|error (default info)
// - `PDNS_MODE`: "dry-run" to log zone patches instead of sending them
//
// ## Example
//
// ```bash
// export PDNS_API_KEY=changeme
// export PDNS_OWN_NAME=host1
// export PDNS_SERVER=127.0.0.1:8081
// export PDNS_INTERFACE=eth0
// export PDNS_ZONE=example.com.
//
// pdnsupd
// ```

use anyhow::{Context, Result};
use pdnsup_core::config::{AgentConfig, DEFAULT_INTERVAL_SECS, DEFAULT_TTL, ResolveFailurePolicy};
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[cfg(all(feature = "iface", feature = "powerdns"))]
use pdnsup_core::UpdateAgent;
#[cfg(all(feature = "iface", feature = "powerdns"))]
use pdnsup_ip_iface::IfaceIpSource;
#[cfg(all(feature = "iface", feature = "powerdns"))]
use pdnsup_provider_powerdns::PowerDnsProvider;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

const USAGE: &str = "\
Usage: pdnsupd (configured entirely via environment variables)

Required:
  PDNS_API_KEY     API key for the authority server management API
  PDNS_OWN_NAME    owner name of the record inside the zone (e.g. host1)
  PDNS_SERVER      authority server as host:port (e.g. 127.0.0.1:8081)
  PDNS_INTERFACE   network interface to publish (e.g. eth0)
  PDNS_ZONE        zone the record lives in (e.g. example.com.)

Optional:
  PDNS_TTL                 record TTL in seconds (default 300)
  PDNS_INTERVAL            seconds between update cycles (default 1800)
  PDNS_ON_RESOLVE_FAILURE  exit|retry on address resolution failure (default exit)
  PDNS_LOG_LEVEL           trace|debug|info|warn|error (default info)
  PDNS_MODE                dry-run to log zone patches instead of sending them";

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (a fatal resolution failure lands here)
#[derive(Debug, Clone, Copy)]
enum AgentExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<AgentExitCode> for ExitCode {
    fn from(code: AgentExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
#[derive(Debug)]
struct Config {
    agent: AgentConfig,
    log_level: String,
    dry_run: bool,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    ///
    /// All configuration problems share one exit path; the missing-variable
    /// error carries the full usage text.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        const REQUIRED: [&str; 5] = [
            "PDNS_API_KEY",
            "PDNS_OWN_NAME",
            "PDNS_SERVER",
            "PDNS_INTERFACE",
            "PDNS_ZONE",
        ];

        // An empty value counts as unset, for required and optional alike
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let missing: Vec<&str> = REQUIRED
            .iter()
            .copied()
            .filter(|key| get(key).is_none())
            .collect();

        if !missing.is_empty() {
            anyhow::bail!(
                "missing required environment variables: {}\n\n{}",
                missing.join(", "),
                USAGE
            );
        }

        let ttl = match get("PDNS_TTL") {
            None => DEFAULT_TTL,
            Some(value) => value.parse().with_context(|| {
                format!("PDNS_TTL must be an integer number of seconds, got '{}'", value)
            })?,
        };

        let interval_secs = match get("PDNS_INTERVAL") {
            None => DEFAULT_INTERVAL_SECS,
            Some(value) => value.parse().with_context(|| {
                format!(
                    "PDNS_INTERVAL must be an integer number of seconds, got '{}'",
                    value
                )
            })?,
        };

        let on_resolve_failure: ResolveFailurePolicy = match get("PDNS_ON_RESOLVE_FAILURE") {
            None => ResolveFailurePolicy::default(),
            Some(value) => value.parse()?,
        };

        let log_level = get("PDNS_LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        match log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => anyhow::bail!(
                "PDNS_LOG_LEVEL '{}' is not valid. Valid levels: trace, debug, info, warn, error",
                other
            ),
        }

        let dry_run = get("PDNS_MODE")
            .map(|value| value.to_lowercase() == "dry-run")
            .unwrap_or(false);

        let agent = AgentConfig {
            interface: get("PDNS_INTERFACE").unwrap_or_default(),
            owner_name: get("PDNS_OWN_NAME").unwrap_or_default(),
            zone: get("PDNS_ZONE").unwrap_or_default(),
            server: get("PDNS_SERVER").unwrap_or_default(),
            api_key: get("PDNS_API_KEY").unwrap_or_default(),
            ttl,
            interval_secs,
            on_resolve_failure,
        };

        Ok(Self {
            agent,
            log_level,
            dry_run,
        })
    }
}

fn main() -> ExitCode {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{:#}", e);
            return AgentExitCode::ConfigError.into();
        }
    };

    // Validate configuration before doing any work
    if let Err(e) = config.agent.validate() {
        eprintln!("{}", e);
        return AgentExitCode::ConfigError.into();
    }

    // Initialize tracing
    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to set tracing subscriber: {}", e);
        return AgentExitCode::ConfigError.into();
    }

    info!("starting pdnsupd daemon");
    info!(
        "publishing {} from interface {} to {} every {}s (ttl {}s)",
        config.agent.record_name(),
        config.agent.interface,
        config.agent.server,
        config.agent.interval_secs,
        config.agent.ttl
    );

    if config.dry_run {
        warn!("running in DRY-RUN mode - no zone patches will be sent");
    }

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("failed to create tokio runtime: {}", e);
            return AgentExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run_agent(config).await {
            error!("agent error: {:#}", e);
            AgentExitCode::RuntimeError
        } else {
            AgentExitCode::CleanShutdown
        }
    });

    result.into()
}

/// Run the update agent, racing OS shutdown signals against the loop
#[cfg(all(feature = "iface", feature = "powerdns"))]
async fn run_agent(config: Config) -> Result<()> {
    let ip_source = IfaceIpSource::new(config.agent.interface.clone());
    let provider = PowerDnsProvider::new(&config.agent, config.dry_run)?;

    let agent = UpdateAgent::new(Box::new(ip_source), Box::new(provider), config.agent)?;

    tokio::select! {
        result = agent.run() => result.map_err(Into::into),
        signal = wait_for_shutdown() => {
            info!("received {}, shutting down", signal?);
            Ok(())
        }
    }
}

#[cfg(not(all(feature = "iface", feature = "powerdns")))]
async fn run_agent(_config: Config) -> Result<()> {
    anyhow::bail!("pdnsupd was built without the 'iface' and 'powerdns' features")
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("failed to setup SIGTERM handler: {}", e))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("failed to setup SIGINT handler: {}", e))?;

    let signal = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };

    Ok(signal)
}

/// Wait for shutdown signals (SIGINT only)
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| anyhow::anyhow!("failed to wait for CTRL-C: {}", e))?;
    Ok("SIGINT")
}
