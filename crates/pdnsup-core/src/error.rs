//! Error types for the update agent
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the update agent
#[derive(Error, Debug)]
pub enum Error {
    /// The named network interface does not exist on this host
    #[error("interface not found: {0}")]
    InterfaceNotFound(String),

    /// The host's interface addresses could not be enumerated
    #[error("failed to enumerate addresses for interface {interface}: {source}")]
    AddressEnumeration {
        /// Interface that was being resolved
        interface: String,
        /// Underlying read error
        source: std::io::Error,
    },

    /// The interface exists but carries no IPv4 address
    #[error("no IPv4 address found for interface {0}")]
    NoIpv4Address(String),

    /// The update document could not be serialized
    #[error("failed to serialize update document: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The HTTP request could not be constructed
    #[error("failed to construct request: {0}")]
    RequestConstruction(String),

    /// The request could not be delivered (connection/network failure)
    #[error("transport error: {0}")]
    Transport(String),

    /// The authority server answered with something other than 204
    #[error("unexpected status {0} from authority server")]
    UnexpectedStatus(u16),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a request construction error
    pub fn request(msg: impl Into<String>) -> Self {
        Self::RequestConstruction(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Whether this error came from interface address resolution
    ///
    /// The update loop treats resolution errors differently from publish
    /// errors: with [`ResolveFailurePolicy::Exit`] they terminate the loop,
    /// while publish errors never do.
    ///
    /// [`ResolveFailurePolicy::Exit`]: crate::config::ResolveFailurePolicy
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            Self::InterfaceNotFound(_) | Self::AddressEnumeration { .. } | Self::NoIpv4Address(_)
        )
    }
}
